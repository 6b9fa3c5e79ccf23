//! `MessagingClient` over the gateway framing, on TCP or TLS.
use super::{
    ConnectRequest, MessageDescriptor, MessagingClient, ObjectDescriptor, ObjectType,
    TlsDescriptor,
};
use crate::error::MqError;
use crate::message::MessageId;
use crate::options::{OpenOptions, PublishOptions, PutOption};
use crate::stream;
use async_trait::async_trait;
use log::{debug, info, trace, warn};
use mq_publish_wire::body::{OpenBody, PutBody, Reply};
use mq_publish_wire::constants::OBJECT_TYPE_TOPIC;
use mq_publish_wire::frame::Frame;
use mq_publish_wire::reason::{CompletionCode, ReasonCode};
use mq_publish_wire::Verb;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tokio_native_tls::native_tls::{Certificate, TlsConnector};
use tokio_native_tls::TlsStream;

/// Stream for plain and TLS connections
#[derive(Debug)]
pub enum StreamType {
    Tcp(TcpStream),
    Tls(TlsStream<TcpStream>),
}

impl StreamType {
    async fn read_frame(&mut self) -> Result<Frame, tokio::io::Error> {
        match self {
            StreamType::Tcp(stream) => stream::read_frame(stream).await,
            StreamType::Tls(stream) => stream::read_frame(stream).await,
        }
    }

    async fn write_frame(&mut self, frame: &Frame) -> Result<(), tokio::io::Error> {
        match self {
            StreamType::Tcp(stream) => stream::write_frame(stream, frame).await,
            StreamType::Tls(stream) => stream::write_frame(stream, frame).await,
        }
    }

    async fn shutdown(&mut self) -> Result<(), tokio::io::Error> {
        match self {
            StreamType::Tcp(stream) => stream.shutdown().await,
            StreamType::Tls(stream) => stream.shutdown().await,
        }
    }
}

/// Body of a CONNECT frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectBody {
    pub channel: String,
    pub connect_options: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

/// A connection to the gateway
#[derive(Debug)]
pub struct GatewayConnection {
    stream: StreamType,
}

impl GatewayConnection {
    /// Sends `frame` and waits for its reply.
    ///
    /// Any completion other than OK is returned as an `MqError`.
    async fn exchange(&mut self, frame: Frame) -> Result<Reply, MqError> {
        let verb = frame.header.verb;
        let broken = |e: tokio::io::Error| {
            MqError::failed(verb, ReasonCode::CONNECTION_BROKEN).with_detail(e.to_string())
        };

        self.stream.write_frame(&frame).await.map_err(&broken)?;
        let response = self.stream.read_frame().await.map_err(&broken)?;
        trace!("response: {:?}", response.header);

        if Some(response.header.verb) != verb.ack() {
            return Err(MqError::failed(verb, ReasonCode::UNEXPECTED_ERROR)
                .with_detail(format!("unexpected reply {}", response.header.verb)));
        }
        let reply = Reply::try_from(response.body.as_slice()).map_err(|e| {
            MqError::failed(verb, ReasonCode::UNEXPECTED_ERROR).with_detail(e.to_string())
        })?;
        match reply.completion {
            CompletionCode::Ok => Ok(reply),
            completion => Err(MqError::new(verb, completion, reply.reason)),
        }
    }
}

/// An object opened through the gateway
#[derive(Debug)]
pub struct GatewayObject {
    handle: u32,
}

/// Messaging client speaking the gateway framing
#[derive(Debug, Clone, Default)]
pub struct GatewayClient;

impl GatewayClient {
    pub fn new() -> GatewayClient {
        GatewayClient
    }

    async fn connect_tls(
        &self,
        stream: TcpStream,
        host: &str,
        tls: &TlsDescriptor,
        cipher_spec: Option<&str>,
    ) -> anyhow::Result<StreamType> {
        // Load the trusted certificates
        let path = key_repository_file(&tls.key_repository);
        debug!("loading key repository {}", path.display());
        let ca_cert = tokio::fs::read(&path).await?;
        let ca_cert = Certificate::from_pem(&ca_cert)?;

        // Configure TLS, no client identity is presented
        let mut builder = TlsConnector::builder();
        builder.add_root_certificate(ca_cert);
        if let Some(cipher) = cipher_spec {
            builder.min_protocol_version(min_protocol_for(cipher));
        }
        let connector = tokio_native_tls::TlsConnector::from(builder.build()?);

        Ok(StreamType::Tls(connector.connect(host, stream).await?))
    }
}

#[async_trait]
impl MessagingClient for GatewayClient {
    type Connection = GatewayConnection;
    type Object = GatewayObject;

    async fn connect(&self, request: &ConnectRequest) -> Result<GatewayConnection, MqError> {
        let (host, port) = parse_connection_name(&request.channel.connection_name).ok_or_else(
            || {
                MqError::failed(Verb::CONNECT, ReasonCode::HOST_NOT_AVAILABLE).with_detail(
                    format!(
                        "invalid connection name {}",
                        request.channel.connection_name
                    ),
                )
            },
        )?;

        let tcp = TcpStream::connect((host.as_str(), port))
            .await
            .map_err(|e| {
                let reason = match e.kind() {
                    std::io::ErrorKind::ConnectionRefused => ReasonCode::HOST_NOT_AVAILABLE,
                    _ => ReasonCode::CONNECTION_BROKEN,
                };
                MqError::failed(Verb::CONNECT, reason).with_detail(e.to_string())
            })?;

        let stream = match &request.tls {
            Some(tls) => self
                .connect_tls(tcp, &host, tls, request.channel.cipher_spec.as_deref())
                .await
                .map_err(|e| {
                    MqError::failed(Verb::CONNECT, ReasonCode::SSL_INITIALIZATION_ERROR)
                        .with_detail(e.to_string())
                })?,
            None => StreamType::Tcp(tcp),
        };

        let body = ConnectBody {
            channel: request.channel.channel_name.clone(),
            connect_options: request.options.bits(),
            user: request.security.as_ref().map(|s| s.user_id.clone()),
            password: request.security.as_ref().and_then(|s| s.password.clone()),
        };
        let body = serde_json::to_vec(&body).map_err(|e| {
            MqError::failed(Verb::CONNECT, ReasonCode::UNEXPECTED_ERROR).with_detail(e.to_string())
        })?;
        let frame = Frame::new(Verb::CONNECT, request.queue_manager.clone(), body).map_err(|e| {
            MqError::failed(Verb::CONNECT, ReasonCode::Q_MGR_NAME_ERROR).with_detail(e.to_string())
        })?;

        let mut conn = GatewayConnection { stream };
        conn.exchange(frame).await?;
        info!("connected to gateway at {}:{}", host, port);
        Ok(conn)
    }

    async fn open(
        &self,
        conn: &mut GatewayConnection,
        od: &ObjectDescriptor,
        options: OpenOptions,
    ) -> Result<GatewayObject, MqError> {
        let object_type = match od.object_type {
            ObjectType::Topic => OBJECT_TYPE_TOPIC,
        };
        let body = OpenBody {
            object_type,
            options: options.bits(),
        };
        let frame = Frame::new(Verb::OPEN, od.object_string.clone(), body.bytes()).map_err(|e| {
            MqError::failed(Verb::OPEN, ReasonCode::OBJECT_STRING_ERROR).with_detail(e.to_string())
        })?;

        let reply = conn.exchange(frame).await?;
        let handle = reply.object_handle().ok_or_else(|| {
            MqError::failed(Verb::OPEN, ReasonCode::UNEXPECTED_ERROR)
                .with_detail("reply carries no object handle")
        })?;
        Ok(GatewayObject { handle })
    }

    async fn put(
        &self,
        conn: &mut GatewayConnection,
        obj: &mut GatewayObject,
        md: &mut MessageDescriptor,
        options: PublishOptions,
        payload: &[u8],
    ) -> Result<(), MqError> {
        if options.contains(PutOption::NewMsgId) {
            md.message_id = MessageId::generate();
        }
        if options.contains(PutOption::NewCorrelId) {
            md.correl_id = MessageId::generate();
        }
        let body = PutBody {
            object_handle: obj.handle,
            options: options.bits(),
            message_id: md.message_id.0,
            correl_id: md.correl_id.0,
            payload: payload.to_vec(),
        };
        let frame = Frame::new(Verb::PUT, String::new(), body.bytes()).map_err(|e| {
            MqError::failed(Verb::PUT, ReasonCode::UNEXPECTED_ERROR).with_detail(e.to_string())
        })?;

        let reply = conn.exchange(frame).await?;
        // the queue manager may have assigned its own id
        if let Some(id) = reply.message_id().map(MessageId) {
            if !id.is_none() {
                md.message_id = id;
            }
        }
        Ok(())
    }

    async fn close(&self, conn: &mut GatewayConnection, obj: GatewayObject) -> Result<(), MqError> {
        let frame = Frame::new(Verb::CLOSE, String::new(), obj.handle.to_be_bytes().to_vec())
            .map_err(|e| {
                MqError::failed(Verb::CLOSE, ReasonCode::HOBJ_ERROR).with_detail(e.to_string())
            })?;
        conn.exchange(frame).await?;
        Ok(())
    }

    async fn disconnect(&self, mut conn: GatewayConnection) -> Result<(), MqError> {
        let frame = Frame::new(Verb::DISCONNECT, String::new(), vec![]).map_err(|e| {
            MqError::failed(Verb::DISCONNECT, ReasonCode::HCONN_ERROR).with_detail(e.to_string())
        })?;
        let result = conn.exchange(frame).await;
        if let Err(e) = conn.stream.shutdown().await {
            warn!("error while shutting down the stream: {}", e);
        }
        result.map(|_| ())
    }
}

/// Splits a `host(port)` connection name.
fn parse_connection_name(name: &str) -> Option<(String, u16)> {
    let (host, rest) = name.trim().split_once('(')?;
    let port = rest.strip_suffix(')')?.trim().parse().ok()?;
    let host = host.trim();
    if host.is_empty() {
        return None;
    }
    Some((host.to_string(), port))
}

/// The key repository is named by its stem, the PEM bundle sits next to it.
fn key_repository_file(key_repository: &str) -> PathBuf {
    let path = PathBuf::from(key_repository);
    if path.extension().is_some() {
        path
    } else {
        path.with_extension("pem")
    }
}

/// Minimum protocol implied by a cipher spec.
fn min_protocol_for(cipher: &str) -> Option<native_tls::Protocol> {
    let cipher = cipher.to_ascii_uppercase();
    if cipher.contains("TLS12")
        || cipher.contains("TLS13")
        || cipher.ends_with("SHA256")
        || cipher.ends_with("SHA384")
    {
        Some(native_tls::Protocol::Tlsv12)
    } else {
        None
    }
}
