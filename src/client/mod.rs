//! The messaging client seam and the descriptors passed through it.
pub mod gateway;

use crate::config::ConnectionConfig;
use crate::error::MqError;
use crate::message::MessageId;
use crate::options::{ConnectOption, ConnectOptions, OpenOptions, PublishOptions};
use async_trait::async_trait;

/// Whether the channel asks the client for a certificate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientAuth {
    Required,
    Optional,
}

/// Client channel definition
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelDescriptor {
    /// `host(port)`
    pub connection_name: String,
    pub channel_name: String,
    pub cipher_spec: Option<String>,
    pub client_auth: ClientAuth,
}

/// TLS connection options
#[derive(Debug, Clone, PartialEq)]
pub struct TlsDescriptor {
    pub key_repository: String,
}

/// Security parameters
#[derive(Clone, PartialEq)]
pub struct SecurityDescriptor {
    pub user_id: String,
    pub password: Option<String>,
}

impl std::fmt::Debug for SecurityDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecurityDescriptor")
            .field("user_id", &self.user_id)
            .finish_non_exhaustive()
    }
}

/// Everything the client needs to connect
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectRequest {
    pub queue_manager: String,
    pub options: ConnectOptions,
    pub channel: ChannelDescriptor,
    pub tls: Option<TlsDescriptor>,
    pub security: Option<SecurityDescriptor>,
}

impl ConnectRequest {
    /// Builds the connect request for `config`.
    ///
    /// The TLS descriptor is attached only with a key repository and the
    /// security descriptor only with an application user.
    pub fn from_config(config: &ConnectionConfig) -> ConnectRequest {
        let mut channel = ChannelDescriptor {
            connection_name: config.connection_name(),
            channel_name: config.channel.clone(),
            cipher_spec: None,
            client_auth: ClientAuth::Required,
        };

        let tls = config.tls.as_ref().map(|tls| {
            channel.cipher_spec = tls.cipher_spec.clone();
            channel.client_auth = ClientAuth::Optional;
            TlsDescriptor {
                key_repository: tls.key_repository.clone(),
            }
        });

        let security = config
            .credentials
            .as_ref()
            .map(|credentials| SecurityDescriptor {
                user_id: credentials.user.clone(),
                password: credentials.password.clone(),
            });

        ConnectRequest {
            queue_manager: config.queue_manager.clone(),
            options: [ConnectOption::ClientBinding].into_iter().collect(),
            channel,
            tls,
            security,
        }
    }
}

/// Kind of object to open
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectType {
    Topic,
}

/// What to open
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectDescriptor {
    pub object_type: ObjectType,
    /// the topic string
    pub object_string: String,
}

impl ObjectDescriptor {
    pub fn topic(topic: &str) -> ObjectDescriptor {
        ObjectDescriptor {
            object_type: ObjectType::Topic,
            object_string: topic.to_string(),
        }
    }
}

/// Per message properties. The client fills in the ids on put.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MessageDescriptor {
    pub message_id: MessageId,
    pub correl_id: MessageId,
}

/// A messaging client.
///
/// Handles are moved into `close` and `disconnect` so each is released
/// at most once.
#[async_trait]
pub trait MessagingClient: Send + Sync {
    /// an open connection to a queue manager
    type Connection: Send;
    /// an object opened on a connection
    type Object: Send;

    async fn connect(&self, request: &ConnectRequest) -> Result<Self::Connection, MqError>;

    async fn open(
        &self,
        conn: &mut Self::Connection,
        od: &ObjectDescriptor,
        options: OpenOptions,
    ) -> Result<Self::Object, MqError>;

    async fn put(
        &self,
        conn: &mut Self::Connection,
        obj: &mut Self::Object,
        md: &mut MessageDescriptor,
        options: PublishOptions,
        payload: &[u8],
    ) -> Result<(), MqError>;

    async fn close(&self, conn: &mut Self::Connection, obj: Self::Object) -> Result<(), MqError>;

    async fn disconnect(&self, conn: Self::Connection) -> Result<(), MqError>;
}
