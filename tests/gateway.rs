use mq_basic_publish::client::gateway::{ConnectBody, GatewayClient};
use mq_basic_publish::config::{ConnectionConfig, Credentials};
use mq_basic_publish::session::{PublishOutcome, PublisherSession};
use mq_basic_publish::stream::{read_frame, write_frame};
use mq_basic_publish::{CompletionCode, ReasonCode, Verb};
use mq_publish_wire::body::{OpenBody, PutBody, Reply};
use mq_publish_wire::constants::OBJECT_TYPE_TOPIC;
use mq_publish_wire::frame::Frame;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

const OBJECT_HANDLE: u32 = 42;

/// Accepts one connection and answers every frame until DISCONNECT.
/// Returns the frames it received.
async fn fake_gateway(put_reply: Reply) -> (u16, JoinHandle<Vec<Frame>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut received = vec![];
        loop {
            let frame = match read_frame(&mut socket).await {
                Ok(frame) => frame,
                Err(_) => break,
            };
            let verb = frame.header.verb;
            let reply = match verb {
                Verb::OPEN => Reply::ok(OBJECT_HANDLE.to_be_bytes().to_vec()),
                Verb::PUT => put_reply.clone(),
                _ => Reply::ok(vec![]),
            };
            received.push(frame);
            let ack = Frame::new(verb.ack().unwrap(), String::new(), reply.bytes()).unwrap();
            write_frame(&mut socket, &ack).await.unwrap();
            if verb == Verb::DISCONNECT {
                break;
            }
        }
        received
    });
    (port, handle)
}

fn config(port: u16) -> ConnectionConfig {
    ConnectionConfig {
        queue_manager: "QM1".to_string(),
        topic: "dev/topic".to_string(),
        host: "127.0.0.1".to_string(),
        port,
        channel: "DEV.APP.SVRCONN".to_string(),
        tls: None,
        credentials: None,
    }
}

#[tokio::test]
async fn full_session_over_tcp() {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut assigned = [0u8; 24];
    assigned[0] = 0xAB;
    let (port, gateway) = fake_gateway(Reply::ok(assigned.to_vec())).await;

    let mut config = config(port);
    config.credentials = Some(Credentials {
        user: "app".to_string(),
        password: Some("passw0rd".to_string()),
    });
    let session = PublisherSession::new(GatewayClient::new(), config);
    let report = session.run().await;

    assert_eq!(report.connect, Some(Ok(())));
    assert_eq!(report.open, Some(Ok(())));
    assert_eq!(report.close, Some(Ok(())));
    assert_eq!(report.disconnect, Some(Ok(())));
    let id = report.message_id().unwrap();
    assert!(id.to_hex().starts_with("ab"));

    let frames = gateway.await.unwrap();
    let verbs: Vec<Verb> = frames.iter().map(|f| f.header.verb).collect();
    assert_eq!(
        verbs,
        vec![
            Verb::CONNECT,
            Verb::OPEN,
            Verb::PUT,
            Verb::CLOSE,
            Verb::DISCONNECT
        ]
    );

    assert_eq!(frames[0].name, "QM1");
    let connect: ConnectBody = serde_json::from_slice(&frames[0].body).unwrap();
    assert_eq!(connect.channel, "DEV.APP.SVRCONN");
    assert_eq!(connect.user.as_deref(), Some("app"));
    assert_eq!(connect.password.as_deref(), Some("passw0rd"));

    assert_eq!(frames[1].name, "dev/topic");
    let open = OpenBody::try_from(frames[1].body.as_slice()).unwrap();
    assert_eq!(open.object_type, OBJECT_TYPE_TOPIC);
    assert_eq!(open.options, 0x10);

    let put = PutBody::try_from(frames[2].body.as_slice()).unwrap();
    assert_eq!(put.object_handle, OBJECT_HANDLE);
    assert_eq!(put.options, 0x0008_00c4);
    assert_ne!(put.message_id, [0u8; 24]);
    let json: serde_json::Value = serde_json::from_slice(&put.payload).unwrap();
    assert!(json.get("Greeting").is_some());

    assert_eq!(frames[3].body, OBJECT_HANDLE.to_be_bytes().to_vec());
}

#[tokio::test]
async fn no_subscribers_over_tcp() {
    let (port, gateway) = fake_gateway(Reply::with_reason(
        CompletionCode::Warning,
        ReasonCode::NO_SUBS_MATCHED,
    ))
    .await;

    let session = PublisherSession::new(GatewayClient::new(), config(port));
    let report = session.run().await;

    match report.publish {
        Some(PublishOutcome::NoSubscribers(ref e)) => {
            assert_eq!(e.verb, Verb::PUT);
            assert_eq!(e.completion, CompletionCode::Warning);
        }
        ref other => panic!("expected no subscribers, got {:?}", other),
    }
    assert_eq!(report.close, Some(Ok(())));
    assert_eq!(report.disconnect, Some(Ok(())));
    assert_eq!(gateway.await.unwrap().len(), 5);
}

#[tokio::test]
async fn refused_connection_reports_host_not_available() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let session = PublisherSession::new(GatewayClient::new(), config(port));
    let report = session.run().await;

    match report.connect {
        Some(Err(ref e)) => {
            assert_eq!(e.verb, Verb::CONNECT);
            assert_eq!(e.reason, ReasonCode::HOST_NOT_AVAILABLE);
        }
        ref other => panic!("expected a connect error, got {:?}", other),
    }
    assert!(report.open.is_none());
    assert!(report.disconnect.is_none());
}

#[tokio::test]
async fn long_topic_opens_over_tcp() {
    let (port, gateway) = fake_gateway(Reply::ok(vec![])).await;
    let topic = format!("dev/{}", "a".repeat(300));

    let mut config = config(port);
    config.topic = topic.clone();
    let session = PublisherSession::new(GatewayClient::new(), config);
    let report = session.run().await;

    assert_eq!(report.open, Some(Ok(())));
    assert!(report.message_id().is_some());
    let frames = gateway.await.unwrap();
    assert_eq!(frames.len(), 5);
    assert_eq!(frames[1].name, topic);
    assert_eq!(frames[1].header.name_length, 304);
}
