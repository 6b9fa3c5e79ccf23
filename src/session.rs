//! The publisher session: connect, open, publish one message, close, disconnect.
use crate::client::{ConnectRequest, MessageDescriptor, MessagingClient, ObjectDescriptor};
use crate::config::ConnectionConfig;
use crate::error::MqError;
use crate::message::{Message, MessageId};
use crate::options::{OpenOption, OpenOptions, PublishOptions};
use log::{debug, info, log, warn, Level};
use mq_publish_wire::reason::ReasonCode;
use mq_publish_wire::Verb;

/// Result of the publish step.
#[derive(Debug, Clone, PartialEq)]
pub enum PublishOutcome {
    /// the message was put, with this id
    Published(MessageId),
    /// nobody is subscribed to the topic, not a failure
    NoSubscribers(MqError),
    /// any other error
    Failed(MqError),
}

impl PublishOutcome {
    /// Sorts a put result into the three outcomes.
    pub fn classify(result: Result<MessageId, MqError>) -> PublishOutcome {
        match result {
            Ok(id) => PublishOutcome::Published(id),
            Err(e) if e.is_no_subs_matched() => PublishOutcome::NoSubscribers(e),
            Err(e) => PublishOutcome::Failed(e),
        }
    }

    /// the level this outcome is logged at
    pub fn level(&self) -> Level {
        match self {
            PublishOutcome::Published(_) | PublishOutcome::NoSubscribers(_) => Level::Info,
            PublishOutcome::Failed(_) => Level::Warn,
        }
    }

    pub fn message_id(&self) -> Option<&MessageId> {
        match self {
            PublishOutcome::Published(id) => Some(id),
            _ => None,
        }
    }
}

/// What each step of a session did. `None` means the step never ran.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionReport {
    pub connect: Option<Result<(), MqError>>,
    pub open: Option<Result<(), MqError>>,
    pub publish: Option<PublishOutcome>,
    pub close: Option<Result<(), MqError>>,
    pub disconnect: Option<Result<(), MqError>>,
}

impl SessionReport {
    /// id of the published message, if one was published
    pub fn message_id(&self) -> Option<&MessageId> {
        self.publish.as_ref().and_then(PublishOutcome::message_id)
    }
}

/// One connection, one topic, one message.
pub struct PublisherSession<C> {
    client: C,
    config: ConnectionConfig,
}

impl<C: MessagingClient> PublisherSession<C> {
    pub fn new(client: C, config: ConnectionConfig) -> PublisherSession<C> {
        PublisherSession { client, config }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Runs the whole sequence.
    ///
    /// Every step is awaited before the next starts. Whatever was acquired
    /// is released: an opened topic is closed and a connection is
    /// disconnected, even when a later step failed. Errors are logged and
    /// recorded in the report, never returned.
    pub async fn run(&self) -> SessionReport {
        let mut report = SessionReport::default();

        let request = ConnectRequest::from_config(&self.config);
        if request.tls.is_some() {
            info!("Will be running in TLS Mode");
        }
        debug!("connect request: {:?}", request);

        info!("Attempting Connection to MQ Server");
        let mut conn = match self.client.connect(&request).await {
            Ok(conn) => {
                info!("MQCONN to {} successful", self.config.queue_manager);
                report.connect = Some(Ok(()));
                conn
            }
            Err(e) => {
                warn!("Error Detected making Connection: {}", e);
                report.connect = Some(Err(e));
                return report;
            }
        };

        let od = ObjectDescriptor::topic(&self.config.topic);
        let options: OpenOptions = [OpenOption::Output].into_iter().collect();
        match self.client.open(&mut conn, &od, options).await {
            Ok(mut obj) => {
                info!("MQOPEN of {} successful", self.config.topic);
                report.open = Some(Ok(()));
                report.publish = Some(self.publish(&mut conn, &mut obj).await);
                report.close = Some(self.close(&mut conn, obj).await);
            }
            Err(e) => {
                warn!("Error Detected Opening MQ Connection: {}", e);
                report.open = Some(Err(e));
            }
        }

        report.disconnect = Some(self.disconnect(conn).await);
        report
    }

    async fn publish(&self, conn: &mut C::Connection, obj: &mut C::Object) -> PublishOutcome {
        let result = match Message::now().to_json() {
            Ok(payload) => {
                debug!("payload: {}", String::from_utf8_lossy(&payload));
                let mut md = MessageDescriptor::default();
                self.client
                    .put(conn, obj, &mut md, PublishOptions::for_publish(), &payload)
                    .await
                    .map(|_| md.message_id)
            }
            Err(e) => Err(MqError::failed(Verb::PUT, ReasonCode::UNEXPECTED_ERROR)
                .with_detail(e.to_string())),
        };

        let outcome = PublishOutcome::classify(result);
        let level = outcome.level();
        match &outcome {
            PublishOutcome::Published(id) => {
                log!(level, "MsgId: {}", id);
                log!(level, "MQPUT for Publish successful");
            }
            PublishOutcome::NoSubscribers(e) => {
                log!(
                    level,
                    "Publish unsuccessful because there are no subscribers: {}",
                    e.reason_str()
                );
            }
            PublishOutcome::Failed(e) => {
                log!(level, "Error Detected in Put operation: {}", e);
            }
        }
        outcome
    }

    async fn close(&self, conn: &mut C::Connection, obj: C::Object) -> Result<(), MqError> {
        let result = self.client.close(conn, obj).await;
        match &result {
            Ok(()) => info!("MQCLOSE successful"),
            Err(e) => warn!("Error Detected in Close operation: {}", e),
        }
        result
    }

    async fn disconnect(&self, conn: C::Connection) -> Result<(), MqError> {
        let result = self.client.disconnect(conn).await;
        match &result {
            Ok(()) => info!("MQDISC successful"),
            Err(e) => warn!("Error Detected in Disconnect operation: {}", e),
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use log::{LevelFilter, Log, Metadata, Record};
    use mq_publish_wire::reason::CompletionCode;
    use std::sync::Mutex;

    static RECORDS: Mutex<Vec<(Level, String)>> = Mutex::new(Vec::new());

    struct CaptureLogger;

    impl Log for CaptureLogger {
        fn enabled(&self, _metadata: &Metadata) -> bool {
            true
        }

        fn log(&self, record: &Record) {
            if record.target() == "mq_basic_publish::session" {
                RECORDS
                    .lock()
                    .unwrap()
                    .push((record.level(), record.args().to_string()));
            }
        }

        fn flush(&self) {}
    }

    static LOGGER: CaptureLogger = CaptureLogger;

    fn capture_logs() {
        let _ = log::set_logger(&LOGGER);
        log::set_max_level(LevelFilter::Trace);
    }

    /// level of the first captured line starting with `prefix`
    fn logged_level(prefix: &str) -> Option<Level> {
        RECORDS
            .lock()
            .unwrap()
            .iter()
            .find(|(_, line)| line.starts_with(prefix))
            .map(|(level, _)| *level)
    }

    /// succeeds everywhere except put, which returns `put_result`
    struct PutOnly(Result<(), MqError>);

    #[async_trait]
    impl MessagingClient for PutOnly {
        type Connection = ();
        type Object = ();

        async fn connect(&self, _request: &ConnectRequest) -> Result<(), MqError> {
            Ok(())
        }

        async fn open(
            &self,
            _conn: &mut (),
            _od: &ObjectDescriptor,
            _options: OpenOptions,
        ) -> Result<(), MqError> {
            Ok(())
        }

        async fn put(
            &self,
            _conn: &mut (),
            _obj: &mut (),
            md: &mut MessageDescriptor,
            _options: PublishOptions,
            _payload: &[u8],
        ) -> Result<(), MqError> {
            md.message_id = MessageId([9; 24]);
            self.0.clone()
        }

        async fn close(&self, _conn: &mut (), _obj: ()) -> Result<(), MqError> {
            Ok(())
        }

        async fn disconnect(&self, _conn: ()) -> Result<(), MqError> {
            Ok(())
        }
    }

    fn config() -> ConnectionConfig {
        ConnectionConfig {
            queue_manager: "QM1".to_string(),
            topic: "dev/topic".to_string(),
            host: "localhost".to_string(),
            port: 1414,
            channel: "DEV.APP.SVRCONN".to_string(),
            tls: None,
            credentials: None,
        }
    }

    #[tokio::test]
    async fn publish_lines_are_logged_at_the_outcome_level() {
        capture_logs();

        let no_subs = MqError::new(
            Verb::PUT,
            CompletionCode::Warning,
            ReasonCode::NO_SUBS_MATCHED,
        );
        let report = PublisherSession::new(PutOnly(Err(no_subs)), config()).run().await;
        let level = report.publish.as_ref().map(PublishOutcome::level);
        assert_eq!(level, Some(Level::Info));
        assert_eq!(
            logged_level("Publish unsuccessful because there are no subscribers"),
            level
        );

        let denied = MqError::failed(Verb::PUT, ReasonCode::NOT_AUTHORIZED);
        let report = PublisherSession::new(PutOnly(Err(denied)), config()).run().await;
        let level = report.publish.as_ref().map(PublishOutcome::level);
        assert_eq!(level, Some(Level::Warn));
        assert_eq!(logged_level("Error Detected in Put operation"), level);

        let report = PublisherSession::new(PutOnly(Ok(())), config()).run().await;
        assert_eq!(report.message_id(), Some(&MessageId([9; 24])));
        assert_eq!(logged_level("MsgId: 0909"), Some(Level::Info));
        assert_eq!(logged_level("MQPUT for Publish successful"), Some(Level::Info));
    }

    #[test]
    fn no_subs_matched_is_informational() {
        let outcome = PublishOutcome::classify(Err(MqError::new(
            Verb::PUT,
            CompletionCode::Warning,
            ReasonCode::NO_SUBS_MATCHED,
        )));
        assert!(matches!(outcome, PublishOutcome::NoSubscribers(_)));
        assert_eq!(outcome.level(), Level::Info);
        assert!(outcome.message_id().is_none());
    }

    #[test]
    fn other_errors_are_warnings() {
        let outcome = PublishOutcome::classify(Err(MqError::failed(
            Verb::PUT,
            ReasonCode::NOT_AUTHORIZED,
        )));
        assert!(matches!(outcome, PublishOutcome::Failed(_)));
        assert_eq!(outcome.level(), Level::Warn);
    }

    #[test]
    fn success_keeps_the_id() {
        let id = MessageId::generate();
        let outcome = PublishOutcome::classify(Ok(id));
        assert_eq!(outcome.message_id(), Some(&id));
        assert_eq!(outcome.level(), Level::Info);
    }
}
