use chrono::{DateTime, SecondsFormat, Utc};
use mq_publish_wire::constants::ID_LEN;
use serde::Serialize;
use std::fmt;

/// Identifier of a message or of a correlation, 24 bytes.
#[derive(Clone, Copy, PartialEq, Eq, Default)]
pub struct MessageId(pub [u8; ID_LEN]);

impl MessageId {
    /// Generates a fresh id: a random v4 uuid followed by the current time in nanoseconds.
    pub fn generate() -> MessageId {
        let mut id = [0u8; ID_LEN];
        id[..16].copy_from_slice(uuid::Uuid::new_v4().as_bytes());
        let nanos = Utc::now().timestamp_nanos_opt().unwrap_or_default();
        id[16..].copy_from_slice(&nanos.to_be_bytes());
        MessageId(id)
    }

    /// true for the all zero id
    pub fn is_none(&self) -> bool {
        self.0.iter().all(|b| *b == 0)
    }

    /// lowercase hex, two digits per byte
    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{:02x}", b)).collect()
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MessageId({})", self.to_hex())
    }
}

/// The greeting published on the topic.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Message {
    #[serde(rename = "Greeting")]
    pub greeting: String,
    #[serde(rename = "Timestamp")]
    pub timestamp: String,
}

impl Message {
    /// builds the greeting for the given instant
    /// ```
    /// use chrono::{TimeZone, Utc};
    /// use mq_basic_publish::message::Message;
    /// let at = Utc.with_ymd_and_hms(2026, 10, 14, 9, 30, 0).unwrap();
    /// let msg = Message::greeting(at);
    /// assert_eq!(msg.timestamp, "2026-10-14T09:30:00Z");
    /// ```
    pub fn greeting(at: DateTime<Utc>) -> Message {
        let timestamp = at.to_rfc3339_opts(SecondsFormat::Secs, true);
        Message {
            greeting: format!("Hello from Rust at {}", timestamp),
            timestamp,
        }
    }

    /// greeting stamped with the current time
    pub fn now() -> Message {
        Message::greeting(Utc::now())
    }

    /// the JSON payload
    pub fn to_json(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }
}
