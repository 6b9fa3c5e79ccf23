use mq_publish_wire::reason::{CompletionCode, ReasonCode};
use mq_publish_wire::Verb;
use thiserror::Error;

fn detail_suffix(detail: &Option<String>) -> String {
    match detail {
        Some(detail) => format!(" ({detail})"),
        None => String::new(),
    }
}

/// Error reported by a messaging client operation.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{verb}: MQCC = {completion} MQRC = {reason}{}", detail_suffix(.detail))]
pub struct MqError {
    /// the operation that failed
    pub verb: Verb,
    pub completion: CompletionCode,
    pub reason: ReasonCode,
    /// local context, e.g. the io error behind a broken connection
    pub detail: Option<String>,
}

impl MqError {
    pub fn new(verb: Verb, completion: CompletionCode, reason: ReasonCode) -> MqError {
        MqError {
            verb,
            completion,
            reason,
            detail: None,
        }
    }

    /// a failed completion with the given reason
    pub fn failed(verb: Verb, reason: ReasonCode) -> MqError {
        MqError::new(verb, CompletionCode::Failed, reason)
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> MqError {
        self.detail = Some(detail.into());
        self
    }

    /// symbolic name of the reason code
    pub fn reason_str(&self) -> &'static str {
        self.reason.name().unwrap_or("MQRC_UNKNOWN")
    }

    /// true when a publish found nobody subscribed to the topic
    pub fn is_no_subs_matched(&self) -> bool {
        self.reason == ReasonCode::NO_SUBS_MATCHED
    }
}

/// Error reading the connection settings.
#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    /// a required variable is unset or empty
    #[error("Required environment variable `{0}` is not set")]
    Missing(&'static str),
    /// PORT is not a valid port number
    #[error("PORT must be a valid port number, got `{0}`")]
    InvalidPort(String),
}
