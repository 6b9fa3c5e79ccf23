//! Completion and reason codes carried in reply bodies.
//!
//! The numeric values are the ones the queue manager reports, so log lines
//! read the same as the vendor tooling.
use std::fmt::Display;

/// Completion code of an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionCode {
    Ok,
    Warning,
    Failed,
}

impl CompletionCode {
    pub fn code(&self) -> u32 {
        match self {
            CompletionCode::Ok => 0,
            CompletionCode::Warning => 1,
            CompletionCode::Failed => 2,
        }
    }

    /// Unknown values are treated as failures.
    pub fn from_code(code: u32) -> CompletionCode {
        match code {
            0 => CompletionCode::Ok,
            1 => CompletionCode::Warning,
            _ => CompletionCode::Failed,
        }
    }
}

impl Display for CompletionCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            CompletionCode::Ok => "MQCC_OK",
            CompletionCode::Warning => "MQCC_WARNING",
            CompletionCode::Failed => "MQCC_FAILED",
        };
        write!(f, "{} [{}]", name, self.code())
    }
}

/// Reason code of an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReasonCode(pub u32);

impl ReasonCode {
    pub const NONE: ReasonCode = ReasonCode(0);
    pub const CONNECTION_BROKEN: ReasonCode = ReasonCode(2009);
    pub const HCONN_ERROR: ReasonCode = ReasonCode(2018);
    pub const HOBJ_ERROR: ReasonCode = ReasonCode(2019);
    pub const NOT_AUTHORIZED: ReasonCode = ReasonCode(2035);
    pub const Q_MGR_NAME_ERROR: ReasonCode = ReasonCode(2058);
    pub const UNKNOWN_OBJECT_NAME: ReasonCode = ReasonCode(2085);
    pub const UNEXPECTED_ERROR: ReasonCode = ReasonCode(2195);
    pub const SSL_INITIALIZATION_ERROR: ReasonCode = ReasonCode(2393);
    pub const OBJECT_STRING_ERROR: ReasonCode = ReasonCode(2441);
    pub const HOST_NOT_AVAILABLE: ReasonCode = ReasonCode(2538);
    pub const UNKNOWN_CHANNEL_NAME: ReasonCode = ReasonCode(2540);
    pub const NO_SUBS_MATCHED: ReasonCode = ReasonCode(2550);

    /// symbolic name of the reason code, `None` for codes this crate does not know.
    pub fn name(&self) -> Option<&'static str> {
        let name = match *self {
            ReasonCode::NONE => "MQRC_NONE",
            ReasonCode::CONNECTION_BROKEN => "MQRC_CONNECTION_BROKEN",
            ReasonCode::HCONN_ERROR => "MQRC_HCONN_ERROR",
            ReasonCode::HOBJ_ERROR => "MQRC_HOBJ_ERROR",
            ReasonCode::NOT_AUTHORIZED => "MQRC_NOT_AUTHORIZED",
            ReasonCode::Q_MGR_NAME_ERROR => "MQRC_Q_MGR_NAME_ERROR",
            ReasonCode::UNKNOWN_OBJECT_NAME => "MQRC_UNKNOWN_OBJECT_NAME",
            ReasonCode::UNEXPECTED_ERROR => "MQRC_UNEXPECTED_ERROR",
            ReasonCode::SSL_INITIALIZATION_ERROR => "MQRC_SSL_INITIALIZATION_ERROR",
            ReasonCode::OBJECT_STRING_ERROR => "MQRC_OBJECT_STRING_ERROR",
            ReasonCode::HOST_NOT_AVAILABLE => "MQRC_HOST_NOT_AVAILABLE",
            ReasonCode::UNKNOWN_CHANNEL_NAME => "MQRC_UNKNOWN_CHANNEL_NAME",
            ReasonCode::NO_SUBS_MATCHED => "MQRC_NO_SUBS_MATCHED",
            _ => return None,
        };
        Some(name)
    }
}

impl Display for ReasonCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{} [{}]", name, self.0),
            None => write!(f, "MQRC [{}]", self.0),
        }
    }
}
