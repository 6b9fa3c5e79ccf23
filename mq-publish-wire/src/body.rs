//! Verb specific bodies.
//!
//! All integers are big endian. The connect body is opaque to this crate,
//! the client encodes it as JSON.
use crate::{
    constants::ID_LEN,
    error::FrameError,
    reason::{CompletionCode, ReasonCode},
};
use anyhow::{bail, Result};

fn read_u32(bytes: &[u8], at: usize) -> Option<u32> {
    let chunk: [u8; 4] = bytes.get(at..at + 4)?.try_into().ok()?;
    Some(u32::from_be_bytes(chunk))
}

fn read_id(bytes: &[u8], at: usize) -> Option<[u8; ID_LEN]> {
    bytes.get(at..at + ID_LEN)?.try_into().ok()
}

/// Body of an OPEN frame.
#[derive(Debug, Clone, PartialEq)]
pub struct OpenBody {
    pub object_type: u8,
    pub options: u32,
}

impl OpenBody {
    pub fn bytes(&self) -> Vec<u8> {
        let mut buffer = vec![self.object_type];
        buffer.extend(self.options.to_be_bytes());
        buffer
    }
}

impl TryFrom<&[u8]> for OpenBody {
    type Error = anyhow::Error;

    fn try_from(bytes: &[u8]) -> Result<OpenBody> {
        match (bytes.first(), read_u32(bytes, 1)) {
            (Some(object_type), Some(options)) => Ok(OpenBody {
                object_type: *object_type,
                options,
            }),
            _ => bail!(FrameError::InvalidBody("OPEN".to_string())),
        }
    }
}

/// Body of a PUT frame.
#[derive(Debug, Clone, PartialEq)]
pub struct PutBody {
    pub object_handle: u32,
    pub options: u32,
    pub message_id: [u8; ID_LEN],
    pub correl_id: [u8; ID_LEN],
    pub payload: Vec<u8>,
}

impl PutBody {
    /// bytes in front of the payload
    pub const FIXED_LEN: usize = 8 + 2 * ID_LEN;

    pub fn bytes(&self) -> Vec<u8> {
        let mut buffer = Vec::with_capacity(Self::FIXED_LEN + self.payload.len());
        buffer.extend(self.object_handle.to_be_bytes());
        buffer.extend(self.options.to_be_bytes());
        buffer.extend(self.message_id);
        buffer.extend(self.correl_id);
        buffer.extend(&self.payload);
        buffer
    }
}

impl TryFrom<&[u8]> for PutBody {
    type Error = anyhow::Error;

    fn try_from(bytes: &[u8]) -> Result<PutBody> {
        let parsed = (
            read_u32(bytes, 0),
            read_u32(bytes, 4),
            read_id(bytes, 8),
            read_id(bytes, 8 + ID_LEN),
        );
        match parsed {
            (Some(object_handle), Some(options), Some(message_id), Some(correl_id)) => {
                Ok(PutBody {
                    object_handle,
                    options,
                    message_id,
                    correl_id,
                    payload: bytes[Self::FIXED_LEN..].to_vec(),
                })
            }
            _ => bail!(FrameError::InvalidBody("PUT".to_string())),
        }
    }
}

/// Body of every reply frame: completion code, reason code and a verb specific tail.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub completion: CompletionCode,
    pub reason: ReasonCode,
    pub tail: Vec<u8>,
}

impl Reply {
    /// a successful reply with the given tail
    pub fn ok(tail: Vec<u8>) -> Reply {
        Reply {
            completion: CompletionCode::Ok,
            reason: ReasonCode::NONE,
            tail,
        }
    }

    /// a reply reporting `reason`
    pub fn with_reason(completion: CompletionCode, reason: ReasonCode) -> Reply {
        Reply {
            completion,
            reason,
            tail: vec![],
        }
    }

    pub fn bytes(&self) -> Vec<u8> {
        let mut buffer = Vec::with_capacity(8 + self.tail.len());
        buffer.extend(self.completion.code().to_be_bytes());
        buffer.extend(self.reason.0.to_be_bytes());
        buffer.extend(&self.tail);
        buffer
    }

    /// object handle carried by an OPEN_ACK
    pub fn object_handle(&self) -> Option<u32> {
        read_u32(&self.tail, 0)
    }

    /// message id carried by a PUT_ACK
    pub fn message_id(&self) -> Option<[u8; ID_LEN]> {
        read_id(&self.tail, 0)
    }
}

impl TryFrom<&[u8]> for Reply {
    type Error = anyhow::Error;

    /// Parses a `Reply` from a reply frame body.
    /// ```
    /// use mq_publish_wire::body::Reply;
    /// use mq_publish_wire::reason::ReasonCode;
    /// let reply = Reply::try_from(&[0u8, 0, 0, 1, 0, 0, 9, 246][..]).unwrap();
    /// assert_eq!(reply.reason, ReasonCode::NO_SUBS_MATCHED);
    /// ```
    fn try_from(bytes: &[u8]) -> Result<Reply> {
        match (read_u32(bytes, 0), read_u32(bytes, 4)) {
            (Some(completion), Some(reason)) => Ok(Reply {
                completion: CompletionCode::from_code(completion),
                reason: ReasonCode(reason),
                tail: bytes[8..].to_vec(),
            }),
            _ => bail!(FrameError::InvalidBody(format!("{} bytes", bytes.len()))),
        }
    }
}
