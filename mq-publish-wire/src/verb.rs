use crate::constants::*;
use std::fmt::Display;

/// Operation carried by a frame
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    /// connect to a queue manager
    CONNECT = CONNECT,
    /// open an object for output
    OPEN = OPEN,
    /// put a message on an opened object
    PUT = PUT,
    /// close an opened object
    CLOSE = CLOSE,
    /// end the connection
    DISCONNECT = DISCONNECT,
    /// reply to connect
    CONNECTACK = CONNECTACK,
    /// reply to open
    OPENACK = OPENACK,
    /// reply to put
    PUTACK = PUTACK,
    /// reply to close
    CLOSEACK = CLOSEACK,
    /// reply to disconnect
    DISCONNECTACK = DISCONNECTACK,
}

impl Verb {
    /// returns the byte for the given verb
    /// ```
    /// use mq_publish_wire::verb::Verb;
    /// assert_eq!(Verb::PUT.byte(), mq_publish_wire::constants::PUT);
    /// ```
    pub fn byte(&self) -> u8 {
        *self as u8
    }

    /// returns the reply verb expected for a request verb.
    /// ```
    /// use mq_publish_wire::verb::Verb;
    /// assert_eq!(Verb::OPEN.ack(), Some(Verb::OPENACK));
    /// assert_eq!(Verb::OPENACK.ack(), None);
    /// ```
    pub fn ack(&self) -> Option<Verb> {
        match self {
            Verb::CONNECT => Some(Verb::CONNECTACK),
            Verb::OPEN => Some(Verb::OPENACK),
            Verb::PUT => Some(Verb::PUTACK),
            Verb::CLOSE => Some(Verb::CLOSEACK),
            Verb::DISCONNECT => Some(Verb::DISCONNECTACK),
            _ => None,
        }
    }
}

impl TryFrom<u8> for Verb {
    type Error = crate::error::HeaderError;

    fn try_from(byte: u8) -> Result<Verb, Self::Error> {
        let verb = match byte {
            CONNECT => Verb::CONNECT,
            OPEN => Verb::OPEN,
            PUT => Verb::PUT,
            CLOSE => Verb::CLOSE,
            DISCONNECT => Verb::DISCONNECT,
            CONNECTACK => Verb::CONNECTACK,
            OPENACK => Verb::OPENACK,
            PUTACK => Verb::PUTACK,
            CLOSEACK => Verb::CLOSEACK,
            DISCONNECTACK => Verb::DISCONNECTACK,
            other => return Err(crate::error::HeaderError::InvalidVerb(other)),
        };
        Ok(verb)
    }
}

impl Display for Verb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let verb = match self {
            Verb::CONNECT => "CONNX",
            Verb::OPEN => "OPEN",
            Verb::PUT => "PUT",
            Verb::CLOSE => "CLOSE",
            Verb::DISCONNECT => "DISC",
            Verb::CONNECTACK => "CONNX_ACK",
            Verb::OPENACK => "OPEN_ACK",
            Verb::PUTACK => "PUT_ACK",
            Verb::CLOSEACK => "CLOSE_ACK",
            Verb::DISCONNECTACK => "DISC_ACK",
        };
        write!(f, "{}", verb)
    }
}
