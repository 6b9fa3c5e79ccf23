pub mod body;
pub mod error;
pub mod frame;
pub mod header;
pub mod reason;
pub mod verb;
pub use verb::Verb;

pub mod constants {

    /// supported versions for the gateway framing.
    pub const SUPPORTED_VERSIONS: [[u8; 2]; 1] = [[0x00, 0x01]];

    /// default version for the gateway framing.
    pub const DEFAULT_VERSION: [u8; 2] = [0x00, 0x01];

    /// the header length
    pub const HEADER_LEN: usize = 9;

    /// length of message and correlation identifiers
    pub const ID_LEN: usize = 24;

    /// object type of a topic
    pub const OBJECT_TYPE_TOPIC: u8 = 8;

    /// Verb Connect
    pub const CONNECT: u8 = 0x01;
    /// Verb Open
    pub const OPEN: u8 = 0x02;
    /// Verb Put
    pub const PUT: u8 = 0x03;
    /// Verb Close
    pub const CLOSE: u8 = 0x04;
    /// Verb Disconnect
    pub const DISCONNECT: u8 = 0x05;
    /// Reply to Connect
    pub const CONNECTACK: u8 = 0x0A;
    /// Reply to Open
    pub const OPENACK: u8 = 0x0B;
    /// Reply to Put
    pub const PUTACK: u8 = 0x0C;
    /// Reply to Close
    pub const CLOSEACK: u8 = 0x0D;
    /// Reply to Disconnect
    pub const DISCONNECTACK: u8 = 0x0E;
}

#[cfg(test)]
mod tests {
    use crate::body::{PutBody, Reply};
    use crate::error::{FrameError, HeaderError};
    use crate::frame::Frame;
    use crate::header::Header;
    use crate::reason::{CompletionCode, ReasonCode};
    use crate::Verb;

    #[test]
    fn header_parse_pass() {
        // Header { header: 15, version: [0, 1], verb: OPEN, name_length: 9, body_length: 5, padding: 0 }
        let header = Header::try_from(vec![
            15, // `HEADER_BYTE`
            0, 1, // `VERSION_BYTE_0`, `VERSION_BYTE_1`
            2, // `Verb`
            0, 9, // `NAME_LENGTH_BYTE_0`, `NAME_LENGTH_BYTE_1`
            0, 5, // `BODY_LENGTH_BYTE_0`, `BODY_LENGTH_BYTE_1`
            0, // `PADDING_BYTE`
        ])
        .unwrap();
        assert_eq!(header.verb, Verb::OPEN);
        assert_eq!(header.frame_len(), 23);
    }

    #[test]
    fn header_parse_fail() {
        // bad start byte
        assert!(Header::try_from(vec![16, 0, 1, 2, 0, 9, 0, 5, 0]).is_err());
        // bad padding
        assert!(Header::try_from(vec![15, 0, 1, 2, 0, 9, 0, 5, 1]).is_err());
        // unsupported version
        assert!(Header::try_from(vec![15, 0, 2, 2, 0, 9, 0, 5, 0]).is_err());
        // short buffer
        assert!(Header::try_from(vec![15, 0, 1, 2, 9]).is_err());
    }

    #[test]
    fn header_rejects_unknown_verb() {
        let err = Header::try_from(vec![15, 0, 1, 0x42, 0, 0, 0, 0, 0]).unwrap_err();
        assert_eq!(
            err.downcast_ref::<HeaderError>(),
            Some(&HeaderError::InvalidVerb(0x42))
        );
    }

    #[test]
    fn frame_parse_pass() {
        let frame = Frame::new(Verb::CONNECT, "QM1".to_string(), b"{}".to_vec()).unwrap();
        let parsed = Frame::try_from(frame.bytes()).unwrap();
        assert_eq!(parsed.name, "QM1");
        assert_eq!(parsed.body, b"{}".to_vec());
    }

    #[test]
    fn frame_parse_truncated() {
        let mut buf = Frame::new(Verb::OPEN, "dev/topic".to_string(), vec![8, 0, 0, 0, 16])
            .unwrap()
            .bytes();
        buf.pop();
        assert!(Frame::try_from(buf).is_err());
    }

    #[test]
    fn frame_carries_long_names() {
        let topic = format!("dev/{}", "a".repeat(300));
        let frame = Frame::new(Verb::OPEN, topic.clone(), vec![8, 0, 0, 0, 16]).unwrap();
        assert_eq!(frame.header.name_length, 304);
        assert_eq!(frame.bytes()[4..6], [1, 48]);
        let parsed = Frame::try_from(frame.bytes()).unwrap();
        assert_eq!(parsed.name, topic);
        assert_eq!(parsed.body, vec![8, 0, 0, 0, 16]);
    }

    #[test]
    fn frame_rejects_oversized_name() {
        let err = Frame::new(Verb::OPEN, "t".repeat(65_536), vec![]).unwrap_err();
        assert_eq!(
            err.downcast_ref::<FrameError>(),
            Some(&FrameError::NameTooLong(65_536))
        );
    }

    #[test]
    fn put_body_keeps_payload() {
        let body = PutBody {
            object_handle: 7,
            options: 0x800c4,
            message_id: [1; 24],
            correl_id: [2; 24],
            payload: b"{\"Greeting\":\"hi\"}".to_vec(),
        };
        let parsed = PutBody::try_from(body.bytes().as_slice()).unwrap();
        assert_eq!(parsed, body);
    }

    #[test]
    fn reply_carries_tail() {
        let reply = Reply::ok(7u32.to_be_bytes().to_vec());
        let parsed = Reply::try_from(reply.bytes().as_slice()).unwrap();
        assert_eq!(parsed.completion, CompletionCode::Ok);
        assert_eq!(parsed.object_handle(), Some(7));
        assert_eq!(parsed.message_id(), None);
    }

    #[test]
    fn reason_code_display() {
        assert_eq!(
            ReasonCode::NO_SUBS_MATCHED.to_string(),
            "MQRC_NO_SUBS_MATCHED [2550]"
        );
        assert_eq!(ReasonCode(9999).to_string(), "MQRC [9999]");
        assert_eq!(CompletionCode::Warning.to_string(), "MQCC_WARNING [1]");
    }
}
