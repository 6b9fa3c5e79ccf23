/// Header of a gateway frame
use crate::{
    constants::{self, *},
    error::HeaderError,
    Verb,
};
use anyhow::{bail, Result};

/// byte at index 0
/// indicate the start of header
const HEADER_START: usize = 0;

/// byte at index 8
/// indicate the end of header
const HEADER_END: usize = 8;

/// first byte of the version
const VERSION_BYTE_0: usize = 1;

/// second byte of the version
const VERSION_BYTE_1: usize = 2;

/// byte that indicates the verb
const VERB_BYTE: usize = 3;

/// first byte of the name length (big endian)
const NAME_LENGTH_BYTE_0: usize = 4;

/// second byte of the name length (big endian)
const NAME_LENGTH_BYTE_1: usize = 5;

/// first byte of the body length (big endian)
const BODY_LENGTH_BYTE_0: usize = 6;

/// second byte of the body length (big endian)
const BODY_LENGTH_BYTE_1: usize = 7;

/// start of the header
/// value: 0x0F
const HEADER_BYTE: u8 = 0x0F;

/// end of header
/// value: 0x00
const PADDING_BYTE: u8 = 0x00;

/// Header for a gateway frame
/// total length 9 bytes.
#[derive(Debug, Clone, PartialEq)]
pub struct Header {
    /// start byte of the frame, default value: 0x0F
    pub header: u8,
    /// framing version: two bytes.
    pub version: [u8; 2],
    /// the operation
    pub verb: Verb,
    /// length of the name (queue manager or topic), at most `u16::MAX`.
    pub name_length: u16,
    /// body length, at most `u16::MAX`.
    pub body_length: u16,
    /// padding/end of the header: 0x00
    pub padding: u8,
}

impl Header {
    /// creates a new `Header` with the given data.
    /// ```
    /// use mq_publish_wire::header::Header;
    /// use mq_publish_wire::Verb;
    /// Header::new(Verb::OPEN, 300, 5);
    /// ```
    pub fn new(verb: Verb, name_len: u16, body_len: u16) -> Header {
        Header {
            header: HEADER_BYTE,
            version: DEFAULT_VERSION,
            verb,
            name_length: name_len,
            body_length: body_len,
            padding: PADDING_BYTE,
        }
    }

    /// total length of the frame this header announces.
    pub fn frame_len(&self) -> usize {
        HEADER_LEN + self.name_length as usize + self.body_length as usize
    }

    /// returns the bytes for `Header`.
    pub fn bytes(&self) -> [u8; HEADER_LEN] {
        let name_length_bytes = self.name_length.to_be_bytes();
        let body_length_bytes = self.body_length.to_be_bytes();
        [
            self.header,
            self.version[0],
            self.version[1],
            self.verb.byte(),
            name_length_bytes[0],
            name_length_bytes[1],
            body_length_bytes[0],
            body_length_bytes[1],
            self.padding,
        ]
    }
}

impl TryFrom<&[u8]> for Header {
    type Error = anyhow::Error;

    /// Parses a `Header` from a `&[u8]`
    /// ```
    /// use mq_publish_wire::header::Header;
    /// Header::try_from(&[
    ///        15u8,  // `HEADER_BYTE`
    ///        0, 1,  // `VERSION_BYTE_0`, `VERSION_BYTE_1`
    ///        2,     // `Verb`
    ///        1, 44, // `NAME_LENGTH_BYTE_0`, `NAME_LENGTH_BYTE_1`
    ///        0, 5,  // `BODY_LENGTH_BYTE_0`, `BODY_LENGTH_BYTE_1`
    ///        0,     // `PADDING_BYTE`
    /// ][..]).unwrap();
    /// ```
    fn try_from(bytes: &[u8]) -> Result<Header> {
        if bytes.len() != constants::HEADER_LEN {
            bail!(HeaderError::InvalidHeaderBufferLength(bytes.len()));
        }

        if !(bytes[HEADER_START] == HEADER_BYTE && bytes[HEADER_END] == PADDING_BYTE) {
            bail!(HeaderError::InvalidHeadOrTail);
        }

        if !SUPPORTED_VERSIONS.contains(&[bytes[VERSION_BYTE_0], bytes[VERSION_BYTE_1]]) {
            bail!(HeaderError::UnsupportedVersion);
        }

        let verb = Verb::try_from(bytes[VERB_BYTE])?;

        let name_length =
            ((bytes[NAME_LENGTH_BYTE_0] as u16) << 8) | bytes[NAME_LENGTH_BYTE_1] as u16;
        let body_length =
            ((bytes[BODY_LENGTH_BYTE_0] as u16) << 8) | bytes[BODY_LENGTH_BYTE_1] as u16;

        Ok(Header {
            header: HEADER_BYTE,
            version: [bytes[VERSION_BYTE_0], bytes[VERSION_BYTE_1]],
            verb,
            name_length,
            body_length,
            padding: PADDING_BYTE,
        })
    }
}

impl TryFrom<Vec<u8>> for Header {
    type Error = anyhow::Error;

    fn try_from(bytes: Vec<u8>) -> Result<Header> {
        Header::try_from(&bytes[..])
    }
}
