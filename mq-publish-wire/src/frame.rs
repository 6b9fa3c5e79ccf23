use crate::{constants::HEADER_LEN, error::FrameError, header::Header, Verb};
use anyhow::{bail, Result};
use log::trace;

/// A complete gateway frame: header, name and body.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// `Header`: the header of the frame.
    pub header: Header,
    /// queue manager name for connect, topic string for open, empty otherwise.
    pub name: String,
    /// verb specific body.
    pub body: Vec<u8>,
}

impl Frame {
    /// Creates a new `Frame`, checking that the lengths fit in the header.
    /// ```
    /// use mq_publish_wire::frame::Frame;
    /// use mq_publish_wire::Verb;
    /// let frame = Frame::new(Verb::OPEN, "dev/topic".to_string(), vec![8, 0, 0, 0, 16]).unwrap();
    /// assert_eq!(frame.header.name_length, 9);
    /// ```
    pub fn new(verb: Verb, name: String, body: Vec<u8>) -> Result<Frame> {
        let name_len = u16::try_from(name.len()).map_err(|_| FrameError::NameTooLong(name.len()))?;
        let body_len = u16::try_from(body.len()).map_err(|_| FrameError::BodyTooLong(body.len()))?;
        Ok(Frame {
            header: Header::new(verb, name_len, body_len),
            name,
            body,
        })
    }

    /// returns bytes for the `Frame` that can be written to the stream.
    /// ```
    /// use mq_publish_wire::frame::Frame;
    /// use mq_publish_wire::Verb;
    /// let frame = Frame::new(Verb::DISCONNECT, String::new(), vec![]).unwrap();
    /// assert_eq!(frame.bytes(), vec![15, 0, 1, 5, 0, 0, 0, 0, 0]);
    /// ```
    pub fn bytes(&self) -> Vec<u8> {
        let mut buffer: Vec<u8> = self.header.bytes().to_vec();
        buffer.extend(self.name.as_bytes());
        buffer.extend(&self.body);
        trace!("the generated buffer is: {:?}", buffer);
        buffer
    }
}

impl TryFrom<&[u8]> for Frame {
    type Error = anyhow::Error;

    /// Parses a `Frame` from a `&[u8]`.
    /// ```
    /// use mq_publish_wire::frame::Frame;
    /// let buf: [u8; 13] = [15, 0, 1, 4, 0, 0, 0, 4, 0, 0, 0, 0, 7];
    /// let frame = Frame::try_from(&buf[..]).unwrap();
    /// assert_eq!(frame.body, vec![0, 0, 0, 7]);
    /// ```
    fn try_from(bytes: &[u8]) -> Result<Frame> {
        if bytes.len() < HEADER_LEN {
            bail!(FrameError::Truncated {
                expected: HEADER_LEN,
                actual: bytes.len(),
            });
        }
        let header = Header::try_from(&bytes[..HEADER_LEN])?;
        let frame_end = header.frame_len();
        if bytes.len() < frame_end {
            bail!(FrameError::Truncated {
                expected: frame_end,
                actual: bytes.len(),
            });
        }
        let name_end = HEADER_LEN + header.name_length as usize;
        let name = String::from_utf8(bytes[HEADER_LEN..name_end].to_vec())
            .map_err(|_| FrameError::InvalidName)?;
        let body = bytes[name_end..frame_end].to_vec();
        Ok(Frame { header, name, body })
    }
}

impl TryFrom<Vec<u8>> for Frame {
    type Error = anyhow::Error;

    fn try_from(bytes: Vec<u8>) -> Result<Frame> {
        Frame::try_from(bytes.as_slice())
    }
}
