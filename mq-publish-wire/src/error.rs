use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum HeaderError {
    /// invalid header buffer length
    #[error("Invalid header buffer length: `{0}`")]
    InvalidHeaderBufferLength(usize),
    /// invalid header value or padding
    #[error("Invalid header value or padding")]
    InvalidHeadOrTail,
    /// unsupported version of the frame
    #[error("Unsupported version of the frame")]
    UnsupportedVersion,
    /// unknown verb byte
    #[error("Invalid verb: `{0:#04x}`")]
    InvalidVerb(u8),
}

#[derive(Error, Debug, PartialEq)]
pub enum FrameError {
    /// the buffer ends before the lengths in the header say it should
    #[error("Truncated frame: expected {expected} bytes, got {actual}")]
    Truncated { expected: usize, actual: usize },
    /// the name is longer than the header can describe
    #[error("Name too long: `{0}` bytes")]
    NameTooLong(usize),
    /// the body is longer than the header can describe
    #[error("Body too long: `{0}` bytes")]
    BodyTooLong(usize),
    /// the name is not utf-8
    #[error("Name is not valid utf-8")]
    InvalidName,
    /// a body is shorter than the fields it must carry
    #[error("Invalid body for `{0}`")]
    InvalidBody(String),
}
