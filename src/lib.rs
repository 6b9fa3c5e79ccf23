pub mod client;
pub mod config;
pub mod error;
pub mod message;
pub mod options;
pub mod session;
pub mod stream;
pub use mq_publish_wire::reason::{CompletionCode, ReasonCode};
pub use mq_publish_wire::Verb;
