use clap::Parser;

/// log level for the publisher
#[derive(clap::ValueEnum, Clone)]
pub enum LogLevel {
    Trace,
    Warn,
    Info,
    Error,
    Debug,
}

/// Publish one greeting on a topic.
///
/// The queue manager, topic and channel are read from the environment:
/// QMGR, TOPIC_NAME, HOST, PORT, CHANNEL, and optionally KEY_REPOSITORY,
/// CIPHER, APP_USER and APP_PASSWORD.
#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
pub struct Cli {
    /// log level, default: info
    #[clap(long, global = true)]
    pub log_level: Option<LogLevel>,

    /// dotenv file to load, default: .env in the working directory
    #[clap(long)]
    pub env_file: Option<std::path::PathBuf>,
}
