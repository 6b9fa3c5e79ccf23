pub mod cli;
use crate::cli::{Cli, LogLevel};
use clap::Parser;
use log::{debug, info};
use mq_basic_publish::client::gateway::GatewayClient;
use mq_basic_publish::config::{self, ConnectionConfig};
use mq_basic_publish::session::PublisherSession;
use std::env;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level: &str = match cli.log_level {
        Some(LogLevel::Trace) => "trace",
        Some(LogLevel::Warn) => "warn",
        Some(LogLevel::Info) => "info",
        Some(LogLevel::Error) => "error",
        Some(LogLevel::Debug) => "debug",
        None => "info",
    };
    env::set_var("RUST_LOG", log_level);
    env_logger::init();

    info!("Starting up Application");
    config::load_env_file(cli.env_file.as_deref());

    let config = ConnectionConfig::from_env()?;

    let session = PublisherSession::new(GatewayClient::new(), config);
    let report = session.run().await;
    debug!("{:?}", report);
    Ok(())
}
