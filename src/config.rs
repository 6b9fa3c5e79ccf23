//! Connection settings, read once at startup from the process environment.
use crate::error::ConfigError;
use log::{debug, warn};
use std::env;
use std::fmt;
use std::path::Path;

/// TLS settings, present only when a key repository is configured.
#[derive(Debug, Clone, PartialEq)]
pub struct TlsConfig {
    /// path of the key repository holding the trusted certificates
    pub key_repository: String,
    /// cipher spec of the channel
    pub cipher_spec: Option<String>,
}

/// Application credentials, present only when a user is configured.
#[derive(Clone, PartialEq)]
pub struct Credentials {
    pub user: String,
    pub password: Option<String>,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "********"))
            .finish()
    }
}

/// Everything needed to reach the queue manager and the topic.
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectionConfig {
    pub queue_manager: String,
    pub topic: String,
    pub host: String,
    pub port: u16,
    pub channel: String,
    pub tls: Option<TlsConfig>,
    pub credentials: Option<Credentials>,
}

impl ConnectionConfig {
    /// Reads the configuration from the process environment.
    pub fn from_env() -> Result<ConnectionConfig, ConfigError> {
        ConnectionConfig::from_lookup(|key| env::var(key).ok())
    }

    /// Reads the configuration through `lookup`, empty values count as unset.
    /// ```
    /// use mq_basic_publish::config::ConnectionConfig;
    /// use std::collections::HashMap;
    /// let vars = HashMap::from([
    ///     ("QMGR", "QM1"),
    ///     ("TOPIC_NAME", "dev/topic"),
    ///     ("HOST", "localhost"),
    ///     ("PORT", "1414"),
    ///     ("CHANNEL", "DEV.APP.SVRCONN"),
    /// ]);
    /// let config = ConnectionConfig::from_lookup(|k| vars.get(k).map(|v| v.to_string())).unwrap();
    /// assert_eq!(config.connection_name(), "localhost(1414)");
    /// ```
    pub fn from_lookup<F>(lookup: F) -> Result<ConnectionConfig, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let optional = |key: &str| lookup(key).filter(|value| !value.is_empty());
        let required = |key: &'static str| optional(key).ok_or(ConfigError::Missing(key));

        let port = required("PORT")?;
        let port = port
            .trim()
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort(port.clone()))?;

        let tls = optional("KEY_REPOSITORY").map(|key_repository| TlsConfig {
            key_repository,
            cipher_spec: optional("CIPHER"),
        });
        if tls.is_none() && optional("CIPHER").is_some() {
            warn!("CIPHER is set without KEY_REPOSITORY, TLS stays disabled");
        }

        let credentials = optional("APP_USER").map(|user| Credentials {
            user,
            password: optional("APP_PASSWORD"),
        });

        Ok(ConnectionConfig {
            queue_manager: required("QMGR")?,
            topic: required("TOPIC_NAME")?,
            host: required("HOST")?,
            port,
            channel: required("CHANNEL")?,
            tls,
            credentials,
        })
    }

    /// connection name in the `host(port)` form
    pub fn connection_name(&self) -> String {
        format!("{}({})", self.host, self.port)
    }
}

/// Loads a dotenv file into the environment. Variables already set win.
///
/// Without a path a `.env` in the working directory is used when present.
pub fn load_env_file(path: Option<&Path>) {
    let loaded = match path {
        Some(path) => dotenvy::from_path(path).map(|_| path.to_path_buf()),
        None => dotenvy::dotenv(),
    };
    match loaded {
        Ok(path) => debug!("loaded settings from {}", path.display()),
        Err(e) if path.is_some() => warn!("could not load env file: {}", e),
        Err(_) => debug!("no .env file found"),
    }
}
