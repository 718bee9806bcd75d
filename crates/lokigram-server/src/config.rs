//! Service configuration.
//!
//! Loaded once from a YAML file at startup; the loaded value is an
//! immutable snapshot for the lifetime of the process. Routing and
//! dispatch components receive what they need from it at construction
//! and never see it again.

use std::net::SocketAddr;
use std::path::Path;

use lokigram_alerts::{ChannelRule, Destination};
use serde::Deserialize;
use thiserror::Error;

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// The config file is not valid YAML for this schema.
    #[error("failed to parse config file: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// host/port do not form a bindable address.
    #[error("invalid listen address {addr}: {source}")]
    InvalidAddr {
        /// The offending `host:port` string.
        addr: String,
        /// Parse failure detail.
        source: std::net::AddrParseError,
    },
}

/// Top-level service configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Application identity and logging.
    pub app: AppConfig,
    /// HTTP listener.
    pub http: HttpConfig,
    /// Default Telegram destination.
    pub telegram: TelegramConfig,
    /// Routing rules, evaluated in order.
    pub channels: Vec<ChannelConfig>,
    /// Dispatch worker pool bounds.
    pub dispatch: DispatchConfig,
}

/// Application-level settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Service name, used in logs.
    pub name: String,
    /// Deployment environment label.
    pub environment: String,
    /// Default log level when `RUST_LOG` is unset.
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            name: "lokigram".to_string(),
            environment: "development".to_string(),
            log_level: "info".to_string(),
        }
    }
}

/// HTTP listener settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Interface to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 7777,
        }
    }
}

/// Default Telegram credentials, used when no channel rule matches.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TelegramConfig {
    /// Bot token.
    pub bot_token: String,
    /// Chat identifier.
    pub chat_id: i64,
}

/// One routing rule.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ChannelConfig {
    /// Rule name, for logs only.
    pub name: String,
    /// Substring matched against container/service names.
    pub needle: String,
    /// Bot token for this channel. Empty falls back to the default.
    pub telegram_token: String,
    /// Chat id for this channel. Zero falls back to the default.
    pub telegram_chat_id: i64,
}

/// Bounds for the dispatch worker pool.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DispatchConfig {
    /// Concurrent delivery workers.
    pub workers: usize,
    /// Queued alerts beyond which new ones are dropped.
    pub queue_capacity: usize,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            workers: 4,
            queue_capacity: 256,
        }
    }
}

impl Config {
    /// Loads configuration from a YAML file.
    ///
    /// Absent keys take their defaults; unknown keys are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_yaml::from_str(&text)?)
    }

    /// The socket address to bind, from `http.host` and `http.port`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidAddr`] when the host is not an IP
    /// address.
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        let addr = format!("{}:{}", self.http.host, self.http.port);
        addr.parse().map_err(|source| ConfigError::InvalidAddr {
            addr,
            source,
        })
    }

    /// The default destination for unmatched streams.
    #[must_use]
    pub fn default_destination(&self) -> Destination {
        Destination {
            token: self.telegram.bot_token.clone(),
            chat_id: self.telegram.chat_id,
        }
    }

    /// Channel rules in declaration order.
    #[must_use]
    pub fn channel_rules(&self) -> Vec<ChannelRule> {
        self.channels
            .iter()
            .map(|c| ChannelRule {
                name: c.name.clone(),
                needle: c.needle.clone(),
                token: c.telegram_token.clone(),
                chat_id: c.telegram_chat_id,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_apply_to_empty_config() {
        let config: Config = serde_yaml::from_str("{}").unwrap();

        assert_eq!(config.app.name, "lokigram");
        assert_eq!(config.app.log_level, "info");
        assert_eq!(config.http.host, "0.0.0.0");
        assert_eq!(config.http.port, 7777);
        assert!(config.telegram.bot_token.is_empty());
        assert!(config.channels.is_empty());
        assert_eq!(config.dispatch.workers, 4);
        assert_eq!(config.dispatch.queue_capacity, 256);
    }

    #[test]
    fn full_config_parses() {
        let yaml = r#"
app:
  name: relay
  environment: production
  log_level: debug
http:
  host: 127.0.0.1
  port: 8080
telegram:
  bot_token: "999:zzz"
  chat_id: -100999
channels:
  - name: auth team
    needle: auth
    telegram_token: "111:aaa"
    telegram_chat_id: -100111
dispatch:
  workers: 8
  queue_capacity: 1024
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(config.app.environment, "production");
        assert_eq!(config.http.port, 8080);
        assert_eq!(config.telegram.chat_id, -100999);
        assert_eq!(config.channels.len(), 1);
        assert_eq!(config.channels[0].needle, "auth");
        assert_eq!(config.dispatch.workers, 8);
    }

    #[test]
    fn partial_section_keeps_sibling_defaults() {
        let config: Config = serde_yaml::from_str("http:\n  port: 9000\n").unwrap();

        assert_eq!(config.http.port, 9000);
        assert_eq!(config.http.host, "0.0.0.0");
    }

    #[test]
    fn bind_addr_combines_host_and_port() {
        let config: Config = serde_yaml::from_str("http:\n  host: 127.0.0.1\n").unwrap();

        assert_eq!(
            config.bind_addr().unwrap(),
            "127.0.0.1:7777".parse().unwrap()
        );
    }

    #[test]
    fn bind_addr_rejects_hostnames() {
        let config: Config =
            serde_yaml::from_str("http:\n  host: not-an-ip\n").unwrap();

        assert!(matches!(
            config.bind_addr(),
            Err(ConfigError::InvalidAddr { .. })
        ));
    }

    #[test]
    fn channel_rules_preserve_declaration_order() {
        let yaml = r#"
channels:
  - { name: a, needle: one }
  - { name: b, needle: two }
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        let rules = config.channel_rules();

        assert_eq!(rules[0].needle, "one");
        assert_eq!(rules[1].needle, "two");
    }

    #[test]
    fn load_reads_a_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "app:\n  name: from-file").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.app.name, "from-file");
    }

    #[test]
    fn load_missing_file_is_an_error() {
        let err = Config::load(Path::new("/nonexistent/config.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
