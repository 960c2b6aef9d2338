//! Configuration management for the chat client

use anyhow::{Context, Result};
use chat_core::RetryPolicy;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Chat backend base URL; the client appends `/api/chat`
    pub server_url: String,

    /// Request and context-window settings
    pub chat: ChatConfig,

    /// UI settings
    pub ui: UiConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

/// Request and context-window settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// Turns kept in the rolling context cache
    pub max_cached_turns: usize,

    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,

    /// Retries after a failed attempt (transport failures only)
    pub retry_attempts: u32,

    /// Delay before the first retry in seconds; doubles per retry
    pub retry_base_delay_secs: u64,
}

/// UI settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Animation/housekeeping tick interval in milliseconds
    pub tick_interval_ms: u64,

    /// Seconds a banner stays up before auto-dismissing
    pub banner_timeout_secs: u64,
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter
    pub level: String,

    /// Write logs to a file (stderr otherwise, which the TUI will cover)
    pub log_to_file: bool,

    /// Log file path when file logging is enabled
    pub log_file: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_url: "http://localhost:8000".to_string(),
            chat: ChatConfig::default(),
            ui: UiConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            max_cached_turns: 15,
            request_timeout_secs: 30,
            retry_attempts: 3,
            retry_base_delay_secs: 2,
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 100,
            banner_timeout_secs: 6,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            log_to_file: false,
            log_file: None,
        }
    }
}

impl Config {
    /// Load configuration from file (if given) with command line overrides
    pub fn load(
        config_path: Option<&String>,
        server_url: Option<&String>,
        log_level: Option<&String>,
    ) -> Result<Self> {
        let mut config = if let Some(path) = config_path {
            Self::from_file(path)?
        } else {
            Self::default()
        };

        if let Some(url) = server_url {
            config.server_url = url.clone();
        }
        if let Some(level) = log_level {
            config.logging.level = level.clone();
        }

        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path))?;

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        url::Url::parse(&self.server_url)
            .with_context(|| format!("Invalid server URL: {}", self.server_url))?;

        if self.chat.max_cached_turns == 0 {
            anyhow::bail!("max_cached_turns must be greater than 0");
        }

        if self.chat.request_timeout_secs == 0 {
            anyhow::bail!("request_timeout_secs must be greater than 0");
        }

        if self.ui.tick_interval_ms == 0 {
            anyhow::bail!("tick_interval_ms must be greater than 0");
        }

        if self.ui.banner_timeout_secs == 0 {
            anyhow::bail!("banner_timeout_secs must be greater than 0");
        }

        if self.logging.log_to_file && self.logging.log_file.is_none() {
            anyhow::bail!("log_file must be set when log_to_file is enabled");
        }

        Ok(())
    }
}

impl ChatConfig {
    /// Per-request timeout
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Retry schedule for the HTTP client
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(
            self.retry_attempts,
            Duration::from_secs(self.retry_base_delay_secs),
        )
    }
}

impl UiConfig {
    /// Tick interval
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Banner auto-dismiss timeout
    pub fn banner_timeout(&self) -> Duration {
        Duration::from_secs(self.banner_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_frontend_conventions() {
        let config = Config::default();
        assert_eq!(config.chat.max_cached_turns, 15);
        assert_eq!(config.chat.retry_attempts, 3);
        assert_eq!(config.chat.retry_base_delay_secs, 2);
        assert_eq!(config.ui.banner_timeout_secs, 6);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_toml_falls_back_to_defaults() {
        let config: Config = toml::from_str(
            r#"
            server_url = "http://chat.example.com"

            [chat]
            max_cached_turns = 5
            "#,
        )
        .unwrap();

        assert_eq!(config.server_url, "http://chat.example.com");
        assert_eq!(config.chat.max_cached_turns, 5);
        assert_eq!(config.chat.retry_attempts, 3);
        assert_eq!(config.ui.banner_timeout_secs, 6);
    }

    #[test]
    fn validation_rejects_bad_values() {
        let mut config = Config::default();
        config.server_url = "not a url".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.chat.max_cached_turns = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.logging.log_to_file = true;
        assert!(config.validate().is_err());
    }

    #[test]
    fn retry_policy_reflects_the_configured_schedule() {
        let policy = ChatConfig::default().retry_policy();
        assert_eq!(policy.retries, 3);
        assert_eq!(policy.delay(0), Duration::from_secs(2));
        assert_eq!(policy.delay(2), Duration::from_secs(8));
    }
}
