//! Application configuration, loaded from TOML.
//!
//! Every section and field has a default, so an empty file is a valid
//! config:
//!
//! ```toml
//! log_level = "info"
//!
//! [lobby]
//! owners = ["bot_owner"]
//! referees = []
//!
//! [match_starter]
//! vote_rate = 0.5
//! vote_min = 2
//! status_interval_ms = 5000
//! ```

use std::path::Path;

use hostrota_lobby::{StaticAuthority, DEFAULT_CHANNEL_SIZE};
use hostrota_plugins::MatchStarterConfig;
use hostrota_protocol::PlayerId;
use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Main application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` wins if set.
    pub log_level: String,
    pub lobby: LobbySettings,
    pub match_starter: MatchStarterConfig,
}

/// `[lobby]`: who is elevated, and how deep the event queue is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LobbySettings {
    pub owners: Vec<PlayerId>,
    pub referees: Vec<PlayerId>,
    /// Events buffered ahead of the lobby actor before senders wait.
    pub channel_size: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            lobby: LobbySettings::default(),
            match_starter: MatchStarterConfig::default(),
        }
    }
}

impl Default for LobbySettings {
    fn default() -> Self {
        Self {
            owners: Vec::new(),
            referees: Vec::new(),
            channel_size: DEFAULT_CHANNEL_SIZE,
        }
    }
}

impl LobbySettings {
    /// The authority policy these lists describe.
    pub fn authority(&self) -> StaticAuthority {
        let policy = self
            .owners
            .iter()
            .cloned()
            .fold(StaticAuthority::new(), |policy, id| policy.owner(id));
        self.referees
            .iter()
            .cloned()
            .fold(policy, |policy, id| policy.referee(id))
    }
}

impl AppConfig {
    /// Reads, parses and validates a TOML config file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_toml(&text)?;
        tracing::debug!(path = %path.display(), "configuration loaded");
        Ok(config)
    }

    /// Parses and validates TOML text.
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        validate_config(&config)?;
        Ok(config)
    }
}

/// Checks every value that parsed but may still be out of range.
pub fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    match config.log_level.to_lowercase().as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => {}
        _ => {
            return Err(ConfigError::Invalid(format!(
                "invalid log level: {}",
                config.log_level
            )))
        }
    }

    if config.lobby.channel_size == 0 {
        return Err(ConfigError::Invalid(
            "lobby.channel_size must be greater than 0".into(),
        ));
    }

    config.match_starter.validate()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use hostrota_lobby::AuthorityPolicy;
    use hostrota_protocol::Authority;

    #[test]
    fn test_empty_file_is_default() {
        let config = AppConfig::from_toml("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.lobby.channel_size, DEFAULT_CHANNEL_SIZE);
    }

    #[test]
    fn test_full_file() {
        let config = AppConfig::from_toml(
            r#"
            log_level = "debug"

            [lobby]
            owners = ["boss"]
            referees = ["ref1", "ref2"]

            [match_starter]
            vote_rate = 0.75
            vote_min = 3
            status_interval_ms = 1000
            "#,
        )
        .unwrap();

        assert_eq!(config.log_level, "debug");
        assert_eq!(config.lobby.referees.len(), 2);
        assert_eq!(config.match_starter.vote_rate, 0.75);
        assert_eq!(config.match_starter.vote_min, 3);
        assert_eq!(config.match_starter.status_interval_ms, 1000);
    }

    #[test]
    fn test_partial_section_keeps_defaults() {
        let config = AppConfig::from_toml("[match_starter]\nvote_min = 4\n").unwrap();
        assert_eq!(config.match_starter.vote_min, 4);
        assert_eq!(config.match_starter.vote_rate, 0.5);
        assert_eq!(config.match_starter.status_interval_ms, 5000);
    }

    #[test]
    fn test_authority_from_lists() {
        let config =
            AppConfig::from_toml("[lobby]\nowners = [\"boss\"]\nreferees = [\"ref\", \"boss\"]\n")
                .unwrap();
        let policy = config.lobby.authority();
        assert_eq!(policy.resolve(&"boss".into()), Authority::Owner);
        assert_eq!(policy.resolve(&"ref".into()), Authority::Referee);
        assert_eq!(policy.resolve(&"pleb".into()), Authority::Regular);
    }

    #[test]
    fn test_rejects_bad_log_level() {
        let err = AppConfig::from_toml("log_level = \"loud\"").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_rejects_bad_vote_rate() {
        let err = AppConfig::from_toml("[match_starter]\nvote_rate = 0.0\n").unwrap_err();
        assert!(err.to_string().contains("vote_rate"));
    }

    #[test]
    fn test_rejects_zero_vote_min() {
        let err = AppConfig::from_toml("[match_starter]\nvote_min = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_rejects_malformed_toml() {
        let err = AppConfig::from_toml("[lobby\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = AppConfig::from_file("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
