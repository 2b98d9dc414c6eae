//! Unified error type for hostrota.

use hostrota_lobby::LobbyError;
use hostrota_protocol::ProtocolError;

/// Errors from loading or validating an [`AppConfig`](crate::AppConfig).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// The file parsed but a value is out of range.
    #[error("invalid config: {0}")]
    Invalid(String),
}

impl From<LobbyError> for ConfigError {
    fn from(err: LobbyError) -> Self {
        match err {
            LobbyError::InvalidConfig(msg) => Self::Invalid(msg),
            other => Self::Invalid(other.to_string()),
        }
    }
}

/// Top-level error that wraps all crate-specific errors.
///
/// The `#[from]` attribute on each variant lets `?` convert sub-crate
/// errors automatically.
#[derive(Debug, thiserror::Error)]
pub enum HostrotaError {
    /// A transcript line or outbound request could not be coded.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// The lobby stopped, either on a defect or because it was shut down.
    #[error(transparent)]
    Lobby(#[from] LobbyError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The lobby task panicked or was cancelled.
    #[error("lobby task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_protocol_error() {
        let err: HostrotaError = ProtocolError::InvalidMessage("line 3: bad".into()).into();
        assert!(matches!(err, HostrotaError::Protocol(_)));
        assert!(err.to_string().contains("line 3"));
    }

    #[test]
    fn test_from_lobby_error() {
        let err: HostrotaError = LobbyError::InvariantViolation("empty queue".into()).into();
        assert!(matches!(err, HostrotaError::Lobby(ref e) if e.is_fatal()));
    }

    #[test]
    fn test_lobby_config_error_keeps_message() {
        let err: ConfigError =
            LobbyError::InvalidConfig("vote_min must be at least 1".into()).into();
        assert_eq!(err.to_string(), "invalid config: vote_min must be at least 1");
    }
}
