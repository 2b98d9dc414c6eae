//! Error types for the lobby layer.

/// Errors that can occur while routing lobby events.
#[derive(Debug, thiserror::Error)]
pub enum LobbyError {
    /// A plugin found its own state broken, e.g. asked to rotate an empty
    /// host queue. This is a defect, never a recoverable condition: the
    /// router stops the current dispatch and the lobby actor shuts down.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    /// The lobby actor's command channel is closed.
    #[error("lobby is unavailable")]
    Unavailable,

    /// A plugin or policy was configured with out-of-range values.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl LobbyError {
    /// Returns `true` for errors that must tear the lobby down.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::InvariantViolation(_))
    }
}
