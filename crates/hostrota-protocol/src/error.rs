//! Error types for the protocol layer.

/// Errors that can occur while encoding or decoding lobby traffic.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// Serialization failed.
    #[cfg(feature = "json")]
    #[error("encode failed: {0}")]
    Encode(serde_json::Error),

    /// Deserialization failed: malformed JSON, missing fields, unknown
    /// event type.
    #[cfg(feature = "json")]
    #[error("decode failed: {0}")]
    Decode(serde_json::Error),

    /// The input decoded but is not acceptable, e.g. a transcript line
    /// that could not be read.
    #[error("invalid message: {0}")]
    InvalidMessage(String),
}
