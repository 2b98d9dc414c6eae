//! Codec trait and implementations for lobby transcripts.
//!
//! A transcript is a recorded lobby session: one encoded [`LobbyEvent`]
//! per line going in, one encoded [`Outbound`] per line coming out. The
//! replay tool and the tests only care that *something* implements
//! [`Codec`]; [`JsonCodec`] is the one we ship.
//!
//! [`LobbyEvent`]: crate::LobbyEvent
//! [`Outbound`]: crate::Outbound

use serde::{de::DeserializeOwned, Serialize};

use crate::ProtocolError;

/// Encodes values to bytes and decodes them back.
pub trait Codec: Send + Sync + 'static {
    /// Serializes a value into bytes.
    ///
    /// # Errors
    /// Returns `ProtocolError::Encode` if serialization fails.
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, ProtocolError>;

    /// Deserializes bytes back into a value.
    ///
    /// # Errors
    /// Returns `ProtocolError::Decode` if the bytes are malformed or don't
    /// match the expected type.
    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, ProtocolError>;

    /// Decodes a line-oriented transcript.
    ///
    /// Blank lines and lines starting with `#` are skipped. A line that
    /// fails to decode is reported with its 1-based line number.
    fn decode_lines<T: DeserializeOwned>(&self, text: &str) -> Result<Vec<T>, ProtocolError> {
        let mut out = Vec::new();
        for (idx, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let value = self.decode(line.as_bytes()).map_err(|e| {
                ProtocolError::InvalidMessage(format!("line {}: {e}", idx + 1))
            })?;
            out.push(value);
        }
        Ok(out)
    }
}

// ---------------------------------------------------------------------------
// JsonCodec
// ---------------------------------------------------------------------------

/// A [`Codec`] backed by `serde_json`.
///
/// ```rust
/// use hostrota_protocol::{Codec, JsonCodec, LobbyEvent};
///
/// let codec = JsonCodec;
/// let events: Vec<LobbyEvent> = codec
///     .decode_lines("{\"type\":\"MatchStarted\"}\n\n# comment\n{\"type\":\"MatchFinished\"}")
///     .unwrap();
/// assert_eq!(events, vec![LobbyEvent::MatchStarted, LobbyEvent::MatchFinished]);
/// ```
#[cfg(feature = "json")]
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

#[cfg(feature = "json")]
impl Codec for JsonCodec {
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, ProtocolError> {
        serde_json::to_vec(value).map_err(ProtocolError::Encode)
    }

    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, ProtocolError> {
        serde_json::from_slice(data).map_err(ProtocolError::Decode)
    }
}

#[cfg(all(test, feature = "json"))]
mod tests {
    use super::*;
    use crate::{LobbyEvent, Outbound};

    #[test]
    fn test_encode_outbound_is_tagged_json() {
        let bytes = JsonCodec
            .encode(&Outbound::StartMatch { countdown: Some(10) })
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["type"], "StartMatch");
        assert_eq!(json["countdown"], 10);
    }

    #[test]
    fn test_decode_garbage_returns_error() {
        let result: Result<LobbyEvent, _> = JsonCodec.decode(b"not json at all");
        assert!(matches!(result, Err(ProtocolError::Decode(_))));
    }

    #[test]
    fn test_decode_lines_reports_line_number() {
        let text = "{\"type\":\"MatchStarted\"}\n{\"type\":\"Nope\"}\n";
        let result: Result<Vec<LobbyEvent>, _> = JsonCodec.decode_lines(text);
        let err = result.unwrap_err();
        assert!(matches!(err, ProtocolError::InvalidMessage(_)));
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn test_decode_lines_skips_blank_and_comment_lines() {
        let text = "# session start\n\n   \n{\"type\":\"AllPlayersReady\"}\n";
        let events: Vec<LobbyEvent> = JsonCodec.decode_lines(text).unwrap();
        assert_eq!(events, vec![LobbyEvent::AllPlayersReady]);
    }
}
