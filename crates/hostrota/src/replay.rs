//! Offline replay of a recorded lobby transcript.
//!
//! A transcript is one encoded [`LobbyEvent`] per line. Replaying feeds the
//! events to a fresh lobby session in order and collects every outbound
//! request the session made, after the cooldown gate.

use hostrota_lobby::LobbyStatus;
use hostrota_protocol::{Codec, LobbyEvent, Outbound};
use tokio::sync::mpsc;

use crate::{HostrotaError, LobbySessionBuilder};

/// What a replayed session produced.
#[derive(Debug, Clone)]
pub struct ReplayReport {
    /// Number of events fed to the lobby.
    pub events: usize,
    /// Outbound requests in the order they were sent.
    pub outbound: Vec<Outbound>,
    /// The lobby as it stood after the last event.
    pub status: LobbyStatus,
}

/// Decodes `transcript` with `codec` and replays it through a lobby built
/// by `builder`.
///
/// # Errors
/// A transcript line that fails to decode, or a defect that stopped the
/// lobby part-way through.
pub async fn replay<C: Codec>(
    builder: LobbySessionBuilder,
    codec: &C,
    transcript: &str,
) -> Result<ReplayReport, HostrotaError> {
    let events: Vec<LobbyEvent> = codec.decode_lines(transcript)?;
    tracing::info!(events = events.len(), "replaying transcript");

    let (tx, mut rx) = mpsc::unbounded_channel();
    let session = builder.spawn(tx)?;

    let mut fed = 0;
    for event in events {
        if session.send(event).await.is_err() {
            break;
        }
        fed += 1;
    }

    // A dead lobby fails the status request; shutdown reports why it died.
    let status = session.status().await;
    session.shutdown().await?;
    let status = status?;

    let mut outbound = Vec::new();
    while let Ok(cmd) = rx.try_recv() {
        outbound.push(cmd);
    }

    Ok(ReplayReport {
        events: fed,
        outbound,
        status,
    })
}
