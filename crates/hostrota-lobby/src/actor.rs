//! Lobby actor: an isolated Tokio task that owns one [`Router`].
//!
//! Events from the transport arrive through an mpsc channel and are
//! dispatched one at a time, so the router never sees two events at once
//! and needs no locking. Outbound requests go through the cooldown gate and
//! then out on an unbounded channel to whoever talks to the game server.

use std::time::Duration;

use hostrota_protocol::{LobbyEvent, Outbound, PlayerId};
use hostrota_throttle::CooldownGate;
use serde::Serialize;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

use crate::{LobbyError, Router};

/// Default command channel size for lobby actors.
pub const DEFAULT_CHANNEL_SIZE: usize = 64;

/// Channel sender for outbound requests to the transport.
pub type OutboundSender = mpsc::UnboundedSender<Outbound>;

/// Commands sent to a lobby actor through its channel.
enum LobbyCommand {
    /// Deliver one event from the game server.
    Event(LobbyEvent),

    /// Request a snapshot of the lobby.
    Status { reply: oneshot::Sender<LobbyStatus> },

    /// Stop the actor.
    Shutdown,
}

/// A snapshot of a lobby, for diagnostics.
#[derive(Debug, Clone, Serialize)]
pub struct LobbyStatus {
    /// Present players in join order.
    pub players: Vec<PlayerId>,
    pub host: Option<PlayerId>,
    pub is_matching: bool,
    /// `(plugin name, status line)` in notification order.
    pub plugins: Vec<(String, String)>,
    /// Chat lines dropped by the cooldown gate so far.
    pub suppressed_messages: u64,
}

/// Handle to a running lobby actor.
///
/// Cheap to clone: it's just an `mpsc::Sender` wrapper.
#[derive(Clone)]
pub struct LobbyHandle {
    sender: mpsc::Sender<LobbyCommand>,
}

impl LobbyHandle {
    /// Queues an event for dispatch. Events are processed in send order.
    pub async fn send_event(&self, event: LobbyEvent) -> Result<(), LobbyError> {
        self.sender
            .send(LobbyCommand::Event(event))
            .await
            .map_err(|_| LobbyError::Unavailable)
    }

    /// Requests a snapshot. Answered after every event queued before it.
    pub async fn status(&self) -> Result<LobbyStatus, LobbyError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.sender
            .send(LobbyCommand::Status { reply: reply_tx })
            .await
            .map_err(|_| LobbyError::Unavailable)?;
        reply_rx.await.map_err(|_| LobbyError::Unavailable)
    }

    /// Tells the lobby to shut down after the events already queued.
    pub async fn shutdown(&self) -> Result<(), LobbyError> {
        self.sender
            .send(LobbyCommand::Shutdown)
            .await
            .map_err(|_| LobbyError::Unavailable)
    }
}

/// The internal actor state. Runs inside a Tokio task.
struct LobbyActor {
    router: Router,
    gate: CooldownGate,
    outbound: OutboundSender,
    receiver: mpsc::Receiver<LobbyCommand>,
}

impl LobbyActor {
    /// Runs the actor loop until shutdown, channel close, or a defect.
    async fn run(mut self) -> Result<(), LobbyError> {
        tracing::info!(plugins = ?self.router.plugin_names(), "lobby actor started");

        while let Some(cmd) = self.receiver.recv().await {
            match cmd {
                LobbyCommand::Event(event) => {
                    let kind = event.kind();
                    match self.router.dispatch(event) {
                        Ok(cmds) => self.forward(cmds),
                        Err(e) => {
                            tracing::error!(event = kind, error = %e, "lobby stopped on defect");
                            return Err(e);
                        }
                    }
                }
                LobbyCommand::Status { reply } => {
                    let _ = reply.send(self.status());
                }
                LobbyCommand::Shutdown => {
                    tracing::info!("lobby shutting down");
                    break;
                }
            }
        }

        tracing::info!("lobby actor stopped");
        Ok(())
    }

    /// Sends outbound requests in order, dropping cooled-down chat lines.
    fn forward(&mut self, cmds: Vec<Outbound>) {
        for cmd in cmds {
            if let Outbound::SendMessageWithCoolTime {
                key, interval_ms, ..
            } = &cmd
            {
                if !self.gate.admit(key, Duration::from_millis(*interval_ms)) {
                    continue;
                }
            }
            if self.outbound.send(cmd).is_err() {
                tracing::debug!("outbound receiver dropped, discarding request");
            }
        }
    }

    fn status(&self) -> LobbyStatus {
        let state = self.router.state();
        LobbyStatus {
            players: state.players().iter().map(|p| p.id.clone()).collect(),
            host: state.host().cloned(),
            is_matching: state.is_matching(),
            plugins: self
                .router
                .plugin_statuses()
                .into_iter()
                .map(|(name, status)| (name.to_string(), status))
                .collect(),
            suppressed_messages: self.gate.suppressed(),
        }
    }
}

/// Spawns a lobby actor task around `router`.
///
/// Returns the handle for feeding events and the task's `JoinHandle`. The
/// task resolves to `Err` only when a plugin reported a defect.
///
/// `channel_size` bounds the event queue; senders wait when it is full.
pub fn spawn_lobby(
    router: Router,
    outbound: OutboundSender,
    channel_size: usize,
) -> (LobbyHandle, JoinHandle<Result<(), LobbyError>>) {
    let (tx, rx) = mpsc::channel(channel_size);

    let actor = LobbyActor {
        router,
        gate: CooldownGate::new(),
        outbound,
        receiver: rx,
    };

    let task = tokio::spawn(actor.run());

    (LobbyHandle { sender: tx }, task)
}
