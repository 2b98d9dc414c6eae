//! `LobbySession` builder: wires the default plugins into a running lobby.

use hostrota_lobby::{
    spawn_lobby, LobbyError, LobbyHandle, LobbyStatus, OutboundSender, Router, StaticAuthority,
    DEFAULT_CHANNEL_SIZE,
};
use hostrota_plugins::{HostSelector, MatchStarter, MatchStarterConfig};
use hostrota_protocol::{LobbyEvent, PlayerId};
use tokio::task::JoinHandle;

use crate::{AppConfig, HostrotaError};

/// Builder for a lobby running host rotation and vote-gated starts.
///
/// # Example
///
/// ```rust,no_run
/// use hostrota::prelude::*;
///
/// # async fn run() -> Result<(), HostrotaError> {
/// let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
/// let session = LobbySession::builder().owner("bot_owner").spawn(tx)?;
///
/// session.send(LobbyEvent::MatchStarted).await?;
/// while let Some(cmd) = rx.recv().await {
///     println!("{cmd}");
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct LobbySessionBuilder {
    authority: StaticAuthority,
    match_starter: MatchStarterConfig,
    channel_size: usize,
}

impl LobbySessionBuilder {
    /// Creates a builder with default settings and no elevated players.
    pub fn new() -> Self {
        Self {
            authority: StaticAuthority::new(),
            match_starter: MatchStarterConfig::default(),
            channel_size: DEFAULT_CHANNEL_SIZE,
        }
    }

    /// Creates a builder from a loaded config file.
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            authority: config.lobby.authority(),
            match_starter: config.match_starter,
            channel_size: config.lobby.channel_size,
        }
    }

    pub fn owner(mut self, id: impl Into<PlayerId>) -> Self {
        self.authority = self.authority.owner(id);
        self
    }

    pub fn referee(mut self, id: impl Into<PlayerId>) -> Self {
        self.authority = self.authority.referee(id);
        self
    }

    /// Sets the vote and progress-message settings.
    pub fn match_starter(mut self, config: MatchStarterConfig) -> Self {
        self.match_starter = config;
        self
    }

    /// Sets how many events may queue ahead of the lobby actor.
    pub fn channel_size(mut self, size: usize) -> Self {
        self.channel_size = size;
        self
    }

    /// Builds the router without spawning it. The host selector is
    /// registered before the match starter.
    pub fn build_router(self) -> Result<Router, HostrotaError> {
        let starter = MatchStarter::new(self.match_starter)?;
        Ok(Router::with_policy(self.authority)
            .with_plugin(HostSelector::new())
            .with_plugin(starter))
    }

    /// Spawns the lobby actor. Outbound requests go to `outbound`.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn spawn(self, outbound: OutboundSender) -> Result<LobbySession, HostrotaError> {
        if self.channel_size == 0 {
            return Err(
                LobbyError::InvalidConfig("channel_size must be greater than 0".into()).into(),
            );
        }
        let channel_size = self.channel_size;
        let router = self.build_router()?;
        let (handle, task) = spawn_lobby(router, outbound, channel_size);
        Ok(LobbySession { handle, task })
    }
}

impl Default for LobbySessionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A running lobby and the task that drives it.
pub struct LobbySession {
    handle: LobbyHandle,
    task: JoinHandle<Result<(), LobbyError>>,
}

impl LobbySession {
    pub fn builder() -> LobbySessionBuilder {
        LobbySessionBuilder::new()
    }

    /// A cloneable handle for feeding events from other tasks.
    pub fn handle(&self) -> &LobbyHandle {
        &self.handle
    }

    pub async fn send(&self, event: LobbyEvent) -> Result<(), HostrotaError> {
        Ok(self.handle.send_event(event).await?)
    }

    pub async fn status(&self) -> Result<LobbyStatus, HostrotaError> {
        Ok(self.handle.status().await?)
    }

    /// Stops the lobby after the queued events and waits for it.
    ///
    /// # Errors
    /// Returns the defect that stopped the lobby early, if any.
    pub async fn shutdown(self) -> Result<(), HostrotaError> {
        if self.handle.shutdown().await.is_err() {
            tracing::debug!("lobby already stopped");
        }
        self.task.await??;
        Ok(())
    }
}
