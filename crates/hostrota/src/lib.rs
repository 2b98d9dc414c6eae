//! # hostrota
//!
//! Automatic host rotation and vote-gated match start for multiplayer game
//! lobbies.
//!
//! A lobby connection feeds [`LobbyEvent`]s in; hostrota hands host to each
//! player in turn, counts `!start` votes, runs the start countdown, and
//! sends [`Outbound`] requests back for the connection to carry out.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use hostrota::prelude::*;
//!
//! # async fn run() -> Result<(), HostrotaError> {
//! let config = AppConfig::from_file("hostrota.toml")?;
//! let (tx, _rx) = tokio::sync::mpsc::unbounded_channel();
//! let session = LobbySessionBuilder::from_config(&config).spawn(tx)?;
//! session
//!     .send(LobbyEvent::PlayerJoined { player: "alice".into(), slot: 0 })
//!     .await?;
//! session.shutdown().await
//! # }
//! ```

mod config;
mod error;
mod replay;
mod session;

pub use config::{validate_config, AppConfig, LobbySettings};
pub use error::{ConfigError, HostrotaError};
pub use replay::{replay, ReplayReport};
pub use session::{LobbySession, LobbySessionBuilder};

pub use hostrota_lobby as lobby;
pub use hostrota_plugins as plugins;
pub use hostrota_protocol as protocol;

/// Convenience re-exports.
pub mod prelude {
    pub use crate::{
        replay, AppConfig, ConfigError, HostrotaError, LobbySession, LobbySessionBuilder,
        ReplayReport,
    };
    pub use hostrota_lobby::{LobbyHandle, LobbyPlugin, LobbyStatus, Router};
    pub use hostrota_plugins::{HostSelector, MatchStarter, MatchStarterConfig};
    pub use hostrota_protocol::{Codec, JsonCodec, LobbyEvent, Outbound, PlayerId};
}
