//! Lobby state and event routing for hostrota.
//!
//! One lobby session is one [`Router`]: the lobby's state plus an ordered
//! list of [`LobbyPlugin`]s. Events are applied to the state, then handed to
//! each plugin in turn. In production the router runs inside a lobby actor
//! ([`spawn_lobby`]) so events from the transport are processed strictly one
//! at a time.
//!
//! # Key types
//!
//! - [`LobbyPlugin`]: the trait lobby behaviors implement
//! - [`Router`]: owns the state and dispatches events to plugins
//! - [`LobbyState`]: roster, host, and match flag (read-only to plugins)
//! - [`AuthorityPolicy`]: decides who is an owner or referee at join time
//! - [`LobbyHandle`]: feeds events to a running lobby actor

mod actor;
mod auth;
mod error;
mod plugin;
mod router;
mod state;

pub use actor::{spawn_lobby, LobbyHandle, LobbyStatus, OutboundSender, DEFAULT_CHANNEL_SIZE};
pub use auth::{AuthorityPolicy, StaticAuthority};
pub use error::LobbyError;
pub use plugin::{Context, HookResult, LobbyPlugin};
pub use router::Router;
pub use state::LobbyState;
