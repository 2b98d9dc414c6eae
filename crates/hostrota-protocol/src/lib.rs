//! Lobby protocol for hostrota.
//!
//! This crate defines the vocabulary every other layer speaks:
//!
//! - **Types** ([`PlayerId`], [`Player`], [`Authority`]): who is in a lobby.
//! - **Events** ([`LobbyEvent`]): what the game server tells us.
//! - **Commands** ([`Outbound`], [`ChatCommand`]): what we ask of it, and
//!   how chat lines become commands.
//! - **Codec** ([`Codec`], [`JsonCodec`]): how transcripts are stored.
//!
//! ```text
//! Transport (chat lines) → Protocol (LobbyEvent) → Lobby (router, plugins)
//! ```

mod codec;
mod command;
mod error;
mod types;

pub use codec::Codec;
#[cfg(feature = "json")]
pub use codec::JsonCodec;
pub use command::ChatCommand;
pub use error::ProtocolError;
pub use types::{Authority, LobbyEvent, Outbound, Player, PlayerId};
