//! Core types shared by every hostrota layer.
//!
//! This module defines what flows in and out of a lobby:
//!
//! - **Inbound**: [`LobbyEvent`], one variant per thing the game server can
//!   tell us (a join, a leave, a host change, a chat line, ...).
//! - **Outbound**: [`Outbound`], one variant per request the lobby logic can
//!   make of the game server (transfer host, say something, start a match).
//!
//! Both are plain serde types so a transport can move them over any wire,
//! and so the replay tool can read and write them as JSON lines.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::ChatCommand;

// ---------------------------------------------------------------------------
// Identity types
// ---------------------------------------------------------------------------

/// A stable player identity, usually the account name on the game server.
///
/// Newtype wrapper so that a player id can't be confused with an arbitrary
/// chat string. `#[serde(transparent)]` keeps it a bare JSON string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub String);

impl PlayerId {
    /// Creates a player id from anything string-like.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The raw id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PlayerId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

// ---------------------------------------------------------------------------
// Authority
// ---------------------------------------------------------------------------

/// Elevated permissions a player carries for the whole session.
///
/// Resolved once when the player joins. Host status is NOT an authority
/// level: it changes every rotation and is always read from the lobby.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Authority {
    /// No special permissions.
    #[default]
    Regular,
    /// A match referee: may force starts and control the start timer.
    Referee,
    /// The operator of the bot.
    Owner,
}

impl Authority {
    /// Returns `true` for referees and owners.
    pub fn is_authorized(self) -> bool {
        matches!(self, Self::Referee | Self::Owner)
    }
}

impl fmt::Display for Authority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Regular => write!(f, "regular"),
            Self::Referee => write!(f, "referee"),
            Self::Owner => write!(f, "owner"),
        }
    }
}

/// A player present in the lobby.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub authority: Authority,
    /// Slot reported by the game server on join, if any.
    pub slot: Option<u8>,
}

impl Player {
    pub fn new(id: impl Into<PlayerId>, authority: Authority) -> Self {
        Self {
            id: id.into(),
            authority,
            slot: None,
        }
    }

    /// Shorthand for `self.authority.is_authorized()`.
    pub fn is_authorized(&self) -> bool {
        self.authority.is_authorized()
    }
}

// ---------------------------------------------------------------------------
// LobbyEvent: inbound
// ---------------------------------------------------------------------------

/// Everything the game server reports about a lobby.
///
/// Internally tagged, so a transcript line looks like
/// `{"type": "PlayerJoined", "player": "alice", "slot": 0}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum LobbyEvent {
    /// A player took a slot.
    PlayerJoined { player: PlayerId, slot: u8 },

    /// A player left the lobby.
    PlayerLeft { player: PlayerId },

    /// Outcome of a host change, requested by us or done by hand.
    /// `succeeded` is false when the target no longer exists.
    HostChanged { succeeded: bool, player: PlayerId },

    MatchStarted,

    MatchFinished,

    /// A raw chat line.
    PlayerChatted { player: PlayerId, message: String },

    /// Every player in the lobby flagged ready.
    AllPlayersReady,

    /// A chat command the transport already tokenized.
    CustomCommand {
        player: PlayerId,
        command: String,
        #[serde(default)]
        param: String,
    },
}

impl LobbyEvent {
    /// Short name used in log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::PlayerJoined { .. } => "PlayerJoined",
            Self::PlayerLeft { .. } => "PlayerLeft",
            Self::HostChanged { .. } => "HostChanged",
            Self::MatchStarted => "MatchStarted",
            Self::MatchFinished => "MatchFinished",
            Self::PlayerChatted { .. } => "PlayerChatted",
            Self::AllPlayersReady => "AllPlayersReady",
            Self::CustomCommand { .. } => "CustomCommand",
        }
    }

    /// The events a transport raises for one chat line: the line itself,
    /// followed by a [`LobbyEvent::CustomCommand`] when it is a command.
    pub fn from_chat(player: PlayerId, message: impl Into<String>) -> Vec<Self> {
        let message = message.into();
        let command = ChatCommand::parse(&message).map(|cmd| Self::CustomCommand {
            player: player.clone(),
            command: cmd.command.to_string(),
            param: cmd.param.to_string(),
        });
        let mut events = vec![Self::PlayerChatted { player, message }];
        events.extend(command);
        events
    }
}

// ---------------------------------------------------------------------------
// Outbound: requests to the game server
// ---------------------------------------------------------------------------

/// A request the lobby logic hands back to the transport.
///
/// `Display` renders the chat line a chat-driven game server understands,
/// so a plain chat transport can forward `to_string()` verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Outbound {
    /// Fire-and-forget chat line.
    SendMessage { text: String },

    /// Chat line that must be dropped if another message with the same
    /// `key` went out less than `interval_ms` ago.
    SendMessageWithCoolTime {
        text: String,
        key: String,
        interval_ms: u64,
    },

    /// Ask the server to hand host to `player`. The answer comes back as
    /// [`LobbyEvent::HostChanged`].
    TransferHost { player: PlayerId },

    /// Start the match, optionally after a countdown in seconds.
    StartMatch { countdown: Option<u32> },

    /// Cancel a running start countdown.
    AbortStartTimer,
}

impl Outbound {
    /// Builds a [`Outbound::SendMessage`].
    pub fn message(text: impl Into<String>) -> Self {
        Self::SendMessage { text: text.into() }
    }
}

impl fmt::Display for Outbound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SendMessage { text } => f.write_str(text),
            Self::SendMessageWithCoolTime { text, .. } => f.write_str(text),
            Self::TransferHost { player } => write!(f, "!mp host {player}"),
            Self::StartMatch { countdown: None } => write!(f, "!mp start"),
            Self::StartMatch {
                countdown: Some(secs),
            } => write!(f, "!mp start {secs}"),
            Self::AbortStartTimer => write!(f, "!mp aborttimer"),
        }
    }
}

// =========================================================================
// Tests
// =========================================================================
