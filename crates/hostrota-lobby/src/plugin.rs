//! The `LobbyPlugin` trait: the extension point for lobby behavior.
//!
//! Host rotation and vote-gated starting are both plugins. The router calls
//! these hooks in registration order, one plugin at a time, each with a
//! read-only view of the lobby and an outbox for requests to the game
//! server. A plugin never sees another plugin's state.

use hostrota_protocol::{Outbound, Player, PlayerId};

use crate::{LobbyError, LobbyState};

/// What a plugin hook gets to work with.
///
/// The lobby state has already been updated for the event being delivered:
/// a joining player is in the roster, a departing one is not, a confirmed
/// host is current.
pub struct Context<'a> {
    lobby: &'a LobbyState,
    outbox: &'a mut Vec<Outbound>,
}

impl<'a> Context<'a> {
    pub fn new(lobby: &'a LobbyState, outbox: &'a mut Vec<Outbound>) -> Self {
        Self { lobby, outbox }
    }

    /// Read-only lobby state.
    pub fn lobby(&self) -> &LobbyState {
        self.lobby
    }

    /// Queues an outbound request.
    pub fn send(&mut self, cmd: Outbound) {
        self.outbox.push(cmd);
    }

    /// Queues a plain chat line.
    pub fn send_message(&mut self, text: impl Into<String>) {
        self.send(Outbound::message(text));
    }

    /// Queues a chat line that the transport drops if `key` was used less
    /// than `interval_ms` ago.
    pub fn send_message_with_cool_time(
        &mut self,
        text: impl Into<String>,
        key: impl Into<String>,
        interval_ms: u64,
    ) {
        self.send(Outbound::SendMessageWithCoolTime {
            text: text.into(),
            key: key.into(),
            interval_ms,
        });
    }

    /// Queues a host-transfer request.
    pub fn transfer_host(&mut self, player: PlayerId) {
        self.send(Outbound::TransferHost { player });
    }
}

/// Result type for plugin hooks. An `Err` is always a defect.
pub type HookResult = Result<(), LobbyError>;

/// Behavior attached to a lobby.
///
/// Every hook has a no-op default, so a plugin only overrides the events it
/// cares about.
pub trait LobbyPlugin: Send + 'static {
    /// Name used in logs and status output.
    fn name(&self) -> &'static str;

    /// A player joined and is now in the roster.
    fn on_player_joined(&mut self, _ctx: &mut Context<'_>, _player: &Player) -> HookResult {
        Ok(())
    }

    /// A player left and is no longer in the roster. If they were host,
    /// [`LobbyState::host`] still names them for the duration of this
    /// dispatch.
    fn on_player_left(&mut self, _ctx: &mut Context<'_>, _player: &Player) -> HookResult {
        Ok(())
    }

    /// The game server reported the outcome of a host change.
    fn on_host_changed(
        &mut self,
        _ctx: &mut Context<'_>,
        _succeeded: bool,
        _player: &PlayerId,
    ) -> HookResult {
        Ok(())
    }

    fn on_match_started(&mut self, _ctx: &mut Context<'_>) -> HookResult {
        Ok(())
    }

    fn on_match_finished(&mut self, _ctx: &mut Context<'_>) -> HookResult {
        Ok(())
    }

    /// A chat line from a present player.
    fn on_chat(&mut self, _ctx: &mut Context<'_>, _player: &Player, _message: &str) -> HookResult {
        Ok(())
    }

    /// Every player flagged ready.
    fn on_all_players_ready(&mut self, _ctx: &mut Context<'_>) -> HookResult {
        Ok(())
    }

    /// A `CustomCommand` event from a present player. Chat lines never reach
    /// this hook directly.
    fn on_custom_command(
        &mut self,
        _ctx: &mut Context<'_>,
        _player: &Player,
        _command: &str,
        _param: &str,
    ) -> HookResult {
        Ok(())
    }

    /// Usage lines printed for `!info` / `!help`.
    fn info_lines(&self) -> Vec<String> {
        Vec::new()
    }

    /// One-line diagnostic summary of the plugin's state.
    fn status(&self) -> String {
        String::new()
    }
}
