//! The lobby's own view of who is present, who is host, and whether a
//! match is running.
//!
//! This is the single source of truth the plugins read from. Only the
//! [`Router`](crate::Router) mutates it, and only before or after the
//! plugins are notified, never while they run.

use hostrota_protocol::{Player, PlayerId};
use serde::Serialize;

/// Roster, current host and match flag for one lobby session.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LobbyState {
    /// Present players, in join order.
    players: Vec<Player>,
    host: Option<PlayerId>,
    is_matching: bool,
}

impl LobbyState {
    pub fn new() -> Self {
        Self::default()
    }

    /// The confirmed host, if any.
    pub fn host(&self) -> Option<&PlayerId> {
        self.host.as_ref()
    }

    /// Returns `true` if `player` is the confirmed host.
    pub fn is_host(&self, player: &PlayerId) -> bool {
        self.host.as_ref() == Some(player)
    }

    /// Returns `true` while a match is in progress.
    pub fn is_matching(&self) -> bool {
        self.is_matching
    }

    pub fn player(&self, id: &PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| &p.id == id)
    }

    pub fn contains(&self, id: &PlayerId) -> bool {
        self.player(id).is_some()
    }

    /// Present players in join order.
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    // -- mutation, router only --

    /// Adds a player. Returns `false` if the id is already present.
    pub(crate) fn add_player(&mut self, player: Player) -> bool {
        if self.contains(&player.id) {
            return false;
        }
        self.players.push(player);
        true
    }

    /// Removes a player and returns them, or `None` if absent.
    ///
    /// The host reference is left alone so plugins can still see that the
    /// departing player held it; see [`release_departed_host`](Self::release_departed_host).
    pub(crate) fn remove_player(&mut self, id: &PlayerId) -> Option<Player> {
        let idx = self.players.iter().position(|p| &p.id == id)?;
        Some(self.players.remove(idx))
    }

    /// Clears the host if they are no longer present.
    pub(crate) fn release_departed_host(&mut self) {
        if let Some(host) = &self.host {
            if !self.contains(host) {
                self.host = None;
            }
        }
    }

    pub(crate) fn set_host(&mut self, host: PlayerId) {
        self.host = Some(host);
    }

    pub(crate) fn set_matching(&mut self, matching: bool) {
        self.is_matching = matching;
    }
}
