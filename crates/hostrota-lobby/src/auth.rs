//! Authority resolution for joining players.
//!
//! Whether a player may force a start or run the start timer is decided
//! once, when they join, by an [`AuthorityPolicy`]. The result is stored on
//! the [`Player`](hostrota_protocol::Player) and never recomputed, so the
//! plugins only ever check an enum.

use std::collections::HashSet;

use hostrota_protocol::{Authority, PlayerId};
use serde::{Deserialize, Serialize};

/// Decides the authority level of a player at join time.
///
/// Implement this to plug in a different source of truth (a referee list
/// fetched from a tournament API, for example). The default configuration
/// uses [`StaticAuthority`].
pub trait AuthorityPolicy: Send + Sync + 'static {
    /// Returns the authority for `player`.
    fn resolve(&self, player: &PlayerId) -> Authority;
}

/// Policy backed by fixed owner and referee lists.
///
/// An id present in both lists resolves to [`Authority::Owner`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StaticAuthority {
    pub owners: HashSet<PlayerId>,
    pub referees: HashSet<PlayerId>,
}

impl StaticAuthority {
    /// A policy with no elevated players.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an owner.
    pub fn owner(mut self, id: impl Into<PlayerId>) -> Self {
        self.owners.insert(id.into());
        self
    }

    /// Adds a referee.
    pub fn referee(mut self, id: impl Into<PlayerId>) -> Self {
        self.referees.insert(id.into());
        self
    }
}

impl AuthorityPolicy for StaticAuthority {
    fn resolve(&self, player: &PlayerId) -> Authority {
        if self.owners.contains(player) {
            Authority::Owner
        } else if self.referees.contains(player) {
            Authority::Referee
        } else {
            Authority::Regular
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_player_is_regular() {
        let policy = StaticAuthority::new().owner("boss");
        assert_eq!(policy.resolve(&"someone".into()), Authority::Regular);
    }

    #[test]
    fn test_owner_and_referee_lists() {
        let policy = StaticAuthority::new().owner("boss").referee("ref");
        assert_eq!(policy.resolve(&"boss".into()), Authority::Owner);
        assert_eq!(policy.resolve(&"ref".into()), Authority::Referee);
    }

    #[test]
    fn test_owner_wins_over_referee() {
        let policy = StaticAuthority::new().owner("both").referee("both");
        assert_eq!(policy.resolve(&"both".into()), Authority::Owner);
    }
}
