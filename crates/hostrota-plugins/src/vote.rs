//! Voter registry and vote counter.

use std::collections::HashMap;
use std::fmt;

use hostrota_lobby::LobbyError;
use hostrota_protocol::PlayerId;
use serde::{Deserialize, Serialize};

/// Quorum settings.
///
/// The quorum for `n` present voters is `max(ceil(rate * n), min)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VoteConfig {
    /// Fraction of present players required, in `(0, 1]`.
    pub rate: f64,
    /// Floor on the quorum regardless of lobby size, at least 1.
    pub min: usize,
}

impl Default for VoteConfig {
    fn default() -> Self {
        Self { rate: 0.5, min: 2 }
    }
}

impl VoteConfig {
    /// Checks that `rate` is in `(0, 1]` and `min` is at least 1.
    pub fn validate(&self) -> Result<(), LobbyError> {
        if !(self.rate > 0.0 && self.rate <= 1.0) {
            return Err(LobbyError::InvalidConfig(format!(
                "vote_rate must be in (0, 1], got {}",
                self.rate
            )));
        }
        if self.min == 0 {
            return Err(LobbyError::InvalidConfig("vote_min must be at least 1".into()));
        }
        Ok(())
    }

    /// Votes needed with `voters` players present.
    pub fn quorum(&self, voters: usize) -> usize {
        // Tolerance so that e.g. 0.3 * 10 doesn't ceil up to 4.
        let scaled = (self.rate * voters as f64 - 1e-9).ceil().max(0.0) as usize;
        scaled.max(self.min)
    }
}

/// Eligible voters and who among them has voted.
///
/// Every cast vote belongs to a registered voter: removing a voter removes
/// their vote with them.
#[derive(Debug, Clone, Default)]
pub struct VoteCounter {
    config: VoteConfig,
    voters: HashMap<PlayerId, bool>,
}

impl VoteCounter {
    pub fn new(config: VoteConfig) -> Self {
        Self {
            config,
            voters: HashMap::new(),
        }
    }

    pub fn config(&self) -> &VoteConfig {
        &self.config
    }

    /// Registers an eligible voter. Re-adding keeps an existing vote.
    pub fn add_voter(&mut self, player: PlayerId) {
        self.voters.entry(player).or_insert(false);
    }

    /// Deregisters a voter, dropping their vote. Returns `false` if absent.
    pub fn remove_voter(&mut self, player: &PlayerId) -> bool {
        self.voters.remove(player).is_some()
    }

    /// Casts `player`'s vote. Returns `false` if they are not a voter or
    /// have already voted.
    pub fn vote(&mut self, player: &PlayerId) -> bool {
        match self.voters.get_mut(player) {
            Some(voted) if !*voted => {
                *voted = true;
                true
            }
            _ => false,
        }
    }

    /// Withdraws every cast vote. The voter set is kept.
    pub fn clear(&mut self) {
        self.voters.values_mut().for_each(|v| *v = false);
    }

    /// Votes cast.
    pub fn count(&self) -> usize {
        self.voters.values().filter(|v| **v).count()
    }

    /// Registered voters.
    pub fn voter_count(&self) -> usize {
        self.voters.len()
    }

    /// Votes needed right now, from the current voter count.
    pub fn required(&self) -> usize {
        self.config.quorum(self.voters.len())
    }

    /// Returns `true` once the cast votes reach the current quorum.
    pub fn passed(&self) -> bool {
        self.count() >= self.required()
    }
}

impl fmt::Display for VoteCounter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {}", self.count(), self.required())
    }
}
