//! Vote-gated match start.
//!
//! Players vote with `!start`; once the quorum is reached the match starts.
//! The host and authorized players can also start immediately, run a
//! countdown, or cancel it.

use std::fmt;

use hostrota_lobby::{Context, HookResult, LobbyError, LobbyPlugin};
use hostrota_protocol::{Outbound, Player, PlayerId};
use serde::{Deserialize, Serialize};

use crate::vote::{VoteConfig, VoteCounter};

/// Cooldown key for the vote progress line.
pub const PROGRESS_KEY: &str = "checkStartCount";

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

/// `[match_starter]` settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchStarterConfig {
    pub vote_rate: f64,
    pub vote_min: usize,
    /// Minimum gap between two progress lines.
    pub status_interval_ms: u64,
}

impl Default for MatchStarterConfig {
    fn default() -> Self {
        let vote = VoteConfig::default();
        Self {
            vote_rate: vote.rate,
            vote_min: vote.min,
            status_interval_ms: 5000,
        }
    }
}

impl MatchStarterConfig {
    pub fn vote_config(&self) -> VoteConfig {
        VoteConfig {
            rate: self.vote_rate,
            min: self.vote_min,
        }
    }

    pub fn validate(&self) -> Result<(), LobbyError> {
        self.vote_config().validate()
    }
}

// ---------------------------------------------------------------------------
// Timer
// ---------------------------------------------------------------------------

/// Countdown state. Expiry is the game server's job; it reports
/// `MatchStarted`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchTimer {
    #[default]
    Idle,
    CountdownActive { seconds: u32 },
}

impl MatchTimer {
    pub fn is_active(&self) -> bool {
        matches!(self, MatchTimer::CountdownActive { .. })
    }
}

impl fmt::Display for MatchTimer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchTimer::Idle => f.write_str("idle"),
            MatchTimer::CountdownActive { seconds } => write!(f, "active ({seconds}s)"),
        }
    }
}

// ---------------------------------------------------------------------------
// Plugin
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct MatchStarter {
    config: MatchStarterConfig,
    voting: VoteCounter,
    timer: MatchTimer,
}

impl MatchStarter {
    /// # Errors
    /// [`LobbyError::InvalidConfig`] if the vote settings are out of range.
    pub fn new(config: MatchStarterConfig) -> Result<Self, LobbyError> {
        config.validate()?;
        Ok(Self {
            config,
            voting: VoteCounter::new(config.vote_config()),
            timer: MatchTimer::Idle,
        })
    }

    pub fn timer(&self) -> MatchTimer {
        self.timer
    }

    pub fn voting(&self) -> &VoteCounter {
        &self.voting
    }

    fn start(&mut self, ctx: &mut Context<'_>) {
        tracing::info!(votes = %self.voting, "starting match");
        ctx.send(Outbound::StartMatch { countdown: None });
    }

    fn start_countdown(&mut self, ctx: &mut Context<'_>, seconds: u32) {
        if seconds == 0 {
            self.start(ctx);
            return;
        }
        tracing::info!(seconds, "start countdown requested");
        ctx.send(Outbound::StartMatch {
            countdown: Some(seconds),
        });
        self.timer = MatchTimer::CountdownActive { seconds };
    }

    fn stop_countdown(&mut self, ctx: &mut Context<'_>) {
        if self.timer.is_active() {
            tracing::info!("start countdown aborted");
            ctx.send(Outbound::AbortStartTimer);
            self.timer = MatchTimer::Idle;
        }
    }

    fn vote(&mut self, ctx: &mut Context<'_>, player: &PlayerId) {
        if self.voting.passed() {
            tracing::trace!(%player, "vote ignored, quorum already reached");
            return;
        }
        if self.voting.vote(player) {
            tracing::trace!(%player, votes = %self.voting, "vote accepted");
            self.check_votes(ctx, true);
        } else {
            tracing::trace!(%player, "duplicate vote ignored");
        }
    }

    /// Starts the match if the quorum is reached, optionally announcing
    /// progress first.
    fn check_votes(&mut self, ctx: &mut Context<'_>, announce: bool) {
        if announce && self.voting.count() != 0 {
            ctx.send_message_with_cool_time(
                format!("bot : Match start progress: {}", self.voting),
                PROGRESS_KEY,
                self.config.status_interval_ms,
            );
        }
        if self.voting.passed() {
            self.start(ctx);
        }
    }
}

/// `Some(n)` for an all-digit param that fits in `u32`.
fn parse_seconds(param: &str) -> Option<u32> {
    if param.is_empty() || !param.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    param.parse().ok()
}

impl LobbyPlugin for MatchStarter {
    fn name(&self) -> &'static str {
        "match_starter"
    }

    fn on_player_joined(&mut self, _ctx: &mut Context<'_>, player: &Player) -> HookResult {
        self.voting.add_voter(player.id.clone());
        Ok(())
    }

    fn on_player_left(&mut self, ctx: &mut Context<'_>, player: &Player) -> HookResult {
        self.voting.remove_voter(&player.id);
        if !ctx.lobby().is_matching() {
            self.check_votes(ctx, false);
        }
        Ok(())
    }

    fn on_host_changed(
        &mut self,
        ctx: &mut Context<'_>,
        succeeded: bool,
        _player: &PlayerId,
    ) -> HookResult {
        if !succeeded || ctx.lobby().is_matching() {
            return Ok(());
        }
        self.voting.clear();
        self.stop_countdown(ctx);
        Ok(())
    }

    fn on_match_started(&mut self, _ctx: &mut Context<'_>) -> HookResult {
        self.timer = MatchTimer::Idle;
        self.voting.clear();
        Ok(())
    }

    fn on_all_players_ready(&mut self, ctx: &mut Context<'_>) -> HookResult {
        if !self.timer.is_active() && !ctx.lobby().is_matching() {
            self.start(ctx);
        }
        Ok(())
    }

    fn on_custom_command(
        &mut self,
        ctx: &mut Context<'_>,
        player: &Player,
        command: &str,
        param: &str,
    ) -> HookResult {
        if ctx.lobby().is_matching() {
            return Ok(());
        }
        let is_host = ctx.lobby().is_host(&player.id);
        let privileged = is_host || player.is_authorized();

        match command {
            "!start" if param.is_empty() => {
                if is_host {
                    self.start(ctx);
                } else {
                    self.vote(ctx, &player.id);
                }
            }
            "!start" if privileged => match parse_seconds(param) {
                Some(seconds) => self.start_countdown(ctx, seconds),
                None => tracing::trace!(player = %player.id, param, "bad countdown ignored"),
            },
            "!stop" | "!abort" if privileged => self.stop_countdown(ctx),
            "*start" if player.is_authorized() => self.start(ctx),
            _ => tracing::trace!(player = %player.id, command, "command ignored"),
        }
        Ok(())
    }

    fn info_lines(&self) -> Vec<String> {
        vec![
            "!start => Starts the match.".to_string(),
            "!start [seconds] => Begins start timer. And can stop the timer with !stop."
                .to_string(),
        ]
    }

    fn status(&self) -> String {
        format!("timer: {}, votes: {}", self.timer, self.voting)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_seconds() {
        assert_eq!(parse_seconds("30"), Some(30));
        assert_eq!(parse_seconds("0"), Some(0));
        assert_eq!(parse_seconds(""), None);
        assert_eq!(parse_seconds("-5"), None);
        assert_eq!(parse_seconds("+5"), None);
        assert_eq!(parse_seconds("3s"), None);
        assert_eq!(parse_seconds("99999999999"), None);
    }

    #[test]
    fn test_config_defaults() {
        let config = MatchStarterConfig::default();
        assert_eq!(config.vote_rate, 0.5);
        assert_eq!(config.vote_min, 2);
        assert_eq!(config.status_interval_ms, 5000);
    }

    #[test]
    fn test_new_rejects_bad_rate() {
        let config = MatchStarterConfig {
            vote_rate: 1.5,
            ..Default::default()
        };
        assert!(matches!(
            MatchStarter::new(config),
            Err(LobbyError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_config_partial_deserialize() {
        let config: MatchStarterConfig = serde_json::from_str(r#"{"vote_min": 3}"#).unwrap();
        assert_eq!(config.vote_min, 3);
        assert_eq!(config.vote_rate, 0.5);
    }

    #[test]
    fn test_timer_display() {
        assert_eq!(MatchTimer::Idle.to_string(), "idle");
        assert_eq!(
            MatchTimer::CountdownActive { seconds: 30 }.to_string(),
            "active (30s)"
        );
    }
}
