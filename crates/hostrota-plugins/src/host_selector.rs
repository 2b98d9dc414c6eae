//! Host rotation: hands host to each player in join order, one match at a
//! time.
//!
//! The queue head is the player whose turn it is. Selecting the next host
//! moves the head to the tail and asks the game server to transfer host to
//! the new head. Two guards keep the lobby's host state sane:
//!
//! - nothing rotates while a match is running;
//! - a transfer already in flight (the pending host) is not overridden by a
//!   stray leave event.

use std::collections::VecDeque;

use hostrota_lobby::{Context, HookResult, LobbyError, LobbyPlugin};
use hostrota_protocol::{Player, PlayerId};

/// Rotation queue plus the in-flight transfer, if any.
#[derive(Debug, Default)]
pub struct HostSelector {
    queue: VecDeque<PlayerId>,
    pending: Option<PlayerId>,
    /// The head was removed without having been rotated past, so its
    /// successor has not had a turn yet.
    head_vacated: bool,
}

impl HostSelector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue in rotation order; the head is the current turn.
    pub fn queue(&self) -> impl Iterator<Item = &PlayerId> {
        self.queue.iter()
    }

    /// Player we asked the server to make host, not yet confirmed.
    pub fn pending(&self) -> Option<&PlayerId> {
        self.pending.as_ref()
    }

    /// Moves the queue to the next turn and requests the transfer.
    ///
    /// # Errors
    /// [`LobbyError::InvariantViolation`] if the queue is empty. Callers
    /// check emptiness first, so this only fires on a defect.
    pub fn select_next_host(&mut self, ctx: &mut Context<'_>) -> HookResult {
        if self.queue.is_empty() {
            return Err(LobbyError::InvariantViolation(
                "host selection requested with an empty host queue".into(),
            ));
        }

        if self.head_vacated {
            // The successor already sits at the head.
            self.head_vacated = false;
        } else {
            self.queue.rotate_left(1);
        }

        let Some(next) = self.queue.front().cloned() else {
            return Ok(());
        };
        if ctx.lobby().host() != Some(&next) {
            tracing::info!(host = %next, "transferring host");
            self.pending = Some(next.clone());
            ctx.transfer_host(next);
        }
        Ok(())
    }

    /// Removes `player` from the queue. Returns `false` if they weren't in it.
    fn remove_from_queue(&mut self, player: &PlayerId) -> bool {
        match self.queue.iter().position(|p| p == player) {
            Some(idx) => {
                self.queue.remove(idx);
                if idx == 0 {
                    self.head_vacated = true;
                }
                true
            }
            None => false,
        }
    }

    /// `host queue > a​lice, b​ob`
    fn render_queue(&self) -> String {
        let names: Vec<String> = self.queue.iter().map(|p| escape_mention(p.as_str())).collect();
        format!("host queue > {}", names.join(", "))
    }
}

/// Inserts a zero-width space after the first character so chat clients
/// don't highlight the named player.
pub fn escape_mention(id: &str) -> String {
    let mut chars = id.chars();
    match chars.next() {
        Some(first) => format!("{first}\u{200B}{}", chars.as_str()),
        None => String::new(),
    }
}

impl LobbyPlugin for HostSelector {
    fn name(&self) -> &'static str {
        "host_selector"
    }

    fn on_player_joined(&mut self, ctx: &mut Context<'_>, player: &Player) -> HookResult {
        if !self.queue.contains(&player.id) {
            self.queue.push_back(player.id.clone());
        }
        // Mid-match, the first joiner waits for `on_match_finished`.
        if ctx.lobby().player_count() == 1 && !ctx.lobby().is_matching() {
            self.select_next_host(ctx)?;
        }
        Ok(())
    }

    fn on_player_left(&mut self, ctx: &mut Context<'_>, player: &Player) -> HookResult {
        if !self.remove_from_queue(&player.id) {
            tracing::debug!(player = %player.id, "departed player was not queued");
        }
        let was_pending = self.pending.as_ref() == Some(&player.id);
        if was_pending {
            tracing::debug!(player = %player.id, "pending host left before confirmation");
            self.pending = None;
        }

        if ctx.lobby().is_matching() || self.queue.is_empty() {
            return Ok(());
        }

        let was_host = ctx.lobby().is_host(&player.id);
        let hostless = ctx.lobby().host().is_none() && self.pending.is_none();
        if was_host || was_pending || hostless {
            self.select_next_host(ctx)?;
        }
        Ok(())
    }

    fn on_host_changed(
        &mut self,
        ctx: &mut Context<'_>,
        succeeded: bool,
        player: &PlayerId,
    ) -> HookResult {
        if !succeeded {
            if self.pending.as_ref() == Some(player) {
                self.pending = None;
            }
            return Ok(());
        }

        // Any confirmed change resolves the in-flight transfer, mid-match too.
        let in_flight = self.pending.take();
        let confirmed = in_flight.as_ref() == Some(player);
        if ctx.lobby().is_matching() {
            return Ok(());
        }

        if !confirmed && self.queue.front() != Some(player) {
            tracing::info!(host = %player, "host changed out of order, restoring rotation");
            if in_flight.is_some() {
                // Our transfer was overtaken; re-assert the same head.
                self.head_vacated = true;
            }
            self.select_next_host(ctx)?;
        }
        Ok(())
    }

    fn on_match_finished(&mut self, ctx: &mut Context<'_>) -> HookResult {
        if self.queue.is_empty() {
            tracing::debug!("match finished in an empty lobby");
            return Ok(());
        }
        self.select_next_host(ctx)
    }

    fn on_chat(&mut self, ctx: &mut Context<'_>, _player: &Player, message: &str) -> HookResult {
        if message == "!queue" {
            ctx.send_message(self.render_queue());
        }
        Ok(())
    }

    fn info_lines(&self) -> Vec<String> {
        vec!["!queue => show host queue.".to_string()]
    }

    fn status(&self) -> String {
        let queue: Vec<&str> = self.queue.iter().map(|p| p.as_str()).collect();
        format!(
            "queue: [{}], pending: {}",
            queue.join(", "),
            self.pending.as_ref().map_or("-", |p| p.as_str())
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_mention_inserts_zero_width_space() {
        assert_eq!(escape_mention("alice"), "a\u{200B}lice");
        assert_eq!(escape_mention("x"), "x\u{200B}");
        assert_eq!(escape_mention(""), "");
    }

    #[test]
    fn test_escape_mention_handles_multibyte_first_char() {
        assert_eq!(escape_mention("ñandu"), "ñ\u{200B}andu");
    }

    #[test]
    fn test_remove_from_queue_reports_absence() {
        let mut selector = HostSelector::new();
        selector.queue.extend([PlayerId::from("a"), PlayerId::from("b")]);
        assert!(!selector.remove_from_queue(&"z".into()));
        assert!(selector.remove_from_queue(&"b".into()));
        assert!(!selector.head_vacated);
        assert!(selector.remove_from_queue(&"a".into()));
        assert!(selector.head_vacated);
    }

    #[test]
    fn test_first_join_without_host_becomes_pending() {
        use hostrota_lobby::LobbyState;

        let state = LobbyState::new();
        let mut out = Vec::new();
        let mut selector = HostSelector::new();
        selector.queue.push_back(PlayerId::from("a"));
        selector.select_next_host(&mut Context::new(&state, &mut out)).unwrap();

        assert_eq!(selector.queue().collect::<Vec<_>>(), vec![&PlayerId::from("a")]);
        assert_eq!(selector.pending(), Some(&PlayerId::from("a")));
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn test_render_queue() {
        let mut selector = HostSelector::new();
        selector.queue.extend([PlayerId::from("ab"), PlayerId::from("cd")]);
        assert_eq!(selector.render_queue(), "host queue > a\u{200B}b, c\u{200B}d");
    }
}
