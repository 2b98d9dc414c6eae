//! Event router: applies lobby events to the lobby state and fans them out
//! to the registered plugins.
//!
//! Dispatch is synchronous and strictly ordered. For each event the router
//!   1. updates [`LobbyState`] (roster, host, match flag),
//!   2. notifies every plugin in registration order, each one running to
//!      completion before the next,
//!   3. applies any post-dispatch state cleanup,
//! and returns the outbound requests in the order they were issued.

use hostrota_protocol::{LobbyEvent, Outbound, Player};

use crate::{AuthorityPolicy, Context, LobbyError, LobbyPlugin, LobbyState, StaticAuthority};

const HELP_BANNER: &str = "--  Auto Host Rotation Bot  --";

/// Owns one lobby's state and its plugins.
pub struct Router {
    state: LobbyState,
    plugins: Vec<Box<dyn LobbyPlugin>>,
    policy: Box<dyn AuthorityPolicy>,
}

impl Router {
    /// Creates a router with no plugins and no elevated players.
    pub fn new() -> Self {
        Self::with_policy(StaticAuthority::default())
    }

    /// Creates a router that resolves authority with `policy`.
    pub fn with_policy(policy: impl AuthorityPolicy) -> Self {
        Self {
            state: LobbyState::new(),
            plugins: Vec::new(),
            policy: Box::new(policy),
        }
    }

    /// Registers a plugin. Plugins are notified in registration order.
    pub fn register(&mut self, plugin: impl LobbyPlugin) -> &mut Self {
        tracing::debug!(plugin = plugin.name(), "plugin registered");
        self.plugins.push(Box::new(plugin));
        self
    }

    /// Builder-style [`register`](Self::register).
    pub fn with_plugin(mut self, plugin: impl LobbyPlugin) -> Self {
        self.register(plugin);
        self
    }

    /// Current lobby state.
    pub fn state(&self) -> &LobbyState {
        &self.state
    }

    /// Names of the registered plugins, in notification order.
    pub fn plugin_names(&self) -> Vec<&'static str> {
        self.plugins.iter().map(|p| p.name()).collect()
    }

    /// `(name, status)` for every plugin.
    pub fn plugin_statuses(&self) -> Vec<(&'static str, String)> {
        self.plugins.iter().map(|p| (p.name(), p.status())).collect()
    }

    /// Applies one event and returns the resulting outbound requests.
    ///
    /// # Errors
    /// Returns [`LobbyError::InvariantViolation`] if a plugin detects a
    /// defect. Plugins after the failing one are not notified and the
    /// requests issued so far are discarded.
    pub fn dispatch(&mut self, event: LobbyEvent) -> Result<Vec<Outbound>, LobbyError> {
        let mut out = Vec::new();
        tracing::trace!(event = event.kind(), "dispatching");

        match event {
            LobbyEvent::PlayerJoined { player, slot } => {
                let authority = self.policy.resolve(&player);
                let joined = Player {
                    id: player,
                    authority,
                    slot: Some(slot),
                };
                if !self.state.add_player(joined.clone()) {
                    tracing::debug!(player = %joined.id, "duplicate join ignored");
                    return Ok(out);
                }
                tracing::info!(
                    player = %joined.id,
                    %authority,
                    players = self.state.player_count(),
                    "player joined"
                );
                self.notify(&mut out, |p, ctx| p.on_player_joined(ctx, &joined))?;
            }

            LobbyEvent::PlayerLeft { player } => {
                let Some(departed) = self.state.remove_player(&player) else {
                    tracing::debug!(%player, "leave from unknown player ignored");
                    return Ok(out);
                };
                tracing::info!(
                    player = %departed.id,
                    players = self.state.player_count(),
                    "player left"
                );
                self.notify(&mut out, |p, ctx| p.on_player_left(ctx, &departed))?;
                self.state.release_departed_host();
            }

            LobbyEvent::HostChanged { succeeded, player } => {
                if succeeded {
                    tracing::info!(host = %player, "host changed");
                    self.state.set_host(player.clone());
                } else {
                    tracing::debug!(%player, "host change rejected by server");
                }
                self.notify(&mut out, |p, ctx| p.on_host_changed(ctx, succeeded, &player))?;
            }

            LobbyEvent::MatchStarted => {
                tracing::info!(players = self.state.player_count(), "match started");
                self.state.set_matching(true);
                self.notify(&mut out, |p, ctx| p.on_match_started(ctx))?;
            }

            LobbyEvent::MatchFinished => {
                tracing::info!("match finished");
                self.state.set_matching(false);
                self.notify(&mut out, |p, ctx| p.on_match_finished(ctx))?;
            }

            LobbyEvent::PlayerChatted { player, message } => {
                let Some(speaker) = self.state.player(&player).cloned() else {
                    tracing::debug!(%player, "chat from unknown player ignored");
                    return Ok(out);
                };
                if message == "!info" || message == "!help" {
                    self.push_help(&mut out);
                }
                // Commands arrive separately as `CustomCommand`.
                self.notify(&mut out, |p, ctx| p.on_chat(ctx, &speaker, &message))?;
            }

            LobbyEvent::AllPlayersReady => {
                self.notify(&mut out, |p, ctx| p.on_all_players_ready(ctx))?;
            }

            LobbyEvent::CustomCommand {
                player,
                command,
                param,
            } => {
                let Some(speaker) = self.state.player(&player).cloned() else {
                    tracing::debug!(%player, %command, "command from unknown player ignored");
                    return Ok(out);
                };
                self.notify(&mut out, |p, ctx| {
                    p.on_custom_command(ctx, &speaker, &command, &param)
                })?;
            }
        }

        Ok(out)
    }

    /// Calls `hook` on every plugin in order, stopping at the first error.
    fn notify<F>(&mut self, out: &mut Vec<Outbound>, mut hook: F) -> Result<(), LobbyError>
    where
        F: FnMut(&mut dyn LobbyPlugin, &mut Context<'_>) -> Result<(), LobbyError>,
    {
        let Self { state, plugins, .. } = self;
        for plugin in plugins.iter_mut() {
            let mut ctx = Context::new(state, out);
            if let Err(e) = hook(plugin.as_mut(), &mut ctx) {
                tracing::error!(plugin = plugin.name(), error = %e, "plugin failed");
                return Err(e);
            }
        }
        Ok(())
    }

    fn push_help(&self, out: &mut Vec<Outbound>) {
        out.push(Outbound::message(HELP_BANNER));
        for plugin in &self.plugins {
            out.extend(plugin.info_lines().into_iter().map(Outbound::message));
        }
        out.push(Outbound::message("!info => show this message."));
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}
