//! Keyed cooldowns for outbound lobby chat.
//!
//! Status lines such as a vote tally can be triggered many times in a
//! second. [`CooldownGate`] lets the first one through and drops repeats
//! that share a key until the key's interval has elapsed. The debounce is
//! per key, not per call site: two different messages with the same key
//! share one window.
//!
//! Time is read from [`tokio::time::Instant`], so tests can drive it with
//! `tokio::time::pause()` and `advance()`.
//!
//! ```ignore
//! let mut gate = CooldownGate::new();
//! if gate.admit("checkStartCount", Duration::from_secs(5)) {
//!     transport.send(text);
//! }
//! ```

use std::collections::HashMap;
use std::time::Duration;

use tokio::time::Instant;
use tracing::trace;

/// Tracks when each key last went out.
#[derive(Debug, Default)]
pub struct CooldownGate {
    last_sent: HashMap<String, Instant>,
    suppressed: u64,
}

impl CooldownGate {
    /// Creates a gate with no history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` and records the send if `key` is outside its
    /// cooldown, `false` if a message with this key went out less than
    /// `interval` ago.
    pub fn admit(&mut self, key: &str, interval: Duration) -> bool {
        self.admit_at(key, interval, Instant::now())
    }

    /// Same as [`admit`](Self::admit) with an explicit clock reading.
    pub fn admit_at(&mut self, key: &str, interval: Duration, now: Instant) -> bool {
        if let Some(last) = self.last_sent.get(key) {
            let elapsed = now.saturating_duration_since(*last);
            if elapsed < interval {
                self.suppressed += 1;
                trace!(
                    key,
                    elapsed_ms = elapsed.as_millis() as u64,
                    interval_ms = interval.as_millis() as u64,
                    "message suppressed by cooldown"
                );
                return false;
            }
        }
        self.last_sent.insert(key.to_string(), now);
        true
    }

    /// Number of messages dropped since the gate was created.
    pub fn suppressed(&self) -> u64 {
        self.suppressed
    }
}
