//! The default lobby behaviors for hostrota.
//!
//! - [`HostSelector`]: rotates host through the players in join order,
//!   one match per turn.
//! - [`MatchStarter`]: starts the match on a vote quorum, on the host's
//!   word, or after a countdown.
//!
//! Register the selector first so a rotation is requested before the
//! starter reacts to the same event.

pub mod host_selector;
pub mod match_starter;
pub mod vote;

pub use host_selector::HostSelector;
pub use match_starter::{MatchStarter, MatchStarterConfig, MatchTimer};
pub use vote::{VoteConfig, VoteCounter};
