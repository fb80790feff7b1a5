//! Intents sent from presentation to the simulation.
//!
//! Commands are queued and applied at the next frame boundary.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    /// Start a new session, fully resetting any previous one.
    StartGame,
    /// End the running session.
    EndGame,
}
