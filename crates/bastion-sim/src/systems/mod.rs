//! Simulation systems that operate on the game state each tick.
//!
//! Systems are free functions over slices of entities plus the frame context.
//! They do not own state; the tick transition decides what to commit.

pub mod cleanup;
pub mod collision;
pub mod movement;
pub mod range;
pub mod spawner;
pub mod targeting;
