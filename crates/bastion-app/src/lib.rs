//! BASTION session driver.
//!
//! Runs the simulation engine on its own thread at the display rate and
//! publishes committed snapshots for whatever draws them.

pub mod config;
pub mod game_loop;
pub mod state;

pub use bastion_core as core;
pub use bastion_sim as sim;
