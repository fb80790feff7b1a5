//! Simulation engine for BASTION.
//!
//! Advances enemies, runs turret targeting and collision systems on every
//! frame, and produces `GameState` snapshots for presentation.

pub mod engine;
pub mod frame;
pub mod systems;
pub mod tick;

pub use bastion_core as core;
pub use engine::SimulationEngine;
pub use frame::{FrameContext, PositionResolver, WorldPositions};
