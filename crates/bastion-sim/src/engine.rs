//! Simulation engine: owns one session's canonical state.
//!
//! `SimulationEngine` holds the committed `GameState`, the RNG, the spawn
//! timer and the command queue. Every transition is computed from the
//! committed state and committed with a single replace. Completely headless,
//! enabling deterministic testing.

use std::collections::VecDeque;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::info;

use bastion_core::commands::PlayerCommand;
use bastion_core::config::{ConfigError, SimConfig};
use bastion_core::enums::{EndReason, GamePhase};
use bastion_core::events::GameEvent;
use bastion_core::state::GameState;

use crate::frame::{PositionResolver, WorldPositions};
use crate::systems::spawner::SpawnTimer;
use crate::tick::{self, TickInput, TickOutcome};

/// The simulation engine. Owns the state and everything that feeds it.
pub struct SimulationEngine {
    config: SimConfig,
    state: GameState,
    rng: ChaCha8Rng,
    spawn_timer: SpawnTimer,
    command_queue: VecDeque<PlayerCommand>,
    events: Vec<GameEvent>,
    resolver: Box<dyn PositionResolver + Send>,
}

impl SimulationEngine {
    /// Create an engine for `config`, rejecting invalid configuration up front.
    pub fn new(config: SimConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            spawn_timer: SpawnTimer::new(config.enemy.spawn_interval_ms),
            state: GameState::default(),
            command_queue: VecDeque::new(),
            events: Vec::new(),
            resolver: Box::new(WorldPositions),
            config,
        })
    }

    /// Replace the position source used for range and collision geometry.
    pub fn with_resolver(mut self, resolver: impl PositionResolver + Send + 'static) -> Self {
        self.resolver = Box::new(resolver);
        self
    }

    /// Queue a player command for processing at the next frame boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Run one display frame: apply queued commands, tick, then release any
    /// spawns that fell due. Returns the committed snapshot.
    pub fn frame(&mut self, elapsed_ms: f64, now_ms: f64) -> GameState {
        self.process_commands(now_ms);

        if self.state.is_running() {
            self.tick(elapsed_ms, now_ms);
            for _ in 0..self.spawn_timer.poll(now_ms) {
                self.spawn_enemy(now_ms);
            }
        }

        self.state.clone()
    }

    /// Advance the simulation by one tick.
    pub fn tick(&mut self, elapsed_ms: f64, now_ms: f64) {
        let input = TickInput { elapsed_ms, now_ms };
        let outcome = tick::tick(&self.state, &input, &self.config, self.resolver.as_ref());
        self.commit(outcome);
    }

    /// Spawn one enemy now, outside the timer schedule.
    pub fn spawn_enemy(&mut self, now_ms: f64) {
        let outcome = tick::spawn_enemy(&self.state, now_ms, &self.config, &mut self.rng);
        self.commit(outcome);
    }

    /// Start a new session, arming the spawn timer from `now_ms`.
    pub fn start_game(&mut self, now_ms: f64) {
        if self.state.is_running() {
            return;
        }
        self.state = tick::start_game(&self.state);
        self.spawn_timer.arm(now_ms);
        self.events.push(GameEvent::GameStarted);
        info!(seed = self.config.seed, "game started");
    }

    /// End the running session on the player's request.
    pub fn end_game(&mut self) {
        if !self.state.is_running() {
            return;
        }
        let state = tick::end_game(&self.state);
        let event = GameEvent::GameEnded {
            score: state.score,
            reason: EndReason::Player,
        };
        self.commit(TickOutcome {
            state,
            events: vec![event],
        });
        info!(score = self.state.score, "game ended by player");
    }

    /// Drain events produced since the last call.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// The committed state.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase()
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn spawn_timer(&self) -> &SpawnTimer {
        &self.spawn_timer
    }

    /// Replace the committed state directly (for tests needing a staged scene).
    #[cfg(test)]
    pub fn set_state(&mut self, state: GameState) {
        self.state = state;
    }

    fn process_commands(&mut self, now_ms: f64) {
        while let Some(command) = self.command_queue.pop_front() {
            match command {
                PlayerCommand::StartGame => self.start_game(now_ms),
                PlayerCommand::EndGame => self.end_game(),
            }
        }
    }

    /// Single replace of the canonical state. A session that stopped running
    /// loses its spawn timer in the same step.
    fn commit(&mut self, outcome: TickOutcome) {
        self.state = outcome.state;
        self.events.extend(outcome.events);
        if !self.state.is_running() && self.spawn_timer.is_armed() {
            self.spawn_timer.disarm();
        }
    }
}
