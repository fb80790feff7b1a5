//! Game loop thread: drives engine frames at the display rate and publishes
//! snapshots.
//!
//! The engine moves into the thread and is only touched there, so frames and
//! spawns are serialized. Commands arrive via `mpsc` channel. Snapshots are
//! stored in shared state for polling.

use std::io;
use std::sync::mpsc;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use tracing::{info, trace, warn};

use bastion_core::commands::PlayerCommand;
use bastion_core::events::GameEvent;
use bastion_core::state::GameState;
use bastion_sim::engine::SimulationEngine;

use crate::state::{FpsCounter, GameLoopCommand, PublishedFrame, SharedFrame};

/// Default display rate.
pub const DEFAULT_FPS: u32 = 60;

#[derive(Debug, Clone, Copy)]
pub struct LoopConfig {
    pub fps: u32,
    /// Exit the loop once the session is over.
    pub stop_on_game_over: bool,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            fps: DEFAULT_FPS,
            stop_on_game_over: true,
        }
    }
}

impl LoopConfig {
    /// Nominal duration of one frame.
    pub fn frame_duration(&self) -> Duration {
        Duration::from_nanos(1_000_000_000 / u64::from(self.fps.max(1)))
    }
}

/// Owner of a running game loop thread.
///
/// Dropping the handle shuts the loop down and joins it.
pub struct GameLoopHandle {
    command_tx: mpsc::Sender<GameLoopCommand>,
    thread: Option<JoinHandle<GameState>>,
}

impl GameLoopHandle {
    /// Forward a player command. Returns false, and logs the dropped command,
    /// once the loop has exited.
    pub fn send(&self, command: PlayerCommand) -> bool {
        let sent = self
            .command_tx
            .send(GameLoopCommand::Player(command))
            .is_ok();
        if !sent {
            warn!(?command, "game loop has exited, command dropped");
        }
        sent
    }

    pub fn is_finished(&self) -> bool {
        self.thread.as_ref().map_or(true, JoinHandle::is_finished)
    }

    /// Shut the loop down and wait for it. Returns the final committed state,
    /// or `None` if the loop thread panicked.
    pub fn stop(mut self) -> Option<GameState> {
        let _ = self.command_tx.send(GameLoopCommand::Shutdown);
        self.thread.take().and_then(|t| t.join().ok())
    }

    /// Wait for the loop to exit on its own.
    pub fn join(mut self) -> Option<GameState> {
        self.thread.take().and_then(|t| t.join().ok())
    }
}

impl Drop for GameLoopHandle {
    fn drop(&mut self) {
        if let Some(thread) = self.thread.take() {
            let _ = self.command_tx.send(GameLoopCommand::Shutdown);
            let _ = thread.join();
        }
    }
}

/// Spawns the game loop in a new thread.
pub fn spawn_game_loop(
    engine: SimulationEngine,
    shared: SharedFrame,
    config: LoopConfig,
) -> io::Result<GameLoopHandle> {
    let (command_tx, command_rx) = mpsc::channel::<GameLoopCommand>();

    let thread = std::thread::Builder::new()
        .name("bastion-game-loop".into())
        .spawn(move || run_game_loop(engine, command_rx, &shared, config))?;

    Ok(GameLoopHandle {
        command_tx,
        thread: Some(thread),
    })
}

/// The game loop. Runs until Shutdown, channel disconnect or (when configured)
/// game over, and returns the last committed state.
fn run_game_loop(
    mut engine: SimulationEngine,
    command_rx: mpsc::Receiver<GameLoopCommand>,
    shared: &SharedFrame,
    config: LoopConfig,
) -> GameState {
    let frame_duration = config.frame_duration();
    let session_start = Instant::now();
    let mut last_frame = session_start;
    let mut next_frame_time = session_start;
    let mut fps = FpsCounter::new();
    let mut last_score = None;
    let mut sequence = 0u64;

    info!(fps = config.fps, "game loop started");

    loop {
        // 1. Drain all pending commands
        loop {
            match command_rx.try_recv() {
                Ok(GameLoopCommand::Player(command)) => engine.queue_command(command),
                Ok(GameLoopCommand::Shutdown) | Err(mpsc::TryRecvError::Disconnected) => {
                    info!(frames = sequence, "game loop stopped");
                    return engine.state().clone();
                }
                Err(mpsc::TryRecvError::Empty) => break,
            }
        }

        // 2. Advance one frame on the session clock
        let now = Instant::now();
        let elapsed_ms = now.duration_since(last_frame).as_secs_f64() * 1000.0;
        let now_ms = now.duration_since(session_start).as_secs_f64() * 1000.0;
        last_frame = now;

        let snapshot = engine.frame(elapsed_ms, now_ms);
        for event in engine.take_events() {
            trace!(?event, "event");
            if let GameEvent::GameEnded { score, reason } = event {
                info!(score, ?reason, "session over");
                last_score = Some(score);
            }
        }
        let finished = config.stop_on_game_over && snapshot.game_over;

        // 3. Publish
        sequence += 1;
        let frame = PublishedFrame {
            sequence,
            state: snapshot,
            fps: fps.record(now),
            last_score,
        };
        if let Ok(mut slot) = shared.lock() {
            *slot = Some(frame);
        }

        if finished {
            info!(frames = sequence, "game loop finished");
            return engine.state().clone();
        }

        // 4. Sleep until the next frame
        next_frame_time += frame_duration;
        let now = Instant::now();
        if next_frame_time > now {
            std::thread::sleep(next_frame_time - now);
        } else if now - next_frame_time > frame_duration * 2 {
            warn!(
                behind_ms = (now - next_frame_time).as_secs_f64() * 1000.0,
                "game loop fell behind, resetting schedule"
            );
            next_frame_time = now;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bastion_core::config::SimConfig;
    use bastion_core::enums::GamePhase;

    use crate::state::{latest, shared_frame};

    fn engine() -> SimulationEngine {
        SimulationEngine::new(SimConfig::default()).unwrap()
    }

    /// Poll the shared slot until `done` holds or two seconds pass.
    fn wait_for(shared: &SharedFrame, done: impl Fn(&PublishedFrame) -> bool) -> PublishedFrame {
        let deadline = Instant::now() + Duration::from_secs(2);
        loop {
            if let Some(frame) = latest(shared) {
                if done(&frame) {
                    return frame;
                }
            }
            assert!(Instant::now() < deadline, "timed out waiting for frame");
            std::thread::sleep(Duration::from_millis(2));
        }
    }

    #[test]
    fn test_command_channel_round_trip() {
        let (tx, rx) = mpsc::channel::<GameLoopCommand>();

        tx.send(GameLoopCommand::Player(PlayerCommand::StartGame))
            .unwrap();
        tx.send(GameLoopCommand::Player(PlayerCommand::EndGame))
            .unwrap();
        tx.send(GameLoopCommand::Shutdown).unwrap();

        let mut commands = Vec::new();
        while let Ok(cmd) = rx.try_recv() {
            commands.push(cmd);
        }

        assert_eq!(commands.len(), 3);
        assert!(matches!(
            commands[0],
            GameLoopCommand::Player(PlayerCommand::StartGame)
        ));
        assert!(matches!(
            commands[1],
            GameLoopCommand::Player(PlayerCommand::EndGame)
        ));
        assert!(matches!(commands[2], GameLoopCommand::Shutdown));
    }

    #[test]
    fn test_frame_duration() {
        let config = LoopConfig::default();
        assert_eq!(config.frame_duration().as_nanos(), 1_000_000_000u128 / 60);

        let zero = LoopConfig {
            fps: 0,
            ..Default::default()
        };
        assert_eq!(zero.frame_duration(), Duration::from_secs(1));
    }

    #[test]
    fn test_stop_joins_and_freezes_publishing() {
        let shared = shared_frame();
        let config = LoopConfig {
            fps: 200,
            stop_on_game_over: false,
        };
        let handle = spawn_game_loop(engine(), shared.clone(), config).unwrap();
        assert!(handle.send(PlayerCommand::StartGame));

        let frame = wait_for(&shared, |f| f.state.is_running() && f.sequence > 5);
        assert!(frame.state.frame > 0);

        let final_state = handle.stop().expect("loop thread panicked");
        assert_eq!(final_state.phase(), GamePhase::Active);

        let frozen = latest(&shared).map(|f| f.sequence);
        std::thread::sleep(Duration::from_millis(50));
        assert_eq!(latest(&shared).map(|f| f.sequence), frozen);
    }

    #[test]
    fn test_loop_exits_on_game_over() {
        let shared = shared_frame();
        let handle = spawn_game_loop(engine(), shared.clone(), LoopConfig::default()).unwrap();
        handle.send(PlayerCommand::StartGame);
        wait_for(&shared, |f| f.state.is_running());
        handle.send(PlayerCommand::EndGame);

        let final_state = handle.join().expect("loop thread panicked");
        assert_eq!(final_state.phase(), GamePhase::GameOver);

        let last = latest(&shared).unwrap();
        assert!(last.state.game_over);
        assert_eq!(last.last_score, Some(final_state.score));
    }

    #[test]
    fn test_send_reports_exited_loop() {
        let shared = shared_frame();
        let handle = spawn_game_loop(engine(), shared.clone(), LoopConfig::default()).unwrap();
        assert!(handle.send(PlayerCommand::StartGame));
        assert!(handle.send(PlayerCommand::EndGame));

        let deadline = Instant::now() + Duration::from_secs(2);
        while !handle.is_finished() {
            assert!(Instant::now() < deadline, "loop did not exit on game over");
            std::thread::sleep(Duration::from_millis(2));
        }
        assert!(!handle.send(PlayerCommand::StartGame));
    }

    #[test]
    fn test_drop_shuts_loop_down() {
        let shared = shared_frame();
        let handle = spawn_game_loop(engine(), shared.clone(), LoopConfig::default()).unwrap();
        wait_for(&shared, |_| true);
        drop(handle);

        let frozen = latest(&shared).map(|f| f.sequence);
        std::thread::sleep(Duration::from_millis(50));
        assert_eq!(latest(&shared).map(|f| f.sequence), frozen);
    }
}
