//! State shared between the driver and the game loop thread.

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use bastion_core::commands::PlayerCommand;
use bastion_core::state::GameState;

/// Commands sent from the driver to the game loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// A player command to forward to the simulation engine.
    Player(PlayerCommand),
    /// Shut down the game loop thread gracefully.
    Shutdown,
}

/// One published frame: the committed snapshot plus presentation-owned data.
#[derive(Debug, Clone)]
pub struct PublishedFrame {
    /// Increments with every publish.
    pub sequence: u64,
    pub state: GameState,
    pub fps: f64,
    /// Score of the most recently finished session, kept across restarts.
    pub last_score: Option<u64>,
}

/// The latest published frame. Replaced whole, so readers never see a
/// partially applied one.
pub type SharedFrame = Arc<Mutex<Option<PublishedFrame>>>;

pub fn shared_frame() -> SharedFrame {
    Arc::new(Mutex::new(None))
}

/// Clone of the latest published frame, if any.
pub fn latest(shared: &SharedFrame) -> Option<PublishedFrame> {
    shared.lock().ok().and_then(|slot| slot.clone())
}

/// Frames per second over a rolling one-second window.
#[derive(Debug, Default)]
pub struct FpsCounter {
    window_start: Option<Instant>,
    frames: u32,
    fps: f64,
}

impl FpsCounter {
    const WINDOW: Duration = Duration::from_secs(1);

    pub fn new() -> Self {
        Self::default()
    }

    /// Count a frame at `now` and return the current estimate.
    pub fn record(&mut self, now: Instant) -> f64 {
        let start = *self.window_start.get_or_insert(now);
        self.frames += 1;

        let elapsed = now.saturating_duration_since(start);
        if elapsed >= Self::WINDOW {
            self.fps = f64::from(self.frames) / elapsed.as_secs_f64();
            self.frames = 0;
            self.window_start = Some(now);
        }
        self.fps
    }

    pub fn fps(&self) -> f64 {
        self.fps
    }
}
