use std::collections::HashMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Core trait that all Baize table games must implement.
///
/// The host shell owns rendering, input devices, and the frame clock;
/// the game only advances its own simulation state.
pub trait BaizeGame: Send + Sync {
    /// Game metadata for the host's selection screen.
    fn metadata(&self) -> GameMetadata;

    /// Called once when the game is selected, before the first update.
    fn init(&mut self, config: &GameConfig);

    /// Called each frame with the elapsed wall-clock delta in seconds.
    /// Returns the events raised while advancing the simulation.
    fn update(&mut self, dt: f32) -> Vec<GameEvent>;

    /// Serialize the authoritative game state for display or broadcast.
    fn serialize_state(&self) -> Vec<u8>;

    /// Apply authoritative state received from elsewhere.
    fn apply_state(&mut self, state: &[u8]);

    /// Apply an encoded input payload from the host shell.
    fn apply_input(&mut self, input: &[u8]);

    /// Simulation tick rate in Hz. Different games may run at different rates.
    fn tick_rate(&self) -> f32 {
        60.0
    }

    /// Whether the game supports the host pausing gameplay.
    fn supports_pause(&self) -> bool {
        true
    }

    /// Called when the host requests a pause.
    fn pause(&mut self);

    /// Called when gameplay should resume after a pause.
    fn resume(&mut self);

    /// Whether the game has reached its end state.
    fn is_over(&self) -> bool;

    /// Final figures for the completed game.
    fn results(&self) -> GameResults;
}

/// Game metadata for the host's selection screen.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameMetadata {
    pub name: String,
    pub description: String,
    pub estimated_duration: Duration,
}

/// Configuration for a game session. `custom` carries game-specific
/// overrides as free-form JSON values.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameConfig {
    pub custom: HashMap<String, serde_json::Value>,
}

/// Events emitted by a game during update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// An object ball left play (pocketed).
    BallCaptured { number: u8 },
    /// The player committed a foul costing a time penalty.
    Foul { penalty_secs: u32 },
    /// The game reached its end state.
    GameOver,
}

/// Final figures reported once a game is over.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameResults {
    pub elapsed_seconds: u32,
    pub balls_potted: u32,
    pub completed: bool,
}

/// Generates the `BaizeGame` methods that are identical across games:
/// `serialize_state`, `apply_state`, `pause`, `resume`, `is_over`.
///
/// Requires the implementing struct to have `state: $StateType` and
/// `paused: bool` fields, and `$StateType` to have an `ended: bool` field.
#[macro_export]
macro_rules! baize_game_boilerplate {
    (state_type: $StateType:ty) => {
        fn serialize_state(&self) -> Vec<u8> {
            rmp_serde::to_vec(&self.state).expect("game state serialization must succeed")
        }

        fn apply_state(&mut self, state: &[u8]) {
            if let Ok(s) = rmp_serde::from_slice::<$StateType>(state) {
                self.state = s;
            }
        }

        fn pause(&mut self) {
            self.paused = true;
        }

        fn resume(&mut self) {
            self.paused = false;
        }

        fn is_over(&self) -> bool {
            self.state.ended
        }
    };
}
