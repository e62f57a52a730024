pub mod ball;
pub mod collision;
pub mod config;
pub mod math;
pub mod physics;
pub mod progress;
pub mod shot;
pub mod table;

use std::collections::BTreeSet;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use baize_core::baize_game_boilerplate;
use baize_core::game_trait::{BaizeGame, GameConfig, GameEvent, GameMetadata, GameResults};
use baize_core::time::FixedTimestep;

use ball::Ball;
use config::PoolConfig;
use math::Vec3;
use physics::StepOutcome;
use table::Table;

/// The full simulation world, serializable for display or broadcast.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoolState {
    pub balls: Vec<Ball>,
    /// Numbers of the object balls out of play. The cue ball never enters.
    pub pocketed: BTreeSet<u8>,
    pub started: bool,
    pub ended: bool,
    pub elapsed_seconds: u32,
    /// Whether the player may take the next shot.
    pub can_shoot: bool,
    /// Pointer position projected onto the table plane by the host.
    pub aim_point: Vec3,
    /// Clamped impulse published for the strike input.
    pub launch_vector: Vec3,
    /// Monotonic simulation tick counter.
    pub ticks: u64,
}

impl PoolState {
    /// A freshly racked table, ready for the opening shot.
    pub fn new() -> Self {
        Self {
            balls: table::standard_rack(),
            pocketed: BTreeSet::new(),
            started: false,
            ended: false,
            elapsed_seconds: 0,
            can_shoot: true,
            aim_point: Vec3::ZERO,
            launch_vector: Vec3::ZERO,
            ticks: 0,
        }
    }

    pub fn cue(&self) -> Option<&Ball> {
        self.balls.iter().find(|b| b.is_cue())
    }

    pub fn cue_mut(&mut self) -> Option<&mut Ball> {
        self.balls.iter_mut().find(|b| b.is_cue())
    }

    /// Handle the external restart request: every ball returns to the rack
    /// on its next tick and the counters start over.
    pub fn restart(&mut self) {
        for ball in &mut self.balls {
            ball.pending_reset = true;
        }
        self.pocketed.clear();
        self.started = false;
        self.ended = false;
        self.elapsed_seconds = 0;
    }
}

impl Default for PoolState {
    fn default() -> Self {
        Self::new()
    }
}

/// Input payload from the host shell.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PoolInput {
    /// Pointer projection on the table plane.
    pub pointer_x: f32,
    pub pointer_z: f32,
    /// Input release: apply the published impulse to the cue ball.
    pub strike: bool,
    /// Reset the whole game.
    pub restart: bool,
}

/// The straight-pool game: pot every object ball against the clock.
pub struct StraightPool {
    state: PoolState,
    table: Table,
    physics_clock: FixedTimestep,
    seconds_clock: FixedTimestep,
    paused: bool,
    game_config: PoolConfig,
}

impl StraightPool {
    pub fn new() -> Self {
        Self::with_config(PoolConfig::load())
    }

    pub fn with_config(config: PoolConfig) -> Self {
        Self {
            state: PoolState::new(),
            table: Table::standard(&config),
            physics_clock: FixedTimestep::new(config.tick_rate_hz),
            seconds_clock: FixedTimestep::new(1.0),
            paused: false,
            game_config: config,
        }
    }

    pub fn state(&self) -> &PoolState {
        &self.state
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn config(&self) -> &PoolConfig {
        &self.game_config
    }

    /// Cue-guide endpoints for the renderer.
    pub fn aim_line(&self) -> (Vec3, Vec3) {
        shot::aim_line(&self.state)
    }

    /// Progress counters for the on-screen display.
    pub fn progress(&self) -> progress::ProgressSnapshot {
        progress::snapshot(&self.state)
    }

    /// One fixed simulation step: integrate every ball, then resolve
    /// collisions for every ball, then run the shot controller.
    fn tick(&mut self) -> Vec<GameEvent> {
        let mut events = Vec::new();
        self.state.ticks += 1;

        let mut scratched = false;
        {
            let PoolState {
                balls, pocketed, ..
            } = &mut self.state;

            for ball in balls.iter_mut() {
                if physics::step_ball(ball, pocketed, &self.game_config) == StepOutcome::CueFell {
                    scratched = true;
                }
            }

            for number in collision::resolve_all(balls, &self.table, pocketed, &self.game_config) {
                events.push(GameEvent::BallCaptured { number });
            }
        }

        if scratched {
            progress::scratch_penalty(&mut self.state, &self.game_config);
            events.push(GameEvent::Foul {
                penalty_secs: self.game_config.scratch_penalty_secs,
            });
        }

        // Every object ball down ends the game.
        if !self.state.ended && self.state.pocketed.len() + 1 == self.state.balls.len() {
            self.state.ended = true;
            events.push(GameEvent::GameOver);
        }

        shot::rearm(&mut self.state);
        shot::track_aim(&mut self.state, &self.game_config);

        events
    }
}

impl Default for StraightPool {
    fn default() -> Self {
        Self::with_config(PoolConfig::default())
    }
}

impl BaizeGame for StraightPool {
    fn metadata(&self) -> GameMetadata {
        GameMetadata {
            name: "Straight Pool".to_string(),
            description: "Sink all fifteen balls against the clock. Scratches cost ten seconds."
                .to_string(),
            estimated_duration: Duration::from_secs(300),
        }
    }

    fn tick_rate(&self) -> f32 {
        self.game_config.tick_rate_hz
    }

    fn init(&mut self, config: &GameConfig) {
        // The host may override the tuning table for this session.
        if let Some(overrides) = config.custom.get("pool")
            && let Ok(cfg) = serde_json::from_value::<PoolConfig>(overrides.clone())
        {
            self.table = Table::standard(&cfg);
            self.physics_clock = FixedTimestep::new(cfg.tick_rate_hz);
            self.game_config = cfg;
        }
        self.state = PoolState::new();
        self.paused = false;
    }

    fn update(&mut self, dt: f32) -> Vec<GameEvent> {
        if self.paused {
            return Vec::new();
        }

        let mut events = Vec::new();
        for _ in 0..self.physics_clock.advance(dt) {
            events.extend(self.tick());
        }
        for _ in 0..self.seconds_clock.advance(dt) {
            progress::tick_second(&mut self.state);
        }
        events
    }

    baize_game_boilerplate!(state_type: PoolState);

    fn apply_input(&mut self, input: &[u8]) {
        match rmp_serde::from_slice::<PoolInput>(input) {
            Err(e) => {
                tracing::debug!(error = %e, "Dropped malformed pool input");
            },
            Ok(inp) => {
                self.state.aim_point = Vec3::new(inp.pointer_x, 0.0, inp.pointer_z);
                if inp.restart {
                    self.state.restart();
                }
                if inp.strike {
                    shot::strike(&mut self.state);
                }
            },
        }
    }

    fn results(&self) -> GameResults {
        GameResults {
            elapsed_seconds: self.state.elapsed_seconds,
            balls_potted: self.state.pocketed.len() as u32,
            completed: self.state.ended,
        }
    }
}
