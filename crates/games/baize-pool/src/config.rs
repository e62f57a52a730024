use serde::{Deserialize, Serialize};

/// Data-driven tuning for the pool simulation. Defaults reproduce the
/// stock table; a TOML file can override any subset of fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolConfig {
    /// Per-tick decrement applied to the X/Z velocity magnitudes.
    pub rolling_friction: f32,
    /// Per-tick decrement applied to each spin component's magnitude.
    pub spin_friction: f32,
    /// Proximity threshold for ball-ball and ball-pocket intersection.
    pub intersect_distance: f32,
    /// Table half-extent along X (rail position).
    pub half_width: f32,
    /// Table half-extent along Z (rail position).
    pub half_depth: f32,
    /// Height below which a ball has left the table surface.
    pub fall_threshold: f32,
    /// Resting height for a retired object ball, out of view.
    pub sunk_depth: f32,
    /// Height slack above the table before a ball is pinned back to 0.
    pub rest_epsilon: f32,
    /// Fraction of the per-axis distance to a pocket centre applied as
    /// pull velocity on capture.
    pub pocket_pull: f32,
    /// Constant downward speed while a captured ball drops.
    pub pocket_drop: f32,
    /// Vertical-velocity cutoff above which rail checks are skipped.
    pub falling_cutoff: f32,
    /// Divisor mapping the cue-to-pointer offset to an impulse.
    pub power_scale: f32,
    /// Per-axis clamp on the launch impulse.
    pub max_power: f32,
    /// Seconds added to the clock when the cue ball leaves the table.
    pub scratch_penalty_secs: u32,
    /// Physics tick rate in Hz.
    pub tick_rate_hz: f32,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            rolling_friction: 0.0005,
            spin_friction: 0.0001,
            intersect_distance: 0.2,
            half_width: 2.8,
            half_depth: 1.4,
            fall_threshold: -0.35,
            sunk_depth: -10.0,
            rest_epsilon: 0.02,
            pocket_pull: 0.5,
            pocket_drop: 0.02,
            falling_cutoff: 0.01,
            power_scale: 20.0,
            max_power: 0.1,
            scratch_penalty_secs: 10,
            tick_rate_hz: 60.0,
        }
    }
}

impl PoolConfig {
    /// Load config from a TOML file. Falls back to defaults if the file is
    /// missing or unparseable.
    pub fn load() -> Self {
        let path =
            std::env::var("BAIZE_POOL_CONFIG").unwrap_or_else(|_| "config/pool.toml".to_string());
        match std::fs::read_to_string(&path) {
            Ok(content) => match toml::from_str::<PoolConfig>(&content) {
                Ok(cfg) => cfg,
                Err(e) => {
                    tracing::warn!("Failed to parse {path}: {e}, using defaults");
                    PoolConfig::default()
                },
            },
            Err(_) => PoolConfig::default(),
        }
    }
}
