use serde::{Deserialize, Serialize};

use crate::PoolState;
use crate::config::PoolConfig;

/// One whole second of play: bump the clock while a game is running.
pub fn tick_second(state: &mut PoolState) {
    if state.started && !state.ended {
        state.elapsed_seconds += 1;
    }
}

/// Charge the time penalty after the cue ball leaves the table.
pub fn scratch_penalty(state: &mut PoolState, cfg: &PoolConfig) {
    state.elapsed_seconds += cfg.scratch_penalty_secs;
}

/// Read-only progress summary for the display layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressSnapshot {
    pub elapsed_seconds: u32,
    pub balls_potted: u32,
    pub started: bool,
    pub ended: bool,
}

pub fn snapshot(state: &PoolState) -> ProgressSnapshot {
    ProgressSnapshot {
        elapsed_seconds: state.elapsed_seconds,
        balls_potted: state.pocketed.len() as u32,
        started: state.started,
        ended: state.ended,
    }
}

/// Format an elapsed-seconds counter as M:SS for the on-screen clock.
pub fn format_clock(total_seconds: u32) -> String {
    let minutes = total_seconds / 60;
    let seconds = total_seconds - minutes * 60;
    format!("{minutes}:{seconds:02}")
}
