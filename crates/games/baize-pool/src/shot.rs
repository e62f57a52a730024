use crate::PoolState;
use crate::ball::Ball;
use crate::config::PoolConfig;
use crate::math::Vec3;

/// True when every ball has come to a complete stop on the table plane.
pub fn all_at_rest(balls: &[Ball]) -> bool {
    balls.iter().all(Ball::at_rest)
}

/// Arm the next shot once the table has settled. Never disarms; taking the
/// shot consumes the flag.
pub fn rearm(state: &mut PoolState) {
    if all_at_rest(&state.balls) {
        state.can_shoot = true;
    }
}

/// Track the pointer and publish the clamped launch impulse while a shot
/// is armed and the game is still running.
pub fn track_aim(state: &mut PoolState, cfg: &PoolConfig) {
    if !state.can_shoot || state.ended {
        return;
    }
    let Some(cue_pos) = state.cue().map(|c| c.position) else {
        return;
    };
    let px = (cue_pos.x - state.aim_point.x) / cfg.power_scale;
    let pz = (cue_pos.z - state.aim_point.z) / cfg.power_scale;
    state.launch_vector = Vec3::new(
        px.clamp(-cfg.max_power, cfg.max_power),
        0.0,
        pz.clamp(-cfg.max_power, cfg.max_power),
    );
}

/// Cue-guide endpoints for the renderer: cue ball to pointer while a shot
/// is armed, collapsed onto the ball otherwise.
pub fn aim_line(state: &PoolState) -> (Vec3, Vec3) {
    let anchor = state
        .cue()
        .map(|c| Vec3::new(c.position.x, 0.0, c.position.z))
        .unwrap_or(Vec3::ZERO);
    if state.can_shoot && !state.ended {
        (anchor, Vec3::new(state.aim_point.x, 0.0, state.aim_point.z))
    } else {
        (anchor, anchor)
    }
}

/// Consume an armed shot: launch the cue ball with the published impulse.
/// Returns whether a shot was actually taken.
pub fn strike(state: &mut PoolState) -> bool {
    if !state.can_shoot || state.ended {
        return false;
    }
    let launch = state.launch_vector;
    match state.cue_mut() {
        None => false,
        Some(cue) => {
            cue.velocity = Vec3::new(launch.x, 0.0, launch.z);
            state.can_shoot = false;
            state.started = true;
            true
        },
    }
}
