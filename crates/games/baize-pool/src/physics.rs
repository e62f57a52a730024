use std::collections::BTreeSet;

use crate::ball::Ball;
use crate::config::PoolConfig;
use crate::math::{Quat, Vec3};

/// Constant w term mixed into each per-tick roll increment; keeps the
/// orientation step small relative to the spin magnitude.
const ROLL_BLEND: f32 = 0.3;

/// Outcome of integrating one ball for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    None,
    /// The cue ball dropped off the table and will be respotted.
    CueFell,
}

/// Advance one ball by one fixed tick: consume a pending reset or integrate
/// velocity, handle fall-through, pin resting height, then decay velocity
/// and spin.
pub fn step_ball(ball: &mut Ball, pocketed: &BTreeSet<u8>, cfg: &PoolConfig) -> StepOutcome {
    let mut outcome = StepOutcome::None;

    // A requested reset overrides all other motion this tick.
    if ball.pending_reset {
        ball.velocity = Vec3::ZERO;
        ball.spin_velocity = Vec3::ZERO;
        ball.position = Vec3::new(ball.origin.x, 0.0, ball.origin.z);
        ball.active = true;
        ball.pending_reset = false;
    } else {
        ball.position = ball.position + ball.velocity;
    }

    if ball.position.y < cfg.fall_threshold {
        if ball.is_cue() {
            // Scratch: recall the cue ball at a time cost.
            ball.pending_reset = true;
            outcome = StepOutcome::CueFell;
        } else {
            // Retired until an explicit restart.
            ball.position.y = cfg.sunk_depth;
        }
    }

    // Pin resting balls to table height. Captured balls keep falling; the
    // cue ball is handled by the scratch path above.
    if ball.position.y > cfg.rest_epsilon
        || (ball.position.y < 0.0 && !ball.is_cue() && !pocketed.contains(&ball.number))
    {
        ball.position.y = 0.0;
    }

    apply_friction(ball, cfg);
    roll(ball);

    outcome
}

/// Linear friction: move each component's magnitude toward zero by a fixed
/// step, never past it.
pub fn apply_friction(ball: &mut Ball, cfg: &PoolConfig) {
    ball.velocity.x = decay(ball.velocity.x, cfg.rolling_friction);
    ball.velocity.z = decay(ball.velocity.z, cfg.rolling_friction);

    ball.spin_velocity.x = decay(ball.spin_velocity.x, cfg.spin_friction);
    ball.spin_velocity.y = decay(ball.spin_velocity.y, cfg.spin_friction);
    ball.spin_velocity.z = decay(ball.spin_velocity.z, cfg.spin_friction);
}

fn decay(value: f32, step: f32) -> f32 {
    value.signum() * (value.abs() - step).max(0.0)
}

/// Compose the cosmetic roll orientation from the current spin. A resting
/// ball keeps its exact orientation.
fn roll(ball: &mut Ball) {
    let s = ball.spin_velocity;
    if s == Vec3::ZERO {
        return;
    }
    let step = Quat::new(s.z, s.y, -s.x, ROLL_BLEND).normalized();
    ball.rotation = (ball.rotation * step).normalized();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ball::{BallCategory, CUE_BALL};

    fn cfg() -> PoolConfig {
        PoolConfig::default()
    }

    fn object_ball() -> Ball {
        Ball::new(5, BallCategory::Solid, Vec3::new(1.525, 0.0, 0.0))
    }

    fn cue_ball() -> Ball {
        Ball::new(CUE_BALL, BallCategory::Cue, Vec3::new(-2.0, 0.0, 0.0))
    }

    #[test]
    fn position_advances_by_velocity() {
        let mut ball = object_ball();
        ball.velocity = Vec3::new(0.05, 0.0, -0.02);
        step_ball(&mut ball, &BTreeSet::new(), &cfg());
        assert_eq!(ball.position.x, 1.525 + 0.05);
        assert_eq!(ball.position.z, -0.02);
    }

    #[test]
    fn friction_reaches_exact_zero_and_stays() {
        let mut ball = object_ball();
        ball.velocity = Vec3::new(0.0023, 0.0, -0.0011);
        let empty = BTreeSet::new();
        for _ in 0..10 {
            step_ball(&mut ball, &empty, &cfg());
        }
        assert_eq!(ball.velocity.x, 0.0);
        assert_eq!(ball.velocity.z, 0.0);
        step_ball(&mut ball, &empty, &cfg());
        assert_eq!(ball.velocity.x, 0.0, "Zero velocity must stay zero");
    }

    #[test]
    fn friction_never_overshoots() {
        let mut ball = object_ball();
        ball.velocity = Vec3::new(0.0002, 0.0, 0.0);
        apply_friction(&mut ball, &cfg());
        assert_eq!(ball.velocity.x, 0.0, "Decrement must not flip the sign");
    }

    #[test]
    fn spin_decays_slower_than_velocity() {
        let mut ball = object_ball();
        ball.velocity = Vec3::new(0.01, 0.0, 0.0);
        ball.spin_velocity = Vec3::new(0.01, 0.0, 0.0);
        apply_friction(&mut ball, &cfg());
        assert!(ball.spin_velocity.x > ball.velocity.x);
    }

    #[test]
    fn reset_takes_priority_over_motion() {
        let mut ball = object_ball();
        ball.pending_reset = true;
        ball.active = false;
        ball.position = Vec3::new(0.0, -10.0, 0.9);
        ball.velocity = Vec3::new(0.08, 0.0, 0.08);
        ball.spin_velocity = Vec3::new(0.01, 0.01, 0.01);

        step_ball(&mut ball, &BTreeSet::new(), &cfg());

        assert_eq!(ball.position, Vec3::new(ball.origin.x, 0.0, ball.origin.z));
        assert_eq!(ball.velocity, Vec3::ZERO);
        assert_eq!(ball.spin_velocity, Vec3::ZERO);
        assert!(ball.active);
        assert!(!ball.pending_reset);
    }

    #[test]
    fn cue_fall_requests_reset_and_reports_scratch() {
        let mut ball = cue_ball();
        ball.position.y = -0.4;
        let outcome = step_ball(&mut ball, &BTreeSet::new(), &cfg());
        assert_eq!(outcome, StepOutcome::CueFell);
        assert!(ball.pending_reset);
    }

    #[test]
    fn fallen_object_ball_is_retired_out_of_view() {
        let mut ball = object_ball();
        ball.position.y = -0.4;
        let mut pocketed = BTreeSet::new();
        pocketed.insert(ball.number);
        let outcome = step_ball(&mut ball, &pocketed, &cfg());
        assert_eq!(outcome, StepOutcome::None);
        assert_eq!(ball.position.y, -10.0);
        assert!(!ball.pending_reset);
    }

    #[test]
    fn hovering_ball_is_pinned_to_table_height() {
        let mut ball = object_ball();
        ball.position.y = 0.03;
        step_ball(&mut ball, &BTreeSet::new(), &cfg());
        assert_eq!(ball.position.y, 0.0);
    }

    #[test]
    fn captured_ball_keeps_falling() {
        let mut ball = object_ball();
        ball.position.y = -0.01;
        ball.velocity.y = -0.02;
        let mut pocketed = BTreeSet::new();
        pocketed.insert(ball.number);
        step_ball(&mut ball, &pocketed, &cfg());
        assert!(ball.position.y < -0.01, "Pocketed ball must keep dropping");
    }

    #[test]
    fn stray_negative_height_is_pinned_for_live_balls() {
        let mut ball = object_ball();
        ball.position.y = -0.01;
        step_ball(&mut ball, &BTreeSet::new(), &cfg());
        assert_eq!(ball.position.y, 0.0);
    }

    #[test]
    fn roll_only_moves_with_spin() {
        let mut ball = object_ball();
        step_ball(&mut ball, &BTreeSet::new(), &cfg());
        assert_eq!(ball.rotation, Quat::IDENTITY, "No spin, no roll");

        ball.spin_velocity = Vec3::new(0.05, 0.0, 0.0);
        step_ball(&mut ball, &BTreeSet::new(), &cfg());
        assert_ne!(ball.rotation, Quat::IDENTITY);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn friction_magnitude_never_increases(
                vx in -0.2f32..0.2,
                vz in -0.2f32..0.2,
            ) {
                let mut ball = object_ball();
                ball.velocity = Vec3::new(vx, 0.0, vz);
                apply_friction(&mut ball, &cfg());
                prop_assert!(ball.velocity.x.abs() <= vx.abs());
                prop_assert!(ball.velocity.z.abs() <= vz.abs());
            }

            #[test]
            fn friction_never_flips_sign(
                v in -0.2f32..0.2,
                steps in 1usize..600,
            ) {
                let mut ball = object_ball();
                ball.velocity = Vec3::new(v, 0.0, 0.0);
                let empty = BTreeSet::new();
                let c = cfg();
                for _ in 0..steps {
                    // Hold the ball in place so only friction acts
                    ball.position = ball.origin;
                    step_ball(&mut ball, &empty, &c);
                    prop_assert!(
                        ball.velocity.x == 0.0 || ball.velocity.x.signum() == v.signum(),
                        "friction flipped {} to {}", v, ball.velocity.x
                    );
                }
            }
        }
    }
}
