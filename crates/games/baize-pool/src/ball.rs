use serde::{Deserialize, Serialize};

use crate::math::{Quat, Vec3};

/// The cue ball's reserved number.
pub const CUE_BALL: u8 = 0;

/// Which group a rack ball belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BallCategory {
    Cue,
    Solid,
    Stripe,
    Black,
}

/// State of a single ball on the table.
///
/// Balls are created once at rack setup and never destroyed: a pocketed or
/// fallen ball is deactivated, and `pending_reset` returns it to `origin`
/// on the next tick.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Ball {
    pub number: u8,
    pub category: BallCategory,
    pub position: Vec3,
    pub velocity: Vec3,
    pub spin_velocity: Vec3,
    /// Cosmetic roll orientation, composed from spin each tick.
    pub rotation: Quat,
    /// Rack position the ball returns to on reset.
    pub origin: Vec3,
    pub active: bool,
    pub pending_reset: bool,
}

impl Ball {
    pub fn new(number: u8, category: BallCategory, origin: Vec3) -> Self {
        Self {
            number,
            category,
            position: origin,
            velocity: Vec3::ZERO,
            spin_velocity: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            origin,
            active: true,
            pending_reset: false,
        }
    }

    pub fn is_cue(&self) -> bool {
        self.number == CUE_BALL
    }

    /// Whether the ball has come to a complete stop on the table plane.
    /// Exact zero, not a threshold: friction decays velocities to 0.0.
    pub fn at_rest(&self) -> bool {
        self.velocity.x == 0.0 && self.velocity.z == 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_ball_starts_at_origin_and_active() {
        let origin = Vec3::new(1.175, 0.0, 0.0);
        let ball = Ball::new(1, BallCategory::Solid, origin);
        assert_eq!(ball.position, origin);
        assert_eq!(ball.origin, origin);
        assert!(ball.active);
        assert!(!ball.pending_reset);
        assert!(ball.at_rest());
    }

    #[test]
    fn cue_identity() {
        let cue = Ball::new(CUE_BALL, BallCategory::Cue, Vec3::new(-2.0, 0.0, 0.0));
        assert!(cue.is_cue());
        let eight = Ball::new(8, BallCategory::Black, Vec3::ZERO);
        assert!(!eight.is_cue());
    }

    #[test]
    fn at_rest_requires_exact_zero() {
        let mut ball = Ball::new(3, BallCategory::Solid, Vec3::ZERO);
        ball.velocity.x = 1e-7;
        assert!(!ball.at_rest());
        ball.velocity.x = 0.0;
        // Vertical motion does not count against planar rest
        ball.velocity.y = -0.02;
        assert!(ball.at_rest());
    }
}
