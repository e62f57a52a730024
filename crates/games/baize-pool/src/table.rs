use serde::{Deserialize, Serialize};

use crate::ball::{Ball, BallCategory, CUE_BALL};
use crate::config::PoolConfig;
use crate::math::Vec3;

/// Centre-to-centre spacing between racked balls (one ball diameter).
const BALL_SPACING: f32 = 0.1;
/// X advance between rack rows.
const ROW_STEP: f32 = BALL_SPACING * 1.75;
/// X position just behind the rack apex.
const RACK_BASE_X: f32 = 1.0;
/// Cue ball spawn, behind the head string.
const CUE_SPAWN: Vec3 = Vec3::new(-2.0, 0.0, 0.0);
/// Corner pockets sit this far outside both rails.
const CORNER_POCKET_OVERHANG: f32 = 0.05;
/// Side pockets sit this far outside the long rails.
const SIDE_POCKET_OVERHANG: f32 = 0.15;

/// A fixed invisible capture sphere at one of the six pocket positions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PocketMarker {
    pub position: Vec3,
    /// Capture distance from the pocket centre.
    pub radius: f32,
}

/// The playing surface: rail half-extents plus the six pockets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Table {
    pub half_width: f32,
    pub half_depth: f32,
    pub pockets: Vec<PocketMarker>,
}

impl Table {
    /// The standard six-pocket table for the given tuning.
    pub fn standard(cfg: &PoolConfig) -> Self {
        let px = cfg.half_width + CORNER_POCKET_OVERHANG;
        let pz = cfg.half_depth + CORNER_POCKET_OVERHANG;
        let sz = cfg.half_depth + SIDE_POCKET_OVERHANG;
        let radius = cfg.intersect_distance;

        let pocket = |x: f32, z: f32| PocketMarker {
            position: Vec3::new(x, 0.0, z),
            radius,
        };

        Self {
            half_width: cfg.half_width,
            half_depth: cfg.half_depth,
            pockets: vec![
                pocket(px, pz),
                pocket(px, -pz),
                pocket(-px, -pz),
                pocket(-px, pz),
                pocket(0.0, sz),
                pocket(0.0, -sz),
            ],
        }
    }
}

/// Build the standard rack: fifteen object balls in a five-row triangle
/// with the apex facing the cue ball, plus the cue ball itself.
pub fn standard_rack() -> Vec<Ball> {
    let mut balls = Vec::with_capacity(16);
    let s = BALL_SPACING;
    let mut x = RACK_BASE_X;

    let place = |balls: &mut Vec<Ball>, number: u8, category: BallCategory, x: f32, z: f32| {
        balls.push(Ball::new(number, category, Vec3::new(x, 0.0, z)));
    };

    // Row 1 (apex)
    x += ROW_STEP;
    place(&mut balls, 1, BallCategory::Solid, x, 0.0);

    // Row 2
    x += ROW_STEP;
    place(&mut balls, 2, BallCategory::Solid, x, s);
    place(&mut balls, 3, BallCategory::Solid, x, -s);

    // Row 3
    x += ROW_STEP;
    place(&mut balls, 4, BallCategory::Solid, x, s * 2.0);
    place(&mut balls, 5, BallCategory::Solid, x, 0.0);
    place(&mut balls, 6, BallCategory::Solid, x, -s * 2.0);

    // Row 4 (eight ball inside)
    x += ROW_STEP;
    place(&mut balls, 7, BallCategory::Solid, x, s);
    place(&mut balls, 8, BallCategory::Black, x, -s);
    place(&mut balls, 9, BallCategory::Stripe, x, s * 3.0);
    place(&mut balls, 10, BallCategory::Stripe, x, -s * 3.0);

    // Row 5 (foot row)
    x += ROW_STEP;
    place(&mut balls, 11, BallCategory::Stripe, x, s * 2.0);
    place(&mut balls, 12, BallCategory::Stripe, x, -s * 2.0);
    place(&mut balls, 13, BallCategory::Stripe, x, 0.0);
    place(&mut balls, 14, BallCategory::Stripe, x, s * 4.0);
    place(&mut balls, 15, BallCategory::Stripe, x, -s * 4.0);

    balls.push(Ball::new(CUE_BALL, BallCategory::Cue, CUE_SPAWN));
    balls
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn standard_table_has_six_pockets() {
        let table = Table::standard(&PoolConfig::default());
        assert_eq!(table.pockets.len(), 6);
        // Corner pockets sit just outside both rails
        let corner = &table.pockets[0];
        assert!(corner.position.x.abs() > table.half_width);
        assert!(corner.position.z.abs() > table.half_depth);
        // Side pockets sit on the centre line
        assert_eq!(table.pockets[4].position.x, 0.0);
    }

    #[test]
    fn pocket_radius_matches_proximity_threshold() {
        let cfg = PoolConfig::default();
        let table = Table::standard(&cfg);
        assert!(
            table
                .pockets
                .iter()
                .all(|p| p.radius == cfg.intersect_distance)
        );
    }

    #[test]
    fn rack_has_sixteen_unique_balls() {
        let balls = standard_rack();
        assert_eq!(balls.len(), 16);
        let numbers: HashSet<u8> = balls.iter().map(|b| b.number).collect();
        assert_eq!(numbers.len(), 16, "Ball numbers must be unique");
    }

    #[test]
    fn rack_has_exactly_one_cue_ball() {
        let balls = standard_rack();
        let cues: Vec<&Ball> = balls.iter().filter(|b| b.is_cue()).collect();
        assert_eq!(cues.len(), 1);
        assert_eq!(cues[0].category, BallCategory::Cue);
        assert!(cues[0].position.x < 0.0, "Cue ball spawns behind the rack");
    }

    #[test]
    fn rack_category_split() {
        let balls = standard_rack();
        let count = |c: BallCategory| balls.iter().filter(|b| b.category == c).count();
        assert_eq!(count(BallCategory::Solid), 7);
        assert_eq!(count(BallCategory::Stripe), 7);
        assert_eq!(count(BallCategory::Black), 1);
        assert_eq!(count(BallCategory::Cue), 1);
    }

    #[test]
    fn racked_balls_rest_on_the_table() {
        for ball in standard_rack() {
            assert_eq!(ball.position.y, 0.0, "Ball {} floats", ball.number);
            assert!(ball.active);
            assert_eq!(ball.position, ball.origin);
        }
    }

    #[test]
    fn rack_fits_inside_the_rails() {
        let cfg = PoolConfig::default();
        for ball in standard_rack() {
            assert!(ball.position.x.abs() < cfg.half_width);
            assert!(ball.position.z.abs() < cfg.half_depth);
        }
    }
}
