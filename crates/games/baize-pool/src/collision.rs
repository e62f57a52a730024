use std::collections::BTreeSet;

use crate::ball::Ball;
use crate::config::PoolConfig;
use crate::math::{Mat3, Vec3};
use crate::table::{PocketMarker, Table};

/// Whether two points fall within the given proximity threshold.
fn within(a: Vec3, b: Vec3, distance: f32) -> bool {
    (a - b).length_squared() < distance * distance
}

/// Resolve an elastic impact between two intersecting balls of equal mass.
///
/// Both velocities are rotated into a frame where the line of centres is
/// the X axis; there the exchange is a straight swap of X components
/// (tangential motion is untouched), then everything rotates back.
pub fn resolve_pair(a: &mut Ball, b: &mut Ball) {
    let rot = Mat3::rotation_onto_x((b.position - a.position).normalized());

    a.velocity = rot.apply(a.velocity);
    b.velocity = rot.apply(b.velocity);

    // Spin tracks the in-frame velocity; crude, but it reads well on a
    // rolling ball.
    a.spin_velocity = a.velocity;
    b.spin_velocity = b.velocity;

    // Only swap when the balls are closing on each other.
    if a.velocity.x > b.velocity.x {
        std::mem::swap(&mut a.velocity.x, &mut b.velocity.x);
    }

    let back = rot.transposed();
    a.velocity = back.apply(a.velocity);
    b.velocity = back.apply(b.velocity);
}

/// Pull a ball toward the pocket centre and take it out of play.
pub fn capture(ball: &mut Ball, pocket: &PocketMarker, cfg: &PoolConfig) {
    ball.velocity = Vec3::new(
        (pocket.position.x - ball.position.x) * cfg.pocket_pull,
        -cfg.pocket_drop,
        (pocket.position.z - ball.position.z) * cfg.pocket_pull,
    );
    ball.active = false;
}

/// Reflect the velocity component carrying a ball past a rail. One axis per
/// tick, X first; a ball already rebounding is left alone.
pub fn reflect_off_rails(ball: &mut Ball, table: &Table) {
    let p = ball.position;
    if p.x.abs() > table.half_width && p.x * ball.velocity.x > 0.0 {
        ball.velocity.x = -ball.velocity.x;
    } else if p.z.abs() > table.half_depth && p.z * ball.velocity.z > 0.0 {
        ball.velocity.z = -ball.velocity.z;
    }
}

/// One collision pass over every ball: pairwise impacts against all other
/// balls, pocket capture, then rail reflection. Returns the numbers of
/// object balls newly captured this tick.
pub fn resolve_all(
    balls: &mut [Ball],
    table: &Table,
    pocketed: &mut BTreeSet<u8>,
    cfg: &PoolConfig,
) -> Vec<u8> {
    let mut captured = Vec::new();

    for i in 0..balls.len() {
        for j in 0..balls.len() {
            if j == i {
                continue;
            }
            let (ball, other) = pair_mut(balls, i, j);
            if ball.active
                && other.active
                && within(ball.position, other.position, cfg.intersect_distance)
            {
                resolve_pair(ball, other);
            }
        }

        let ball = &mut balls[i];
        for pocket in &table.pockets {
            if ball.active && within(ball.position, pocket.position, pocket.radius) {
                capture(ball, pocket, cfg);
                if !ball.is_cue() && pocketed.insert(ball.number) {
                    captured.push(ball.number);
                }
            }
        }

        // Rails are skipped while a ball is dropping into a pocket.
        if ball.active && ball.velocity.y <= cfg.falling_cutoff {
            reflect_off_rails(ball, table);
        }
    }

    captured
}

fn pair_mut(balls: &mut [Ball], i: usize, j: usize) -> (&mut Ball, &mut Ball) {
    if i < j {
        let (head, tail) = balls.split_at_mut(j);
        (&mut head[i], &mut tail[0])
    } else {
        let (head, tail) = balls.split_at_mut(i);
        (&mut tail[0], &mut head[j])
    }
}
