//! Ball-ball contact resolution
//!
//! A broad-phase sweep once per tick over all active pairs, then an elastic
//! impulse along the line of centers for any overlapping, approaching pair.
//! Restitution comes from the table configuration; masses from the ball
//! identities. Overlap is separated symmetrically so a resolved pair cannot
//! re-trigger on the next tick.

use glam::Vec2;

use super::ball::Ball;
use super::table::TableGeometry;

/// Resolve all ball-ball contacts at clock time `now`
///
/// Each pair is considered at most once per tick. Sunk and off-table balls are
/// skipped, as are pairs whose relative normal velocity is separating.
pub fn resolve_contacts(balls: &mut [Ball], now: f32, table: &TableGeometry) {
    let touch_dist = table.ball_radius * 2.0;

    for i in 0..balls.len() {
        for j in (i + 1)..balls.len() {
            let (head, tail) = balls.split_at_mut(j);
            let a = &mut head[i];
            let b = &mut tail[0];
            if !on_table(a) || !on_table(b) || a.is_obstructed() || b.is_obstructed() {
                continue;
            }
            if a.pos().distance_squared(b.pos()) <= touch_dist * touch_dist {
                collide_pair(a, b, now, table);
            }
        }
    }
}

fn on_table(ball: &Ball) -> bool {
    use super::ball::BallPhase;
    matches!(ball.phase(), BallPhase::AtRest | BallPhase::Moving)
}

/// Elastic impulse along the line of centers
fn collide_pair(a: &mut Ball, b: &mut Ball, now: f32, table: &TableGeometry) {
    let delta = b.pos() - a.pos();
    let dist = delta.length();
    // Coincident centers give no usable normal; leave the pair for next tick
    if dist <= f32::EPSILON {
        return;
    }
    let normal = delta / dist;

    let va = Vec2::from_angle(a.direction()) * a.speed();
    let vb = Vec2::from_angle(b.direction()) * b.speed();
    let closing = (vb - va).dot(normal);
    if closing >= 0.0 {
        // Already separating; impulse would glue the pair together
        return;
    }

    let ma = a.id().mass();
    let mb = b.id().mass();
    let m_eff = ma * mb / (ma + mb);
    let impulse = -(1.0 + table.restitution) * m_eff * closing;

    let va_after = va - normal * (impulse / ma);
    let vb_after = vb + normal * (impulse / mb);

    // Separate the overlap symmetrically so the pair starts apart
    let overlap = table.ball_radius * 2.0 - dist;
    let correction = normal * (overlap.max(0.0) / 2.0);
    let pos_a = table.clamp_point(a.pos() - correction);
    let pos_b = table.clamp_point(b.pos() + correction);

    log::debug!(
        "contact {:?} <-> {:?}: closing {:.3} m/s, impulse {:.4} N·s",
        a.id(),
        b.id(),
        -closing,
        impulse
    );

    a.deflect(pos_a, va_after.length(), va_after.to_angle(), now, table);
    b.deflect(pos_b, vb_after.length(), vb_after.to_angle(), now, table);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::ball::BallId;
    use std::f32::consts::PI;

    fn table() -> TableGeometry {
        TableGeometry::default()
    }

    fn moving_ball(id: BallId, pos: Vec2, speed: f32, direction: f32) -> Ball {
        let mut ball = Ball::new_at(id, pos, 0.0);
        if id.is_cue() {
            ball.shoot(speed, direction, 0.0, &table()).unwrap();
        } else if speed > 0.0 {
            // Numbered balls can't be shot; seed their motion directly
            ball.deflect(pos, speed, direction, 0.0, &table());
        }
        ball
    }

    #[test]
    fn test_head_on_equal_masses_swaps_velocities() {
        let table = TableGeometry {
            restitution: 1.0,
            ..TableGeometry::default()
        };
        let r = table.ball_radius;
        let mut a = moving_ball(BallId::Numbered(1), Vec2::new(1.0, 0.5), 1.0, 0.0);
        let mut b = moving_ball(BallId::Numbered(2), Vec2::new(1.0 + 2.0 * r * 0.99, 0.5), 0.0, 0.0);

        collide_pair(&mut a, &mut b, 0.1, &table);

        // Equal masses, e = 1: the shooter stops, the object ball takes over
        assert!(a.speed() < 1e-5);
        assert!((b.speed() - 1.0).abs() < 1e-5);
        assert!(b.direction().abs() < 1e-5);
    }

    #[test]
    fn test_momentum_conserved_with_unequal_masses() {
        let table = table();
        let r = table.ball_radius;
        let mut cue = moving_ball(BallId::Cue, Vec2::new(1.0, 0.5), 2.0, 0.0);
        let mut object = moving_ball(BallId::Numbered(8), Vec2::new(1.0 + 2.0 * r * 0.98, 0.5), 0.0, 0.0);

        let before = cue.id().mass() * 2.0;
        collide_pair(&mut cue, &mut object, 0.1, &table);

        let after = cue.id().mass() * Vec2::from_angle(cue.direction()).x * cue.speed()
            + object.id().mass() * Vec2::from_angle(object.direction()).x * object.speed();
        assert!((after - before).abs() < 1e-4);
        // The heavier cue ball keeps a little forward motion
        assert!(object.speed() > cue.speed());
    }

    #[test]
    fn test_separating_pair_untouched() {
        let table = table();
        let r = table.ball_radius;
        // Overlapping but moving apart
        let mut a = moving_ball(BallId::Numbered(1), Vec2::new(1.0, 0.5), 1.0, PI);
        let mut b = moving_ball(BallId::Numbered(2), Vec2::new(1.0 + r, 0.5), 1.0, 0.0);

        collide_pair(&mut a, &mut b, 0.1, &table);
        assert!((a.speed() - 1.0).abs() < 1e-6);
        assert!((b.speed() - 1.0).abs() < 1e-6);
        assert!((a.direction() - PI).abs() < 1e-6);
    }

    #[test]
    fn test_broad_phase_skips_distant_pairs() {
        let table = table();
        let mut balls = vec![
            moving_ball(BallId::Cue, Vec2::new(0.5, 0.5), 1.0, 0.0),
            moving_ball(BallId::Numbered(1), Vec2::new(1.8, 0.6), 0.0, 0.0),
        ];
        resolve_contacts(&mut balls, 0.1, &table);
        assert!((balls[0].speed() - 1.0).abs() < 1e-6);
        assert_eq!(balls[1].speed(), 0.0);
    }

    #[test]
    fn test_glancing_contact_deflects_both() {
        let table = table();
        let r = table.ball_radius;
        // Offset hit: the object ball leaves along the line of centers
        let mut a = moving_ball(BallId::Cue, Vec2::new(1.0, 0.5), 2.0, 0.0);
        let offset = Vec2::new(2.0 * r * 0.7, 2.0 * r * 0.7);
        let mut b = moving_ball(BallId::Numbered(3), Vec2::new(1.0, 0.5) + offset, 0.0, 0.0);

        collide_pair(&mut a, &mut b, 0.1, &table);
        assert!(b.speed() > 0.0);
        let line = offset.normalize();
        let b_dir = Vec2::from_angle(b.direction());
        assert!(b_dir.dot(line) > 0.99);
        // Both balls re-predicted their next event or came to rest cleanly
        assert!(a.is_moving());
        assert!(b.is_moving());
    }
}
