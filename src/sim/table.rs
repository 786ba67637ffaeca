//! Table geometry: playable bounds, rails, and pocket layout
//!
//! Immutable configuration constructed once and passed by reference into the
//! kinematics and prediction code. Distances are meters; the origin sits at the
//! outer corner of the felt (where the first corner pocket is centered), with
//! the playable area inset by the rails.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// A pocket's capture disc
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Pocket {
    pub center: Vec2,
    pub radius: f32,
}

impl Pocket {
    /// Whether a ball center at `point` is captured by this pocket
    #[inline]
    pub fn captures(&self, point: Vec2) -> bool {
        point.distance_squared(self.center) <= self.radius * self.radius
    }
}

/// Immutable table configuration
///
/// `Default` is the regulation table the rest of the crate is tuned for:
/// 2.24 m × 1.12 m of felt inside 0.03 m rails, six 0.065 m pockets, and a
/// rolling-resistance deceleration of 0.098 m/s².
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableGeometry {
    /// Playable width inside the rails (m)
    pub playable_width: f32,
    /// Playable height inside the rails (m)
    pub playable_height: f32,
    /// Rail (bumper) thickness (m)
    pub rail_width: f32,
    /// Ball radius (m); pads the bounds so a ball center stays reachable
    pub ball_radius: f32,
    /// Pocket capture radius (m)
    pub pocket_radius: f32,
    /// Rolling-resistance deceleration magnitude k·g (m/s²)
    pub deceleration: f32,
    /// Ball-ball coefficient of restitution (1.0 = perfectly elastic)
    pub restitution: f32,
}

impl Default for TableGeometry {
    fn default() -> Self {
        Self {
            playable_width: PLAYABLE_WIDTH,
            playable_height: PLAYABLE_HEIGHT,
            rail_width: RAIL_WIDTH,
            ball_radius: BALL_RADIUS,
            pocket_radius: POCKET_RADIUS,
            deceleration: ROLLING_RESISTANCE * GRAVITY,
            restitution: 1.0,
        }
    }
}

impl TableGeometry {
    /// Felt extent including both rails (m)
    #[inline]
    pub fn felt_size(&self) -> Vec2 {
        Vec2::new(
            self.playable_width + self.rail_width * 2.0,
            self.playable_height + self.rail_width * 2.0,
        )
    }

    /// Minimum reachable ball-center position (rail plus ball radius)
    #[inline]
    pub fn min_bound(&self) -> Vec2 {
        Vec2::splat(self.rail_width + self.ball_radius)
    }

    /// Maximum reachable ball-center position
    #[inline]
    pub fn max_bound(&self) -> Vec2 {
        self.felt_size() - self.min_bound()
    }

    /// Clamp a candidate ball-center position into the padded playable rect
    #[inline]
    pub fn clamp_point(&self, point: Vec2) -> Vec2 {
        point.clamp(self.min_bound(), self.max_bound())
    }

    /// The six pockets: four on the felt corners, two recessed into the middle
    /// of the long rails
    pub fn pockets(&self) -> [Pocket; 6] {
        let felt = self.felt_size();
        let r = self.pocket_radius;
        let side_inset = self.rail_width - r;
        let pocket = |x: f32, y: f32| Pocket {
            center: Vec2::new(x, y),
            radius: r,
        };
        [
            pocket(0.0, 0.0),
            pocket(felt.x, 0.0),
            pocket(0.0, felt.y),
            pocket(felt.x, felt.y),
            pocket(felt.x / 2.0, side_inset),
            pocket(felt.x / 2.0, felt.y - side_inset),
        ]
    }

    /// Whether a ball whose center reaches `point` drops into a pocket
    ///
    /// A point counts as captured if it lies within a pocket's capture disc, or
    /// in the mouth region in front of a pocket: the band across the middle of
    /// the long rails for the side pockets, or within a pocket radius of a felt
    /// corner on both axes. The mouth test fires even for positions nominally
    /// on a rail, so a ball headed into a mouth is swallowed instead of bounced.
    pub fn captures(&self, point: Vec2) -> bool {
        if self.pockets().iter().any(|p| p.captures(point)) {
            return true;
        }

        let felt = self.felt_size();
        let side_half_mouth = self.pocket_radius - self.rail_width;
        if (point.x - felt.x / 2.0).abs() < side_half_mouth {
            return true;
        }

        let near_x_edge = point.x < self.pocket_radius || point.x > felt.x - self.pocket_radius;
        let near_y_edge = point.y < self.pocket_radius || point.y > felt.y - self.pocket_radius;
        near_x_edge && near_y_edge
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bounds_are_padded() {
        let table = TableGeometry::default();
        let min = table.min_bound();
        let max = table.max_bound();
        assert!((min.x - 0.0585).abs() < 1e-6);
        assert!((min.y - 0.0585).abs() < 1e-6);
        assert!(max.x > min.x && max.y > min.y);
        // Padded rect sits strictly inside the felt
        let felt = table.felt_size();
        assert!(max.x < felt.x && max.y < felt.y);
    }

    #[test]
    fn test_pocket_layout() {
        let table = TableGeometry::default();
        let pockets = table.pockets();
        assert_eq!(pockets.len(), 6);
        let felt = table.felt_size();
        // Corner pockets sit on the felt corners
        assert_eq!(pockets[0].center, Vec2::ZERO);
        assert_eq!(pockets[3].center, felt);
        // Side pockets are centered on the long rails
        assert!((pockets[4].center.x - felt.x / 2.0).abs() < 1e-6);
        assert!(pockets[4].center.y < 0.0);
        assert!(pockets[5].center.y > felt.y);
    }

    #[test]
    fn test_captures_corner_and_side() {
        let table = TableGeometry::default();
        let felt = table.felt_size();

        // Dead center of the table is safe
        assert!(!table.captures(felt / 2.0));

        // Just inside a corner mouth
        assert!(table.captures(Vec2::new(0.03, 0.03)));
        assert!(table.captures(Vec2::new(felt.x - 0.02, felt.y - 0.02)));

        // Side-pocket band on the top rail
        assert!(table.captures(Vec2::new(felt.x / 2.0, table.min_bound().y)));
        // Same rail but away from the mouth
        assert!(!table.captures(Vec2::new(felt.x / 2.0 + 0.2, table.min_bound().y)));

        // Near an x-edge but mid-rail on y: not a corner capture
        assert!(!table.captures(Vec2::new(0.03, felt.y / 2.0)));
    }

    #[test]
    fn test_clamp_point() {
        let table = TableGeometry::default();
        let min = table.min_bound();
        let max = table.max_bound();

        assert_eq!(table.clamp_point(Vec2::new(-1.0, -1.0)), min);
        assert_eq!(table.clamp_point(Vec2::new(10.0, 10.0)), max);

        let inside = Vec2::new(1.0, 0.5);
        assert_eq!(table.clamp_point(inside), inside);
    }
}
