//! Constant-deceleration rollout from a last-collision baseline
//!
//! A rolling ball is fully described by the state it had at its most recent
//! collision: position, speed, direction, and the clock time of that collision.
//! Every later pose is a closed-form function of that baseline and the table's
//! rolling-resistance deceleration. Nothing here is integrated step by step, so
//! a ball's rendered path cannot drift from its predicted one no matter how
//! many ticks elapse.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Motion baseline captured at a ball's last collision (or launch)
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RollState {
    /// Ball-center position at the last collision (m)
    pub pos: Vec2,
    /// Speed at the last collision (m/s, >= 0)
    pub speed: f32,
    /// Direction of travel, radians in (-π, π] counterclockwise from +x
    pub direction: f32,
    /// Simulation-clock time of the last collision (s)
    pub time: f32,
}

impl RollState {
    /// A baseline for a ball sitting still at `pos`
    pub fn at_rest(pos: Vec2, time: f32) -> Self {
        Self {
            pos,
            speed: 0.0,
            direction: 0.0,
            time,
        }
    }

    /// Velocity components at the baseline instant
    #[inline]
    pub fn velocity(&self) -> Vec2 {
        Vec2::from_angle(self.direction) * self.speed
    }

    /// Deceleration components, opposing the direction of travel
    #[inline]
    pub fn acceleration(&self, deceleration: f32) -> Vec2 {
        Vec2::from_angle(self.direction) * -deceleration
    }

    /// Seconds after the baseline at which friction brings the ball to rest
    #[inline]
    pub fn stop_time(&self, deceleration: f32) -> f32 {
        if deceleration <= 0.0 {
            f32::INFINITY
        } else {
            self.speed / deceleration
        }
    }

    /// Speed at clock time `now`
    #[inline]
    pub fn speed_at(&self, now: f32, deceleration: f32) -> f32 {
        (self.speed - deceleration * (now - self.time).max(0.0)).max(0.0)
    }

    /// Ball-center position at clock time `now`
    ///
    /// Elapsed time is clamped to the stop time: past it the formula would run
    /// the ball backwards with a reversed-sign speed.
    pub fn position_at(&self, now: f32, deceleration: f32) -> Vec2 {
        let elapsed = (now - self.time)
            .max(0.0)
            .min(self.stop_time(deceleration));
        let v = self.velocity();
        let a = self.acceleration(deceleration);
        self.pos + v * elapsed + 0.5 * a * elapsed * elapsed
    }

    /// Whether the ball is still rolling at clock time `now`
    #[inline]
    pub fn is_moving_at(&self, now: f32, deceleration: f32) -> bool {
        self.speed_at(now, deceleration) > 0.0
    }

    /// Where the ball comes to rest if nothing interrupts the rollout
    pub fn rest_position(&self, deceleration: f32) -> Vec2 {
        self.position_at(self.time + self.stop_time(deceleration), deceleration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    const KG: f32 = 0.098;

    fn rolling(speed: f32, direction: f32) -> RollState {
        RollState {
            pos: Vec2::new(1.0, 0.5),
            speed,
            direction,
            time: 10.0,
        }
    }

    #[test]
    fn test_speed_decays_linearly_to_zero() {
        let roll = rolling(2.0, 0.0);
        assert_eq!(roll.speed_at(10.0, KG), 2.0);
        assert!((roll.speed_at(11.0, KG) - (2.0 - KG)).abs() < 1e-6);
        // Past the stop time the speed clamps at zero instead of going negative
        let t_stop = roll.stop_time(KG);
        assert!((t_stop - 2.0 / KG).abs() < 1e-3);
        assert_eq!(roll.speed_at(10.0 + t_stop + 5.0, KG), 0.0);
    }

    #[test]
    fn test_position_clamps_at_stop() {
        let roll = rolling(2.0, 0.0);
        let t_stop = roll.stop_time(KG);
        let at_stop = roll.position_at(10.0 + t_stop, KG);
        let long_after = roll.position_at(10.0 + t_stop * 3.0, KG);
        assert!((at_stop - long_after).length() < 1e-5);
        // Stopping distance is v²/(2·k·g) along the direction of travel
        assert!((at_stop.x - 1.0 - 2.0 * 2.0 / (2.0 * KG)).abs() < 1e-2);
        assert!((at_stop.y - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_axis_decomposition_at_right_angles() {
        // Straight up: all motion on the y axis, none on x
        let roll = rolling(1.0, FRAC_PI_2);
        let pos = roll.position_at(11.0, KG);
        assert!((pos.x - 1.0).abs() < 1e-6);
        assert!(pos.y > 0.5);

        let v = roll.velocity();
        assert!(v.x.abs() < 1e-6);
        assert!((v.y - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_at_rest_never_moves() {
        let roll = RollState::at_rest(Vec2::new(0.3, 0.4), 0.0);
        assert!(!roll.is_moving_at(100.0, KG));
        assert_eq!(roll.position_at(100.0, KG), Vec2::new(0.3, 0.4));
    }

    proptest! {
        #[test]
        fn prop_speed_non_increasing(
            speed in 0.0f32..5.0,
            direction in -PI..PI,
            t1 in 0.0f32..60.0,
            dt in 0.0f32..60.0,
        ) {
            let roll = rolling(speed, direction);
            let earlier = roll.speed_at(roll.time + t1, KG);
            let later = roll.speed_at(roll.time + t1 + dt, KG);
            prop_assert!(later <= earlier + 1e-6);
        }

        #[test]
        fn prop_stops_exactly_at_stop_time(
            speed in 0.01f32..5.0,
            direction in -PI..PI,
        ) {
            let roll = rolling(speed, direction);
            let t_stop = roll.stop_time(KG);
            prop_assert!(roll.speed_at(roll.time + t_stop, KG) < 1e-4);
            prop_assert!(roll.speed_at(roll.time + t_stop * 0.9, KG) > 0.0);
        }
    }
}
