//! Closed-form prediction of a rolling ball's next table interaction
//!
//! The tricky part of the engine: given a decelerating ball's baseline, find
//! analytically when and where it next meets a rail or pocket, without stepping
//! time. Each axis is solved independently with the constant-deceleration
//! identity `v_f² = v_i² + 2·a·Δ`; the earlier crossing wins. A non-positive
//! discriminant means friction exhausts the ball before that rail, so a ball
//! can also be predicted to simply stop on the felt.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::kinematics::RollState;
use super::table::TableGeometry;
use crate::normalize_direction;

/// Which rail surface a predicted collision lands on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RailAxis {
    /// Top or bottom rail; reflection negates the vertical velocity component
    Horizontal,
    /// Left or right rail; reflection negates the horizontal component
    Vertical,
}

/// What happens at the predicted instant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Impact {
    /// Reflect off a rail
    Bounce(RailAxis),
    /// The predicted position lies in a pocket mouth; the ball drops
    Sink,
}

/// A ball's next predicted interaction with the table
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PredictedEvent {
    /// Absolute simulation-clock time of the event (s)
    pub time: f32,
    /// Ball-center position at the event
    pub pos: Vec2,
    /// Remaining speed at the event (m/s)
    pub speed: f32,
    pub impact: Impact,
}

/// Elapsed time until the ball's center reaches the rail bound on one axis
///
/// `vel`/`accel` are the signed axis components of velocity and deceleration;
/// they always share a sign, so travel is monotonic until the stop. Returns
/// `None` when friction-limited travel never reaches the bound, including the
/// degenerate axis-aligned case where both components are zero.
fn axis_crossing_time(pos: f32, vel: f32, accel: f32, min: f32, max: f32) -> Option<f32> {
    if accel == 0.0 {
        return None;
    }
    let delta = if vel < 0.0 { min - pos } else { max - pos };
    let disc = vel * vel + 2.0 * accel * delta;
    if disc <= 0.0 {
        return None;
    }
    let final_vel = if vel < 0.0 { -disc.sqrt() } else { disc.sqrt() };
    Some(((final_vel - vel) / accel).max(0.0))
}

/// Pick the earlier axis crossing; an exact tie resolves to the vertical rail
fn earliest_crossing(tx: Option<f32>, ty: Option<f32>) -> Option<(f32, RailAxis)> {
    match (tx, ty) {
        (None, None) => None,
        (Some(tx), None) => Some((tx, RailAxis::Vertical)),
        (None, Some(ty)) => Some((ty, RailAxis::Horizontal)),
        (Some(tx), Some(ty)) => {
            if tx <= ty {
                Some((tx, RailAxis::Vertical))
            } else {
                Some((ty, RailAxis::Horizontal))
            }
        }
    }
}

/// Predict the next table interaction for a rolling baseline
///
/// `None` means the ball stops from friction before reaching any rail. An
/// exact simultaneous corner arrival resolves to the vertical rail; the
/// follow-up prediction from the corner then yields the horizontal bounce at
/// the same instant.
pub fn predict(roll: &RollState, table: &TableGeometry) -> Option<PredictedEvent> {
    if roll.speed <= 0.0 {
        return None;
    }

    let v = roll.velocity();
    let a = roll.acceleration(table.deceleration);
    let min = table.min_bound();
    let max = table.max_bound();

    let tx = axis_crossing_time(roll.pos.x, v.x, a.x, min.x, max.x);
    let ty = axis_crossing_time(roll.pos.y, v.y, a.y, min.y, max.y);
    let (elapsed, axis) = earliest_crossing(tx, ty)?;

    let time = roll.time + elapsed;
    let pos = roll.position_at(time, table.deceleration);
    let speed = roll.speed_at(time, table.deceleration);
    let impact = if table.captures(pos) {
        Impact::Sink
    } else {
        Impact::Bounce(axis)
    };

    Some(PredictedEvent {
        time,
        pos,
        speed,
        impact,
    })
}

/// Mirror a direction of travel across the rail surface it just hit
pub fn reflect_direction(direction: f32, axis: RailAxis) -> f32 {
    use std::f32::consts::PI;
    let reflected = match axis {
        RailAxis::Horizontal => -direction,
        RailAxis::Vertical => {
            if direction > 0.0 {
                PI - direction
            } else {
                -PI - direction
            }
        }
    };
    normalize_direction(reflected)
}
