//! Bankshot - billiards ball physics with closed-form collision prediction
//!
//! Core modules:
//! - `sim`: Deterministic simulation (table geometry, friction kinematics,
//!   collision prediction, ball lifecycle, shot manager)
//!
//! The simulation never integrates motion tick-to-tick. Each ball carries the
//! state it had at its last collision and every query is evaluated in closed
//! form from that baseline, so position error does not accumulate across ticks.

pub mod sim;

pub use sim::ball::{Ball, BallId, BallPhase, ShotError};
pub use sim::kinematics::RollState;
pub use sim::predict::{Impact, PredictedEvent, RailAxis, predict};
pub use sim::table::TableGeometry;
pub use sim::tick::{Shot, ShotPhase, TableEvent, TableState, TickInput, tick};

/// Physical and table configuration constants
pub mod consts {
    /// Fixed simulation timestep (40 Hz, the 25 ms cadence of the original table)
    pub const TICK_DT: f32 = 0.025;

    /// Maximum cue power accepted from the shot UI (m/s)
    pub const MAX_SHOT_SPEED: f32 = 5.0;

    /// Regulation playable area inside the rails (meters)
    pub const PLAYABLE_WIDTH: f32 = 2.24;
    pub const PLAYABLE_HEIGHT: f32 = 1.12;
    /// Rail (bumper) thickness
    pub const RAIL_WIDTH: f32 = 0.03;
    /// Pocket capture radius
    pub const POCKET_RADIUS: f32 = 0.065;

    /// Ball radius (meters)
    pub const BALL_RADIUS: f32 = 0.0285;
    pub const CUE_BALL_MASS: f32 = 0.17;
    pub const NUMBERED_BALL_MASS: f32 = 0.16;

    /// Coefficient of rolling resistance on the felt
    pub const ROLLING_RESISTANCE: f32 = 0.01;
    /// Acceleration due to gravity (m/s²)
    pub const GRAVITY: f32 = 9.8;

    /// Number of object balls racked alongside the cue ball
    pub const NUMBERED_BALL_COUNT: u8 = 15;
}

/// Normalize a direction angle to (-π, π], counterclockwise from +x
#[inline]
pub fn normalize_direction(mut angle: f32) -> f32 {
    use std::f32::consts::{PI, TAU};
    while angle > PI {
        angle -= TAU;
    }
    while angle <= -PI {
        angle += TAU;
    }
    angle
}
