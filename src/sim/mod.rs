//! Deterministic simulation module
//!
//! All gameplay physics lives here. This module must be pure and deterministic:
//! - Fixed timestep only, one shared clock for every ball
//! - Seeded RNG only (rack placement)
//! - Stable iteration order (cue ball first, numbered balls by number)
//! - No rendering or platform dependencies

pub mod ball;
pub mod contact;
pub mod kinematics;
pub mod predict;
pub mod table;
pub mod tick;

pub use ball::{Ball, BallId, BallPhase, ShotError, TickOutcome};
pub use kinematics::RollState;
pub use predict::{Impact, PredictedEvent, RailAxis, predict, reflect_direction};
pub use table::{Pocket, TableGeometry};
pub use tick::{Shot, ShotPhase, TableEvent, TableState, TickInput, tick};
