//! Ball lifecycle state machine
//!
//! Wraps the kinematics baseline and the collision predictor behind `shoot` and
//! `tick`. The phase enum replaces the original flag soup: a ball is exactly one
//! of at-rest, moving, sunk, or (cue only) awaiting manual placement after a
//! scratch.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::kinematics::RollState;
use super::predict::{Impact, PredictedEvent, predict, reflect_direction};
use super::table::TableGeometry;
use crate::consts::{CUE_BALL_MASS, NUMBERED_BALL_MASS};
use crate::normalize_direction;

/// Which ball this is. Identity is informational for the physics but decides
/// mass, shootability, and scratch handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BallId {
    Cue,
    Numbered(u8),
}

impl BallId {
    #[inline]
    pub fn is_cue(&self) -> bool {
        matches!(self, BallId::Cue)
    }

    /// Ball mass in kg (the cue ball is slightly heavier)
    #[inline]
    pub fn mass(&self) -> f32 {
        match self {
            BallId::Cue => CUE_BALL_MASS,
            BallId::Numbered(_) => NUMBERED_BALL_MASS,
        }
    }
}

/// Lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BallPhase {
    AtRest,
    Moving,
    Sunk,
    /// Scratched cue ball waiting for a new position from the placement flow
    AwaitingPlacement,
}

/// Why a shot was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ShotError {
    #[error("only the cue ball can be shot")]
    NotCueBall,
    #[error("ball is still in motion")]
    BallInMotion,
    #[error("ball is not on the table")]
    NotOnTable,
    #[error("invalid shot parameters: speed must be finite and non-negative, direction finite")]
    InvalidParameters,
}

/// A ball on (or just off) the table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    id: BallId,
    phase: BallPhase,
    /// Baseline captured at the last collision or launch
    roll: RollState,
    /// Next predicted table interaction; `None` while resting or when friction
    /// wins before any rail
    prediction: Option<PredictedEvent>,
    /// While set, all pose updates for this ball are suspended
    obstructed: bool,
    /// Pose cached for rendering consumers, refreshed by `tick`
    pos: Vec2,
    speed: f32,
}

impl Ball {
    /// Create a resting ball at `pos`
    pub fn new_at(id: BallId, pos: Vec2, time: f32) -> Self {
        Self {
            id,
            phase: BallPhase::AtRest,
            roll: RollState::at_rest(pos, time),
            prediction: None,
            obstructed: false,
            pos,
            speed: 0.0,
        }
    }

    #[inline]
    pub fn id(&self) -> BallId {
        self.id
    }

    #[inline]
    pub fn phase(&self) -> BallPhase {
        self.phase
    }

    /// Current ball-center position for rendering
    #[inline]
    pub fn pos(&self) -> Vec2 {
        self.pos
    }

    /// Current speed (m/s)
    #[inline]
    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Current direction of travel, radians in (-π, π]
    #[inline]
    pub fn direction(&self) -> f32 {
        self.roll.direction
    }

    #[inline]
    pub fn is_moving(&self) -> bool {
        self.phase == BallPhase::Moving
    }

    #[inline]
    pub fn is_sunk(&self) -> bool {
        self.phase == BallPhase::Sunk
    }

    #[inline]
    pub fn is_obstructed(&self) -> bool {
        self.obstructed
    }

    /// Suspend or resume pose updates (hook for external collision pairing)
    pub fn set_obstructed(&mut self, obstructed: bool) {
        self.obstructed = obstructed;
    }

    /// The motion baseline since the last collision
    #[inline]
    pub fn roll(&self) -> &RollState {
        &self.roll
    }

    /// The cached next-event prediction, if any
    #[inline]
    pub fn prediction(&self) -> Option<&PredictedEvent> {
        self.prediction.as_ref()
    }

    /// Launch the cue ball
    ///
    /// Rejects anything but a resting cue ball and non-finite or negative
    /// parameters; a rejected shot leaves the ball untouched.
    pub fn shoot(
        &mut self,
        speed: f32,
        direction: f32,
        now: f32,
        table: &TableGeometry,
    ) -> Result<(), ShotError> {
        if !self.id.is_cue() {
            return Err(ShotError::NotCueBall);
        }
        match self.phase {
            BallPhase::Moving => return Err(ShotError::BallInMotion),
            BallPhase::Sunk | BallPhase::AwaitingPlacement => return Err(ShotError::NotOnTable),
            BallPhase::AtRest => {}
        }
        if !speed.is_finite() || !direction.is_finite() || speed < 0.0 {
            return Err(ShotError::InvalidParameters);
        }

        self.roll = RollState {
            pos: self.pos,
            speed,
            direction: normalize_direction(direction),
            time: now,
        };
        self.prediction = predict(&self.roll, table);
        if speed > 0.0 {
            self.phase = BallPhase::Moving;
            self.speed = speed;
            log::debug!(
                "cue ball shot: speed {:.2} m/s direction {:.3} rad, next event {:?}",
                speed,
                self.roll.direction,
                self.prediction.map(|e| e.impact)
            );
        }
        Ok(())
    }

    /// Rebase the baseline after an external collision (ball-ball contact)
    pub(crate) fn deflect(&mut self, pos: Vec2, speed: f32, direction: f32, now: f32, table: &TableGeometry) {
        self.pos = pos;
        self.speed = speed;
        self.roll = RollState {
            pos,
            speed,
            direction: normalize_direction(direction),
            time: now,
        };
        if speed > 0.0 {
            self.phase = BallPhase::Moving;
            self.prediction = predict(&self.roll, table);
        } else {
            self.phase = BallPhase::AtRest;
            self.prediction = None;
        }
    }

    /// Set a candidate position during the placement flow (caller clamps)
    pub fn place(&mut self, pos: Vec2, now: f32) {
        self.pos = pos;
        self.speed = 0.0;
        self.roll = RollState::at_rest(pos, now);
        self.prediction = None;
    }

    /// Convert a scratched cue ball to the placement phase
    pub(crate) fn begin_placement(&mut self) {
        debug_assert!(self.id.is_cue());
        self.phase = BallPhase::AwaitingPlacement;
        self.prediction = None;
    }

    /// Finish the placement flow: the cue ball rests at its placed position
    pub(crate) fn finish_placement(&mut self) {
        debug_assert!(self.phase == BallPhase::AwaitingPlacement);
        self.phase = BallPhase::AtRest;
    }

    /// Advance the ball to clock time `now`
    ///
    /// Resolves every predicted event whose time has elapsed (an exact corner
    /// arrival is two coincident bounces), then refreshes the cached pose from
    /// the closed-form rollout. Returns the rail axes bounced this tick so the
    /// simulation loop can surface them as events.
    pub fn tick(&mut self, now: f32, table: &TableGeometry) -> TickOutcome {
        let mut outcome = TickOutcome::default();
        if self.phase != BallPhase::Moving || self.obstructed {
            return outcome;
        }

        while let Some(event) = self.prediction.filter(|e| now >= e.time) {
            match event.impact {
                Impact::Sink => {
                    self.phase = BallPhase::Sunk;
                    self.pos = event.pos;
                    self.speed = 0.0;
                    self.roll = RollState::at_rest(event.pos, event.time);
                    self.prediction = None;
                    outcome.sunk = true;
                    log::debug!("{:?} sunk at {:.3},{:.3}", self.id, event.pos.x, event.pos.y);
                    return outcome;
                }
                Impact::Bounce(axis) => {
                    self.roll = RollState {
                        pos: event.pos,
                        speed: event.speed,
                        direction: reflect_direction(self.roll.direction, axis),
                        time: event.time,
                    };
                    self.prediction = predict(&self.roll, table);
                    outcome.bounces.push(axis);
                    log::debug!(
                        "{:?} bounced off {:?} rail at {:.3},{:.3}, speed {:.3}",
                        self.id,
                        axis,
                        event.pos.x,
                        event.pos.y,
                        event.speed
                    );
                }
            }
        }

        self.speed = self.roll.speed_at(now, table.deceleration);
        self.pos = self.roll.position_at(now, table.deceleration);
        if self.speed <= 0.0 {
            // Friction won mid-felt: pin the baseline to the exact stop point
            let stop_time = self.roll.time + self.roll.stop_time(table.deceleration);
            self.pos = self.roll.rest_position(table.deceleration);
            self.roll = RollState::at_rest(self.pos, stop_time);
            self.prediction = None;
            self.phase = BallPhase::AtRest;
            outcome.stopped = true;
        }
        outcome
    }
}

/// What a single `Ball::tick` resolved, for the simulation loop's event log
#[derive(Debug, Clone, Default)]
pub struct TickOutcome {
    pub bounces: Vec<super::predict::RailAxis>,
    pub sunk: bool,
    pub stopped: bool,
}
