//! Fixed timestep simulation tick and shot management
//!
//! One shared clock drives every ball in stable order within a single `tick`
//! call: no per-ball timers, so cross-ball ordering is deterministic and the
//! "all stopped" aggregate is evaluated against a consistent snapshot. The
//! shot manager cycles Rolling -> AwaitingShot (or AwaitingPlacement after a
//! scratch) -> Rolling.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::ball::{Ball, BallId};
use super::contact::resolve_contacts;
use super::predict::RailAxis;
use super::table::TableGeometry;
use crate::consts::{MAX_SHOT_SPEED, NUMBERED_BALL_COUNT};

/// What the table is waiting on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShotPhase {
    /// Balls in motion; ticking advances physics
    Rolling,
    /// Cue ball scratched; awaiting a placement position
    AwaitingPlacement,
    /// All quiet; awaiting aim and power for the next shot
    AwaitingShot,
}

/// Aim and power for one shot
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Shot {
    /// Aim angle, radians counterclockwise from +x
    pub angle: f32,
    /// Cue power (m/s), clamped to `[0, MAX_SHOT_SPEED]` before dispatch
    pub power: f32,
}

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Candidate cue-ball position while awaiting placement (clamped here)
    pub cursor: Option<Vec2>,
    /// Commit the current placement (click)
    pub confirm_placement: bool,
    /// Take a shot while awaiting one
    pub shot: Option<Shot>,
}

/// Things that happened during a tick, for rendering/score collaborators
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TableEvent {
    ShotTaken { angle: f32, power: f32 },
    RailBounce { id: BallId, axis: RailAxis },
    Pocketed(BallId),
    /// Cue ball scratched; placement phase begins
    Scratch,
    /// Every ball has come to rest; ready for the next shot
    AllStopped,
    CueBallPlaced(Vec2),
}

/// Complete table state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableState {
    pub table: TableGeometry,
    /// Rack seed for reproducibility
    pub seed: u64,
    /// Cue ball first, then numbered balls in order; sunk numbered balls are
    /// removed once the loop acknowledges them
    pub balls: Vec<Ball>,
    pub phase: ShotPhase,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Simulation clock (s); only advances while Rolling
    pub clock: f32,
    /// Numbered balls pocketed so far, in sink order
    pub pocketed: Vec<BallId>,
    /// A placement candidate has arrived since the last scratch
    placement_seen: bool,
    /// Events from the most recent tick
    #[serde(skip)]
    pub events: Vec<TableEvent>,
}

impl TableState {
    /// Rack a fresh table: cue ball plus the numbered balls at seeded-random,
    /// non-overlapping positions inside the padded bounds
    pub fn new(table: TableGeometry, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let mut balls: Vec<Ball> = Vec::with_capacity(NUMBERED_BALL_COUNT as usize + 1);

        let ids = std::iter::once(BallId::Cue)
            .chain((1..=NUMBERED_BALL_COUNT).map(BallId::Numbered));
        for id in ids {
            let pos = random_open_spot(&mut rng, &table, &balls);
            balls.push(Ball::new_at(id, pos, 0.0));
        }

        log::info!("racked {} balls with seed {}", balls.len(), seed);

        Self {
            table,
            seed,
            balls,
            phase: ShotPhase::AwaitingShot,
            time_ticks: 0,
            clock: 0.0,
            pocketed: Vec::new(),
            placement_seen: false,
            events: Vec::new(),
        }
    }

    /// The cue ball (always present, always first)
    pub fn cue_ball(&self) -> &Ball {
        &self.balls[0]
    }

    pub fn cue_ball_mut(&mut self) -> &mut Ball {
        &mut self.balls[0]
    }

    /// Balls still in play (not sunk)
    pub fn active_balls(&self) -> impl Iterator<Item = &Ball> {
        self.balls.iter().filter(|b| !b.is_sunk())
    }

    /// True when no active ball is moving
    pub fn all_stopped(&self) -> bool {
        self.active_balls().all(|b| !b.is_moving())
    }
}

/// Pick a rack position not overlapping any already-placed ball
fn random_open_spot(rng: &mut Pcg32, table: &TableGeometry, placed: &[Ball]) -> Vec2 {
    let min = table.min_bound();
    let max = table.max_bound();
    let clearance = table.ball_radius * 2.0;

    let mut candidate = Vec2::ZERO;
    for _ in 0..64 {
        candidate = Vec2::new(
            rng.random_range(min.x..max.x),
            rng.random_range(min.y..max.y),
        );
        if placed
            .iter()
            .all(|b| b.pos().distance(candidate) >= clearance)
        {
            return candidate;
        }
    }
    // A regulation table has room to spare for sixteen balls; if sampling
    // somehow ran dry, the last candidate still lies inside the bounds
    candidate
}

/// Advance the table by one fixed timestep
pub fn tick(state: &mut TableState, input: &TickInput, dt: f32) {
    state.events.clear();
    state.time_ticks += 1;

    match state.phase {
        ShotPhase::Rolling => {
            state.clock += dt;
            let now = state.clock;

            for idx in 0..state.balls.len() {
                let outcome = state.balls[idx].tick(now, &state.table);
                let id = state.balls[idx].id();
                for axis in outcome.bounces {
                    state.events.push(TableEvent::RailBounce { id, axis });
                }
                if outcome.sunk {
                    state.events.push(TableEvent::Pocketed(id));
                    log::info!("{:?} pocketed", id);
                }
            }

            resolve_contacts(&mut state.balls, now, &state.table);

            // Sunk numbered balls leave the table; the cue ball never does
            for ball in &state.balls {
                if ball.is_sunk() && !ball.id().is_cue() {
                    state.pocketed.push(ball.id());
                }
            }
            state
                .balls
                .retain(|b| b.id().is_cue() || !b.is_sunk());

            if state.all_stopped() {
                if state.cue_ball().is_sunk() {
                    state.cue_ball_mut().begin_placement();
                    state.placement_seen = false;
                    state.phase = ShotPhase::AwaitingPlacement;
                    state.events.push(TableEvent::Scratch);
                    log::info!("scratch: cue ball awaiting placement");
                } else {
                    state.phase = ShotPhase::AwaitingShot;
                    state.events.push(TableEvent::AllStopped);
                    log::info!("all stopped after {} ticks", state.time_ticks);
                }
            }
        }

        ShotPhase::AwaitingPlacement => {
            if let Some(cursor) = input.cursor {
                let pos = state.table.clamp_point(cursor);
                let clock = state.clock;
                state.cue_ball_mut().place(pos, clock);
                state.placement_seen = true;
                state.events.push(TableEvent::CueBallPlaced(pos));
            }
            if input.confirm_placement && state.placement_seen {
                state.cue_ball_mut().finish_placement();
                state.phase = ShotPhase::AwaitingShot;
                log::info!("cue ball placed at {:?}", state.cue_ball().pos());
            }
        }

        ShotPhase::AwaitingShot => {
            if let Some(shot) = input.shot {
                let power = shot.power.clamp(0.0, MAX_SHOT_SPEED);
                let clock = state.clock;
                match state.balls[0].shoot(power, shot.angle, clock, &state.table) {
                    Ok(()) => {
                        state.phase = ShotPhase::Rolling;
                        state.events.push(TableEvent::ShotTaken {
                            angle: shot.angle,
                            power,
                        });
                    }
                    Err(err) => log::warn!("shot rejected: {err}"),
                }
            }
        }
    }
}
