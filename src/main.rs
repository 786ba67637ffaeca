//! Bankshot headless demo
//!
//! Racks a table, takes a few scripted shots, and prints a JSON summary of
//! what happened. Set RUST_LOG=debug to watch every bounce.

use std::f32::consts::PI;

use serde::Serialize;

use bankshot::consts::TICK_DT;
use bankshot::{BallId, Shot, ShotPhase, TableGeometry, TableState, TickInput, tick};

#[derive(Serialize)]
struct Summary {
    seed: u64,
    shots_taken: u32,
    ticks: u64,
    pocketed: Vec<BallId>,
    cue_position: [f32; 2],
}

fn main() {
    env_logger::init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(42);

    let table = TableGeometry::default();
    let center = table.felt_size() / 2.0;
    let mut state = TableState::new(table, seed);

    let max_shots = 8u32;
    let mut shots_taken = 0;

    while shots_taken < max_shots {
        let input = match state.phase {
            ShotPhase::AwaitingShot => {
                // Fan shots around the table, powers cycling 2..4 m/s
                let angle = shots_taken as f32 * (2.0 * PI / max_shots as f32) - PI / 3.0;
                let power = 2.0 + (shots_taken % 3) as f32;
                shots_taken += 1;
                TickInput {
                    shot: Some(Shot { angle, power }),
                    ..Default::default()
                }
            }
            ShotPhase::AwaitingPlacement => TickInput {
                cursor: Some(center),
                confirm_placement: true,
                ..Default::default()
            },
            ShotPhase::Rolling => TickInput::default(),
        };

        tick(&mut state, &input, TICK_DT);

        for event in &state.events {
            log::info!("event: {event:?}");
        }
    }

    // Let the final shot play out
    let idle = TickInput::default();
    while state.phase == ShotPhase::Rolling {
        tick(&mut state, &idle, TICK_DT);
    }

    let summary = Summary {
        seed,
        shots_taken,
        ticks: state.time_ticks,
        pocketed: state.pocketed.clone(),
        cue_position: state.cue_ball().pos().into(),
    };
    match serde_json::to_string_pretty(&summary) {
        Ok(json) => println!("{json}"),
        Err(err) => log::error!("failed to serialize summary: {err}"),
    }
}
