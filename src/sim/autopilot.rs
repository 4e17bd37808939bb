//! Autopilot for unattended participants (demo/attract mode)
//!
//! Probes each steering option a fixed number of ticks ahead against the
//! last rendered frame and keeps the one that survives longest.

use glam::DVec2;

use super::collision::{Arena, classify};
use super::frame::FrameSnapshot;
use super::input::{InputSnapshot, Steer};
use super::state::{Participant, RoundState};
use crate::{heading_vector, normalize_heading};

/// Options in tie-break order
const OPTIONS: [Option<Steer>; 3] = [None, Some(Steer::Left), Some(Steer::Right)];

/// Number of look-ahead ticks `steer` survives, up to `lookahead`
fn survival_ticks(
    participant: &Participant,
    steer: Option<Steer>,
    arena: &Arena,
    snapshot: Option<&FrameSnapshot>,
    lookahead: u32,
) -> u32 {
    let turn = steer.map_or(0.0, |s| s.sign() * participant.turn_rate);
    let mut pos: DVec2 = participant.head();
    let mut heading = participant.heading();

    for step in 0..lookahead {
        pos += heading_vector(heading, participant.speed);
        if classify(pos, arena, snapshot).is_fatal() {
            return step;
        }
        heading = normalize_heading(heading + turn);
    }
    lookahead
}

/// Pick a steering option for a live participant. Ties prefer going
/// straight, then left.
pub fn autopilot(
    participant: &Participant,
    arena: &Arena,
    snapshot: Option<&FrameSnapshot>,
    lookahead: u32,
) -> Option<Steer> {
    if !participant.is_alive() {
        return None;
    }

    let mut best = None;
    let mut best_ticks = 0;
    for (i, option) in OPTIONS.into_iter().enumerate() {
        let ticks = survival_ticks(participant, option, arena, snapshot, lookahead);
        if i == 0 || ticks > best_ticks {
            best = option;
            best_ticks = ticks;
        }
    }
    best
}

/// Input for one tick with every participant in `ids` on autopilot
pub fn autopilot_input(state: &RoundState, ids: &[u32], lookahead: u32) -> InputSnapshot {
    let mut input = InputSnapshot::new();
    for participant in state.participants.iter().filter(|p| ids.contains(&p.id)) {
        let steer = autopilot(participant, &state.arena, state.snapshot.as_ref(), lookahead);
        input.apply_steer(&participant.bindings, steer);
    }
    input
}
