//! Round state and the per-participant motion model

use glam::DVec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::{Arena, Cause, Verdict};
use super::frame::{FrameSnapshot, Rgba};
use super::input::{ControlBindings, InputSnapshot, Steer};
use crate::consts::*;
use crate::settings::Settings;
use crate::{heading_vector, normalize_heading};

/// One steering point on the board
#[derive(Debug, Clone, Serialize)]
pub struct Participant {
    /// Registration index, also the roster slot
    pub id: u32,
    pub color: Rgba,
    /// Distance travelled per tick
    pub speed: f64,
    /// Degrees turned per steer tick
    pub turn_rate: f64,
    /// Trail stroke width
    pub thickness: f64,
    pub bindings: ControlBindings,
    /// Waypoints in time order; index 0 is the spawn point
    trajectory: Vec<DVec2>,
    /// Live end of the trail
    head: DVec2,
    /// Degrees in [0, 360)
    heading: f64,
    alive: bool,
}

impl Participant {
    /// Spawn with default speed, turn rate and thickness
    pub fn spawn(id: u32, color: Rgba, bindings: ControlBindings, at: DVec2, heading: f64) -> Self {
        Self {
            id,
            color,
            speed: DEFAULT_SPEED,
            turn_rate: DEFAULT_TURN_RATE,
            thickness: TRAIL_THICKNESS,
            bindings,
            trajectory: vec![at],
            head: at,
            heading: normalize_heading(heading),
            alive: true,
        }
    }

    /// Speeds under `MIN_SPEED` are raised to it. Slower heads land on
    /// their own stroke once the sample is rounded.
    pub fn with_speed(mut self, speed: f64) -> Self {
        if speed.is_nan() || speed < MIN_SPEED {
            log::warn!("Participant {} speed {} raised to {}", self.id, speed, MIN_SPEED);
            self.speed = MIN_SPEED;
        } else {
            self.speed = speed;
        }
        self
    }

    pub fn with_turn_rate(mut self, turn_rate: f64) -> Self {
        self.turn_rate = turn_rate;
        self
    }

    pub fn with_thickness(mut self, thickness: f64) -> Self {
        self.thickness = thickness;
        self
    }

    pub fn trajectory(&self) -> &[DVec2] {
        &self.trajectory
    }

    pub fn head(&self) -> DVec2 {
        self.head
    }

    pub fn heading(&self) -> f64 {
        self.heading
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// Where the head would be after one more tick on the current heading
    pub fn proposed_head(&self) -> DVec2 {
        self.head + heading_vector(self.heading, self.speed)
    }

    /// Advance one tick.
    ///
    /// The head moves and steering applies even on the tick that kills the
    /// participant; it freezes from the next tick on. Returns the cause when
    /// this tick was fatal.
    pub fn advance<F>(&mut self, input: &InputSnapshot, classify: F) -> Option<Cause>
    where
        F: FnOnce(DVec2) -> Verdict,
    {
        if !self.alive {
            return None;
        }

        let next = self.proposed_head();
        let cause = match classify(next) {
            Verdict::Fatal(cause) => {
                self.alive = false;
                Some(cause)
            }
            Verdict::Safe => None,
        };
        self.head = next;

        if let Some(steer) = input.steer_for(&self.bindings) {
            self.steer(steer);
            self.trajectory.push(self.head);
        }

        cause
    }

    fn steer(&mut self, steer: Steer) {
        self.heading = normalize_heading(self.heading + self.turn_rate * steer.sign());
    }

    /// Trail segments in drawing order: waypoint to waypoint, then the last
    /// waypoint to the head
    pub fn segments(&self) -> impl Iterator<Item = (DVec2, DVec2)> + '_ {
        let last = self.trajectory.last().copied().unwrap_or(self.head);
        self.trajectory
            .windows(2)
            .map(|w| (w[0], w[1]))
            .chain(std::iter::once((last, self.head)))
    }
}

/// Lifecycle of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundPhase {
    Running,
    /// At most one participant left (none, for a solo round)
    Over,
}

/// Things that happened during a tick, in order
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    Eliminated {
        id: u32,
        cause: Cause,
        /// Committed head position on the fatal tick
        at: DVec2,
        tick: u64,
    },
    RoundOver {
        survivor: Option<u32>,
    },
}

/// Everything the round controller owns
#[derive(Debug, Clone)]
pub struct RoundState {
    pub arena: Arena,
    /// Registration order is update and draw order
    pub participants: Vec<Participant>,
    /// Capture of the last rendered frame; `None` until the first render
    pub snapshot: Option<FrameSnapshot>,
    pub time_ticks: u64,
    pub phase: RoundPhase,
}

impl RoundState {
    pub fn new(arena: Arena) -> Self {
        Self {
            arena,
            participants: Vec::new(),
            snapshot: None,
            time_ticks: 0,
            phase: RoundPhase::Running,
        }
    }

    /// Build a round from settings. Roster entries without a spawn point or
    /// heading get one from an RNG seeded with `settings.seed`.
    pub fn from_settings(settings: &Settings) -> Self {
        let arena = settings.arena.to_arena();
        let mut state = Self::new(arena);
        let mut rng = Pcg32::seed_from_u64(settings.seed);

        for (slot, entry) in settings.participants.iter().enumerate() {
            let Ok(slot) = u32::try_from(slot) else {
                log::warn!("Roster exceeds {} slots, ignoring the rest", u32::MAX);
                break;
            };
            let at = match entry.spawn {
                Some([x, y]) => DVec2::new(x, y),
                None => random_spawn(&mut rng, &arena),
            };
            let heading = entry
                .heading
                .unwrap_or_else(|| rng.random_range(0.0..360.0));
            let participant = Participant::spawn(
                slot,
                entry.color,
                ControlBindings::for_slot(slot),
                at,
                heading,
            )
            .with_speed(entry.speed)
            .with_turn_rate(entry.turn_rate)
            .with_thickness(entry.thickness);

            log::info!(
                "Participant {} spawns at ({:.1}, {:.1}) heading {:.1}",
                slot,
                at.x,
                at.y,
                participant.heading()
            );
            state.participants.push(participant);
        }

        state
    }

    /// Register a participant; its id is replaced by its registration index
    pub fn add_participant(&mut self, mut participant: Participant) -> u32 {
        let id = self.participants.len() as u32;
        participant.id = id;
        self.participants.push(participant);
        id
    }

    pub fn alive_count(&self) -> usize {
        self.participants.iter().filter(|p| p.is_alive()).count()
    }

    pub fn participant(&self, id: u32) -> Option<&Participant> {
        self.participants.iter().find(|p| p.id == id)
    }

    /// Whether the round has reached its end condition
    pub fn is_decided(&self) -> bool {
        match self.participants.len() {
            0 => false,
            1 => self.alive_count() == 0,
            _ => self.alive_count() <= 1,
        }
    }
}

/// Uniform spawn point at least `SPAWN_INSET` (or the wall margin, if
/// larger) from every edge
fn random_spawn(rng: &mut Pcg32, arena: &Arena) -> DVec2 {
    let inset = SPAWN_INSET.max(arena.margin);
    let axis = |rng: &mut Pcg32, extent: f64| {
        if extent > 2.0 * inset {
            rng.random_range(inset..extent - inset)
        } else {
            extent / 2.0
        }
    };
    let x = axis(&mut *rng, arena.width);
    let y = axis(&mut *rng, arena.height);
    DVec2::new(x, y)
}
