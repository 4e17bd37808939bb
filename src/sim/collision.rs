//! Collision detection against the arena and the previous frame
//!
//! Classification is a pure function of the proposed head position, the
//! arena and the last captured frame. Trails are never stored separately:
//! whatever was rendered last frame is what a head can run into.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::frame::{FrameSnapshot, Rgba};
use super::sdf::sd_arena_edge;
use crate::consts::{ARENA_HEIGHT, ARENA_WIDTH, BACKGROUND, WALL_MARGIN};

/// What killed a participant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cause {
    /// Entered the lethal margin along an arena edge
    Wall,
    /// Touched a previously rendered trail pixel (any participant's)
    Trail,
}

/// Result of classifying a proposed head position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Safe,
    Fatal(Cause),
}

impl Verdict {
    pub fn is_fatal(&self) -> bool {
        matches!(self, Verdict::Fatal(_))
    }
}

/// Playing field bounds and the color that counts as empty
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub width: f64,
    pub height: f64,
    /// Positions closer than this to any edge are fatal
    pub margin: f64,
    pub background: Rgba,
}

impl Default for Arena {
    fn default() -> Self {
        Self {
            width: ARENA_WIDTH as f64,
            height: ARENA_HEIGHT as f64,
            margin: WALL_MARGIN,
            background: BACKGROUND,
        }
    }
}

impl Arena {
    /// Boundary rule. A distance of exactly `margin` is still safe.
    #[inline]
    pub fn in_kill_zone(&self, pos: DVec2) -> bool {
        sd_arena_edge(pos, self.width, self.height) < self.margin
    }
}

/// Classify a proposed head position.
///
/// Rules, in order:
/// 1. Boundary: fatal inside the wall margin (or outside the arena).
/// 2. Pixel: with a snapshot, fatal when the nearest pixel is not the
///    background color. There is no exemption for a participant's own trail.
///
/// Without a snapshot (first tick) only the boundary rule applies.
pub fn classify(pos: DVec2, arena: &Arena, snapshot: Option<&FrameSnapshot>) -> Verdict {
    if !pos.is_finite() || arena.in_kill_zone(pos) {
        return Verdict::Fatal(Cause::Wall);
    }

    if let Some(frame) = snapshot {
        match frame.sample(pos) {
            Some(color) if color != arena.background => return Verdict::Fatal(Cause::Trail),
            // Off-frame samples are left to the boundary rule
            _ => {}
        }
    }

    Verdict::Safe
}
