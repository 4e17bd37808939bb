//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed step per tick, no wall-clock time
//! - Seeded RNG only (spawn placement)
//! - Stable iteration order (registration order)
//! - Rendering only through the `Canvas` contract

pub mod autopilot;
pub mod collision;
pub mod frame;
pub mod input;
pub mod sdf;
pub mod state;
pub mod tick;

pub use autopilot::{autopilot, autopilot_input};
pub use collision::{Arena, Cause, Verdict, classify};
pub use frame::{FrameSnapshot, Rgba};
pub use input::{Control, ControlBindings, InputSnapshot, Steer};
pub use sdf::{sd_arena_edge, segment_distance};
pub use state::{GameEvent, Participant, RoundPhase, RoundState};
pub use tick::{render, tick};
