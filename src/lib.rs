//! Kurve - gameplay core of a multiplayer trail arena game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (motion, collision, round controller)
//! - `renderer`: Rendering backend contract and a software rasterizer
//! - `settings`: Data-driven arena rules and roster

pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::{ArenaSettings, ParticipantSettings, Settings};

use glam::DVec2;

/// Game configuration constants
pub mod consts {
    use crate::sim::Rgba;

    /// Arena dimensions (pixels)
    pub const ARENA_WIDTH: u32 = 1280;
    pub const ARENA_HEIGHT: u32 = 960;

    /// Lethal band along every arena edge
    pub const WALL_MARGIN: f64 = 25.0;

    /// Redraw rate driven by the host timer
    pub const FPS: f64 = 60.0;

    /// Participant defaults
    pub const DEFAULT_SPEED: f64 = 3.0; // units per tick
    pub const DEFAULT_TURN_RATE: f64 = 2.0; // degrees per steer tick
    pub const TRAIL_THICKNESS: f64 = 4.0;
    /// Slowest safe speed: must exceed the half-diagonal of a pixel
    pub const MIN_SPEED: f64 = 1.0;

    /// Random spawns keep at least this distance from every edge
    pub const SPAWN_INSET: f64 = 150.0;

    /// Ticks the autopilot simulates ahead for each steering option
    pub const AUTOPILOT_LOOKAHEAD: u32 = 40;

    /// Headless demo cap
    pub const MAX_TICKS: u64 = 10_000;

    pub const BACKGROUND: Rgba = Rgba::rgb(50, 50, 50);

    /// Default roster colors, in slot order
    pub const PALETTE: [Rgba; 6] = [
        Rgba::rgb(255, 100, 100),
        Rgba::rgb(100, 255, 100),
        Rgba::rgb(100, 150, 255),
        Rgba::rgb(255, 230, 90),
        Rgba::rgb(230, 110, 255),
        Rgba::rgb(90, 230, 230),
    ];

    /// Headings in degrees (y grows downward)
    pub const DIR_RIGHT: f64 = 0.0;
    pub const DIR_DOWN_RIGHT: f64 = 45.0;
    pub const DIR_DOWN: f64 = 90.0;
    pub const DIR_DOWN_LEFT: f64 = 135.0;
    pub const DIR_LEFT: f64 = 180.0;
    pub const DIR_UP_LEFT: f64 = 225.0;
    pub const DIR_UP: f64 = 270.0;
    pub const DIR_UP_RIGHT: f64 = 315.0;
}

/// Normalize a heading in degrees to [0, 360)
#[inline]
pub fn normalize_heading(heading: f64) -> f64 {
    let mut h = heading % 360.0;
    if h < 0.0 {
        h += 360.0;
    }
    // -tiny + 360.0 rounds up to exactly 360.0
    if h >= 360.0 { 0.0 } else { h }
}

/// Displacement of one tick at `speed` along `heading` (degrees)
#[inline]
pub fn heading_vector(heading: f64, speed: f64) -> DVec2 {
    let radians = heading * std::f64::consts::PI / 180.0;
    DVec2::new(radians.cos() * speed, radians.sin() * speed)
}
