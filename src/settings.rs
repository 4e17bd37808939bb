//! Arena rules and roster
//!
//! Loaded from a JSON file by the host. Every field has a default, so a
//! partial file only overrides what it names.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::{Arena, Rgba};

/// Playing field settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaSettings {
    pub width: u32,
    pub height: u32,
    /// Lethal band along every edge
    pub margin: f64,
    pub background: Rgba,
}

impl Default for ArenaSettings {
    fn default() -> Self {
        Self {
            width: ARENA_WIDTH,
            height: ARENA_HEIGHT,
            margin: WALL_MARGIN,
            background: BACKGROUND,
        }
    }
}

impl ArenaSettings {
    pub fn to_arena(&self) -> Arena {
        Arena {
            width: self.width as f64,
            height: self.height as f64,
            margin: self.margin,
            background: self.background,
        }
    }
}

/// One roster entry. Its position in the roster is its control slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticipantSettings {
    pub color: Rgba,
    /// Fixed spawn point; random when absent
    pub spawn: Option<[f64; 2]>,
    /// Initial heading in degrees; random when absent
    pub heading: Option<f64>,
    pub speed: f64,
    pub turn_rate: f64,
    pub thickness: f64,
}

impl Default for ParticipantSettings {
    fn default() -> Self {
        Self {
            color: PALETTE[0],
            spawn: None,
            heading: None,
            speed: DEFAULT_SPEED,
            turn_rate: DEFAULT_TURN_RATE,
            thickness: TRAIL_THICKNESS,
        }
    }
}

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub arena: ArenaSettings,
    /// Redraw rate of the host timer
    pub fps: f64,
    /// Tick cap for unattended rounds
    pub max_ticks: u64,
    /// Seed for random spawns
    pub seed: u64,
    pub participants: Vec<ParticipantSettings>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            arena: ArenaSettings::default(),
            fps: FPS,
            max_ticks: MAX_TICKS,
            seed: 0,
            participants: vec![
                ParticipantSettings {
                    color: PALETTE[0],
                    spawn: Some([100.0, 200.0]),
                    heading: Some(DIR_DOWN_RIGHT),
                    ..Default::default()
                },
                ParticipantSettings {
                    color: PALETTE[1],
                    spawn: Some([300.0, 400.0]),
                    heading: Some(DIR_DOWN_RIGHT),
                    ..Default::default()
                },
            ],
        }
    }
}

impl Settings {
    /// Parse settings from JSON
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Load settings from a JSON file, falling back to defaults when the
    /// file is unreadable or malformed
    pub fn load(path: &Path) -> Self {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Cannot read settings {}: {}, using defaults", path.display(), e);
                return Self::default();
            }
        };

        match Self::from_json(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings.sanitized()
            }
            Err(e) => {
                log::warn!("Invalid settings {}: {}, using defaults", path.display(), e);
                Self::default()
            }
        }
    }

    /// Replace values the simulation cannot run with by their defaults
    pub fn sanitized(mut self) -> Self {
        let defaults = ArenaSettings::default();
        if self.arena.width == 0 || self.arena.height == 0 {
            log::warn!(
                "Arena {}x{} is empty, using {}x{}",
                self.arena.width,
                self.arena.height,
                defaults.width,
                defaults.height
            );
            self.arena.width = defaults.width;
            self.arena.height = defaults.height;
        }
        if !self.arena.margin.is_finite() || self.arena.margin < 0.0 {
            log::warn!("Wall margin {} is invalid, using {}", self.arena.margin, WALL_MARGIN);
            self.arena.margin = WALL_MARGIN;
        }
        if !self.fps.is_finite() || self.fps <= 0.0 {
            log::warn!("FPS {} is invalid, using {}", self.fps, FPS);
            self.fps = FPS;
        }

        for (slot, entry) in self.participants.iter_mut().enumerate() {
            if !entry.speed.is_finite() || entry.speed < MIN_SPEED {
                log::warn!("Participant {} speed {} is invalid", slot, entry.speed);
                entry.speed = DEFAULT_SPEED;
            }
            if !entry.turn_rate.is_finite() || entry.turn_rate < 0.0 {
                log::warn!("Participant {} turn rate {} is invalid", slot, entry.turn_rate);
                entry.turn_rate = DEFAULT_TURN_RATE;
            }
            if !entry.thickness.is_finite() || entry.thickness <= 0.0 {
                log::warn!("Participant {} thickness {} is invalid", slot, entry.thickness);
                entry.thickness = TRAIL_THICKNESS;
            }
            if entry.heading.is_some_and(|h| !h.is_finite()) {
                entry.heading = None;
            }
            if entry.spawn.is_some_and(|[x, y]| !x.is_finite() || !y.is_finite()) {
                entry.spawn = None;
            }
        }

        self
    }
}
