//! Rendered frame snapshots
//!
//! A `FrameSnapshot` is the read-only capture of the previous tick's fully
//! rendered output. The collision engine samples it; nothing mutates it.

use bytemuck::{Pod, Zeroable};
use glam::DVec2;
use serde::{Deserialize, Serialize};

/// An RGBA8 color, laid out exactly like one pixel of an RGBA8 buffer
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Pod, Zeroable, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    /// Opaque color
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

/// Immutable capture of a rendered frame
#[derive(Debug, Clone, PartialEq)]
pub struct FrameSnapshot {
    width: u32,
    height: u32,
    pixels: Vec<Rgba>,
}

impl FrameSnapshot {
    /// A frame filled with one color
    pub fn filled(width: u32, height: u32, color: Rgba) -> Self {
        Self {
            width,
            height,
            pixels: vec![color; width as usize * height as usize],
        }
    }

    /// Build from row-major pixels; `None` if the length does not match
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<Rgba>) -> Option<Self> {
        if pixels.len() != width as usize * height as usize {
            return None;
        }
        Some(Self {
            width,
            height,
            pixels,
        })
    }

    /// Build from a tightly packed RGBA8 buffer (row-major, 4 bytes per pixel)
    pub fn from_rgba8(width: u32, height: u32, bytes: &[u8]) -> Option<Self> {
        let pixels: &[Rgba] = bytemuck::try_cast_slice(bytes).ok()?;
        Self::from_pixels(width, height, pixels.to_vec())
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA8 view of the frame
    pub fn as_rgba8(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Color at integer pixel coordinates, `None` outside the frame
    pub fn pixel(&self, x: i64, y: i64) -> Option<Rgba> {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return None;
        }
        self.pixels
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    /// Color at the pixel nearest to `pos` (rounded half away from zero)
    pub fn sample(&self, pos: DVec2) -> Option<Rgba> {
        if !pos.is_finite() {
            return None;
        }
        let p = pos.round();
        self.pixel(p.x as i64, p.y as i64)
    }
}
