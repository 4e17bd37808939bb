//! Rendering backend
//!
//! The round controller only needs three things from a backend: clear the
//! frame, stroke a line, and hand back what is on screen. `Raster` is the
//! in-memory implementation used headless and in tests.

pub mod raster;

pub use raster::Raster;

use glam::DVec2;

use crate::sim::{FrameSnapshot, Rgba};

/// Drawing surface the round controller renders trails onto
pub trait Canvas {
    /// Width and height in pixels
    fn size(&self) -> (u32, u32);

    /// Fill the whole frame with `color`
    fn clear(&mut self, color: Rgba);

    /// Stroke a straight segment of the given width
    fn draw_line(&mut self, start: DVec2, end: DVec2, color: Rgba, thickness: f64);

    /// Capture the currently rendered frame
    fn capture(&self) -> FrameSnapshot;
}
