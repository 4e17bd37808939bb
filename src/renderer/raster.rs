//! Software rasterizer over an RGBA8 buffer
//!
//! Pixel `(i, j)` stands for the point `(i, j)`, so the collision engine's
//! rounded sample lands on the pixel nearest the sampled position.

use glam::DVec2;

use super::Canvas;
use crate::sim::sdf::segment_distance;
use crate::sim::{FrameSnapshot, Rgba};

/// In-memory canvas, row-major RGBA8
pub struct Raster {
    width: u32,
    height: u32,
    buffer: Vec<u8>,
}

impl Raster {
    /// New canvas, fully transparent black
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            buffer: vec![0; width as usize * height as usize * 4],
        }
    }

    /// Raw RGBA8 bytes
    pub fn bytes(&self) -> &[u8] {
        &self.buffer
    }

    fn pixels_mut(&mut self) -> &mut [Rgba] {
        bytemuck::cast_slice_mut(&mut self.buffer)
    }
}

impl Canvas for Raster {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn clear(&mut self, color: Rgba) {
        self.pixels_mut().fill(color);
    }

    /// Lights every pixel within `thickness / 2` of the segment, measured
    /// perpendicular to it. Ends are flat and nothing is anti-aliased;
    /// zero-length segments draw nothing.
    fn draw_line(&mut self, start: DVec2, end: DVec2, color: Rgba, thickness: f64) {
        if self.width == 0 || self.height == 0 || !start.is_finite() || !end.is_finite() {
            return;
        }
        let half = thickness.max(0.0) / 2.0;

        let min = (start.min(end) - DVec2::splat(half)).floor();
        let max = (start.max(end) + DVec2::splat(half)).ceil();
        let x0 = min.x.max(0.0) as u32;
        let y0 = min.y.max(0.0) as u32;
        let x1 = max.x.min((self.width - 1) as f64);
        let y1 = max.y.min((self.height - 1) as f64);
        if x1 < 0.0 || y1 < 0.0 {
            return;
        }
        let (x1, y1) = (x1 as u32, y1 as u32);

        let width = self.width as usize;
        let pixels = self.pixels_mut();
        for y in y0..=y1 {
            for x in x0..=x1 {
                let p = DVec2::new(x as f64, y as f64);
                if segment_distance(p, start, end).is_some_and(|d| d <= half) {
                    pixels[y as usize * width + x as usize] = color;
                }
            }
        }
    }

    fn capture(&self) -> FrameSnapshot {
        FrameSnapshot::from_rgba8(self.width, self.height, &self.buffer)
            .unwrap_or_else(|| FrameSnapshot::filled(self.width, self.height, Rgba::rgba(0, 0, 0, 0)))
    }
}
