//! Distance helpers shared by collision and rasterization

use glam::DVec2;

/// Signed distance from `p` to the nearest edge of a `width` x `height`
/// rectangle anchored at the origin.
///
/// Positive inside, zero on an edge, negative outside.
#[inline]
pub fn sd_arena_edge(p: DVec2, width: f64, height: f64) -> f64 {
    let dx = p.x.min(width - p.x);
    let dy = p.y.min(height - p.y);
    dx.min(dy)
}

/// Perpendicular distance from `p` to the segment `a`-`b` with flat (butt)
/// ends.
///
/// Returns `None` when `p` projects outside the segment or the segment is
/// degenerate, mirroring a stroked line without end caps.
pub fn segment_distance(p: DVec2, a: DVec2, b: DVec2) -> Option<f64> {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq < 1e-12 {
        return None;
    }

    let t = (p - a).dot(ab) / len_sq;
    if !(0.0..=1.0).contains(&t) {
        return None;
    }

    Some((p - (a + ab * t)).length())
}
