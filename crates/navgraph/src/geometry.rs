//! Small 3D helpers backing the store's spatial queries.

use glam::Vec3;

/// Closest point to `point` on the segment `a`-`b`.
///
/// Degenerate segments (coincident endpoints) yield `a`.
pub(crate) fn closest_point_on_segment(point: Vec3, a: Vec3, b: Vec3) -> Vec3 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq < f32::EPSILON {
        return a;
    }
    let t = ((point - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    a + ab * t
}
