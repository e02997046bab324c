//! Pole-vector target placement.

use glam::Vec3;

/// Computes the world position of the pole-vector target for a limb.
///
/// `rest_pole_dir` is the rest pole direction queried from the IK binding
/// after creation (the host derives it from the chain's natural bend plane).
/// The target sits at the chain's midpoint, pushed out along the normalized
/// pole direction by the full root-to-end span:
///
/// ```text
/// root + span/2 + normalize(rest_pole_dir) * |span|
/// ```
///
/// The offset keeps the target off the root-end axis (a collinear target
/// would make the rotate-plane solve singular) and scales with limb size.
///
/// A perfectly straight chain yields a zero-length rest pole direction. That
/// cannot be normalized, so the calculation falls back to world +Y, or world
/// +Z when the span itself runs along Y, keeping the target valid instead of
/// propagating NaNs into the scene.
pub fn pole_vector_position(root: Vec3, end: Vec3, rest_pole_dir: Vec3) -> Vec3 {
    let span = end - root;
    let dir = rest_pole_dir
        .try_normalize()
        .unwrap_or_else(|| fallback_pole_axis(span));
    root + span / 2.0 + dir * span.length()
}

fn fallback_pole_axis(span: Vec3) -> Vec3 {
    let along = span.try_normalize().unwrap_or(Vec3::X);
    if along.dot(Vec3::Y).abs() > 0.99 {
        Vec3::Z
    } else {
        Vec3::Y
    }
}
