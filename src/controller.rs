//! Controller shape archetypes and their creation against a scene host.
//!
//! Three curve archetypes: a planar circle for FK rotation handles, a unit
//! cube outline for the IK end-effector handle, and a fixed-proportion plus
//! shape for the blend-attribute handle.

use crate::scene::{AttrValue, HostError, NodeId, SceneGraph, attr};
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Segment count for the polyline approximation of FK circles.
const CIRCLE_SEGMENTS: usize = 16;

/// Closed outline tracing every edge of a unit cube, as sixteen degree-1
/// control points. Winding order is load-bearing for hosts that render the
/// polyline directly.
const BOX_POINTS: [Vec3; 16] = [
    Vec3::new(0.5, 0.5, 0.5),
    Vec3::new(0.5, 0.5, -0.5),
    Vec3::new(-0.5, 0.5, -0.5),
    Vec3::new(-0.5, 0.5, 0.5),
    Vec3::new(-0.5, -0.5, 0.5),
    Vec3::new(0.5, -0.5, 0.5),
    Vec3::new(0.5, -0.5, -0.5),
    Vec3::new(-0.5, -0.5, -0.5),
    Vec3::new(-0.5, 0.5, -0.5),
    Vec3::new(0.5, 0.5, -0.5),
    Vec3::new(0.5, -0.5, -0.5),
    Vec3::new(0.5, -0.5, 0.5),
    Vec3::new(0.5, 0.5, 0.5),
    Vec3::new(-0.5, 0.5, 0.5),
    Vec3::new(-0.5, -0.5, 0.5),
    Vec3::new(-0.5, -0.5, -0.5),
];

/// Plus-shaped closed polyline in the XY plane. Fixed unit proportions; the
/// blend handle is never scaled by configuration.
const PLUS_POINTS: [Vec3; 13] = [
    Vec3::new(-1.0, -3.0, 0.0),
    Vec3::new(1.0, -3.0, 0.0),
    Vec3::new(1.0, -1.0, 0.0),
    Vec3::new(3.0, -1.0, 0.0),
    Vec3::new(3.0, 1.0, 0.0),
    Vec3::new(1.0, 1.0, 0.0),
    Vec3::new(1.0, 3.0, 0.0),
    Vec3::new(-1.0, 3.0, 0.0),
    Vec3::new(-1.0, 1.0, 0.0),
    Vec3::new(-3.0, 1.0, 0.0),
    Vec3::new(-3.0, -1.0, 0.0),
    Vec3::new(-1.0, -1.0, 0.0),
    Vec3::new(-1.0, -3.0, 0.0),
];

/// A created controller: the colorable curve node plus the enclosing group
/// used for hierarchy and visibility wiring.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Controller {
    pub ctrl: NodeId,
    pub group: NodeId,
}

/// Points of a radius-`radius` circle whose normal lies on the bend axis
/// (+X), i.e. the curve spans the YZ plane.
pub fn circle_points(radius: f32) -> Vec<Vec3> {
    (0..CIRCLE_SEGMENTS)
        .map(|i| {
            let theta = i as f32 / CIRCLE_SEGMENTS as f32 * std::f32::consts::TAU;
            Vec3::new(0.0, radius * theta.cos(), radius * theta.sin())
        })
        .collect()
}

/// Enables display override on `node` and sets its RGB color.
pub fn apply_override_color(
    scene: &mut dyn SceneGraph,
    node: &str,
    color: Vec3,
) -> Result<(), HostError> {
    scene.set_attr(node, attr::OVERRIDE_ENABLED, AttrValue::Bool(true))?;
    scene.set_attr(node, attr::OVERRIDE_RGB_COLORS, AttrValue::Bool(true))?;
    scene.set_attr(node, attr::OVERRIDE_COLOR_RGB, AttrValue::Vec3(color))
}

/// Builds an FK rotation handle for `joint`.
///
/// The circle (radius `size`) is grouped, the group is transform-matched to
/// the joint, and the joint's orientation is constrained to follow the
/// controller. Name is `ac_l_fk_<joint>`; the group appends `_grp`.
pub fn create_circle_controller(
    scene: &mut dyn SceneGraph,
    joint: &str,
    size: f32,
    color: Vec3,
) -> Result<Controller, HostError> {
    let ctrl = format!("ac_l_fk_{joint}");
    let group = format!("{ctrl}_grp");
    scene.create_curve(&ctrl, &circle_points(size), true)?;
    scene.group(std::slice::from_ref(&ctrl), &group)?;
    scene.match_transform(&group, joint)?;
    scene.create_orient_constraint(joint, &ctrl)?;
    apply_override_color(scene, &ctrl, color)?;
    Ok(Controller { ctrl, group })
}

/// Builds the box-shaped IK end-effector handle.
///
/// The unit cube outline is uniformly scaled by `size` and the scale is then
/// frozen: the IK binding is later parented beneath this controller, which
/// requires its local space to carry a clean identity transform.
pub fn create_box_controller(
    scene: &mut dyn SceneGraph,
    name: &str,
    size: f32,
    color: Vec3,
) -> Result<Controller, HostError> {
    scene.create_curve(name, &BOX_POINTS, true)?;
    scene.set_scale(name, size)?;
    scene.freeze_transform(name)?;
    let group = format!("{name}_grp");
    scene.group(&[name.to_owned()], &group)?;
    apply_override_color(scene, name, color)?;
    Ok(Controller {
        ctrl: name.to_owned(),
        group,
    })
}

/// Builds the plus-shaped blend handle at fixed unit proportions.
pub fn create_plus_controller(
    scene: &mut dyn SceneGraph,
    name: &str,
    color: Vec3,
) -> Result<Controller, HostError> {
    scene.create_curve(name, &PLUS_POINTS, true)?;
    let group = format!("{name}_grp");
    scene.group(&[name.to_owned()], &group)?;
    apply_override_color(scene, name, color)?;
    Ok(Controller {
        ctrl: name.to_owned(),
        group,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn circle_points_lie_on_radius_in_bend_plane() {
        let pts = circle_points(5.0);
        assert_eq!(pts.len(), CIRCLE_SEGMENTS);
        for p in pts {
            assert_eq!(p.x, 0.0);
            assert!((p.length() - 5.0).abs() < 1e-4);
        }
    }

    #[test]
    fn box_outline_stays_on_unit_cube() {
        assert_eq!(BOX_POINTS.len(), 16);
        for p in BOX_POINTS {
            assert_eq!(p.x.abs(), 0.5);
            assert_eq!(p.y.abs(), 0.5);
            assert_eq!(p.z.abs(), 0.5);
        }
        // Consecutive points share an edge of the cube, not a diagonal.
        for w in BOX_POINTS.windows(2) {
            let d = w[1] - w[0];
            let moved = [d.x, d.y, d.z].iter().filter(|c| c.abs() > 0.0).count();
            assert_eq!(moved, 1, "jump between {:?} and {:?}", w[0], w[1]);
        }
    }

    #[test]
    fn plus_outline_is_planar_and_closed() {
        assert_eq!(PLUS_POINTS.len(), 13);
        assert_eq!(PLUS_POINTS[0], PLUS_POINTS[12]);
        for p in PLUS_POINTS {
            assert_eq!(p.z, 0.0);
            assert!(p.x.abs() <= 3.0 && p.y.abs() <= 3.0);
        }
    }
}
