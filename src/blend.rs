//! FK/IK blend network wiring.
//!
//! One scalar attribute drives the entire crossfade: solver blend factor,
//! controller visibility, and constraint weights all read the same value, so
//! the visual FK/IK crossfade and the kinematic solve mode can never
//! desynchronize.

use crate::scene::{AttrRef, DrivenBinding, DrivenFn, HostError, NodeId, SceneGraph, attr};
use serde::{Deserialize, Serialize};

/// Name of the scalar blend attribute added to the blend controller.
pub const BLEND_ATTR: &str = "ikfkBlend";

/// The nodes participating in the blend network.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlendEndpoints {
    /// Node that carries the blend attribute (the plus-shaped controller).
    pub attr_host: NodeId,
    /// IK binding whose solver blend factor follows the attribute.
    pub ik_binding: NodeId,
    /// FK root controller group; visible while the rig is FK-driven.
    pub fk_root_group: NodeId,
    /// IK end-controller group; visible while the rig is IK-driven.
    pub ik_controller_group: NodeId,
    /// Pole-vector controller group; visible while the rig is IK-driven.
    pub pole_group: NodeId,
    /// Orientation constraint on the end joint with two weighted targets.
    pub orient_constraint: NodeId,
    /// FK end controller (first constraint target, weight index 0).
    pub fk_end_ctrl: NodeId,
    /// IK end controller (second constraint target, weight index 1).
    pub ik_end_ctrl: NodeId,
}

/// Adds the blend attribute and declares the driven relationships that make
/// the rig crossfade.
///
/// With attribute value `t`, the standing bindings hold:
///
/// * IK binding blend factor = `t`
/// * IK controller group and pole group visibility = `t`
/// * FK root group visibility = `1 - t`
/// * end-joint constraint weight toward the FK controller = `1 - t`
/// * end-joint constraint weight toward the IK controller = `t`
///
/// Returns the reference to the created attribute.
pub fn wire_blend(
    scene: &mut dyn SceneGraph,
    net: &BlendEndpoints,
) -> Result<AttrRef, HostError> {
    scene.add_custom_attr(&net.attr_host, BLEND_ATTR, 0.0, 1.0, true)?;
    let source = AttrRef::new(&net.attr_host, BLEND_ATTR);

    let targets = [
        (
            AttrRef::new(&net.ik_binding, attr::IK_BLEND),
            DrivenFn::Identity,
        ),
        (
            AttrRef::new(&net.ik_controller_group, attr::VISIBILITY),
            DrivenFn::Identity,
        ),
        (
            AttrRef::new(&net.pole_group, attr::VISIBILITY),
            DrivenFn::Identity,
        ),
        (
            AttrRef::new(&net.fk_root_group, attr::VISIBILITY),
            DrivenFn::Complement,
        ),
        (
            AttrRef::new(&net.orient_constraint, format!("{}W0", net.fk_end_ctrl)),
            DrivenFn::Complement,
        ),
        (
            AttrRef::new(&net.orient_constraint, format!("{}W1", net.ik_end_ctrl)),
            DrivenFn::Identity,
        ),
    ];

    for (target, transform) in targets {
        scene.bind_driven_attr(DrivenBinding {
            source: source.clone(),
            target,
            transform,
        })?;
    }

    Ok(source)
}
