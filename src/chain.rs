//! Joint-chain discovery from the host selection.

use crate::error::RigError;
use crate::scene::{NodeId, NodeType, SceneGraph};
use serde::{Deserialize, Serialize};

/// An ordered root → mid → end triple of skeletal joints forming one limb.
///
/// Invariant: `mid` is a direct child of `root`, `end` a direct child of
/// `mid`, and all three are joint-typed nodes. The only way to obtain one is
/// [`JointChain::resolve_from_selection`], which upholds the invariant or
/// fails without producing a value.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct JointChain {
    pub root: NodeId,
    pub mid: NodeId,
    pub end: NodeId,
}

impl JointChain {
    /// Walks the limb down from the first selected node.
    ///
    /// The first selected node must be a joint; its first joint-typed child
    /// becomes `mid`, and `mid`'s first joint-typed child becomes `end`. Any
    /// violation (empty selection, wrong root type, missing child) fails with
    /// [`RigError::WrongSelection`].
    pub fn resolve_from_selection(scene: &dyn SceneGraph) -> Result<Self, RigError> {
        let root = scene
            .selection(None)
            .into_iter()
            .next()
            .ok_or(RigError::WrongSelection)?;
        if scene.node_type(&root) != Some(NodeType::Joint) {
            return Err(RigError::WrongSelection);
        }
        let mid = first_joint_child(scene, &root)?;
        let end = first_joint_child(scene, &mid)?;
        Ok(Self { root, mid, end })
    }
}

fn first_joint_child(scene: &dyn SceneGraph, node: &str) -> Result<NodeId, RigError> {
    scene
        .children(node, Some(NodeType::Joint))
        .into_iter()
        .next()
        .ok_or(RigError::WrongSelection)
}
