//! Scene-graph host interface.
//!
//! The synthesis core never owns scene nodes. It drives a [`SceneGraph`]
//! implementation provided by the embedding host (a DCC package, an engine
//! editor, or the in-memory scene the tests use) and refers to every node it
//! created by its deterministic name.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// A unique identifier for a scene node.
///
/// Hosts address nodes by name; every name the rigger produces is derived
/// deterministically from the joint names of the limb being rigged.
pub type NodeId = String;

/// Node classes the rigger distinguishes when filtering selections and
/// child lookups.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeType {
    Joint,
    Transform,
    Curve,
    Locator,
    IkHandle,
    Constraint,
}

/// Attribute values exchanged with the host.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum AttrValue {
    Scalar(f32),
    Vec3(Vec3),
    Bool(bool),
}

impl AttrValue {
    pub fn as_scalar(&self) -> Option<f32> {
        match self {
            Self::Scalar(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_vec3(&self) -> Option<Vec3> {
        match self {
            Self::Vec3(v) => Some(*v),
            _ => None,
        }
    }
}

/// Well-known host attribute names used by the rig network.
pub mod attr {
    /// Transform visibility toggle.
    pub const VISIBILITY: &str = "v";
    /// World-space translation triple.
    pub const TRANSLATE: &str = "t";
    /// FK/IK crossfade factor an IK binding exposes.
    pub const IK_BLEND: &str = "ikBlend";
    /// Rest pole-vector direction an IK binding exposes after creation.
    pub const POLE_VECTOR: &str = "poleVector";
    /// Enables per-shape display override.
    pub const OVERRIDE_ENABLED: &str = "overrideEnabled";
    /// Switches display override from index to RGB mode.
    pub const OVERRIDE_RGB_COLORS: &str = "overrideRGBColors";
    /// Override display color triple.
    pub const OVERRIDE_COLOR_RGB: &str = "overrideColorRGB";
}

/// A fully-qualified attribute reference (`node.attr`).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttrRef {
    pub node: NodeId,
    pub attr: String,
}

impl AttrRef {
    pub fn new(node: impl Into<NodeId>, attr: impl Into<String>) -> Self {
        Self {
            node: node.into(),
            attr: attr.into(),
        }
    }
}

impl fmt::Display for AttrRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.node, self.attr)
    }
}

/// Transfer function between the source and target of a driven binding.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DrivenFn {
    /// `target = source`
    Identity,
    /// `target = 1 - source`
    Complement,
}

impl DrivenFn {
    pub fn apply(self, t: f32) -> f32 {
        match self {
            Self::Identity => t,
            Self::Complement => 1.0 - t,
        }
    }
}

/// A standing driven-attribute relationship.
///
/// Once declared, the host re-evaluates the target whenever the source
/// changes; the binding is a live dependency edge, not a one-shot copy. This
/// is the typed replacement for free-form host expression strings: the core
/// only declares bindings, the host's dependency graph evaluates them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DrivenBinding {
    pub source: AttrRef,
    pub target: AttrRef,
    pub transform: DrivenFn,
}

/// IK solver kinds the rigger can request.
///
/// Only single-plane rotate-plane solving is in scope; the enum leaves room
/// for hosts that expose more.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum IkSolver {
    /// Two-bone solve in the plane defined by the chain's pole vector.
    RotatePlane,
}

/// A scene mutation the host itself refused.
///
/// Host failures are not transient: they indicate a programming or user-input
/// error (duplicate name, unknown node), so the rigger never retries them.
#[derive(Debug, Error)]
pub enum HostError {
    #[error("unknown node '{0}'")]
    UnknownNode(NodeId),
    #[error("a node named '{0}' already exists")]
    DuplicateName(NodeId),
    #[error("node '{node}' has no attribute '{attr}'")]
    UnknownAttr { node: NodeId, attr: String },
    #[error("attribute '{0}' holds a different value type")]
    TypeMismatch(AttrRef),
    #[error("host rejected operation: {0}")]
    Rejected(String),
}

/// The mutation/query surface the rigger needs from its host.
///
/// All operations are synchronous and run on the host's main thread; a
/// returned error means the mutation did not happen and the caller must not
/// proceed to dependent steps.
pub trait SceneGraph {
    /// Current selection, in selection order, optionally filtered by type.
    fn selection(&self, filter: Option<NodeType>) -> Vec<NodeId>;

    /// Direct children of `node`, in child order, optionally filtered by type.
    fn children(&self, node: &str, filter: Option<NodeType>) -> Vec<NodeId>;

    fn node_type(&self, node: &str) -> Option<NodeType>;

    /// Creates a degree-1 curve through `points`. `closed` joins the last
    /// point back to the first.
    fn create_curve(&mut self, name: &str, points: &[Vec3], closed: bool)
    -> Result<NodeId, HostError>;

    fn create_locator(&mut self, name: &str) -> Result<NodeId, HostError>;

    /// Creates a transform named `name` and reparents `members` under it.
    fn group(&mut self, members: &[NodeId], name: &str) -> Result<NodeId, HostError>;

    fn parent(&mut self, child: &str, new_parent: &str) -> Result<(), HostError>;

    /// Copies the world transform of `source` onto `target`.
    fn match_transform(&mut self, target: &str, source: &str) -> Result<(), HostError>;

    fn world_position(&self, node: &str) -> Result<Vec3, HostError>;

    fn set_scale(&mut self, node: &str, uniform: f32) -> Result<(), HostError>;

    /// Bakes the node's current scale into its shape so subsequent local
    /// transform queries read identity.
    fn freeze_transform(&mut self, node: &str) -> Result<(), HostError>;

    fn get_attr(&self, node: &str, attr: &str) -> Result<AttrValue, HostError>;

    fn set_attr(&mut self, node: &str, attr: &str, value: AttrValue) -> Result<(), HostError>;

    /// Adds a keyable scalar attribute clamped to `[min, max]`.
    fn add_custom_attr(
        &mut self,
        node: &str,
        name: &str,
        min: f32,
        max: f32,
        keyable: bool,
    ) -> Result<(), HostError>;

    /// Constrains `driven`'s orientation to `driver` and returns the
    /// constraint node.
    ///
    /// Constraining an already-constrained node appends `driver` as a new
    /// weighted target on the existing constraint and returns that same node.
    /// Each target exposes a weight attribute named `<driver>W<index>`,
    /// defaulting to 1.0.
    fn create_orient_constraint(&mut self, driven: &str, driver: &str)
    -> Result<NodeId, HostError>;

    /// Creates an IK binding spanning `root_joint` to `end_joint`.
    ///
    /// The created node exposes [`attr::POLE_VECTOR`] (the rest pole
    /// direction the host derives from the chain's natural bend plane) and
    /// [`attr::IK_BLEND`].
    fn create_ik_binding(
        &mut self,
        name: &str,
        root_joint: &str,
        end_joint: &str,
        solver: IkSolver,
    ) -> Result<NodeId, HostError>;

    /// Makes `pole_node` the pole-vector target of `binding`.
    fn create_pole_constraint(&mut self, pole_node: &str, binding: &str)
    -> Result<(), HostError>;

    /// Declares a standing driven-attribute relationship.
    fn bind_driven_attr(&mut self, binding: DrivenBinding) -> Result<(), HostError>;
}
