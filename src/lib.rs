//! # limb-rigger
//!
//! A host-agnostic synthesis crate that turns a selected three-joint skeletal
//! chain (shoulder-elbow-wrist, hip-knee-ankle) into a dual FK/IK control
//! rig: circle controllers for FK rotation, a box controller driving an IK
//! binding, a pole-vector target derived from the chain's geometry, and a
//! single blend attribute that crossfades visibility, constraint weights, and
//! the solver's blend factor in lockstep.
//!
//! It decouples the rig *definition* (which nodes, constraints, and driven
//! relationships to create) from the *host* (the scene graph that owns the
//! nodes): all mutations go through the [`SceneGraph`] trait, so the same
//! synthesis runs against a DCC package, an engine editor, or the in-memory
//! scene the tests use.

pub mod blend;
pub mod chain;
pub mod controller;
pub mod error;
pub mod pole;
pub mod rigger;
pub mod scene;

pub use blend::*;
pub use chain::*;
pub use controller::*;
pub use error::*;
pub use pole::*;
pub use rigger::*;
pub use scene::*;
