//! Failure taxonomy for rig synthesis.

use crate::scene::HostError;
use glam::Vec3;
use thiserror::Error;

/// Everything that can stop a rig build.
///
/// Selection and state errors are user-facing (the calling layer presents the
/// message verbatim); host errors wrap whatever the scene host refused. All
/// of them abort the build at the first failing step, with no rollback of
/// nodes already created.
#[derive(Debug, Error)]
pub enum RigError {
    /// The current selection does not start a valid three-joint chain.
    #[error("Wrong Selection, please select the first joint of the limb!")]
    WrongSelection,

    /// `rig_limb` was called before a chain was resolved.
    #[error("no joint chain resolved; select a limb root and resolve it before rigging")]
    ChainNotResolved,

    #[error("controller size must be a positive finite value, got {0}")]
    InvalidSize(f32),

    #[error("controller color channels must lie in [0, 1], got {0}")]
    InvalidColor(Vec3),

    #[error(transparent)]
    Host(#[from] HostError),
}
