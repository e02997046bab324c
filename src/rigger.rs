//! Rig coordinator: configuration, chain state, and the `rig_limb` build.

use crate::blend::{BlendEndpoints, wire_blend};
use crate::chain::JointChain;
use crate::controller::{
    Controller, apply_override_color, create_box_controller, create_circle_controller,
    create_plus_controller,
};
use crate::error::RigError;
use crate::pole::pole_vector_position;
use crate::scene::{AttrRef, AttrValue, HostError, IkSolver, NodeId, SceneGraph, attr};
use glam::Vec3;
use log::debug;
use serde::{Deserialize, Serialize};

/// Build-time configuration the GUI layer drives.
///
/// Mutations only affect subsequent builds; controllers already created keep
/// their size and color until an explicit [`LimbRigger::reapply_color`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RigConfig {
    /// Radius of FK circles and uniform scale of the IK box. Positive.
    pub controller_size: f32,
    /// Override display color, each channel in `[0, 1]`.
    pub controller_color: Vec3,
}

impl Default for RigConfig {
    fn default() -> Self {
        Self {
            controller_size: 5.0,
            controller_color: Vec3::new(1.0, 1.0, 0.0),
        }
    }
}

impl RigConfig {
    fn validate_size(size: f32) -> Result<(), RigError> {
        if size.is_finite() && size > 0.0 {
            Ok(())
        } else {
            Err(RigError::InvalidSize(size))
        }
    }

    fn validate_color(color: Vec3) -> Result<(), RigError> {
        if color.cmpge(Vec3::ZERO).all() && color.cmple(Vec3::ONE).all() {
            Ok(())
        } else {
            Err(RigError::InvalidColor(color))
        }
    }
}

/// Everything one successful [`LimbRigger::rig_limb`] call created.
///
/// A record of the build, not a live handle: the nodes themselves belong to
/// the scene host.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LimbRig {
    pub chain: JointChain,
    pub fk_root: Controller,
    pub fk_mid: Controller,
    pub fk_end: Controller,
    pub ik_controller: Controller,
    pub ik_binding: NodeId,
    pub pole: Controller,
    pub blend: Controller,
    pub blend_attr: AttrRef,
    pub orient_constraint: NodeId,
    pub top_group: NodeId,
}

/// Orchestrates limb-rig synthesis.
///
/// Lifecycle: resolve a chain from the selection, adjust configuration, call
/// [`rig_limb`](Self::rig_limb). The coordinator holds no scene state beyond
/// the resolved chain and the shapes of its most recent build (kept for
/// recoloring); at most one build runs at a time.
#[derive(Debug, Default)]
pub struct LimbRigger {
    chain: Option<JointChain>,
    config: RigConfig,
    created_controllers: Vec<NodeId>,
}

impl LimbRigger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves and stores the joint chain from the current selection.
    ///
    /// On failure the previously stored chain is left untouched, never
    /// partially overwritten.
    pub fn resolve_from_selection(
        &mut self,
        scene: &dyn SceneGraph,
    ) -> Result<&JointChain, RigError> {
        let chain = JointChain::resolve_from_selection(scene)?;
        Ok(&*self.chain.insert(chain))
    }

    pub fn chain(&self) -> Option<&JointChain> {
        self.chain.as_ref()
    }

    pub fn config(&self) -> &RigConfig {
        &self.config
    }

    pub fn set_controller_size(&mut self, size: f32) -> Result<(), RigError> {
        RigConfig::validate_size(size)?;
        self.config.controller_size = size;
        Ok(())
    }

    pub fn set_controller_color(&mut self, color: Vec3) -> Result<(), RigError> {
        RigConfig::validate_color(color)?;
        self.config.controller_color = color;
        Ok(())
    }

    /// Builds the full FK/IK rig for the resolved chain.
    ///
    /// The steps run in a strict order because later geometry depends on
    /// earlier geometry existing (the IK binding must exist before its rest
    /// pole direction can be read). The first failing host operation aborts
    /// the build; nodes created before the failure are left in the scene.
    ///
    /// Building a second rig for the same chain without removing the first is
    /// undefined: the deterministic names collide and the host's own
    /// duplicate-name handling applies.
    pub fn rig_limb(&mut self, scene: &mut dyn SceneGraph) -> Result<LimbRig, RigError> {
        let chain = self.chain.clone().ok_or(RigError::ChainNotResolved)?;
        let size = self.config.controller_size;
        let color = self.config.controller_color;
        self.created_controllers.clear();

        // FK hierarchy mirrors the joint chain.
        let fk_root = create_circle_controller(scene, &chain.root, size, color)?;
        self.created_controllers.push(fk_root.ctrl.clone());
        let fk_mid = create_circle_controller(scene, &chain.mid, size, color)?;
        self.created_controllers.push(fk_mid.ctrl.clone());
        let fk_end = create_circle_controller(scene, &chain.end, size, color)?;
        self.created_controllers.push(fk_end.ctrl.clone());
        scene.parent(&fk_mid.group, &fk_root.ctrl)?;
        scene.parent(&fk_end.group, &fk_mid.ctrl)?;

        // IK end-effector handle; constraining the end joint again appends
        // the box as the second weighted target next to the FK controller.
        let ik_controller =
            create_box_controller(scene, &format!("ac_ik_{}", chain.end), size, color)?;
        self.created_controllers.push(ik_controller.ctrl.clone());
        scene.match_transform(&ik_controller.group, &chain.end)?;
        let orient_constraint = scene.create_orient_constraint(&chain.end, &ik_controller.ctrl)?;

        let root_pos = scene.world_position(&chain.root)?;
        debug!("limb root '{}' at {root_pos}", chain.root);

        let ik_binding = scene.create_ik_binding(
            &format!("ikHandle_{}", chain.end),
            &chain.root,
            &chain.end,
            IkSolver::RotatePlane,
        )?;

        // The binding exists now, so its rest pole direction is queryable.
        let rest_pole = scene
            .get_attr(&ik_binding, attr::POLE_VECTOR)?
            .as_vec3()
            .ok_or_else(|| HostError::TypeMismatch(AttrRef::new(&ik_binding, attr::POLE_VECTOR)))?;
        let end_pos = scene.world_position(&chain.end)?;
        let pole_pos = pole_vector_position(root_pos, end_pos, rest_pole);

        let pole_name = format!("ac_ik_{}", chain.mid);
        scene.create_locator(&pole_name)?;
        let pole_group = format!("{pole_name}_grp");
        scene.group(std::slice::from_ref(&pole_name), &pole_group)?;
        scene.set_attr(&pole_group, attr::TRANSLATE, AttrValue::Vec3(pole_pos))?;
        scene.create_pole_constraint(&pole_name, &ik_binding)?;
        let pole = Controller {
            ctrl: pole_name,
            group: pole_group,
        };

        // Blend handle sits at twice the root's offset on the ground plane,
        // at the root's height, to stay visually clear of the limb.
        let blend =
            create_plus_controller(scene, &format!("ac_ikfk_blend_{}", chain.root), color)?;
        self.created_controllers.push(blend.ctrl.clone());
        scene.set_attr(
            &blend.ctrl,
            attr::TRANSLATE,
            AttrValue::Vec3(Vec3::new(root_pos.x * 2.0, root_pos.y, root_pos.z * 2.0)),
        )?;

        let blend_attr = wire_blend(
            scene,
            &BlendEndpoints {
                attr_host: blend.ctrl.clone(),
                ik_binding: ik_binding.clone(),
                fk_root_group: fk_root.group.clone(),
                ik_controller_group: ik_controller.group.clone(),
                pole_group: pole.group.clone(),
                orient_constraint: orient_constraint.clone(),
                fk_end_ctrl: fk_end.ctrl.clone(),
                ik_end_ctrl: ik_controller.ctrl.clone(),
            },
        )?;

        let top_group = scene.group(
            &[
                fk_root.group.clone(),
                ik_controller.group.clone(),
                pole.group.clone(),
                blend.group.clone(),
            ],
            &format!("{}_rig_grp", chain.root),
        )?;
        // Moving the end controller should relocate the solved handle too.
        scene.parent(&ik_binding, &ik_controller.ctrl)?;

        Ok(LimbRig {
            chain,
            fk_root,
            fk_mid,
            fk_end,
            ik_controller,
            ik_binding,
            pole,
            blend,
            blend_attr,
            orient_constraint,
            top_group,
        })
    }

    /// Re-applies `color` to every controller shape of the most recent build
    /// and makes it the configured color for subsequent builds.
    pub fn reapply_color(
        &mut self,
        scene: &mut dyn SceneGraph,
        color: Vec3,
    ) -> Result<(), RigError> {
        RigConfig::validate_color(color)?;
        for ctrl in &self.created_controllers {
            apply_override_color(scene, ctrl, color)?;
        }
        self.config.controller_color = color;
        Ok(())
    }
}
