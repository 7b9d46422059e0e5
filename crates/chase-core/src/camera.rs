//! Follow camera.
//!
//! The rig derives a desired eye and look target from the lead actor's
//! heading and blends the live `CameraState` toward them with its own, slower
//! factor, so sharp turns by the lead show up as a visible lag in framing.

use glam::{Mat4, Quat, Vec3};

use crate::actor::Actor;
use crate::constants::*;
use crate::smoothing::damp_vec3;

/// Perspective parameters. Only the resize handler changes `aspect`.
#[derive(Clone, Debug)]
pub struct Lens {
    pub fovy_radians: f32,
    pub aspect: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Default for Lens {
    fn default() -> Self {
        Self {
            fovy_radians: CAMERA_FOVY_DEGREES.to_radians(),
            aspect: CAMERA_ASPECT,
            znear: CAMERA_ZNEAR,
            zfar: CAMERA_ZFAR,
        }
    }
}

impl Lens {
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }

    /// Zero-sized surfaces (minimised windows) keep the previous aspect.
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.aspect = width as f32 / height as f32;
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraState {
    pub position: Vec3,
    pub look_target: Vec3,
}

impl CameraState {
    /// World to view space, Y up.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.look_target, Vec3::Y)
    }

    pub fn forward(&self) -> Vec3 {
        (self.look_target - self.position).normalize_or_zero()
    }
}

#[derive(Clone, Debug)]
pub struct CameraRig {
    /// Eye offset in the lead's heading frame (+X forward, +Y up).
    pub offset: Vec3,
    pub look_ahead: f32,
    /// World height the look target is pinned to.
    pub look_height: f32,
    pub blend: f32,
}

impl Default for CameraRig {
    fn default() -> Self {
        Self {
            offset: vec3(CAMERA_OFFSET),
            look_ahead: CAMERA_LOOK_AHEAD,
            look_height: CAMERA_LOOK_HEIGHT,
            blend: CAMERA_BLEND,
        }
    }
}

impl CameraRig {
    /// Desired `(eye, look_target)` for the given lead, if it has a heading.
    pub fn desired(&self, lead: &Actor) -> Option<(Vec3, Vec3)> {
        let heading = lead.heading()?;
        let yaw = Quat::from_rotation_y((-heading.z).atan2(heading.x));
        let eye = lead.position() + yaw * self.offset;
        let mut look = lead.position() + heading * self.look_ahead;
        look.y = self.look_height;
        Some((eye, look))
    }

    /// Blend `state` toward the desired framing. Returns `false` when the lead
    /// had no usable heading and the camera was held.
    pub fn update(&self, state: &mut CameraState, lead: &Actor, dt_sec: f32) -> bool {
        let Some((eye, look)) = self.desired(lead) else {
            log::debug!("[camera] lead {} has no heading, holding", lead.name);
            return false;
        };
        state.position = damp_vec3(state.position, eye, self.blend, dt_sec);
        state.look_target = damp_vec3(state.look_target, look, self.blend, dt_sec);
        true
    }
}
