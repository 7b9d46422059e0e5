use glam::{Mat4, Quat, Vec3};

use crate::constants::TANGENT_EPSILON;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pose {
    pub position: Vec3,
    pub orientation: Quat,
}

impl Default for Pose {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            orientation: Quat::IDENTITY,
        }
    }
}

/// A posed body moved along the path by exactly one `MotionDriver`.
///
/// `pose` is the blended state. `flourish` and `wheel_angle` are cosmetic and
/// rewritten from elapsed time every tick, so they never feed back into the
/// blend.
#[derive(Clone, Debug)]
pub struct Actor {
    pub name: &'static str,
    pub pose: Pose,
    /// Phase offset along the path, as a fraction of one loop.
    pub path_offset: f32,
    /// Local axis the body treats as "forward".
    pub forward_axis: Vec3,
    pub flourish: Quat,
    pub wheel_angle: f32,
}

impl Actor {
    pub fn new(name: &'static str, forward_axis: Vec3, path_offset: f32) -> Self {
        Self {
            name,
            pose: Pose::default(),
            path_offset,
            forward_axis: forward_axis.normalize_or_zero(),
            flourish: Quat::IDENTITY,
            wheel_angle: 0.0,
        }
    }

    #[inline]
    pub fn position(&self) -> Vec3 {
        self.pose.position
    }

    #[inline]
    pub fn orientation(&self) -> Quat {
        self.pose.orientation
    }

    /// Rotation the renderer should use: blended heading plus cosmetic sway.
    pub fn display_rotation(&self) -> Quat {
        (self.pose.orientation * self.flourish).normalize()
    }

    /// Local-to-world transform for the actor's parts.
    pub fn transform(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.display_rotation(), self.pose.position)
    }

    /// Ground-plane unit heading, or `None` if the body faces straight up/down.
    pub fn heading(&self) -> Option<Vec3> {
        let forward = self.pose.orientation * self.forward_axis;
        let flat = Vec3::new(forward.x, 0.0, forward.z);
        if flat.length_squared() < TANGENT_EPSILON {
            None
        } else {
            Some(flat.normalize())
        }
    }
}
