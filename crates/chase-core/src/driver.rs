//! Per-actor motion along the shared path.
//!
//! A driver turns elapsed time into a target pose on the curve and blends its
//! actor toward it. Cosmetic motion (bob, hop, sway, wheel spin) is a pure
//! function of elapsed time layered on top.

use std::f64::consts::TAU;

use glam::{EulerRot, Quat, Vec3};

use crate::actor::Actor;
use crate::constants::*;
use crate::curve::{wrap_parameter, PathCurve};
use crate::smoothing::{damp_quat, damp_vec3};

#[derive(Clone, Debug)]
pub struct RollingGait {
    pub ride_height: f32,
    pub bob_amplitude: f32,
    pub bob_frequency: f32,
    pub wheel_spin_rate: f32,
}

impl Default for RollingGait {
    fn default() -> Self {
        Self {
            ride_height: JAX_RIDE_HEIGHT,
            bob_amplitude: JAX_BOB_AMPLITUDE,
            bob_frequency: JAX_BOB_FREQUENCY,
            wheel_spin_rate: JAX_WHEEL_SPIN_RATE,
        }
    }
}

#[derive(Clone, Debug)]
pub struct WalkingGait {
    pub lateral_offset: Vec3,
    pub base_height: f32,
    pub hop_height: f32,
    pub hop_frequency: f32,
    pub jitter_amplitude: f32,
    pub jitter_frequency: f32,
    pub pitch_amplitude: f32,
    pub pitch_frequency: f32,
    pub roll_amplitude: f32,
    pub roll_frequency: f32,
}

impl Default for WalkingGait {
    fn default() -> Self {
        Self {
            lateral_offset: vec3(NINO_LATERAL_OFFSET),
            base_height: NINO_BASE_HEIGHT,
            hop_height: NINO_HOP_HEIGHT,
            hop_frequency: NINO_HOP_FREQUENCY,
            jitter_amplitude: NINO_JITTER_AMPLITUDE,
            jitter_frequency: NINO_JITTER_FREQUENCY,
            pitch_amplitude: NINO_PITCH_AMPLITUDE,
            pitch_frequency: NINO_PITCH_FREQUENCY,
            roll_amplitude: NINO_ROLL_AMPLITUDE,
            roll_frequency: NINO_ROLL_FREQUENCY,
        }
    }
}

#[derive(Clone, Debug)]
pub enum Gait {
    Rolling(RollingGait),
    Walking(WalkingGait),
}

#[derive(Clone, Debug)]
pub struct MotionDriver {
    pub loop_seconds: f64,
    pub position_blend: f32,
    pub orientation_blend: f32,
    pub gait: Gait,
}

/// What a driver aimed for on a given tick.
#[derive(Clone, Copy, Debug)]
pub struct DriverTarget {
    pub t: f32,
    pub position: Vec3,
    /// `None` when the tangent degenerated and the orientation was held.
    pub orientation: Option<Quat>,
}

#[inline]
fn wave(elapsed: f64, frequency: f32) -> f32 {
    (elapsed * frequency as f64).sin() as f32
}

/// Rotation taking `forward_axis` onto the tangent direction, if it has one.
/// Drivers pass the ground-plane tangent.
pub fn facing(forward_axis: Vec3, tangent: Vec3) -> Option<Quat> {
    if !tangent.is_finite() || tangent.length_squared() < TANGENT_EPSILON {
        return None;
    }
    Some(Quat::from_rotation_arc(forward_axis, tangent.normalize()))
}

impl MotionDriver {
    pub fn jax() -> Self {
        Self {
            loop_seconds: LOOP_SECONDS,
            position_blend: JAX_POSITION_BLEND,
            orientation_blend: JAX_ORIENTATION_BLEND,
            gait: Gait::Rolling(RollingGait::default()),
        }
    }

    pub fn nino() -> Self {
        Self {
            loop_seconds: LOOP_SECONDS,
            position_blend: NINO_POSITION_BLEND,
            orientation_blend: NINO_ORIENTATION_BLEND,
            gait: Gait::Walking(WalkingGait::default()),
        }
    }

    /// Loop fraction for `elapsed`, shifted by `offset` and wrapped into `[0, 1)`.
    pub fn path_parameter(&self, elapsed: f64, offset: f32) -> f32 {
        let loop_seconds = self.loop_seconds.max(f64::EPSILON);
        let base = (elapsed.rem_euclid(loop_seconds) / loop_seconds) as f32;
        wrap_parameter(base + offset)
    }

    pub fn target(&self, actor: &Actor, curve: &PathCurve, elapsed: f64) -> DriverTarget {
        let t = self.path_parameter(elapsed, actor.path_offset);
        let on_path = curve.position(t);
        let position = match &self.gait {
            Gait::Rolling(g) => Vec3::new(
                on_path.x,
                g.ride_height + wave(elapsed, g.bob_frequency) * g.bob_amplitude,
                on_path.z,
            ),
            Gait::Walking(g) => Vec3::new(
                on_path.x + g.lateral_offset.x,
                g.base_height
                    + g.lateral_offset.y
                    + wave(elapsed, g.hop_frequency).abs() * g.hop_height,
                on_path.z
                    + g.lateral_offset.z
                    + wave(elapsed, g.jitter_frequency) * g.jitter_amplitude,
            ),
        };
        let tangent = curve.tangent(t);
        DriverTarget {
            t,
            position,
            orientation: facing(actor.forward_axis, Vec3::new(tangent.x, 0.0, tangent.z)),
        }
    }

    /// Snap the actor onto its target. Only used when the scene is built.
    pub fn place(&self, actor: &mut Actor, curve: &PathCurve, elapsed: f64) {
        let target = self.target(actor, curve, elapsed);
        actor.pose.position = target.position;
        if let Some(q) = target.orientation {
            actor.pose.orientation = q;
        }
        self.apply_cosmetics(actor, elapsed);
    }

    pub fn update(
        &self,
        actor: &mut Actor,
        curve: &PathCurve,
        elapsed: f64,
        dt_sec: f32,
    ) -> DriverTarget {
        let target = self.target(actor, curve, elapsed);
        actor.pose.position = damp_vec3(
            actor.pose.position,
            target.position,
            self.position_blend,
            dt_sec,
        );
        match target.orientation {
            Some(q) => {
                actor.pose.orientation =
                    damp_quat(actor.pose.orientation, q, self.orientation_blend, dt_sec);
            }
            None => log::debug!(
                "[driver] {}: degenerate tangent at t={:.4}, holding orientation",
                actor.name,
                target.t
            ),
        }
        self.apply_cosmetics(actor, elapsed);
        target
    }

    fn apply_cosmetics(&self, actor: &mut Actor, elapsed: f64) {
        match &self.gait {
            Gait::Rolling(g) => {
                actor.flourish = Quat::IDENTITY;
                actor.wheel_angle = -((elapsed * g.wheel_spin_rate as f64) % TAU) as f32;
            }
            Gait::Walking(g) => {
                let pitch = wave(elapsed, g.pitch_frequency) * g.pitch_amplitude;
                let roll = wave(elapsed, g.roll_frequency) * g.roll_amplitude;
                actor.flourish = Quat::from_euler(EulerRot::XYZ, pitch, 0.0, roll);
                actor.wheel_angle = 0.0;
            }
        }
    }
}
