use glam::{Quat, Vec3};

use crate::constants::REFERENCE_HZ;

/// Frame-rate independent exponential smoothing.
///
/// `per_frame` is the fraction of the remaining distance covered in one frame
/// at `REFERENCE_HZ`. The returned factor covers the same fraction per unit
/// time for any `dt_sec`, and is exactly `0` when `dt_sec` is `0`.
#[inline]
pub fn blend_factor(per_frame: f32, dt_sec: f32) -> f32 {
    if dt_sec <= 0.0 || !dt_sec.is_finite() {
        return 0.0;
    }
    let keep = (1.0 - per_frame.clamp(0.0, 1.0)).powf(dt_sec * REFERENCE_HZ);
    1.0 - keep
}

#[inline]
pub fn damp_vec3(current: Vec3, target: Vec3, per_frame: f32, dt_sec: f32) -> Vec3 {
    let k = blend_factor(per_frame, dt_sec);
    if k == 0.0 {
        return current;
    }
    current.lerp(target, k)
}

#[inline]
pub fn damp_quat(current: Quat, target: Quat, per_frame: f32, dt_sec: f32) -> Quat {
    let k = blend_factor(per_frame, dt_sec);
    if k == 0.0 {
        return current;
    }
    current.slerp(target, k).normalize()
}

/// Ticks at `REFERENCE_HZ` needed for a blend to close all but `epsilon` of a
/// fixed gap.
pub fn ticks_to_converge(per_frame: f32, epsilon: f32) -> u32 {
    let keep = 1.0 - per_frame.clamp(f32::EPSILON, 1.0);
    if keep <= 0.0 {
        return 1;
    }
    (epsilon.ln() / keep.ln()).ceil().max(1.0) as u32
}
