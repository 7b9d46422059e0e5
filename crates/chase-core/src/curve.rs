//! Immutable Catmull-Rom path with arc-length parameterisation.
//!
//! `t` is the fraction of path length travelled, so an actor driven at a
//! constant rate of `t` moves at a constant ground speed regardless of how
//! unevenly the control points are spaced.

use glam::Vec3;

use crate::constants::ARC_LENGTH_DIVISIONS;
use crate::error::{SceneError, SceneResult};

const TENSION: f32 = 0.5;

/// Wrap any path parameter into `[0, 1)`. Non-finite input maps to `0`.
#[inline]
pub fn wrap_parameter(t: f32) -> f32 {
    if !t.is_finite() {
        return 0.0;
    }
    let w = t.rem_euclid(1.0);
    // rem_euclid can round up to exactly 1.0 for tiny negative inputs
    if w >= 1.0 {
        0.0
    } else {
        w
    }
}

#[derive(Clone, Debug)]
pub struct PathCurve {
    points: Vec<Vec3>,
    arc_lengths: Vec<f32>,
}

impl PathCurve {
    pub fn new(points: Vec<Vec3>) -> SceneResult<Self> {
        if points.len() < 2 {
            return Err(SceneError::degenerate(format!(
                "path needs at least 2 control points, got {}",
                points.len()
            )));
        }
        if let Some(i) = points.iter().position(|p| !p.is_finite()) {
            return Err(SceneError::invalid(format!(
                "control point {i} is not finite: {:?}",
                points[i]
            )));
        }
        let mut curve = Self {
            points,
            arc_lengths: Vec::new(),
        };
        curve.arc_lengths = curve.measure(ARC_LENGTH_DIVISIONS);
        Ok(curve)
    }

    pub fn from_arrays(points: &[[f32; 3]]) -> SceneResult<Self> {
        Self::new(points.iter().copied().map(Vec3::from_array).collect())
    }

    pub fn control_points(&self) -> &[Vec3] {
        &self.points
    }

    /// Total arc length, measured once at construction.
    pub fn length(&self) -> f32 {
        self.arc_lengths.last().copied().unwrap_or(0.0)
    }

    pub fn position(&self, t: f32) -> Vec3 {
        let s = self.raw_parameter(wrap_parameter(t));
        self.point_raw(s)
    }

    /// Derivative with respect to the raw spline parameter. Not normalized.
    pub fn tangent(&self, t: f32) -> Vec3 {
        let s = self.raw_parameter(wrap_parameter(t));
        self.derivative_raw(s)
    }

    fn measure(&self, divisions: usize) -> Vec<f32> {
        let mut lengths = Vec::with_capacity(divisions + 1);
        lengths.push(0.0);
        let mut prev = self.point_raw(0.0);
        let mut sum = 0.0;
        for i in 1..=divisions {
            let p = self.point_raw(i as f32 / divisions as f32);
            sum += p.distance(prev);
            lengths.push(sum);
            prev = p;
        }
        lengths
    }

    // Map an arc-length fraction onto the raw spline parameter.
    fn raw_parameter(&self, u: f32) -> f32 {
        let total = self.length();
        if total <= f32::EPSILON {
            return u;
        }
        let divisions = self.arc_lengths.len() - 1;
        let target = u * total;
        let hi = self.arc_lengths.partition_point(|&l| l < target);
        if hi == 0 {
            return 0.0;
        }
        if hi > divisions {
            return 1.0;
        }
        let lo = hi - 1;
        let span = self.arc_lengths[hi] - self.arc_lengths[lo];
        let frac = if span > 0.0 {
            (target - self.arc_lengths[lo]) / span
        } else {
            0.0
        };
        (lo as f32 + frac) / divisions as f32
    }

    fn segment(&self, s: f32) -> (usize, f32) {
        let last = self.points.len() - 1;
        let p = last as f32 * s.clamp(0.0, 1.0);
        let index = p.floor() as usize;
        if index >= last {
            (last - 1, 1.0)
        } else {
            (index, p - index as f32)
        }
    }

    // Cubic coefficients c0..c3 of the segment starting at `index`.
    fn coefficients(&self, index: usize) -> [Vec3; 4] {
        let pts = &self.points;
        let last = pts.len() - 1;
        let p1 = pts[index];
        let p2 = pts[index + 1];
        let p0 = if index > 0 {
            pts[index - 1]
        } else {
            2.0 * p1 - p2
        };
        let p3 = if index + 2 <= last {
            pts[index + 2]
        } else {
            2.0 * p2 - p1
        };
        let m1 = (p2 - p0) * TENSION;
        let m2 = (p3 - p1) * TENSION;
        [
            p1,
            m1,
            -3.0 * p1 + 3.0 * p2 - 2.0 * m1 - m2,
            2.0 * p1 - 2.0 * p2 + m1 + m2,
        ]
    }

    fn point_raw(&self, s: f32) -> Vec3 {
        let (index, w) = self.segment(s);
        let [c0, c1, c2, c3] = self.coefficients(index);
        c0 + w * (c1 + w * (c2 + w * c3))
    }

    fn derivative_raw(&self, s: f32) -> Vec3 {
        let (index, w) = self.segment(s);
        let [_, c1, c2, c3] = self.coefficients(index);
        let segments = (self.points.len() - 1) as f32;
        (c1 + w * (2.0 * c2 + 3.0 * w * c3)) * segments
    }
}
