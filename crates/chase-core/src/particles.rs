//! Fixed-capacity dust pool anchored to the lead actor.
//!
//! Positions are in the anchor's local space. The pool is allocated once and
//! particles are recycled in place when their lifetime runs out.

use glam::{Mat4, Vec3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::actor::Actor;
use crate::constants::*;

const MIN_SPEED: f32 = 1e-3;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub position: Vec3,
    /// Normalized age in `[0, 1]`.
    pub lifetime: f32,
    pub speed: f32,
    /// How many times this slot has been recycled.
    pub respawns: u32,
}

#[derive(Clone, Debug)]
pub struct DustConfig {
    pub count: usize,
    pub lifetime_rate: f32,
    pub speed_range: (f32, f32),
    pub drift_per_sec: Vec3,
    pub initial_min: Vec3,
    pub initial_max: Vec3,
    pub spawn_min: Vec3,
    pub spawn_max: Vec3,
    pub opacity_base: f32,
    pub opacity_swing: f32,
    pub opacity_frequency: f32,
    pub spin_rate: f32,
}

impl Default for DustConfig {
    fn default() -> Self {
        Self {
            count: DUST_COUNT,
            lifetime_rate: DUST_LIFETIME_RATE,
            speed_range: DUST_SPEED_RANGE,
            drift_per_sec: vec3(DUST_DRIFT_PER_SEC),
            initial_min: vec3(DUST_INITIAL_MIN),
            initial_max: vec3(DUST_INITIAL_MAX),
            spawn_min: vec3(DUST_SPAWN_MIN),
            spawn_max: vec3(DUST_SPAWN_MAX),
            opacity_base: DUST_OPACITY_BASE,
            opacity_swing: DUST_OPACITY_SWING,
            opacity_frequency: DUST_OPACITY_FREQUENCY,
            spin_rate: DUST_SPIN_RATE,
        }
    }
}

#[inline]
fn sample_range(rng: &mut StdRng, lo: f32, hi: f32) -> f32 {
    lo + (hi - lo) * rng.gen::<f32>()
}

#[inline]
fn sample_box(rng: &mut StdRng, min: Vec3, max: Vec3) -> Vec3 {
    Vec3::new(
        sample_range(rng, min.x, max.x),
        sample_range(rng, min.y, max.y),
        sample_range(rng, min.z, max.z),
    )
}

pub struct ParticleField {
    particles: Vec<Particle>,
    config: DustConfig,
    rng: StdRng,
}

impl ParticleField {
    pub fn new(config: DustConfig, mut rng: StdRng) -> Self {
        let particles = (0..config.count)
            .map(|_| Particle {
                position: sample_box(&mut rng, config.initial_min, config.initial_max),
                speed: sample_range(&mut rng, config.speed_range.0, config.speed_range.1)
                    .max(MIN_SPEED),
                lifetime: rng.gen::<f32>(),
                respawns: 0,
            })
            .collect::<Vec<_>>();
        Self {
            particles,
            config,
            rng,
        }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn config(&self) -> &DustConfig {
        &self.config
    }

    pub fn reseed(&mut self, seed: Option<u64>) {
        let new_seed = seed.unwrap_or_else(|| self.rng.gen());
        self.rng = StdRng::seed_from_u64(new_seed);
    }

    /// Age every particle by `dt_sec` and recycle the expired ones.
    ///
    /// Each particle reads and writes only its own slot, so the result does
    /// not depend on iteration order. Returns the number recycled this tick.
    pub fn advance(&mut self, dt_sec: f32) -> usize {
        if !(dt_sec > 0.0 && dt_sec.is_finite()) {
            return 0;
        }
        let age_step = dt_sec * self.config.lifetime_rate;
        let drift = self.config.drift_per_sec * dt_sec;
        let mut recycled = 0;
        for p in self.particles.iter_mut() {
            p.lifetime += p.speed * age_step;
            if p.lifetime > 1.0 {
                p.lifetime = 0.0;
                p.position = sample_box(&mut self.rng, self.config.spawn_min, self.config.spawn_max);
                p.respawns += 1;
                recycled += 1;
            } else {
                p.position += drift * p.speed;
            }
        }
        recycled
    }

    pub fn opacity(&self, elapsed: f64) -> f32 {
        let swing = (elapsed * self.config.opacity_frequency as f64).sin() as f32;
        self.config.opacity_base + swing * self.config.opacity_swing
    }

    /// Yaw of the whole field about the anchor's Y axis.
    pub fn spin(&self, elapsed: f64) -> f32 {
        ((elapsed * self.config.spin_rate as f64) % std::f64::consts::TAU) as f32
    }

    pub fn anchor_transform(&self, anchor: &Actor, elapsed: f64) -> Mat4 {
        anchor.transform() * Mat4::from_rotation_y(self.spin(elapsed))
    }

    pub fn world_positions(&self, transform: Mat4) -> impl Iterator<Item = Vec3> + '_ {
        self.particles
            .iter()
            .map(move |p| transform.transform_point3(p.position))
    }
}
