//! Per-tick orchestration.
//!
//! `ChaseScene` owns every animated component and is the single writer for
//! all of them: one `tick` updates drivers, dust, camera and sun in that order
//! and hands the renderer a read-only `FrameView` borrowed from the scene, so
//! nothing can be drawn from a half-updated frame.

use glam::{Mat4, Vec3};
use rand::rngs::StdRng;

use crate::actor::Actor;
use crate::camera::{CameraRig, CameraState, Lens};
use crate::clock::FrameClock;
use crate::constants::*;
use crate::curve::PathCurve;
use crate::driver::MotionDriver;
use crate::error::SceneResult;
use crate::particles::{DustConfig, ParticleField};
use crate::sun::{SunConfig, SunRig};
use crate::teardown::Teardown;

#[derive(Clone, Debug)]
pub struct ChaseConfig {
    pub path_points: Vec<Vec3>,
    pub max_frame_delta: f64,
    pub jax_driver: MotionDriver,
    pub jax_forward: Vec3,
    pub jax_offset: f32,
    pub nino_driver: MotionDriver,
    pub nino_forward: Vec3,
    pub nino_offset: f32,
    pub camera_rig: CameraRig,
    pub camera_start: Vec3,
    pub lens: Lens,
    pub dust: DustConfig,
    pub sun: SunConfig,
}

impl Default for ChaseConfig {
    fn default() -> Self {
        Self {
            path_points: PATH_POINTS.iter().copied().map(vec3).collect(),
            max_frame_delta: MAX_FRAME_DELTA,
            jax_driver: MotionDriver::jax(),
            jax_forward: vec3(JAX_FORWARD_AXIS),
            jax_offset: JAX_PATH_OFFSET,
            nino_driver: MotionDriver::nino(),
            nino_forward: vec3(NINO_FORWARD_AXIS),
            nino_offset: NINO_PATH_OFFSET,
            camera_rig: CameraRig::default(),
            camera_start: vec3(CAMERA_START_POSITION),
            lens: Lens::default(),
            dust: DustConfig::default(),
            sun: SunConfig::default(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lifecycle {
    Uninitialized,
    Running,
    Disposed,
}

/// Everything a renderer needs for one frame.
pub struct FrameView<'a> {
    pub elapsed: f64,
    pub delta: f64,
    pub tick: u64,
    pub jax: &'a Actor,
    pub nino: &'a Actor,
    pub camera: &'a CameraState,
    pub lens: &'a Lens,
    pub dust: &'a ParticleField,
    pub dust_transform: Mat4,
    pub dust_opacity: f32,
    pub sun: &'a SunRig,
    /// Dust particles recycled during this tick.
    pub recycled: usize,
}

pub struct ChaseScene {
    lifecycle: Lifecycle,
    clock: FrameClock,
    curve: PathCurve,
    jax: Actor,
    nino: Actor,
    jax_driver: MotionDriver,
    nino_driver: MotionDriver,
    dust: ParticleField,
    camera_rig: CameraRig,
    camera: CameraState,
    lens: Lens,
    sun: SunRig,
    teardown: Teardown,
}

impl ChaseScene {
    pub fn new(config: ChaseConfig, rng: StdRng) -> SceneResult<Self> {
        let curve = PathCurve::new(config.path_points)?;

        let mut jax = Actor::new("Jax", config.jax_forward, config.jax_offset);
        let mut nino = Actor::new("Nino", config.nino_forward, config.nino_offset);
        config.jax_driver.place(&mut jax, &curve, 0.0);
        config.nino_driver.place(&mut nino, &curve, 0.0);

        let lead = jax.position();
        let camera = CameraState {
            position: config.camera_start,
            look_target: Vec3::new(lead.x, config.camera_rig.look_height, lead.z),
        };

        let sun = SunRig::new(config.sun, &jax);

        log::info!(
            "[scene] path of {} points, length {:.2}; dust pool {}",
            curve.control_points().len(),
            curve.length(),
            config.dust.count
        );

        Ok(Self {
            lifecycle: Lifecycle::Uninitialized,
            clock: FrameClock::new(config.max_frame_delta),
            curve,
            jax,
            nino,
            jax_driver: config.jax_driver,
            nino_driver: config.nino_driver,
            dust: ParticleField::new(config.dust, rng),
            camera_rig: config.camera_rig,
            camera,
            lens: config.lens,
            sun,
            teardown: Teardown::new(),
        })
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    pub fn elapsed(&self) -> f64 {
        self.clock.elapsed()
    }

    pub fn curve(&self) -> &PathCurve {
        &self.curve
    }

    pub fn jax(&self) -> &Actor {
        &self.jax
    }

    pub fn nino(&self) -> &Actor {
        &self.nino
    }

    pub fn camera(&self) -> &CameraState {
        &self.camera
    }

    pub fn lens(&self) -> &Lens {
        &self.lens
    }

    /// Resize handler entry point.
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.lens.set_viewport(width, height);
    }

    pub fn dust(&self) -> &ParticleField {
        &self.dust
    }

    /// Restart the dust respawn stream. `None` derives a seed from the current one.
    pub fn reseed_dust(&mut self, seed: Option<u64>) {
        self.dust.reseed(seed);
        log::debug!("[scene] dust reseeded");
    }

    pub fn sun(&self) -> &SunRig {
        &self.sun
    }

    pub fn teardown_mut(&mut self) -> &mut Teardown {
        &mut self.teardown
    }

    pub fn start(&mut self) {
        if self.lifecycle == Lifecycle::Uninitialized {
            self.lifecycle = Lifecycle::Running;
            log::info!("[scene] running");
        }
    }

    /// Advance by a host-reported delta. Returns `None` once disposed.
    pub fn tick(&mut self, host_delta: f64) -> Option<FrameView<'_>> {
        if !self.accepts_ticks() {
            return None;
        }
        let delta = self.clock.tick(host_delta);
        Some(self.step(delta))
    }

    /// Advance by wall-clock time since the previous tick.
    pub fn tick_now(&mut self) -> Option<FrameView<'_>> {
        if !self.accepts_ticks() {
            return None;
        }
        let delta = self.clock.tick_now();
        Some(self.step(delta))
    }

    /// Release every registered render resource. Idempotent: returns `false`
    /// if the scene was already disposed.
    pub fn dispose(&mut self) -> bool {
        if self.lifecycle == Lifecycle::Disposed {
            return false;
        }
        self.lifecycle = Lifecycle::Disposed;
        let released = self.teardown.release_all();
        log::info!(
            "[scene] disposed after {} ticks ({:.2}s), released {released} resources",
            self.clock.ticks(),
            self.clock.elapsed()
        );
        true
    }

    fn accepts_ticks(&mut self) -> bool {
        match self.lifecycle {
            Lifecycle::Disposed => false,
            Lifecycle::Uninitialized => {
                self.start();
                true
            }
            Lifecycle::Running => true,
        }
    }

    fn step(&mut self, delta: f64) -> FrameView<'_> {
        let elapsed = self.clock.elapsed();
        let dt = delta as f32;

        self.jax_driver.update(&mut self.jax, &self.curve, elapsed, dt);
        self.nino_driver.update(&mut self.nino, &self.curve, elapsed, dt);
        let recycled = self.dust.advance(dt);
        self.camera_rig.update(&mut self.camera, &self.jax, dt);
        self.sun.update(&self.jax, dt);

        FrameView {
            elapsed,
            delta,
            tick: self.clock.ticks(),
            jax: &self.jax,
            nino: &self.nino,
            camera: &self.camera,
            lens: &self.lens,
            dust: &self.dust,
            dust_transform: self.dust.anchor_transform(&self.jax, elapsed),
            dust_opacity: self.dust.opacity(elapsed),
            sun: &self.sun,
            recycled,
        }
    }
}
