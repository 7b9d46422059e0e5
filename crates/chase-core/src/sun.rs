use glam::Vec3;

use crate::actor::Actor;
use crate::constants::*;
use crate::smoothing::damp_vec3;

#[derive(Clone, Debug)]
pub struct SunConfig {
    pub home: Vec3,
    pub target_offset: Vec3,
    pub blend: f32,
}

impl Default for SunConfig {
    fn default() -> Self {
        Self {
            home: vec3(SUN_HOME),
            target_offset: vec3(SUN_TARGET_OFFSET),
            blend: SUN_BLEND,
        }
    }
}

/// Key light that eases toward a fixed home and keeps its target on the lead.
#[derive(Clone, Debug)]
pub struct SunRig {
    pub config: SunConfig,
    pub position: Vec3,
    pub target: Vec3,
}

impl SunRig {
    /// Starts at home, aimed at `lead`.
    pub fn new(config: SunConfig, lead: &Actor) -> Self {
        Self {
            position: config.home,
            target: lead.position() + config.target_offset,
            config,
        }
    }

    pub fn update(&mut self, lead: &Actor, dt_sec: f32) {
        self.position = damp_vec3(self.position, self.config.home, self.config.blend, dt_sec);
        self.target = lead.position() + self.config.target_offset;
    }

    /// Direction the light travels, from the sun toward its target.
    pub fn direction(&self) -> Vec3 {
        (self.target - self.position).normalize_or_zero()
    }

    /// Unit vector pointing at the sun, for Lambert shading.
    pub fn to_light(&self) -> Vec3 {
        -self.direction()
    }
}
