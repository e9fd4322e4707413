//! Point-mass particle record

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::presets::{ParticlePreset, PresetId, Rgba};

/// A single point mass in the world
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    /// Position in world pixels
    pub position: DVec2,
    /// Velocity in pixels per tick
    pub velocity: DVec2,
    mass: f64,
    color: Rgba,
    preset: PresetId,
}

impl Particle {
    /// Create a particle at rest from a preset
    pub fn new(position: DVec2, preset: &ParticlePreset) -> Self {
        Self {
            position,
            velocity: DVec2::ZERO,
            mass: preset.mass,
            color: preset.color,
            preset: preset.id,
        }
    }

    /// Same as [`Particle::new`] with an initial velocity
    pub fn with_velocity(mut self, velocity: DVec2) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn color(&self) -> Rgba {
        self.color
    }

    pub fn preset(&self) -> PresetId {
        self.preset
    }

    /// Kinetic energy `m v² / 2`
    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.mass * self.velocity.length_squared()
    }
}
