//! Render adapter interface
//!
//! The core never draws. After each frame it hands a read-only [`Snapshot`]
//! to a [`RenderSink`], which is expected to clear and redraw its whole surface.

use glam::DVec2;

use crate::particle::Particle;
use crate::presets::Rgba;

/// What a renderer needs to know about one particle
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParticleView {
    /// Centre of the square in world pixels
    pub position: DVec2,
    pub color: Rgba,
    /// Edge length of the square
    pub size: f64,
}

/// Borrowed view of the particle collection after a completed tick
#[derive(Clone, Copy)]
pub struct Snapshot<'a> {
    particles: &'a [Particle],
    size: f64,
}

impl<'a> Snapshot<'a> {
    pub fn new(particles: &'a [Particle], size: f64) -> Self {
        Self { particles, size }
    }

    /// Particles in insertion order
    pub fn iter(&self) -> impl Iterator<Item = ParticleView> + 'a {
        let size = self.size;
        self.particles.iter().map(move |p| ParticleView {
            position: p.position,
            color: p.color(),
            size,
        })
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Fixed visual size shared by every particle
    pub fn particle_size(&self) -> f64 {
        self.size
    }
}

/// Display surface that paints a snapshot once per frame
pub trait RenderSink {
    fn draw(&mut self, snapshot: Snapshot<'_>);
}

/// Discards every frame (headless runs and tests)
#[derive(Default)]
pub struct NullRender;

impl RenderSink for NullRender {
    fn draw(&mut self, _snapshot: Snapshot<'_>) {}
}
