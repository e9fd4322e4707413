//! Particle creation counter sink

/// Receives one call per particle the spawner creates.
///
/// Lets the core report creations without knowing who displays them.
pub trait ParticleCounter {
    fn record_particle_created(&mut self);
}

/// A no-op implementation for when nobody reads the count
#[derive(Default)]
pub struct NoopCounter;

impl ParticleCounter for NoopCounter {
    fn record_particle_created(&mut self) {}
}

/// Running total of created particles, shown in the HUD
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TotalCounter {
    created: u64,
}

impl TotalCounter {
    pub fn total(&self) -> u64 {
        self.created
    }
}

impl ParticleCounter for TotalCounter {
    fn record_particle_created(&mut self) {
        self.created += 1;
    }
}
