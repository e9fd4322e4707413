//! Physics parameters for runtime tuning

use serde::{Deserialize, Serialize};

use crate::constants::*;

/// Tunable constants used by [`World::tick`](crate::World::tick)
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsParams {
    /// Edge length of a particle square and the wall margin
    pub particle_size: f64,
    /// Contact distance as a multiple of `particle_size`
    pub min_distance_factor: f64,
    /// Gravitational constant
    pub gravity_constant: f64,
    /// No attraction is applied closer than this
    pub attraction_floor: f64,
    /// Per-tick velocity multiplier
    pub damping: f64,
    /// Speed kept after a wall bounce
    pub bounce: f64,
    /// Population cap, 0 = unbounded
    pub max_particles: usize,
}

impl Default for PhysicsParams {
    fn default() -> Self {
        Self {
            particle_size: PARTICLE_SIZE,
            min_distance_factor: MIN_DISTANCE_FACTOR,
            gravity_constant: GRAVITY_CONSTANT,
            attraction_floor: ATTRACTION_FLOOR,
            damping: DAMPING_FACTOR,
            bounce: BOUNCE_FACTOR,
            max_particles: DEFAULT_MAX_PARTICLES,
        }
    }
}

impl PhysicsParams {
    /// Contact distance below which the collision branch runs
    pub fn min_distance(&self) -> f64 {
        self.min_distance_factor * self.particle_size
    }

    /// Remaining room under the cap, `None` when unbounded
    pub fn capacity_left(&self, population: usize) -> Option<usize> {
        if self.max_particles == 0 {
            None
        } else {
            Some(self.max_particles.saturating_sub(population))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_constants() {
        let params = PhysicsParams::default();
        assert_eq!(params.particle_size, PARTICLE_SIZE);
        assert_eq!(params.min_distance(), MIN_DISTANCE);
        assert_eq!(params.damping, DAMPING_FACTOR);
        assert_eq!(params.bounce, BOUNCE_FACTOR);
    }

    #[test]
    fn test_floor_sits_below_contact_distance() {
        let params = PhysicsParams::default();
        assert!(params.attraction_floor < params.min_distance());
    }

    #[test]
    fn test_capacity_left() {
        let mut params = PhysicsParams {
            max_particles: 10,
            ..Default::default()
        };
        assert_eq!(params.capacity_left(3), Some(7));
        assert_eq!(params.capacity_left(12), Some(0));

        params.max_particles = 0;
        assert_eq!(params.capacity_left(1_000_000), None);
    }
}
