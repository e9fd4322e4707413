//! Brush spawner: turns a held pointer into new particles

use glam::DVec2;
use rand::Rng;

use crate::counter::ParticleCounter;
use crate::particle::Particle;
use crate::presets::ParticlePreset;
use crate::world::World;

/// Outcome of one brush application
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SpawnReport {
    /// Particles appended to the world
    pub created: u32,
    /// Particles dropped by the population cap
    pub rejected: u32,
}

/// Places `brush_size` particles around the pointer with uniform jitter
#[derive(Clone, Copy, Debug, Default)]
pub struct Spawner;

impl Spawner {
    /// Spawn one brush worth of particles at `pointer`.
    ///
    /// Each particle is offset on both axes by an independent draw from
    /// `[-brush_size / 2, +brush_size / 2]`, starts at rest and takes mass
    /// and color from `preset`. The counter fires once per created particle.
    pub fn spawn<R: Rng>(
        &self,
        world: &mut World,
        pointer: DVec2,
        brush_size: u32,
        preset: &ParticlePreset,
        rng: &mut R,
        counter: &mut dyn ParticleCounter,
    ) -> SpawnReport {
        let brush_size = brush_size.max(1);
        let requested = brush_size as usize;
        let allowed = world
            .capacity_left()
            .map_or(requested, |left| left.min(requested));

        let half = brush_size as f64 / 2.0;
        let mut report = SpawnReport::default();

        for _ in 0..allowed {
            let jitter = DVec2::new(rng.random_range(-half..=half), rng.random_range(-half..=half));
            if !world.spawn(Particle::new(pointer + jitter, preset)) {
                break;
            }
            counter.record_particle_created();
            report.created += 1;
        }

        report.rejected = brush_size - report.created;
        if report.rejected > 0 {
            log::debug!(
                "Population cap reached: rejected {} of {} {} particles",
                report.rejected,
                brush_size,
                preset.id
            );
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::counter::TotalCounter;
    use crate::params::PhysicsParams;
    use crate::presets::{PresetId, Presets};
    use crate::world::Bounds;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256StarStar;

    fn setup() -> (World, Presets, Xoshiro256StarStar, TotalCounter) {
        (
            World::new(Bounds::new(800.0, 600.0)),
            Presets::new(),
            Xoshiro256StarStar::seed_from_u64(12345),
            TotalCounter::default(),
        )
    }

    #[test]
    fn test_spawn_creates_exactly_brush_size() {
        let (mut world, presets, mut rng, mut counter) = setup();
        let water = presets.get(PresetId::Water);

        let report = Spawner.spawn(
            &mut world,
            DVec2::new(400.0, 300.0),
            7,
            &water,
            &mut rng,
            &mut counter,
        );

        assert_eq!(report, SpawnReport { created: 7, rejected: 0 });
        assert_eq!(world.len(), 7);
        assert_eq!(counter.total(), 7);
        for p in world.particles() {
            assert_eq!(p.velocity, DVec2::ZERO);
            assert_eq!(p.mass(), water.mass);
            assert_eq!(p.color(), water.color);
        }
    }

    #[test]
    fn test_jitter_stays_within_half_brush() {
        let (mut world, presets, mut rng, mut counter) = setup();
        let pointer = DVec2::new(200.0, 150.0);

        for _ in 0..20 {
            Spawner.spawn(
                &mut world,
                pointer,
                10,
                &presets.get(PresetId::Powder),
                &mut rng,
                &mut counter,
            );
        }

        for p in world.particles() {
            let offset = p.position - pointer;
            assert!(offset.x.abs() <= 5.0, "x jitter {} out of range", offset.x);
            assert!(offset.y.abs() <= 5.0, "y jitter {} out of range", offset.y);
        }

        // Jitter is actually applied
        assert!(world.particles().iter().any(|p| p.position != pointer));
    }

    #[test]
    fn test_zero_brush_spawns_one() {
        let (mut world, presets, mut rng, mut counter) = setup();

        let report = Spawner.spawn(
            &mut world,
            DVec2::new(50.0, 50.0),
            0,
            &presets.get(PresetId::Oxygen),
            &mut rng,
            &mut counter,
        );

        assert_eq!(report.created, 1);
        assert_eq!(world.len(), 1);
    }

    #[test]
    fn test_cap_rejects_and_does_not_count() {
        let (_, presets, mut rng, mut counter) = setup();
        let mut world = World::with_params(
            Bounds::new(800.0, 600.0),
            PhysicsParams {
                max_particles: 5,
                ..Default::default()
            },
        );

        let report = Spawner.spawn(
            &mut world,
            DVec2::new(100.0, 100.0),
            8,
            &presets.get(PresetId::Hydrogen),
            &mut rng,
            &mut counter,
        );

        assert_eq!(report, SpawnReport { created: 5, rejected: 3 });
        assert_eq!(world.len(), 5);
        assert_eq!(counter.total(), 5);

        let report = Spawner.spawn(
            &mut world,
            DVec2::new(100.0, 100.0),
            2,
            &presets.get(PresetId::Hydrogen),
            &mut rng,
            &mut counter,
        );
        assert_eq!(report, SpawnReport { created: 0, rejected: 2 });
        assert_eq!(counter.total(), 5);
    }
}
