//! World state and the per-tick physics kernel
//!
//! A tick runs three phases in order:
//! 1. pairwise interaction pass (collision response or gravitational attraction)
//! 2. semi-implicit Euler integration followed by global damping
//! 3. per-axis boundary clamp with a damped bounce
//!
//! The interaction pass visits every ordered pair `(p, other)` and reads only
//! the state from the start of the pass. Corrections go into scratch delta
//! buffers and are applied once the pass is done. Because both orderings of a
//! colliding pair are visited, its positional separation lands twice per tick.
//!
//! Brute force, O(n²) per tick. Fine at the population cap; a spatial hash is
//! the place to start if that cap goes up.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::params::PhysicsParams;
use crate::particle::Particle;
use crate::presets::PresetId;
use crate::render::Snapshot;

/// Rectangle the particles are confined to, origin at the top-left
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Whether `position` lies inside the band `[margin, size - margin]` on both axes
    pub fn contains_with_margin(&self, position: DVec2, margin: f64) -> bool {
        position.x >= margin
            && position.x <= self.width - margin
            && position.y >= margin
            && position.y <= self.height - margin
    }
}

/// Owns every particle and advances them one tick at a time
pub struct World {
    particles: Vec<Particle>,
    bounds: Bounds,
    params: PhysicsParams,

    // Scratch buffers for the interaction pass, reused between ticks
    position_delta: Vec<DVec2>,
    velocity_delta: Vec<DVec2>,
}

impl World {
    /// Create an empty world with default physics
    pub fn new(bounds: Bounds) -> Self {
        Self::with_params(bounds, PhysicsParams::default())
    }

    pub fn with_params(bounds: Bounds, params: PhysicsParams) -> Self {
        if bounds.width < 2.0 * params.particle_size || bounds.height < 2.0 * params.particle_size
        {
            log::warn!(
                "World bounds {}x{} are smaller than two particle margins",
                bounds.width,
                bounds.height
            );
        }

        Self {
            particles: Vec::new(),
            bounds,
            params,
            position_delta: Vec::new(),
            velocity_delta: Vec::new(),
        }
    }

    /// Run one simulation step
    pub fn tick(&mut self) {
        self.interaction_pass();
        self.integrate();
        self.clamp_to_bounds();
    }

    fn interaction_pass(&mut self) {
        let count = self.particles.len();
        self.position_delta.clear();
        self.position_delta.resize(count, DVec2::ZERO);
        self.velocity_delta.clear();
        self.velocity_delta.resize(count, DVec2::ZERO);

        let min_distance = self.params.min_distance();

        for i in 0..count {
            let p = &self.particles[i];

            for j in 0..count {
                if i == j {
                    continue;
                }
                let other = &self.particles[j];

                let offset = other.position - p.position;
                let distance = offset.length();

                if distance > 0.0 && distance < min_distance {
                    let normal = offset / distance;

                    // Split the overlap between both particles
                    let push = normal * ((min_distance - distance) * 0.5);
                    self.position_delta[i] -= push;
                    self.position_delta[j] += push;

                    // Negative when the pair is closing along the normal
                    let approach = (other.velocity - p.velocity).dot(normal);
                    if approach < 0.0 {
                        let correction = normal * (approach * 0.5);
                        self.velocity_delta[i] += correction;
                        self.velocity_delta[j] -= correction;
                    }
                } else {
                    self.velocity_delta[i] +=
                        attraction(offset, distance, other.mass(), &self.params);
                }
            }
        }

        for ((particle, dp), dv) in self
            .particles
            .iter_mut()
            .zip(&self.position_delta)
            .zip(&self.velocity_delta)
        {
            particle.position += *dp;
            particle.velocity += *dv;
        }
    }

    fn integrate(&mut self) {
        let damping = self.params.damping;
        for particle in &mut self.particles {
            particle.position += particle.velocity;
            particle.velocity *= damping;
        }
    }

    fn clamp_to_bounds(&mut self) {
        let margin = self.params.particle_size;
        let bounce = self.params.bounce;
        let max = DVec2::new(self.bounds.width - margin, self.bounds.height - margin);

        for particle in &mut self.particles {
            clamp_axis(
                &mut particle.position.x,
                &mut particle.velocity.x,
                margin,
                max.x,
                bounce,
            );
            clamp_axis(
                &mut particle.position.y,
                &mut particle.velocity.y,
                margin,
                max.y,
                bounce,
            );
        }
    }

    /// Append a particle unless the population cap is reached.
    /// Returns whether the particle was added.
    pub fn spawn(&mut self, particle: Particle) -> bool {
        if self.capacity_left() == Some(0) {
            return false;
        }
        self.particles.push(particle);
        true
    }

    /// Free slots under the cap, `None` when the world is unbounded
    pub fn capacity_left(&self) -> Option<usize> {
        self.params.capacity_left(self.particles.len())
    }

    /// Remove every particle
    pub fn clear(&mut self) {
        log::info!("Clearing {} particles", self.particles.len());
        self.particles.clear();
    }

    /// Change the confinement rectangle. The next tick clamps particles into it.
    pub fn resize(&mut self, bounds: Bounds) {
        log::debug!(
            "World resized from {}x{} to {}x{}",
            self.bounds.width,
            self.bounds.height,
            bounds.width,
            bounds.height
        );
        self.bounds = bounds;
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Read-only view handed to render sinks
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot::new(&self.particles, self.params.particle_size)
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn params(&self) -> &PhysicsParams {
        &self.params
    }

    /// Total kinetic energy of all particles
    pub fn kinetic_energy(&self) -> f64 {
        self.particles.iter().map(Particle::kinetic_energy).sum()
    }

    /// Population per preset, indexed by [`PresetId::index`]
    pub fn count_by_preset(&self) -> [usize; 4] {
        let mut counts = [0; 4];
        for particle in &self.particles {
            counts[particle.preset().index()] += 1;
        }
        counts
    }

    /// Whether every particle sits inside the clamped band
    pub fn all_within_bounds(&self) -> bool {
        let margin = self.params.particle_size;
        self.particles
            .iter()
            .all(|p| self.bounds.contains_with_margin(p.position, margin))
    }
}

/// Velocity increment on a particle from one neighbour.
///
/// Equivalent to `F / m_self` with `F = G m_self m_other / d²`, evaluated
/// without dividing by the particle's own mass.
fn attraction(offset: DVec2, distance: f64, other_mass: f64, params: &PhysicsParams) -> DVec2 {
    if distance == 0.0 || distance < params.attraction_floor {
        return DVec2::ZERO;
    }
    let acceleration = params.gravity_constant * other_mass / (distance * distance);
    offset / distance * acceleration
}

/// Upper wall first, so bounds narrower than both margins settle on the lower one
fn clamp_axis(position: &mut f64, velocity: &mut f64, min: f64, max: f64, bounce: f64) {
    if *position > max {
        *position = max;
        *velocity = -velocity.abs() * bounce;
    }
    if *position < min {
        *position = min;
        *velocity = velocity.abs() * bounce;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::*;
    use crate::presets::Presets;
    use rand::{Rng, SeedableRng};
    use rand_xoshiro::Xoshiro256StarStar;

    fn world_800x600() -> World {
        World::new(Bounds::new(800.0, 600.0))
    }

    fn particle(preset: PresetId, x: f64, y: f64) -> Particle {
        Particle::new(DVec2::new(x, y), &Presets::new().get(preset))
    }

    #[test]
    fn test_boundary_scenario_left_wall() {
        let mut world = world_800x600();
        world.spawn(particle(PresetId::Powder, 1.0, 300.0).with_velocity(DVec2::new(-5.0, 0.0)));

        world.tick();

        let p = world.particles()[0];
        assert_eq!(p.position.x, PARTICLE_SIZE);
        assert_eq!(p.position.y, 300.0);
        // Damping runs before the clamp
        let expected = 5.0 * DAMPING_FACTOR * BOUNCE_FACTOR;
        assert!((p.velocity.x - expected).abs() < 1e-12);
        assert!(p.velocity.x > 0.0);
    }

    #[test]
    fn test_boundary_upper_walls_bounce_inward() {
        let mut world = world_800x600();
        world.spawn(particle(PresetId::Water, 798.0, 598.0).with_velocity(DVec2::new(4.0, 6.0)));

        world.tick();

        let p = world.particles()[0];
        assert_eq!(p.position, DVec2::new(800.0 - PARTICLE_SIZE, 600.0 - PARTICLE_SIZE));
        assert!(p.velocity.x < 0.0);
        assert!(p.velocity.y < 0.0);
        assert!((p.velocity.y + 6.0 * DAMPING_FACTOR * BOUNCE_FACTOR).abs() < 1e-12);
    }

    #[test]
    fn test_boundary_invariant_holds_under_random_motion() {
        let mut rng = Xoshiro256StarStar::seed_from_u64(7);
        let mut world = world_800x600();

        for i in 0..150 {
            let preset = PresetId::ALL[i % 4];
            let x = rng.random_range(-50.0..850.0);
            let y = rng.random_range(-50.0..650.0);
            let v = DVec2::new(rng.random_range(-20.0..20.0), rng.random_range(-20.0..20.0));
            world.spawn(particle(preset, x, y).with_velocity(v));
        }

        for _ in 0..60 {
            world.tick();
            assert!(world.all_within_bounds());
        }
    }

    #[test]
    fn test_collision_separates_resting_pair() {
        let mut world = world_800x600();
        world.spawn(particle(PresetId::Powder, 100.0, 100.0));
        world.spawn(particle(PresetId::Powder, 104.0, 100.0));

        world.tick();

        let a = world.particles()[0];
        let b = world.particles()[1];
        let distance = a.position.distance(b.position);
        assert!(distance > 4.0, "pair should separate, got {distance}");

        // Resting contact introduces no velocity
        assert_eq!(a.velocity, DVec2::ZERO);
        assert_eq!(b.velocity, DVec2::ZERO);
    }

    #[test]
    fn test_collision_separation_applies_once_per_ordering() {
        let mut world = world_800x600();
        world.spawn(particle(PresetId::Water, 200.0, 200.0));
        world.spawn(particle(PresetId::Water, 204.0, 200.0));

        world.tick();

        // Each visit pushes both sides by half the overlap, and both orderings are visited
        let overlap = MIN_DISTANCE - 4.0;
        let a = world.particles()[0];
        let b = world.particles()[1];
        assert!((a.position.x - (200.0 - overlap)).abs() < 1e-12);
        assert!((b.position.x - (204.0 + overlap)).abs() < 1e-12);
    }

    #[test]
    fn test_collision_removes_closing_velocity() {
        let mut world = World::with_params(
            Bounds::new(800.0, 600.0),
            PhysicsParams {
                damping: 1.0,
                ..Default::default()
            },
        );
        world.spawn(particle(PresetId::Oxygen, 300.0, 300.0).with_velocity(DVec2::new(2.0, 1.0)));
        world.spawn(particle(PresetId::Oxygen, 305.0, 300.0));

        world.tick();

        let a = world.particles()[0];
        let b = world.particles()[1];
        // Tangential component is untouched
        assert_eq!(a.velocity.y, 1.0);
        assert_eq!(b.velocity.y, 0.0);
        // Normal components are exchanged after both orderings, momentum is kept
        assert!((a.velocity.x + b.velocity.x - 2.0).abs() < 1e-12);
        assert!(b.velocity.x > 0.0);
    }

    #[test]
    fn test_separating_pair_keeps_velocity() {
        let mut world = World::with_params(
            Bounds::new(800.0, 600.0),
            PhysicsParams {
                damping: 1.0,
                ..Default::default()
            },
        );
        world.spawn(particle(PresetId::Water, 300.0, 300.0).with_velocity(DVec2::new(-1.0, 0.0)));
        world.spawn(particle(PresetId::Water, 305.0, 300.0).with_velocity(DVec2::new(1.0, 0.0)));

        world.tick();

        assert_eq!(world.particles()[0].velocity, DVec2::new(-1.0, 0.0));
        assert_eq!(world.particles()[1].velocity, DVec2::new(1.0, 0.0));
    }

    #[test]
    fn test_attraction_pulls_pair_together() {
        let presets = [PresetId::Powder, PresetId::Water, PresetId::Oxygen, PresetId::Hydrogen];
        for &a in &presets {
            for &b in &presets {
                let mut world = world_800x600();
                world.spawn(particle(a, 300.0, 300.0));
                world.spawn(particle(b, 300.0 + MIN_DISTANCE, 300.0));

                world.tick();

                let pa = world.particles()[0];
                let pb = world.particles()[1];
                assert!(pa.velocity.x > 0.0, "{a} should move toward {b}");
                assert!(pb.velocity.x < 0.0, "{b} should move toward {a}");
                assert_eq!(pa.velocity.y, 0.0);
                assert_eq!(pb.velocity.y, 0.0);
            }
        }
    }

    #[test]
    fn test_attraction_scales_with_other_mass() {
        let mut world = world_800x600();
        world.spawn(particle(PresetId::Hydrogen, 300.0, 300.0));
        world.spawn(particle(PresetId::Powder, 320.0, 300.0));

        world.tick();

        let light = world.particles()[0];
        let heavy = world.particles()[1];
        // Lighter particle accelerates more
        assert!(light.velocity.x.abs() > heavy.velocity.x.abs());

        let expected = GRAVITY_CONSTANT * 3.0 / (20.0 * 20.0) * DAMPING_FACTOR;
        assert!((light.velocity.x - expected).abs() < 1e-12);
    }

    #[test]
    fn test_attraction_floor() {
        let params = PhysicsParams::default();
        let offset = DVec2::new(5.9, 0.0);
        assert_eq!(attraction(offset, 5.9, 3.0, &params), DVec2::ZERO);

        let offset = DVec2::new(6.0, 0.0);
        assert!(attraction(offset, 6.0, 3.0, &params).x > 0.0);
    }

    #[test]
    fn test_coincident_particles_stay_finite() {
        let mut world = world_800x600();
        world.spawn(particle(PresetId::Powder, 400.0, 300.0));
        world.spawn(particle(PresetId::Hydrogen, 400.0, 300.0));

        world.tick();

        for p in world.particles() {
            assert!(p.position.is_finite());
            assert!(p.velocity.is_finite());
            assert_eq!(p.velocity, DVec2::ZERO);
            assert_eq!(p.position, DVec2::new(400.0, 300.0));
        }
    }

    #[test]
    fn test_zero_mass_neighbour_is_finite() {
        let zero = crate::presets::ParticlePreset {
            id: PresetId::Oxygen,
            name: "Massless",
            mass: 0.0,
            color: [0, 0, 0, 255],
        };
        let mut world = world_800x600();
        world.spawn(Particle::new(DVec2::new(100.0, 100.0), &zero));
        world.spawn(particle(PresetId::Powder, 150.0, 100.0));

        world.tick();

        for p in world.particles() {
            assert!(p.velocity.is_finite());
        }
        // The massless particle is still pulled toward the heavy one
        assert!(world.particles()[0].velocity.x > 0.0);
    }

    #[test]
    fn test_damping_single_particle() {
        let mut world = world_800x600();
        let v = DVec2::new(2.0, -1.5);
        world.spawn(particle(PresetId::Water, 400.0, 300.0).with_velocity(v));

        world.tick();

        let p = world.particles()[0];
        assert_eq!(p.position, DVec2::new(402.0, 298.5));
        assert_eq!(p.velocity, v * DAMPING_FACTOR);
    }

    #[test]
    fn test_damping_far_apart_pair() {
        let mut world = world_800x600();
        let v = DVec2::new(1.0, 0.5);
        world.spawn(particle(PresetId::Hydrogen, 20.0, 20.0).with_velocity(v));
        world.spawn(particle(PresetId::Hydrogen, 780.0, 580.0).with_velocity(-v));

        world.tick();

        let speed = world.particles()[0].velocity.length();
        assert!((speed - v.length() * DAMPING_FACTOR).abs() < 1e-5);
    }

    #[test]
    fn test_spawn_respects_cap() {
        let mut world = World::with_params(
            Bounds::new(800.0, 600.0),
            PhysicsParams {
                max_particles: 2,
                ..Default::default()
            },
        );
        assert!(world.spawn(particle(PresetId::Water, 10.0, 10.0)));
        assert!(world.spawn(particle(PresetId::Water, 20.0, 10.0)));
        assert!(!world.spawn(particle(PresetId::Water, 30.0, 10.0)));
        assert_eq!(world.len(), 2);
        assert_eq!(world.capacity_left(), Some(0));
    }

    #[test]
    fn test_count_by_preset_and_clear() {
        let mut world = world_800x600();
        world.spawn(particle(PresetId::Water, 10.0, 10.0));
        world.spawn(particle(PresetId::Water, 50.0, 10.0));
        world.spawn(particle(PresetId::Hydrogen, 90.0, 10.0));

        assert_eq!(world.count_by_preset(), [0, 2, 0, 1]);

        world.clear();
        assert!(world.is_empty());
        assert_eq!(world.count_by_preset(), [0; 4]);
    }

    #[test]
    fn test_resize_clamps_on_next_tick() {
        let mut world = world_800x600();
        world.spawn(particle(PresetId::Oxygen, 700.0, 500.0));

        world.resize(Bounds::new(400.0, 300.0));
        world.tick();

        let p = world.particles()[0];
        assert_eq!(p.position, DVec2::new(400.0 - PARTICLE_SIZE, 300.0 - PARTICLE_SIZE));
    }

    #[test]
    fn test_empty_world_tick() {
        let mut world = world_800x600();
        world.tick();
        assert!(world.is_empty());
        assert_eq!(world.kinetic_energy(), 0.0);
    }

    #[test]
    fn test_narrow_bounds_pin_to_lower_margin() {
        // Both axes narrower than two margins: upper wall at 1, lower at 5
        let mut world = World::new(Bounds::new(6.0, 6.0));
        world.spawn(particle(PresetId::Water, 3.0, 3.0).with_velocity(DVec2::new(1.0, -1.0)));

        world.tick();

        let p = world.particles()[0];
        assert_eq!(p.position, DVec2::new(PARTICLE_SIZE, PARTICLE_SIZE));
        assert!(p.velocity.x > 0.0 && p.velocity.y > 0.0);
        assert!(p.velocity.is_finite());
    }
}
