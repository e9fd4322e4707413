//! Default physical constants for the particle simulation
//!
//! Units are world pixels and ticks. One tick is one unit of time, so
//! velocities are pixels per tick.

/// Visual edge length of a particle square, also the boundary margin
pub const PARTICLE_SIZE: f64 = 5.0;

/// Collision radius as a multiple of the particle size
pub const MIN_DISTANCE_FACTOR: f64 = 1.5;

/// Distance below which two particles are in contact
pub const MIN_DISTANCE: f64 = MIN_DISTANCE_FACTOR * PARTICLE_SIZE;

/// Gravitational constant `G`
pub const GRAVITY_CONSTANT: f64 = 0.5;

/// Attraction is forced to zero closer than this
pub const ATTRACTION_FLOOR: f64 = 6.0;

/// Velocity multiplier applied once per tick after integration
pub const DAMPING_FACTOR: f64 = 0.98;

/// Fraction of speed kept when bouncing off a wall
pub const BOUNCE_FACTOR: f64 = 0.5;

/// Default population cap (0 disables the cap)
pub const DEFAULT_MAX_PARTICLES: usize = 4000;
