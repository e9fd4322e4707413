//! Particle physics core for gravdust
//!
//! This crate provides everything that does not touch a window:
//! - Particle type presets (PresetId, ParticlePreset, Presets)
//! - The particle record and the world tick (Particle, World, Bounds)
//! - Brush spawning and type selection (Spawner, TypeSelector)
//! - Collaborator interfaces (ParticleCounter, RenderSink, InputSource)
//! - The per-frame driver (Sandbox)

pub mod constants;
mod counter;
mod input;
mod params;
mod particle;
mod presets;
mod render;
mod sandbox;
mod selection;
mod spawner;
mod world;

pub use counter::{NoopCounter, ParticleCounter, TotalCounter};
pub use input::{InputFrame, InputSource};
pub use params::PhysicsParams;
pub use particle::Particle;
pub use presets::{ParticlePreset, PresetId, Presets, Rgba, UnknownPreset};
pub use render::{NullRender, ParticleView, RenderSink, Snapshot};
pub use sandbox::{FrameReport, MAX_STEPS_PER_FRAME, Sandbox};
pub use selection::TypeSelector;
pub use spawner::{SpawnReport, Spawner};
pub use world::{Bounds, World};

pub use glam::DVec2;
