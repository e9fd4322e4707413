//! Frame driver tying input, spawner, world and renderer together
//!
//! One call to [`Sandbox::frame`] runs, in order:
//! selection → spawn (if pressed) → tick(s) → render handoff.
//! Spawning finishes before the tick, so new particles take part in the
//! same frame's physics.

use rand::Rng;

use crate::counter::{ParticleCounter, TotalCounter};
use crate::input::InputFrame;
use crate::params::PhysicsParams;
use crate::presets::{ParticlePreset, PresetId, Presets, UnknownPreset};
use crate::render::RenderSink;
use crate::selection::TypeSelector;
use crate::spawner::{SpawnReport, Spawner};
use crate::world::{Bounds, World};

/// Most ticks a single frame may run
pub const MAX_STEPS_PER_FRAME: u32 = 8;

/// What happened during one frame
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameReport {
    pub spawned: SpawnReport,
    pub ticks: u32,
}

/// Owns the world and everything that mutates it
pub struct Sandbox<C: ParticleCounter = TotalCounter> {
    world: World,
    presets: Presets,
    selector: TypeSelector,
    spawner: Spawner,
    counter: C,

    /// Last type key received from input, so repeated unknown keys warn once
    last_requested_type: Option<String>,

    paused: bool,
    step_requested: bool,
    steps_per_frame: u32,
}

impl Sandbox<TotalCounter> {
    pub fn new(bounds: Bounds, params: PhysicsParams) -> Self {
        Self::with_counter(bounds, params, TotalCounter::default())
    }
}

impl<C: ParticleCounter> Sandbox<C> {
    pub fn with_counter(bounds: Bounds, params: PhysicsParams, counter: C) -> Self {
        Self {
            world: World::with_params(bounds, params),
            presets: Presets::new(),
            selector: TypeSelector::default(),
            spawner: Spawner,
            counter,
            last_requested_type: None,
            paused: false,
            step_requested: false,
            steps_per_frame: 1,
        }
    }

    /// Run one frame against the sampled input
    pub fn frame<R: Rng>(
        &mut self,
        input: &InputFrame,
        rng: &mut R,
        render: &mut dyn RenderSink,
    ) -> FrameReport {
        let mut report = FrameReport::default();

        if self.last_requested_type.as_deref() != Some(input.active_type.as_str()) {
            // Unknown keys are logged by the selector and otherwise ignored
            let _ = self.selector.set_active_type(&input.active_type);
            self.last_requested_type = Some(input.active_type.clone());
        }

        if input.pressed {
            let preset = self.active_preset();
            report.spawned = self.spawner.spawn(
                &mut self.world,
                input.pointer,
                input.brush_size,
                &preset,
                rng,
                &mut self.counter,
            );
        }

        if !self.paused || self.step_requested {
            let steps = if self.paused { 1 } else { self.steps_per_frame };
            for _ in 0..steps {
                self.world.tick();
            }
            report.ticks = steps;
            self.step_requested = false;
        }

        render.draw(self.world.snapshot());
        report
    }

    /// Selection UI entry point; unknown keys are ignored
    pub fn set_active_type(&mut self, key: &str) -> Result<PresetId, UnknownPreset> {
        self.selector.set_active_type(key)
    }

    pub fn select(&mut self, id: PresetId) {
        self.selector.select(id);
    }

    pub fn cycle_active_type(&mut self) -> PresetId {
        self.selector.cycle_next()
    }

    pub fn active_type(&self) -> PresetId {
        self.selector.active()
    }

    pub fn active_preset(&self) -> ParticlePreset {
        self.presets.get(self.selector.active())
    }

    pub fn presets(&self) -> &Presets {
        &self.presets
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn counter(&self) -> &C {
        &self.counter
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    /// Advance exactly one tick on the next frame while paused
    pub fn request_step(&mut self) {
        if self.paused {
            self.step_requested = true;
        }
    }

    pub fn steps_per_frame(&self) -> u32 {
        self.steps_per_frame
    }

    /// Ticks per frame, clamped to `1..=MAX_STEPS_PER_FRAME`
    pub fn set_steps_per_frame(&mut self, steps: u32) {
        self.steps_per_frame = steps.clamp(1, MAX_STEPS_PER_FRAME);
    }
}
