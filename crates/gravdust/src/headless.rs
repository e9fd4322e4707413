//! Windowless run for smoke testing and profiling
//!
//! Drives a [`Sandbox`] with a scripted pointer for a fixed number of frames,
//! painting into a CPU [`Canvas`], then logs a summary.

use anyhow::{Result, ensure};
use gravdust_simulation::{Bounds, InputSource, PresetId, Sandbox};
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256StarStar;
use web_time::Instant;

use crate::config::SandboxConfig;
use crate::input::ScriptedInput;
use crate::render::Canvas;

/// Frames the scripted pointer stays pressed, as a share of the run
const PRESS_SHARE: f64 = 0.5;

/// Frames between preset switches
const CYCLE_EVERY: u32 = 30;

/// Outcome of a headless run
#[derive(Debug, Clone, PartialEq)]
pub struct HeadlessSummary {
    pub frames: u32,
    pub ticks: u64,
    pub particles: usize,
    pub created_total: u64,
    pub rejected_total: u64,
    pub by_preset: [usize; 4],
    pub kinetic_energy: f64,
    pub within_bounds: bool,
}

/// Run the sandbox without a window
pub fn run_headless(config: &SandboxConfig, frames: u32, seed: u64) -> Result<HeadlessSummary> {
    ensure!(
        config.window.width > 0 && config.window.height > 0,
        "world size must be non-zero, got {}x{}",
        config.window.width,
        config.window.height
    );

    let bounds = Bounds::new(config.window.width as f64, config.window.height as f64);
    let mut sandbox = Sandbox::new(bounds, config.physics);
    let mut canvas = Canvas::new(config.window.width, config.window.height);
    let mut rng = Xoshiro256StarStar::seed_from_u64(seed);

    let press_frames = (frames as f64 * PRESS_SHARE).ceil() as u32;
    let mut script = ScriptedInput::new(bounds, config.brush.default_size, press_frames, CYCLE_EVERY);

    log::info!(
        "Headless run: {} frames, {}x{} world, seed {}",
        frames,
        config.window.width,
        config.window.height,
        seed
    );

    let start = Instant::now();
    let mut ticks = 0u64;
    let mut rejected_total = 0u64;

    for _ in 0..frames {
        let input = script.sample();
        let report = sandbox.frame(&input, &mut rng, &mut canvas);
        ticks += report.ticks as u64;
        rejected_total += report.spawned.rejected as u64;
        script.advance();
    }

    let world = sandbox.world();
    let summary = HeadlessSummary {
        frames,
        ticks,
        particles: world.len(),
        created_total: sandbox.counter().total(),
        rejected_total,
        by_preset: world.count_by_preset(),
        kinetic_energy: world.kinetic_energy(),
        within_bounds: world.all_within_bounds(),
    };

    let elapsed = start.elapsed();
    log::info!(
        "Finished in {:.2?} ({:.1} frames/s)",
        elapsed,
        frames as f64 / elapsed.as_secs_f64().max(f64::EPSILON)
    );
    log::info!(
        "Particles: {} (created {}, rejected {})",
        summary.particles,
        summary.created_total,
        summary.rejected_total
    );
    for id in PresetId::ALL {
        log::info!("  {:<9} {}", id.as_str(), summary.by_preset[id.index()]);
    }
    log::info!("Kinetic energy: {:.3}", summary.kinetic_energy);
    if !summary.within_bounds {
        log::warn!("Some particles ended outside the bounded band");
    }

    Ok(summary)
}
