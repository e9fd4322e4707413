//! gravdust - gravity and collision particle sandbox

use std::path::PathBuf;

use clap::Parser;
use gravdust::App;
use gravdust::config::SandboxConfig;
use gravdust_simulation::PresetId;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file (RON); defaults to ./gravdust.ron when present
    #[arg(long)]
    config: Option<PathBuf>,

    /// Run without a window and log a summary
    #[arg(long)]
    headless: bool,

    /// Frames to simulate in headless mode
    #[arg(long, default_value = "600")]
    frames: u32,

    /// Seed for spawn jitter
    #[arg(long)]
    seed: Option<u64>,

    /// Override the starting brush size
    #[arg(long)]
    brush: Option<u32>,

    /// Override the starting particle type: powder, water, oxygen, hydrogen
    #[arg(long)]
    preset: Option<PresetId>,

    /// Enable debug logging
    #[arg(long)]
    verbose: bool,

    /// Print the effective configuration as RON and exit
    #[arg(long)]
    print_config: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => SandboxConfig::load_from(path)?,
        None => SandboxConfig::load()?,
    };
    if let Some(brush) = args.brush {
        config.brush.default_size = brush.clamp(1, config.brush.max_size);
    }
    if let Some(preset) = args.preset {
        config.brush.default_preset = preset;
    }

    let verbose = args.verbose || config.debug.verbose_logging;
    let default_filter = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    if args.print_config {
        println!("{}", config.to_ron()?);
        return Ok(());
    }

    if args.headless {
        let seed = args.seed.unwrap_or(0);
        gravdust::headless::run_headless(&config, args.frames, seed)?;
        return Ok(());
    }

    log::info!("Starting gravdust");

    pollster::block_on(run(config, args.seed))
}

async fn run(config: SandboxConfig, seed: Option<u64>) -> anyhow::Result<()> {
    let (app, event_loop) = App::new(config, seed).await?;
    App::run(event_loop, app)
}
