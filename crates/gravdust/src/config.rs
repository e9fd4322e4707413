//! Sandbox configuration with layered loading
//!
//! Configuration is loaded from multiple sources (lowest to highest priority):
//! 1. Compiled defaults
//! 2. `gravdust.ron` in the working directory (if it exists), or an explicit file
//! 3. Environment variables prefixed with `GRAVDUST_`
//!
//! Example environment variable: `GRAVDUST_PHYSICS__DAMPING=0.95`

use std::path::Path;

use anyhow::{Context, Result};
use config::{Config, ConfigBuilder, Environment, File, FileFormat, builder::DefaultState};
use gravdust_simulation::{PhysicsParams, PresetId, constants};
use serde::{Deserialize, Serialize};

/// Main sandbox configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SandboxConfig {
    #[serde(default)]
    pub window: WindowConfig,

    #[serde(default)]
    pub physics: PhysicsParams,

    #[serde(default)]
    pub brush: BrushConfig,

    #[serde(default)]
    pub ui: UiConfig,

    #[serde(default)]
    pub debug: DebugConfig,
}

/// Window settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowConfig {
    /// Initial window width, also the headless world width
    pub width: u32,
    /// Initial window height, also the headless world height
    pub height: u32,
    pub title: String,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            title: "gravdust".to_string(),
        }
    }
}

/// Brush settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrushConfig {
    /// Particles per frame on startup
    pub default_size: u32,
    /// Largest brush the input adapter allows
    pub max_size: u32,
    /// Particle type selected on startup
    pub default_preset: PresetId,
}

impl Default for BrushConfig {
    fn default() -> Self {
        Self {
            default_size: 5,
            max_size: 30,
            default_preset: PresetId::Powder,
        }
    }
}

/// HUD and toolbar settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    pub show_fps: bool,
    pub show_particle_count: bool,
    pub show_toolbar: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            show_fps: true,
            show_particle_count: true,
            show_toolbar: true,
        }
    }
}

/// Debug/development settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DebugConfig {
    /// Enable verbose logging
    pub verbose_logging: bool,
}

impl SandboxConfig {
    /// Load configuration with layered priority:
    /// 1. Compiled defaults (lowest priority)
    /// 2. `gravdust.ron` (if exists)
    /// 3. Environment variables prefixed with `GRAVDUST_` (highest priority)
    pub fn load() -> Result<Self> {
        let builder = Self::defaults()?.add_source(
            File::with_name("gravdust")
                .format(FileFormat::Ron)
                .required(false),
        );
        Self::finish(builder)
    }

    /// Same as [`SandboxConfig::load`] with an explicit config file that must exist
    pub fn load_from(path: &Path) -> Result<Self> {
        let builder = Self::defaults()?.add_source(File::from(path).format(FileFormat::Ron));
        Self::finish(builder)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))
    }

    fn defaults() -> Result<ConfigBuilder<DefaultState>> {
        Ok(Config::builder()
            .set_default("window.width", 800_i64)?
            .set_default("window.height", 600_i64)?
            .set_default("window.title", "gravdust")?
            .set_default("physics.particle_size", constants::PARTICLE_SIZE)?
            .set_default("physics.min_distance_factor", constants::MIN_DISTANCE_FACTOR)?
            .set_default("physics.gravity_constant", constants::GRAVITY_CONSTANT)?
            .set_default("physics.attraction_floor", constants::ATTRACTION_FLOOR)?
            .set_default("physics.damping", constants::DAMPING_FACTOR)?
            .set_default("physics.bounce", constants::BOUNCE_FACTOR)?
            .set_default(
                "physics.max_particles",
                constants::DEFAULT_MAX_PARTICLES as i64,
            )?
            .set_default("brush.default_size", 5_i64)?
            .set_default("brush.max_size", 30_i64)?
            .set_default("brush.default_preset", "powder")?
            .set_default("ui.show_fps", true)?
            .set_default("ui.show_particle_count", true)?
            .set_default("ui.show_toolbar", true)?
            .set_default("debug.verbose_logging", false)?)
    }

    fn finish(builder: ConfigBuilder<DefaultState>) -> Result<Self> {
        // Layer 3: Environment variables (GRAVDUST_PHYSICS__DAMPING, etc.)
        let config = builder
            .add_source(
                Environment::with_prefix("GRAVDUST")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("Failed to build configuration")?;

        let config: Self = config
            .try_deserialize()
            .context("Failed to deserialize configuration")?;

        Ok(config.sanitized())
    }

    /// Clamp values that would break the brush contract
    fn sanitized(mut self) -> Self {
        self.brush.max_size = self.brush.max_size.max(1);
        self.brush.default_size = self.brush.default_size.clamp(1, self.brush.max_size);
        self
    }

    /// Pretty RON dump of the effective configuration
    pub fn to_ron(&self) -> Result<String> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .context("Failed to serialize configuration")
    }
}
