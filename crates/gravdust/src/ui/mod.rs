//! egui overlay: preset toolbar and HUD

mod hud;
mod toolbar;

pub use hud::{HudStats, show_hud};
pub use toolbar::{PresetToolbar, ToolbarState};
