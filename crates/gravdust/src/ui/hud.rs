//! HUD overlay

use egui::{Align2, Color32};

use crate::config::UiConfig;

/// Stats for the HUD display
pub struct HudStats {
    pub fps: f32,
    pub particle_count: usize,
    pub created_total: u64,
    pub brush_size: u32,
    pub active_name: &'static str,
    pub paused: bool,
    pub kinetic_energy: f64,
}

/// Show the HUD overlay
pub fn show_hud(ctx: &egui::Context, stats: &HudStats, ui_config: &UiConfig) {
    egui::Area::new(egui::Id::new("gravdust_hud"))
        .anchor(Align2::RIGHT_TOP, [-10.0, 10.0])
        .show(ctx, |ui| {
            egui::Frame::new()
                .fill(Color32::from_rgba_unmultiplied(0, 0, 0, 180))
                .inner_margin(8.0)
                .outer_margin(0.0)
                .corner_radius(4.0)
                .show(ui, |ui| {
                    if ui_config.show_fps {
                        ui.label(format!("FPS: {:.0}", stats.fps));
                    }
                    if ui_config.show_particle_count {
                        ui.label(format!(
                            "Particles: {} ({} created)",
                            stats.particle_count, stats.created_total
                        ));
                    }
                    ui.label(format!("Type: {}", stats.active_name));
                    ui.label(format!("Brush: {}", stats.brush_size));
                    ui.label(format!("Energy: {:.1}", stats.kinetic_energy));
                    if stats.paused {
                        ui.colored_label(Color32::YELLOW, "PAUSED");
                    }
                });
        });
}
