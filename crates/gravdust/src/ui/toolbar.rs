//! Particle type toolbar
//!
//! One color button per preset plus brush, speed and run controls.

use egui::{Color32, CornerRadius, Stroke, StrokeKind, Vec2};
use gravdust_simulation::{MAX_STEPS_PER_FRAME, PresetId, Presets};

/// Cached preset info for toolbar display
#[derive(Clone)]
pub struct PresetInfo {
    pub id: PresetId,
    pub name: &'static str,
    pub mass: f64,
    pub color: Color32,
}

/// State shared between the toolbar, keyboard shortcuts and the app
#[derive(Clone, Debug, PartialEq)]
pub struct ToolbarState {
    pub active: PresetId,
    pub brush_size: u32,
    pub max_brush_size: u32,
    /// Ticks per frame (1..=MAX_STEPS_PER_FRAME)
    pub steps_per_frame: u32,
    pub paused: bool,
    /// One-shot requests consumed by the app after the UI pass
    pub clear_requested: bool,
    pub step_requested: bool,
}

impl ToolbarState {
    pub fn new(active: PresetId, brush_size: u32, max_brush_size: u32) -> Self {
        let max_brush_size = max_brush_size.max(1);
        Self {
            active,
            brush_size: brush_size.clamp(1, max_brush_size),
            max_brush_size,
            steps_per_frame: 1,
            paused: false,
            clear_requested: false,
            step_requested: false,
        }
    }

    /// Take pending one-shot requests as `(clear, step)`
    pub fn take_requests(&mut self) -> (bool, bool) {
        let requests = (self.clear_requested, self.step_requested);
        self.clear_requested = false;
        self.step_requested = false;
        requests
    }
}

impl Default for ToolbarState {
    fn default() -> Self {
        Self::new(PresetId::default(), 5, 30)
    }
}

/// Preset toolbar widget
pub struct PresetToolbar {
    presets: Vec<PresetInfo>,
}

impl PresetToolbar {
    pub fn new(presets: &Presets) -> Self {
        let presets = presets
            .iter()
            .map(|preset| {
                let [r, g, b, a] = preset.color;
                PresetInfo {
                    id: preset.id,
                    name: preset.name,
                    mass: preset.mass,
                    color: Color32::from_rgba_unmultiplied(r, g, b, a),
                }
            })
            .collect();

        Self { presets }
    }

    pub fn show(&self, ctx: &egui::Context, state: &mut ToolbarState) {
        egui::SidePanel::left("preset_toolbar")
            .default_width(200.0)
            .resizable(false)
            .show(ctx, |ui| {
                ui.heading("gravdust");
                ui.separator();

                ui.horizontal(|ui| {
                    ui.label("Brush:");
                    ui.add(egui::Slider::new(
                        &mut state.brush_size,
                        1..=state.max_brush_size,
                    ));
                });

                ui.horizontal(|ui| {
                    ui.label("Speed:");
                    ui.add(
                        egui::Slider::new(&mut state.steps_per_frame, 1..=MAX_STEPS_PER_FRAME)
                            .suffix("×"),
                    );
                });

                ui.horizontal(|ui| {
                    if ui
                        .button(if state.paused { "Resume" } else { "Pause" })
                        .clicked()
                    {
                        state.paused = !state.paused;
                    }
                    if ui
                        .add_enabled(state.paused, egui::Button::new("Step"))
                        .clicked()
                    {
                        state.step_requested = true;
                    }
                    if ui.button("Clear").clicked() {
                        state.clear_requested = true;
                    }
                });

                ui.separator();
                ui.label("Particle type:");

                for (slot, preset) in self.presets.iter().enumerate() {
                    ui.horizontal(|ui| {
                        let response =
                            self.preset_button(ui, preset, state.active == preset.id);
                        if response.clicked() {
                            state.active = preset.id;
                        }
                        response.on_hover_text(format!("Mass {}", preset.mass));
                        ui.label(format!("{} {}", slot + 1, preset.name));
                    });
                }
            });
    }

    fn preset_button(&self, ui: &mut egui::Ui, preset: &PresetInfo, selected: bool) -> egui::Response {
        let (response, painter) = ui.allocate_painter(Vec2::new(32.0, 32.0), egui::Sense::click());

        let rect = response.rect;
        let visuals = ui.style().interact(&response);

        painter.rect_filled(rect.shrink(2.0), CornerRadius::same(4), preset.color);

        let stroke = if selected {
            Stroke::new(3.0, Color32::WHITE)
        } else if response.hovered() {
            Stroke::new(2.0, visuals.fg_stroke.color)
        } else {
            Stroke::new(1.0, Color32::from_gray(60))
        };

        painter.rect_stroke(
            rect.shrink(1.0),
            CornerRadius::same(4),
            stroke,
            StrokeKind::Outside,
        );

        response
    }
}
