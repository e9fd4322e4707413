//! Input adapters feeding the sandbox once per frame

use gravdust_simulation::{Bounds, DVec2, InputFrame, InputSource, PresetId};

/// Pointer state collected from window events.
///
/// Screen positions are in physical pixels, the same space as the world,
/// because the canvas always matches the surface size.
#[derive(Clone, Debug)]
pub struct PointerInput {
    cursor: Option<DVec2>,
    pressed: bool,
    brush_size: u32,
    max_brush_size: u32,
    active_type: PresetId,
}

impl PointerInput {
    pub fn new(brush_size: u32, max_brush_size: u32, active_type: PresetId) -> Self {
        let max_brush_size = max_brush_size.max(1);
        Self {
            cursor: None,
            pressed: false,
            brush_size: brush_size.clamp(1, max_brush_size),
            max_brush_size,
            active_type,
        }
    }

    pub fn cursor_moved(&mut self, x: f64, y: f64) {
        self.cursor = Some(DVec2::new(x, y));
    }

    /// Cursor left the window: stop spawning
    pub fn cursor_left(&mut self) {
        self.cursor = None;
        self.pressed = false;
    }

    pub fn set_pressed(&mut self, pressed: bool) {
        self.pressed = pressed;
    }

    pub fn brush_size(&self) -> u32 {
        self.brush_size
    }

    /// Set brush size, clamped to `1..=max_brush_size`
    pub fn set_brush_size(&mut self, size: u32) {
        self.brush_size = size.clamp(1, self.max_brush_size);
    }

    /// Grow or shrink the brush by `delta`
    pub fn adjust_brush(&mut self, delta: i32) {
        let size = self.brush_size.saturating_add_signed(delta);
        self.set_brush_size(size);
    }

    pub fn set_active_type(&mut self, id: PresetId) {
        self.active_type = id;
    }
}

impl InputSource for PointerInput {
    fn sample(&self) -> InputFrame {
        InputFrame {
            pointer: self.cursor.unwrap_or(DVec2::ZERO),
            pressed: self.pressed && self.cursor.is_some(),
            brush_size: self.brush_size,
            active_type: self.active_type.as_str().to_string(),
        }
    }
}

/// Deterministic pointer script for headless runs.
///
/// The pointer traces a Lissajous curve across the world, holds the button
/// for the first `press_frames` frames and switches preset every
/// `cycle_every` frames.
#[derive(Clone, Debug)]
pub struct ScriptedInput {
    frame: u32,
    bounds: Bounds,
    brush_size: u32,
    press_frames: u32,
    cycle_every: u32,
}

impl ScriptedInput {
    pub fn new(bounds: Bounds, brush_size: u32, press_frames: u32, cycle_every: u32) -> Self {
        Self {
            frame: 0,
            bounds,
            brush_size: brush_size.max(1),
            press_frames,
            cycle_every: cycle_every.max(1),
        }
    }

    /// Move on to the next frame
    pub fn advance(&mut self) {
        self.frame += 1;
    }

    fn pointer(&self) -> DVec2 {
        let t = self.frame as f64 * 0.05;
        let center = DVec2::new(self.bounds.width / 2.0, self.bounds.height / 2.0);
        let reach = center * 0.6;
        center + DVec2::new(reach.x * (3.0 * t).sin(), reach.y * (2.0 * t).sin())
    }

    fn preset(&self) -> PresetId {
        let slot = (self.frame / self.cycle_every) as usize % PresetId::ALL.len();
        PresetId::ALL[slot]
    }
}

impl InputSource for ScriptedInput {
    fn sample(&self) -> InputFrame {
        InputFrame {
            pointer: self.pointer(),
            pressed: self.frame < self.press_frames,
            brush_size: self.brush_size,
            active_type: self.preset().as_str().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_pressed_without_cursor() {
        let mut input = PointerInput::new(3, 10, PresetId::Water);
        input.set_pressed(true);
        assert!(!input.sample().pressed);

        input.cursor_moved(12.0, 34.0);
        let frame = input.sample();
        assert!(frame.pressed);
        assert_eq!(frame.pointer, DVec2::new(12.0, 34.0));
        assert_eq!(frame.active_type, "water");
    }

    #[test]
    fn test_cursor_left_releases() {
        let mut input = PointerInput::new(3, 10, PresetId::Powder);
        input.cursor_moved(1.0, 1.0);
        input.set_pressed(true);
        input.cursor_left();
        assert!(!input.sample().pressed);

        // Re-entering does not re-press
        input.cursor_moved(2.0, 2.0);
        assert!(!input.sample().pressed);
    }

    #[test]
    fn test_brush_clamped() {
        let mut input = PointerInput::new(50, 10, PresetId::Powder);
        assert_eq!(input.brush_size(), 10);

        input.adjust_brush(-20);
        assert_eq!(input.brush_size(), 1);

        input.adjust_brush(4);
        assert_eq!(input.brush_size(), 5);

        input.set_brush_size(0);
        assert_eq!(input.sample().brush_size, 1);
    }

    #[test]
    fn test_script_stays_inside_bounds() {
        let bounds = Bounds::new(640.0, 480.0);
        let mut script = ScriptedInput::new(bounds, 4, 100, 25);
        for _ in 0..500 {
            let frame = script.sample();
            assert!(frame.pointer.x > 0.0 && frame.pointer.x < 640.0);
            assert!(frame.pointer.y > 0.0 && frame.pointer.y < 480.0);
            script.advance();
        }
    }

    #[test]
    fn test_script_press_window_and_cycle() {
        let mut script = ScriptedInput::new(Bounds::new(100.0, 100.0), 2, 3, 2);
        let frames: Vec<InputFrame> = (0..5)
            .map(|_| {
                let f = script.sample();
                script.advance();
                f
            })
            .collect();

        let pressed: Vec<bool> = frames.iter().map(|f| f.pressed).collect();
        assert_eq!(pressed, vec![true, true, true, false, false]);

        let types: Vec<&str> = frames.iter().map(|f| f.active_type.as_str()).collect();
        assert_eq!(types, vec!["powder", "powder", "water", "water", "oxygen"]);
    }
}
