//! Input adapter interface

use glam::DVec2;

/// Pointer and selection state sampled once per frame
#[derive(Clone, Debug, PartialEq)]
pub struct InputFrame {
    /// Pointer position in world coordinates
    pub pointer: DVec2,
    /// Whether the spawn button is held
    pub pressed: bool,
    /// Particles per frame and jitter range, at least 1
    pub brush_size: u32,
    /// Key into the preset catalog
    pub active_type: String,
}

impl InputFrame {
    /// Pointer released at the origin
    pub fn idle(active_type: impl Into<String>) -> Self {
        Self {
            pointer: DVec2::ZERO,
            pressed: false,
            brush_size: 1,
            active_type: active_type.into(),
        }
    }

    /// Pointer held at `pointer` with the given brush
    pub fn pressed_at(pointer: DVec2, brush_size: u32, active_type: impl Into<String>) -> Self {
        Self {
            pointer,
            pressed: true,
            brush_size,
            active_type: active_type.into(),
        }
    }
}

/// Anything that can report the current pointer state
pub trait InputSource {
    fn sample(&self) -> InputFrame;
}

impl InputSource for InputFrame {
    fn sample(&self) -> InputFrame {
        self.clone()
    }
}
