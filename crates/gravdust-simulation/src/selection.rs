//! Active particle type selection

use crate::presets::{PresetId, UnknownPreset};

/// Holds the preset the spawner uses next.
///
/// Transitions only happen on selection events. Unknown ids leave the
/// current selection untouched.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TypeSelector {
    active: PresetId,
}

impl TypeSelector {
    pub fn new(initial: PresetId) -> Self {
        Self { active: initial }
    }

    pub fn active(&self) -> PresetId {
        self.active
    }

    /// Select a preset by string key.
    ///
    /// Selecting the current preset again is a no-op. An unknown key is logged
    /// and returned as an error so callers can tell nothing changed.
    pub fn set_active_type(&mut self, key: &str) -> Result<PresetId, UnknownPreset> {
        match key.parse::<PresetId>() {
            Ok(id) => {
                self.select(id);
                Ok(id)
            }
            Err(err) => {
                log::warn!("{err}; keeping {}", self.active);
                Err(err)
            }
        }
    }

    /// Select a preset by id
    pub fn select(&mut self, id: PresetId) {
        if self.active != id {
            log::debug!("Active particle type: {} -> {}", self.active, id);
            self.active = id;
        }
    }

    /// Step to the next preset in catalog order
    pub fn cycle_next(&mut self) -> PresetId {
        self.select(self.active.next());
        self.active
    }
}
