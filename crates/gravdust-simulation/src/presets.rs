//! Particle type presets and registry

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// RGBA color token, only read by renderers
pub type Rgba = [u8; 4];

/// Built-in particle types
#[repr(u8)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PresetId {
    #[default]
    Powder = 0,
    Water = 1,
    Oxygen = 2,
    Hydrogen = 3,
}

impl PresetId {
    /// All presets in catalog order
    pub const ALL: [PresetId; 4] = [
        PresetId::Powder,
        PresetId::Water,
        PresetId::Oxygen,
        PresetId::Hydrogen,
    ];

    /// String key used by selection events and config files
    pub fn as_str(self) -> &'static str {
        match self {
            PresetId::Powder => "powder",
            PresetId::Water => "water",
            PresetId::Oxygen => "oxygen",
            PresetId::Hydrogen => "hydrogen",
        }
    }

    /// Catalog position
    pub fn index(self) -> usize {
        self as usize
    }

    /// Next preset in catalog order, wrapping around
    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }
}

impl fmt::Display for PresetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Selection of an id that is not in the catalog
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown particle type '{0}' (expected one of: powder, water, oxygen, hydrogen)")]
pub struct UnknownPreset(pub String);

impl FromStr for PresetId {
    type Err = UnknownPreset;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PresetId::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| UnknownPreset(s.to_string()))
    }
}

/// Mass and color assigned to particles at creation
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParticlePreset {
    pub id: PresetId,
    pub name: &'static str,
    pub mass: f64,
    pub color: Rgba,
}

/// Registry of the four particle presets
#[derive(Clone, Debug)]
pub struct Presets {
    presets: [ParticlePreset; 4],
}

impl Presets {
    pub fn new() -> Self {
        Self {
            presets: [
                ParticlePreset {
                    id: PresetId::Powder,
                    name: "Powder",
                    mass: 3.0,
                    color: [194, 178, 128, 255],
                },
                ParticlePreset {
                    id: PresetId::Water,
                    name: "Water",
                    mass: 2.0,
                    color: [64, 120, 220, 255],
                },
                ParticlePreset {
                    id: PresetId::Oxygen,
                    name: "Oxygen",
                    mass: 1.0,
                    color: [200, 230, 255, 255],
                },
                ParticlePreset {
                    id: PresetId::Hydrogen,
                    name: "Hydrogen",
                    mass: 0.5,
                    color: [255, 140, 160, 255],
                },
            ],
        }
    }

    /// Get preset by id
    pub fn get(&self, id: PresetId) -> ParticlePreset {
        self.presets[id.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = &ParticlePreset> {
        self.presets.iter()
    }
}

impl Default for Presets {
    fn default() -> Self {
        Self::new()
    }
}
