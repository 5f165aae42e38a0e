//! Procedural terrain: presets, noise height field, and synthesis into stores.

mod height_field;
mod presets;
mod synthesizer;

pub use height_field::{HeightMap, NoiseHeightField};
pub use presets::{CategorySpawn, HeightDistribution, PRESETS, TerrainPreset, find_preset};
pub use synthesizer::{AssetPlan, GeneratedTerrain, StackPlan, TerrainSynthesizer};

use std::fmt;

use bevy::prelude::*;
use hexx::Hex;

/// Layered noise parameters for the height field.
#[derive(Clone, Debug, PartialEq, Reflect)]
pub struct NoiseSettings {
    /// Number of noise layers summed per sample.
    pub octaves: usize,
    /// Frequency of the first octave, in noise-space units.
    pub base_frequency: f64,
    /// Frequency multiplier between octaves.
    pub lacunarity: f64,
    /// Amplitude multiplier between octaves.
    pub persistence: f64,
}

impl Default for NoiseSettings {
    fn default() -> Self {
        Self {
            octaves: 4,
            base_frequency: 0.05,
            lacunarity: 2.0,
            persistence: 0.5,
        }
    }
}

/// Why a generation request was rejected. Nothing is merged when this occurs.
#[derive(Clone, Debug, PartialEq)]
pub enum GenerationError {
    /// The requested radius exceeds the configured limit.
    RadiusTooLarge {
        /// Requested radius.
        radius: u32,
        /// Allowed maximum.
        max: u32,
    },
    /// No preset with this id exists.
    UnknownPreset(String),
    /// The preset's parameters are out of range.
    InvalidPreset {
        /// Preset id.
        id: String,
        /// What is wrong with it.
        reason: String,
    },
    /// The height field produced NaN or infinity.
    NonFiniteHeight {
        /// Offending hex.
        hex: Hex,
    },
}

impl fmt::Display for GenerationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RadiusTooLarge { radius, max } => {
                write!(f, "generation radius {radius} exceeds the limit of {max}")
            }
            Self::UnknownPreset(id) => write!(f, "unknown terrain preset '{id}'"),
            Self::InvalidPreset { id, reason } => write!(f, "invalid terrain preset '{id}': {reason}"),
            Self::NonFiniteHeight { hex } => {
                write!(f, "height field is not finite at ({}, {})", hex.x, hex.y)
            }
        }
    }
}

impl std::error::Error for GenerationError {}

/// Outcome of a committed generation.
#[derive(Clone, Debug, PartialEq, Reflect)]
pub struct GenerationSummary {
    /// Seed the generation ran with.
    pub seed: u64,
    /// Preset id.
    pub preset: String,
    /// Center of the generated disk.
    pub center: Hex,
    /// Radius of the generated disk.
    pub radius: u32,
    /// Hexes whose stacks were written.
    pub hexes: usize,
    /// Tiles created.
    pub tiles: usize,
    /// Assets placed.
    pub assets: usize,
}
