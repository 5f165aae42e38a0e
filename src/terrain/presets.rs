use crate::diorama::{AssetCategory, TileHeight, TileType};

use super::GenerationError;

/// Probability of each tile height class. `one` is the remainder and is
/// never consulted by [`select`](Self::select).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeightDistribution {
    /// Probability of 1-unit tiles.
    pub one: f32,
    /// Probability of 2-unit tiles.
    pub two: f32,
    /// Probability of 5-unit tiles.
    pub five: f32,
}

impl HeightDistribution {
    /// Picks a height from a uniform sample `u ∈ [0, 1)`.
    ///
    /// Tall tiles are checked first: `5` if `u < five`, `2` if
    /// `u < five + two`, otherwise `1`.
    pub fn select(&self, u: f32) -> TileHeight {
        if u < self.five {
            TileHeight::Five
        } else if u < self.five + self.two {
            TileHeight::Two
        } else {
            TileHeight::One
        }
    }
}

/// Spawn parameters for one asset category.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CategorySpawn {
    /// Category whose catalog entries are placed.
    pub category: AssetCategory,
    /// Chance the category appears at all in one generation.
    pub probability: f32,
    /// Cluster centers per generated hex.
    pub density: f32,
    /// `0` scatters by distance to a center, `1` fills every hex.
    pub clustering: f32,
}

/// Named, immutable generation configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TerrainPreset {
    /// Stable id.
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Tile height probabilities.
    pub height_distribution: HeightDistribution,
    /// Surface type of generated tiles.
    pub ground: TileType,
    /// Asset categories, evaluated in order.
    pub asset_categories: &'static [CategorySpawn],
}

impl TerrainPreset {
    /// Checks every probability and factor is finite and in range.
    pub fn validate(&self) -> Result<(), GenerationError> {
        let invalid = |reason: String| GenerationError::InvalidPreset {
            id: self.id.to_owned(),
            reason,
        };
        let d = &self.height_distribution;
        for (label, p) in [("1", d.one), ("2", d.two), ("5", d.five)] {
            if !is_probability(p) {
                return Err(invalid(format!("height {label} probability {p} is not in [0, 1]")));
            }
        }
        let total = d.one + d.two + d.five;
        if total > 1.0 + 1e-4 {
            return Err(invalid(format!("height probabilities sum to {total}")));
        }
        for spawn in self.asset_categories {
            if !is_probability(spawn.probability) {
                return Err(invalid(format!("{:?} probability out of range", spawn.category)));
            }
            if !spawn.density.is_finite() || spawn.density < 0.0 {
                return Err(invalid(format!("{:?} density must be >= 0", spawn.category)));
            }
            if !is_probability(spawn.clustering) {
                return Err(invalid(format!("{:?} clustering out of range", spawn.category)));
            }
        }
        Ok(())
    }
}

fn is_probability(p: f32) -> bool {
    p.is_finite() && (0.0..=1.0).contains(&p)
}

const fn spawn(category: AssetCategory, probability: f32, density: f32, clustering: f32) -> CategorySpawn {
    CategorySpawn {
        category,
        probability,
        density,
        clustering,
    }
}

/// Built-in presets.
pub const PRESETS: &[TerrainPreset] = &[
    TerrainPreset {
        id: "forest",
        name: "Forest",
        height_distribution: HeightDistribution { one: 0.5, two: 0.35, five: 0.1 },
        ground: TileType::Ground,
        asset_categories: &[
            spawn(AssetCategory::Trees, 0.95, 0.08, 0.7),
            spawn(AssetCategory::Vegetation, 0.8, 0.06, 0.4),
            spawn(AssetCategory::Rocks, 0.4, 0.02, 0.2),
        ],
    },
    TerrainPreset {
        id: "plains",
        name: "Plains",
        height_distribution: HeightDistribution { one: 0.8, two: 0.15, five: 0.0 },
        ground: TileType::Ground,
        asset_categories: &[
            spawn(AssetCategory::Vegetation, 0.9, 0.05, 0.3),
            spawn(AssetCategory::Trees, 0.5, 0.02, 0.5),
            spawn(AssetCategory::Structures, 0.3, 0.01, 0.8),
        ],
    },
    TerrainPreset {
        id: "hills",
        name: "Rolling Hills",
        height_distribution: HeightDistribution { one: 0.4, two: 0.45, five: 0.1 },
        ground: TileType::Ground,
        asset_categories: &[
            spawn(AssetCategory::Trees, 0.6, 0.04, 0.5),
            spawn(AssetCategory::Rocks, 0.7, 0.04, 0.4),
            spawn(AssetCategory::Vegetation, 0.6, 0.04, 0.3),
        ],
    },
    TerrainPreset {
        id: "mountains",
        name: "Mountains",
        height_distribution: HeightDistribution { one: 0.2, two: 0.4, five: 0.4 },
        ground: TileType::Ground,
        asset_categories: &[
            spawn(AssetCategory::Rocks, 0.95, 0.08, 0.6),
            spawn(AssetCategory::Trees, 0.4, 0.03, 0.5),
            spawn(AssetCategory::Structures, 0.15, 0.01, 0.9),
        ],
    },
    TerrainPreset {
        id: "swamp",
        name: "Swamp",
        height_distribution: HeightDistribution { one: 0.85, two: 0.1, five: 0.0 },
        ground: TileType::Mud,
        asset_categories: &[
            spawn(AssetCategory::Vegetation, 0.95, 0.1, 0.5),
            spawn(AssetCategory::Trees, 0.6, 0.03, 0.6),
        ],
    },
];

/// Preset by id.
pub fn find_preset(id: &str) -> Option<&'static TerrainPreset> {
    PRESETS.iter().find(|p| p.id == id)
}
