//! Single-hex asset suggestions from local context.

use bevy::prelude::*;
use hexx::Hex;

use crate::analysis::{self, TerrainKind};
use crate::diorama::{AssetCatalog, AssetCategory, AssetPlacementStore, TileStackStore, TileType};
use crate::hex::square_region;
use crate::math;

/// Radius of the analysis run around the queried hex.
pub const ADVISOR_ANALYSIS_RADIUS: u32 = 3;
/// Half-width of the square neighborhood scan (5×5).
pub const NEIGHBORHOOD_RADIUS: u32 = 2;
/// Maximum number of suggestions returned.
pub const MAX_SUGGESTIONS: usize = 3;

const SPARSE_DENSITY: f32 = 0.3;

/// One proposed placement and why.
#[derive(Clone, Debug, PartialEq, Reflect)]
pub struct PlacementSuggestion {
    /// Target hex.
    pub hex: Hex,
    /// Catalog id to place.
    pub asset_type: String,
    /// Confidence in `[0, 1]`.
    pub confidence: f32,
    /// Human-readable justification.
    pub reason: String,
}

/// What the 5×5 scan around a hex found, excluding the hex itself.
#[derive(Debug, Default)]
struct Neighborhood {
    heights: Vec<f32>,
    trees: bool,
    water: bool,
    structures: bool,
}

impl Neighborhood {
    fn scan(
        tiles: &TileStackStore,
        assets: &AssetPlacementStore,
        catalog: &AssetCatalog,
        center: Hex,
    ) -> Self {
        let mut found = Self::default();
        for hex in square_region(center, NEIGHBORHOOD_RADIUS).filter(|&h| h != center) {
            if tiles.is_occupied(hex) {
                found.heights.push(tiles.total_height_at(hex) as f32);
            }
            found.water |= tiles.tiles_at(hex).iter().any(|t| t.kind == TileType::Water);
            for asset in assets.assets_at(hex) {
                match catalog.category_of(&asset.asset_type) {
                    Some(AssetCategory::Trees) => found.trees = true,
                    Some(AssetCategory::Structures) => found.structures = true,
                    _ => {}
                }
            }
        }
        found
    }
}

/// Up to [`MAX_SUGGESTIONS`] suggestions for `hex`, in rule order.
pub fn suggest(
    tiles: &TileStackStore,
    assets: &AssetPlacementStore,
    catalog: &AssetCatalog,
    hex: Hex,
) -> Vec<PlacementSuggestion> {
    let analysis = analysis::analyze(tiles, assets, hex, ADVISOR_ANALYSIS_RADIUS);
    let around = Neighborhood::scan(tiles, assets, catalog, hex);
    let here = tiles.total_height_at(hex) as f32;
    let locally_tall = here > 0.0 && here >= math::mean(&around.heights);

    let rules: [(bool, &str, f32, &str); 5] = [
        (
            analysis.terrain_kind == TerrainKind::Mountainous && locally_tall,
            "large-rock",
            0.8,
            "High ground in mountainous terrain suits a large rock",
        ),
        (
            around.trees,
            "bush",
            0.6,
            "Nearby trees would blend in with some ground cover",
        ),
        (
            around.water,
            "reeds",
            0.55,
            "Reeds soften the edge of nearby water",
        ),
        (
            analysis.asset_density < SPARSE_DENSITY,
            "pine-tree",
            0.5,
            "The area is sparse; a tree adds a focal point",
        ),
        (
            analysis.terrain_kind == TerrainKind::Flat && !around.structures,
            "cottage",
            0.4,
            "Open flat ground with no buildings nearby fits a cottage",
        ),
    ];

    rules
        .into_iter()
        .filter(|(applies, ..)| *applies)
        .take(MAX_SUGGESTIONS)
        .map(|(_, asset_type, confidence, reason)| PlacementSuggestion {
            hex,
            asset_type: asset_type.to_owned(),
            confidence,
            reason: reason.to_owned(),
        })
        .collect()
}
