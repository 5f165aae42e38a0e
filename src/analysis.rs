//! Region statistics over the stores and the advice derived from them.
//!
//! The region is the axial square `[center - radius, center + radius]²`, not
//! a hex disk. Analysis results therefore cover more cells than a generation
//! of the same radius.

use bevy::prelude::*;
use hexx::Hex;

use crate::diorama::{AssetPlacementStore, TileStackStore};
use crate::hex::neighbors;
use crate::math;

/// Variance above which terrain is mountainous.
pub const MOUNTAINOUS_VARIANCE: f32 = 50.0;
/// Variance above which terrain is hilly.
pub const HILLY_VARIANCE: f32 = 20.0;
/// Share of the region that must be occupied for low-variance terrain to count as mixed.
pub const MIXED_COVERAGE: f32 = 0.3;

const SPARSE_DENSITY: f32 = 0.2;
const CROWDED_DENSITY: f32 = 2.0;
const FRAGMENTED_CONNECTIVITY: f32 = 0.5;
const MONOTONOUS_VARIANCE: f32 = 1.0;

/// Coarse terrain classification.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Reflect)]
pub enum TerrainKind {
    /// Little relief and sparse coverage.
    #[default]
    Flat,
    /// Moderate relief.
    Hilly,
    /// Strong relief.
    Mountainous,
    /// Little relief but well covered.
    Mixed,
}

/// Statistics for one analyzed region.
#[derive(Clone, Debug, Default, PartialEq, Reflect)]
pub struct TerrainAnalysis {
    /// Classification from variance and coverage.
    pub terrain_kind: TerrainKind,
    /// Assets in the region per occupied hex.
    pub asset_density: f32,
    /// Mean squared deviation of stack heights from their mean.
    pub height_variance: f32,
    /// Share of occupied hexes with at least one occupied neighbor.
    pub connectivity: f32,
    /// Mean stack height over occupied hexes.
    pub average_height: f32,
    /// Occupied hexes in the region.
    pub occupied_hexes: usize,
    /// Advice, in check order.
    pub recommended_actions: Vec<String>,
}

/// Analyzes the square region of `radius` around `center`.
pub fn analyze(
    tiles: &TileStackStore,
    assets: &AssetPlacementStore,
    center: Hex,
    radius: u32,
) -> TerrainAnalysis {
    let mut occupied: Vec<Hex> = tiles
        .stacks()
        .map(|(hex, _)| hex)
        .filter(|&hex| in_square(hex, center, radius))
        .collect();
    occupied.sort_unstable_by_key(|hex| (hex.x, hex.y));
    let heights: Vec<f32> = occupied
        .iter()
        .map(|&hex| tiles.total_height_at(hex) as f32)
        .collect();

    let average_height = math::mean(&heights);
    let height_variance = math::mean_squared_deviation(&heights, average_height);

    let connected = occupied
        .iter()
        .filter(|&&hex| neighbors(hex).iter().any(|&n| tiles.is_occupied(n)))
        .count();
    let connectivity = if occupied.is_empty() {
        0.0
    } else {
        connected as f32 / occupied.len() as f32
    };

    let asset_count = assets.iter().filter(|a| in_square(a.hex, center, radius)).count();
    let asset_density = asset_count as f32 / occupied.len().max(1) as f32;

    let side = 2.0 * radius as f32 + 1.0;
    let terrain_kind = classify(height_variance, occupied.len(), side * side);

    let mut analysis = TerrainAnalysis {
        terrain_kind,
        asset_density,
        height_variance,
        connectivity,
        average_height,
        occupied_hexes: occupied.len(),
        recommended_actions: Vec::new(),
    };
    analysis.recommended_actions = recommend(&analysis);
    analysis
}

fn classify(variance: f32, occupied: usize, region_cells: f32) -> TerrainKind {
    if variance > MOUNTAINOUS_VARIANCE {
        TerrainKind::Mountainous
    } else if variance > HILLY_VARIANCE {
        TerrainKind::Hilly
    } else if occupied as f32 > MIXED_COVERAGE * region_cells {
        TerrainKind::Mixed
    } else {
        TerrainKind::Flat
    }
}

fn recommend(analysis: &TerrainAnalysis) -> Vec<String> {
    let mut actions = Vec::new();
    if analysis.asset_density < SPARSE_DENSITY {
        actions.push("Add trees, rocks or vegetation to bring the table to life".to_owned());
    }
    if analysis.asset_density > CROWDED_DENSITY {
        actions.push("Thin out assets so the terrain stays readable".to_owned());
    }
    if analysis.connectivity < FRAGMENTED_CONNECTIVITY {
        actions.push("Fill gaps between isolated tiles to connect the terrain".to_owned());
    }
    if analysis.terrain_kind == TerrainKind::Flat && analysis.height_variance < MONOTONOUS_VARIANCE {
        actions.push("Stack a few taller tiles to add height variation".to_owned());
    }
    if analysis.terrain_kind == TerrainKind::Mountainous {
        actions.push("Add paths or flat clearings so models can cross the peaks".to_owned());
    }
    actions
}

fn in_square(hex: Hex, center: Hex, radius: u32) -> bool {
    let r = i64::from(radius);
    (i64::from(hex.x) - i64::from(center.x)).abs() <= r
        && (i64::from(hex.y) - i64::from(center.y)).abs() <= r
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diorama::{TileHeight, TileType};
    use crate::hex::square_region;

    fn stack(tiles: &mut TileStackStore, hex: Hex, heights: &[TileHeight]) {
        for &h in heights {
            tiles.add_tile(hex, h, TileType::Ground);
        }
    }

    #[test]
    fn empty_region_is_flat_and_disconnected() {
        let a = analyze(&TileStackStore::new(), &AssetPlacementStore::new(), Hex::ZERO, 3);
        assert_eq!(a.terrain_kind, TerrainKind::Flat);
        assert_eq!(a.occupied_hexes, 0);
        assert_eq!(a.connectivity, 0.0);
        assert_eq!(a.asset_density, 0.0);
        assert_eq!(a.height_variance, 0.0);
    }

    #[test]
    fn variance_and_average_over_occupied_hexes() {
        let mut tiles = TileStackStore::new();
        stack(&mut tiles, Hex::ZERO, &[TileHeight::One]);
        stack(&mut tiles, Hex::new(1, 0), &[TileHeight::Two, TileHeight::One]);
        stack(&mut tiles, Hex::new(0, 1), &[TileHeight::Five]);
        let a = analyze(&tiles, &AssetPlacementStore::new(), Hex::ZERO, 1);
        assert!((a.average_height - 3.0).abs() < 1e-6);
        assert!((a.height_variance - 8.0 / 3.0).abs() < 1e-5);
        assert_eq!(a.occupied_hexes, 3);
    }

    #[test]
    fn tall_spikes_are_mountainous() {
        let mut tiles = TileStackStore::new();
        stack(&mut tiles, Hex::ZERO, &[TileHeight::Five; 4]);
        stack(&mut tiles, Hex::new(1, 0), &[TileHeight::One]);
        let a = analyze(&tiles, &AssetPlacementStore::new(), Hex::ZERO, 2);
        // heights 20 and 1: variance 90.25
        assert_eq!(a.terrain_kind, TerrainKind::Mountainous);
        assert!(a.recommended_actions.iter().any(|s| s.contains("paths")));
    }

    #[test]
    fn moderate_relief_is_hilly() {
        let mut tiles = TileStackStore::new();
        stack(&mut tiles, Hex::ZERO, &[TileHeight::Five, TileHeight::Five]);
        stack(&mut tiles, Hex::new(1, 0), &[TileHeight::One]);
        let a = analyze(&tiles, &AssetPlacementStore::new(), Hex::ZERO, 2);
        // heights 10 and 1: variance 20.25
        assert_eq!(a.terrain_kind, TerrainKind::Hilly);
    }

    #[test]
    fn well_covered_low_relief_is_mixed() {
        let mut tiles = TileStackStore::new();
        for hex in square_region(Hex::ZERO, 1) {
            stack(&mut tiles, hex, &[TileHeight::Two]);
        }
        let a = analyze(&tiles, &AssetPlacementStore::new(), Hex::ZERO, 1);
        assert_eq!(a.terrain_kind, TerrainKind::Mixed);
        assert_eq!(a.connectivity, 1.0);
    }

    #[test]
    fn analysis_scans_square_corners() {
        let mut tiles = TileStackStore::new();
        // Hex distance 4 from the center, but inside the radius-2 square.
        stack(&mut tiles, Hex::new(2, 2), &[TileHeight::One]);
        let a = analyze(&tiles, &AssetPlacementStore::new(), Hex::ZERO, 2);
        assert_eq!(a.occupied_hexes, 1);
    }

    #[test]
    fn connectivity_counts_isolated_tiles() {
        let mut tiles = TileStackStore::new();
        stack(&mut tiles, Hex::ZERO, &[TileHeight::One]);
        stack(&mut tiles, Hex::new(1, 0), &[TileHeight::One]);
        stack(&mut tiles, Hex::new(-3, 0), &[TileHeight::One]);
        stack(&mut tiles, Hex::new(3, -3), &[TileHeight::One]);
        let a = analyze(&tiles, &AssetPlacementStore::new(), Hex::ZERO, 3);
        assert!((a.connectivity - 0.5).abs() < 1e-6);
    }

    #[test]
    fn density_counts_assets_in_region() {
        let mut tiles = TileStackStore::new();
        let mut assets = AssetPlacementStore::new();
        stack(&mut tiles, Hex::ZERO, &[TileHeight::One]);
        stack(&mut tiles, Hex::new(1, 0), &[TileHeight::One]);
        assets.add(Hex::ZERO, "bush", 0.0, 1.0);
        assets.add(Hex::ZERO, "flowers", 0.0, 1.0);
        assets.add(Hex::new(1, 0), "bush", 0.0, 1.0);
        assets.add(Hex::new(30, 30), "bush", 0.0, 1.0);
        let a = analyze(&tiles, &assets, Hex::ZERO, 2);
        assert!((a.asset_density - 1.5).abs() < 1e-6);
    }

    #[test]
    fn huge_radius_covers_every_stack_without_overflow() {
        let mut tiles = TileStackStore::new();
        let mut assets = AssetPlacementStore::new();
        stack(&mut tiles, Hex::ZERO, &[TileHeight::Two]);
        stack(&mut tiles, Hex::new(i32::MAX, i32::MIN), &[TileHeight::Two]);
        assets.add(Hex::new(-40_000, 7), "bush", 0.0, 1.0);

        let a = analyze(&tiles, &assets, Hex::ZERO, u32::MAX);
        assert_eq!(a.occupied_hexes, 2);
        assert!((a.average_height - 2.0).abs() < 1e-6);
        assert!((a.asset_density - 0.5).abs() < 1e-6);
        assert_eq!(a.terrain_kind, TerrainKind::Flat);

        let edge = analyze(&tiles, &assets, Hex::new(i32::MAX, i32::MIN), 1);
        assert_eq!(edge.occupied_hexes, 1);
    }

    #[test]
    fn several_recommendations_fire_in_check_order() {
        let mut tiles = TileStackStore::new();
        stack(&mut tiles, Hex::ZERO, &[TileHeight::One]);
        let a = analyze(&tiles, &AssetPlacementStore::new(), Hex::ZERO, 4);
        assert_eq!(a.terrain_kind, TerrainKind::Flat);
        assert_eq!(a.recommended_actions.len(), 3);
        assert!(a.recommended_actions[0].starts_with("Add trees"));
        assert!(a.recommended_actions[1].starts_with("Fill gaps"));
        assert!(a.recommended_actions[2].starts_with("Stack"));
    }
}
