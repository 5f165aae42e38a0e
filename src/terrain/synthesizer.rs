use std::f32::consts::TAU;

use bevy::log::debug;
use bevy::platform::collections::HashSet;
use hexx::Hex;
use rand::Rng;

use super::{
    CategorySpawn, GenerationError, GenerationSummary, HeightMap, NoiseHeightField, NoiseSettings,
    TerrainPreset,
};
use crate::diorama::{AssetCatalog, AssetPlacementStore, TileHeight, TileStackStore, TileType};
use crate::hex::hex_distance;

/// Hex distance at which an unclustered category stops scattering.
const CLUSTER_REACH: f32 = 5.0;
/// Height-field value to stack-depth multiplier.
const DEPTH_SCALE: f32 = 3.0;
/// Scale range of generated assets.
const ASSET_SCALE_RANGE: std::ops::Range<f32> = 0.8..1.2;

/// Planned stack for one hex: `depth` tiles of a single height and type.
#[derive(Clone, Debug, PartialEq)]
pub struct StackPlan {
    /// Target hex.
    pub hex: Hex,
    /// Height of every tile in the stack.
    pub height: TileHeight,
    /// Surface type of every tile in the stack.
    pub kind: TileType,
    /// Number of tiles.
    pub depth: u32,
}

/// Planned asset placement.
#[derive(Clone, Debug, PartialEq)]
pub struct AssetPlan {
    /// Anchor hex.
    pub hex: Hex,
    /// Catalog id.
    pub asset_type: &'static str,
    /// Rotation in `[0, 2π)`.
    pub rotation_y: f32,
    /// Scale in `[0.8, 1.2)`.
    pub scale: f32,
}

/// A complete, not yet merged generation result.
#[derive(Clone, Debug, PartialEq)]
pub struct GeneratedTerrain {
    /// Center of the generated disk.
    pub center: Hex,
    /// Radius of the generated disk.
    pub radius: u32,
    /// Preset id.
    pub preset: &'static str,
    /// One plan per hex in the disk, in generation order.
    pub stacks: Vec<StackPlan>,
    /// At most one plan per hex, none on hexes already holding assets.
    pub assets: Vec<AssetPlan>,
}

impl GeneratedTerrain {
    /// Merges the result into the stores.
    ///
    /// Each planned hex gets its stack replaced; hexes outside the disk are
    /// untouched. Assets are only added on hexes that still hold none.
    pub fn commit(
        self,
        seed: u64,
        tiles: &mut TileStackStore,
        assets: &mut AssetPlacementStore,
    ) -> GenerationSummary {
        let mut tile_count = 0;
        for plan in &self.stacks {
            tiles.replace_stack(plan.hex, plan.height, plan.kind, plan.depth);
            tile_count += plan.depth as usize;
        }
        let mut asset_count = 0;
        for plan in &self.assets {
            if assets.has_asset_at(plan.hex) {
                continue;
            }
            assets.add(plan.hex, plan.asset_type, plan.rotation_y, plan.scale);
            asset_count += 1;
        }
        GenerationSummary {
            seed,
            preset: self.preset.to_owned(),
            center: self.center,
            radius: self.radius,
            hexes: self.stacks.len(),
            tiles: tile_count,
            assets: asset_count,
        }
    }
}

/// Turns a noise height field and a preset into stack and asset plans.
pub struct TerrainSynthesizer<'a> {
    preset: &'a TerrainPreset,
    catalog: &'a AssetCatalog,
    noise: &'a NoiseSettings,
    max_radius: u32,
}

impl<'a> TerrainSynthesizer<'a> {
    /// Synthesizer for one preset.
    pub fn new(
        preset: &'a TerrainPreset,
        catalog: &'a AssetCatalog,
        noise: &'a NoiseSettings,
        max_radius: u32,
    ) -> Self {
        Self {
            preset,
            catalog,
            noise,
            max_radius,
        }
    }

    /// Plans terrain for the disk of `radius` around `center`.
    ///
    /// `existing` is only read, to keep generated assets off occupied hexes.
    /// All randomness comes from `rng`; the height field from `noise_seed`.
    pub fn synthesize<R: Rng>(
        &self,
        center: Hex,
        radius: u32,
        noise_seed: u32,
        existing: &AssetPlacementStore,
        rng: &mut R,
    ) -> Result<GeneratedTerrain, GenerationError> {
        if radius > self.max_radius {
            return Err(GenerationError::RadiusTooLarge {
                radius,
                max: self.max_radius,
            });
        }
        self.preset.validate()?;

        let heights = NoiseHeightField::new(noise_seed, self.noise).generate(center, radius);
        let stacks = self.plan_stacks(&heights, rng)?;
        let hexes: Vec<Hex> = stacks.iter().map(|s| s.hex).collect();
        let assets = self.plan_assets(&hexes, existing, rng);

        Ok(GeneratedTerrain {
            center,
            radius,
            preset: self.preset.id,
            stacks,
            assets,
        })
    }

    fn plan_stacks<R: Rng>(
        &self,
        heights: &HeightMap,
        rng: &mut R,
    ) -> Result<Vec<StackPlan>, GenerationError> {
        heights
            .iter()
            .map(|(hex, value)| {
                if !value.is_finite() {
                    return Err(GenerationError::NonFiniteHeight { hex });
                }
                let height = self.preset.height_distribution.select(unit(rng));
                Ok(StackPlan {
                    hex,
                    height,
                    kind: self.preset.ground,
                    depth: (value * DEPTH_SCALE).floor() as u32 + 1,
                })
            })
            .collect()
    }

    fn plan_assets<R: Rng>(
        &self,
        hexes: &[Hex],
        existing: &AssetPlacementStore,
        rng: &mut R,
    ) -> Vec<AssetPlan> {
        let mut taken: HashSet<Hex> = HashSet::new();
        let mut plans = Vec::new();

        for spawn in self.preset.asset_categories {
            if unit(rng) >= spawn.probability {
                debug!("{:?} skipped this generation", spawn.category);
                continue;
            }
            let definitions = self.catalog.in_category(spawn.category);
            let cluster_count = (hexes.len() as f32 * spawn.density).floor() as usize;
            if definitions.is_empty() || cluster_count == 0 {
                continue;
            }

            let centers: Vec<Hex> = (0..cluster_count)
                .map(|_| hexes[rng.gen_range(0..hexes.len())])
                .collect();
            let before = plans.len();

            for &hex in hexes {
                let Some(nearest) = centers.iter().map(|&c| hex_distance(c, hex)).min() else {
                    continue;
                };
                if unit(rng) >= inclusion_probability(spawn, nearest) {
                    continue;
                }
                let definition = definitions[rng.gen_range(0..definitions.len())];
                let rotation_y: f32 = rng.gen_range(0.0..TAU);
                let scale: f32 = rng.gen_range(ASSET_SCALE_RANGE);
                if existing.has_asset_at(hex) || !taken.insert(hex) {
                    continue;
                }
                plans.push(AssetPlan {
                    hex,
                    asset_type: definition.id,
                    rotation_y,
                    scale,
                });
            }

            debug!(
                "{:?}: {} clusters, {} assets",
                spawn.category,
                cluster_count,
                plans.len() - before
            );
        }
        plans
    }
}

/// Chance that a hex `distance` away from its nearest cluster center is used.
///
/// High clustering flattens the curve toward 1; low clustering falls off
/// linearly to 0 at [`CLUSTER_REACH`].
fn inclusion_probability(spawn: &CategorySpawn, distance: u32) -> f32 {
    let c = spawn.clustering;
    c + (1.0 - c) * (1.0 - distance as f32 / CLUSTER_REACH)
}

/// Uniform sample in `[0, 1)`.
fn unit<R: Rng>(rng: &mut R) -> f32 {
    rng.gen_range(0.0..1.0)
}
