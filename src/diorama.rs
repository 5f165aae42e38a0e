//! Diorama state: tile stacks, placed assets, tool state, and the commands
//! the editor issues against them.

mod asset_placements;
mod catalog;
mod entities;
mod systems;
mod tile_stacks;

pub use asset_placements::{AssetPlacementStore, MAX_ASSET_SCALE, MIN_ASSET_SCALE};
pub use catalog::{AssetCatalog, AssetCategory, AssetDefinition, DEFAULT_ASSETS, IMPORTED_PREFIX};
pub use entities::{PlacedAsset, Tile, TileHeight, TileType};
pub use systems::{GenerateTerrain, TerrainGenerated, handle_generation_requests};
pub use tile_stacks::TileStackStore;

use bevy::log::{debug, info, warn};
use bevy::prelude::*;
use hexx::Hex;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::advisor::{self, PlacementSuggestion};
use crate::analysis::{self, TerrainAnalysis};
use crate::hex::HexMetrics;
use crate::terrain::{
    GenerationError, GenerationSummary, NoiseSettings, TerrainSynthesizer, find_preset,
};

/// Top-level configuration.
#[derive(Resource, Clone, Debug, Reflect)]
pub struct DioramaConfig {
    /// World size of one hex (center to corner).
    pub hex_size: f32,
    /// Terrain generation settings.
    pub generation: GenerationSettings,
    /// Square radius used by [`Diorama::analyze_terrain`].
    pub analysis_radius: u32,
}

/// Terrain generation parameters.
#[derive(Clone, Debug, Reflect)]
pub struct GenerationSettings {
    /// Seed of the diorama's random source.
    pub seed: u64,
    /// Radius used when a request does not name one.
    pub default_radius: u32,
    /// Largest radius a request may ask for.
    pub max_radius: u32,
    /// Id of the preset used for generation.
    pub preset: String,
    /// Layered noise parameters.
    pub noise: NoiseSettings,
}

impl Default for DioramaConfig {
    fn default() -> Self {
        Self {
            hex_size: 1.0,
            generation: GenerationSettings {
                seed: 42,
                default_radius: 5,
                max_radius: 15,
                preset: "forest".to_owned(),
                noise: NoiseSettings::default(),
            },
            analysis_radius: 10,
        }
    }
}

/// The whole editable diorama.
///
/// Owns both stores; every command runs to completion before the next one
/// observes the stores, so multi-store operations appear atomic.
#[derive(Resource)]
pub struct Diorama {
    config: DioramaConfig,
    metrics: HexMetrics,
    catalog: AssetCatalog,
    tiles: TileStackStore,
    assets: AssetPlacementStore,
    rng: ChaCha8Rng,
    pending_asset: Option<String>,
    generating: bool,
}

impl Diorama {
    /// Empty diorama with the built-in catalog.
    pub fn new(config: DioramaConfig) -> Self {
        Self::with_catalog(config, AssetCatalog::default())
    }

    /// Empty diorama with a custom catalog.
    pub fn with_catalog(config: DioramaConfig, catalog: AssetCatalog) -> Self {
        Self {
            metrics: HexMetrics::new(config.hex_size),
            rng: ChaCha8Rng::seed_from_u64(config.generation.seed),
            config,
            catalog,
            tiles: TileStackStore::new(),
            assets: AssetPlacementStore::new(),
            pending_asset: None,
            generating: false,
        }
    }

    // ── Read access ────────────────────────────────────────────────

    /// Active configuration.
    pub fn config(&self) -> &DioramaConfig {
        &self.config
    }

    /// Hex ↔ world mapping.
    pub fn metrics(&self) -> &HexMetrics {
        &self.metrics
    }

    /// Asset catalog.
    pub fn catalog(&self) -> &AssetCatalog {
        &self.catalog
    }

    /// Tile stacks, read-only.
    pub fn tiles(&self) -> &TileStackStore {
        &self.tiles
    }

    /// Placed assets, read-only.
    pub fn assets(&self) -> &AssetPlacementStore {
        &self.assets
    }

    /// Tiles at `hex`, bottom first.
    pub fn tiles_at(&self, hex: Hex) -> &[Tile] {
        self.tiles.tiles_at(hex)
    }

    /// Summed tile height at `hex`.
    pub fn total_height_at(&self, hex: Hex) -> u32 {
        self.tiles.total_height_at(hex)
    }

    /// World position of the placement surface on top of `hex`'s stack.
    pub fn surface_position(&self, hex: Hex) -> Vec3 {
        self.metrics.axial_to_world(hex, self.total_height_at(hex))
    }

    /// Whether a generation is running.
    pub fn is_generating(&self) -> bool {
        self.generating
    }

    /// Asset type a following [`place_pending_at`](Self::place_pending_at) would place.
    pub fn pending_asset(&self) -> Option<&str> {
        self.pending_asset.as_deref()
    }

    // ── Tile commands ──────────────────────────────────────────────

    /// Stacks a tile on `hex`; returns its id.
    pub fn add_tile(&mut self, hex: Hex, height: TileHeight, kind: TileType) -> String {
        self.tiles.add_tile(hex, height, kind)
    }

    /// Removes tile `id` from `hex`; unknown tiles are ignored.
    pub fn remove_tile(&mut self, id: &str, hex: Hex) {
        if !self.tiles.remove_tile(id, hex) {
            debug!("remove_tile: no tile {id} at ({}, {})", hex.x, hex.y);
        }
    }

    /// Clears the stack at `hex` together with every asset standing on it.
    pub fn remove_all_at(&mut self, hex: Hex) {
        let tiles = self.tiles.remove_stack(hex);
        let assets = self.assets.remove_all_at(hex);
        debug!(
            "cleared ({}, {}): {} tiles, {} assets",
            hex.x,
            hex.y,
            tiles.len(),
            assets.len()
        );
    }

    // ── Asset commands ─────────────────────────────────────────────

    /// Places `asset_type` on `hex`.
    ///
    /// Returns `None` without placing anything when the type is neither in
    /// the catalog nor an `imported-` id.
    pub fn add_asset(
        &mut self,
        hex: Hex,
        asset_type: &str,
        rotation_y: f32,
        scale: f32,
    ) -> Option<String> {
        if !self.catalog.is_placeable(asset_type) {
            warn!("ignoring unknown asset type '{asset_type}'");
            return None;
        }
        Some(self.assets.add(hex, asset_type, rotation_y, scale))
    }

    /// Removes asset `id`; unknown ids are ignored.
    pub fn remove_asset(&mut self, id: &str) {
        self.assets.remove(id);
    }

    /// Moves asset `id` to `hex`.
    pub fn move_asset(&mut self, id: &str, hex: Hex) {
        self.assets.move_to(id, hex);
    }

    /// Rotates asset `id` by `delta` radians.
    pub fn rotate_asset(&mut self, id: &str, delta: f32) {
        self.assets.rotate(id, delta);
    }

    /// Changes the scale of asset `id` by `delta`, clamped.
    pub fn adjust_asset_scale(&mut self, id: &str, delta: f32) {
        self.assets.adjust_scale(id, delta);
    }

    // ── Tool state ─────────────────────────────────────────────────

    /// Arms the asset tool with a suggestion's asset type.
    ///
    /// Nothing is placed until [`place_pending_at`](Self::place_pending_at).
    pub fn apply_suggestion(&mut self, suggestion: &PlacementSuggestion) {
        self.select_asset(&suggestion.asset_type);
    }

    /// Arms the asset tool with `asset_type`.
    pub fn select_asset(&mut self, asset_type: &str) {
        self.pending_asset = Some(asset_type.to_owned());
    }

    /// Disarms the asset tool.
    pub fn clear_pending(&mut self) {
        self.pending_asset = None;
    }

    /// Places the armed asset type on `hex` through [`add_asset`](Self::add_asset).
    ///
    /// The selection stays armed for repeated placement.
    pub fn place_pending_at(&mut self, hex: Hex) -> Option<String> {
        let asset_type = self.pending_asset.clone()?;
        self.add_asset(hex, &asset_type, 0.0, 1.0)
    }

    // ── Generation ─────────────────────────────────────────────────

    /// Generates terrain around `center` with a seed drawn from the
    /// diorama's random source.
    pub fn generate_terrain(&mut self, center: Hex, radius: u32) -> Option<GenerationSummary> {
        let seed = self.rng.r#gen::<u64>();
        self.generate_terrain_seeded(center, radius, seed)
    }

    /// Generates terrain around `center` from an explicit seed.
    ///
    /// Identical store contents and seed give identical results. On failure
    /// nothing is merged, the error is logged and `None` is returned.
    pub fn generate_terrain_seeded(
        &mut self,
        center: Hex,
        radius: u32,
        seed: u64,
    ) -> Option<GenerationSummary> {
        self.generating = true;
        let result = self.run_generation(center, radius, seed);
        self.generating = false;

        match result {
            Ok(summary) => {
                info!(
                    "generated '{}' at ({}, {}) r={}: {} hexes, {} tiles, {} assets (seed {})",
                    summary.preset,
                    center.x,
                    center.y,
                    radius,
                    summary.hexes,
                    summary.tiles,
                    summary.assets,
                    seed
                );
                Some(summary)
            }
            Err(err) => {
                warn!("terrain generation failed: {err}");
                None
            }
        }
    }

    fn run_generation(
        &mut self,
        center: Hex,
        radius: u32,
        seed: u64,
    ) -> Result<GenerationSummary, GenerationError> {
        let settings = &self.config.generation;
        let preset = find_preset(&settings.preset)
            .ok_or_else(|| GenerationError::UnknownPreset(settings.preset.clone()))?;
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let generated = TerrainSynthesizer::new(
            preset,
            &self.catalog,
            &settings.noise,
            settings.max_radius,
        )
        .synthesize(center, radius, noise_seed(seed), &self.assets, &mut rng)?;
        Ok(generated.commit(seed, &mut self.tiles, &mut self.assets))
    }

    /// Switches the preset used by later generations.
    pub fn set_preset(&mut self, id: &str) {
        self.config.generation.preset = id.to_owned();
    }

    // ── Analysis ───────────────────────────────────────────────────

    /// Analyzes the configured square region around the table center.
    pub fn analyze_terrain(&self) -> TerrainAnalysis {
        self.analyze_region(Hex::ZERO, self.config.analysis_radius)
    }

    /// Analyzes the square region of `radius` around `center`.
    pub fn analyze_region(&self, center: Hex, radius: u32) -> TerrainAnalysis {
        analysis::analyze(&self.tiles, &self.assets, center, radius)
    }

    /// Ranked asset suggestions for `hex`.
    pub fn placement_suggestions(&self, hex: Hex) -> Vec<PlacementSuggestion> {
        advisor::suggest(&self.tiles, &self.assets, &self.catalog, hex)
    }
}

impl Default for Diorama {
    fn default() -> Self {
        Self::new(DioramaConfig::default())
    }
}

/// Folds a 64-bit generation seed into the 32-bit noise seed.
fn noise_seed(seed: u64) -> u32 {
    (seed ^ (seed >> 32)) as u32
}

/// Registers the diorama resource and its generation messages.
pub struct DioramaPlugin(pub DioramaConfig);

impl Plugin for DioramaPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<DioramaConfig>()
            .register_type::<Tile>()
            .register_type::<PlacedAsset>()
            .insert_resource(self.0.clone())
            .insert_resource(Diorama::new(self.0.clone()))
            .add_message::<GenerateTerrain>()
            .add_message::<TerrainGenerated>()
            .add_systems(Update, systems::handle_generation_requests);
    }
}
