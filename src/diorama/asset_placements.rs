use hexx::Hex;

use super::entities::PlacedAsset;

/// Smallest stored asset scale.
pub const MIN_ASSET_SCALE: f32 = 0.1;
/// Largest stored asset scale.
pub const MAX_ASSET_SCALE: f32 = 10.0;

/// Flat collection of placed assets in insertion order, keyed by id.
///
/// Every mutation addressed by id silently ignores unknown ids.
#[derive(Clone, Debug, Default)]
pub struct AssetPlacementStore {
    assets: Vec<PlacedAsset>,
    next_id: u64,
}

impl AssetPlacementStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    // ── Mutation ───────────────────────────────────────────────────

    /// Places `asset_type` on `hex` and returns the new id.
    ///
    /// The asset is ordered after those already on the hex; a non-finite
    /// rotation becomes `0` and the scale is clamped.
    pub fn add(&mut self, hex: Hex, asset_type: &str, rotation_y: f32, scale: f32) -> String {
        self.next_id += 1;
        let id = format!("asset-{}", self.next_id);
        let stack_level = self.count_at(hex);
        self.assets.push(PlacedAsset {
            id: id.clone(),
            hex,
            asset_type: asset_type.to_owned(),
            rotation_y: if rotation_y.is_finite() { rotation_y } else { 0.0 },
            scale: clamp_scale(scale),
            stack_level,
        });
        id
    }

    /// Removes the asset `id`; returns it if it existed.
    pub fn remove(&mut self, id: &str) -> Option<PlacedAsset> {
        let index = self.assets.iter().position(|a| a.id == id)?;
        Some(self.assets.remove(index))
    }

    /// Removes every asset anchored at `hex`, returning them.
    pub fn remove_all_at(&mut self, hex: Hex) -> Vec<PlacedAsset> {
        let (removed, kept): (Vec<PlacedAsset>, Vec<PlacedAsset>) = std::mem::take(&mut self.assets)
            .into_iter()
            .partition(|a| a.hex == hex);
        self.assets = kept;
        removed
    }

    /// Moves asset `id` to `hex`, ordering it after the assets already there.
    pub fn move_to(&mut self, id: &str, hex: Hex) -> bool {
        let stack_level = self.assets.iter().filter(|a| a.hex == hex && a.id != id).count() as u32;
        let Some(asset) = self.get_mut(id) else {
            return false;
        };
        asset.hex = hex;
        asset.stack_level = stack_level;
        true
    }

    /// Adds `delta` radians to the rotation of asset `id`.
    ///
    /// The stored value is not wrapped; use [`crate::math::wrap_angle`] for display.
    pub fn rotate(&mut self, id: &str, delta: f32) -> bool {
        if !delta.is_finite() {
            return false;
        }
        let Some(asset) = self.get_mut(id) else {
            return false;
        };
        asset.rotation_y += delta;
        true
    }

    /// Adds `delta` to the scale of asset `id`, clamped to the allowed range.
    pub fn adjust_scale(&mut self, id: &str, delta: f32) -> bool {
        let Some(asset) = self.get_mut(id) else {
            return false;
        };
        asset.scale = clamp_scale(asset.scale + delta);
        true
    }

    // ── Queries ────────────────────────────────────────────────────

    /// Asset by id.
    pub fn get(&self, id: &str) -> Option<&PlacedAsset> {
        self.assets.iter().find(|a| a.id == id)
    }

    /// Assets anchored at `hex`, in placement order.
    pub fn assets_at(&self, hex: Hex) -> impl Iterator<Item = &PlacedAsset> {
        self.assets.iter().filter(move |a| a.hex == hex)
    }

    /// Whether at least one asset sits on `hex`.
    pub fn has_asset_at(&self, hex: Hex) -> bool {
        self.assets.iter().any(|a| a.hex == hex)
    }

    /// Snapshot iteration in placement order.
    pub fn iter(&self) -> impl Iterator<Item = &PlacedAsset> {
        self.assets.iter()
    }

    /// Number of placed assets.
    pub fn len(&self) -> usize {
        self.assets.len()
    }

    /// Whether no asset is placed.
    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    fn count_at(&self, hex: Hex) -> u32 {
        self.assets_at(hex).count() as u32
    }

    fn get_mut(&mut self, id: &str) -> Option<&mut PlacedAsset> {
        self.assets.iter_mut().find(|a| a.id == id)
    }
}

/// Clamps a scale into `[MIN_ASSET_SCALE, MAX_ASSET_SCALE]`; NaN becomes `1`.
fn clamp_scale(scale: f32) -> f32 {
    if scale.is_nan() {
        return 1.0;
    }
    scale.clamp(MIN_ASSET_SCALE, MAX_ASSET_SCALE)
}
