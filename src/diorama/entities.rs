//! Record types owned by the diorama stores.

use bevy::prelude::*;
use hexx::Hex;

/// Height class of a single tile, in tile height units.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Reflect)]
pub enum TileHeight {
    /// Thin tile (1 unit).
    One,
    /// Standard tile (2 units).
    Two,
    /// Tall block (5 units).
    Five,
}

impl TileHeight {
    /// All height classes, lowest first.
    pub const ALL: [TileHeight; 3] = [TileHeight::One, TileHeight::Two, TileHeight::Five];

    /// Height in tile units.
    pub fn units(self) -> u32 {
        match self {
            Self::One => 1,
            Self::Two => 2,
            Self::Five => 5,
        }
    }
}

/// Surface material of a tile.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Reflect)]
pub enum TileType {
    /// Plain ground.
    #[default]
    Ground,
    /// Water surface.
    Water,
    /// Mud / marsh.
    Mud,
}

impl TileType {
    /// Lowercase identifier (`"ground"`, `"water"`, `"mud"`).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ground => "ground",
            Self::Water => "water",
            Self::Mud => "mud",
        }
    }
}

/// One tile inside a hex stack.
///
/// `stack_level` is the tile's index in its stack and is rewritten whenever
/// the stack changes.
#[derive(Clone, Debug, PartialEq, Reflect)]
pub struct Tile {
    /// Unique id (`tile-N`).
    pub id: String,
    /// Hex the tile's stack belongs to.
    pub hex: Hex,
    /// Height class.
    pub height: TileHeight,
    /// Surface type.
    pub kind: TileType,
    /// Zero-based position in the stack, bottom first.
    pub stack_level: u32,
}

/// A decorative asset placed on a hex.
///
/// `stack_level` only orders assets sharing a hex; it never offsets them
/// vertically.
#[derive(Clone, Debug, PartialEq, Reflect)]
pub struct PlacedAsset {
    /// Unique id (`asset-N`).
    pub id: String,
    /// Anchor hex.
    pub hex: Hex,
    /// Catalog id or `imported-` id.
    pub asset_type: String,
    /// Rotation around the vertical axis in radians, unbounded.
    pub rotation_y: f32,
    /// Uniform scale, kept in `[MIN_ASSET_SCALE, MAX_ASSET_SCALE]`.
    pub scale: f32,
    /// Ordering among assets on the same hex.
    pub stack_level: u32,
}
