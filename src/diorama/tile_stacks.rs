use bevy::platform::collections::HashMap;
use hexx::Hex;

use super::entities::{Tile, TileHeight, TileType};

/// Per-hex tile stacks, bottom tile first.
///
/// A hex without tiles has no entry at all; stacks are created by the first
/// [`add_tile`](Self::add_tile) and dropped when their last tile goes.
#[derive(Clone, Debug, Default)]
pub struct TileStackStore {
    stacks: HashMap<Hex, Vec<Tile>>,
    next_id: u64,
}

impl TileStackStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    // ── Mutation ───────────────────────────────────────────────────

    /// Appends a tile on top of the stack at `hex` and returns its id.
    pub fn add_tile(&mut self, hex: Hex, height: TileHeight, kind: TileType) -> String {
        let id = self.allocate_id();
        let stack = self.stacks.entry(hex).or_default();
        let stack_level = stack.len() as u32;
        stack.push(Tile {
            id: id.clone(),
            hex,
            height,
            kind,
            stack_level,
        });
        id
    }

    /// Removes the tile `id` from the stack at `hex`.
    ///
    /// Tiles above it move down one level. Returns `false` (and changes
    /// nothing) when no such tile exists.
    pub fn remove_tile(&mut self, id: &str, hex: Hex) -> bool {
        let Some(stack) = self.stacks.get_mut(&hex) else {
            return false;
        };
        let Some(index) = stack.iter().position(|t| t.id == id) else {
            return false;
        };
        stack.remove(index);
        if stack.is_empty() {
            self.stacks.remove(&hex);
        } else {
            renumber(stack);
        }
        true
    }

    /// Drops the whole stack at `hex`, returning its tiles bottom first.
    ///
    /// Assets on the hex are not touched; see
    /// [`Diorama::remove_all_at`](crate::diorama::Diorama::remove_all_at) for
    /// the cascading variant.
    pub fn remove_stack(&mut self, hex: Hex) -> Vec<Tile> {
        self.stacks.remove(&hex).unwrap_or_default()
    }

    /// Replaces the stack at `hex` with `depth` tiles of one height and type.
    ///
    /// A zero depth clears the hex.
    pub fn replace_stack(&mut self, hex: Hex, height: TileHeight, kind: TileType, depth: u32) {
        self.stacks.remove(&hex);
        for _ in 0..depth {
            self.add_tile(hex, height, kind);
        }
    }

    // ── Queries ────────────────────────────────────────────────────

    /// Tiles at `hex`, bottom first; empty for an unoccupied hex.
    pub fn tiles_at(&self, hex: Hex) -> &[Tile] {
        self.stacks.get(&hex).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Sum of tile heights at `hex` in tile units; `0` when unoccupied.
    pub fn total_height_at(&self, hex: Hex) -> u32 {
        self.tiles_at(hex).iter().map(|t| t.height.units()).sum()
    }

    /// Whether any tile stands on `hex`.
    pub fn is_occupied(&self, hex: Hex) -> bool {
        self.stacks.contains_key(&hex)
    }

    /// Number of occupied hexes.
    pub fn hex_count(&self) -> usize {
        self.stacks.len()
    }

    /// Number of tiles across all stacks.
    pub fn tile_count(&self) -> usize {
        self.stacks.values().map(Vec::len).sum()
    }

    /// Snapshot iteration over every occupied hex and its stack.
    pub fn stacks(&self) -> impl Iterator<Item = (Hex, &[Tile])> {
        self.stacks.iter().map(|(hex, stack)| (*hex, stack.as_slice()))
    }

    /// Snapshot iteration over every tile.
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.stacks.values().flatten()
    }

    fn allocate_id(&mut self) -> String {
        self.next_id += 1;
        format!("tile-{}", self.next_id)
    }
}

fn renumber(stack: &mut [Tile]) {
    for (level, tile) in stack.iter_mut().enumerate() {
        tile.stack_level = level as u32;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn levels(store: &TileStackStore, hex: Hex) -> Vec<u32> {
        store.tiles_at(hex).iter().map(|t| t.stack_level).collect()
    }

    #[test]
    fn two_tiles_stack_in_order() {
        let mut store = TileStackStore::new();
        store.add_tile(Hex::ZERO, TileHeight::One, TileType::Ground);
        store.add_tile(Hex::ZERO, TileHeight::Two, TileType::Ground);

        let tiles = store.tiles_at(Hex::ZERO);
        assert_eq!(tiles.len(), 2);
        assert_eq!((tiles[0].height, tiles[0].stack_level), (TileHeight::One, 0));
        assert_eq!((tiles[1].height, tiles[1].stack_level), (TileHeight::Two, 1));
        assert_eq!(store.total_height_at(Hex::ZERO), 3);
    }

    #[test]
    fn ids_are_unique() {
        let mut store = TileStackStore::new();
        let a = store.add_tile(Hex::ZERO, TileHeight::One, TileType::Ground);
        let b = store.add_tile(Hex::new(1, 0), TileHeight::One, TileType::Ground);
        let c = store.add_tile(Hex::ZERO, TileHeight::One, TileType::Ground);
        assert_ne!(a, b);
        assert_ne!(a, c);
        assert_ne!(b, c);
    }

    #[test]
    fn removing_bottom_tile_compacts_levels() {
        let mut store = TileStackStore::new();
        let first = store.add_tile(Hex::ZERO, TileHeight::One, TileType::Ground);
        let second = store.add_tile(Hex::ZERO, TileHeight::Two, TileType::Water);
        let third = store.add_tile(Hex::ZERO, TileHeight::Five, TileType::Mud);

        assert!(store.remove_tile(&first, Hex::ZERO));

        let tiles = store.tiles_at(Hex::ZERO);
        assert_eq!(tiles[0].id, second);
        assert_eq!(tiles[1].id, third);
        assert_eq!(levels(&store, Hex::ZERO), vec![0, 1]);
    }

    #[test]
    fn levels_stay_contiguous_under_mixed_edits() {
        let mut store = TileStackStore::new();
        let hex = Hex::new(2, -1);
        let mut ids = Vec::new();
        for i in 0..8 {
            let h = TileHeight::ALL[i % 3];
            ids.push(store.add_tile(hex, h, TileType::Ground));
        }
        for id in [&ids[3], &ids[0], &ids[7]] {
            assert!(store.remove_tile(id, hex));
            let n = store.tiles_at(hex).len() as u32;
            assert_eq!(levels(&store, hex), (0..n).collect::<Vec<_>>());
        }
        store.add_tile(hex, TileHeight::Two, TileType::Ground);
        assert_eq!(levels(&store, hex), (0..6).collect::<Vec<_>>());
    }

    #[test]
    fn removing_last_tile_drops_the_key() {
        let mut store = TileStackStore::new();
        let id = store.add_tile(Hex::new(1, 1), TileHeight::Two, TileType::Ground);
        assert!(store.remove_tile(&id, Hex::new(1, 1)));
        assert!(store.tiles_at(Hex::new(1, 1)).is_empty());
        assert!(!store.is_occupied(Hex::new(1, 1)));
        assert_eq!(store.hex_count(), 0);
    }

    #[test]
    fn removing_unknown_tile_is_a_noop() {
        let mut store = TileStackStore::new();
        assert!(!store.remove_tile("tile-99", Hex::ZERO));
        let id = store.add_tile(Hex::ZERO, TileHeight::One, TileType::Ground);
        assert!(!store.remove_tile(&id, Hex::new(5, 5)));
        assert!(!store.remove_tile("tile-99", Hex::ZERO));
        assert_eq!(store.tile_count(), 1);
    }

    #[test]
    fn total_height_is_sum_of_tiles() {
        let mut store = TileStackStore::new();
        let hex = Hex::new(-2, 4);
        for h in [TileHeight::Five, TileHeight::One, TileHeight::Two, TileHeight::Five] {
            store.add_tile(hex, h, TileType::Ground);
        }
        let sum: u32 = store.tiles_at(hex).iter().map(|t| t.height.units()).sum();
        assert_eq!(store.total_height_at(hex), sum);
        assert_eq!(sum, 13);
        assert_eq!(store.total_height_at(Hex::new(40, 40)), 0);
    }

    #[test]
    fn replace_stack_overwrites_existing_tiles() {
        let mut store = TileStackStore::new();
        store.add_tile(Hex::ZERO, TileHeight::Five, TileType::Water);
        store.replace_stack(Hex::ZERO, TileHeight::Two, TileType::Ground, 3);
        assert_eq!(levels(&store, Hex::ZERO), vec![0, 1, 2]);
        assert_eq!(store.total_height_at(Hex::ZERO), 6);

        store.replace_stack(Hex::ZERO, TileHeight::Two, TileType::Ground, 0);
        assert!(!store.is_occupied(Hex::ZERO));
    }

    #[test]
    fn remove_stack_returns_tiles() {
        let mut store = TileStackStore::new();
        store.add_tile(Hex::ZERO, TileHeight::One, TileType::Ground);
        store.add_tile(Hex::ZERO, TileHeight::One, TileType::Ground);
        assert_eq!(store.remove_stack(Hex::ZERO).len(), 2);
        assert!(store.remove_stack(Hex::ZERO).is_empty());
    }
}
