//! Hex coordinate system: axial ↔ world mapping and cube rounding.
//!
//! Cells are addressed with [`hexx::Hex`] in axial form (`x = q`, `y = r`,
//! implied `s = -q - r`). The world transform is pointy-top with the hex size
//! as the only parameter; vertical placement is half a unit per height unit.

use bevy::prelude::*;
use hexx::Hex;

/// `√3`, spelled out because the std constant is not stable for `f32`.
const SQRT_3: f32 = 1.732_050_8;

/// World-space height of one tile height unit.
pub const HEIGHT_UNIT: f32 = 0.5;

/// The six axial neighbor offsets, in fixed order.
pub const NEIGHBOR_DIRECTIONS: [Hex; 6] = [
    Hex { x: 1, y: 0 },
    Hex { x: 1, y: -1 },
    Hex { x: 0, y: -1 },
    Hex { x: -1, y: 0 },
    Hex { x: -1, y: 1 },
    Hex { x: 0, y: 1 },
];

/// Axial ↔ world conversion for a given hex size.
#[derive(Clone, Copy, Debug, PartialEq, Reflect)]
pub struct HexMetrics {
    /// Center-to-corner distance of a hex in world units.
    pub size: f32,
}

impl Default for HexMetrics {
    fn default() -> Self {
        Self { size: 1.0 }
    }
}

impl HexMetrics {
    /// Metrics for hexes of the given world size.
    pub fn new(size: f32) -> Self {
        Self { size }
    }

    /// World position of a hex center raised by `height_units` tile units.
    pub fn axial_to_world(&self, hex: Hex, height_units: u32) -> Vec3 {
        let q = hex.x as f32;
        let r = hex.y as f32;
        Vec3::new(
            self.size * (SQRT_3 * q + SQRT_3 / 2.0 * r),
            height_units as f32 * HEIGHT_UNIT,
            self.size * (1.5 * r),
        )
    }

    /// Snaps a world-space `(x, z)` point to the hex containing it.
    pub fn world_to_axial(&self, x: f32, z: f32) -> Hex {
        let q = (SQRT_3 / 3.0 * x - z / 3.0) / self.size;
        let r = (2.0 / 3.0 * z) / self.size;
        cube_round(q, r)
    }
}

/// Rounds fractional axial coordinates to the nearest hex.
///
/// Cube rounding: the component with the largest rounding error is rebuilt
/// from the other two so that `q + r + s == 0`.
pub fn cube_round(q: f32, r: f32) -> Hex {
    Hex::round([q, r])
}

/// The six neighbors of `hex`, in [`NEIGHBOR_DIRECTIONS`] order.
///
/// Coordinates wrap at the `i32` limits.
pub fn neighbors(hex: Hex) -> [Hex; 6] {
    NEIGHBOR_DIRECTIONS.map(|dir| Hex::new(hex.x.wrapping_add(dir.x), hex.y.wrapping_add(dir.y)))
}

/// Hex (cube) distance between two cells.
pub fn hex_distance(a: Hex, b: Hex) -> u32 {
    a.distance_to(b).unsigned_abs()
}

/// Canonical `"q,r"` key for a hex, the format used when cells are keyed outside the crate.
pub fn hex_key(hex: Hex) -> String {
    format!("{},{}", hex.x, hex.y)
}

/// Parses a `"q,r"` key back into a hex.
pub fn parse_hex_key(key: &str) -> Option<Hex> {
    let (q, r) = key.split_once(',')?;
    Some(Hex::new(q.trim().parse().ok()?, r.trim().parse().ok()?))
}

/// Every hex in the axial square `[center - radius, center + radius]²`.
///
/// This is a square over axial space, not a hex disk: its corners lie
/// further than `radius` from `center`.
/// Coordinates past the `i32` range are left out.
pub fn square_region(center: Hex, radius: u32) -> impl Iterator<Item = Hex> {
    let span = move |c: i32| {
        let lo = (i64::from(c) - i64::from(radius)).max(i64::from(i32::MIN)) as i32;
        let hi = (i64::from(c) + i64::from(radius)).min(i64::from(i32::MAX)) as i32;
        lo..=hi
    };
    let rows = span(center.y);
    span(center.x).flat_map(move |q| rows.clone().map(move |r| Hex::new(q, r)))
}
