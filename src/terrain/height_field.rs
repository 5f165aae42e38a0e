use hexx::{Hex, shapes};
use noise::{Fbm, MultiFractal, NoiseFn, Perlin};

use super::NoiseSettings;
use crate::hex::hex_distance;
use crate::math;

/// `√3` in noise-space precision.
const SQRT_3: f64 = 1.732_050_807_568_877_2;

/// Seeded layered-noise height source over hex cells.
///
/// Sampling is pure: the same seed and settings give the same value for the
/// same hex on every call and on every instance.
pub struct NoiseHeightField {
    fbm: Fbm<Perlin>,
}

impl NoiseHeightField {
    /// Builds the noise stack for `seed`.
    pub fn new(seed: u32, settings: &NoiseSettings) -> Self {
        let fbm = Fbm::<Perlin>::new(seed)
            .set_octaves(settings.octaves)
            .set_frequency(settings.base_frequency)
            .set_lacunarity(settings.lacunarity)
            .set_persistence(settings.persistence);
        Self { fbm }
    }

    /// Noise-space sample point of a hex.
    ///
    /// Deliberately not the render transform, so noise frequency does not
    /// follow the hex size.
    pub fn sample_point(hex: Hex) -> [f64; 2] {
        let q = f64::from(hex.x);
        let r = f64::from(hex.y);
        let column_offset = f64::from(hex.x.rem_euclid(2)) * SQRT_3 / 2.0;
        [q * 1.5, r * SQRT_3 + column_offset]
    }

    /// Raw layered noise at a hex, roughly in `[-1, 1]`.
    pub fn raw(&self, hex: Hex) -> f64 {
        self.fbm.get(Self::sample_point(hex))
    }

    /// Noise at a hex normalized to `[0, 1]`, without falloff.
    pub fn height(&self, hex: Hex) -> f32 {
        math::map_noise_to_range(self.raw(hex), 0.0, 1.0).clamp(0.0, 1.0)
    }

    /// Heights for every hex within `radius` of `center`, scaled by a linear
    /// radial falloff so the region fades to zero at its rim.
    pub fn generate(&self, center: Hex, radius: u32) -> HeightMap {
        let samples = shapes::hexagon(center, radius)
            .map(|hex| {
                let falloff = math::radial_falloff(hex_distance(center, hex) as f32, radius as f32);
                (hex, self.height(hex) * falloff)
            })
            .collect();
        HeightMap { center, radius, samples }
    }
}

/// Per-hex heights over a generated disk, in generation order.
#[derive(Clone, Debug, PartialEq)]
pub struct HeightMap {
    /// Center of the disk.
    pub center: Hex,
    /// Radius of the disk.
    pub radius: u32,
    samples: Vec<(Hex, f32)>,
}

impl HeightMap {
    /// Height at `hex`, if it lies in the disk.
    pub fn get(&self, hex: Hex) -> Option<f32> {
        self.samples.iter().find(|(h, _)| *h == hex).map(|(_, v)| *v)
    }

    /// All samples in generation order.
    pub fn iter(&self) -> impl Iterator<Item = (Hex, f32)> + '_ {
        self.samples.iter().copied()
    }

    /// Number of hexes in the disk.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the map holds no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(seed: u32) -> NoiseHeightField {
        NoiseHeightField::new(seed, &NoiseSettings::default())
    }

    #[test]
    fn same_seed_gives_identical_heights() {
        let a = field(1234);
        let b = field(1234);
        for hex in shapes::hexagon(Hex::new(3, -7), 6) {
            let first = a.height(hex);
            assert_eq!(first, a.height(hex), "repeat call differs at {hex:?}");
            assert_eq!(first, b.height(hex), "second instance differs at {hex:?}");
        }
    }

    #[test]
    fn different_seeds_differ_somewhere() {
        let a = field(1);
        let b = field(2);
        let differs = shapes::hexagon(Hex::ZERO, 8).any(|hex| a.raw(hex) != b.raw(hex));
        assert!(differs);
    }

    #[test]
    fn heights_are_normalized() {
        let f = field(77);
        for hex in shapes::hexagon(Hex::ZERO, 15) {
            let h = f.height(hex);
            assert!((0.0..=1.0).contains(&h), "height {h} at {hex:?}");
        }
    }

    #[test]
    fn generated_disk_has_falloff_and_containment() {
        let f = field(9);
        let map = f.generate(Hex::new(2, 2), 5);
        assert!(!map.is_empty());
        assert_eq!(map.len(), shapes::hexagon(Hex::ZERO, 5).count());
        for (hex, value) in map.iter() {
            let d = hex_distance(Hex::new(2, 2), hex);
            assert!(d <= 5);
            if d == 5 {
                assert_eq!(value, 0.0, "rim hex {hex:?} should be flat");
            }
            assert!(value <= f.height(hex) + 1e-6);
        }
        assert_eq!(map.get(Hex::new(2, 2)), Some(f.height(Hex::new(2, 2))));
        assert_eq!(map.get(Hex::new(20, 20)), None);
    }

    #[test]
    fn zero_radius_disk_is_the_center_alone() {
        let f = field(3);
        let map = f.generate(Hex::new(-4, 1), 0);
        assert!(!map.is_empty());
        assert_eq!(map.len(), 1);
        assert_eq!(map.get(Hex::new(-4, 1)), Some(f.height(Hex::new(-4, 1))));
    }

    #[test]
    fn sample_point_offsets_odd_columns() {
        let even = NoiseHeightField::sample_point(Hex::new(2, 1));
        let odd = NoiseHeightField::sample_point(Hex::new(3, 1));
        assert!((even[0] - 3.0).abs() < 1e-12);
        assert!((even[1] - SQRT_3).abs() < 1e-12);
        assert!((odd[1] - (SQRT_3 + SQRT_3 / 2.0)).abs() < 1e-12);
        let negative_odd = NoiseHeightField::sample_point(Hex::new(-1, 0));
        assert!((negative_odd[1] - SQRT_3 / 2.0).abs() < 1e-12);
    }
}
