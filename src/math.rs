//! Pure computation helpers extracted for testability.
//!
//! All functions in this module are free of store and ECS dependencies and
//! operate on plain numeric inputs, making them straightforward to unit-test.

use std::f32::consts::TAU;

/// Maps a noise value from the standard `[-1, 1]` range into `[min, max]`.
///
/// Noise generators (e.g. `Fbm<Perlin>`) produce values centred around zero.
/// This linearly rescales to an arbitrary output range. Values outside
/// `[-1, 1]` map outside `[min, max]`; callers clamp when they need to.
///
/// # Examples
/// ```
/// # use hex_diorama::math::map_noise_to_range;
/// assert_eq!(map_noise_to_range(-1.0, 0.0, 10.0), 0.0);
/// assert_eq!(map_noise_to_range( 1.0, 0.0, 10.0), 10.0);
/// assert_eq!(map_noise_to_range( 0.0, 2.0, 6.0),  4.0);
/// ```
pub fn map_noise_to_range(noise_val: f64, min: f32, max: f32) -> f32 {
    min + ((noise_val as f32 + 1.0) / 2.0) * (max - min)
}

/// Linear radial falloff: `1` at the center, `0` at and beyond `radius`.
///
/// A zero radius only keeps the center itself.
pub fn radial_falloff(distance: f32, radius: f32) -> f32 {
    if radius <= 0.0 {
        return if distance <= 0.0 { 1.0 } else { 0.0 };
    }
    (1.0 - distance / radius).max(0.0)
}

/// Wraps an unbounded rotation (radians) into `[0, 2π)` for display.
pub fn wrap_angle(radians: f32) -> f32 {
    let wrapped = radians.rem_euclid(TAU);
    // rem_euclid can round up to TAU for tiny negative inputs
    if wrapped >= TAU { 0.0 } else { wrapped }
}

/// Arithmetic mean; `0.0` for an empty slice.
pub fn mean(values: &[f32]) -> f32 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f32>() / values.len() as f32
}

/// Mean squared deviation from `mean` (population variance); `0.0` when empty.
pub fn mean_squared_deviation(values: &[f32], mean: f32) -> f32 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().map(|v| (v - mean).powi(2)).sum::<f32>() / values.len() as f32
}
