#![warn(missing_docs)]
//! Hex diorama core: stacked hex tiles and decorative assets on a tabletop,
//! with procedural terrain generation, terrain analysis and placement advice.
//!
//! Everything is synchronous and owned by one [`Diorama`] value; the
//! [`DioramaPlugin`] exposes it to a bevy app as a resource.

pub mod advisor;
pub mod analysis;
pub mod diorama;
pub mod hex;
pub mod math;
pub mod terrain;

pub use diorama::{Diorama, DioramaConfig, DioramaPlugin};
