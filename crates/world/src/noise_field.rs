//! Terrain noise collaborator.
//!
//! Resource generation only needs two things from a noise source: the seed it
//! was built from and a scaled 2D sample in `[-1, 1]`. The trait keeps the
//! noise algorithm swappable; the default implementation wraps the `noise`
//! crate's Perlin generator.

use noise::{NoiseFn, Perlin};

/// A seeded 2D noise source sampled at world coordinates.
pub trait TerrainNoise {
    /// Seed this source was constructed from.
    fn seed(&self) -> i64;

    /// Sample noise at world coordinates, divided by `scale` before lookup.
    ///
    /// Larger scales produce broader features. Returns a value in `[-1, 1]`.
    fn terrain_noise(&self, x: i32, y: i32, scale: f64) -> f64;
}

/// Perlin-backed [`TerrainNoise`] implementation.
pub struct PerlinNoise {
    perlin: Perlin,
    seed: i64,
}

impl PerlinNoise {
    /// Create a noise source from a seed.
    pub fn new(seed: i64) -> Self {
        Self {
            perlin: Perlin::new(seed as u32),
            seed,
        }
    }

    /// Derive the per-type noise source for a resource type.
    ///
    /// Seeding with `base_seed + type_id` gives every resource type an
    /// independent, reproducible spatial pattern over the same terrain.
    pub fn for_type(base_seed: i64, type_id: i32) -> Self {
        Self::new(base_seed.wrapping_add(type_id as i64))
    }
}

impl TerrainNoise for PerlinNoise {
    fn seed(&self) -> i64 {
        self.seed
    }

    fn terrain_noise(&self, x: i32, y: i32, scale: f64) -> f64 {
        debug_assert!(scale > 0.0);
        self.perlin.get([x as f64 / scale, y as f64 / scale])
    }
}
