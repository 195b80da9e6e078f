//! Spawn-point detection.
//!
//! Scans a chunk's terrain grid for cells where a resource type may spawn:
//! the cell must match the type's terrain affinity, sit clear of terrain
//! transitions, and score above the rarity threshold on a two-octave noise
//! blend sampled at global world coordinates.

use thicket_core::{TerrainType, CHUNK_SIZE};

use crate::chunk::ChunkData;
use crate::noise_field::TerrainNoise;

/// Scale of the broad spawn-pattern octave.
pub const LARGE_NOISE_SCALE: f64 = 150.0;
/// Scale of the fine-detail octave.
pub const DETAIL_NOISE_SCALE: f64 = 30.0;
/// Blend weight of the broad octave.
const LARGE_WEIGHT: f64 = 0.8;
/// Blend weight of the detail octave.
const DETAIL_WEIGHT: f64 = 0.2;

/// A cell eligible for resource placement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnPoint {
    /// Chunk-local X coordinate.
    pub local_x: u32,
    /// Chunk-local Y coordinate.
    pub local_y: u32,
    /// Normalized noise score in `[0, 1]` that qualified the cell.
    pub noise: f64,
}

/// Normalized two-octave noise score for one cell, in `[0, 1]`.
fn spawn_score(noise: &dyn TerrainNoise, world_x: i32, world_y: i32) -> f64 {
    let large = noise.terrain_noise(world_x, world_y, LARGE_NOISE_SCALE);
    let detail = noise.terrain_noise(world_x, world_y, DETAIL_NOISE_SCALE);
    let combined = large * LARGE_WEIGHT + detail * DETAIL_WEIGHT;
    (combined + 1.0) / 2.0
}

/// Find all spawn candidates for one resource type in a chunk.
///
/// Candidates are returned in row-major scan order; callers that need
/// order-independence must shuffle deterministically before consuming.
pub fn find_spawn_points(
    chunk: &ChunkData,
    terrain_affinity: TerrainType,
    rarity_threshold: f64,
    noise: &dyn TerrainNoise,
) -> Vec<SpawnPoint> {
    let mut points = Vec::new();
    for local_y in 0..CHUNK_SIZE as u32 {
        for local_x in 0..CHUNK_SIZE as u32 {
            if chunk.terrain_at(local_x, local_y) != terrain_affinity {
                continue;
            }
            if chunk.is_near_transition(local_x, local_y) {
                continue;
            }
            let (world_x, world_y) = chunk.position().world_pos(local_x, local_y);
            let score = spawn_score(noise, world_x, world_y);
            if score > rarity_threshold {
                points.push(SpawnPoint {
                    local_x,
                    local_y,
                    noise: score,
                });
            }
        }
    }
    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noise_field::PerlinNoise;
    use thicket_core::{cell_index, ChunkPos, CHUNK_AREA};

    fn grass_chunk(pos: ChunkPos) -> ChunkData {
        ChunkData::filled(pos, TerrainType::Grass)
    }

    #[test]
    fn detection_is_deterministic_per_type_seed() {
        let chunk = grass_chunk(ChunkPos::new(3, -2));
        let a = find_spawn_points(
            &chunk,
            TerrainType::Grass,
            0.30,
            &PerlinNoise::for_type(12345, 1),
        );
        let b = find_spawn_points(
            &chunk,
            TerrainType::Grass,
            0.30,
            &PerlinNoise::for_type(12345, 1),
        );
        assert_eq!(a, b);
    }

    #[test]
    fn candidates_never_touch_the_chunk_border() {
        let chunk = grass_chunk(ChunkPos::new(0, 0));
        let points = find_spawn_points(
            &chunk,
            TerrainType::Grass,
            0.0,
            &PerlinNoise::new(99),
        );
        assert!(!points.is_empty());
        for p in &points {
            assert!((1..=30).contains(&p.local_x), "border cell {} accepted", p.local_x);
            assert!((1..=30).contains(&p.local_y), "border cell {} accepted", p.local_y);
        }
    }

    #[test]
    fn negative_threshold_accepts_every_interior_cell() {
        // Normalized scores live in [0, 1], so every non-transitional
        // matching cell qualifies: the 30x30 interior.
        let chunk = grass_chunk(ChunkPos::new(0, 0));
        let points = find_spawn_points(&chunk, TerrainType::Grass, -0.01, &PerlinNoise::new(5));
        assert_eq!(points.len(), 30 * 30);
    }

    /// Noise source returning the same raw sample everywhere.
    struct ConstNoise(f64);

    impl TerrainNoise for ConstNoise {
        fn seed(&self) -> i64 {
            0
        }
        fn terrain_noise(&self, _: i32, _: i32, _: f64) -> f64 {
            self.0
        }
    }

    #[test]
    fn score_exactly_at_threshold_is_rejected() {
        // A constant raw sample of 0.0 normalizes to exactly 0.5; the
        // acceptance comparison is strict, so threshold 0.5 rejects every
        // cell while anything below accepts the whole interior.
        let chunk = grass_chunk(ChunkPos::new(0, 0));
        let at = find_spawn_points(&chunk, TerrainType::Grass, 0.5, &ConstNoise(0.0));
        assert!(at.is_empty());
        let below = find_spawn_points(&chunk, TerrainType::Grass, 0.49, &ConstNoise(0.0));
        assert_eq!(below.len(), 30 * 30);
    }

    #[test]
    fn mismatched_terrain_yields_no_candidates() {
        let chunk = grass_chunk(ChunkPos::new(0, 0));
        let points = find_spawn_points(&chunk, TerrainType::Stone, 0.0, &PerlinNoise::new(5));
        assert!(points.is_empty());
    }

    #[test]
    fn transition_cells_are_excluded() {
        let mut cells = vec![TerrainType::Grass; CHUNK_AREA];
        cells[cell_index(15, 15)] = TerrainType::Water;
        let chunk = ChunkData::new(ChunkPos::new(0, 0), cells);

        let points = find_spawn_points(&chunk, TerrainType::Grass, 0.0, &PerlinNoise::new(5));
        for p in &points {
            let dx = (p.local_x as i32 - 15).abs();
            let dy = (p.local_y as i32 - 15).abs();
            assert!(dx > 1 || dy > 1, "cell ({}, {}) is transitional", p.local_x, p.local_y);
        }
    }

    #[test]
    fn higher_thresholds_accept_fewer_cells() {
        let chunk = grass_chunk(ChunkPos::new(0, 0));
        let noise = PerlinNoise::new(2024);
        let common = find_spawn_points(&chunk, TerrainType::Grass, 0.30, &noise);
        let rare = find_spawn_points(&chunk, TerrainType::Grass, 0.70, &noise);
        assert!(rare.len() <= common.len());
    }

    #[test]
    fn scores_are_normalized() {
        let chunk = grass_chunk(ChunkPos::new(-4, 7));
        let points = find_spawn_points(&chunk, TerrainType::Grass, 0.0, &PerlinNoise::new(31));
        for p in &points {
            assert!((0.0..=1.0).contains(&p.noise));
        }
    }

    #[test]
    fn scan_order_is_row_major() {
        let chunk = grass_chunk(ChunkPos::new(0, 0));
        let points = find_spawn_points(&chunk, TerrainType::Grass, -0.01, &PerlinNoise::new(5));
        let mut sorted = points.clone();
        sorted.sort_by_key(|p| (p.local_y, p.local_x));
        assert_eq!(
            points.iter().map(|p| (p.local_x, p.local_y)).collect::<Vec<_>>(),
            sorted.iter().map(|p| (p.local_x, p.local_y)).collect::<Vec<_>>()
        );
    }
}
