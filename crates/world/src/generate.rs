//! Generation orchestrator.
//!
//! Runs the spawn detector and cluster builder once per resource type over a
//! chunk's terrain. Terrain groups and type ids are visited in sorted order
//! and every random draw derives from `base_seed + type_id`, so the output
//! for a given (seed, terrain) pair is fully reproducible.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::debug;

use thicket_core::WorldId;

use crate::catalog::NodeCatalog;
use crate::chunk::ChunkData;
use crate::cluster::{build_clusters, PlacementState, MAX_RESOURCES_PER_CHUNK};
use crate::node::NewResourceNode;
use crate::noise_field::PerlinNoise;
use crate::spawn::find_spawn_points;

/// Procedural resource-node generator.
///
/// Read-only after construction; safe to share across concurrently served
/// chunk requests.
pub struct ResourceGenerator {
    catalog: NodeCatalog,
    base_seed: i64,
}

impl ResourceGenerator {
    /// Create a generator over a catalog with a world base seed.
    pub fn new(catalog: NodeCatalog, base_seed: i64) -> Self {
        Self { catalog, base_seed }
    }

    /// World base seed used to derive per-type noise and shuffle seeds.
    pub fn base_seed(&self) -> i64 {
        self.base_seed
    }

    /// The catalog this generator draws types from.
    pub fn catalog(&self) -> &NodeCatalog {
        &self.catalog
    }

    /// Generate resource nodes for one chunk.
    ///
    /// Synchronous and allocation-local: occupancy and cluster centers live
    /// on the stack of this call and are discarded afterwards. The result is
    /// capped at [`MAX_RESOURCES_PER_CHUNK`].
    pub fn generate_for_chunk(&self, world_id: WorldId, chunk: &ChunkData) -> Vec<NewResourceNode> {
        let mut state = PlacementState::new();
        let mut nodes = Vec::new();

        for (terrain, types) in self.catalog.terrain_groups() {
            for node_type in types {
                let noise = PerlinNoise::for_type(self.base_seed, node_type.id);
                let mut candidates = find_spawn_points(
                    chunk,
                    node_type.terrain_affinity,
                    node_type.rarity.spawn_threshold(),
                    &noise,
                );
                if candidates.is_empty() {
                    continue;
                }
                // Shuffle with the same per-type seed arithmetic as the
                // noise source so candidate consumption order is stable.
                let mut rng = StdRng::seed_from_u64(
                    (self.base_seed.wrapping_add(node_type.id as i64)) as u64,
                );
                candidates.shuffle(&mut rng);

                let placed = build_clusters(
                    chunk,
                    node_type,
                    world_id,
                    &candidates,
                    &mut state,
                    &mut rng,
                );
                debug!(
                    chunk = %chunk.position(),
                    terrain = %terrain,
                    type_id = node_type.id,
                    candidates = candidates.len(),
                    placed = placed.len(),
                    "cluster pass complete"
                );
                nodes.extend(placed);
            }
        }

        debug_assert!(nodes.len() <= MAX_RESOURCES_PER_CHUNK);
        nodes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use thicket_core::{cell_index, local_coords, ChunkPos, TerrainType, CHUNK_AREA};

    fn generator(seed: i64) -> ResourceGenerator {
        ResourceGenerator::new(NodeCatalog::builtin(), seed)
    }

    fn mixed_chunk(pos: ChunkPos) -> ChunkData {
        // Left half grass, right half stone: two terrain groups in one chunk.
        let mut cells = vec![TerrainType::Grass; CHUNK_AREA];
        for y in 0..32u32 {
            for x in 16..32u32 {
                cells[cell_index(x, y)] = TerrainType::Stone;
            }
        }
        ChunkData::new(pos, cells)
    }

    #[test]
    fn generation_is_deterministic() {
        let chunk = mixed_chunk(ChunkPos::new(4, -1));
        let a = generator(12345).generate_for_chunk(WorldId::DEFAULT, &chunk);
        let b = generator(12345).generate_for_chunk(WorldId::DEFAULT, &chunk);
        assert_eq!(a, b);
        assert!(!a.is_empty());
    }

    #[test]
    fn different_seeds_change_the_layout() {
        let chunk = mixed_chunk(ChunkPos::new(0, 0));
        let a = generator(1).generate_for_chunk(WorldId::DEFAULT, &chunk);
        let b = generator(2).generate_for_chunk(WorldId::DEFAULT, &chunk);
        let pos_a: Vec<_> = a.iter().map(|n| (n.pos_x, n.pos_y)).collect();
        let pos_b: Vec<_> = b.iter().map(|n| (n.pos_x, n.pos_y)).collect();
        assert_ne!(pos_a, pos_b);
    }

    #[test]
    fn output_respects_chunk_cap() {
        for seed in [1, 99, 4242] {
            let chunk = mixed_chunk(ChunkPos::new(seed as i32, 0));
            let nodes = generator(seed).generate_for_chunk(WorldId::DEFAULT, &chunk);
            assert!(nodes.len() <= MAX_RESOURCES_PER_CHUNK);
        }
    }

    #[test]
    fn every_node_sits_on_its_affinity_terrain() {
        let catalog = NodeCatalog::builtin();
        let chunk = mixed_chunk(ChunkPos::new(-3, 6));
        let nodes = generator(777).generate_for_chunk(WorldId::DEFAULT, &chunk);
        assert!(!nodes.is_empty());
        for node in &nodes {
            let ty = catalog.by_id(node.type_id).expect("known type");
            let (lx, ly) = local_coords(node.pos_x, node.pos_y);
            assert_eq!(chunk.terrain_at(lx, ly), ty.terrain_affinity);
        }
    }

    #[test]
    fn no_node_occupies_a_transition_cell() {
        let chunk = mixed_chunk(ChunkPos::new(2, 2));
        let nodes = generator(31337).generate_for_chunk(WorldId::DEFAULT, &chunk);
        for node in &nodes {
            let (lx, ly) = local_coords(node.pos_x, node.pos_y);
            assert!(
                !chunk.is_near_transition(lx, ly),
                "node at ({}, {}) is transitional",
                node.pos_x,
                node.pos_y
            );
        }
    }

    #[test]
    fn water_only_chunk_grows_water_types() {
        let catalog = NodeCatalog::builtin();
        let chunk = ChunkData::filled(ChunkPos::new(0, 0), TerrainType::Water);
        let nodes = generator(55).generate_for_chunk(WorldId::DEFAULT, &chunk);
        for node in &nodes {
            let ty = catalog.by_id(node.type_id).expect("known type");
            assert_eq!(ty.terrain_affinity, TerrainType::Water);
        }
    }

    #[test]
    fn unspecified_terrain_generates_nothing() {
        let chunk = ChunkData::filled(ChunkPos::new(0, 0), TerrainType::Unspecified);
        let nodes = generator(9).generate_for_chunk(WorldId::DEFAULT, &chunk);
        assert!(nodes.is_empty());
    }
}
