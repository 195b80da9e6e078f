//! Property tests: generation invariants hold for arbitrary seeds.

use proptest::prelude::*;

use thicket_core::{local_coords, world_to_chunk, ChunkPos, TerrainType, WorldId};
use thicket_world::{ChunkData, NodeCatalog, ResourceGenerator, MAX_RESOURCES_PER_CHUNK};

proptest! {
    // Full generation per case is noise-heavy; a small case count still
    // covers a good seed spread.
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn cap_and_containment_hold_for_any_seed(
        seed in any::<i64>(),
        chunk_x in -64i32..64,
        chunk_y in -64i32..64,
    ) {
        let catalog = NodeCatalog::builtin();
        let pos = ChunkPos::new(chunk_x, chunk_y);
        let chunk = ChunkData::filled(pos, TerrainType::Grass);
        let generator = ResourceGenerator::new(NodeCatalog::builtin(), seed);

        let nodes = generator.generate_for_chunk(WorldId::DEFAULT, &chunk);
        prop_assert!(nodes.len() <= MAX_RESOURCES_PER_CHUNK);

        for node in &nodes {
            prop_assert_eq!(world_to_chunk(node.pos_x, node.pos_y), pos);
            let (lx, ly) = local_coords(node.pos_x, node.pos_y);
            prop_assert!(!chunk.is_near_transition(lx, ly));
            let ty = catalog.by_id(node.type_id).expect("catalog type");
            prop_assert_eq!(chunk.terrain_at(lx, ly), ty.terrain_affinity);
        }
    }

    #[test]
    fn generation_is_a_pure_function_of_seed_and_terrain(seed in any::<i64>()) {
        let pos = ChunkPos::new(3, -3);
        let chunk = ChunkData::filled(pos, TerrainType::Stone);
        let a = ResourceGenerator::new(NodeCatalog::builtin(), seed)
            .generate_for_chunk(WorldId::DEFAULT, &chunk);
        let b = ResourceGenerator::new(NodeCatalog::builtin(), seed)
            .generate_for_chunk(WorldId::DEFAULT, &chunk);
        prop_assert_eq!(a, b);
    }
}
