//! Cluster building.
//!
//! Consumes shuffled spawn candidates and grows clusters: a center picked
//! under a minimum-separation rule, a rarity-weighted size draw, then
//! bounded random-walk satellite placement around the center.

use rand::rngs::StdRng;
use rand::Rng;

use thicket_core::{cell_index, ChunkPos, WorldId, CHUNK_AREA};

use crate::catalog::ResourceNodeType;
use crate::chunk::ChunkData;
use crate::node::NewResourceNode;
use crate::spawn::SpawnPoint;

/// Hard cap on generated nodes per chunk, across all resource types.
pub const MAX_RESOURCES_PER_CHUNK: usize = 24;

/// Minimum squared distance between any two cluster centers in a chunk.
///
/// Squared units: 16 = (4 cells)^2. The comparison never takes a square
/// root; keep that in mind when tuning the constant.
pub const MIN_CLUSTER_SEPARATION_SQ: i32 = 16;

/// The 8 neighbor directions used for satellite placement.
const NEIGHBOR_DIRS: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Per-chunk placement bookkeeping shared by every type run in one
/// generation pass: cell occupancy, accepted cluster centers, and the
/// running node count. Never shared across chunks or requests.
pub struct PlacementState {
    occupied: [bool; CHUNK_AREA],
    centers: Vec<(i32, i32)>,
    count: usize,
}

impl PlacementState {
    /// Fresh state for one chunk generation pass.
    pub fn new() -> Self {
        Self {
            occupied: [false; CHUNK_AREA],
            centers: Vec::new(),
            count: 0,
        }
    }

    /// Nodes placed so far in this pass.
    pub fn node_count(&self) -> usize {
        self.count
    }

    /// Accepted cluster centers (chunk-local coordinates).
    pub fn centers(&self) -> &[(i32, i32)] {
        &self.centers
    }

    fn is_occupied(&self, local_x: i32, local_y: i32) -> bool {
        self.occupied[cell_index(local_x as u32, local_y as u32)]
    }

    fn place(&mut self, local_x: i32, local_y: i32) {
        self.occupied[cell_index(local_x as u32, local_y as u32)] = true;
        self.count += 1;
    }

    /// Whether a cell keeps the minimum squared separation from every
    /// previously accepted center.
    fn clear_of_centers(&self, local_x: i32, local_y: i32) -> bool {
        self.centers.iter().all(|&(cx, cy)| {
            let dx = cx - local_x;
            let dy = cy - local_y;
            dx * dx + dy * dy >= MIN_CLUSTER_SEPARATION_SQ
        })
    }
}

impl Default for PlacementState {
    fn default() -> Self {
        Self::new()
    }
}

/// Draw a cluster size from a weight table over sizes 1..=6.
///
/// Rolls a uniform integer in `[0, total_weight)` and walks the table; an
/// all-zero table yields size 1.
pub fn draw_cluster_size(weights: [u32; 6], rng: &mut StdRng) -> u32 {
    let total: u32 = weights.iter().sum();
    if total == 0 {
        return 1;
    }
    let mut roll = rng.gen_range(0..total);
    for (idx, &weight) in weights.iter().enumerate() {
        if roll < weight {
            return idx as u32 + 1;
        }
        roll -= weight;
    }
    // Unreachable: roll < total and the weights sum to total.
    1
}

/// Deterministic cluster identifier: 16 hex chars of a blake3 hash over
/// chunk coordinates, center position, and type id. Regenerating the same
/// chunk with the same seed reproduces the same ids.
pub fn cluster_id(chunk: ChunkPos, pos_x: i32, pos_y: i32, type_id: i32) -> String {
    let mut bytes = [0u8; 20];
    bytes[0..4].copy_from_slice(&chunk.x.to_le_bytes());
    bytes[4..8].copy_from_slice(&chunk.y.to_le_bytes());
    bytes[8..12].copy_from_slice(&pos_x.to_le_bytes());
    bytes[12..16].copy_from_slice(&pos_y.to_le_bytes());
    bytes[16..20].copy_from_slice(&type_id.to_le_bytes());
    blake3::hash(&bytes).to_hex()[..16].to_string()
}

/// Build clusters for one resource type from its shuffled candidate list.
///
/// Mutates `state` (occupancy, centers, count) so later type runs in the
/// same chunk respect earlier placements. Returns the placed nodes with
/// world-global positions.
pub fn build_clusters(
    chunk: &ChunkData,
    node_type: &ResourceNodeType,
    world_id: WorldId,
    candidates: &[SpawnPoint],
    state: &mut PlacementState,
    rng: &mut StdRng,
) -> Vec<NewResourceNode> {
    let mut nodes = Vec::new();
    let pos = chunk.position();

    for candidate in candidates {
        if state.node_count() >= MAX_RESOURCES_PER_CHUNK {
            break;
        }
        let cx = candidate.local_x as i32;
        let cy = candidate.local_y as i32;
        if state.is_occupied(cx, cy) || !state.clear_of_centers(cx, cy) {
            continue;
        }

        let size = draw_cluster_size(node_type.rarity.size_weights(), rng);
        let (center_wx, center_wy) = pos.world_pos(cx as u32, cy as u32);
        let id = cluster_id(pos, center_wx, center_wy, node_type.id);

        state.place(cx, cy);
        state.centers.push((cx, cy));
        nodes.push(new_node(node_type, world_id, pos, center_wx, center_wy, &id, size));

        // Satellites walk out 1-2 cells from the center, not from the last
        // placed node. Exhausting the attempt budget just yields a smaller
        // cluster.
        let wanted = size.saturating_sub(1);
        let mut attempts = wanted * 3;
        let mut placed = 0;
        while placed < wanted && attempts > 0 && state.node_count() < MAX_RESOURCES_PER_CHUNK {
            attempts -= 1;
            let (dx, dy) = NEIGHBOR_DIRS[rng.gen_range(0..NEIGHBOR_DIRS.len())];
            let offset = rng.gen_range(1..=2);
            let tx = cx + dx * offset;
            let ty = cy + dy * offset;

            if !ChunkData::in_bounds(tx, ty)
                || state.is_occupied(tx, ty)
                || chunk.terrain_at(tx as u32, ty as u32) != node_type.terrain_affinity
                || chunk.is_near_transition(tx as u32, ty as u32)
            {
                continue;
            }

            let (wx, wy) = pos.world_pos(tx as u32, ty as u32);
            state.place(tx, ty);
            nodes.push(new_node(node_type, world_id, pos, wx, wy, &id, size));
            placed += 1;
        }
    }

    nodes
}

fn new_node(
    node_type: &ResourceNodeType,
    world_id: WorldId,
    chunk: ChunkPos,
    pos_x: i32,
    pos_y: i32,
    cluster_id: &str,
    size: u32,
) -> NewResourceNode {
    NewResourceNode {
        type_id: node_type.id,
        world_id,
        chunk_x: chunk.x,
        chunk_y: chunk.y,
        cluster_id: cluster_id.to_string(),
        pos_x,
        pos_y,
        size: size as i32,
    }
}
