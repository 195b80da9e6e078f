//! Terrain chunk data consumed by resource generation.

use serde::{Deserialize, Serialize};

use thicket_core::{cell_index, ChunkPos, TerrainType, CHUNK_AREA, CHUNK_SIZE};

/// One chunk's terrain grid: 32x32 cells in row-major order
/// (`index = local_y * 32 + local_x`).
///
/// Terrain is owned by the world subsystem and is immutable once generated;
/// this crate only ever reads it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkData {
    position: ChunkPos,
    cells: Vec<TerrainType>,
}

impl ChunkData {
    /// Wrap a row-major cell grid. Panics if `cells` is not exactly 1024 long;
    /// grids of any other size are a bug in the terrain producer, not an
    /// input to tolerate.
    pub fn new(position: ChunkPos, cells: Vec<TerrainType>) -> Self {
        assert_eq!(cells.len(), CHUNK_AREA, "chunk terrain grid must be 32x32");
        Self { position, cells }
    }

    /// A chunk uniformly filled with one terrain type. Used by tests and the
    /// demo world painter.
    pub fn filled(position: ChunkPos, terrain: TerrainType) -> Self {
        Self::new(position, vec![terrain; CHUNK_AREA])
    }

    /// Chunk-space position of this chunk.
    pub fn position(&self) -> ChunkPos {
        self.position
    }

    /// Terrain at a chunk-local cell.
    pub fn terrain_at(&self, local_x: u32, local_y: u32) -> TerrainType {
        self.cells[cell_index(local_x, local_y)]
    }

    /// Raw row-major cell grid.
    pub fn cells(&self) -> &[TerrainType] {
        &self.cells
    }

    /// Whether a signed local coordinate pair lies inside the chunk.
    pub fn in_bounds(local_x: i32, local_y: i32) -> bool {
        (0..CHUNK_SIZE).contains(&local_x) && (0..CHUNK_SIZE).contains(&local_y)
    }

    /// Whether a cell sits within one cell of a terrain-type transition.
    ///
    /// Inspects the 8 neighbors; a neighbor outside the chunk always counts
    /// as a transition, which yields a one-cell forbidden border along every
    /// chunk edge. Resources never spawn on transitional cells.
    pub fn is_near_transition(&self, local_x: u32, local_y: u32) -> bool {
        let center = self.terrain_at(local_x, local_y);
        for dy in -1i32..=1 {
            for dx in -1i32..=1 {
                if dx == 0 && dy == 0 {
                    continue;
                }
                let nx = local_x as i32 + dx;
                let ny = local_y as i32 + dy;
                if !Self::in_bounds(nx, ny) {
                    return true;
                }
                if self.terrain_at(nx as u32, ny as u32) != center {
                    return true;
                }
            }
        }
        false
    }
}
