//! Chunk coordinate arithmetic.
//!
//! The world is partitioned into fixed 32x32 tile chunks addressed by integer
//! chunk coordinates. All conversions use floored division so negative world
//! coordinates map correctly (e.g. world x = -1 lives in chunk -1, not 0).

use std::fmt;

use serde::{Deserialize, Serialize};

/// Chunk edge length in tiles.
pub const CHUNK_SIZE: i32 = 32;

/// Total tile count per chunk.
pub const CHUNK_AREA: usize = (CHUNK_SIZE * CHUNK_SIZE) as usize;

/// Chunk coordinate (X, Y) in chunk space.
/// Implements Ord for deterministic iteration in BTreeMap/BTreeSet (sorts by x, then y).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct ChunkPos {
    /// Chunk X coordinate.
    pub x: i32,
    /// Chunk Y coordinate.
    pub y: i32,
}

impl ChunkPos {
    /// Create a chunk position from chunk-space coordinates.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// World coordinate of this chunk's (0, 0) tile.
    pub const fn origin(self) -> (i32, i32) {
        (self.x * CHUNK_SIZE, self.y * CHUNK_SIZE)
    }

    /// Convert a chunk-local tile coordinate into world coordinates.
    pub const fn world_pos(self, local_x: u32, local_y: u32) -> (i32, i32) {
        (
            self.x * CHUNK_SIZE + local_x as i32,
            self.y * CHUNK_SIZE + local_y as i32,
        )
    }
}

impl fmt::Display for ChunkPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Map world coordinates to the chunk containing them.
///
/// Uses floored division: `-1 / 32` yields chunk `-1`, never `0`.
pub fn world_to_chunk(x: i32, y: i32) -> ChunkPos {
    ChunkPos::new(x.div_euclid(CHUNK_SIZE), y.div_euclid(CHUNK_SIZE))
}

/// Map world coordinates to chunk-local tile coordinates in `[0, 32)`.
pub fn local_coords(x: i32, y: i32) -> (u32, u32) {
    (
        x.rem_euclid(CHUNK_SIZE) as u32,
        y.rem_euclid(CHUNK_SIZE) as u32,
    )
}

/// Linear index of a chunk-local tile within a row-major cell array.
pub fn cell_index(local_x: u32, local_y: u32) -> usize {
    debug_assert!((local_x as i32) < CHUNK_SIZE);
    debug_assert!((local_y as i32) < CHUNK_SIZE);
    local_y as usize * CHUNK_SIZE as usize + local_x as usize
}
