#![warn(missing_docs)]
//! Core primitives shared across the workspace.

pub mod coords;
pub mod terrain;
pub mod world_id;

// Re-export commonly used types
pub use coords::{cell_index, local_coords, world_to_chunk, ChunkPos, CHUNK_AREA, CHUNK_SIZE};
pub use terrain::{TerrainParseError, TerrainType};
pub use world_id::WorldId;
