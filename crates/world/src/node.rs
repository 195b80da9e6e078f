//! Generated resource node instances.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use thicket_core::{ChunkPos, WorldId};

/// A resource node occupying one world cell.
///
/// One row per occupied cell; a cluster is the implicit set of rows sharing
/// a `cluster_id`, not a stored entity. `pos_x`/`pos_y` are world-global
/// coordinates everywhere in this system (generation, storage, queries).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceNode {
    /// Store-assigned row id; 0 when the node has not been persisted.
    pub id: i32,
    /// Resource node type id (see the catalog).
    pub type_id: i32,
    /// World this node belongs to.
    pub world_id: WorldId,
    /// Chunk X coordinate.
    pub chunk_x: i32,
    /// Chunk Y coordinate.
    pub chunk_y: i32,
    /// Opaque grouping id shared by all nodes of one cluster.
    pub cluster_id: String,
    /// World-global X coordinate.
    pub pos_x: i32,
    /// World-global Y coordinate.
    pub pos_y: i32,
    /// Drawn size of the cluster this node belongs to.
    pub size: i32,
    /// Store-assigned creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl ResourceNode {
    /// Chunk this node's row is keyed under.
    pub fn chunk(&self) -> ChunkPos {
        ChunkPos::new(self.chunk_x, self.chunk_y)
    }

    /// True Euclidean harvest-range check.
    ///
    /// Unlike the cluster-separation test (which deliberately compares
    /// squared units), harvest range takes the square root and compares
    /// against a linear distance in cells.
    pub fn within_harvest_range(&self, x: i32, y: i32, range: f64) -> bool {
        let dx = (self.pos_x - x) as f64;
        let dy = (self.pos_y - y) as f64;
        (dx * dx + dy * dy).sqrt() <= range
    }
}

/// Parameters for creating a node; the store assigns `id` and `created_at`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewResourceNode {
    /// Resource node type id.
    pub type_id: i32,
    /// World the node belongs to.
    pub world_id: WorldId,
    /// Chunk X coordinate.
    pub chunk_x: i32,
    /// Chunk Y coordinate.
    pub chunk_y: i32,
    /// Cluster grouping id.
    pub cluster_id: String,
    /// World-global X coordinate.
    pub pos_x: i32,
    /// World-global Y coordinate.
    pub pos_y: i32,
    /// Drawn size of the owning cluster.
    pub size: i32,
}

impl NewResourceNode {
    /// Materialize as an unpersisted node (id 0).
    ///
    /// Used when generation succeeds but the write to the store fails: the
    /// caller still receives the generated set.
    pub fn into_unpersisted(self) -> ResourceNode {
        ResourceNode {
            id: 0,
            type_id: self.type_id,
            world_id: self.world_id,
            chunk_x: self.chunk_x,
            chunk_y: self.chunk_y,
            cluster_id: self.cluster_id,
            pos_x: self.pos_x,
            pos_y: self.pos_y,
            size: self.size,
            created_at: Utc::now(),
        }
    }
}
