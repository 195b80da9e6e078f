//! Persistence collaborator traits and in-memory implementations.
//!
//! The relational layer lives outside this crate; generation only needs the
//! narrow contracts below. The in-memory stores back tests and the demo
//! binary, and double as the reference for transactional semantics: node
//! regeneration replaces a chunk's row set atomically.

use std::collections::HashMap;
use std::sync::Mutex;

use anyhow::Result;
use chrono::Utc;

use thicket_core::{ChunkPos, WorldId};

use crate::node::{NewResourceNode, ResourceNode};

/// Read access to serialized terrain, keyed by world and chunk.
pub trait ChunkStore: Send + Sync {
    /// Whether terrain exists for the chunk.
    fn chunk_exists(&self, world: WorldId, pos: ChunkPos) -> Result<bool>;

    /// Fetch the chunk's serialized terrain blob, if present.
    fn serialized_chunk(&self, world: WorldId, pos: ChunkPos) -> Result<Option<Vec<u8>>>;
}

/// Resource node persistence, keyed by world and chunk.
pub trait ResourceStore: Send + Sync {
    /// All nodes currently persisted for the chunk.
    fn nodes_in_chunk(&self, world: WorldId, pos: ChunkPos) -> Result<Vec<ResourceNode>>;

    /// Delete every node persisted for the chunk.
    fn delete_nodes_in_chunk(&self, world: WorldId, pos: ChunkPos) -> Result<()>;

    /// Persist one node; the store assigns its id and creation timestamp.
    fn create_node(&self, node: NewResourceNode) -> Result<ResourceNode>;

    /// Atomically replace the chunk's node set.
    ///
    /// The default implementation is delete-then-create for stores without
    /// transactions; transactional stores should override it so a crash
    /// mid-regeneration can never leave a chunk partially populated.
    fn replace_nodes_in_chunk(
        &self,
        world: WorldId,
        pos: ChunkPos,
        nodes: Vec<NewResourceNode>,
    ) -> Result<Vec<ResourceNode>> {
        self.delete_nodes_in_chunk(world, pos)?;
        nodes.into_iter().map(|node| self.create_node(node)).collect()
    }
}

/// In-memory [`ChunkStore`] holding encoded terrain blobs.
#[derive(Default)]
pub struct MemoryChunkStore {
    chunks: Mutex<HashMap<(WorldId, ChunkPos), Vec<u8>>>,
}

impl MemoryChunkStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Encode and insert a chunk's terrain.
    pub fn insert_chunk(&self, world: WorldId, chunk: &crate::chunk::ChunkData) -> Result<()> {
        let bytes = crate::persist::encode_chunk(chunk)?;
        self.chunks
            .lock()
            .expect("chunk store lock poisoned")
            .insert((world, chunk.position()), bytes);
        Ok(())
    }
}

impl ChunkStore for MemoryChunkStore {
    fn chunk_exists(&self, world: WorldId, pos: ChunkPos) -> Result<bool> {
        Ok(self
            .chunks
            .lock()
            .expect("chunk store lock poisoned")
            .contains_key(&(world, pos)))
    }

    fn serialized_chunk(&self, world: WorldId, pos: ChunkPos) -> Result<Option<Vec<u8>>> {
        Ok(self
            .chunks
            .lock()
            .expect("chunk store lock poisoned")
            .get(&(world, pos))
            .cloned())
    }
}

#[derive(Default)]
struct ResourceRows {
    nodes: HashMap<(WorldId, ChunkPos), Vec<ResourceNode>>,
    next_id: i32,
}

impl ResourceRows {
    fn materialize(&mut self, node: NewResourceNode) -> ResourceNode {
        self.next_id += 1;
        ResourceNode {
            id: self.next_id,
            type_id: node.type_id,
            world_id: node.world_id,
            chunk_x: node.chunk_x,
            chunk_y: node.chunk_y,
            cluster_id: node.cluster_id,
            pos_x: node.pos_x,
            pos_y: node.pos_y,
            size: node.size,
            created_at: Utc::now(),
        }
    }
}

/// In-memory [`ResourceStore`] with auto-assigned row ids.
#[derive(Default)]
pub struct MemoryResourceStore {
    rows: Mutex<ResourceRows>,
}

impl MemoryResourceStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Total node count across all chunks (test/diagnostic helper).
    pub fn total_nodes(&self) -> usize {
        self.rows
            .lock()
            .expect("resource store lock poisoned")
            .nodes
            .values()
            .map(Vec::len)
            .sum()
    }
}

impl ResourceStore for MemoryResourceStore {
    fn nodes_in_chunk(&self, world: WorldId, pos: ChunkPos) -> Result<Vec<ResourceNode>> {
        Ok(self
            .rows
            .lock()
            .expect("resource store lock poisoned")
            .nodes
            .get(&(world, pos))
            .cloned()
            .unwrap_or_default())
    }

    fn delete_nodes_in_chunk(&self, world: WorldId, pos: ChunkPos) -> Result<()> {
        self.rows
            .lock()
            .expect("resource store lock poisoned")
            .nodes
            .remove(&(world, pos));
        Ok(())
    }

    fn create_node(&self, node: NewResourceNode) -> Result<ResourceNode> {
        let mut rows = self.rows.lock().expect("resource store lock poisoned");
        let key = (node.world_id, ChunkPos::new(node.chunk_x, node.chunk_y));
        let stored = rows.materialize(node);
        rows.nodes.entry(key).or_default().push(stored.clone());
        Ok(stored)
    }

    fn replace_nodes_in_chunk(
        &self,
        world: WorldId,
        pos: ChunkPos,
        nodes: Vec<NewResourceNode>,
    ) -> Result<Vec<ResourceNode>> {
        // Single lock acquisition: delete and insert cannot interleave with
        // another regeneration of the same chunk.
        let mut rows = self.rows.lock().expect("resource store lock poisoned");
        rows.nodes.remove(&(world, pos));
        let stored: Vec<ResourceNode> = nodes
            .into_iter()
            .map(|node| {
                let key = (node.world_id, ChunkPos::new(node.chunk_x, node.chunk_y));
                let materialized = rows.materialize(node);
                rows.nodes.entry(key).or_default().push(materialized.clone());
                materialized
            })
            .collect();
        Ok(stored)
    }
}
