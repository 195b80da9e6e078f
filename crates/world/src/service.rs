//! Resource retrieval with lazy generation.
//!
//! The serving path the transport layer calls into: return persisted nodes
//! when they exist, otherwise generate from the chunk's terrain on first
//! access and persist the result. A chunk without terrain yields an empty
//! list and is never written to.

use anyhow::{Context, Result};
use tracing::{info, warn};

use thicket_core::{ChunkPos, WorldId};

use crate::generate::ResourceGenerator;
use crate::node::ResourceNode;
use crate::persist::decode_chunk;
use crate::store::{ChunkStore, ResourceStore};

/// Chunk resource service combining the generator with its persistence
/// collaborators.
///
/// Holds no per-request mutable state; concurrent requests for *different*
/// chunks need no coordination. Concurrent regeneration of the *same* chunk
/// must be serialized by the caller.
pub struct ResourceService<C, R> {
    chunks: C,
    resources: R,
    generator: ResourceGenerator,
}

impl<C: ChunkStore, R: ResourceStore> ResourceService<C, R> {
    /// Wire a service from its collaborators.
    pub fn new(chunks: C, resources: R, generator: ResourceGenerator) -> Self {
        Self {
            chunks,
            resources,
            generator,
        }
    }

    /// The underlying generator.
    pub fn generator(&self) -> &ResourceGenerator {
        &self.generator
    }

    /// Resource nodes for a chunk, generating them on first access.
    ///
    /// Read-path failures (store reads, terrain decode) are hard errors.
    /// A write failure after successful generation is logged and swallowed:
    /// the caller still receives the freshly generated list, with ids unset.
    pub fn get_resources_for_chunk(
        &self,
        world: WorldId,
        pos: ChunkPos,
    ) -> Result<Vec<ResourceNode>> {
        let existing = self
            .resources
            .nodes_in_chunk(world, pos)
            .context("failed to read resource nodes")?;
        if !existing.is_empty() {
            return Ok(existing);
        }

        // Never generate from absent terrain.
        if !self
            .chunks
            .chunk_exists(world, pos)
            .context("failed to check chunk existence")?
        {
            return Ok(Vec::new());
        }
        let Some(raw) = self
            .chunks
            .serialized_chunk(world, pos)
            .context("failed to read chunk terrain")?
        else {
            return Ok(Vec::new());
        };
        let chunk = decode_chunk(&raw)
            .with_context(|| format!("failed to decode terrain for chunk {}", pos))?;

        let generated = self.generator.generate_for_chunk(world, &chunk);
        info!(chunk = %pos, nodes = generated.len(), "generated resource nodes");

        match self
            .resources
            .replace_nodes_in_chunk(world, pos, generated.clone())
        {
            Ok(stored) => Ok(stored),
            Err(err) => {
                // Durability traded for availability: serve the generated
                // set even though it could not be persisted.
                warn!(chunk = %pos, error = %err, "failed to persist generated nodes");
                Ok(generated
                    .into_iter()
                    .map(|node| node.into_unpersisted())
                    .collect())
            }
        }
    }
}
