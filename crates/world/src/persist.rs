//! Serialized terrain codec.
//!
//! The chunk store hands this crate terrain as opaque bytes: a small header
//! (magic, version, CRC32, payload length) followed by a zstd-compressed
//! bincode payload. Decoding validates the header before touching the
//! payload so a truncated or corrupted row fails loudly instead of producing
//! a garbage terrain grid.

use anyhow::{Context, Result};
use crc32fast::Hasher;

use thicket_core::CHUNK_AREA;

use crate::chunk::ChunkData;

/// Magic number identifying a terrain blob ("THKT").
const TERRAIN_MAGIC: u32 = 0x54484B54;

/// Current terrain blob format version.
const TERRAIN_VERSION: u16 = 1;

/// Header length in bytes: magic (4) + version (2) + crc (4) + len (4).
const HEADER_LEN: usize = 14;

/// Zstd compression level for terrain payloads.
const COMPRESSION_LEVEL: i32 = 3;

/// Encode a chunk's terrain into a self-describing blob.
pub fn encode_chunk(chunk: &ChunkData) -> Result<Vec<u8>> {
    let payload = bincode::serialize(chunk).context("failed to serialize terrain")?;
    let compressed =
        zstd::encode_all(payload.as_slice(), COMPRESSION_LEVEL).context("failed to compress terrain")?;

    let mut hasher = Hasher::new();
    hasher.update(&compressed);
    let crc = hasher.finalize();

    let mut bytes = Vec::with_capacity(HEADER_LEN + compressed.len());
    bytes.extend_from_slice(&TERRAIN_MAGIC.to_le_bytes());
    bytes.extend_from_slice(&TERRAIN_VERSION.to_le_bytes());
    bytes.extend_from_slice(&crc.to_le_bytes());
    bytes.extend_from_slice(&(compressed.len() as u32).to_le_bytes());
    bytes.extend_from_slice(&compressed);
    Ok(bytes)
}

/// Decode a terrain blob produced by [`encode_chunk`].
pub fn decode_chunk(bytes: &[u8]) -> Result<ChunkData> {
    if bytes.len() < HEADER_LEN {
        anyhow::bail!("terrain blob too short: {} bytes", bytes.len());
    }

    let magic = u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
    if magic != TERRAIN_MAGIC {
        anyhow::bail!(
            "invalid terrain magic: expected 0x{:08X}, got 0x{:08X}",
            TERRAIN_MAGIC,
            magic
        );
    }

    let version = u16::from_le_bytes([bytes[4], bytes[5]]);
    if version != TERRAIN_VERSION {
        anyhow::bail!("unsupported terrain format version {}", version);
    }

    let crc = u32::from_le_bytes([bytes[6], bytes[7], bytes[8], bytes[9]]);
    let payload_len = u32::from_le_bytes([bytes[10], bytes[11], bytes[12], bytes[13]]) as usize;

    let payload = &bytes[HEADER_LEN..];
    if payload.len() != payload_len {
        anyhow::bail!(
            "terrain payload length mismatch: header says {}, got {}",
            payload_len,
            payload.len()
        );
    }

    let mut hasher = Hasher::new();
    hasher.update(payload);
    if hasher.finalize() != crc {
        anyhow::bail!("terrain payload CRC mismatch");
    }

    let decompressed = zstd::decode_all(payload).context("failed to decompress terrain")?;
    let chunk: ChunkData =
        bincode::deserialize(&decompressed).context("failed to deserialize terrain")?;
    // Deserialization bypasses the ChunkData constructor, so the grid-size
    // invariant must be re-checked here.
    if chunk.cells().len() != CHUNK_AREA {
        anyhow::bail!(
            "terrain grid has {} cells, expected {}",
            chunk.cells().len(),
            CHUNK_AREA
        );
    }
    Ok(chunk)
}
