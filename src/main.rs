//! Demo entry point: seeds an in-memory world, generates resources for a
//! grid of chunks, and reports what the serving path produced.
//!
//! The production transport and relational stores are wired in exactly the
//! same way; this binary swaps them for the in-memory implementations.

use std::{env, fs, path::PathBuf};

use anyhow::{Context, Result};
use tracing::Level;
use tracing_subscriber::fmt;

use thicket_core::{ChunkPos, TerrainType, WorldId, CHUNK_AREA, CHUNK_SIZE};
use thicket_world::{
    ChunkData, MemoryChunkStore, MemoryResourceStore, NodeCatalog, PerlinNoise,
    ResourceGenerator, ResourceService, TerrainNoise,
};

/// Noise scale for the demo terrain painter.
const TERRAIN_SCALE: f64 = 80.0;

fn main() -> Result<()> {
    let _ = fmt().with_max_level(Level::INFO).try_init();
    let config = config_from_args()?;
    tracing::info!(
        seed = config.seed,
        radius = config.radius,
        "booting tile-world resource generation demo"
    );

    let chunks = MemoryChunkStore::new();
    let painter = PerlinNoise::new(config.seed ^ 0x7E88A1);
    for chunk_y in -config.radius..=config.radius {
        for chunk_x in -config.radius..=config.radius {
            let chunk = paint_chunk(&painter, ChunkPos::new(chunk_x, chunk_y));
            chunks.insert_chunk(WorldId::DEFAULT, &chunk)?;
        }
    }

    let service = ResourceService::new(
        chunks,
        MemoryResourceStore::new(),
        ResourceGenerator::new(NodeCatalog::builtin(), config.seed),
    );

    let mut summary = Vec::new();
    let mut total = 0usize;
    for chunk_y in -config.radius..=config.radius {
        for chunk_x in -config.radius..=config.radius {
            let pos = ChunkPos::new(chunk_x, chunk_y);
            let nodes = service.get_resources_for_chunk(WorldId::DEFAULT, pos)?;
            tracing::info!(chunk = %pos, nodes = nodes.len(), "chunk served");
            total += nodes.len();
            summary.push(serde_json::json!({
                "chunk_x": chunk_x,
                "chunk_y": chunk_y,
                "nodes": nodes.len(),
            }));
        }
    }
    tracing::info!(total, "generation sweep complete");

    if let Some(path) = config.metrics {
        let report = serde_json::json!({
            "seed": config.seed,
            "radius": config.radius,
            "total_nodes": total,
            "chunks": summary,
        });
        fs::write(&path, serde_json::to_vec_pretty(&report)?)
            .with_context(|| format!("failed to write metrics to {}", path.display()))?;
        tracing::info!(path = %path.display(), "metrics written");
    }
    Ok(())
}

struct DemoConfig {
    seed: i64,
    radius: i32,
    metrics: Option<PathBuf>,
}

fn config_from_args() -> Result<DemoConfig> {
    config_from_iter(env::args().skip(1))
}

fn config_from_iter<I>(mut args: I) -> Result<DemoConfig>
where
    I: Iterator<Item = String>,
{
    let mut seed = 1337_i64;
    let mut radius = 2_i32;
    let mut metrics = None;
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--seed" => {
                let value = args.next().context("--seed requires a value")?;
                seed = value.parse().context("--seed must be an integer")?;
            }
            "--radius" => {
                let value = args.next().context("--radius requires a value")?;
                radius = value.parse().context("--radius must be an integer")?;
                if radius < 0 {
                    anyhow::bail!("--radius must be non-negative");
                }
            }
            "--metrics" => metrics = args.next().map(PathBuf::from),
            _ => {}
        }
    }
    Ok(DemoConfig {
        seed,
        radius,
        metrics,
    })
}

/// Paint deterministic demo terrain: broad noise thresholded into bands.
fn paint_chunk(noise: &PerlinNoise, pos: ChunkPos) -> ChunkData {
    let mut cells = Vec::with_capacity(CHUNK_AREA);
    for local_y in 0..CHUNK_SIZE as u32 {
        for local_x in 0..CHUNK_SIZE as u32 {
            let (world_x, world_y) = pos.world_pos(local_x, local_y);
            let value = noise.terrain_noise(world_x, world_y, TERRAIN_SCALE);
            let terrain = if value < -0.35 {
                TerrainType::Water
            } else if value < -0.15 {
                TerrainType::Sand
            } else if value < 0.25 {
                TerrainType::Grass
            } else if value < 0.45 {
                TerrainType::Dirt
            } else {
                TerrainType::Stone
            };
            cells.push(terrain);
        }
    }
    ChunkData::new(pos, cells)
}
