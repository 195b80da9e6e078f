//! Terrain chunks and procedural resource-node generation.
//!
//! This crate owns the server-side resource placement pipeline: terrain-aware
//! spawn-point detection, spatial clustering with exclusion radii, weighted
//! cluster sizing, and the lazy generate-on-first-read service that hands
//! results to persistence.

mod catalog;
mod chunk;
mod cluster;
mod generate;
mod node;
mod noise_field;
mod persist;
mod service;
mod spawn;
mod store;

pub use catalog::*;
pub use chunk::*;
pub use cluster::*;
pub use generate::*;
pub use node::*;
pub use noise_field::*;
pub use persist::*;
pub use service::*;
pub use spawn::*;
pub use store::*;
