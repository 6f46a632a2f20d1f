//! Procedural level generation
//!
//! The world is an unbounded strip of fixed-width chunks. Each chunk is a
//! pure function of its index and the level config:
//! - `generator`: seeded per-chunk layout (ground, climb, bridges, props)
//! - `envelope`: jump reachability shared with the runner physics
//! - `store`: live records and the spatial query contract
//! - `stream`: camera-driven generation and eviction
//! - `graph`: reachability search used by tests and diagnostics

pub mod content;
pub mod envelope;
pub mod generator;
pub mod graph;
pub mod store;
pub mod stream;

pub use content::{
    ChunkContent, Decoration, DecorationKind, FloatingRole, Pickup, Platform, PlatformKind,
    SpawnPoint,
};
pub use envelope::JumpEnvelope;
pub use generator::{ChunkBounds, ChunkGenerator};
pub use graph::{reachable_from, unreachable};
pub use store::{LevelStore, PlatformQuery};
pub use stream::{ChunkStreamer, StreamReport};
