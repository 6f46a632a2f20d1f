//! Runner Levelgen - deterministic chunk-based level generation
//!
//! Core modules:
//! - `rng`: Seeded linear congruential stream (one per chunk)
//! - `config`: Data-driven level tunables and presets
//! - `level`: Chunk generation, jump envelope, level store and streaming
//! - `sim`: Fixed timestep runner physics against the level store
//! - `web`: wasm-bindgen handle for browser front ends

pub mod config;
pub mod error;
pub mod level;
pub mod rng;
pub mod sim;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use config::LevelConfig;
pub use error::ConfigError;
pub use level::{ChunkContent, ChunkGenerator, ChunkStreamer, JumpEnvelope, LevelStore, Platform};
pub use rng::Lcg32;

/// Default tuning constants (the runner preset)
pub mod consts {
    /// Downward acceleration per step
    pub const GRAVITY: f64 = 0.6;
    /// Initial upward speed of a jump
    pub const JUMP_SPEED: f64 = 12.0;
    /// Horizontal speed while a direction is held
    pub const MOVE_SPEED: f64 = 5.0;

    /// Ground line (top surface, y down)
    pub const GROUND_Y: f64 = 550.0;
    pub const GROUND_HEIGHT: f64 = 50.0;
    pub const FLOATING_HEIGHT: f64 = 20.0;

    /// Chunk width in world units
    pub const CHUNK_WIDTH: f64 = 400.0;

    /// Square player body
    pub const PLAYER_SIZE: f64 = 40.0;
    /// Below this y the player has fallen
    pub const FALL_DEATH_Y: f64 = 800.0;
}
