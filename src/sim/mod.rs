//! Deterministic runner simulation
//!
//! Fixed timestep only, no rendering or platform dependencies. The caller owns
//! the `Runner` and the `LevelStore` and calls `step` once per tick.

pub mod state;
pub mod tick;

pub use state::{Runner, RunnerEvent};
pub use tick::{RunnerInput, respawn_point, step};
