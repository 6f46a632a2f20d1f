//! Runner state and simulation events

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::config::LevelConfig;

/// Something that happened during one step
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum RunnerEvent {
    /// Left the ground with a jump
    Jumped,
    /// Touched down on a platform top after being airborne
    Landed { chunk_index: u32 },
    /// Overlapped an uncollected pickup
    PickupCollected { chunk_index: u32 },
    /// Fell below the death line and was moved to `respawn`
    Fell { respawn: DVec2 },
}

/// Player body
///
/// `pos` is the top-left corner of the body box (y down).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Runner {
    pub pos: DVec2,
    pub vel: DVec2,
    pub on_ground: bool,
    /// Number of falls so far
    pub falls: u32,
    /// Furthest x reached
    pub best_x: f64,
}

impl Runner {
    /// Runner standing on the ground line at the configured spawn x
    pub fn new(config: &LevelConfig) -> Self {
        let pos = DVec2::new(config.runner.spawn_x, config.ground.y - config.runner.height);
        Self {
            pos,
            vel: DVec2::ZERO,
            on_ground: false,
            falls: 0,
            best_x: pos.x,
        }
    }

    /// Bottom edge of the body
    #[inline]
    pub fn feet(&self, config: &LevelConfig) -> f64 {
        self.pos.y + config.runner.height
    }

    /// Move to `pos` at rest
    pub fn teleport(&mut self, pos: DVec2) {
        self.pos = pos;
        self.vel = DVec2::ZERO;
        self.on_ground = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_runner_on_ground_line() {
        let config = LevelConfig::runner();
        let runner = Runner::new(&config);
        assert_eq!(runner.feet(&config), config.ground.y);
        assert_eq!(runner.pos.x, config.runner.spawn_x);
        assert_eq!(runner.best_x, config.runner.spawn_x);
        assert_eq!(runner.falls, 0);
    }

    #[test]
    fn test_teleport_resets_motion() {
        let config = LevelConfig::side_scroller();
        let mut runner = Runner::new(&config);
        runner.vel = DVec2::new(340.0, -650.0);
        runner.on_ground = true;
        runner.teleport(DVec2::new(500.0, 100.0));
        assert_eq!(runner.vel, DVec2::ZERO);
        assert!(!runner.on_ground);
        assert_eq!(runner.pos, DVec2::new(500.0, 100.0));
    }
}
