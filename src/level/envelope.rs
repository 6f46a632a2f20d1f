//! Jump reachability
//!
//! The runner integrates semi-implicit Euler (`v += g*dt; y += v*dt`). After
//! `n` steps the height is `n*v*dt - g*dt²*n(n+1)/2`, which lies exactly on
//! a continuous parabola launched at `v - g*dt/2`. Using that effective
//! launch speed keeps the envelope in agreement with the simulated arc.

use serde::{Deserialize, Serialize};

use super::content::Platform;

/// Maximum displacement coverable by a single unmodified jump
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JumpEnvelope {
    gravity: f64,
    launch_speed: f64,
    move_speed: f64,
}

impl JumpEnvelope {
    pub fn new(gravity: f64, jump_speed: f64, move_speed: f64, dt: f64) -> Self {
        Self {
            gravity,
            launch_speed: jump_speed - gravity * dt / 2.0,
            move_speed,
        }
    }

    /// Effective launch speed of the discrete arc
    pub fn launch_speed(&self) -> f64 {
        self.launch_speed
    }

    /// Apex height above the takeoff surface
    pub fn max_height(&self) -> f64 {
        self.launch_speed * self.launch_speed / (2.0 * self.gravity)
    }

    /// Time until the descending arc passes `rise` above takeoff
    ///
    /// `rise` may be negative for drops. Returns `None` above the apex.
    pub fn airtime(&self, rise: f64) -> Option<f64> {
        let v = self.launch_speed;
        let disc = v * v - 2.0 * self.gravity * rise;
        if disc < 0.0 {
            return None;
        }
        Some((v + disc.sqrt()) / self.gravity)
    }

    /// Horizontal distance coverable while reaching `rise`
    pub fn reach(&self, rise: f64) -> Option<f64> {
        self.airtime(rise).map(|t| t * self.move_speed)
    }

    /// Whether a point mass can cover `dx` horizontally and land `rise` higher
    pub fn can_cover(&self, dx: f64, rise: f64) -> bool {
        self.reach(rise).is_some_and(|reach| dx.abs() <= reach)
    }

    /// Anchor (top-left corner) of `to` reachable from the anchor of `from`
    pub fn reaches_anchor(&self, from: &Platform, to: &Platform) -> bool {
        let offset = to.anchor() - from.anchor();
        self.can_cover(offset.x, -offset.y)
    }

    /// Some point of `to`'s top surface reachable from some point of `from`'s
    pub fn can_reach(&self, from: &Platform, to: &Platform) -> bool {
        self.can_cover(from.horizontal_gap(to), from.y - to.y)
    }
}
