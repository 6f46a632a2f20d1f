//! Fixed timestep runner step
//!
//! Uses the same integration order the jump envelope assumes: velocity first,
//! then position.

use glam::DVec2;

use super::state::{Runner, RunnerEvent};
use crate::config::LevelConfig;
use crate::level::{LevelStore, Platform, PlatformQuery};

/// Input for a single step
#[derive(Debug, Clone, Copy, Default)]
pub struct RunnerInput {
    pub left: bool,
    pub right: bool,
    /// Jump (ignored while airborne)
    pub jump: bool,
}

/// Advance the runner by one `physics.dt`
pub fn step(
    runner: &mut Runner,
    input: &RunnerInput,
    store: &mut LevelStore,
    config: &LevelConfig,
) -> Vec<RunnerEvent> {
    let mut events = Vec::new();
    let physics = &config.physics;
    let body = &config.runner;
    let dt = physics.dt;

    runner.vel.x = match (input.left, input.right) {
        (true, false) => -physics.move_speed,
        (false, true) => physics.move_speed,
        _ => 0.0,
    };

    if input.jump && runner.on_ground {
        runner.vel.y = -physics.jump_speed;
        events.push(RunnerEvent::Jumped);
    }

    let was_grounded = runner.on_ground;
    let prev_feet = runner.feet(config);

    runner.vel.y += physics.gravity * dt;
    runner.pos += runner.vel * dt;
    runner.pos.x = runner.pos.x.max(0.0);
    runner.on_ground = false;

    if runner.vel.y >= 0.0 {
        let tolerance = (runner.vel.y * dt).max(body.landing_slop);
        if let Some(platform) = landing_platform(&*store, runner, prev_feet, tolerance, config) {
            runner.pos.y = platform.y - body.height;
            runner.vel.y = 0.0;
            runner.on_ground = true;
            if !was_grounded {
                events.push(RunnerEvent::Landed {
                    chunk_index: platform.chunk_index,
                });
            }
        }
    }

    let (min, max) = (runner.pos, runner.pos + DVec2::new(body.width, body.height));
    for pickup in store.pickups_mut() {
        if !pickup.collected
            && min.x < pickup.right()
            && max.x > pickup.x
            && min.y < pickup.y + pickup.height
            && max.y > pickup.y
        {
            pickup.collected = true;
            events.push(RunnerEvent::PickupCollected {
                chunk_index: pickup.chunk_index,
            });
        }
    }

    if runner.pos.y > config.ground.y + body.fall_depth {
        let respawn = respawn_point(&*store, runner.pos.x, config);
        runner.teleport(respawn);
        runner.falls += 1;
        log::debug!("runner fell, respawning at ({:.0}, {:.0})", respawn.x, respawn.y);
        events.push(RunnerEvent::Fell { respawn });
    }

    runner.best_x = runner.best_x.max(runner.pos.x);
    events
}

/// Highest platform whose top the feet crossed this step
fn landing_platform<'a, Q: PlatformQuery>(
    query: &'a Q,
    runner: &Runner,
    prev_feet: f64,
    tolerance: f64,
    config: &LevelConfig,
) -> Option<&'a Platform> {
    let feet = runner.feet(config);
    query
        .platforms_overlapping(runner.pos.x, runner.pos.x + config.runner.width)
        .filter(|p| feet >= p.y && prev_feet <= p.y + tolerance)
        .min_by(|a, b| a.y.total_cmp(&b.y))
}

/// Standing position above the platform nearest to `x`
///
/// Searches one view width either side; falls back to the spawn point on the
/// ground line when nothing is resident there.
pub fn respawn_point<Q: PlatformQuery>(query: &Q, x: f64, config: &LevelConfig) -> DVec2 {
    let body = &config.runner;
    let radius = config.stream.view_width;

    let nearest = query
        .platforms_overlapping(x - radius, x + radius)
        .min_by(|a, b| distance_to(a, x).total_cmp(&distance_to(b, x)));

    match nearest {
        Some(p) => {
            let max_x = (p.right() - body.width).max(p.x);
            DVec2::new(x.clamp(p.x, max_x), p.y - body.height)
        }
        None => DVec2::new(body.spawn_x, config.ground.y - body.height),
    }
}

fn distance_to(platform: &Platform, x: f64) -> f64 {
    (platform.x - x).max(x - platform.right()).max(0.0)
}
