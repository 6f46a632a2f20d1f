//! Chunk generator
//!
//! `generate(i)` is a pure function of the chunk index and the config. All
//! randomness comes from one `Lcg32` seeded with `chunk_seed(i)` and is drawn
//! in a fixed order: ground, climbing chain, bridges, props, spawns. Placement
//! repairs that keep platforms reachable never draw, so they leave the
//! stream untouched.

use std::ops::Range;

use rand::SeedableRng;

use super::content::{ChunkContent, Decoration, DecorationKind, Pickup, Platform, PlatformKind, SpawnPoint};
use super::envelope::JumpEnvelope;
use crate::config::LevelConfig;
use crate::error::ConfigError;
use crate::rng::Lcg32;

/// Fraction of the envelope reach used when pulling a step back into range
pub const REACH_SLACK: f64 = 0.98;

/// Horizontal extent of one chunk
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChunkBounds {
    pub start: f64,
    pub width: f64,
}

impl ChunkBounds {
    #[inline]
    pub fn end(&self) -> f64 {
        self.start + self.width
    }

    /// Whether `x` lies in `[start, end)`
    #[inline]
    pub fn contains(&self, x: f64) -> bool {
        x >= self.start && x < self.end()
    }
}

/// Produces chunk content; holds nothing but the validated config
#[derive(Debug, Clone)]
pub struct ChunkGenerator {
    config: LevelConfig,
    envelope: JumpEnvelope,
}

impl ChunkGenerator {
    pub fn new(config: LevelConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let envelope = config.envelope();
        Ok(Self { config, envelope })
    }

    pub fn config(&self) -> &LevelConfig {
        &self.config
    }

    pub fn envelope(&self) -> JumpEnvelope {
        self.envelope
    }

    pub fn bounds(&self, chunk_index: u32) -> ChunkBounds {
        ChunkBounds {
            start: self.config.chunk_start(chunk_index),
            width: self.config.chunk_width,
        }
    }

    /// Generate the content of chunk `chunk_index`
    pub fn generate(&self, chunk_index: u32) -> ChunkContent {
        let seed = self.config.chunk_seed(chunk_index);
        let mut rng = Lcg32::seed_from_u64(u64::from(seed));
        let bounds = self.bounds(chunk_index);
        let mut content = ChunkContent::new(chunk_index);

        self.lay_ground(&mut rng, bounds, &mut content);
        self.lay_climb(&mut rng, bounds, &mut content);
        self.lay_bridges(&mut rng, bounds, &mut content);
        self.lay_props(&mut rng, bounds, &mut content);
        self.lay_spawns(&mut rng, &mut content);

        log::debug!(
            "chunk {} (seed {}): {} platforms, {} decorations, {} pickups, {} spawns",
            chunk_index,
            seed,
            content.platforms.len(),
            content.decorations.len(),
            content.pickups.len(),
            content.spawns.len()
        );
        content
    }

    /// Generate consecutive chunks in order
    pub fn generate_range(&self, chunks: Range<u32>) -> impl Iterator<Item = ChunkContent> + '_ {
        chunks.map(|i| self.generate(i))
    }

    fn lay_ground(&self, rng: &mut Lcg32, bounds: ChunkBounds, content: &mut ChunkContent) {
        let ground = &self.config.ground;
        let index = content.index;
        let segment = |x: f64, width: f64| {
            Platform::new(x, ground.y, width, ground.height, PlatformKind::Ground, index)
        };

        if index < ground.safe_chunks || !rng.chance(ground.gap_chance) {
            content.platforms.push(segment(bounds.start, bounds.width));
            return;
        }

        let before = ground.before_gap_width.sample(rng.next_f64());
        let gap = ground.gap_width.sample(rng.next_f64());
        content.platforms.push(segment(bounds.start, before));

        let after = bounds.width - before - gap;
        if after >= ground.min_after_width {
            content.platforms.push(segment(bounds.start + before + gap, after));
        }
    }

    fn lay_climb(&self, rng: &mut Lcg32, bounds: ChunkBounds, content: &mut ChunkContent) {
        let climb = &self.config.climb;
        let index = content.index;

        let levels = climb.levels.sample(rng.next_f64());
        let x = bounds.start + rng.next_f64() * (bounds.width - climb.entry_margin);
        let y = self.config.ground.y - climb.entry_rise.sample(rng.next_f64());
        let width = climb.entry_width.sample(rng.next_f64());

        let mut entry = Platform::new(x, y, width, climb.thickness, PlatformKind::CLIMB, index);
        entry.x = entry.x.min(bounds.end() - width);
        self.settle_entry(&mut entry, bounds, &content.platforms);

        let mut prev = entry.clone();
        content.platforms.push(entry);

        for _ in 1..levels {
            let dx = (rng.next_f64() - 0.5) * climb.step_spread;
            let rise = climb.step_rise.sample(rng.next_f64());
            let width = climb.width.sample(rng.next_f64());

            let mut x = prev.x + dx;
            if x < bounds.start {
                x = bounds.start + rng.next_f64() * climb.edge_jitter;
            }
            if x + width > bounds.end() {
                x = bounds.end() - width - rng.next_f64() * climb.edge_jitter;
            }

            let mut next = Platform::new(x, prev.y - rise, width, climb.thickness, PlatformKind::CLIMB, index);
            self.pull_within_reach(&prev, &mut next, bounds);
            prev = next.clone();
            content.platforms.push(next);
        }
    }

    /// Slide the entry platform over the nearest ground segment if no segment
    /// of this chunk can reach it
    fn settle_entry(&self, entry: &mut Platform, bounds: ChunkBounds, ground: &[Platform]) {
        if ground.iter().any(|g| self.envelope.can_reach(g, entry)) {
            return;
        }
        let nearest = ground
            .iter()
            .min_by(|a, b| a.horizontal_gap(entry).total_cmp(&b.horizontal_gap(entry)));
        if let Some(segment) = nearest {
            let from = entry.x;
            let hi = bounds.end() - entry.width;
            center_over(entry, segment, bounds.start, hi);
            log::trace!("chunk {}: entry slid {} -> {}", entry.chunk_index, from, entry.x);
        }
    }

    /// Pull `next` horizontally toward `prev` until its anchor is in reach
    fn pull_within_reach(&self, prev: &Platform, next: &mut Platform, bounds: ChunkBounds) {
        if self.envelope.reaches_anchor(prev, next) {
            return;
        }
        let reach = self.envelope.reach(prev.y - next.y).unwrap_or(0.0) * REACH_SLACK;
        let lo = bounds.start.max(prev.x - reach);
        let hi = (bounds.end() - next.width).min(prev.x + reach);
        let from = next.x;
        next.x = next.x.max(lo).min(hi);
        log::trace!("chunk {}: step pulled {} -> {}", next.chunk_index, from, next.x);
    }

    fn lay_bridges(&self, rng: &mut Lcg32, bounds: ChunkBounds, content: &mut ChunkContent) {
        let bridges = &self.config.bridges;
        let index = content.index;

        let count = bridges.count.sample(rng.next_f64());
        for band in 0..count {
            let rise = bridges.base_rise
                + f64::from(band) * bridges.band_spacing
                + rng.next_f64() * bridges.band_jitter;
            let x = bounds.start + rng.next_f64() * (bounds.width - bridges.x_margin);
            let width = bridges.width.sample(rng.next_f64());

            let mut bridge = Platform::new(
                x,
                self.config.ground.y - rise,
                width,
                self.config.climb.thickness,
                PlatformKind::BRIDGE,
                index,
            );
            self.anchor_bridge(&mut bridge, bounds, &content.platforms);
            content.platforms.push(bridge);
        }
    }

    /// Make `bridge` reachable from something already placed in the chunk
    ///
    /// Anchors on the highest platform at or below it: lowers the bridge to
    /// one step above that platform if needed, then centres it over it.
    fn anchor_bridge(&self, bridge: &mut Platform, bounds: ChunkBounds, placed: &[Platform]) {
        if placed.iter().any(|p| self.envelope.can_reach(p, bridge)) {
            return;
        }
        let Some(anchor) = placed
            .iter()
            .filter(|p| p.y >= bridge.y)
            .min_by(|a, b| a.y.total_cmp(&b.y))
        else {
            return;
        };

        let from = bridge.anchor();
        let max_rise = self.config.climb.step_rise.max;
        if anchor.y - bridge.y > max_rise {
            bridge.y = anchor.y - max_rise;
        }
        let hi = bounds.end() - self.config.bridges.x_margin;
        center_over(bridge, anchor, bounds.start, hi);
        log::trace!(
            "chunk {}: bridge anchored {:?} -> {:?}",
            bridge.chunk_index,
            from,
            bridge.anchor()
        );
    }

    fn lay_props(&self, rng: &mut Lcg32, bounds: ChunkBounds, content: &mut ChunkContent) {
        let props = &self.config.props;
        let ground_y = self.config.ground.y;
        let index = content.index;

        if rng.chance(props.decoration_chance) && index >= props.decoration_min_chunk {
            let inset = props.decoration_inset;
            let x = bounds.start + inset + rng.next_f64() * (bounds.width - 2.0 * inset);
            content.decorations.push(Decoration {
                x,
                y: ground_y,
                kind: DecorationKind::Pole,
                chunk_index: index,
            });
        }

        if rng.chance(props.pickup_chance) && index >= props.pickup_min_chunk {
            let x = bounds.start + rng.next_f64() * (bounds.width - props.pickup_size);
            let y = props.pickup_height.sample(ground_y, rng.next_f64());
            content.pickups.push(Pickup {
                x,
                y,
                width: props.pickup_size,
                height: props.pickup_size,
                collected: false,
                chunk_index: index,
            });
        }
    }

    fn lay_spawns(&self, rng: &mut Lcg32, content: &mut ChunkContent) {
        let props = &self.config.props;
        let index = content.index;
        let perches: Vec<(f64, f64)> = content.bridges().map(|b| (b.center_x(), b.y)).collect();

        for (x, y) in perches {
            if rng.chance(props.spawn_chance) && index >= props.spawn_min_chunk {
                content.spawns.push(SpawnPoint {
                    x,
                    y: y - props.spawn_hover,
                    chunk_index: index,
                });
            }
        }
    }
}

/// Centre `platform` over `anchor`, keeping its x within `[lo, hi]`
fn center_over(platform: &mut Platform, anchor: &Platform, lo: f64, hi: f64) {
    platform.x = (anchor.center_x() - platform.width / 2.0).max(lo).min(hi);
}
