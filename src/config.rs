//! Level tunables
//!
//! One `LevelConfig` describes a complete "feel": the jump physics the
//! runner integrates and the layout constants the generator draws from.
//! Both must come from the same record or platforms may become unreachable.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts;
use crate::error::ConfigError;
use crate::level::JumpEnvelope;
use crate::level::generator::REACH_SLACK;

/// Half-open float range sampled as `min + r * (max - min)`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Span {
    pub min: f64,
    pub max: f64,
}

impl Span {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    #[inline]
    pub fn sample(&self, r: f64) -> f64 {
        self.min + r * (self.max - self.min)
    }

    /// Inclusive containment check
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    fn check(&self, field: &'static str) -> Result<(), ConfigError> {
        if !(self.min <= self.max) {
            return Err(ConfigError::InvalidSpan {
                field,
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }
}

/// Inclusive integer range sampled as `min + floor(r * (max - min + 1))`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountRange {
    pub min: u32,
    pub max: u32,
}

impl CountRange {
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    #[inline]
    pub fn sample(&self, r: f64) -> u32 {
        let width = f64::from(self.max - self.min + 1);
        (self.min + (r * width).floor() as u32).min(self.max)
    }

    fn check(&self, field: &'static str) -> Result<(), ConfigError> {
        if self.min > self.max {
            return Err(ConfigError::InvalidSpan {
                field,
                min: f64::from(self.min),
                max: f64::from(self.max),
            });
        }
        Ok(())
    }
}

/// How a pickup's top edge is drawn
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PickupHeight {
    /// World y sampled directly: `y = span.sample(r)`
    Absolute(Span),
    /// Height above the ground line: `y = ground_y - span.sample(r)`
    Rise(Span),
}

impl PickupHeight {
    #[inline]
    pub fn sample(&self, ground_y: f64, r: f64) -> f64 {
        match self {
            Self::Absolute(span) => span.sample(r),
            Self::Rise(span) => ground_y - span.sample(r),
        }
    }

    pub fn span(&self) -> Span {
        match self {
            Self::Absolute(span) | Self::Rise(span) => *span,
        }
    }
}

/// Jump physics shared by the generator and the runner step
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Downward acceleration (world units per time unit squared)
    pub gravity: f64,
    /// Upward launch speed
    pub jump_speed: f64,
    /// Horizontal run speed
    pub move_speed: f64,
    /// Fixed simulation timestep (1.0 for frame-stepped physics)
    pub dt: f64,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: consts::GRAVITY,
            jump_speed: consts::JUMP_SPEED,
            move_speed: consts::MOVE_SPEED,
            dt: 1.0,
        }
    }
}

impl PhysicsConfig {
    pub fn envelope(&self) -> JumpEnvelope {
        JumpEnvelope::new(self.gravity, self.jump_speed, self.move_speed, self.dt)
    }
}

/// Walkable floor layer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroundConfig {
    /// Top surface of the floor
    pub y: f64,
    pub height: f64,
    /// Leading chunks that always get gap-free ground
    pub safe_chunks: u32,
    pub gap_chance: f64,
    pub before_gap_width: Span,
    pub gap_width: Span,
    /// Narrower after-gap segments are dropped
    pub min_after_width: f64,
}

impl Default for GroundConfig {
    fn default() -> Self {
        Self {
            y: consts::GROUND_Y,
            height: consts::GROUND_HEIGHT,
            safe_chunks: 2,
            gap_chance: 0.25,
            before_gap_width: Span::new(80.0, 200.0),
            gap_width: Span::new(80.0, 160.0),
            min_after_width: 20.0,
        }
    }
}

/// Ascending chain of floating platforms
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClimbConfig {
    /// Number of platforms in the chain, entry included
    pub levels: CountRange,
    /// Height of the entry platform above the ground
    pub entry_rise: Span,
    pub entry_width: Span,
    /// Entry x is drawn from `[start, start + chunk_width - entry_margin)`
    pub entry_margin: f64,
    /// Horizontal step offset is drawn from `±step_spread / 2`
    pub step_spread: f64,
    pub step_rise: Span,
    pub width: Span,
    /// Random inset applied when a step is clamped against a chunk edge
    pub edge_jitter: f64,
    pub thickness: f64,
}

impl Default for ClimbConfig {
    fn default() -> Self {
        Self {
            levels: CountRange::new(15, 24),
            entry_rise: Span::new(80.0, 110.0),
            entry_width: Span::new(80.0, 140.0),
            entry_margin: 100.0,
            step_spread: 170.0,
            step_rise: Span::new(40.0, 95.0),
            width: Span::new(70.0, 130.0),
            edge_jitter: 30.0,
            thickness: consts::FLOATING_HEIGHT,
        }
    }
}

/// Wide connector platforms at increasing height bands
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    pub count: CountRange,
    /// Rise of the lowest band above the ground
    pub base_rise: f64,
    pub band_spacing: f64,
    pub band_jitter: f64,
    pub width: Span,
    /// Bridge x is drawn from `[start, start + chunk_width - x_margin)`
    pub x_margin: f64,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            count: CountRange::new(2, 4),
            base_rise: 150.0,
            band_spacing: 200.0,
            band_jitter: 150.0,
            width: Span::new(90.0, 160.0),
            x_margin: 120.0,
        }
    }
}

/// Decorations, pickups and enemy spawn markers
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PropConfig {
    pub decoration_chance: f64,
    pub decoration_min_chunk: u32,
    pub decoration_inset: f64,
    pub pickup_chance: f64,
    pub pickup_min_chunk: u32,
    pub pickup_size: f64,
    pub pickup_height: PickupHeight,
    /// Per-bridge chance of an enemy spawn marker
    pub spawn_chance: f64,
    pub spawn_min_chunk: u32,
    /// Spawn marker height above its bridge
    pub spawn_hover: f64,
}

impl Default for PropConfig {
    fn default() -> Self {
        Self {
            decoration_chance: 0.3,
            decoration_min_chunk: 1,
            decoration_inset: 50.0,
            pickup_chance: 0.08,
            pickup_min_chunk: 3,
            pickup_size: 25.0,
            pickup_height: PickupHeight::Absolute(Span::new(250.0, 450.0)),
            spawn_chance: 0.0,
            spawn_min_chunk: 3,
            spawn_hover: 50.0,
        }
    }
}

/// Player body used by the simulation step
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    pub width: f64,
    pub height: f64,
    /// Falling this far below the ground counts as a fall
    pub fall_depth: f64,
    pub spawn_x: f64,
    /// Minimum landing tolerance below a platform top
    pub landing_slop: f64,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            width: consts::PLAYER_SIZE,
            height: consts::PLAYER_SIZE,
            fall_depth: consts::FALL_DEATH_Y - consts::GROUND_Y,
            spawn_x: 100.0,
            landing_slop: 5.0,
        }
    }
}

/// Lazy generation and eviction window
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StreamConfig {
    pub view_width: f64,
    /// Chunks generated beyond the right edge of the view
    pub lookahead_chunks: u32,
    /// Extra distance kept behind the view before eviction
    pub evict_margin: f64,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            view_width: 800.0,
            lookahead_chunks: 2,
            evict_margin: 0.0,
        }
    }
}

/// Complete level configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelConfig {
    pub chunk_width: f64,
    /// Chunk seed is `index * seed_stride + seed_offset`
    pub seed_stride: u32,
    pub seed_offset: u32,
    pub physics: PhysicsConfig,
    pub ground: GroundConfig,
    pub climb: ClimbConfig,
    pub bridges: BridgeConfig,
    pub props: PropConfig,
    pub runner: RunnerConfig,
    pub stream: StreamConfig,
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self::runner()
    }
}

impl LevelConfig {
    /// Frame-stepped endless runner
    pub fn runner() -> Self {
        Self {
            chunk_width: consts::CHUNK_WIDTH,
            seed_stride: 7919,
            seed_offset: 12345,
            physics: PhysicsConfig::default(),
            ground: GroundConfig::default(),
            climb: ClimbConfig::default(),
            bridges: BridgeConfig::default(),
            props: PropConfig::default(),
            runner: RunnerConfig::default(),
            stream: StreamConfig::default(),
        }
    }

    /// Seconds-based side scroller: heavier gravity, faster run, wider chunks
    pub fn side_scroller() -> Self {
        Self {
            chunk_width: 620.0,
            seed_stride: 913,
            seed_offset: 19,
            physics: PhysicsConfig {
                gravity: 2000.0,
                jump_speed: 650.0,
                move_speed: 340.0,
                dt: 1.0 / 60.0,
            },
            ground: GroundConfig {
                y: 430.0,
                height: 40.0,
                safe_chunks: 2,
                gap_chance: 0.25,
                before_gap_width: Span::new(160.0, 400.0),
                gap_width: Span::new(80.0, 150.0),
                min_after_width: 40.0,
            },
            climb: ClimbConfig {
                levels: CountRange::new(8, 12),
                entry_rise: Span::new(60.0, 90.0),
                entry_width: Span::new(90.0, 150.0),
                entry_margin: 160.0,
                step_spread: 200.0,
                step_rise: Span::new(35.0, 80.0),
                width: Span::new(90.0, 150.0),
                edge_jitter: 30.0,
                thickness: 18.0,
            },
            bridges: BridgeConfig {
                count: CountRange::new(2, 4),
                base_rise: 120.0,
                band_spacing: 160.0,
                band_jitter: 120.0,
                width: Span::new(90.0, 220.0),
                x_margin: 200.0,
            },
            props: PropConfig {
                decoration_chance: 0.3,
                decoration_min_chunk: 1,
                decoration_inset: 50.0,
                pickup_chance: 0.65,
                pickup_min_chunk: 3,
                pickup_size: 16.0,
                pickup_height: PickupHeight::Rise(Span::new(60.0, 90.0)),
                spawn_chance: 0.35,
                spawn_min_chunk: 2,
                spawn_hover: 50.0,
            },
            runner: RunnerConfig {
                width: 36.0,
                height: 48.0,
                fall_depth: 250.0,
                spawn_x: 140.0,
                landing_slop: 5.0,
            },
            stream: StreamConfig {
                view_width: 960.0,
                lookahead_chunks: 2,
                evict_margin: 0.0,
            },
        }
    }

    /// Look up a preset by name
    pub fn preset(name: &str) -> Result<Self, ConfigError> {
        match name.to_lowercase().as_str() {
            "runner" => Ok(Self::runner()),
            "side-scroller" | "side_scroller" | "scroller" => Ok(Self::side_scroller()),
            _ => Err(ConfigError::UnknownPreset(name.to_string())),
        }
    }

    /// Parse a JSON config (missing fields take runner values) and validate it
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded level config from {}", path.display());
        Ok(config)
    }

    /// Seed of the stream for chunk `index`
    #[inline]
    pub fn chunk_seed(&self, index: u32) -> u32 {
        index
            .wrapping_mul(self.seed_stride)
            .wrapping_add(self.seed_offset)
    }

    /// World x of the left edge of chunk `index`
    #[inline]
    pub fn chunk_start(&self, index: u32) -> f64 {
        f64::from(index) * self.chunk_width
    }

    /// Chunk index containing world x (negative x maps to chunk 0)
    pub fn chunk_at(&self, x: f64) -> u32 {
        (x / self.chunk_width).floor().max(0.0) as u32
    }

    pub fn envelope(&self) -> JumpEnvelope {
        self.physics.envelope()
    }

    /// Reject constant sets that would break traversability
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("chunk_width", self.chunk_width),
            ("physics.gravity", self.physics.gravity),
            ("physics.move_speed", self.physics.move_speed),
            ("physics.dt", self.physics.dt),
            ("ground.height", self.ground.height),
            ("ground.min_after_width", self.ground.min_after_width),
            ("climb.thickness", self.climb.thickness),
            ("bridges.base_rise", self.bridges.base_rise),
            ("climb.width.min", self.climb.width.min),
            ("climb.entry_width.min", self.climb.entry_width.min),
            ("bridges.width.min", self.bridges.width.min),
            ("props.pickup_size", self.props.pickup_size),
            ("runner.width", self.runner.width),
            ("runner.height", self.runner.height),
            ("stream.view_width", self.stream.view_width),
        ];
        for (field, value) in positive {
            if !(value > 0.0) {
                return Err(ConfigError::NonPositive { field, value });
            }
        }

        let envelope = self.envelope();
        if !(envelope.max_height() > 0.0) {
            return Err(ConfigError::NonPositive {
                field: "physics.jump_speed",
                value: self.physics.jump_speed,
            });
        }

        for (field, span) in [
            ("ground.before_gap_width", self.ground.before_gap_width),
            ("ground.gap_width", self.ground.gap_width),
            ("climb.entry_rise", self.climb.entry_rise),
            ("climb.entry_width", self.climb.entry_width),
            ("climb.step_rise", self.climb.step_rise),
            ("climb.width", self.climb.width),
            ("bridges.width", self.bridges.width),
            ("props.pickup_height", self.props.pickup_height.span()),
        ] {
            span.check(field)?;
        }
        self.climb.levels.check("climb.levels")?;
        self.bridges.count.check("bridges.count")?;
        if self.climb.levels.min == 0 {
            return Err(ConfigError::NonPositive {
                field: "climb.levels.min",
                value: 0.0,
            });
        }

        for (field, value) in [
            ("ground.gap_chance", self.ground.gap_chance),
            ("props.decoration_chance", self.props.decoration_chance),
            ("props.pickup_chance", self.props.pickup_chance),
            ("props.spawn_chance", self.props.spawn_chance),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::Probability { field, value });
            }
        }

        for (field, width) in [
            ("ground.before_gap_width.max", self.ground.before_gap_width.max),
            ("climb.entry_margin", self.climb.entry_margin),
            ("climb.width.max + climb.edge_jitter", self.climb.width.max + self.climb.edge_jitter),
            ("climb.entry_width.max", self.climb.entry_width.max),
            ("bridges.x_margin", self.bridges.x_margin),
            (
                "bridges.width.max - bridges.x_margin",
                self.bridges.width.max - self.bridges.x_margin,
            ),
            ("props.decoration_inset * 2", self.props.decoration_inset * 2.0),
            ("props.pickup_size", self.props.pickup_size),
        ] {
            if width >= self.chunk_width {
                return Err(ConfigError::TooWide {
                    field,
                    width,
                    chunk_width: self.chunk_width,
                });
            }
        }

        let max_height = envelope.max_height();
        for (field, rise) in [
            ("climb.entry_rise.max", self.climb.entry_rise.max),
            ("climb.step_rise.max", self.climb.step_rise.max),
        ] {
            if rise >= max_height {
                return Err(ConfigError::RiseOutOfReach {
                    field,
                    rise,
                    max_height,
                });
            }
        }

        // Steepest step must still cover the drawn spread and any width swap
        // within the reach a pulled step is clamped to
        let rise = self.climb.step_rise.max;
        let reach = envelope.reach(rise).unwrap_or(0.0);
        let step_reach = reach * REACH_SLACK;
        let widest = self.climb.width.max.max(self.climb.entry_width.max);
        let narrowest = self.climb.width.min.min(self.climb.entry_width.min);
        for (field, distance) in [
            ("climb.step_spread / 2", self.climb.step_spread / 2.0),
            ("climb width spread", widest - narrowest),
        ] {
            if distance > step_reach {
                return Err(ConfigError::SpreadOutOfReach {
                    field,
                    distance,
                    rise,
                    reach: step_reach,
                });
            }
        }

        // Worst horizontal gap left after centring a bridge over its anchor
        let narrowest_anchor = narrowest
            .min(self.ground.min_after_width)
            .min(self.ground.before_gap_width.min);
        let overhang = self.bridges.x_margin - self.bridges.width.min - narrowest_anchor;
        if overhang > reach {
            return Err(ConfigError::SpreadOutOfReach {
                field: "bridges.x_margin",
                distance: overhang,
                rise,
                reach,
            });
        }

        let flat_reach = envelope.reach(0.0).unwrap_or(0.0);
        let hole = self.ground.gap_width.max + self.ground.min_after_width;
        if hole > flat_reach {
            return Err(ConfigError::SpreadOutOfReach {
                field: "ground.gap_width.max + ground.min_after_width",
                distance: hole,
                rise: 0.0,
                reach: flat_reach,
            });
        }

        Ok(())
    }
}
