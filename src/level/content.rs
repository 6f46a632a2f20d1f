//! Level records emitted by the generator
//!
//! Plain data: the generator never keeps references to what it returns, and
//! only the level store mutates records after creation.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Role of a floating platform within its chunk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FloatingRole {
    /// Part of the ascending chain
    Climb,
    /// Wide connector at a height band
    Bridge,
}

/// Platform kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlatformKind {
    /// Walkable floor
    Ground,
    /// Reachable only by jumping
    Floating(FloatingRole),
}

impl PlatformKind {
    pub const CLIMB: Self = Self::Floating(FloatingRole::Climb);
    pub const BRIDGE: Self = Self::Floating(FloatingRole::Bridge);

    pub fn is_ground(self) -> bool {
        self == Self::Ground
    }

    pub fn is_floating(self) -> bool {
        matches!(self, Self::Floating(_))
    }
}

/// Axis-aligned platform; `y` is the top surface (screen space, y down)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub kind: PlatformKind,
    pub chunk_index: u32,
}

impl Platform {
    pub fn new(x: f64, y: f64, width: f64, height: f64, kind: PlatformKind, chunk_index: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
            kind,
            chunk_index,
        }
    }

    /// Top-left corner
    #[inline]
    pub fn anchor(&self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }

    #[inline]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    #[inline]
    pub fn center_x(&self) -> f64 {
        self.x + self.width / 2.0
    }

    /// Horizontal distance between the two top surfaces (0 when they overlap)
    pub fn horizontal_gap(&self, other: &Platform) -> f64 {
        (other.x - self.right()).max(self.x - other.right()).max(0.0)
    }

    /// Whether `[min_x, max_x]` overlaps this platform horizontally
    #[inline]
    pub fn overlaps_x(&self, min_x: f64, max_x: f64) -> bool {
        self.x < max_x && self.right() > min_x
    }
}

/// Cosmetic prop kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DecorationKind {
    /// Utility pole standing on the ground line
    Pole,
}

/// Purely cosmetic marker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decoration {
    pub x: f64,
    pub y: f64,
    pub kind: DecorationKind,
    pub chunk_index: u32,
}

/// Collectible power-up; only the collision step flips `collected`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pickup {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub collected: bool,
    pub chunk_index: u32,
}

impl Pickup {
    #[inline]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }
}

/// Enemy spawn descriptor hovering above a bridge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpawnPoint {
    pub x: f64,
    pub y: f64,
    pub chunk_index: u32,
}

/// Everything generated for one chunk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChunkContent {
    pub index: u32,
    pub platforms: Vec<Platform>,
    pub decorations: Vec<Decoration>,
    pub pickups: Vec<Pickup>,
    pub spawns: Vec<SpawnPoint>,
}

impl ChunkContent {
    pub fn new(index: u32) -> Self {
        Self {
            index,
            platforms: Vec::new(),
            decorations: Vec::new(),
            pickups: Vec::new(),
            spawns: Vec::new(),
        }
    }

    pub fn ground(&self) -> impl Iterator<Item = &Platform> {
        self.platforms.iter().filter(|p| p.kind.is_ground())
    }

    /// Climbing chain in placement order (entry first)
    pub fn climb(&self) -> impl Iterator<Item = &Platform> {
        self.platforms.iter().filter(|p| p.kind == PlatformKind::CLIMB)
    }

    pub fn bridges(&self) -> impl Iterator<Item = &Platform> {
        self.platforms.iter().filter(|p| p.kind == PlatformKind::BRIDGE)
    }

    /// Total number of records
    pub fn len(&self) -> usize {
        self.platforms.len() + self.decorations.len() + self.pickups.len() + self.spawns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
