//! Level store
//!
//! Owns every live record. The frame loop is the only writer: `append` when a
//! chunk is generated, `evict_before` once per frame. Collision code reads
//! platforms through [`PlatformQuery`] so the linear scan can later be
//! replaced by a spatial index without touching call sites.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::content::{ChunkContent, Decoration, Pickup, Platform, SpawnPoint};

/// Spatial query contract used by the collision step
pub trait PlatformQuery {
    /// Platforms whose horizontal extent overlaps `(min_x, max_x)`
    fn platforms_overlapping(&self, min_x: f64, max_x: f64) -> impl Iterator<Item = &Platform>;
}

/// Flat record collections tagged by originating chunk
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LevelStore {
    platforms: Vec<Platform>,
    decorations: Vec<Decoration>,
    pickups: Vec<Pickup>,
    spawns: Vec<SpawnPoint>,
    /// Chunks with at least one live record
    resident: BTreeSet<u32>,
    highest: Option<u32>,
}

impl LevelStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a generated chunk
    ///
    /// Appending a chunk that is still resident is ignored and returns false;
    /// generation is deterministic, so the records would be identical.
    pub fn append(&mut self, content: ChunkContent) -> bool {
        let index = content.index;
        if self.resident.contains(&index) {
            log::warn!("chunk {} already resident, ignoring append", index);
            return false;
        }
        if content.is_empty() {
            return false;
        }

        self.platforms.extend(content.platforms);
        self.decorations.extend(content.decorations);
        self.pickups.extend(content.pickups);
        self.spawns.extend(content.spawns);
        self.resident.insert(index);
        self.highest = Some(self.highest.map_or(index, |h| h.max(index)));
        true
    }

    /// Remove every record whose right edge lies left of `world_x`
    ///
    /// Returns the number of records removed.
    pub fn evict_before(&mut self, world_x: f64) -> usize {
        let before = self.len();

        self.platforms.retain(|p| p.right() >= world_x);
        self.decorations.retain(|d| d.x >= world_x);
        self.pickups.retain(|p| p.right() >= world_x);
        self.spawns.retain(|s| s.x >= world_x);

        let removed = before - self.len();
        if removed > 0 {
            let live: BTreeSet<u32> = self
                .platforms
                .iter()
                .map(|p| p.chunk_index)
                .chain(self.decorations.iter().map(|d| d.chunk_index))
                .chain(self.pickups.iter().map(|p| p.chunk_index))
                .chain(self.spawns.iter().map(|s| s.chunk_index))
                .collect();
            self.resident = live;
        }
        removed
    }

    pub fn platforms(&self) -> &[Platform] {
        &self.platforms
    }

    pub fn decorations(&self) -> &[Decoration] {
        &self.decorations
    }

    pub fn pickups(&self) -> &[Pickup] {
        &self.pickups
    }

    /// Mutable pickups, for the collision step to mark them collected
    pub fn pickups_mut(&mut self) -> &mut [Pickup] {
        &mut self.pickups
    }

    pub fn spawns(&self) -> &[SpawnPoint] {
        &self.spawns
    }

    /// Highest chunk index ever appended
    pub fn highest_chunk(&self) -> Option<u32> {
        self.highest
    }

    pub fn contains_chunk(&self, index: u32) -> bool {
        self.resident.contains(&index)
    }

    /// Resident chunk indices in ascending order
    pub fn resident_chunks(&self) -> impl Iterator<Item = u32> + '_ {
        self.resident.iter().copied()
    }

    /// Total live records
    pub fn len(&self) -> usize {
        self.platforms.len() + self.decorations.len() + self.pickups.len() + self.spawns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

impl PlatformQuery for LevelStore {
    fn platforms_overlapping(&self, min_x: f64, max_x: f64) -> impl Iterator<Item = &Platform> {
        self.platforms.iter().filter(move |p| p.overlaps_x(min_x, max_x))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::{DecorationKind, PlatformKind};

    fn chunk(index: u32) -> ChunkContent {
        let x = f64::from(index) * 400.0;
        let mut content = ChunkContent::new(index);
        content
            .platforms
            .push(Platform::new(x, 550.0, 400.0, 50.0, PlatformKind::Ground, index));
        content
            .platforms
            .push(Platform::new(x + 100.0, 450.0, 80.0, 20.0, PlatformKind::CLIMB, index));
        content.decorations.push(Decoration {
            x: x + 200.0,
            y: 550.0,
            kind: DecorationKind::Pole,
            chunk_index: index,
        });
        content.pickups.push(Pickup {
            x: x + 300.0,
            y: 400.0,
            width: 25.0,
            height: 25.0,
            collected: false,
            chunk_index: index,
        });
        content
    }

    #[test]
    fn test_append() {
        let mut store = LevelStore::new();
        assert!(store.is_empty());
        assert!(store.append(chunk(0)));
        assert!(store.append(chunk(1)));
        assert_eq!(store.platforms().len(), 4);
        assert_eq!(store.decorations().len(), 2);
        assert_eq!(store.pickups().len(), 2);
        assert_eq!(store.len(), 8);
        assert_eq!(store.highest_chunk(), Some(1));
        assert!(store.contains_chunk(0));
    }

    #[test]
    fn test_duplicate_append_ignored() {
        let mut store = LevelStore::new();
        assert!(store.append(chunk(0)));
        assert!(!store.append(chunk(0)));
        assert_eq!(store.len(), 4);
    }

    #[test]
    fn test_evict_before() {
        let mut store = LevelStore::new();
        for i in 0..3 {
            store.append(chunk(i));
        }

        // Chunk 0 ends at 400; its pickup ends at 325
        let removed = store.evict_before(401.0);
        assert_eq!(removed, 4);
        assert!(!store.contains_chunk(0));
        assert!(store.contains_chunk(1));
        assert!(store.platforms().iter().all(|p| p.chunk_index > 0));
        assert_eq!(store.resident_chunks().collect::<Vec<_>>(), vec![1, 2]);

        // Partial eviction keeps the chunk resident
        let removed = store.evict_before(590.0);
        assert_eq!(removed, 1);
        assert!(store.contains_chunk(1));
        assert_eq!(store.highest_chunk(), Some(2));
    }

    #[test]
    fn test_evicted_chunk_can_be_appended_again() {
        let mut store = LevelStore::new();
        store.append(chunk(0));
        store.evict_before(10_000.0);
        assert!(store.is_empty());
        assert!(store.append(chunk(0)));
    }

    #[test]
    fn test_platforms_overlapping() {
        let mut store = LevelStore::new();
        store.append(chunk(0));
        store.append(chunk(1));

        let hits: Vec<_> = store.platforms_overlapping(90.0, 130.0).collect();
        assert_eq!(hits.len(), 2);

        let hits: Vec<_> = store.platforms_overlapping(390.0, 410.0).collect();
        assert_eq!(hits.len(), 2);
        assert!(hits.iter().all(|p| p.kind.is_ground()));
    }

    #[test]
    fn test_pickups_mut() {
        let mut store = LevelStore::new();
        store.append(chunk(0));
        store.pickups_mut()[0].collected = true;
        assert!(store.pickups()[0].collected);
    }
}
