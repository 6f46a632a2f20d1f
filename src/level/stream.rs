//! Lazy chunk streaming
//!
//! Called once per frame: generates every chunk up to the frontier ahead of
//! the camera, then evicts what has scrolled far enough behind it.

use super::content::ChunkContent;
use super::generator::ChunkGenerator;
use super::store::LevelStore;
use crate::config::StreamConfig;

/// What one `advance` call did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StreamReport {
    pub generated: u32,
    pub evicted: usize,
}

/// Drives the generator from the camera position
#[derive(Debug, Clone)]
pub struct ChunkStreamer {
    generator: ChunkGenerator,
    config: StreamConfig,
    /// Next chunk index to generate (one past `u32::MAX` once exhausted)
    next_chunk: u64,
}

impl ChunkStreamer {
    pub fn new(generator: ChunkGenerator, config: StreamConfig) -> Self {
        Self {
            generator,
            config,
            next_chunk: 0,
        }
    }

    /// Streamer using the stream settings carried by the generator's config
    pub fn from_generator(generator: ChunkGenerator) -> Self {
        let config = generator.config().stream;
        Self::new(generator, config)
    }

    pub fn generator(&self) -> &ChunkGenerator {
        &self.generator
    }

    /// Next chunk index the streamer will generate
    pub fn generated(&self) -> u64 {
        self.next_chunk
    }

    /// Highest chunk index that must exist for a camera at `camera_x`
    ///
    /// Saturates at `u32::MAX` far from the origin.
    pub fn frontier(&self, camera_x: f64) -> u32 {
        let chunk_width = self.generator.config().chunk_width;
        let visible = (self.config.view_width / chunk_width).ceil() as u32;
        self.generator
            .config()
            .chunk_at(camera_x)
            .saturating_add(visible)
            .saturating_add(self.config.lookahead_chunks)
    }

    /// First chunk that can still hold records right of the eviction line
    ///
    /// A chunk's records end before the start of the chunk after next, so
    /// anything older would be evicted as soon as it was appended.
    fn first_live_chunk(&self, camera_x: f64) -> u64 {
        let line = self.eviction_line(camera_x);
        u64::from(self.generator.config().chunk_at(line).saturating_sub(1))
    }

    /// World x left of which records are evicted
    pub fn eviction_line(&self, camera_x: f64) -> f64 {
        camera_x - self.config.view_width - self.generator.config().chunk_width - self.config.evict_margin
    }

    /// Generate up to the frontier, then evict behind the camera
    pub fn advance(&mut self, camera_x: f64, store: &mut LevelStore) -> StreamReport {
        let frontier = self.frontier(camera_x);
        let mut report = StreamReport::default();

        let first_live = self.first_live_chunk(camera_x);
        if first_live > self.next_chunk {
            log::debug!("stream skipping chunks {}..{} behind the camera", self.next_chunk, first_live);
            self.next_chunk = first_live;
        }

        while self.next_chunk <= u64::from(frontier) {
            if let Some(content) = self.generate_next() {
                if store.append(content) {
                    report.generated += 1;
                }
            }
        }

        report.evicted = store.evict_before(self.eviction_line(camera_x));
        if report.generated > 0 || report.evicted > 0 {
            log::debug!(
                "stream at x={:.0}: +{} chunks, -{} records, frontier {}",
                camera_x,
                report.generated,
                report.evicted,
                frontier
            );
        }
        report
    }

    /// Generate chunks `0..count` that are not generated yet
    pub fn prime(&mut self, count: u32, store: &mut LevelStore) -> u32 {
        let mut generated = 0;
        while self.next_chunk < u64::from(count) {
            if let Some(content) = self.generate_next() {
                if store.append(content) {
                    generated += 1;
                }
            }
        }
        generated
    }

    /// Generate `next_chunk` and step past it
    fn generate_next(&mut self) -> Option<ChunkContent> {
        let index = u32::try_from(self.next_chunk).ok()?;
        self.next_chunk += 1;
        Some(self.generator.generate(index))
    }

    /// Restart from chunk 0 (the caller clears its store)
    pub fn reset(&mut self) {
        self.next_chunk = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LevelConfig;

    fn streamer() -> ChunkStreamer {
        ChunkStreamer::from_generator(ChunkGenerator::new(LevelConfig::runner()).unwrap())
    }

    #[test]
    fn test_frontier() {
        let s = streamer();
        // 800 / 400 = 2 visible chunks, plus 2 lookahead
        assert_eq!(s.frontier(0.0), 4);
        assert_eq!(s.frontier(399.0), 4);
        assert_eq!(s.frontier(400.0), 5);
    }

    #[test]
    fn test_advance_generates_in_order() {
        let mut s = streamer();
        let mut store = LevelStore::new();

        let report = s.advance(0.0, &mut store);
        assert_eq!(report.generated, 5);
        assert_eq!(report.evicted, 0);
        assert_eq!(store.highest_chunk(), Some(4));

        // Same camera position: nothing new
        let report = s.advance(0.0, &mut store);
        assert_eq!(report, StreamReport::default());
    }

    #[test]
    fn test_advance_evicts_behind_camera() {
        let mut s = streamer();
        let mut store = LevelStore::new();
        s.advance(0.0, &mut store);

        // Chunk 5 would be evicted on arrival and is skipped
        let report = s.advance(4000.0, &mut store);
        assert_eq!(report.generated, 9);
        assert!(report.evicted > 0);
        // Eviction line is 4000 - 800 - 400
        assert!(store.platforms().iter().all(|p| p.right() >= 2800.0));
        assert!(!store.contains_chunk(0));
        assert!(store.contains_chunk(14));
    }

    #[test]
    fn test_far_camera_saturates() {
        let mut s = streamer();
        let mut store = LevelStore::new();
        assert_eq!(s.frontier(1.0e13), u32::MAX);

        // Jumps straight to the last chunks instead of walking every index
        let report = s.advance(1.0e13, &mut store);
        assert!(report.generated <= 2);
        assert_eq!(s.generated(), u64::from(u32::MAX) + 1);

        // Nothing left to generate, no wraparound to chunk 0
        let report = s.advance(1.0e13, &mut store);
        assert_eq!(report.generated, 0);
        assert!(!store.contains_chunk(0));
    }

    #[test]
    fn test_prime_and_reset() {
        let mut s = streamer();
        let mut store = LevelStore::new();
        assert_eq!(s.prime(6, &mut store), 6);
        assert_eq!(s.generated(), 6);
        assert_eq!(s.prime(6, &mut store), 0);

        s.reset();
        store.clear();
        assert_eq!(s.prime(2, &mut store), 2);
        assert_eq!(store.highest_chunk(), Some(1));
    }
}
