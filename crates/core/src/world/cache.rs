use crate::world::{
    point::{WorldPoint, WorldPointMap},
    TileSample,
};
use log::debug;

/// Memoization layer for generated tiles. The cache is not semantically
/// observable: generation is pure, so entries can be dropped at any time and
/// a recomputation on the next query yields an identical sample.
///
/// The world is infinite, which makes an unbounded cache a memory-exhaustion
/// hazard over a long session. This one is bounded: once `limit` entries are
/// held, the oldest half of the insertion-ordered map is dropped in one
/// batch. Exploration is viewport-local, so insertion age is a good proxy
/// for distance from the player.
#[derive(Clone, Debug)]
pub(crate) struct TileCache {
    entries: WorldPointMap<TileSample>,
    limit: usize,
}

impl TileCache {
    pub fn new(limit: usize) -> Self {
        Self {
            entries: WorldPointMap::default(),
            limit,
        }
    }

    pub fn get(&self, point: WorldPoint) -> Option<TileSample> {
        self.entries.get(&point).copied()
    }

    /// Store a computed sample, evicting the oldest half of the cache first
    /// if the limit has been reached.
    pub fn insert(&mut self, point: WorldPoint, sample: TileSample) {
        if self.entries.len() >= self.limit {
            let evict = self.limit / 2;
            let kept: WorldPointMap<TileSample> =
                self.entries.drain(..).skip(evict).collect();
            self.entries = kept;
            debug!("Tile cache full, evicted {} oldest entries", evict);
        }
        self.entries.insert(point, sample);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::{Biome, Tile};

    const SAMPLE: TileSample = TileSample {
        tile: Tile::Grass,
        biome: Biome::Grassland,
    };

    #[test]
    fn test_insert_get() {
        let mut cache = TileCache::new(8);
        let point = WorldPoint::new(3, -4);
        assert_eq!(cache.get(point), None);
        cache.insert(point, SAMPLE);
        assert_eq!(cache.get(point), Some(SAMPLE));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_eviction_drops_oldest() {
        let mut cache = TileCache::new(8);
        for i in 0..8 {
            cache.insert(WorldPoint::new(i, 0), SAMPLE);
        }
        // Ninth insert evicts the oldest four
        cache.insert(WorldPoint::new(8, 0), SAMPLE);
        assert_eq!(cache.len(), 5);
        for i in 0..4 {
            assert_eq!(cache.get(WorldPoint::new(i, 0)), None);
        }
        for i in 4..=8 {
            assert!(cache.get(WorldPoint::new(i, 0)).is_some());
        }
    }

    #[test]
    fn test_clear() {
        let mut cache = TileCache::new(8);
        cache.insert(WorldPoint::ORIGIN, SAMPLE);
        cache.clear();
        assert_eq!(cache.len(), 0);
        assert_eq!(cache.get(WorldPoint::ORIGIN), None);
    }
}
