mod biome;
mod cache;
mod noise;
mod point;
mod tile;

pub use self::{
    biome::{Biome, BiomeConfig},
    noise::NoiseField,
    point::{WorldPoint, WorldPointMap},
    tile::Tile,
};

use crate::{config::WorldConfig, timed, util::range::NumRange, world::cache::TileCache};
use anyhow::Context;
use log::info;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// The generated output at one coordinate: the renderable/walkable tile and
/// the biome it was derived from. This pair is what the tile cache holds.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileSample {
    pub tile: Tile,
    pub biome: Biome,
}

/// An infinite, deterministic, lazily generated world.
///
/// A world owns four noise fields derived from its seed (terrain, moisture,
/// temperature, caves) and a bounded per-tile memoization cache. Every query
/// is a pure function of (seed, coordinate); the cache only exists so the
/// camera can hammer `tile` every frame without re-running the fBm stack.
///
/// One world is created per game session, with a freshly drawn seed by
/// default. There is no save/load: the same seed regenerates the same world
/// next session.
#[derive(Clone, Debug)]
pub struct ProceduralWorld {
    config: WorldConfig,
    terrain: NoiseField,
    moisture: NoiseField,
    temperature: NoiseField,
    cave: NoiseField,
    cache: TileCache,
}

impl ProceduralWorld {
    /// Fixed offsets added to the world seed before seeding each derived
    /// field, so that the fields within one world are decorrelated while
    /// differently-seeded worlds diverge everywhere.
    const MOISTURE_SEED_OFFSET: u64 = 1000;
    const TEMPERATURE_SEED_OFFSET: u64 = 2000;
    const CAVE_SEED_OFFSET: u64 = 3000;

    /// A coordinate is a cave entrance iff its raw cave sample falls
    /// strictly inside this band. The band is narrow so entrances are rare,
    /// but coherent noise keeps them spatially clustered.
    const CAVE_BAND: NumRange = NumRange::new(0.85, 0.90);

    /// Create a world from a config. Returns an error if the config is
    /// invalid. Generation itself can never fail: every query below is
    /// total over the full coordinate domain.
    pub fn new(config: WorldConfig) -> anyhow::Result<Self> {
        config.validate().context("invalid config")?;
        let seed = config.seed.to_u64();
        info!("Creating world with seed {}", config.seed);

        // The noise backend takes 32-bit seeds; truncation is fine because
        // the offsets survive it, which is all decorrelation needs
        Ok(Self {
            terrain: NoiseField::new(seed as u32),
            moisture: NoiseField::new(
                seed.wrapping_add(Self::MOISTURE_SEED_OFFSET) as u32,
            ),
            temperature: NoiseField::new(
                seed.wrapping_add(Self::TEMPERATURE_SEED_OFFSET) as u32,
            ),
            cave: NoiseField::new(
                seed.wrapping_add(Self::CAVE_SEED_OFFSET) as u32,
            ),
            cache: TileCache::new(config.cache_limit),
            config,
        })
    }

    /// Get a reference to the config that defines this world
    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    /// The tile and biome at a coordinate. Computed on first query and
    /// memoized; the cache is invisible apart from speed, so callers can
    /// treat this as a pure function of the coordinate.
    pub fn tile(&mut self, x: i64, y: i64) -> TileSample {
        let point = WorldPoint::new(x, y);
        if let Some(sample) = self.cache.get(point) {
            return sample;
        }

        let biome =
            Biome::classify(self.moisture(x, y), self.temperature(x, y));
        let sample = TileSample {
            tile: tile::synthesize(point, biome, self.elevation(x, y)),
            biome,
        };
        self.cache.insert(point, sample);
        sample
    }

    /// Terrain elevation at a coordinate, in approximately [-1, 1]. Pure;
    /// bypasses the tile cache.
    pub fn elevation(&self, x: i64, y: i64) -> f64 {
        self.terrain
            .fbm_at(WorldPoint::new(x, y), &self.config.terrain)
    }

    /// Moisture at a coordinate, normalized to [0, 1]
    pub fn moisture(&self, x: i64, y: i64) -> f64 {
        NoiseField::OUTPUT_RANGE.normalize(
            self.moisture
                .fbm_at(WorldPoint::new(x, y), &self.config.moisture),
        )
    }

    /// Temperature at a coordinate, normalized to [0, 1]
    pub fn temperature(&self, x: i64, y: i64) -> f64 {
        NoiseField::OUTPUT_RANGE.normalize(
            self.temperature
                .fbm_at(WorldPoint::new(x, y), &self.config.temperature),
        )
    }

    /// Can the player stand at this coordinate?
    pub fn is_walkable(&mut self, x: i64, y: i64) -> bool {
        self.tile(x, y).tile.is_walkable()
    }

    /// Base enemy spawn rate at this coordinate, from the biome table
    pub fn spawn_chance(&mut self, x: i64, y: i64) -> f64 {
        self.tile(x, y).biome.config().enemy_spawn_rate
    }

    /// Display color at this coordinate. Feature tiles have fixed colors;
    /// plain ground takes the biome's base color.
    pub fn color(&mut self, x: i64, y: i64) -> u8 {
        let sample = self.tile(x, y);
        sample.tile.color(sample.biome)
    }

    /// Is this coordinate a cave entrance? Sampled from the dedicated cave
    /// field, independent of the biome/tile ladder; callers decide whether
    /// an entrance overrides the surface tile.
    pub fn is_cave_entrance(&self, x: i64, y: i64) -> bool {
        let value = self.cave.sample(
            x as f64 * self.config.cave.scale,
            y as f64 * self.config.cave.scale,
        );
        Self::CAVE_BAND.min < value && value < Self::CAVE_BAND.max
    }

    /// Batch-materialize a `size`×`size` block of tiles. Cell `[ly][lx]` of
    /// the result is exactly `tile(chunk_x·size + lx, chunk_y·size + ly)`;
    /// this is a convenience for bulk consumers, not a different generator.
    pub fn generate_chunk(
        &mut self,
        chunk_x: i64,
        chunk_y: i64,
        size: usize,
    ) -> Vec<Vec<TileSample>> {
        timed!(format!("Chunk ({}, {}) generation", chunk_x, chunk_y), {
            let start_x = chunk_x * size as i64;
            let start_y = chunk_y * size as i64;
            (0..size as i64)
                .map(|ly| {
                    (0..size as i64)
                        .map(|lx| self.tile(start_x + lx, start_y + ly))
                        .collect()
                })
                .collect()
        })
    }

    /// Drop all memoized tiles. Queries after a clear recompute and return
    /// identical results; this only frees memory.
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    /// Number of tiles currently memoized
    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }
}
