mod seed;

pub use seed::Seed;

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Configuration that defines a world. Two worlds created with the same
/// config are identical: every derived noise field, tile and biome follows
/// deterministically from the seed and the tuning values here.
#[derive(Clone, Debug, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct WorldConfig {
    /// Seed for all generation and simulation randomness. See [Seed] for the
    /// accepted input formats.
    pub seed: Seed,

    /// Maximum number of memoized tiles. The world is infinite, so without a
    /// bound a long session would grow the tile cache forever. When the
    /// limit is hit, the oldest half of the cache is dropped; those tiles
    /// regenerate identically on their next query.
    #[validate(range(min = 64))]
    pub cache_limit: usize,

    /// Side length of the camera's visible window, in tiles. Odd values keep
    /// the player on the exact center cell.
    // Scalar fields sit above the field tables so the config serializes
    // cleanly to TOML
    #[validate(range(min = 1, max = 255))]
    pub viewport_size: usize,

    /// Noise field driving terrain elevation.
    #[validate]
    pub terrain: FieldConfig,

    /// Noise field driving moisture, one of the two biome inputs.
    #[validate]
    pub moisture: FieldConfig,

    /// Noise field driving temperature, the other biome input.
    #[validate]
    pub temperature: FieldConfig,

    /// Noise field driving cave-entrance placement. Sampled raw (the octave
    /// count is ignored), so only the scale matters here.
    #[validate]
    pub cave: FieldConfig,
}

/// Tuning for one noise field. There is no sensible universal default (each
/// derived quantity wants its own scale and octave count), so defaults live
/// on [WorldConfig], not here.
#[derive(Copy, Clone, Debug, Serialize, Deserialize, Validate)]
pub struct FieldConfig {
    /// Multiplier applied to tile coordinates before sampling. Smaller
    /// values stretch features across more tiles.
    #[validate(range(min = 0.0001, max = 1.0))]
    pub scale: f64,

    /// Number of octaves summed by the fractal compositor. Each octave
    /// doubles the frequency of the one before it.
    #[validate(range(min = 1, max = 8))]
    pub octaves: u32,

    /// Amplitude decay per octave. The first amplitude is always 1.0, then
    /// is multiplied by the persistence for each octave, e.g. with 3 octaves
    /// and a persistence of 0.5 the amplitudes are `[1.0, 0.5, 0.25]`.
    #[validate(range(min = 0.01, max = 0.99))]
    pub persistence: f64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            // Danger! This means the default will vary between calls!
            seed: Seed::random(),

            cache_limit: 65_536,
            viewport_size: 11,
            terrain: FieldConfig {
                scale: 0.1,
                octaves: 4,
                persistence: 0.5,
            },
            moisture: FieldConfig {
                scale: 0.08,
                octaves: 3,
                persistence: 0.5,
            },
            temperature: FieldConfig {
                scale: 0.06,
                octaves: 2,
                persistence: 0.5,
            },
            cave: FieldConfig {
                scale: 0.15,
                octaves: 1,
                persistence: 0.5,
            },
        }
    }
}
