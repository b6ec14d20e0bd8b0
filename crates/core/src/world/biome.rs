use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// A biome is a large-scale classification of terrain. Every tile is
/// assigned exactly one biome based on the moisture and temperature fields
/// at its coordinate.
#[derive(
    Copy,
    Clone,
    Debug,
    Display,
    EnumIter,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Biome {
    Marsh,
    Forest,
    Desert,
    Tundra,
    Grassland,
    /// Underground. Never produced by [Biome::classify]; caves are reachable
    /// only through the cave-entrance predicate on the world.
    Caves,
}

/// Static tuning for one biome: display colors, feature densities, spawn
/// behavior and movement modifiers. This is a read-only table, never mutated
/// at runtime.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BiomeConfig {
    /// Human-readable name, for the HUD
    pub name: &'static str,
    /// Palette index for plain ground tiles in this biome
    pub base_color: u8,
    /// Palette index for decorative accents
    pub accent_color: u8,
    /// Chance of a tree per eligible tile, consumed as a cumulative band
    /// after `water_density`
    pub tree_density: f64,
    /// Chance of a rock per eligible tile, consumed after `tree_density`
    pub rock_density: f64,
    /// Chance of standing water per eligible tile, consumed first
    pub water_density: f64,
    /// Base enemy spawn rate in [0, 1]
    pub enemy_spawn_rate: f64,
    /// Multiplier for stamina drain while moving through this biome
    pub stamina_modifier: f64,
    /// How far the player can see, in [0, 1]
    pub visibility: f64,
}

const MARSH: BiomeConfig = BiomeConfig {
    name: "Marsh",
    base_color: 4,
    accent_color: 11,
    tree_density: 0.1,
    rock_density: 0.05,
    water_density: 0.3,
    enemy_spawn_rate: 0.3,
    stamina_modifier: 1.1,
    visibility: 0.7,
};

const FOREST: BiomeConfig = BiomeConfig {
    name: "Forest",
    base_color: 3,
    accent_color: 11,
    tree_density: 0.35,
    rock_density: 0.1,
    water_density: 0.05,
    enemy_spawn_rate: 0.4,
    stamina_modifier: 1.0,
    visibility: 0.5,
};

const DESERT: BiomeConfig = BiomeConfig {
    name: "Desert",
    base_color: 10,
    accent_color: 9,
    tree_density: 0.02,
    rock_density: 0.15,
    water_density: 0.01,
    enemy_spawn_rate: 0.2,
    stamina_modifier: 1.5,
    visibility: 1.0,
};

const TUNDRA: BiomeConfig = BiomeConfig {
    name: "Tundra",
    base_color: 7,
    accent_color: 12,
    tree_density: 0.05,
    rock_density: 0.2,
    water_density: 0.1,
    enemy_spawn_rate: 0.25,
    stamina_modifier: 1.3,
    visibility: 0.8,
};

const GRASSLAND: BiomeConfig = BiomeConfig {
    name: "Grassland",
    base_color: 3,
    accent_color: 10,
    tree_density: 0.08,
    rock_density: 0.05,
    water_density: 0.02,
    enemy_spawn_rate: 0.35,
    stamina_modifier: 0.9,
    visibility: 0.9,
};

const CAVES: BiomeConfig = BiomeConfig {
    name: "Caves",
    base_color: 5,
    accent_color: 13,
    tree_density: 0.0,
    rock_density: 0.25,
    water_density: 0.1,
    enemy_spawn_rate: 0.5,
    stamina_modifier: 1.0,
    visibility: 0.3,
};

impl Biome {
    /// Classify a (moisture, temperature) pair, both in [0, 1]. The ladder
    /// order is load bearing: cold wins over every other signal, then
    /// hot-and-dry, then the moisture bands in descending order. Reordering
    /// the checks changes which biome wins at boundary values.
    pub fn classify(moisture: f64, temperature: f64) -> Self {
        if temperature < 0.25 {
            Self::Tundra
        } else if temperature > 0.75 && moisture < 0.3 {
            Self::Desert
        } else if moisture > 0.6 {
            Self::Marsh
        } else if moisture > 0.35 {
            Self::Forest
        } else {
            Self::Grassland
        }
    }

    /// The static tuning table for this biome
    pub fn config(self) -> &'static BiomeConfig {
        match self {
            Self::Marsh => &MARSH,
            Self::Forest => &FOREST,
            Self::Desert => &DESERT,
            Self::Tundra => &TUNDRA,
            Self::Grassland => &GRASSLAND,
            Self::Caves => &CAVES,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    /// The ladder checks cold before anything else
    #[test]
    fn test_cold_dominates() {
        assert_eq!(Biome::classify(0.0, 0.1), Biome::Tundra);
        assert_eq!(Biome::classify(0.9, 0.1), Biome::Tundra);
        assert_eq!(Biome::classify(0.5, 0.249), Biome::Tundra);
    }

    #[test]
    fn test_desert_requires_hot_and_dry() {
        assert_eq!(Biome::classify(0.1, 0.9), Biome::Desert);
        // Hot but wet is not a desert
        assert_ne!(Biome::classify(0.5, 0.9), Biome::Desert);
    }

    /// High moisture beats the desert check at boundary values: hot (0.8)
    /// and wet (0.65) resolves to Marsh because the desert rule requires
    /// moisture below 0.3
    #[test]
    fn test_marsh_wins_when_hot_and_wet() {
        assert_eq!(Biome::classify(0.65, 0.8), Biome::Marsh);
    }

    #[test]
    fn test_moisture_bands() {
        assert_eq!(Biome::classify(0.7, 0.5), Biome::Marsh);
        assert_eq!(Biome::classify(0.5, 0.5), Biome::Forest);
        assert_eq!(Biome::classify(0.36, 0.5), Biome::Forest);
        assert_eq!(Biome::classify(0.2, 0.5), Biome::Grassland);
    }

    /// Caves never come out of the classifier
    #[test]
    fn test_caves_unreachable() {
        for m in 0..=10 {
            for t in 0..=10 {
                let biome =
                    Biome::classify(m as f64 / 10.0, t as f64 / 10.0);
                assert_ne!(biome, Biome::Caves);
            }
        }
    }

    /// Density bands must never sum past 1, or the base-tile fallback would
    /// be unreachable
    #[test]
    fn test_density_bands_bounded() {
        for biome in Biome::iter() {
            let config = biome.config();
            let total = config.water_density
                + config.tree_density
                + config.rock_density;
            assert!(total < 1.0, "{} density bands sum to {}", biome, total);
        }
    }
}
