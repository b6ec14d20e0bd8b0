use crate::world::{biome::Biome, point::WorldPoint};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// The smallest discrete unit of walkable/blocking terrain. A tile is fully
/// derived from its biome, the elevation field and a per-coordinate hash, so
/// regenerating the same coordinate in the same world always yields the same
/// tile.
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
pub enum Tile {
    Dirt,
    Grass,
    Sand,
    Stone,
    Water,
    Tree,
    Rock,
    CaveFloor,
    CaveWall,
}

impl Tile {
    /// Elevation below which any tile floods, regardless of biome
    pub const FLOOD_ELEVATION: f64 = -0.3;
    /// Elevation above which any tile turns to bare rock, regardless of biome
    pub const ROCK_ELEVATION: f64 = 0.6;

    /// Can the player (and walking enemies) stand on this tile?
    pub fn is_walkable(self) -> bool {
        !matches!(
            self,
            Self::Water | Self::Tree | Self::Rock | Self::Stone | Self::CaveWall
        )
    }

    /// Single-character glyph for text renderings of the map
    pub fn glyph(self) -> char {
        match self {
            Self::Dirt => '.',
            Self::Grass => '^',
            Self::Sand => '~',
            Self::Stone => '#',
            Self::Water => 'o',
            Self::Tree => 'T',
            Self::Rock => 'R',
            Self::CaveFloor => '_',
            Self::CaveWall => 'X',
        }
    }

    /// Palette index for this tile. Plain ground tiles (grass and the cave
    /// tiles) fall back to the base color of the biome they sit in, so an
    /// unmatched tile can never fail a lookup, just render as its biome.
    pub fn color(self, biome: Biome) -> u8 {
        match self {
            Self::Water => 12,
            Self::Tree => 11,
            Self::Rock => 13,
            Self::Stone => 5,
            Self::Sand => 10,
            Self::Dirt => 4,
            Self::Grass | Self::CaveFloor | Self::CaveWall => {
                biome.config().base_color
            }
        }
    }
}

/// Deterministic pseudo-random fraction in [0, 1) for a coordinate. This is
/// a pure function of the coordinate: no call-order dependence, no external
/// random state. Wrapping multiplication and a Euclidean remainder keep it
/// total over the whole signed domain.
pub(crate) fn coord_fraction(point: WorldPoint) -> f64 {
    const X_PRIME: i64 = 73_856_093;
    const Y_PRIME: i64 = 19_349_663;
    const BUCKETS: i64 = 1000;

    let hash =
        point.x.wrapping_mul(X_PRIME) ^ point.y.wrapping_mul(Y_PRIME);
    hash.rem_euclid(BUCKETS) as f64 / BUCKETS as f64
}

/// Resolve the tile at a coordinate from its biome and elevation scalar.
///
/// Elevation extremes always win: low ground floods and high ground turns
/// rocky no matter the biome. Between those, the biome's density values form
/// cumulative bands (water, then tree, then rock) against the coordinate
/// hash, and whatever falls through gets the biome's base terrain.
pub(crate) fn synthesize(
    point: WorldPoint,
    biome: Biome,
    elevation: f64,
) -> Tile {
    let r = coord_fraction(point);

    if elevation < Tile::FLOOD_ELEVATION {
        return Tile::Water;
    }
    if elevation > Tile::ROCK_ELEVATION {
        return Tile::Rock;
    }

    let config = biome.config();
    if r < config.water_density {
        return Tile::Water;
    }
    if r < config.water_density + config.tree_density {
        return Tile::Tree;
    }
    if r < config.water_density + config.tree_density + config.rock_density {
        return Tile::Rock;
    }

    match biome {
        Biome::Desert => Tile::Sand,
        Biome::Tundra => {
            if r > 0.7 {
                Tile::Stone
            } else {
                Tile::Grass
            }
        }
        Biome::Forest | Biome::Grassland => Tile::Grass,
        Biome::Marsh => {
            if r > 0.5 {
                Tile::Dirt
            } else {
                Tile::Grass
            }
        }
        Biome::Caves => Tile::Dirt,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    /// Find a coordinate whose hash fraction falls in the given range.
    /// Searching beats hardcoding coordinates that would silently go stale
    /// if the hash constants changed.
    fn point_with_fraction(min: f64, max: f64) -> WorldPoint {
        for x in -100..100 {
            for y in -100..100 {
                let point = WorldPoint::new(x, y);
                let r = coord_fraction(point);
                if min <= r && r < max {
                    return point;
                }
            }
        }
        panic!("no coordinate with fraction in [{}, {})", min, max);
    }

    #[test]
    fn test_fraction_in_unit_interval() {
        for x in [-1_000_000, -17, 0, 3, 999_983] {
            for y in [i64::MIN, -29, 0, 12, i64::MAX] {
                let r = coord_fraction(WorldPoint::new(x, y));
                assert!((0.0..1.0).contains(&r), "r={} at ({}, {})", r, x, y);
            }
        }
    }

    #[test]
    fn test_low_ground_floods() {
        let point = WorldPoint::new(13, -7);
        for biome in Biome::iter() {
            assert_eq!(synthesize(point, biome, -0.31), Tile::Water);
            assert_eq!(synthesize(point, biome, -1.0), Tile::Water);
        }
    }

    #[test]
    fn test_high_ground_is_rocky() {
        let point = WorldPoint::new(13, -7);
        for biome in Biome::iter() {
            assert_eq!(synthesize(point, biome, 0.61), Tile::Rock);
            assert_eq!(synthesize(point, biome, 1.0), Tile::Rock);
        }
    }

    #[test]
    fn test_density_bands() {
        // Marsh bands: water [0, 0.3), tree [0.3, 0.4), rock [0.4, 0.45)
        let water = point_with_fraction(0.0, 0.3);
        let tree = point_with_fraction(0.3, 0.4);
        let rock = point_with_fraction(0.4, 0.45);
        assert_eq!(synthesize(water, Biome::Marsh, 0.0), Tile::Water);
        assert_eq!(synthesize(tree, Biome::Marsh, 0.0), Tile::Tree);
        assert_eq!(synthesize(rock, Biome::Marsh, 0.0), Tile::Rock);
    }

    #[test]
    fn test_base_terrain() {
        // Past the density bands of everything but Forest (whose bands reach
        // 0.5), below the tundra/marsh accent splits
        let low = point_with_fraction(0.46, 0.5);
        assert_eq!(synthesize(low, Biome::Desert, 0.0), Tile::Sand);
        assert_eq!(synthesize(low, Biome::Grassland, 0.0), Tile::Grass);
        assert_eq!(synthesize(low, Biome::Tundra, 0.0), Tile::Grass);
        assert_eq!(synthesize(low, Biome::Marsh, 0.0), Tile::Grass);

        // Forest base terrain starts where its rock band ends
        let mid = point_with_fraction(0.5, 0.7);
        assert_eq!(synthesize(mid, Biome::Forest, 0.0), Tile::Grass);

        let high = point_with_fraction(0.71, 1.0);
        assert_eq!(synthesize(high, Biome::Tundra, 0.0), Tile::Stone);
        assert_eq!(synthesize(high, Biome::Marsh, 0.0), Tile::Dirt);
    }

    #[test]
    fn test_walkability_partition() {
        let blocking =
            [Tile::Water, Tile::Tree, Tile::Rock, Tile::Stone, Tile::CaveWall];
        for tile in Tile::iter() {
            assert_eq!(tile.is_walkable(), !blocking.contains(&tile));
        }
    }

    #[test]
    fn test_color_fallback() {
        // Ground tiles read as their biome
        assert_eq!(
            Tile::Grass.color(Biome::Tundra),
            Biome::Tundra.config().base_color
        );
        assert_eq!(
            Tile::CaveFloor.color(Biome::Caves),
            Biome::Caves.config().base_color
        );
        // Feature tiles have fixed colors
        assert_eq!(Tile::Water.color(Biome::Desert), 12);
    }
}
