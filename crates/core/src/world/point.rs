use derive_more::Display;
use fnv::FnvBuildHasher;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// An insertion-ordered map keyed by world position, using a cheap hasher.
/// Insertion order is load bearing: the tile cache's eviction policy drops
/// the oldest entries first.
pub type WorldPointMap<T> = IndexMap<WorldPoint, T, FnvBuildHasher>;

/// A position in the infinite tile grid. The domain is unbounded in both
/// axes; negative coordinates are just as valid as positive ones and must
/// generate consistent results.
///
/// `x` grows to the east and `y` grows to the south, matching the screen
/// layout used by the renderer.
#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    Display,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
)]
#[display(fmt = "({}, {})", x, y)]
pub struct WorldPoint {
    pub x: i64,
    pub y: i64,
}

impl WorldPoint {
    pub const ORIGIN: Self = Self::new(0, 0);

    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// The point at the given offset from this one. Offsets wrap at the
    /// integer boundary, which keeps the function total over the whole
    /// domain.
    pub fn offset(self, dx: i64, dy: i64) -> Self {
        Self::new(self.x.wrapping_add(dx), self.y.wrapping_add(dy))
    }
}
