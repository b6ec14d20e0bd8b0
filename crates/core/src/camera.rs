use crate::world::{Biome, ProceduralWorld, TileSample, WorldPoint};

/// The rectangular window of world coordinates currently materialized for
/// rendering and game logic. The camera keeps a fixed-size grid snapshot
/// centered on the player; the snapshot is a read cache that is regenerated
/// wholesale on every recenter, never patched incrementally.
#[derive(Clone, Debug)]
pub struct Camera {
    /// Side length of the visible window, in tiles
    size: usize,
    /// World coordinate of the window's top-left cell
    origin: WorldPoint,
    /// Row-major `size`×`size` snapshot of the visible tiles
    grid: Vec<TileSample>,
    /// Biome at the player's exact coordinate as of the last recenter
    current_biome: Biome,
}

impl Camera {
    /// Create a camera centered on the given player position, using the
    /// world's configured viewport size.
    pub fn new(
        world: &mut ProceduralWorld,
        player_x: i64,
        player_y: i64,
    ) -> Self {
        let mut camera = Self {
            size: world.config().viewport_size,
            origin: WorldPoint::ORIGIN,
            grid: Vec::new(),
            current_biome: Biome::Grassland,
        };
        camera.recenter(world, player_x, player_y);
        camera
    }

    /// Side length of the visible window, in tiles
    pub fn size(&self) -> usize {
        self.size
    }

    /// World coordinate of the window's top-left cell
    pub fn origin(&self) -> WorldPoint {
        self.origin
    }

    /// Biome under the player as of the last recenter
    pub fn current_biome(&self) -> Biome {
        self.current_biome
    }

    /// Recenter the window on the player and regenerate the entire visible
    /// grid. Called every time the player's world position changes.
    pub fn recenter(
        &mut self,
        world: &mut ProceduralWorld,
        player_x: i64,
        player_y: i64,
    ) {
        let half = (self.size / 2) as i64;
        self.origin = WorldPoint::new(player_x - half, player_y - half);

        self.grid.clear();
        self.grid.reserve(self.size * self.size);
        for local_y in 0..self.size as i64 {
            for local_x in 0..self.size as i64 {
                self.grid.push(
                    world.tile(self.origin.x + local_x, self.origin.y + local_y),
                );
            }
        }

        self.current_biome = world.tile(player_x, player_y).biome;
    }

    /// Cell of the snapshot at a local (column, row) index, or `None`
    /// outside the window
    pub fn visible(&self, local_x: usize, local_y: usize) -> Option<TileSample> {
        if local_x < self.size && local_y < self.size {
            Some(self.grid[local_y * self.size + local_x])
        } else {
            None
        }
    }

    /// Walkability check that goes straight to the world, bypassing the grid
    /// snapshot, so prospective moves just outside the current window
    /// resolve correctly before any recenter happens.
    pub fn is_walkable(
        &self,
        world: &mut ProceduralWorld,
        world_x: i64,
        world_y: i64,
    ) -> bool {
        world.is_walkable(world_x, world_y)
    }
}
