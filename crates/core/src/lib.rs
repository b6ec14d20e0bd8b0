//! Overworld is a seed-deterministic, infinite 2D terrain generation kit for
//! tile-based action RPGs. This crate contains the generation core (noise
//! fields, biome classification, tile synthesis, viewport management) and the
//! ambient world simulation. Rendering and input layers are implemented
//! elsewhere.
//!
//! ```
//! use overworld::{ProceduralWorld, WorldConfig};
//!
//! let mut world = ProceduralWorld::new(WorldConfig::default()).unwrap();
//! let sample = world.tile(0, 0);
//! println!("{} in a {}", sample.tile, sample.biome);
//! // From here you can render/query the world however you like.
//! ```
//!
//! See [WorldConfig] for details on how generation can be customized.

mod camera;
mod config;
mod sim;
mod util;
mod world;

pub use crate::{
    camera::Camera,
    config::{FieldConfig, Seed, WorldConfig},
    sim::{
        AiState, AmbientState, Combat, Enemy, Health, Player, Position,
        Simulation, Stamina, TimeOfDay, TimePhase, Velocity, Weather,
        WeatherKind,
    },
    util::range::NumRange,
    world::{
        Biome, BiomeConfig, NoiseField, ProceduralWorld, Tile, TileSample,
        WorldPoint, WorldPointMap,
    },
};
