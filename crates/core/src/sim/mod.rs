//! Ambient world simulation: day/night cycle, weather, enemy AI,
//! regeneration and random encounters.
//!
//! There is no dynamic entity registry here. The simulation is a fixed set
//! of update rules over typed state, applied in an explicit order each
//! frame. Each rule implements a single `advance` contract; adding behavior
//! means adding a rule to the list, not subclassing anything.

mod ai;
mod combat;
mod movement;
mod regen;
mod spawn;
mod time;
mod weather;

use crate::world::ProceduralWorld;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;
use std::fmt::Debug;
use strum::{Display, EnumIter};

use self::{
    ai::AiRule, combat::CombatRule, movement::MovementRule, regen::RegenRule,
    spawn::SpawnRule, time::TimeRule, weather::WeatherRule,
};

/// Phase of the day/night cycle
#[derive(Copy, Clone, Debug, Display, EnumIter, PartialEq, Eq)]
pub enum TimePhase {
    Dawn,
    Day,
    Dusk,
    Night,
}

impl TimePhase {
    /// Phase for an hour in [0, 24)
    pub fn of_hour(hour: f64) -> Self {
        if (5.0..7.0).contains(&hour) {
            Self::Dawn
        } else if (7.0..18.0).contains(&hour) {
            Self::Day
        } else if (18.0..20.0).contains(&hour) {
            Self::Dusk
        } else {
            Self::Night
        }
    }
}

/// Global clock state
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TimeOfDay {
    /// Hour of the day in [0, 24)
    pub hour: f64,
    pub phase: TimePhase,
    /// Game seconds per real second
    pub time_scale: f64,
    pub day_count: u32,
}

impl Default for TimeOfDay {
    fn default() -> Self {
        Self {
            hour: 8.0,
            phase: TimePhase::Day,
            time_scale: 60.0,
            day_count: 1,
        }
    }
}

#[derive(Copy, Clone, Debug, Display, EnumIter, PartialEq, Eq)]
pub enum WeatherKind {
    Clear,
    Rain,
    Fog,
    Snow,
    Storm,
}

/// Global weather state
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Weather {
    pub kind: WeatherKind,
    /// Strength of the current weather, in [0, 1]
    pub intensity: f64,
    /// Seconds until the next weather change
    pub duration: f64,
    pub wind_speed: f64,
    /// Radians
    pub wind_angle: f64,
}

impl Default for Weather {
    fn default() -> Self {
        Self {
            kind: WeatherKind::Clear,
            intensity: 0.5,
            duration: 120.0,
            wind_speed: 0.0,
            wind_angle: 0.0,
        }
    }
}

/// Continuous 2D position in world space. Tile queries round to the nearest
/// integer coordinate.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn distance_to(self, other: Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Nearest integer tile coordinate
    pub fn tile(self) -> (i64, i64) {
        (self.x.round() as i64, self.y.round() as i64)
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Velocity {
    pub dx: f64,
    pub dy: f64,
    pub max_speed: f64,
}

impl Velocity {
    pub fn stop(&mut self) {
        self.dx = 0.0;
        self.dy = 0.0;
    }
}

impl Default for Velocity {
    fn default() -> Self {
        Self {
            dx: 0.0,
            dy: 0.0,
            max_speed: 3.0,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Health {
    pub current: f64,
    pub maximum: f64,
    /// HP per second
    pub regen_rate: f64,
}

impl Default for Health {
    fn default() -> Self {
        Self {
            current: 10.0,
            maximum: 10.0,
            regen_rate: 0.5,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Stamina {
    pub current: f64,
    pub maximum: f64,
    /// Points per second
    pub regen_rate: f64,
}

impl Default for Stamina {
    fn default() -> Self {
        Self {
            current: 100.0,
            maximum: 100.0,
            regen_rate: 10.0,
        }
    }
}

/// Combat statistics shared by the player and enemies
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Combat {
    pub attack_damage: i32,
    /// Damage reduction in [0, 1]
    pub armor: f64,
    pub dodge_chance: f64,
    /// Seconds until the next attack is allowed
    pub attack_cooldown: f64,
}

impl Default for Combat {
    fn default() -> Self {
        Self {
            attack_damage: 2,
            armor: 0.0,
            dodge_chance: 0.15,
            attack_cooldown: 0.0,
        }
    }
}

/// The player's simulation-facing state. Menu/shop/score bookkeeping beyond
/// these fields lives with the screens that own it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Player {
    pub position: Position,
    pub velocity: Velocity,
    pub health: Health,
    pub stamina: Stamina,
    pub combat: Combat,
    pub gold: u32,
    pub level: u32,
    pub experience: u32,
}

/// AI behavior state for one enemy
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum AiState {
    Idle,
    Wandering { timer: f64 },
    Chasing,
    Attacking,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub name: &'static str,
    pub position: Position,
    pub velocity: Velocity,
    pub health: Health,
    pub combat: Combat,
    pub ai: AiState,
    /// Distance at which this enemy notices the player
    pub detection_range: f64,
    /// Distance at which this enemy switches to attacking
    pub attack_range: f64,
    pub boss: bool,
}

impl Enemy {
    const ROSTER: &'static [&'static str] =
        &["Goblin", "Orc", "Slime", "Wraith"];

    /// Roll a fresh enemy at a position. Bosses get fixed heavyweight
    /// stats; regular enemies draw theirs from the RNG.
    pub(crate) fn spawn(
        rng: &mut impl Rng,
        position: Position,
        boss: bool,
    ) -> Self {
        let health = if boss {
            20.0
        } else {
            rng.gen_range(3..=8) as f64
        };
        let damage = if boss { 5 } else { rng.gen_range(1..=3) };
        Self {
            name: Self::ROSTER[rng.gen_range(0..Self::ROSTER.len())],
            position,
            velocity: Velocity {
                max_speed: if boss { 1.0 } else { 1.5 },
                ..Default::default()
            },
            health: Health {
                current: health,
                maximum: health,
                regen_rate: 0.0,
            },
            combat: Combat {
                attack_damage: damage,
                ..Default::default()
            },
            ai: AiState::Idle,
            detection_range: if boss { 8.0 } else { 5.0 },
            attack_range: if boss { 2.0 } else { 1.5 },
            boss,
        }
    }
}

/// Everything the ambient rules read and write
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AmbientState {
    pub time: TimeOfDay,
    pub weather: Weather,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub distance_traveled: f64,
    pub enemies_defeated: u32,
}

/// A single ambient update rule. Rules may mutate the state and query the
/// world, but never add or remove rules; the rule list is fixed at
/// construction.
pub(crate) trait Rule: Debug {
    fn advance(&self, dt: f64, ctx: &mut RuleContext<'_>);
}

/// Everything a rule gets to touch for one step. Split borrows so a rule
/// can hold the state and the world at the same time.
pub(crate) struct RuleContext<'a> {
    pub state: &'a mut AmbientState,
    pub world: &'a mut ProceduralWorld,
    pub rng: &'a mut Pcg64,
}

/// Driver for the ambient simulation: owns the state, the RNG and the fixed
/// rule order, and advances everything one `dt` at a time from the frame
/// loop.
#[derive(Debug)]
pub struct Simulation {
    /// Applied in this exact order every step. Movement resolves before AI
    /// retargets, and spawning runs last so a new enemy never acts on the
    /// frame it appears.
    rules: Vec<Box<dyn Rule>>,
    /// Public to allow disjoint borrowing from game glue (HUD, combat
    /// screens); the rules are the only per-frame mutator.
    pub state: AmbientState,
    rng: Pcg64,
}

impl Simulation {
    /// Stamina cost of one player step before the biome modifier
    const MOVE_STAMINA_DRAIN: f64 = 1.0;

    /// Create a simulation seeded from the world seed, so a full session
    /// (terrain and ambient events both) replays identically for a given
    /// seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rules: vec![
                Box::new(MovementRule),
                Box::new(TimeRule),
                Box::new(WeatherRule),
                Box::new(AiRule),
                Box::new(CombatRule),
                Box::new(RegenRule),
                Box::new(SpawnRule),
            ],
            state: AmbientState::default(),
            rng: Pcg64::seed_from_u64(seed),
        }
    }

    /// Advance every ambient rule by `dt` seconds, in fixed order
    pub fn process(&mut self, dt: f64, world: &mut ProceduralWorld) {
        let mut ctx = RuleContext {
            state: &mut self.state,
            world,
            rng: &mut self.rng,
        };
        for rule in &self.rules {
            rule.advance(dt, &mut ctx);
        }
    }

    /// Apply a discrete one-tile player step. The move is rejected (state
    /// unchanged, returns false) if the destination tile is blocking;
    /// otherwise the player lands exactly on the destination and pays
    /// biome-scaled stamina. Callers recenter the camera after a successful
    /// move.
    pub fn try_move_player(
        &mut self,
        world: &mut ProceduralWorld,
        dx: i64,
        dy: i64,
    ) -> bool {
        let (px, py) = self.state.player.position.tile();
        let (target_x, target_y) = (px + dx, py + dy);
        if !world.is_walkable(target_x, target_y) {
            return false;
        }

        self.state.player.position = Position {
            x: target_x as f64,
            y: target_y as f64,
        };
        let modifier =
            world.tile(target_x, target_y).biome.config().stamina_modifier;
        let stamina = &mut self.state.player.stamina;
        stamina.current =
            (stamina.current - Self::MOVE_STAMINA_DRAIN * modifier).max(0.0);
        self.state.distance_traveled +=
            ((dx * dx + dy * dy) as f64).sqrt();
        true
    }
}
