use crate::{
    sim::{Position, Rule, RuleContext, Velocity},
    world::ProceduralWorld,
};

/// Integrates velocities into positions, rejecting steps onto blocking
/// tiles. A rejected step leaves the position untouched; it is an outcome,
/// not an error. Velocities decay every tick so entities glide to a stop
/// when their driver (input or AI) goes quiet.
#[derive(Debug)]
pub(crate) struct MovementRule;

impl MovementRule {
    const DAMPING: f64 = 0.9;
}

impl Rule for MovementRule {
    fn advance(&self, dt: f64, ctx: &mut RuleContext<'_>) {
        integrate(dt, &mut ctx.state.player.position, &mut ctx.state.player.velocity, ctx.world);
        for enemy in &mut ctx.state.enemies {
            integrate(dt, &mut enemy.position, &mut enemy.velocity, ctx.world);
        }
    }
}

fn integrate(
    dt: f64,
    position: &mut Position,
    velocity: &mut Velocity,
    world: &mut ProceduralWorld,
) {
    let target = Position {
        x: position.x + velocity.dx * dt,
        y: position.y + velocity.dy * dt,
    };
    let (tx, ty) = target.tile();
    if world.is_walkable(tx, ty) {
        *position = target;
    }

    velocity.dx *= MovementRule::DAMPING;
    velocity.dy *= MovementRule::DAMPING;
}
