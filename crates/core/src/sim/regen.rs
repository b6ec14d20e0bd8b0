use crate::sim::{Health, Rule, RuleContext, Stamina};

/// Regenerates health and stamina toward their maximums. Enemies carry a
/// zero regen rate, so in practice this only moves the player, but the rule
/// is written over every entity so that changes.
#[derive(Debug)]
pub(crate) struct RegenRule;

impl Rule for RegenRule {
    fn advance(&self, dt: f64, ctx: &mut RuleContext<'_>) {
        regen_health(&mut ctx.state.player.health, dt);
        regen_stamina(&mut ctx.state.player.stamina, dt);
        for enemy in &mut ctx.state.enemies {
            regen_health(&mut enemy.health, dt);
        }
    }
}

fn regen_health(health: &mut Health, dt: f64) {
    if health.regen_rate > 0.0 && health.current < health.maximum {
        health.current =
            (health.current + health.regen_rate * dt).min(health.maximum);
    }
}

fn regen_stamina(stamina: &mut Stamina, dt: f64) {
    if stamina.current < stamina.maximum {
        stamina.current =
            (stamina.current + stamina.regen_rate * dt).min(stamina.maximum);
    }
}
