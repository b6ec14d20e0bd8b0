use crate::sim::{Combat, Rule, RuleContext};

/// Ticks down attack cooldowns. Actual combat resolution (damage exchange,
/// boss scripts) is driven by the encounter screens, not the ambient loop.
#[derive(Debug)]
pub(crate) struct CombatRule;

impl Rule for CombatRule {
    fn advance(&self, dt: f64, ctx: &mut RuleContext<'_>) {
        cool_down(&mut ctx.state.player.combat, dt);
        for enemy in &mut ctx.state.enemies {
            cool_down(&mut enemy.combat, dt);
        }
    }
}

fn cool_down(combat: &mut Combat, dt: f64) {
    if combat.attack_cooldown > 0.0 {
        combat.attack_cooldown = (combat.attack_cooldown - dt).max(0.0);
    }
}
