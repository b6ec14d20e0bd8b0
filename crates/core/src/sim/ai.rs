use crate::sim::{AiState, Rule, RuleContext};
use rand::Rng;

/// Enemy behavior state machine: idle → wandering/chasing → attacking.
/// Enemies notice the player inside their detection range, give up at 1.5×
/// that range, and stop to attack inside their attack range. Wandering is
/// aimless drift on a random timer.
#[derive(Debug)]
pub(crate) struct AiRule;

impl Rule for AiRule {
    fn advance(&self, dt: f64, ctx: &mut RuleContext<'_>) {
        let player_pos = ctx.state.player.position;

        for enemy in &mut ctx.state.enemies {
            let dist = enemy.position.distance_to(player_pos);

            match enemy.ai {
                AiState::Idle => {
                    if dist < enemy.detection_range {
                        enemy.ai = AiState::Chasing;
                    } else if ctx.rng.gen::<f64>() < 0.01 {
                        enemy.ai = AiState::Wandering {
                            timer: ctx.rng.gen_range(2.0..5.0),
                        };
                    }
                }

                AiState::Wandering { timer } => {
                    let timer = timer - dt;
                    if timer <= 0.0 {
                        enemy.ai = AiState::Idle;
                        enemy.velocity.stop();
                    } else {
                        enemy.ai = AiState::Wandering { timer };
                        if ctx.rng.gen::<f64>() < 0.1 {
                            enemy.velocity.dx = ctx.rng.gen_range(-1.0..1.0)
                                * enemy.velocity.max_speed;
                            enemy.velocity.dy = ctx.rng.gen_range(-1.0..1.0)
                                * enemy.velocity.max_speed;
                        }
                    }

                    if dist < enemy.detection_range {
                        enemy.ai = AiState::Chasing;
                    }
                }

                AiState::Chasing => {
                    if dist > enemy.detection_range * 1.5 {
                        enemy.ai = AiState::Idle;
                        enemy.velocity.stop();
                    } else if dist < enemy.attack_range {
                        enemy.ai = AiState::Attacking;
                        enemy.velocity.stop();
                    } else {
                        let dx = player_pos.x - enemy.position.x;
                        let dy = player_pos.y - enemy.position.y;
                        let length = (dx * dx + dy * dy).sqrt();
                        if length > 0.0 {
                            enemy.velocity.dx =
                                dx / length * enemy.velocity.max_speed;
                            enemy.velocity.dy =
                                dy / length * enemy.velocity.max_speed;
                        }
                    }
                }

                AiState::Attacking => {
                    if dist > enemy.attack_range {
                        enemy.ai = AiState::Chasing;
                    }
                }
            }
        }
    }
}
