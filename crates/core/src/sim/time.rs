use crate::sim::{Rule, RuleContext, TimePhase};

/// Advances the day/night cycle. One game hour passes every
/// `3600 / time_scale` real seconds.
#[derive(Debug)]
pub(crate) struct TimeRule;

impl Rule for TimeRule {
    fn advance(&self, dt: f64, ctx: &mut RuleContext<'_>) {
        let time = &mut ctx.state.time;
        time.hour += dt * time.time_scale / 3600.0;

        if time.hour >= 24.0 {
            time.hour -= 24.0;
            time.day_count += 1;
        }

        time.phase = TimePhase::of_hour(time.hour);
    }
}
