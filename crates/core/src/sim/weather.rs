use crate::sim::{Rule, RuleContext, Weather, WeatherKind};
use log::debug;
use rand::Rng;

/// Weighted table of weather transitions. Weights don't need to sum to 1;
/// the draw normalizes over the total.
const CHOICES: &[(WeatherKind, f64)] = &[
    (WeatherKind::Clear, 0.5),
    (WeatherKind::Rain, 0.2),
    (WeatherKind::Fog, 0.15),
    (WeatherKind::Snow, 0.1),
    (WeatherKind::Storm, 0.05),
];

/// Counts down the current weather and rolls a replacement when it expires.
/// Wind drifts a little every tick regardless.
#[derive(Debug)]
pub(crate) struct WeatherRule;

impl Rule for WeatherRule {
    fn advance(&self, dt: f64, ctx: &mut RuleContext<'_>) {
        let weather = &mut ctx.state.weather;
        weather.duration -= dt;

        if weather.duration <= 0.0 {
            change_weather(weather, ctx.rng);
            debug!(
                "Weather changed to {} for {:.0}s",
                weather.kind, weather.duration
            );
        }

        weather.wind_angle += ctx.rng.gen_range(-0.1..0.1) * dt;
        weather.wind_speed =
            (weather.wind_speed + ctx.rng.gen_range(-0.5..0.5) * dt).max(0.0);
    }
}

fn change_weather(weather: &mut Weather, rng: &mut impl Rng) {
    let total: f64 = CHOICES.iter().map(|(_, weight)| weight).sum();
    let mut roll = rng.gen::<f64>() * total;
    for (kind, weight) in CHOICES {
        if roll <= *weight {
            weather.kind = *kind;
            break;
        }
        roll -= weight;
    }

    weather.duration = rng.gen_range(60.0..300.0);
    weather.intensity = rng.gen_range(0.3..1.0);
    weather.wind_speed = match weather.kind {
        WeatherKind::Storm => rng.gen_range(3.0..6.0),
        WeatherKind::Rain => rng.gen_range(1.0..3.0),
        _ => rng.gen_range(0.0..1.0),
    };
}
