use crate::{config::FieldConfig, util::range::NumRange, world::WorldPoint};
use noise::{NoiseFn, OpenSimplex, Seedable};

/// A seeded coherent-noise field over continuous 2D space. Sampling is
/// deterministic (same seed + same input means the same output), smooth in
/// its input, and side-effect free; the field never mutates after
/// construction.
///
/// This is the primitive everything else in generation is built from: the
/// world derives elevation, moisture, temperature and cave placement from
/// four decorrelated fields.
#[derive(Clone, Debug)]
pub struct NoiseField {
    source: OpenSimplex,
}

impl NoiseField {
    /// The output range of a single raw sample. Composited (fBm) samples are
    /// normalized back into this same range.
    pub const OUTPUT_RANGE: NumRange = NumRange::new(-1.0, 1.0);

    pub fn new(seed: u32) -> Self {
        Self {
            source: OpenSimplex::new().set_seed(seed),
        }
    }

    /// Sample the raw field at a continuous point. Output is in
    /// [Self::OUTPUT_RANGE], approximately.
    pub fn sample(&self, x: f64, y: f64) -> f64 {
        self.source.get([x, y])
    }

    /// Fractal Brownian motion: sum `octaves` samples of this field, each at
    /// double the frequency and `persistence` times the amplitude of the one
    /// before, then divide by the total amplitude. The normalization keeps
    /// the output within a single sample's range regardless of octave count.
    pub fn fbm(
        &self,
        x: f64,
        y: f64,
        octaves: u32,
        persistence: f64,
    ) -> f64 {
        let mut value = 0.0;
        let mut amplitude = 1.0;
        let mut frequency = 1.0;
        let mut total_amplitude = 0.0;

        for _ in 0..octaves {
            value += amplitude * self.sample(x * frequency, y * frequency);
            total_amplitude += amplitude;
            amplitude *= persistence;
            frequency *= 2.0;
        }

        if total_amplitude > 0.0 {
            value / total_amplitude
        } else {
            0.0
        }
    }

    /// Composite sample at a tile coordinate, driven by a field config: the
    /// coordinate is scaled down first, then run through [Self::fbm] with
    /// the configured octave count and persistence.
    pub fn fbm_at(&self, point: WorldPoint, config: &FieldConfig) -> f64 {
        self.fbm(
            point.x as f64 * config.scale,
            point.y as f64 * config.scale,
            config.octaves,
            config.persistence,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn test_sample_deterministic() {
        let a = NoiseField::new(42);
        let b = NoiseField::new(42);
        for i in -20..20 {
            let (x, y) = (i as f64 * 0.37, i as f64 * -0.91);
            assert_eq!(a.sample(x, y), b.sample(x, y));
        }
    }

    #[test]
    fn test_seeds_diverge() {
        let a = NoiseField::new(1);
        let b = NoiseField::new(2);
        let differs = (-20..20).any(|i| {
            let (x, y) = (i as f64 * 0.37, i as f64 * 0.11);
            a.sample(x, y) != b.sample(x, y)
        });
        assert!(differs, "different seeds produced identical fields");
    }

    #[test]
    fn test_single_octave_is_raw_sample() {
        let field = NoiseField::new(7);
        assert_approx_eq!(
            field.fbm(0.3, -1.7, 1, 0.5),
            field.sample(0.3, -1.7)
        );
    }

    #[test]
    fn test_fbm_zero_octaves() {
        // Validation rejects 0 octaves in configs, but the function itself
        // must still be total
        let field = NoiseField::new(7);
        assert_approx_eq!(field.fbm(0.5, 0.5, 0, 0.5), 0.0);
    }
}
