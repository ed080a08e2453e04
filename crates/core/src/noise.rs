//! Scalar noise potential: Perlin noise remapped to [0, 1] plus a
//! multi-octave combinator.
//!
//! The potential is the scalar field the curl synthesizer differentiates.
//! Three octaves with doubling frequency and halving weight give large
//! swirls, medium eddies, and fine detail; the weighted sum is normalized
//! so the combined output stays in [0, 1]. Deterministic for a given seed
//! and coordinate triple.

use noise::{NoiseFn, Perlin};

/// Octave frequency multipliers.
const OCTAVE_FREQS: [f64; 3] = [1.0, 2.0, 4.0];
/// Octave weights; halve as frequency doubles.
const OCTAVE_WEIGHTS: [f64; 3] = [1.0, 0.5, 0.25];
/// Sum of [`OCTAVE_WEIGHTS`], used to normalize the combined potential.
const OCTAVE_WEIGHT_SUM: f64 = 1.75;

/// Deterministic scalar noise field over ℝ³ with values in [0, 1].
#[derive(Clone)]
pub struct NoiseField {
    noise: Perlin,
}

impl NoiseField {
    /// Creates a noise field with the given seed.
    pub fn new(seed: u32) -> Self {
        Self {
            noise: Perlin::new(seed),
        }
    }

    /// Samples a single noise octave at `(x, y, z)`.
    ///
    /// Perlin output is nominally in [-1, 1]; the result is remapped to
    /// [0, 1] and clamped to absorb the slight overshoot of gradient noise.
    pub fn sample(&self, x: f64, y: f64, z: f64) -> f64 {
        ((self.noise.get([x, y, z]) + 1.0) * 0.5).clamp(0.0, 1.0)
    }

    /// Multi-octave scalar potential at `(x, y, z)`, in [0, 1].
    ///
    /// `Σ wᵢ·sample(fᵢx, fᵢy, fᵢz) / Σ wᵢ` with frequencies 1, 2, 4 and
    /// weights 1, 0.5, 0.25.
    pub fn potential(&self, x: f64, y: f64, z: f64) -> f64 {
        let total: f64 = OCTAVE_FREQS
            .iter()
            .zip(OCTAVE_WEIGHTS.iter())
            .map(|(&f, &w)| w * self.sample(x * f, y * f, z * f))
            .sum();
        total / OCTAVE_WEIGHT_SUM
    }
}
