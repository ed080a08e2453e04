//! Deterministic PRNG based on the Xorshift64 algorithm.
//!
//! Seeds every random decision in the simulation: particle and vortex
//! spawn positions, vortex parameters, hue offsets, and anti-stagnation
//! nudges. Same seed always produces the same run across platforms (pure
//! integer arithmetic in the core algorithm).

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Xorshift64 deterministic PRNG. Same seed always produces the same sequence.
///
/// Uses the standard shift parameters (13, 7, 17). Seed of 0 is automatically
/// replaced with a non-zero fallback to avoid the all-zeros fixed point.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Xorshift64 {
    state: u64,
}

impl Xorshift64 {
    /// Fallback seed used when the caller provides 0, which is a fixed point
    /// of the xorshift algorithm.
    const FALLBACK_SEED: u64 = 0x5EED_DEAD_BEEF_CAFE;

    /// Creates a new PRNG with the given seed.
    pub fn new(seed: u64) -> Self {
        Self {
            state: if seed == 0 { Self::FALLBACK_SEED } else { seed },
        }
    }

    /// Advances the state and returns the next 64-bit value.
    pub fn next_u64(&mut self) -> u64 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 7;
        self.state ^= self.state << 17;
        self.state
    }

    /// Returns a uniformly distributed f64 in [0, 1).
    ///
    /// Uses the upper 53 bits of `next_u64()` divided by 2^53 for
    /// full mantissa precision.
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Returns a uniformly distributed f64 in [min, max).
    pub fn next_range(&mut self, min: f64, max: f64) -> f64 {
        min + self.next_f64() * (max - min)
    }

    /// Returns a unit vector with a uniformly distributed direction.
    pub fn next_unit_vec(&mut self) -> DVec2 {
        let angle = self.next_f64() * std::f64::consts::TAU;
        DVec2::from_angle(angle)
    }

    /// Returns +1.0 or -1.0 with equal probability.
    pub fn next_sign(&mut self) -> f64 {
        if self.next_f64() < 0.5 {
            1.0
        } else {
            -1.0
        }
    }
}
