//! Multi-octave noise evaluator
//!
//! Wraps a seeded Perlin generator in a fractional-Brownian-motion sum
//! normalized to [0, 1]. The same evaluator, configured with fewer
//! octaves and a rougher falloff, produces the mountain signal.

use noise::{NoiseFn, Perlin, Seedable};

/// Fixed octave count for the mountain variant.
const MOUNTAIN_OCTAVES: u32 = 3;
/// Mountain amplitude decay per octave.
const MOUNTAIN_PERSISTENCE: f64 = 0.5;
/// Mountain frequency growth per octave.
const MOUNTAIN_LACUNARITY: f64 = 2.2;

/// Multi-octave value-noise evaluator producing a [0, 1] scalar per
/// 2D coordinate. Deterministic for a given seed.
pub struct NoiseField {
    perlin: Perlin,
    octaves: u32,
    persistence: f64,
    lacunarity: f64,
}

impl NoiseField {
    pub fn new(seed: u64, octaves: u32, persistence: f64, lacunarity: f64) -> Self {
        Self {
            perlin: Perlin::new(1).set_seed(seed as u32),
            octaves: octaves.max(1),
            persistence,
            lacunarity,
        }
    }

    /// Mountain variant: fixed 3-octave configuration with a higher
    /// lacunarity, intentionally rougher than the base field.
    pub fn mountain(seed: u64) -> Self {
        Self::new(
            seed,
            MOUNTAIN_OCTAVES,
            MOUNTAIN_PERSISTENCE,
            MOUNTAIN_LACUNARITY,
        )
    }

    /// Sample the field at a 2D coordinate. Each octave maps the raw
    /// Perlin output from [-1, 1] to [0, 1], so the amplitude-weighted
    /// sum divided by the amplitude total stays in [0, 1].
    pub fn sample(&self, x: f64, z: f64) -> f32 {
        let mut total = 0.0;
        let mut amplitude = 1.0;
        let mut frequency = 1.0;
        let mut max_value = 0.0;

        for _ in 0..self.octaves {
            let n = self.perlin.get([x * frequency, z * frequency]);
            total += (n * 0.5 + 0.5) * amplitude;
            max_value += amplitude;
            amplitude *= self.persistence;
            frequency *= self.lacunarity;
        }

        (total / max_value) as f32
    }
}
