//! Multi-octave fractal Brownian motion (fBm) height surface.
//!
//! Composites several octaves of simplex noise around a base elevation. This
//! is the reference terrain the demo builds on; hosts with their own terrain
//! implement [`HeightSurface`] directly.

use noise::{NoiseFn, Simplex};

use crate::surface::HeightSurface;

/// Configuration for multi-octave fBm noise.
#[derive(Clone, Debug, PartialEq)]
pub struct HeightmapParams {
    /// World seed for deterministic generation.
    pub seed: u32,
    /// Number of noise octaves to composite.
    pub octaves: u32,
    /// Frequency multiplier between successive octaves. Default: 2.0.
    pub lacunarity: f64,
    /// Amplitude multiplier between successive octaves. Default: 0.5.
    pub persistence: f64,
    /// Frequency of the first octave. Default: 0.01 (one cycle per 100 blocks).
    pub base_frequency: f64,
    /// Amplitude of the first octave, in blocks. Default: 12.0.
    pub amplitude: f64,
}

impl Default for HeightmapParams {
    fn default() -> Self {
        Self {
            seed: 0,
            octaves: 4,
            lacunarity: 2.0,
            persistence: 0.5,
            base_frequency: 0.01,
            amplitude: 12.0,
        }
    }
}

/// Generates height offsets using fBm over simplex noise.
pub struct HeightmapSampler {
    noise: Simplex,
    params: HeightmapParams,
}

impl HeightmapSampler {
    pub fn new(params: HeightmapParams) -> Self {
        let noise = Simplex::new(params.seed);
        Self { noise, params }
    }

    /// Sample the height offset at `(x, z)`.
    ///
    /// The result lies approximately within `[-max_amplitude, +max_amplitude]`.
    pub fn sample(&self, x: f64, z: f64) -> f64 {
        let mut total = 0.0;
        let mut frequency = self.params.base_frequency;
        let mut amplitude = self.params.amplitude;

        for _ in 0..self.params.octaves {
            total += self.noise.get([x * frequency, z * frequency]) * amplitude;
            frequency *= self.params.lacunarity;
            amplitude *= self.params.persistence;
        }

        total
    }

    /// Theoretical maximum absolute offset (geometric series sum).
    pub fn max_amplitude(&self) -> f64 {
        let mut sum = 0.0;
        let mut amp = self.params.amplitude.abs();
        for _ in 0..self.params.octaves {
            sum += amp;
            amp *= self.params.persistence.abs();
        }
        sum
    }

    pub fn params(&self) -> &HeightmapParams {
        &self.params
    }
}

/// A [`HeightSurface`] of fBm noise around a base elevation.
pub struct NoiseSurface {
    sampler: HeightmapSampler,
    base_height: f64,
}

impl NoiseSurface {
    pub fn new(params: HeightmapParams, base_height: f64) -> Self {
        Self {
            sampler: HeightmapSampler::new(params),
            base_height,
        }
    }

    pub fn sampler(&self) -> &HeightmapSampler {
        &self.sampler
    }

    pub fn base_height(&self) -> f64 {
        self.base_height
    }
}

impl HeightSurface for NoiseSurface {
    /// Clamped to the advertised bounds; simplex output may overshoot
    /// `[-1, 1]` by a hair.
    fn height(&self, x: f64, z: f64) -> f64 {
        (self.base_height + self.sampler.sample(x, z))
            .clamp(self.min_height(), self.max_height())
    }

    fn min_height(&self) -> f64 {
        self.base_height - self.sampler.max_amplitude()
    }

    fn max_height(&self) -> f64 {
        self.base_height + self.sampler.max_amplitude()
    }
}
