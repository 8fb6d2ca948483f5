//! Random parameter drawing.
//!
//! The [`Sampler`] trait decouples the sweep from its source of randomness.
//! Production uses [`RandSampler`] (entropy-seeded, or seeded for a
//! reproducible sweep); tests script exact values.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::catalog::{IntervalAlgorithm, ParamValue, ParameterSpec, SampledParam, ValueRange};

/// Source of uniformly distributed values over inclusive ranges.
pub trait Sampler {
    /// Continuous uniform value in `[min, max]`.
    fn uniform_real(&mut self, min: f64, max: f64) -> f64;
    /// Discrete uniform value in `[min, max]`.
    fn uniform_int(&mut self, min: i64, max: i64) -> i64;
}

/// Sampler backed by `rand`'s standard generator.
pub struct RandSampler {
    rng: StdRng,
}

impl RandSampler {
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Same seed, same sweep.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Sampler for RandSampler {
    fn uniform_real(&mut self, min: f64, max: f64) -> f64 {
        self.rng.gen_range(min..=max)
    }

    fn uniform_int(&mut self, min: i64, max: i64) -> i64 {
        self.rng.gen_range(min..=max)
    }
}

/// Draw one value for `spec`. Values are clamped into the declared range so
/// the bound holds whatever the sampler returns.
pub fn draw<S: Sampler + ?Sized>(spec: &ParameterSpec, sampler: &mut S) -> ParamValue {
    match spec.range {
        ValueRange::Real { min, max } => {
            ParamValue::Real(sampler.uniform_real(min, max).clamp(min, max))
        }
        ValueRange::Integer { min, max } => {
            ParamValue::Integer(sampler.uniform_int(min, max).clamp(min, max))
        }
    }
}

/// Draw one value per parameter of `algorithm`, in declaration order.
pub fn draw_params<S: Sampler + ?Sized>(
    algorithm: &IntervalAlgorithm,
    sampler: &mut S,
) -> Vec<SampledParam> {
    algorithm
        .params
        .iter()
        .map(|spec| SampledParam {
            flag: spec.flag,
            value: draw(spec, sampler),
        })
        .collect()
}
