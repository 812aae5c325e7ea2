//! Effective edge weights.
//!
//! The engines never read a base weight directly as a cost. Every relaxation
//! goes through a [`WeightResolver`], which may return the base weight
//! unchanged ([`StaticWeights`]), perturb it with a sampled traffic factor
//! ([`TrafficWeights`]), or apply any caller-supplied closure.
//!
//! Resolvers must return non-negative weights. A negative weight breaks the
//! greedy invariants of both engines; it is logged but not rejected.

use serde::{Deserialize, Serialize};

use crate::error::{Result, RouteError};

/// Strategy that turns a base weight into the cost used by one query.
///
/// Dynamic resolvers may return a different value on every call for the same
/// edge. Callers must not assume idempotence.
pub trait WeightResolver {
    fn effective_weight(&mut self, from: &str, to: &str, base: f64) -> f64;
}

impl<F> WeightResolver for F
where
    F: FnMut(&str, &str, f64) -> f64,
{
    fn effective_weight(&mut self, from: &str, to: &str, base: f64) -> f64 {
        self(from, to, base)
    }
}

/// Uses each edge's base weight unchanged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StaticWeights;

impl WeightResolver for StaticWeights {
    fn effective_weight(&mut self, _from: &str, _to: &str, base: f64) -> f64 {
        base
    }
}

/// Closed range a traffic factor is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FactorRange {
    pub min: f64,
    pub max: f64,
}

impl FactorRange {
    /// Create a validated range. Bounds must be finite, non-negative and ordered.
    pub fn new(min: f64, max: f64) -> Result<Self> {
        let range = Self { min, max };
        range.validate()?;
        Ok(range)
    }

    pub fn validate(&self) -> Result<()> {
        let usable = self.min.is_finite()
            && self.max.is_finite()
            && self.min >= 0.0
            && self.min <= self.max;
        if usable {
            Ok(())
        } else {
            Err(RouteError::InvalidFactorRange {
                min: self.min,
                max: self.max,
            })
        }
    }

    fn sample(&self, rng: &mut fastrand::Rng) -> f64 {
        self.min + rng.f64() * (self.max - self.min)
    }
}

impl Default for FactorRange {
    fn default() -> Self {
        Self { min: 1.0, max: 3.0 }
    }
}

/// Simulated real-time traffic: `base * factor` with a fresh factor per call.
///
/// The generator is injected so tests can pin the sequence of factors with a
/// seed. No factor is ever cached, neither within one query nor across
/// queries.
#[derive(Debug, Clone)]
pub struct TrafficWeights {
    range: FactorRange,
    rng: fastrand::Rng,
    samples: u64,
}

impl TrafficWeights {
    pub fn new(range: FactorRange, rng: fastrand::Rng) -> Result<Self> {
        range.validate()?;
        Ok(Self {
            range,
            rng,
            samples: 0,
        })
    }

    /// Deterministic factors for a given seed.
    pub fn seeded(range: FactorRange, seed: u64) -> Result<Self> {
        Self::new(range, fastrand::Rng::with_seed(seed))
    }

    pub fn from_entropy(range: FactorRange) -> Result<Self> {
        Self::new(range, fastrand::Rng::new())
    }

    pub fn range(&self) -> FactorRange {
        self.range
    }

    /// Number of factors drawn so far.
    pub fn samples(&self) -> u64 {
        self.samples
    }
}

impl WeightResolver for TrafficWeights {
    fn effective_weight(&mut self, from: &str, to: &str, base: f64) -> f64 {
        let factor = self.range.sample(&mut self.rng);
        self.samples += 1;
        tracing::trace!(from, to, base, factor, "traffic factor sampled");
        base * factor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_weights_return_base() {
        let mut resolver = StaticWeights;
        for _ in 0..3 {
            assert_eq!(resolver.effective_weight("A", "B", 12.5), 12.5);
        }
    }

    #[test]
    fn test_closure_resolver() {
        let mut calls = 0;
        let mut toll = |from: &str, _to: &str, base: f64| {
            calls += 1;
            if from == "Centro" {
                base + 5.0
            } else {
                base
            }
        };
        assert_eq!(toll.effective_weight("Centro", "Zapopan", 10.0), 15.0);
        assert_eq!(toll.effective_weight("Zapopan", "Centro", 10.0), 10.0);
        assert_eq!(calls, 2);
    }

    #[test]
    fn test_traffic_factor_stays_in_range() {
        let mut traffic = TrafficWeights::seeded(FactorRange::default(), 7).unwrap();
        for _ in 0..1_000 {
            let w = traffic.effective_weight("A", "B", 10.0);
            assert!((10.0..=30.0).contains(&w), "weight {} out of range", w);
        }
        assert_eq!(traffic.samples(), 1_000);
    }

    #[test]
    fn test_traffic_resamples_every_call() {
        let mut traffic = TrafficWeights::seeded(FactorRange::default(), 11).unwrap();
        let weights: Vec<f64> = (0..20)
            .map(|_| traffic.effective_weight("A", "B", 10.0))
            .collect();
        let first = weights[0];
        assert!(weights.iter().any(|w| *w != first));
    }

    #[test]
    fn test_traffic_same_seed_same_factors() {
        let mut a = TrafficWeights::seeded(FactorRange::default(), 42).unwrap();
        let mut b = TrafficWeights::seeded(FactorRange::default(), 42).unwrap();
        for _ in 0..10 {
            assert_eq!(
                a.effective_weight("A", "B", 4.0),
                b.effective_weight("A", "B", 4.0)
            );
        }
    }

    #[test]
    fn test_degenerate_range_is_constant() {
        let range = FactorRange::new(2.0, 2.0).unwrap();
        let mut traffic = TrafficWeights::seeded(range, 1).unwrap();
        assert_eq!(traffic.effective_weight("A", "B", 5.0), 10.0);
    }

    #[test]
    fn test_invalid_ranges_rejected() {
        assert!(FactorRange::new(3.0, 1.0).is_err());
        assert!(FactorRange::new(-1.0, 1.0).is_err());
        assert!(FactorRange::new(1.0, f64::INFINITY).is_err());
        assert!(FactorRange::new(f64::NAN, 1.0).is_err());
        assert!(TrafficWeights::seeded(FactorRange { min: 2.0, max: 1.0 }, 0).is_err());
    }
}
