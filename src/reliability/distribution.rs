//! # Time Distributions
//!
//! - Failure arrivals: homogeneous Poisson process, P(N(Δt) ≥ 1) = 1 − e^(−λΔt)
//! - Restart durations: shifted lognormal,
//!   F(t) = Φ((ln(t − t₀) − ln(m)) / σ) for t > t₀, else 0
//!
//! with median scale m, shape σ and minimum action latency t₀.

use rand::Rng;
use rand_distr::Distribution;
use statrs::distribution::{Continuous, ContinuousCDF, LogNormal};

use crate::error::{ensure_non_negative, ensure_positive, GroundingRiskError, Result};

/// Probability of at least one arrival of a Poisson process with rate
/// `rate` (1/s) during `interval` (s).
///
/// Uses `exp_m1` so that λΔt ≪ 1 keeps full precision (≈ λΔt).
pub fn occurrence_probability(rate: f64, interval: f64) -> f64 {
    -(-rate * interval).exp_m1()
}

/// Shifted lognormal distribution of the time needed to start or restart
/// a piece of machinery.
#[derive(Debug, Clone, Copy)]
pub struct RestartTimeDistribution {
    scale: f64,
    shape: f64,
    shift: f64,
    cdf: LogNormal,
    sampler: rand_distr::LogNormal<f64>,
}

impl RestartTimeDistribution {
    /// Build from the parameterisation used in the machinery studies:
    /// scale = `mean_time_to_restart`, shape = √`std_dev`, location = `shift`.
    pub fn new(mean_time_to_restart: f64, std_dev: f64, shift: f64) -> Result<Self> {
        let scale = ensure_positive("mean_time_to_restart_s", mean_time_to_restart)?;
        let shape = ensure_positive("std_dev_time_to_restart", std_dev)?.sqrt();
        let shift = ensure_non_negative("time_shift_s", shift)?;

        let mu = scale.ln();
        let cdf = LogNormal::new(mu, shape)
            .map_err(|e| GroundingRiskError::Distribution(e.to_string()))?;
        let sampler = rand_distr::LogNormal::new(mu, shape)
            .map_err(|e| GroundingRiskError::Distribution(e.to_string()))?;

        Ok(Self {
            scale,
            shape,
            shift,
            cdf,
            sampler,
        })
    }

    /// Probability that the action completes within `time` seconds
    pub fn cdf(&self, time: f64) -> f64 {
        if time <= self.shift {
            0.0
        } else {
            self.cdf.cdf(time - self.shift)
        }
    }

    /// Density at `time`
    pub fn pdf(&self, time: f64) -> f64 {
        if time <= self.shift {
            0.0
        } else {
            self.cdf.pdf(time - self.shift)
        }
    }

    /// Draw one completion time
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        self.shift + self.sampler.sample(rng)
    }

    pub fn median(&self) -> f64 {
        self.shift + self.scale
    }

    pub fn shape(&self) -> f64 {
        self.shape
    }

    pub fn shift(&self) -> f64 {
        self.shift
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_occurrence_probability() {
        assert_eq!(occurrence_probability(0.0, 10.0), 0.0);

        // λΔt ≪ 1 ⇒ p ≈ λΔt
        let p = occurrence_probability(3e-9, 10.0);
        assert!((p - 3e-8).abs() < 1e-15);

        // λΔt = 1 ⇒ 1 − 1/e
        let p = occurrence_probability(0.01, 100.0);
        assert!((p - (1.0 - (-1.0_f64).exp())).abs() < 1e-12);

        // Strictly increasing in both arguments, bounded below 1
        assert!(occurrence_probability(2e-3, 10.0) > occurrence_probability(1e-3, 10.0));
        assert!(occurrence_probability(1e-3, 20.0) > occurrence_probability(1e-3, 10.0));
        assert!(occurrence_probability(1e-3, 1e4) < 1.0);
    }

    #[test]
    fn test_restart_cdf_shift() {
        let dist = RestartTimeDistribution::new(50.0, 1.2, 20.0).unwrap();

        assert_eq!(dist.cdf(0.0), 0.0);
        assert_eq!(dist.cdf(20.0), 0.0);
        assert_eq!(dist.pdf(10.0), 0.0);

        // Half the probability mass lies below the median
        assert!((dist.cdf(dist.median()) - 0.5).abs() < 1e-9);
        assert!((dist.median() - 70.0).abs() < 1e-12);

        // Monotone, approaches 1
        assert!(dist.cdf(100.0) > dist.cdf(60.0));
        assert!(dist.cdf(1e7) > 0.999);
    }

    #[test]
    fn test_restart_cdf_matches_closed_form() {
        let dist = RestartTimeDistribution::new(12.0, 1.0, 3.0).unwrap();
        // σ = 1, z = ln((t − 3)/12) ; t = 15 ⇒ z = 0
        assert!((dist.cdf(15.0) - 0.5).abs() < 1e-9);
        // t = 3 + 12e ⇒ z = 1 ⇒ Φ(1)
        let t = 3.0 + 12.0 * std::f64::consts::E;
        assert!((dist.cdf(t) - 0.841_344_746).abs() < 1e-6);
    }

    #[test]
    fn test_restart_rejects_bad_parameters() {
        assert!(RestartTimeDistribution::new(0.0, 1.0, 0.0).is_err());
        assert!(RestartTimeDistribution::new(10.0, 0.0, 0.0).is_err());
        assert!(RestartTimeDistribution::new(10.0, 1.0, -1.0).is_err());
        assert!(RestartTimeDistribution::new(f64::NAN, 1.0, 0.0).is_err());
    }

    #[test]
    fn test_restart_sampling() {
        let dist = RestartTimeDistribution::new(35.0, 1.0, 14.0).unwrap();
        let mut rng = StdRng::seed_from_u64(42);

        let samples: Vec<f64> = (0..10_000).map(|_| dist.sample(&mut rng)).collect();
        assert!(samples.iter().all(|&t| t > 14.0));

        // Empirical CDF at the median ≈ 0.5
        let below = samples.iter().filter(|&&t| t <= dist.median()).count();
        let fraction = below as f64 / samples.len() as f64;
        assert!((fraction - 0.5).abs() < 0.02, "fraction {} should be ~0.5", fraction);
    }
}
