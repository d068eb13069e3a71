//! # Monte Carlo Cross-Check
//!
//! Samples the underlying failure arrival times and start/restart durations
//! of a mode definition and counts trials that end in grounding. Converges
//! to the analytic gate composition of [`super::event_tree`], which makes it
//! a check on any new mode definition.

use rand::Rng;

use super::distribution::RestartTimeDistribution;
use super::machinery::{OperatingModeDefinition, ScenarioAnalysisParameters, StartupAction};
use crate::error::{ensure_non_negative, ensure_positive, GroundingRiskError, Result};

/// Result of Monte Carlo simulation
#[derive(Debug, Clone, PartialEq)]
pub struct MonteCarloResult {
    /// Estimated probability
    pub probability: f64,
    /// Standard error
    pub std_error: f64,
    /// 95% confidence interval
    pub confidence_95: (f64, f64),
    /// Number of trials
    pub n_trials: usize,
}

impl MonteCarloResult {
    fn from_counts(hits: usize, n_trials: usize) -> Self {
        let probability = hits as f64 / n_trials as f64;
        let variance = probability * (1.0 - probability) / n_trials as f64;
        let std_error = variance.sqrt();

        Self {
            probability,
            std_error,
            confidence_95: (probability - 1.96 * std_error, probability + 1.96 * std_error),
            n_trials,
        }
    }

    /// Whether `value` lies within `k` standard errors of the estimate
    pub fn agrees_with(&self, value: f64, k: f64) -> bool {
        (self.probability - value).abs() <= k * self.std_error.max(1.0 / self.n_trials as f64)
    }
}

struct SampledStep {
    nominal_success_probability: f64,
    duration: RestartTimeDistribution,
}

struct SampledScenario {
    failure_rates: Vec<f64>,
    paths: Vec<Vec<SampledStep>>,
}

/// Estimate the grounding probability of one mode by direct sampling.
pub fn simulate_operating_mode<R: Rng + ?Sized>(
    definition: &OperatingModeDefinition,
    params: &ScenarioAnalysisParameters,
    risk_time_interval: f64,
    available_time: f64,
    n_trials: usize,
    rng: &mut R,
) -> Result<MonteCarloResult> {
    let risk_time_interval = ensure_positive("risk_time_interval", risk_time_interval)?;
    let available_time = ensure_non_negative("available_time", available_time)?;
    if n_trials == 0 {
        return Err(GroundingRiskError::invalid("n_trials", "must be at least 1"));
    }

    let scenarios = definition
        .scenarios
        .iter()
        .map(|scenario| {
            let failure_rates = scenario
                .failed_equipment
                .iter()
                .map(|name| Ok(params.get(name)?.failure_rate))
                .collect::<Result<Vec<_>>>()?;
            let paths = scenario
                .restoration_paths
                .iter()
                .map(|path| {
                    path.iter()
                        .map(|step| {
                            let equipment = params.get(&step.equipment)?;
                            let p = match step.action {
                                StartupAction::Start => equipment.start,
                                StartupAction::Restart => equipment.restart,
                            };
                            Ok(SampledStep {
                                nominal_success_probability: p.nominal_success_probability,
                                duration: p.distribution()?,
                            })
                        })
                        .collect::<Result<Vec<_>>>()
                })
                .collect::<Result<Vec<_>>>()?;
            Ok(SampledScenario {
                failure_rates,
                paths,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let mut groundings = 0;
    for _ in 0..n_trials {
        if sample_grounding(&scenarios, risk_time_interval, available_time, rng) {
            groundings += 1;
        }
    }

    Ok(MonteCarloResult::from_counts(groundings, n_trials))
}

fn sample_grounding<R: Rng + ?Sized>(
    scenarios: &[SampledScenario],
    risk_time_interval: f64,
    available_time: f64,
    rng: &mut R,
) -> bool {
    scenarios.iter().fold(false, |grounded, scenario| {
        // Sample every scenario so trials consume the same amount of randomness
        let lost = scenario
            .failure_rates
            .iter()
            .map(|&rate| failure_time(rate, rng) <= risk_time_interval)
            .fold(true, |all, failed| all && failed);

        let restored = scenario
            .paths
            .iter()
            .map(|path| {
                path.iter()
                    .map(|step| {
                        let succeeds = rng.gen::<f64>() < step.nominal_success_probability;
                        let duration = step.duration.sample(rng);
                        succeeds && duration <= available_time
                    })
                    .fold(true, |all, ok| all && ok)
            })
            .fold(false, |any, ok| any || ok);

        grounded || (lost && !restored)
    })
}

/// Exponential arrival time by inverse transform
fn failure_time<R: Rng + ?Sized>(rate: f64, rng: &mut R) -> f64 {
    if rate <= 0.0 {
        return f64::INFINITY;
    }
    let u: f64 = rng.gen();
    -(1.0 - u).ln() / rate
}
