//! # Leaf Events
//!
//! - [`TriggeringEvent`]: an equipment failure within the risk time interval
//! - [`StartUpEvent`]: a start/restart action succeeding within the time
//!   available before grounding

use serde::{Deserialize, Serialize};

use super::distribution::{occurrence_probability, RestartTimeDistribution};
use crate::error::{ensure_non_negative, ensure_positive, ensure_probability, Result};

/// Single failure mode with exponential arrival times.
#[derive(Debug, Clone, PartialEq)]
pub struct TriggeringEvent {
    rate_of_occurrence: f64,
    time_interval: f64,
    probability: f64,
}

impl TriggeringEvent {
    /// ## Arguments
    /// * `rate_of_occurrence` - Failures per second (≥ 0)
    /// * `time_interval` - Exposure interval in seconds (> 0)
    ///
    /// The probability saturates at exactly 1.0 in floating point once
    /// rate × interval exceeds about 37.
    pub fn new(rate_of_occurrence: f64, time_interval: f64) -> Result<Self> {
        let rate_of_occurrence = ensure_non_negative("rate_of_occurrence", rate_of_occurrence)?;
        let time_interval = ensure_positive("time_interval", time_interval)?;
        let probability = occurrence_probability(rate_of_occurrence, time_interval);
        debug_assert!((0.0..=1.0).contains(&probability));

        Ok(Self {
            rate_of_occurrence,
            time_interval,
            probability,
        })
    }

    /// Probability of at least one occurrence in the interval
    pub fn probability(&self) -> f64 {
        self.probability
    }

    pub fn rate_of_occurrence(&self) -> f64 {
        self.rate_of_occurrence
    }

    pub fn time_interval(&self) -> f64 {
        self.time_interval
    }
}

/// Restart-time distribution and nominal success probability of one
/// start or restart action.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StartUpEventParameters {
    /// Lognormal scale (median of the unshifted duration) (s)
    pub mean_time_to_restart_s: f64,
    /// Lognormal shape is the square root of this value
    pub std_dev_time_to_restart: f64,
    /// Minimum latency before the action can complete (s)
    pub time_shift_s: f64,
    /// Probability that the action succeeds at all
    pub nominal_success_probability: f64,
}

impl StartUpEventParameters {
    pub fn new(
        mean_time_to_restart_s: f64,
        std_dev_time_to_restart: f64,
        time_shift_s: f64,
        nominal_success_probability: f64,
    ) -> Self {
        Self {
            mean_time_to_restart_s,
            std_dev_time_to_restart,
            time_shift_s,
            nominal_success_probability,
        }
    }

    /// Validate and build the restart-time distribution
    pub fn distribution(&self) -> Result<RestartTimeDistribution> {
        ensure_probability("nominal_success_probability", self.nominal_success_probability)?;
        RestartTimeDistribution::new(
            self.mean_time_to_restart_s,
            self.std_dev_time_to_restart,
            self.time_shift_s,
        )
    }
}

/// Start or restart action with a success probability that depends on the
/// time available.
///
/// The only mutation is [`StartUpEvent::update`], which recomputes the
/// probability from a new available time.
#[derive(Debug, Clone)]
pub struct StartUpEvent {
    parameters: StartUpEventParameters,
    distribution: RestartTimeDistribution,
    available_time: f64,
    probability: f64,
}

impl StartUpEvent {
    pub fn new(parameters: StartUpEventParameters, available_time: f64) -> Result<Self> {
        let distribution = parameters.distribution()?;
        let available_time = ensure_non_negative("available_time", available_time)?;

        let mut event = Self {
            parameters,
            distribution,
            available_time,
            probability: 0.0,
        };
        event.refresh(available_time);
        Ok(event)
    }

    /// Recompute the success probability for a new time budget
    pub fn update(&mut self, available_time: f64) -> Result<()> {
        let available_time = ensure_non_negative("available_time", available_time)?;
        self.refresh(available_time);
        Ok(())
    }

    /// Caller must have validated `available_time`.
    pub(crate) fn refresh(&mut self, available_time: f64) {
        self.available_time = available_time;
        self.probability =
            self.parameters.nominal_success_probability * self.distribution.cdf(available_time);
        debug_assert!((0.0..=1.0).contains(&self.probability));
    }

    /// Probability of success within the available time
    pub fn probability(&self) -> f64 {
        self.probability
    }

    pub fn available_time(&self) -> f64 {
        self.available_time
    }

    pub fn parameters(&self) -> &StartUpEventParameters {
        &self.parameters
    }

    pub fn distribution(&self) -> &RestartTimeDistribution {
        &self.distribution
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn restart_main_engine() -> StartUpEventParameters {
        StartUpEventParameters::new(50.0, 1.2, 20.0, 0.4)
    }

    #[test]
    fn test_triggering_event() {
        let event = TriggeringEvent::new(3e-9, 10.0).unwrap();
        assert!((event.probability() - 3e-8).abs() < 1e-14);

        let never = TriggeringEvent::new(0.0, 3600.0).unwrap();
        assert_eq!(never.probability(), 0.0);
    }

    #[test]
    fn test_triggering_event_long_exposure() {
        let certain = TriggeringEvent::new(1.0, 100.0).unwrap();
        assert_eq!(certain.probability(), 1.0);

        let likely = TriggeringEvent::new(0.1, 100.0).unwrap();
        assert!((likely.probability() - (1.0 - (-10.0f64).exp())).abs() < 1e-12);
        assert!(likely.probability() < 1.0);
    }

    #[test]
    fn test_triggering_event_validation() {
        assert!(TriggeringEvent::new(-1e-9, 10.0).is_err());
        assert!(TriggeringEvent::new(1e-9, 0.0).is_err());
        assert!(TriggeringEvent::new(1e-9, -5.0).is_err());
        assert!(TriggeringEvent::new(f64::NAN, 10.0).is_err());
    }

    #[test]
    fn test_startup_event_zero_time() {
        let event = StartUpEvent::new(restart_main_engine(), 0.0).unwrap();
        assert_eq!(event.probability(), 0.0);

        // No shift: still zero at t = 0
        let params = StartUpEventParameters::new(12.0, 1.0, 0.0, 1.0);
        let event = StartUpEvent::new(params, 0.0).unwrap();
        assert_eq!(event.probability(), 0.0);
    }

    #[test]
    fn test_startup_event_below_shift() {
        let event = StartUpEvent::new(restart_main_engine(), 19.9).unwrap();
        assert_eq!(event.probability(), 0.0);
    }

    #[test]
    fn test_startup_event_scaled_by_nominal() {
        let event = StartUpEvent::new(restart_main_engine(), 70.0).unwrap();
        // At the median the CDF is 0.5
        assert!((event.probability() - 0.2).abs() < 1e-9);

        let event = StartUpEvent::new(restart_main_engine(), 1e9).unwrap();
        assert!(event.probability() <= 0.4);
        assert!(event.probability() > 0.399);
    }

    #[test]
    fn test_startup_event_update_is_idempotent() {
        let mut event = StartUpEvent::new(restart_main_engine(), 0.0).unwrap();

        event.update(120.0).unwrap();
        let first = event.probability();
        event.update(120.0).unwrap();
        assert_eq!(event.probability(), first);
        assert_eq!(event.available_time(), 120.0);

        // Same value as a freshly built event
        let fresh = StartUpEvent::new(restart_main_engine(), 120.0).unwrap();
        assert_eq!(fresh.probability(), first);
    }

    #[test]
    fn test_startup_event_rejects_invalid() {
        let mut event = StartUpEvent::new(restart_main_engine(), 60.0).unwrap();
        let before = event.probability();
        assert!(event.update(-1.0).is_err());
        // Failed update leaves the event untouched
        assert_eq!(event.probability(), before);
        assert_eq!(event.available_time(), 60.0);

        let bad = StartUpEventParameters::new(50.0, 1.2, 20.0, 1.5);
        assert!(StartUpEvent::new(bad, 10.0).is_err());
        assert!(StartUpEvent::new(restart_main_engine(), -3.0).is_err());
    }
}
