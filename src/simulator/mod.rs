//! # Time-to-Grounding Simulator
//!
//! Drifts the ship from an initial state until it comes within the
//! grounding distance of a hazard or the drift time limit is exceeded.
//!
//! ```text
//!   RUNNING ──step──▶ distance ≤ threshold ──▶ TERMINATED { grounded: true }
//!      │
//!      └────────────▶ elapsed > max time   ──▶ TERMINATED { grounded: false }
//! ```
//!
//! Every run starts from fresh state; the simulator holds only borrowed
//! collaborators and configuration.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::drift::DriftDynamics;
use crate::error::{ensure_non_negative, ensure_positive, Result};
use crate::hazard::{HazardClass, HazardMap};
use crate::types::*;

/// Cost of a grounding as a function of impact speed and hazard
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsequenceModel {
    /// Cost of any grounding on the cheapest hazard class
    pub base_cost: f64,
    /// Additional cost per m/s of impact speed
    pub cost_per_speed: f64,
}

impl ConsequenceModel {
    pub fn new(base_cost: f64, cost_per_speed: f64) -> Result<Self> {
        let model = Self {
            base_cost,
            cost_per_speed,
        };
        model.validate()?;
        Ok(model)
    }

    pub fn validate(&self) -> Result<()> {
        ensure_non_negative("base_cost", self.base_cost)?;
        ensure_non_negative("cost_per_speed", self.cost_per_speed)?;
        Ok(())
    }

    pub fn consequence(&self, impact_speed: f64, class: HazardClass) -> f64 {
        class.cost_factor() * (self.base_cost + self.cost_per_speed * impact_speed.abs())
    }
}

impl Default for ConsequenceModel {
    fn default() -> Self {
        Self {
            base_cost: 100_000.0,
            cost_per_speed: 50_000.0,
        }
    }
}

/// Result of one drift run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DriftOutcome {
    /// Elapsed drift time at termination (s)
    pub time_to_grounding: f64,
    /// Cost of the impact, or the best-effort estimate after a timeout
    pub consequence: f64,
    pub status: SimulationStatus,
    pub final_state: MotionState,
    /// Hazard hit, or the cheapest class after a timeout
    pub hazard_class: HazardClass,
    pub steps: u64,
}

impl DriftOutcome {
    pub fn grounded(&self) -> bool {
        self.status.grounded()
    }

    pub fn summary(&self) -> String {
        format!(
            "Drift Simulation Summary\n\
             ========================\n\
             Status: {}\n\
             Time to grounding: {:.1} s ({} steps)\n\
             Final state: {}\n\
             Impact speed: {:.2} m/s on {}\n\
             Consequence: {:.3e}",
            if self.grounded() { "grounded" } else { "timed out" },
            self.time_to_grounding,
            self.steps,
            self.final_state,
            self.final_state.speed(),
            self.hazard_class,
            self.consequence,
        )
    }
}

/// One recorded point of a drift trajectory
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrajectorySample {
    pub time: f64,
    pub state: MotionState,
}

/// Drift simulator over an injected dynamics model and hazard map
pub struct TimeToGroundingSimulator<'a, D: ?Sized, H: ?Sized> {
    dynamics: &'a D,
    hazards: &'a H,
    config: DriftSimulationConfig,
    max_simulation_time: f64,
    consequence_model: ConsequenceModel,
}

impl<'a, D, H> TimeToGroundingSimulator<'a, D, H>
where
    D: DriftDynamics + ?Sized,
    H: HazardMap + ?Sized,
{
    /// Create new simulator
    pub fn new(
        dynamics: &'a D,
        hazards: &'a H,
        config: DriftSimulationConfig,
        max_simulation_time: f64,
    ) -> Result<Self> {
        config.validate()?;
        ensure_positive("max_simulation_time", max_simulation_time)?;
        Ok(Self {
            dynamics,
            hazards,
            config,
            max_simulation_time,
            consequence_model: ConsequenceModel::default(),
        })
    }

    pub fn with_consequence_model(mut self, model: ConsequenceModel) -> Result<Self> {
        model.validate()?;
        self.consequence_model = model;
        Ok(self)
    }

    pub fn config(&self) -> &DriftSimulationConfig {
        &self.config
    }

    pub fn max_simulation_time(&self) -> f64 {
        self.max_simulation_time
    }

    /// Upper bound on the number of integration steps of one run
    pub fn max_steps(&self) -> u64 {
        ((self.max_simulation_time / self.config.integration_step).floor() as u64).saturating_add(1)
    }

    /// Drift from `initial` until grounding or timeout
    pub fn run(&self, initial: &MotionState) -> DriftOutcome {
        self.simulate(initial, |_| {})
    }

    /// Like [`run`](Self::run), also returning the state after every step
    pub fn run_recorded(&self, initial: &MotionState) -> (DriftOutcome, Vec<TrajectorySample>) {
        let mut trajectory = vec![TrajectorySample {
            time: 0.0,
            state: *initial,
        }];
        let outcome = self.simulate(initial, |sample| trajectory.push(sample));
        (outcome, trajectory)
    }

    fn simulate<F: FnMut(TrajectorySample)>(&self, initial: &MotionState, mut record: F) -> DriftOutcome {
        let dt = self.config.integration_step;
        let max_steps = self.max_steps();

        let mut state = *initial;
        let mut time = 0.0;
        let mut status = SimulationStatus::Running;
        let mut hazard_class = HazardClass::lowest_cost();
        let mut step = 0;

        while !status.is_terminated() && step < max_steps {
            state = self.dynamics.step(&state, dt);
            step += 1;
            time = step as f64 * dt;
            record(TrajectorySample { time, state });

            let proximity = self.hazards.nearest_hazard(state.position());
            if proximity.distance.abs() <= self.config.grounding_distance_m {
                hazard_class = proximity.class;
                status = SimulationStatus::Terminated { grounded: true };
            } else if time > self.max_simulation_time {
                status = SimulationStatus::Terminated { grounded: false };
            }
        }

        // Step budget exhausted by rounding
        if !status.is_terminated() {
            status = SimulationStatus::Terminated { grounded: false };
        }

        if status.grounded() {
            debug!(time, step, class = %hazard_class, speed = state.speed(), "drift ended in grounding");
        } else {
            warn!(
                time,
                max = self.max_simulation_time,
                "drift simulation timed out without grounding"
            );
        }

        DriftOutcome {
            time_to_grounding: time,
            consequence: self.consequence_model.consequence(state.speed(), hazard_class),
            status,
            final_state: state,
            hazard_class,
            steps: step,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drift::{ConstantDrift, EnvironmentConfiguration, ShipConfiguration, ShipDriftModel};
    use crate::hazard::{HazardCollection, ShoreLine, StaticObstacle};

    fn shore_at(north: f64) -> HazardCollection {
        HazardCollection::new().with_shoreline(ShoreLine::straight(north, (-1e4, 1e4), 1000.0).unwrap())
    }

    #[test]
    fn test_constant_drift_grounding_time() {
        let drift = ConstantDrift::new(1.0, 0.0);
        let hazards = shore_at(550.0);
        let sim = TimeToGroundingSimulator::new(&drift, &hazards, DriftSimulationConfig::default(), 1000.0).unwrap();

        let outcome = sim.run(&MotionState::at_rest(0.0, 0.0, 0.0));
        // 500 m to reach the 50 m threshold at 1 m/s
        assert!(outcome.grounded());
        assert!((outcome.time_to_grounding - 500.0).abs() < 1e-9);
        assert_eq!(outcome.steps, 1000);
        assert_eq!(outcome.hazard_class, HazardClass::Shore);
    }

    #[test]
    fn test_timeout_uses_cheapest_class() {
        let drift = ConstantDrift::new(0.0, 0.0);
        let hazards = HazardCollection::new()
            .with_obstacle(StaticObstacle::new(0.0, 1000.0, 10.0, HazardClass::Infrastructure).unwrap());
        let sim = TimeToGroundingSimulator::new(&drift, &hazards, DriftSimulationConfig::default(), 100.0).unwrap();

        let outcome = sim.run(&MotionState::at_rest(0.0, 0.0, 0.0));
        assert!(!outcome.grounded());
        assert!(outcome.status.is_terminated());
        // First step beyond the limit
        assert!((outcome.time_to_grounding - 100.5).abs() < 1e-9);
        assert!(outcome.steps <= sim.max_steps());
        assert_eq!(outcome.hazard_class, HazardClass::lowest_cost());
        assert!((outcome.consequence - ConsequenceModel::default().base_cost).abs() < 1e-9);
    }

    #[test]
    fn test_initial_state_not_checked() {
        // Starting on the shore still takes one step before grounding
        let drift = ConstantDrift::new(0.0, 0.0);
        let hazards = shore_at(0.0);
        let sim = TimeToGroundingSimulator::new(&drift, &hazards, DriftSimulationConfig::default(), 10.0).unwrap();
        let outcome = sim.run(&MotionState::at_rest(0.0, 0.0, 0.0));
        assert!(outcome.grounded());
        assert_eq!(outcome.steps, 1);
        assert!((outcome.time_to_grounding - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_consequence_grows_with_speed_and_class() {
        let model = ConsequenceModel::default();
        assert!(model.consequence(2.0, HazardClass::Shore) > model.consequence(1.0, HazardClass::Shore));
        assert!(model.consequence(1.0, HazardClass::FishFarm) > model.consequence(1.0, HazardClass::Shore));
        assert!(ConsequenceModel::new(-1.0, 0.0).is_err());
    }

    #[test]
    fn test_hits_fish_farm() {
        let drift = ConstantDrift::new(0.0, 2.0);
        let hazards = shore_at(5000.0)
            .with_obstacle(StaticObstacle::new(0.0, 400.0, 50.0, HazardClass::FishFarm).unwrap());
        let sim = TimeToGroundingSimulator::new(&drift, &hazards, DriftSimulationConfig::default(), 1000.0).unwrap();

        let outcome = sim.run(&MotionState::at_rest(0.0, 0.0, 90.0));
        assert!(outcome.grounded());
        assert_eq!(outcome.hazard_class, HazardClass::FishFarm);
        // Rim at 350 m, threshold 50 m
        assert!((outcome.time_to_grounding - 150.0).abs() < 1e-9);
        let expected = ConsequenceModel::default().consequence(2.0, HazardClass::FishFarm);
        assert!((outcome.consequence - expected).abs() < 1e-6);
    }

    #[test]
    fn test_rerun_is_deterministic() {
        let env = EnvironmentConfiguration {
            current_velocity_north: 0.8,
            current_velocity_east: 0.2,
            wind_speed: 10.0,
            wind_direction_rad: std::f64::consts::PI,
        };
        let model = ShipDriftModel::new(ShipConfiguration::default(), env).unwrap();
        let hazards = shore_at(600.0);
        let sim = TimeToGroundingSimulator::new(&model, &hazards, DriftSimulationConfig::default(), 1000.0).unwrap();

        let initial = MotionState::new(0.0, 0.0, 0.2, 4.0, 0.0, 0.0);
        let first = sim.run(&initial);
        let second = sim.run(&initial);
        assert_eq!(first, second);
        assert!(first.grounded());
    }

    #[test]
    fn test_recorded_trajectory() {
        let drift = ConstantDrift::new(1.0, 0.0);
        let hazards = shore_at(100.0);
        let sim = TimeToGroundingSimulator::new(&drift, &hazards, DriftSimulationConfig::default(), 1000.0).unwrap();

        let (outcome, trajectory) = sim.run_recorded(&MotionState::at_rest(0.0, 0.0, 0.0));
        assert_eq!(trajectory.len() as u64, outcome.steps + 1);
        assert_eq!(trajectory[0].time, 0.0);
        let last = trajectory[trajectory.len() - 1];
        assert_eq!(last.state, outcome.final_state);
        assert!((last.time - outcome.time_to_grounding).abs() < 1e-12);
    }

    #[test]
    fn test_max_steps_saturates() {
        let drift = ConstantDrift::new(0.0, 0.0);
        let hazards = HazardCollection::new();
        let config = DriftSimulationConfig {
            integration_step: 1e-3,
            ..Default::default()
        };
        let sim = TimeToGroundingSimulator::new(&drift, &hazards, config, 1e30).unwrap();
        assert_eq!(sim.max_steps(), u64::MAX);

        let sim = TimeToGroundingSimulator::new(&drift, &hazards, DriftSimulationConfig::default(), 100.0).unwrap();
        assert_eq!(sim.max_steps(), 201);
    }

    #[test]
    fn test_invalid_configuration() {
        let drift = ConstantDrift::new(0.0, 0.0);
        let hazards = HazardCollection::new();
        let bad_step = DriftSimulationConfig {
            integration_step: 0.0,
            ..Default::default()
        };
        assert!(TimeToGroundingSimulator::new(&drift, &hazards, bad_step, 10.0).is_err());
        assert!(TimeToGroundingSimulator::new(&drift, &hazards, DriftSimulationConfig::default(), 0.0).is_err());
    }
}
