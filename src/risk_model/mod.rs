//! # Grounding Risk Model
//!
//! Single entry point of a risk query:
//!
//! 1. Drift the ship from its current state to find the time available to
//!    restore propulsion and the consequence of grounding
//! 2. Build every operating mode's event graph for that time budget and the
//!    configured risk time interval
//! 3. Report one grounding probability per mode
//!
//! Each query builds its own simulator and event graphs, so queries along
//! a predicted trajectory run in parallel.

use rayon::prelude::*;
use tracing::{debug, info};

use crate::drift::DriftDynamics;
use crate::error::{ensure_non_negative, GroundingRiskError, Result};
use crate::hazard::HazardMap;
use crate::horizon::AccumulatedRiskInPredictionHorizon;
use crate::reliability::{OperatingModeDefinition, ScenarioAnalysisParameters};
use crate::simulator::{ConsequenceModel, TimeToGroundingSimulator};
use crate::types::*;

/// Grounding probability of one operating mode
#[derive(Debug, Clone, PartialEq)]
pub struct ModeGroundingProbability {
    pub mode: String,
    pub probability_of_grounding: f64,
}

/// Result of one risk query
#[derive(Debug, Clone, PartialEq)]
pub struct RiskModelOutput {
    /// Drift time until grounding, or until the simulation timed out (s)
    pub time_to_grounding: f64,
    pub grounded: bool,
    pub consequence_of_grounding: f64,
    /// In the order the modes were configured
    pub modes: Vec<ModeGroundingProbability>,
}

impl RiskModelOutput {
    pub fn probability_for(&self, mode: &str) -> Option<f64> {
        self.modes
            .iter()
            .find(|m| m.mode == mode)
            .map(|m| m.probability_of_grounding)
    }

    /// Probability times consequence
    pub fn risk_for(&self, mode: &str) -> Option<f64> {
        self.probability_for(mode)
            .map(|p| p * self.consequence_of_grounding)
    }

    pub fn report(&self) -> String {
        let mut report = format!(
            "Grounding Risk\n\
             ==============\n\
             Time to grounding: {:.1} s{}\n\
             Consequence: {:.3e}\n",
            self.time_to_grounding,
            if self.grounded { "" } else { " (no grounding within drift limit)" },
            self.consequence_of_grounding,
        );
        for mode in &self.modes {
            report.push_str(&format!(
                "  {:<6} P(grounding) = {:.3e}   risk = {:.3e}\n",
                mode.mode,
                mode.probability_of_grounding,
                mode.probability_of_grounding * self.consequence_of_grounding,
            ));
        }
        report
    }
}

/// Risk model over a drift model `D` and hazard map `H`
#[derive(Debug, Clone)]
pub struct GroundingRiskModel<D, H> {
    config: RiskModelConfiguration,
    drift_config: DriftSimulationConfig,
    consequence_model: ConsequenceModel,
    parameters: ScenarioAnalysisParameters,
    modes: Vec<OperatingModeDefinition>,
    dynamics: D,
    hazards: H,
}

impl<D: DriftDynamics, H: HazardMap> GroundingRiskModel<D, H> {
    /// Create new risk model.
    ///
    /// Fails if the configuration is invalid or a mode refers to equipment
    /// without parameters.
    pub fn new(
        config: RiskModelConfiguration,
        parameters: ScenarioAnalysisParameters,
        modes: Vec<OperatingModeDefinition>,
        dynamics: D,
        hazards: H,
    ) -> Result<Self> {
        config.validate()?;
        parameters.validate()?;
        for mode in &modes {
            mode.build(&parameters, config.risk_time_interval, 0.0)?;
        }
        Ok(Self {
            config,
            drift_config: DriftSimulationConfig::default(),
            consequence_model: ConsequenceModel::default(),
            parameters,
            modes,
            dynamics,
            hazards,
        })
    }

    pub fn with_drift_config(mut self, drift_config: DriftSimulationConfig) -> Result<Self> {
        drift_config.validate()?;
        self.drift_config = drift_config;
        Ok(self)
    }

    pub fn with_consequence_model(mut self, model: ConsequenceModel) -> Result<Self> {
        model.validate()?;
        self.consequence_model = model;
        Ok(self)
    }

    pub fn config(&self) -> &RiskModelConfiguration {
        &self.config
    }

    pub fn mode_names(&self) -> impl Iterator<Item = &str> {
        self.modes.iter().map(|m| m.name.as_str())
    }

    /// Drift simulator sharing this model's collaborators
    pub fn simulator(&self) -> Result<TimeToGroundingSimulator<'_, D, H>> {
        TimeToGroundingSimulator::new(
            &self.dynamics,
            &self.hazards,
            self.drift_config,
            self.config.max_drift_time_s,
        )?
        .with_consequence_model(self.consequence_model)
    }

    /// Grounding probability of every mode for a given recovery time budget
    pub fn scenario_analysis(&self, available_recovery_time: f64) -> Result<Vec<ModeGroundingProbability>> {
        let available_recovery_time = ensure_non_negative("available_recovery_time", available_recovery_time)?;

        self.modes
            .iter()
            .map(|definition| {
                let mode = definition.build(
                    &self.parameters,
                    self.config.risk_time_interval,
                    available_recovery_time,
                )?;
                debug!(
                    mode = mode.name(),
                    available_recovery_time,
                    probability = mode.probability_of_grounding(),
                    "operating mode evaluated"
                );
                Ok(ModeGroundingProbability {
                    mode: mode.name().to_string(),
                    probability_of_grounding: mode.probability_of_grounding(),
                })
            })
            .collect()
    }

    /// Risk of losing propulsion now, starting from `current_state`
    pub fn calculate_risk_output(&self, current_state: &MotionState) -> Result<RiskModelOutput> {
        let outcome = self.simulator()?.run(current_state);
        let modes = self.scenario_analysis(outcome.time_to_grounding)?;

        info!(
            time_to_grounding = outcome.time_to_grounding,
            grounded = outcome.grounded(),
            consequence = outcome.consequence,
            n_modes = modes.len(),
            "risk query"
        );

        Ok(RiskModelOutput {
            time_to_grounding: outcome.time_to_grounding,
            grounded: outcome.grounded(),
            consequence_of_grounding: outcome.consequence,
            modes,
        })
    }
}

impl<D, H> GroundingRiskModel<D, H>
where
    D: DriftDynamics + Sync,
    H: HazardMap + Sync,
{
    /// One risk query per predicted state, evaluated in parallel
    pub fn evaluate_trajectory(&self, states: &[MotionState]) -> Result<Vec<RiskModelOutput>> {
        states
            .par_iter()
            .map(|state| self.calculate_risk_output(state))
            .collect()
    }

    /// Accumulated risk of `mode` over a predicted trajectory, one risk
    /// time interval per state
    pub fn prediction_horizon(
        &self,
        states: &[MotionState],
        mode: &str,
    ) -> Result<AccumulatedRiskInPredictionHorizon> {
        if !self.modes.iter().any(|m| m.name == mode) {
            return Err(GroundingRiskError::invalid(
                "mode",
                format!("no operating mode named `{mode}`"),
            ));
        }

        let outputs = self.evaluate_trajectory(states)?;
        let probabilities: Vec<f64> = outputs
            .iter()
            .map(|o| o.probability_for(mode).unwrap_or(0.0))
            .collect();
        let consequences: Vec<f64> = outputs.iter().map(|o| o.consequence_of_grounding).collect();

        AccumulatedRiskInPredictionHorizon::new(&probabilities, &consequences)
    }
}
