//! # Study Configuration
//!
//! Everything a grounding risk study needs, readable from TOML:
//!
//! ```toml
//! [risk_model]
//! max_drift_time_s = 1000.0
//! risk_time_interval = 10.0
//!
//! [environment]
//! current_velocity_north = 0.0
//! current_velocity_east = 1.0
//! wind_speed = 10.0
//! wind_direction_rad = 4.71
//!
//! [[modes]]
//! name = "ME"
//!
//! [[modes.scenarios]]
//! name = "loss of main engine"
//! failed_equipment = ["main_engine"]
//! restoration_paths = [[{ equipment = "main_engine", action = "restart" }]]
//! ```
//!
//! Omitted sections take the hybrid machinery case-study values.

use serde::{Deserialize, Serialize};

use crate::drift::{DriftDynamics, EnvironmentConfiguration, ShipConfiguration, ShipDriftModel};
use crate::error::Result;
use crate::hazard::HazardMap;
use crate::reliability::{hybrid_machinery_modes, OperatingModeDefinition, ScenarioAnalysisParameters};
use crate::risk_model::GroundingRiskModel;
use crate::simulator::ConsequenceModel;
use crate::types::{DriftSimulationConfig, RiskModelConfiguration};

/// Complete configuration of a grounding risk study
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroundingRiskStudy {
    pub risk_model: RiskModelConfiguration,
    pub simulation: DriftSimulationConfig,
    pub ship: ShipConfiguration,
    pub environment: EnvironmentConfiguration,
    pub consequence: ConsequenceModel,
    pub scenario_parameters: ScenarioAnalysisParameters,
    pub modes: Vec<OperatingModeDefinition>,
}

impl Default for GroundingRiskStudy {
    fn default() -> Self {
        Self {
            risk_model: RiskModelConfiguration::default(),
            simulation: DriftSimulationConfig::default(),
            ship: ShipConfiguration::default(),
            environment: EnvironmentConfiguration::default(),
            consequence: ConsequenceModel::default(),
            scenario_parameters: ScenarioAnalysisParameters::hybrid_case_study(),
            modes: hybrid_machinery_modes(),
        }
    }
}

impl GroundingRiskStudy {
    /// Parse a study from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let study: Self = toml::from_str(text)?;
        study.validate()?;
        Ok(study)
    }

    pub fn validate(&self) -> Result<()> {
        self.risk_model.validate()?;
        self.simulation.validate()?;
        self.ship.validate()?;
        self.environment.validate()?;
        self.consequence.validate()?;
        self.scenario_parameters.validate()?;
        Ok(())
    }

    /// 3-DOF drift model for this ship and environment
    pub fn drift_model(&self) -> Result<ShipDriftModel> {
        ShipDriftModel::new(self.ship, self.environment)
    }

    /// Risk model over the given collaborators
    pub fn risk_model<D: DriftDynamics, H: HazardMap>(
        &self,
        dynamics: D,
        hazards: H,
    ) -> Result<GroundingRiskModel<D, H>> {
        GroundingRiskModel::new(
            self.risk_model,
            self.scenario_parameters.clone(),
            self.modes.clone(),
            dynamics,
            hazards,
        )?
        .with_drift_config(self.simulation)?
        .with_consequence_model(self.consequence)
    }
}
