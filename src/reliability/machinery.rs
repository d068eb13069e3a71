//! # Machinery Model Builder
//!
//! Builds fresh [`MachinerySystemOperatingMode`] graphs from equipment
//! parameters and declarative mode definitions, so callers never wire
//! individual triggering and startup events by hand.
//!
//! ## Hybrid machinery case study
//!
//! Main engine (ME) on the shaft, two diesel gensets (DG1, DG2) and a hybrid
//! shaft generator (HSG) that works as generator (PTO) or motor (PTI):
//!
//! | Mode | Loss scenario        | Restoration paths                              |
//! |------|----------------------|------------------------------------------------|
//! | PTO  | ME stops             | restart ME / start DG1+HSG / start DG2+HSG     |
//! | MEC  | ME stops             | restart ME / start HSG / start DG2+HSG         |
//! | PTI  | DG1 and DG2 stop     | start ME / restart DG1 / restart DG2           |
//! | PTI  | HSG stops            | restart HSG                                    |

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::event_tree::{
    LossOfPropulsionScenario, MachinerySystemOperatingMode, PowerRestorationEventTree, Scenario,
    StartupEventSequence,
};
use super::events::{StartUpEvent, StartUpEventParameters, TriggeringEvent};
use crate::constants::*;
use crate::error::{ensure_non_negative, GroundingRiskError, Result};

/// Failure rate and start/restart behaviour of one equipment item
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EquipmentParameters {
    /// Failures per second while running
    pub failure_rate: f64,
    /// Starting the item from standby
    pub start: StartUpEventParameters,
    /// Restarting the item after it stopped
    pub restart: StartUpEventParameters,
}

impl EquipmentParameters {
    pub fn validate(&self) -> Result<()> {
        ensure_non_negative("failure_rate", self.failure_rate)?;
        self.start.distribution()?;
        self.restart.distribution()?;
        Ok(())
    }
}

/// Parameters of every equipment item referenced by the mode definitions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioAnalysisParameters {
    pub equipment: BTreeMap<String, EquipmentParameters>,
}

impl ScenarioAnalysisParameters {
    pub fn new() -> Self {
        Self {
            equipment: BTreeMap::new(),
        }
    }

    /// Builder: add or replace an equipment item
    pub fn with_equipment(mut self, name: &str, parameters: EquipmentParameters) -> Self {
        self.equipment.insert(name.to_string(), parameters);
        self
    }

    pub fn get(&self, name: &str) -> Result<&EquipmentParameters> {
        self.equipment
            .get(name)
            .ok_or_else(|| GroundingRiskError::UnknownEquipment(name.to_string()))
    }

    /// Check every item, including those no mode refers to
    pub fn validate(&self) -> Result<()> {
        self.equipment.values().try_for_each(EquipmentParameters::validate)
    }

    /// Values used in the hybrid machinery case study
    pub fn hybrid_case_study() -> Self {
        Self::new()
            .with_equipment(
                MAIN_ENGINE,
                EquipmentParameters {
                    failure_rate: 3e-9,
                    start: StartUpEventParameters::new(50.0, 1.2, 20.0, 1.0),
                    restart: StartUpEventParameters::new(50.0, 1.2, 20.0, 0.4),
                },
            )
            .with_equipment(
                GENSET_ONE,
                EquipmentParameters {
                    failure_rate: 6e-9,
                    start: StartUpEventParameters::new(35.0, 1.0, 14.0, 1.0),
                    restart: StartUpEventParameters::new(35.0, 1.0, 14.0, 0.5),
                },
            )
            .with_equipment(
                GENSET_TWO,
                EquipmentParameters {
                    failure_rate: 6e-9,
                    start: StartUpEventParameters::new(35.0, 1.0, 14.0, 1.0),
                    restart: StartUpEventParameters::new(35.0, 1.0, 14.0, 0.5),
                },
            )
            .with_equipment(
                HYBRID_SHAFT_GENERATOR,
                EquipmentParameters {
                    failure_rate: 2e-9,
                    start: StartUpEventParameters::new(12.0, 1.0, 3.0, 1.0),
                    restart: StartUpEventParameters::new(12.0, 1.0, 3.0, 0.8),
                },
            )
    }
}

impl Default for ScenarioAnalysisParameters {
    fn default() -> Self {
        Self::hybrid_case_study()
    }
}

/// Start from standby or restart after a stop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StartupAction {
    Start,
    Restart,
}

/// One action on one equipment item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartupStep {
    pub equipment: String,
    pub action: StartupAction,
}

impl StartupStep {
    pub fn start(equipment: &str) -> Self {
        Self {
            equipment: equipment.to_string(),
            action: StartupAction::Start,
        }
    }

    pub fn restart(equipment: &str) -> Self {
        Self {
            equipment: equipment.to_string(),
            action: StartupAction::Restart,
        }
    }

    fn parameters(&self, params: &ScenarioAnalysisParameters) -> Result<StartUpEventParameters> {
        let equipment = params.get(&self.equipment)?;
        Ok(match self.action {
            StartupAction::Start => equipment.start,
            StartupAction::Restart => equipment.restart,
        })
    }
}

/// Loss of propulsion (all `failed_equipment` stop) plus the ways to recover
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioDefinition {
    pub name: String,
    pub failed_equipment: Vec<String>,
    /// Each inner list is one sequence; all its steps must succeed
    pub restoration_paths: Vec<Vec<StartupStep>>,
}

impl ScenarioDefinition {
    pub fn new(name: &str, failed_equipment: &[&str], restoration_paths: Vec<Vec<StartupStep>>) -> Self {
        Self {
            name: name.to_string(),
            failed_equipment: failed_equipment.iter().map(|s| s.to_string()).collect(),
            restoration_paths,
        }
    }

    /// Build the scenario for one risk interval and time budget
    pub fn build(
        &self,
        params: &ScenarioAnalysisParameters,
        risk_time_interval: f64,
        available_time: f64,
    ) -> Result<Scenario> {
        let triggering_events = self
            .failed_equipment
            .iter()
            .map(|name| TriggeringEvent::new(params.get(name)?.failure_rate, risk_time_interval))
            .collect::<Result<Vec<_>>>()?;
        let loss = LossOfPropulsionScenario::new(triggering_events)?;

        let sequences = self
            .restoration_paths
            .iter()
            .map(|path| {
                let events = path
                    .iter()
                    .map(|step| StartUpEvent::new(step.parameters(params)?, available_time))
                    .collect::<Result<Vec<_>>>()?;
                StartupEventSequence::new(events)
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Scenario::new(
            self.name.clone(),
            loss,
            PowerRestorationEventTree::new(sequences),
        ))
    }
}

/// Declarative description of one machinery operating mode
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperatingModeDefinition {
    pub name: String,
    #[serde(default)]
    pub scenarios: Vec<ScenarioDefinition>,
}

impl OperatingModeDefinition {
    pub fn new(name: &str, scenarios: Vec<ScenarioDefinition>) -> Self {
        Self {
            name: name.to_string(),
            scenarios,
        }
    }

    /// Build a fresh, independent mode graph
    pub fn build(
        &self,
        params: &ScenarioAnalysisParameters,
        risk_time_interval: f64,
        available_time: f64,
    ) -> Result<MachinerySystemOperatingMode> {
        let scenarios = self
            .scenarios
            .iter()
            .map(|s| s.build(params, risk_time_interval, available_time))
            .collect::<Result<Vec<_>>>()?;
        Ok(MachinerySystemOperatingMode::new(self.name.clone(), scenarios))
    }
}

/// PTO, MEC and PTI modes of the hybrid machinery case study
pub fn hybrid_machinery_modes() -> Vec<OperatingModeDefinition> {
    let pto = OperatingModeDefinition::new(
        "PTO",
        vec![ScenarioDefinition::new(
            "loss of main engine",
            &[MAIN_ENGINE],
            vec![
                vec![StartupStep::restart(MAIN_ENGINE)],
                vec![StartupStep::start(GENSET_ONE), StartupStep::start(HYBRID_SHAFT_GENERATOR)],
                vec![StartupStep::start(GENSET_TWO), StartupStep::start(HYBRID_SHAFT_GENERATOR)],
            ],
        )],
    );

    let mec = OperatingModeDefinition::new(
        "MEC",
        vec![ScenarioDefinition::new(
            "loss of main engine",
            &[MAIN_ENGINE],
            vec![
                vec![StartupStep::restart(MAIN_ENGINE)],
                vec![StartupStep::start(HYBRID_SHAFT_GENERATOR)],
                vec![StartupStep::start(GENSET_TWO), StartupStep::start(HYBRID_SHAFT_GENERATOR)],
            ],
        )],
    );

    let pti = OperatingModeDefinition::new(
        "PTI",
        vec![
            ScenarioDefinition::new(
                "loss of both gensets",
                &[GENSET_ONE, GENSET_TWO],
                vec![
                    vec![StartupStep::start(MAIN_ENGINE)],
                    vec![StartupStep::restart(GENSET_ONE)],
                    vec![StartupStep::restart(GENSET_TWO)],
                ],
            ),
            ScenarioDefinition::new(
                "loss of hybrid shaft generator",
                &[HYBRID_SHAFT_GENERATOR],
                vec![vec![StartupStep::restart(HYBRID_SHAFT_GENERATOR)]],
            ),
        ],
    );

    vec![pto, mec, pti]
}

/// Single mechanical mode: the main engine stops and can only be restarted
pub fn main_engine_only_modes() -> Vec<OperatingModeDefinition> {
    vec![OperatingModeDefinition::new(
        "ME",
        vec![ScenarioDefinition::new(
            "loss of main engine",
            &[MAIN_ENGINE],
            vec![vec![StartupStep::restart(MAIN_ENGINE)]],
        )],
    )]
}
