//! # GROUNDING-RISK
//!
//! Probability and consequence of a drifting grounding after a ship loses
//! propulsion power.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────────┐
//! │                            GROUNDING-RISK                                   │
//! │              Drifting Grounding Risk Engine in Rust                         │
//! ├─────────────────────────────────────────────────────────────────────────────┤
//! │  LEVEL 1: RELIABILITY   triggering / startup events, lognormal restarts     │
//! │  LEVEL 2: EVENT TREES   sequences (AND), restoration trees (OR), modes      │
//! │  LEVEL 3: DRIFT         3-DOF ship without propulsion, wind and current     │
//! │  LEVEL 4: HAZARDS       shorelines and obstacles, time to grounding         │
//! │  LEVEL 5: RISK          per-mode grounding probability, horizon risk        │
//! └─────────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```no_run
//! use grounding_risk::*;
//!
//! let study = GroundingRiskStudy::default();
//! let hazards = HazardCollection::new()
//!     .with_shoreline(ShoreLine::straight(2000.0, (-5000.0, 5000.0), 500.0)?);
//! let model = study.risk_model(study.drift_model()?, hazards)?;
//!
//! let output = model.calculate_risk_output(&MotionState::at_rest(0.0, 0.0, 0.0))?;
//! println!("{}", output.report());
//! # Ok::<(), GroundingRiskError>(())
//! ```

pub mod config;
pub mod constants;
pub mod drift;
pub mod error;
pub mod hazard;
pub mod horizon;
pub mod reliability;
pub mod risk_model;
pub mod simulator;
pub mod types;

// Re-exports
pub use config::GroundingRiskStudy;
pub use constants::*;
pub use drift::{ConstantDrift, DriftDynamics, EnvironmentConfiguration, ShipConfiguration, ShipDriftModel};
pub use error::{GroundingRiskError, Result};
pub use hazard::{HazardClass, HazardCollection, HazardMap, HazardProximity, ShoreLine, StaticObstacle};
pub use horizon::AccumulatedRiskInPredictionHorizon;
pub use reliability::{
    hybrid_machinery_modes, main_engine_only_modes, MachinerySystemOperatingMode, OperatingModeDefinition,
    ScenarioAnalysisParameters, ScenarioDefinition, StartUpEvent, StartUpEventParameters, StartupStep,
    TriggeringEvent,
};
pub use risk_model::{GroundingRiskModel, ModeGroundingProbability, RiskModelOutput};
pub use simulator::{ConsequenceModel, DriftOutcome, TimeToGroundingSimulator, TrajectorySample};
pub use types::*;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Information about the engine
pub fn info() -> String {
    format!(
        "GROUNDING-RISK v{}\n\
         Drifting Grounding Risk Engine\n\
         Loss-of-propulsion event trees + 3-DOF drift simulation",
        VERSION
    )
}
