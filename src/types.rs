//! # Core Types
//!
//! Kinematic state and configuration records shared by the drift simulator
//! and the risk model.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::{ensure_positive, Result};

// ============================================================================
// POSITION (NORTH-EAST PLANE)
// ============================================================================

/// Position in a local north-east frame (m)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub north: f64,
    pub east: f64,
}

impl Position {
    pub const fn new(north: f64, east: f64) -> Self {
        Self { north, east }
    }

    /// Euclidean distance to another position
    pub fn distance_to(&self, other: &Self) -> f64 {
        let d = *self - *other;
        d.north.hypot(d.east)
    }
}

impl std::ops::Add for Position {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        Self::new(self.north + other.north, self.east + other.east)
    }
}

impl std::ops::Sub for Position {
    type Output = Self;
    fn sub(self, other: Self) -> Self {
        Self::new(self.north - other.north, self.east - other.east)
    }
}

impl std::ops::Mul<f64> for Position {
    type Output = Self;
    fn mul(self, s: f64) -> Self {
        Self::new(self.north * s, self.east * s)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(N {:.1} m, E {:.1} m)", self.north, self.east)
    }
}

// ============================================================================
// MOTION STATE
// ============================================================================

/// Kinematic snapshot of the ship: NED pose plus body-fixed velocities
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MotionState {
    /// North position (m)
    pub north: f64,
    /// East position (m)
    pub east: f64,
    /// Heading, clockwise from north (rad)
    pub yaw_angle_rad: f64,
    /// Forward speed (m/s)
    pub surge_speed: f64,
    /// Sideways speed, positive to starboard (m/s)
    pub sway_speed: f64,
    /// Turn rate (rad/s)
    pub yaw_rate: f64,
}

impl MotionState {
    pub fn new(
        north: f64,
        east: f64,
        yaw_angle_rad: f64,
        surge_speed: f64,
        sway_speed: f64,
        yaw_rate: f64,
    ) -> Self {
        Self {
            north,
            east,
            yaw_angle_rad,
            surge_speed,
            sway_speed,
            yaw_rate,
        }
    }

    /// Ship at rest at a position, pointing at `heading_deg`
    pub fn at_rest(north: f64, east: f64, heading_deg: f64) -> Self {
        Self::new(north, east, heading_deg * DEG_TO_RAD, 0.0, 0.0, 0.0)
    }

    pub fn position(&self) -> Position {
        Position::new(self.north, self.east)
    }

    /// Speed over ground (m/s)
    pub fn speed(&self) -> f64 {
        self.surge_speed.hypot(self.sway_speed)
    }

    /// Velocity in the north-east frame (m/s)
    pub fn velocity_ned(&self) -> Position {
        let (sin_psi, cos_psi) = self.yaw_angle_rad.sin_cos();
        Position::new(
            self.surge_speed * cos_psi - self.sway_speed * sin_psi,
            self.surge_speed * sin_psi + self.sway_speed * cos_psi,
        )
    }

    pub fn heading_deg(&self) -> f64 {
        self.yaw_angle_rad / DEG_TO_RAD
    }
}

impl fmt::Display for MotionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} hdg {:.1}° u {:.2} m/s v {:.2} m/s r {:.4} rad/s",
            self.position(),
            self.heading_deg(),
            self.surge_speed,
            self.sway_speed,
            self.yaw_rate
        )
    }
}

// ============================================================================
// CONFIGURATION
// ============================================================================

/// Risk model time budget
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskModelConfiguration {
    /// Drift simulation gives up after this time (s)
    pub max_drift_time_s: f64,
    /// Interval over which triggering events may occur (s)
    pub risk_time_interval: f64,
}

impl RiskModelConfiguration {
    pub fn new(max_drift_time_s: f64, risk_time_interval: f64) -> Result<Self> {
        let config = Self {
            max_drift_time_s,
            risk_time_interval,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        ensure_positive("max_drift_time_s", self.max_drift_time_s)?;
        ensure_positive("risk_time_interval", self.risk_time_interval)?;
        Ok(())
    }
}

impl Default for RiskModelConfiguration {
    fn default() -> Self {
        Self {
            max_drift_time_s: DEFAULT_MAX_DRIFT_TIME_S,
            risk_time_interval: DEFAULT_RISK_TIME_INTERVAL_S,
        }
    }
}

/// Numerical settings of the drift simulation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriftSimulationConfig {
    /// Integration step (s)
    pub integration_step: f64,
    /// Proximity to a hazard counted as grounding (m)
    pub grounding_distance_m: f64,
}

impl DriftSimulationConfig {
    pub fn validate(&self) -> Result<()> {
        ensure_positive("integration_step", self.integration_step)?;
        ensure_positive("grounding_distance_m", self.grounding_distance_m)?;
        Ok(())
    }
}

impl Default for DriftSimulationConfig {
    fn default() -> Self {
        Self {
            integration_step: DEFAULT_INTEGRATION_STEP_S,
            grounding_distance_m: GROUNDING_DISTANCE_M,
        }
    }
}

// ============================================================================
// SIMULATION STATUS
// ============================================================================

/// Drift simulation state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulationStatus {
    /// Still integrating
    Running,
    /// Finished, either by grounding or by reaching the time limit
    Terminated { grounded: bool },
}

impl SimulationStatus {
    pub fn is_terminated(&self) -> bool {
        matches!(self, Self::Terminated { .. })
    }

    pub fn grounded(&self) -> bool {
        matches!(self, Self::Terminated { grounded: true })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_operations() {
        let a = Position::new(3.0, 4.0);
        let b = Position::new(0.0, 0.0);
        assert!((a.distance_to(&b) - 5.0).abs() < 1e-12);

        let c = a - b;
        assert_eq!(c, a);
        let d = (a + a) * 0.5;
        assert_eq!(d, a);
    }

    #[test]
    fn test_motion_state_velocity() {
        // Heading east, pure surge
        let state = MotionState::new(0.0, 0.0, 90.0 * DEG_TO_RAD, 5.0, 0.0, 0.0);
        let v = state.velocity_ned();
        assert!(v.north.abs() < 1e-9);
        assert!((v.east - 5.0).abs() < 1e-9);
        assert!((state.speed() - 5.0).abs() < 1e-12);

        // Heading north, pure sway to starboard moves east
        let state = MotionState::new(0.0, 0.0, 0.0, 0.0, 2.0, 0.0);
        let v = state.velocity_ned();
        assert!((v.east - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_risk_model_configuration() {
        assert!(RiskModelConfiguration::new(400.0, 10.0).is_ok());
        assert!(RiskModelConfiguration::new(0.0, 10.0).is_err());
        assert!(RiskModelConfiguration::new(400.0, -1.0).is_err());
        assert!(RiskModelConfiguration::default().validate().is_ok());
    }

    #[test]
    fn test_simulation_status() {
        assert!(!SimulationStatus::Running.is_terminated());
        assert!(SimulationStatus::Terminated { grounded: false }.is_terminated());
        assert!(SimulationStatus::Terminated { grounded: true }.grounded());
        assert!(!SimulationStatus::Terminated { grounded: false }.grounded());
    }
}
