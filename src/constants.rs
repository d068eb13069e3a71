//! # Physical and Model Constants
//!
//! SI units throughout: metres, seconds, kilograms, radians.

use std::f64::consts::PI;

// ============================================================================
// ENVIRONMENT
// ============================================================================

/// Density of air at sea level (kg/m³)
pub const RHO_AIR: f64 = 1.2;

/// Degrees to radians
pub const DEG_TO_RAD: f64 = PI / 180.0;

/// Seconds per hour
pub const SECONDS_PER_HOUR: f64 = 3600.0;

/// Seconds per (365 day) year
pub const SECONDS_PER_YEAR: f64 = 3600.0 * 24.0 * 365.0;

// ============================================================================
// WIND LOAD COEFFICIENTS
// ============================================================================

/// Longitudinal wind force coefficient amplitude
pub const WIND_COEFF_SURGE: f64 = 0.7;

/// Transverse wind force coefficient amplitude
pub const WIND_COEFF_SWAY: f64 = 0.8;

/// Wind yaw moment coefficient amplitude
pub const WIND_COEFF_YAW: f64 = 0.1;

// ============================================================================
// DRIFT SIMULATION
// ============================================================================

/// Distance to a hazard at which the ship is considered grounded (m)
pub const GROUNDING_DISTANCE_M: f64 = 50.0;

/// Default integration step for the drift simulation (s)
pub const DEFAULT_INTEGRATION_STEP_S: f64 = 0.5;

/// Default maximum drift time before the simulation gives up (s)
pub const DEFAULT_MAX_DRIFT_TIME_S: f64 = 1000.0;

/// Default length of one risk time interval (s)
pub const DEFAULT_RISK_TIME_INTERVAL_S: f64 = 10.0;

// ============================================================================
// CASE STUDY EQUIPMENT NAMES
// ============================================================================

/// Main diesel engine driving the propeller shaft
pub const MAIN_ENGINE: &str = "main_engine";

/// First auxiliary diesel generator set
pub const GENSET_ONE: &str = "genset_one";

/// Second auxiliary diesel generator set
pub const GENSET_TWO: &str = "genset_two";

/// Hybrid shaft generator (motor in PTI mode)
pub const HYBRID_SHAFT_GENERATOR: &str = "hybrid_shaft_generator";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_conversions() {
        assert!((180.0 * DEG_TO_RAD - PI).abs() < 1e-12);
        assert!((SECONDS_PER_YEAR / SECONDS_PER_HOUR - 8760.0).abs() < 1e-9);
    }

    #[test]
    fn test_defaults_are_consistent() {
        // At least a few hundred integration steps per drift run
        assert!(DEFAULT_MAX_DRIFT_TIME_S / DEFAULT_INTEGRATION_STEP_S > 100.0);
        assert!(GROUNDING_DISTANCE_M > 0.0);
    }
}
