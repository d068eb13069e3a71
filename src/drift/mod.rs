//! # Drift Dynamics
//!
//! Motion of a ship that has lost propulsion, pushed by wind and current.
//!
//! ## Model
//!
//! 3-DOF (surge, sway, yaw) manoeuvring model in body coordinates:
//!
//! ```text
//! (m + X_u̇) u̇ = X_wind − (d_u + k_u|u_r|) u_r + (m + Y_v̇) v r
//! (m + Y_v̇) v̇ = Y_wind − (d_v + k_v|v_r|) v_r − (m + X_u̇) u r
//! (I_z + N_ṙ) ṙ = N_wind − (d_r + k_r|r|) r
//! ```
//!
//! with u_r, v_r the velocities relative to the current, and NED kinematics
//!
//! ```text
//! ṅ = u cos ψ − v sin ψ,   ė = u sin ψ + v cos ψ,   ψ̇ = r
//! ```
//!
//! integrated with explicit Euler. Wind loads use the relative wind and
//! projected areas above the waterline.
//!
//! ## References
//!
//! [1] Fossen, T. I. "Handbook of Marine Craft Hydrodynamics and Motion
//!     Control", Wiley, 2011

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::{ensure_non_negative, ensure_positive, Result};
use crate::types::MotionState;

/// Dynamics integrator used by the time-to-grounding simulator.
///
/// Implementations must be deterministic: the same state and step always
/// produce the same next state.
pub trait DriftDynamics {
    /// State after drifting for `dt` seconds
    fn step(&self, state: &MotionState, dt: f64) -> MotionState;
}

impl<T: DriftDynamics + ?Sized> DriftDynamics for &T {
    fn step(&self, state: &MotionState, dt: f64) -> MotionState {
        (**self).step(state, dt)
    }
}

// ============================================================================
// CONFIGURATION
// ============================================================================

/// Hull and mass properties
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShipConfiguration {
    /// Length between perpendiculars (m)
    pub length_of_ship: f64,
    /// Beam (m)
    pub width_of_ship: f64,
    /// Height of the hull and superstructure above the waterline (m)
    pub above_water_height: f64,
    /// Deadweight (kg)
    pub dead_weight: f64,
    /// Deadweight divided by displacement
    pub coefficient_of_deadweight_to_displacement: f64,
    /// Fuel on board (kg)
    pub bunkers: f64,
    /// Ballast water (kg)
    pub ballast: f64,
    pub added_mass_coefficient_in_surge: f64,
    pub added_mass_coefficient_in_sway: f64,
    pub added_mass_coefficient_in_yaw: f64,
    /// Mass over linear damping, i.e. velocity decay time constant (s)
    pub mass_over_linear_friction_coefficient_in_surge: f64,
    pub mass_over_linear_friction_coefficient_in_sway: f64,
    pub mass_over_linear_friction_coefficient_in_yaw: f64,
    /// Quadratic damping coefficients
    pub nonlinear_friction_coefficient_in_surge: f64,
    pub nonlinear_friction_coefficient_in_sway: f64,
    pub nonlinear_friction_coefficient_in_yaw: f64,
}

impl ShipConfiguration {
    pub fn validate(&self) -> Result<()> {
        ensure_positive("length_of_ship", self.length_of_ship)?;
        ensure_positive("width_of_ship", self.width_of_ship)?;
        ensure_non_negative("above_water_height", self.above_water_height)?;
        ensure_positive("dead_weight", self.dead_weight)?;
        ensure_positive(
            "coefficient_of_deadweight_to_displacement",
            self.coefficient_of_deadweight_to_displacement,
        )?;
        ensure_non_negative("bunkers", self.bunkers)?;
        ensure_non_negative("ballast", self.ballast)?;
        ensure_non_negative("added_mass_coefficient_in_surge", self.added_mass_coefficient_in_surge)?;
        ensure_non_negative("added_mass_coefficient_in_sway", self.added_mass_coefficient_in_sway)?;
        ensure_non_negative("added_mass_coefficient_in_yaw", self.added_mass_coefficient_in_yaw)?;
        ensure_positive(
            "mass_over_linear_friction_coefficient_in_surge",
            self.mass_over_linear_friction_coefficient_in_surge,
        )?;
        ensure_positive(
            "mass_over_linear_friction_coefficient_in_sway",
            self.mass_over_linear_friction_coefficient_in_sway,
        )?;
        ensure_positive(
            "mass_over_linear_friction_coefficient_in_yaw",
            self.mass_over_linear_friction_coefficient_in_yaw,
        )?;
        ensure_non_negative("nonlinear_friction_coefficient_in_surge", self.nonlinear_friction_coefficient_in_surge)?;
        ensure_non_negative("nonlinear_friction_coefficient_in_sway", self.nonlinear_friction_coefficient_in_sway)?;
        ensure_non_negative("nonlinear_friction_coefficient_in_yaw", self.nonlinear_friction_coefficient_in_yaw)?;
        Ok(())
    }

    /// Rigid-body mass (kg)
    pub fn mass(&self) -> f64 {
        self.dead_weight / self.coefficient_of_deadweight_to_displacement + self.bunkers + self.ballast
    }

    /// Yaw moment of inertia of a uniform box (kg·m²)
    pub fn yaw_inertia(&self) -> f64 {
        self.mass() * (self.length_of_ship.powi(2) + self.width_of_ship.powi(2)) / 12.0
    }

    /// Frontal area above water (m²)
    pub fn frontal_area(&self) -> f64 {
        self.width_of_ship * self.above_water_height
    }

    /// Lateral area above water (m²)
    pub fn lateral_area(&self) -> f64 {
        self.length_of_ship * self.above_water_height
    }
}

impl Default for ShipConfiguration {
    /// 80 m coastal cargo ship used in the drifting grounding studies
    fn default() -> Self {
        Self {
            length_of_ship: 80.0,
            width_of_ship: 16.0,
            above_water_height: 8.0,
            dead_weight: 3_850_000.0,
            coefficient_of_deadweight_to_displacement: 0.7,
            bunkers: 200_000.0,
            ballast: 200_000.0,
            added_mass_coefficient_in_surge: 0.4,
            added_mass_coefficient_in_sway: 0.4,
            added_mass_coefficient_in_yaw: 0.4,
            mass_over_linear_friction_coefficient_in_surge: 130.0,
            mass_over_linear_friction_coefficient_in_sway: 18.0,
            mass_over_linear_friction_coefficient_in_yaw: 90.0,
            nonlinear_friction_coefficient_in_surge: 2400.0,
            nonlinear_friction_coefficient_in_sway: 4000.0,
            nonlinear_friction_coefficient_in_yaw: 400.0,
        }
    }
}

/// Wind and current acting on the drifting ship
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvironmentConfiguration {
    /// Current velocity towards north (m/s)
    pub current_velocity_north: f64,
    /// Current velocity towards east (m/s)
    pub current_velocity_east: f64,
    /// Wind speed (m/s)
    pub wind_speed: f64,
    /// Direction the wind blows from, clockwise from north (rad)
    pub wind_direction_rad: f64,
}

impl EnvironmentConfiguration {
    pub fn validate(&self) -> Result<()> {
        ensure_non_negative("wind_speed", self.wind_speed)?;
        Ok(())
    }

    /// Wind velocity vector in NED (direction of travel of the air)
    fn wind_velocity_ned(&self) -> (f64, f64) {
        let (sin_b, cos_b) = self.wind_direction_rad.sin_cos();
        (-self.wind_speed * cos_b, -self.wind_speed * sin_b)
    }
}

// ============================================================================
// 3-DOF DRIFT MODEL
// ============================================================================

/// Ship without propulsion drifting under wind and current
#[derive(Debug, Clone)]
pub struct ShipDriftModel {
    ship: ShipConfiguration,
    environment: EnvironmentConfiguration,
    // Cached derived quantities
    mass: f64,
    surge_mass: f64,
    sway_mass: f64,
    yaw_inertia: f64,
    linear_damping: [f64; 3],
}

impl ShipDriftModel {
    pub fn new(ship: ShipConfiguration, environment: EnvironmentConfiguration) -> Result<Self> {
        ship.validate()?;
        environment.validate()?;

        let mass = ship.mass();
        let inertia = ship.yaw_inertia();
        Ok(Self {
            ship,
            environment,
            mass,
            surge_mass: mass * (1.0 + ship.added_mass_coefficient_in_surge),
            sway_mass: mass * (1.0 + ship.added_mass_coefficient_in_sway),
            yaw_inertia: inertia * (1.0 + ship.added_mass_coefficient_in_yaw),
            linear_damping: [
                mass / ship.mass_over_linear_friction_coefficient_in_surge,
                mass / ship.mass_over_linear_friction_coefficient_in_sway,
                inertia / ship.mass_over_linear_friction_coefficient_in_yaw,
            ],
        })
    }

    pub fn ship(&self) -> &ShipConfiguration {
        &self.ship
    }

    pub fn environment(&self) -> &EnvironmentConfiguration {
        &self.environment
    }

    /// Wind force (surge, sway) and yaw moment in body coordinates
    pub fn wind_loads(&self, state: &MotionState) -> [f64; 3] {
        if self.environment.wind_speed == 0.0 {
            return [0.0; 3];
        }
        let (wind_n, wind_e) = self.environment.wind_velocity_ned();
        let (u_w, v_w) = to_body(wind_n, wind_e, state.yaw_angle_rad);
        let u_rw = state.surge_speed - u_w;
        let v_rw = state.sway_speed - v_w;

        let dynamic_pressure = 0.5 * RHO_AIR * (u_rw * u_rw + v_rw * v_rw);
        let angle_of_attack = -v_rw.atan2(u_rw);

        [
            -WIND_COEFF_SURGE * angle_of_attack.cos() * dynamic_pressure * self.ship.frontal_area(),
            WIND_COEFF_SWAY * angle_of_attack.sin() * dynamic_pressure * self.ship.lateral_area(),
            -WIND_COEFF_YAW
                * (2.0 * angle_of_attack).sin()
                * dynamic_pressure
                * self.ship.lateral_area()
                * self.ship.length_of_ship,
        ]
    }

    /// Hydrodynamic damping on velocities relative to the current
    pub fn damping_loads(&self, state: &MotionState) -> [f64; 3] {
        let (u_c, v_c) = to_body(
            self.environment.current_velocity_north,
            self.environment.current_velocity_east,
            state.yaw_angle_rad,
        );
        let u_r = state.surge_speed - u_c;
        let v_r = state.sway_speed - v_c;
        let r = state.yaw_rate;

        [
            -(self.linear_damping[0] + self.ship.nonlinear_friction_coefficient_in_surge * u_r.abs()) * u_r,
            -(self.linear_damping[1] + self.ship.nonlinear_friction_coefficient_in_sway * v_r.abs()) * v_r,
            -(self.linear_damping[2] + self.ship.nonlinear_friction_coefficient_in_yaw * r.abs()) * r,
        ]
    }

    /// Body-frame accelerations (u̇, v̇, ṙ)
    pub fn accelerations(&self, state: &MotionState) -> [f64; 3] {
        let wind = self.wind_loads(state);
        let damping = self.damping_loads(state);
        let (u, v, r) = (state.surge_speed, state.sway_speed, state.yaw_rate);

        let added_surge = self.surge_mass - self.mass;
        let added_sway = self.sway_mass - self.mass;

        [
            (wind[0] + damping[0] + (self.mass + added_sway) * v * r) / self.surge_mass,
            (wind[1] + damping[1] - (self.mass + added_surge) * u * r) / self.sway_mass,
            (wind[2] + damping[2]) / self.yaw_inertia,
        ]
    }
}

impl DriftDynamics for ShipDriftModel {
    fn step(&self, state: &MotionState, dt: f64) -> MotionState {
        let [u_dot, v_dot, r_dot] = self.accelerations(state);
        let velocity = state.velocity_ned();

        MotionState {
            north: state.north + velocity.north * dt,
            east: state.east + velocity.east * dt,
            yaw_angle_rad: state.yaw_angle_rad + state.yaw_rate * dt,
            surge_speed: state.surge_speed + u_dot * dt,
            sway_speed: state.sway_speed + v_dot * dt,
            yaw_rate: state.yaw_rate + r_dot * dt,
        }
    }
}

/// Rotate an NED vector into body coordinates
fn to_body(north: f64, east: f64, yaw: f64) -> (f64, f64) {
    let (sin_psi, cos_psi) = yaw.sin_cos();
    (north * cos_psi + east * sin_psi, -north * sin_psi + east * cos_psi)
}

// ============================================================================
// KINEMATIC DRIFT
// ============================================================================

/// Drift at a fixed NED velocity, ignoring inertia.
///
/// Gives closed-form times to grounding; the body velocities of the
/// returned state are set so that `speed()` reports the drift speed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConstantDrift {
    pub velocity_north: f64,
    pub velocity_east: f64,
}

impl ConstantDrift {
    pub fn new(velocity_north: f64, velocity_east: f64) -> Self {
        Self {
            velocity_north,
            velocity_east,
        }
    }
}

impl DriftDynamics for ConstantDrift {
    fn step(&self, state: &MotionState, dt: f64) -> MotionState {
        let (u, v) = to_body(self.velocity_north, self.velocity_east, state.yaw_angle_rad);
        MotionState {
            north: state.north + self.velocity_north * dt,
            east: state.east + self.velocity_east * dt,
            yaw_angle_rad: state.yaw_angle_rad,
            surge_speed: u,
            sway_speed: v,
            yaw_rate: 0.0,
        }
    }
}
