//! # GROUNDING-RISK
//!
//! Demo: grounding risk along a straight transit past three obstacles and a
//! shoreline. Pass a TOML study file as the first argument to override the
//! hybrid machinery case study.

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use grounding_risk::*;

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    println!("{}", grounding_risk::info());
    println!();

    let study = match std::env::args().nth(1) {
        Some(path) => {
            info!(path = %path, "loading study");
            GroundingRiskStudy::from_toml_str(&std::fs::read_to_string(&path)?)?
        }
        None => GroundingRiskStudy {
            // Wind from south-west pushes the ship towards the obstacles
            environment: EnvironmentConfiguration {
                current_velocity_north: 0.5,
                current_velocity_east: 0.5,
                wind_speed: 10.0,
                wind_direction_rad: 225.0 * DEG_TO_RAD,
            },
            ..Default::default()
        },
    };

    let hazards = HazardCollection::new()
        .with_shoreline(ShoreLine::straight(3500.0, (-5000.0, 8000.0), 1000.0)?)
        .with_obstacle(StaticObstacle::new(1500.0, 1600.0, 250.0, HazardClass::Shore)?)
        .with_obstacle(StaticObstacle::new(1700.0, 2300.0, 250.0, HazardClass::FishFarm)?)
        .with_obstacle(StaticObstacle::new(2300.0, 1450.0, 250.0, HazardClass::Infrastructure)?);

    let drift = study.drift_model()?;
    let model = study.risk_model(&drift, &hazards)?;

    println!("Ship: {:.0} m x {:.0} m, {:.0} t", drift.ship().length_of_ship, drift.ship().width_of_ship, drift.ship().mass() / 1000.0);
    println!("Risk time interval: {:.0} s", study.risk_model.risk_time_interval);
    println!();

    // Transit at 7 m/s heading 30°, one state per risk time interval
    let start = MotionState::new(0.0, 0.0, 30.0 * DEG_TO_RAD, 7.0, 0.0, 0.0);
    let interval = study.risk_model.risk_time_interval;
    let states: Vec<MotionState> = (0..15)
        .map(|i| {
            let t = i as f64 * interval;
            let position = start.position() + start.velocity_ned() * t;
            MotionState {
                north: position.north,
                east: position.east,
                ..start
            }
        })
        .collect();

    let outputs = model.evaluate_trajectory(&states)?;
    println!("{:>6} {:>22} {:>10} {:>10}", "t [s]", "position", "TTG [s]", "cost");
    for (i, (state, output)) in states.iter().zip(&outputs).enumerate() {
        print!(
            "{:>6.0} {:>22} {:>10.1} {:>10.2e}",
            i as f64 * interval,
            state.position().to_string(),
            output.time_to_grounding,
            output.consequence_of_grounding
        );
        for mode in &output.modes {
            print!("  {} {:.2e}", mode.mode, mode.probability_of_grounding);
        }
        println!();
    }
    println!();

    if let Some(first) = outputs.first() {
        println!("{}", first.report());
    }

    println!("Prediction horizon ({} intervals):", states.len());
    let mode_names: Vec<String> = model.mode_names().map(str::to_string).collect();
    for mode in &mode_names {
        let horizon = model.prediction_horizon(&states, mode)?;
        let horizon_length = interval * horizon.len() as f64;
        let rate = horizon.total_probability() / horizon_length;
        println!(
            "  {:<6} P = {:.3e}  risk = {:.3e}  ({:.3e} per hour, {:.3e} per year)",
            mode,
            horizon.total_probability(),
            horizon.total_risk(),
            rate * SECONDS_PER_HOUR,
            rate * SECONDS_PER_YEAR,
        );
    }

    Ok(())
}
