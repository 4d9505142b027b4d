//! Burn-duration estimates for a single-stage gas-thruster vehicle.
//!
//! Two independent figures are produced: closed-form rocket-equation
//! estimates evaluated at lift-off, and a fixed-step integration of a burn
//! whose thrust tracks the vehicle's shrinking weight.

pub mod hover;
pub mod rocket_equation;

use philo_propulsion::{PropulsionError, Vehicle};
use thiserror::Error;

pub use hover::{
    BurnResult, DEFAULT_MAX_STEPS, DEFAULT_TIME_STEP_S, IntegratorSettings, NullGravity,
    ThrustLaw, integrate_burn, integrate_burn_with,
};
pub use rocket_equation::{ClosedFormEstimate, closed_form, constant_thrust_flight_time, delta_v};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AscentError {
    #[error("mass ratio is not physical: wet {wet_kg} kg, dry {dry_kg} kg (need wet > dry > 0)")]
    MassRatio { wet_kg: f64, dry_kg: f64 },
    #[error("exhaust velocity must be positive and finite, got {exhaust_velocity_m_s} m/s")]
    ExhaustVelocity { exhaust_velocity_m_s: f64 },
    #[error("mass flow must be positive and finite, got {mass_flow_kg_s} kg/s at step {step}")]
    NonPositiveMassFlow { step: u64, mass_flow_kg_s: f64 },
    #[error("integration step must be positive and finite, got {dt_s} s")]
    InvalidStep { dt_s: f64 },
    #[error("burn did not finish within {max_steps} steps ({remaining_fuel_kg} kg of fuel left)")]
    StepLimitExceeded {
        max_steps: u64,
        remaining_fuel_kg: f64,
    },
    #[error(transparent)]
    Propulsion(#[from] PropulsionError),
}

/// Closed-form and integrated figures for one vehicle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AscentSummary {
    pub closed_form: ClosedFormEstimate,
    pub burn: BurnResult,
}

/// Evaluate the rocket equation and integrate a weight-nulling burn.
///
/// `vehicle` is only read; the burn runs on a private copy of its state.
pub fn simulate(
    vehicle: &Vehicle,
    settings: &IntegratorSettings,
) -> Result<AscentSummary, AscentError> {
    let closed_form = closed_form(vehicle)?;
    let burn = integrate_burn(vehicle, settings)?;
    tracing::debug!(
        constant_thrust_s = closed_form.constant_thrust_flight_time_s,
        constant_acceleration_s = burn.flight_time_s,
        "ascent estimates complete"
    );
    Ok(AscentSummary { closed_form, burn })
}
