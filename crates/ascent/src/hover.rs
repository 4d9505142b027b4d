//! Fixed-step integration of a burn whose thrust follows the vehicle weight.
//!
//! The controller throttles so that thrust always equals the current weight:
//! as propellant leaves, the commanded thrust and the mass flow drop with it.
//! The loop is explicit forward Euler, so the global error is O(dt).

use philo_propulsion::{Vehicle, null_gravity_thrust_n};

use crate::AscentError;

/// Reference integration step (s).
pub const DEFAULT_TIME_STEP_S: f64 = 0.001;
/// Safety cap on the number of integration steps.
pub const DEFAULT_MAX_STEPS: u64 = 1_000_000;

/// Step size and iteration cap for [`integrate_burn`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntegratorSettings {
    pub dt_s: f64,
    pub max_steps: u64,
}

impl Default for IntegratorSettings {
    fn default() -> Self {
        Self {
            dt_s: DEFAULT_TIME_STEP_S,
            max_steps: DEFAULT_MAX_STEPS,
        }
    }
}

impl IntegratorSettings {
    /// Defaults with any provided values substituted.
    pub fn with_overrides(dt_s: Option<f64>, max_steps: Option<u64>) -> Self {
        let defaults = Self::default();
        Self {
            dt_s: dt_s.unwrap_or(defaults.dt_s),
            max_steps: max_steps.unwrap_or(defaults.max_steps),
        }
    }
}

/// Thrust command as a function of the instantaneous vehicle mass.
pub trait ThrustLaw {
    /// Commanded thrust (N) for a vehicle of `vehicle_mass_kg`.
    fn commanded_thrust_n(&self, vehicle_mass_kg: f64) -> f64;
}

/// Thrust equal to weight: zero net vertical acceleration.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullGravity;

impl ThrustLaw for NullGravity {
    fn commanded_thrust_n(&self, vehicle_mass_kg: f64) -> f64 {
        null_gravity_thrust_n(vehicle_mass_kg)
    }
}

/// Outcome of an integrated burn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BurnResult {
    pub flight_time_s: f64,
    pub steps: u64,
    /// Fuel left after the last step; never positive, and overshoots zero by
    /// less than one step's worth of flow.
    pub residual_fuel_kg: f64,
    /// Vehicle mass at the start of the last step.
    pub final_vehicle_mass_kg: f64,
    pub final_mass_flow_kg_s: f64,
    pub final_thrust_n: f64,
    pub final_exhaust_velocity_m_s: f64,
}

#[derive(Debug, Clone, Copy)]
struct BurnState {
    fuel_mass_kg: f64,
    vehicle_mass_kg: f64,
    thrust_n: f64,
    exhaust_velocity_m_s: f64,
    mass_flow_kg_s: f64,
    flight_time_s: f64,
    steps: u64,
}

impl BurnState {
    fn lift_off(vehicle: &Vehicle) -> Self {
        Self {
            fuel_mass_kg: vehicle.fuel_mass_kg(),
            vehicle_mass_kg: vehicle.wet_mass_kg(),
            thrust_n: vehicle.null_thrust_n(),
            exhaust_velocity_m_s: vehicle.engine().exhaust_velocity_m_s(),
            mass_flow_kg_s: vehicle.mass_flow_kg_s(),
            flight_time_s: 0.0,
            steps: 0,
        }
    }
}

/// Integrate a weight-nulling burn until the tank is empty.
pub fn integrate_burn(
    vehicle: &Vehicle,
    settings: &IntegratorSettings,
) -> Result<BurnResult, AscentError> {
    integrate_burn_with(vehicle, settings, &NullGravity)
}

/// Integrate a burn under an arbitrary thrust law until the tank is empty.
///
/// Each step recomputes the vehicle mass, the commanded thrust, the engine's
/// exhaust velocity and the resulting mass flow, then drains `flow * dt`.
/// A non-positive mass flow or exceeding `settings.max_steps` aborts the run.
pub fn integrate_burn_with(
    vehicle: &Vehicle,
    settings: &IntegratorSettings,
    law: &dyn ThrustLaw,
) -> Result<BurnResult, AscentError> {
    let dt = settings.dt_s;
    if !dt.is_finite() || dt <= 0.0 {
        return Err(AscentError::InvalidStep { dt_s: dt });
    }

    let dry_mass_kg = vehicle.dry_mass_kg();
    let mut engine = vehicle.engine().clone();
    let mut state = BurnState::lift_off(vehicle);

    while state.fuel_mass_kg > 0.0 {
        if state.steps >= settings.max_steps {
            return Err(AscentError::StepLimitExceeded {
                max_steps: settings.max_steps,
                remaining_fuel_kg: state.fuel_mass_kg,
            });
        }

        state.vehicle_mass_kg = dry_mass_kg + state.fuel_mass_kg;
        state.thrust_n = law.commanded_thrust_n(state.vehicle_mass_kg);
        state.exhaust_velocity_m_s = engine.recompute()?.exhaust_velocity_m_s;
        state.mass_flow_kg_s = state.thrust_n / state.exhaust_velocity_m_s;
        if !state.mass_flow_kg_s.is_finite() || state.mass_flow_kg_s <= 0.0 {
            return Err(AscentError::NonPositiveMassFlow {
                step: state.steps,
                mass_flow_kg_s: state.mass_flow_kg_s,
            });
        }

        state.fuel_mass_kg -= state.mass_flow_kg_s * dt;
        state.flight_time_s += dt;
        state.steps += 1;
    }

    tracing::info!(
        steps = state.steps,
        flight_time_s = state.flight_time_s,
        residual_fuel_kg = state.fuel_mass_kg,
        "burn integrated"
    );

    Ok(BurnResult {
        flight_time_s: state.flight_time_s,
        steps: state.steps,
        residual_fuel_kg: state.fuel_mass_kg,
        final_vehicle_mass_kg: state.vehicle_mass_kg,
        final_mass_flow_kg_s: state.mass_flow_kg_s,
        final_thrust_n: state.thrust_n,
        final_exhaust_velocity_m_s: state.exhaust_velocity_m_s,
    })
}
