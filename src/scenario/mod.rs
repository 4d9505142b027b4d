//! Turns a resolved configuration into a vehicle and runs the ascent estimates.

use std::path::Path;

use philo_ascent::{AscentError, AscentSummary, IntegratorSettings};
use philo_config::{ConfigError, ResolvedConfig};
use philo_propulsion::{Engine, Fuel, Heater, PropulsionError, Tank, Vehicle};
use philo_report::AscentReport;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("domain error: {0}")]
    Propulsion(#[from] PropulsionError),
    #[error("domain error: {0}")]
    Ascent(#[from] AscentError),
}

/// Everything produced by one run, kept together for reporting.
#[derive(Debug, Clone)]
pub struct ScenarioRun {
    pub config: ResolvedConfig,
    pub vehicle: Vehicle,
    pub settings: IntegratorSettings,
    pub summary: AscentSummary,
}

impl ScenarioRun {
    pub fn report(&self) -> AscentReport {
        AscentReport::new(
            &self.config.source,
            &self.vehicle,
            &self.summary,
            &self.settings,
        )
    }
}

/// Build the lift-off vehicle snapshot described by `config`.
pub fn build_vehicle(config: &ResolvedConfig) -> Result<Vehicle, ScenarioError> {
    let fuel_rec = &config.fuel.record;
    let fuel = Fuel::new(
        fuel_rec.fuel_type.clone(),
        fuel_rec.cp,
        fuel_rec.cv,
        fuel_rec.molar_mass,
    )?;
    let heater = Heater::new(config.heater.record.t_chamber)?;
    let engine = Engine::new(fuel, heater, config.p_in, config.p_ambient)?;

    let tank_rec = &config.tank.record;
    let tank = Tank::new(
        tank_rec.volume,
        tank_rec.pressure,
        tank_rec.tank_mass,
        tank_rec.reg_min,
        tank_rec.reg_max,
        tank_rec.temp,
    )?;

    let vehicle = Vehicle::new(config.avionics_mass, config.mech_mass, tank, engine)?;
    tracing::debug!(
        fuel_mass_kg = vehicle.fuel_mass_kg(),
        dry_mass_kg = vehicle.dry_mass_kg(),
        exhaust_velocity_m_s = vehicle.engine().exhaust_velocity_m_s(),
        "vehicle assembled"
    );
    Ok(vehicle)
}

/// Integration settings, honouring the optional `Simulation` section.
pub fn integrator_settings(config: &ResolvedConfig) -> IntegratorSettings {
    IntegratorSettings::with_overrides(config.simulation.dt, config.simulation.max_steps)
}

/// Run the closed-form and integrated estimates for a resolved configuration.
pub fn run(config: ResolvedConfig) -> Result<ScenarioRun, ScenarioError> {
    let vehicle = build_vehicle(&config)?;
    let settings = integrator_settings(&config);
    let summary = philo_ascent::simulate(&vehicle, &settings)?;
    Ok(ScenarioRun {
        config,
        vehicle,
        settings,
        summary,
    })
}

/// Load the primary document at `path` with its catalogs and run it.
pub fn run_file<P: AsRef<Path>>(path: P) -> Result<ScenarioRun, ScenarioError> {
    let config = philo_config::load(path)?;
    run(config)
}
