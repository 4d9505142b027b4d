//! Single-stage vehicle mass budget.

use philo_core::constants::G0;

use crate::{Engine, Fuel, PropulsionError, Tank, require_non_negative};

/// Thrust (N) that exactly cancels the weight of `mass_kg`.
#[inline]
pub fn null_gravity_thrust_n(mass_kg: f64) -> f64 {
    mass_kg * G0
}

/// Initial-condition snapshot of a fuelled vehicle.
///
/// All derived quantities are fixed at construction; burn simulations work
/// on their own copy of the changing state.
#[derive(Debug, Clone, PartialEq)]
pub struct Vehicle {
    avionics_mass_kg: f64,
    mech_mass_kg: f64,
    tank: Tank,
    engine: Engine,
    fuel_mass_kg: f64,
    dry_mass_kg: f64,
    wet_mass_kg: f64,
    null_thrust_n: f64,
    mass_flow_kg_s: f64,
}

impl Vehicle {
    /// Fill `tank` with the engine's fuel and derive the mass budget.
    pub fn new(
        avionics_mass_kg: f64,
        mech_mass_kg: f64,
        tank: Tank,
        engine: Engine,
    ) -> Result<Self, PropulsionError> {
        require_non_negative("avionics mass", avionics_mass_kg)?;
        require_non_negative("mechanical mass", mech_mass_kg)?;

        let fuel_mass_kg = tank.ideal_gas_mass_kg(engine.fuel());
        let dry_mass_kg = tank.tank_mass_kg + avionics_mass_kg + mech_mass_kg;
        let wet_mass_kg = dry_mass_kg + fuel_mass_kg;
        let null_thrust_n = null_gravity_thrust_n(wet_mass_kg);
        let mass_flow_kg_s = null_thrust_n / engine.exhaust_velocity_m_s();

        Ok(Self {
            avionics_mass_kg,
            mech_mass_kg,
            tank,
            engine,
            fuel_mass_kg,
            dry_mass_kg,
            wet_mass_kg,
            null_thrust_n,
            mass_flow_kg_s,
        })
    }

    pub fn avionics_mass_kg(&self) -> f64 {
        self.avionics_mass_kg
    }

    pub fn mech_mass_kg(&self) -> f64 {
        self.mech_mass_kg
    }

    pub fn tank(&self) -> &Tank {
        &self.tank
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn fuel(&self) -> &Fuel {
        self.engine.fuel()
    }

    pub fn fuel_mass_kg(&self) -> f64 {
        self.fuel_mass_kg
    }

    /// Tank, avionics and mechanical structure.
    pub fn dry_mass_kg(&self) -> f64 {
        self.dry_mass_kg
    }

    pub fn wet_mass_kg(&self) -> f64 {
        self.wet_mass_kg
    }

    /// Thrust needed to hover at lift-off.
    pub fn null_thrust_n(&self) -> f64 {
        self.null_thrust_n
    }

    /// Mass flow needed to hover at lift-off.
    pub fn mass_flow_kg_s(&self) -> f64 {
        self.mass_flow_kg_s
    }
}
