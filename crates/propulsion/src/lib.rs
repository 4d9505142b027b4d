//! Propellant, tank, heater and vehicle mass properties for a heated gas thruster.

pub mod engine;
pub mod vehicle;

use philo_core::constants::GAS_CONSTANT;
use thiserror::Error;

pub use engine::{Engine, NozzlePerformance, exhaust_velocity};
pub use vehicle::{Vehicle, null_gravity_thrust_n};

/// Physically invalid inputs or derived quantities.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PropulsionError {
    #[error("{quantity} must be positive and finite, got {value}")]
    NonPositive { quantity: &'static str, value: f64 },
    #[error("{quantity} must be non-negative and finite, got {value}")]
    Negative { quantity: &'static str, value: f64 },
    #[error("heat-capacity ratio cp/cv must exceed 1, got {gamma}")]
    HeatCapacityRatio { gamma: f64 },
    #[error(
        "inlet pressure {inlet_pa} Pa must exceed ambient pressure {ambient_pa} Pa for nozzle expansion"
    )]
    PressureRatio { inlet_pa: f64, ambient_pa: f64 },
    #[error("exhaust velocity is not physical (radicand {radicand})")]
    NonPhysicalExhaust { radicand: f64 },
    #[error("regulator {band} band is inverted: min {min} Pa > max {max} Pa")]
    RegulatorBand {
        band: &'static str,
        min: f64,
        max: f64,
    },
}

pub(crate) fn require_positive(quantity: &'static str, value: f64) -> Result<f64, PropulsionError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(PropulsionError::NonPositive { quantity, value })
    }
}

pub(crate) fn require_non_negative(
    quantity: &'static str,
    value: f64,
) -> Result<f64, PropulsionError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(PropulsionError::Negative { quantity, value })
    }
}

/// Working gas with temperature-independent heat capacities.
#[derive(Debug, Clone, PartialEq)]
pub struct Fuel {
    fuel_type: String,
    cp: f64,
    cv: f64,
    molar_mass_kg_mol: f64,
    gamma: f64,
}

impl Fuel {
    /// `cp` and `cv` in J/(kg·K), molar mass in kg/mol.
    pub fn new(
        fuel_type: impl Into<String>,
        cp: f64,
        cv: f64,
        molar_mass_kg_mol: f64,
    ) -> Result<Self, PropulsionError> {
        require_positive("cp", cp)?;
        require_positive("cv", cv)?;
        require_positive("molar mass", molar_mass_kg_mol)?;
        let gamma = cp / cv;
        if gamma <= 1.0 {
            return Err(PropulsionError::HeatCapacityRatio { gamma });
        }
        Ok(Self {
            fuel_type: fuel_type.into(),
            cp,
            cv,
            molar_mass_kg_mol,
            gamma,
        })
    }

    pub fn fuel_type(&self) -> &str {
        &self.fuel_type
    }

    pub fn cp(&self) -> f64 {
        self.cp
    }

    pub fn cv(&self) -> f64 {
        self.cv
    }

    pub fn molar_mass_kg_mol(&self) -> f64 {
        self.molar_mass_kg_mol
    }

    /// Heat-capacity ratio `cp / cv`.
    pub fn gamma(&self) -> f64 {
        self.gamma
    }
}

/// Pressurised propellant tank.
#[derive(Debug, Clone, PartialEq)]
pub struct Tank {
    pub volume_m3: f64,
    pub pressure_pa: f64,
    pub tank_mass_kg: f64,
    pub reg_min_pa: f64,
    pub reg_max_pa: f64,
    pub temperature_k: f64,
}

impl Tank {
    pub fn new(
        volume_m3: f64,
        pressure_pa: f64,
        tank_mass_kg: f64,
        reg_min_pa: f64,
        reg_max_pa: f64,
        temperature_k: f64,
    ) -> Result<Self, PropulsionError> {
        Ok(Self {
            volume_m3: require_positive("tank volume", volume_m3)?,
            pressure_pa: require_positive("tank pressure", pressure_pa)?,
            tank_mass_kg: require_non_negative("tank mass", tank_mass_kg)?,
            reg_min_pa,
            reg_max_pa,
            temperature_k: require_positive("tank temperature", temperature_k)?,
        })
    }

    /// Mass of `fuel` stored in the tank according to the ideal gas law.
    pub fn ideal_gas_mass_kg(&self, fuel: &Fuel) -> f64 {
        (self.pressure_pa * self.volume_m3) / (GAS_CONSTANT * self.temperature_k)
            * fuel.molar_mass_kg_mol()
    }
}

/// Filament heating the gas in the thrust chamber.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Heater {
    pub chamber_temperature_k: f64,
}

impl Heater {
    pub fn new(chamber_temperature_k: f64) -> Result<Self, PropulsionError> {
        Ok(Self {
            chamber_temperature_k: require_positive("chamber temperature", chamber_temperature_k)?,
        })
    }
}

/// Pressure regulator between tank and engine. Not part of the burn model yet.
#[derive(Debug, Clone, PartialEq)]
pub struct Regulator {
    pub in_min_pa: f64,
    pub in_max_pa: f64,
    pub out_min_pa: f64,
    pub out_max_pa: f64,
    pub set_point_pa: f64,
    pub input_pa: f64,
    pub output_pa: f64,
}

impl Regulator {
    pub fn new(
        in_min_pa: f64,
        in_max_pa: f64,
        out_min_pa: f64,
        out_max_pa: f64,
        set_point_pa: f64,
    ) -> Result<Self, PropulsionError> {
        if in_min_pa > in_max_pa {
            return Err(PropulsionError::RegulatorBand {
                band: "input",
                min: in_min_pa,
                max: in_max_pa,
            });
        }
        if out_min_pa > out_max_pa {
            return Err(PropulsionError::RegulatorBand {
                band: "output",
                min: out_min_pa,
                max: out_max_pa,
            });
        }
        Ok(Self {
            in_min_pa,
            in_max_pa,
            out_min_pa,
            out_max_pa,
            set_point_pa,
            input_pa: 0.0,
            output_pa: 0.0,
        })
    }

    /// Regulator fed by `tank`, delivering within the tank's regulator set points.
    pub fn for_tank(tank: &Tank, set_point_pa: f64) -> Result<Self, PropulsionError> {
        Self::new(
            0.0,
            tank.pressure_pa,
            tank.reg_min_pa,
            tank.reg_max_pa,
            set_point_pa,
        )
    }

    /// Feed `input_pa` and return the delivered pressure.
    ///
    /// Output tracks the set point clamped to the output band and can never
    /// exceed the supply pressure.
    pub fn update(&mut self, input_pa: f64) -> f64 {
        self.input_pa = input_pa;
        self.output_pa = self
            .set_point_pa
            .clamp(self.out_min_pa, self.out_max_pa)
            .min(input_pa.max(0.0));
        self.output_pa
    }

    /// Whether the current input lies within the rated input band.
    pub fn input_in_range(&self) -> bool {
        (self.in_min_pa..=self.in_max_pa).contains(&self.input_pa)
    }
}
