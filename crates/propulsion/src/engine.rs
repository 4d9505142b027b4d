//! Ideal isentropic nozzle model for a heated gas thruster.

use philo_core::constants::{G0, GAS_CONSTANT};

use crate::{Fuel, Heater, PropulsionError, require_non_negative, require_positive};

/// Exhaust velocity and specific impulse for one engine operating point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NozzlePerformance {
    pub exhaust_velocity_m_s: f64,
    pub isp_seconds: f64,
}

impl NozzlePerformance {
    fn from_exhaust_velocity(exhaust_velocity_m_s: f64) -> Self {
        Self {
            exhaust_velocity_m_s,
            isp_seconds: exhaust_velocity_m_s / G0,
        }
    }
}

/// Ideal exhaust velocity (m/s) of a gas expanded isentropically from
/// `inlet_pa` down to `ambient_pa`.
///
/// Fails instead of producing NaN when the gas cannot expand
/// (`inlet_pa <= ambient_pa`) or when `gamma <= 1`.
pub fn exhaust_velocity(
    chamber_temperature_k: f64,
    molar_mass_kg_mol: f64,
    gamma: f64,
    inlet_pa: f64,
    ambient_pa: f64,
) -> Result<f64, PropulsionError> {
    require_positive("chamber temperature", chamber_temperature_k)?;
    require_positive("molar mass", molar_mass_kg_mol)?;
    if !gamma.is_finite() || gamma <= 1.0 {
        return Err(PropulsionError::HeatCapacityRatio { gamma });
    }
    require_positive("inlet pressure", inlet_pa)?;
    require_non_negative("ambient pressure", ambient_pa)?;
    if inlet_pa <= ambient_pa {
        return Err(PropulsionError::PressureRatio {
            inlet_pa,
            ambient_pa,
        });
    }

    let radicand = ((chamber_temperature_k * GAS_CONSTANT) / molar_mass_kg_mol)
        * ((2.0 * gamma) / (gamma - 1.0))
        * (1.0 - (ambient_pa / inlet_pa).powf((gamma - 1.0) / gamma));
    if !radicand.is_finite() || radicand <= 0.0 {
        return Err(PropulsionError::NonPhysicalExhaust { radicand });
    }
    Ok(radicand.sqrt())
}

/// Heated gas thruster: fuel, heater and the inlet/ambient pressure pair.
///
/// The derived performance is cached and refreshed whenever a pressure
/// changes or [`Engine::recompute`] is called.
#[derive(Debug, Clone, PartialEq)]
pub struct Engine {
    fuel: Fuel,
    heater: Heater,
    inlet_pressure_pa: f64,
    ambient_pressure_pa: f64,
    performance: NozzlePerformance,
}

impl Engine {
    pub fn new(
        fuel: Fuel,
        heater: Heater,
        inlet_pressure_pa: f64,
        ambient_pressure_pa: f64,
    ) -> Result<Self, PropulsionError> {
        let performance = evaluate(&fuel, &heater, inlet_pressure_pa, ambient_pressure_pa)?;
        Ok(Self {
            fuel,
            heater,
            inlet_pressure_pa,
            ambient_pressure_pa,
            performance,
        })
    }

    /// Evaluate the nozzle at the current operating point without touching the cache.
    pub fn evaluate(&self) -> Result<NozzlePerformance, PropulsionError> {
        evaluate(
            &self.fuel,
            &self.heater,
            self.inlet_pressure_pa,
            self.ambient_pressure_pa,
        )
    }

    /// Refresh the cached performance and return it.
    pub fn recompute(&mut self) -> Result<NozzlePerformance, PropulsionError> {
        self.performance = self.evaluate()?;
        Ok(self.performance)
    }

    /// Change the inlet pressure. On error the engine is left unchanged.
    pub fn set_inlet_pressure(
        &mut self,
        inlet_pressure_pa: f64,
    ) -> Result<NozzlePerformance, PropulsionError> {
        self.performance = evaluate(
            &self.fuel,
            &self.heater,
            inlet_pressure_pa,
            self.ambient_pressure_pa,
        )?;
        self.inlet_pressure_pa = inlet_pressure_pa;
        Ok(self.performance)
    }

    /// Change the ambient pressure. On error the engine is left unchanged.
    pub fn set_ambient_pressure(
        &mut self,
        ambient_pressure_pa: f64,
    ) -> Result<NozzlePerformance, PropulsionError> {
        self.performance = evaluate(
            &self.fuel,
            &self.heater,
            self.inlet_pressure_pa,
            ambient_pressure_pa,
        )?;
        self.ambient_pressure_pa = ambient_pressure_pa;
        Ok(self.performance)
    }

    pub fn fuel(&self) -> &Fuel {
        &self.fuel
    }

    pub fn heater(&self) -> &Heater {
        &self.heater
    }

    pub fn inlet_pressure_pa(&self) -> f64 {
        self.inlet_pressure_pa
    }

    pub fn ambient_pressure_pa(&self) -> f64 {
        self.ambient_pressure_pa
    }

    pub fn performance(&self) -> NozzlePerformance {
        self.performance
    }

    pub fn exhaust_velocity_m_s(&self) -> f64 {
        self.performance.exhaust_velocity_m_s
    }

    pub fn isp_seconds(&self) -> f64 {
        self.performance.isp_seconds
    }
}

fn evaluate(
    fuel: &Fuel,
    heater: &Heater,
    inlet_pa: f64,
    ambient_pa: f64,
) -> Result<NozzlePerformance, PropulsionError> {
    exhaust_velocity(
        heater.chamber_temperature_k,
        fuel.molar_mass_kg_mol(),
        fuel.gamma(),
        inlet_pa,
        ambient_pa,
    )
    .map(NozzlePerformance::from_exhaust_velocity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use philo_core::constants::SEA_LEVEL_PRESSURE_PA;

    fn engine(inlet_pa: f64) -> Result<Engine, PropulsionError> {
        Engine::new(
            Fuel::new("Hydrogen", 14_000.0, 10_000.0, 0.002)?,
            Heater::new(300.0)?,
            inlet_pa,
            SEA_LEVEL_PRESSURE_PA,
        )
    }

    #[test]
    fn reference_engine_exhaust_velocity() {
        let engine = engine(2.0e7).unwrap();
        let ve = engine.exhaust_velocity_m_s();
        // sqrt(300 * 8.314 / 0.002 * 7 * (1 - (101325 / 2e7)^(2/7)))
        assert!((ve - 2_608.0).abs() < 5.0, "ve = {ve}");
        assert_eq!(engine.isp_seconds(), ve / G0);
    }

    #[test]
    fn vacuum_expansion_is_the_upper_bound() {
        let mut engine = engine(2.0e7).unwrap();
        let sea_level = engine.exhaust_velocity_m_s();
        let vacuum = engine.set_ambient_pressure(0.0).unwrap();
        assert!(vacuum.exhaust_velocity_m_s > sea_level);
        // sqrt(2 * gamma / (gamma - 1) * R * T / M)
        let limit = (7.0 * 300.0 * GAS_CONSTANT / 0.002_f64).sqrt();
        assert!((vacuum.exhaust_velocity_m_s - limit).abs() < 1e-6);
    }

    #[test]
    fn ambient_at_or_above_inlet_is_a_domain_error() {
        for inlet in [SEA_LEVEL_PRESSURE_PA, 50_000.0] {
            let err = engine(inlet).unwrap_err();
            assert!(
                matches!(err, PropulsionError::PressureRatio { .. }),
                "inlet {inlet}: {err}"
            );
        }
    }

    #[test]
    fn unit_gamma_is_a_domain_error() {
        let err = exhaust_velocity(300.0, 0.002, 1.0, 2.0e7, SEA_LEVEL_PRESSURE_PA).unwrap_err();
        assert_eq!(err, PropulsionError::HeatCapacityRatio { gamma: 1.0 });
    }

    #[test]
    fn recompute_is_bit_identical() {
        let mut engine = engine(2.0e7).unwrap();
        let first = engine.performance();
        assert_eq!(engine.recompute().unwrap(), first);
        assert_eq!(engine.evaluate().unwrap(), first);
        assert_eq!(
            engine.exhaust_velocity_m_s().to_bits(),
            first.exhaust_velocity_m_s.to_bits()
        );
    }

    #[test]
    fn rejected_pressure_leaves_engine_unchanged() {
        let mut engine = engine(2.0e7).unwrap();
        let before = engine.clone();
        assert!(engine.set_inlet_pressure(1_000.0).is_err());
        assert_eq!(engine, before);
    }

    #[test]
    fn higher_inlet_pressure_increases_exhaust_velocity() {
        let mut engine = engine(1.0e6).unwrap();
        let low = engine.exhaust_velocity_m_s();
        let high = engine.set_inlet_pressure(2.0e7).unwrap().exhaust_velocity_m_s;
        assert!(high > low);
        assert_eq!(engine.inlet_pressure_pa(), 2.0e7);
    }
}
