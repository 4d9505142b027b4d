//! Catalog lookups and value validation for a loaded scenario.

use std::path::{Path, PathBuf};

use crate::{
    Catalog, Catalogs, ConfigError, EntityKind, FuelRecord, HeaterRecord, SimConfig,
    SimulationSection, TankRecord,
};

/// A catalog record together with the key it was looked up under.
#[derive(Debug, Clone, PartialEq)]
pub struct Named<T> {
    pub name: String,
    pub record: T,
}

/// Fully resolved, validated scenario parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub source: PathBuf,
    pub tank: Named<TankRecord>,
    pub fuel: Named<FuelRecord>,
    pub heater: Named<HeaterRecord>,
    pub avionics_mass: f64,
    pub mech_mass: f64,
    pub p_ambient: f64,
    pub p_in: f64,
    pub simulation: SimulationSection,
}

/// Resolve catalog references of `config` and validate every scalar.
pub fn resolve(
    source: &Path,
    config: &SimConfig,
    catalogs: &Catalogs,
) -> Result<ResolvedConfig, ConfigError> {
    let tank = lookup(&catalogs.tanks, EntityKind::Tank, &config.vehicle.tank)?;
    let fuel = lookup(&catalogs.fuels, EntityKind::Fuel, &config.engine.fuel)?;
    let heater = lookup(&catalogs.heaters, EntityKind::Heater, &config.engine.heater)?;

    validate_tank(&tank)?;
    validate_fuel(&fuel)?;
    positive(
        format!("heaters.{}.T_chamber", heater.name),
        heater.record.t_chamber,
    )?;

    non_negative("Vehicle.avionics_mass".into(), config.vehicle.avionics_mass)?;
    non_negative("Vehicle.mech_mass".into(), config.vehicle.mech_mass)?;
    non_negative("Engine.P_ambient".into(), config.engine.p_ambient)?;
    positive("Engine.P_in".into(), config.engine.p_in)?;

    if let Some(dt) = config.simulation.dt {
        positive("Simulation.dt".into(), dt)?;
    }
    if let Some(max_steps) = config.simulation.max_steps {
        if max_steps == 0 {
            return Err(ConfigError::InvalidValue {
                field: "Simulation.max_steps".into(),
                value: 0.0,
                reason: "must be at least 1",
            });
        }
    }

    tracing::debug!(
        source = %source.display(),
        tank = %tank.name,
        fuel = %fuel.name,
        heater = %heater.name,
        "configuration resolved"
    );

    Ok(ResolvedConfig {
        source: source.to_path_buf(),
        tank,
        fuel,
        heater,
        avionics_mass: config.vehicle.avionics_mass,
        mech_mass: config.vehicle.mech_mass,
        p_ambient: config.engine.p_ambient,
        p_in: config.engine.p_in,
        simulation: config.simulation,
    })
}

fn lookup<T: Clone>(
    catalog: &Catalog<T>,
    kind: EntityKind,
    name: &str,
) -> Result<Named<T>, ConfigError> {
    catalog
        .get(name)
        .map(|record| Named {
            name: name.to_string(),
            record: record.clone(),
        })
        .ok_or_else(|| ConfigError::NotFound {
            kind,
            name: name.to_string(),
        })
}

fn validate_tank(tank: &Named<TankRecord>) -> Result<(), ConfigError> {
    let prefix = format!("tanks.{}", tank.name);
    let t = &tank.record;
    positive(format!("{prefix}.volume"), t.volume)?;
    positive(format!("{prefix}.pressure"), t.pressure)?;
    non_negative(format!("{prefix}.tank_mass"), t.tank_mass)?;
    positive(format!("{prefix}.temp"), t.temp)?;
    non_negative(format!("{prefix}.reg_min"), t.reg_min)?;
    non_negative(format!("{prefix}.reg_max"), t.reg_max)?;
    if t.reg_min > t.reg_max {
        return Err(ConfigError::InvalidValue {
            field: format!("{prefix}.reg_min"),
            value: t.reg_min,
            reason: "must not exceed reg_max",
        });
    }
    Ok(())
}

fn validate_fuel(fuel: &Named<FuelRecord>) -> Result<(), ConfigError> {
    let prefix = format!("fuels.{}", fuel.name);
    let f = &fuel.record;
    positive(format!("{prefix}.cp"), f.cp)?;
    positive(format!("{prefix}.cv"), f.cv)?;
    positive(format!("{prefix}.molar_mass"), f.molar_mass)
}

fn positive(field: String, value: f64) -> Result<(), ConfigError> {
    if !value.is_finite() {
        return Err(ConfigError::InvalidValue {
            field,
            value,
            reason: "must be finite",
        });
    }
    if value <= 0.0 {
        return Err(ConfigError::InvalidValue {
            field,
            value,
            reason: "must be positive",
        });
    }
    Ok(())
}

fn non_negative(field: String, value: f64) -> Result<(), ConfigError> {
    if !value.is_finite() {
        return Err(ConfigError::InvalidValue {
            field,
            value,
            reason: "must be finite",
        });
    }
    if value < 0.0 {
        return Err(ConfigError::InvalidValue {
            field,
            value,
            reason: "must not be negative",
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{EngineSection, VehicleSection};

    fn catalogs() -> Catalogs {
        let mut catalogs = Catalogs::default();
        catalogs.tanks.insert(
            "small".into(),
            TankRecord {
                volume: 0.005,
                pressure: 2.0e7,
                tank_mass: 5.0,
                reg_min: 5.0e5,
                reg_max: 2.0e6,
                temp: 298.15,
            },
        );
        catalogs.fuels.insert(
            "H2".into(),
            FuelRecord {
                fuel_type: "Hydrogen".into(),
                cp: 14_000.0,
                cv: 10_000.0,
                molar_mass: 0.002,
            },
        );
        catalogs
            .heaters
            .insert("coil".into(), HeaterRecord { t_chamber: 300.0 });
        catalogs
    }

    fn config() -> SimConfig {
        SimConfig {
            vehicle: VehicleSection {
                tank: "small".into(),
                avionics_mass: 1.0,
                mech_mass: 2.0,
            },
            engine: EngineSection {
                fuel: "H2".into(),
                p_ambient: 101_325.0,
                p_in: 2.0e7,
                heater: "coil".into(),
            },
            simulation: SimulationSection::default(),
        }
    }

    #[test]
    fn resolves_all_references() {
        let resolved = resolve(Path::new("philo_cfg.json"), &config(), &catalogs()).unwrap();
        assert_eq!(resolved.tank.name, "small");
        assert_eq!(resolved.fuel.record.fuel_type, "Hydrogen");
        assert_eq!(resolved.heater.record.t_chamber, 300.0);
        assert_eq!(resolved.p_in, 2.0e7);
    }

    #[test]
    fn unknown_tank_is_not_found() {
        let mut cfg = config();
        cfg.vehicle.tank = "huge".into();
        let err = resolve(Path::new("x.json"), &cfg, &catalogs()).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::NotFound { kind: EntityKind::Tank, ref name } if name == "huge"
        ));
        assert_eq!(
            err.to_string(),
            "referenced tank 'huge' not found in the tank catalog"
        );
    }

    #[test]
    fn unknown_heater_is_not_found() {
        let mut cfg = config();
        cfg.engine.heater = "arc".into();
        let err = resolve(Path::new("x.json"), &cfg, &catalogs()).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::NotFound {
                kind: EntityKind::Heater,
                ..
            }
        ));
    }

    #[test]
    fn non_positive_volume_names_the_field() {
        let mut cats = catalogs();
        cats.tanks.get_mut("small").unwrap().volume = 0.0;
        let err = resolve(Path::new("x.json"), &config(), &cats).unwrap_err();
        match err {
            ConfigError::InvalidValue { field, .. } => assert_eq!(field, "tanks.small.volume"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn inverted_regulator_band_is_rejected() {
        let mut cats = catalogs();
        cats.tanks.get_mut("small").unwrap().reg_min = 3.0e6;
        let err = resolve(Path::new("x.json"), &config(), &cats).unwrap_err();
        assert!(err.to_string().contains("reg_max"));
    }

    #[test]
    fn zero_step_limit_is_rejected() {
        let mut cfg = config();
        cfg.simulation.max_steps = Some(0);
        assert!(resolve(Path::new("x.json"), &cfg, &catalogs()).is_err());
    }
}
