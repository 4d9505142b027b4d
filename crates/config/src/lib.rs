//! Configuration models and loaders for the Philo ascent simulator.
//!
//! A scenario is described by a primary document (`Vehicle`, `Engine` and an
//! optional `Simulation` section) plus three catalogs mapping names to tank,
//! fuel and heater records. Catalogs live next to the primary document and
//! share its format.

mod resolve;

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

pub use resolve::{Named, ResolvedConfig, resolve};

/// File name used when no usable primary configuration path was given.
pub const DEFAULT_CONFIG_FILE: &str = "philo_cfg.json";

/// Primary scenario document.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct SimConfig {
    #[serde(rename = "Vehicle")]
    pub vehicle: VehicleSection,
    #[serde(rename = "Engine")]
    pub engine: EngineSection,
    #[serde(rename = "Simulation", default)]
    pub simulation: SimulationSection,
}

/// `Vehicle` section: tank selection and non-propulsive masses (kg).
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct VehicleSection {
    pub tank: String,
    pub avionics_mass: f64,
    pub mech_mass: f64,
}

/// `Engine` section: fuel and heater selection plus the pressure pair (Pa).
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct EngineSection {
    pub fuel: String,
    #[serde(rename = "P_ambient")]
    pub p_ambient: f64,
    #[serde(rename = "P_in")]
    pub p_in: f64,
    pub heater: String,
}

/// Optional integration overrides.
#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq)]
pub struct SimulationSection {
    #[serde(default)]
    pub dt: Option<f64>,
    #[serde(default)]
    pub max_steps: Option<u64>,
}

/// Propellant tank record.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct TankRecord {
    /// m³
    pub volume: f64,
    /// Pa
    pub pressure: f64,
    /// kg
    pub tank_mass: f64,
    pub reg_min: f64,
    pub reg_max: f64,
    /// K
    pub temp: f64,
}

/// Fuel record. Heat capacities are taken at 0 °C.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct FuelRecord {
    pub fuel_type: String,
    pub cp: f64,
    pub cv: f64,
    pub molar_mass: f64,
}

/// Heating element record.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct HeaterRecord {
    #[serde(rename = "T_chamber")]
    pub t_chamber: f64,
}

/// Name-keyed lookup table.
pub type Catalog<T> = BTreeMap<String, T>;

/// The three lookup tables referenced by a primary document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalogs {
    pub tanks: Catalog<TankRecord>,
    pub fuels: Catalog<FuelRecord>,
    pub heaters: Catalog<HeaterRecord>,
}

/// Kinds of catalog entries a primary document can reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Tank,
    Fuel,
    Heater,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            EntityKind::Tank => "tank",
            EntityKind::Fuel => "fuel",
            EntityKind::Heater => "heater",
        };
        f.write_str(label)
    }
}

/// Errors that can occur while loading or resolving configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuration file not found: {}", .0.display())]
    Missing(PathBuf),
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse JSON in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to parse YAML in {}: {source}", path.display())]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("failed to parse TOML in {}: {source}", path.display())]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("unsupported configuration format: {} (expected .json, .yaml, .yml or .toml)", .0.display())]
    UnsupportedFormat(PathBuf),
    #[error("referenced {kind} '{name}' not found in the {kind} catalog")]
    NotFound { kind: EntityKind, name: String },
    #[error("invalid value for {field}: {value} ({reason})")]
    InvalidValue {
        field: String,
        value: f64,
        reason: &'static str,
    },
}

/// Serialization formats accepted for configuration documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
    Toml,
}

impl DocumentFormat {
    /// Infer the format from a file extension.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());
        match ext.as_deref() {
            Some("json") => Ok(DocumentFormat::Json),
            Some("yaml") | Some("yml") => Ok(DocumentFormat::Yaml),
            Some("toml") => Ok(DocumentFormat::Toml),
            _ => Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
        }
    }
}

/// Locations of the three catalogs for one primary document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogPaths {
    pub tanks: PathBuf,
    pub fuels: PathBuf,
    pub heaters: PathBuf,
}

impl CatalogPaths {
    /// Catalogs stored in the same directory as `config_path`, with the same extension.
    pub fn beside(config_path: &Path) -> Result<Self, ConfigError> {
        DocumentFormat::from_path(config_path)?;
        let dir = config_path.parent().unwrap_or_else(|| Path::new(""));
        let ext = config_path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("json");
        Ok(Self {
            tanks: dir.join(format!("tanks.{ext}")),
            fuels: dir.join(format!("fuels.{ext}")),
            heaters: dir.join(format!("heaters.{ext}")),
        })
    }
}

/// Why the default configuration file was used instead of a caller-supplied one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fallback {
    /// No path was given.
    Unspecified,
    /// A path was given but does not name an existing file.
    RequestedMissing(PathBuf),
}

impl fmt::Display for Fallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Fallback::Unspecified => write!(
                f,
                "config file undefined, loading default config: {DEFAULT_CONFIG_FILE}"
            ),
            Fallback::RequestedMissing(path) => write!(
                f,
                "config file {} not found, loading default config: {DEFAULT_CONFIG_FILE}",
                path.display()
            ),
        }
    }
}

/// Outcome of choosing which primary document to load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigResolution {
    pub path: PathBuf,
    pub fallback: Option<Fallback>,
}

/// Pick the primary configuration document.
///
/// An existing requested file wins; otherwise [`DEFAULT_CONFIG_FILE`] is
/// chosen and the reason is returned so the caller can report it.
pub fn resolve_config_path(requested: Option<&Path>) -> ConfigResolution {
    match requested {
        Some(path) if path.is_file() => ConfigResolution {
            path: path.to_path_buf(),
            fallback: None,
        },
        Some(path) => ConfigResolution {
            path: PathBuf::from(DEFAULT_CONFIG_FILE),
            fallback: Some(Fallback::RequestedMissing(path.to_path_buf())),
        },
        None => ConfigResolution {
            path: PathBuf::from(DEFAULT_CONFIG_FILE),
            fallback: Some(Fallback::Unspecified),
        },
    }
}

/// Load a primary scenario document.
pub fn load_sim_config<P: AsRef<Path>>(path: P) -> Result<SimConfig, ConfigError> {
    load_document(path.as_ref())
}

/// Load the tank, fuel and heater catalogs.
pub fn load_catalogs(paths: &CatalogPaths) -> Result<Catalogs, ConfigError> {
    let catalogs = Catalogs {
        tanks: load_document(&paths.tanks)?,
        fuels: load_document(&paths.fuels)?,
        heaters: load_document(&paths.heaters)?,
    };
    tracing::debug!(
        tanks = catalogs.tanks.len(),
        fuels = catalogs.fuels.len(),
        heaters = catalogs.heaters.len(),
        "catalogs loaded"
    );
    Ok(catalogs)
}

/// Load a primary document and its catalogs, then resolve and validate every reference.
pub fn load<P: AsRef<Path>>(path: P) -> Result<ResolvedConfig, ConfigError> {
    let path = path.as_ref();
    let config = load_sim_config(path)?;
    let catalogs = load_catalogs(&CatalogPaths::beside(path)?)?;
    resolve(path, &config, &catalogs)
}

fn load_document<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    if !path.is_file() {
        return Err(ConfigError::Missing(path.to_path_buf()));
    }
    let format = DocumentFormat::from_path(path)?;
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), ?format, "reading configuration document");
    match format {
        DocumentFormat::Json => {
            serde_json::from_str(&contents).map_err(|source| ConfigError::Json {
                path: path.to_path_buf(),
                source,
            })
        }
        DocumentFormat::Yaml => {
            serde_yaml::from_str(&contents).map_err(|source| ConfigError::Yaml {
                path: path.to_path_buf(),
                source,
            })
        }
        DocumentFormat::Toml => toml::from_str(&contents).map_err(|source| ConfigError::Toml {
            path: path.to_path_buf(),
            source,
        }),
    }
}
