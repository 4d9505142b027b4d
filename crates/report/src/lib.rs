//! Human-readable console report for one ascent run.

use std::fmt;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use philo_ascent::{AscentSummary, IntegratorSettings};
use philo_core::units::{kelvin_to_celsius, m3_to_litres, pa_to_bar};
use philo_propulsion::Vehicle;

const RULE: &str = "-----------------------";
const LABEL_WIDTH: usize = 44;

/// Figures printed for a run, copied out of the vehicle and the ascent summary.
#[derive(Debug, Clone, PartialEq)]
pub struct AscentReport {
    pub source: PathBuf,
    pub fuel_type: String,
    pub gamma: f64,
    pub tank_volume_m3: f64,
    pub tank_pressure_pa: f64,
    pub tank_temperature_k: f64,
    pub chamber_temperature_k: f64,
    pub exhaust_velocity_m_s: f64,
    pub isp_seconds: f64,
    pub dry_mass_kg: f64,
    pub fuel_mass_kg: f64,
    pub wet_mass_kg: f64,
    pub mass_flow_kg_s: f64,
    pub delta_v_m_s: f64,
    pub constant_thrust_flight_time_s: f64,
    pub constant_acceleration_flight_time_s: f64,
    pub integration_steps: u64,
    pub time_step_s: f64,
}

impl AscentReport {
    pub fn new(
        source: &Path,
        vehicle: &Vehicle,
        summary: &AscentSummary,
        settings: &IntegratorSettings,
    ) -> Self {
        let engine = vehicle.engine();
        let tank = vehicle.tank();
        Self {
            source: source.to_path_buf(),
            fuel_type: vehicle.fuel().fuel_type().to_string(),
            gamma: vehicle.fuel().gamma(),
            tank_volume_m3: tank.volume_m3,
            tank_pressure_pa: tank.pressure_pa,
            tank_temperature_k: tank.temperature_k,
            chamber_temperature_k: engine.heater().chamber_temperature_k,
            exhaust_velocity_m_s: engine.exhaust_velocity_m_s(),
            isp_seconds: engine.isp_seconds(),
            dry_mass_kg: vehicle.dry_mass_kg(),
            fuel_mass_kg: vehicle.fuel_mass_kg(),
            wet_mass_kg: vehicle.wet_mass_kg(),
            mass_flow_kg_s: vehicle.mass_flow_kg_s(),
            delta_v_m_s: summary.closed_form.delta_v_m_s,
            constant_thrust_flight_time_s: summary.closed_form.constant_thrust_flight_time_s,
            constant_acceleration_flight_time_s: summary.burn.flight_time_s,
            integration_steps: summary.burn.steps,
            time_step_s: settings.dt_s,
        }
    }

    /// Write the report to `writer`.
    pub fn write_to(&self, writer: &mut dyn Write) -> io::Result<()> {
        write!(writer, "{self}")?;
        writer.flush()
    }
}

fn line(f: &mut fmt::Formatter<'_>, label: &str, value: impl fmt::Display) -> fmt::Result {
    writeln!(f, "{:<width$} {}", format!("{label}:"), value, width = LABEL_WIDTH)
}

impl fmt::Display for AscentReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        writeln!(f, "Philo Sim")?;
        writeln!(f, "{RULE}")?;
        line(f, "Scenario", self.source.display())?;
        line(
            f,
            "Fuel",
            format_args!("{} (gamma {:.6})", self.fuel_type, self.gamma),
        )?;
        line(
            f,
            "Tank",
            format_args!(
                "{:.3} L at {:.3} bar, {:.2} °C",
                m3_to_litres(self.tank_volume_m3),
                pa_to_bar(self.tank_pressure_pa),
                kelvin_to_celsius(self.tank_temperature_k)
            ),
        )?;
        line(
            f,
            "Chamber Temperature (K)",
            format_args!(
                "{:.6} ({:.2} °C)",
                self.chamber_temperature_k,
                kelvin_to_celsius(self.chamber_temperature_k)
            ),
        )?;
        line(
            f,
            "Exhaust Velocity (m/s)",
            format_args!("{:.6}", self.exhaust_velocity_m_s),
        )?;
        line(f, "Specific Impulse (s)", format_args!("{:.6}", self.isp_seconds))?;
        writeln!(f, "{RULE}")?;
        line(
            f,
            "Initial Vehicle Dry Mass (kg)",
            format_args!("{:.6}", self.dry_mass_kg),
        )?;
        line(f, "Initial Fuel Mass (kg)", format_args!("{:.6}", self.fuel_mass_kg))?;
        line(
            f,
            "Initial Vehicle Wet Mass (kg)",
            format_args!("{:.6}", self.wet_mass_kg),
        )?;
        line(
            f,
            "Exhaust Mass Flow (kg/s)",
            format_args!("{:.6}", self.mass_flow_kg_s),
        )?;
        line(f, "Delta V (m/s)", format_args!("{:.6}", self.delta_v_m_s))?;
        line(
            f,
            "Constant Thrust - Flight Time (sec)",
            format_args!("{:.6}", self.constant_thrust_flight_time_s),
        )?;
        line(
            f,
            "Constant Acceleration - Flight Time (sec)",
            format_args!("{:.6}", self.constant_acceleration_flight_time_s),
        )?;
        line(
            f,
            "Integration Steps",
            format_args!("{} (dt = {} s)", self.integration_steps, self.time_step_s),
        )?;
        writeln!(f, "{RULE}")
    }
}
