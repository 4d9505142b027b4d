//! Core units, constants, and shared primitives for the Philo workspace.

/// Natural constants expressed in SI units.
pub mod constants {
    /// Universal gas constant (J/(K·mol)).
    pub const GAS_CONSTANT: f64 = 8.314;
    /// Gravitational acceleration used for weight and specific impulse (m/s²).
    pub const G0: f64 = 9.81;
    /// Sea-level ambient pressure (Pa).
    pub const SEA_LEVEL_PRESSURE_PA: f64 = 101_325.0;
    /// Reference ambient temperature (K).
    pub const AMBIENT_TEMPERATURE_K: f64 = 298.15;
}

/// Basic unit conversion helpers.
pub mod units {
    /// Convert pascals to bar.
    #[inline]
    pub fn pa_to_bar(v: f64) -> f64 {
        v / 100_000.0
    }

    /// Convert cubic metres to litres.
    #[inline]
    pub fn m3_to_litres(v: f64) -> f64 {
        v * 1_000.0
    }

    /// Convert kelvin to degrees Celsius.
    #[inline]
    pub fn kelvin_to_celsius(v: f64) -> f64 {
        v - 273.15
    }
}
