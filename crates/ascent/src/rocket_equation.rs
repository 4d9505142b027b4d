//! Closed-form rocket-equation estimates at lift-off conditions.

use philo_propulsion::Vehicle;

use crate::AscentError;

/// Lift-off estimates that do not depend on the integration loop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClosedFormEstimate {
    pub delta_v_m_s: f64,
    /// Burn time if the lift-off mass flow were held for the whole burn.
    pub constant_thrust_flight_time_s: f64,
}

/// Tsiolkovsky ideal velocity change.
pub fn delta_v(
    exhaust_velocity_m_s: f64,
    wet_mass_kg: f64,
    dry_mass_kg: f64,
) -> Result<f64, AscentError> {
    if !exhaust_velocity_m_s.is_finite() || exhaust_velocity_m_s <= 0.0 {
        return Err(AscentError::ExhaustVelocity {
            exhaust_velocity_m_s,
        });
    }
    if !(dry_mass_kg > 0.0 && wet_mass_kg > dry_mass_kg && wet_mass_kg.is_finite()) {
        return Err(AscentError::MassRatio {
            wet_kg: wet_mass_kg,
            dry_kg: dry_mass_kg,
        });
    }
    Ok(exhaust_velocity_m_s * (wet_mass_kg / dry_mass_kg).ln())
}

/// Time to drain `fuel_mass_kg` at a fixed `mass_flow_kg_s`.
pub fn constant_thrust_flight_time(
    fuel_mass_kg: f64,
    mass_flow_kg_s: f64,
) -> Result<f64, AscentError> {
    if !mass_flow_kg_s.is_finite() || mass_flow_kg_s <= 0.0 {
        return Err(AscentError::NonPositiveMassFlow {
            step: 0,
            mass_flow_kg_s,
        });
    }
    Ok(fuel_mass_kg / mass_flow_kg_s)
}

/// Both closed-form figures for `vehicle` at lift-off.
pub fn closed_form(vehicle: &Vehicle) -> Result<ClosedFormEstimate, AscentError> {
    Ok(ClosedFormEstimate {
        delta_v_m_s: delta_v(
            vehicle.engine().exhaust_velocity_m_s(),
            vehicle.wet_mass_kg(),
            vehicle.dry_mass_kg(),
        )?,
        constant_thrust_flight_time_s: constant_thrust_flight_time(
            vehicle.fuel_mass_kg(),
            vehicle.mass_flow_kg_s(),
        )?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delta_v_matches_tsiolkovsky() {
        let dv = delta_v(2_000.0, 10.0, 5.0).unwrap();
        assert!((dv - 2_000.0 * std::f64::consts::LN_2).abs() < 1e-9);
    }

    #[test]
    fn delta_v_rejects_bad_mass_ratio() {
        assert!(matches!(
            delta_v(2_000.0, 5.0, 5.0),
            Err(AscentError::MassRatio { .. })
        ));
        assert!(matches!(
            delta_v(2_000.0, 5.0, 0.0),
            Err(AscentError::MassRatio { .. })
        ));
        assert!(matches!(
            delta_v(2_000.0, 4.0, 5.0),
            Err(AscentError::MassRatio { .. })
        ));
    }

    #[test]
    fn delta_v_rejects_nan_exhaust_velocity() {
        assert!(matches!(
            delta_v(f64::NAN, 10.0, 5.0),
            Err(AscentError::ExhaustVelocity { .. })
        ));
    }

    #[test]
    fn constant_thrust_time_requires_flow() {
        assert_eq!(constant_thrust_flight_time(1.0, 0.5).unwrap(), 2.0);
        assert!(matches!(
            constant_thrust_flight_time(1.0, 0.0),
            Err(AscentError::NonPositiveMassFlow { step: 0, .. })
        ));
    }
}
