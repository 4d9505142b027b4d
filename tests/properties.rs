use philo_sim::ascent::{IntegratorSettings, closed_form, integrate_burn, simulate};
use philo_sim::constants::{G0, SEA_LEVEL_PRESSURE_PA};
use philo_sim::propulsion::{Engine, Fuel, Heater, PropulsionError, Tank, Vehicle};

fn fuel() -> Fuel {
    // gamma = 1.4
    Fuel::new("Hydrogen", 14_000.0, 10_000.0, 0.002).unwrap()
}

fn tank(volume: f64, pressure: f64) -> Tank {
    Tank::new(volume, pressure, 5.0, 5.0e5, 2.0e6, 298.15).unwrap()
}

fn engine(inlet_pa: f64, ambient_pa: f64) -> Result<Engine, PropulsionError> {
    Engine::new(fuel(), Heater::new(300.0)?, inlet_pa, ambient_pa)
}

fn reference_vehicle() -> Vehicle {
    Vehicle::new(
        1.0,
        2.0,
        tank(0.005, 2.0e7),
        engine(2.0e7, SEA_LEVEL_PRESSURE_PA).unwrap(),
    )
    .unwrap()
}

#[test]
fn fuel_mass_scales_linearly_with_pressure_and_volume() {
    let fuel = fuel();
    let base = tank(0.005, 2.0e7).ideal_gas_mass_kg(&fuel);
    assert!(base > 0.0);
    for factor in [0.25, 0.5, 3.0, 10.0] {
        let p = tank(0.005, 2.0e7 * factor).ideal_gas_mass_kg(&fuel);
        let v = tank(0.005 * factor, 2.0e7).ideal_gas_mass_kg(&fuel);
        assert!((p / base - factor).abs() < 1e-12, "pressure x{factor}");
        assert!((v / base - factor).abs() < 1e-12, "volume x{factor}");
    }
}

#[test]
fn exhaust_velocity_positive_and_isp_exact() {
    for (inlet, ambient) in [(2.0e7, SEA_LEVEL_PRESSURE_PA), (5.0e5, 1.0e5), (1.0e6, 0.0)] {
        let engine = engine(inlet, ambient).unwrap();
        let ve = engine.exhaust_velocity_m_s();
        assert!(ve > 0.0 && ve.is_finite());
        assert_eq!(engine.isp_seconds(), ve / G0);
    }
}

#[test]
fn ambient_not_below_inlet_is_a_domain_error() {
    for (inlet, ambient) in [(1.0e5, 1.0e5), (1.0e5, 2.0e5)] {
        match engine(inlet, ambient) {
            Err(PropulsionError::PressureRatio {
                inlet_pa,
                ambient_pa,
            }) => {
                assert_eq!(inlet_pa, inlet);
                assert_eq!(ambient_pa, ambient);
            }
            other => panic!("expected pressure ratio error, got {other:?}"),
        }
    }
}

#[test]
fn mass_budget_invariants_hold() {
    let vehicle = reference_vehicle();
    assert!(vehicle.dry_mass_kg() <= vehicle.wet_mass_kg());
    assert!(
        ((vehicle.wet_mass_kg() - vehicle.dry_mass_kg()) - vehicle.fuel_mass_kg()).abs() < 1e-12
    );
}

#[test]
fn reference_scenario_produces_finite_positive_figures() {
    let vehicle = reference_vehicle();
    let summary = simulate(&vehicle, &IntegratorSettings::default()).unwrap();

    let ve = vehicle.engine().exhaust_velocity_m_s();
    assert!(ve.is_finite() && ve > 0.0);
    assert!(vehicle.fuel_mass_kg().is_finite() && vehicle.fuel_mass_kg() > 0.0);
    assert!(summary.closed_form.delta_v_m_s.is_finite() && summary.closed_form.delta_v_m_s > 0.0);
    assert!(summary.burn.flight_time_s.is_finite());
    assert!(summary.burn.flight_time_s > summary.closed_form.constant_thrust_flight_time_s);
}

#[test]
fn integrated_burn_outlasts_constant_thrust_estimate() {
    for (volume, pressure) in [(0.005, 2.0e7), (0.02, 3.0e7), (0.001, 5.0e6)] {
        let vehicle = Vehicle::new(
            1.0,
            2.0,
            tank(volume, pressure),
            engine(pressure, SEA_LEVEL_PRESSURE_PA).unwrap(),
        )
        .unwrap();
        let estimate = closed_form(&vehicle).unwrap();
        let burn = integrate_burn(&vehicle, &IntegratorSettings::default()).unwrap();
        assert!(
            burn.flight_time_s > estimate.constant_thrust_flight_time_s,
            "V={volume} P={pressure}: {} <= {}",
            burn.flight_time_s,
            estimate.constant_thrust_flight_time_s
        );
    }
}

#[test]
fn integration_stops_within_one_step_of_empty() {
    let vehicle = reference_vehicle();
    let settings = IntegratorSettings::default();
    let burn = integrate_burn(&vehicle, &settings).unwrap();
    assert!(burn.residual_fuel_kg <= 0.0);
    assert!(burn.residual_fuel_kg > -burn.final_mass_flow_kg_s * settings.dt_s);
}

#[test]
fn exhaust_velocity_round_trips_through_vehicle() {
    let vehicle = reference_vehicle();
    let mut engine = vehicle.engine().clone();
    let again = engine.recompute().unwrap();
    assert_eq!(
        again.exhaust_velocity_m_s.to_bits(),
        vehicle.engine().exhaust_velocity_m_s().to_bits()
    );
}
