//! Ascent performance of a single-stage vehicle lifted by a heated gas thruster.
//!
//! The library front-end re-exports the member crates so the CLI and tests
//! share one entry point.

pub mod scenario;

pub use philo_ascent as ascent;
pub use philo_config as config;
pub use philo_core::{constants, units};
pub use philo_propulsion as propulsion;
pub use philo_report as report;
