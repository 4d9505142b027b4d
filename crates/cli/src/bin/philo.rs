use std::io;
use std::path::PathBuf;

use clap::Parser;
use philo_sim::config::resolve_config_path;
use philo_sim::scenario;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Burn-time and delta-v estimates for a heated gas thruster vehicle"
)]
struct Cli {
    /// Primary configuration document (defaults to philo_cfg.json)
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    let resolution = resolve_config_path(cli.config.as_deref());
    if let Some(fallback) = &resolution.fallback {
        tracing::warn!("{fallback}");
    }

    let run = scenario::run_file(&resolution.path)?;
    run.report().write_to(&mut io::stdout().lock())?;
    Ok(())
}
