use std::io;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use triage_console::Session;
use triage_core::config::{
    data_dir_from_env_value, resolve_data_dir, severity_table_from_env_value,
};
use triage_core::CoreConfig;

/// Main entry point for the triage booking console
///
/// Resolves configuration once, then runs the interactive menu on stdin/stdout until the
/// user exits or input is closed. Errors from menu actions are reported on stderr and do
/// not end the session; only configuration failures at startup do.
///
/// # Environment Variables
/// - `TRIAGE_DATA_DIR`: Directory for `patients.csv` and `patient_queue.csv` (default: ".")
/// - `TRIAGE_SEVERITY_FILE`: YAML `disease: rank` file replacing the built-in table
/// - `RUST_LOG`: Log filter; logs go to stderr (default: "warn")
fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let data_dir = resolve_data_dir(data_dir_from_env_value(
        std::env::var("TRIAGE_DATA_DIR").ok(),
    ))?;
    let severity_table =
        severity_table_from_env_value(std::env::var("TRIAGE_SEVERITY_FILE").ok())?;
    let cfg = CoreConfig::new(data_dir, severity_table)?;

    tracing::info!("++ Starting triage console in {}", cfg.data_dir().display());

    let mut session = Session::new(&cfg, io::stdin().lock(), io::stdout(), io::stderr());
    session.run()?;

    Ok(())
}
