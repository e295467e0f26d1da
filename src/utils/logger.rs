use tracing_subscriber::{fmt, EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use std::path::Path;

/// Initialize logging system
///
/// `RUST_LOG` takes precedence over `level`. Returns an error when the log
/// file cannot be opened or a global subscriber is already installed.
pub fn init_logger(level: &str, json_output: bool, log_file: Option<&Path>) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level));

    let registry = tracing_subscriber::registry().with(filter);

    if json_output {
        if let Some(file) = log_file {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(file)?;

            registry
                .with(fmt::layer().json().with_writer(file))
                .try_init()?;
        } else {
            registry
                .with(fmt::layer().json())
                .try_init()?;
        }
    } else {
        registry
            .with(fmt::layer().with_target(false))
            .try_init()?;
    }

    Ok(())
}

/// Initialize logger from config, with an optional level override from the CLI
pub fn init_from_config(
    config: &crate::utils::config::LoggingConfig,
    level_override: Option<&str>,
) -> anyhow::Result<()> {
    let json = config.output == "json";
    let log_file = if !config.file_path.is_empty() {
        Some(Path::new(&config.file_path))
    } else {
        None
    };

    init_logger(level_override.unwrap_or(&config.level), json, log_file)
}
