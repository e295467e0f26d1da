use anyhow::Context;
use chrono::Utc;
use clap::Parser;
use std::path::PathBuf;
use stock_pages::utils::init_from_config;
use stock_pages::{build, BuildOptions, SiteConfig};
use tracing::info;

/// Build the static stock prediction site from the latest snapshot
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Project root holding Data/, static/ and config.json
    #[arg(long, default_value = ".")]
    root: PathBuf,

    /// Snapshot directory (default: <root>/Data)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Output directory, cleared on every build (default: <root>/dist)
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// Site configuration, JSON or TOML (default: $CONFIG_FILE or <root>/config.json)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory containing styles.css (default: <root>/static)
    #[arg(long)]
    static_dir: Option<PathBuf>,

    /// Log level, overrides the config file
    #[arg(long)]
    log_level: Option<String>,

    /// Also save the build report as JSON to this file
    #[arg(long)]
    report: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let args = Args::parse();

    let config_path = args
        .config
        .clone()
        .unwrap_or_else(|| SiteConfig::default_path(&args.root));
    let config = SiteConfig::from_file(&config_path)
        .with_context(|| format!("loading config from {}", config_path.display()))?;

    init_from_config(&config.logging, args.log_level.as_deref())?;
    info!(config = %config_path.display(), base_url = %config.base_url, "Configuration loaded");

    let mut options = BuildOptions::for_root(&args.root, Utc::now());
    if let Some(data_dir) = args.data_dir {
        options.data_dir = data_dir;
    }
    if let Some(out_dir) = args.out_dir {
        options.out_dir = out_dir;
    }
    if let Some(static_dir) = args.static_dir {
        options.static_dir = Some(static_dir);
    }

    let report = build(&config, &options).context("site build failed")?;

    println!("Build complete → {}", report.out_dir.display());
    report.print_summary();

    if let Some(path) = args.report {
        report.write_json(&path)?;
        println!("Report saved to: {}", path.display());
    }

    Ok(())
}
