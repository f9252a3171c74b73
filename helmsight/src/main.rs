//! Helmsight - live instrument dashboard for marine sensor hubs.
//!
//! Connects to an instrument hub's live sockets, shows wind and
//! navigation telemetry, and plots logged history.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use helmsight::Helmsight;
use helmsight_common::{AppConfig, load_config};

/// Live dashboard for wind and navigation telemetry.
#[derive(Parser, Debug)]
#[command(name = "helmsight")]
#[command(about = "Live dashboard for a marine instrument hub")]
#[command(version)]
struct Args {
    /// Hostname or address of the instrument hub.
    #[arg(long)]
    host: Option<String>,

    /// Path to configuration file (JSON5 format).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override log level (trace, debug, info, warn, error).
    #[arg(long)]
    log_level: Option<String>,

    /// Run against simulated instruments instead of a hub.
    #[arg(long)]
    demo: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut config: AppConfig = match &args.config {
        Some(path) => load_config(path)
            .with_context(|| format!("Failed to load config from {:?}", path))?,
        None => AppConfig::load_default()?,
    };

    if let Some(host) = args.host {
        config.device.host = host;
    }
    if let Some(level) = args.log_level {
        config.logging.level = level;
    }

    helmsight_common::init_tracing(&config.logging)
        .map_err(|e| anyhow::anyhow!("Failed to init tracing: {}", e))?;

    tracing::info!(host = %config.device.host, demo = args.demo, "Starting Helmsight");

    let demo = args.demo;
    iced::application(
        move || Helmsight::boot(config.clone(), demo),
        Helmsight::update,
        Helmsight::view,
    )
    .title(Helmsight::title)
    .subscription(Helmsight::subscription)
    .theme(Helmsight::theme)
    .run()
    .map_err(|e| anyhow::anyhow!("Application error: {}", e))?;

    Ok(())
}
