//! Helmsight Common Library
//!
//! This crate provides the shared device contract and utilities for
//! Helmsight:
//!
//! - [`telemetry`] - Live data model (`Reading`, `WindReading`, `Masthead`)
//! - [`wire`] - Live-socket frames and outbound commands
//! - [`history`] - History query client and segmentation
//! - [`backoff`] - Reconnect delay policy
//! - [`config`] - Configuration loading (JSON5 format)
//! - [`error`] - Error types

pub mod backoff;
pub mod config;
pub mod error;
pub mod history;
pub mod telemetry;
pub mod wire;

// Re-export commonly used types at the crate root
pub use backoff::{Backoff, RECONNECT_CAP, RECONNECT_FLOOR};
pub use config::{
    AppConfig, DeviceConfig, LogFormat, LoggingConfig, default_config_path, load_config,
    parse_config,
};
pub use error::{Error, Result};
pub use history::{
    AXIS_TICKS, HistoryEntry, HistoryItem, HistoryRange, HistoryResponse, SampleSlot, Segment,
    axis_ticks, fetch_history, refresh_delay, split_segments, time_bounds, value_bounds,
};
pub use telemetry::{Masthead, Reading, ReadingSnapshot, SensorPosition, WindReading, WindSnapshot};
pub use wire::{Command, Inbound, RELOAD_SENTINEL, WindEnvelope, WindFrame, decode_frame};

/// Initialize tracing with the given configuration.
///
/// Supports two output formats:
/// - `LogFormat::Text` (default): Human-readable text format
/// - `LogFormat::Json`: Structured JSON format for log aggregation systems
pub fn init_tracing(config: &LoggingConfig) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    match config.format {
        LogFormat::Text => {
            tracing_subscriber::registry()
                .with(fmt::layer())
                .with(filter)
                .try_init()
                .map_err(|e| Error::Config(format!("Failed to initialize tracing: {}", e)))?;
        }
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(fmt::layer().json())
                .with(filter)
                .try_init()
                .map_err(|e| Error::Config(format!("Failed to initialize tracing: {}", e)))?;
        }
    }

    Ok(())
}
