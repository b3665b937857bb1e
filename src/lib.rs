//! Sparkify ETL Library
//!
//! Loads the song catalog and user activity logs (newline-delimited JSON)
//! into an SQLite star schema: a `songplays` fact table with `songs`,
//! `artists`, `time` and `users` dimensions.

pub mod config;
pub mod extract;
pub mod pipeline;
pub mod records;
pub mod sqlite_persistence;
pub mod warehouse;

use anyhow::{anyhow, Result};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

// Re-export commonly used types for convenience
pub use config::{AppConfig, CliConfig, FileConfig, Phase};
pub use pipeline::{EtlError, EtlOptions, EtlPipeline, PhaseReport, RowStats, SongCatalogReady};
pub use warehouse::{SongplayPolicy, SqliteWarehouse, TableCounts};

/// Version string reported by the binaries.
pub const VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), "-", env!("GIT_HASH"));

/// Installs the global subscriber. The filter defaults to INFO and is read
/// from `LOG_LEVEL`.
pub fn init_tracing() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()
        .map_err(|e| anyhow!("Failed to initialize logging: {}", e))
}
