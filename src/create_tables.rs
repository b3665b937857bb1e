//! Drops the Sparkify warehouse tables if present and creates them anew.

use anyhow::Result;
use clap::Parser;
use sparkify_etl::config::DEFAULT_DB_PATH;
use sparkify_etl::{init_tracing, AppConfig, CliConfig, FileConfig, SqliteWarehouse, VERSION};
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "create-tables", version = VERSION)]
#[command(about = "Drop and recreate the Sparkify warehouse tables")]
struct CliArgs {
    /// Path to a TOML config file. Its db_path overrides the flag.
    #[clap(long)]
    pub config: Option<PathBuf>,

    /// Path to the SQLite warehouse database. Created if missing.
    #[clap(long, env = "SPARKIFY_DB", default_value = DEFAULT_DB_PATH)]
    pub db_path: PathBuf,
}

fn main() -> Result<()> {
    let cli_args = CliArgs::parse();
    init_tracing()?;

    let file_config = cli_args.config.as_deref().map(FileConfig::load).transpose()?;
    let cli = CliConfig {
        db_path: cli_args.db_path.clone(),
        ..Default::default()
    };
    let config = AppConfig::resolve(&cli, file_config)?;

    if config.db_path.exists() {
        warn!(
            "Dropping existing warehouse tables in {:?}",
            config.db_path
        );
    }
    SqliteWarehouse::provision(&config.db_path)?;
    info!("Warehouse ready: songs, artists, time, users, songplays");

    Ok(())
}
