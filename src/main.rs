use anyhow::{Context, Result};
use clap::Parser;
use sparkify_etl::config::{
    DEFAULT_DB_PATH, DEFAULT_FILE_EXTENSION, DEFAULT_LOG_DATA_DIR, DEFAULT_SONG_DATA_DIR,
};
use sparkify_etl::{
    init_tracing, AppConfig, CliConfig, EtlPipeline, FileConfig, Phase, SongplayPolicy,
    SqliteWarehouse, VERSION,
};
use std::path::PathBuf;
use tracing::info;

fn parse_path(s: &str) -> Result<PathBuf> {
    let path_buf = PathBuf::from(s);
    if path_buf.is_absolute() {
        return Ok(path_buf);
    }
    let cwd = std::env::current_dir().context("Failed to read the working directory")?;
    Ok(cwd.join(path_buf))
}

#[derive(Parser, Debug)]
#[command(name = "etl", version = VERSION)]
#[command(about = "Load the Sparkify song catalog and event logs into the warehouse")]
struct CliArgs {
    /// Path to a TOML config file. Values in the file override the flags.
    #[clap(long, value_parser = parse_path)]
    pub config: Option<PathBuf>,

    /// Path to the SQLite warehouse database, created by create-tables.
    #[clap(long, env = "SPARKIFY_DB", default_value = DEFAULT_DB_PATH, value_parser = parse_path)]
    pub db_path: PathBuf,

    /// Root of the song catalog files.
    #[clap(long, default_value = DEFAULT_SONG_DATA_DIR)]
    pub song_data_dir: PathBuf,

    /// Root of the event log files.
    #[clap(long, default_value = DEFAULT_LOG_DATA_DIR)]
    pub log_data_dir: PathBuf,

    /// Extension of the data files.
    #[clap(long, default_value = DEFAULT_FILE_EXTENSION)]
    pub file_extension: String,

    /// Which load phases to run.
    #[clap(long, value_enum, default_value_t = Phase::All)]
    pub phase: Phase,

    /// What to do with play events that are already in the warehouse.
    #[clap(long, value_enum, default_value_t = SongplayPolicy::Append)]
    pub songplay_policy: SongplayPolicy,

    /// Skip files that fail to load instead of stopping.
    #[clap(long)]
    pub continue_on_error: bool,

    /// Load event logs even when the song catalog is empty.
    #[clap(long)]
    pub allow_empty_catalog: bool,
}

impl CliArgs {
    fn to_cli_config(&self) -> CliConfig {
        CliConfig {
            db_path: self.db_path.clone(),
            song_data_dir: self.song_data_dir.clone(),
            log_data_dir: self.log_data_dir.clone(),
            file_extension: self.file_extension.clone(),
            songplay_policy: self.songplay_policy,
            continue_on_error: self.continue_on_error,
            require_song_catalog: !self.allow_empty_catalog,
        }
    }
}

fn main() -> Result<()> {
    let cli_args = CliArgs::parse();
    init_tracing()?;

    info!("Sparkify ETL {}", VERSION);

    let file_config = match &cli_args.config {
        Some(path) => {
            info!("Loading config from {:?}", path);
            Some(FileConfig::load(path)?)
        }
        None => None,
    };
    let config = AppConfig::resolve(&cli_args.to_cli_config(), file_config)?;
    config.validate_for(cli_args.phase)?;

    info!("Opening warehouse database at {:?}...", config.db_path);
    let mut store = SqliteWarehouse::open(&config.db_path)?;

    let mut pipeline = EtlPipeline::new(&mut store, config.etl_options());
    info!(
        "Songplay policy: {}, continue on error: {}",
        config.songplay_policy.as_str(),
        config.continue_on_error
    );

    let ready = if cli_args.phase.loads_songs() {
        let (_, ready) = pipeline.load_song_data(&config.song_data_dir)?;
        Some(ready)
    } else {
        None
    };

    if cli_args.phase.loads_logs() {
        let ready = match ready {
            Some(ready) => ready,
            None => pipeline.song_catalog_ready()?,
        };
        pipeline.load_log_data(&config.log_data_dir, &ready)?;
    }

    let counts = store.counts()?;
    info!("Warehouse contains:");
    info!("  {} songs", counts.songs);
    info!("  {} artists", counts.artists);
    info!("  {} time rows", counts.time);
    info!("  {} users", counts.users);
    info!("  {} songplays", counts.songplays);

    Ok(())
}
