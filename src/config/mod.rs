mod file_config;

pub use file_config::FileConfig;

use crate::pipeline::EtlOptions;
use crate::warehouse::SongplayPolicy;
use anyhow::{bail, Result};
use clap::ValueEnum;
use std::path::{Path, PathBuf};

pub const DEFAULT_DB_PATH: &str = "sparkify.db";
pub const DEFAULT_SONG_DATA_DIR: &str = "data/song_data";
pub const DEFAULT_LOG_DATA_DIR: &str = "data/log_data";
pub const DEFAULT_FILE_EXTENSION: &str = "json";

/// Which load phases a run executes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Phase {
    /// Song catalog, then event logs.
    #[default]
    All,
    /// Song catalog only.
    Songs,
    /// Event logs only, against a catalog loaded earlier.
    Logs,
}

impl Phase {
    pub fn loads_songs(&self) -> bool {
        matches!(self, Phase::All | Phase::Songs)
    }

    pub fn loads_logs(&self) -> bool {
        matches!(self, Phase::All | Phase::Logs)
    }
}

/// CLI arguments that can be used for config resolution.
/// This struct mirrors the CLI arguments that can be overridden by TOML config.
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub db_path: PathBuf,
    pub song_data_dir: PathBuf,
    pub log_data_dir: PathBuf,
    pub file_extension: String,
    pub songplay_policy: SongplayPolicy,
    pub continue_on_error: bool,
    pub require_song_catalog: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        CliConfig {
            db_path: PathBuf::from(DEFAULT_DB_PATH),
            song_data_dir: PathBuf::from(DEFAULT_SONG_DATA_DIR),
            log_data_dir: PathBuf::from(DEFAULT_LOG_DATA_DIR),
            file_extension: DEFAULT_FILE_EXTENSION.to_string(),
            songplay_policy: SongplayPolicy::default(),
            continue_on_error: false,
            require_song_catalog: true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub db_path: PathBuf,
    pub song_data_dir: PathBuf,
    pub log_data_dir: PathBuf,
    pub file_extension: String,
    pub songplay_policy: SongplayPolicy,
    pub continue_on_error: bool,
    pub require_song_catalog: bool,
}

impl AppConfig {
    /// Resolve configuration from CLI arguments and optional TOML file config.
    /// TOML values override CLI values where present.
    pub fn resolve(cli: &CliConfig, file_config: Option<FileConfig>) -> Result<Self> {
        let file = file_config.unwrap_or_default();

        let db_path = file
            .db_path
            .map(PathBuf::from)
            .unwrap_or_else(|| cli.db_path.clone());
        let song_data_dir = file
            .song_data_dir
            .map(PathBuf::from)
            .unwrap_or_else(|| cli.song_data_dir.clone());
        let log_data_dir = file
            .log_data_dir
            .map(PathBuf::from)
            .unwrap_or_else(|| cli.log_data_dir.clone());

        let file_extension = file
            .file_extension
            .unwrap_or_else(|| cli.file_extension.clone())
            .trim_start_matches('.')
            .to_string();
        if file_extension.is_empty() {
            bail!("file_extension must not be empty");
        }

        let songplay_policy = match file.songplay_policy {
            Some(s) => parse_songplay_policy(&s)?,
            None => cli.songplay_policy,
        };

        let continue_on_error = file.continue_on_error.unwrap_or(cli.continue_on_error);
        let require_song_catalog = file
            .require_song_catalog
            .unwrap_or(cli.require_song_catalog);

        Ok(AppConfig {
            db_path,
            song_data_dir,
            log_data_dir,
            file_extension,
            songplay_policy,
            continue_on_error,
            require_song_catalog,
        })
    }

    /// Checks that the data directories read by `phase` exist.
    pub fn validate_for(&self, phase: Phase) -> Result<()> {
        if phase.loads_songs() {
            check_data_dir("song_data_dir", &self.song_data_dir)?;
        }
        if phase.loads_logs() {
            check_data_dir("log_data_dir", &self.log_data_dir)?;
        }
        Ok(())
    }

    pub fn etl_options(&self) -> EtlOptions {
        EtlOptions {
            file_extension: self.file_extension.clone(),
            songplay_policy: self.songplay_policy,
            continue_on_error: self.continue_on_error,
            require_song_catalog: self.require_song_catalog,
        }
    }
}

fn check_data_dir(name: &str, path: &Path) -> Result<()> {
    if !path.exists() {
        bail!("{} does not exist: {:?}", name, path);
    }
    if !path.is_dir() {
        bail!("{} is not a directory: {:?}", name, path);
    }
    Ok(())
}

fn parse_songplay_policy(s: &str) -> Result<SongplayPolicy> {
    match SongplayPolicy::from_str(s, true) {
        Ok(policy) => Ok(policy),
        Err(_) => bail!(
            "Invalid songplay_policy {:?}, expected \"append\" or \"skip-existing\"",
            s
        ),
    }
}
