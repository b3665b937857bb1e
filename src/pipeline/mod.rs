//! Orchestration of the two load phases: song catalog first, event logs
//! second.

mod discovery;
mod driver;
mod handlers;

pub use discovery::discover_files;

use crate::warehouse::{SongplayPolicy, SqliteWarehouse};
use anyhow::Result;
use std::ops::AddAssign;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum EtlError {
    #[error("Song catalog is empty ({songs} songs, {artists} artists), load the song data first")]
    EmptySongCatalog { songs: usize, artists: usize },

    #[error("Data directory {0:?} does not exist")]
    MissingDataDirectory(PathBuf),
}

#[derive(Debug, Clone)]
pub struct EtlOptions {
    /// Extension of the data files, without the leading dot.
    pub file_extension: String,
    pub songplay_policy: SongplayPolicy,
    /// Skip files that fail instead of aborting the run.
    pub continue_on_error: bool,
    /// Refuse to load event logs while the song catalog is empty.
    pub require_song_catalog: bool,
}

impl Default for EtlOptions {
    fn default() -> Self {
        EtlOptions {
            file_extension: "json".to_string(),
            songplay_policy: SongplayPolicy::default(),
            continue_on_error: false,
            require_song_catalog: true,
        }
    }
}

/// Rows written by a file or a phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RowStats {
    pub songs: usize,
    pub artists: usize,
    pub times: usize,
    pub users: usize,
    pub songplays: usize,
    /// Songplays not inserted because the event was already loaded.
    pub songplays_existing: usize,
    /// Play events whose song is not in the catalog.
    pub lookup_misses: usize,
    /// Songplays rejected by the store.
    pub songplay_errors: usize,
    /// Events that are not song plays.
    pub events_discarded: usize,
}

impl AddAssign for RowStats {
    fn add_assign(&mut self, other: Self) {
        self.songs += other.songs;
        self.artists += other.artists;
        self.times += other.times;
        self.users += other.users;
        self.songplays += other.songplays;
        self.songplays_existing += other.songplays_existing;
        self.lookup_misses += other.lookup_misses;
        self.songplay_errors += other.songplay_errors;
        self.events_discarded += other.events_discarded;
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PhaseReport {
    pub files_found: usize,
    pub files_loaded: usize,
    pub files_failed: usize,
    pub rows: RowStats,
}

/// Proof that the song catalog has been loaded, required by the event phase.
#[derive(Debug)]
pub struct SongCatalogReady {
    _private: (),
}

impl SongCatalogReady {
    /// Checks that a previous run left songs and artists in the store.
    pub fn verify(store: &SqliteWarehouse) -> Result<Self> {
        let counts = store.counts()?;
        if counts.songs == 0 || counts.artists == 0 {
            return Err(EtlError::EmptySongCatalog {
                songs: counts.songs,
                artists: counts.artists,
            }
            .into());
        }
        Ok(SongCatalogReady { _private: () })
    }
}

pub struct EtlPipeline<'s> {
    store: &'s mut SqliteWarehouse,
    options: EtlOptions,
}

impl<'s> EtlPipeline<'s> {
    pub fn new(store: &'s mut SqliteWarehouse, options: EtlOptions) -> Self {
        EtlPipeline { store, options }
    }

    /// Loads every song file under `root` into the songs and artists tables.
    /// The returned token goes through the same catalog check as
    /// [`EtlPipeline::song_catalog_ready`].
    pub fn load_song_data(&mut self, root: &Path) -> Result<(PhaseReport, SongCatalogReady)> {
        info!("Loading song data from {}", root.display());
        let report = driver::process_data(
            &mut *self.store,
            root,
            &self.options,
            handlers::process_song_file,
        )?;
        log_report("Song data", &report);
        let ready = self.song_catalog_ready()?;
        Ok((report, ready))
    }

    /// Token for running the event phase on its own, against a catalog
    /// loaded by an earlier run. The catalog must be non-empty unless
    /// `require_song_catalog` is off.
    pub fn song_catalog_ready(&self) -> Result<SongCatalogReady> {
        if self.options.require_song_catalog {
            SongCatalogReady::verify(&*self.store)
        } else {
            Ok(SongCatalogReady { _private: () })
        }
    }

    /// Loads every event log under `root` into the time, users and songplays
    /// tables.
    pub fn load_log_data(&mut self, root: &Path, _ready: &SongCatalogReady) -> Result<PhaseReport> {
        info!("Loading log data from {}", root.display());
        let report = driver::process_data(
            &mut *self.store,
            root,
            &self.options,
            handlers::process_log_file,
        )?;
        log_report("Log data", &report);
        Ok(report)
    }

    pub fn store(&self) -> &SqliteWarehouse {
        &*self.store
    }
}

fn log_report(phase: &str, report: &PhaseReport) {
    info!(
        "{}: {} files found, {} loaded, {} failed",
        phase, report.files_found, report.files_loaded, report.files_failed
    );
    let rows = &report.rows;
    info!(
        "{}: {} songs, {} artists, {} time rows, {} user writes, {} songplays",
        phase, rows.songs, rows.artists, rows.times, rows.users, rows.songplays
    );
    if rows.lookup_misses > 0 || rows.songplays_existing > 0 {
        info!(
            "{}: {} plays without catalog match, {} already loaded",
            phase, rows.lookup_misses, rows.songplays_existing
        );
    }
    if rows.songplay_errors > 0 {
        warn!("{}: {} songplays rejected", phase, rows.songplay_errors);
    }
}
