//! Fixture data trees and a provisioned warehouse in a temporary directory.

use super::constants::*;
use anyhow::Result;
use rusqlite::Connection;
use sparkify_etl::{EtlOptions, EtlPipeline, PhaseReport, SqliteWarehouse};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// One catalog line in the layout of the song data files.
pub fn song_json(song_id: &str, title: &str, artist_id: &str, artist_name: &str, duration: f64) -> String {
    serde_json::json!({
        "num_songs": 1,
        "artist_id": artist_id,
        "artist_latitude": null,
        "artist_longitude": null,
        "artist_location": "",
        "artist_name": artist_name,
        "song_id": song_id,
        "title": title,
        "duration": duration,
        "year": 0
    })
    .to_string()
}

/// A NextSong event for `song` by `artist`.
pub fn play_json(ts: i64, user_id: &str, level: &str, song: &str, artist: &str, length: f64) -> String {
    serde_json::json!({
        "artist": artist,
        "auth": "Logged In",
        "firstName": "Sylvie",
        "gender": "F",
        "itemInSession": 0,
        "lastName": "Cruz",
        "length": length,
        "level": level,
        "location": "Washington-Arlington-Alexandria, DC-VA-MD-WV",
        "method": "PUT",
        "page": "NextSong",
        "registration": 1540266185796.0,
        "sessionId": SESSION_1_ID,
        "song": song,
        "status": 200,
        "ts": ts,
        "userAgent": "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_9_4)",
        "userId": user_id
    })
    .to_string()
}

/// A non-play event (page other than NextSong).
pub fn page_json(ts: i64, user_id: &str, page: &str) -> String {
    serde_json::json!({
        "artist": null,
        "auth": "Logged In",
        "firstName": "Sylvie",
        "gender": "F",
        "itemInSession": 1,
        "lastName": "Cruz",
        "length": null,
        "level": "free",
        "method": "GET",
        "page": page,
        "sessionId": SESSION_1_ID,
        "song": null,
        "status": 200,
        "ts": ts,
        "userId": user_id
    })
    .to_string()
}

pub fn play_song_1(ts: i64, user_id: &str, level: &str) -> String {
    play_json(ts, user_id, level, SONG_1_TITLE, ARTIST_1_NAME, SONG_1_DURATION)
}

pub fn play_song_2(ts: i64, user_id: &str, level: &str) -> String {
    play_json(ts, user_id, level, SONG_2_TITLE, ARTIST_2_NAME, SONG_2_DURATION)
}

/// A provisioned warehouse plus song and log data roots, all inside one
/// temporary directory.
pub struct TestWarehouse {
    _dir: TempDir,
    pub db_path: PathBuf,
    pub song_data_dir: PathBuf,
    pub log_data_dir: PathBuf,
}

impl TestWarehouse {
    /// Empty data trees and freshly created tables.
    pub fn empty() -> Result<Self> {
        let dir = TempDir::new()?;
        let db_path = dir.path().join("sparkify.db");
        let song_data_dir = dir.path().join("song_data");
        let log_data_dir = dir.path().join("log_data");
        fs::create_dir_all(&song_data_dir)?;
        fs::create_dir_all(&log_data_dir)?;

        SqliteWarehouse::provision(&db_path)?;

        Ok(TestWarehouse {
            _dir: dir,
            db_path,
            song_data_dir,
            log_data_dir,
        })
    }

    /// The two catalog songs, each in its own file.
    pub fn with_catalog() -> Result<Self> {
        let warehouse = Self::empty()?;
        warehouse.write_song_file(
            "A/R/J/TRAAABD128F429CF47.json",
            &[&song_json(
                SONG_1_ID,
                SONG_1_TITLE,
                ARTIST_1_ID,
                ARTIST_1_NAME,
                SONG_1_DURATION,
            )],
        )?;
        warehouse.write_song_file(
            "A/R/5/TRAAAEF128F4273421.json",
            &[&song_json(
                SONG_2_ID,
                SONG_2_TITLE,
                ARTIST_2_ID,
                ARTIST_2_NAME,
                SONG_2_DURATION,
            )],
        )?;
        Ok(warehouse)
    }

    pub fn write_song_file(&self, relative: &str, lines: &[&str]) -> Result<()> {
        write_lines(&self.song_data_dir.join(relative), lines)
    }

    pub fn write_log_file(&self, relative: &str, lines: &[&str]) -> Result<()> {
        write_lines(&self.log_data_dir.join(relative), lines)
    }

    pub fn open(&self) -> Result<SqliteWarehouse> {
        SqliteWarehouse::open(&self.db_path)
    }

    /// Runs the song phase then the log phase with `options`.
    pub fn run_all(&self, options: EtlOptions) -> Result<(PhaseReport, PhaseReport)> {
        let mut store = self.open()?;
        let mut pipeline = EtlPipeline::new(&mut store, options);
        let (songs, ready) = pipeline.load_song_data(&self.song_data_dir)?;
        let logs = pipeline.load_log_data(&self.log_data_dir, &ready)?;
        Ok((songs, logs))
    }

    /// A separate connection for inspecting the tables.
    pub fn inspect(&self) -> Result<Connection> {
        Ok(Connection::open(&self.db_path)?)
    }
}

fn write_lines(path: &Path, lines: &[&str]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, lines.join("\n") + "\n")?;
    Ok(())
}
