use crate::records::EventRecord;
use crate::warehouse::{Level, SongMatch, SongplayRow, TimeRow, UserRow};
use chrono::{DateTime, Datelike, Timelike, Utc};
use thiserror::Error;
use tracing::warn;

/// Errors that make the events of a log file unusable.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("NextSong event #{index} has no timestamp")]
    MissingTimestamp { index: usize },

    #[error("Timestamp {0} is outside the representable calendar range")]
    InvalidTimestamp(i64),
}

/// Breaks an epoch-milliseconds timestamp into its calendar units (UTC).
pub fn time_row(ts: i64) -> Result<TimeRow, ExtractError> {
    let start_time =
        DateTime::<Utc>::from_timestamp_millis(ts).ok_or(ExtractError::InvalidTimestamp(ts))?;
    Ok(TimeRow {
        start_time,
        hour: start_time.hour(),
        day: start_time.day(),
        week_of_year: start_time.iso_week().week(),
        month: start_time.month(),
        year: start_time.year(),
        weekday: start_time.weekday().number_from_monday(),
    })
}

/// A NextSong event waiting for its song and artist to be resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayCandidate {
    pub start_time: DateTime<Utc>,
    pub user_id: Option<String>,
    pub level: Option<Level>,
    pub session_id: Option<i64>,
    pub location: Option<String>,
    pub user_agent: Option<String>,
    pub song: Option<String>,
    pub artist: Option<String>,
    pub length: Option<f64>,
}

impl PlayCandidate {
    /// Title, artist name and duration to look the song up by, or `None`
    /// when any of them is absent.
    pub fn lookup_key(&self) -> Option<(&str, &str, f64)> {
        Some((self.song.as_deref()?, self.artist.as_deref()?, self.length?))
    }

    pub fn resolve(self, found: SongMatch) -> SongplayRow {
        SongplayRow {
            start_time: self.start_time,
            user_id: self.user_id,
            level: self.level,
            song_id: found.song_id,
            artist_id: found.artist_id,
            session_id: self.session_id,
            location: self.location,
            user_agent: self.user_agent,
        }
    }
}

/// Rows derived from the events of one log file, in event order.
#[derive(Debug, Default)]
pub struct LogRows {
    pub times: Vec<TimeRow>,
    pub users: Vec<UserRow>,
    pub plays: Vec<PlayCandidate>,
    /// Events that were not song plays.
    pub discarded: usize,
}

fn parse_level(record: &EventRecord) -> Option<Level> {
    let raw = record.level.as_deref()?;
    let level = Level::parse(raw);
    if level.is_none() {
        warn!(
            "Unknown level {:?} for user {:?}",
            raw,
            record.user_id.as_deref().unwrap_or_default()
        );
    }
    level
}

/// Keeps the NextSong events and derives one time row, one user row and one
/// play candidate from each. Duplicates are left for the loader to resolve.
pub fn extract_log_rows(records: &[EventRecord]) -> Result<LogRows, ExtractError> {
    let mut rows = LogRows::default();

    for (index, record) in records.iter().enumerate() {
        if !record.is_next_song() {
            rows.discarded += 1;
            continue;
        }

        let missing = record.missing_fields();
        if !missing.is_empty() {
            warn!("NextSong event #{} is missing {}", index, missing.join(", "));
        }

        let ts = record
            .ts
            .ok_or(ExtractError::MissingTimestamp { index })?;
        let time = time_row(ts)?;
        let level = parse_level(record);

        rows.users.push(UserRow {
            user_id: record.user_id.clone(),
            first_name: record.first_name.clone(),
            last_name: record.last_name.clone(),
            gender: record.gender.clone(),
            level,
        });
        rows.plays.push(PlayCandidate {
            start_time: time.start_time,
            user_id: record.user_id.clone(),
            level,
            session_id: record.session_id,
            location: record.location.clone(),
            user_agent: record.user_agent.clone(),
            song: record.song.clone(),
            artist: record.artist.clone(),
            length: record.length,
        });
        rows.times.push(time);
    }

    Ok(rows)
}
