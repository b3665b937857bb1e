use chrono::{DateTime, SecondsFormat, Utc};
use clap::ValueEnum;

// =============================================================================
// Dimension Rows
// =============================================================================

/// A row of the `songs` table. Absent source fields stay `None` so the
/// store's constraints decide whether the row is acceptable.
#[derive(Debug, Clone, PartialEq)]
pub struct SongRow {
    pub song_id: Option<String>,
    pub title: Option<String>,
    pub artist_id: Option<String>,
    /// 0 when the release year is unknown.
    pub year: i32,
    pub duration: Option<f64>,
}

/// A row of the `artists` table.
#[derive(Debug, Clone, PartialEq)]
pub struct ArtistRow {
    pub artist_id: Option<String>,
    pub name: Option<String>,
    pub location: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// A row of the `time` table, fully derived from the event timestamp (UTC).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeRow {
    pub start_time: DateTime<Utc>,
    pub hour: u32,
    pub day: u32,
    pub week_of_year: u32,
    pub month: u32,
    pub year: i32,
    /// ISO weekday, Monday = 1 through Sunday = 7.
    pub weekday: u32,
}

/// Subscription level of a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Free,
    Paid,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Free => "free",
            Level::Paid => "paid",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "free" => Some(Level::Free),
            "paid" => Some(Level::Paid),
            _ => None,
        }
    }
}

/// A row of the `users` table.
#[derive(Debug, Clone, PartialEq)]
pub struct UserRow {
    pub user_id: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub gender: Option<String>,
    pub level: Option<Level>,
}

// =============================================================================
// Fact Rows
// =============================================================================

/// Song and artist ids resolved for a play event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SongMatch {
    pub song_id: String,
    pub artist_id: String,
}

/// A row of the `songplays` table. Only built once the song and artist
/// have been resolved, so neither reference is optional here.
#[derive(Debug, Clone, PartialEq)]
pub struct SongplayRow {
    pub start_time: DateTime<Utc>,
    pub user_id: Option<String>,
    pub level: Option<Level>,
    pub song_id: String,
    pub artist_id: String,
    pub session_id: Option<i64>,
    pub location: Option<String>,
    pub user_agent: Option<String>,
}

/// How songplay inserts treat an event that was already loaded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum SongplayPolicy {
    /// Every processed event is inserted as a new fact row.
    #[default]
    Append,
    /// An event already stored with the same start time, user and session is not inserted again.
    SkipExisting,
}

impl SongplayPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            SongplayPolicy::Append => "append",
            SongplayPolicy::SkipExisting => "skip-existing",
        }
    }
}

/// Number of rows per table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TableCounts {
    pub songs: usize,
    pub artists: usize,
    pub time: usize,
    pub users: usize,
    pub songplays: usize,
}

/// Storage form of a timestamp: RFC 3339, UTC, millisecond precision.
pub fn format_timestamp(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}
