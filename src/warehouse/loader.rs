use super::models::{
    format_timestamp, ArtistRow, SongMatch, SongRow, SongplayPolicy, SongplayRow, TimeRow, UserRow,
};
use rusqlite::{params, Connection, ErrorCode, OptionalExtension};
use thiserror::Error;

/// Errors raised while applying rows to the warehouse.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The row violates a table constraint (NOT NULL, key, foreign key).
    #[error("Constraint violation")]
    Constraint(#[source] rusqlite::Error),

    #[error("Store error")]
    Store(#[source] rusqlite::Error),
}

impl From<rusqlite::Error> for LoadError {
    fn from(err: rusqlite::Error) -> Self {
        match err.sqlite_error_code() {
            Some(ErrorCode::ConstraintViolation) => LoadError::Constraint(err),
            _ => LoadError::Store(err),
        }
    }
}

/// Per-table insert semantics on top of the connection (or transaction) of
/// the file being processed. Every write reports whether a row was stored.
pub struct Loader<'c> {
    conn: &'c Connection,
    songplay_policy: SongplayPolicy,
}

impl<'c> Loader<'c> {
    pub fn new(conn: &'c Connection, songplay_policy: SongplayPolicy) -> Self {
        Loader {
            conn,
            songplay_policy,
        }
    }

    /// Insert-if-absent by `song_id`.
    pub fn insert_song(&self, song: &SongRow) -> Result<bool, LoadError> {
        let changed = self
            .conn
            .prepare_cached(
                "INSERT INTO songs (song_id, title, artist_id, year, duration)
                 VALUES (?1, ?2, ?3, ?4, ?5)
                 ON CONFLICT(song_id) DO NOTHING",
            )?
            .execute(params![
                song.song_id,
                song.title,
                song.artist_id,
                song.year,
                song.duration
            ])?;
        Ok(changed > 0)
    }

    /// Insert-if-absent by `artist_id`.
    pub fn insert_artist(&self, artist: &ArtistRow) -> Result<bool, LoadError> {
        let changed = self
            .conn
            .prepare_cached(
                "INSERT INTO artists (artist_id, name, location, latitude, longitude)
                 VALUES (?1, ?2, ?3, ?4, ?5)
                 ON CONFLICT(artist_id) DO NOTHING",
            )?
            .execute(params![
                artist.artist_id,
                artist.name,
                artist.location,
                artist.latitude,
                artist.longitude
            ])?;
        Ok(changed > 0)
    }

    /// Insert-if-absent by `start_time`.
    pub fn insert_time(&self, time: &TimeRow) -> Result<bool, LoadError> {
        let changed = self
            .conn
            .prepare_cached(
                "INSERT INTO time (start_time, hour, day, week, month, year, weekday)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                 ON CONFLICT(start_time) DO NOTHING",
            )?
            .execute(params![
                format_timestamp(&time.start_time),
                time.hour,
                time.day,
                time.week_of_year,
                time.month,
                time.year,
                time.weekday
            ])?;
        Ok(changed > 0)
    }

    /// Insert-or-overwrite by `user_id`: the last write wins.
    pub fn upsert_user(&self, user: &UserRow) -> Result<bool, LoadError> {
        let changed = self
            .conn
            .prepare_cached(
                "INSERT INTO users (user_id, first_name, last_name, gender, level)
                 VALUES (?1, ?2, ?3, ?4, ?5)
                 ON CONFLICT(user_id) DO UPDATE SET
                    first_name = excluded.first_name,
                    last_name = excluded.last_name,
                    gender = excluded.gender,
                    level = excluded.level",
            )?
            .execute(params![
                user.user_id,
                user.first_name,
                user.last_name,
                user.gender,
                user.level.map(|level| level.as_str())
            ])?;
        Ok(changed > 0)
    }

    /// Finds the catalog song with the given title, artist name and duration.
    pub fn find_song(
        &self,
        title: &str,
        artist_name: &str,
        duration: f64,
    ) -> Result<Option<SongMatch>, LoadError> {
        let found = self
            .conn
            .prepare_cached(
                "SELECT s.song_id, s.artist_id
                 FROM songs s
                 JOIN artists a ON s.artist_id = a.artist_id
                 WHERE s.title = ?1 AND a.name = ?2 AND s.duration = ?3
                 LIMIT 1",
            )?
            .query_row(params![title, artist_name, duration], |row| {
                Ok(SongMatch {
                    song_id: row.get(0)?,
                    artist_id: row.get(1)?,
                })
            })
            .optional()?;
        Ok(found)
    }

    /// Inserts a fact row. Under [`SongplayPolicy::SkipExisting`] an event
    /// already stored with the same start time, user and session is skipped
    /// and `false` is returned.
    pub fn insert_songplay(&self, play: &SongplayRow) -> Result<bool, LoadError> {
        let sql = match self.songplay_policy {
            SongplayPolicy::Append => {
                "INSERT INTO songplays
                    (start_time, user_id, level, song_id, artist_id, session_id, location, user_agent)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)"
            }
            SongplayPolicy::SkipExisting => {
                "INSERT INTO songplays
                    (start_time, user_id, level, song_id, artist_id, session_id, location, user_agent)
                 SELECT ?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8
                 WHERE NOT EXISTS (
                    SELECT 1 FROM songplays
                    WHERE start_time = ?1 AND user_id = ?2 AND session_id IS ?6
                 )"
            }
        };
        let changed = self.conn.prepare_cached(sql)?.execute(params![
            format_timestamp(&play.start_time),
            play.user_id,
            play.level.map(|level| level.as_str()),
            play.song_id,
            play.artist_id,
            play.session_id,
            play.location,
            play.user_agent
        ])?;
        Ok(changed > 0)
    }
}
