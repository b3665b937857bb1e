//! SQLite schema of the Sparkify star schema.
//!
//! One fact table (`songplays`) referencing four dimension tables. Only the
//! keys are NOT NULL: absent attributes are stored as NULL. Text primary
//! keys need NOT NULL explicitly, SQLite would otherwise accept NULL keys on
//! non-integer primary keys.

use crate::sqlite_column;
use crate::sqlite_persistence::{
    Column, ForeignKey, ForeignKeyOnChange, SqlType, Table, VersionedSchema,
};

// =============================================================================
// Dimension Tables
// =============================================================================

/// Artists table - one row per catalog artist
const ARTISTS_TABLE: Table = Table {
    name: "artists",
    columns: &[
        sqlite_column!(
            "artist_id",
            &SqlType::Text,
            is_primary_key = true,
            non_null = true
        ),
        sqlite_column!("name", &SqlType::Text),
        sqlite_column!("location", &SqlType::Text),
        sqlite_column!("latitude", &SqlType::Real),
        sqlite_column!("longitude", &SqlType::Real),
    ],
    indices: &[],
};

const SONG_ARTIST_FK: ForeignKey = ForeignKey {
    foreign_table: "artists",
    foreign_column: "artist_id",
    on_delete: ForeignKeyOnChange::Restrict,
};

/// Songs table - one row per catalog song
const SONGS_TABLE: Table = Table {
    name: "songs",
    columns: &[
        sqlite_column!(
            "song_id",
            &SqlType::Text,
            is_primary_key = true,
            non_null = true
        ),
        sqlite_column!("title", &SqlType::Text),
        sqlite_column!(
            "artist_id",
            &SqlType::Text,
            foreign_key = Some(&SONG_ARTIST_FK)
        ),
        sqlite_column!("year", &SqlType::Integer), // 0 = unknown
        sqlite_column!("duration", &SqlType::Real), // seconds
    ],
    indices: &[("idx_songs_title", "title")],
};

/// Time table - timestamps of song plays broken down into calendar units
const TIME_TABLE: Table = Table {
    name: "time",
    columns: &[
        sqlite_column!(
            "start_time",
            &SqlType::Text,
            is_primary_key = true,
            non_null = true
        ), // RFC 3339, UTC, milliseconds
        sqlite_column!("hour", &SqlType::Integer, non_null = true),
        sqlite_column!("day", &SqlType::Integer, non_null = true),
        sqlite_column!("week", &SqlType::Integer, non_null = true), // ISO week
        sqlite_column!("month", &SqlType::Integer, non_null = true),
        sqlite_column!("year", &SqlType::Integer, non_null = true),
        sqlite_column!("weekday", &SqlType::Integer, non_null = true), // 1 = Monday
    ],
    indices: &[],
};

/// Users table - last known profile of each user
const USERS_TABLE: Table = Table {
    name: "users",
    columns: &[
        sqlite_column!(
            "user_id",
            &SqlType::Text,
            is_primary_key = true,
            non_null = true
        ),
        sqlite_column!("first_name", &SqlType::Text),
        sqlite_column!("last_name", &SqlType::Text),
        sqlite_column!("gender", &SqlType::Text),
        sqlite_column!("level", &SqlType::Text), // 'free', 'paid'
    ],
    indices: &[],
};

// =============================================================================
// Fact Table
// =============================================================================

const SONGPLAY_TIME_FK: ForeignKey = ForeignKey {
    foreign_table: "time",
    foreign_column: "start_time",
    on_delete: ForeignKeyOnChange::Restrict,
};

const SONGPLAY_USER_FK: ForeignKey = ForeignKey {
    foreign_table: "users",
    foreign_column: "user_id",
    on_delete: ForeignKeyOnChange::Restrict,
};

const SONGPLAY_SONG_FK: ForeignKey = ForeignKey {
    foreign_table: "songs",
    foreign_column: "song_id",
    on_delete: ForeignKeyOnChange::Restrict,
};

const SONGPLAY_ARTIST_FK: ForeignKey = ForeignKey {
    foreign_table: "artists",
    foreign_column: "artist_id",
    on_delete: ForeignKeyOnChange::Restrict,
};

/// Songplays table - one row per NextSong event matched against the catalog
const SONGPLAYS_TABLE: Table = Table {
    name: "songplays",
    columns: &[
        sqlite_column!("songplay_id", &SqlType::Integer, is_primary_key = true),
        sqlite_column!(
            "start_time",
            &SqlType::Text,
            non_null = true,
            foreign_key = Some(&SONGPLAY_TIME_FK)
        ),
        sqlite_column!(
            "user_id",
            &SqlType::Text,
            non_null = true,
            foreign_key = Some(&SONGPLAY_USER_FK)
        ),
        sqlite_column!("level", &SqlType::Text),
        sqlite_column!(
            "song_id",
            &SqlType::Text,
            foreign_key = Some(&SONGPLAY_SONG_FK)
        ),
        sqlite_column!(
            "artist_id",
            &SqlType::Text,
            foreign_key = Some(&SONGPLAY_ARTIST_FK)
        ),
        sqlite_column!("session_id", &SqlType::Integer),
        sqlite_column!("location", &SqlType::Text),
        sqlite_column!("user_agent", &SqlType::Text),
    ],
    indices: &[
        ("idx_songplays_start_time", "start_time"),
        ("idx_songplays_user", "user_id"),
    ],
};

// =============================================================================
// Versioned Schema Export
// =============================================================================

pub const WAREHOUSE_VERSIONED_SCHEMAS: &[VersionedSchema] = &[VersionedSchema {
    version: 0,
    tables: &[
        ARTISTS_TABLE,
        SONGS_TABLE,
        TIME_TABLE,
        USERS_TABLE,
        SONGPLAYS_TABLE,
    ],
}];
