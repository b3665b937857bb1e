//! Per-file handlers of the two pipeline phases.

use super::RowStats;
use crate::extract::{extract_log_rows, extract_song_rows};
use crate::records::{read_records, EventRecord, SongRecord};
use crate::warehouse::{LoadError, Loader};
use anyhow::{Context, Result};
use std::path::Path;
use tracing::{debug, warn};

/// Loads the songs and artists of one catalog file.
pub(crate) fn process_song_file(loader: &Loader<'_>, path: &Path) -> Result<RowStats> {
    let records: Vec<SongRecord> = read_records(path)?;
    let mut stats = RowStats::default();

    for record in &records {
        let (song, artist) = extract_song_rows(record);

        // songs.artist_id references artists
        if loader
            .insert_artist(&artist)
            .with_context(|| format!("Failed to insert artist {:?}", artist.artist_id))?
        {
            stats.artists += 1;
        }
        if loader
            .insert_song(&song)
            .with_context(|| format!("Failed to insert song {:?}", song.song_id))?
        {
            stats.songs += 1;
        }
    }

    Ok(stats)
}

/// Loads the time, user and songplay rows of one event log file.
///
/// Songplays whose song cannot be found in the catalog are skipped. A
/// songplay rejected by a table constraint is logged and counted without
/// failing the file.
pub(crate) fn process_log_file(loader: &Loader<'_>, path: &Path) -> Result<RowStats> {
    let records: Vec<EventRecord> = read_records(path)?;
    let rows = extract_log_rows(&records)?;
    let mut stats = RowStats {
        events_discarded: rows.discarded,
        ..Default::default()
    };

    for time in &rows.times {
        if loader
            .insert_time(time)
            .context("Failed to insert time row")?
        {
            stats.times += 1;
        }
    }

    for user in &rows.users {
        if loader
            .upsert_user(user)
            .with_context(|| format!("Failed to upsert user {:?}", user.user_id))?
        {
            stats.users += 1;
        }
    }

    for play in rows.plays {
        let found = match play.lookup_key() {
            Some((title, artist, length)) => loader.find_song(title, artist, length)?,
            None => None,
        };
        let Some(found) = found else {
            debug!(
                "No catalog song for {:?} by {:?} ({:?}s)",
                play.song, play.artist, play.length
            );
            stats.lookup_misses += 1;
            continue;
        };

        match loader.insert_songplay(&play.resolve(found)) {
            Ok(true) => stats.songplays += 1,
            Ok(false) => stats.songplays_existing += 1,
            Err(LoadError::Constraint(e)) => {
                warn!("Error inserting songplay from {}: {}", path.display(), e);
                stats.songplay_errors += 1;
            }
            Err(e) => return Err(e).context("Failed to insert songplay"),
        }
    }

    Ok(stats)
}
