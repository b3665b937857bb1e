use crate::records::SongRecord;
use crate::warehouse::{ArtistRow, SongRow};
use tracing::warn;

/// Projects one catalog record into its song and artist rows.
///
/// Absent values are carried through as `None`; the store decides whether
/// the rows are acceptable. An absent year becomes 0.
pub fn extract_song_rows(record: &SongRecord) -> (SongRow, ArtistRow) {
    let missing = record.missing_fields();
    if !missing.is_empty() {
        warn!(
            "Song record {:?} is missing {}",
            record.song_id.as_deref().unwrap_or("<no id>"),
            missing.join(", ")
        );
    }

    let song = SongRow {
        song_id: record.song_id.clone(),
        title: record.title.clone(),
        artist_id: record.artist_id.clone(),
        year: record.year.unwrap_or(0),
        duration: record.duration,
    };
    let artist = ArtistRow {
        artist_id: record.artist_id.clone(),
        name: record.artist_name.clone(),
        location: record.artist_location.clone(),
        latitude: record.artist_latitude,
        longitude: record.artist_longitude,
    };
    (song, artist)
}
