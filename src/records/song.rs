use serde::Deserialize;

/// One entry of the song catalog.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SongRecord {
    pub song_id: Option<String>,
    pub title: Option<String>,
    pub artist_id: Option<String>,
    pub year: Option<i32>,
    pub duration: Option<f64>,
    pub num_songs: Option<i64>,
    pub artist_name: Option<String>,
    pub artist_location: Option<String>,
    pub artist_latitude: Option<f64>,
    pub artist_longitude: Option<f64>,
}

impl SongRecord {
    /// Names of the fields the songs and artists tables cannot store without.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.song_id.is_none() {
            missing.push("song_id");
        }
        if self.title.is_none() {
            missing.push("title");
        }
        if self.artist_id.is_none() {
            missing.push("artist_id");
        }
        if self.duration.is_none() {
            missing.push("duration");
        }
        if self.artist_name.is_none() {
            missing.push("artist_name");
        }
        missing
    }
}
