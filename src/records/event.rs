use super::lenient::{opt_integer, opt_string_or_number};
use serde::Deserialize;
use serde_json::Value;

/// Page value of the events that represent a song being played.
pub const NEXT_SONG_PAGE: &str = "NextSong";

/// One user activity event from the event logs.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRecord {
    /// Milliseconds since the Unix epoch.
    #[serde(default, deserialize_with = "opt_integer")]
    pub ts: Option<i64>,
    pub page: Option<String>,
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub user_id: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub gender: Option<String>,
    pub level: Option<String>,
    pub song: Option<String>,
    pub artist: Option<String>,
    pub length: Option<f64>,
    #[serde(default, deserialize_with = "opt_integer")]
    pub session_id: Option<i64>,
    pub location: Option<String>,
    pub user_agent: Option<String>,
    // Not loaded into any table, kept as raw JSON of whatever type.
    pub auth: Option<Value>,
    pub item_in_session: Option<Value>,
    pub method: Option<Value>,
    pub status: Option<Value>,
    pub registration: Option<Value>,
}

impl EventRecord {
    pub fn is_next_song(&self) -> bool {
        self.page.as_deref() == Some(NEXT_SONG_PAGE)
    }

    /// Names of the fields the time, users and songplays tables cannot store without.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.ts.is_none() {
            missing.push("ts");
        }
        if self.user_id.is_none() {
            missing.push("userId");
        }
        if self.level.is_none() {
            missing.push("level");
        }
        if self.session_id.is_none() {
            missing.push("sessionId");
        }
        missing
    }
}
