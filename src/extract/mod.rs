//! Projection of parsed records into warehouse rows.

mod event;
mod song;

pub use event::{extract_log_rows, time_row, ExtractError, LogRows, PlayCandidate};
pub use song::extract_song_rows;
