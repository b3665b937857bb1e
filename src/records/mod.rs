//! Newline-delimited JSON input records.
//!
//! Every input file holds one JSON object per line. Song catalog files
//! deserialize into [`SongRecord`], event log files into [`EventRecord`].
//! All fields are optional: a JSON `null` and a missing key both become
//! `None`, which is distinct from `0` or `""`.

mod event;
mod lenient;
mod reader;
mod song;

pub use event::{EventRecord, NEXT_SONG_PAGE};
pub use reader::{read_records, ParseError};
pub use song::SongRecord;
