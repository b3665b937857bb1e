//! Shared constants for the pipeline tests
//!
//! Catalog and event values used by the fixture trees. When fixture data
//! changes, update only this file.

// ============================================================================
// Song Catalog
// ============================================================================

pub const SONG_1_ID: &str = "SOUPIRU12A6D4FA1E1";
pub const SONG_1_TITLE: &str = "Der Kleine Dompfaff";
pub const SONG_1_DURATION: f64 = 152.92036;

pub const SONG_2_ID: &str = "SOZCTXZ12AB0182364";
pub const SONG_2_TITLE: &str = "Setanta matins";
pub const SONG_2_DURATION: f64 = 269.58322;

pub const ARTIST_1_ID: &str = "ARJIE2Y1187B994AB7";
pub const ARTIST_1_NAME: &str = "Line Renaud";

pub const ARTIST_2_ID: &str = "AR5KOSW1187FB35FF4";
pub const ARTIST_2_NAME: &str = "Elena";

// ============================================================================
// Event Logs
// ============================================================================

/// 2018-11-02T01:25:34.796Z
pub const TS_1: i64 = 1541121934796;

/// 2018-11-02T01:30:41.796Z
pub const TS_2: i64 = 1541122241796;

/// 2018-11-03T09:13:20.796Z
pub const TS_3: i64 = 1541236400796;

pub const USER_1_ID: &str = "10";
pub const USER_2_ID: &str = "26";

pub const SESSION_1_ID: i64 = 484;
