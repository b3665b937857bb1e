//! Common test infrastructure
//!
//! Tests should only import from this module, not from internal submodules.
//!
//! # Example
//!
//! ```no_run
//! mod common;
//! use common::{play_song_1, TestWarehouse, TS_1, USER_1_ID};
//! use sparkify_etl::EtlOptions;
//!
//! #[test]
//! fn test_play_is_loaded() {
//!     let warehouse = TestWarehouse::with_catalog().unwrap();
//!     warehouse
//!         .write_log_file("events.json", &[&play_song_1(TS_1, USER_1_ID, "free")])
//!         .unwrap();
//!
//!     let (_, logs) = warehouse.run_all(EtlOptions::default()).unwrap();
//!     assert_eq!(logs.rows.songplays, 1);
//! }
//! ```

mod constants;
mod fixtures;

// Public API - this is what tests import
pub use constants::*;
#[allow(unused_imports)]
pub use fixtures::{
    page_json, play_json, play_song_1, play_song_2, song_json, TestWarehouse,
};
