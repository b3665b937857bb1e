use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while reading a newline-delimited JSON file.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed JSON in {path} at line {line}: {source}")]
    Json {
        path: PathBuf,
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

/// Reads every non-blank line of `path` as an independent JSON object.
///
/// Fails on the first line that does not deserialize into `T`; the error
/// carries the 1-based line number.
pub fn read_records<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, ParseError> {
    let io_error = |source| ParseError::Io {
        path: path.to_path_buf(),
        source,
    };

    let reader = BufReader::new(File::open(path).map_err(io_error)?);
    let mut records = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line.map_err(io_error)?;
        if line.trim().is_empty() {
            continue;
        }
        let record = serde_json::from_str(&line).map_err(|source| ParseError::Json {
            path: path.to_path_buf(),
            line: index + 1,
            source,
        })?;
        records.push(record);
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{EventRecord, SongRecord};
    use std::fs;
    use tempfile::TempDir;

    fn write_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_reads_one_record_per_line_and_skips_blank_lines() {
        let dir = TempDir::new().unwrap();
        let path = write_file(
            &dir,
            "log.json",
            "{\"page\":\"NextSong\",\"ts\":1}\n\n   \n{\"page\":\"Home\",\"ts\":2}\n",
        );

        let records: Vec<EventRecord> = read_records(&path).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].page.as_deref(), Some("NextSong"));
        assert_eq!(records[1].ts, Some(2));
    }

    #[test]
    fn test_malformed_line_reports_line_number() {
        let dir = TempDir::new().unwrap();
        let path = write_file(
            &dir,
            "broken.json",
            "{\"song_id\":\"S1\"}\n{\"song_id\": \n",
        );

        let err = read_records::<SongRecord>(&path).unwrap_err();
        match &err {
            ParseError::Json { line, .. } => assert_eq!(*line, 2),
            other => panic!("unexpected error: {:?}", other),
        }
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn test_json_array_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "array.json", "[{\"song_id\":\"S1\"}]\n");

        assert!(matches!(
            read_records::<SongRecord>(&path),
            Err(ParseError::Json { line: 1, .. })
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let result = read_records::<SongRecord>(&dir.path().join("nope.json"));
        assert!(matches!(result, Err(ParseError::Io { .. })));
    }

    #[test]
    fn test_empty_file_yields_no_records() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "empty.json", "");
        assert!(read_records::<SongRecord>(&path).unwrap().is_empty());
    }
}
