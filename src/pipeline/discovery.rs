use super::EtlError;
use anyhow::{Context, Result};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::warn;
use walkdir::WalkDir;

/// Recursively lists the files under `root` whose extension is `extension`.
///
/// Paths are absolute and ordered depth-first by file name, so repeated runs
/// over the same tree visit files in the same order. Unreadable entries are
/// logged and skipped.
pub fn discover_files(root: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    if !root.is_dir() {
        return Err(EtlError::MissingDataDirectory(root.to_path_buf()).into());
    }
    let root = root
        .canonicalize()
        .with_context(|| format!("Failed to resolve data directory {}", root.display()))?;
    let extension = extension.trim_start_matches('.');

    let mut files = Vec::new();
    for entry in WalkDir::new(&root)
        .follow_links(false)
        .sort_by_file_name()
    {
        match entry {
            Ok(entry) => {
                if entry.file_type().is_file()
                    && entry.path().extension().and_then(OsStr::to_str) == Some(extension)
                {
                    files.push(entry.into_path());
                }
            }
            Err(e) => {
                warn!("Error accessing entry under {}: {}", root.display(), e);
            }
        }
    }
    Ok(files)
}
