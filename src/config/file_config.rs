use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct FileConfig {
    // Store
    pub db_path: Option<String>,

    // Input trees
    pub song_data_dir: Option<String>,
    pub log_data_dir: Option<String>,
    pub file_extension: Option<String>,

    // Pipeline behaviour
    pub songplay_policy: Option<String>,
    pub continue_on_error: Option<bool>,
    pub require_song_catalog: Option<bool>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        toml::from_str(&content).with_context(|| format!("Failed to parse config file: {:?}", path))
    }
}
