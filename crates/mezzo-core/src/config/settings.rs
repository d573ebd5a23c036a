use crate::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[derive(Default)]
pub struct Config {
    #[serde(default)]
    pub search: SearchConfig,
}

impl Config {
    /// Load config from file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or contains invalid JSON.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        super::validation::warn_unknown_fields(&content, "config.json");
        let config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save config to file.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails or the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

/// Search behavior settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchConfig {
    /// Collapse identical results from different providers into one row
    #[serde(default = "default_combine")]
    pub combine_identical_results: bool,

    /// Provider ids in preference order; the earliest listed provider wins
    /// when identical results are combined
    #[serde(default = "default_provider_order")]
    pub provider_order: Vec<String>,

    /// Queries shorter than this (after trimming) do not start a search
    #[serde(default = "default_min_query_length")]
    pub min_query_length: usize,
}

fn default_combine() -> bool {
    true
}
fn default_provider_order() -> Vec<String> {
    vec!["library".to_string()]
}
fn default_min_query_length() -> usize {
    3
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            combine_identical_results: default_combine(),
            provider_order: default_provider_order(),
            min_query_length: default_min_query_length(),
        }
    }
}
