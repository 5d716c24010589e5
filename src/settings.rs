//! Tagging run configuration.
//!
//! Settings are stored as JSON with fixed property names so existing
//! settings files keep working; serde's camelCase renaming produces the
//! exact wire names (`intersectFiles`, `attributesForTags`, `tagAll`, ...).

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// One reference dataset to intersect input features against.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IntersectFile {
    /// Where the data came from - attribution only, free text
    pub source: String,
    /// Display name used in progress reporting
    pub name: String,
    /// Attribute names whose values become tags on intersection
    pub attributes_for_tags: Vec<String>,
    /// Tag applied on any intersection with this file's features,
    /// independent of attribute matches
    pub tag_all: Option<String>,
    /// Path to the GeoJSON feature collection
    pub file_name: String,
}

impl IntersectFile {
    /// Resolve the backing file against a base directory. Absolute paths
    /// and an empty base pass through unchanged.
    pub fn resolved_path(&self, base_directory: &str) -> PathBuf {
        let path = PathBuf::from(&self.file_name);
        if path.is_absolute() || base_directory.trim().is_empty() {
            path
        } else {
            Path::new(base_directory).join(path)
        }
    }
}

/// Full configuration for a tagging run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IntersectSettings {
    /// Reference datasets for the file-based pass
    pub intersect_files: Vec<IntersectFile>,
    /// Base directory for relative `fileName` entries
    pub intersect_files_directory: String,
    /// Directory holding the region-partitioned PAD-US files
    pub pad_us_directory: String,
    /// Attribute names harvested as tags from PAD-US records
    pub pad_us_attributes_for_tags: Vec<String>,
}

impl IntersectSettings {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file {}", path.display()))?;
        let settings: IntersectSettings =
            serde_json::from_str(&content).context("Failed to parse settings file")?;
        Ok(settings)
    }

    /// True when the PAD-US pass is configured - both the directory and
    /// the attribute list must be present.
    pub fn has_pad_us(&self) -> bool {
        !self.pad_us_directory.trim().is_empty() && !self.pad_us_attributes_for_tags.is_empty()
    }
}
