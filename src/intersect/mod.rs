//! Feature intersection tagging engine.
//!
//! Runs a file-based pass over the configured reference datasets and a
//! region-partitioned PAD-US pass, then merges the per-feature results.
//! Each pass returns one result per input feature, aligned with the
//! caller's input order, so features are tracked by the exact instance
//! supplied rather than by geometry or value equality.

mod files;
mod merge;
mod padus;

pub use files::tags_from_file_intersections;
pub use padus::tags_from_pad_us_intersections;

use std::path::Path;

use geojson::Feature;
use tracing::info;

use crate::cancel::{CancellationToken, TaggingError};
use crate::progress::ProgressReporter;
use crate::settings::IntersectSettings;

/// Accumulated tags and matched reference features for one input feature.
///
/// Tags are distinct under case-insensitive comparison with the first-seen
/// casing kept; `intersects_with` is an audit trail and is not deduplicated.
#[derive(Debug, Clone)]
pub struct IntersectResult {
    pub feature: Feature,
    pub tags: Vec<String>,
    pub intersects_with: Vec<Feature>,
}

impl IntersectResult {
    /// An accumulator with no tags for one input feature.
    pub fn new(feature: Feature) -> Self {
        Self {
            feature,
            tags: Vec::new(),
            intersects_with: Vec::new(),
        }
    }
}

/// One empty accumulator per input feature, in input order.
pub(crate) fn empty_results(to_check: &[Feature]) -> Vec<IntersectResult> {
    to_check.iter().cloned().map(IntersectResult::new).collect()
}

/// Tag the supplied features against everything the settings configure.
///
/// Returns one result per input feature when at least one pass runs, an
/// empty list when nothing is configured or no features were supplied.
/// Cancellation is the only error; all other failures degrade to progress
/// notes and skipped files.
pub fn tags(
    settings: &IntersectSettings,
    to_check: &[Feature],
    token: &CancellationToken,
    progress: &ProgressReporter,
) -> Result<Vec<IntersectResult>, TaggingError> {
    if to_check.is_empty() {
        progress.report("No features to check - returning an empty result list");
        return Ok(Vec::new());
    }

    let mut passes: Vec<Vec<IntersectResult>> = Vec::new();

    if !settings.intersect_files.is_empty() {
        token.checkpoint()?;
        progress.report(&format!(
            "Checking {} features against {} intersect files",
            to_check.len(),
            settings.intersect_files.len()
        ));
        passes.push(tags_from_file_intersections(
            to_check,
            &settings.intersect_files,
            &settings.intersect_files_directory,
            token,
            progress,
        )?);
    }

    if settings.has_pad_us() {
        token.checkpoint()?;
        progress.report(&format!(
            "Checking {} features against PAD-US data in {}",
            to_check.len(),
            settings.pad_us_directory
        ));
        passes.push(tags_from_pad_us_intersections(
            to_check,
            &settings.pad_us_attributes_for_tags,
            Path::new(&settings.pad_us_directory),
            token,
            progress,
        )?);
    }

    if passes.is_empty() {
        progress.report("No intersect files or PAD-US settings configured - nothing to do");
        return Ok(Vec::new());
    }

    token.checkpoint()?;
    let merged = merge::merge_results(to_check, passes);
    info!("Tagging complete for {} features", merged.len());
    Ok(merged)
}

/// Run tagging with settings loaded from a JSON file.
///
/// A missing, empty, or malformed settings file degrades to an empty
/// result list with a progress note rather than failing the batch.
pub fn tags_from_settings_file(
    settings_file: &Path,
    to_check: &[Feature],
    token: &CancellationToken,
    progress: &ProgressReporter,
) -> Result<Vec<IntersectResult>, TaggingError> {
    let settings = match IntersectSettings::from_file(settings_file) {
        Ok(settings) => settings,
        Err(error) => {
            progress.report(&format!(
                "Could not load settings from {} ({:#}) - returning no tags",
                settings_file.display(),
                error
            ));
            return Ok(Vec::new());
        }
    };

    tags(&settings, to_check, token, progress)
}
