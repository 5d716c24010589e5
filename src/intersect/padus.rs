//! PAD-US region-partitioned intersection pass.
//!
//! The nationwide PAD-US public lands dataset is kept on disk partitioned
//! by region: a single `*Regions.geojson` file holds coarse regional
//! boundaries, and each `*{regionNumber}.geojson` file holds that region's
//! detail features. Inputs are first matched to regions so only the touched
//! regional files load.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use geo::Intersects;
use geojson::Feature;
use tracing::warn;
use walkdir::WalkDir;

use crate::cancel::{CancellationToken, TaggingError};
use crate::geometry::{convert_features, feature_geometry};
use crate::loader::{load_feature_collection, property_string};
use crate::progress::ProgressReporter;

use super::merge::contains_tag;
use super::{empty_results, IntersectResult};

const PROGRESS_INTERVAL: usize = 5_000;

/// Attribute on the master regions file carrying the region identifier.
const REGION_ATTRIBUTE: &str = "REG_NUM";

/// Suffix identifying the master regions file.
const REGIONS_SUFFIX: &str = "Regions.geojson";

/// Intersect the input features against region-partitioned PAD-US data.
///
/// A directory without exactly one `*Regions.geojson` file is a
/// configuration failure for this pass - it is reported and the pass
/// contributes no tags. Missing regional detail files skip their region
/// with a note. Returns one result per input feature, aligned with
/// `to_check`.
pub fn tags_from_pad_us_intersections(
    to_check: &[Feature],
    attributes_for_tags: &[String],
    pad_us_directory: &Path,
    token: &CancellationToken,
    progress: &ProgressReporter,
) -> Result<Vec<IntersectResult>, TaggingError> {
    let mut results = empty_results(to_check);

    if !pad_us_directory.is_dir() {
        progress.report(&format!(
            "PAD-US directory {} not found - skipping PAD-US tagging",
            pad_us_directory.display()
        ));
        return Ok(results);
    }

    let geojson_files = geojson_files_in(pad_us_directory);

    let regions_files: Vec<&PathBuf> = geojson_files
        .iter()
        .filter(|path| file_name_ends_with(path, REGIONS_SUFFIX))
        .collect();

    let regions_file = match regions_files.as_slice() {
        [single] => *single,
        [] => {
            progress.report(&format!(
                "No *{} file found in {} - skipping PAD-US tagging",
                REGIONS_SUFFIX,
                pad_us_directory.display()
            ));
            return Ok(results);
        }
        _ => {
            progress.report(&format!(
                "{} files match *{} in {} - ambiguous, skipping PAD-US tagging",
                regions_files.len(),
                REGIONS_SUFFIX,
                pad_us_directory.display()
            ));
            return Ok(results);
        }
    };

    let region_features = match load_feature_collection(regions_file) {
        Ok(features) => features,
        Err(error) => {
            warn!("Could not read {}: {:#}", regions_file.display(), error);
            progress.report(&format!(
                "Could not read {} - skipping PAD-US tagging",
                regions_file.display()
            ));
            return Ok(results);
        }
    };

    let input_geometries = convert_features(to_check);

    // Which regions the input features touch; one input may land in several
    let mut touched_regions: BTreeSet<String> = BTreeSet::new();
    for region_feature in &region_features {
        token.checkpoint()?;

        let Some(region_geometry) = feature_geometry(region_feature) else {
            continue;
        };
        let Some(region_id) = property_string(region_feature, REGION_ATTRIBUTE) else {
            continue;
        };

        if input_geometries
            .iter()
            .flatten()
            .any(|input_geometry| region_geometry.intersects(input_geometry))
        {
            touched_regions.insert(region_id);
        }
    }

    progress.report(&format!(
        "{} PAD-US regions touched by the input features",
        touched_regions.len()
    ));

    // (input slot, tag, source feature) triples across all region files
    let mut matches: Vec<(usize, String, Feature)> = Vec::new();

    for region_id in &touched_regions {
        token.checkpoint()?;

        let Some(region_file) = regional_file_for(&geojson_files, region_id) else {
            progress.report(&format!(
                "No *{}.geojson file found for PAD-US region {} - skipping",
                region_id, region_id
            ));
            continue;
        };

        let regional_features = match load_feature_collection(region_file) {
            Ok(features) => features,
            Err(error) => {
                warn!("Could not read {}: {:#}", region_file.display(), error);
                progress.report(&format!(
                    "Could not read {} - skipping PAD-US region {}",
                    region_file.display(),
                    region_id
                ));
                continue;
            }
        };

        progress.report(&format!(
            "Checking {} PAD-US features from {}",
            regional_features.len(),
            region_file.display()
        ));

        for (counter, regional_feature) in regional_features.iter().enumerate() {
            token.checkpoint()?;

            if counter > 0 && counter % PROGRESS_INTERVAL == 0 {
                progress.report(&format!(
                    "PAD-US region {} - {} of {} features checked",
                    region_id,
                    counter,
                    regional_features.len()
                ));
            }

            let Some(regional_geometry) = feature_geometry(regional_feature) else {
                continue;
            };

            // Every input re-checks against every loaded regional feature,
            // not just the inputs that landed in this region.
            for (slot, input_geometry) in input_geometries.iter().enumerate() {
                let Some(input_geometry) = input_geometry else {
                    continue;
                };
                if !regional_geometry.intersects(input_geometry) {
                    continue;
                }
                for attribute in attributes_for_tags {
                    if let Some(tag) = property_string(regional_feature, attribute) {
                        matches.push((slot, tag, regional_feature.clone()));
                    }
                }
            }
        }
    }

    // Distinct tags per input; the source feature list keeps every match
    for (slot, tag, source) in matches {
        let result = &mut results[slot];
        if !contains_tag(&result.tags, &tag) {
            result.tags.push(tag);
        }
        result.intersects_with.push(source);
    }

    Ok(results)
}

/// The `.geojson` files directly under a directory, sorted by path for
/// deterministic suffix matching.
fn geojson_files_in(directory: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(directory)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| {
            path.extension()
                .map(|extension| extension.eq_ignore_ascii_case("geojson"))
                .unwrap_or(false)
        })
        .collect();
    files.sort();
    files
}

fn file_name_ends_with(path: &Path, suffix: &str) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(|name| name.ends_with(suffix))
        .unwrap_or(false)
}

/// Locate a regional detail file by `*{regionId}.geojson` suffix. First
/// match in sorted order wins if the suffix is ambiguous.
fn regional_file_for<'a>(files: &'a [PathBuf], region_id: &str) -> Option<&'a PathBuf> {
    let suffix = format!("{}.geojson", region_id);
    files.iter().find(|path| file_name_ends_with(path, &suffix))
}
