//! File-based intersection pass over the configured reference datasets.

use geo::Intersects;
use geojson::Feature;
use tracing::warn;

use crate::cancel::{CancellationToken, TaggingError};
use crate::geometry::{convert_features, feature_geometry};
use crate::loader::{load_feature_collection, property_string};
use crate::progress::ProgressReporter;
use crate::settings::IntersectFile;

use super::merge::{add_distinct_tag, contains_tag};
use super::{empty_results, IntersectResult};

const PROGRESS_INTERVAL: usize = 1_000;

/// Intersect the input features against each configured reference file.
///
/// Files process sequentially in list order so progress stays informative
/// on large datasets. A missing or unreadable file is reported and skipped;
/// the remaining files still contribute their tags. Returns one result per
/// input feature, aligned with `to_check`.
pub fn tags_from_file_intersections(
    to_check: &[Feature],
    intersect_files: &[IntersectFile],
    base_directory: &str,
    token: &CancellationToken,
    progress: &ProgressReporter,
) -> Result<Vec<IntersectResult>, TaggingError> {
    let mut results = empty_results(to_check);
    let input_geometries = convert_features(to_check);

    for intersect_file in intersect_files {
        token.checkpoint()?;

        let path = intersect_file.resolved_path(base_directory);
        if !path.exists() {
            progress.report(&format!(
                "Skipping {} - {} not found",
                intersect_file.name,
                path.display()
            ));
            continue;
        }

        let reference_features = match load_feature_collection(&path) {
            Ok(features) => features,
            Err(error) => {
                warn!("Could not read {}: {:#}", path.display(), error);
                progress.report(&format!(
                    "Skipping {} - could not read {}",
                    intersect_file.name,
                    path.display()
                ));
                continue;
            }
        };

        progress.report(&format!(
            "Checking {} reference features from {} against {} input features",
            reference_features.len(),
            intersect_file.name,
            to_check.len()
        ));

        let tag_all = intersect_file
            .tag_all
            .as_deref()
            .map(str::trim)
            .filter(|tag| !tag.is_empty());

        for (counter, reference_feature) in reference_features.iter().enumerate() {
            token.checkpoint()?;

            if counter > 0 && counter % PROGRESS_INTERVAL == 0 {
                progress.report(&format!(
                    "{} - {} of {} reference features checked",
                    intersect_file.name,
                    counter,
                    reference_features.len()
                ));
            }

            let Some(reference_geometry) = feature_geometry(reference_feature) else {
                continue;
            };

            for (slot, input_geometry) in input_geometries.iter().enumerate() {
                let Some(input_geometry) = input_geometry else {
                    continue;
                };
                if !reference_geometry.intersects(input_geometry) {
                    continue;
                }

                let result = &mut results[slot];

                let mut attribute_matched = false;
                for attribute in &intersect_file.attributes_for_tags {
                    if let Some(tag) = property_string(reference_feature, attribute) {
                        attribute_matched = true;
                        add_distinct_tag(&mut result.tags, &tag);
                    }
                }
                if attribute_matched {
                    result.intersects_with.push(reference_feature.clone());
                }

                // The tag-all record is independent of attribute matches;
                // a reference feature matching both ways is recorded twice.
                if let Some(tag_all) = tag_all {
                    if !contains_tag(&result.tags, tag_all) {
                        result.tags.push(tag_all.to_string());
                        result.intersects_with.push(reference_feature.clone());
                    }
                }
            }
        }
    }

    Ok(results)
}
