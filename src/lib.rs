//! Ocotillo - feature intersection tagging for GeoJSON datasets.
//!
//! Given a list of input features and a set of reference geometry files,
//! derives textual tags for each input feature from spatial intersections.
//! Supports arbitrary GeoJSON reference files plus the region-partitioned
//! PAD-US public lands dataset.

pub mod cancel;
pub mod geometry;
pub mod intersect;
pub mod loader;
pub mod progress;
pub mod settings;

pub use cancel::{CancellationToken, TaggingError};
pub use intersect::{tags, tags_from_settings_file, IntersectResult};
pub use progress::ProgressReporter;
pub use settings::{IntersectFile, IntersectSettings};
