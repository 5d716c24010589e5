//! Feature intersection tagging CLI.
//!
//! Loads input features and tagging settings, runs the intersection
//! engine, and writes per-feature tags as JSON.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use ocotillo::loader::load_feature_collection;
use ocotillo::{tags_from_settings_file, CancellationToken, ProgressReporter};

#[derive(Parser, Debug)]
#[command(name = "tagger")]
#[command(about = "Tag GeoJSON features by intersection with reference datasets")]
struct Args {
    /// Intersect settings JSON file
    #[arg(short, long)]
    settings: PathBuf,

    /// GeoJSON file with the features to tag
    #[arg(short, long)]
    input: PathBuf,

    /// Write results to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,
}

/// One output row per input feature
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TaggedFeature {
    feature_index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<geojson::feature::Id>,
    tags: Vec<String>,
    intersects_with_count: usize,
}

fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();

    info!("Ocotillo Feature Tagger");
    info!("Settings: {}", args.settings.display());
    info!("Input: {}", args.input.display());

    let features =
        load_feature_collection(&args.input).context("Failed to load input features")?;
    info!("Loaded {} input features", features.len());

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);

    let progress = {
        let spinner = spinner.clone();
        ProgressReporter::new(move |message: &str| spinner.set_message(message.to_string()))
    };

    let token = CancellationToken::new();
    let results = tags_from_settings_file(&args.settings, &features, &token, &progress)?;

    spinner.finish_with_message("Tagging complete");

    let tagged: Vec<TaggedFeature> = results
        .iter()
        .enumerate()
        .map(|(feature_index, result)| TaggedFeature {
            feature_index,
            id: result.feature.id.clone(),
            tags: result.tags.clone(),
            intersects_with_count: result.intersects_with.len(),
        })
        .collect();

    let json = if args.pretty {
        serde_json::to_string_pretty(&tagged)?
    } else {
        serde_json::to_string(&tagged)?
    };

    match &args.output {
        Some(path) => {
            fs::write(path, &json)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Wrote {} results to {}", tagged.len(), path.display());
        }
        None => println!("{}", json),
    }

    Ok(())
}
