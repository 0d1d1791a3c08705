//! Trip folder parsing and assembly.
//!
//! Turns a trip asset folder into a [`Trip`] aggregate:
//!
//! ```text
//! trip/                        # root
//! ├── trip.yaml                # title, summary, privacy_zones
//! ├── 2024-05-01-reykjavik/    # one folder per day
//! │   ├── day.yaml
//! │   ├── harbour.jpg
//! │   └── sunset.jpg
//! └── 2024-05-02-golden-circle/
//!     └── day.yaml
//! ```
//!
//! The walk is fully sequential: read `trip.yaml`, load each day subfolder,
//! lift highlights out of day metadata, sort days and highlights by date,
//! carry privacy zones through verbatim. Non-directories and hidden entries
//! at the root are skipped with a log line; everything else that fails to
//! parse aborts the run.
//!
//! ## Highlights
//!
//! A day's metadata may carry a `highlights` sequence:
//!
//! ```yaml
//! highlights:
//!   - name: Sunset at the harbour
//!     summary: The sky went purple for twenty minutes.
//!     picture: harbour/sunset.jpg
//! ```
//!
//! The `picture` value is matched by its last path segment against the day's
//! pictures. A missing or null `picture` field, or a filename that matches
//! nothing, keeps the highlight without a picture — that's legal, not an
//! error.

use crate::day::{self, DayError};
use crate::trip::{Highlight, PrivacyZone, Trip, TripDay};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Malformed trip.yaml in {path}: {source}")]
    TripMetadata {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("Malformed highlights in {path}: {source}")]
    Highlights {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error(transparent)]
    Day(#[from] DayError),
}

const TRIP_METADATA_FILENAME: &str = "trip.yaml";

/// Trip-level metadata, read from `trip.yaml` at the root.
#[derive(Debug, Deserialize)]
struct TripMetadata {
    title: String,
    summary: String,
    #[serde(default)]
    privacy_zones: Vec<PrivacyZone>,
}

/// One entry under a day's `highlights` metadata key.
#[derive(Debug, Deserialize)]
struct HighlightEntry {
    name: String,
    summary: String,
    #[serde(default)]
    picture: Option<String>,
}

/// Parse a trip asset folder into a [`Trip`].
///
/// Fatal on a missing or malformed `trip.yaml` and on any day folder that
/// lacks parseable content. Re-running on the same folder yields identical
/// results — the walk is read-only and entry order is pinned by name sort.
pub fn parse_folder(root: &Path) -> Result<Trip, ParseError> {
    let metadata = parse_trip_metadata(root)?;

    let mut trip_days: Vec<TripDay> = Vec::new();
    let mut highlights: Vec<Highlight> = Vec::new();

    for sub_folder in collect_day_folders(root)? {
        let trip_day = day::load_day(&sub_folder)?;
        highlights.extend(extract_highlights(&trip_day, &sub_folder)?);
        trip_days.push(trip_day);
    }

    // Stable sorts: same-date entries keep their name order from the walk
    trip_days.sort_by_key(|d| d.date);
    highlights.sort_by_key(|h| h.from_date);

    Ok(Trip {
        title: metadata.title,
        summary: metadata.summary,
        trip_days,
        highlights,
        privacy_zones: metadata.privacy_zones,
    })
}

fn parse_trip_metadata(root: &Path) -> Result<TripMetadata, ParseError> {
    let path = root.join(TRIP_METADATA_FILENAME);
    let content = std::fs::read_to_string(&path).map_err(|e| ParseError::Io {
        path: path.clone(),
        source: e,
    })?;
    serde_yaml::from_str(&content).map_err(|e| ParseError::TripMetadata { path, source: e })
}

/// Immediate subfolders of the root, sorted by name. Non-directories and
/// hidden entries are skipped with a log line — they are expected clutter
/// (`trip.yaml` itself, `.git`, editor droppings), not errors.
fn collect_day_folders(root: &Path) -> Result<Vec<PathBuf>, ParseError> {
    let read_dir = std::fs::read_dir(root).map_err(|e| ParseError::Io {
        path: root.to_path_buf(),
        source: e,
    })?;

    let mut folders: Vec<PathBuf> = Vec::new();
    for entry in read_dir {
        let entry = entry.map_err(|e| ParseError::Io {
            path: root.to_path_buf(),
            source: e,
        })?;
        let path = entry.path();
        let name = entry.file_name().to_string_lossy().to_string();

        if !path.is_dir() {
            info!(entry = %name, "Skipping non-directory entry");
            continue;
        }
        if name.starts_with('.') {
            info!(entry = %name, "Skipping hidden directory");
            continue;
        }
        folders.push(path);
    }

    folders.sort();
    Ok(folders)
}

/// Lift highlight entries out of a day's metadata, resolving picture
/// references against that day's pictures.
fn extract_highlights(
    trip_day: &TripDay,
    sub_folder: &Path,
) -> Result<Vec<Highlight>, ParseError> {
    let Some(value) = trip_day.metadata.get("highlights") else {
        return Ok(Vec::new());
    };

    let entries: Vec<HighlightEntry> =
        serde_yaml::from_value(value.clone()).map_err(|e| ParseError::Highlights {
            path: sub_folder.to_path_buf(),
            source: e,
        })?;

    let mut highlights = Vec::with_capacity(entries.len());
    for entry in entries {
        let picture = match entry.picture.as_deref() {
            Some(reference) => {
                let filename = last_path_segment(reference);
                let found = trip_day.find_picture_by_filename(filename).cloned();
                if found.is_none() {
                    warn!(
                        highlight = %entry.name,
                        picture = %reference,
                        day = %trip_day.date,
                        "Highlight picture not found in day folder; keeping highlight without it"
                    );
                }
                found
            }
            None => None,
        };

        highlights.push(Highlight {
            from_date: trip_day.date,
            name: entry.name,
            summary: entry.summary,
            picture,
        });
    }

    Ok(highlights)
}

/// Last segment of a `/`-separated reference: `harbour/sunset.jpg` → `sunset.jpg`.
fn last_path_segment(reference: &str) -> &str {
    reference.rsplit('/').next().unwrap_or(reference)
}
