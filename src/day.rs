//! Day folder loading.
//!
//! Each immediate subfolder of the trip root is one day. A day folder holds
//! an optional `day.yaml` with arbitrary metadata and any number of picture
//! files:
//!
//! ```text
//! 2024-05-01-reykjavik/
//! ├── day.yaml                 # metadata (optional if folder name is dated)
//! ├── harbour.jpg
//! └── sunset.jpg
//! ```
//!
//! ## Date resolution
//!
//! The date must be derivable from folder content. First match wins:
//!
//! 1. `date` key in `day.yaml` (`YYYY-MM-DD`)
//! 2. Leading `YYYY-MM-DD` in the folder name
//!
//! Neither source parseable is a fatal [`DayError::NoDate`].
//!
//! ## Pictures
//!
//! Immediate files with a recognized image extension, hidden files excluded,
//! sorted by filename. A day with zero pictures is legal — some days are
//! just notes.

use crate::trip::{Picture, TripDay};
use chrono::NaiveDate;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum DayError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Malformed day.yaml in {path}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("day.yaml in {0} is not a mapping")]
    NotAMapping(PathBuf),
    #[error("No date for day folder {0}: neither a `date` key in day.yaml nor a YYYY-MM-DD folder name")]
    NoDate(PathBuf),
    #[error("Unparseable `date` value {value:?} in {path}")]
    BadDate { path: PathBuf, value: String },
}

const METADATA_FILENAME: &str = "day.yaml";

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp"];

/// Load one day from its folder: metadata, date, and pictures.
pub fn load_day(path: &Path) -> Result<TripDay, DayError> {
    let metadata = read_metadata(path)?;
    let date = resolve_date(path, &metadata)?;
    let pictures = collect_pictures(path)?;

    debug!(
        day = %path.display(),
        %date,
        pictures = pictures.len(),
        "Loaded day folder"
    );

    Ok(TripDay {
        date,
        metadata,
        pictures,
    })
}

/// Read `day.yaml` into a mapping. A missing file yields an empty mapping;
/// a malformed one is fatal.
fn read_metadata(path: &Path) -> Result<serde_yaml::Mapping, DayError> {
    let yaml_path = path.join(METADATA_FILENAME);
    let content = match std::fs::read_to_string(&yaml_path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Ok(serde_yaml::Mapping::new());
        }
        Err(e) => {
            return Err(DayError::Io {
                path: yaml_path,
                source: e,
            });
        }
    };

    let value: serde_yaml::Value =
        serde_yaml::from_str(&content).map_err(|e| DayError::Yaml {
            path: yaml_path.clone(),
            source: e,
        })?;

    match value {
        serde_yaml::Value::Mapping(m) => Ok(m),
        // An empty file parses as null; treat it like a missing file
        serde_yaml::Value::Null => Ok(serde_yaml::Mapping::new()),
        _ => Err(DayError::NotAMapping(yaml_path)),
    }
}

/// Resolve the day's date: `date` key first, folder name second.
fn resolve_date(path: &Path, metadata: &serde_yaml::Mapping) -> Result<NaiveDate, DayError> {
    if let Some(value) = metadata.get("date") {
        let raw = match value {
            serde_yaml::Value::String(s) => s.clone(),
            other => serde_yaml::to_string(other)
                .unwrap_or_default()
                .trim()
                .to_string(),
        };
        return NaiveDate::parse_from_str(&raw, "%Y-%m-%d").map_err(|_| DayError::BadDate {
            path: path.to_path_buf(),
            value: raw,
        });
    }

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    parse_leading_date(&name).ok_or_else(|| DayError::NoDate(path.to_path_buf()))
}

/// Parse a leading `YYYY-MM-DD` from a folder name like `2024-05-01-reykjavik`.
fn parse_leading_date(name: &str) -> Option<NaiveDate> {
    if name.len() < 10 || !name.is_char_boundary(10) {
        return None;
    }
    NaiveDate::parse_from_str(&name[..10], "%Y-%m-%d").ok()
}

/// Enumerate picture files directly inside the day folder, sorted by filename.
fn collect_pictures(path: &Path) -> Result<Vec<Picture>, DayError> {
    let mut pictures = Vec::new();

    for entry in WalkDir::new(path)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|e| DayError::Io {
            path: path.to_path_buf(),
            source: e.into(),
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let filename = entry.file_name().to_string_lossy().to_string();
        if filename.starts_with('.') || !is_image(&filename) {
            continue;
        }
        pictures.push(Picture {
            filename,
            source_path: entry.path().to_path_buf(),
        });
    }

    Ok(pictures)
}

fn is_image(filename: &str) -> bool {
    Path::new(filename)
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str()))
        .unwrap_or(false)
}
