//! Core data model for an assembled trip.
//!
//! These types are built once per run by the [`parse`](crate::parse) stage and
//! are immutable afterwards. The `Trip` owns everything: days, highlights, and
//! privacy zones have no back-references beyond the date used for sorting.
//! All types serialize to JSON so the assembled trip can be dumped as a
//! `trip.json` manifest for inspection.

use chrono::NaiveDate;
use serde::Serialize;
use std::path::PathBuf;

/// The fully assembled trip: the single aggregate handed to the site renderer.
#[derive(Debug, Serialize)]
pub struct Trip {
    pub title: String,
    pub summary: String,
    /// Days in ascending date order.
    pub trip_days: Vec<TripDay>,
    /// Highlights in ascending date order.
    pub highlights: Vec<Highlight>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub privacy_zones: Vec<PrivacyZone>,
}

/// One day of the trip, built from one subfolder of the trip root.
#[derive(Debug, Clone, Serialize)]
pub struct TripDay {
    pub date: NaiveDate,
    /// Arbitrary key-value metadata from `day.yaml`, passed through verbatim.
    pub metadata: serde_yaml::Mapping,
    /// Pictures found in the day folder, sorted by filename.
    pub pictures: Vec<Picture>,
}

impl TripDay {
    /// Look up a picture by its filename (last path segment).
    ///
    /// Highlight entries may reference pictures by a longer path; callers
    /// strip it down to the final segment before lookup.
    pub fn find_picture_by_filename(&self, filename: &str) -> Option<&Picture> {
        self.pictures.iter().find(|p| p.filename == filename)
    }
}

/// A picture inside a day folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Picture {
    /// Filename including extension, e.g. `beach.jpg`.
    pub filename: String,
    /// Absolute path to the source file.
    pub source_path: PathBuf,
}

/// A notable moment, lifted out of a day's metadata.
///
/// The picture reference is resolved against the owning day's pictures at
/// parse time; an unresolvable or absent reference leaves it `None`, which
/// is legal.
#[derive(Debug, Clone, Serialize)]
pub struct Highlight {
    /// The owning day's date.
    pub from_date: NaiveDate,
    pub name: String,
    pub summary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub picture: Option<Picture>,
}

/// An opaque privacy zone, defined entirely by `trip.yaml`.
///
/// The fields are whatever the metadata says they are; they ride through the
/// pipeline unchanged and surface only in the `trip.json` manifest.
#[derive(Debug, Clone, PartialEq, Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct PrivacyZone(pub serde_yaml::Mapping);
