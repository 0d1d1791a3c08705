//! Shared test utilities for the travel-log test suite.
//!
//! Provides a programmatic trip fixture plus lookup helpers that panic with
//! a clear message on miss.
//!
//! # Fixture shape
//!
//! ```text
//! <tmp>/
//! ├── trip.yaml                      # Iceland, one privacy zone
//! ├── 2024-05-01-reykjavik/          # day.yaml + 2 pictures + 2 highlights
//! ├── 2024-05-02-golden-circle/      # no day.yaml, date from folder name
//! └── glacier-lagoon/                # undated name, date from day.yaml
//! ```

use std::fs;
use tempfile::TempDir;

use crate::trip::{Highlight, Trip, TripDay};

/// Build the standard trip fixture in a temp directory.
///
/// Tests get an isolated tree they can mutate without affecting other tests.
pub fn trip_fixture() -> TempDir {
    let tmp = TempDir::new().unwrap();

    fs::write(
        tmp.path().join("trip.yaml"),
        "\
title: Iceland
summary: 'A week around the **ring road**.'
privacy_zones:
  - name: home
    latitude: 64.1466
    longitude: -21.9426
    radius_km: 1.5
",
    )
    .unwrap();

    // Day one: metadata, pictures, two highlights (one unresolvable)
    let day1 = tmp.path().join("2024-05-01-reykjavik");
    fs::create_dir_all(&day1).unwrap();
    fs::write(
        day1.join("day.yaml"),
        "\
title: Reykjavík
summary: 'Arrival day, slow wander around the harbour.'
highlights:
  - name: Harbour walk
    summary: 'Boats and *light*.'
    picture: 2024-05-01/harbour.jpg
  - name: Hot dog stand
    summary: 'The famous one.'
    picture: missing.jpg
",
    )
    .unwrap();
    fs::write(day1.join("harbour.jpg"), "fake image harbour").unwrap();
    fs::write(day1.join("sunset.jpg"), "fake image sunset").unwrap();

    // Day two: no day.yaml at all — date comes from the folder name
    let day2 = tmp.path().join("2024-05-02-golden-circle");
    fs::create_dir_all(&day2).unwrap();
    fs::write(day2.join("geysir.jpg"), "fake image geysir").unwrap();

    // Day three: undated folder name, date and a picture-less highlight in day.yaml
    let day3 = tmp.path().join("glacier-lagoon");
    fs::create_dir_all(&day3).unwrap();
    fs::write(
        day3.join("day.yaml"),
        "\
date: 2024-05-03
highlights:
  - name: Glacier lagoon
    summary: 'Icebergs at dusk.'
    picture:
",
    )
    .unwrap();

    tmp
}

// =========================================================================
// Trip lookups — panics with a clear message on miss
// =========================================================================

/// Find a day by ISO date string. Panics if not found.
pub fn find_day<'a>(trip: &'a Trip, date: &str) -> &'a TripDay {
    trip.trip_days
        .iter()
        .find(|d| d.date.to_string() == date)
        .unwrap_or_else(|| {
            let dates: Vec<String> = trip.trip_days.iter().map(|d| d.date.to_string()).collect();
            panic!("day '{date}' not found. Available: {dates:?}")
        })
}

/// Find a highlight by name. Panics if not found.
pub fn find_highlight<'a>(trip: &'a Trip, name: &str) -> &'a Highlight {
    trip.highlights
        .iter()
        .find(|h| h.name == name)
        .unwrap_or_else(|| {
            let names: Vec<&str> = trip.highlights.iter().map(|h| h.name.as_str()).collect();
            panic!("highlight '{name}' not found. Available: {names:?}")
        })
}
