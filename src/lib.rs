//! # Travel Log
//!
//! A static site generator for travel trip logs. Your filesystem is the data
//! source: a trip folder holds `trip.yaml` plus one subfolder per day, each
//! with YAML metadata and pictures.
//!
//! # Architecture: Parse, Then Render
//!
//! The pipeline is a single sequential pass:
//!
//! ```text
//! 1. Parse    trip folder  →  Trip aggregate   (filesystem + YAML → data)
//! 2. Render   Trip         →  output/          (HTML + verbatim copies)
//! ```
//!
//! The parse stage produces one immutable [`trip::Trip`] value and the render
//! stage is a function of that value — no shared mutable state, no partial
//! output on parse failure. The process runs to completion or aborts on the
//! first unrecoverable parse error.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`trip`] | Core data model: `Trip`, `TripDay`, `Highlight`, `PrivacyZone` |
//! | [`parse`] | Walks the trip folder, assembles days and highlights, sorts by date |
//! | [`day`] | Loads one day folder: `day.yaml`, date resolution, picture enumeration |
//! | [`site`] | Renders the final HTML site from a `Trip` using Maud |
//! | [`cache`] | Content-hash copy cache so rebuilds skip unchanged pictures |
//! | [`output`] | CLI output formatting — inventory display of the parsed trip |
//!
//! # Design Decisions
//!
//! ## YAML In, HTML Out
//!
//! Trip and day metadata are YAML (`trip.yaml`, `day.yaml`) because that is
//! what travel-log asset folders already carry. Unknown keys ride through as
//! an opaque mapping — the parser never rejects metadata it doesn't
//! understand, it only requires what it needs (title, summary, a derivable
//! date per day).
//!
//! ## Maud Over Template Engines
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/), a compile-time
//! HTML macro system: malformed HTML is a build error, interpolation is
//! auto-escaped, and there is no template directory to ship.
//!
//! ## Verbatim Pictures
//!
//! Pictures are copied into the output unchanged. No resizing, no
//! re-encoding, no system dependencies — the [`cache`] module only skips
//! copies whose source content hash hasn't moved since the last build.
//!
//! ## Dates Are the Ordering
//!
//! Days and highlights are ordered by their dates, nothing else. The date
//! must be derivable from folder content (a `date` key or a `YYYY-MM-DD`
//! folder name); sorting is stable so same-date entries keep folder-name
//! order.

pub mod cache;
pub mod day;
pub mod output;
pub mod parse;
pub mod site;
pub mod trip;

#[cfg(test)]
pub(crate) mod test_helpers;
