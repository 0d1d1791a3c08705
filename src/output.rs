//! CLI output formatting for the parsed trip.
//!
//! # Information-First Display
//!
//! Output is information-centric, not file-centric: the primary display for
//! every entity (day, picture, highlight) is its semantic identity — date and
//! title — with filesystem paths as secondary context via indented `Source:`
//! lines.
//!
//! ```text
//! Trip: Iceland
//! A week around the ring road.
//!
//! Days
//! 001 2024-05-01 (2 pictures)
//!     Source: 2024-05-01-reykjavik/
//! 002 2024-05-02 (0 pictures)
//!
//! Highlights
//! 001 2024-05-01 Harbour walk
//! 002 2024-05-03 Glacier lagoon (no picture)
//! ```
//!
//! # Architecture
//!
//! [`format_trip_summary`] is pure (returns `Vec<String>`, no I/O) for
//! testability; [`print_trip_summary`] is the stdout wrapper.

use crate::trip::Trip;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Format a picture count with the right noun: `1 picture`, `3 pictures`.
fn picture_count(n: usize) -> String {
    if n == 1 {
        "1 picture".to_string()
    } else {
        format!("{} pictures", n)
    }
}

/// Truncate text to `max` characters, appending `...` if truncated.
fn truncate_summary(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

/// Format the full trip inventory. Pure — no I/O.
pub fn format_trip_summary(trip: &Trip) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push(format!("Trip: {}", trip.title));
    if !trip.summary.is_empty() {
        lines.push(truncate_summary(&trip.summary, 100));
    }

    lines.push(String::new());
    lines.push("Days".to_string());
    for (idx, day) in trip.trip_days.iter().enumerate() {
        lines.push(format!(
            "{} {} ({})",
            format_index(idx + 1),
            day.date,
            picture_count(day.pictures.len())
        ));
        if let Some(folder) = day
            .pictures
            .first()
            .and_then(|p| p.source_path.parent())
            .and_then(|d| d.file_name())
        {
            lines.push(format!(
                "{}Source: {}/",
                indent(1),
                folder.to_string_lossy()
            ));
        }
    }

    if !trip.highlights.is_empty() {
        lines.push(String::new());
        lines.push("Highlights".to_string());
        for (idx, highlight) in trip.highlights.iter().enumerate() {
            let suffix = if highlight.picture.is_none() {
                " (no picture)"
            } else {
                ""
            };
            lines.push(format!(
                "{} {} {}{}",
                format_index(idx + 1),
                highlight.from_date,
                highlight.name,
                suffix
            ));
        }
    }

    lines
}

/// Print the trip inventory to stdout.
pub fn print_trip_summary(trip: &Trip) {
    for line in format_trip_summary(trip) {
        println!("{}", line);
    }
}
