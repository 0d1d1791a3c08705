//! Static website generation.
//!
//! Takes the assembled [`Trip`] and renders the final site:
//!
//! ```text
//! output/
//! ├── index.html               # trip summary, day list, highlights
//! ├── trip.json                # serialized Trip, for inspection
//! ├── 2024-05-01/
//! │   ├── index.html           # day page
//! │   ├── harbour.jpg          # pictures copied verbatim
//! │   └── sunset.jpg
//! └── 2024-05-02/
//!     └── index.html
//! ```
//!
//! HTML is generated with [maud](https://maud.lambda.xyz/) — type-safe
//! compile-time templates with automatic XSS escaping — and trip, day, and
//! highlight summaries are rendered from markdown via pulldown-cmark. The
//! stylesheet is embedded at compile time and inlined into every page, so
//! the output needs no asset pipeline.
//!
//! Pictures go through the [`cache`](crate::cache) module: unchanged sources
//! are skipped on rebuilds. Privacy zones affect no rendering; they ride
//! through into `trip.json` only.

use crate::cache::{self, CacheStats, CopyCache};
use crate::trip::{Highlight, Trip, TripDay};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use pulldown_cmark::{Parser, html as md_html};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum SiteError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

const CSS: &str = include_str!("../static/style.css");

/// What a generation run produced.
#[derive(Debug)]
pub struct SiteReport {
    /// HTML pages written (index plus one per day).
    pub pages: usize,
    /// Picture copy cache performance.
    pub pictures: CacheStats,
}

/// Render the trip into `output_dir`, using `cache_dir` to skip unchanged
/// picture copies.
pub fn generate_website(
    trip: &Trip,
    output_dir: &Path,
    cache_dir: &Path,
) -> Result<SiteReport, SiteError> {
    fs::create_dir_all(output_dir)?;

    let slugs = day_slugs(&trip.trip_days);

    let index = render_index(trip, &slugs);
    fs::write(output_dir.join("index.html"), index.into_string())?;
    let mut pages = 1;

    for (idx, day) in trip.trip_days.iter().enumerate() {
        let prev = (idx > 0).then(|| (&trip.trip_days[idx - 1], slugs[idx - 1].as_str()));
        let next = trip
            .trip_days
            .get(idx + 1)
            .map(|d| (d, slugs[idx + 1].as_str()));

        let day_dir = output_dir.join(&slugs[idx]);
        fs::create_dir_all(&day_dir)?;

        let page = render_day_page(trip, day, prev, next);
        fs::write(day_dir.join("index.html"), page.into_string())?;
        pages += 1;
    }

    let pictures = copy_pictures(trip, &slugs, output_dir, cache_dir)?;

    let manifest = serde_json::to_string_pretty(trip)?;
    fs::write(output_dir.join("trip.json"), manifest)?;

    info!(
        pages,
        pictures = %pictures,
        output = %output_dir.display(),
        "Site generated"
    );

    Ok(SiteReport { pages, pictures })
}

/// Output directory names for the days: the ISO date, suffixed with a
/// counter when several days share one.
///
/// Days sharing a date are legal (the date sort is stable), so the second
/// `2024-05-01` becomes `2024-05-01-2` — without this, its page and
/// pictures would silently overwrite the first day's.
fn day_slugs(days: &[TripDay]) -> Vec<String> {
    let mut seen: HashMap<String, u32> = HashMap::new();
    days.iter()
        .map(|day| {
            let base = day.date.to_string();
            let count = seen.entry(base.clone()).or_insert(0);
            *count += 1;
            if *count == 1 {
                base
            } else {
                format!("{}-{}", base, count)
            }
        })
        .collect()
}

/// Copy every day's pictures into the output, skipping unchanged sources.
fn copy_pictures(
    trip: &Trip,
    slugs: &[String],
    output_dir: &Path,
    cache_dir: &Path,
) -> Result<CacheStats, SiteError> {
    let previous = CopyCache::load(cache_dir);
    // The manifest is rebuilt from this run's pictures only, so entries for
    // pictures that left the trip don't accumulate across rebuilds
    let mut current = CopyCache::empty();
    let mut stats = CacheStats::default();

    for (day, slug) in trip.trip_days.iter().zip(slugs) {
        for picture in &day.pictures {
            let output_rel = format!("{}/{}", slug, picture.filename);
            let source_hash = cache::hash_file(&picture.source_path)?;

            if previous.is_fresh(&output_rel, &source_hash, output_dir) {
                stats.hit();
            } else {
                fs::copy(&picture.source_path, output_dir.join(&output_rel))?;
                stats.copy();
            }
            current.insert(output_rel, source_hash);
        }
    }

    current.save(cache_dir)?;
    Ok(stats)
}

// ============================================================================
// HTML components
// ============================================================================

/// Render markdown to pre-escaped HTML.
fn markdown(text: &str) -> Markup {
    let parser = Parser::new(text);
    let mut out = String::new();
    md_html::push_html(&mut out, parser);
    PreEscaped(out)
}

/// The base HTML document shared by every page.
fn base_document(title: &str, breadcrumb: Markup, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (CSS) }
            }
            body {
                header.site-header {
                    nav.breadcrumb { (breadcrumb) }
                }
                (content)
            }
        }
    }
}

/// Display label for a day: ISO date, plus the metadata `title` when set.
fn day_label(day: &TripDay) -> Option<&str> {
    day.metadata.get("title").and_then(|v| v.as_str())
}

/// Optional markdown `summary` from day metadata.
fn day_summary(day: &TripDay) -> Option<&str> {
    day.metadata.get("summary").and_then(|v| v.as_str())
}

// ============================================================================
// Page renderers
// ============================================================================

/// The trip index: title, summary, day list, highlights.
fn render_index(trip: &Trip, slugs: &[String]) -> Markup {
    let breadcrumb = html! { (trip.title) };

    let content = html! {
        main.index-page {
            h1 { (trip.title) }
            div.trip-summary { (markdown(&trip.summary)) }
            ul.day-list {
                @for (day, slug) in trip.trip_days.iter().zip(slugs) {
                    li {
                        a href={ (slug) "/" } {
                            span.day-date { (day.date) }
                            @if let Some(label) = day_label(day) { (label) }
                        }
                    }
                }
            }
            @if !trip.highlights.is_empty() {
                section.highlights {
                    h2 { "Highlights" }
                    @for highlight in &trip.highlights {
                        (render_highlight(highlight, highlight_href(trip, slugs, highlight).as_deref()))
                    }
                }
            }
        }
    };

    base_document(&trip.title, breadcrumb, content)
}

/// Link target for a highlight's picture: the owning day's slug plus the
/// filename. The owning day is the one whose pictures contain the resolved
/// picture, which stays unambiguous when days share a date.
fn highlight_href(trip: &Trip, slugs: &[String], highlight: &Highlight) -> Option<String> {
    let picture = highlight.picture.as_ref()?;
    trip.trip_days
        .iter()
        .zip(slugs)
        .find(|(day, _)| day.pictures.iter().any(|p| p == picture))
        .map(|(_, slug)| format!("{}/{}", slug, picture.filename))
}

/// One highlight card on the index page.
fn render_highlight(highlight: &Highlight, picture_href: Option<&str>) -> Markup {
    html! {
        article.highlight {
            h3 { (highlight.name) }
            p.highlight-date { (highlight.from_date) }
            div.highlight-summary { (markdown(&highlight.summary)) }
            @if let Some(href) = picture_href {
                a href=(href) {
                    img src=(href) alt=(highlight.name) loading="lazy";
                }
            }
        }
    }
}

/// A day page: heading, optional summary, picture grid, prev/next pager.
fn render_day_page(
    trip: &Trip,
    day: &TripDay,
    prev: Option<(&TripDay, &str)>,
    next: Option<(&TripDay, &str)>,
) -> Markup {
    let breadcrumb = html! {
        a href="../" { (trip.title) }
        " › "
        (day.date)
    };

    let heading = match day_label(day) {
        Some(label) => format!("{} — {}", day.date, label),
        None => day.date.to_string(),
    };

    let content = html! {
        main.day-page {
            h1 { (heading) }
            @if let Some(summary) = day_summary(day) {
                div.day-summary { (markdown(summary)) }
            }
            @if !day.pictures.is_empty() {
                div.picture-grid {
                    @for picture in &day.pictures {
                        a href=(picture.filename) {
                            img src=(picture.filename) alt=(picture.filename) loading="lazy";
                        }
                    }
                }
            }
            nav.day-pager {
                @if let Some((p, slug)) = prev {
                    a href={ "../" (slug) "/" } { "← " (p.date) }
                } @else { span {} }
                @if let Some((n, slug)) = next {
                    a href={ "../" (slug) "/" } { (n.date) " →" }
                } @else { span {} }
            }
        }
    };

    base_document(&heading, breadcrumb, content)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;
    use chrono::NaiveDate;
    use std::path::PathBuf;

    fn sample_day(date: (i32, u32, u32), pictures: &[&str]) -> TripDay {
        TripDay {
            date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            metadata: serde_yaml::Mapping::new(),
            pictures: pictures
                .iter()
                .map(|n| crate::trip::Picture {
                    filename: n.to_string(),
                    source_path: PathBuf::from(format!("/src/{n}")),
                })
                .collect(),
        }
    }

    fn sample_trip() -> Trip {
        Trip {
            title: "Iceland".to_string(),
            summary: "A week around the **ring road**.".to_string(),
            trip_days: vec![
                sample_day((2024, 5, 1), &["harbour.jpg"]),
                sample_day((2024, 5, 2), &[]),
            ],
            highlights: vec![Highlight {
                from_date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
                name: "Harbour walk".to_string(),
                summary: "Boats and *light*.".to_string(),
                picture: Some(crate::trip::Picture {
                    filename: "harbour.jpg".to_string(),
                    source_path: PathBuf::from("/src/harbour.jpg"),
                }),
            }],
            privacy_zones: vec![],
        }
    }

    #[test]
    fn index_contains_title_and_markdown_summary() {
        let trip = sample_trip();
        let html = render_index(&trip, &day_slugs(&trip.trip_days)).into_string();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("Iceland"));
        assert!(html.contains("<strong>ring road</strong>"));
    }

    #[test]
    fn index_links_every_day() {
        let trip = sample_trip();
        let html = render_index(&trip, &day_slugs(&trip.trip_days)).into_string();
        assert!(html.contains(r#"href="2024-05-01/""#));
        assert!(html.contains(r#"href="2024-05-02/""#));
    }

    #[test]
    fn index_renders_highlight_with_picture_link() {
        let trip = sample_trip();
        let html = render_index(&trip, &day_slugs(&trip.trip_days)).into_string();
        assert!(html.contains("Harbour walk"));
        assert!(html.contains("<em>light</em>"));
        assert!(html.contains("2024-05-01/harbour.jpg"));
    }

    #[test]
    fn index_omits_highlights_section_when_none() {
        let mut trip = sample_trip();
        trip.highlights.clear();
        let html = render_index(&trip, &day_slugs(&trip.trip_days)).into_string();
        assert!(!html.contains("Highlights"));
    }

    #[test]
    fn day_page_has_picture_grid_and_pager() {
        let trip = sample_trip();
        let html = render_day_page(
            &trip,
            &trip.trip_days[0],
            None,
            Some((&trip.trip_days[1], "2024-05-02")),
        )
        .into_string();
        assert!(html.contains("picture-grid"));
        assert!(html.contains(r#"src="harbour.jpg""#));
        assert!(html.contains(r#"href="../2024-05-02/""#));
    }

    #[test]
    fn day_page_without_pictures_omits_grid() {
        let trip = sample_trip();
        let html = render_day_page(
            &trip,
            &trip.trip_days[1],
            Some((&trip.trip_days[0], "2024-05-01")),
            None,
        )
        .into_string();
        assert!(!html.contains("picture-grid"));
        assert!(html.contains(r#"href="../2024-05-01/""#));
    }

    #[test]
    fn day_heading_includes_metadata_title() {
        let trip = sample_trip();
        let mut day = trip.trip_days[0].clone();
        day.metadata.insert(
            serde_yaml::Value::String("title".into()),
            serde_yaml::Value::String("Reykjavík".into()),
        );
        let html = render_day_page(&trip, &day, None, None).into_string();
        assert!(html.contains("2024-05-01 — Reykjavík"));
    }

    #[test]
    fn maud_escapes_html_in_titles() {
        let mut trip = sample_trip();
        trip.title = "<script>alert('xss')</script>".to_string();
        let html = render_index(&trip, &day_slugs(&trip.trip_days)).into_string();
        assert!(!html.contains("<script>alert"));
        assert!(html.contains("&lt;script&gt;"));
    }

    // =========================================================================
    // Same-date day disambiguation
    // =========================================================================

    #[test]
    fn day_slugs_unique_dates_are_plain_dates() {
        let trip = sample_trip();
        assert_eq!(
            day_slugs(&trip.trip_days),
            vec!["2024-05-01".to_string(), "2024-05-02".to_string()]
        );
    }

    #[test]
    fn day_slugs_suffix_repeated_dates() {
        let days = vec![
            sample_day((2024, 5, 1), &[]),
            sample_day((2024, 5, 1), &[]),
            sample_day((2024, 5, 1), &[]),
            sample_day((2024, 5, 2), &[]),
        ];
        assert_eq!(
            day_slugs(&days),
            vec![
                "2024-05-01".to_string(),
                "2024-05-01-2".to_string(),
                "2024-05-01-3".to_string(),
                "2024-05-02".to_string(),
            ]
        );
    }

    #[test]
    fn same_date_days_get_their_own_directories() {
        let tmp = tempfile::TempDir::new().unwrap();
        std::fs::write(tmp.path().join("trip.yaml"), "title: T\nsummary: S\n").unwrap();

        // Two folders, one date: evening sorts before morning by name
        let evening = tmp.path().join("2024-05-01-evening");
        std::fs::create_dir_all(&evening).unwrap();
        std::fs::write(evening.join("pm.jpg"), "evening picture").unwrap();

        let morning = tmp.path().join("2024-05-01-morning");
        std::fs::create_dir_all(&morning).unwrap();
        std::fs::write(morning.join("am.jpg"), "morning picture").unwrap();
        std::fs::write(
            morning.join("day.yaml"),
            "highlights:\n  - name: Coffee\n    summary: First stop.\n    picture: am.jpg\n",
        )
        .unwrap();

        let trip = crate::parse::parse_folder(tmp.path()).unwrap();
        let out = tempfile::TempDir::new().unwrap();
        let cache = tempfile::TempDir::new().unwrap();
        let report = generate_website(&trip, out.path(), cache.path()).unwrap();

        assert_eq!(report.pages, 3);
        assert!(out.path().join("2024-05-01/index.html").exists());
        assert!(out.path().join("2024-05-01-2/index.html").exists());

        // Pictures stay with their own day
        assert!(out.path().join("2024-05-01/pm.jpg").exists());
        assert!(!out.path().join("2024-05-01/am.jpg").exists());
        assert!(out.path().join("2024-05-01-2/am.jpg").exists());

        // The highlight links into the suffixed directory, not the first one
        let index = std::fs::read_to_string(out.path().join("index.html")).unwrap();
        assert!(index.contains("2024-05-01-2/am.jpg"));
        assert!(index.contains(r#"href="2024-05-01-2/""#));
    }

    // =========================================================================
    // Cache manifest pruning
    // =========================================================================

    #[test]
    fn manifest_drops_pictures_removed_from_trip() {
        let tmp = trip_fixture();
        let out = tempfile::TempDir::new().unwrap();
        let cache = tempfile::TempDir::new().unwrap();

        let trip = crate::parse::parse_folder(tmp.path()).unwrap();
        generate_website(&trip, out.path(), cache.path()).unwrap();
        let warm = CopyCache::load(cache.path());
        assert!(warm.entries.contains_key("2024-05-01/sunset.jpg"));

        std::fs::remove_file(tmp.path().join("2024-05-01-reykjavik/sunset.jpg")).unwrap();
        let trip = crate::parse::parse_folder(tmp.path()).unwrap();
        generate_website(&trip, out.path(), cache.path()).unwrap();

        let pruned = CopyCache::load(cache.path());
        assert!(!pruned.entries.contains_key("2024-05-01/sunset.jpg"));
        assert_eq!(pruned.entries.len(), 2);
    }

    // =========================================================================
    // Full generation against the shared fixture
    // =========================================================================

    #[test]
    fn generate_writes_pages_pictures_and_manifest() {
        let tmp = trip_fixture();
        let trip = crate::parse::parse_folder(tmp.path()).unwrap();

        let out = tempfile::TempDir::new().unwrap();
        let cache = tempfile::TempDir::new().unwrap();
        let report = generate_website(&trip, out.path(), cache.path()).unwrap();

        assert_eq!(report.pages, 1 + trip.trip_days.len());
        assert!(out.path().join("index.html").exists());
        assert!(out.path().join("trip.json").exists());
        assert!(out.path().join("2024-05-01/index.html").exists());
        assert!(out.path().join("2024-05-01/harbour.jpg").exists());
    }

    #[test]
    fn second_run_hits_cache_for_every_picture() {
        let tmp = trip_fixture();
        let trip = crate::parse::parse_folder(tmp.path()).unwrap();

        let out = tempfile::TempDir::new().unwrap();
        let cache = tempfile::TempDir::new().unwrap();

        let first = generate_website(&trip, out.path(), cache.path()).unwrap();
        assert_eq!(first.pictures.hits, 0);
        assert!(first.pictures.copies > 0);

        let second = generate_website(&trip, out.path(), cache.path()).unwrap();
        assert_eq!(second.pictures.copies, 0);
        assert_eq!(second.pictures.hits, first.pictures.copies);
    }

    #[test]
    fn trip_json_includes_privacy_zones() {
        let tmp = trip_fixture();
        let trip = crate::parse::parse_folder(tmp.path()).unwrap();

        let out = tempfile::TempDir::new().unwrap();
        let cache = tempfile::TempDir::new().unwrap();
        generate_website(&trip, out.path(), cache.path()).unwrap();

        let manifest = std::fs::read_to_string(out.path().join("trip.json")).unwrap();
        assert!(manifest.contains("privacy_zones"));
        assert!(manifest.contains("home"));
    }
}
