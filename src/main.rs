use clap::Parser;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;
use travel_log::{output, parse, site};

#[derive(Parser)]
#[command(name = "travel-log")]
#[command(about = "Static site generator for travel trip logs")]
#[command(long_about = "\
Static site generator for travel trip logs

Your filesystem is the data source. The trip folder holds trip.yaml plus one
subfolder per day; each day folder carries optional YAML metadata and the
day's pictures.

Trip structure:

  trip/
  ├── trip.yaml                    # title, summary, privacy_zones
  ├── 2024-05-01-reykjavik/        # one folder per day
  │   ├── day.yaml                 # metadata: title, summary, highlights
  │   ├── harbour.jpg
  │   └── sunset.jpg
  └── 2024-05-02-golden-circle/    # date from folder name when day.yaml
      └── geysir.jpg               # has no date key

Hidden folders and plain files at the trip root are skipped. Days and
highlights are ordered by date in the generated site.")]
#[command(version)]
struct Cli {
    /// The folder with your trip assets
    #[arg(long)]
    input_folder: PathBuf,

    /// The folder where the website will be generated
    #[arg(long, default_value = "../../output/website/")]
    output_folder: PathBuf,
}

/// Directory for the picture copy cache, fixed relative to the executable.
const CACHE_FOLDER: &str = "../../output/.cache";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let trip = parse::parse_folder(&cli.input_folder)?;
    output::print_trip_summary(&trip);

    let exe_dir = executable_dir()?;
    let output_path = resolve_against(&exe_dir, &cli.output_folder);
    let cache_path = resolve_against(&exe_dir, Path::new(CACHE_FOLDER));

    info!(output = %output_path.display(), "Generating website");
    let report = site::generate_website(&trip, &output_path, &cache_path)?;
    println!();
    println!("Generated {} pages into {}", report.pages, output_path.display());
    println!("Pictures: {}", report.pictures);

    Ok(())
}

/// Directory containing the running executable.
fn executable_dir() -> std::io::Result<PathBuf> {
    let exe = std::env::current_exe()?;
    Ok(exe
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(".")))
}

/// Resolve a possibly-relative path against a base directory.
///
/// Absolute paths pass through untouched; relative ones are anchored at the
/// executable's directory so the default output layout lands in the same
/// place regardless of the current working directory.
fn resolve_against(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}
