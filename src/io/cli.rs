//! Command-line interface for the asset preparation utilities

use crate::cards::catalog::{expected_file_names, load_catalog};
use crate::cards::cleanup::{delete_images, plan_cleanup};
use crate::cards::fetch::{FetchConfig, fetch_card_images};
use crate::configs::rogues::{PatchSummary, patch_faces, patch_walking_sprites};
use crate::edges::connections::{AnalysisConfig, analyze_sheet};
use crate::edges::tilemap::project_tile_map;
use crate::io::configuration::{
    CLEANUP_MISSING_DETAIL_LIMIT, CLEANUP_PREVIEW_LIMIT, CARD_RESIZE_WIDTH,
    DEFAULT_BAND_HALF_WIDTH, DEFAULT_EDGE_TYPE_THRESHOLD, DEFAULT_MIN_EDGE_LENGTH,
    DEFAULT_SHEET_COLS, DEFAULT_SHEET_ROWS, DEFAULT_SHEET_TOTAL_ROWS, DEFAULT_SIMILARITY_FLOOR,
    MAX_DOWNLOAD_WORKERS,
};
use crate::io::error::{Result, fs_error, invalid_parameter};
use crate::io::progress::DownloadProgress;
use crate::io::report::{render_report, write_tile_map_json};
use crate::sheet::grid::SpriteSheet;
use crate::sheet::regions::{detect_regions, name_regions_interactive};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Command-line arguments for the asset preparation tool
#[derive(Parser)]
#[command(name = "spriteprep")]
#[command(
    author,
    version,
    about = "Offline asset preparation utilities for sprite sheets and card art"
)]
pub struct Cli {
    /// Utility to run
    #[command(subcommand)]
    pub command: Command,
}

/// One standalone utility per subcommand
#[derive(Subcommand)]
pub enum Command {
    /// Analyze transition sprite edge connections in a sheet
    Edges(EdgesArgs),
    /// Detect separator-bounded sprite regions in a sheet
    Regions(RegionsArgs),
    /// Download and resize card images listed in a catalog
    Cards(CardsArgs),
    /// Delete card images not listed in a catalog
    Cleanup(CleanupArgs),
    /// Patch rogue configs with derived asset filenames
    Patch(PatchArgs),
}

/// Arguments for the edge connection analyzer
#[derive(Args)]
pub struct EdgesArgs {
    /// Sheet image to analyze
    #[arg(value_name = "SHEET")]
    pub sheet: PathBuf,

    /// Number of sprite columns in the sheet
    #[arg(long, default_value_t = DEFAULT_SHEET_COLS)]
    pub cols: u32,

    /// Number of content rows to analyze
    #[arg(long, default_value_t = DEFAULT_SHEET_ROWS)]
    pub rows: u32,

    /// Total number of rows in the full sheet, for per-sprite height
    #[arg(long, default_value_t = DEFAULT_SHEET_TOTAL_ROWS)]
    pub total_rows: u32,

    /// Half-width of the sampling band around each corner path
    #[arg(long, default_value_t = DEFAULT_BAND_HALF_WIDTH)]
    pub band_width: i64,

    /// Minimum pixel count for an edge to be retained
    #[arg(long, default_value_t = DEFAULT_MIN_EDGE_LENGTH)]
    pub min_length: usize,

    /// Length at or above which an edge counts as full rather than transitional
    #[arg(long, default_value_t = DEFAULT_EDGE_TYPE_THRESHOLD)]
    pub edge_threshold: f64,

    /// Similarity percentage a candidate match must exceed
    #[arg(long, default_value_t = DEFAULT_SIMILARITY_FLOOR)]
    pub similarity_floor: f64,

    /// Show pixel coordinates for edges
    #[arg(long)]
    pub show_pixels: bool,

    /// Write the tile map as JSON to this file instead of printing the report
    #[arg(long, value_name = "FILE")]
    pub output_json: Option<PathBuf>,
}

/// Arguments for separator-bounded region detection
#[derive(Args)]
pub struct RegionsArgs {
    /// Sheet image to scan
    #[arg(value_name = "IMAGE")]
    pub image: PathBuf,

    /// Prompt for a name per rectangle and output a JSON map
    #[arg(short, long)]
    pub interactive: bool,

    /// Output file for the JSON; printed to stdout when omitted
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

/// Arguments for the card image downloader
#[derive(Args)]
pub struct CardsArgs {
    /// Card catalog JSON file
    #[arg(value_name = "CATALOG")]
    pub catalog: PathBuf,

    /// Directory resized images are written to
    #[arg(long, default_value = "assets/art/carddata", value_name = "DIR")]
    pub output_dir: PathBuf,

    /// Number of concurrent download workers
    #[arg(long, default_value_t = MAX_DOWNLOAD_WORKERS)]
    pub workers: usize,

    /// Width images are resized to
    #[arg(long, default_value_t = CARD_RESIZE_WIDTH)]
    pub width: u32,

    /// Download cards even if their resized image exists
    #[arg(short, long)]
    pub no_skip: bool,

    /// Suppress the progress bar
    #[arg(short, long)]
    pub quiet: bool,
}

/// Arguments for orphaned card image cleanup
#[derive(Args)]
pub struct CleanupArgs {
    /// Card catalog JSON file
    #[arg(value_name = "CATALOG")]
    pub catalog: PathBuf,

    /// Directory holding the resized images
    #[arg(long, default_value = "assets/art/carddata", value_name = "DIR")]
    pub image_dir: PathBuf,

    /// Resize width used when the images were downloaded
    #[arg(long, default_value_t = CARD_RESIZE_WIDTH)]
    pub width: u32,

    /// Delete without asking for confirmation
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for rogue config patching
#[derive(Args)]
pub struct PatchArgs {
    /// Directory of rogue .toml configs
    #[arg(long, default_value = "assets/configs/rogues", value_name = "DIR")]
    pub rogues_dir: PathBuf,

    /// Patch face lines, matching images from this directory
    #[arg(long, value_name = "DIR")]
    pub faces_dir: Option<PathBuf>,

    /// Patch walking-sprite lines from the character table
    #[arg(long)]
    pub walking: bool,
}

impl Cli {
    /// Run the selected utility
    ///
    /// # Errors
    ///
    /// Returns an error when the underlying utility fails; per-card download
    /// failures are reported in the summary instead.
    pub fn run(&self) -> Result<()> {
        match &self.command {
            Command::Edges(args) => run_edges(args),
            Command::Regions(args) => run_regions(args),
            Command::Cards(args) => run_cards(args),
            Command::Cleanup(args) => run_cleanup(args),
            Command::Patch(args) => run_patch(args),
        }
    }
}

// Allow print for the report and status output of a terminal tool
#[allow(clippy::print_stdout)]
fn run_edges(args: &EdgesArgs) -> Result<()> {
    if args.cols == 0 {
        return Err(invalid_parameter("cols", &args.cols, &"must be positive"));
    }
    if args.total_rows == 0 {
        return Err(invalid_parameter(
            "total-rows",
            &args.total_rows,
            &"must be positive",
        ));
    }

    println!("Loading sprites from {}...", args.sheet.display());
    let sheet = SpriteSheet::load(&args.sheet, args.cols, args.rows, args.total_rows)?;
    println!(
        "Extracted {} rows x {} cols = {} sprites",
        sheet.rows(),
        sheet.cols(),
        sheet.sprites().len()
    );
    println!();

    let config = AnalysisConfig {
        band_half_width: args.band_width,
        min_edge_length: args.min_length,
        edge_type_threshold: args.edge_threshold,
        similarity_floor: args.similarity_floor,
    };

    println!(
        "Analyzing edge connections (edge threshold: {})...",
        args.edge_threshold
    );
    let analysis = analyze_sheet(&sheet, &config);
    println!();

    if let Some(json_path) = &args.output_json {
        let tile_map = project_tile_map(&analysis, args.edge_threshold);
        write_tile_map_json(&tile_map, json_path)?;
        println!("Tile map written to {}", json_path.display());
    } else {
        print!("{}", render_report(&analysis, args.show_pixels));
    }

    Ok(())
}

// Allow print for JSON and status output of a terminal tool
#[allow(clippy::print_stdout, clippy::print_stderr)]
fn run_regions(args: &RegionsArgs) -> Result<()> {
    let regions = detect_regions(&args.image)?;

    let json = if args.interactive {
        let stdin = std::io::stdin();
        let named = name_regions_interactive(&regions, stdin.lock(), std::io::stderr())?;
        serde_json::to_string_pretty(&named)
    } else {
        serde_json::to_string_pretty(&regions)
    }
    .map_err(|e| fs_error(&args.image, "serialize regions", std::io::Error::other(e)))?;

    if let Some(output) = &args.output {
        std::fs::write(output, &json).map_err(|e| fs_error(output, "write regions", e))?;
        eprintln!("Wrote output to {}", output.display());
    } else {
        println!("{json}");
    }

    Ok(())
}

// Allow print for summary output of a terminal tool
#[allow(clippy::print_stdout)]
fn run_cards(args: &CardsArgs) -> Result<()> {
    let cards = load_catalog(&args.catalog)?;
    println!("Processing {} cards...", cards.len());

    let config = FetchConfig {
        output_dir: args.output_dir.clone(),
        workers: args.workers,
        resize_width: args.width,
        skip_existing: !args.no_skip,
    };

    let progress = (!args.quiet).then(|| DownloadProgress::new(cards.len()));
    let summary = fetch_card_images(&cards, &config, progress.as_ref())?;

    println!(
        "Completed: {} downloaded, {} skipped, {} failed ({} cards total)",
        summary.downloaded,
        summary.skipped,
        summary.failed,
        cards.len()
    );

    Ok(())
}

// Allow print for preview and confirmation prompts of a terminal tool
#[allow(clippy::print_stdout)]
fn run_cleanup(args: &CleanupArgs) -> Result<()> {
    let cards = load_catalog(&args.catalog)?;
    println!("Loaded {} cards from catalog", cards.len());

    let expected = expected_file_names(&cards, args.width);
    println!("Generated {} expected filenames", expected.len());

    let plan = plan_cleanup(&args.image_dir, &expected)?;
    println!("Found {} existing PNG files", plan.existing);

    if plan.orphaned.is_empty() {
        println!("No orphaned files found - all images match the catalog");
        return Ok(());
    }

    println!("\nFound {} orphaned files to delete:", plan.orphaned.len());
    for name in plan.orphaned.iter().take(CLEANUP_PREVIEW_LIMIT) {
        println!("  {name}");
    }
    if plan.orphaned.len() > CLEANUP_PREVIEW_LIMIT {
        println!("  ... and {} more", plan.orphaned.len() - CLEANUP_PREVIEW_LIMIT);
    }

    if !args.yes {
        println!("\nDelete these {} files? (y/N): ", plan.orphaned.len());
        let mut answer = String::new();
        std::io::stdin().read_line(&mut answer)?;
        if !answer.trim().eq_ignore_ascii_case("y") {
            println!("Cancelled");
            return Ok(());
        }
    }

    let outcome = delete_images(&args.image_dir, &plan.orphaned);
    for failure in &outcome.failures {
        println!("Error deleting {failure}");
    }
    println!("\nDeleted {}/{} files", outcome.deleted, plan.orphaned.len());

    if !plan.missing.is_empty() {
        println!(
            "\nNote: {} expected files are missing from disk",
            plan.missing.len()
        );
        if plan.missing.len() <= CLEANUP_MISSING_DETAIL_LIMIT {
            for name in &plan.missing {
                println!("  Missing: {name}");
            }
        }
    }

    Ok(())
}

// Allow print for per-file status output of a terminal tool
#[allow(clippy::print_stdout)]
fn print_patch_summary(pass: &str, summary: &PatchSummary) {
    for name in &summary.updated {
        println!("Updated {name}");
    }
    for name in &summary.skipped {
        println!("Skipping {name} - {pass} lines already exist");
    }
    for name in &summary.missing {
        println!("Error: File {name} does not exist");
    }
    println!("Updated {} files\n", summary.updated.len());
}

fn run_patch(args: &PatchArgs) -> Result<()> {
    if args.faces_dir.is_none() && !args.walking {
        return Err(invalid_parameter(
            "patch",
            &"",
            &"select --faces-dir and/or --walking",
        ));
    }

    if let Some(faces_dir) = &args.faces_dir {
        let summary = patch_faces(&args.rogues_dir, faces_dir)?;
        print_patch_summary("face", &summary);
    }

    if args.walking {
        let summary = patch_walking_sprites(&args.rogues_dir)?;
        print_patch_summary("sprite", &summary);
    }

    Ok(())
}
