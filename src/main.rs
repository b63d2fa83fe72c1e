use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use tilecheck::checker::{check, CheckOutcome};
use tilecheck::errors::CheckError;
use tilecheck::storage;

/// Tile inventory checker: does a set of letter tiles spell a phrase?
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// The phrase to spell (e.g., "HELLO WORLD")
    phrase: String,

    /// Tile inventory spec: space-separated tokens, each `value` or
    /// `value:count` (escape a literal colon as `\:`)
    #[arg(short, long)]
    tiles: Option<String>,

    /// Read the inventory spec from a file instead
    #[arg(short = 'f', long, conflicts_with = "tiles")]
    tiles_file: Option<PathBuf>,

    /// Number of rows available
    #[arg(short, long, default_value_t = 4)]
    rows: usize,

    /// Maximum characters per row
    #[arg(short, long, default_value_t = 12)]
    width: usize,

    /// Also report leftover tiles on success
    #[arg(short, long)]
    leftover: bool,

    /// Remember this inventory for the next run
    #[arg(long)]
    save: bool,

    /// Do not fall back to the remembered inventory when --tiles is absent
    #[arg(long)]
    no_load: bool,
}

/// Entry point of the tilecheck CLI.
///
/// Delegates to [`try_main`], catching any errors and printing them
/// in a user-friendly way before exiting with code 1.
fn main() -> ExitCode {
    // Set up logging
    let debug_enabled = std::env::var("TILECHECK_DEBUG").is_ok();
    tilecheck::log::init_logger(debug_enabled);

    log::debug!("tilecheck {} ({})", env!("CARGO_PKG_VERSION"), env!("GIT_HASH"));

    match try_main() {
        Ok(satisfied) => {
            if satisfied {
                ExitCode::SUCCESS
            } else {
                // Row overflow / insufficient tiles: nonzero so scripts can branch
                ExitCode::FAILURE
            }
        }
        Err(e) => {
            // Print the error message to stderr, with detailed formatting if it's a CheckError
            if let Some(check_err) = e.downcast_ref::<CheckError>() {
                eprintln!("Error: {}", check_err.display_detailed());
            } else {
                eprintln!("Error: {e}");
            }
            ExitCode::FAILURE
        }
    }
}

/// Core application logic for the tilecheck CLI.
///
/// Steps:
/// 1. Parse CLI arguments with Clap.
/// 2. Resolve the inventory spec (flag, file, or remembered text).
/// 3. Run the check.
/// 4. Render the outcome on stdout; persist the inventory if asked.
///
/// Returns whether the phrase was satisfiable, or an error (invalid
/// configuration, unreadable tiles file) which bubbles up to [`main`].
fn try_main() -> Result<bool, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let inventory = resolve_inventory(&cli)?;

    let t_check = std::time::Instant::now();
    let outcome = check(&inventory, &cli.phrase, cli.width, cli.rows, cli.leftover)?;
    let check_secs = t_check.elapsed().as_secs_f64();

    let satisfied = render_outcome(&outcome);

    if cli.save {
        let path = storage::default_store_path();
        if storage::save_inventory(&path, &inventory) {
            eprintln!("Inventory remembered at {}", path.display());
        }
    }

    eprintln!("Checked in {check_secs:.3}s.");

    Ok(satisfied)
}

/// Pick the inventory text: `--tiles`, then `--tiles-file`, then the
/// remembered inventory (unless `--no-load`), then empty.
fn resolve_inventory(cli: &Cli) -> Result<String, Box<dyn std::error::Error>> {
    if let Some(spec) = &cli.tiles {
        return Ok(spec.clone());
    }
    if let Some(path) = &cli.tiles_file {
        return Ok(std::fs::read_to_string(path).map_err(|e| {
            std::io::Error::new(
                e.kind(),
                format!("failed to read tiles from '{}': {e}", path.display()),
            )
        })?);
    }
    if !cli.no_load {
        if let Some(saved) = storage::load_inventory(&storage::default_store_path()) {
            log::info!("Using remembered inventory");
            return Ok(saved);
        }
    }
    Ok(String::new())
}

/// Print the outcome. Returns true when the phrase is spellable.
fn render_outcome(outcome: &CheckOutcome) -> bool {
    match outcome {
        CheckOutcome::RowOverflow { required_rows, available_rows, rows } => {
            println!(
                "FAILURE: not enough rows — phrase needs {required_rows} rows but only {available_rows} available."
            );
            print_rows(rows);
            false
        }
        CheckOutcome::Unsatisfiable { rows, missing } => {
            println!("FAILURE: tiles are insufficient to construct the phrase.");
            print_rows(rows);
            println!("Missing characters:");
            for (label, count) in missing.iter() {
                println!("  {label}: {count}");
            }
            false
        }
        CheckOutcome::Satisfied { rows, needed, leftover, .. } => {
            println!("SUCCESS: phrase can be constructed.");
            println!("Tiles needed:");
            if needed.is_empty() {
                println!("  none");
            }
            for (label, count) in needed.iter() {
                println!("  {label}: {count}");
            }
            print_rows(rows);
            if let Some(leftover) = leftover {
                println!("Leftover tiles: {} remaining", leftover.total);
                for (label, count) in leftover.by_label.iter() {
                    println!("  {label}: {count}");
                }
            }
            true
        }
    }
}

fn print_rows(rows: &[String]) {
    for (i, row) in rows.iter().enumerate() {
        println!("Row {}: {row}", i + 1);
    }
}
