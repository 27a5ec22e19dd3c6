mod analysis;
mod common;
mod parsing;

use argh::FromArgs;
use std::path::{Path, PathBuf};
use thiserror::Error;

// Import chart generation
use analysis::charts::{ChartError, CHARTS};
use analysis::constants::DEFAULT_OUTPUT_DIR;
use analysis::{destination_name, generate_network_plots};

// Import reporting helpers
use common::summary::{format_chart_table, ChartEntry};
use common::viewer::open_in_viewer;

// Import parsing functionality
use parsing::parse_results;

/// Plot network specs graphs.
#[derive(FromArgs, Debug)]
pub struct Args {
    /// filename(s) of the result json file(s); `.json.zst` files are decompressed
    #[argh(positional)]
    files: Vec<PathBuf>,

    /// open each written chart in the system image viewer
    #[argh(switch)]
    show: bool,

    /// root directory for the charts (default: plots)
    #[argh(option, short = 'o', default = "PathBuf::from(DEFAULT_OUTPUT_DIR)")]
    output_dir: PathBuf,
}

/// Errors that can occur while plotting
#[derive(Error, Debug)]
pub enum AppError {
    #[error("No results files given")]
    NoInput,

    #[error("Parsing error in {}: {source}", .file.display())]
    Parsing {
        file: PathBuf,
        source: parsing::ParsingError,
    },

    #[error("Chart error in {}: {source}", .file.display())]
    Chart { file: PathBuf, source: ChartError },
}

type Result<T> = core::result::Result<T, AppError>;

fn main() -> Result<()> {
    let args: Args = argh::from_env();
    run(&args)
}

/// Plots every results file named on the command line, stopping at the first failure
fn run(args: &Args) -> Result<()> {
    if args.files.is_empty() {
        return Err(AppError::NoInput);
    }

    println!(
        "Plotting {} results file(s) into {}",
        args.files.len(),
        args.output_dir.display()
    );

    for input in &args.files {
        plot_results_file(input, args)?;
    }

    println!("\n🎉 All charts written!");
    Ok(())
}

/// Parses one results file, renders its charts, and optionally shows them
fn plot_results_file(input: &Path, args: &Args) -> Result<()> {
    println!("\n📂 Loading: {}", input.display());
    let document = parse_results(input).map_err(|source| AppError::Parsing {
        file: input.to_path_buf(),
        source,
    })?;

    let report = &document.message;
    println!(
        "   🔎 {} qualities, {} network profiles",
        report.available_qualities.len(),
        report.datas.len()
    );

    let destination = args.output_dir.join(destination_name(input));
    println!(
        "   📊 Rendering {} charts into {}",
        CHARTS.len(),
        destination.display()
    );

    let written = generate_network_plots(report, &destination).map_err(|source| AppError::Chart {
        file: input.to_path_buf(),
        source,
    })?;
    println!("   ✅ Wrote {} charts", written.len());

    let entries: Vec<ChartEntry> = written
        .iter()
        .map(|chart| ChartEntry::new(chart.title, &chart.path, chart.size_bytes))
        .collect();
    let heading = input.display().to_string();
    println!("\n{}", format_chart_table(&entries, Some(&heading)));

    if args.show {
        for chart in &written {
            // A missing viewer shouldn't lose the remaining files.
            if let Err(e) = open_in_viewer(&chart.path) {
                eprintln!(
                    "   ⚠️  Warning: Failed to show {}: {}",
                    chart.path.display(),
                    e
                );
            }
        }
    }

    Ok(())
}
