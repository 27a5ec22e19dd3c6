//! Chart catalog and per-file rendering driver
//!
//! Each results file yields nine figures: the join time chart, one bitrate chart and
//! one buffer level chart per playback checkpoint (start, 2s, 12s, 22s).

use super::constants::{BUFFER_LEVEL_Y_MAX, BUFFER_MS_DIVISOR, KBPS_DIVISOR, UNSCALED};
use super::extraction::{extract_series, ExtractionError, FieldPath};
use super::qualities::{LadderError, QualityLadder};
use crate::common::plots::{create_quality_figure, create_timing_figure, AxisLimits, FigureText};
use crate::common::{PlotError, TestReport};
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while producing the charts for one results file
#[derive(Error, Debug)]
pub enum ChartError {
    #[error("Failed to extract data for '{title}': {source}")]
    Extraction {
        title: &'static str,
        source: ExtractionError,
    },

    #[error("Invalid quality ladder: {0}")]
    Ladder(#[from] LadderError),

    #[error("Failed to render '{title}': {source}")]
    Plot {
        title: &'static str,
        source: PlotError,
    },

    #[error("Failed to inspect written chart: {0}")]
    FileStat(#[from] std::io::Error),
}

type Result<T> = core::result::Result<T, ChartError>;

/// How a chart's Y-axis is laid out
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ChartKind {
    /// Log-scaled bitrate axis ticked at the quality ladder rungs
    Quality,
    /// Linear axis; per-panel limits in panel order, [`None`] to auto-scale
    Timing { limits: [AxisLimits; 4] },
}

/// Everything needed to render one figure
#[derive(Debug, Clone, Copy)]
pub struct ChartSpec {
    pub title: &'static str,
    pub y_label: &'static str,
    pub path: FieldPath,
    /// Raw values are divided by this before plotting
    pub divisor: f64,
    pub kind: ChartKind,
    pub show_mean: bool,
}

const BITRATE_LABEL: &str = "Bitrate (kbps)";
const BUFFER_LABEL: &str = "Buffer filled quantity (ms)";
const BUFFER_LIMITS: [AxisLimits; 4] = [Some((0.0, BUFFER_LEVEL_Y_MAX)); 4];

const fn bitrate_chart(title: &'static str, state: &'static str) -> ChartSpec {
    ChartSpec {
        title,
        y_label: BITRATE_LABEL,
        path: FieldPath::nested(state, "currentBitrate"),
        divisor: KBPS_DIVISOR,
        kind: ChartKind::Quality,
        show_mean: false,
    }
}

const fn buffer_chart(title: &'static str, state: &'static str) -> ChartSpec {
    ChartSpec {
        title,
        y_label: BUFFER_LABEL,
        path: FieldPath::nested(state, "videoBufferLength"),
        divisor: BUFFER_MS_DIVISOR,
        kind: ChartKind::Timing {
            limits: BUFFER_LIMITS,
        },
        show_mean: true,
    }
}

/// The figures rendered for every results file, in rendering order
pub const CHARTS: [ChartSpec; 9] = [
    ChartSpec {
        title: "Join times",
        y_label: "Join time (s)",
        path: FieldPath::top("joinTime"),
        divisor: UNSCALED,
        kind: ChartKind::Timing {
            limits: [None; 4],
        },
        show_mean: true,
    },
    bitrate_chart("Starting bitrate", "states02s"),
    bitrate_chart("Bitrates after 2s playback", "states2s"),
    bitrate_chart("Bitrates after 12s playback", "states12s"),
    bitrate_chart("Bitrates after 22s playback", "states22s"),
    buffer_chart("Starting buffer level", "states02s"),
    buffer_chart("Buffer level after 2s playback", "states2s"),
    buffer_chart("Buffer level after 12s playback", "states12s"),
    buffer_chart("Buffer level after 22s playback", "states22s"),
];

/// A figure that has been saved to disk
#[derive(Debug, Clone)]
pub struct WrittenChart {
    pub title: &'static str,
    pub path: PathBuf,
    pub size_bytes: u64,
}

/// Name of the directory a results file's charts are written to
///
/// This is the file name up to its first `.`, so `runs/2021-05-04.json` and
/// `runs/2021-05-04.json.zst` both map to `2021-05-04`.
pub fn destination_name(input: &Path) -> String {
    input
        .file_name()
        .map(|name| name.to_string_lossy())
        .and_then(|name| name.split('.').next().map(str::to_string))
        .unwrap_or_default()
}

/// Renders every chart in [`CHARTS`] for one results file
///
/// # Arguments
/// * `report` - The parsed test results
/// * `output_dir` - Directory the PNG files are written to (created if missing)
///
/// # Returns
/// * `Ok(Vec<WrittenChart>)` - The written charts, in rendering order
/// * `Err(ChartError)` - On the first chart that could not be produced
pub fn generate_network_plots(report: &TestReport, output_dir: &Path) -> Result<Vec<WrittenChart>> {
    let ladder = QualityLadder::from_levels(&report.available_qualities)?;

    let progress = ProgressBar::new(CHARTS.len() as u64);
    progress.set_style(
        ProgressStyle::with_template("   {spinner} [{bar:30}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> "),
    );

    let mut written = Vec::with_capacity(CHARTS.len());
    for spec in &CHARTS {
        progress.set_message(spec.title);
        let path = render_chart(report, &ladder, spec, output_dir)?;
        let size_bytes = fs::metadata(&path)?.len();

        written.push(WrittenChart {
            title: spec.title,
            path,
            size_bytes,
        });
        progress.inc(1);
    }

    progress.finish_and_clear();
    Ok(written)
}

/// Extracts and renders a single chart
pub fn render_chart(
    report: &TestReport,
    ladder: &QualityLadder,
    spec: &ChartSpec,
    output_dir: &Path,
) -> Result<PathBuf> {
    let series =
        extract_series(report, spec.path, spec.divisor).map_err(|source| ChartError::Extraction {
            title: spec.title,
            source,
        })?;

    let text = FigureText {
        title: spec.title,
        y_label: spec.y_label,
    };

    let rendered = match &spec.kind {
        ChartKind::Quality => {
            create_quality_figure(&series, text, ladder, spec.show_mean, output_dir)
        }
        ChartKind::Timing { limits } => {
            create_timing_figure(&series, text, limits, spec.show_mean, output_dir)
        }
    };

    rendered.map_err(|source| ChartError::Plot {
        title: spec.title,
        source,
    })
}
