//! Plotting infrastructure for per-profile bar charts
//!
//! Every figure is a 2x2 grid with one panel per network profile, rendered with the
//! [`plotters`] bitmap backend and saved as a square PNG.
//!
//! Two panel variants exist:
//! - Quality panels plot bitrates on a logarithmic axis bounded by the bitrate ladder,
//!   with one tick per rung labeled by its quality id.
//! - Timing panels plot durations and buffer levels on a linear axis, with optional
//!   fixed limits per panel.

use crate::analysis::constants::{
    AUTO_SCALE_HEADROOM, AXIS_TITLE_FONT_PX, BAR_WIDTH, FIGURE_SIZE_PX, FIGURE_TITLE_FONT_PX,
    PANEL_TITLE_FONT_PX, TEST_NUMBER_LABEL, TICK_LABEL_FONT_PX,
};
use crate::analysis::extraction::mean;
use crate::analysis::profiles::{NetworkProfile, ProfileSeries};
use crate::analysis::qualities::QualityLadder;
use plotters::coord::Shift;
use plotters::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur during plot generation
#[derive(Error, Debug)]
pub enum PlotError {
    #[error("Failed to create drawing area: {0}")]
    DrawingArea(String),

    #[error("Failed to configure chart: {0}")]
    ChartConfig(String),

    #[error("Failed to draw chart elements: {0}")]
    Drawing(String),

    #[error("Failed to save plot to file: {0}")]
    FileSave(#[from] std::io::Error),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

type Result<T> = core::result::Result<T, PlotError>;

/// Y-axis limits of a single timing panel; [`None`] auto-scales to the data
pub type AxisLimits = Option<(f64, f64)>;

const BAR_COLOR: RGBColor = RGBColor(31, 119, 180);
const MEAN_COLOR: RGBColor = RED;

/// Number of dashes drawn across the width of a panel for the mean line
const MEAN_DASHES: usize = 24;

/// Text shared by all panels of a figure
#[derive(Debug, Clone, Copy)]
pub struct FigureText<'a> {
    /// Figure title; also determines the output file name
    pub title: &'a str,
    /// Label for the Y-axis of every panel
    pub y_label: &'a str,
}

/// File name a figure titled `title` is saved under
///
/// The title is lowercased and spaces are replaced with underscores, so
/// "Bitrates after 2s playback" becomes `bitrates_after_2s_playback_plot.png`.
pub fn chart_file_name(title: &str) -> String {
    format!("{}_plot.png", title.to_lowercase().replace(' ', "_"))
}

/// Renders a 2x2 bitrate figure against the quality ladder and saves it to `output_dir`
///
/// # Arguments
/// * `series` - Bitrates in kbps for each network profile
/// * `text` - Figure title and Y-axis label
/// * `ladder` - Available qualities; sets the log-scaled Y-axis bounds and ticks
/// * `show_mean` - Whether to overlay each panel's mean as a dashed line
/// * `output_dir` - Directory where the PNG file should be saved (created if missing)
///
/// # Returns
/// * `Ok(PathBuf)` - Path of the written PNG
/// * `Err(PlotError)` - If an error occurred during chart generation
pub fn create_quality_figure(
    series: &ProfileSeries,
    text: FigureText<'_>,
    ladder: &QualityLadder,
    show_mean: bool,
    output_dir: &Path,
) -> Result<PathBuf> {
    let bounds = log_axis_bounds(ladder.bounds())?;

    render_figure(text, output_dir, |area, profile| {
        draw_quality_panel(
            area,
            profile,
            series.get(profile),
            text.y_label,
            ladder,
            bounds,
            show_mean,
        )
    })
}

/// Renders a 2x2 timing figure and saves it to `output_dir`
///
/// # Arguments
/// * `series` - Samples for each network profile
/// * `text` - Figure title and Y-axis label
/// * `limits` - Y-axis limits per panel, in panel order; [`None`] auto-scales
/// * `show_mean` - Whether to overlay each panel's mean as a dashed line
/// * `output_dir` - Directory where the PNG file should be saved (created if missing)
///
/// # Returns
/// * `Ok(PathBuf)` - Path of the written PNG
/// * `Err(PlotError)` - If an error occurred during chart generation
pub fn create_timing_figure(
    series: &ProfileSeries,
    text: FigureText<'_>,
    limits: &[AxisLimits; 4],
    show_mean: bool,
    output_dir: &Path,
) -> Result<PathBuf> {
    for (lower, upper) in limits.iter().flatten() {
        if !(lower < upper) {
            return Err(PlotError::InvalidData(format!(
                "Axis limits [{}, {}] are empty",
                lower, upper
            )));
        }
    }

    render_figure(text, output_dir, |area, profile| {
        let samples = series.get(profile);
        let range = limits[profile.panel_index()].unwrap_or_else(|| auto_limits(samples));
        draw_timing_panel(area, profile, samples, text.y_label, range, show_mean)
    })
}

/// Sets up the square canvas with a figure title, splits it into the 2x2 grid, and lets
/// `draw_panel` fill in each profile's panel.
fn render_figure<F>(text: FigureText<'_>, output_dir: &Path, mut draw_panel: F) -> Result<PathBuf>
where
    F: FnMut(&DrawingArea<BitMapBackend<'_>, Shift>, NetworkProfile) -> Result<()>,
{
    fs::create_dir_all(output_dir)?;
    let output_path = output_dir.join(chart_file_name(text.title));

    // The backend borrows the path until it is dropped.
    {
        let root = BitMapBackend::new(&output_path, (FIGURE_SIZE_PX, FIGURE_SIZE_PX));
        let drawing_area = root.into_drawing_area();

        drawing_area
            .fill(&WHITE)
            .map_err(|e| PlotError::DrawingArea(e.to_string()))?;

        let body = drawing_area
            .titled(text.title, ("sans-serif", FIGURE_TITLE_FONT_PX))
            .map_err(|e| PlotError::DrawingArea(e.to_string()))?;

        let panels = body.split_evenly((2, 2));
        for profile in NetworkProfile::ALL {
            draw_panel(&panels[profile.panel_index()], profile)?;
        }

        // Ensure everything is properly rendered and saved
        drawing_area
            .present()
            .map_err(|e| PlotError::Drawing(e.to_string()))?;
    }

    Ok(output_path)
}

fn draw_quality_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    profile: NetworkProfile,
    samples: &[f64],
    y_label: &str,
    ladder: &QualityLadder,
    (y_min, y_max): (f64, f64),
    show_mean: bool,
) -> Result<()> {
    let mut chart = ChartBuilder::on(area)
        .caption(profile.panel_title(), ("sans-serif", PANEL_TITLE_FONT_PX))
        .margin(30)
        .x_label_area_size(120)
        .y_label_area_size(170)
        .build_cartesian_2d(
            test_number_range(samples.len()),
            (y_min..y_max)
                .log_scale()
                .with_key_points(ladder.tick_values()),
        )
        .map_err(|e| PlotError::ChartConfig(e.to_string()))?;

    let x_formatter = |x: &f64| format!("{:.0}", x);
    let y_formatter = |y: &f64| ladder.label_for(*y);

    chart
        .configure_mesh()
        .disable_x_mesh()
        .light_line_style(TRANSPARENT)
        .x_labels(samples.len())
        .y_labels(ladder.ticks().len())
        .x_label_formatter(&x_formatter)
        .y_label_formatter(&y_formatter)
        .x_desc(TEST_NUMBER_LABEL)
        .y_desc(y_label)
        .axis_desc_style(("sans-serif", AXIS_TITLE_FONT_PX))
        .label_style(("sans-serif", TICK_LABEL_FONT_PX))
        .draw()
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    // Bars on a log axis grow from the lower bound.
    draw_samples(&mut chart, samples, y_min, (y_min, y_max), show_mean)
}

fn draw_timing_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    profile: NetworkProfile,
    samples: &[f64],
    y_label: &str,
    (y_min, y_max): (f64, f64),
    show_mean: bool,
) -> Result<()> {
    let mut chart = ChartBuilder::on(area)
        .caption(profile.panel_title(), ("sans-serif", PANEL_TITLE_FONT_PX))
        .margin(30)
        .x_label_area_size(120)
        .y_label_area_size(170)
        .build_cartesian_2d(
            test_number_range(samples.len()),
            y_min..y_max,
        )
        .map_err(|e| PlotError::ChartConfig(e.to_string()))?;

    let x_formatter = |x: &f64| format!("{:.0}", x);

    chart
        .configure_mesh()
        .disable_x_mesh()
        .light_line_style(TRANSPARENT)
        .x_labels(samples.len())
        .y_labels(10)
        .x_label_formatter(&x_formatter)
        .x_desc(TEST_NUMBER_LABEL)
        .y_desc(y_label)
        .axis_desc_style(("sans-serif", AXIS_TITLE_FONT_PX))
        .label_style(("sans-serif", TICK_LABEL_FONT_PX))
        .draw()
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    let baseline = 0.0_f64.clamp(y_min, y_max);
    draw_samples(&mut chart, samples, baseline, (y_min, y_max), show_mean)
}

/// Draws one bar per sample and, if requested, the dashed mean line with its legend
fn draw_samples<'a, DB, X, Y>(
    chart: &mut ChartContext<'a, DB, Cartesian2d<X, Y>>,
    samples: &[f64],
    baseline: f64,
    (y_min, y_max): (f64, f64),
    show_mean: bool,
) -> Result<()>
where
    DB: DrawingBackend + 'a,
    X: Ranged<ValueType = f64>,
    Y: Ranged<ValueType = f64>,
{
    chart
        .draw_series(bar_extents(samples, baseline, (y_min, y_max)).map(
            |(x_left, x_right, top)| {
                Rectangle::new([(x_left, baseline), (x_right, top)], BAR_COLOR.filled())
            },
        ))
        .map_err(|e| PlotError::Drawing(e.to_string()))?
        .label("Data")
        .legend(|(x, y)| Rectangle::new([(x, y - 15), (x + 40, y + 15)], BAR_COLOR.filled()));

    let Some(average) = mean(samples).filter(|_| show_mean) else {
        return Ok(());
    };

    let level = average.clamp(y_min, y_max);
    let x_range = test_number_range(samples.len());
    chart
        .draw_series(
            dash_segments(x_range.start, x_range.end, MEAN_DASHES).map(|(start, end)| {
                PathElement::new(vec![(start, level), (end, level)], MEAN_COLOR.stroke_width(4))
            }),
        )
        .map_err(|e| PlotError::Drawing(e.to_string()))?
        .label("Mean")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 40, y)], MEAN_COLOR.stroke_width(4)));

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .label_font(("sans-serif", TICK_LABEL_FONT_PX))
        .draw()
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    Ok(())
}

/// X-axis range holding `count` bars centered on test numbers 1..=count
///
/// With at most `count` labels requested, the axis places its ticks on the test numbers.
fn test_number_range(count: usize) -> std::ops::Range<f64> {
    0.5..count.max(1) as f64 + 0.5
}

/// Horizontal extents and clamped heights of each bar: `(left, right, top)`
fn bar_extents(
    samples: &[f64],
    baseline: f64,
    (y_min, y_max): (f64, f64),
) -> impl Iterator<Item = (f64, f64, f64)> + '_ {
    samples.iter().enumerate().filter_map(move |(index, &value)| {
        let top = value.clamp(y_min, y_max);
        if top == baseline {
            return None;
        }

        let center = (index + 1) as f64;
        Some((center - BAR_WIDTH / 2.0, center + BAR_WIDTH / 2.0, top))
    })
}

/// Splits `[start, end]` into `dashes` evenly spaced segments, each covering 60% of its slot
fn dash_segments(start: f64, end: f64, dashes: usize) -> impl Iterator<Item = (f64, f64)> {
    let slot = (end - start) / dashes as f64;
    (0..dashes).map(move |index| {
        let from = start + slot * index as f64;
        (from, from + slot * 0.6)
    })
}

/// Y-axis limits for a timing panel without fixed limits
fn auto_limits(samples: &[f64]) -> (f64, f64) {
    let lowest = samples.iter().copied().fold(0.0, f64::min);
    let highest = samples.iter().copied().fold(0.0, f64::max) * AUTO_SCALE_HEADROOM;
    let highest = highest.min(f64::MAX);

    if highest > lowest {
        (lowest, highest)
    } else {
        (lowest, lowest + 1.0)
    }
}

/// Log axis limits from the ladder bounds; a single rung is widened by a factor of 2 each way
fn log_axis_bounds((lowest, highest): (f64, f64)) -> Result<(f64, f64)> {
    if !(lowest > 0.0) {
        return Err(PlotError::InvalidData(format!(
            "Log axis lower bound {} must be positive",
            lowest
        )));
    }

    if lowest < highest {
        Ok((lowest, highest))
    } else {
        Ok((lowest / 2.0, highest * 2.0))
    }
}
