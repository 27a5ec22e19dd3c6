//! Scaling and rendering constants
//!
//! Provides the unit divisors applied to raw player metrics and the fixed
//! figure parameters shared by every chart.

/// Divisor turning bits per second into kilobits per second
pub const KBPS_DIVISOR: f64 = 1000.0;

/// Divisor turning buffer length in seconds into milliseconds
pub const BUFFER_MS_DIVISOR: f64 = 0.001;

/// Join times are plotted as reported
pub const UNSCALED: f64 = 1.0;

/// Upper y-limit for buffer level charts (milliseconds)
pub const BUFFER_LEVEL_Y_MAX: f64 = 10000.0;

/// Figure edge length in pixels (10.5 inches at 300 dpi)
pub const FIGURE_SIZE_PX: u32 = 3150;

/// Figure title font size in pixels (12pt at 300 dpi)
pub const FIGURE_TITLE_FONT_PX: i32 = 50;

/// Panel title font size in pixels (10pt at 300 dpi)
pub const PANEL_TITLE_FONT_PX: i32 = 42;

/// Tick label font size in pixels (9pt at 300 dpi)
pub const TICK_LABEL_FONT_PX: i32 = 38;

/// Axis title font size in pixels
pub const AXIS_TITLE_FONT_PX: i32 = 42;

/// Bar width in x-axis units
pub const BAR_WIDTH: f64 = 0.8;

/// Headroom added above the tallest bar when a timing chart auto-scales
pub const AUTO_SCALE_HEADROOM: f64 = 1.05;

/// Default root directory for rendered charts
pub const DEFAULT_OUTPUT_DIR: &str = "plots";

/// Shared x-axis title
pub const TEST_NUMBER_LABEL: &str = "Test number";
