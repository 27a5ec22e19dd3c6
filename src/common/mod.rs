//! Common infrastructure modules shared across the charts
//!
//! This module provides reusable infrastructure for:
//! - Data structures for test results
//! - Plotting per-profile bar chart figures
//! - Run summary tables
//! - Opening charts in the system viewer

pub mod data_structures;
pub mod plots;
pub mod summary;
pub mod viewer;

// Re-export commonly used items
pub use data_structures::{QualityLevel, ResultsDocument, TestReport};
pub use plots::PlotError;
