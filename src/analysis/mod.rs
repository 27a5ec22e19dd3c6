//! Domain-specific analysis modules
//!
//! This module contains the streaming test logic for:
//! - Network profiles and per-profile sample series
//! - Metric extraction and unit scaling
//! - The quality ladder
//! - The chart catalog and rendering driver

pub mod charts;
pub mod constants;
pub mod extraction;
pub mod profiles;
pub mod qualities;

// Re-export the driver for convenience
pub use charts::{destination_name, generate_network_plots};
