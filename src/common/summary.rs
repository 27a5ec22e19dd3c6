//! Run summary formatting
//!
//! This module provides the table printed after each results file has been plotted:
//! - [`ChartEntry`] type for one written chart with its title, path, and file size
//! - ASCII table formatting using the [`tabled`] crate

use bytesize::ByteSize;
use std::path::Path;
use tabled::{Table, Tabled};

/// Represents a single chart written to disk
#[derive(Debug, Clone, Tabled)]
pub struct ChartEntry {
    #[tabled(rename = "Chart")]
    pub title: String,
    #[tabled(rename = "Path")]
    pub path: String,
    /// Human-readable PNG size (e.g. "182.4 KiB")
    #[tabled(rename = "Size")]
    pub size: String,
}

impl ChartEntry {
    /// Creates a new chart entry with a formatted file size
    pub fn new(title: &str, path: &Path, size_bytes: u64) -> Self {
        Self {
            title: title.to_string(),
            path: path.display().to_string(),
            size: ByteSize::b(size_bytes).to_string(),
        }
    }
}

/// Formats chart entries as an ASCII table using the [`tabled`] crate
///
/// # Arguments
/// * `entries` - A slice of [`ChartEntry`] to format
/// * `title` - Optional title for the table
///
/// # Returns
/// A formatted ASCII table as a [`String`]
pub fn format_chart_table(entries: &[ChartEntry], title: Option<&str>) -> String {
    if entries.is_empty() {
        return "No charts written".to_string();
    }

    let table = Table::new(entries).to_string();

    if let Some(title) = title {
        format!("{}\n{}\n{}", title, "=".repeat(title.len()), table)
    } else {
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chart_entry_new() {
        let entry = ChartEntry::new(
            "Join times",
            Path::new("plots/run/join_times_plot.png"),
            2048,
        );
        assert_eq!(entry.title, "Join times");
        assert_eq!(entry.path, "plots/run/join_times_plot.png");
        assert_eq!(entry.size, ByteSize::b(2048).to_string());
    }

    #[test]
    fn test_format_chart_table() {
        let entries = vec![
            ChartEntry::new("Join times", Path::new("a/join_times_plot.png"), 10),
            ChartEntry::new("Starting bitrate", Path::new("a/starting_bitrate_plot.png"), 20),
        ];

        let table = format_chart_table(&entries, Some("run"));
        assert!(table.starts_with("run\n===\n"));
        assert!(table.contains("Chart"));
        assert!(table.contains("Path"));
        assert!(table.contains("Size"));
        assert!(table.contains("starting_bitrate_plot.png"));

        let table_no_title = format_chart_table(&entries, None);
        assert!(!table_no_title.starts_with("run"));
        assert!(table_no_title.contains("Join times"));
    }

    #[test]
    fn test_format_empty_table() {
        assert_eq!(format_chart_table(&[], None), "No charts written");
    }
}
