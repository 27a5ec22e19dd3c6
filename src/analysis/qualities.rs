//! Bitrate ladder handling for quality charts
//!
//! Quality charts use a logarithmic y-axis bounded by the lowest and highest rung of the
//! ladder, with one tick per rung labeled by the rendition id.

use super::constants::KBPS_DIVISOR;
use crate::common::QualityLevel;
use serde_json::Value;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LadderError {
    #[error("Results list no available qualities")]
    Empty,

    #[error("Quality '{id}' has non-positive bitrate {bitrate}; cannot place it on a log axis")]
    NonPositiveBitrate { id: String, bitrate: f64 },
}

type Result<T> = core::result::Result<T, LadderError>;

/// A single ladder rung, scaled to kbps
#[derive(Debug, Clone, PartialEq)]
pub struct Rung {
    pub kbps: f64,
    pub label: String,
}

/// The available qualities sorted by ascending bitrate
#[derive(Debug, Clone, PartialEq)]
pub struct QualityLadder {
    rungs: Vec<Rung>,
}

impl QualityLadder {
    /// Builds the ladder from the qualities listed in the results
    pub fn from_levels(levels: &[QualityLevel]) -> Result<Self> {
        if levels.is_empty() {
            return Err(LadderError::Empty);
        }

        let mut rungs = Vec::with_capacity(levels.len());
        for level in levels {
            let label = id_label(&level.id);
            if level.bitrate.is_nan() || level.bitrate <= 0.0 {
                return Err(LadderError::NonPositiveBitrate {
                    id: label,
                    bitrate: level.bitrate,
                });
            }

            rungs.push(Rung {
                kbps: level.bitrate / KBPS_DIVISOR,
                label,
            });
        }

        // Stable, so equal bitrates keep their listed order.
        rungs.sort_by(|a, b| a.kbps.total_cmp(&b.kbps));
        Ok(Self { rungs })
    }

    /// Lowest and highest bitrate in kbps; the y-axis limits of quality charts
    pub fn bounds(&self) -> (f64, f64) {
        // `from_levels` guarantees at least one rung.
        let first = self.rungs.first().map_or(0.0, |rung| rung.kbps);
        let last = self.rungs.last().map_or(0.0, |rung| rung.kbps);
        (first, last)
    }

    pub fn ticks(&self) -> &[Rung] {
        &self.rungs
    }

    /// Tick positions in kbps, ascending
    pub fn tick_values(&self) -> Vec<f64> {
        self.rungs.iter().map(|rung| rung.kbps).collect()
    }

    /// Label of the rung sitting at `kbps`, or an empty string between rungs
    pub fn label_for(&self, kbps: f64) -> String {
        self.rungs
            .iter()
            .find(|rung| (rung.kbps - kbps).abs() <= rung.kbps * 1e-9)
            .map(|rung| rung.label.clone())
            .unwrap_or_default()
    }
}

fn id_label(id: &Value) -> String {
    match id {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
