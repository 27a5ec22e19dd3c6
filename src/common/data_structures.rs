use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// A single rung of the encoding ladder offered by the stream
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualityLevel {
    /// Identifier of the rendition, as reported by the player (number or string)
    pub id: Value,
    /// Encoded bitrate in bits per second
    pub bitrate: f64,
}

/// Results of a complete test campaign
#[derive(Debug, Serialize, Deserialize)]
pub struct TestReport {
    /// The bitrate ladder available to the player during the tests
    pub available_qualities: Vec<QualityLevel>,
    /// Test entries grouped by network profile key (e.g. `SLOW_3G`)
    ///
    /// Entries are kept as raw JSON; fields are looked up by path at extraction time.
    pub datas: BTreeMap<String, Vec<Value>>,
}

/// Top level structure of a results file
#[derive(Debug, Serialize, Deserialize)]
pub struct ResultsDocument {
    pub message: TestReport,
}
