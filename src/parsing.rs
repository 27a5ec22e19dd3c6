//! File parsing functionality for network test results
//!
//! This module handles loading and parsing results files, either plain `.json`
//! or ZStandard compressed `.json.zst`.

use crate::common::ResultsDocument;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use thiserror::Error;
use zstd::Decoder;

/// Errors that can occur during file parsing
#[derive(Error, Debug)]
pub enum ParsingError {
    #[error("Failed to read input file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("Failed to decompress zstd file: {0}")]
    Decompression(String),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),
}

type Result<T> = core::result::Result<T, ParsingError>;

/// Parse a results file and load the data for plotting
///
/// Files with a `.zst` extension are decompressed on the fly; everything else is
/// read as plain JSON.
///
/// # Arguments
/// * `file_path` - Path to the results file
///
/// # Returns
/// * `Ok(ResultsDocument)` - Successfully parsed results
/// * `Err(ParsingError)` - If file reading, decompression, or JSON parsing failed
pub fn parse_results(file_path: &Path) -> Result<ResultsDocument> {
    let file = File::open(file_path)?;

    if is_zstd_compressed(file_path) {
        let decoder = Decoder::new(file)
            .map_err(|e| ParsingError::Decompression(format!("Failed to create decoder: {}", e)))?;
        return parse_from_reader(decoder);
    }

    parse_from_reader(BufReader::new(file))
}

/// Deserializes a results document from any reader
pub fn parse_from_reader<R: Read>(reader: R) -> Result<ResultsDocument> {
    let results: ResultsDocument = serde_json::from_reader(reader)?;
    Ok(results)
}

fn is_zstd_compressed(file_path: &Path) -> bool {
    file_path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("zst"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;
    use tempfile::TempDir;

    fn sample_document() -> serde_json::Value {
        json!({
            "message": {
                "available_qualities": [
                    {"id": 0, "bitrate": 250000},
                    {"id": 1, "bitrate": 1000000}
                ],
                "datas": {
                    "SLOW_3G": [{"joinTime": 4.2}],
                    "WIFI": [{"joinTime": 0.3}]
                }
            }
        })
    }

    #[test]
    fn parses_plain_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("results.json");
        std::fs::write(&path, sample_document().to_string()).unwrap();

        let document = parse_results(&path).unwrap();
        assert_eq!(document.message.available_qualities.len(), 2);
        assert_eq!(document.message.available_qualities[1].bitrate, 1000000.0);
        assert_eq!(document.message.datas["SLOW_3G"][0]["joinTime"], 4.2);
        assert_eq!(document.message.datas.len(), 2);
    }

    #[test]
    fn parses_zstd_compressed_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("results.json.zst");
        let compressed = zstd::encode_all(sample_document().to_string().as_bytes(), 3).unwrap();
        File::create(&path)
            .unwrap()
            .write_all(&compressed)
            .unwrap();

        let document = parse_results(&path).unwrap();
        assert_eq!(document.message.datas["WIFI"][0]["joinTime"], 0.3);
    }

    #[test]
    fn missing_file_is_read_error() {
        let dir = TempDir::new().unwrap();
        let result = parse_results(&dir.path().join("absent.json"));
        assert!(matches!(result, Err(ParsingError::FileRead(_))));
    }

    #[test]
    fn malformed_json_is_parse_error() {
        let result = parse_from_reader("{\"message\": {".as_bytes());
        assert!(matches!(result, Err(ParsingError::JsonParse(_))));
    }

    #[test]
    fn missing_message_key_is_parse_error() {
        let result = parse_from_reader("{\"payload\": {}}".as_bytes());
        assert!(matches!(result, Err(ParsingError::JsonParse(_))));
    }
}
