// ============================================================
// CSV PARSER
// ============================================================
// Reads uploaded CSV into header-keyed rows

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ByteRecord, ReaderBuilder};
use encoding_rs::WINDOWS_1252;
use serde_json::{Map, Value};

use crate::domain::error::AppError;

/// One data row, keyed by the header names in header order.
pub type CsvRow = Map<String, Value>;

/// CSV parser treating the first record as column headers
pub struct CsvParser {
    /// Delimiter character (default: comma)
    delimiter: u8,
}

impl Default for CsvParser {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

impl CsvParser {
    /// Create a new CSV parser with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a CSV file from disk
    pub fn parse_file(&self, path: &Path) -> Result<Vec<CsvRow>, AppError> {
        let file = File::open(path)
            .map_err(|e| AppError::IoError(format!("Failed to open file: {}", e)))?;
        self.parse_reader(file)
    }

    /// Parse CSV records streamed from `source`.
    ///
    /// Every record must have as many fields as the header row; a mismatch
    /// fails the whole parse.
    pub fn parse_reader<R: Read>(&self, source: R) -> Result<Vec<CsvRow>, AppError> {
        let mut reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(true)
            .from_reader(source);

        let headers: Vec<String> = reader
            .byte_headers()
            .map_err(|e| AppError::ParseError(format!("Failed to read CSV headers: {}", e)))?
            .iter()
            .map(decode_cell)
            .collect();

        let mut rows = Vec::new();
        for (index, result) in reader.byte_records().enumerate() {
            let record = result.map_err(|e| {
                AppError::ParseError(format!("Failed to parse CSV row {}: {}", index + 1, e))
            })?;
            rows.push(Self::parse_row(&headers, &record));
        }

        Ok(rows)
    }

    fn parse_row(headers: &[String], record: &ByteRecord) -> CsvRow {
        let mut row = Map::with_capacity(headers.len());
        for (idx, header) in headers.iter().enumerate() {
            let value = record.get(idx).map(decode_cell).unwrap_or_default();
            row.insert(header.clone(), Value::String(value));
        }
        row
    }
}

/// UTF-8 first, Windows-1252 for anything that is not valid UTF-8.
fn decode_cell(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(_) => WINDOWS_1252.decode_without_bom_handling(bytes).0.into_owned(),
    }
}
