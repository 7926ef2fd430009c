// SPDX-FileCopyrightText: 2026 Rowboat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Export pipeline for the Rowboat report dispatcher.
//!
//! Converts a [`TabularResult`] into a downloadable file: spreadsheet or
//! delimited text, with per-sheet row chunking and size-threshold zip
//! compression. Serialization failures abort delivery; a partial file is
//! never returned.

pub mod archive;
pub mod chunk;
pub mod delimited;
pub mod xlsx;

use rowboat_core::{RowboatError, TabularResult};
use strum::{Display, EnumString};
use tracing::debug;

/// Per-sheet physical row ceiling of the xlsx format.
pub const SHEET_ROW_LIMIT: usize = 1_048_576;

/// Placeholder emitted for empty result sets, in both formats.
pub const NO_DATA_PLACEHOLDER: &str = "no data";

/// Target serialization format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum ExportFormat {
    Xlsx,
    Csv,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Xlsx => "xlsx",
            ExportFormat::Csv => "csv",
        }
    }
}

/// A serialized export ready for delivery.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportFile {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// Serializes `result` as `<base_name>.<ext>` and compresses it when the
/// byte length strictly exceeds `compression_threshold`.
///
/// Compression is a pure function of size, evaluated once per export: the
/// single output file is wrapped in a zip archive (maximum ratio) keeping
/// its original name inside, and the delivered name swaps to `.zip`.
pub fn export(
    result: &TabularResult,
    format: ExportFormat,
    base_name: &str,
    compression_threshold: u64,
) -> Result<ExportFile, RowboatError> {
    let inner_name = format!("{base_name}.{}", format.extension());
    let bytes = match format {
        ExportFormat::Xlsx => xlsx::write_workbook(result, SHEET_ROW_LIMIT)?,
        ExportFormat::Csv => delimited::write_csv(result)?,
    };

    if bytes.len() as u64 > compression_threshold {
        debug!(
            size = bytes.len(),
            threshold = compression_threshold,
            file = %inner_name,
            "export exceeds threshold, archiving"
        );
        let zipped = archive::wrap(&inner_name, &bytes)?;
        return Ok(ExportFile {
            filename: format!("{base_name}.zip"),
            bytes: zipped,
        });
    }

    Ok(ExportFile {
        filename: inner_name,
        bytes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rowboat_core::{Row, Value};

    fn csv_result() -> TabularResult {
        TabularResult::from_rows(vec![Row(vec![
            ("id".into(), Value::Int(1)),
            ("name".into(), Value::Text("alice".into())),
        ])])
    }

    #[test]
    fn below_threshold_is_delivered_unmodified() {
        let file = export(&csv_result(), ExportFormat::Csv, "s1_q1", u64::MAX).unwrap();
        assert_eq!(file.filename, "s1_q1.csv");
        assert!(!file.bytes.starts_with(b"PK"));
    }

    #[test]
    fn exactly_threshold_is_not_compressed() {
        let result = csv_result();
        let plain = delimited::write_csv(&result).unwrap();
        let file = export(&result, ExportFormat::Csv, "s1_q1", plain.len() as u64).unwrap();
        assert_eq!(file.filename, "s1_q1.csv");
        assert_eq!(file.bytes, plain);
    }

    #[test]
    fn one_byte_over_threshold_is_compressed() {
        let result = csv_result();
        let plain = delimited::write_csv(&result).unwrap();
        let file = export(&result, ExportFormat::Csv, "s1_q1", plain.len() as u64 - 1).unwrap();
        assert_eq!(file.filename, "s1_q1.zip");
        // Zip local file header magic.
        assert!(file.bytes.starts_with(b"PK\x03\x04"));
    }

    #[test]
    fn empty_result_round_trips_placeholder_in_both_formats() {
        let empty = TabularResult::default();
        let csv_file = export(&empty, ExportFormat::Csv, "empty", u64::MAX).unwrap();
        assert_eq!(csv_file.bytes, b"no data\n");

        let xlsx_file = export(&empty, ExportFormat::Xlsx, "empty", u64::MAX).unwrap();
        assert_eq!(xlsx_file.filename, "empty.xlsx");
        assert!(!xlsx_file.bytes.is_empty());
    }

    #[test]
    fn format_names_parse() {
        use std::str::FromStr;
        assert_eq!(ExportFormat::from_str("xlsx").unwrap(), ExportFormat::Xlsx);
        assert_eq!(ExportFormat::from_str("csv").unwrap(), ExportFormat::Csv);
        assert_eq!(ExportFormat::Xlsx.to_string(), "xlsx");
    }
}
