// SPDX-FileCopyrightText: 2026 Rowboat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Delimited-text serialization via the `csv` crate.

use rowboat_core::{RowboatError, TabularResult};

use crate::NO_DATA_PLACEHOLDER;

/// Serializes the result into a single CSV buffer.
///
/// Header row comes from the result's column set; values missing from a row
/// render as empty fields. An empty result renders as a literal "no data"
/// line instead of header + rows.
pub fn write_csv(result: &TabularResult) -> Result<Vec<u8>, RowboatError> {
    if result.is_empty() {
        return Ok(format!("{NO_DATA_PLACEHOLDER}\n").into_bytes());
    }

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(&result.columns).map_err(map_csv)?;

    for row in &result.rows {
        let record: Vec<String> = result
            .columns
            .iter()
            .map(|column| row.get(column).map(|v| v.render()).unwrap_or_default())
            .collect();
        writer.write_record(&record).map_err(map_csv)?;
    }

    writer
        .into_inner()
        .map_err(|e| RowboatError::Export { source: Box::new(e) })
}

fn map_csv(err: csv::Error) -> RowboatError {
    RowboatError::Export {
        source: Box::new(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rowboat_core::{Row, Value};

    #[test]
    fn empty_result_is_the_placeholder_line() {
        let bytes = write_csv(&TabularResult::default()).unwrap();
        assert_eq!(bytes, b"no data\n");
    }

    #[test]
    fn header_and_rows_render() {
        let result = TabularResult::from_rows(vec![
            Row(vec![
                ("id".into(), Value::Int(1)),
                ("name".into(), Value::Text("alice".into())),
            ]),
            Row(vec![
                ("id".into(), Value::Int(2)),
                ("name".into(), Value::Null),
            ]),
        ]);
        let text = String::from_utf8(write_csv(&result).unwrap()).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines, vec!["id,name", "1,alice", "2,"]);
    }

    #[test]
    fn missing_columns_render_as_empty_fields() {
        let result = TabularResult::from_rows(vec![
            Row(vec![
                ("id".into(), Value::Int(1)),
                ("name".into(), Value::Text("alice".into())),
            ]),
            Row(vec![("id".into(), Value::Int(2))]),
        ]);
        let text = String::from_utf8(write_csv(&result).unwrap()).unwrap();
        assert!(text.lines().any(|l| l == "2,"));
    }

    #[test]
    fn fields_with_delimiters_are_quoted() {
        let result = TabularResult::from_rows(vec![Row(vec![(
            "note".into(),
            Value::Text("a,b".into()),
        )])]);
        let text = String::from_utf8(write_csv(&result).unwrap()).unwrap();
        assert!(text.contains("\"a,b\""));
    }
}
