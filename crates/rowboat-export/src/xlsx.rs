// SPDX-FileCopyrightText: 2026 Rowboat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Spreadsheet serialization via `rust_xlsxwriter`.
//!
//! One sheet per chunk of at most `row_limit - 1` data rows, every sheet
//! prefixed with the header taken from the whole result's column set -- the
//! header is never recomputed per chunk, so sheets stay uniform even when
//! individual rows vary.

use rowboat_core::{RowboatError, TabularResult, Value};
use rust_xlsxwriter::{Workbook, XlsxError};

use crate::NO_DATA_PLACEHOLDER;
use crate::chunk::chunk_bounds;

/// Largest magnitude exactly representable in an f64 cell (2^53).
const MAX_EXACT_INT: u64 = 1 << 53;

/// Serializes the result into xlsx bytes.
///
/// `row_limit` is the per-sheet physical row ceiling; production callers
/// pass [`crate::SHEET_ROW_LIMIT`], tests pass something small.
pub fn write_workbook(result: &TabularResult, row_limit: usize) -> Result<Vec<u8>, RowboatError> {
    let mut workbook = Workbook::new();

    if result.is_empty() {
        let sheet = workbook.add_worksheet();
        sheet.write_string(0, 0, NO_DATA_PLACEHOLDER).map_err(map_xlsx)?;
        return workbook.save_to_buffer().map_err(map_xlsx);
    }

    for (index, range) in chunk_bounds(result.rows.len(), row_limit).iter().enumerate() {
        let sheet = workbook.add_worksheet();
        sheet
            .set_name(format!("Sheet{}", index + 1))
            .map_err(map_xlsx)?;

        for (col, name) in result.columns.iter().enumerate() {
            sheet
                .write_string(0, col as u16, name.as_str())
                .map_err(map_xlsx)?;
        }

        for (offset, row) in result.rows[range.clone()].iter().enumerate() {
            let sheet_row = (offset + 1) as u32;
            for (col, name) in result.columns.iter().enumerate() {
                let col = col as u16;
                // A row missing this column leaves the cell empty.
                match row.get(name) {
                    None | Some(Value::Null) => {}
                    Some(Value::Bool(b)) => {
                        sheet.write_boolean(sheet_row, col, *b).map_err(map_xlsx)?;
                    }
                    Some(Value::Int(i)) => {
                        // Cells are f64; integers past 2^53 lose digits there,
                        // so those render as text instead.
                        if i.unsigned_abs() <= MAX_EXACT_INT {
                            sheet
                                .write_number(sheet_row, col, *i as f64)
                                .map_err(map_xlsx)?;
                        } else {
                            sheet
                                .write_string(sheet_row, col, i.to_string().as_str())
                                .map_err(map_xlsx)?;
                        }
                    }
                    Some(Value::Float(f)) => {
                        sheet.write_number(sheet_row, col, *f).map_err(map_xlsx)?;
                    }
                    Some(Value::Text(s)) | Some(Value::Timestamp(s)) => {
                        sheet
                            .write_string(sheet_row, col, s.as_str())
                            .map_err(map_xlsx)?;
                    }
                }
            }
        }
    }

    workbook.save_to_buffer().map_err(map_xlsx)
}

fn map_xlsx(err: XlsxError) -> RowboatError {
    RowboatError::Export {
        source: Box::new(err),
    }
}
