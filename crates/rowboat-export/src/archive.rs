// SPDX-FileCopyrightText: 2026 Rowboat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Zip archiving for over-threshold exports.
//!
//! Wraps a single serialized file in a zip container at maximum compression,
//! preserving the original filename inside the archive.

use std::io::{Cursor, Write};

use rowboat_core::RowboatError;
use zip::write::FileOptions;

/// Wraps `bytes` as `inner_name` inside a new zip archive.
pub fn wrap(inner_name: &str, bytes: &[u8]) -> Result<Vec<u8>, RowboatError> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options = FileOptions::default()
        .compression_method(zip::CompressionMethod::Deflated)
        .compression_level(Some(9));

    writer.start_file(inner_name, options).map_err(map_zip)?;
    writer
        .write_all(bytes)
        .map_err(|e| RowboatError::Export { source: Box::new(e) })?;
    let cursor = writer.finish().map_err(map_zip)?;
    Ok(cursor.into_inner())
}

fn map_zip(err: zip::result::ZipError) -> RowboatError {
    RowboatError::Export {
        source: Box::new(err),
    }
}
