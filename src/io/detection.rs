// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Format detection using magic bytes, with extension fallback.
//!
//! # Example
//!
//! ```rust,no_run
//! use cyclecodec::io::detection::detect_format;
//! use cyclecodec::io::metadata::FileFormat;
//!
//! let format = detect_format("cell_01.mpr")?;
//! assert_eq!(format, FileFormat::Modular);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::core::{CodecError, Result};

use super::formats::mpr::constants::FILE_MAGIC_TEXT;
use super::formats::nda::constants::MAGIC as NEWARE_MAGIC;
use super::metadata::FileFormat;

/// Detect the format of an in-memory buffer from its leading bytes.
pub fn detect_format_bytes(data: &[u8]) -> FileFormat {
    if data.starts_with(FILE_MAGIC_TEXT) {
        FileFormat::Modular
    } else if data.starts_with(NEWARE_MAGIC) {
        FileFormat::FixedRecord
    } else {
        FileFormat::Unknown
    }
}

/// Detect the format of a file.
///
/// Reads the leading bytes and checks the magic; when that is inconclusive
/// or the file cannot be read, falls back to the extension.
pub fn detect_format<P: AsRef<Path>>(path: P) -> Result<FileFormat> {
    let path_ref = path.as_ref();

    match detect_from_magic(path_ref) {
        Ok(FileFormat::Unknown) | Err(_) => {}
        Ok(format) => return Ok(format),
    }

    Ok(detect_from_extension(path_ref))
}

fn detect_from_magic(path: &Path) -> Result<FileFormat> {
    let path_str = path.to_string_lossy();
    let mut file = File::open(path).map_err(|e| CodecError::io(&*path_str, &e))?;

    let mut header = [0u8; 64];
    let mut filled = 0;
    while filled < header.len() {
        let n = file
            .read(&mut header[filled..])
            .map_err(|e| CodecError::io(&*path_str, &e))?;
        if n == 0 {
            break;
        }
        filled += n;
    }

    Ok(detect_format_bytes(&header[..filled]))
}

fn detect_from_extension(path: &Path) -> FileFormat {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|ext| match ext.to_lowercase().as_str() {
            "mpr" => FileFormat::Modular,
            "nda" => FileFormat::FixedRecord,
            _ => FileFormat::Unknown,
        })
        .unwrap_or(FileFormat::Unknown)
}

/// Check if a file looks like a BioLogic modular file.
pub fn is_mpr_file<P: AsRef<Path>>(path: P) -> bool {
    matches!(detect_format(path), Ok(FileFormat::Modular))
}

/// Check if a file looks like a Neware fixed-record file.
pub fn is_nda_file<P: AsRef<Path>>(path: P) -> bool {
    matches!(detect_format(path), Ok(FileFormat::FixedRecord))
}
