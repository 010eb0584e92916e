// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Unified reader with format auto-detection.
//!
//! [`CyclerReader`] maps a file, identifies its format and runs the matching
//! decoder with the given [`DecodeOptions`].
//!
//! # Example
//!
//! ```rust,no_run
//! use cyclecodec::io::reader::{CyclerReader, DecodeOptions, DecodeStrategy};
//!
//! let options = DecodeOptions::new().strategy(DecodeStrategy::Auto);
//! let file = CyclerReader::open("cell_01.mpr", &options)?;
//! println!("{} rows from {}", file.table().len(), file.format());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod strategy;

pub use strategy::{DecodeOptions, DecodeStrategy, DEFAULT_PARALLEL_THRESHOLD};

use std::path::Path;

use serde::Serialize;
use tracing::debug;

use crate::core::{CodecError, Instrument, RecordTable, Result};
use crate::io::arena::MmapArena;
use crate::io::detection::{detect_format, detect_format_bytes};
use crate::io::formats::mpr::ModularFile;
use crate::io::formats::nda::FixedRecordFile;
use crate::io::metadata::FileFormat;

/// A decoded file of either format.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum DecodedFile {
    Modular(ModularFile),
    FixedRecord(FixedRecordFile),
}

impl DecodedFile {
    /// Container format.
    pub fn format(&self) -> FileFormat {
        match self {
            DecodedFile::Modular(_) => FileFormat::Modular,
            DecodedFile::FixedRecord(_) => FileFormat::FixedRecord,
        }
    }

    /// Instrument family.
    pub fn instrument(&self) -> Instrument {
        match self {
            DecodedFile::Modular(_) => Instrument::Biologic,
            DecodedFile::FixedRecord(_) => Instrument::Neware,
        }
    }

    /// Decoded records.
    pub fn table(&self) -> &RecordTable {
        match self {
            DecodedFile::Modular(file) => &file.table,
            DecodedFile::FixedRecord(file) => &file.table,
        }
    }

    /// Records with `elapsed_time`, `net_charge` and `half_cycle_index`
    /// columns, from native columns or derived ones.
    pub fn series_table(&self) -> Result<RecordTable> {
        match self {
            DecodedFile::Modular(file) => file.native_series(),
            DecodedFile::FixedRecord(file) => Ok(file.table.clone()),
        }
    }
}

/// Entry point for decoding files from disk or memory.
#[derive(Debug, Clone, Copy, Default)]
pub struct CyclerReader;

impl CyclerReader {
    /// Map, detect and decode a file.
    pub fn open<P: AsRef<Path>>(path: P, options: &DecodeOptions) -> Result<DecodedFile> {
        let path_ref = path.as_ref();
        let arena = MmapArena::open(path_ref)?;

        let format = match detect_format_bytes(arena.data()) {
            FileFormat::Unknown => detect_format(path_ref)?,
            format => format,
        };
        debug!(path = arena.path(), %format, bytes = arena.len(), "Opening cycler file");

        if format == FileFormat::Unknown {
            return Err(CodecError::Other(format!(
                "unrecognized cycler file format: {}",
                arena.path()
            )));
        }
        Self::decode_bytes(arena.data(), format, options)
    }

    /// Decode an in-memory buffer of a known format.
    ///
    /// `FileFormat::Unknown` is detected from the magic first.
    pub fn decode_bytes(
        data: &[u8],
        format: FileFormat,
        options: &DecodeOptions,
    ) -> Result<DecodedFile> {
        let format = match format {
            FileFormat::Unknown => detect_format_bytes(data),
            format => format,
        };
        match format {
            FileFormat::Modular => ModularFile::decode_with(data, options).map(DecodedFile::Modular),
            FileFormat::FixedRecord => {
                FixedRecordFile::decode_with(data, options).map(DecodedFile::FixedRecord)
            }
            FileFormat::Unknown => Err(CodecError::Other(
                "unrecognized cycler file format".to_string(),
            )),
        }
    }
}
