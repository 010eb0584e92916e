// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Neware / BTS fixed-record (`.nda`) file decoding.
//!
//! Layout:
//!
//! ```text
//! "NEWARE" | metadata at fixed offsets | step table | 59-byte records ...
//! ```
//!
//! The decoded table carries the record columns in physical units plus the
//! derived `elapsed_time`, `net_charge` and `half_cycle_index` columns.

pub mod constants;
pub mod header;
pub mod records;
pub mod steps;

use serde::Serialize;
use tracing::debug;

use crate::core::{RecordTable, Result};
use crate::encoding::ByteCursor;
use crate::io::reader::DecodeOptions;
use crate::series::{DerivedSeriesBuilder, SeriesConfig};

pub use header::HeaderInfo;
pub use steps::{parse_step_table, StepDefinition, StepMode, StepParams};

/// A decoded fixed-record file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FixedRecordFile {
    /// Header metadata
    pub header: HeaderInfo,
    /// Step definitions in id order
    pub steps: Vec<StepDefinition>,
    /// Offset of the first record
    pub records_offset: usize,
    /// Last row of each step in the (filtered) table
    pub step_changes: Vec<usize>,
    /// Half-cycle boundary marks
    pub half_cycle_changes: Vec<usize>,
    /// Records with derived columns
    pub table: RecordTable,
}

impl FixedRecordFile {
    /// Decode with default (sequential) options.
    pub fn decode(data: &[u8]) -> Result<Self> {
        Self::decode_with(data, &DecodeOptions::default())
    }

    /// Decode a complete file buffer.
    pub fn decode_with(data: &[u8], options: &DecodeOptions) -> Result<Self> {
        let header = HeaderInfo::parse(data)?;
        debug!(
            version = %header.version,
            machine = header.machine,
            "Parsed fixed-record header"
        );

        let mut cursor = ByteCursor::new(data);
        cursor.seek(constants::STEP_TABLE_OFFSET)?;
        let steps = parse_step_table(&mut cursor)?;
        let records_offset = cursor.position();

        let mut table = records::decode_records(data, records_offset, options)?;
        let series = DerivedSeriesBuilder::new(SeriesConfig::neware()).apply(&mut table)?;

        Ok(Self {
            header,
            steps,
            records_offset,
            step_changes: series.step_changes,
            half_cycle_changes: series.half_cycle_changes,
            table,
        })
    }

    /// Step definition by id.
    pub fn step(&self, id: u8) -> Option<&StepDefinition> {
        self.steps.iter().find(|step| step.id == id)
    }
}
