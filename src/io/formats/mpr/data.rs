// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Data section parsing.
//!
//! Payload layout:
//!
//! ```text
//! record count u32 | column count u8 | column codes u16 x n
//!                  | trailer ... 0x01 | records (count x stride)
//! ```
//!
//! The trailer before the record array has no declared length; the record
//! array starts right after the first `0x01` byte following the codes.

use serde::Serialize;
use tracing::debug;

use crate::core::{CodecError, Column, RecordTable, Result};
use crate::encoding::ByteCursor;
use crate::io::formats::record_array::decode_record_array;
use crate::io::reader::DecodeOptions;
use crate::schema::{resolve_biologic_layout, RecordLayout};

use super::constants::DATA_SENTINEL;

/// Column declaration and record-array location of a data section.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataSectionHeader {
    /// Declared number of records
    pub record_count: u32,
    /// Column codes in declared order
    pub codes: Vec<u16>,
    /// Resolved record layout
    pub layout: RecordLayout,
    /// Offset of the first record within the payload
    pub records_offset: usize,
}

impl DataSectionHeader {
    /// Parse the header part of a data payload.
    ///
    /// Fails with `UnknownFieldCode` on the first unknown code,
    /// `InvalidField` when records are declared without any column, and
    /// `TruncatedFile` when the sentinel is missing or the declared records
    /// do not fit in the payload.
    pub fn parse(payload: &[u8]) -> Result<Self> {
        let mut cursor = ByteCursor::new(payload);
        let record_count = cursor.read_u32()?;
        let column_count = cursor.read_u8()?;
        if column_count == 0 && record_count > 0 {
            return Err(CodecError::invalid_field(
                "column_count",
                4,
                format!("{record_count} records declared with no columns"),
            ));
        }
        let codes = (0..column_count)
            .map(|_| cursor.read_u16())
            .collect::<Result<Vec<_>>>()?;
        let layout = resolve_biologic_layout(&codes)?;

        let trailer_len = cursor.skip_past(DATA_SENTINEL)?;
        let records_offset = cursor.position();

        let needed = (record_count as usize)
            .checked_mul(layout.stride())
            .ok_or_else(|| CodecError::Other("record array size overflows".to_string()))?;
        if needed > cursor.remaining() {
            return Err(CodecError::truncated(
                "data section records",
                records_offset,
                needed,
                cursor.remaining(),
            ));
        }

        debug!(
            records = record_count,
            columns = column_count,
            stride = layout.stride(),
            trailer_len,
            "Parsed data section header"
        );

        Ok(Self {
            record_count,
            codes,
            layout,
            records_offset,
        })
    }

    /// Number of records.
    pub fn rows(&self) -> usize {
        self.record_count as usize
    }
}

/// Decode a full data payload into a table.
pub fn decode_data_section(
    payload: &[u8],
    options: &DecodeOptions,
) -> Result<(DataSectionHeader, RecordTable)> {
    let header = DataSectionHeader::parse(payload)?;
    let columns = decode_record_array(
        payload,
        &header.layout,
        header.records_offset,
        header.rows(),
        options,
    )?;

    let table = RecordTable::from_columns(
        header
            .layout
            .columns()
            .iter()
            .zip(columns)
            .map(|(descriptor, data)| Column::new(descriptor.name, data))
            .collect(),
    )?;
    Ok((header, table))
}
