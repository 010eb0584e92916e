// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Packed 59-byte measurement records.

use tracing::{debug, warn};

use crate::core::{CodecError, Column, ColumnData, RecordTable, Result};
use crate::encoding::field::{I32, I64, U32, U64, U8};
use crate::io::formats::record_array::decode_record_array;
use crate::io::reader::DecodeOptions;
use crate::schema::{ColumnDescriptor, RecordLayout};

use super::constants::*;

pub use crate::schema::registry::{MODE, STEP_ID};

pub const STATUS: &str = "status";
pub const RECORD_NO: &str = "record_no";
pub const CYCLE_NUMBER: &str = "cycle_number";
pub const STEP_TIME: &str = "step_time";
pub const VOLTAGE: &str = "voltage";
pub const CURRENT: &str = "current";
pub const TEMPERATURE: &str = "temperature";
pub const CHARGE: &str = "charge";
pub const ENERGY: &str = "energy";
pub const CLOCK_TIME: &str = "clock_time";
/// Stored per record; not verified.
pub const CHECKSUM: &str = "checksum";

/// Columns rescaled to physical units after the byte decode.
const SCALED: [(&str, f64); 5] = [
    (STEP_TIME, 1.0),
    (VOLTAGE, VOLTAGE_SCALE),
    (CURRENT, CURRENT_SCALE),
    (CHARGE, CHARGE_SCALE),
    (ENERGY, ENERGY_SCALE),
];

/// The fixed record layout.
pub fn record_layout() -> RecordLayout {
    RecordLayout::new(vec![
        ColumnDescriptor::fixed(STATUS, U8),
        ColumnDescriptor::fixed(RECORD_NO, U32),
        ColumnDescriptor::fixed(CYCLE_NUMBER, U32),
        ColumnDescriptor::fixed(STEP_ID, U8),
        ColumnDescriptor::fixed(MODE, U8),
        ColumnDescriptor::fixed(STEP_TIME, U32),
        ColumnDescriptor::fixed(VOLTAGE, I32),
        ColumnDescriptor::fixed(CURRENT, I32),
        ColumnDescriptor::fixed(TEMPERATURE, I64),
        ColumnDescriptor::fixed(CHARGE, I64),
        ColumnDescriptor::fixed(ENERGY, I64),
        ColumnDescriptor::fixed(CLOCK_TIME, U64),
        ColumnDescriptor::fixed(CHECKSUM, U32),
    ])
}

/// Decode every record from `offset` to the end of `data`.
///
/// Values are converted to physical units and rows whose status is not
/// success are removed. A partial record at the end fails with
/// `TruncatedFile`.
pub fn decode_records(data: &[u8], offset: usize, options: &DecodeOptions) -> Result<RecordTable> {
    let layout = record_layout();
    let available = data.len().saturating_sub(offset);
    let rows = available / layout.stride();
    let partial = available % layout.stride();
    if partial != 0 {
        return Err(CodecError::truncated(
            "trailing record",
            offset + rows * layout.stride(),
            layout.stride(),
            partial,
        ));
    }

    let columns = decode_record_array(data, &layout, offset, rows, options)?;
    let mut table = RecordTable::from_columns(
        layout
            .columns()
            .iter()
            .zip(columns)
            .map(|(descriptor, data)| Column::new(descriptor.name, data))
            .collect(),
    )?;

    for (name, factor) in SCALED {
        scale_column(&mut table, name, factor)?;
    }
    drop_failed_rows(&mut table);

    debug!(records = rows, kept = table.len(), "Decoded fixed records");
    Ok(table)
}

fn scale_column(table: &mut RecordTable, name: &str, factor: f64) -> Result<()> {
    let scaled = table
        .f64_column(name)
        .ok_or_else(|| CodecError::Other(format!("missing record column '{name}'")))?
        .into_iter()
        .map(|value| value * factor)
        .collect();
    table.replace_column(name, ColumnData::Float64(scaled))
}

fn drop_failed_rows(table: &mut RecordTable) {
    let Some(status) = table.i64_column(STATUS) else {
        return;
    };
    let mask: Vec<bool> = status
        .iter()
        .map(|&s| s == i64::from(STATUS_SUCCESS))
        .collect();
    let dropped = mask.iter().filter(|&&keep| !keep).count();
    if dropped > 0 {
        warn!(dropped, total = mask.len(), "Dropping records with non-success status");
        table.retain_rows(&mask);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::FieldValue;

    fn record(status: u8, step_id: u8, voltage: i32, current: i32, charge: i64) -> Vec<u8> {
        let mut out = vec![status];
        out.extend_from_slice(&7u32.to_le_bytes());
        out.extend_from_slice(&1u32.to_le_bytes());
        out.push(step_id);
        out.push(MODE_CC_CHARGE);
        out.extend_from_slice(&30u32.to_le_bytes());
        out.extend_from_slice(&voltage.to_le_bytes());
        out.extend_from_slice(&current.to_le_bytes());
        out.extend_from_slice(&25i64.to_le_bytes());
        out.extend_from_slice(&charge.to_le_bytes());
        out.extend_from_slice(&3_600_000_000i64.to_le_bytes());
        out.extend_from_slice(&1_700_000_000u64.to_le_bytes());
        out.extend_from_slice(&0xDEADBEEFu32.to_le_bytes());
        out
    }

    #[test]
    fn test_layout_stride() {
        let layout = record_layout();
        assert_eq!(layout.stride(), RECORD_LEN);
        assert!(!layout.has_flags());
    }

    #[test]
    fn test_scaling() {
        let data = record(0, 1, 38_000, 1_500, 3_600_000);
        let table = decode_records(&data, 0, &DecodeOptions::new()).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.value(0, STEP_TIME), Some(FieldValue::Float64(30.0)));
        let voltage = table.f64_column(VOLTAGE).unwrap()[0];
        assert!((voltage - 3.8).abs() < 1e-9);
        let current = table.f64_column(CURRENT).unwrap()[0];
        assert!((current - 1.5).abs() < 1e-9);
        let charge = table.f64_column(CHARGE).unwrap()[0];
        assert!((charge - 1.0).abs() < 1e-9);
        let energy = table.f64_column(ENERGY).unwrap()[0];
        assert!((energy - 1.0).abs() < 1e-9);
        assert_eq!(table.value(0, CHECKSUM), Some(FieldValue::UInt32(0xDEADBEEF)));
        assert_eq!(table.value(0, TEMPERATURE), Some(FieldValue::Int64(25)));
    }

    #[test]
    fn test_failed_rows_dropped() {
        let mut data = record(0, 1, 1, 0, 0);
        data.extend(record(4, 1, 2, 0, 0));
        data.extend(record(0, 2, 3, 0, 0));
        let table = decode_records(&data, 0, &DecodeOptions::new()).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.i64_column(STEP_ID), Some(vec![1, 2]));
    }

    #[test]
    fn test_partial_trailing_record() {
        let mut data = record(0, 1, 1, 0, 0);
        data.extend_from_slice(&[0, 1, 2]);
        assert!(matches!(
            decode_records(&data, 0, &DecodeOptions::new()),
            Err(CodecError::TruncatedFile {
                offset: 59,
                available: 3,
                ..
            })
        ));
    }
}
