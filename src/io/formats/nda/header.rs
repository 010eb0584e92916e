// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Fixed-offset header metadata.

use std::str::FromStr;

use chrono::NaiveDate;
use serde::Serialize;

use crate::core::{CodecError, Result};
use crate::encoding::{c_string, read_raw_at, ByteCursor};

use super::constants::*;

/// Metadata stored at fixed offsets before the step table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeaderInfo {
    /// Test start year
    pub year: u16,
    /// Test start month
    pub month: u8,
    /// Test start day
    pub day: u8,
    /// Software version string
    pub version: String,
    /// Machine id byte
    pub machine: u8,
    /// Format version byte
    pub version_byte: u8,
    /// Operator name
    pub username: String,
    /// Batch label
    pub batch: String,
    /// Free-form memo
    pub memo: String,
}

impl HeaderInfo {
    /// Check the magic and read all header fields.
    ///
    /// Text fields are trimmed at their first zero byte.
    pub fn parse(data: &[u8]) -> Result<Self> {
        let mut cursor = ByteCursor::new(data);
        cursor.expect(MAGIC)?;

        let year = parse_decimal(data, DATE_OFFSET, YEAR_LEN, "year")?;
        let month = parse_decimal(data, DATE_OFFSET + YEAR_LEN, MONTH_LEN, "month")?;
        let day = parse_decimal(data, DATE_OFFSET + YEAR_LEN + MONTH_LEN, DAY_LEN, "day")?;

        let version = c_string(read_raw_at(data, VERSION_STRING_OFFSET, VERSION_STRING_LEN)?);
        let mut channel = ByteCursor::at(data, MACHINE_OFFSET);
        let machine = channel.read_u8()?;
        let version_byte = channel.read_u8()?;

        let username = c_string(read_raw_at(data, USERNAME_OFFSET, USERNAME_LEN)?);
        let batch = c_string(read_raw_at(data, BATCH_OFFSET, BATCH_LEN)?);
        let memo = c_string(read_raw_at(data, MEMO_OFFSET, MEMO_LEN)?);

        Ok(Self {
            year,
            month,
            day,
            version,
            machine,
            version_byte,
            username,
            batch,
            memo,
        })
    }

    /// The header date, if it names a real calendar day.
    pub fn date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(i32::from(self.year), u32::from(self.month), u32::from(self.day))
    }
}

fn parse_decimal<T: FromStr>(data: &[u8], offset: usize, len: usize, field: &str) -> Result<T> {
    let raw = read_raw_at(data, offset, len)?;
    std::str::from_utf8(raw)
        .ok()
        .and_then(|text| text.trim().parse().ok())
        .ok_or_else(|| {
            CodecError::invalid_field(
                field,
                offset,
                format!("expected decimal digits, found {raw:02x?}"),
            )
        })
}
