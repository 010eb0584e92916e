// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! BioLogic modular (`.mpr`) file decoding.
//!
//! A modular file is the file magic followed by a settings section and a data
//! section. The settings payload is kept as raw bytes; the data payload is
//! decoded into a [`RecordTable`] whose columns follow the per-file field
//! codes. Any sections after the data section are ignored.

pub mod constants;
pub mod data;
pub mod section;

use serde::Serialize;
use tracing::debug;

use crate::core::{
    CodecError, Column, RecordTable, Result, ELAPSED_TIME, HALF_CYCLE_INDEX, NET_CHARGE,
};
use crate::encoding::ByteCursor;
use crate::io::reader::DecodeOptions;

pub use constants::{FILE_MAGIC, REST_MODE};
pub use data::{decode_data_section, DataSectionHeader};
pub use section::{encode_file_magic, ModuleSection, SectionHeader};

use constants::{
    DATA_LONG_NAME, DATA_SHORT_NAME, SECTION_HEADER_LEN, SETTINGS_LONG_NAME, SETTINGS_SHORT_NAME,
};
use section::short_name_at;

/// Native columns that map onto the derived series names.
const NATIVE_SERIES: [(&str, &str); 3] = [
    ("time", ELAPSED_TIME),
    ("q_q0", NET_CHARGE),
    ("half_cycle", HALF_CYCLE_INDEX),
];

/// Settings module, kept undecoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SettingsSection {
    /// Section header
    pub header: SectionHeader,
    /// Raw payload
    pub payload: Vec<u8>,
}

/// A decoded modular file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModularFile {
    /// Settings module
    pub settings: SettingsSection,
    /// Data module header
    pub data_header: SectionHeader,
    /// Column declaration of the data module
    pub data_info: DataSectionHeader,
    /// Decoded records
    pub table: RecordTable,
    /// Offset one past the data section
    pub data_end: usize,
}

impl ModularFile {
    /// Decode with default (sequential) options.
    pub fn decode(data: &[u8]) -> Result<Self> {
        Self::decode_with(data, &DecodeOptions::default())
    }

    /// Decode a complete file buffer.
    pub fn decode_with(data: &[u8], options: &DecodeOptions) -> Result<Self> {
        let mut cursor = ByteCursor::new(data);
        cursor.expect(&FILE_MAGIC)?;

        let settings_offset = cursor.position();
        if short_name_at(data, settings_offset) == Some(DATA_SHORT_NAME.as_slice()) {
            return Err(CodecError::truncated(
                "settings section (data section found first)",
                settings_offset,
                SECTION_HEADER_LEN,
                cursor.remaining(),
            ));
        }
        let settings = ModuleSection::read(
            &mut cursor,
            Some((SETTINGS_SHORT_NAME.as_slice(), SETTINGS_LONG_NAME.as_slice())),
        )?;
        debug!(
            version = settings.header.version,
            payload = settings.payload.len(),
            "Read settings section"
        );

        if cursor.is_at_end() {
            return Err(CodecError::truncated(
                "data section",
                cursor.position(),
                SECTION_HEADER_LEN,
                0,
            ));
        }
        let data_section = ModuleSection::read(
            &mut cursor,
            Some((DATA_SHORT_NAME.as_slice(), DATA_LONG_NAME.as_slice())),
        )?;
        let (data_info, table) = decode_data_section(data_section.payload, options)?;

        if !cursor.is_at_end() {
            debug!(
                offset = cursor.position(),
                remaining = cursor.remaining(),
                "Ignoring sections after data section"
            );
        }

        Ok(Self {
            settings: SettingsSection {
                header: settings.header,
                payload: settings.payload.to_vec(),
            },
            data_header: data_section.header,
            data_info,
            table,
            data_end: data_section.end,
        })
    }

    /// Number of decoded records.
    pub fn record_count(&self) -> usize {
        self.table.len()
    }

    /// The table with native time, charge and half-cycle columns also
    /// available under the derived series names.
    ///
    /// Columns absent from this file are skipped.
    pub fn native_series(&self) -> Result<RecordTable> {
        let mut out = self.table.clone();
        for (source, target) in NATIVE_SERIES {
            if out.has_column(target) {
                continue;
            }
            if let Some(data) = self.table.column(source) {
                out.push_column(Column::new(target, data.clone()))?;
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ColumnData;

    fn section(short: &str, long: &str, payload: &[u8]) -> Vec<u8> {
        let mut out = SectionHeader::new(short, long, payload.len() as u32, 2, "01/02/24").encode();
        out.extend_from_slice(payload);
        out
    }

    fn data_payload() -> Vec<u8> {
        let mut out = Vec::new();
        out.extend_from_slice(&2u32.to_le_bytes());
        out.push(3);
        for code in [0x04u16, 0x0d, 0x1d4] {
            out.extend_from_slice(&code.to_le_bytes());
        }
        out.push(constants::DATA_SENTINEL);
        for (time, q, hc) in [(0.5f64, 0.1f64, 0u32), (1.5, 0.2, 1)] {
            out.extend_from_slice(&time.to_le_bytes());
            out.extend_from_slice(&q.to_le_bytes());
            out.extend_from_slice(&hc.to_le_bytes());
        }
        out
    }

    fn file(sections: &[Vec<u8>]) -> Vec<u8> {
        let mut out = encode_file_magic();
        for s in sections {
            out.extend_from_slice(s);
        }
        out
    }

    #[test]
    fn test_decode_file() {
        let bytes = file(&[
            section("VMP Set", "VMP settings", b"settings"),
            section("VMP data", "VMP data", &data_payload()),
            section("VMP LOG", "VMP loop", b"ignored"),
        ]);
        let decoded = ModularFile::decode(&bytes).unwrap();
        assert_eq!(decoded.settings.payload, b"settings");
        assert_eq!(decoded.data_header.version, 2);
        assert_eq!(decoded.record_count(), 2);
        assert_eq!(decoded.table.column_names(), vec!["time", "q_q0", "half_cycle"]);

        let series = decoded.native_series().unwrap();
        assert_eq!(
            series.column(ELAPSED_TIME),
            Some(&ColumnData::Float64(vec![0.5, 1.5]))
        );
        assert_eq!(
            series.column(HALF_CYCLE_INDEX),
            Some(&ColumnData::UInt32(vec![0, 1]))
        );
    }

    #[test]
    fn test_sections_out_of_order() {
        let bytes = file(&[
            section("VMP data", "VMP data", &data_payload()),
            section("VMP Set", "VMP settings", b""),
        ]);
        assert!(matches!(
            ModularFile::decode(&bytes),
            Err(CodecError::TruncatedFile { .. })
        ));
    }

    #[test]
    fn test_missing_data_section() {
        let bytes = file(&[section("VMP Set", "VMP settings", b"")]);
        assert!(matches!(
            ModularFile::decode(&bytes),
            Err(CodecError::TruncatedFile { .. })
        ));
    }

    #[test]
    fn test_bad_magic() {
        let mut bytes = file(&[section("VMP Set", "VMP settings", b"")]);
        bytes[0] = b'X';
        assert!(matches!(
            ModularFile::decode(&bytes),
            Err(CodecError::FormatMismatch { offset: 0, .. })
        ));
    }
}
