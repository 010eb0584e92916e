// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Section framing for BioLogic modular files.
//!
//! Layout of one section:
//!
//! ```text
//! "MODULE" | short name (10) | long name (25) | payload len u32 LE
//!          | version u32 LE  | date text (8)  | payload
//! ```

use chrono::NaiveDate;
use serde::Serialize;

use crate::core::{CodecError, Result};
use crate::encoding::ByteCursor;

use super::constants::{
    DATE_LEN, FILE_MAGIC, LONG_NAME_LEN, SECTION_HEADER_LEN, SECTION_TAG, SHORT_NAME_LEN,
};

/// Parsed header of one section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionHeader {
    /// Space-padded short name
    pub short_name: [u8; SHORT_NAME_LEN],
    /// Space-padded long name
    pub long_name: [u8; LONG_NAME_LEN],
    /// Declared payload length
    pub payload_len: u32,
    /// Section version
    pub version: u32,
    /// Date text, `MM/DD/YY`
    pub date: [u8; DATE_LEN],
}

impl SectionHeader {
    /// Create a header with names padded to their on-disk widths.
    pub fn new(short_name: &str, long_name: &str, payload_len: u32, version: u32, date: &str) -> Self {
        Self {
            short_name: padded(short_name.as_bytes()),
            long_name: padded(long_name.as_bytes()),
            payload_len,
            version,
            date: padded(date.as_bytes()),
        }
    }

    /// Short name without padding.
    pub fn short_name_str(&self) -> String {
        trimmed(&self.short_name)
    }

    /// Long name without padding.
    pub fn long_name_str(&self) -> String {
        trimmed(&self.long_name)
    }

    /// Date text as stored.
    pub fn date_text(&self) -> String {
        trimmed(&self.date)
    }

    /// Parse the date text, if it is a valid `MM/DD/YY` date.
    pub fn date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date_text(), "%m/%d/%y").ok()
    }

    /// Serialize the header (tag included, payload excluded).
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(SECTION_HEADER_LEN);
        out.extend_from_slice(SECTION_TAG);
        out.extend_from_slice(&self.short_name);
        out.extend_from_slice(&self.long_name);
        out.extend_from_slice(&self.payload_len.to_le_bytes());
        out.extend_from_slice(&self.version.to_le_bytes());
        out.extend_from_slice(&self.date);
        out
    }
}

/// One section with its payload borrowed from the file buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleSection<'a> {
    /// Section header
    pub header: SectionHeader,
    /// Payload bytes
    pub payload: &'a [u8],
    /// Absolute offset of the `MODULE` tag
    pub start: usize,
    /// Absolute offset one past the payload
    pub end: usize,
}

impl<'a> ModuleSection<'a> {
    /// Read the section at the cursor.
    ///
    /// With `expected` set, the short and long names must equal the given
    /// padded names. The cursor only advances when the whole section,
    /// payload included, is present.
    pub fn read(
        cursor: &mut ByteCursor<'a>,
        expected: Option<(&[u8], &[u8])>,
    ) -> Result<ModuleSection<'a>> {
        let start = cursor.position();
        let mut local = cursor.clone();

        local.expect(SECTION_TAG)?;
        let names_offset = local.position();
        let short_name: [u8; SHORT_NAME_LEN] = fixed_array(local.read_raw(SHORT_NAME_LEN)?);
        let long_name: [u8; LONG_NAME_LEN] = fixed_array(local.read_raw(LONG_NAME_LEN)?);

        if let Some((short, long)) = expected {
            if short_name.as_slice() != short {
                return Err(CodecError::format_mismatch(names_offset, short, &short_name));
            }
            if long_name.as_slice() != long {
                return Err(CodecError::format_mismatch(
                    names_offset + SHORT_NAME_LEN,
                    long,
                    &long_name,
                ));
            }
        }

        let payload_len = local.read_u32()?;
        let version = local.read_u32()?;
        let date: [u8; DATE_LEN] = fixed_array(local.read_raw(DATE_LEN)?);

        let payload_offset = local.position();
        if payload_len as usize > local.remaining() {
            return Err(CodecError::truncated(
                format!("section '{}' payload", trimmed(&short_name)),
                payload_offset,
                payload_len as usize,
                local.remaining(),
            ));
        }
        let payload = local.read_raw(payload_len as usize)?;

        *cursor = local;
        Ok(ModuleSection {
            header: SectionHeader {
                short_name,
                long_name,
                payload_len,
                version,
                date,
            },
            payload,
            start,
            end: cursor.position(),
        })
    }

    /// Serialize header and payload.
    pub fn encode(&self) -> Vec<u8> {
        let mut out = self.header.encode();
        out.extend_from_slice(self.payload);
        out
    }
}

/// Bytes opening every modular file.
pub fn encode_file_magic() -> Vec<u8> {
    FILE_MAGIC.to_vec()
}

/// Short name of the section starting at `offset`, if that many bytes exist.
pub(crate) fn short_name_at(data: &[u8], offset: usize) -> Option<&[u8]> {
    let start = offset + SECTION_TAG.len();
    data.get(start..start + SHORT_NAME_LEN)
}

fn fixed_array<const N: usize>(bytes: &[u8]) -> [u8; N] {
    let mut out = [0u8; N];
    out.copy_from_slice(&bytes[..N]);
    out
}

fn padded<const N: usize>(text: &[u8]) -> [u8; N] {
    let mut out = [b' '; N];
    let len = text.len().min(N);
    out[..len].copy_from_slice(&text[..len]);
    out
}

fn trimmed(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes)
        .trim_end_matches(|c| c == ' ' || c == '\0')
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::formats::mpr::constants::{
        DATA_LONG_NAME, DATA_SHORT_NAME, SETTINGS_LONG_NAME, SETTINGS_SHORT_NAME,
    };

    fn settings_section(payload: &[u8]) -> Vec<u8> {
        let header = SectionHeader::new("VMP Set", "VMP settings", payload.len() as u32, 0, "08/25/23");
        let mut out = header.encode();
        out.extend_from_slice(payload);
        out
    }

    #[test]
    fn test_header_encode_read_back() {
        let bytes = settings_section(b"abc");
        let mut cursor = ByteCursor::new(&bytes);
        let section = ModuleSection::read(
            &mut cursor,
            Some((SETTINGS_SHORT_NAME.as_slice(), SETTINGS_LONG_NAME.as_slice())),
        )
        .unwrap();

        assert_eq!(section.header.short_name_str(), "VMP Set");
        assert_eq!(section.header.long_name_str(), "VMP settings");
        assert_eq!(section.payload, b"abc");
        assert_eq!(section.start, 0);
        assert_eq!(section.end, bytes.len());
        assert_eq!(section.encode(), bytes);
        assert_eq!(
            section.header.date(),
            NaiveDate::from_ymd_opt(2023, 8, 25)
        );
    }

    #[test]
    fn test_wrong_tag_is_format_mismatch() {
        let bytes = settings_section(b"");
        let mut cursor = ByteCursor::new(&bytes);
        let err =
            ModuleSection::read(&mut cursor, Some((DATA_SHORT_NAME.as_slice(), DATA_LONG_NAME.as_slice()))).unwrap_err();
        assert!(matches!(err, CodecError::FormatMismatch { offset: 6, .. }));
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn test_payload_overrun_is_truncated() {
        let mut bytes = settings_section(b"abcd");
        bytes.truncate(bytes.len() - 2);
        let mut cursor = ByteCursor::new(&bytes);
        let err = ModuleSection::read(&mut cursor, None).unwrap_err();
        assert!(matches!(
            err,
            CodecError::TruncatedFile {
                requested: 4,
                available: 2,
                ..
            }
        ));
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn test_invalid_date_text() {
        let header = SectionHeader::new("VMP data", "VMP data", 0, 2, "xx/yy/zz");
        assert_eq!(header.date_text(), "xx/yy/zz");
        assert!(header.date().is_none());
    }

    #[test]
    fn test_file_magic() {
        let magic = encode_file_magic();
        assert!(magic.starts_with(b"BIO-LOGIC MODULAR FILE\x1a"));
        assert_eq!(magic.len(), 0x34);
    }
}
