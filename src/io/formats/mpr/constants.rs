// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! BioLogic modular file constants.
//!
//! Names and the file magic are space-padded on disk; the magic is followed by
//! four zero bytes.

/// Text at the start of every modular file.
pub const FILE_MAGIC_TEXT: &[u8] = b"BIO-LOGIC MODULAR FILE\x1a";
/// Length of the padded magic text.
pub const FILE_MAGIC_TEXT_LEN: usize = 0x30;
/// Full magic length including the trailing zero bytes.
pub const FILE_MAGIC_LEN: usize = FILE_MAGIC_TEXT_LEN + 4;
/// Complete file magic.
pub const FILE_MAGIC: [u8; FILE_MAGIC_LEN] = build_file_magic();

/// Literal opening every section.
pub const SECTION_TAG: &[u8] = b"MODULE";
/// Short section name length.
pub const SHORT_NAME_LEN: usize = 10;
/// Long section name length.
pub const LONG_NAME_LEN: usize = 25;
/// Section date text length.
pub const DATE_LEN: usize = 8;
/// Bytes from the section tag to the start of the payload.
pub const SECTION_HEADER_LEN: usize =
    SECTION_TAG.len() + SHORT_NAME_LEN + LONG_NAME_LEN + 4 + 4 + DATE_LEN;

pub const SETTINGS_SHORT_NAME: [u8; SHORT_NAME_LEN] = pad(b"VMP Set");
pub const SETTINGS_LONG_NAME: [u8; LONG_NAME_LEN] = pad(b"VMP settings");
pub const DATA_SHORT_NAME: [u8; SHORT_NAME_LEN] = pad(b"VMP data");
pub const DATA_LONG_NAME: [u8; LONG_NAME_LEN] = pad(b"VMP data");

/// Byte that ends the data-section column trailer.
pub const DATA_SENTINEL: u8 = 0x01;

/// Value of the `mode` flag column during rest.
pub const REST_MODE: u8 = 3;

const fn pad<const N: usize>(text: &[u8]) -> [u8; N] {
    let mut out = [b' '; N];
    let mut i = 0;
    while i < text.len() && i < N {
        out[i] = text[i];
        i += 1;
    }
    out
}

const fn build_file_magic() -> [u8; FILE_MAGIC_LEN] {
    let mut out = [0u8; FILE_MAGIC_LEN];
    let text: [u8; FILE_MAGIC_TEXT_LEN] = pad(FILE_MAGIC_TEXT);
    let mut i = 0;
    while i < FILE_MAGIC_TEXT_LEN {
        out[i] = text[i];
        i += 1;
    }
    out
}
