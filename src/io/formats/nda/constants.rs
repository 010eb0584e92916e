// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Neware fixed-record file constants.

/// Magic at offset 0.
pub const MAGIC: &[u8] = b"NEWARE";

/// Date text `YYYYMMDD` follows the magic.
pub const DATE_OFFSET: usize = 6;
pub const YEAR_LEN: usize = 4;
pub const MONTH_LEN: usize = 2;
pub const DAY_LEN: usize = 2;

/// Software version string.
pub const VERSION_STRING_OFFSET: usize = 0x70;
pub const VERSION_STRING_LEN: usize = 30;

/// Channel info: machine byte then version byte.
pub const MACHINE_OFFSET: usize = 0x82b;
pub const VERSION_BYTE_OFFSET: usize = 0x82c;

pub const USERNAME_OFFSET: usize = 0x876;
pub const USERNAME_LEN: usize = 15;
pub const BATCH_OFFSET: usize = USERNAME_OFFSET + USERNAME_LEN;
pub const BATCH_LEN: usize = 20;
pub const MEMO_OFFSET: usize = BATCH_OFFSET + BATCH_LEN;
pub const MEMO_LEN: usize = 100;

/// The step table starts right after the memo.
pub const STEP_TABLE_OFFSET: usize = MEMO_OFFSET + MEMO_LEN;

/// Step ids are one byte; parsing gives up when the expected id reaches this.
pub const MAX_STEP_ID: u8 = 0xff;

/// Step mode tags.
pub const MODE_CC_CHARGE: u8 = 1;
pub const MODE_CC_DISCHARGE: u8 = 2;
pub const MODE_REST: u8 = 4;
pub const MODE_LOOP: u8 = 5;
pub const MODE_STOP: u8 = 6;

/// Reserved i32 words after each step's parameters.
pub const CC_RESERVED_WORDS: usize = 2;
pub const REST_RESERVED_WORDS: usize = 4;
pub const LOOP_RESERVED_WORDS: usize = 3;
pub const STOP_RESERVED_WORDS: usize = 5;

/// Size of one packed record.
pub const RECORD_LEN: usize = 59;

/// Record status of a valid measurement.
pub const STATUS_SUCCESS: u8 = 0;

/// µA to mA.
pub const CURRENT_SCALE: f64 = 1e-3;
/// 0.1 mV to V.
pub const VOLTAGE_SCALE: f64 = 1e-4;
/// µA·s to mA·h.
pub const CHARGE_SCALE: f64 = 1e-3 / 3600.0;
/// µW·s to W·h.
pub const ENERGY_SCALE: f64 = 1e-6 / 3600.0;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offsets() {
        assert_eq!(BATCH_OFFSET, 0x885);
        assert_eq!(MEMO_OFFSET, 0x899);
        assert_eq!(STEP_TABLE_OFFSET, 0x8fd);
    }
}
