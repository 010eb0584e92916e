// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Synthetic cycler files for integration tests.

#![allow(dead_code)]

use std::io::Write;

use cyclecodec::io::formats::mpr::{encode_file_magic, SectionHeader};
use cyclecodec::io::formats::nda::constants as nda;

// ============================================================================
// BioLogic modular files
// ============================================================================

/// Data section payload: counts, codes, trailer, sentinel, then raw rows.
pub fn mpr_data_payload(codes: &[u16], trailer: &[u8], rows: &[Vec<u8>]) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(&(rows.len() as u32).to_le_bytes());
    out.push(codes.len() as u8);
    for code in codes {
        out.extend_from_slice(&code.to_le_bytes());
    }
    out.extend_from_slice(trailer);
    out.push(0x01);
    for row in rows {
        out.extend_from_slice(row);
    }
    out
}

/// One framed section.
pub fn mpr_section(short: &str, long: &str, version: u32, payload: &[u8]) -> Vec<u8> {
    let mut out = SectionHeader::new(short, long, payload.len() as u32, version, "03/15/24").encode();
    out.extend_from_slice(payload);
    out
}

/// Magic, settings section and data section.
pub fn mpr_file(settings: &[u8], data_payload: &[u8]) -> Vec<u8> {
    let mut out = encode_file_magic();
    out.extend(mpr_section("VMP Set", "VMP settings", 0, settings));
    out.extend(mpr_section("VMP data", "VMP data", 2, data_payload));
    out
}

/// Rows of `mode` flag (code 0x01), `time` (0x04), `ewe` (0x06) and
/// `step_id` (0x83).
pub fn mpr_cycling_rows(count: usize) -> Vec<Vec<u8>> {
    (0..count)
        .map(|i| {
            let mut row = vec![(i % 3) as u8 + 1];
            row.extend_from_slice(&(i as f64 * 0.25).to_le_bytes());
            row.extend_from_slice(&(3.0f32 + (i % 7) as f32 * 0.01).to_le_bytes());
            row.extend_from_slice(&((i / 50) as u16).to_le_bytes());
            row
        })
        .collect()
}

pub const MPR_CYCLING_CODES: [u16; 4] = [0x01, 0x04, 0x06, 0x83];

// ============================================================================
// Neware fixed-record files
// ============================================================================

/// Header block up to the step table.
pub fn nda_header(date: &[u8; 8]) -> Vec<u8> {
    let mut data = vec![0u8; nda::STEP_TABLE_OFFSET];
    data[..6].copy_from_slice(nda::MAGIC);
    data[nda::DATE_OFFSET..nda::DATE_OFFSET + 8].copy_from_slice(date);
    let version = b"BTS 7.6.0";
    data[nda::VERSION_STRING_OFFSET..nda::VERSION_STRING_OFFSET + version.len()]
        .copy_from_slice(version);
    data[nda::MACHINE_OFFSET] = 24;
    data[nda::VERSION_BYTE_OFFSET] = 130;
    data[nda::USERNAME_OFFSET..nda::USERNAME_OFFSET + 3].copy_from_slice(b"lab");
    data[nda::BATCH_OFFSET..nda::BATCH_OFFSET + 2].copy_from_slice(b"B7");
    data[nda::MEMO_OFFSET..nda::MEMO_OFFSET + 6].copy_from_slice(b"Li||Cu");
    data
}

/// One step-table entry: id, mode tag and five i32 words.
pub fn nda_step(id: u8, tag: u8, words: [i32; 5]) -> Vec<u8> {
    let mut out = vec![id, tag];
    for word in words {
        out.extend_from_slice(&word.to_le_bytes());
    }
    out
}

/// Raw (unscaled) record fields.
#[derive(Debug, Clone, Default)]
pub struct NdaRecord {
    pub status: u8,
    pub record_no: u32,
    pub cycle_number: u32,
    pub step_id: u8,
    pub mode: u8,
    pub step_time: u32,
    pub voltage: i32,
    pub current: i32,
    pub temperature: i64,
    pub charge: i64,
    pub energy: i64,
    pub clock_time: u64,
    pub checksum: u32,
}

impl NdaRecord {
    pub fn new(step_id: u8, mode: u8, step_time: u32, charge: i64) -> Self {
        Self {
            step_id,
            mode,
            step_time,
            charge,
            voltage: 37_000,
            current: if mode == nda::MODE_REST { 0 } else { 1_000 },
            ..Default::default()
        }
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(nda::RECORD_LEN);
        out.push(self.status);
        out.extend_from_slice(&self.record_no.to_le_bytes());
        out.extend_from_slice(&self.cycle_number.to_le_bytes());
        out.push(self.step_id);
        out.push(self.mode);
        out.extend_from_slice(&self.step_time.to_le_bytes());
        out.extend_from_slice(&self.voltage.to_le_bytes());
        out.extend_from_slice(&self.current.to_le_bytes());
        out.extend_from_slice(&self.temperature.to_le_bytes());
        out.extend_from_slice(&self.charge.to_le_bytes());
        out.extend_from_slice(&self.energy.to_le_bytes());
        out.extend_from_slice(&self.clock_time.to_le_bytes());
        out.extend_from_slice(&self.checksum.to_le_bytes());
        out
    }
}

/// Header, step table, one byte that ends the table, then records.
///
/// Real files follow the table with a non-matching byte; records start right
/// on it, so the first record's status byte (0) doubles as that terminator.
pub fn nda_file(steps: &[Vec<u8>], records: &[NdaRecord]) -> Vec<u8> {
    let mut out = nda_header(b"20240315");
    for step in steps {
        out.extend_from_slice(step);
    }
    for (i, record) in records.iter().enumerate() {
        let mut record = record.clone();
        record.record_no = i as u32 + 1;
        out.extend(record.encode());
    }
    out
}

/// Rest (step 1) then CC charge (step 2), two records each.
pub fn nda_rest_then_charge() -> Vec<u8> {
    nda_file(
        &[
            nda_step(1, nda::MODE_REST, [600, 0, 0, 0, 0]),
            nda_step(2, nda::MODE_CC_CHARGE, [1_000, 3_600, 40_000, 0, 0]),
        ],
        &[
            NdaRecord::new(1, nda::MODE_REST, 10, 0),
            NdaRecord::new(1, nda::MODE_REST, 20, 0),
            NdaRecord::new(2, nda::MODE_CC_CHARGE, 5, 3_600_000),
            NdaRecord::new(2, nda::MODE_CC_CHARGE, 15, 7_200_000),
        ],
    )
}

// ============================================================================
// Files on disk
// ============================================================================

/// Write `data` to a temp file with the given extension.
pub fn write_temp(ext: &str, data: &[u8]) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .prefix("cyclecodec_test_")
        .suffix(&format!(".{ext}"))
        .tempfile()
        .expect("create temp file");
    file.write_all(data).expect("write temp file");
    file.flush().expect("flush temp file");
    file
}
