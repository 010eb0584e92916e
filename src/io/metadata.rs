// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! File-level metadata shared by both formats.

use serde::Serialize;

use crate::core::Instrument;

/// Container format of a cycler file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FileFormat {
    /// BioLogic modular file (`.mpr`)
    Modular,
    /// Neware / BTS fixed-record file (`.nda`)
    FixedRecord,
    /// Not recognized
    Unknown,
}

impl FileFormat {
    /// Instrument family that writes this format.
    pub fn instrument(&self) -> Option<Instrument> {
        match self {
            FileFormat::Modular => Some(Instrument::Biologic),
            FileFormat::FixedRecord => Some(Instrument::Neware),
            FileFormat::Unknown => None,
        }
    }

    /// Conventional file extension.
    pub fn extension(&self) -> Option<&'static str> {
        match self {
            FileFormat::Modular => Some("mpr"),
            FileFormat::FixedRecord => Some("nda"),
            FileFormat::Unknown => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FileFormat::Modular => "modular",
            FileFormat::FixedRecord => "fixed-record",
            FileFormat::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for FileFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
