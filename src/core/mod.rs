// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Core types used throughout cyclecodec.
//!
//! This module provides the foundational types for the library:
//! - [`CodecError`] - Decode error taxonomy
//! - [`FieldValue`] / [`ColumnData`] - Typed values and columns
//! - [`RecordTable`] - The decoded, row-ordered table
//! - [`Instrument`] - Instrument family identifier

pub mod error;
pub mod table;
pub mod value;

use serde::Serialize;

pub use error::{CodecError, Result};
pub use table::{Column, RecordTable, ELAPSED_TIME, HALF_CYCLE_INDEX, NET_CHARGE};
pub use value::{ColumnData, FieldValue, PrimitiveType};

/// Instrument family that produced a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Instrument {
    /// BioLogic potentiostats (modular `.mpr` files)
    Biologic,
    /// Neware / BTS cyclers (fixed-record `.nda` files)
    Neware,
}

/// Error returned when parsing an `Instrument` from string fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseInstrumentError {
    _private: (),
}

impl std::fmt::Display for ParseInstrumentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid instrument name, expected 'biologic' or 'neware'")
    }
}

impl std::error::Error for ParseInstrumentError {}

impl std::str::FromStr for Instrument {
    type Err = ParseInstrumentError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "biologic" => Ok(Instrument::Biologic),
            "neware" | "bts" => Ok(Instrument::Neware),
            _ => Err(ParseInstrumentError { _private: () }),
        }
    }
}

impl Instrument {
    /// Convert to string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Instrument::Biologic => "biologic",
            Instrument::Neware => "neware",
        }
    }
}
