// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! # cyclecodec
//!
//! Decoder library for battery-cycler data files.
//!
//! Two file families are supported:
//! - **BioLogic modular** (`.mpr`) files in [`io::formats::mpr`]: a magic
//!   header followed by named sections; the data section declares its own
//!   columns through field codes, some packed as bits of a flags byte.
//! - **Neware / BTS fixed-record** (`.nda`) files in [`io::formats::nda`]: a
//!   fixed-offset header, a step-definition table and packed 59-byte records.
//!
//! Both decode into a [`RecordTable`]. The [`series`] module derives
//! experiment-relative elapsed time, net charge and half-cycle indices from
//! step-relative records, and [`protocol`] selects rows per cycling stage.
//!
//! ## Architecture
//!
//! - `core/` - Errors, typed values, the record table
//! - `encoding/` - Byte cursor and fixed-width field decoding
//! - `schema/` - Column descriptors, record layouts, the BioLogic field registry
//! - `io/` - File formats, record-array decoding strategies, detection, mmap
//! - `series/` - Step and half-cycle segmentation, reset-relative accumulation
//! - `protocol/` - Protocol presets and instrument-aware row selection
//!
//! ## Example
//!
//! ```rust,no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use cyclecodec::io::{CyclerReader, DecodeOptions, DecodeStrategy};
//! use cyclecodec::protocol::{Experiment, ProtocolParameters, Stage};
//!
//! let options = DecodeOptions::new().strategy(DecodeStrategy::Auto);
//! let file = CyclerReader::open("cell_01.nda", &options)?;
//!
//! let protocol = ProtocolParameters::mode1(file.instrument());
//! let experiment = Experiment::from_file(&file, protocol)?;
//! let plating = experiment.stage_rows(Stage::CyclePlating, false)?;
//! println!("{} plating rows", plating.len());
//! # Ok(())
//! # }
//! ```

// Core types
pub mod core;

pub use core::{
    CodecError, Column, ColumnData, FieldValue, Instrument, PrimitiveType, RecordTable, Result,
    ELAPSED_TIME, HALF_CYCLE_INDEX, NET_CHARGE,
};

// Decoding primitives
pub mod encoding;

// Column schemas
pub mod schema;

// File formats, detection and readers
pub mod io;

pub use io::formats::mpr::ModularFile;
pub use io::formats::nda::FixedRecordFile;
pub use io::{CyclerReader, DecodeOptions, DecodeStrategy, DecodedFile, FileFormat};

// Derived series
pub mod series;

pub use series::{DerivedSeries, DerivedSeriesBuilder, SeriesConfig};

// Protocols
pub mod protocol;
