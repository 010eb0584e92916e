// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! I/O layer for cycler data files.
//!
//! - [`formats`] - Modular (`.mpr`) and fixed-record (`.nda`) decoders
//! - [`reader`] - Decode options and the auto-detecting [`CyclerReader`]
//! - [`detection`] / [`arena`] - Format sniffing and memory-mapped access

pub mod arena;
pub mod detection;
pub mod formats;
pub mod metadata;
pub mod reader;

pub use arena::MmapArena;
pub use detection::{detect_format, detect_format_bytes, is_mpr_file, is_nda_file};
pub use metadata::FileFormat;
pub use reader::{CyclerReader, DecodeOptions, DecodeStrategy, DecodedFile};
