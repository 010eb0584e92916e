// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! File format implementations for cycler data.
//!
//! - [`mpr`]: BioLogic modular files
//! - [`nda`]: Neware / BTS fixed-record files
//! - [`record_array`]: Sequential and parallel record-array decoding shared by both

pub mod mpr;
pub mod nda;
pub mod record_array;
