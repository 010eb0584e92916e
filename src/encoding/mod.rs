// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Low-level decoding primitives.
//!
//! - [`cursor`] - Sequential, forward-only [`ByteCursor`]
//! - [`field`] - Fixed-width [`FieldSpec`] decoding and bit-fields

pub mod cursor;
pub mod field;

pub use cursor::ByteCursor;
pub use field::{bit_field, c_string, read_fixed_at, read_raw_at, Endian, FieldSpec};
