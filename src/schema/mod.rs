// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Record schemas.
//!
//! This module provides:
//! - [`ColumnDescriptor`] / [`ColumnKind`] - Fixed or flag-packed columns
//! - [`RecordLayout`] - Row offsets and stride for one file's columns
//! - [`registry`] - The closed BioLogic field-code table

pub mod descriptor;
pub mod registry;

pub use descriptor::{ColumnDescriptor, ColumnKind, RecordLayout};
pub use registry::{biologic_column, resolve_biologic_layout};
