// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Column descriptors and per-file record layouts.
//!
//! A column is either a fixed-width field placed back-to-back after the
//! previous one, or a sub-byte flag packed into the single flags byte that
//! leads each record. The kind is resolved once per file and dispatched by
//! `match` afterwards.

use serde::Serialize;

use crate::core::{CodecError, ColumnData, FieldValue, PrimitiveType, Result};
use crate::encoding::field::{bit_field, read_fixed_at, FieldSpec};

/// How a column is stored within a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ColumnKind {
    /// Fixed-width typed field.
    Fixed(FieldSpec),
    /// Bits `[bit_offset, bit_offset + bit_width)` of the leading flags byte.
    Flag { bit_offset: u8, bit_width: u8 },
}

/// A named column and its storage kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ColumnDescriptor {
    /// Column name in the decoded table
    pub name: &'static str,
    /// Storage kind
    pub kind: ColumnKind,
}

impl ColumnDescriptor {
    /// Fixed-width column.
    pub const fn fixed(name: &'static str, spec: FieldSpec) -> Self {
        Self {
            name,
            kind: ColumnKind::Fixed(spec),
        }
    }

    /// Flag column.
    pub const fn flag(name: &'static str, bit_offset: u8, bit_width: u8) -> Self {
        Self {
            name,
            kind: ColumnKind::Flag {
                bit_offset,
                bit_width,
            },
        }
    }

    /// Check if this is a flag column.
    pub fn is_flag(&self) -> bool {
        matches!(self.kind, ColumnKind::Flag { .. })
    }

    /// Bytes this column adds to the record stride (flags share one byte).
    pub fn byte_size(&self) -> usize {
        match self.kind {
            ColumnKind::Fixed(spec) => spec.byte_size(),
            ColumnKind::Flag { .. } => 0,
        }
    }

    /// Element type of the decoded column.
    pub fn primitive_type(&self) -> PrimitiveType {
        match self.kind {
            ColumnKind::Fixed(spec) => spec.ty,
            ColumnKind::Flag { .. } => PrimitiveType::UInt8,
        }
    }
}

/// Ordered columns of one record plus their byte offsets within a row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordLayout {
    columns: Vec<ColumnDescriptor>,
    offsets: Vec<usize>,
    stride: usize,
    has_flags: bool,
}

impl RecordLayout {
    /// Lay out columns in declared order.
    ///
    /// When any column is a flag, the flags byte sits at row offset 0 and
    /// shifts every fixed column by one. Flag columns report offset 0.
    pub fn new(columns: Vec<ColumnDescriptor>) -> Self {
        let has_flags = columns.iter().any(ColumnDescriptor::is_flag);
        let mut next = usize::from(has_flags);
        let offsets = columns
            .iter()
            .map(|column| match column.kind {
                ColumnKind::Flag { .. } => 0,
                ColumnKind::Fixed(spec) => {
                    let offset = next;
                    next += spec.byte_size();
                    offset
                }
            })
            .collect();

        Self {
            columns,
            offsets,
            stride: next,
            has_flags,
        }
    }

    /// Columns in on-disk order.
    pub fn columns(&self) -> &[ColumnDescriptor] {
        &self.columns
    }

    /// Byte offset of each column within a row.
    pub fn offsets(&self) -> &[usize] {
        &self.offsets
    }

    /// Bytes per record.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Whether records start with a flags byte.
    pub fn has_flags(&self) -> bool {
        self.has_flags
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Check if the layout has no columns.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Empty output columns with capacity for `rows` values.
    pub fn empty_columns(&self, rows: usize) -> Vec<ColumnData> {
        self.columns
            .iter()
            .map(|c| ColumnData::with_capacity(c.primitive_type(), rows))
            .collect()
    }

    /// Decode one cell of the record starting at `row_base`.
    pub fn read_cell(&self, data: &[u8], row_base: usize, column: usize) -> Result<FieldValue> {
        let descriptor = &self.columns[column];
        match descriptor.kind {
            ColumnKind::Fixed(spec) => read_fixed_at(data, row_base + self.offsets[column], spec),
            ColumnKind::Flag {
                bit_offset,
                bit_width,
            } => {
                let flags = *data.get(row_base).ok_or_else(|| {
                    CodecError::truncated(
                        "record flags byte",
                        row_base,
                        1,
                        data.len().saturating_sub(row_base),
                    )
                })?;
                Ok(FieldValue::UInt8(bit_field(flags, bit_offset, bit_width)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::field::{F32, F64, U16};

    #[test]
    fn test_layout_without_flags() {
        let layout = RecordLayout::new(vec![
            ColumnDescriptor::fixed("time", F64),
            ColumnDescriptor::fixed("ewe", F32),
        ]);
        assert!(!layout.has_flags());
        assert_eq!(layout.offsets(), &[0, 8]);
        assert_eq!(layout.stride(), 12);
    }

    #[test]
    fn test_layout_with_interleaved_flags() {
        let layout = RecordLayout::new(vec![
            ColumnDescriptor::flag("mode", 0, 2),
            ColumnDescriptor::fixed("time", F64),
            ColumnDescriptor::flag("ox_red", 2, 1),
            ColumnDescriptor::fixed("step_id", U16),
        ]);
        assert!(layout.has_flags());
        assert_eq!(layout.offsets(), &[0, 1, 0, 9]);
        assert_eq!(layout.stride(), 11);
    }

    #[test]
    fn test_layout_trailing_flag() {
        let layout = RecordLayout::new(vec![
            ColumnDescriptor::fixed("ewe", F32),
            ColumnDescriptor::flag("error", 3, 1),
        ]);
        assert_eq!(layout.offsets(), &[1, 0]);
        assert_eq!(layout.stride(), 5);
    }

    #[test]
    fn test_read_cell() {
        let layout = RecordLayout::new(vec![
            ColumnDescriptor::flag("mode", 0, 2),
            ColumnDescriptor::fixed("ewe", F32),
        ]);
        let mut row = vec![0b0000_0110u8];
        row.extend_from_slice(&3.5f32.to_le_bytes());
        assert_eq!(layout.read_cell(&row, 0, 0).unwrap(), FieldValue::UInt8(2));
        assert_eq!(layout.read_cell(&row, 0, 1).unwrap(), FieldValue::Float32(3.5));
    }

    #[test]
    fn test_read_cell_past_end() {
        let layout = RecordLayout::new(vec![
            ColumnDescriptor::flag("mode", 0, 2),
            ColumnDescriptor::fixed("ewe", F32),
        ]);
        let row = [0b0000_0001u8, 0, 0, 0, 0];
        assert!(matches!(
            layout.read_cell(&row, row.len(), 0),
            Err(CodecError::TruncatedFile {
                requested: 1,
                available: 0,
                ..
            })
        ));
        assert!(matches!(
            layout.read_cell(&row, row.len(), 1),
            Err(CodecError::TruncatedFile { .. })
        ));
    }
}
