// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Typed values and column storage.
//!
//! A decoded field is a [`FieldValue`]; a decoded column is a [`ColumnData`],
//! a homogeneous vector whose element type is fixed by the column's
//! descriptor. Keeping columns typed avoids a per-cell enum in the table.

use serde::Serialize;

/// Primitive on-disk types understood by the field codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PrimitiveType {
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    Int8,
    Int16,
    Int32,
    Int64,
    Float32,
    Float64,
}

impl PrimitiveType {
    /// Size of the type on disk in bytes.
    pub const fn byte_size(self) -> usize {
        match self {
            PrimitiveType::UInt8 | PrimitiveType::Int8 => 1,
            PrimitiveType::UInt16 | PrimitiveType::Int16 => 2,
            PrimitiveType::UInt32 | PrimitiveType::Int32 | PrimitiveType::Float32 => 4,
            PrimitiveType::UInt64 | PrimitiveType::Int64 | PrimitiveType::Float64 => 8,
        }
    }

    /// Short type name for diagnostics.
    pub fn as_str(self) -> &'static str {
        match self {
            PrimitiveType::UInt8 => "u8",
            PrimitiveType::UInt16 => "u16",
            PrimitiveType::UInt32 => "u32",
            PrimitiveType::UInt64 => "u64",
            PrimitiveType::Int8 => "i8",
            PrimitiveType::Int16 => "i16",
            PrimitiveType::Int32 => "i32",
            PrimitiveType::Int64 => "i64",
            PrimitiveType::Float32 => "f32",
            PrimitiveType::Float64 => "f64",
        }
    }
}

/// A single decoded field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum FieldValue {
    UInt8(u8),
    UInt16(u16),
    UInt32(u32),
    UInt64(u64),
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    Float32(f32),
    Float64(f64),
}

impl FieldValue {
    /// The primitive type of this value.
    pub fn primitive_type(&self) -> PrimitiveType {
        match self {
            FieldValue::UInt8(_) => PrimitiveType::UInt8,
            FieldValue::UInt16(_) => PrimitiveType::UInt16,
            FieldValue::UInt32(_) => PrimitiveType::UInt32,
            FieldValue::UInt64(_) => PrimitiveType::UInt64,
            FieldValue::Int8(_) => PrimitiveType::Int8,
            FieldValue::Int16(_) => PrimitiveType::Int16,
            FieldValue::Int32(_) => PrimitiveType::Int32,
            FieldValue::Int64(_) => PrimitiveType::Int64,
            FieldValue::Float32(_) => PrimitiveType::Float32,
            FieldValue::Float64(_) => PrimitiveType::Float64,
        }
    }

    /// Widen to f64.
    pub fn as_f64(&self) -> f64 {
        match *self {
            FieldValue::UInt8(v) => v as f64,
            FieldValue::UInt16(v) => v as f64,
            FieldValue::UInt32(v) => v as f64,
            FieldValue::UInt64(v) => v as f64,
            FieldValue::Int8(v) => v as f64,
            FieldValue::Int16(v) => v as f64,
            FieldValue::Int32(v) => v as f64,
            FieldValue::Int64(v) => v as f64,
            FieldValue::Float32(v) => v as f64,
            FieldValue::Float64(v) => v,
        }
    }

    /// Convert to i64 for integer types only.
    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            FieldValue::UInt8(v) => Some(v as i64),
            FieldValue::UInt16(v) => Some(v as i64),
            FieldValue::UInt32(v) => Some(v as i64),
            FieldValue::UInt64(v) => i64::try_from(v).ok(),
            FieldValue::Int8(v) => Some(v as i64),
            FieldValue::Int16(v) => Some(v as i64),
            FieldValue::Int32(v) => Some(v as i64),
            FieldValue::Int64(v) => Some(v),
            FieldValue::Float32(_) | FieldValue::Float64(_) => None,
        }
    }
}

/// Homogeneous column storage.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ColumnData {
    UInt8(Vec<u8>),
    UInt16(Vec<u16>),
    UInt32(Vec<u32>),
    UInt64(Vec<u64>),
    Int8(Vec<i8>),
    Int16(Vec<i16>),
    Int32(Vec<i32>),
    Int64(Vec<i64>),
    Float32(Vec<f32>),
    Float64(Vec<f64>),
}

macro_rules! dispatch {
    ($self:expr, $v:ident => $body:expr) => {
        match $self {
            ColumnData::UInt8($v) => $body,
            ColumnData::UInt16($v) => $body,
            ColumnData::UInt32($v) => $body,
            ColumnData::UInt64($v) => $body,
            ColumnData::Int8($v) => $body,
            ColumnData::Int16($v) => $body,
            ColumnData::Int32($v) => $body,
            ColumnData::Int64($v) => $body,
            ColumnData::Float32($v) => $body,
            ColumnData::Float64($v) => $body,
        }
    };
}

impl ColumnData {
    /// Create an empty column of the given type with reserved capacity.
    pub fn with_capacity(ty: PrimitiveType, capacity: usize) -> Self {
        match ty {
            PrimitiveType::UInt8 => ColumnData::UInt8(Vec::with_capacity(capacity)),
            PrimitiveType::UInt16 => ColumnData::UInt16(Vec::with_capacity(capacity)),
            PrimitiveType::UInt32 => ColumnData::UInt32(Vec::with_capacity(capacity)),
            PrimitiveType::UInt64 => ColumnData::UInt64(Vec::with_capacity(capacity)),
            PrimitiveType::Int8 => ColumnData::Int8(Vec::with_capacity(capacity)),
            PrimitiveType::Int16 => ColumnData::Int16(Vec::with_capacity(capacity)),
            PrimitiveType::Int32 => ColumnData::Int32(Vec::with_capacity(capacity)),
            PrimitiveType::Int64 => ColumnData::Int64(Vec::with_capacity(capacity)),
            PrimitiveType::Float32 => ColumnData::Float32(Vec::with_capacity(capacity)),
            PrimitiveType::Float64 => ColumnData::Float64(Vec::with_capacity(capacity)),
        }
    }

    /// Element type of this column.
    pub fn primitive_type(&self) -> PrimitiveType {
        match self {
            ColumnData::UInt8(_) => PrimitiveType::UInt8,
            ColumnData::UInt16(_) => PrimitiveType::UInt16,
            ColumnData::UInt32(_) => PrimitiveType::UInt32,
            ColumnData::UInt64(_) => PrimitiveType::UInt64,
            ColumnData::Int8(_) => PrimitiveType::Int8,
            ColumnData::Int16(_) => PrimitiveType::Int16,
            ColumnData::Int32(_) => PrimitiveType::Int32,
            ColumnData::Int64(_) => PrimitiveType::Int64,
            ColumnData::Float32(_) => PrimitiveType::Float32,
            ColumnData::Float64(_) => PrimitiveType::Float64,
        }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        dispatch!(self, v => v.len())
    }

    /// Check if the column has no rows.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Append a value. Returns `false` when the value type does not match.
    pub fn push(&mut self, value: FieldValue) -> bool {
        match (self, value) {
            (ColumnData::UInt8(v), FieldValue::UInt8(x)) => v.push(x),
            (ColumnData::UInt16(v), FieldValue::UInt16(x)) => v.push(x),
            (ColumnData::UInt32(v), FieldValue::UInt32(x)) => v.push(x),
            (ColumnData::UInt64(v), FieldValue::UInt64(x)) => v.push(x),
            (ColumnData::Int8(v), FieldValue::Int8(x)) => v.push(x),
            (ColumnData::Int16(v), FieldValue::Int16(x)) => v.push(x),
            (ColumnData::Int32(v), FieldValue::Int32(x)) => v.push(x),
            (ColumnData::Int64(v), FieldValue::Int64(x)) => v.push(x),
            (ColumnData::Float32(v), FieldValue::Float32(x)) => v.push(x),
            (ColumnData::Float64(v), FieldValue::Float64(x)) => v.push(x),
            _ => return false,
        }
        true
    }

    /// Append all rows of another column of the same type.
    /// Returns `false` when the types differ.
    pub fn append(&mut self, other: ColumnData) -> bool {
        match (self, other) {
            (ColumnData::UInt8(a), ColumnData::UInt8(b)) => a.extend(b),
            (ColumnData::UInt16(a), ColumnData::UInt16(b)) => a.extend(b),
            (ColumnData::UInt32(a), ColumnData::UInt32(b)) => a.extend(b),
            (ColumnData::UInt64(a), ColumnData::UInt64(b)) => a.extend(b),
            (ColumnData::Int8(a), ColumnData::Int8(b)) => a.extend(b),
            (ColumnData::Int16(a), ColumnData::Int16(b)) => a.extend(b),
            (ColumnData::Int32(a), ColumnData::Int32(b)) => a.extend(b),
            (ColumnData::Int64(a), ColumnData::Int64(b)) => a.extend(b),
            (ColumnData::Float32(a), ColumnData::Float32(b)) => a.extend(b),
            (ColumnData::Float64(a), ColumnData::Float64(b)) => a.extend(b),
            _ => return false,
        }
        true
    }

    /// Value at a row.
    pub fn get(&self, row: usize) -> Option<FieldValue> {
        match self {
            ColumnData::UInt8(v) => v.get(row).copied().map(FieldValue::UInt8),
            ColumnData::UInt16(v) => v.get(row).copied().map(FieldValue::UInt16),
            ColumnData::UInt32(v) => v.get(row).copied().map(FieldValue::UInt32),
            ColumnData::UInt64(v) => v.get(row).copied().map(FieldValue::UInt64),
            ColumnData::Int8(v) => v.get(row).copied().map(FieldValue::Int8),
            ColumnData::Int16(v) => v.get(row).copied().map(FieldValue::Int16),
            ColumnData::Int32(v) => v.get(row).copied().map(FieldValue::Int32),
            ColumnData::Int64(v) => v.get(row).copied().map(FieldValue::Int64),
            ColumnData::Float32(v) => v.get(row).copied().map(FieldValue::Float32),
            ColumnData::Float64(v) => v.get(row).copied().map(FieldValue::Float64),
        }
    }

    /// Widen every row to f64.
    pub fn to_f64_vec(&self) -> Vec<f64> {
        dispatch!(self, v => v.iter().map(|&x| x as f64).collect())
    }

    /// Every row as i64, or `None` for float columns or out-of-range u64 values.
    pub fn to_i64_vec(&self) -> Option<Vec<i64>> {
        match self {
            ColumnData::Float32(_) | ColumnData::Float64(_) => None,
            ColumnData::UInt64(v) => v.iter().map(|&x| i64::try_from(x).ok()).collect(),
            ColumnData::UInt8(v) => Some(v.iter().map(|&x| x as i64).collect()),
            ColumnData::UInt16(v) => Some(v.iter().map(|&x| x as i64).collect()),
            ColumnData::UInt32(v) => Some(v.iter().map(|&x| x as i64).collect()),
            ColumnData::Int8(v) => Some(v.iter().map(|&x| x as i64).collect()),
            ColumnData::Int16(v) => Some(v.iter().map(|&x| x as i64).collect()),
            ColumnData::Int32(v) => Some(v.iter().map(|&x| x as i64).collect()),
            ColumnData::Int64(v) => Some(v.clone()),
        }
    }

    /// Keep only rows whose mask entry is `true`, preserving order.
    pub(crate) fn retain_mask(&mut self, mask: &[bool]) {
        dispatch!(self, v => {
            let mut keep = mask.iter();
            v.retain(|_| *keep.next().unwrap_or(&false));
        })
    }
}
