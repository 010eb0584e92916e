// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Fixed-width field codec.
//!
//! A [`FieldSpec`] pairs a primitive type with its byte order. Byte order is
//! part of the `FieldSpec` constant ([`F32`] vs [`F32_BE`]), so call sites never pass
//! an endianness flag around.

use byteorder::{BigEndian, ByteOrder, LittleEndian};
use serde::Serialize;

use crate::core::{CodecError, FieldValue, PrimitiveType, Result};

/// Byte order of a field on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Endian {
    Little,
    Big,
}

/// Primitive type plus byte order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct FieldSpec {
    /// Primitive type
    pub ty: PrimitiveType,
    /// Byte order
    pub endian: Endian,
}

impl FieldSpec {
    /// Little-endian spec.
    pub const fn le(ty: PrimitiveType) -> Self {
        Self {
            ty,
            endian: Endian::Little,
        }
    }

    /// Big-endian spec.
    pub const fn be(ty: PrimitiveType) -> Self {
        Self {
            ty,
            endian: Endian::Big,
        }
    }

    /// Size on disk in bytes.
    pub const fn byte_size(&self) -> usize {
        self.ty.byte_size()
    }
}

pub const U8: FieldSpec = FieldSpec::le(PrimitiveType::UInt8);
pub const U16: FieldSpec = FieldSpec::le(PrimitiveType::UInt16);
pub const U32: FieldSpec = FieldSpec::le(PrimitiveType::UInt32);
pub const U64: FieldSpec = FieldSpec::le(PrimitiveType::UInt64);
pub const I8: FieldSpec = FieldSpec::le(PrimitiveType::Int8);
pub const I16: FieldSpec = FieldSpec::le(PrimitiveType::Int16);
pub const I32: FieldSpec = FieldSpec::le(PrimitiveType::Int32);
pub const I64: FieldSpec = FieldSpec::le(PrimitiveType::Int64);
pub const F32: FieldSpec = FieldSpec::le(PrimitiveType::Float32);
pub const F64: FieldSpec = FieldSpec::le(PrimitiveType::Float64);
pub const F32_BE: FieldSpec = FieldSpec::be(PrimitiveType::Float32);
pub const F64_BE: FieldSpec = FieldSpec::be(PrimitiveType::Float64);

fn decode_with<B: ByteOrder>(bytes: &[u8], ty: PrimitiveType) -> FieldValue {
    match ty {
        PrimitiveType::UInt8 => FieldValue::UInt8(bytes[0]),
        PrimitiveType::Int8 => FieldValue::Int8(bytes[0] as i8),
        PrimitiveType::UInt16 => FieldValue::UInt16(B::read_u16(bytes)),
        PrimitiveType::Int16 => FieldValue::Int16(B::read_i16(bytes)),
        PrimitiveType::UInt32 => FieldValue::UInt32(B::read_u32(bytes)),
        PrimitiveType::Int32 => FieldValue::Int32(B::read_i32(bytes)),
        PrimitiveType::UInt64 => FieldValue::UInt64(B::read_u64(bytes)),
        PrimitiveType::Int64 => FieldValue::Int64(B::read_i64(bytes)),
        PrimitiveType::Float32 => FieldValue::Float32(B::read_f32(bytes)),
        PrimitiveType::Float64 => FieldValue::Float64(B::read_f64(bytes)),
    }
}

/// Decode a field from a slice of exactly `spec.byte_size()` bytes.
///
/// Callers are responsible for the length; see [`read_fixed_at`] for the
/// bounds-checked form.
pub(crate) fn decode_field(bytes: &[u8], spec: FieldSpec) -> FieldValue {
    match spec.endian {
        Endian::Little => decode_with::<LittleEndian>(bytes, spec.ty),
        Endian::Big => decode_with::<BigEndian>(bytes, spec.ty),
    }
}

/// Decode a field at an absolute offset without touching any cursor.
pub fn read_fixed_at(data: &[u8], offset: usize, spec: FieldSpec) -> Result<FieldValue> {
    let size = spec.byte_size();
    let end = offset
        .checked_add(size)
        .filter(|&end| end <= data.len())
        .ok_or_else(|| {
            CodecError::truncated(
                format!("{} field", spec.ty.as_str()),
                offset,
                size,
                data.len().saturating_sub(offset),
            )
        })?;
    Ok(decode_field(&data[offset..end], spec))
}

/// Raw bytes at an absolute offset without touching any cursor.
pub fn read_raw_at(data: &[u8], offset: usize, len: usize) -> Result<&[u8]> {
    offset
        .checked_add(len)
        .filter(|&end| end <= data.len())
        .map(|end| &data[offset..end])
        .ok_or_else(|| {
            CodecError::truncated("raw bytes", offset, len, data.len().saturating_sub(offset))
        })
}

/// Unsigned sub-byte field: `(flags >> bit_offset) mod 2^bit_width`.
#[inline]
pub fn bit_field(flags: u8, bit_offset: u8, bit_width: u8) -> u8 {
    let shifted = u16::from(flags) >> bit_offset;
    (shifted % (1u16 << bit_width)) as u8
}

/// Text field trimmed at the first zero byte.
pub fn c_string(bytes: &[u8]) -> String {
    let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    String::from_utf8_lossy(&bytes[..end]).into_owned()
}
