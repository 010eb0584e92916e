// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Closed field-code registry for BioLogic data sections.
//!
//! Every column in a modular data section is identified by a 2-byte code.
//! The table is fixed; an unknown code almost always means newer firmware and
//! is reported as `UnknownFieldCode`.

use crate::core::{CodecError, Result};
use crate::encoding::field::{F32, F64, U16, U32};

use super::descriptor::{ColumnDescriptor, RecordLayout};

/// Name of the native step-index column ("Ns").
pub const STEP_ID: &str = "step_id";
/// Name of the native mode flag column.
pub const MODE: &str = "mode";

/// Resolve a BioLogic field code.
pub fn biologic_column(code: u16) -> Result<ColumnDescriptor> {
    let descriptor = match code {
        0x01 => ColumnDescriptor::flag(MODE, 0, 2),
        0x02 => ColumnDescriptor::flag("ox_red", 2, 1),
        0x03 => ColumnDescriptor::flag("error", 3, 1),
        0x04 => ColumnDescriptor::fixed("time", F64),
        0x05 => ColumnDescriptor::fixed("control_i", F32),
        0x06 => ColumnDescriptor::fixed("ewe", F32),
        0x07 => ColumnDescriptor::fixed("dq", F64),
        0x0d => ColumnDescriptor::fixed("q_q0", F64),
        0x15 => ColumnDescriptor::flag("control_change", 4, 1),
        0x18 => ColumnDescriptor::fixed("cycle_number", F64),
        0x1f => ColumnDescriptor::flag("ns_change", 5, 1),
        0x20 => ColumnDescriptor::fixed("freq", F32),
        0x21 => ColumnDescriptor::fixed("abs_ewe", F32),
        0x22 => ColumnDescriptor::fixed("abs_i", F32),
        0x23 => ColumnDescriptor::fixed("phase_z", F32),
        0x24 => ColumnDescriptor::fixed("abs_z", F32),
        0x25 => ColumnDescriptor::fixed("re_z", F32),
        0x26 => ColumnDescriptor::fixed("neg_im_z", F32),
        0x27 => ColumnDescriptor::fixed("i_range", U16),
        0x41 => ColumnDescriptor::flag("counter_change", 7, 1),
        0x46 => ColumnDescriptor::fixed("power", F32),
        0x4c => ColumnDescriptor::fixed("mean_i", F32),
        0x4d => ColumnDescriptor::fixed("mean_ewe", F32),
        0x7b => ColumnDescriptor::fixed("energy_charge", F64),
        0x7c => ColumnDescriptor::fixed("energy_discharge", F64),
        0x7d => ColumnDescriptor::fixed("capacitance_charge", F64),
        0x7e => ColumnDescriptor::fixed("capacitance_discharge", F64),
        0x83 => ColumnDescriptor::fixed(STEP_ID, U16),
        0xa9 => ColumnDescriptor::fixed("cs", F32),
        0xac => ColumnDescriptor::fixed("cp", F32),
        0x1d3 => ColumnDescriptor::fixed("q_charge_discharge", F64),
        0x1d4 => ColumnDescriptor::fixed("half_cycle", U32),
        _ => return Err(CodecError::unknown_field_code(code)),
    };
    Ok(descriptor)
}

/// Resolve a sequence of field codes into a record layout, in code order.
pub fn resolve_biologic_layout(codes: &[u16]) -> Result<RecordLayout> {
    let columns = codes
        .iter()
        .map(|&code| biologic_column(code))
        .collect::<Result<Vec<_>>>()?;
    Ok(RecordLayout::new(columns))
}
