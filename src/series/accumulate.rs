// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Reset-relative accumulation.
//!
//! Instruments restart per-step quantities (step time, step charge) at every
//! step. Accumulating the value of each step's last row turns them back into
//! experiment-relative series.

/// `out[i] = acc + raw[i]`, where `acc` grows by `raw[m]` after every mark `m`.
///
/// `changes` must be sorted ascending; marks past the end are ignored.
pub fn accumulate_steps(raw: &[f64], changes: &[usize]) -> Vec<f64> {
    let mut marks = changes.iter().copied().peekable();
    let mut acc = 0.0;
    raw.iter()
        .enumerate()
        .map(|(i, &value)| {
            let out = acc + value;
            let mut reset = false;
            while let Some(m) = marks.next_if(|&m| m <= i) {
                reset |= m == i;
            }
            if reset {
                acc += value;
            }
            out
        })
        .collect()
}
