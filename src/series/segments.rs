// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Step and half-cycle segmentation.
//!
//! Boundaries are marked on the leading edge: a mark `m` means row `m` is the
//! last row of its segment and row `m + 1` starts the next one.

/// Rows `i` where `step_ids[i] != step_ids[i + 1]`, ascending.
pub fn step_changes<T: PartialEq>(step_ids: &[T]) -> Vec<usize> {
    step_ids
        .windows(2)
        .enumerate()
        .filter(|(_, pair)| pair[0] != pair[1])
        .map(|(i, _)| i)
        .collect()
}

/// Half-cycle boundary marks.
///
/// For each trigger mode, every maximal run of consecutive rows in that mode
/// marks the row before it (clamped to 0). Row 0 is always marked. The union
/// is returned sorted and without duplicates.
pub fn half_cycle_changes<T: PartialEq>(modes: &[T], triggers: &[T]) -> Vec<usize> {
    let mut marks = vec![0];
    for trigger in triggers {
        let mut in_run = false;
        for (i, mode) in modes.iter().enumerate() {
            let hit = mode == trigger;
            if hit && !in_run {
                marks.push(i.saturating_sub(1));
            }
            in_run = hit;
        }
    }
    marks.sort_unstable();
    marks.dedup();
    marks
}

/// Per-row half-cycle index from sorted boundary marks.
///
/// The index counts the marks after row 0 that lie strictly before the row,
/// so it starts at 0, never decreases and only changes on the row after a
/// mark.
pub fn half_cycle_index(rows: usize, marks: &[usize]) -> Vec<u32> {
    let mut boundaries = marks.iter().copied().filter(|&m| m > 0).peekable();
    let mut index = 0u32;
    (0..rows)
        .map(|row| {
            while boundaries.next_if(|&m| m < row).is_some() {
                index += 1;
            }
            index
        })
        .collect()
}
