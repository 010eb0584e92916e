// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Segmentation and accumulation invariants over generated step sequences.

use cyclecodec::series::{accumulate_steps, half_cycle_changes, half_cycle_index, step_changes};
use cyclecodec::{Column, ColumnData, DerivedSeriesBuilder, RecordTable, SeriesConfig};

/// Deterministic step-id sequences of assorted shapes.
fn step_sequences() -> Vec<Vec<u8>> {
    let mut seqs = vec![
        vec![],
        vec![1],
        vec![1, 1, 1],
        vec![1, 2],
        vec![1, 1, 2, 2, 3],
        vec![1, 2, 1, 2, 1],
        vec![3, 3, 3, 4],
    ];
    // Linear congruential walk for longer runs.
    let mut state = 17u32;
    for len in [10usize, 57, 200] {
        let mut seq = Vec::with_capacity(len);
        let mut step = 1u8;
        for _ in 0..len {
            state = state.wrapping_mul(1_103_515_245).wrapping_add(12_345);
            if (state >> 16) % 5 == 0 {
                step = step.wrapping_add(1);
            }
            seq.push(step);
        }
        seqs.push(seq);
    }
    seqs
}

#[test]
fn test_step_changes_strictly_increasing() {
    for seq in step_sequences() {
        let changes = step_changes(&seq);
        assert!(changes.windows(2).all(|w| w[0] < w[1]), "{seq:?}");
        assert!(changes.iter().all(|&c| c + 1 < seq.len()), "{seq:?}");
        for &c in &changes {
            assert_ne!(seq[c], seq[c + 1]);
        }
    }
}

#[test]
fn test_last_change_marks_final_step() {
    for seq in step_sequences() {
        if seq.len() < 2 {
            continue;
        }
        let n = seq.len();
        let changes = step_changes(&seq);
        let final_row_changes = seq[n - 1] != seq[n - 2];
        assert_eq!(changes.last() == Some(&(n - 2)), final_row_changes, "{seq:?}");
    }
}

#[test]
fn test_accumulate_without_changes_is_identity() {
    let raw: Vec<f64> = (0..50).map(|i| f64::from(i) * 0.7 - 3.0).collect();
    assert_eq!(accumulate_steps(&raw, &[]), raw);
}

#[test]
fn test_accumulated_time_is_monotonic() {
    for seq in step_sequences() {
        // step time restarts at 1 on every new step
        let mut raw = Vec::with_capacity(seq.len());
        let mut t = 0.0;
        for (i, step) in seq.iter().enumerate() {
            t = if i > 0 && seq[i - 1] != *step { 1.0 } else { t + 1.0 };
            raw.push(t);
        }
        let elapsed = accumulate_steps(&raw, &step_changes(&seq));
        let expected: Vec<f64> = (1..=seq.len()).map(|i| i as f64).collect();
        assert_eq!(elapsed, expected, "{seq:?}");
    }
}

#[test]
fn test_half_cycle_index_bounds() {
    let modes = [4u8, 4, 2, 2, 2, 4, 1, 1, 4, 2, 1];
    let marks = half_cycle_changes(&modes, &[2, 1]);
    assert_eq!(marks, vec![0, 1, 5, 8, 9]);

    let index = half_cycle_index(modes.len(), &marks);
    assert_eq!(index, vec![0, 0, 1, 1, 1, 1, 2, 2, 2, 3, 4]);
    assert!(index.windows(2).all(|w| w[1] >= w[0]));
    assert_eq!(*index.last().unwrap() as usize, marks.len() - 1);
}

#[test]
fn test_builder_with_custom_columns() {
    let mut table = RecordTable::from_columns(vec![
        Column::new("ns", ColumnData::UInt16(vec![0, 0, 1, 1])),
        Column::new("control", ColumnData::UInt8(vec![1, 1, 2, 2])),
        Column::new("t", ColumnData::Float64(vec![1.0, 2.0, 1.0, 2.0])),
        Column::new("q", ColumnData::Float64(vec![0.5, 1.0, 0.5, 1.0])),
    ])
    .unwrap();
    let config = SeriesConfig {
        step_column: "ns".to_string(),
        mode_column: "control".to_string(),
        time_column: "t".to_string(),
        charge_column: "q".to_string(),
        half_cycle_triggers: vec![2],
        negative_charge_mode: None,
    };

    let series = DerivedSeriesBuilder::new(config).apply(&mut table).unwrap();
    assert_eq!(series.step_changes, vec![1]);
    assert_eq!(series.elapsed_time, vec![1.0, 2.0, 3.0, 4.0]);
    assert_eq!(series.net_charge, vec![0.5, 1.0, 1.5, 2.0]);
    assert_eq!(series.half_cycle_changes, vec![0, 1]);
    assert_eq!(series.half_cycle_index, vec![0, 0, 1, 1]);
    assert!(table.has_column("elapsed_time"));
    assert_eq!(table.columns().len(), 7);
}

#[test]
fn test_builder_missing_column() {
    let table = RecordTable::from_columns(vec![Column::new(
        "step_id",
        ColumnData::UInt8(vec![1, 2]),
    )])
    .unwrap();
    assert!(DerivedSeriesBuilder::new(SeriesConfig::neware())
        .build(&table)
        .is_err());
}
