// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Fixed-stride record array decoding.
//!
//! Both file formats end in a homogeneous array of records described by a
//! [`RecordLayout`]. Two strategies decode it to the same columns:
//!
//! - **Sequential**: a cursor walks the records one at a time.
//! - **Parallel**: one task per (column, row range). Every task holds a
//!   read-only handle to the buffer and the rows it owns, so tasks share
//!   nothing mutable. Results are merged in column order and, within a
//!   column, in ascending row order.

use std::ops::Range;
use std::time::Instant;

use rayon::prelude::*;
use tracing::debug;

use crate::core::{CodecError, ColumnData, FieldValue, Result};
use crate::encoding::{bit_field, ByteCursor};
use crate::io::reader::{DecodeOptions, DecodeStrategy};
use crate::schema::{ColumnKind, RecordLayout};

/// Decode `rows` records starting at `records_offset` using the strategy
/// resolved from `options`.
///
/// The caller must have checked that the records fit in `data`.
pub fn decode_record_array(
    data: &[u8],
    layout: &RecordLayout,
    records_offset: usize,
    rows: usize,
    options: &DecodeOptions,
) -> Result<Vec<ColumnData>> {
    let strategy = options.resolve(rows);
    let start = Instant::now();

    let columns = match strategy {
        DecodeStrategy::Parallel => decode_records_parallel(
            data,
            layout,
            records_offset,
            rows,
            options.worker_count(),
        )?,
        _ => decode_records_sequential(data, layout, records_offset, rows)?,
    };

    debug!(
        rows,
        columns = layout.len(),
        ?strategy,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Decoded record array"
    );
    Ok(columns)
}

/// Decode records one after another with a cursor.
pub fn decode_records_sequential(
    data: &[u8],
    layout: &RecordLayout,
    records_offset: usize,
    rows: usize,
) -> Result<Vec<ColumnData>> {
    let mut columns = layout.empty_columns(rows);
    let mut cursor = ByteCursor::at(data, records_offset);

    for _ in 0..rows {
        let flags = if layout.has_flags() {
            cursor.read_u8()?
        } else {
            0
        };
        for (descriptor, column) in layout.columns().iter().zip(columns.iter_mut()) {
            let value = match descriptor.kind {
                ColumnKind::Fixed(spec) => cursor.read_fixed(spec)?,
                ColumnKind::Flag {
                    bit_offset,
                    bit_width,
                } => FieldValue::UInt8(bit_field(flags, bit_offset, bit_width)),
            };
            column.push(value);
        }
    }

    Ok(columns)
}

/// Unit of parallel work: one column over a contiguous row range.
#[derive(Debug, Clone)]
struct DecodeTask<'a> {
    data: &'a [u8],
    column: usize,
    rows: Range<usize>,
}

impl DecodeTask<'_> {
    fn run(&self, layout: &RecordLayout, records_offset: usize) -> Result<ColumnData> {
        let descriptor = &layout.columns()[self.column];
        let mut out = ColumnData::with_capacity(descriptor.primitive_type(), self.rows.len());
        for row in self.rows.clone() {
            let row_base = records_offset + row * layout.stride();
            out.push(layout.read_cell(self.data, row_base, self.column)?);
        }
        Ok(out)
    }
}

/// Split `rows` into at most `parts` contiguous non-empty ranges.
pub(crate) fn partition_rows(rows: usize, parts: usize) -> Vec<Range<usize>> {
    if rows == 0 {
        return Vec::new();
    }
    let chunk = rows.div_ceil(parts.max(1));
    (0..rows)
        .step_by(chunk)
        .map(|start| start..(start + chunk).min(rows))
        .collect()
}

/// Decode `rows` records on a dedicated pool of `workers` threads.
pub fn decode_records_parallel(
    data: &[u8],
    layout: &RecordLayout,
    records_offset: usize,
    rows: usize,
    workers: usize,
) -> Result<Vec<ColumnData>> {
    let mut columns = layout.empty_columns(rows);
    let ranges = partition_rows(rows, workers);
    if ranges.is_empty() || layout.is_empty() {
        return Ok(columns);
    }

    let tasks: Vec<DecodeTask<'_>> = (0..layout.len())
        .flat_map(|column| {
            ranges.iter().map(move |range| DecodeTask {
                data,
                column,
                rows: range.clone(),
            })
        })
        .collect();

    debug!(tasks = tasks.len(), workers, rows, "Decoding records in parallel");

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .thread_name(|i| format!("record-decode-{i}"))
        .build()
        .map_err(|e| CodecError::Other(format!("failed to build decode pool: {e}")))?;

    let results: Vec<Result<ColumnData>> = pool.install(|| {
        tasks
            .par_iter()
            .map(|task| task.run(layout, records_offset))
            .collect()
    });

    for (task, result) in tasks.iter().zip(results) {
        if !columns[task.column].append(result?) {
            return Err(CodecError::Other(format!(
                "column {} produced a chunk of the wrong type",
                task.column
            )));
        }
    }

    Ok(columns)
}
