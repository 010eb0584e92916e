// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Instrument-aware row selection over a decoded table.

use serde::Serialize;

use crate::core::{CodecError, Instrument, RecordTable, Result, HALF_CYCLE_INDEX};
use crate::io::formats::mpr::REST_MODE;
use crate::io::reader::DecodedFile;
use crate::schema::registry::{MODE, STEP_ID};

use super::{ProtocolParameters, Stage};

/// A decoded table paired with the protocol that produced it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Experiment {
    pub instrument: Instrument,
    /// Records with a `half_cycle_index` column
    pub table: RecordTable,
    pub protocol: ProtocolParameters,
    /// Added to every requested half-cycle index
    pub half_cycle_offset: i64,
}

impl Experiment {
    pub fn new(instrument: Instrument, table: RecordTable, protocol: ProtocolParameters) -> Self {
        Self {
            instrument,
            table,
            protocol,
            half_cycle_offset: 0,
        }
    }

    /// Build from a decoded file, using native series for modular files.
    pub fn from_file(file: &DecodedFile, protocol: ProtocolParameters) -> Result<Self> {
        Ok(Self::new(file.instrument(), file.series_table()?, protocol))
    }

    /// Shift requested half cycles, for files that start mid-protocol.
    pub fn with_half_cycle_offset(mut self, offset: i64) -> Self {
        self.half_cycle_offset = offset;
        self
    }

    /// Rows of step `cycle` in half cycle `half_cycle`.
    ///
    /// Neware files keep the rest after a step as the next step id, so
    /// `include_rest` widens the match to `cycle + 1`. BioLogic files keep the
    /// rest in the same step, so without `include_rest` rest-mode rows are
    /// removed instead.
    pub fn cycle_rows(&self, cycle: i64, half_cycle: i64, include_rest: bool) -> Result<Vec<usize>> {
        let steps = self.integer_column(STEP_ID)?;
        let half_cycles = self.integer_column(HALF_CYCLE_INDEX)?;
        let target = self.half_cycle_offset + half_cycle;

        let rows = match self.instrument {
            Instrument::Neware => (0..self.table.len())
                .filter(|&i| {
                    let step_match = steps[i] == cycle || (include_rest && steps[i] == cycle + 1);
                    step_match && half_cycles[i] == target
                })
                .collect(),
            Instrument::Biologic => {
                let modes = if include_rest {
                    None
                } else {
                    Some(self.integer_column(MODE)?)
                };
                (0..self.table.len())
                    .filter(|&i| {
                        steps[i] == cycle
                            && half_cycles[i] == target
                            && modes
                                .as_ref()
                                .map_or(true, |m| m[i] != i64::from(REST_MODE))
                    })
                    .collect()
            }
        };
        Ok(rows)
    }

    /// Rows of a protocol stage.
    pub fn stage_rows(&self, stage: Stage, include_rest: bool) -> Result<Vec<usize>> {
        let step = self.protocol.stage(stage).ok_or_else(|| {
            CodecError::Other(format!(
                "protocol '{}' has no stage {stage:?}",
                self.protocol.name
            ))
        })?;
        self.cycle_rows(step.step, step.half_cycle, include_rest)
    }

    /// Copy of the table restricted to the rows of one cycle.
    pub fn cycle_table(&self, cycle: i64, half_cycle: i64, include_rest: bool) -> Result<RecordTable> {
        let rows = self.cycle_rows(cycle, half_cycle, include_rest)?;
        let mut mask = vec![false; self.table.len()];
        for row in rows {
            mask[row] = true;
        }
        let mut table = self.table.clone();
        table.retain_rows(&mask);
        Ok(table)
    }

    fn integer_column(&self, name: &str) -> Result<Vec<i64>> {
        self.table
            .i64_column(name)
            .ok_or_else(|| CodecError::Other(format!("missing integer column '{name}'")))
    }
}
