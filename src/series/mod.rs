// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Derived cycling series.
//!
//! Turns a flat, step-relative record table into experiment-relative
//! quantities:
//! - step and half-cycle boundary marks ([`segments`])
//! - accumulated elapsed time and net charge ([`accumulate`])
//! - a per-row half-cycle index
//!
//! # Example
//!
//! ```
//! use cyclecodec::series::{DerivedSeriesBuilder, SeriesConfig};
//! use cyclecodec::{Column, ColumnData, RecordTable};
//!
//! let table = RecordTable::from_columns(vec![
//!     Column::new("step_id", ColumnData::UInt8(vec![1, 1, 2, 2])),
//!     Column::new("mode", ColumnData::UInt8(vec![4, 4, 1, 1])),
//!     Column::new("step_time", ColumnData::Float64(vec![1.0, 2.0, 1.0, 2.0])),
//!     Column::new("charge", ColumnData::Float64(vec![0.0, 0.0, 0.5, 1.0])),
//! ])
//! .unwrap();
//!
//! let series = DerivedSeriesBuilder::new(SeriesConfig::neware())
//!     .build(&table)
//!     .unwrap();
//! assert_eq!(series.step_changes, vec![1]);
//! assert_eq!(series.elapsed_time, vec![1.0, 2.0, 3.0, 4.0]);
//! ```

pub mod accumulate;
pub mod segments;

use serde::Serialize;
use tracing::debug;

use crate::core::{
    CodecError, Column, ColumnData, RecordTable, Result, ELAPSED_TIME, HALF_CYCLE_INDEX,
    NET_CHARGE,
};

pub use accumulate::accumulate_steps;
pub use segments::{half_cycle_changes, half_cycle_index, step_changes};

/// Source columns and mode semantics for series derivation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeriesConfig {
    /// Step id column
    pub step_column: String,
    /// Mode column
    pub mode_column: String,
    /// Step-relative time column
    pub time_column: String,
    /// Step-relative charge column
    pub charge_column: String,
    /// Modes whose runs start a new half cycle
    pub half_cycle_triggers: Vec<i64>,
    /// Mode whose charge counts negative in the net charge
    pub negative_charge_mode: Option<i64>,
}

impl SeriesConfig {
    /// Neware fixed-record files: discharge and charge runs delimit half
    /// cycles and discharge charge is subtracted.
    pub fn neware() -> Self {
        use crate::io::formats::nda::constants::{MODE_CC_CHARGE, MODE_CC_DISCHARGE};
        use crate::io::formats::nda::records::{CHARGE, MODE, STEP_ID, STEP_TIME};

        Self {
            step_column: STEP_ID.to_string(),
            mode_column: MODE.to_string(),
            time_column: STEP_TIME.to_string(),
            charge_column: CHARGE.to_string(),
            half_cycle_triggers: vec![i64::from(MODE_CC_DISCHARGE), i64::from(MODE_CC_CHARGE)],
            negative_charge_mode: Some(i64::from(MODE_CC_DISCHARGE)),
        }
    }
}

/// Output of one derivation pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DerivedSeries {
    /// Last row of each step
    pub step_changes: Vec<usize>,
    /// Half-cycle boundary marks (always includes 0)
    pub half_cycle_changes: Vec<usize>,
    /// Experiment-relative time
    pub elapsed_time: Vec<f64>,
    /// Experiment-relative signed charge
    pub net_charge: Vec<f64>,
    /// 0-based half-cycle index per row
    pub half_cycle_index: Vec<u32>,
}

impl DerivedSeries {
    /// Add the per-row series to `table` as derived columns.
    pub fn attach(&self, table: &mut RecordTable) -> Result<()> {
        table.push_column(Column::new(
            ELAPSED_TIME,
            ColumnData::Float64(self.elapsed_time.clone()),
        ))?;
        table.push_column(Column::new(
            NET_CHARGE,
            ColumnData::Float64(self.net_charge.clone()),
        ))?;
        table.push_column(Column::new(
            HALF_CYCLE_INDEX,
            ColumnData::UInt32(self.half_cycle_index.clone()),
        ))
    }
}

/// Computes [`DerivedSeries`] from a decoded table.
#[derive(Debug, Clone)]
pub struct DerivedSeriesBuilder {
    config: SeriesConfig,
}

impl DerivedSeriesBuilder {
    pub fn new(config: SeriesConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SeriesConfig {
        &self.config
    }

    /// Derive all series without touching the table.
    pub fn build(&self, table: &RecordTable) -> Result<DerivedSeries> {
        let steps = integer_column(table, &self.config.step_column)?;
        let modes = integer_column(table, &self.config.mode_column)?;
        let times = float_column(table, &self.config.time_column)?;
        let charges = float_column(table, &self.config.charge_column)?;

        let step_changes = step_changes(&steps);
        let half_cycle_changes = half_cycle_changes(&modes, &self.config.half_cycle_triggers);

        let signed: Vec<f64> = match self.config.negative_charge_mode {
            Some(negative) => charges
                .iter()
                .zip(&modes)
                .map(|(&q, &mode)| if mode == negative { -q } else { q })
                .collect(),
            None => charges,
        };

        let series = DerivedSeries {
            elapsed_time: accumulate_steps(&times, &step_changes),
            net_charge: accumulate_steps(&signed, &step_changes),
            half_cycle_index: half_cycle_index(table.len(), &half_cycle_changes),
            step_changes,
            half_cycle_changes,
        };

        debug!(
            rows = table.len(),
            steps = series.step_changes.len() + 1,
            half_cycles = series.half_cycle_changes.len(),
            "Derived cycling series"
        );
        Ok(series)
    }

    /// Derive the series and attach them to `table` in one pass.
    pub fn apply(&self, table: &mut RecordTable) -> Result<DerivedSeries> {
        let series = self.build(table)?;
        series.attach(table)?;
        Ok(series)
    }
}

fn integer_column(table: &RecordTable, name: &str) -> Result<Vec<i64>> {
    table
        .i64_column(name)
        .ok_or_else(|| CodecError::Other(format!("missing integer column '{name}'")))
}

fn float_column(table: &RecordTable, name: &str) -> Result<Vec<f64>> {
    table
        .f64_column(name)
        .ok_or_else(|| CodecError::Other(format!("missing column '{name}'")))
}
