// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Rectangular record table produced by every decoder.
//!
//! Row order is on-disk order and is never changed, except that the
//! fixed-record decoder removes non-success rows (relative order kept).

use serde::Serialize;

use super::error::{CodecError, Result};
use super::value::{ColumnData, FieldValue};

/// Name of the derived experiment-relative time column.
pub const ELAPSED_TIME: &str = "elapsed_time";
/// Name of the derived net charge column.
pub const NET_CHARGE: &str = "net_charge";
/// Name of the derived half-cycle index column.
pub const HALF_CYCLE_INDEX: &str = "half_cycle_index";

/// A named column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Column {
    /// Column name
    pub name: String,
    /// Column values
    pub data: ColumnData,
}

impl Column {
    /// Create a new column.
    pub fn new(name: impl Into<String>, data: ColumnData) -> Self {
        Self {
            name: name.into(),
            data,
        }
    }
}

/// Rows x named columns.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RecordTable {
    columns: Vec<Column>,
    rows: usize,
}

impl RecordTable {
    /// Build a table from uniquely named columns that all have the same length.
    pub fn from_columns(columns: Vec<Column>) -> Result<Self> {
        let mut table = Self::default();
        for column in columns {
            table.push_column(column)?;
        }
        Ok(table)
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows
    }

    /// Check if the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    /// All columns in order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Column names in order.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Look up a column by name.
    pub fn column(&self, name: &str) -> Option<&ColumnData> {
        self.columns.iter().find(|c| c.name == name).map(|c| &c.data)
    }

    /// Check whether a column exists.
    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    /// Value at (row, column name).
    pub fn value(&self, row: usize, name: &str) -> Option<FieldValue> {
        self.column(name).and_then(|c| c.get(row))
    }

    /// A column widened to f64.
    pub fn f64_column(&self, name: &str) -> Option<Vec<f64>> {
        self.column(name).map(ColumnData::to_f64_vec)
    }

    /// An integer column as i64.
    pub fn i64_column(&self, name: &str) -> Option<Vec<i64>> {
        self.column(name).and_then(ColumnData::to_i64_vec)
    }

    /// Append a column. Fails if the length differs or the name is taken.
    pub fn push_column(&mut self, column: Column) -> Result<()> {
        if self.has_column(&column.name) {
            return Err(CodecError::Other(format!(
                "column '{}' already exists",
                column.name
            )));
        }
        if !self.columns.is_empty() && column.data.len() != self.rows {
            return Err(CodecError::Other(format!(
                "column '{}' has {} rows, expected {}",
                column.name,
                column.data.len(),
                self.rows
            )));
        }
        self.rows = column.data.len();
        self.columns.push(column);
        Ok(())
    }

    /// Remove a column by name, returning it.
    pub fn take_column(&mut self, name: &str) -> Option<ColumnData> {
        let idx = self.columns.iter().position(|c| c.name == name)?;
        Some(self.columns.remove(idx).data)
    }

    /// Replace the data of an existing column with same-length data.
    pub(crate) fn replace_column(&mut self, name: &str, data: ColumnData) -> Result<()> {
        if data.len() != self.rows {
            return Err(CodecError::Other(format!(
                "replacement for '{name}' has {} rows, expected {}",
                data.len(),
                self.rows
            )));
        }
        let column = self
            .columns
            .iter_mut()
            .find(|c| c.name == name)
            .ok_or_else(|| CodecError::Other(format!("no column '{name}'")))?;
        column.data = data;
        Ok(())
    }

    /// Keep rows whose mask entry is `true`, preserving relative order.
    pub(crate) fn retain_rows(&mut self, mask: &[bool]) {
        for column in &mut self.columns {
            column.data.retain_mask(mask);
        }
        self.rows = mask.iter().take(self.rows).filter(|&&keep| keep).count();
    }
}
