// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Decode strategies and options.
//!
//! - **Sequential**: cursor-driven, one record at a time (default)
//! - **Parallel**: column/row-range tasks on a Rayon pool over the shared buffer
//! - **Auto**: parallel once the record count reaches a threshold
//!
//! Both concrete strategies produce identical tables.

/// Record-array decode strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecodeStrategy {
    /// Decode records one by one
    #[default]
    Sequential,
    /// Decode column/row ranges concurrently
    Parallel,
    /// Choose based on record count
    Auto,
}

impl DecodeStrategy {
    /// Resolve `Auto` to a concrete strategy for `record_count` records.
    pub fn resolve(&self, record_count: usize, parallel_threshold: usize) -> DecodeStrategy {
        match self {
            DecodeStrategy::Auto => {
                if record_count >= parallel_threshold {
                    DecodeStrategy::Parallel
                } else {
                    DecodeStrategy::Sequential
                }
            }
            other => *other,
        }
    }

    /// Check if this is the sequential strategy.
    pub fn is_sequential(&self) -> bool {
        matches!(self, DecodeStrategy::Sequential)
    }

    /// Check if this is the parallel strategy.
    pub fn is_parallel(&self) -> bool {
        matches!(self, DecodeStrategy::Parallel)
    }
}

/// Default record count at which `Auto` switches to parallel decoding.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 100_000;

/// Options controlling how record arrays are decoded.
///
/// # Example
///
/// ```
/// use cyclecodec::io::reader::{DecodeOptions, DecodeStrategy};
///
/// let options = DecodeOptions::new()
///     .strategy(DecodeStrategy::Parallel)
///     .num_threads(4);
/// assert_eq!(options.worker_count(), 4);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Decode strategy
    pub strategy: DecodeStrategy,
    /// Worker threads for parallel decoding (None = hardware parallelism)
    pub num_threads: Option<usize>,
    /// Record count at which `Auto` picks the parallel path
    pub parallel_threshold: usize,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            strategy: DecodeStrategy::Sequential,
            num_threads: None,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

impl DecodeOptions {
    /// Create default options (sequential).
    pub fn new() -> Self {
        Self::default()
    }

    /// Shorthand for parallel options with the default worker count.
    pub fn parallel() -> Self {
        Self::new().strategy(DecodeStrategy::Parallel)
    }

    /// Set the decode strategy.
    pub fn strategy(mut self, strategy: DecodeStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Set the number of worker threads.
    pub fn num_threads(mut self, count: usize) -> Self {
        self.num_threads = Some(count);
        self
    }

    /// Set the `Auto` threshold.
    pub fn parallel_threshold(mut self, records: usize) -> Self {
        self.parallel_threshold = records;
        self
    }

    /// Worker count for the parallel pool (at least one).
    pub fn worker_count(&self) -> usize {
        self.num_threads.unwrap_or_else(num_cpus::get).max(1)
    }

    /// Concrete strategy for `record_count` records.
    pub fn resolve(&self, record_count: usize) -> DecodeStrategy {
        self.strategy.resolve(record_count, self.parallel_threshold)
    }
}
