// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Cycling protocols and row selection.
//!
//! A protocol names the stages of an experiment and, for each, the step id
//! and half-cycle index where it lives in the record table. The numbers
//! differ per instrument because the instruments count steps and half cycles
//! differently, so every preset exists once per [`Instrument`].

pub mod experiment;

use serde::Serialize;

use crate::core::Instrument;

pub use experiment::Experiment;

/// Named stage of a cycling protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Stage {
    Rest,
    CyclePlating,
    CycleStripping,
    InitialPlating,
    InitialStripping,
    TestPlating,
    TestStripping,
    ShortCyclePlating,
    ShortCycleStripping,
}

/// Location of a stage in the record table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StepRef {
    /// Step id
    pub step: i64,
    /// Half-cycle index, relative to the experiment's offset
    pub half_cycle: i64,
}

impl StepRef {
    pub const fn new(step: i64, half_cycle: i64) -> Self {
        Self { step, half_cycle }
    }
}

/// Stages of one protocol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProtocolParameters {
    /// Protocol name
    pub name: String,
    /// Stages in protocol order
    pub stages: Vec<(Stage, StepRef)>,
    /// Number of short plating/stripping cycles, for protocols that have them
    pub short_cycles: Option<u32>,
}

impl ProtocolParameters {
    /// Custom protocol.
    pub fn new(name: impl Into<String>, stages: Vec<(Stage, StepRef)>) -> Self {
        Self {
            name: name.into(),
            stages,
            short_cycles: None,
        }
    }

    /// Set the number of short cycles.
    pub fn with_short_cycles(mut self, count: u32) -> Self {
        self.short_cycles = Some(count);
        self
    }

    /// Repeated plating/stripping after a rest.
    pub fn mode1(instrument: Instrument) -> Self {
        let stages = match instrument {
            Instrument::Neware => vec![
                (Stage::Rest, StepRef::new(1, 0)),
                (Stage::CyclePlating, StepRef::new(2, 1)),
                (Stage::CycleStripping, StepRef::new(4, 2)),
            ],
            Instrument::Biologic => vec![
                (Stage::Rest, StepRef::new(0, 0)),
                (Stage::CyclePlating, StepRef::new(1, 0)),
                (Stage::CycleStripping, StepRef::new(2, 1)),
            ],
        };
        Self::new("MODE1", stages)
    }

    /// Initial cycle, test plating, short cycles, then test stripping.
    pub fn pnnl(instrument: Instrument) -> Self {
        let stages = match instrument {
            Instrument::Neware => vec![
                (Stage::Rest, StepRef::new(1, 0)),
                (Stage::InitialPlating, StepRef::new(2, 1)),
                (Stage::InitialStripping, StepRef::new(4, 2)),
                (Stage::TestPlating, StepRef::new(6, 3)),
                (Stage::ShortCycleStripping, StepRef::new(8, 4)),
                (Stage::ShortCyclePlating, StepRef::new(10, 5)),
                (Stage::TestStripping, StepRef::new(13, 24)),
            ],
            Instrument::Biologic => vec![
                (Stage::Rest, StepRef::new(0, 0)),
                (Stage::InitialPlating, StepRef::new(1, 0)),
                (Stage::InitialStripping, StepRef::new(2, 1)),
                (Stage::TestPlating, StepRef::new(3, 2)),
                (Stage::ShortCyclePlating, StepRef::new(4, 3)),
                (Stage::ShortCycleStripping, StepRef::new(5, 4)),
                (Stage::TestStripping, StepRef::new(6, 23)),
            ],
        };
        Self::new("PNNL", stages).with_short_cycles(10)
    }

    /// Location of a stage, if the protocol has it.
    pub fn stage(&self, stage: Stage) -> Option<StepRef> {
        self.stages
            .iter()
            .find(|(s, _)| *s == stage)
            .map(|(_, step)| *step)
    }
}
