// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Step-definition table.
//!
//! Each entry is a one-byte id, a one-byte mode tag, then mode-specific i32
//! parameters padded with reserved words. Ids run 1, 2, 3...; the first byte
//! that is not the next expected id ends the table and is left unread.

use serde::Serialize;
use tracing::debug;

use crate::core::{CodecError, Result};
use crate::encoding::ByteCursor;

use super::constants::*;

/// Step mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum StepMode {
    CcCharge,
    CcDischarge,
    Rest,
    Loop,
    Stop,
}

impl StepMode {
    /// Map an on-disk tag.
    pub fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            MODE_CC_CHARGE => Some(StepMode::CcCharge),
            MODE_CC_DISCHARGE => Some(StepMode::CcDischarge),
            MODE_REST => Some(StepMode::Rest),
            MODE_LOOP => Some(StepMode::Loop),
            MODE_STOP => Some(StepMode::Stop),
            _ => None,
        }
    }

    /// On-disk tag. Records carry the same value in their `mode` column.
    pub fn tag(self) -> u8 {
        match self {
            StepMode::CcCharge => MODE_CC_CHARGE,
            StepMode::CcDischarge => MODE_CC_DISCHARGE,
            StepMode::Rest => MODE_REST,
            StepMode::Loop => MODE_LOOP,
            StepMode::Stop => MODE_STOP,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StepMode::CcCharge => "CC_charge",
            StepMode::CcDischarge => "CC_discharge",
            StepMode::Rest => "Rest",
            StepMode::Loop => "Loop",
            StepMode::Stop => "Stop",
        }
    }
}

/// Mode-specific step parameters, already scaled.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum StepParams {
    /// Constant-current charge or discharge.
    ConstantCurrent {
        /// Current in mA
        current: f64,
        /// Step time limit
        time: i32,
        /// Cutoff voltage in V
        voltage: f64,
    },
    Rest {
        time: i32,
    },
    Loop {
        /// Step id to jump back to
        target: i32,
        repeats: i32,
    },
    Stop,
}

/// One entry of the step table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepDefinition {
    /// 1-based step id
    pub id: u8,
    pub mode: StepMode,
    pub params: StepParams,
}

/// Parse the step table at the cursor.
///
/// On return the cursor sits on the first byte after the table. Fails with
/// `UnknownStepMode` on an unmapped tag and `TooManySteps` once the expected
/// id reaches 255.
pub fn parse_step_table(cursor: &mut ByteCursor<'_>) -> Result<Vec<StepDefinition>> {
    let start = cursor.position();
    let mut steps = Vec::new();
    let mut expected: u8 = 1;

    loop {
        if expected == MAX_STEP_ID {
            return Err(CodecError::TooManySteps { limit: MAX_STEP_ID });
        }
        if cursor.peek() != Some(expected) {
            break;
        }
        cursor.skip(1)?;

        let tag = cursor.read_u8()?;
        let mode =
            StepMode::from_tag(tag).ok_or_else(|| CodecError::unknown_step_mode(expected, tag))?;
        let (params, reserved) = match mode {
            StepMode::CcCharge | StepMode::CcDischarge => {
                let current = f64::from(cursor.read_i32()?) * CURRENT_SCALE;
                let time = cursor.read_i32()?;
                let voltage = f64::from(cursor.read_i32()?) * VOLTAGE_SCALE;
                (
                    StepParams::ConstantCurrent {
                        current,
                        time,
                        voltage,
                    },
                    CC_RESERVED_WORDS,
                )
            }
            StepMode::Rest => (
                StepParams::Rest {
                    time: cursor.read_i32()?,
                },
                REST_RESERVED_WORDS,
            ),
            StepMode::Loop => {
                let target = cursor.read_i32()?;
                let repeats = cursor.read_i32()?;
                (StepParams::Loop { target, repeats }, LOOP_RESERVED_WORDS)
            }
            StepMode::Stop => (StepParams::Stop, STOP_RESERVED_WORDS),
        };
        cursor.skip(reserved * 4)?;

        steps.push(StepDefinition {
            id: expected,
            mode,
            params,
        });
        expected += 1;
    }

    debug!(
        steps = steps.len(),
        bytes = cursor.position() - start,
        "Parsed step table"
    );
    Ok(steps)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(values: &[i32]) -> Vec<u8> {
        values.iter().flat_map(|v| v.to_le_bytes()).collect()
    }

    #[test]
    fn test_parse_steps() {
        let mut data = vec![1, MODE_REST];
        data.extend(words(&[3600, 0, 0, 0, 0]));
        data.extend([2, MODE_CC_DISCHARGE]);
        data.extend(words(&[-500, 7200, 5000, 0, 0]));
        data.extend([3, MODE_LOOP]);
        data.extend(words(&[1, 10, 0, 0, 0]));
        data.extend([9, 0xAB]);

        let mut cursor = ByteCursor::new(&data);
        let steps = parse_step_table(&mut cursor).unwrap();
        assert_eq!(steps.len(), 3);
        assert_eq!(steps[0].params, StepParams::Rest { time: 3600 });
        assert_eq!(steps[1].mode, StepMode::CcDischarge);
        match steps[1].params {
            StepParams::ConstantCurrent {
                current,
                time,
                voltage,
            } => {
                assert!((current + 0.5).abs() < 1e-12);
                assert_eq!(time, 7200);
                assert!((voltage - 0.5).abs() < 1e-12);
            }
            ref other => panic!("unexpected params {other:?}"),
        }
        assert_eq!(
            steps[2].params,
            StepParams::Loop {
                target: 1,
                repeats: 10
            }
        );
        assert_eq!(cursor.position(), data.len() - 2);
        assert_eq!(cursor.peek(), Some(9));
    }

    #[test]
    fn test_unknown_mode() {
        let mut data = vec![1, 3];
        data.extend(words(&[0; 5]));
        let mut cursor = ByteCursor::new(&data);
        assert_eq!(
            parse_step_table(&mut cursor).unwrap_err(),
            CodecError::UnknownStepMode { step_id: 1, tag: 3 }
        );
    }

    #[test]
    fn test_too_many_steps() {
        let mut data = Vec::new();
        for id in 1..=255u8 {
            data.extend([id, MODE_STOP]);
            data.extend(words(&[0; 5]));
        }
        let mut cursor = ByteCursor::new(&data);
        assert_eq!(
            parse_step_table(&mut cursor).unwrap_err(),
            CodecError::TooManySteps { limit: 255 }
        );
    }

    #[test]
    fn test_empty_table() {
        let data = [0u8; 4];
        let mut cursor = ByteCursor::new(&data);
        assert!(parse_step_table(&mut cursor).unwrap().is_empty());
        assert_eq!(cursor.position(), 0);
    }
}
