// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Core error types for cyclecodec.
//!
//! Every decode failure is terminal for the file being decoded. Decoders
//! never retry and never hand back a partially built table:
//! - Literal bytes that do not match (wrong format or corrupt header)
//! - Declared lengths or terminators running past the end of the buffer
//! - Numeric codes outside the closed per-instrument registries
//! - Runaway step tables

use thiserror::Error;

/// Errors that can occur while decoding cycler files.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// Expected literal bytes were absent at an offset.
    #[error("Format mismatch at 0x{offset:x}: expected {expected:02x?}, found {actual:02x?}")]
    FormatMismatch {
        /// Absolute offset of the comparison
        offset: usize,
        /// Literal bytes that were expected
        expected: Vec<u8>,
        /// Bytes actually present (may be shorter at end of buffer)
        actual: Vec<u8>,
    },

    /// A declared length, sentinel or terminator runs past end of buffer.
    #[error(
        "Truncated file in {context}: needed {requested} bytes at offset 0x{offset:x}, but only {available} available"
    )]
    TruncatedFile {
        /// What was being read
        context: String,
        /// Offset where the read started
        offset: usize,
        /// Requested bytes
        requested: usize,
        /// Bytes available from `offset`
        available: usize,
    },

    /// Column field code outside the modular-format registry.
    #[error("Unknown data field code 0x{code:x}")]
    UnknownFieldCode {
        /// The unrecognized code
        code: u16,
    },

    /// Step mode tag outside the fixed-record step table.
    #[error("Unknown mode tag {tag} for step {step_id}")]
    UnknownStepMode {
        /// Id of the step being parsed
        step_id: u8,
        /// The unrecognized tag
        tag: u8,
    },

    /// The step table did not terminate before the id limit.
    #[error("Too many steps encountered (limit {limit}), possible parsing error")]
    TooManySteps {
        /// Id at which parsing gave up
        limit: u8,
    },

    /// A fixed-offset field was present but did not parse.
    #[error("Invalid field '{field}' at 0x{offset:x}: {reason}")]
    InvalidField {
        /// Field name
        field: String,
        /// Absolute offset of the field
        offset: usize,
        /// Why it failed to parse
        reason: String,
    },

    /// File could not be opened or mapped.
    #[error("I/O error on '{path}': {message}")]
    Io {
        /// Path of the file
        path: String,
        /// Underlying error message
        message: String,
    },

    /// Other error
    #[error("Other error: {0}")]
    Other(String),
}

impl CodecError {
    /// Create a format mismatch error.
    pub fn format_mismatch(offset: usize, expected: &[u8], actual: &[u8]) -> Self {
        CodecError::FormatMismatch {
            offset,
            expected: expected.to_vec(),
            actual: actual.to_vec(),
        }
    }

    /// Create a truncated file error.
    pub fn truncated(
        context: impl Into<String>,
        offset: usize,
        requested: usize,
        available: usize,
    ) -> Self {
        CodecError::TruncatedFile {
            context: context.into(),
            offset,
            requested,
            available,
        }
    }

    /// Create an unknown field code error.
    pub fn unknown_field_code(code: u16) -> Self {
        CodecError::UnknownFieldCode { code }
    }

    /// Create an unknown step mode error.
    pub fn unknown_step_mode(step_id: u8, tag: u8) -> Self {
        CodecError::UnknownStepMode { step_id, tag }
    }

    /// Create an invalid field error.
    pub fn invalid_field(field: impl Into<String>, offset: usize, reason: impl Into<String>) -> Self {
        CodecError::InvalidField {
            field: field.into(),
            offset,
            reason: reason.into(),
        }
    }

    /// Create an I/O error for a path.
    pub fn io(path: impl Into<String>, err: &std::io::Error) -> Self {
        CodecError::Io {
            path: path.into(),
            message: err.to_string(),
        }
    }

    /// Get structured fields for logging.
    pub fn log_fields(&self) -> Vec<(&'static str, String)> {
        match self {
            CodecError::FormatMismatch {
                offset,
                expected,
                actual,
            } => vec![
                ("offset", offset.to_string()),
                ("expected", format!("{expected:02x?}")),
                ("actual", format!("{actual:02x?}")),
            ],
            CodecError::TruncatedFile {
                context,
                offset,
                requested,
                available,
            } => vec![
                ("context", context.clone()),
                ("offset", offset.to_string()),
                ("requested", requested.to_string()),
                ("available", available.to_string()),
            ],
            CodecError::UnknownFieldCode { code } => vec![("code", format!("0x{code:x}"))],
            CodecError::UnknownStepMode { step_id, tag } => {
                vec![("step_id", step_id.to_string()), ("tag", tag.to_string())]
            }
            CodecError::TooManySteps { limit } => vec![("limit", limit.to_string())],
            CodecError::InvalidField {
                field,
                offset,
                reason,
            } => vec![
                ("field", field.clone()),
                ("offset", offset.to_string()),
                ("reason", reason.clone()),
            ],
            CodecError::Io { path, message } => {
                vec![("path", path.clone()), ("message", message.clone())]
            }
            CodecError::Other(msg) => vec![("message", msg.clone())],
        }
    }
}

/// Result type for cyclecodec operations.
pub type Result<T> = std::result::Result<T, CodecError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_mismatch_error() {
        let err = CodecError::format_mismatch(0x10, b"AB", b"AC");
        assert!(matches!(err, CodecError::FormatMismatch { offset: 0x10, .. }));
        assert_eq!(
            err.to_string(),
            "Format mismatch at 0x10: expected [41, 42], found [41, 43]"
        );
    }

    #[test]
    fn test_truncated_error() {
        let err = CodecError::truncated("data section", 32, 8, 3);
        assert_eq!(
            err.to_string(),
            "Truncated file in data section: needed 8 bytes at offset 0x20, but only 3 available"
        );
    }

    #[test]
    fn test_unknown_field_code_error() {
        let err = CodecError::unknown_field_code(0x1ff);
        assert_eq!(err.to_string(), "Unknown data field code 0x1ff");
    }

    #[test]
    fn test_unknown_step_mode_error() {
        let err = CodecError::unknown_step_mode(3, 9);
        assert_eq!(err.to_string(), "Unknown mode tag 9 for step 3");
    }

    #[test]
    fn test_too_many_steps_error() {
        let err = CodecError::TooManySteps { limit: 255 };
        assert!(err.to_string().contains("limit 255"));
    }

    #[test]
    fn test_log_fields_truncated() {
        let err = CodecError::truncated("ctx", 1, 2, 3);
        let fields = err.log_fields();
        assert_eq!(fields.len(), 4);
        assert_eq!(fields[0], ("context", "ctx".to_string()));
        assert_eq!(fields[1], ("offset", "1".to_string()));
        assert_eq!(fields[2], ("requested", "2".to_string()));
        assert_eq!(fields[3], ("available", "3".to_string()));
    }

    #[test]
    fn test_log_fields_unknown_code() {
        let fields = CodecError::unknown_field_code(0x83).log_fields();
        assert_eq!(fields, vec![("code", "0x83".to_string())]);
    }

    #[test]
    fn test_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = CodecError::io("cell.mpr", &io_err);
        assert_eq!(err.to_string(), "I/O error on 'cell.mpr': file not found");
    }

    #[test]
    fn test_error_clone() {
        let err1 = CodecError::invalid_field("date", 6, "not a number");
        let err2 = err1.clone();
        assert_eq!(err1, err2);
    }
}
