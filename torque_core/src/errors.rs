//! # Error Types
//!
//! Structured error types for torque_core. Every failure a caller can see is
//! one of these variants, and each serializes to JSON so a front end can
//! report it without string parsing.
//!
//! ## Example
//!
//! ```rust
//! use torque_core::errors::{CalcError, CalcResult};
//!
//! fn validate_gear_ratio(gear_ratio: f64) -> CalcResult<()> {
//!     if !(gear_ratio > 0.0) {
//!         return Err(CalcError::invalid_configuration(
//!             "gear_ratio",
//!             gear_ratio.to_string(),
//!             "Gear ratio must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//!
//! assert!(validate_gear_ratio(0.0).is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for torque_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for calculation and file operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// A physical input is non-positive, non-finite, or out of range.
    /// Raised before any arithmetic runs.
    #[error("Invalid configuration for '{field}': {value} - {reason}")]
    InvalidConfiguration {
        field: String,
        value: String,
        reason: String,
    },

    /// The two independent derivations of the motor torque disagree.
    ///
    /// This always indicates a defect in the propagation chain; it is never
    /// a tolerance to accept.
    #[error(
        "Consistency check failed: motor torque {motor_torque_nm} N·m vs \
         {motor_torque_check_nm} N·m (relative error {relative_error:e} > {tolerance:e})"
    )]
    ConsistencyCheckFailed {
        motor_torque_nm: f64,
        motor_torque_check_nm: f64,
        relative_error: f64,
        tolerance: f64,
    },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON or CSV serialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Schema version mismatch
    #[error("Version mismatch: file version {file_version}, expected {expected_version}")]
    VersionMismatch {
        file_version: String,
        expected_version: String,
    },

    /// Generic internal error (should be rare)
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl CalcError {
    /// Create an InvalidConfiguration error
    pub fn invalid_configuration(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        CalcError::InvalidConfiguration {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a ConsistencyCheckFailed error
    pub fn consistency_check_failed(
        motor_torque_nm: f64,
        motor_torque_check_nm: f64,
        relative_error: f64,
        tolerance: f64,
    ) -> Self {
        CalcError::ConsistencyCheckFailed {
            motor_torque_nm,
            motor_torque_check_nm,
            relative_error,
            tolerance,
        }
    }

    /// Create a FileError
    pub fn file_error(
        operation: impl Into<String>,
        path: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        CalcError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a SerializationError
    pub fn serialization(reason: impl Into<String>) -> Self {
        CalcError::SerializationError {
            reason: reason.into(),
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidConfiguration { .. } => "INVALID_CONFIGURATION",
            CalcError::ConsistencyCheckFailed { .. } => "CONSISTENCY_CHECK_FAILED",
            CalcError::FileError { .. } => "FILE_ERROR",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
            CalcError::VersionMismatch { .. } => "VERSION_MISMATCH",
            CalcError::Internal { .. } => "INTERNAL_ERROR",
        }
    }

    /// True for errors caused by the caller's input rather than by this crate.
    pub fn is_input_error(&self) -> bool {
        matches!(self, CalcError::InvalidConfiguration { .. })
    }
}

impl From<serde_json::Error> for CalcError {
    fn from(e: serde_json::Error) -> Self {
        CalcError::serialization(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error =
            CalcError::invalid_configuration("gear_ratio", "-2", "Gear ratio must be positive");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"type\":\"InvalidConfiguration\""));
        let roundtrip: CalcError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            CalcError::invalid_configuration("x", "0", "bad").error_code(),
            "INVALID_CONFIGURATION"
        );
        assert_eq!(
            CalcError::consistency_check_failed(0.39, 0.18, 1.17, 1e-9).error_code(),
            "CONSISTENCY_CHECK_FAILED"
        );
        assert_eq!(CalcError::serialization("oops").error_code(), "SERIALIZATION_ERROR");
    }

    #[test]
    fn test_consistency_message_mentions_both_torques() {
        let error = CalcError::consistency_check_failed(0.3924, 0.1811, 1.167, 1e-9);
        let message = error.to_string();
        assert!(message.contains("0.3924"));
        assert!(message.contains("0.1811"));
        assert!(!error.is_input_error());
    }
}
