//! # Error Types
//!
//! Structured error types for beam_core. Each variant carries enough context
//! for a caller (human, UI, or another program reading the JSON) to see which
//! input was rejected and why.
//!
//! Warnings are not errors: equilibrium residuals and similar diagnostics are
//! returned inside [`AnalysisResult`](crate::calculations::AnalysisResult).
//!
//! ## Example
//!
//! ```rust
//! use beam_core::errors::{CalcError, CalcResult};
//!
//! fn validate_length(length_m: f64) -> CalcResult<()> {
//!     if length_m <= 0.0 {
//!         return Err(CalcError::invalid_input(
//!             "length",
//!             length_m.to_string(),
//!             "Beam length must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//!
//! assert!(validate_length(-1.0).is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for beam_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for model construction and analysis.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// An input value is invalid (out of range, non-finite, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A load has malformed geometry (reversed extent, outside the beam)
    #[error("Invalid load{}: {reason}", load_label(.index))]
    InvalidLoad { index: Option<usize>, reason: String },

    /// Supports are missing, too many, or coincident. The two-reaction
    /// statics system is singular and cannot be solved.
    #[error("Degenerate supports: {reason}")]
    DegenerateSupport { reason: String },

    /// Summary requested on an empty (or ragged) field
    #[error("Field is empty - nothing to summarize")]
    EmptyField,

    /// Material preset not found
    #[error("Material not found: {material_name}")]
    MaterialNotFound { material_name: String },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },
}

fn load_label(index: &Option<usize>) -> String {
    match index {
        Some(i) => format!(" #{}", i + 1),
        None => String::new(),
    }
}

impl CalcError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create an InvalidLoad error without a load index
    pub fn invalid_load(reason: impl Into<String>) -> Self {
        CalcError::InvalidLoad {
            index: None,
            reason: reason.into(),
        }
    }

    /// Attach the position of the offending load in the caller's list
    pub fn at_load_index(self, index: usize) -> Self {
        match self {
            CalcError::InvalidLoad { reason, .. } => CalcError::InvalidLoad {
                index: Some(index),
                reason,
            },
            other => other,
        }
    }

    /// Create a DegenerateSupport error
    pub fn degenerate_support(reason: impl Into<String>) -> Self {
        CalcError::DegenerateSupport {
            reason: reason.into(),
        }
    }

    /// Create a MaterialNotFound error
    pub fn material_not_found(material_name: impl Into<String>) -> Self {
        CalcError::MaterialNotFound {
            material_name: material_name.into(),
        }
    }

    /// Degenerate supports abort the analysis; nothing can be retried
    /// without changing the model.
    pub fn is_fatal(&self) -> bool {
        matches!(self, CalcError::DegenerateSupport { .. })
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::InvalidLoad { .. } => "INVALID_LOAD",
            CalcError::DegenerateSupport { .. } => "DEGENERATE_SUPPORT",
            CalcError::EmptyField => "EMPTY_FIELD",
            CalcError::MaterialNotFound { .. } => "MATERIAL_NOT_FOUND",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
        }
    }
}

impl From<serde_json::Error> for CalcError {
    fn from(err: serde_json::Error) -> Self {
        CalcError::SerializationError {
            reason: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = CalcError::invalid_input("length", "-5.0", "Beam length must be positive");
        let json = serde_json::to_string(&error).unwrap();
        let roundtrip: CalcError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(CalcError::EmptyField.error_code(), "EMPTY_FIELD");
        assert_eq!(
            CalcError::degenerate_support("same position").error_code(),
            "DEGENERATE_SUPPORT"
        );
        assert_eq!(CalcError::material_not_found("unobtanium").error_code(), "MATERIAL_NOT_FOUND");
    }

    #[test]
    fn test_load_index_in_message() {
        let error = CalcError::invalid_load("start must be before end").at_load_index(2);
        assert_eq!(error.to_string(), "Invalid load #3: start must be before end");

        let bare = CalcError::invalid_load("outside beam");
        assert_eq!(bare.to_string(), "Invalid load: outside beam");
    }

    #[test]
    fn test_only_degenerate_supports_are_fatal() {
        assert!(CalcError::degenerate_support("coincident").is_fatal());
        assert!(!CalcError::invalid_load("bad").is_fatal());
        assert!(!CalcError::EmptyField.is_fatal());
    }
}
