//! # Error Types
//!
//! Structured error types for powersum_core. The methods themselves never
//! return these: a negative power or term count degrades to an empty
//! coefficient vector or a sum of 0. Errors are raised by the caller-facing
//! request layer, which rejects such inputs before any method runs.
//!
//! ## Example
//!
//! ```rust
//! use powersum_core::errors::{PowerSumError, PowerSumResult};
//!
//! fn check_power(power: i64) -> PowerSumResult<()> {
//!     if power < 0 {
//!         return Err(PowerSumError::invalid_power(power));
//!     }
//!     Ok(())
//! }
//!
//! assert!(check_power(-1).is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for powersum_core operations
pub type PowerSumResult<T> = Result<T, PowerSumError>;

/// Structured error type for power sum requests.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "details")]
pub enum PowerSumError {
    /// The exponent is negative
    #[error("Invalid power: {power} - power must be greater than or equal to 0")]
    InvalidPower { power: i64 },

    /// The number of terms is negative
    #[error("Invalid number of terms: {terms} - number of terms must be greater than or equal to 0")]
    InvalidTermCount { terms: i64 },

    /// A method name did not match any known method
    #[error("Unknown method: {name}")]
    UnknownMethod { name: String },

    /// Generic internal error (should be rare)
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl PowerSumError {
    /// Create an InvalidPower error
    pub fn invalid_power(power: i64) -> Self {
        PowerSumError::InvalidPower { power }
    }

    /// Create an InvalidTermCount error
    pub fn invalid_term_count(terms: i64) -> Self {
        PowerSumError::InvalidTermCount { terms }
    }

    /// Create an UnknownMethod error
    pub fn unknown_method(name: impl Into<String>) -> Self {
        PowerSumError::UnknownMethod { name: name.into() }
    }

    /// Create an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        PowerSumError::Internal {
            message: message.into(),
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            PowerSumError::InvalidPower { .. } => "INVALID_POWER",
            PowerSumError::InvalidTermCount { .. } => "INVALID_TERM_COUNT",
            PowerSumError::UnknownMethod { .. } => "UNKNOWN_METHOD",
            PowerSumError::Internal { .. } => "INTERNAL_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = PowerSumError::invalid_term_count(-3);
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("InvalidTermCount"));
        let roundtrip: PowerSumError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(PowerSumError::invalid_power(-1).error_code(), "INVALID_POWER");
        assert_eq!(PowerSumError::unknown_method("gauss").error_code(), "UNKNOWN_METHOD");
        assert_eq!(PowerSumError::internal("oops").error_code(), "INTERNAL_ERROR");
    }

    #[test]
    fn test_error_messages() {
        let msg = PowerSumError::invalid_power(-7).to_string();
        assert!(msg.contains("-7"));
    }
}
