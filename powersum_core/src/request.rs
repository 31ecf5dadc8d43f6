//! # Requests
//!
//! Caller-facing description of what to compute. Unlike the methods, which
//! quietly degrade on negative inputs, a request is validated up front so a
//! front end can report the problem instead of printing a zero.
//!
//! ## JSON Example
//!
//! ```json
//! {
//!   "power": 6,
//!   "terms": 20,
//!   "operation": "verify",
//!   "methods": ["faulhaber", "euler"]
//! }
//! ```
//!
//! ## Example
//!
//! ```rust
//! use powersum_core::request::{Operation, SumRequest};
//!
//! let request = SumRequest::new(6, Operation::Sum).with_terms(20);
//! assert!(request.validate().is_ok());
//! assert_eq!(request.selected_methods().len(), 5);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{PowerSumError, PowerSumResult};
use crate::methods::MethodKind;

/// Number of terms used when a request does not name one.
pub const DEFAULT_TERM_COUNT: i64 = 20;

fn default_terms() -> i64 {
    DEFAULT_TERM_COUNT
}

/// What a request asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    /// Coefficient vectors of each formula
    Coefficients,
    /// Rendered formulas
    Formula,
    /// Sums computed from the formulas
    Sum,
    /// Sums computed from the formulas and checked against the series
    Verify,
}

/// A single power sum request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SumRequest {
    /// Exponent of every term
    pub power: i64,

    /// Last term of the series, `0..=terms`
    #[serde(default = "default_terms")]
    pub terms: i64,

    /// Requested operation
    pub operation: Operation,

    /// Methods to run; empty means all of them
    #[serde(default)]
    pub methods: Vec<MethodKind>,
}

impl SumRequest {
    /// Create a request for every method with the default term count.
    pub fn new(power: i64, operation: Operation) -> Self {
        SumRequest {
            power,
            terms: DEFAULT_TERM_COUNT,
            operation,
            methods: Vec::new(),
        }
    }

    /// Builder: set the term count
    pub fn with_terms(mut self, terms: i64) -> Self {
        self.terms = terms;
        self
    }

    /// Builder: restrict to the given methods
    pub fn with_methods(mut self, methods: Vec<MethodKind>) -> Self {
        self.methods = methods;
        self
    }

    /// Validate input parameters.
    pub fn validate(&self) -> PowerSumResult<()> {
        if self.power < 0 {
            return Err(PowerSumError::invalid_power(self.power));
        }
        if self.terms < 0 {
            return Err(PowerSumError::invalid_term_count(self.terms));
        }
        Ok(())
    }

    /// Methods to run, in reporting order and without duplicates.
    pub fn selected_methods(&self) -> Vec<MethodKind> {
        if self.methods.is_empty() {
            return MethodKind::ALL.to_vec();
        }
        MethodKind::ALL
            .into_iter()
            .filter(|kind| self.methods.contains(kind))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate() {
        assert!(SumRequest::new(0, Operation::Sum).validate().is_ok());
        assert_eq!(
            SumRequest::new(-2, Operation::Sum).validate(),
            Err(PowerSumError::invalid_power(-2))
        );
        assert_eq!(
            SumRequest::new(3, Operation::Verify).with_terms(-1).validate(),
            Err(PowerSumError::invalid_term_count(-1))
        );
    }

    #[test]
    fn test_selected_methods_order() {
        let request = SumRequest::new(3, Operation::Sum).with_methods(vec![
            MethodKind::Euler,
            MethodKind::Faulhaber,
            MethodKind::Euler,
        ]);
        assert_eq!(
            request.selected_methods(),
            vec![MethodKind::Faulhaber, MethodKind::Euler]
        );
    }

    #[test]
    fn test_default_terms_from_json() {
        let request: SumRequest =
            serde_json::from_str(r#"{"power": 6, "operation": "verify"}"#).unwrap();
        assert_eq!(request.terms, DEFAULT_TERM_COUNT);
        assert_eq!(request.operation, Operation::Verify);
        assert_eq!(request.selected_methods(), MethodKind::ALL.to_vec());
    }

    #[test]
    fn test_serialization() {
        let request = SumRequest::new(5, Operation::Formula)
            .with_terms(7)
            .with_methods(vec![MethodKind::CentralFactorial]);
        let json = serde_json::to_string(&request).unwrap();
        let roundtrip: SumRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(request, roundtrip);
    }
}
