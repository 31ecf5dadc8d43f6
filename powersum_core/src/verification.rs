//! # Cross-Validation
//!
//! Compares closed-form sums against the brute-force series. Sums are kept as
//! decimal strings so a [`Verification`] serializes to plain JSON regardless
//! of how many digits the values have.
//!
//! ## Example
//!
//! ```rust
//! use powersum_core::verification::verify;
//!
//! let report = verify(6, 20);
//! assert!(report.all_match());
//! assert_eq!(report.checks.len(), 5);
//! ```

use log::warn;
use num_bigint::BigInt;
use serde::{Deserialize, Serialize};

use crate::equations::series_sum;
use crate::methods::MethodKind;

/// Outcome for one method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodCheck {
    /// Method that produced the sum
    pub method: MethodKind,

    /// Sum computed by the method's closed form
    pub sum: String,

    /// Whether it equals the series sum
    pub matches: bool,
}

/// Every method's sum checked against the series sum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verification {
    pub power: i64,
    pub terms: i64,

    /// Brute-force `0^power + ... + terms^power`
    pub series_sum: String,

    /// Per-method results, in the order given
    pub checks: Vec<MethodCheck>,
}

impl Verification {
    /// Build from sums that were already computed (and possibly timed) by
    /// the caller.
    pub fn from_sums(power: i64, terms: i64, series: &BigInt, sums: &[(MethodKind, BigInt)]) -> Self {
        let checks = sums
            .iter()
            .map(|(method, sum)| {
                let matches = sum == series;
                if !matches {
                    warn!(
                        "{} sum disagrees with series for power {}, terms {}",
                        method, power, terms
                    );
                }
                MethodCheck {
                    method: *method,
                    sum: sum.to_string(),
                    matches,
                }
            })
            .collect();

        Verification {
            power,
            terms,
            series_sum: series.to_string(),
            checks,
        }
    }

    /// True when every method agreed with the series.
    pub fn all_match(&self) -> bool {
        self.checks.iter().all(|check| check.matches)
    }

    /// Methods whose sum disagreed with the series.
    pub fn mismatches(&self) -> Vec<MethodKind> {
        self.checks
            .iter()
            .filter(|check| !check.matches)
            .map(|check| check.method)
            .collect()
    }
}

/// Check the given methods against the series.
pub fn verify_methods(power: i64, terms: i64, methods: &[MethodKind]) -> Verification {
    let series = series_sum(power, terms);
    let sums: Vec<(MethodKind, BigInt)> = methods
        .iter()
        .map(|kind| (*kind, kind.method().evaluate(power, terms)))
        .collect();
    Verification::from_sums(power, terms, &series, &sums)
}

/// Check every method against the series.
pub fn verify(power: i64, terms: i64) -> Verification {
    verify_methods(power, terms, &MethodKind::ALL)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verify_all_methods() {
        let report = verify(10, 30);
        assert!(report.all_match());
        assert!(report.mismatches().is_empty());
        assert_eq!(report.series_sum, series_sum(10, 30).to_string());
    }

    #[test]
    fn test_verify_subset() {
        let report = verify_methods(4, 3, &[MethodKind::Stirling]);
        assert_eq!(report.checks.len(), 1);
        assert_eq!(report.checks[0].method, MethodKind::Stirling);
        assert_eq!(report.checks[0].sum, "98");
    }

    #[test]
    fn test_from_sums_flags_mismatch() {
        let series = BigInt::from(100);
        let report = Verification::from_sums(
            3,
            4,
            &series,
            &[
                (MethodKind::Faulhaber, BigInt::from(100)),
                (MethodKind::Euler, BigInt::from(99)),
            ],
        );
        assert!(!report.all_match());
        assert_eq!(report.mismatches(), vec![MethodKind::Euler]);
    }

    #[test]
    fn test_serialization() {
        let report = verify(2, 10);
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"series_sum\":\"385\""));
        let roundtrip: Verification = serde_json::from_str(&json).unwrap();
        assert_eq!(report, roundtrip);
    }
}
