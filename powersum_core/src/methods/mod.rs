//! # Power Sum Methods
//!
//! Five classical closed forms for `S(p, n) = 0^p + 1^p + ... + n^p`. Each
//! method follows the same pattern:
//!
//! - `coefficients(power)` - the exact coefficient vector of its formula
//! - `render_formula(power)` - a human-readable rendering of that formula
//! - `evaluate(power, n)` - the exact sum, computed from the coefficients
//!
//! All five are stateless unit structs; every call is a pure function of its
//! arguments and may run concurrently with any other call.
//!
//! ## Input Policy
//!
//! Methods never fail. A negative power yields an empty coefficient vector
//! and an empty formula; a negative power or term count yields a sum of 0.
//! Rejecting such inputs is the job of [`crate::request::SumRequest`].
//!
//! ## Available Methods
//!
//! - [`faulhaber`] - Polynomial in `N = n(n + 1)`, solved by row elimination
//! - [`bernoulli`] - Bernoulli numbers, polynomial in `(n + 1)`
//! - [`stirling`] - Stirling numbers of the second kind, falling factorials
//! - [`euler`] - Eulerian numbers, binomials `C(n + j + 1, p + 1)`
//! - [`central_factorial`] - Central factorial numbers of the second kind

pub mod bernoulli;
pub mod central_factorial;
pub mod euler;
pub mod faulhaber;
pub mod stirling;

use std::fmt;
use std::str::FromStr;

use num_bigint::BigInt;
use num_rational::BigRational;
use serde::{Deserialize, Serialize};

use crate::errors::PowerSumError;

// Re-export the method types
pub use bernoulli::BernoulliMethod;
pub use central_factorial::CentralFactorialMethod;
pub use euler::EulerMethod;
pub use faulhaber::FaulhaberMethod;
pub use stirling::StirlingMethod;

// ============================================================================
// Phase hooks
// ============================================================================

/// The two phases of an evaluation a caller may want to bracket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Generating the coefficient vector
    Coefficients,
    /// Combining coefficients with `n` into the final sum
    Summation,
}

/// Observer notified at the start and end of each evaluation phase.
///
/// The core never reads a clock; callers that want timings implement this
/// trait. A phase a method skips (for example the coefficient phase for
/// `power == 0` in some methods) is simply never reported.
pub trait PhaseHook {
    /// Called before the phase starts.
    fn begin(&mut self, _phase: Phase) {}

    /// Called after the phase finishes.
    fn end(&mut self, _phase: Phase) {}
}

/// A hook that ignores every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHook;

impl PhaseHook for NoHook {}

/// Run `f` bracketed by `begin`/`end` notifications for `phase`.
pub(crate) fn observe<T>(hook: &mut dyn PhaseHook, phase: Phase, f: impl FnOnce() -> T) -> T {
    hook.begin(phase);
    let out = f();
    hook.end(phase);
    out
}

// ============================================================================
// The shared contract
// ============================================================================

/// Common interface implemented by every power sum method.
pub trait PowerSumMethod: Send + Sync {
    /// Which method this is.
    fn kind(&self) -> MethodKind;

    /// Coefficients of the closed-form formula for `power`.
    ///
    /// Returns an empty vector for a negative power. Repeated calls with the
    /// same power return identical vectors.
    fn coefficients(&self, power: i64) -> Vec<BigRational>;

    /// Human-readable rendering of the closed form for `power`.
    ///
    /// Returns an empty string for a negative power.
    fn render_formula(&self, power: i64) -> String;

    /// Compute `0^power + 1^power + ... + n^power`, notifying `hook` around
    /// the coefficient and summation phases.
    fn evaluate_observed(&self, power: i64, n: i64, hook: &mut dyn PhaseHook) -> BigInt;

    /// Compute `0^power + 1^power + ... + n^power`.
    ///
    /// Returns 0 when `power` or `n` is negative.
    fn evaluate(&self, power: i64, n: i64) -> BigInt {
        self.evaluate_observed(power, n, &mut NoHook)
    }
}

// ============================================================================
// Method selection
// ============================================================================

/// Identifies one of the five methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MethodKind {
    Faulhaber,
    Bernoulli,
    Stirling,
    Euler,
    CentralFactorial,
}

impl MethodKind {
    /// Every method, in reporting order.
    pub const ALL: [MethodKind; 5] = [
        MethodKind::Faulhaber,
        MethodKind::Bernoulli,
        MethodKind::Stirling,
        MethodKind::Euler,
        MethodKind::CentralFactorial,
    ];

    /// Display name used in reports
    pub fn display_name(&self) -> &'static str {
        match self {
            MethodKind::Faulhaber => "Faulhaber",
            MethodKind::Bernoulli => "Bernoulli",
            MethodKind::Stirling => "Stirling",
            MethodKind::Euler => "Euler",
            MethodKind::CentralFactorial => "Central Factorial",
        }
    }

    /// The stateless implementation of this method.
    pub fn method(&self) -> &'static dyn PowerSumMethod {
        match self {
            MethodKind::Faulhaber => &FaulhaberMethod,
            MethodKind::Bernoulli => &BernoulliMethod,
            MethodKind::Stirling => &StirlingMethod,
            MethodKind::Euler => &EulerMethod,
            MethodKind::CentralFactorial => &CentralFactorialMethod,
        }
    }
}

impl fmt::Display for MethodKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for MethodKind {
    type Err = PowerSumError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_lowercase().replace(['-', ' '], "_").as_str() {
            "faulhaber" | "f" => Ok(MethodKind::Faulhaber),
            "bernoulli" | "b" => Ok(MethodKind::Bernoulli),
            "stirling" | "s" => Ok(MethodKind::Stirling),
            "euler" | "e" => Ok(MethodKind::Euler),
            "central_factorial" | "centralfactorial" | "cf" => Ok(MethodKind::CentralFactorial),
            _ => Err(PowerSumError::unknown_method(value)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        events: Vec<(Phase, bool)>,
    }

    impl PhaseHook for Recorder {
        fn begin(&mut self, phase: Phase) {
            self.events.push((phase, true));
        }

        fn end(&mut self, phase: Phase) {
            self.events.push((phase, false));
        }
    }

    #[test]
    fn test_kind_round_trip() {
        for kind in MethodKind::ALL {
            assert_eq!(kind.method().kind(), kind);
            let parsed: MethodKind = kind.display_name().parse().unwrap();
            assert_eq!(parsed, kind);
        }
    }

    #[test]
    fn test_parse_aliases() {
        assert_eq!("cf".parse::<MethodKind>().unwrap(), MethodKind::CentralFactorial);
        assert_eq!("Central-Factorial".parse::<MethodKind>().unwrap(), MethodKind::CentralFactorial);
        assert_eq!("EULER".parse::<MethodKind>().unwrap(), MethodKind::Euler);
        assert!("gauss".parse::<MethodKind>().is_err());
    }

    #[test]
    fn test_kind_serialization() {
        let json = serde_json::to_string(&MethodKind::CentralFactorial).unwrap();
        assert_eq!(json, "\"central_factorial\"");
    }

    #[test]
    fn test_hooks_bracket_both_phases() {
        for kind in MethodKind::ALL {
            let mut recorder = Recorder::default();
            let sum = kind.method().evaluate_observed(3, 4, &mut recorder);
            assert_eq!(sum, BigInt::from(100), "{}", kind);
            assert_eq!(
                recorder.events,
                vec![
                    (Phase::Coefficients, true),
                    (Phase::Coefficients, false),
                    (Phase::Summation, true),
                    (Phase::Summation, false),
                ],
                "{}",
                kind
            );
        }
    }

    #[test]
    fn test_hooks_silent_on_invalid_input() {
        for kind in MethodKind::ALL {
            let mut recorder = Recorder::default();
            kind.method().evaluate_observed(-1, 4, &mut recorder);
            kind.method().evaluate_observed(2, -4, &mut recorder);
            assert!(recorder.events.is_empty(), "{}", kind);
        }
    }
}
