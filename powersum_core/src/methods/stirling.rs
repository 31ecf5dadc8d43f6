//! # Stirling Method
//!
//! Sum of falling factorials weighted by Stirling numbers of the second kind:
//!
//! ```text
//! S(p, n) = Σ_t S(p, t) · (n + 1)n(n - 1)...(n + 1 - t) / (t + 1)
//! ```
//!
//! with
//!
//! ```text
//! S(0, 0) = 1
//! S(m, 0) = 0              m > 0
//! S(m, j) = 0              j > m
//! S(m, j) = S(m - 1, j - 1) + j·S(m - 1, j)
//! ```
//!
//! ## Truncation
//!
//! The falling factorial in term `t` has `t + 1` factors running down from
//! `n + 1`, so it is zero once `t > n`. Only the first `min(p + 1, n + 2)`
//! Stirling numbers are ever generated, which keeps the work far below
//! quadratic when `n` is much smaller than `p`.

use log::debug;
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Zero};

use super::{observe, MethodKind, Phase, PhaseHook, PowerSumMethod};
use crate::equations::{exact_div, lift_to_rational};

/// Stirling numbers of the second kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StirlingMethod;

impl StirlingMethod {
    /// `S(power, j)` for `j < min(power + 1, max_n + 2)`.
    ///
    /// Passing `max_n = power` yields the full vector.
    pub fn bounded_coefficients(&self, power: i64, max_n: i64) -> Vec<BigInt> {
        let Ok(power) = usize::try_from(power) else {
            return Vec::new();
        };
        if power == 0 {
            return vec![BigInt::one()];
        }

        let max_n = usize::try_from(max_n.max(0)).unwrap_or(usize::MAX);
        let len = (power + 1).min(max_n.saturating_add(2));
        if len < power + 1 {
            debug!(
                "stirling: {} of {} coefficients needed for power {}, max_n {}",
                len,
                power + 1,
                power,
                max_n
            );
        }

        // Row 0 is all zeros apart from S(0, 0), which starts out as the
        // "previous" value feeding S(1, 1).
        let mut coeffs = vec![BigInt::zero(); len];
        let mut previous = BigInt::one();
        for _ in 1..=power {
            for term in 1..len {
                let next = &previous + &coeffs[term] * term;
                previous = std::mem::replace(&mut coeffs[term], next);
            }
            previous = coeffs[0].clone();
        }
        coeffs
    }

    /// Combine Stirling numbers with falling factorials of `n + 1`.
    ///
    /// At most `n + 1` coefficients are used; later ones would multiply a
    /// zero falling factorial.
    pub fn sum_from_coefficients(&self, coeffs: &[BigInt], n: i64) -> BigInt {
        let mut sum = BigInt::zero();
        if n < 0 {
            return sum;
        }

        let terms = match usize::try_from(n) {
            Ok(n) => coeffs.len().min(n.saturating_add(1)),
            Err(_) => coeffs.len(),
        };
        let mut falling_factorial: BigInt = BigInt::from(n) + 1u32;
        for (t, coeff) in coeffs.iter().take(terms).enumerate() {
            // Divide before multiplying to keep the intermediate small
            let factor = exact_div(&falling_factorial, &BigInt::from(t + 1));
            sum += coeff * factor;
            falling_factorial *= n - t as i64;
        }
        sum
    }
}

impl PowerSumMethod for StirlingMethod {
    fn kind(&self) -> MethodKind {
        MethodKind::Stirling
    }

    fn coefficients(&self, power: i64) -> Vec<BigRational> {
        lift_to_rational(self.bounded_coefficients(power, power))
    }

    fn render_formula(&self, power: i64) -> String {
        if power < 0 {
            return String::new();
        }

        let coeffs = self.bounded_coefficients(power, power);
        let mut terms = Vec::new();
        for (t, coeff) in coeffs.iter().enumerate() {
            if coeff.is_zero() {
                continue;
            }
            let mut term = String::new();
            if !coeff.is_one() {
                term.push_str(&coeff.to_string());
            }
            term.push_str(&falling_factors(t));
            if t > 0 {
                term.push_str(&format!("/{}", t + 1));
            }
            terms.push(term);
        }
        terms.join(" + ")
    }

    fn evaluate_observed(&self, power: i64, n: i64, hook: &mut dyn PhaseHook) -> BigInt {
        if power < 0 || n < 0 {
            return BigInt::zero();
        }

        let coeffs = observe(hook, Phase::Coefficients, || self.bounded_coefficients(power, n));
        observe(hook, Phase::Summation, || self.sum_from_coefficients(&coeffs, n))
    }
}

/// `(n + 1)n(n - 1)...(n + 1 - term)`
fn falling_factors(term: usize) -> String {
    (0..=term)
        .map(|i| match i {
            0 => "(n + 1)".to_string(),
            1 => "n".to_string(),
            _ => format!("(n - {})", i - 1),
        })
        .collect()
}
