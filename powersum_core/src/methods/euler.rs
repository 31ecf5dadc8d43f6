//! # Euler Method
//!
//! Worpitzky's identity turns the sum into Eulerian numbers times binomials:
//!
//! ```text
//! S(p, n) = Σ_j E(p, j) · C(n + j + 1, p + 1)
//! ```
//!
//! with Eulerian numbers of the first kind
//!
//! ```text
//! E(i, 0) = 1
//! E(i, j) = (j + 1)·E(i - 1, j) + (i - j)·E(i - 1, j - 1)
//! ```
//!
//! Each row is symmetric, `E(i, j) = E(i, i - 1 - j)`, so only the first
//! half is computed by the recurrence and the rest is a reflected copy.
//!
//! The rendered formula shows each binomial as a product of `p + 1`
//! consecutive factors over `(p + 1)!`. The evaluation path never forms that
//! denominator: it updates `C(n + j + 1, p + 1)` incrementally and stays in
//! the integers throughout.

use log::debug;
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};

use super::{observe, MethodKind, Phase, PhaseHook, PowerSumMethod};
use crate::equations::{binomial_big, exact_div, lift_to_rational};

/// Eulerian numbers with Worpitzky's identity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EulerMethod;

impl EulerMethod {
    /// Row `power` of the Eulerian triangle, `power + 1` entries with a
    /// trailing 0.
    ///
    /// The recurrence only produces the first `min(half_limit, max_n) + 1`
    /// entries of each row; entries whose binomial vanishes for `n <= max_n`
    /// are not needed. Passing `max_n = power` yields the exact full row.
    pub fn bounded_coefficients(&self, power: i64, max_n: i64) -> Vec<BigInt> {
        let Ok(power) = usize::try_from(power) else {
            return Vec::new();
        };
        let max_n = usize::try_from(max_n.max(0)).unwrap_or(usize::MAX);

        let mut coeffs = vec![BigInt::zero(); power + 1];
        coeffs[0] = BigInt::one();
        let mut truncated = false;
        for row in 1..=power {
            let produced = advance_row(&mut coeffs, row, max_n);
            truncated |= produced <= half_limit(row);
        }

        if truncated {
            debug!("euler: rows for power {} truncated at max_n {}", power, max_n);
        }
        coeffs
    }

    /// Combine Eulerian numbers with `C(n + j + 1, power + 1)`.
    ///
    /// Terms with `n + j < power` have a zero binomial and are skipped. The
    /// first surviving binomial is computed directly, later ones by
    /// `C(m + 1, p + 1) = C(m, p + 1)·(m + 1)/(m - p)`.
    pub fn sum_from_coefficients(&self, coeffs: &[BigInt], power: i64, n: i64) -> BigInt {
        let mut sum = BigInt::zero();
        if power < 0 || n < 0 {
            return sum;
        }

        // n + j < power  <=>  j < power - n
        let first_used = usize::try_from(power - n).unwrap_or(0);
        let big_n = BigInt::from(n);
        let rank = usize::try_from(power + 1).unwrap_or(usize::MAX);

        let mut binom: Option<BigInt> = None;
        for (j, coeff) in coeffs.iter().enumerate().skip(first_used) {
            let top: BigInt = &big_n + j;
            let current = match binom.take() {
                None => binomial_big(&(&top + 1u32), rank),
                Some(prev) => exact_div(&(prev * (&top + 1u32)), &(&top - power)),
            };
            sum += coeff * &current;
            binom = Some(current);
        }
        sum
    }
}

impl PowerSumMethod for EulerMethod {
    fn kind(&self) -> MethodKind {
        MethodKind::Euler
    }

    fn coefficients(&self, power: i64) -> Vec<BigRational> {
        lift_to_rational(self.bounded_coefficients(power, power))
    }

    fn render_formula(&self, power: i64) -> String {
        if power < 0 {
            return String::new();
        }

        let coeffs = self.bounded_coefficients(power, power);
        let factorial = (2..=power + 1).fold(BigInt::one(), |acc, i| acc * i);

        let mut output = String::from("{ ");
        for (j, coeff) in coeffs.iter().enumerate() {
            if coeff > &BigInt::one() {
                output.push_str(&coeff.to_string());
            }
            if coeff.is_positive() {
                output.push_str(&descending_factors(j as i64 + 1, power + 1));
            }
            if j + 2 < coeffs.len() {
                output.push_str(" + ");
            }
        }
        output.push_str(" }");
        if !factorial.is_one() {
            output.push_str(&format!("/{}", factorial));
        }
        output
    }

    fn evaluate_observed(&self, power: i64, n: i64, hook: &mut dyn PhaseHook) -> BigInt {
        if power < 0 || n < 0 {
            return BigInt::zero();
        }

        let coeffs = observe(hook, Phase::Coefficients, || self.bounded_coefficients(power, n));
        observe(hook, Phase::Summation, || self.sum_from_coefficients(&coeffs, power, n))
    }
}

/// `(n + top)(n + top - 1)...` with `count` factors.
fn descending_factors(top: i64, count: i64) -> String {
    (0..count)
        .map(|offset| {
            let shift = top - offset;
            match shift {
                0 => "n".to_string(),
                s if s > 0 => format!("(n + {})", s),
                s => format!("(n - {})", -s),
            }
        })
        .collect()
}

/// Last index of row `row` that the recurrence has to produce; the rest of
/// the row mirrors it.
fn half_limit(row: usize) -> usize {
    if row & 1 == 1 {
        row / 2
    } else {
        row / 2 - 1
    }
}

/// Turn row `row - 1` in `coeffs` into row `row`.
///
/// The recurrence runs over `j <= min(half_limit, max_n)` only; the
/// return value is the number of entries it produced.
fn advance_row(coeffs: &mut [BigInt], row: usize, max_n: usize) -> usize {
    let half_limit = half_limit(row);
    let limit = half_limit.min(max_n);

    // previous holds E(row - 1, j - 1) once j > 0
    let mut previous = BigInt::zero();
    for j in 0..=limit {
        let next = if j == 0 {
            BigInt::one()
        } else {
            &coeffs[j] * (j + 1) + &previous * (row - j)
        };
        previous = std::mem::replace(&mut coeffs[j], next);
    }

    // Reflect the first half about the centre of the row
    let centre = if row & 1 == 1 { half_limit } else { half_limit + 1 };
    let mut k = 1;
    while half_limit + k < row {
        coeffs[half_limit + k] = coeffs[centre - k].clone();
        k += 1;
    }
    coeffs[row] = BigInt::zero();
    limit + 1
}
