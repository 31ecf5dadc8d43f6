//! # Faulhaber Method
//!
//! Expresses the sum as a polynomial in `N = n(n + 1)`:
//!
//! ```text
//! odd p:   S(p, n) = { c0·N^k + c1·N^(k-1) + ... } / 2               k = (p + 1)/2
//! even p:  S(p, n) = (2n + 1){ c0·N^k + c1·N^(k-1) + ... } / 2       k = p/2
//! ```
//!
//! ## Coefficients by Row Elimination
//!
//! There is no simple recurrence for the `c_i`. Following A. W. F. Edwards,
//! "A quick route to sums of powers", they solve a linear system whose rows
//! are built from binomial coefficients. Built in the right order the
//! augmented matrix is already in row echelon form, so reducing it to
//! reduced row echelon form takes one elimination step per row against the
//! single retained row:
//!
//! - storage is O(m) instead of the O(m²) of a full matrix
//! - time is O(m²) instead of the O(m^p), p > 2, of a matrix inversion
//!
//! where `m ≈ p/2`. Once a pivot becomes zero every remaining coefficient is
//! zero and the vector is truncated.
//!
//! ## Example
//!
//! ```rust
//! use num_bigint::BigInt;
//! use powersum_core::methods::{FaulhaberMethod, PowerSumMethod};
//!
//! // 1^4 + 2^4 + ... + 10^4
//! assert_eq!(FaulhaberMethod.evaluate(4, 10), BigInt::from(25333));
//! ```

use log::{debug, trace};
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{pow, One, Zero};

use super::{observe, MethodKind, Phase, PhaseHook, PowerSumMethod};
use crate::equations::{binomial, exact_div, integral_value};

/// Faulhaber's polynomial in `N = n(n + 1)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FaulhaberMethod;

impl FaulhaberMethod {
    /// Twice the sum, as the exact rational the closed form produces before
    /// the final halving.
    ///
    /// The closed form guarantees this value is an even integer; exposing it
    /// lets callers check that directly.
    pub fn doubled_sum(&self, power: i64, n: i64) -> BigRational {
        if power < 0 || n < 0 {
            return BigRational::zero();
        }
        if power == 0 {
            return BigRational::from_integer((BigInt::from(n) + 1u32) * 2u32);
        }
        if n == 0 {
            return BigRational::zero();
        }
        doubled_sum_from(&self.coefficients(power), power, n)
    }
}

impl PowerSumMethod for FaulhaberMethod {
    fn kind(&self) -> MethodKind {
        MethodKind::Faulhaber
    }

    fn coefficients(&self, power: i64) -> Vec<BigRational> {
        if power < 0 {
            return Vec::new();
        }

        let odd_power = power & 1 == 1;
        let n_limit = row_count(power);

        // Each row carries an augmented column entry of 1
        let (mut first_row, mut scale_by) = build_row(n_limit, n_limit, odd_power);
        let augmented = n_limit;

        let mut coeffs = Vec::with_capacity(n_limit);
        coeffs.push(BigRational::new(first_row[augmented].clone(), scale_by.clone()));

        let mut pivot_index = 1;
        for row_num in (1..n_limit).rev() {
            first_row[augmented] = BigInt::zero();
            let pivot = first_row[pivot_index].clone();
            if pivot.is_zero() {
                debug!(
                    "faulhaber: zero pivot at column {} for power {}, {} coefficients",
                    pivot_index,
                    power,
                    coeffs.len()
                );
                break;
            }

            let (next_row, next_scale_by) = build_row(n_limit, row_num, odd_power);
            scale_by *= next_scale_by;

            // Eliminate the pivot column: first = first·pivot_in_next - next·pivot
            let pivot_in_next = &next_row[pivot_index];
            for j in (pivot_index + 1)..next_row.len() {
                first_row[j] = &first_row[j] * pivot_in_next - &pivot * &next_row[j];
            }
            trace!("faulhaber: row {} eliminated at column {}", row_num, pivot_index);

            coeffs.push(BigRational::new(first_row[augmented].clone(), scale_by.clone()));
            pivot_index += 1;
        }

        coeffs
    }

    fn render_formula(&self, power: i64) -> String {
        if power < 0 {
            return String::new();
        }
        if power == 0 {
            return "(n + 1)".to_string();
        }

        let coeffs = self.coefficients(power);
        let mut output = String::new();
        if power & 1 == 0 {
            output.push_str("(2n + 1)");
        }
        output.push('{');
        let mut exponent = leading_exponent(power);
        for (i, coeff) in coeffs.iter().enumerate() {
            if i != 0 {
                output.push_str(" + ");
            }
            output.push_str(&format!("({})N", coeff));
            if exponent != 1 {
                output.push_str(&format!("^{}", exponent));
            }
            exponent = exponent.saturating_sub(1);
        }
        output.push_str("}/2\n");
        output.push_str("where N = n(n + 1)");
        output
    }

    fn evaluate_observed(&self, power: i64, n: i64, hook: &mut dyn PhaseHook) -> BigInt {
        if power < 0 || n < 0 {
            return BigInt::zero();
        }
        if power == 0 {
            return observe(hook, Phase::Summation, || BigInt::from(n) + 1u32);
        }

        let coeffs = observe(hook, Phase::Coefficients, || self.coefficients(power));
        observe(hook, Phase::Summation, || {
            if n == 0 {
                return BigInt::zero();
            }
            let doubled = doubled_sum_from(&coeffs, power, n);
            exact_div(&integral_value(&doubled), &BigInt::from(2))
        })
    }
}

/// Number of unknowns (and rows) in the linear system for `power`.
fn row_count(power: i64) -> usize {
    let count = if power & 1 == 1 {
        (power + 1) / 2
    } else {
        power / 2 + 1
    };
    usize::try_from(count).unwrap_or(0)
}

/// Exponent of `N` carried by the first coefficient.
fn leading_exponent(power: i64) -> usize {
    usize::try_from((power + 1) / 2).unwrap_or(0)
}

/// Evaluate `Σ c_i·N^(k - i)`, times `(2n + 1)` for even powers.
///
/// Powers of `N` are built upwards from the lowest exponent actually present,
/// walking the coefficients from last to first.
fn doubled_sum_from(coeffs: &[BigRational], power: i64, n: i64) -> BigRational {
    let n = BigInt::from(n);
    let big_n: BigInt = &n * (&n + 1u32);
    let lowest = (leading_exponent(power) + 1).saturating_sub(coeffs.len());
    let mut n_pow = pow(big_n.clone(), lowest);

    let mut sum = BigRational::zero();
    for coeff in coeffs.iter().rev() {
        sum += coeff * &BigRational::from_integer(n_pow.clone());
        n_pow *= &big_n;
    }
    if power & 1 == 0 {
        sum *= BigRational::from_integer(n * 2u32 + 1u32);
    }
    sum
}

/// Build row `row_num` of the augmented matrix.
///
/// Entries are generated for the odd column indices `2r - 1, 2r - 3, ..., 1`
/// (zero above `r`), padded with zeros to `n_limit`, reversed so the lowest
/// index comes first, then augmented with 1.
///
/// Returns the row and its first non-zero entry, which becomes the row's
/// contribution to the common denominator.
fn build_row(n_limit: usize, row_num: usize, odd_power: bool) -> (Vec<BigInt>, BigInt) {
    let r = row_num as i64;
    let mut row = Vec::with_capacity(n_limit + 1);
    let mut ncr1 = BigInt::zero();
    let mut ncr2 = BigInt::zero();

    for i in (1..2 * r).rev().step_by(2) {
        if i > r {
            row.push(BigInt::zero());
            continue;
        }

        // Update C(r, i) from C(r, i + 2) rather than recomputing it; a zero
        // running value means it has not been seeded yet.
        ncr1 = if ncr1.is_zero() {
            binomial(r, i)
        } else {
            exact_div(&(ncr1 * ((i + 2) * (i + 1))), &BigInt::from((r - i - 1) * (r - i)))
        };

        if odd_power {
            row.push(ncr1.clone());
        } else {
            ncr2 = if ncr2.is_zero() {
                binomial(r - 1, i)
            } else {
                exact_div(
                    &(ncr2 * ((i + 2) * (i + 1))),
                    &BigInt::from((r - i - 2) * (r - i - 1)),
                )
            };
            row.push(&ncr1 + &ncr2);
        }
    }

    row.resize(n_limit, BigInt::zero());
    row.reverse();
    row.push(BigInt::one());

    let scale_by = row
        .iter()
        .find(|value| !value.is_zero())
        .cloned()
        .unwrap_or_else(BigInt::one);
    (row, scale_by)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::equations::series_sum;
    use num_integer::Integer;

    fn ratio(n: i64, d: i64) -> BigRational {
        BigRational::new(BigInt::from(n), BigInt::from(d))
    }

    #[test]
    fn test_coefficients_small_powers() {
        let f = FaulhaberMethod;
        assert_eq!(f.coefficients(0), vec![ratio(1, 1)]);
        assert_eq!(f.coefficients(1), vec![ratio(1, 1)]);
        assert_eq!(f.coefficients(2), vec![ratio(1, 3)]);
        assert_eq!(f.coefficients(3), vec![ratio(1, 2)]);
        assert_eq!(f.coefficients(4), vec![ratio(1, 5), ratio(-1, 15)]);
        assert_eq!(f.coefficients(5), vec![ratio(1, 3), ratio(-1, 6)]);
    }

    #[test]
    fn test_coefficients_negative_power() {
        assert!(FaulhaberMethod.coefficients(-1).is_empty());
    }

    #[test]
    fn test_build_row_first_row_odd() {
        // Row 2 of the odd system: C(2,1) = 2, C(2,3) = 0, augmented 1
        let (row, scale) = build_row(2, 2, true);
        assert_eq!(row, vec![BigInt::from(2), BigInt::from(0), BigInt::from(1)]);
        assert_eq!(scale, BigInt::from(2));
    }

    #[test]
    fn test_build_row_padded() {
        // A shorter row is padded with leading zeros
        let (row, scale) = build_row(3, 1, true);
        assert_eq!(row.len(), 4);
        assert!(row[0].is_zero() && row[1].is_zero());
        assert_eq!(scale, row[2]);
    }

    #[test]
    fn test_power_one() {
        assert_eq!(FaulhaberMethod.evaluate(1, 10), BigInt::from(55));
        assert_eq!(FaulhaberMethod.evaluate(1, 1), BigInt::from(1));
    }

    #[test]
    fn test_doubled_sum_is_even_integer() {
        let f = FaulhaberMethod;
        for power in 0..=60 {
            for n in [0, 1, 2, 7, 31] {
                let doubled = f.doubled_sum(power, n);
                assert!(doubled.is_integer(), "power {} n {}: {}", power, n, doubled);
                assert!(doubled.numer().is_even(), "power {} n {}: {}", power, n, doubled);
                assert_eq!(doubled.numer() / BigInt::from(2), series_sum(power, n));
            }
        }
    }

    #[test]
    fn test_render_formula() {
        let f = FaulhaberMethod;
        assert_eq!(f.render_formula(0), "(n + 1)");
        assert_eq!(
            f.render_formula(4),
            "(2n + 1){(1/5)N^2 + (-1/15)N}/2\nwhere N = n(n + 1)"
        );
        assert_eq!(f.render_formula(3), "{(1/2)N^2}/2\nwhere N = n(n + 1)");
        assert!(f.render_formula(-2).is_empty());
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(FaulhaberMethod.evaluate(-1, 5).is_zero());
        assert!(FaulhaberMethod.evaluate(5, -1).is_zero());
    }
}
