//! # Combinatorial Helpers
//!
//! Binomial coefficients and the two "this must come out exact" operations
//! every method leans on.
//!
//! ## Invariant Handling
//!
//! Several closed forms divide by a value that provably divides the dividend.
//! A remainder there is a bug in the recurrence, not a user error. In debug
//! builds (and therefore in tests) it panics; in release builds it is logged
//! at `error` level and the truncated quotient is returned.

use log::error;
use num_bigint::BigInt;
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};

// =============================================================================
// BINOMIAL COEFFICIENTS
// =============================================================================

/// Calculate the binomial coefficient C(n, r)
///
/// # Formula
/// C(n, r) = n(n-1)...(n-r+1) / r!
///
/// Evaluated multiplicatively, dividing after every multiplication so each
/// intermediate value is itself a binomial coefficient. When `r > n/2` the
/// symmetric `C(n, n - r)` is used instead to minimise multiplications.
///
/// # Returns
/// 0 when `r > n` or either argument is negative.
///
/// # Example
/// ```rust
/// use num_bigint::BigInt;
/// use powersum_core::equations::binomial;
///
/// assert_eq!(binomial(10, 3), BigInt::from(120));
/// assert_eq!(binomial(10, 7), BigInt::from(120));
/// assert_eq!(binomial(3, 5), BigInt::from(0));
/// ```
pub fn binomial(n: i64, r: i64) -> BigInt {
    if n < 0 || r < 0 || r > n {
        return BigInt::zero();
    }
    let r = if r > n - r { n - r } else { r };
    if r == 0 {
        return BigInt::one();
    }

    let mut num = n;
    let mut result = BigInt::from(n);
    for i in 2..=r {
        num -= 1;
        result *= num;
        result /= i;
    }
    result
}

/// C(top, r) for a `top` that may not fit in an `i64`.
///
/// Evaluated as the product of `r` consecutive integers ending at `top`,
/// divided step by step; every partial quotient is itself a binomial
/// coefficient. Returns 0 when `top < r` or `top` is negative.
pub fn binomial_big(top: &BigInt, r: usize) -> BigInt {
    if top.is_negative() || *top < BigInt::from(r) {
        return BigInt::zero();
    }

    let base = top - r;
    let mut result = BigInt::one();
    for i in 1..=r {
        result *= &base + i;
        result = exact_div(&result, &BigInt::from(i));
    }
    result
}

/// Lift an integer coefficient vector to rationals with denominator 1
pub fn lift_to_rational(coeffs: Vec<BigInt>) -> Vec<BigRational> {
    coeffs.into_iter().map(BigRational::from_integer).collect()
}

// =============================================================================
// EXACT DIVISION
// =============================================================================

/// Divide `dividend` by `divisor` where the division is known to be exact.
///
/// # Panics
/// In debug builds, if the remainder is non-zero.
#[inline]
pub fn exact_div(dividend: &BigInt, divisor: &BigInt) -> BigInt {
    let (quotient, remainder) = dividend.div_rem(divisor);
    debug_assert!(
        remainder.is_zero(),
        "inexact division: {} / {} leaves {}",
        dividend,
        divisor,
        remainder
    );
    if !remainder.is_zero() {
        error!(
            "inexact division: {} / {} leaves remainder {}",
            dividend, divisor, remainder
        );
    }
    quotient
}

/// Extract the integer value of a rational that must be integral.
///
/// # Panics
/// In debug builds, if the denominator is not 1.
#[inline]
pub fn integral_value(value: &BigRational) -> BigInt {
    debug_assert!(value.is_integer(), "expected an integral value, got {}", value);
    if !value.is_integer() {
        error!("expected an integral value, got {}", value);
    }
    value.to_integer()
}
