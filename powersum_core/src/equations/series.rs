//! # Series Reference
//!
//! Brute-force evaluation of `0^p + 1^p + ... + n^p`. This is the oracle the
//! closed forms are checked against, never a production path.

use num_bigint::BigInt;
use num_traits::{pow, Zero};

/// Sum `i^power` for `i = 0..=n` term by term.
///
/// `0^0` is taken as 1, so `series_sum(0, n) == n + 1`.
///
/// # Returns
/// 0 when `power` or `n` is negative.
///
/// # Example
/// ```rust
/// use num_bigint::BigInt;
/// use powersum_core::equations::series_sum;
///
/// assert_eq!(series_sum(2, 10), BigInt::from(385));
/// assert_eq!(series_sum(-1, 10), BigInt::from(0));
/// ```
pub fn series_sum(power: i64, n: i64) -> BigInt {
    let mut sum = BigInt::zero();
    let Ok(exponent) = usize::try_from(power) else {
        return sum;
    };
    if n < 0 {
        return sum;
    }

    for i in 0..=n {
        sum += pow(BigInt::from(i), exponent);
    }
    sum
}
