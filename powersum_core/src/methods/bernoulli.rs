//! # Bernoulli Method
//!
//! The classic formula as a polynomial in `(n + 1)`:
//!
//! ```text
//! S(p, n) = 1/(p + 1) · Σ_{k=0}^{p} C(p + 1, k)·B(k)·(n + 1)^(p + 1 - k)
//! ```
//!
//! with Bernoulli numbers from the recurrence
//!
//! ```text
//! B(0) = 1
//! B(m) = -(C(m + 1, 0)B(0) + C(m + 1, 1)B(1) + ... + C(m + 1, m - 1)B(m - 1)) / C(m + 1, m)
//! ```
//!
//! using the `B(1) = -1/2` convention. Odd `B(m)` above `m = 1` are exactly
//! zero and are never computed.

use log::debug;
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Zero};

use super::{observe, MethodKind, Phase, PhaseHook, PowerSumMethod};
use crate::equations::{exact_div, integral_value};

/// Bernoulli number formula.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BernoulliMethod;

impl PowerSumMethod for BernoulliMethod {
    fn kind(&self) -> MethodKind {
        MethodKind::Bernoulli
    }

    /// Bernoulli numbers `B(0)..=B(power)`.
    fn coefficients(&self, power: i64) -> Vec<BigRational> {
        let Ok(power) = usize::try_from(power) else {
            return Vec::new();
        };

        let mut coeffs = vec![BigRational::zero(); power + 1];
        coeffs[0] = BigRational::one();
        if power > 0 {
            coeffs[1] = BigRational::new(BigInt::from(-1), BigInt::from(2));
        }
        for m in (2..=power).step_by(2) {
            coeffs[m] = next_bernoulli(&coeffs, m);
        }
        debug!("bernoulli: {} coefficients for power {}", coeffs.len(), power);
        coeffs
    }

    fn render_formula(&self, power: i64) -> String {
        if power < 0 {
            return String::new();
        }

        let coeffs = self.coefficients(power);
        let mut binom = BigInt::one();
        let mut binom_n = power + 1;
        let mut binom_r: i64 = 1;
        let mut exponent = power + 1;

        let mut output = String::from("{ ");
        for (i, coeff) in coeffs.iter().enumerate() {
            if is_nonzero_index(i) {
                if i != 0 {
                    output.push_str(" + ");
                }
                if !coeff.is_one() {
                    output.push_str(&format!("({})", coeff));
                }
                if !binom.is_one() {
                    output.push_str(&binom.to_string());
                }
                output.push_str("(n + 1)");
                if exponent != 1 {
                    output.push_str(&format!("^{}", exponent));
                }
            }
            exponent -= 1;
            binom = exact_div(&(binom * binom_n), &BigInt::from(binom_r));
            binom_n -= 1;
            binom_r += 1;
        }
        output.push_str(" }");
        if power > 0 {
            output.push_str(&format!("/{}", power + 1));
        }
        output
    }

    fn evaluate_observed(&self, power: i64, n: i64, hook: &mut dyn PhaseHook) -> BigInt {
        if power < 0 || n < 0 {
            return BigInt::zero();
        }

        let coeffs = observe(hook, Phase::Coefficients, || self.coefficients(power));
        observe(hook, Phase::Summation, || sum_from_bernoulli(&coeffs, power, n))
    }
}

/// Odd indices above 1 carry a zero Bernoulli number.
#[inline]
fn is_nonzero_index(i: usize) -> bool {
    i & 1 == 0 || i == 1
}

/// Compute `B(m)` from `B(0)..B(m - 1)`.
fn next_bernoulli(current: &[BigRational], m: usize) -> BigRational {
    let mut binom = BigInt::one();
    let mut acc = BigRational::zero();
    for (k, b) in current.iter().enumerate().take(m) {
        if is_nonzero_index(k) {
            acc += b * &BigRational::from_integer(binom.clone());
        }
        // C(m + 1, k) -> C(m + 1, k + 1)
        binom = exact_div(&(binom * (m + 1 - k)), &BigInt::from(k + 1));
    }
    // binom is now C(m + 1, m)
    -acc / BigRational::from_integer(binom)
}

/// Walk the coefficients from the highest power of `(n + 1)` down, so the
/// power is extended by one multiplication per step and `C(p + 1, i)` is
/// updated rather than recomputed.
fn sum_from_bernoulli(coeffs: &[BigRational], power: i64, n: i64) -> BigInt {
    let base: BigInt = BigInt::from(n) + 1u32;
    let mut base_pow = base.clone();
    let mut binom_n = power + 1;
    let mut binom_r: i64 = 1;
    let mut binom = BigInt::from(binom_n);

    let mut sum = BigRational::zero();
    for (i, coeff) in coeffs.iter().enumerate().rev() {
        if is_nonzero_index(i) {
            sum += coeff * &BigRational::from_integer(&binom * &base_pow);
        }
        base_pow *= &base;
        binom_n -= 1;
        binom_r += 1;
        binom = exact_div(&(binom * binom_n), &BigInt::from(binom_r));
    }

    sum /= BigRational::from_integer(BigInt::from(power + 1));
    integral_value(&sum)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ratio(n: i64, d: i64) -> BigRational {
        BigRational::new(BigInt::from(n), BigInt::from(d))
    }

    #[test]
    fn test_bernoulli_numbers() {
        let b = BernoulliMethod.coefficients(12);
        assert_eq!(b[0], ratio(1, 1));
        assert_eq!(b[1], ratio(-1, 2));
        assert_eq!(b[2], ratio(1, 6));
        assert_eq!(b[4], ratio(-1, 30));
        assert_eq!(b[6], ratio(1, 42));
        assert_eq!(b[8], ratio(-1, 30));
        assert_eq!(b[10], ratio(5, 66));
        assert_eq!(b[12], ratio(-691, 2730));
    }

    #[test]
    fn test_odd_coefficients_are_zero() {
        for power in 0..=80 {
            let coeffs = BernoulliMethod.coefficients(power);
            assert_eq!(coeffs.len() as i64, power + 1);
            for (i, c) in coeffs.iter().enumerate().skip(3).step_by(2) {
                assert!(c.is_zero(), "B({}) = {} for power {}", i, c, power);
            }
        }
    }

    #[test]
    fn test_known_sums() {
        assert_eq!(BernoulliMethod.evaluate(0, 5), BigInt::from(6));
        assert_eq!(BernoulliMethod.evaluate(1, 10), BigInt::from(55));
        assert_eq!(BernoulliMethod.evaluate(2, 10), BigInt::from(385));
        assert_eq!(BernoulliMethod.evaluate(3, 4), BigInt::from(100));
        assert_eq!(BernoulliMethod.evaluate(5, 0), BigInt::from(0));
    }

    #[test]
    fn test_render_formula() {
        assert_eq!(
            BernoulliMethod.render_formula(3),
            "{ (n + 1)^4 + (-1/2)4(n + 1)^3 + (1/6)6(n + 1)^2 }/4"
        );
        assert_eq!(BernoulliMethod.render_formula(0), "{ (n + 1) }");
        assert!(BernoulliMethod.render_formula(-1).is_empty());
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(BernoulliMethod.coefficients(-4).is_empty());
        assert!(BernoulliMethod.evaluate(-1, 3).is_zero());
        assert!(BernoulliMethod.evaluate(3, -1).is_zero());
    }
}
