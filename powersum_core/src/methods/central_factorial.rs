//! # Central Factorial Method
//!
//! Closed forms built from central factorial numbers of the second kind,
//! which only exist at even indices:
//!
//! ```text
//! T(2m, 2m) = 1
//! T(2m, 2k) = k²·T(2m - 2, 2k) + T(2m - 2, 2k - 2)
//! ```
//!
//! With `m = ⌈p/2⌉` and `F(k) = (n + k)(n + k - 1)...(n - k + 1)`, a product of
//! `2k` consecutive integers:
//!
//! ```text
//! even p:  S(p, n) = Σ_{k≥1} T(p, 2k)·(2n + 1)·F(k) / (2(2k + 1))
//! odd p:   S(p, n) = Σ_{k≥1} T(p + 1, 2k)·F(k) / (2k)
//! ```
//!
//! Every term divides exactly. `F(k)` vanishes once `k > n`, so at most
//! `min(m + 1, n + 1)` numbers are generated.

use log::debug;
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Zero};

use super::{observe, MethodKind, Phase, PhaseHook, PowerSumMethod};
use crate::equations::{exact_div, lift_to_rational};

/// Central factorial numbers of the second kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CentralFactorialMethod;

impl CentralFactorialMethod {
    /// `T(2m, 2k)` for `k < min(m + 1, max_n + 1)`, where `m = ⌈power/2⌉`.
    ///
    /// Passing `max_n = power` yields the full vector.
    pub fn bounded_coefficients(&self, power: i64, max_n: i64) -> Vec<BigInt> {
        let Ok(power) = usize::try_from(power) else {
            return Vec::new();
        };
        let m = power / 2 + (power & 1);
        let max_n = usize::try_from(max_n.max(0)).unwrap_or(usize::MAX);
        let len = (m + 1).min(max_n.saturating_add(1));
        if len < m + 1 {
            debug!(
                "central factorial: {} of {} coefficients needed for power {}, max_n {}",
                len,
                m + 1,
                power,
                max_n
            );
        }

        // Row 0: T(0, 0) = 1
        let mut coeffs = vec![BigInt::zero(); len];
        coeffs[0] = BigInt::one();
        for i in 1..=m {
            // T(2i, 0) = 0; keep T(2i - 2, 0) for the k = 1 update
            let mut below = std::mem::replace(&mut coeffs[0], BigInt::zero());
            for k in 1..i.min(len) {
                let next = &coeffs[k] * (k * k) + &below;
                below = std::mem::replace(&mut coeffs[k], next);
            }
            if i < len {
                coeffs[i] = BigInt::one();
            }
        }
        coeffs
    }

    /// Combine central factorial numbers with the running product
    /// `(n + k)(n - k + 1)` accumulated over `k`.
    pub fn sum_from_coefficients(&self, coeffs: &[BigInt], power: i64, n: i64) -> BigInt {
        let mut sum = BigInt::zero();
        if power < 0 || n < 0 {
            return sum;
        }

        let even_power = power & 1 == 0;
        let big_n = BigInt::from(n);
        let twice_n_plus_one: BigInt = &big_n * 2u32 + 1u32;
        let mut falling_factorial = BigInt::one();
        // Index 0 is always 0 for power > 0
        for (k, coeff) in coeffs.iter().enumerate().skip(1) {
            let k = k as i64;
            let upper: BigInt = &big_n + k;
            let lower: BigInt = &big_n + 1u32 - k;
            falling_factorial *= upper * lower;
            let term = coeff * &falling_factorial;
            sum += if even_power {
                exact_div(&(term * &twice_n_plus_one), &BigInt::from(2 * (2 * k + 1)))
            } else {
                exact_div(&term, &BigInt::from(2 * k))
            };
        }
        sum
    }
}

impl PowerSumMethod for CentralFactorialMethod {
    fn kind(&self) -> MethodKind {
        MethodKind::CentralFactorial
    }

    fn coefficients(&self, power: i64) -> Vec<BigRational> {
        lift_to_rational(self.bounded_coefficients(power, power))
    }

    fn render_formula(&self, power: i64) -> String {
        if power < 0 {
            return String::new();
        }
        if power == 0 {
            return "(n + 1)".to_string();
        }

        let even_power = power & 1 == 0;
        let coeffs = self.bounded_coefficients(power, power);
        let mut terms = Vec::with_capacity(coeffs.len());
        for (k, coeff) in coeffs.iter().enumerate().skip(1) {
            let k = k as i64;
            let mut term = String::new();
            if !coeff.is_one() {
                term.push_str(&coeff.to_string());
            }
            if even_power {
                term.push_str("(2n + 1)");
            }
            term.push_str(&central_factors(k));
            if even_power {
                term.push_str(&format!("/{}", 2 * (2 * k + 1)));
            } else {
                term.push_str(&format!("/{}", 2 * k));
            }
            terms.push(term);
        }
        terms.join(" + ")
    }

    fn evaluate_observed(&self, power: i64, n: i64, hook: &mut dyn PhaseHook) -> BigInt {
        if power < 0 || n < 0 {
            return BigInt::zero();
        }
        if power == 0 {
            return observe(hook, Phase::Summation, || BigInt::from(n) + 1u32);
        }

        let coeffs = observe(hook, Phase::Coefficients, || self.bounded_coefficients(power, n));
        observe(hook, Phase::Summation, || self.sum_from_coefficients(&coeffs, power, n))
    }
}

/// `(n + k)(n + k - 1)...(n - k + 1)`
fn central_factors(k: i64) -> String {
    (0..2 * k)
        .map(|i| match k - i {
            0 => "n".to_string(),
            d if d > 0 => format!("(n + {})", d),
            d => format!("(n - {})", -d),
        })
        .collect()
}
