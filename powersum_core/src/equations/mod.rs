//! # Shared Arithmetic
//!
//! Exact integer and rational helpers shared by every power sum method.
//! Nothing here ever touches floating point.
//!
//! ## Modules
//!
//! - [`combinatorics`] - Binomial coefficients, exact division, rational lifting
//! - [`series`] - Brute-force series reference used as a correctness oracle
//!
//! ## Notation
//!
//! - `p` = Power (exponent of each term)
//! - `n` = Number of terms (the sum runs over `i = 0..=n`)
//! - `C(n, r)` = Binomial coefficient
//! - `N` = `n(n + 1)`, the variable of the Faulhaber polynomial

pub mod combinatorics;
pub mod series;

// Re-export commonly used items
pub use combinatorics::{binomial, binomial_big, exact_div, integral_value, lift_to_rational};
pub use series::series_sum;
