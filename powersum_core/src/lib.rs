//! # powersum_core - Exact Power Sums
//!
//! `powersum_core` computes `S(p, n) = 0^p + 1^p + ... + n^p` through five
//! classical closed forms, each with its own coefficient recurrence, and
//! evaluates them with exact big-integer and rational arithmetic. No floating
//! point is involved anywhere.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Every method is a unit struct; every call is a pure function
//! - **Exact**: `num-bigint` integers and `num-rational` rationals throughout
//! - **Bounded work**: Coefficient generation stops where the remaining terms
//!   provably vanish for the requested `n`
//! - **Forgiving methods, strict requests**: Methods degrade to empty/zero on
//!   negative input; [`request::SumRequest`] rejects it with a structured error
//!
//! ## Quick Start
//!
//! ```rust
//! use num_bigint::BigInt;
//! use powersum_core::methods::{MethodKind, PowerSumMethod};
//!
//! for kind in MethodKind::ALL {
//!     assert_eq!(kind.method().evaluate(2, 10), BigInt::from(385));
//! }
//! ```
//!
//! ## Modules
//!
//! - [`methods`] - The shared contract and the five methods
//! - [`equations`] - Binomials, exact division and the series reference
//! - [`request`] - Validated requests for front ends
//! - [`verification`] - Cross-validation against the series
//! - [`errors`] - Structured error types

pub mod equations;
pub mod errors;
pub mod methods;
pub mod request;
pub mod verification;

// Re-export commonly used types at crate root for convenience
pub use equations::series_sum;
pub use errors::{PowerSumError, PowerSumResult};
pub use methods::{
    BernoulliMethod, CentralFactorialMethod, EulerMethod, FaulhaberMethod, MethodKind, NoHook,
    Phase, PhaseHook, PowerSumMethod, StirlingMethod,
};
pub use request::{Operation, SumRequest, DEFAULT_TERM_COUNT};
pub use verification::{verify, Verification};
