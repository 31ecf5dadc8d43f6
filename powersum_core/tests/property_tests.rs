//! Property-based tests using proptest

use num_bigint::BigInt;
use num_traits::Zero;
use powersum_core::*;
use proptest::prelude::*;

fn method_kind() -> impl Strategy<Value = MethodKind> {
    prop::sample::select(MethodKind::ALL.to_vec())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn test_every_method_matches_series(
        kind in method_kind(),
        power in 0i64..80,
        n in 0i64..300
    ) {
        prop_assert_eq!(kind.method().evaluate(power, n), series_sum(power, n));
    }

    #[test]
    fn test_methods_agree_with_each_other(power in 0i64..60, n in 0i64..1000) {
        let expected = FaulhaberMethod.evaluate(power, n);
        for kind in MethodKind::ALL {
            prop_assert_eq!(kind.method().evaluate(power, n), expected.clone(), "{}", kind);
        }
    }

    #[test]
    fn test_consecutive_sums_differ_by_last_term(
        kind in method_kind(),
        power in 0i64..40,
        n in 1i64..200
    ) {
        let method = kind.method();
        let step = method.evaluate(power, n) - method.evaluate(power, n - 1);
        prop_assert_eq!(step, num_traits::pow(BigInt::from(n), power as usize));
    }

    #[test]
    fn test_negative_inputs_give_zero(
        kind in method_kind(),
        power in -1000i64..0,
        n in -1000i64..1000
    ) {
        let method = kind.method();
        prop_assert!(method.coefficients(power).is_empty());
        prop_assert!(method.evaluate(power, n).is_zero());
        prop_assert!(method.evaluate(n.abs(), power).is_zero());
    }

    #[test]
    fn test_euler_formula_matches_evaluation(power in 0i64..40) {
        // The rendered formula sums Eulerian numbers over a common factorial
        // denominator; rebuild it from the coefficients and compare at n = 7.
        let coeffs = EulerMethod.bounded_coefficients(power, power);
        let n = 7i64;
        let mut numerator = BigInt::zero();
        for (j, coeff) in coeffs.iter().enumerate() {
            let mut product = BigInt::from(1);
            for k in 0..=power {
                product *= n + j as i64 + 1 - k;
            }
            numerator += coeff * product;
        }
        let factorial = (2..=power + 1).fold(BigInt::from(1), |acc, i| acc * i);
        prop_assert!((&numerator % &factorial).is_zero());
        prop_assert_eq!(numerator / factorial, EulerMethod.evaluate(power, n));
    }

    #[test]
    fn test_truncated_vectors_give_full_sums(power in 1i64..50, n in 0i64..30) {
        let stirling_full = StirlingMethod.bounded_coefficients(power, power);
        let stirling_cut = StirlingMethod.bounded_coefficients(power, n);
        prop_assert_eq!(
            StirlingMethod.sum_from_coefficients(&stirling_cut, n),
            StirlingMethod.sum_from_coefficients(&stirling_full, n)
        );

        let euler_full = EulerMethod.bounded_coefficients(power, power);
        let euler_cut = EulerMethod.bounded_coefficients(power, n);
        prop_assert_eq!(
            EulerMethod.sum_from_coefficients(&euler_cut, power, n),
            EulerMethod.sum_from_coefficients(&euler_full, power, n)
        );

        let central_full = CentralFactorialMethod.bounded_coefficients(power, power);
        let central_cut = CentralFactorialMethod.bounded_coefficients(power, n);
        prop_assert_eq!(
            CentralFactorialMethod.sum_from_coefficients(&central_cut, power, n),
            CentralFactorialMethod.sum_from_coefficients(&central_full, power, n)
        );
    }

    #[test]
    fn test_method_kind_parse_roundtrip(kind in method_kind()) {
        let parsed: MethodKind = kind.to_string().parse().unwrap();
        prop_assert_eq!(parsed, kind);
    }
}
