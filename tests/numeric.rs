#[cfg(test)]
mod numeric_tests {
    use std::cmp::Ordering;

    use scheme_interpreter as scheme;

    use scheme::numeric::{self, Comparison};
    use scheme::value::Value;

    fn int(n: i64) -> Value {
        Value::Integer(n)
    }

    fn frac(n: i64, d: i64) -> Value {
        Value::rational(n, d)
    }

    fn render(result: scheme::error::Result<Value>) -> String {
        result.expect("numeric operation").to_string()
    }

    fn samples() -> Vec<Value> {
        vec![
            int(-3),
            int(0),
            int(2),
            int(7),
            frac(1, 2),
            frac(-2, 3),
            frac(6, 4),
        ]
    }

    #[test]
    fn integer_operands_stay_integer() {
        assert_eq!(render(numeric::add(&int(2), &int(3))), "5");
        assert_eq!(render(numeric::subtract(&int(2), &int(3))), "-1");
        assert_eq!(render(numeric::multiply(&int(4), &int(-3))), "-12");
    }

    #[test]
    fn rationals_are_not_reduced() {
        assert_eq!(render(numeric::add(&frac(1, 2), &frac(1, 2))), "4/4");
        assert_eq!(render(numeric::add(&int(1), &frac(1, 2))), "3/2");
        assert_eq!(render(numeric::multiply(&frac(2, 3), &int(3))), "6/3");
        assert_eq!(render(numeric::divide(&frac(1, 2), &frac(1, 4))), "4/2");
    }

    #[test]
    fn integer_division_is_exact() {
        for a in -6..=6 {
            for b in [-3, -2, -1, 1, 2, 3] {
                let result = numeric::divide(&int(a), &int(b)).expect("nonzero divisor");

                if a % b == 0 {
                    assert!(matches!(result, Value::Integer(q) if q == a / b));
                } else {
                    assert!(matches!(result, Value::Rational(ref r) if **r == (a, b)));
                }
            }
        }
    }

    #[test]
    fn mixed_addition_agrees_in_both_orders() {
        for lhs in samples() {
            for rhs in samples() {
                let ab = numeric::add(&lhs, &rhs).expect("sum");
                let ba = numeric::add(&rhs, &lhs).expect("sum");

                assert_eq!(numeric::compare(&ab, &ba).expect("numbers"), Ordering::Equal);
            }
        }
    }

    #[test]
    fn two_operand_and_chained_comparisons_agree() {
        let ops = [
            Comparison::Less,
            Comparison::LessEq,
            Comparison::Equal,
            Comparison::GreaterEq,
            Comparison::Greater,
        ];

        for op in ops {
            for lhs in samples() {
                for rhs in samples() {
                    let pairwise = op.apply(&lhs, &rhs).expect("numbers");
                    let chained = op.chain(&[lhs.clone(), rhs.clone()]).expect("numbers");

                    assert_eq!(pairwise.to_string(), chained.to_string());
                }
            }
        }
    }

    #[test]
    fn chain_requires_two_arguments() {
        assert!(Comparison::Less.chain(&[int(1)]).is_err());
        assert_eq!(
            render(Comparison::Less.chain(&[int(1), int(2), int(3)])),
            "#t"
        );
        assert_eq!(
            render(Comparison::Less.chain(&[int(1), int(3), int(2)])),
            "#f"
        );
    }

    #[test]
    fn chain_stops_at_first_failure() {
        // The third operand is never compared once 2 < 1 fails.
        let args = [int(2), int(1), Value::string("not a number")];

        assert_eq!(render(Comparison::Less.chain(&args)), "#f");
    }

    #[test]
    fn equal_rationals_compare_equal() {
        assert_eq!(
            numeric::compare(&frac(1, 2), &frac(2, 4)).expect("numbers"),
            Ordering::Equal
        );
        assert_eq!(
            numeric::compare(&int(1), &frac(3, 2)).expect("numbers"),
            Ordering::Less
        );
    }

    #[test]
    fn reciprocal_of_an_integer_is_always_rational() {
        for n in [-4, -1, 1, 2, 7] {
            let result = numeric::reciprocal(&int(n)).expect("nonzero");

            assert!(matches!(result, Value::Rational(ref r) if **r == (1, n)));
        }
    }

    #[test]
    fn division_by_zero_fails() {
        assert!(numeric::divide(&int(1), &int(0)).is_err());
        assert!(numeric::divide(&frac(1, 2), &frac(0, 5)).is_err());
        assert!(numeric::reciprocal(&int(0)).is_err());
        assert!(numeric::modulo(&int(7), &int(0)).is_err());
    }

    #[test]
    fn modulo_takes_sign_of_dividend() {
        assert_eq!(render(numeric::modulo(&int(7), &int(3))), "1");
        assert_eq!(render(numeric::modulo(&int(-7), &int(3))), "-1");
        assert!(numeric::modulo(&frac(1, 2), &int(3)).is_err());
    }

    #[test]
    fn expt_edge_cases() {
        assert_eq!(render(numeric::expt(&int(2), &int(10))), "1024");
        assert_eq!(render(numeric::expt(&int(-3), &int(3))), "-27");
        assert_eq!(render(numeric::expt(&int(5), &int(0))), "1");
        assert_eq!(
            render(numeric::expt(&int(2), &int(62))),
            "4611686018427387904"
        );

        assert!(numeric::expt(&int(2), &int(-1)).is_err());
        assert!(numeric::expt(&int(0), &int(0)).is_err());
        assert!(numeric::expt(&int(2), &int(63)).is_err());
        assert!(numeric::expt(&frac(1, 2), &int(2)).is_err());
    }

    #[test]
    fn overflow_is_an_error() {
        assert!(numeric::add(&int(i64::MAX), &int(1)).is_err());
        assert!(numeric::multiply(&int(i64::MIN), &int(-1)).is_err());
        assert!(numeric::negate(&int(i64::MIN)).is_err());
    }

    #[test]
    fn folds_handle_identity_and_single_arguments() {
        assert_eq!(render(numeric::sum(&[])), "0");
        assert_eq!(render(numeric::product(&[])), "1");
        assert_eq!(render(numeric::difference(&[int(5)])), "-5");
        assert_eq!(render(numeric::quotient(&[int(1)])), "1/1");
        assert_eq!(render(numeric::quotient(&[int(-1)])), "1/-1");
        assert_eq!(render(numeric::quotient(&[int(3)])), "1/3");
        assert_eq!(render(numeric::quotient(&[frac(2, 3)])), "3/2");
        assert_eq!(render(numeric::sum(&[int(1), int(2), int(3)])), "6");
        assert_eq!(render(numeric::difference(&[int(10), int(1), int(2)])), "7");

        assert!(numeric::sum(&[Value::Boolean(true)]).is_err());
        assert!(numeric::difference(&[]).is_err());
        assert!(numeric::quotient(&[]).is_err());
    }
}
