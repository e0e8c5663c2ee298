//! Property-based tests over generated expressions.
//!
//! Invariants exercised here:
//!
//! 1. No input, however mangled, panics any stage of the pipeline.
//! 2. Number literals round-trip: the debug form of any finite f64
//!    evaluates back to exactly that f64.
//! 3. Binary arithmetic matches the host's IEEE 754 results.
//! 4. Whitespace between tokens never changes a result.
//! 5. Tokenizing is deterministic and spans stay inside the input.
//! 6. Evaluation is idempotent: repeats give identical results.

use abacus_runtime::{evaluate, tokenize, Value};
use proptest::prelude::*;

// Known-good expressions for structural properties.
const VALID_EXPRESSIONS: &[&str] = &[
    "1 + 2 * 3",
    "10 % 4",
    "-(1 + 2)",
    "pi * 2",
    "sqrt(16) + pow(2, 3)",
    "log(8, 2)",
    "\"a\" + \"b\"",
    "true == 1",
    "1.5e3 / .5",
    "(2 + 3) * (4 - 1)",
    "abs(-7) <= 7",
];

fn valid_expression() -> impl Strategy<Value = String> {
    prop::sample::select(VALID_EXPRESSIONS).prop_map(str::to_string)
}

fn finite_f64() -> impl Strategy<Value = f64> {
    any::<f64>().prop_filter("finite", |n| n.is_finite())
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 256, ..ProptestConfig::default() })]

    #[test]
    fn pipeline_never_panics_on_printable_input(input in "\\PC{0,200}") {
        let _ = evaluate(&input);
    }

    #[test]
    fn pipeline_never_panics_on_arbitrary_chars(chars in prop::collection::vec(any::<char>(), 0..100)) {
        let input: String = chars.into_iter().collect();
        let _ = evaluate(&input);
    }

    #[test]
    fn number_literals_round_trip(n in finite_f64()) {
        let result = evaluate(&format!("{:?}", n));
        prop_assert_eq!(result, Ok(Value::Number(n)));
    }

    #[test]
    fn addition_matches_host_arithmetic(a in finite_f64(), b in finite_f64()) {
        let result = evaluate(&format!("{:?} + {:?}", a, b));
        prop_assert_eq!(result, Ok(Value::Number(a + b)));
    }

    #[test]
    fn multiplication_matches_host_arithmetic(a in finite_f64(), b in finite_f64()) {
        let result = evaluate(&format!("{:?} * {:?}", a, b));
        prop_assert_eq!(result, Ok(Value::Number(a * b)));
    }

    #[test]
    fn comparison_matches_host_ordering(a in finite_f64(), b in finite_f64()) {
        let result = evaluate(&format!("{:?} < {:?}", a, b));
        prop_assert_eq!(result, Ok(Value::Bool(a < b)));
    }

    #[test]
    fn extra_spaces_change_nothing(expression in valid_expression(), pad in 0usize..4) {
        let spaced: String = {
            let padding = " ".repeat(pad + 1);
            let mut out = String::new();
            for token in tokenize(&expression).unwrap() {
                out.push_str(&padding);
                // Restore quotes stripped during lexing.
                if token.kind == abacus_runtime::TokenKind::String {
                    out.push('"');
                    out.push_str(&token.lexeme);
                    out.push('"');
                } else {
                    out.push_str(&token.lexeme);
                }
            }
            out.push_str(&padding);
            out
        };
        prop_assert_eq!(evaluate(&spaced), evaluate(&expression));
    }

    #[test]
    fn tokenize_is_deterministic(expression in valid_expression()) {
        prop_assert_eq!(tokenize(&expression).unwrap(), tokenize(&expression).unwrap());
    }

    #[test]
    fn token_spans_are_ordered_and_in_bounds(expression in valid_expression()) {
        let tokens = tokenize(&expression).unwrap();
        let len = expression.chars().count();
        let mut last_end = 0;
        for token in &tokens {
            prop_assert!(token.span.start >= last_end, "overlap in {:?}", expression);
            prop_assert!(token.span.end <= len, "span out of bounds in {:?}", expression);
            prop_assert!(token.span.start < token.span.end);
            last_end = token.span.end;
        }
    }

    #[test]
    fn evaluation_is_idempotent(expression in valid_expression()) {
        prop_assert_eq!(evaluate(&expression), evaluate(&expression));
    }
}
