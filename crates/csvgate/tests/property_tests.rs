//! Property-based tests for csvgate.
//!
//! Property-based tests verify:
//! 1. **No panics**: evaluation and conversion never crash on any input
//! 2. **Determinism**: same input always produces same output
//! 3. **Partitioning**: every row is either accepted or reported, never both
//! 4. **Ordering**: errors follow file order, then schema order
//!
//! ```bash
//! PROPTEST_CASES=10000 cargo test -p csvgate --test property_tests
//! ```

use proptest::prelude::*;

use csvgate::transform::{convert, leading_integer};
use csvgate::validation::{evaluate, is_phone, Violation};
use csvgate::{ColumnRule, ColumnType, CsvGate, SchemaSpec, ValidationRules};

// =============================================================================
// Test Strategies
// =============================================================================

/// Arbitrary field values, including empty strings and non-ASCII text.
fn field_value() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-zA-Z0-9@._+\\-]{0,20}",
        "[0-9]{0,14}",
        "-?[0-9]{1,4}[a-z]{0,3}",
        "\\PC{0,12}",
    ]
}

/// A rule set with a random subset of checks enabled.
fn rules() -> impl Strategy<Value = ValidationRules> {
    (
        any::<bool>(),
        proptest::option::of(0usize..10),
        proptest::option::of(0usize..20),
        any::<bool>(),
        any::<bool>(),
        proptest::option::of(-100i32..100),
        proptest::option::of(-100i32..100),
    )
        .prop_map(|(required, min_len, max_len, email, phone, min, max)| {
            let mut rules = ValidationRules::new();
            rules.required = required;
            rules.min_length = min_len;
            rules.max_length = max_len;
            rules.email = email;
            rules.phone = phone;
            rules.min = min.map(f64::from);
            rules.max = max.map(f64::from);
            rules
        })
}

/// CSV-safe cell contents (no delimiters, quotes or newlines).
fn cell() -> impl Strategy<Value = String> {
    "[a-z0-9@.]{0,8}"
}

fn range_schema() -> SchemaSpec {
    SchemaSpec::new()
        .column(
            "a",
            ColumnRule::new("a").with_validations(ValidationRules::new().required()),
        )
        .column(
            "b",
            ColumnRule::new("b")
                .with_type(ColumnType::Integer)
                .with_validations(ValidationRules::new().with_min(0).with_max(50)),
        )
        .column(
            "c",
            ColumnRule::new("c").with_validations(ValidationRules::new().with_max_length(4)),
        )
}

fn to_csv(rows: &[(String, String, String)]) -> String {
    let mut out = String::from("a,b,c\n");
    for (a, b, c) in rows {
        out.push_str(&format!("{},{},{}\n", a, b, c));
    }
    out
}

// =============================================================================
// Field Rule Properties
// =============================================================================

proptest! {
    #[test]
    fn evaluate_never_panics(value in field_value(), rules in rules()) {
        let _ = evaluate(Some(value.as_str()), &rules);
        let _ = evaluate(None, &rules);
    }

    #[test]
    fn evaluate_is_deterministic(value in field_value(), rules in rules()) {
        prop_assert_eq!(evaluate(Some(value.as_str()), &rules), evaluate(Some(value.as_str()), &rules));
    }

    #[test]
    fn absent_value_only_fails_required(rules in rules()) {
        let result = evaluate(None, &rules);
        if rules.required {
            prop_assert_eq!(result, Err(Violation::Required));
        } else {
            prop_assert_eq!(result, Ok(()));
        }
    }

    #[test]
    fn phone_accepts_exactly_ten_or_eleven_digits(digits in "[0-9]{0,14}") {
        prop_assert_eq!(is_phone(&digits), digits.len() == 10 || digits.len() == 11);
    }

    #[test]
    fn leading_integer_matches_plain_parse(n in any::<i64>()) {
        prop_assert_eq!(leading_integer(&n.to_string()), n);
    }

    #[test]
    fn numeric_conversion_never_fails(value in field_value()) {
        prop_assert!(convert(Some(value.as_str()), ColumnType::Integer).is_ok());
        prop_assert!(convert(Some(value.as_str()), ColumnType::Float).is_ok());
        prop_assert!(convert(Some(value.as_str()), ColumnType::String).is_ok());
    }
}

// =============================================================================
// Outcome Properties
// =============================================================================

proptest! {
    #[test]
    fn rows_partition_into_results_or_errors(
        rows in proptest::collection::vec((cell(), cell(), cell()), 0..20)
    ) {
        let schema = range_schema();
        let csv = to_csv(&rows);
        let outcome = CsvGate::new().validate_reader(csv.as_bytes(), &schema).unwrap();

        let rejected: std::collections::BTreeSet<usize> =
            outcome.errors.iter().map(|e| e.row).collect();
        prop_assert_eq!(outcome.results.len() + rejected.len(), rows.len());
        prop_assert!(rejected.iter().all(|&line| line >= 2 && line < rows.len() + 2));
    }

    #[test]
    fn errors_follow_file_then_schema_order(
        rows in proptest::collection::vec((cell(), cell(), cell()), 0..20)
    ) {
        let schema = range_schema();
        let csv = to_csv(&rows);
        let outcome = CsvGate::new().validate_reader(csv.as_bytes(), &schema).unwrap();

        let column_index = |message: &str| {
            schema.headers().iter().position(|h| message.starts_with(&format!("{} ", h)))
        };
        let keys: Vec<(usize, Option<usize>)> = outcome
            .errors
            .iter()
            .map(|e| (e.row, column_index(&e.message)))
            .collect();
        let mut sorted = keys.clone();
        sorted.sort();
        prop_assert_eq!(keys, sorted);
    }

    #[test]
    fn validation_is_repeatable(
        rows in proptest::collection::vec((cell(), cell(), cell()), 0..20)
    ) {
        let schema = range_schema();
        let csv = to_csv(&rows);
        let gate = CsvGate::new();

        let first = gate.validate_reader(csv.as_bytes(), &schema).unwrap();
        let second = gate.validate_reader(csv.as_bytes(), &schema).unwrap();
        prop_assert_eq!(first, second);
    }
}
