//! Fuzz target for field rule evaluation and value conversion.

#![no_main]

use csvgate::transform::{convert, leading_float, leading_integer};
use csvgate::validation::evaluate;
use csvgate::{ColumnType, ValidationRules};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(value) = std::str::from_utf8(data) else {
        return;
    };

    let rules = ValidationRules::new()
        .required()
        .with_min_length(1)
        .with_max_length(64)
        .email()
        .phone()
        .with_min(-1000)
        .with_max(1000);
    let _ = evaluate(Some(value), &rules);

    let _ = leading_integer(value);
    let _ = leading_float(value);
    for column_type in [ColumnType::Integer, ColumnType::Float, ColumnType::Date] {
        let _ = convert(Some(value), column_type);
    }
});
