//! Fuzz target for reading and validating arbitrary delimited input.
//!
//! Whatever the bytes, a run either returns an outcome or an error; it never
//! panics. Auto-detection is enabled so the delimiter scan is exercised too.

#![no_main]

use csvgate::{
    ColumnRule, ColumnType, CsvGate, DatePolicy, GateConfig, ReaderConfig, SchemaSpec,
    ValidationRules,
};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 10_000 {
        return;
    }

    let schema = SchemaSpec::new()
        .column(
            "id",
            ColumnRule::new("id")
                .with_type(ColumnType::Integer)
                .with_validations(ValidationRules::new().required()),
        )
        .column(
            "email",
            ColumnRule::new("email").with_validations(ValidationRules::new().email()),
        )
        .column("when", ColumnRule::new("when").with_type(ColumnType::Date))
        .column("amount", ColumnRule::new("amount").with_type(ColumnType::Float));

    let config = GateConfig {
        reader: ReaderConfig {
            delimiter: None,
            ..ReaderConfig::default()
        },
        date_policy: DatePolicy::RecordError,
    };

    if let Ok(outcome) = CsvGate::with_config(config).validate_reader(data, &schema) {
        assert!(outcome.errors.iter().all(|e| e.row >= 2));
    }
});
