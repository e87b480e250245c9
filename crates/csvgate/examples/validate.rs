//! Example: Validate a product listing with csvgate.
//!
//! Usage:
//!   cargo run --example validate -- <file_path>
//!
//! The file needs the headers `ID,Title,Category,Email,Phone,Created,Quantity`.
//! Set `RUST_LOG=csvgate=trace` to see rejected rows as they are read.

use std::env;

use csvgate::{ColumnRule, ColumnType, CsvGate, DatePolicy, SchemaSpec, ValidationRules};
use tracing_subscriber::EnvFilter;

fn main() -> csvgate::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: cargo run --example validate -- <file_path>");
        std::process::exit(1);
    }

    let schema = SchemaSpec::new()
        .column(
            "ID",
            ColumnRule::new("id")
                .with_type(ColumnType::Integer)
                .with_validations(ValidationRules::new().required()),
        )
        .column(
            "Title",
            ColumnRule::new("title").with_validations(
                ValidationRules::new()
                    .required()
                    .with_min_length(1)
                    .with_max_length(100),
            ),
        )
        .column(
            "Category",
            ColumnRule::new("category").with_validations(
                ValidationRules::new()
                    .required()
                    .with_callback(|v: &str| matches!(v, "Phone" | "PC")),
            ),
        )
        .column(
            "Email",
            ColumnRule::new("email").with_validations(ValidationRules::new().email()),
        )
        .column(
            "Phone",
            ColumnRule::new("phone").with_validations(ValidationRules::new().phone()),
        )
        .column("Created", ColumnRule::new("created").with_type(ColumnType::Date))
        .column(
            "Quantity",
            ColumnRule::new("quantity")
                .with_type(ColumnType::Integer)
                .with_validations(ValidationRules::new().with_min(1).with_max(10)),
        );

    let gate = CsvGate::new().with_date_policy(DatePolicy::RecordError);
    let outcome = gate.query(&args[1], &schema)?;

    println!("{}", outcome.to_json()?);
    eprintln!(
        "{} accepted, {} field errors",
        outcome.accepted_count(),
        outcome.error_count()
    );

    Ok(())
}
