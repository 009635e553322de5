//! Validate command - Validate a book.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use tracing::{info, warn};

use dokapi_book::{Book, BookParser, BookResult, ValidationMode};
use dokapi_schema::Violation;

#[derive(Args)]
pub struct ValidateArgs {
    /// Book directory containing dokapi.json
    #[arg(env = "DOKAPI_INPUT")]
    input: PathBuf,

    /// Report every violation instead of stopping at the first
    #[arg(long)]
    all_errors: bool,

    /// Print a JSON report on stdout
    #[arg(long)]
    json: bool,
}

/// Machine-readable outcome of a validation run.
#[derive(Debug, Serialize)]
struct Report {
    valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    entries: usize,
    referenced_files: Vec<PathBuf>,
    unreferenced_files: Vec<PathBuf>,
    violations: Vec<Violation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl Report {
    fn new(result: &BookResult<Book>) -> Self {
        match result {
            Ok(book) => Self {
                valid: true,
                name: Some(book.name().to_string()),
                entries: book.entries().len(),
                referenced_files: book.referenced_files().to_vec(),
                unreferenced_files: book.unreferenced_content_files(),
                violations: Vec::new(),
                error: None,
            },
            Err(err) => Self {
                valid: false,
                name: None,
                entries: 0,
                referenced_files: Vec::new(),
                unreferenced_files: Vec::new(),
                violations: err
                    .validation()
                    .map(|v| v.violations().to_vec())
                    .unwrap_or_default(),
                error: Some(err.to_string()),
            },
        }
    }
}

pub fn execute(args: ValidateArgs) -> Result<()> {
    info!("Validating book in {}", args.input.display());

    let mode = if args.all_errors {
        ValidationMode::CollectAll
    } else {
        ValidationMode::FailFast
    };
    let result = BookParser::new().with_mode(mode).parse(&args.input);

    if args.json {
        let report = Report::new(&result);
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    let book = result.with_context(|| format!("Validation failed for {}", args.input.display()))?;

    let orphans = book.unreferenced_content_files();
    for orphan in &orphans {
        warn!("Unreferenced content file: {}", orphan.display());
    }

    if !args.json {
        println!("📘 {}", book.name());
        println!(
            "   {} index entries, {} content files",
            book.entries().len(),
            book.referenced_files().len()
        );
        for orphan in &orphans {
            println!("   ⚠️  Not referenced: {}", orphan.display());
        }
        println!();
        println!("✅ Book descriptor is valid");
    }

    Ok(())
}
