//! CLI command definitions.

use clap::{Parser, Subcommand};

pub mod files;
pub mod validate;

/// Dokapi - documentation book checker
#[derive(Parser)]
#[command(name = "dokapi")]
#[command(version, about = "Dokapi - validate documentation book descriptors")]
#[command(long_about = r#"
Dokapi checks the dokapi.json descriptor of a documentation book: its
structure, its templates and assets, and every content page it references.

COMMANDS:
  validate      → Validate a book and summarize its table of contents
  files         → List the content files a book references

The book directory defaults to the DOKAPI_INPUT environment variable.

EXIT CODES:
  0 - Success
  1 - General error
  2 - Invalid arguments
  3 - Validation failure
"#)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Validate a book descriptor and everything it references
    Validate(validate::ValidateArgs),

    /// List the content files referenced by a book
    Files(files::FilesArgs),
}
