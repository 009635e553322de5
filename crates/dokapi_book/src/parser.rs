//! Book loading: read, parse, validate, build the model.

use std::fs;
use std::path::Path;

use dokapi_schema::{ValidationMode, Validator};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::book::{Book, CONFIG_FILE};
use crate::descriptor::BookDescriptor;
use crate::error::{BookError, BookResult};
use crate::schema::{descriptor_schema, ContentRefs};

/// Label prefixing every key path in descriptor errors.
pub const DESCRIPTOR_LABEL: &str = "book";

/// Loads books from their input directory.
#[derive(Debug, Clone, Copy, Default)]
pub struct BookParser {
    mode: ValidationMode,
}

impl BookParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report every descriptor violation instead of stopping at the first.
    pub fn with_mode(mut self, mode: ValidationMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn mode(&self) -> ValidationMode {
        self.mode
    }

    /// Check that `dokapi.json` in `input_dir` is well formed and that
    /// everything it references exists, then build the book.
    pub fn parse(&self, input_dir: impl AsRef<Path>) -> BookResult<Book> {
        let input_dir = input_dir.as_ref();
        if !input_dir.is_dir() {
            return Err(BookError::InputDirNotFound(input_dir.to_path_buf()));
        }
        let root = input_dir.canonicalize().map_err(|source| BookError::InputDir {
            path: input_dir.to_path_buf(),
            source,
        })?;

        let config_path = root.join(CONFIG_FILE);
        debug!("Reading book descriptor from {:?}", config_path);
        let content = fs::read_to_string(&config_path).map_err(|source| BookError::Read {
            path: config_path.clone(),
            source,
        })?;

        let raw: Value = serde_json::from_str(&content).map_err(|source| BookError::Parse {
            path: config_path.clone(),
            source,
        })?;

        let schema = descriptor_schema(&root);
        let mut refs = ContentRefs::new(&root)?;
        Validator::new(&schema)
            .with_mode(self.mode)
            .validate(DESCRIPTOR_LABEL, &raw, &mut refs)
            .map_err(|source| BookError::Invalid {
                path: config_path.clone(),
                source,
            })?;

        let descriptor = BookDescriptor::deserialize(&raw).map_err(|source| BookError::Model {
            path: config_path.clone(),
            source,
        })?;
        let referenced_files = refs.into_files();

        info!(
            "Loaded book \"{}\" ({} entries, {} content files)",
            descriptor.name,
            descriptor.index.len(),
            referenced_files.len()
        );
        Ok(Book::new(root, descriptor, raw, referenced_files))
    }
}

/// Parse the book in `input_dir`, stopping at the first violation.
pub fn parse(input_dir: impl AsRef<Path>) -> BookResult<Book> {
    BookParser::new().parse(input_dir)
}
