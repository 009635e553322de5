//! # dokapi_book
//!
//! Loading and validation of Dokapi book descriptors.
//!
//! A book lives in an input directory holding:
//! - `dokapi.json` - the descriptor
//! - `content/` - Markdown pages referenced by `content` fields
//! - the site and page templates and the assets directory it names
//!
//! [`parse`] reads the descriptor, validates it against the descriptor rule
//! tree (see [`schema`]) and returns a [`Book`] carrying the typed
//! descriptor and the absolute path of every referenced content file.
//!
//! ## Example
//!
//! ```rust,no_run
//! use dokapi_book::{BookParser, ValidationMode};
//!
//! let book = BookParser::new()
//!     .with_mode(ValidationMode::CollectAll)
//!     .parse("./docs")
//!     .unwrap();
//!
//! for file in book.referenced_files() {
//!     println!("{}", file.display());
//! }
//! ```

pub mod book;
pub mod descriptor;
pub mod error;
pub mod parser;
pub mod schema;

pub use book::{Book, EntryRef, CONFIG_FILE, CONTENT_DIR};
pub use descriptor::{BookDescriptor, ChildEntry, IndexEntry, MainEntry};
pub use dokapi_schema::ValidationMode;
pub use error::{BookError, BookResult};
pub use parser::{parse, BookParser, DESCRIPTOR_LABEL};
pub use schema::{descriptor_schema, ContentRefs, CONTENT_PATTERN};
