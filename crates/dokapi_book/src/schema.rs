//! The rule tree for `dokapi.json`.

use std::path::{Path, PathBuf};

use dokapi_schema::{
    check, AnchoredPattern, Check, CheckFailure, FieldRule, KeyPath, Schema, SchemaResult,
    ValueKind, ViolationKind,
};
use serde_json::Value;
use tracing::trace;

use crate::book::CONTENT_DIR;

/// Content file names: lowercase alphanumeric or hyphen path segments ending
/// in `.md`.
pub const CONTENT_PATTERN: &str = r"[a-z0-9-]+(/[a-z0-9-]+)*\.md";

/// Context threaded through descriptor validation.
///
/// Collects the absolute path of every `content` field in the order the
/// walker meets them.
#[derive(Debug)]
pub struct ContentRefs {
    content_dir: PathBuf,
    pattern: AnchoredPattern,
    files: Vec<PathBuf>,
}

impl ContentRefs {
    pub fn new(root: &Path) -> SchemaResult<Self> {
        Ok(Self {
            content_dir: root.join(CONTENT_DIR),
            pattern: AnchoredPattern::new(CONTENT_PATTERN)?,
            files: Vec::new(),
        })
    }

    pub fn content_dir(&self) -> &Path {
        &self.content_dir
    }

    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    pub fn into_files(self) -> Vec<PathBuf> {
        self.files
    }

    fn resolve(&self, name: &str) -> PathBuf {
        name.split('/')
            .fold(self.content_dir.clone(), |path, segment| path.join(segment))
    }
}

/// Check a `content` field and record the file it points to.
fn check_content(path: &KeyPath, value: &Value, refs: &mut ContentRefs) -> Result<(), CheckFailure> {
    check::matches(&refs.pattern, value)?;
    let name = value.as_str().unwrap_or_default();
    let resolved = refs.resolve(name);
    if !resolved.is_file() {
        return Err(CheckFailure::new(
            ViolationKind::MissingFile,
            format!("content file \"{}\" does not exist", resolved.display()),
        ));
    }
    trace!("{} -> {}", path, resolved.display());
    refs.files.push(resolved);
    Ok(())
}

fn content(rule: FieldRule<ContentRefs>) -> FieldRule<ContentRefs> {
    rule.check(Check::custom(check_content))
}

fn text() -> FieldRule<ContentRefs> {
    FieldRule::optional()
        .of_type(ValueKind::String)
        .check(Check::NonEmpty)
}

fn flag() -> FieldRule<ContentRefs> {
    FieldRule::optional().of_type(ValueKind::Boolean)
}

fn child_entry() -> Schema<ContentRefs> {
    Schema::new()
        .field("name", FieldRule::required().of_type(ValueKind::String))
        .field("key", FieldRule::optional().of_type(ValueKind::String))
        .field("content", content(FieldRule::required()))
}

fn index_entry() -> Schema<ContentRefs> {
    Schema::new()
        .field("name", FieldRule::required().of_type(ValueKind::String))
        .field("key", FieldRule::optional().of_type(ValueKind::String))
        .field("hidden", flag())
        .field("content", content(FieldRule::required_unless("children")))
        .field("children", FieldRule::optional().array_of(child_entry()))
}

/// Build the descriptor rule tree for a book rooted at `root`.
pub fn descriptor_schema(root: &Path) -> Schema<ContentRefs> {
    let main = Schema::new()
        .field("content", content(FieldRule::required()))
        .field("name", text());

    Schema::new()
        .field("name", FieldRule::required().of_type(ValueKind::String))
        .field("project", text())
        .field("skipProjectVariables", flag())
        .field("main", FieldRule::required().properties(main))
        .field("variables", FieldRule::required().of_type(ValueKind::Object))
        .field("siteTemplate", FieldRule::required().check(Check::file(root)))
        .field("pageTemplate", FieldRule::required().check(Check::file(root)))
        .field("numbering", flag())
        .field("previousLink", text())
        .field("nextLink", text())
        .field("externalLinksToBlank", flag())
        .field("assets", FieldRule::required().check(Check::dir(root)))
        .field("index", FieldRule::required().array_of(index_entry()))
}
