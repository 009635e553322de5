//! Field-level checks.
//!
//! A [`Check`] is the single evaluator attached to a field rule. The type
//! check lives on the rule itself and runs before it. The free functions in
//! this module are the building blocks of the built-in checks and are public
//! so that custom checks can compose them.

use std::fmt;
use std::path::{Path, PathBuf};

use regex::Regex;
use serde_json::Value;

use crate::error::{SchemaError, SchemaResult, ViolationKind};
use crate::kind::ValueKind;
use crate::path::KeyPath;

/// A check implemented outside the engine.
///
/// Receives the location and value of the field plus the mutable context
/// threaded through the walk, which it may update.
pub type CustomCheck<C> = fn(&KeyPath, &Value, &mut C) -> Result<(), CheckFailure>;

/// Why a check rejected a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckFailure {
    pub kind: ViolationKind,
    pub reason: String,
}

impl CheckFailure {
    pub fn new(kind: ViolationKind, reason: impl Into<String>) -> Self {
        Self {
            kind,
            reason: reason.into(),
        }
    }

    pub fn custom(reason: impl Into<String>) -> Self {
        Self::new(ViolationKind::Custom, reason)
    }
}

impl fmt::Display for CheckFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.reason)
    }
}

/// A regular expression that must match a whole string.
#[derive(Debug, Clone)]
pub struct AnchoredPattern {
    source: String,
    regex: Regex,
}

impl AnchoredPattern {
    pub fn new(pattern: &str) -> SchemaResult<Self> {
        let regex = Regex::new(&format!("^(?:{pattern})$")).map_err(|source| {
            SchemaError::InvalidPattern {
                pattern: pattern.to_string(),
                source,
            }
        })?;
        Ok(Self {
            source: pattern.to_string(),
            regex,
        })
    }

    pub fn is_match(&self, value: &str) -> bool {
        self.regex.is_match(value)
    }

    /// The pattern as written, without the anchors.
    pub fn as_str(&self) -> &str {
        &self.source
    }
}

/// The evaluator attached to a field rule.
pub enum Check<C = ()> {
    /// Non-blank string, or non-empty array or object.
    NonEmpty,
    /// String matching the whole pattern.
    Pattern(AnchoredPattern),
    /// Path of an existing file, relative to the given root.
    File(PathBuf),
    /// Path of an existing directory, relative to the given root.
    Dir(PathBuf),
    Custom(CustomCheck<C>),
}

impl<C> Check<C> {
    pub fn pattern(pattern: &str) -> SchemaResult<Self> {
        Ok(Check::Pattern(AnchoredPattern::new(pattern)?))
    }

    pub fn file(root: impl Into<PathBuf>) -> Self {
        Check::File(root.into())
    }

    pub fn dir(root: impl Into<PathBuf>) -> Self {
        Check::Dir(root.into())
    }

    pub fn custom(check: CustomCheck<C>) -> Self {
        Check::Custom(check)
    }

    /// Run the check against a present value.
    pub fn evaluate(&self, path: &KeyPath, value: &Value, ctx: &mut C) -> Result<(), CheckFailure> {
        match self {
            Check::NonEmpty => non_empty(value),
            Check::Pattern(pattern) => matches(pattern, value),
            Check::File(root) => file_exists(root, value).map(|_| ()),
            Check::Dir(root) => dir_exists(root, value).map(|_| ()),
            Check::Custom(check) => check(path, value, ctx),
        }
    }
}

impl<C> fmt::Debug for Check<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Check::NonEmpty => f.write_str("NonEmpty"),
            Check::Pattern(pattern) => f.debug_tuple("Pattern").field(&pattern.as_str()).finish(),
            Check::File(root) => f.debug_tuple("File").field(root).finish(),
            Check::Dir(root) => f.debug_tuple("Dir").field(root).finish(),
            Check::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// The value must have the expected kind.
pub fn kind(expected: ValueKind, value: &Value) -> Result<(), CheckFailure> {
    let actual = ValueKind::of(value);
    if actual == expected {
        Ok(())
    } else {
        Err(CheckFailure::new(
            ViolationKind::WrongType,
            format!("expected type {expected}, got {actual}"),
        ))
    }
}

pub fn non_empty(value: &Value) -> Result<(), CheckFailure> {
    let filled = match value {
        Value::String(s) => !s.trim().is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
        _ => false,
    };
    if filled {
        Ok(())
    } else {
        Err(CheckFailure::new(
            ViolationKind::EmptyValue,
            "expected a non-empty value",
        ))
    }
}

/// The value must be a string matched in full by `pattern`.
pub fn matches(pattern: &AnchoredPattern, value: &Value) -> Result<(), CheckFailure> {
    let text = string(value)?;
    if pattern.is_match(text) {
        Ok(())
    } else {
        Err(CheckFailure::new(
            ViolationKind::PatternMismatch,
            format!("value {text:?} does not match pattern {:?}", pattern.as_str()),
        ))
    }
}

/// Resolve the value under `root` and require an existing file there.
pub fn file_exists(root: &Path, value: &Value) -> Result<PathBuf, CheckFailure> {
    let resolved = root.join(string(value)?);
    if resolved.is_file() {
        return Ok(resolved);
    }
    let reason = if resolved.exists() {
        format!("\"{}\" is not a file", resolved.display())
    } else {
        format!("file \"{}\" does not exist", resolved.display())
    };
    Err(CheckFailure::new(ViolationKind::MissingFile, reason))
}

/// Resolve the value under `root` and require an existing directory there.
pub fn dir_exists(root: &Path, value: &Value) -> Result<PathBuf, CheckFailure> {
    let resolved = root.join(string(value)?);
    if resolved.is_dir() {
        return Ok(resolved);
    }
    let reason = if resolved.exists() {
        format!("\"{}\" is not a directory", resolved.display())
    } else {
        format!("directory \"{}\" does not exist", resolved.display())
    };
    Err(CheckFailure::new(ViolationKind::MissingDirectory, reason))
}

fn string(value: &Value) -> Result<&str, CheckFailure> {
    value.as_str().ok_or_else(|| {
        CheckFailure::new(
            ViolationKind::WrongType,
            format!("expected type string, got {}", ValueKind::of(value)),
        )
    })
}
