//! Error types for schema validation.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::path::KeyPath;

/// Result type alias for schema construction.
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Errors raised while building a rule tree.
#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("Invalid pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// What went wrong with a single value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    UnexpectedField,
    MissingField,
    MissingConditional,
    WrongType,
    EmptyValue,
    PatternMismatch,
    MissingFile,
    MissingDirectory,
    Custom,
}

/// A single violation, located by its key path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub path: KeyPath,
    pub kind: ViolationKind,
    pub reason: String,
}

impl Violation {
    pub fn new(path: KeyPath, kind: ViolationKind, reason: impl Into<String>) -> Self {
        Self {
            path,
            kind,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.reason)
    }
}

/// A failed validation. Always holds at least one violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    violations: Vec<Violation>,
}

impl ValidationError {
    /// Returns `None` when there is nothing to report.
    pub fn from_violations(violations: Vec<Violation>) -> Option<Self> {
        if violations.is_empty() {
            None
        } else {
            Some(Self { violations })
        }
    }

    /// The first violation encountered during the walk.
    pub fn first(&self) -> &Violation {
        &self.violations[0]
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    pub fn len(&self) -> usize {
        self.violations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn into_violations(self) -> Vec<Violation> {
        self.violations
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let [only] = self.violations.as_slice() {
            return write!(f, "{only}");
        }
        write!(f, "{} violations:", self.violations.len())?;
        for violation in &self.violations {
            write!(f, "\n  - {violation}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_violation_display() {
        let path = KeyPath::root("book").field("name");
        let err = ValidationError::from_violations(vec![Violation::new(
            path,
            ViolationKind::MissingField,
            "missing required field",
        )])
        .unwrap();
        assert_eq!(err.to_string(), "book.name: missing required field");
    }

    #[test]
    fn test_multiple_violations_display() {
        let root = KeyPath::root("book");
        let err = ValidationError::from_violations(vec![
            Violation::new(root.field("name"), ViolationKind::MissingField, "missing required field"),
            Violation::new(root.field("bogus"), ViolationKind::UnexpectedField, "unexpected field"),
        ])
        .unwrap();

        let text = err.to_string();
        assert!(text.starts_with("2 violations:"));
        assert!(text.contains("\n  - book.bogus: unexpected field"));
        assert_eq!(err.first().kind, ViolationKind::MissingField);
    }

    #[test]
    fn test_empty_is_not_an_error() {
        assert!(ValidationError::from_violations(Vec::new()).is_none());
    }
}
