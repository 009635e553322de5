//! The recursive schema walker.
//!
//! For each object the walker first rejects keys the schema does not
//! declare, then visits the declared fields in order. A present field runs
//! its type check, then its check, then descends into nested objects or
//! array items. The first failure on a field ends that field.

use serde_json::Value;
use tracing::{debug, trace};

use crate::check::{self, CheckFailure};
use crate::error::{ValidationError, Violation, ViolationKind};
use crate::kind::ValueKind;
use crate::path::KeyPath;
use crate::rule::{FieldRule, Presence, Schema, Shape};

/// How many violations a walk reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValidationMode {
    /// Stop at the first violation.
    #[default]
    FailFast,
    /// Keep walking and report every violation.
    CollectAll,
}

/// A schema paired with a reporting mode.
#[derive(Debug)]
pub struct Validator<'s, C = ()> {
    schema: &'s Schema<C>,
    mode: ValidationMode,
}

impl<'s, C> Validator<'s, C> {
    pub fn new(schema: &'s Schema<C>) -> Self {
        Self {
            schema,
            mode: ValidationMode::FailFast,
        }
    }

    pub fn with_mode(mut self, mode: ValidationMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn collect_all(self) -> Self {
        self.with_mode(ValidationMode::CollectAll)
    }

    pub fn mode(&self) -> ValidationMode {
        self.mode
    }

    /// Validate `data`, an object, against the schema.
    ///
    /// `label` names the document and prefixes every key path. `ctx` is
    /// handed to every custom check, which may record what it sees there.
    pub fn validate(&self, label: &str, data: &Value, ctx: &mut C) -> Result<(), ValidationError> {
        debug!("Validating {} ({:?})", label, self.mode);
        let mut walk = Walk {
            mode: self.mode,
            violations: Vec::new(),
            ctx,
        };
        // Halt only signals that fail-fast mode stopped early; the violation
        // is already recorded.
        let _ = walk.object(&KeyPath::root(label), data, self.schema);

        match ValidationError::from_violations(walk.violations) {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

/// Validate `data` against `schema`, stopping at the first violation.
pub fn validate<C>(label: &str, data: &Value, schema: &Schema<C>, ctx: &mut C) -> Result<(), ValidationError> {
    Validator::new(schema).validate(label, data, ctx)
}

struct Halt;

struct Walk<'c, C> {
    mode: ValidationMode,
    violations: Vec<Violation>,
    ctx: &'c mut C,
}

impl<C> Walk<'_, C> {
    fn report(&mut self, path: KeyPath, kind: ViolationKind, reason: impl Into<String>) -> Result<(), Halt> {
        let violation = Violation::new(path, kind, reason);
        debug!("Violation at {}", violation);
        self.violations.push(violation);
        match self.mode {
            ValidationMode::FailFast => Err(Halt),
            ValidationMode::CollectAll => Ok(()),
        }
    }

    fn fail(&mut self, path: &KeyPath, failure: CheckFailure) -> Result<(), Halt> {
        self.report(path.clone(), failure.kind, failure.reason)
    }

    fn object(&mut self, path: &KeyPath, data: &Value, schema: &Schema<C>) -> Result<(), Halt> {
        let map = match data.as_object() {
            Some(map) => map,
            None => {
                return self.report(
                    path.clone(),
                    ViolationKind::WrongType,
                    format!("expected type object, got {}", ValueKind::of(data)),
                )
            }
        };
        trace!("Walking {} ({} keys, {} rules)", path, map.len(), schema.len());

        for key in map.keys() {
            if !schema.contains(key) {
                self.report(path.field(key), ViolationKind::UnexpectedField, "unexpected field")?;
            }
        }

        for (name, rule) in schema.fields() {
            let field_path = path.field(name);
            match map.get(name) {
                Some(value) => self.field(&field_path, value, rule)?,
                None => match rule.presence() {
                    Presence::Required => {
                        self.report(field_path, ViolationKind::MissingField, "missing required field")?
                    }
                    Presence::RequiredUnless(sibling) if !map.contains_key(sibling) => self.report(
                        field_path,
                        ViolationKind::MissingConditional,
                        format!("missing field, required unless \"{sibling}\" is present"),
                    )?,
                    _ => {}
                },
            }
        }

        Ok(())
    }

    fn field(&mut self, path: &KeyPath, value: &Value, rule: &FieldRule<C>) -> Result<(), Halt> {
        if let Some(expected) = rule.kind() {
            if let Err(failure) = check::kind(expected, value) {
                return self.fail(path, failure);
            }
        }

        if let Some(field_check) = rule.get_check() {
            if let Err(failure) = field_check.evaluate(path, value, self.ctx) {
                return self.fail(path, failure);
            }
        }

        match rule.shape() {
            Shape::Leaf => Ok(()),
            Shape::Object(nested) => self.object(path, value, nested),
            Shape::Array(item) => {
                let items = match value.as_array() {
                    Some(items) => items,
                    None => {
                        return self.report(
                            path.clone(),
                            ViolationKind::WrongType,
                            format!("expected type array, got {}", ValueKind::of(value)),
                        )
                    }
                };
                for (index, element) in items.iter().enumerate() {
                    self.object(&path.index(index), element, item)?;
                }
                Ok(())
            }
        }
    }
}
