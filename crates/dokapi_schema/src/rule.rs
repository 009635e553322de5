//! Rule trees.
//!
//! Presence and nesting are enums rather than independent flags, so a rule
//! can be required or conditionally required but never both, and can nest an
//! object schema or an array item schema but never both.

use crate::check::Check;
use crate::kind::ValueKind;

/// When a field must be present.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Presence {
    Required,
    #[default]
    Optional,
    /// Required only while the named sibling field is absent.
    RequiredUnless(String),
}

/// How a field's value nests further rules.
#[derive(Debug)]
pub enum Shape<C = ()> {
    Leaf,
    /// The value is an object validated against the schema.
    Object(Schema<C>),
    /// The value is an array whose every item is an object validated
    /// against the schema.
    Array(Schema<C>),
}

/// Rules for a single named field.
#[derive(Debug)]
pub struct FieldRule<C = ()> {
    presence: Presence,
    kind: Option<ValueKind>,
    check: Option<Check<C>>,
    shape: Shape<C>,
}

impl<C> FieldRule<C> {
    pub fn new(presence: Presence) -> Self {
        Self {
            presence,
            kind: None,
            check: None,
            shape: Shape::Leaf,
        }
    }

    pub fn required() -> Self {
        Self::new(Presence::Required)
    }

    pub fn optional() -> Self {
        Self::new(Presence::Optional)
    }

    pub fn required_unless(sibling: impl Into<String>) -> Self {
        Self::new(Presence::RequiredUnless(sibling.into()))
    }

    pub fn of_type(mut self, kind: ValueKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn check(mut self, check: Check<C>) -> Self {
        self.check = Some(check);
        self
    }

    /// Nest an object schema. Replaces any previous nesting.
    pub fn properties(mut self, schema: Schema<C>) -> Self {
        self.shape = Shape::Object(schema);
        self
    }

    /// Nest an array item schema. Replaces any previous nesting.
    pub fn array_of(mut self, item: Schema<C>) -> Self {
        self.shape = Shape::Array(item);
        self
    }

    pub fn presence(&self) -> &Presence {
        &self.presence
    }

    pub fn kind(&self) -> Option<ValueKind> {
        self.kind
    }

    pub fn get_check(&self) -> Option<&Check<C>> {
        self.check.as_ref()
    }

    pub fn shape(&self) -> &Shape<C> {
        &self.shape
    }
}

/// Named field rules, evaluated in declaration order.
#[derive(Debug)]
pub struct Schema<C = ()> {
    fields: Vec<(String, FieldRule<C>)>,
}

impl<C> Default for Schema<C> {
    fn default() -> Self {
        Self { fields: Vec::new() }
    }
}

impl<C> Schema<C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a field. Declaring the same name again replaces its rule in
    /// place.
    pub fn field(mut self, name: impl Into<String>, rule: FieldRule<C>) -> Self {
        let name = name.into();
        match self.fields.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = rule,
            None => self.fields.push((name, rule)),
        }
        self
    }

    pub fn get(&self, name: &str) -> Option<&FieldRule<C>> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, rule)| rule)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldRule<C>)> {
        self.fields.iter().map(|(name, rule)| (name.as_str(), rule))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// `RequiredUnless` siblings that are not declared in this schema or any
    /// nested one. Such a rule behaves as plain `Required`.
    pub fn dangling_conditions(&self) -> Vec<String> {
        let mut dangling = Vec::new();
        self.collect_dangling("", &mut dangling);
        dangling
    }

    fn collect_dangling(&self, prefix: &str, dangling: &mut Vec<String>) {
        for (name, rule) in self.fields() {
            let qualified = if prefix.is_empty() {
                name.to_string()
            } else {
                format!("{prefix}.{name}")
            };
            if let Presence::RequiredUnless(sibling) = rule.presence() {
                if !self.contains(sibling) {
                    dangling.push(format!("{qualified} -> {sibling}"));
                }
            }
            match rule.shape() {
                Shape::Leaf => {}
                Shape::Object(nested) => nested.collect_dangling(&qualified, dangling),
                Shape::Array(item) => item.collect_dangling(&format!("{qualified}[]"), dangling),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_keeps_declaration_order() {
        let schema: Schema = Schema::new()
            .field("b", FieldRule::required())
            .field("a", FieldRule::optional())
            .field("c", FieldRule::required_unless("a"));

        let names: Vec<_> = schema.fields().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["b", "a", "c"]);
        assert_eq!(
            schema.get("c").unwrap().presence(),
            &Presence::RequiredUnless("a".to_string())
        );
    }

    #[test]
    fn test_redeclared_field_replaces_rule() {
        let schema: Schema = Schema::new()
            .field("a", FieldRule::required())
            .field("a", FieldRule::optional().of_type(ValueKind::String));

        assert_eq!(schema.len(), 1);
        let rule = schema.get("a").unwrap();
        assert_eq!(rule.presence(), &Presence::Optional);
        assert_eq!(rule.kind(), Some(ValueKind::String));
    }

    #[test]
    fn test_single_nesting_mode() {
        let rule: FieldRule = FieldRule::required()
            .properties(Schema::new().field("x", FieldRule::required()))
            .array_of(Schema::new().field("y", FieldRule::required()));

        match rule.shape() {
            Shape::Array(item) => assert!(item.contains("y")),
            other => panic!("unexpected shape {other:?}"),
        }
    }

    #[test]
    fn test_dangling_conditions() {
        let item = Schema::new()
            .field("content", FieldRule::required_unless("children"))
            .field("children", FieldRule::optional());
        let broken = Schema::new().field("content", FieldRule::required_unless("sections"));

        let schema: Schema = Schema::new()
            .field("index", FieldRule::required().array_of(item))
            .field("main", FieldRule::required().properties(broken));

        assert_eq!(schema.dangling_conditions(), vec!["main.content -> sections".to_string()]);
    }
}
