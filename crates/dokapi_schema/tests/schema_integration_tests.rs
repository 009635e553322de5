//! Integration tests for the schema walker.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{json, Value};
use tempfile::tempdir;

use dokapi_schema::{
    check, validate, Check, CheckFailure, FieldRule, KeyPath, Schema, ValidationMode, Validator,
    ValueKind, ViolationKind,
};

/// Context collecting every `page` value with its location.
#[derive(Debug, Default)]
struct Pages {
    root: PathBuf,
    found: Vec<(String, PathBuf)>,
}

fn record_page(path: &KeyPath, value: &Value, pages: &mut Pages) -> Result<(), CheckFailure> {
    let resolved = check::file_exists(&pages.root, value)?;
    pages.found.push((path.to_string(), resolved));
    Ok(())
}

fn site_schema(root: &Path) -> Schema<Pages> {
    let leaf = Schema::new()
        .field("title", FieldRule::required().of_type(ValueKind::String))
        .field("page", FieldRule::required().check(Check::custom(record_page)));

    let section = Schema::new()
        .field("title", FieldRule::required().of_type(ValueKind::String))
        .field("page", FieldRule::required_unless("items").check(Check::custom(record_page)))
        .field("items", FieldRule::optional().array_of(leaf));

    Schema::new()
        .field("theme", FieldRule::required().check(Check::dir(root)))
        .field("layout", FieldRule::required().check(Check::file(root)))
        .field("slug", FieldRule::optional().check(Check::pattern("[a-z-]+").unwrap()))
        .field("extra", FieldRule::required().of_type(ValueKind::Object))
        .field("sections", FieldRule::required().array_of(section))
}

fn fixture() -> tempfile::TempDir {
    let temp = tempdir().unwrap();
    fs::create_dir(temp.path().join("theme")).unwrap();
    fs::write(temp.path().join("layout.html"), "<main></main>").unwrap();
    for page in ["a.md", "b.md", "c.md"] {
        fs::write(temp.path().join(page), "# page").unwrap();
    }
    temp
}

#[test]
fn test_custom_check_collects_in_descent_order() {
    let temp = fixture();
    let schema = site_schema(temp.path());
    let data = json!({
        "theme": "theme",
        "layout": "layout.html",
        "slug": "my-site",
        "extra": { "anything": [1, 2, 3] },
        "sections": [
            { "title": "one", "page": "a.md" },
            { "title": "two", "items": [
                { "title": "x", "page": "b.md" },
                { "title": "y", "page": "c.md" }
            ]}
        ]
    });

    let mut pages = Pages {
        root: temp.path().to_path_buf(),
        ..Default::default()
    };
    validate("site", &data, &schema, &mut pages).unwrap();

    let locations: Vec<&str> = pages.found.iter().map(|(path, _)| path.as_str()).collect();
    assert_eq!(
        locations,
        vec![
            "site.sections[0].page",
            "site.sections[1].items[0].page",
            "site.sections[1].items[1].page",
        ]
    );
    assert_eq!(pages.found[2].1, temp.path().join("c.md"));
}

#[test]
fn test_missing_directory_cites_resolved_path() {
    let temp = fixture();
    let schema = site_schema(temp.path());
    let data = json!({
        "theme": "nowhere",
        "layout": "layout.html",
        "extra": {},
        "sections": []
    });

    let mut pages = Pages::default();
    let err = validate("site", &data, &schema, &mut pages).unwrap_err();
    let violation = err.first();
    assert_eq!(violation.kind, ViolationKind::MissingDirectory);
    assert_eq!(violation.path.to_string(), "site.theme");
    assert!(violation
        .reason
        .contains(&temp.path().join("nowhere").display().to_string()));
}

#[test]
fn test_pattern_violation() {
    let temp = fixture();
    let schema = site_schema(temp.path());
    let data = json!({
        "theme": "theme",
        "layout": "layout.html",
        "slug": "My Site",
        "extra": {},
        "sections": []
    });

    let err = validate("site", &data, &schema, &mut Pages::default()).unwrap_err();
    assert_eq!(err.first().kind, ViolationKind::PatternMismatch);
    assert!(err.to_string().contains("\"My Site\""));
}

#[test]
fn test_fail_fast_does_not_run_later_checks() {
    let temp = fixture();
    let schema = site_schema(temp.path());
    let data = json!({
        "theme": "theme",
        "layout": "missing.html",
        "extra": {},
        "sections": [{ "title": "one", "page": "a.md" }]
    });

    let mut pages = Pages {
        root: temp.path().to_path_buf(),
        ..Default::default()
    };
    let err = validate("site", &data, &schema, &mut pages).unwrap_err();
    assert_eq!(err.len(), 1);
    assert!(pages.found.is_empty());
}

#[test]
fn test_collect_all_mode() {
    let temp = fixture();
    let schema = site_schema(temp.path());
    let data = json!({
        "theme": "theme",
        "layout": "missing.html",
        "extra": [],
        "sections": [
            { "title": "one" },
            { "title": "two", "page": "a.md", "items": [{ "title": "x", "page": "zzz.md" }] }
        ]
    });

    let mut pages = Pages {
        root: temp.path().to_path_buf(),
        ..Default::default()
    };
    let validator = Validator::new(&schema).with_mode(ValidationMode::CollectAll);
    let err = validator.validate("site", &data, &mut pages).unwrap_err();

    let kinds: Vec<ViolationKind> = err.violations().iter().map(|v| v.kind).collect();
    assert_eq!(
        kinds,
        vec![
            ViolationKind::MissingFile,
            ViolationKind::WrongType,
            ViolationKind::MissingConditional,
            ViolationKind::MissingFile,
        ]
    );
    assert_eq!(err.violations()[3].path.to_string(), "site.sections[1].items[0].page");
    // The valid page in between was still recorded.
    assert_eq!(pages.found.len(), 1);
    assert!(err.to_string().starts_with("4 violations:"));
}
