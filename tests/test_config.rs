use grid_filters::config::{ConfigError, load_config, load_config_from_path, parse_config};
use grid_filters::{
    BuiltinFilter, DeclaredType, Field, FilterDescriptor, NumberFilter, ScalarKind,
    StringStartsWithFilter,
};
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn write_file(path: &Path, content: &str) {
    fs::write(path, content).expect("failed to write test file");
}

#[test]
fn test_load_config_applies_on_top_of_defaults() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("filters.toml");
    write_file(
        &path,
        r#"
[[register]]
type = "i32?"
method = "at-least"
filter = "number"

[[register]]
type = "Money"
method = "equals"
filter = "number"
kind = "decimal"

[[register]]
type = "string"
method = "prefix"
filter = "string-starts-with"

[[unregister]]
type = "string"
method = "ends-with"
"#,
    );

    let config = load_config(Some(path.as_path())).expect("config should load");
    assert_eq!(config.register.len(), 3);
    assert_eq!(config.register[1].kind, Some(ScalarKind::Decimal));
    assert_eq!(config.register[2].filter, BuiltinFilter::StringStartsWith);

    let registry = config.build_registry().expect("config should apply");
    let dispatcher = registry.dispatcher();
    let string = DeclaredType::of::<String>();

    let at_least = dispatcher
        .get_filter(&DeclaredType::of::<i32>(), "AT-LEAST")
        .expect("registered through the nullable form");
    assert!(at_least.is::<NumberFilter<i32>>());

    let money = dispatcher
        .get_filter(&DeclaredType::named("Money"), "equals")
        .expect("custom type registered");
    assert!(money.is::<NumberFilter<rust_decimal::Decimal>>());

    let prefix = dispatcher.get_filter(&string, "prefix").expect("alias");
    assert!(prefix.is::<StringStartsWithFilter>());
    assert!(dispatcher.get_filter(&string, "ends-with").is_none());
}

#[test]
fn test_aliased_string_filter_keeps_its_operation() {
    let config = parse_config(
        r#"
[[register]]
type = "string"
method = "begins"
filter = "string-starts-with"
"#,
    )
    .unwrap();
    let registry = config.build_registry().unwrap();
    let field: Field<String> = Field::new(|s: &String| s);

    let predicate = registry
        .dispatcher()
        .filter_for(&field, &FilterDescriptor::new("begins", ["gr"]))
        .unwrap();

    let names = vec!["grid".to_string(), "filter".to_string()];
    let kept: Vec<&String> = predicate.filter(&names).collect();
    assert_eq!(kept, vec!["grid"]);
}

#[test]
fn test_missing_file_is_read_error() {
    let dir = tempdir().expect("temp dir");
    let err = load_config_from_path(&dir.path().join("missing.toml")).unwrap_err();

    assert!(matches!(err, ConfigError::Read { .. }));
    assert!(err.to_string().contains("missing.toml"));
}

#[test]
fn test_malformed_toml_is_parse_error() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("bad.toml");
    write_file(&path, "[[register]]\ntype = \"i32\"\nfilter = \"number\"\n");

    let err = load_config_from_path(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
}

#[test]
fn test_unknown_filter_name_is_parse_error() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("unknown.toml");
    write_file(
        &path,
        "[[register]]\ntype = \"i32\"\nmethod = \"equals\"\nfilter = \"fuzzy\"\n",
    );

    assert!(matches!(
        load_config_from_path(&path),
        Err(ConfigError::Parse { .. })
    ));
}

#[test]
fn test_incompatible_filter_is_rejected() {
    let config = parse_config(
        r#"
[[register]]
type = "bool"
method = "greater-than"
filter = "number"
"#,
    )
    .unwrap();

    let err = config.build_registry().unwrap_err();
    match err {
        ConfigError::IncompatibleFilter { filter, declared } => {
            assert_eq!(filter, BuiltinFilter::Number);
            assert_eq!(declared, "bool");
        }
        other => panic!("expected incompatible filter, got {other:?}"),
    }
}

#[test]
fn test_no_path_uses_empty_default() {
    let config = load_config(None).unwrap();
    assert!(config.is_empty());
    assert_eq!(
        config.build_registry().unwrap().len(),
        grid_filters::FilterRegistry::new().len()
    );
}
