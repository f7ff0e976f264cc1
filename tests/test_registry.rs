use grid_filters::filter::methods;
use grid_filters::{
    BooleanFilter, DateTimeFilter, DeclaredType, FilterConstructor, FilterKind, FilterRegistry,
    GridFilter, NumberFilter, ScalarKind, StringContainsFilter, StringEndsWithFilter,
    StringEqualsFilter, StringNotEqualsFilter, StringStartsWithFilter,
};
use rust_decimal::Decimal;
use std::borrow::Cow;

fn name_of(registry: &FilterRegistry, declared: &DeclaredType, method: &str) -> Option<String> {
    registry
        .get(declared, method)
        .map(|constructor| constructor.name().into_owned())
}

#[test]
fn test_numeric_defaults() {
    let registry = FilterRegistry::new();
    let cases = [
        (ScalarKind::I8, "NumberFilter<i8>"),
        (ScalarKind::U8, "NumberFilter<u8>"),
        (ScalarKind::I16, "NumberFilter<i16>"),
        (ScalarKind::U16, "NumberFilter<u16>"),
        (ScalarKind::I32, "NumberFilter<i32>"),
        (ScalarKind::U32, "NumberFilter<u32>"),
        (ScalarKind::I64, "NumberFilter<i64>"),
        (ScalarKind::U64, "NumberFilter<u64>"),
        (ScalarKind::F32, "NumberFilter<f32>"),
        (ScalarKind::F64, "NumberFilter<f64>"),
        (ScalarKind::Decimal, "NumberFilter<decimal>"),
    ];

    for (kind, expected) in cases {
        let declared = DeclaredType::scalar(kind);
        assert_eq!(registry.methods(&declared).len(), 6, "{kind}");
        for method in methods::NUMBER {
            assert_eq!(
                name_of(&registry, &declared, method).as_deref(),
                Some(expected),
                "{kind} {method}"
            );
        }
    }
}

#[test]
fn test_date_boolean_and_string_defaults() {
    let registry = FilterRegistry::new();
    let date_time = DeclaredType::scalar(ScalarKind::DateTime);
    let boolean = DeclaredType::scalar(ScalarKind::Bool);
    let string = DeclaredType::scalar(ScalarKind::String);

    for method in methods::DATE_TIME {
        assert_eq!(
            name_of(&registry, &date_time, method).as_deref(),
            Some("DateTimeFilter")
        );
    }
    assert_eq!(registry.methods(&boolean), vec!["equals", "not-equals"]);

    let strings = [
        (methods::EQUALS, "StringEqualsFilter"),
        (methods::NOT_EQUALS, "StringNotEqualsFilter"),
        (methods::CONTAINS, "StringContainsFilter"),
        (methods::STARTS_WITH, "StringStartsWithFilter"),
        (methods::ENDS_WITH, "StringEndsWithFilter"),
    ];
    for (method, expected) in strings {
        assert_eq!(name_of(&registry, &string, method).as_deref(), Some(expected));
    }
    assert_eq!(registry.methods(&string).len(), 5);
}

#[test]
fn test_lookup_ignores_method_case() {
    let registry = FilterRegistry::new();
    let string = DeclaredType::scalar(ScalarKind::String);

    let filter = registry.dispatcher().get_filter(&string, "CONTAINS").unwrap();

    assert!(filter.is::<StringContainsFilter>());
    assert_eq!(filter.method(), "contains");
}

#[test]
fn test_lookup_treats_nullable_and_required_alike() {
    let registry = FilterRegistry::new();
    let required = DeclaredType::of::<i32>();
    let nullable = DeclaredType::of::<Option<i32>>();

    assert!(nullable.nullable);
    let from_required = registry.dispatcher().get_filter(&required, "equals").unwrap();
    let from_nullable = registry.dispatcher().get_filter(&nullable, "equals").unwrap();

    assert!(from_required.is::<NumberFilter<i32>>());
    assert!(from_nullable.is::<NumberFilter<i32>>());
}

#[test]
fn test_missing_registration_is_none() {
    let registry = FilterRegistry::new();

    assert!(registry.dispatcher().get_filter(&DeclaredType::of::<bool>(), "less-than").is_none());
    assert!(registry.dispatcher().get_filter(&DeclaredType::custom("Money"), "equals").is_none());
    assert!(registry.dispatcher().get_filter(&DeclaredType::of::<i32>(), "").is_none());
}

#[test]
fn test_register_nullable_form_is_found_for_required_form() {
    let mut registry = FilterRegistry::new();
    let nullable = DeclaredType::of::<Option<u16>>();

    registry.register_filter::<NumberFilter<u16>>(&nullable, "Test");

    let filter = registry
        .dispatcher()
        .get_filter(&DeclaredType::of::<u16>(), "test")
        .unwrap();
    assert_eq!(filter.method(), "test");
}

#[test]
fn test_register_required_form_is_found_for_nullable_form() {
    let mut registry = FilterRegistry::new();

    registry.register_filter::<BooleanFilter>(&DeclaredType::of::<bool>(), "test");

    assert!(registry.contains(&DeclaredType::of::<Option<bool>>(), "TEST"));
}

#[test]
fn test_register_overrides_existing_filter() {
    let mut registry = FilterRegistry::new();
    let string = DeclaredType::of::<String>();

    let replaced = registry
        .register_filter::<StringStartsWithFilter>(&string, "contains")
        .unwrap();
    assert_eq!(replaced.name(), "StringContainsFilter");

    let filter = registry.dispatcher().get_filter(&string, "contains").unwrap();
    assert!(filter.is::<StringStartsWithFilter>());
    assert!(filter.downcast_ref::<StringContainsFilter>().is_none());
}

#[test]
fn test_register_custom_type() {
    #[derive(Debug)]
    struct MoneyFilter {
        method: String,
    }

    impl GridFilter for MoneyFilter {
        fn method(&self) -> &str {
            &self.method
        }

        fn condition(
            &self,
            values: &[Option<&str>],
        ) -> Option<grid_filters::Condition> {
            NumberFilter::<Decimal>::with_method(&self.method).condition(values)
        }
    }

    impl FilterKind for MoneyFilter {
        fn with_method(method: &str) -> Self {
            Self {
                method: method.to_string(),
            }
        }

        fn kind_name() -> Cow<'static, str> {
            Cow::Borrowed("MoneyFilter")
        }
    }

    let mut registry = FilterRegistry::new();
    let money = DeclaredType::custom("Money");
    registry.register(&money, "equals", FilterConstructor::of::<MoneyFilter>());

    let filter = registry
        .dispatcher()
        .get_filter(&money.clone().into_nullable(), "Equals")
        .unwrap();
    let money_filter = filter.downcast_ref::<MoneyFilter>().unwrap();
    assert_eq!(money_filter.method, "equals");
    assert!(filter.condition(&[Some("12.5")]).is_some());
}

#[test]
fn test_unregister_is_idempotent() {
    let mut registry = FilterRegistry::new();
    let date_time = DeclaredType::of::<chrono::NaiveDateTime>();
    let before = registry.len();

    let removed = registry.unregister(&date_time.clone().into_nullable(), "LATER-THAN");
    assert_eq!(removed.map(|c| c.name().into_owned()).as_deref(), Some("DateTimeFilter"));
    assert!(registry.unregister(&date_time, "later-than").is_none());
    assert!(registry.unregister(&DeclaredType::custom("Nothing"), "equals").is_none());

    assert_eq!(registry.len(), before - 1);
    assert!(registry.dispatcher().get_filter(&date_time, "later-than").is_none());
    assert!(registry.dispatcher().get_filter(&date_time, "earlier-than").is_some());
}

#[test]
fn test_entries_are_listed_in_order() {
    let mut registry = FilterRegistry::empty();
    let string = DeclaredType::of::<String>();
    registry.register_filter::<StringNotEqualsFilter>(&string, "not-equals");
    registry.register_filter::<StringEqualsFilter>(&string, "equals");
    registry.register_filter::<StringEndsWithFilter>(&DeclaredType::of::<i32>(), "ends-with");
    registry.register_filter::<DateTimeFilter>(&DeclaredType::custom("Zulu"), "equals");

    let listed: Vec<(String, String, String)> = registry
        .entries()
        .into_iter()
        .map(|e| (e.type_key, e.method, e.filter))
        .collect();

    assert_eq!(
        listed,
        vec![
            ("i32".into(), "ends-with".into(), "StringEndsWithFilter".into()),
            ("string".into(), "equals".into(), "StringEqualsFilter".into()),
            ("string".into(), "not-equals".into(), "StringNotEqualsFilter".into()),
            ("Zulu".into(), "equals".into(), "DateTimeFilter".into()),
        ]
    );
}
