use super::{FilterConstructor, FilterRegistry};
use crate::filter::{
    BooleanFilter, DateTimeFilter, NumberFilter, StringContainsFilter, StringEndsWithFilter,
    StringEqualsFilter, StringNotEqualsFilter, StringStartsWithFilter, methods,
};
use crate::kind::{DeclaredType, ScalarKind};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Built-in filter types, addressable by name from configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BuiltinFilter {
    Number,
    #[serde(rename = "datetime")]
    DateTime,
    Boolean,
    StringEquals,
    StringNotEquals,
    StringContains,
    StringStartsWith,
    StringEndsWith,
}

impl BuiltinFilter {
    /// Constructor for fields holding `kind` values.
    ///
    /// Returns `None` when the filter cannot compare that kind.
    pub fn constructor(self, kind: ScalarKind) -> Option<FilterConstructor> {
        let constructor = match self {
            BuiltinFilter::Number => return number_constructor(kind),
            BuiltinFilter::DateTime if kind == ScalarKind::DateTime => {
                FilterConstructor::of::<DateTimeFilter>()
            }
            BuiltinFilter::Boolean if kind == ScalarKind::Bool => {
                FilterConstructor::of::<BooleanFilter>()
            }
            BuiltinFilter::StringEquals if kind == ScalarKind::String => {
                FilterConstructor::of::<StringEqualsFilter>()
            }
            BuiltinFilter::StringNotEquals if kind == ScalarKind::String => {
                FilterConstructor::of::<StringNotEqualsFilter>()
            }
            BuiltinFilter::StringContains if kind == ScalarKind::String => {
                FilterConstructor::of::<StringContainsFilter>()
            }
            BuiltinFilter::StringStartsWith if kind == ScalarKind::String => {
                FilterConstructor::of::<StringStartsWithFilter>()
            }
            BuiltinFilter::StringEndsWith if kind == ScalarKind::String => {
                FilterConstructor::of::<StringEndsWithFilter>()
            }
            _ => return None,
        };
        Some(constructor)
    }
}

impl fmt::Display for BuiltinFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BuiltinFilter::Number => "number",
            BuiltinFilter::DateTime => "datetime",
            BuiltinFilter::Boolean => "boolean",
            BuiltinFilter::StringEquals => "string-equals",
            BuiltinFilter::StringNotEquals => "string-not-equals",
            BuiltinFilter::StringContains => "string-contains",
            BuiltinFilter::StringStartsWith => "string-starts-with",
            BuiltinFilter::StringEndsWith => "string-ends-with",
        };
        f.write_str(name)
    }
}

/// The number filter instantiated for a numeric kind
fn number_constructor(kind: ScalarKind) -> Option<FilterConstructor> {
    let constructor = match kind {
        ScalarKind::I8 => FilterConstructor::of::<NumberFilter<i8>>(),
        ScalarKind::U8 => FilterConstructor::of::<NumberFilter<u8>>(),
        ScalarKind::I16 => FilterConstructor::of::<NumberFilter<i16>>(),
        ScalarKind::U16 => FilterConstructor::of::<NumberFilter<u16>>(),
        ScalarKind::I32 => FilterConstructor::of::<NumberFilter<i32>>(),
        ScalarKind::U32 => FilterConstructor::of::<NumberFilter<u32>>(),
        ScalarKind::I64 => FilterConstructor::of::<NumberFilter<i64>>(),
        ScalarKind::U64 => FilterConstructor::of::<NumberFilter<u64>>(),
        ScalarKind::F32 => FilterConstructor::of::<NumberFilter<f32>>(),
        ScalarKind::F64 => FilterConstructor::of::<NumberFilter<f64>>(),
        ScalarKind::Decimal => FilterConstructor::of::<NumberFilter<Decimal>>(),
        ScalarKind::Bool | ScalarKind::DateTime | ScalarKind::String => return None,
    };
    Some(constructor)
}

pub(super) fn register_defaults(registry: &mut FilterRegistry) {
    for kind in ScalarKind::ALL {
        let Some(constructor) = number_constructor(kind) else {
            continue;
        };
        let declared = DeclaredType::scalar(kind);
        for method in methods::NUMBER {
            registry.register(&declared, method, constructor);
        }
    }

    let date_time = DeclaredType::scalar(ScalarKind::DateTime);
    for method in methods::DATE_TIME {
        registry.register_filter::<DateTimeFilter>(&date_time, method);
    }

    let boolean = DeclaredType::scalar(ScalarKind::Bool);
    for method in methods::BOOLEAN {
        registry.register_filter::<BooleanFilter>(&boolean, method);
    }

    let string = DeclaredType::scalar(ScalarKind::String);
    registry.register_filter::<StringEqualsFilter>(&string, methods::EQUALS);
    registry.register_filter::<StringNotEqualsFilter>(&string, methods::NOT_EQUALS);
    registry.register_filter::<StringContainsFilter>(&string, methods::CONTAINS);
    registry.register_filter::<StringStartsWithFilter>(&string, methods::STARTS_WITH);
    registry.register_filter::<StringEndsWithFilter>(&string, methods::ENDS_WITH);
}
