//! String filters, one type per method so each can be overridden or
//! removed on its own.
//!
//! `equals` and `not-equals` are exact and honour the null sentinel.
//! `contains`, `starts-with` and `ends-with` ignore case and skip blank
//! values; with nothing left to match they are not applicable.
//!
//! Each filter applies its own operation whatever method name it was
//! registered under, so a registration can alias another name to it.

use super::{Comparison, Condition, FilterKind, GridFilter};
use crate::value::Scalar;
use std::borrow::Cow;
use tracing::debug;

fn operand(raw: Option<&str>) -> Option<Scalar> {
    match raw {
        None | Some("") => None,
        Some(value) => Some(Scalar::String(value.to_string())),
    }
}

fn exact(op: Comparison, values: &[Option<&str>]) -> Option<Condition> {
    Condition::combine(op, values.iter().map(|raw| operand(*raw)).collect())
}

fn pattern(op: Comparison, values: &[Option<&str>]) -> Option<Condition> {
    let leaves: Vec<Condition> = values
        .iter()
        .filter_map(|raw| operand(*raw))
        .map(|value| Condition::compare(op, Some(value)))
        .collect();

    if leaves.is_empty() {
        debug!(op = %op, "No non-blank values for text filter");
        return None;
    }

    Some(Condition::any(leaves))
}

macro_rules! string_filter {
    ($(#[$doc:meta])* $name:ident, $combine:ident, $op:expr) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub struct $name {
            method: String,
        }

        impl $name {
            pub fn new(method: &str) -> Self {
                Self {
                    method: method.to_lowercase(),
                }
            }
        }

        impl GridFilter for $name {
            fn method(&self) -> &str {
                &self.method
            }

            fn condition(&self, values: &[Option<&str>]) -> Option<Condition> {
                $combine($op, values)
            }
        }

        impl FilterKind for $name {
            fn with_method(method: &str) -> Self {
                Self::new(method)
            }

            fn kind_name() -> Cow<'static, str> {
                Cow::Borrowed(stringify!($name))
            }
        }
    };
}

string_filter!(
    /// Case-sensitive equality
    StringEqualsFilter,
    exact,
    Comparison::Equal
);

string_filter!(
    /// Case-sensitive inequality against every value
    StringNotEqualsFilter,
    exact,
    Comparison::NotEqual
);

string_filter!(
    /// Case-insensitive substring match
    StringContainsFilter,
    pattern,
    Comparison::Contains
);

string_filter!(
    /// Case-insensitive prefix match
    StringStartsWithFilter,
    pattern,
    Comparison::StartsWith
);

string_filter!(
    /// Case-insensitive suffix match
    StringEndsWithFilter,
    pattern,
    Comparison::EndsWith
);
