//! Type-specific predicate builders
//!
//! A filter instance is created for one lowercase method name and turns raw
//! string values into a [`Condition`] over a field value. The same instance
//! can then be applied to any [`Field`] of a matching type.
//!
//! # Methods
//!
//! - numbers: `equals`, `not-equals`, `less-than`, `greater-than`,
//!   `less-than-or-equal`, `greater-than-or-equal`
//! - date/time: `equals`, `not-equals`, `earlier-than`, `later-than`,
//!   `earlier-than-or-equal`, `later-than-or-equal`
//! - booleans: `equals`, `not-equals`
//! - strings: `equals`, `not-equals`, `contains`, `starts-with`, `ends-with`
//!   (one filter type each)
//!
//! # Values
//!
//! Several values combine with OR (`equals 1, 2` matches 1 or 2), except
//! `not-equals` which matches values different from all of them. A blank
//! value is the null sentinel. A single unparseable value makes the whole
//! filter inapplicable.

pub mod boolean;
pub mod condition;
pub mod date;
pub mod descriptor;
pub mod number;
pub mod string;

pub use boolean::BooleanFilter;
pub use condition::{Comparison, Condition};
pub use date::DateTimeFilter;
pub use descriptor::FilterDescriptor;
pub use number::NumberFilter;
pub use string::{
    StringContainsFilter, StringEndsWithFilter, StringEqualsFilter, StringNotEqualsFilter,
    StringStartsWithFilter,
};

use crate::field::{Field, Predicate};
use crate::value::{ScalarValue, parse_typed};
use std::any::Any;
use std::borrow::Cow;
use std::fmt;
use tracing::{debug, warn};

/// Method names registered by default
pub mod methods {
    pub const EQUALS: &str = "equals";
    pub const NOT_EQUALS: &str = "not-equals";
    pub const LESS_THAN: &str = "less-than";
    pub const GREATER_THAN: &str = "greater-than";
    pub const LESS_THAN_OR_EQUAL: &str = "less-than-or-equal";
    pub const GREATER_THAN_OR_EQUAL: &str = "greater-than-or-equal";
    pub const EARLIER_THAN: &str = "earlier-than";
    pub const LATER_THAN: &str = "later-than";
    pub const EARLIER_THAN_OR_EQUAL: &str = "earlier-than-or-equal";
    pub const LATER_THAN_OR_EQUAL: &str = "later-than-or-equal";
    pub const CONTAINS: &str = "contains";
    pub const STARTS_WITH: &str = "starts-with";
    pub const ENDS_WITH: &str = "ends-with";

    pub const NUMBER: [&str; 6] = [
        EQUALS,
        NOT_EQUALS,
        LESS_THAN,
        GREATER_THAN,
        LESS_THAN_OR_EQUAL,
        GREATER_THAN_OR_EQUAL,
    ];

    pub const DATE_TIME: [&str; 6] = [
        EQUALS,
        NOT_EQUALS,
        EARLIER_THAN,
        LATER_THAN,
        EARLIER_THAN_OR_EQUAL,
        LATER_THAN_OR_EQUAL,
    ];

    pub const BOOLEAN: [&str; 2] = [EQUALS, NOT_EQUALS];
}

pub trait AsAny {
    fn as_any(&self) -> &dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A predicate builder bound to one method name
pub trait GridFilter: AsAny + fmt::Debug + Send + Sync {
    /// The lowercase method this filter was created for
    fn method(&self) -> &str;

    /// Build the condition for the given raw values.
    ///
    /// Returns `None` when the method is not supported, no values are given,
    /// or any value fails to parse.
    fn condition(&self, values: &[Option<&str>]) -> Option<Condition>;
}

/// A filter type the registry can construct
pub trait FilterKind: GridFilter + Sized + 'static {
    fn with_method(method: &str) -> Self;

    /// Display name, e.g. `NumberFilter<i32>`
    fn kind_name() -> Cow<'static, str>;
}

impl dyn GridFilter {
    pub fn is<T: GridFilter + 'static>(&self) -> bool {
        self.as_any().is::<T>()
    }

    pub fn downcast_ref<T: GridFilter + 'static>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }
}

/// Bind a filter's condition to a typed field
pub trait ApplyFilter {
    fn apply<R>(&self, field: &Field<R>, values: &[Option<&str>]) -> Option<Predicate<R>>;
}

impl<G: GridFilter + ?Sized> ApplyFilter for G {
    fn apply<R>(&self, field: &Field<R>, values: &[Option<&str>]) -> Option<Predicate<R>> {
        let condition = self.condition(values)?;

        let mismatch = field.value_kind().and_then(|kind| {
            condition
                .operand_kinds()
                .into_iter()
                .find(|operand| *operand != kind)
        });

        if let Some(operand) = mismatch {
            warn!(
                method = self.method(),
                field = field.name().unwrap_or("<unnamed>"),
                declared = %field.declared_type(),
                value_kind = ?field.value_kind(),
                operand = %operand,
                "Filter operand kind does not match the field type"
            );
            return None;
        }

        Some(field.predicate(condition))
    }
}

/// Parse every raw value as `T`; any failure rejects the whole set
pub(crate) fn parse_operands<T: ScalarValue>(
    values: &[Option<&str>],
) -> Option<Vec<Option<crate::value::Scalar>>> {
    values
        .iter()
        .map(|raw| match parse_typed::<T>(*raw) {
            Ok(value) => Some(value.map(T::into_scalar)),
            Err(error) => {
                debug!(%error, "Rejecting filter with an unparseable value");
                None
            }
        })
        .collect()
}

pub(crate) fn unsupported_method(filter: &str, method: &str) -> Option<Condition> {
    debug!(filter, method, "Unsupported filter method");
    None
}
