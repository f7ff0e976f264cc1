use super::{
    Comparison, Condition, FilterKind, GridFilter, methods, parse_operands, unsupported_method,
};
use chrono::NaiveDateTime;
use std::borrow::Cow;

/// Comparison filter for date/time fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateTimeFilter {
    method: String,
}

impl DateTimeFilter {
    pub fn new(method: &str) -> Self {
        Self {
            method: method.to_lowercase(),
        }
    }
}

impl GridFilter for DateTimeFilter {
    fn method(&self) -> &str {
        &self.method
    }

    fn condition(&self, values: &[Option<&str>]) -> Option<Condition> {
        let op = match self.method.as_str() {
            methods::EQUALS => Comparison::Equal,
            methods::NOT_EQUALS => Comparison::NotEqual,
            methods::EARLIER_THAN => Comparison::LessThan,
            methods::LATER_THAN => Comparison::GreaterThan,
            methods::EARLIER_THAN_OR_EQUAL => Comparison::LessThanOrEqual,
            methods::LATER_THAN_OR_EQUAL => Comparison::GreaterThanOrEqual,
            _ => return unsupported_method("datetime", &self.method),
        };
        let operands = parse_operands::<NaiveDateTime>(values)?;

        Condition::combine(op, operands)
    }
}

impl FilterKind for DateTimeFilter {
    fn with_method(method: &str) -> Self {
        Self::new(method)
    }

    fn kind_name() -> Cow<'static, str> {
        Cow::Borrowed("DateTimeFilter")
    }
}
