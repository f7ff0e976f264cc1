use super::{
    Comparison, Condition, FilterKind, GridFilter, methods, parse_operands, unsupported_method,
};
use std::borrow::Cow;

/// Equality filter for boolean fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BooleanFilter {
    method: String,
}

impl BooleanFilter {
    pub fn new(method: &str) -> Self {
        Self {
            method: method.to_lowercase(),
        }
    }
}

impl GridFilter for BooleanFilter {
    fn method(&self) -> &str {
        &self.method
    }

    fn condition(&self, values: &[Option<&str>]) -> Option<Condition> {
        let op = match self.method.as_str() {
            methods::EQUALS => Comparison::Equal,
            methods::NOT_EQUALS => Comparison::NotEqual,
            _ => return unsupported_method("boolean", &self.method),
        };
        let operands = parse_operands::<bool>(values)?;

        Condition::combine(op, operands)
    }
}

impl FilterKind for BooleanFilter {
    fn with_method(method: &str) -> Self {
        Self::new(method)
    }

    fn kind_name() -> Cow<'static, str> {
        Cow::Borrowed("BooleanFilter")
    }
}
