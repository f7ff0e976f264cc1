use super::{
    Comparison, Condition, FilterKind, GridFilter, methods, parse_operands, unsupported_method,
};
use crate::value::Number;
use std::borrow::Cow;
use std::fmt;
use std::marker::PhantomData;

/// Comparison filter for every integer, floating point and decimal kind
pub struct NumberFilter<T> {
    method: String,
    _number: PhantomData<fn() -> T>,
}

impl<T: Number> NumberFilter<T> {
    pub fn new(method: &str) -> Self {
        Self {
            method: method.to_lowercase(),
            _number: PhantomData,
        }
    }

    fn comparison(&self) -> Option<Comparison> {
        match self.method.as_str() {
            methods::EQUALS => Some(Comparison::Equal),
            methods::NOT_EQUALS => Some(Comparison::NotEqual),
            methods::LESS_THAN => Some(Comparison::LessThan),
            methods::GREATER_THAN => Some(Comparison::GreaterThan),
            methods::LESS_THAN_OR_EQUAL => Some(Comparison::LessThanOrEqual),
            methods::GREATER_THAN_OR_EQUAL => Some(Comparison::GreaterThanOrEqual),
            _ => None,
        }
    }
}

impl<T: Number + 'static> GridFilter for NumberFilter<T> {
    fn method(&self) -> &str {
        &self.method
    }

    fn condition(&self, values: &[Option<&str>]) -> Option<Condition> {
        let Some(op) = self.comparison() else {
            return unsupported_method("number", &self.method);
        };
        let operands = parse_operands::<T>(values)?;

        Condition::combine(op, operands)
    }
}

impl<T: Number + 'static> FilterKind for NumberFilter<T> {
    fn with_method(method: &str) -> Self {
        Self::new(method)
    }

    fn kind_name() -> Cow<'static, str> {
        Cow::Owned(format!("NumberFilter<{}>", T::KIND))
    }
}

impl<T: Number> Clone for NumberFilter<T> {
    fn clone(&self) -> Self {
        Self::new(&self.method)
    }
}

impl<T: Number> fmt::Debug for NumberFilter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NumberFilter")
            .field("kind", &T::KIND)
            .field("method", &self.method)
            .finish()
    }
}
