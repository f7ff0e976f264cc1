//! Conversion of raw filter values into typed comparison values
//!
//! Raw values arrive as strings (query string or form fields). Every kind
//! parses the culture-invariant textual form and rejects anything outside
//! its representable range; nothing is clamped or wrapped around.
//!
//! An absent or blank raw value is not a failure: it parses to the null
//! sentinel (`Ok(None)`), which filters compare with explicit null semantics.

mod datetime;
mod entities;
mod error;

pub use datetime::parse_date_time;
pub use entities::{FieldValue, Scalar};
pub use error::ParseValueError;

use crate::kind::ScalarKind;
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use std::fmt::Display;
use std::num::IntErrorKind;
use std::str::FromStr;

/// A Rust type filters can parse raw values into
pub trait ScalarValue: Sized {
    const KIND: ScalarKind;

    /// Parse a non-blank, already trimmed raw value
    fn parse_invariant(raw: &str) -> Result<Self, ParseValueError>;

    fn into_scalar(self) -> Scalar;
}

/// Marker for the kinds number filters are generic over
pub trait Number: ScalarValue {}

fn is_negative_integer(raw: &str) -> bool {
    raw.strip_prefix('-')
        .is_some_and(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
}

fn is_negative_zero(raw: &str) -> bool {
    is_negative_integer(raw) && raw[1..].bytes().all(|b| b == b'0')
}

/// Optional sign, digits and an optional fractional part; no exponent or
/// digit separators
fn is_decimal_literal(raw: &str) -> bool {
    let unsigned = raw.strip_prefix(&['-', '+'][..]).unwrap_or(raw);
    let (whole, fraction) = unsigned.split_once('.').unwrap_or((unsigned, ""));

    !(whole.is_empty() && fraction.is_empty())
        && whole.bytes().all(|b| b.is_ascii_digit())
        && fraction.bytes().all(|b| b.is_ascii_digit())
}

fn out_of_range(
    kind: ScalarKind,
    raw: &str,
    min: impl Display,
    max: impl Display,
) -> ParseValueError {
    ParseValueError::OutOfRange {
        kind,
        value: raw.to_string(),
        min: min.to_string(),
        max: max.to_string(),
    }
}

macro_rules! integer_value {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl ScalarValue for $ty {
                const KIND: ScalarKind = ScalarKind::$variant;

                fn parse_invariant(raw: &str) -> Result<Self, ParseValueError> {
                    let error = match raw.parse::<$ty>() {
                        Ok(value) => return Ok(value),
                        Err(error) => error,
                    };

                    match error.kind() {
                        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => {
                            Err(out_of_range(Self::KIND, raw, <$ty>::MIN, <$ty>::MAX))
                        }
                        // Unsigned parsing rejects the sign itself; negative zero is still zero
                        IntErrorKind::InvalidDigit if is_negative_zero(raw) => Ok(0),
                        IntErrorKind::InvalidDigit if is_negative_integer(raw) => {
                            Err(out_of_range(Self::KIND, raw, <$ty>::MIN, <$ty>::MAX))
                        }
                        _ => Err(ParseValueError::invalid(Self::KIND, raw)),
                    }
                }

                fn into_scalar(self) -> Scalar {
                    Scalar::$variant(self)
                }
            }

            impl Number for $ty {}
        )*
    };
}

integer_value! {
    i8 => I8,
    u8 => U8,
    i16 => I16,
    u16 => U16,
    i32 => I32,
    u32 => U32,
    i64 => I64,
    u64 => U64,
}

macro_rules! float_value {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl ScalarValue for $ty {
                const KIND: ScalarKind = ScalarKind::$variant;

                fn parse_invariant(raw: &str) -> Result<Self, ParseValueError> {
                    let value = raw
                        .parse::<$ty>()
                        .map_err(|_| ParseValueError::invalid(Self::KIND, raw))?;

                    if value.is_nan() {
                        return Err(ParseValueError::invalid(Self::KIND, raw));
                    }
                    // Literals beyond the kind's precision round to infinity
                    if value.is_infinite() {
                        return Err(out_of_range(
                            Self::KIND,
                            raw,
                            format!("{:e}", <$ty>::MIN),
                            format!("{:e}", <$ty>::MAX),
                        ));
                    }

                    Ok(value)
                }

                fn into_scalar(self) -> Scalar {
                    Scalar::$variant(self)
                }
            }

            impl Number for $ty {}
        )*
    };
}

float_value! {
    f32 => F32,
    f64 => F64,
}

impl ScalarValue for Decimal {
    const KIND: ScalarKind = ScalarKind::Decimal;

    fn parse_invariant(raw: &str) -> Result<Self, ParseValueError> {
        if !is_decimal_literal(raw) {
            return Err(ParseValueError::invalid(Self::KIND, raw));
        }
        // Excess fractional digits round; only the integer part can overflow
        Decimal::from_str(raw)
            .map_err(|_| out_of_range(Self::KIND, raw, Decimal::MIN, Decimal::MAX))
    }

    fn into_scalar(self) -> Scalar {
        Scalar::Decimal(self)
    }
}

impl Number for Decimal {}

impl ScalarValue for bool {
    const KIND: ScalarKind = ScalarKind::Bool;

    fn parse_invariant(raw: &str) -> Result<Self, ParseValueError> {
        if raw.eq_ignore_ascii_case("true") {
            Ok(true)
        } else if raw.eq_ignore_ascii_case("false") {
            Ok(false)
        } else {
            Err(ParseValueError::invalid(Self::KIND, raw))
        }
    }

    fn into_scalar(self) -> Scalar {
        Scalar::Bool(self)
    }
}

impl ScalarValue for NaiveDateTime {
    const KIND: ScalarKind = ScalarKind::DateTime;

    fn parse_invariant(raw: &str) -> Result<Self, ParseValueError> {
        parse_date_time(raw).ok_or_else(|| ParseValueError::invalid(Self::KIND, raw))
    }

    fn into_scalar(self) -> Scalar {
        Scalar::DateTime(self)
    }
}

/// Parse a raw value as `T`, mapping absent and blank input to the null sentinel
pub fn parse_typed<T: ScalarValue>(raw: Option<&str>) -> Result<Option<T>, ParseValueError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(trimmed) => T::parse_invariant(trimmed).map(Some),
    }
}

/// Parse a raw value into a comparison value of the given kind
pub fn parse_value(kind: ScalarKind, raw: Option<&str>) -> Result<Option<Scalar>, ParseValueError> {
    fn parse_as<T: ScalarValue>(raw: Option<&str>) -> Result<Option<Scalar>, ParseValueError> {
        parse_typed::<T>(raw).map(|value| value.map(T::into_scalar))
    }

    match kind {
        ScalarKind::I8 => parse_as::<i8>(raw),
        ScalarKind::U8 => parse_as::<u8>(raw),
        ScalarKind::I16 => parse_as::<i16>(raw),
        ScalarKind::U16 => parse_as::<u16>(raw),
        ScalarKind::I32 => parse_as::<i32>(raw),
        ScalarKind::U32 => parse_as::<u32>(raw),
        ScalarKind::I64 => parse_as::<i64>(raw),
        ScalarKind::U64 => parse_as::<u64>(raw),
        ScalarKind::F32 => parse_as::<f32>(raw),
        ScalarKind::F64 => parse_as::<f64>(raw),
        ScalarKind::Decimal => parse_as::<Decimal>(raw),
        ScalarKind::Bool => parse_as::<bool>(raw),
        ScalarKind::DateTime => parse_as::<NaiveDateTime>(raw),
        // Strings keep their surrounding whitespace
        ScalarKind::String => match raw {
            None | Some("") => Ok(None),
            Some(value) => Ok(Some(Scalar::String(value.to_string()))),
        },
    }
}
