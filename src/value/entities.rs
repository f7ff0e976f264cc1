use crate::kind::ScalarKind;
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;

/// An owned, typed comparison value produced by parsing a raw filter value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Scalar {
    I8(i8),
    U8(u8),
    I16(i16),
    U16(u16),
    I32(i32),
    U32(u32),
    I64(i64),
    U64(u64),
    F32(f32),
    F64(f64),
    Decimal(Decimal),
    Bool(bool),
    DateTime(NaiveDateTime),
    String(String),
}

impl Scalar {
    pub fn kind(&self) -> ScalarKind {
        match self {
            Scalar::I8(_) => ScalarKind::I8,
            Scalar::U8(_) => ScalarKind::U8,
            Scalar::I16(_) => ScalarKind::I16,
            Scalar::U16(_) => ScalarKind::U16,
            Scalar::I32(_) => ScalarKind::I32,
            Scalar::U32(_) => ScalarKind::U32,
            Scalar::I64(_) => ScalarKind::I64,
            Scalar::U64(_) => ScalarKind::U64,
            Scalar::F32(_) => ScalarKind::F32,
            Scalar::F64(_) => ScalarKind::F64,
            Scalar::Decimal(_) => ScalarKind::Decimal,
            Scalar::Bool(_) => ScalarKind::Bool,
            Scalar::DateTime(_) => ScalarKind::DateTime,
            Scalar::String(_) => ScalarKind::String,
        }
    }

    /// Borrow this value in the shape fields are read in
    pub fn as_field_value(&self) -> FieldValue<'_> {
        match self {
            Scalar::I8(v) => FieldValue::I8(*v),
            Scalar::U8(v) => FieldValue::U8(*v),
            Scalar::I16(v) => FieldValue::I16(*v),
            Scalar::U16(v) => FieldValue::U16(*v),
            Scalar::I32(v) => FieldValue::I32(*v),
            Scalar::U32(v) => FieldValue::U32(*v),
            Scalar::I64(v) => FieldValue::I64(*v),
            Scalar::U64(v) => FieldValue::U64(*v),
            Scalar::F32(v) => FieldValue::F32(*v),
            Scalar::F64(v) => FieldValue::F64(*v),
            Scalar::Decimal(v) => FieldValue::Decimal(*v),
            Scalar::Bool(v) => FieldValue::Bool(*v),
            Scalar::DateTime(v) => FieldValue::DateTime(*v),
            Scalar::String(v) => FieldValue::Str(v),
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_field_value())
    }
}

/// A value read from a record field.
///
/// `Null` is only ever produced by optional fields.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    Null,
    I8(i8),
    U8(u8),
    I16(i16),
    U16(u16),
    I32(i32),
    U32(u32),
    I64(i64),
    U64(u64),
    F32(f32),
    F64(f64),
    Decimal(Decimal),
    Bool(bool),
    DateTime(NaiveDateTime),
    Str(&'a str),
}

impl<'a> FieldValue<'a> {
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    pub fn kind(&self) -> Option<ScalarKind> {
        let kind = match self {
            FieldValue::Null => return None,
            FieldValue::I8(_) => ScalarKind::I8,
            FieldValue::U8(_) => ScalarKind::U8,
            FieldValue::I16(_) => ScalarKind::I16,
            FieldValue::U16(_) => ScalarKind::U16,
            FieldValue::I32(_) => ScalarKind::I32,
            FieldValue::U32(_) => ScalarKind::U32,
            FieldValue::I64(_) => ScalarKind::I64,
            FieldValue::U64(_) => ScalarKind::U64,
            FieldValue::F32(_) => ScalarKind::F32,
            FieldValue::F64(_) => ScalarKind::F64,
            FieldValue::Decimal(_) => ScalarKind::Decimal,
            FieldValue::Bool(_) => ScalarKind::Bool,
            FieldValue::DateTime(_) => ScalarKind::DateTime,
            FieldValue::Str(_) => ScalarKind::String,
        };
        Some(kind)
    }

    pub fn as_str(&self) -> Option<&'a str> {
        match self {
            FieldValue::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Compare two non-null values of the same kind.
    ///
    /// Returns `None` for nulls, mismatched kinds and unordered floats.
    pub fn compare(&self, other: &FieldValue<'_>) -> Option<Ordering> {
        match (self, other) {
            (FieldValue::I8(a), FieldValue::I8(b)) => a.partial_cmp(b),
            (FieldValue::U8(a), FieldValue::U8(b)) => a.partial_cmp(b),
            (FieldValue::I16(a), FieldValue::I16(b)) => a.partial_cmp(b),
            (FieldValue::U16(a), FieldValue::U16(b)) => a.partial_cmp(b),
            (FieldValue::I32(a), FieldValue::I32(b)) => a.partial_cmp(b),
            (FieldValue::U32(a), FieldValue::U32(b)) => a.partial_cmp(b),
            (FieldValue::I64(a), FieldValue::I64(b)) => a.partial_cmp(b),
            (FieldValue::U64(a), FieldValue::U64(b)) => a.partial_cmp(b),
            (FieldValue::F32(a), FieldValue::F32(b)) => a.partial_cmp(b),
            (FieldValue::F64(a), FieldValue::F64(b)) => a.partial_cmp(b),
            (FieldValue::Decimal(a), FieldValue::Decimal(b)) => a.partial_cmp(b),
            (FieldValue::Bool(a), FieldValue::Bool(b)) => a.partial_cmp(b),
            (FieldValue::DateTime(a), FieldValue::DateTime(b)) => a.partial_cmp(b),
            (FieldValue::Str(a), FieldValue::Str(b)) => a.partial_cmp(b),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Null => f.write_str("null"),
            FieldValue::I8(v) => write!(f, "{}", v),
            FieldValue::U8(v) => write!(f, "{}", v),
            FieldValue::I16(v) => write!(f, "{}", v),
            FieldValue::U16(v) => write!(f, "{}", v),
            FieldValue::I32(v) => write!(f, "{}", v),
            FieldValue::U32(v) => write!(f, "{}", v),
            FieldValue::I64(v) => write!(f, "{}", v),
            FieldValue::U64(v) => write!(f, "{}", v),
            FieldValue::F32(v) => write!(f, "{}", v),
            FieldValue::F64(v) => write!(f, "{}", v),
            FieldValue::Decimal(v) => write!(f, "{}", v),
            FieldValue::Bool(v) => write!(f, "{}", v),
            FieldValue::DateTime(v) => write!(f, "{}", v.format("%Y-%m-%dT%H:%M:%S%.f")),
            FieldValue::Str(v) => f.write_str(v),
        }
    }
}
