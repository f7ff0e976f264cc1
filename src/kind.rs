use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The closed set of primitive value categories a filter can compare
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum ScalarKind {
    I8,
    U8,
    I16,
    U16,
    I32,
    U32,
    I64,
    U64,
    F32,
    F64,
    Decimal,
    Bool,
    DateTime,
    String,
}

impl ScalarKind {
    pub const ALL: [ScalarKind; 14] = [
        ScalarKind::I8,
        ScalarKind::U8,
        ScalarKind::I16,
        ScalarKind::U16,
        ScalarKind::I32,
        ScalarKind::U32,
        ScalarKind::I64,
        ScalarKind::U64,
        ScalarKind::F32,
        ScalarKind::F64,
        ScalarKind::Decimal,
        ScalarKind::Bool,
        ScalarKind::DateTime,
        ScalarKind::String,
    ];

    /// Get the canonical name of this kind
    pub fn canonical_name(&self) -> &'static str {
        match self {
            ScalarKind::I8 => "i8",
            ScalarKind::U8 => "u8",
            ScalarKind::I16 => "i16",
            ScalarKind::U16 => "u16",
            ScalarKind::I32 => "i32",
            ScalarKind::U32 => "u32",
            ScalarKind::I64 => "i64",
            ScalarKind::U64 => "u64",
            ScalarKind::F32 => "f32",
            ScalarKind::F64 => "f64",
            ScalarKind::Decimal => "decimal",
            ScalarKind::Bool => "bool",
            ScalarKind::DateTime => "datetime",
            ScalarKind::String => "string",
        }
    }

    pub fn is_numeric(&self) -> bool {
        !matches!(
            self,
            ScalarKind::Bool | ScalarKind::DateTime | ScalarKind::String
        )
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.canonical_name())
    }
}

impl FromStr for ScalarKind {
    type Err = DeclaredTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "i8" | "sbyte" => Ok(ScalarKind::I8),
            "u8" | "byte" => Ok(ScalarKind::U8),
            "i16" | "short" => Ok(ScalarKind::I16),
            "u16" | "ushort" => Ok(ScalarKind::U16),
            "i32" | "int" => Ok(ScalarKind::I32),
            "u32" | "uint" => Ok(ScalarKind::U32),
            "i64" | "long" => Ok(ScalarKind::I64),
            "u64" | "ulong" => Ok(ScalarKind::U64),
            "f32" | "float" | "single" => Ok(ScalarKind::F32),
            "f64" | "double" => Ok(ScalarKind::F64),
            "decimal" => Ok(ScalarKind::Decimal),
            "bool" | "boolean" => Ok(ScalarKind::Bool),
            "datetime" | "date" => Ok(ScalarKind::DateTime),
            "string" | "str" => Ok(ScalarKind::String),
            _ => Err(DeclaredTypeError::UnknownKind(s.to_string())),
        }
    }
}

impl TryFrom<String> for ScalarKind {
    type Error = DeclaredTypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DeclaredTypeError {
    #[error("Empty type name")]
    Empty,

    #[error("Unknown scalar kind: '{0}'")]
    UnknownKind(String),
}

/// Registry key identifying a field type regardless of its nullability
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TypeKey {
    Scalar(ScalarKind),
    /// A model-defined type registered by name
    Custom(Cow<'static, str>),
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeKey::Scalar(kind) => write!(f, "{}", kind),
            TypeKey::Custom(name) => f.write_str(name),
        }
    }
}

/// The static type of a field as seen by the filter registry.
///
/// `nullable` marks the optional form (`Option<T>`) of the underlying type.
/// Registry operations normalize both forms to the same [`TypeKey`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DeclaredType {
    pub key: TypeKey,
    pub nullable: bool,
}

impl DeclaredType {
    pub const fn scalar(kind: ScalarKind) -> Self {
        Self {
            key: TypeKey::Scalar(kind),
            nullable: false,
        }
    }

    pub const fn custom(name: &'static str) -> Self {
        Self {
            key: TypeKey::Custom(Cow::Borrowed(name)),
            nullable: false,
        }
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self {
            key: TypeKey::Custom(Cow::Owned(name.into())),
            nullable: false,
        }
    }

    /// The declared type of a Rust field type
    pub fn of<T: crate::field::FieldType + ?Sized>() -> Self {
        T::declared_type()
    }

    pub fn into_nullable(self) -> Self {
        Self {
            key: self.key,
            nullable: true,
        }
    }

    /// Key used for registry storage and lookup
    pub fn canonical(&self) -> &TypeKey {
        &self.key
    }

    pub fn scalar_kind(&self) -> Option<ScalarKind> {
        match self.key {
            TypeKey::Scalar(kind) => Some(kind),
            TypeKey::Custom(_) => None,
        }
    }
}

impl From<ScalarKind> for DeclaredType {
    fn from(kind: ScalarKind) -> Self {
        DeclaredType::scalar(kind)
    }
}

impl fmt::Display for DeclaredType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key)?;
        if self.nullable {
            f.write_str("?")?;
        }
        Ok(())
    }
}

/// Parses `"i32"`, `"i32?"`, `"Option<i32>"` or any other name as a custom type
impl FromStr for DeclaredType {
    type Err = DeclaredTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let (name, nullable) = if let Some(inner) = trimmed.strip_suffix('?') {
            (inner.trim(), true)
        } else if let Some(inner) = trimmed
            .strip_prefix("Option<")
            .and_then(|rest| rest.strip_suffix('>'))
        {
            (inner.trim(), true)
        } else {
            (trimmed, false)
        };

        if name.is_empty() {
            return Err(DeclaredTypeError::Empty);
        }

        let key = match name.parse::<ScalarKind>() {
            Ok(kind) => TypeKey::Scalar(kind),
            Err(_) => TypeKey::Custom(Cow::Owned(name.to_string())),
        };

        Ok(DeclaredType { key, nullable })
    }
}
