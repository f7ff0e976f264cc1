//! Typed field accessors and the predicates built over them
//!
//! A [`Field`] wraps a getter such as `|row: &Order| &row.quantity` together
//! with the declared type of the field. Filters never see records; they
//! produce a [`Condition`] over the field value, and a [`Predicate`] ties
//! that condition back to the accessor.

use crate::filter::Condition;
use crate::kind::{DeclaredType, ScalarKind};
use crate::value::FieldValue;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

/// A Rust type that can be read as a filterable field
pub trait FieldType {
    fn declared_type() -> DeclaredType;

    fn field_value(&self) -> FieldValue<'_>;
}

macro_rules! scalar_field {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl FieldType for $ty {
                fn declared_type() -> DeclaredType {
                    DeclaredType::scalar(ScalarKind::$variant)
                }

                fn field_value(&self) -> FieldValue<'_> {
                    FieldValue::$variant(*self)
                }
            }
        )*
    };
}

scalar_field! {
    i8 => I8,
    u8 => U8,
    i16 => I16,
    u16 => U16,
    i32 => I32,
    u32 => U32,
    i64 => I64,
    u64 => U64,
    f32 => F32,
    f64 => F64,
    Decimal => Decimal,
    bool => Bool,
    NaiveDateTime => DateTime,
}

impl FieldType for NaiveDate {
    fn declared_type() -> DeclaredType {
        DeclaredType::scalar(ScalarKind::DateTime)
    }

    fn field_value(&self) -> FieldValue<'_> {
        match self.and_hms_opt(0, 0, 0) {
            Some(midnight) => FieldValue::DateTime(midnight),
            None => FieldValue::Null,
        }
    }
}

impl FieldType for DateTime<Utc> {
    fn declared_type() -> DeclaredType {
        DeclaredType::scalar(ScalarKind::DateTime)
    }

    fn field_value(&self) -> FieldValue<'_> {
        FieldValue::DateTime(self.naive_utc())
    }
}

impl FieldType for String {
    fn declared_type() -> DeclaredType {
        DeclaredType::scalar(ScalarKind::String)
    }

    fn field_value(&self) -> FieldValue<'_> {
        FieldValue::Str(self)
    }
}

impl FieldType for str {
    fn declared_type() -> DeclaredType {
        DeclaredType::scalar(ScalarKind::String)
    }

    fn field_value(&self) -> FieldValue<'_> {
        FieldValue::Str(self)
    }
}

impl<T: FieldType> FieldType for Option<T> {
    fn declared_type() -> DeclaredType {
        T::declared_type().into_nullable()
    }

    fn field_value(&self) -> FieldValue<'_> {
        match self {
            Some(value) => value.field_value(),
            None => FieldValue::Null,
        }
    }
}

trait ReadField<R>: Send + Sync {
    fn read<'r>(&self, record: &'r R) -> FieldValue<'r>;
}

struct Getter<F, T: ?Sized> {
    get: F,
    _field: PhantomData<fn() -> Box<T>>,
}

impl<R, T, F> ReadField<R> for Getter<F, T>
where
    T: FieldType + ?Sized + 'static,
    F: Fn(&R) -> &T + Send + Sync,
{
    fn read<'r>(&self, record: &'r R) -> FieldValue<'r> {
        (self.get)(record).field_value()
    }
}

/// A typed "read field F from record R" accessor with its declared type
pub struct Field<R> {
    name: Option<String>,
    declared: DeclaredType,
    /// Scalar kind the getter actually yields, which may differ from a
    /// custom declared type
    value_kind: Option<ScalarKind>,
    reader: Arc<dyn ReadField<R>>,
}

impl<R> Field<R> {
    /// Wrap a getter; the declared type is derived from the field's Rust type
    pub fn new<T, F>(get: F) -> Self
    where
        T: FieldType + ?Sized + 'static,
        F: Fn(&R) -> &T + Send + Sync + 'static,
    {
        Self::with_declared_type(T::declared_type(), get)
    }

    /// Wrap a getter under an explicit declared type, e.g. a custom type name
    /// for a newtype stored as a scalar
    pub fn with_declared_type<T, F>(declared: DeclaredType, get: F) -> Self
    where
        T: FieldType + ?Sized + 'static,
        F: Fn(&R) -> &T + Send + Sync + 'static,
    {
        Self {
            name: None,
            declared,
            value_kind: T::declared_type().scalar_kind(),
            reader: Arc::new(Getter {
                get,
                _field: PhantomData,
            }),
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn declared_type(&self) -> &DeclaredType {
        &self.declared
    }

    pub fn value_kind(&self) -> Option<ScalarKind> {
        self.value_kind
    }

    pub fn read<'r>(&self, record: &'r R) -> FieldValue<'r> {
        self.reader.read(record)
    }

    /// Bind a condition to this field
    pub fn predicate(&self, condition: Condition) -> Predicate<R> {
        Predicate {
            root: Node::Clause(self.clone(), condition),
        }
    }
}

impl<R> Clone for Field<R> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            declared: self.declared.clone(),
            value_kind: self.value_kind,
            reader: Arc::clone(&self.reader),
        }
    }
}

impl<R> fmt::Debug for Field<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("name", &self.name)
            .field("declared", &self.declared)
            .field("value_kind", &self.value_kind)
            .finish_non_exhaustive()
    }
}

enum Node<R> {
    Clause(Field<R>, Condition),
    All(Vec<Node<R>>),
    Any(Vec<Node<R>>),
}

impl<R> Node<R> {
    fn matches(&self, record: &R) -> bool {
        match self {
            Node::Clause(field, condition) => condition.evaluate(&field.read(record)),
            Node::All(nodes) => nodes.iter().all(|node| node.matches(record)),
            Node::Any(nodes) => nodes.iter().any(|node| node.matches(record)),
        }
    }

    fn clauses<'a>(&'a self, out: &mut Vec<(&'a Field<R>, &'a Condition)>) {
        match self {
            Node::Clause(field, condition) => out.push((field, condition)),
            Node::All(nodes) | Node::Any(nodes) => {
                for node in nodes {
                    node.clauses(out);
                }
            }
        }
    }
}

impl<R> Clone for Node<R> {
    fn clone(&self) -> Self {
        match self {
            Node::Clause(field, condition) => Node::Clause(field.clone(), condition.clone()),
            Node::All(nodes) => Node::All(nodes.clone()),
            Node::Any(nodes) => Node::Any(nodes.clone()),
        }
    }
}

impl<R> fmt::Debug for Node<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Clause(field, condition) => f
                .debug_tuple("Clause")
                .field(&field.name())
                .field(condition)
                .finish(),
            Node::All(nodes) => f.debug_tuple("All").field(nodes).finish(),
            Node::Any(nodes) => f.debug_tuple("Any").field(nodes).finish(),
        }
    }
}

/// A boolean function over records, built fresh per filter application.
///
/// Predicates over the same record type combine with [`Predicate::and`] and
/// [`Predicate::or`], e.g. one predicate per filtered column.
pub struct Predicate<R> {
    root: Node<R>,
}

impl<R> Predicate<R> {
    pub fn matches(&self, record: &R) -> bool {
        self.root.matches(record)
    }

    /// Both predicates must hold
    pub fn and(self, other: Predicate<R>) -> Self {
        let nodes = match (self.root, other.root) {
            (Node::All(mut left), Node::All(right)) => {
                left.extend(right);
                left
            }
            (Node::All(mut left), right) => {
                left.push(right);
                left
            }
            (left, right) => vec![left, right],
        };
        Predicate {
            root: Node::All(nodes),
        }
    }

    /// Either predicate may hold
    pub fn or(self, other: Predicate<R>) -> Self {
        let nodes = match (self.root, other.root) {
            (Node::Any(mut left), Node::Any(right)) => {
                left.extend(right);
                left
            }
            (Node::Any(mut left), right) => {
                left.push(right);
                left
            }
            (left, right) => vec![left, right],
        };
        Predicate {
            root: Node::Any(nodes),
        }
    }

    /// Every (field, condition) pair, in evaluation order
    pub fn conditions(&self) -> Vec<(&Field<R>, &Condition)> {
        let mut out = Vec::new();
        self.root.clauses(&mut out);
        out
    }

    /// Keep the records this predicate matches
    pub fn filter<'a, I>(&'a self, records: I) -> impl Iterator<Item = &'a R> + 'a
    where
        I: IntoIterator<Item = &'a R>,
        I::IntoIter: 'a,
    {
        records.into_iter().filter(move |record| self.matches(record))
    }

    pub fn into_fn(self) -> impl Fn(&R) -> bool {
        move |record: &R| self.matches(record)
    }
}

impl<R> Clone for Predicate<R> {
    fn clone(&self) -> Self {
        Self {
            root: self.root.clone(),
        }
    }
}

impl<R> fmt::Debug for Predicate<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Predicate").field("root", &self.root).finish()
    }
}
