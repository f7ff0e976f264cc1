use crate::kind::ScalarKind;
use crate::value::{FieldValue, Scalar};
use std::cmp::Ordering;
use std::fmt;

/// Comparison applied between a field value and a parsed operand
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Comparison {
    Equal,
    NotEqual,
    LessThan,
    GreaterThan,
    LessThanOrEqual,
    GreaterThanOrEqual,
    /// Case-insensitive substring match
    Contains,
    /// Case-insensitive prefix match
    StartsWith,
    /// Case-insensitive suffix match
    EndsWith,
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            Comparison::Equal => "==",
            Comparison::NotEqual => "!=",
            Comparison::LessThan => "<",
            Comparison::GreaterThan => ">",
            Comparison::LessThanOrEqual => "<=",
            Comparison::GreaterThanOrEqual => ">=",
            Comparison::Contains => "contains",
            Comparison::StartsWith => "starts-with",
            Comparison::EndsWith => "ends-with",
        };
        f.write_str(symbol)
    }
}

/// A boolean condition over a single field value.
///
/// Leaves carry an explicit operand that is either a typed value or the null
/// sentinel (`None`). Null handling is three-valued but collapsed to `bool`:
///
/// - `== null` holds only for null fields, `!= null` only for present ones
/// - `== v` never holds for null fields, `!= v` always does
/// - ordering and text comparisons never hold when either side is null
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    Compare {
        op: Comparison,
        operand: Option<Scalar>,
    },
    Any(Vec<Condition>),
    All(Vec<Condition>),
    Not(Box<Condition>),
}

impl Condition {
    pub fn compare(op: Comparison, operand: Option<Scalar>) -> Self {
        Condition::Compare { op, operand }
    }

    /// Disjunction; a single condition is returned as is
    pub fn any(mut conditions: Vec<Condition>) -> Self {
        if conditions.len() == 1 {
            conditions.remove(0)
        } else {
            Condition::Any(conditions)
        }
    }

    /// Conjunction; a single condition is returned as is
    pub fn all(mut conditions: Vec<Condition>) -> Self {
        if conditions.len() == 1 {
            conditions.remove(0)
        } else {
            Condition::All(conditions)
        }
    }

    pub fn negate(self) -> Self {
        match self {
            Condition::Not(inner) => *inner,
            other => Condition::Not(Box::new(other)),
        }
    }

    /// Combine one comparison per operand.
    ///
    /// Operands are OR-ed, except `NotEqual` whose operands are AND-ed so that
    /// `!= [a, b]` reads as "neither a nor b". Returns `None` for no operands.
    pub fn combine(op: Comparison, operands: Vec<Option<Scalar>>) -> Option<Self> {
        if operands.is_empty() {
            return None;
        }

        let leaves = operands
            .into_iter()
            .map(|operand| Condition::compare(op, operand))
            .collect();

        Some(match op {
            Comparison::NotEqual => Condition::all(leaves),
            _ => Condition::any(leaves),
        })
    }

    /// Evaluate against a value read from a record
    pub fn evaluate(&self, value: &FieldValue<'_>) -> bool {
        match self {
            Condition::Compare { op, operand } => compare(*op, operand.as_ref(), value),
            Condition::Any(conditions) => conditions.iter().any(|c| c.evaluate(value)),
            Condition::All(conditions) => conditions.iter().all(|c| c.evaluate(value)),
            Condition::Not(inner) => !inner.evaluate(value),
        }
    }

    /// Kinds of all non-null operands, in tree order
    pub fn operand_kinds(&self) -> Vec<ScalarKind> {
        let mut kinds = Vec::new();
        self.collect_kinds(&mut kinds);
        kinds
    }

    fn collect_kinds(&self, kinds: &mut Vec<ScalarKind>) {
        match self {
            Condition::Compare { operand, .. } => {
                if let Some(operand) = operand {
                    kinds.push(operand.kind());
                }
            }
            Condition::Any(conditions) | Condition::All(conditions) => {
                for condition in conditions {
                    condition.collect_kinds(kinds);
                }
            }
            Condition::Not(inner) => inner.collect_kinds(kinds),
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn join(f: &mut fmt::Formatter<'_>, items: &[Condition], sep: &str) -> fmt::Result {
            f.write_str("(")?;
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    f.write_str(sep)?;
                }
                write!(f, "{}", item)?;
            }
            f.write_str(")")
        }

        match self {
            Condition::Compare { op, operand } => match operand {
                Some(Scalar::String(s)) => write!(f, "value {} {:?}", op, s),
                Some(operand) => write!(f, "value {} {}", op, operand),
                None => write!(f, "value {} null", op),
            },
            Condition::Any(items) => join(f, items, " || "),
            Condition::All(items) => join(f, items, " && "),
            Condition::Not(inner) => write!(f, "!({})", inner),
        }
    }
}

fn compare(op: Comparison, operand: Option<&Scalar>, value: &FieldValue<'_>) -> bool {
    let Some(operand) = operand else {
        return match op {
            Comparison::Equal => value.is_null(),
            Comparison::NotEqual => !value.is_null(),
            _ => false,
        };
    };

    let ordering = value.compare(&operand.as_field_value());
    match op {
        Comparison::Equal => ordering == Some(Ordering::Equal),
        Comparison::NotEqual => ordering != Some(Ordering::Equal),
        Comparison::LessThan => ordering == Some(Ordering::Less),
        Comparison::GreaterThan => ordering == Some(Ordering::Greater),
        Comparison::LessThanOrEqual => {
            matches!(ordering, Some(Ordering::Less | Ordering::Equal))
        }
        Comparison::GreaterThanOrEqual => {
            matches!(ordering, Some(Ordering::Greater | Ordering::Equal))
        }
        Comparison::Contains | Comparison::StartsWith | Comparison::EndsWith => {
            match (value.as_str(), operand) {
                (Some(text), Scalar::String(needle)) => {
                    let text = text.to_lowercase();
                    let needle = needle.to_lowercase();
                    match op {
                        Comparison::Contains => text.contains(&needle),
                        Comparison::StartsWith => text.starts_with(&needle),
                        _ => text.ends_with(&needle),
                    }
                }
                _ => false,
            }
        }
    }
}
