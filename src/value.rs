//! # Values
//!
//! The dynamic datum carried by member slots, constructor arguments and
//! method results.

use std::fmt;

/// A dynamically typed value.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<Value>),
}

impl Value {
    /// Short name of the variant, used in mismatch errors.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "str",
            Value::List(_) => "list",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Str(s) => f.write_str(s),
            Value::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
        }
    }
}

/// Conversion out of a [`Value`] failed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValueError {
    #[error("expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },
}

// =============================================================================
// Conversions
// =============================================================================

macro_rules! impl_value_conversions {
    ($($ty:ty => $variant:ident, $kind:literal);* $(;)?) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self { Value::$variant(v.into()) }
            }

            impl TryFrom<Value> for $ty {
                type Error = ValueError;

                fn try_from(v: Value) -> Result<Self, Self::Error> {
                    match v {
                        Value::$variant(inner) => Ok(inner),
                        other => Err(ValueError::TypeMismatch {
                            expected: $kind,
                            found: other.kind(),
                        }),
                    }
                }
            }
        )*
    };
}

impl_value_conversions! {
    bool => Bool, "bool";
    i64 => Int, "int";
    f64 => Float, "float";
    String => Str, "str";
    Vec<Value> => List, "list";
}

impl From<i32> for Value {
    fn from(v: i32) -> Self { Value::Int(v.into()) }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self { Value::Str(v.to_owned()) }
}

impl From<()> for Value {
    fn from(_: ()) -> Self { Value::Null }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

/// Read positional argument `index` as a `T`, falling back to
/// `T::default()` when the argument is absent.
///
/// Used by `#[derive(Composable)]` initializers.
pub fn positional<T>(args: &[Value], index: usize) -> Result<T, ValueError>
where
    T: TryFrom<Value, Error = ValueError> + Default,
{
    match args.get(index) {
        Some(v) => T::try_from(v.clone()),
        None => Ok(T::default()),
    }
}
