//! Default values and type hints.
//!
//! Argument values travel through the pipeline as [`serde_json::Value`]. A
//! default is either a plain literal or wrapped in the positional marker
//! (see [`positional`]); the [`TypeHint`] of an optional argument is inferred
//! from the JSON type of its unwrapped default.

use serde_json::Value;
use std::fmt;

/// Coercion applied by the parser to an argument's raw string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeHint {
    Bool,
    Int,
    Float,
    Str,
}

impl TypeHint {
    /// Infers the hint from a runtime value.
    ///
    /// `null`, arrays and objects carry no usable scalar type and yield `None`,
    /// which leaves the argument as an uncoerced string.
    pub fn of(value: &Value) -> Option<TypeHint> {
        match value {
            Value::Bool(_) => Some(TypeHint::Bool),
            Value::Number(n) if n.is_f64() => Some(TypeHint::Float),
            Value::Number(_) => Some(TypeHint::Int),
            Value::String(_) => Some(TypeHint::Str),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }
}

impl fmt::Display for TypeHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeHint::Bool => write!(f, "bool"),
            TypeHint::Int => write!(f, "int"),
            TypeHint::Float => write!(f, "float"),
            TypeHint::Str => write!(f, "str"),
        }
    }
}

/// The default attached to an optional parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum DefaultValue {
    /// Rendered as a `--flag` with this default.
    Literal(Value),
    /// Positional marker: still consumed positionally, zero or one time.
    Positional(Value),
}

impl DefaultValue {
    /// The wrapped value, with the positional marker removed.
    pub fn value(&self) -> &Value {
        match self {
            DefaultValue::Literal(v) | DefaultValue::Positional(v) => v,
        }
    }

    pub fn into_value(self) -> Value {
        match self {
            DefaultValue::Literal(v) | DefaultValue::Positional(v) => v,
        }
    }

    pub fn is_positional(&self) -> bool {
        matches!(self, DefaultValue::Positional(_))
    }
}

/// Wraps a default so that the optional parameter stays positional.
///
/// ```rust
/// use subcmd_dispatch::{positional, DefaultValue, Signature};
///
/// let sig = Signature::new().arg("src").opt("dest", positional("."));
/// assert!(matches!(positional("."), DefaultValue::Positional(_)));
/// # let _ = sig;
/// ```
pub fn positional(value: impl Into<Value>) -> DefaultValue {
    DefaultValue::Positional(value.into())
}

macro_rules! literal_default_from {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for DefaultValue {
                fn from(v: $ty) -> Self {
                    DefaultValue::Literal(Value::from(v))
                }
            }
        )*
    };
}

literal_default_from!(bool, i32, i64, u32, u64, usize, f32, f64, String, &str);

impl From<Value> for DefaultValue {
    fn from(v: Value) -> Self {
        DefaultValue::Literal(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for DefaultValue {
    fn from(v: Option<T>) -> Self {
        DefaultValue::Literal(v.map(Into::into).unwrap_or(Value::Null))
    }
}

/// Formats a value the way it is handed to the parser as a default string.
pub(crate) fn value_to_arg_string(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_type_hint_inference() {
        assert_eq!(TypeHint::of(&json!(false)), Some(TypeHint::Bool));
        assert_eq!(TypeHint::of(&json!(3)), Some(TypeHint::Int));
        assert_eq!(TypeHint::of(&json!(-3)), Some(TypeHint::Int));
        assert_eq!(TypeHint::of(&json!(1.5)), Some(TypeHint::Float));
        assert_eq!(TypeHint::of(&json!("x")), Some(TypeHint::Str));
        assert_eq!(TypeHint::of(&Value::Null), None);
        assert_eq!(TypeHint::of(&json!([1, 2])), None);
    }

    #[test]
    fn test_positional_marker_unwraps() {
        let d = positional(7);
        assert!(d.is_positional());
        assert_eq!(d.value(), &json!(7));

        let d = DefaultValue::from("plain");
        assert!(!d.is_positional());
        assert_eq!(d.into_value(), json!("plain"));
    }

    #[test]
    fn test_option_default_maps_none_to_null() {
        assert_eq!(
            DefaultValue::from(None::<i64>),
            DefaultValue::Literal(Value::Null)
        );
        assert_eq!(DefaultValue::from(Some(2)), DefaultValue::Literal(json!(2)));
    }

    #[test]
    fn test_value_to_arg_string() {
        assert_eq!(value_to_arg_string(&json!("a b")), Some("a b".into()));
        assert_eq!(value_to_arg_string(&json!(false)), Some("false".into()));
        assert_eq!(value_to_arg_string(&json!(2.5)), Some("2.5".into()));
        assert_eq!(value_to_arg_string(&Value::Null), None);
    }
}
