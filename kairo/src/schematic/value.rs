use super::types::TypeValue;

use std::fmt;

/// A concrete attribute value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Value {
    Bool(bool),
    Int(i64),
    String(String),
    Array(Vec<Value>),
}

impl Value {
    /// Returns the type of this value, or `None` for an array whose element type can't be
    /// determined (empty) or isn't uniform.
    pub fn type_value(&self) -> Option<TypeValue> {
        match self {
            Value::Bool(_) => Some(TypeValue::Bool),
            Value::Int(_) => Some(TypeValue::Int),
            Value::String(_) => Some(TypeValue::String),
            Value::Array(elements) => {
                let mut element_types = elements.iter().map(Value::type_value);
                let first = element_types.next()??;
                for t in element_types {
                    if t? != first {
                        return None;
                    }
                }
                Some(TypeValue::Array(Box::new(first)))
            }
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match *self {
            Value::Bool(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match *self {
            Value::Int(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(value) => Some(value),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(value) => write!(f, "{}", value),
            Value::Int(value) => write!(f, "{}", value),
            Value::String(value) => write!(f, "{:?}", value),
            Value::Array(elements) => {
                write!(f, "[")?;
                for (i, element) in elements.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", element)?;
                }
                write!(f, "]")
            }
        }
    }
}
