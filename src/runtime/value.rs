use std::collections::BTreeMap;
use std::fmt;

use super::error::{EvalResult, EvaluationError};
use super::store::VariableKey;

/// Field map owned by an object value. Keys are always field keys.
pub type Fields = BTreeMap<VariableKey, Value>;

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Number(f64),
    Str(String),
    Bool(bool),
    Object(Fields),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => {
                if n.is_finite() && n.fract() == 0.0 {
                    write!(f, "{:.1}", n)
                } else {
                    write!(f, "{}", n)
                }
            }
            Value::Str(s) => write!(f, "{}", s),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Object(fields) => {
                write!(f, "{{")?;
                for (i, (k, v)) in fields.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", k.name, v)?;
                }
                write!(f, "}}")
            }
        }
    }
}

impl Value {
    /// Comparison and logic results: `1.0` for true, `0.0` for false.
    pub fn truth(b: bool) -> Self {
        Value::Number(if b { 1.0 } else { 0.0 })
    }

    pub fn as_double(&self) -> EvalResult<f64> {
        match self {
            Value::Number(n) => Ok(*n),
            _ => Err(EvaluationError::NotANumber {
                found: self.type_name().to_string(),
            }),
        }
    }

    pub fn as_string(&self) -> String {
        self.to_string()
    }

    pub fn can_be_represented_as_number(&self) -> bool {
        matches!(self, Value::Number(_))
    }

    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Number(n) => *n != 0.0,
            Value::Bool(b) => *b,
            Value::Str(_) | Value::Object(_) => false,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Number(_) => "Number",
            Value::Str(_) => "String",
            Value::Bool(_) => "Bool",
            Value::Object(_) => "Object",
        }
    }
}
