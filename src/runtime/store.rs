use std::collections::HashMap;

use super::error::{EvalResult, EvaluationError};
use super::value::Value;

/// Identity of a store slot: a top-level variable, or a field inside an object.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VariableKey {
    pub name: String,
    pub is_field: bool,
}

impl VariableKey {
    pub fn variable(name: &str) -> Self {
        Self {
            name: name.to_string(),
            is_field: false,
        }
    }

    pub fn field(name: &str) -> Self {
        Self {
            name: name.to_string(),
            is_field: true,
        }
    }
}

/// The one flat namespace of a program run.
#[derive(Debug, Default)]
pub struct Variables {
    values: HashMap<VariableKey, Value>,
}

impl Variables {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, key: &VariableKey) -> bool {
        self.values.contains_key(key)
    }

    pub fn get(&self, key: &VariableKey) -> EvalResult<&Value> {
        self.values
            .get(key)
            .ok_or_else(|| EvaluationError::UndefinedVariable {
                name: key.name.clone(),
            })
    }

    /// Creates the binding if absent, replaces it otherwise.
    pub fn set(&mut self, key: VariableKey, value: Value) {
        self.values.insert(key, value);
    }

    pub fn get_field(&self, object: &str, field: &VariableKey) -> EvalResult<&Value> {
        match self.get(&VariableKey::variable(object))? {
            Value::Object(fields) => {
                fields.get(field).ok_or_else(|| EvaluationError::MissingField {
                    object: object.to_string(),
                    field: field.name.clone(),
                })
            }
            other => Err(EvaluationError::NotAnObject {
                name: object.to_string(),
                found: other.type_name().to_string(),
            }),
        }
    }

    /// Writes a field in place; the object binding itself is not replaced.
    pub fn set_field(&mut self, object: &str, field: VariableKey, value: Value) -> EvalResult<()> {
        let key = VariableKey::variable(object);
        match self.values.get_mut(&key) {
            Some(Value::Object(fields)) => {
                fields.insert(field, value);
                Ok(())
            }
            Some(other) => Err(EvaluationError::NotAnObject {
                name: object.to_string(),
                found: other.type_name().to_string(),
            }),
            None => Err(EvaluationError::UndefinedVariable {
                name: object.to_string(),
            }),
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Bindings sorted by name.
    pub fn sorted(&self) -> Vec<(&VariableKey, &Value)> {
        let mut entries: Vec<_> = self.values.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries
    }
}
