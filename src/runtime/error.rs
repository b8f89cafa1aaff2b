use thiserror::Error;

pub type EvalResult<T> = Result<T, EvaluationError>;

#[derive(Debug, Error)]
pub enum EvaluationError {
    #[error("Undefined variable '{name}'")]
    UndefinedVariable { name: String },
    #[error("Type error: '{name}' is {found}, not an object")]
    NotAnObject { name: String, found: String },
    #[error("Object '{object}' has no field '{field}'")]
    MissingField { object: String, field: String },
    #[error("Type error: expected number, got {found}")]
    NotANumber { found: String },
    #[error("Type error: cannot apply '{op}' to {left} and {right}")]
    UnsupportedOperands {
        op: &'static str,
        left: String,
        right: String,
    },
    #[error("Cannot write program output: {0}")]
    Output(#[from] std::io::Error),
}
