pub mod error;
pub mod store;
pub mod value;

use std::io::Write;

use crate::ast::*;

pub use error::{EvalResult, EvaluationError};
pub use store::{VariableKey, Variables};
pub use value::{Fields, Value};

/// Executes one program against its own store, printing to `out`.
pub struct Interpreter<W: Write> {
    variables: Variables,
    out: W,
}

impl<W: Write> Interpreter<W> {
    pub fn new(out: W) -> Self {
        Self {
            variables: Variables::new(),
            out,
        }
    }

    pub fn variables(&self) -> &Variables {
        &self.variables
    }

    pub fn output(&self) -> &W {
        &self.out
    }

    pub fn into_output(self) -> W {
        self.out
    }

    // ── Statement execution ─────────────────────────────────────────────

    pub fn execute(&mut self, stmt: &Statement) -> EvalResult<()> {
        tracing::trace!(kind = stmt.kind(), "execute");
        match stmt {
            Statement::Print { expr } => {
                let val = self.eval(expr)?;
                write!(self.out, "{}", val)?;
                self.out.flush()?;
            }
            Statement::Assignment { name, value } => {
                let val = self.eval(value)?;
                self.variables.set(VariableKey::variable(name), val);
            }
            Statement::FieldAssignment {
                object,
                field,
                value,
            } => {
                let val = self.eval(value)?;
                self.variables
                    .set_field(object, VariableKey::field(field), val)?;
            }
            Statement::Block { statements } => {
                for stmt in statements {
                    self.execute(stmt)?;
                }
            }
            Statement::If {
                condition,
                then_branch,
                else_branch,
            } => {
                if self.eval(condition)?.is_truthy() {
                    self.execute(then_branch)?;
                } else if let Some(else_branch) = else_branch {
                    self.execute(else_branch)?;
                }
            }
            Statement::While { condition, body } => {
                while self.eval(condition)?.is_truthy() {
                    self.execute(body)?;
                }
            }
            Statement::For {
                init,
                condition,
                increment,
                body,
            } => {
                self.execute(init)?;
                while self.eval(condition)?.is_truthy() {
                    self.execute(body)?;
                    self.execute(increment)?;
                }
            }
        }
        Ok(())
    }

    // ── Expression evaluation ───────────────────────────────────────────

    pub fn eval(&self, expr: &Expr) -> EvalResult<Value> {
        match expr {
            Expr::NumberLiteral { value } => Ok(Value::Number(*value)),
            Expr::StringLiteral { value } => Ok(Value::Str(value.clone())),
            Expr::BoolLiteral { value } => Ok(Value::Bool(*value)),
            Expr::ObjectLiteral => Ok(Value::Object(Fields::new())),
            Expr::Variable { name } => self.variables.get(&VariableKey::variable(name)).cloned(),
            Expr::FieldAccess { object, field } => self
                .variables
                .get_field(object, &VariableKey::field(field))
                .cloned(),
            Expr::Unary { op, operand } => {
                let val = self.eval(operand)?;
                match op {
                    UnaryOp::Negate => Ok(Value::Number(-val.as_double()?)),
                    UnaryOp::Not => Ok(Value::truth(!val.is_truthy())),
                }
            }
            Expr::Binary { op, left, right } => {
                let l = self.eval(left)?;
                let r = self.eval(right)?;
                eval_binary(*op, &l, &r)
            }
            Expr::Conditional { op, left, right } => {
                let l = self.eval(left)?;
                let r = self.eval(right)?;
                eval_conditional(*op, &l, &r)
            }
            Expr::Logical { op, left, right } => {
                let l = self.eval(left)?.is_truthy();
                let result = match op {
                    LogicalOp::And => l && self.eval(right)?.is_truthy(),
                    LogicalOp::Or => l || self.eval(right)?.is_truthy(),
                    LogicalOp::BitAnd => {
                        let r = self.eval(right)?.is_truthy();
                        l & r
                    }
                    LogicalOp::BitOr => {
                        let r = self.eval(right)?.is_truthy();
                        l | r
                    }
                };
                Ok(Value::truth(result))
            }
        }
    }
}

/// `+` concatenates when either side is a string; everything else is numeric.
fn eval_binary(op: BinaryOp, left: &Value, right: &Value) -> EvalResult<Value> {
    if op == BinaryOp::Add && (matches!(left, Value::Str(_)) || matches!(right, Value::Str(_))) {
        return Ok(Value::Str(format!("{}{}", left, right)));
    }
    if !left.can_be_represented_as_number() || !right.can_be_represented_as_number() {
        return Err(unsupported(op.symbol(), left, right));
    }

    let a = left.as_double()?;
    let b = right.as_double()?;
    let result = match op {
        BinaryOp::Add => a + b,
        BinaryOp::Subtract => a - b,
        BinaryOp::Multiply => a * b,
        BinaryOp::Divide => a / b,
        BinaryOp::Xor => ((a as i64) ^ (b as i64)) as f64,
    };
    Ok(Value::Number(result))
}

/// Two strings compare as text; any other pair must be numeric on both sides.
fn eval_conditional(op: CompareOp, left: &Value, right: &Value) -> EvalResult<Value> {
    let result = match (left, right) {
        (Value::Str(a), Value::Str(b)) => compare(op, a.as_str(), b.as_str()),
        _ if left.can_be_represented_as_number() && right.can_be_represented_as_number() => {
            compare(op, &left.as_double()?, &right.as_double()?)
        }
        _ => return Err(unsupported(op.symbol(), left, right)),
    };
    Ok(Value::truth(result))
}

fn compare<T: PartialOrd + ?Sized>(op: CompareOp, a: &T, b: &T) -> bool {
    match op {
        CompareOp::Equal => a == b,
        CompareOp::Lower => a < b,
        CompareOp::Greater => a > b,
        CompareOp::LowerOrEqual => a <= b,
        CompareOp::GreaterOrEqual => a >= b,
    }
}

fn unsupported(op: &'static str, left: &Value, right: &Value) -> EvaluationError {
    EvaluationError::UnsupportedOperands {
        op,
        left: left.type_name().to_string(),
        right: right.type_name().to_string(),
    }
}
