use std::fmt;

use serde::Serialize;

// ── Operators ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BinaryOp {
    Add,
    Subtract,
    Multiply,
    Divide,
    /// `^`: bitwise xor over the integer parts, not exponentiation.
    Xor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CompareOp {
    Equal,
    Lower,
    Greater,
    LowerOrEqual,
    GreaterOrEqual,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LogicalOp {
    /// `&&`, short-circuits
    And,
    /// `||`, short-circuits
    Or,
    /// `&`, evaluates both sides
    BitAnd,
    /// `|`, evaluates both sides
    BitOr,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum UnaryOp {
    Negate,
    Not,
}

impl BinaryOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Subtract => "-",
            BinaryOp::Multiply => "*",
            BinaryOp::Divide => "/",
            BinaryOp::Xor => "^",
        }
    }
}

impl CompareOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            CompareOp::Equal => "==",
            CompareOp::Lower => "<",
            CompareOp::Greater => ">",
            CompareOp::LowerOrEqual => "<=",
            CompareOp::GreaterOrEqual => ">=",
        }
    }
}

impl LogicalOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            LogicalOp::And => "&&",
            LogicalOp::Or => "||",
            LogicalOp::BitAnd => "&",
            LogicalOp::BitOr => "|",
        }
    }
}

impl UnaryOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            UnaryOp::Negate => "-",
            UnaryOp::Not => "!",
        }
    }
}

// ── Expressions ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Expr {
    NumberLiteral {
        value: f64,
    },
    StringLiteral {
        value: String,
    },
    BoolLiteral {
        value: bool,
    },
    /// `{}`: a fresh object with no fields.
    ObjectLiteral,
    /// Resolved against the store when evaluated, not when parsed.
    Variable {
        name: String,
    },
    FieldAccess {
        object: String,
        field: String,
    },
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Conditional {
        op: CompareOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Logical {
        op: LogicalOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
}

impl Expr {
    pub fn binary(op: BinaryOp, left: Expr, right: Expr) -> Self {
        Expr::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn conditional(op: CompareOp, left: Expr, right: Expr) -> Self {
        Expr::Conditional {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn logical(op: LogicalOp, left: Expr, right: Expr) -> Self {
        Expr::Logical {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn unary(op: UnaryOp, operand: Expr) -> Self {
        Expr::Unary {
            op,
            operand: Box::new(operand),
        }
    }
}

/// Fully parenthesised rendering, so the tree shape is visible in one line.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::NumberLiteral { value } => write!(f, "{}", value),
            Expr::StringLiteral { value } => write!(f, "{:?}", value),
            Expr::BoolLiteral { value } => write!(f, "{}", value),
            Expr::ObjectLiteral => write!(f, "{{}}"),
            Expr::Variable { name } => write!(f, "{}", name),
            Expr::FieldAccess { object, field } => write!(f, "{}.{}", object, field),
            Expr::Unary { op, operand } => write!(f, "{}{}", op.symbol(), operand),
            Expr::Binary { op, left, right } => {
                write!(f, "({} {} {})", left, op.symbol(), right)
            }
            Expr::Conditional { op, left, right } => {
                write!(f, "({} {} {})", left, op.symbol(), right)
            }
            Expr::Logical { op, left, right } => {
                write!(f, "({} {} {})", left, op.symbol(), right)
            }
        }
    }
}

// ── Statements ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Statement {
    Print {
        expr: Expr,
    },
    Assignment {
        name: String,
        value: Expr,
    },
    FieldAssignment {
        object: String,
        field: String,
        value: Expr,
    },
    Block {
        statements: Vec<Statement>,
    },
    If {
        condition: Expr,
        then_branch: Box<Statement>,
        else_branch: Option<Box<Statement>>,
    },
    While {
        condition: Expr,
        body: Box<Statement>,
    },
    For {
        init: Box<Statement>,
        condition: Expr,
        increment: Box<Statement>,
        body: Box<Statement>,
    },
}

impl Statement {
    pub fn kind(&self) -> &'static str {
        match self {
            Statement::Print { .. } => "print",
            Statement::Assignment { .. } => "assignment",
            Statement::FieldAssignment { .. } => "field assignment",
            Statement::Block { .. } => "block",
            Statement::If { .. } => "if",
            Statement::While { .. } => "while",
            Statement::For { .. } => "for",
        }
    }

    fn write_indented(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        let pad = "  ".repeat(depth);
        match self {
            Statement::Print { expr } => writeln!(f, "{}print {}", pad, expr),
            Statement::Assignment { name, value } => writeln!(f, "{}{} = {}", pad, name, value),
            Statement::FieldAssignment {
                object,
                field,
                value,
            } => writeln!(f, "{}{}.{} = {}", pad, object, field, value),
            Statement::Block { statements } => {
                writeln!(f, "{}{{", pad)?;
                for stmt in statements {
                    stmt.write_indented(f, depth + 1)?;
                }
                writeln!(f, "{}}}", pad)
            }
            Statement::If {
                condition,
                then_branch,
                else_branch,
            } => {
                writeln!(f, "{}if {}", pad, condition)?;
                then_branch.write_indented(f, depth + 1)?;
                if let Some(else_branch) = else_branch {
                    writeln!(f, "{}else", pad)?;
                    else_branch.write_indented(f, depth + 1)?;
                }
                Ok(())
            }
            Statement::While { condition, body } => {
                writeln!(f, "{}while {}", pad, condition)?;
                body.write_indented(f, depth + 1)
            }
            Statement::For {
                init,
                condition,
                increment,
                body,
            } => {
                writeln!(f, "{}for", pad)?;
                init.write_indented(f, depth + 1)?;
                writeln!(f, "{}  ; {}", pad, condition)?;
                increment.write_indented(f, depth + 1)?;
                body.write_indented(f, depth + 1)
            }
        }
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_indented(f, 0)
    }
}
