//! KISS: a small imperative scripting language.
//!
//! The pipeline is `tokenize` -> `parse` -> `Interpreter::execute`, with
//! [`run`] composing all three stages over one fresh variable store.

pub mod ast;
pub mod lexer;
pub mod parser;
pub mod runtime;

use std::io::Write;

use thiserror::Error;

use ast::Statement;
use lexer::tokens::Token;
use lexer::{LexError, Lexer};
use parser::{ParseError, Parser};
use runtime::{EvaluationError, Interpreter};

#[derive(Debug, Error)]
pub enum Error {
    #[error("Lexer error: {0}")]
    Lex(#[from] LexError),
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),
    #[error("Runtime error: {0}")]
    Evaluation(#[from] EvaluationError),
}

pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(source).tokenize()
}

/// Parses a token sequence into the top-level program block.
pub fn parse(tokens: Vec<Token>) -> Result<Statement, ParseError> {
    Parser::new(tokens).parse()
}

/// Runs `source` to completion and hands back the interpreter, so callers can
/// inspect the final store or recover the output sink.
pub fn run<W: Write>(source: &str, out: W) -> Result<Interpreter<W>, Error> {
    let program = parse(tokenize(source)?)?;
    let mut interpreter = Interpreter::new(out);
    tracing::debug!("run started");
    interpreter.execute(&program)?;
    tracing::debug!(
        variables = interpreter.variables().len(),
        "run finished"
    );
    Ok(interpreter)
}
