use crate::ast::*;
use crate::lexer::tokens::{Token, TokenType};
use thiserror::Error;

#[derive(Debug, Error)]
#[error("{}:{}: {}", .token.line, .token.column, .message)]
pub struct ParseError {
    pub message: String,
    /// The token the parser was looking at when it gave up.
    pub token: Token,
}

const MAX_PARSER_DEPTH: usize = 256;

pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    eof: Token,
    depth: usize,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        let eof = match tokens.last() {
            Some(last) => Token::eof(last.line, last.column),
            None => Token::eof(1, 1),
        };
        Self {
            tokens,
            pos: 0,
            eof,
            depth: 0,
        }
    }

    fn enter_depth(&mut self) -> Result<(), ParseError> {
        self.depth += 1;
        if self.depth > MAX_PARSER_DEPTH {
            Err(self.error(format!(
                "Maximum nesting depth ({}) exceeded",
                MAX_PARSER_DEPTH
            )))
        } else {
            Ok(())
        }
    }

    fn exit_depth(&mut self) {
        self.depth -= 1;
    }

    // ── Public API ──────────────────────────────────────────────────────

    /// Parses the whole token stream into one top-level block.
    pub fn parse(&mut self) -> Result<Statement, ParseError> {
        let mut statements = Vec::new();
        while !self.eat(TokenType::Eof) {
            statements.push(self.parse_statement()?);
        }
        tracing::debug!(statements = statements.len(), "parsed program");
        Ok(Statement::Block { statements })
    }

    // ── Statements ──────────────────────────────────────────────────────

    fn parse_block(&mut self) -> Result<Statement, ParseError> {
        self.expect(TokenType::LBrace)?;
        let mut statements = Vec::new();
        while !self.eat(TokenType::RBrace) {
            if self.check(TokenType::Eof) {
                return Err(self.error("Expected '}', but found end of file".to_string()));
            }
            statements.push(self.parse_statement()?);
        }
        Ok(Statement::Block { statements })
    }

    fn parse_block_or_single(&mut self) -> Result<Statement, ParseError> {
        if self.check(TokenType::LBrace) {
            return self.parse_block();
        }
        self.parse_statement()
    }

    fn parse_statement(&mut self) -> Result<Statement, ParseError> {
        self.enter_depth()?;
        let result = self.parse_statement_inner();
        self.exit_depth();
        result
    }

    fn parse_statement_inner(&mut self) -> Result<Statement, ParseError> {
        if self.eat(TokenType::Print) {
            let expr = self.parse_expression()?;
            return Ok(Statement::Print { expr });
        }
        if self.eat(TokenType::If) {
            return self.parse_if_else();
        }
        if self.eat(TokenType::While) {
            return self.parse_while();
        }
        if self.eat(TokenType::For) {
            return self.parse_for();
        }
        self.parse_assignment()
    }

    fn parse_assignment(&mut self) -> Result<Statement, ParseError> {
        if self.peek_type(0) == TokenType::Word && self.peek_type(1) == TokenType::Assign {
            let name = self.advance().value.clone();
            self.advance(); // =
            let value = self.parse_expression()?;
            return Ok(Statement::Assignment { name, value });
        }

        if self.peek_type(0) == TokenType::Word
            && self.peek_type(1) == TokenType::Dot
            && self.peek_type(2) == TokenType::Word
            && self.peek_type(3) == TokenType::Assign
        {
            let object = self.advance().value.clone();
            self.advance(); // .
            let field = self.advance().value.clone();
            self.advance(); // =
            let value = self.parse_expression()?;
            return Ok(Statement::FieldAssignment {
                object,
                field,
                value,
            });
        }

        let tok = self.current();
        Err(self.error(format!(
            "Unknown statement starting with {:?} ({:?})",
            tok.token_type, tok.value
        )))
    }

    fn parse_if_else(&mut self) -> Result<Statement, ParseError> {
        let condition = self.parse_expression()?;
        let then_branch = self.parse_block_or_single()?;
        let else_branch = if self.eat(TokenType::Else) {
            Some(Box::new(self.parse_block_or_single()?))
        } else {
            None
        };
        Ok(Statement::If {
            condition,
            then_branch: Box::new(then_branch),
            else_branch,
        })
    }

    fn parse_while(&mut self) -> Result<Statement, ParseError> {
        let condition = self.parse_expression()?;
        let body = self.parse_block_or_single()?;
        Ok(Statement::While {
            condition,
            body: Box::new(body),
        })
    }

    fn parse_for(&mut self) -> Result<Statement, ParseError> {
        self.expect(TokenType::LParen)?;
        let init = self.parse_assignment()?;
        self.expect(TokenType::ForDelimiter)?;
        let condition = self.parse_expression()?;
        self.expect(TokenType::ForDelimiter)?;
        let increment = self.parse_assignment()?;
        self.expect(TokenType::RParen)?;
        let body = self.parse_block_or_single()?;
        Ok(Statement::For {
            init: Box::new(init),
            condition,
            increment: Box::new(increment),
            body: Box::new(body),
        })
    }

    // ── Expressions (loosest to tightest) ───────────────────────────────
    //
    // additive > comparison > multiplicative > logical or > logical and > unary.
    // Comparisons bind tighter than `+`/`-` and logic binds tighter than
    // arithmetic; existing programs depend on this ordering.

    fn parse_expression(&mut self) -> Result<Expr, ParseError> {
        self.enter_depth()?;
        let result = self.parse_additive();
        self.exit_depth();
        result
    }

    // Every operator folded into a left-deep chain costs one depth level, so a
    // long flat chain is bounded like nested parentheses.

    fn parse_additive(&mut self) -> Result<Expr, ParseError> {
        let depth = self.depth;
        let mut left = self.parse_comparison()?;
        loop {
            let op = match self.current().token_type {
                TokenType::Plus => BinaryOp::Add,
                TokenType::Minus => BinaryOp::Subtract,
                _ => break,
            };
            self.advance();
            self.enter_depth()?;
            let right = self.parse_comparison()?;
            left = Expr::binary(op, left, right);
        }
        self.depth = depth;
        Ok(left)
    }

    /// Left fold: `a < b < c` is `(a < b) < c`.
    fn parse_comparison(&mut self) -> Result<Expr, ParseError> {
        let depth = self.depth;
        let mut left = self.parse_multiplicative()?;
        loop {
            let op = match self.current().token_type {
                TokenType::Equal => CompareOp::Equal,
                TokenType::LowerThan => CompareOp::Lower,
                TokenType::GreaterThan => CompareOp::Greater,
                TokenType::LowerOrEqual => CompareOp::LowerOrEqual,
                TokenType::GreaterOrEqual => CompareOp::GreaterOrEqual,
                _ => break,
            };
            self.advance();
            self.enter_depth()?;
            let right = self.parse_multiplicative()?;
            left = Expr::conditional(op, left, right);
        }
        self.depth = depth;
        Ok(left)
    }

    fn parse_multiplicative(&mut self) -> Result<Expr, ParseError> {
        let depth = self.depth;
        let mut left = self.parse_logical_or()?;
        loop {
            let op = match self.current().token_type {
                TokenType::Star => BinaryOp::Multiply,
                TokenType::Pow => BinaryOp::Xor,
                TokenType::Slash => BinaryOp::Divide,
                _ => break,
            };
            self.advance();
            self.enter_depth()?;
            let right = self.parse_logical_or()?;
            left = Expr::binary(op, left, right);
        }
        self.depth = depth;
        Ok(left)
    }

    /// `||` chains; a single `|` is applied at most once and ends the level.
    fn parse_logical_or(&mut self) -> Result<Expr, ParseError> {
        let depth = self.depth;
        let mut left = self.parse_logical_and()?;
        loop {
            if self.eat(TokenType::Or2) {
                self.enter_depth()?;
                let right = self.parse_logical_and()?;
                left = Expr::logical(LogicalOp::Or, left, right);
                continue;
            }
            if self.eat(TokenType::Or) {
                let right = self.parse_logical_and()?;
                left = Expr::logical(LogicalOp::BitOr, left, right);
            }
            break;
        }
        self.depth = depth;
        Ok(left)
    }

    /// `&&` chains; a single `&` is applied at most once and its right side
    /// re-enters this same level.
    fn parse_logical_and(&mut self) -> Result<Expr, ParseError> {
        let depth = self.depth;
        let mut left = self.parse_unary()?;
        loop {
            if self.eat(TokenType::And2) {
                self.enter_depth()?;
                let right = self.parse_unary()?;
                left = Expr::logical(LogicalOp::And, left, right);
                continue;
            }
            if self.eat(TokenType::And) {
                self.enter_depth()?;
                let right = self.parse_logical_and()?;
                left = Expr::logical(LogicalOp::BitAnd, left, right);
            }
            break;
        }
        self.depth = depth;
        Ok(left)
    }

    fn parse_unary(&mut self) -> Result<Expr, ParseError> {
        if self.eat(TokenType::Minus) {
            return Ok(Expr::unary(UnaryOp::Negate, self.parse_primary()?));
        }
        if self.eat(TokenType::Plus) {
            return self.parse_primary();
        }
        if self.eat(TokenType::Not) {
            return Ok(Expr::unary(UnaryOp::Not, self.parse_primary()?));
        }
        self.parse_primary()
    }

    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        let tok = self.current().clone();

        match tok.token_type {
            TokenType::Number => {
                self.advance();
                let value: f64 = tok.value.parse().map_err(|_| ParseError {
                    message: format!("Invalid number literal: {}", tok.value),
                    token: tok.clone(),
                })?;
                Ok(Expr::NumberLiteral { value })
            }
            TokenType::HexNumber => {
                self.advance();
                let value = i64::from_str_radix(&tok.value, 16).map_err(|_| ParseError {
                    message: format!("Invalid hex literal: #{}", tok.value),
                    token: tok.clone(),
                })?;
                Ok(Expr::NumberLiteral {
                    value: value as f64,
                })
            }
            TokenType::Word => {
                self.advance();
                if self.eat(TokenType::Dot) {
                    let field = self.expect(TokenType::Word)?.value.clone();
                    return Ok(Expr::FieldAccess {
                        object: tok.value,
                        field,
                    });
                }
                Ok(Expr::Variable { name: tok.value })
            }
            TokenType::StringText => {
                self.advance();
                Ok(Expr::StringLiteral { value: tok.value })
            }
            TokenType::True => {
                self.advance();
                Ok(Expr::BoolLiteral { value: true })
            }
            TokenType::False => {
                self.advance();
                Ok(Expr::BoolLiteral { value: false })
            }
            TokenType::LBrace => {
                self.advance();
                self.expect(TokenType::RBrace)?;
                Ok(Expr::ObjectLiteral)
            }
            TokenType::LParen => {
                self.advance();
                let expr = self.parse_expression()?;
                self.expect(TokenType::RParen)?;
                Ok(expr)
            }
            _ => Err(ParseError {
                message: format!(
                    "Unknown expression, found {:?} ({:?})",
                    tok.token_type, tok.value
                ),
                token: tok,
            }),
        }
    }

    // ── Token stream helpers ────────────────────────────────────────────

    /// Never fails: past the end of the stream this is the EOF sentinel.
    fn current(&self) -> &Token {
        self.tokens.get(self.pos).unwrap_or(&self.eof)
    }

    fn peek_type(&self, offset: usize) -> TokenType {
        self.tokens
            .get(self.pos + offset)
            .map_or(TokenType::Eof, |t| t.token_type)
    }

    fn advance(&mut self) -> &Token {
        let pos = self.pos;
        self.pos += 1;
        self.tokens.get(pos).unwrap_or(&self.eof)
    }

    fn check(&self, token_type: TokenType) -> bool {
        self.current().token_type == token_type
    }

    fn eat(&mut self, token_type: TokenType) -> bool {
        if self.check(token_type) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, token_type: TokenType) -> Result<&Token, ParseError> {
        if !self.check(token_type) {
            let tok = self.current();
            let expected = token_type
                .lexeme()
                .map_or_else(|| format!("{:?}", token_type), |s| format!("'{}'", s));
            return Err(self.error(format!(
                "Expected {}, got {:?} ({:?})",
                expected, tok.token_type, tok.value
            )));
        }
        Ok(self.advance())
    }

    fn error(&self, message: String) -> ParseError {
        ParseError {
            message,
            token: self.current().clone(),
        }
    }
}
