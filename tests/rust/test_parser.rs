//! Parser tests -- statement forms, precedence ladder, error reporting

use kiss_lang::ast::*;
use kiss_lang::lexer::tokens::{Token, TokenType};
use kiss_lang::lexer::Lexer;
use kiss_lang::parser::{ParseError, Parser};

fn parse(source: &str) -> Vec<Statement> {
    let tokens = Lexer::new(source).tokenize().unwrap();
    match Parser::new(tokens).parse().unwrap() {
        Statement::Block { statements } => statements,
        other => panic!("top level should be a block, got {:?}", other),
    }
}

fn parse_err(source: &str) -> ParseError {
    let tokens = Lexer::new(source).tokenize().unwrap();
    Parser::new(tokens).parse().unwrap_err()
}

/// Parses `print <source>` and renders the printed expression.
fn expr(source: &str) -> String {
    match parse(&format!("print {}", source)).remove(0) {
        Statement::Print { expr } => expr.to_string(),
        other => panic!("expected print, got {:?}", other),
    }
}

// ── Program shape ───────────────────────────────────────────

#[test]
fn empty_program_is_empty_block() {
    assert!(parse("").is_empty());
}

#[test]
fn statements_in_order() {
    let stmts = parse("x = 1 print x y = 2");
    assert_eq!(stmts.len(), 3);
    assert_eq!(stmts[0].kind(), "assignment");
    assert_eq!(stmts[1].kind(), "print");
    assert_eq!(stmts[2].kind(), "assignment");
}

#[test]
fn missing_eof_token_is_tolerated() {
    let tokens = vec![
        Token::new(TokenType::Word, "x", 1, 1),
        Token::new(TokenType::Assign, "=", 1, 3),
        Token::new(TokenType::Number, "1", 1, 5),
    ];
    let program = Parser::new(tokens).parse().unwrap();
    assert_eq!(
        program,
        Statement::Block {
            statements: vec![Statement::Assignment {
                name: "x".into(),
                value: Expr::NumberLiteral { value: 1.0 },
            }]
        }
    );
}

#[test]
fn no_tokens_at_all() {
    let program = Parser::new(Vec::new()).parse().unwrap();
    assert_eq!(program, Statement::Block { statements: vec![] });
}

// ── Literals & primaries ────────────────────────────────────

#[test]
fn hex_literal_widens_to_number() {
    let stmts = parse("x = #FF");
    assert_eq!(
        stmts[0],
        Statement::Assignment {
            name: "x".into(),
            value: Expr::NumberLiteral { value: 255.0 },
        }
    );
}

#[test]
fn string_and_bool_literals() {
    assert_eq!(expr("\"hi\""), "\"hi\"");
    assert_eq!(expr("true"), "true");
    assert_eq!(expr("false"), "false");
}

#[test]
fn identifier_is_lazy_variable_reference() {
    // Parsing never consults the store, so unknown names are fine here
    assert_eq!(expr("later"), "later");
}

#[test]
fn field_access() {
    let stmts = parse("print point.x");
    assert_eq!(
        stmts[0],
        Statement::Print {
            expr: Expr::FieldAccess {
                object: "point".into(),
                field: "x".into(),
            }
        }
    );
}

#[test]
fn empty_object_literal() {
    let stmts = parse("p = {}");
    assert_eq!(
        stmts[0],
        Statement::Assignment {
            name: "p".into(),
            value: Expr::ObjectLiteral,
        }
    );
}

// ── Precedence ladder ───────────────────────────────────────

#[test]
fn multiplication_binds_tighter_than_addition() {
    assert_eq!(expr("1 + 2 * 3"), "(1 + (2 * 3))");
}

#[test]
fn comparison_binds_tighter_than_addition() {
    assert_eq!(expr("1 + 2 < 3"), "(1 + (2 < 3))");
    assert_eq!(expr("1 < 2 - 3"), "((1 < 2) - 3)");
}

#[test]
fn multiplication_binds_tighter_than_comparison() {
    assert_eq!(expr("2 * 3 == 6"), "((2 * 3) == 6)");
}

#[test]
fn logic_binds_tighter_than_arithmetic() {
    assert_eq!(expr("1 * 2 && 3"), "(1 * (2 && 3))");
    assert_eq!(expr("1 + a || b"), "(1 + (a || b))");
}

#[test]
fn and_binds_tighter_than_or() {
    assert_eq!(expr("a || b && c"), "(a || (b && c))");
}

#[test]
fn comparisons_left_fold() {
    assert_eq!(expr("1 < 2 < 0"), "((1 < 2) < 0)");
}

#[test]
fn xor_shares_multiplicative_level() {
    assert_eq!(expr("2 ^ 3 * 4"), "((2 ^ 3) * 4)");
    assert_eq!(expr("2 * 3 ^ 4"), "((2 * 3) ^ 4)");
}

#[test]
fn subtraction_is_left_associative() {
    assert_eq!(expr("10 - 3 - 2"), "((10 - 3) - 2)");
}

#[test]
fn parentheses_reset_precedence() {
    assert_eq!(expr("(1 + 2) * 3"), "((1 + 2) * 3)");
}

#[test]
fn double_pipe_chains() {
    assert_eq!(expr("a || b || c"), "((a || b) || c)");
}

#[test]
fn single_pipe_applies_once() {
    assert_eq!(expr("a || b | c"), "((a || b) | c)");
    let err = parse_err("x = 1 | 1 | 1");
    assert_eq!(err.token.token_type, TokenType::Or);
    assert!(err.message.contains("Unknown statement"));
}

#[test]
fn nothing_chains_after_single_pipe() {
    let err = parse_err("x = a | b || c");
    assert_eq!(err.token.token_type, TokenType::Or2);
}

#[test]
fn double_ampersand_chains() {
    assert_eq!(expr("a && b && c"), "((a && b) && c)");
}

#[test]
fn single_ampersand_recurses_into_same_level() {
    assert_eq!(expr("a & b & c"), "(a & (b & c))");
    assert_eq!(expr("a & b && c"), "(a & (b && c))");
    assert_eq!(expr("a && b & c"), "((a && b) & c)");
}

#[test]
fn unary_applies_to_primary_only() {
    assert_eq!(expr("-a && b"), "(-a && b)");
    assert_eq!(expr("!a || b"), "(!a || b)");
    assert_eq!(expr("-(1 + 2)"), "-(1 + 2)");
}

#[test]
fn unary_plus_is_dropped() {
    assert_eq!(expr("+5"), "5");
}

// ── Statements ──────────────────────────────────────────────

#[test]
fn if_without_else() {
    let stmts = parse("if x print 1");
    match &stmts[0] {
        Statement::If {
            condition,
            then_branch,
            else_branch,
        } => {
            assert_eq!(condition, &Expr::Variable { name: "x".into() });
            assert_eq!(then_branch.kind(), "print");
            assert!(else_branch.is_none());
        }
        other => panic!("expected if, got {:?}", other),
    }
}

#[test]
fn if_else_with_blocks() {
    let stmts = parse("if x { a = 1 b = 2 } else { a = 3 }");
    match &stmts[0] {
        Statement::If {
            then_branch,
            else_branch: Some(else_branch),
            ..
        } => {
            match then_branch.as_ref() {
                Statement::Block { statements } => assert_eq!(statements.len(), 2),
                other => panic!("expected block, got {:?}", other),
            }
            assert_eq!(else_branch.kind(), "block");
        }
        other => panic!("expected if/else, got {:?}", other),
    }
}

#[test]
fn else_if_chain_nests() {
    let stmts = parse("if a print 1 else if b print 2 else print 3");
    assert_eq!(stmts.len(), 1);
    match &stmts[0] {
        Statement::If {
            else_branch: Some(else_branch),
            ..
        } => assert_eq!(else_branch.kind(), "if"),
        other => panic!("expected if/else, got {:?}", other),
    }
}

#[test]
fn while_loop() {
    let stmts = parse("while i < 3 i = i + 1");
    match &stmts[0] {
        Statement::While { condition, body } => {
            assert_eq!(condition.to_string(), "(i < 3)");
            assert_eq!(body.kind(), "assignment");
        }
        other => panic!("expected while, got {:?}", other),
    }
}

#[test]
fn for_loop() {
    let stmts = parse("for (i = 0; i < 3; i = i + 1) print i");
    match &stmts[0] {
        Statement::For {
            init,
            condition,
            increment,
            body,
        } => {
            assert_eq!(
                init.as_ref(),
                &Statement::Assignment {
                    name: "i".into(),
                    value: Expr::NumberLiteral { value: 0.0 },
                }
            );
            assert_eq!(condition.to_string(), "(i < 3)");
            assert_eq!(increment.kind(), "assignment");
            assert_eq!(body.kind(), "print");
        }
        other => panic!("expected for, got {:?}", other),
    }
}

#[test]
fn field_assignment() {
    let stmts = parse("p.x = 1");
    assert_eq!(
        stmts[0],
        Statement::FieldAssignment {
            object: "p".into(),
            field: "x".into(),
            value: Expr::NumberLiteral { value: 1.0 },
        }
    );
}

#[test]
fn program_display_is_indented() {
    let program = Parser::new(Lexer::new("while x { x = x - 1 }").tokenize().unwrap())
        .parse()
        .unwrap();
    assert_eq!(
        program.to_string(),
        "{\n  while x\n    {\n      x = (x - 1)\n    }\n}\n"
    );
}

// ── Errors ──────────────────────────────────────────────────

#[test]
fn unclosed_block_reaches_eof() {
    let err = parse_err("if 1 { print 1");
    assert!(err.message.contains("Expected '}'"));
    assert_eq!(err.token.token_type, TokenType::Eof);
}

#[test]
fn unknown_statement() {
    assert!(parse_err("5 = x").message.contains("Unknown statement"));
    assert!(parse_err("x").message.contains("Unknown statement"));
}

#[test]
fn missing_expression() {
    assert!(parse_err("print").message.contains("Unknown expression"));
    assert!(parse_err("x = )").message.contains("Unknown expression"));
}

#[test]
fn missing_close_paren_is_fatal() {
    assert!(parse_err("print (1 + 2").message.contains("Expected ')'"));
}

#[test]
fn for_requires_separators() {
    assert!(parse_err("for (i = 0 i < 3; i = i + 1) print i")
        .message
        .contains("Expected ';'"));
}

#[test]
fn for_init_must_be_assignment() {
    assert!(parse_err("for (print 1; i < 3; i = i + 1) print i")
        .message
        .contains("Unknown statement"));
}

#[test]
fn object_literal_must_be_empty() {
    assert!(parse_err("p = { x }").message.contains("Expected '}'"));
}

#[test]
fn deep_nesting_is_rejected() {
    let source = format!("print {}1{}", "(".repeat(300), ")".repeat(300));
    assert!(parse_err(&source).message.contains("Maximum nesting depth"));
}

#[test]
fn error_display_has_position() {
    let err = parse_err("x = 1\nprint )");
    assert_eq!((err.token.line, err.token.column), (2, 7));
    assert!(err.to_string().starts_with("2:7: "));
}

#[test]
fn long_flat_chains_are_rejected() {
    let long_sum = format!("x = 1{}", " + 1".repeat(100_000));
    assert!(parse_err(&long_sum).message.contains("Maximum nesting depth"));
    let long_product = format!("x = 1{}", " * 1".repeat(100_000));
    assert!(parse_err(&long_product).message.contains("Maximum nesting depth"));
    let long_and = format!("x = 1{}", " && 1".repeat(100_000));
    assert!(parse_err(&long_and).message.contains("Maximum nesting depth"));
}

#[test]
fn chain_depth_is_released_between_statements() {
    let line = format!("x = 1{}\n", " + 1".repeat(200));
    assert_eq!(parse(&line.repeat(10)).len(), 10);
}
