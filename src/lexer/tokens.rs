use std::fmt;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TokenType {
    // Literals
    Number,
    HexNumber,
    StringText,
    Word,

    // Keywords
    Print,
    If,
    Else,
    While,
    For,
    True,
    False,

    // Arithmetic
    Plus,
    Minus,
    Star,
    Slash,
    Pow,

    // Comparison
    Equal,
    LowerThan,
    GreaterThan,
    LowerOrEqual,
    GreaterOrEqual,

    // Logic
    And2,
    Or2,
    And,
    Or,
    Not,

    // Punctuation
    LParen,
    RParen,
    LBrace,
    RBrace,
    Assign,
    ForDelimiter,
    Dot,

    Eof,
}

impl TokenType {
    /// Source spelling for fixed tokens, `None` for literals and words.
    pub fn lexeme(&self) -> Option<&'static str> {
        let s = match self {
            TokenType::Print => "print",
            TokenType::If => "if",
            TokenType::Else => "else",
            TokenType::While => "while",
            TokenType::For => "for",
            TokenType::True => "true",
            TokenType::False => "false",
            TokenType::Plus => "+",
            TokenType::Minus => "-",
            TokenType::Star => "*",
            TokenType::Slash => "/",
            TokenType::Pow => "^",
            TokenType::Equal => "==",
            TokenType::LowerThan => "<",
            TokenType::GreaterThan => ">",
            TokenType::LowerOrEqual => "<=",
            TokenType::GreaterOrEqual => ">=",
            TokenType::And2 => "&&",
            TokenType::Or2 => "||",
            TokenType::And => "&",
            TokenType::Or => "|",
            TokenType::Not => "!",
            TokenType::LParen => "(",
            TokenType::RParen => ")",
            TokenType::LBrace => "{",
            TokenType::RBrace => "}",
            TokenType::Assign => "=",
            TokenType::ForDelimiter => ";",
            TokenType::Dot => ".",
            TokenType::Number
            | TokenType::HexNumber
            | TokenType::StringText
            | TokenType::Word
            | TokenType::Eof => return None,
        };
        Some(s)
    }
}

/// Look up a keyword string and return its TokenType, or None if it's a plain word.
pub fn keyword_type(word: &str) -> Option<TokenType> {
    match word {
        "print" => Some(TokenType::Print),
        "if" => Some(TokenType::If),
        "else" => Some(TokenType::Else),
        "while" => Some(TokenType::While),
        "for" => Some(TokenType::For),
        "true" => Some(TokenType::True),
        "false" => Some(TokenType::False),
        _ => None,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Token {
    pub token_type: TokenType,
    pub value: String,
    pub line: usize,
    pub column: usize,
}

impl Token {
    pub fn new(token_type: TokenType, value: &str, line: usize, column: usize) -> Self {
        Self {
            token_type,
            value: value.to_string(),
            line,
            column,
        }
    }

    /// The end-of-stream sentinel handed out past the end of a token sequence.
    pub fn eof(line: usize, column: usize) -> Self {
        Self::new(TokenType::Eof, "", line, column)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.token_type {
            TokenType::Number | TokenType::HexNumber | TokenType::StringText | TokenType::Word => {
                write!(
                    f,
                    "Token({:?}, {:?}, {}:{})",
                    self.token_type, self.value, self.line, self.column
                )
            }
            _ => write!(f, "Token({:?}, {}:{})", self.token_type, self.line, self.column),
        }
    }
}
