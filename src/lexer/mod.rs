pub mod tokens;

use thiserror::Error;
use tokens::{keyword_type, Token, TokenType};

#[derive(Debug, Error)]
#[error("{line}:{column}: {message}")]
pub struct LexError {
    pub message: String,
    pub line: usize,
    pub column: usize,
}

pub struct Lexer {
    source: Vec<char>,
    pos: usize,
    line: usize,
    column: usize,
    tokens: Vec<Token>,
}

impl Lexer {
    pub fn new(source: &str) -> Self {
        Self {
            source: source.chars().collect(),
            pos: 0,
            line: 1,
            column: 1,
            tokens: Vec::new(),
        }
    }

    pub fn tokenize(mut self) -> Result<Vec<Token>, LexError> {
        loop {
            self.skip_trivia()?;
            if self.at_end() {
                break;
            }
            self.scan_token()?;
        }

        self.tokens.push(Token::eof(self.line, self.column));
        tracing::debug!(tokens = self.tokens.len(), "tokenized source");
        Ok(self.tokens)
    }

    /// Skips whitespace, `//` line comments and `/* */` block comments.
    fn skip_trivia(&mut self) -> Result<(), LexError> {
        while !self.at_end() {
            let ch = self.peek();
            if ch.is_whitespace() {
                self.advance();
            } else if ch == '/' && self.peek_ahead(1) == Some('/') {
                while !self.at_end() && self.peek() != '\n' {
                    self.advance();
                }
            } else if ch == '/' && self.peek_ahead(1) == Some('*') {
                self.skip_block_comment()?;
            } else {
                break;
            }
        }
        Ok(())
    }

    fn skip_block_comment(&mut self) -> Result<(), LexError> {
        let (line, column) = (self.line, self.column);
        self.advance();
        self.advance();
        loop {
            if self.at_end() {
                return Err(LexError {
                    message: "Unterminated block comment".to_string(),
                    line,
                    column,
                });
            }
            if self.peek() == '*' && self.peek_ahead(1) == Some('/') {
                self.advance();
                self.advance();
                return Ok(());
            }
            self.advance();
        }
    }

    fn scan_token(&mut self) -> Result<(), LexError> {
        let ch = self.peek();

        if ch == '"' {
            return self.scan_string();
        }
        if ch.is_ascii_digit() {
            return self.scan_number();
        }
        if ch == '#' {
            return self.scan_hex_number();
        }
        if ch.is_alphabetic() || ch == '_' {
            return self.scan_word();
        }

        // Two-character operators
        let double = match (ch, self.peek_ahead(1)) {
            ('=', Some('=')) => Some(TokenType::Equal),
            ('<', Some('=')) => Some(TokenType::LowerOrEqual),
            ('>', Some('=')) => Some(TokenType::GreaterOrEqual),
            ('&', Some('&')) => Some(TokenType::And2),
            ('|', Some('|')) => Some(TokenType::Or2),
            _ => None,
        };
        if let Some(tt) = double {
            let text: String = self.source[self.pos..self.pos + 2].iter().collect();
            self.push(tt, &text);
            self.advance();
            self.advance();
            return Ok(());
        }

        // Single-character tokens
        let single = match ch {
            '+' => Some(TokenType::Plus),
            '-' => Some(TokenType::Minus),
            '*' => Some(TokenType::Star),
            '/' => Some(TokenType::Slash),
            '^' => Some(TokenType::Pow),
            '<' => Some(TokenType::LowerThan),
            '>' => Some(TokenType::GreaterThan),
            '&' => Some(TokenType::And),
            '|' => Some(TokenType::Or),
            '!' => Some(TokenType::Not),
            '(' => Some(TokenType::LParen),
            ')' => Some(TokenType::RParen),
            '{' => Some(TokenType::LBrace),
            '}' => Some(TokenType::RBrace),
            '=' => Some(TokenType::Assign),
            ';' => Some(TokenType::ForDelimiter),
            '.' => Some(TokenType::Dot),
            _ => None,
        };

        if let Some(tt) = single {
            self.push(tt, &ch.to_string());
            self.advance();
            return Ok(());
        }

        Err(self.error(format!("Unexpected character: {:?}", ch)))
    }

    fn scan_string(&mut self) -> Result<(), LexError> {
        let start_line = self.line;
        let start_col = self.column;
        self.advance(); // opening quote
        let mut chars = String::new();

        while !self.at_end() && self.peek() != '"' {
            if self.peek() == '\\' {
                self.advance();
                if self.at_end() {
                    break;
                }
                match self.peek() {
                    'n' => chars.push('\n'),
                    't' => chars.push('\t'),
                    '\\' => chars.push('\\'),
                    '"' => chars.push('"'),
                    other => {
                        chars.push('\\');
                        chars.push(other);
                    }
                }
            } else {
                chars.push(self.peek());
            }
            self.advance();
        }

        if self.at_end() {
            return Err(LexError {
                message: "Unterminated string literal".to_string(),
                line: start_line,
                column: start_col,
            });
        }

        self.advance(); // closing quote
        self.tokens.push(Token {
            token_type: TokenType::StringText,
            value: chars,
            line: start_line,
            column: start_col,
        });
        Ok(())
    }

    fn scan_number(&mut self) -> Result<(), LexError> {
        let start_col = self.column;
        let mut digits = String::new();
        let mut seen_dot = false;

        while !self.at_end() && (self.peek().is_ascii_digit() || self.peek() == '.') {
            if self.peek() == '.' {
                // A dot is part of the number only once and only before a digit
                if seen_dot || self.peek_ahead(1).map_or(true, |c| !c.is_ascii_digit()) {
                    break;
                }
                seen_dot = true;
            }
            digits.push(self.peek());
            self.advance();
        }

        self.tokens.push(Token::new(TokenType::Number, &digits, self.line, start_col));
        Ok(())
    }

    fn scan_hex_number(&mut self) -> Result<(), LexError> {
        let start_col = self.column;
        self.advance(); // '#'
        let mut digits = String::new();

        while !self.at_end() && self.peek().is_ascii_hexdigit() {
            digits.push(self.peek());
            self.advance();
        }

        if digits.is_empty() {
            return Err(LexError {
                message: "Hex literal needs at least one digit after '#'".to_string(),
                line: self.line,
                column: start_col,
            });
        }

        self.tokens.push(Token::new(TokenType::HexNumber, &digits, self.line, start_col));
        Ok(())
    }

    fn scan_word(&mut self) -> Result<(), LexError> {
        let start_col = self.column;
        let mut word = String::new();

        while !self.at_end() && (self.peek().is_alphanumeric() || self.peek() == '_') {
            word.push(self.peek());
            self.advance();
        }

        let tt = keyword_type(&word).unwrap_or(TokenType::Word);
        self.tokens.push(Token::new(tt, &word, self.line, start_col));
        Ok(())
    }

    // ── Helpers ─────────────────────────────────────────────────────────

    fn peek(&self) -> char {
        self.source[self.pos]
    }

    fn peek_ahead(&self, offset: usize) -> Option<char> {
        self.source.get(self.pos + offset).copied()
    }

    fn advance(&mut self) -> char {
        let ch = self.source[self.pos];
        self.pos += 1;
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        ch
    }

    fn at_end(&self) -> bool {
        self.pos >= self.source.len()
    }

    fn push(&mut self, token_type: TokenType, value: &str) {
        self.tokens.push(Token::new(token_type, value, self.line, self.column));
    }

    fn error(&self, message: String) -> LexError {
        LexError {
            message,
            line: self.line,
            column: self.column,
        }
    }
}
