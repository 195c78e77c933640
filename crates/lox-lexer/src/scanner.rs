use crate::error::{Reporter, ScanError};
use crate::token::{keyword, Literal, Span, Token, TokenKind};

/// Tokens and faults collected by [`Scanner::tokenize`].
#[derive(Debug, Clone, PartialEq)]
pub struct ScanOutput {
    pub tokens: Vec<Token>,
    pub errors: Vec<ScanError>,
}

impl ScanOutput {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Lox source scanner.
///
/// A single forward pass over the source with one character of lookahead
/// (two when deciding whether a `.` starts a fractional part).
///
/// - `start..current` is the byte range of the lexeme being scanned
/// - the cursor always moves by whole characters, so slices stay on
///   UTF-8 boundaries
/// - a scanner is consumed by [`Scanner::scan_tokens`] and cannot be rerun
pub struct Scanner<'a> {
    source: &'a str,
    tokens: Vec<Token>,
    start: usize,
    current: usize,
    line: usize,
    start_line: usize,
}

impl<'a> Scanner<'a> {
    /// Create a new scanner for the given source.
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            tokens: Vec::new(),
            start: 0,
            current: 0,
            line: 1,
            start_line: 1,
        }
    }

    /// Tokenize the entire source, collecting faults instead of reporting them.
    pub fn tokenize(source: &str) -> ScanOutput {
        let mut errors = Vec::new();
        let tokens = Scanner::new(source).scan_tokens(&mut errors);
        ScanOutput { tokens, errors }
    }

    /// Scan all tokens from the source, handing every fault to `reporter`.
    pub fn scan_tokens(mut self, reporter: &mut dyn Reporter) -> Vec<Token> {
        let mut faults = 0usize;

        while !self.is_at_end() {
            // Beginning of the next lexeme
            self.start = self.current;
            self.start_line = self.line;
            if let Some(error) = self.scan_token() {
                tracing::trace!(line = error.line(), %error, "scan fault");
                faults += 1;
                reporter.report(error);
            }
        }

        self.tokens.push(Token::eof(self.line, self.source.len()));
        tracing::debug!(
            tokens = self.tokens.len(),
            faults,
            lines = self.line,
            "scan complete"
        );
        self.tokens
    }

    /// Scan one lexeme. Returns the fault, if any, instead of a token.
    fn scan_token(&mut self) -> Option<ScanError> {
        let c = self.advance();

        match c {
            '(' => self.add_token(TokenKind::LeftParen),
            ')' => self.add_token(TokenKind::RightParen),
            '{' => self.add_token(TokenKind::LeftBrace),
            '}' => self.add_token(TokenKind::RightBrace),
            ',' => self.add_token(TokenKind::Comma),
            '.' => self.add_token(TokenKind::Dot),
            '-' => self.add_token(TokenKind::Minus),
            '+' => self.add_token(TokenKind::Plus),
            ';' => self.add_token(TokenKind::Semicolon),
            '*' => self.add_token(TokenKind::Star),

            '!' => self.add_either('=', TokenKind::BangEqual, TokenKind::Bang),
            '=' => self.add_either('=', TokenKind::EqualEqual, TokenKind::Equal),
            '<' => self.add_either('=', TokenKind::LessEqual, TokenKind::Less),
            '>' => self.add_either('=', TokenKind::GreaterEqual, TokenKind::Greater),

            '/' => {
                if self.matches('/') {
                    self.skip_line_comment();
                } else {
                    self.add_token(TokenKind::Slash);
                }
            }

            ' ' | '\r' | '\t' => {}
            '\n' => self.line += 1,

            '"' => return self.scan_string(),

            c if c.is_ascii_digit() => self.scan_number(),
            c if is_alpha(c) => self.scan_identifier(),

            character => {
                return Some(ScanError::UnexpectedCharacter {
                    line: self.line,
                    character,
                })
            }
        }

        None
    }

    // --- Scanners ---

    /// Discard the rest of the line. The newline itself is left for the
    /// main loop so the line counter stays in one place.
    fn skip_line_comment(&mut self) {
        while self.peek() != '\n' && !self.is_at_end() {
            self.advance();
        }
    }

    /// Scan a string literal. Content is taken verbatim: no escape sequences.
    fn scan_string(&mut self) -> Option<ScanError> {
        while self.peek() != '"' && !self.is_at_end() {
            if self.peek() == '\n' {
                self.line += 1;
            }
            self.advance();
        }

        if self.is_at_end() {
            return Some(ScanError::UnterminatedString { line: self.line });
        }

        self.advance(); // consume closing quote

        // Quotes are one byte each
        let value = &self.source[self.start + 1..self.current - 1];
        self.add_literal(TokenKind::String, Some(Literal::String(value.to_string())));
        None
    }

    /// Scan a number literal: digits, optionally `.` and more digits.
    /// A `.` not followed by a digit is left for the next lexeme.
    fn scan_number(&mut self) {
        self.skip_digits();

        if self.peek() == '.' && self.peek_next().is_ascii_digit() {
            self.advance(); // consume the "."
            self.skip_digits();
        }

        let value: f64 = self
            .lexeme()
            .parse()
            .expect("digit run with optional fraction is a valid f64");
        self.add_literal(TokenKind::Number, Some(Literal::Number(value)));
    }

    /// Scan a maximal identifier run, then classify it against the keyword table.
    fn scan_identifier(&mut self) {
        while is_alphanumeric(self.peek()) {
            self.advance();
        }

        let kind = keyword(self.lexeme()).unwrap_or(TokenKind::Identifier);
        self.add_token(kind);
    }

    fn skip_digits(&mut self) {
        while self.peek().is_ascii_digit() {
            self.advance();
        }
    }

    // --- Helpers ---

    fn add_token(&mut self, kind: TokenKind) {
        self.add_literal(kind, None);
    }

    fn add_either(&mut self, expected: char, matched: TokenKind, otherwise: TokenKind) {
        let kind = if self.matches(expected) {
            matched
        } else {
            otherwise
        };
        self.add_token(kind);
    }

    fn add_literal(&mut self, kind: TokenKind, literal: Option<Literal>) {
        let span = Span::new(self.start, self.current);
        let token = Token::new(kind, self.lexeme(), literal, self.start_line, span);
        self.tokens.push(token);
    }

    fn lexeme(&self) -> &'a str {
        &self.source[self.start..self.current]
    }

    /// Consume the next character only if it is `expected`.
    fn matches(&mut self, expected: char) -> bool {
        if self.peek() != expected || self.is_at_end() {
            return false;
        }
        self.current += expected.len_utf8();
        true
    }

    fn peek(&self) -> char {
        self.source[self.current..].chars().next().unwrap_or('\0')
    }

    fn peek_next(&self) -> char {
        self.source[self.current..].chars().nth(1).unwrap_or('\0')
    }

    fn advance(&mut self) -> char {
        let c = self.peek();
        if !self.is_at_end() {
            self.current += c.len_utf8();
        }
        c
    }

    fn is_at_end(&self) -> bool {
        self.current >= self.source.len()
    }
}

/// Scan `source` in one call, handing faults to `reporter`.
pub fn scan_tokens(source: &str, reporter: &mut dyn Reporter) -> Vec<Token> {
    Scanner::new(source).scan_tokens(reporter)
}

fn is_alpha(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_alphanumeric(c: char) -> bool {
    is_alpha(c) || c.is_ascii_digit()
}
