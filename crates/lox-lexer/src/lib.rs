//! Lox Lexer
//!
//! Tokenizes Lox source text into a flat sequence of tokens.
//! Handles single and double character operators, line comments, string and
//! number literals, identifiers and the reserved-word table.
//!
//! Scanning never fails. Malformed input is handed to a [`Reporter`] and the
//! scanner carries on with the next character; the token sequence always ends
//! with a single [`TokenKind::Eof`].
//!
//! # Example
//!
//! ```
//! use lox_lexer::{Scanner, TokenKind};
//!
//! let output = Scanner::tokenize("var x = 10;");
//! assert!(!output.has_errors());
//! assert_eq!(output.tokens[0].kind, TokenKind::Var);
//! assert_eq!(output.tokens.last().unwrap().kind, TokenKind::Eof);
//! ```

pub mod error;
pub mod scanner;
pub mod token;

pub use error::{report_fn, ReportFn, Reporter, ScanError};
pub use scanner::{scan_tokens, ScanOutput, Scanner};
pub use token::{keyword, Literal, Span, Token, TokenKind, KEYWORDS};
