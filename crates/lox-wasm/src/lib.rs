//! WASM bindings for the Lox tokenizer.
//!
//! Exposes `scan()` to JavaScript via wasm-bindgen.
//! Returns a JS object `{ tokens, errors }`; malformed source never throws.

use lox_lexer::{ScanError, ScanOutput, Scanner, Token};
use serde::Serialize;
use wasm_bindgen::prelude::*;

/// A scan fault as seen from JavaScript.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostic {
    pub line: usize,
    pub message: String,
}

impl From<&ScanError> for Diagnostic {
    fn from(error: &ScanError) -> Self {
        Self {
            line: error.line(),
            message: error.message(),
        }
    }
}

/// Serializable result of one scan.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScanResult {
    pub tokens: Vec<Token>,
    pub errors: Vec<Diagnostic>,
}

impl From<ScanOutput> for ScanResult {
    fn from(output: ScanOutput) -> Self {
        Self {
            errors: output.errors.iter().map(Diagnostic::from).collect(),
            tokens: output.tokens,
        }
    }
}

/// Scan Lox source into tokens.
///
/// Returns `{ tokens: Token[], errors: { line, message }[] }`.
/// Only fails if the result cannot be converted to a JS value.
#[wasm_bindgen]
pub fn scan(source: &str) -> Result<JsValue, JsError> {
    let result = ScanResult::from(Scanner::tokenize(source));
    serde_wasm_bindgen::to_value(&result).map_err(|e| JsError::new(&e.to_string()))
}

/// Get the tokenizer version.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use lox_lexer::TokenKind;
    use pretty_assertions::assert_eq;

    // =========================================================================
    // Native tests (non-WASM) — verify the scan result shape
    // =========================================================================

    fn native_scan(source: &str) -> ScanResult {
        ScanResult::from(Scanner::tokenize(source))
    }

    #[test]
    fn test_empty_source() {
        let result = native_scan("");
        assert_eq!(result.tokens.len(), 1);
        assert_eq!(result.tokens[0].kind, TokenKind::Eof);
        assert!(result.errors.is_empty());
    }

    #[test]
    fn test_statement() {
        let result = native_scan("print 1;");
        let kinds: Vec<TokenKind> = result.tokens.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Print,
                TokenKind::Number,
                TokenKind::Semicolon,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_errors_become_diagnostics() {
        let result = native_scan("@\n\"open");
        assert_eq!(
            result.errors,
            vec![
                Diagnostic {
                    line: 1,
                    message: "Unexpected character: '@'".into(),
                },
                Diagnostic {
                    line: 2,
                    message: "Unterminated string.".into(),
                },
            ]
        );
        assert_eq!(result.tokens.len(), 1);
    }

    #[test]
    fn test_version() {
        assert_eq!(version(), env!("CARGO_PKG_VERSION"));
    }
}
