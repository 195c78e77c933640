/// A fault found while scanning. Faults never stop the scan; they are handed
/// to a [`Reporter`] and the scanner moves on.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScanError {
    /// Input ended before the closing `"` of a string literal.
    #[error("Unterminated string.")]
    UnterminatedString { line: usize },

    /// A character that starts no lexeme.
    #[error("Unexpected character: '{character}'")]
    UnexpectedCharacter { line: usize, character: char },
}

impl ScanError {
    /// Line the fault was reported at.
    pub fn line(&self) -> usize {
        match self {
            ScanError::UnterminatedString { line } | ScanError::UnexpectedCharacter { line, .. } => {
                *line
            }
        }
    }

    pub fn message(&self) -> String {
        self.to_string()
    }
}

/// Sink for scan faults.
///
/// Called zero or more times per scan, in source order. The scanner ignores
/// anything the sink does with the fault.
pub trait Reporter {
    fn report(&mut self, error: ScanError);
}

impl Reporter for Vec<ScanError> {
    fn report(&mut self, error: ScanError) {
        self.push(error);
    }
}

/// Adapter from a `(line, message)` callback to [`Reporter`]. See [`report_fn`].
#[derive(Debug, Clone, Copy)]
pub struct ReportFn<F>(F);

impl<F> Reporter for ReportFn<F>
where
    F: FnMut(usize, &str),
{
    fn report(&mut self, error: ScanError) {
        (self.0)(error.line(), &error.message());
    }
}

/// Wrap a `(line, message)` callback as a [`Reporter`].
///
/// ```
/// use lox_lexer::{report_fn, Scanner};
///
/// let mut seen = Vec::new();
/// let tokens = Scanner::new("@").scan_tokens(&mut report_fn(|line, msg: &str| {
///     seen.push(format!("[line {line}] {msg}"));
/// }));
/// assert_eq!(tokens.len(), 1);
/// assert_eq!(seen, ["[line 1] Unexpected character: '@'"]);
/// ```
pub fn report_fn<F>(callback: F) -> ReportFn<F>
where
    F: FnMut(usize, &str),
{
    ReportFn(callback)
}
