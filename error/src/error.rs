use std::fmt::{Display, Formatter};
use thiserror::Error;

/// Message handed to callers whenever the engine itself misbehaves.
pub const UNEXPECTED_ERROR: &str = "unexpected error during translation";

/// Input which matches no token rule.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("line {line}:{column} - {message}")]
pub struct LexError {
    pub line: usize,
    pub column: usize,
    pub message: String,
}

impl LexError {
    pub fn new<S: Into<String>>(line: usize, column: usize, message: S) -> Self {
        LexError {
            line,
            column,
            message: message.into(),
        }
    }
}

/// Token stream which does not match the grammar.
///
/// `line` is 1-based, `column` is the 0-based character offset inside that line.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("line {line}:{column} - {message}")]
pub struct SyntaxError {
    pub line: usize,
    pub column: usize,
    pub message: String,
}

impl SyntaxError {
    pub fn new<S: Into<String>>(line: usize, column: usize, message: S) -> Self {
        SyntaxError {
            line,
            column,
            message: message.into(),
        }
    }
}

impl From<LexError> for SyntaxError {
    fn from(err: LexError) -> Self {
        SyntaxError {
            line: err.line,
            column: err.column,
            message: err.message,
        }
    }
}

/// Raw input rejected before any tokenizing happens.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("query cannot be empty")]
    Empty,
    #[error("query exceeds the character limit of {limit} characters")]
    TooLong { limit: usize },
    #[error("query contains unsupported keyword: {0}")]
    UnsupportedKeyword(String),
    #[error("only SELECT queries are supported")]
    NotSelect,
    #[error("suspicious query pattern detected")]
    SuspiciousPattern,
}

/// A parsed tree broke one of its own invariants. Always an engine bug.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("internal error: {0}")]
pub struct InternalError(pub String);

#[derive(Debug, Error, Clone, PartialEq)]
pub enum TranslateError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("{}", SyntaxErrors(.0))]
    Syntax(Vec<SyntaxError>),
    #[error(transparent)]
    Internal(#[from] InternalError),
}

impl TranslateError {
    /// User facing messages, in order. Internal details stay in the logs.
    pub fn messages(&self) -> Vec<String> {
        match self {
            TranslateError::Validation(v) => vec![v.to_string()],
            TranslateError::Syntax(errors) => errors.iter().map(|e| e.to_string()).collect(),
            TranslateError::Internal(_) => vec![UNEXPECTED_ERROR.to_string()],
        }
    }

    pub fn is_internal(&self) -> bool {
        matches!(self, TranslateError::Internal(_))
    }
}

impl From<SyntaxError> for TranslateError {
    fn from(err: SyntaxError) -> Self {
        TranslateError::Syntax(vec![err])
    }
}

impl From<Vec<SyntaxError>> for TranslateError {
    fn from(errors: Vec<SyntaxError>) -> Self {
        TranslateError::Syntax(errors)
    }
}

struct SyntaxErrors<'a>(&'a [SyntaxError]);

impl Display for SyntaxErrors<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let joined = self
            .0
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ");
        f.write_str(&joined)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn syntax_error_display() {
        let err = SyntaxError::new(1, 7, "mismatched input 'FROM' expecting {'*', IDENTIFIER}");
        assert_eq!(
            err.to_string(),
            "line 1:7 - mismatched input 'FROM' expecting {'*', IDENTIFIER}"
        );
    }

    #[test]
    fn internal_messages_are_generic() {
        let err = TranslateError::from(InternalError("missing table name".to_string()));
        assert!(err.is_internal());
        assert_eq!(err.messages(), vec![UNEXPECTED_ERROR.to_string()]);
        assert!(err.to_string().contains("missing table name"));
    }

    #[test]
    fn validation_messages() {
        let err = TranslateError::from(ValidationError::TooLong { limit: 5000 });
        assert_eq!(
            err.messages(),
            vec!["query exceeds the character limit of 5000 characters".to_string()]
        );
    }

    #[test]
    fn lex_error_becomes_syntax_error() {
        let err: SyntaxError = LexError::new(2, 4, "token recognition error at: '#'").into();
        assert_eq!(err.line, 2);
        assert_eq!(err.column, 4);
    }
}
