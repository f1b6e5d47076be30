// ABOUTME: Error types for evaluation failures and reader diagnostics

use crate::value::Value;
use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum EvalError {
    /// Type mismatch error with the offending form, the expected type, and
    /// the actual type encountered.
    #[error("{form}: expected {expected}, got {actual}")]
    TypeMismatch {
        form: &'static str,
        expected: &'static str,
        actual: &'static str,
    },

    /// Arity error with the offending form and expected/actual argument counts.
    #[error("{form}: expected {expected} argument(s), got {actual}")]
    ArityMismatch {
        form: &'static str,
        expected: String,
        actual: usize,
    },

    #[error("unbound variable: {0}")]
    UnboundVariable(String),

    #[error("cannot apply non-procedure value of type {0}")]
    NotApplicable(&'static str),

    #[error("division by zero in {0}")]
    DivisionByZero(&'static str),

    /// Raised by the `error` primitive; always fatal, as spec.md defines no
    /// recoverable exception mechanism.
    #[error("{0}")]
    Explicit(String),

    #[error("I/O error: {0}")]
    Io(String),
}

impl EvalError {
    pub fn type_error(form: &'static str, expected: &'static str, actual: &Value) -> Self {
        EvalError::TypeMismatch {
            form,
            expected,
            actual: actual.type_name(),
        }
    }

    pub fn arity_error(form: &'static str, expected: impl Into<String>, actual: usize) -> Self {
        EvalError::ArityMismatch {
            form,
            expected: expected.into(),
            actual,
        }
    }
}

/// Lex/parse diagnostics. Per spec these never abort the reader — they are
/// printed and the reader recovers by truncating the offending token — so
/// this type is constructed for its `Display` impl rather than propagated
/// through a `Result`.
#[derive(Error, Debug, Clone)]
pub enum ReaderError {
    #[error("identifier longer than {limit} bytes, truncated")]
    OversizeIdentifier { limit: usize },

    #[error("string literal longer than {limit} bytes, truncated")]
    OversizeString { limit: usize },

    #[error("unterminated string literal at end of input")]
    UnterminatedString,
}
