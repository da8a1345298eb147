//! Error types for formatter expressions.

use thiserror::Error;

/// Failure to compile an expression into a formatter
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExprError {
    /// Malformed source text
    #[error("syntax error at {pos}: {message}")]
    Syntax { pos: usize, message: String },

    /// Reference to something outside the sandbox
    #[error("unknown identifier `{name}` at {pos}")]
    UnknownIdentifier { name: String, pos: usize },

    /// The text parsed but is not a function definition
    #[error("expression is not a function definition")]
    NotAFunction,

    /// More tokens than the parser accepts
    #[error("expression longer than {0} tokens")]
    TooLong(usize),

    /// Nesting deeper than the parser accepts
    #[error("expression nested deeper than {0} levels")]
    TooDeep(usize),
}

impl ExprError {
    pub(crate) fn syntax(pos: usize, message: impl Into<String>) -> Self {
        ExprError::Syntax {
            pos,
            message: message.into(),
        }
    }
}

/// Failure while evaluating a compiled formatter.
///
/// Never escapes a [`crate::formatters::Formatter`]; callers only see the
/// fallback string.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalError {
    #[error("cannot read property `{property}` of {target}")]
    PropertyOfNothing { property: String, target: &'static str },

    #[error("`{0}` is not a function")]
    NotCallable(String),

    #[error("unknown method `{method}` on {target}")]
    UnknownMethod { method: String, target: &'static str },

    #[error("evaluation exceeded {0} steps")]
    StepLimit(usize),

    #[error("string longer than {0} bytes")]
    StringTooLong(usize),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

pub type EvalResult<T> = Result<T, EvalError>;
