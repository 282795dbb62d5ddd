//! Evaluation error types.

use thiserror::Error;

/// An error produced while evaluating a calc expression.
///
/// All errors are returned to the immediate caller; evaluation is
/// all-or-nothing per call, with no retries and no partial results.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    /// The expression shape matches none of the recognized forms, or a
    /// duration escaped to the public result boundary.
    #[error("unsupported expression: {0}")]
    UnsupportedExpression(String),

    /// A recognized operator was applied with the wrong operand count.
    #[error("'{op}' expects {expected} operand(s), got {actual}")]
    MalformedApplication {
        op: &'static str,
        expected: &'static str,
        actual: usize,
    },

    /// The operand value types do not combine under the operator.
    #[error("unsupported operation: {0}")]
    UnsupportedOperation(String),

    /// Integer division with a zero divisor.
    #[error("division by zero")]
    DivisionByZero,

    /// Checked integer or temporal arithmetic left the representable range.
    #[error("arithmetic overflow: {0}")]
    Overflow(&'static str),

    /// Expression nesting exceeded the evaluator's recursion limit.
    #[error("expression nesting exceeds the depth limit ({0})")]
    ResourceExhausted(usize),
}

impl EvalError {
    /// Create an unsupported-expression error.
    pub fn unsupported_expression(detail: impl Into<String>) -> Self {
        EvalError::UnsupportedExpression(detail.into())
    }

    /// Create an unsupported-operation error for a binary combination.
    pub fn unsupported_operation(op: &'static str, lhs: &str, rhs: &str) -> Self {
        EvalError::UnsupportedOperation(format!("cannot apply '{op}' to {lhs} and {rhs}"))
    }
}
