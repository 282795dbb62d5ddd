//! Calc evaluation engine.
//!
//! The engine splits into three cooperating pieces over the same expression
//! tree:
//!
//! - [`Evaluator`] classifies each node and recurses depth-first;
//! - operator semantics (also in `evaluator`) apply the variadic and binary
//!   reduction rules;
//! - the value algebra (`arith`) decides which operand-type pairs combine.
//!
//! Evaluation is synchronous and pure apart from reading the injected
//! [`Clock`]; the core never logs and never retries.

mod arith;
mod clock;
mod error;
mod evaluator;
mod value;

pub use clock::{Clock, FixedClock, SystemClock};
pub use error::EvalError;
pub use evaluator::{Evaluator, MAX_DEPTH};
pub use value::{Duration, Output, Value};

use crate::expr::Expr;

/// Evaluate an expression against the system clock.
pub fn evaluate(expr: &Expr) -> Result<Output, EvalError> {
    evaluate_with(expr, &SystemClock)
}

/// Evaluate an expression against an injected time source.
pub fn evaluate_with(expr: &Expr, clock: &dyn Clock) -> Result<Output, EvalError> {
    let value = Evaluator::new(clock).eval(expr)?;
    Output::try_from(value)
}

/// Decode interchange data and evaluate it against the system clock.
pub fn evaluate_json(raw: &serde_json::Value) -> Result<Output, EvalError> {
    evaluate_json_with(raw, &SystemClock)
}

/// Decode interchange data and evaluate it against an injected time source.
pub fn evaluate_json_with(raw: &serde_json::Value, clock: &dyn Clock) -> Result<Output, EvalError> {
    let expr = Expr::from_json(raw)?;
    evaluate_with(&expr, clock)
}
