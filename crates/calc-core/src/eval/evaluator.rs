//! Tree-walking evaluator for calc expressions.
//!
//! The evaluator performs a depth-first, left-to-right traversal of the
//! expression tree. Atoms evaluate to themselves, keywords resolve against
//! the injected clock, duration literals produce intermediate duration
//! values, and operator applications fold their operands through the value
//! algebra. Each operand is evaluated exactly once, and the first error
//! aborts the call before later operands are touched.

use super::arith;
use super::value::{Duration, Value};
use super::{Clock, EvalError};
use crate::expr::{Expr, Keyword, Operator};

/// Nesting ceiling before evaluation fails with
/// [`EvalError::ResourceExhausted`]. Keeps pathologically deep input from
/// exhausting the call stack, which would abort the process instead of
/// returning an error.
pub const MAX_DEPTH: usize = 512;

/// The calc expression evaluator.
///
/// Holds only the injected time source; all other state is local to a single
/// `eval` call, so one evaluator can serve any number of concurrent calls.
pub struct Evaluator<'a> {
    clock: &'a dyn Clock,
}

impl<'a> Evaluator<'a> {
    /// Create a new evaluator over the given time source.
    pub fn new(clock: &'a dyn Clock) -> Self {
        Self { clock }
    }

    /// Evaluate an expression to its internal value, durations included.
    ///
    /// Most callers want the top-level `evaluate*` functions instead, which
    /// narrow the result to [`super::Output`].
    pub fn eval(&self, expr: &Expr) -> Result<Value, EvalError> {
        self.eval_expr(expr, 0)
    }

    fn eval_expr(&self, expr: &Expr, depth: usize) -> Result<Value, EvalError> {
        if depth > MAX_DEPTH {
            return Err(EvalError::ResourceExhausted(MAX_DEPTH));
        }

        match expr {
            Expr::Int(i) => Ok(Value::Int(*i)),
            Expr::Double(d) => Ok(Value::Double(*d)),
            Expr::Text(s) => Ok(Value::text(s.as_str())),
            Expr::Bool(b) => Ok(Value::Bool(*b)),
            Expr::Date(d) => Ok(Value::Date(*d)),
            Expr::DateTime(t) => Ok(Value::DateTime(*t)),
            Expr::Keyword(Keyword::Now) => Ok(Value::DateTime(self.clock.now())),
            Expr::Keyword(Keyword::Today) => Ok(Value::Date(self.clock.today())),
            Expr::DurationLiteral { amount, unit } => {
                match self.eval_expr(amount, depth + 1)? {
                    Value::Int(n) => Ok(Value::Duration(Duration::new(n, *unit))),
                    other => Err(EvalError::UnsupportedOperation(format!(
                        "duration amount must be an integer, got {}",
                        other.type_name()
                    ))),
                }
            }
            Expr::Application { op, operands } => self.eval_application(*op, operands, depth),
        }
    }

    fn eval_application(
        &self,
        op: Operator,
        operands: &[Expr],
        depth: usize,
    ) -> Result<Value, EvalError> {
        match op {
            Operator::Add => self.eval_variadic(op, arith::add, operands, depth),
            Operator::Mul => self.eval_variadic(op, arith::multiply, operands, depth),
            Operator::Sub => self.eval_binary(op, arith::subtract, operands, depth),
            Operator::Div => self.eval_binary(op, arith::divide, operands, depth),
        }
    }

    /// Left-to-right reduction for the variadic operators: evaluate the
    /// first operand, then evaluate and fold in each remaining operand.
    /// A single operand is returned unchanged.
    fn eval_variadic(
        &self,
        op: Operator,
        combine: fn(Value, Value) -> Result<Value, EvalError>,
        operands: &[Expr],
        depth: usize,
    ) -> Result<Value, EvalError> {
        let (first, rest) = operands.split_first().ok_or(EvalError::MalformedApplication {
            op: op.symbol(),
            expected: "at least 1",
            actual: 0,
        })?;

        let mut acc = self.eval_expr(first, depth + 1)?;
        for operand in rest {
            let rhs = self.eval_expr(operand, depth + 1)?;
            acc = combine(acc, rhs)?;
        }
        Ok(acc)
    }

    fn eval_binary(
        &self,
        op: Operator,
        combine: fn(Value, Value) -> Result<Value, EvalError>,
        operands: &[Expr],
        depth: usize,
    ) -> Result<Value, EvalError> {
        let [lhs, rhs] = operands else {
            return Err(EvalError::MalformedApplication {
                op: op.symbol(),
                expected: "exactly 2",
                actual: operands.len(),
            });
        };

        let lhs = self.eval_expr(lhs, depth + 1)?;
        let rhs = self.eval_expr(rhs, depth + 1)?;
        combine(lhs, rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eval::FixedClock;
    use chrono::NaiveDate;

    fn clock() -> FixedClock {
        FixedClock::new(
            NaiveDate::from_ymd_opt(2000, 1, 20)
                .unwrap()
                .and_hms_opt(23, 0, 28)
                .unwrap(),
        )
    }

    fn eval(expr: Expr) -> Result<Value, EvalError> {
        let clock = clock();
        Evaluator::new(&clock).eval(&expr)
    }

    fn app(op: Operator, operands: Vec<Expr>) -> Expr {
        Expr::Application { op, operands }
    }

    #[test]
    fn atoms_evaluate_to_themselves() {
        assert_eq!(eval(Expr::Int(11)), Ok(Value::Int(11)));
        assert_eq!(eval(Expr::Double(11.22)), Ok(Value::Double(11.22)));
        assert_eq!(eval(Expr::from("hello")), Ok(Value::text("hello")));
        assert_eq!(eval(Expr::Bool(false)), Ok(Value::Bool(false)));
    }

    #[test]
    fn keywords_resolve_against_the_clock() {
        assert_eq!(eval(Expr::from("now")), Ok(Value::DateTime(clock().now())));
        assert_eq!(eval(Expr::from("today")), Ok(Value::Date(clock().today())));
    }

    #[test]
    fn variadic_reduction_folds_left_to_right() {
        let sum = app(
            Operator::Add,
            vec![Expr::Int(1), Expr::Int(2), Expr::Int(3), Expr::Int(4)],
        );
        assert_eq!(eval(sum), Ok(Value::Int(10)));

        let product = app(Operator::Mul, vec![Expr::Int(2), Expr::Int(3), Expr::Int(4)]);
        assert_eq!(eval(product), Ok(Value::Int(24)));
    }

    #[test]
    fn single_operand_is_identity() {
        assert_eq!(eval(app(Operator::Add, vec![Expr::Int(7)])), Ok(Value::Int(7)));
        assert_eq!(
            eval(app(Operator::Mul, vec![Expr::from("hello")])),
            Ok(Value::text("hello"))
        );
    }

    #[test]
    fn duration_literal_produces_an_intermediate_duration() {
        let expr = Expr::DurationLiteral {
            amount: Box::new(Expr::Int(3)),
            unit: crate::expr::Unit::Day,
        };
        assert_eq!(
            eval(expr),
            Ok(Value::Duration(Duration::new(3, crate::expr::Unit::Day)))
        );
    }

    #[test]
    fn duration_amount_may_be_a_nested_expression() {
        let expr = Expr::DurationLiteral {
            amount: Box::new(app(Operator::Add, vec![Expr::Int(1), Expr::Int(2)])),
            unit: crate::expr::Unit::Hour,
        };
        assert_eq!(
            eval(expr),
            Ok(Value::Duration(Duration::new(3, crate::expr::Unit::Hour)))
        );
    }

    #[test]
    fn duration_amount_must_be_an_integer() {
        let expr = Expr::DurationLiteral {
            amount: Box::new(Expr::Double(1.5)),
            unit: crate::expr::Unit::Day,
        };
        assert!(matches!(eval(expr), Err(EvalError::UnsupportedOperation(_))));
    }

    #[test]
    fn arity_is_enforced() {
        assert!(matches!(
            eval(app(Operator::Sub, vec![Expr::Int(1)])),
            Err(EvalError::MalformedApplication { op: "-", .. })
        ));
        assert!(matches!(
            eval(app(Operator::Div, vec![Expr::Int(1), Expr::Int(2), Expr::Int(3)])),
            Err(EvalError::MalformedApplication { op: "/", .. })
        ));
        assert!(matches!(
            eval(app(Operator::Add, vec![])),
            Err(EvalError::MalformedApplication { op: "+", .. })
        ));
    }

    #[test]
    fn first_error_aborts_the_fold() {
        let expr = app(
            Operator::Add,
            vec![Expr::Int(1), Expr::from("oops"), Expr::Int(3)],
        );
        assert!(matches!(eval(expr), Err(EvalError::UnsupportedOperation(_))));
    }

    #[test]
    fn nesting_beyond_the_limit_is_resource_exhaustion() {
        let mut expr = Expr::Int(1);
        for _ in 0..=MAX_DEPTH {
            expr = app(Operator::Add, vec![expr]);
        }
        assert_eq!(eval(expr), Err(EvalError::ResourceExhausted(MAX_DEPTH)));
    }

    #[test]
    fn nesting_below_the_limit_evaluates() {
        let mut expr = Expr::Int(1);
        for _ in 0..MAX_DEPTH - 1 {
            expr = app(Operator::Add, vec![expr]);
        }
        assert_eq!(eval(expr), Ok(Value::Int(1)));
    }
}
