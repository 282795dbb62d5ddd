//! Expression trees for calc evaluation.
//!
//! An [`Expr`] is the structured form of a calculation: an atomic literal, a
//! reserved keyword, a duration literal, or an operator application. Callers
//! either build expressions programmatically (dates and date-times have no
//! JSON representation, so they only enter this way) or decode them from
//! interchange data with [`Expr::from_json`].

use chrono::{NaiveDate, NaiveDateTime};

use crate::eval::EvalError;

/// A calculation expression.
///
/// The variants form a closed sum over every shape the evaluator accepts;
/// anything else is rejected by [`Expr::from_json`] before evaluation starts.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Signed 64-bit integer literal.
    Int(i64),
    /// 64-bit floating point literal.
    Double(f64),
    /// Text literal (anything other than the reserved keywords).
    Text(String),
    /// Boolean literal.
    Bool(bool),
    /// Calendar date literal.
    Date(NaiveDate),
    /// Date-time literal (naive, no timezone surface).
    DateTime(NaiveDateTime),
    /// Reserved keyword, resolved against the ambient clock.
    Keyword(Keyword),
    /// Duration literal: `[amount, unit_string]`.
    DurationLiteral { amount: Box<Expr>, unit: Unit },
    /// Operator application: `[symbol, operand, ...]`.
    ///
    /// Operand count is not constrained here; arity is enforced during
    /// evaluation so that the decode step stays purely structural.
    Application { op: Operator, operands: Vec<Expr> },
}

/// A reserved text sentinel with environment-dependent evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    /// Evaluates to the current date-time.
    Now,
    /// Evaluates to the current date.
    Today,
}

impl Keyword {
    /// Recognize a keyword string.
    pub fn from_text(s: &str) -> Option<Keyword> {
        match s {
            "now" => Some(Keyword::Now),
            "today" => Some(Keyword::Today),
            _ => None,
        }
    }
}

/// One of the four arithmetic operator symbols.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
}

impl Operator {
    /// Recognize an operator symbol.
    pub fn from_symbol(s: &str) -> Option<Operator> {
        match s {
            "+" => Some(Operator::Add),
            "-" => Some(Operator::Sub),
            "*" => Some(Operator::Mul),
            "/" => Some(Operator::Div),
            _ => None,
        }
    }

    /// The operator's symbol, as written in expressions.
    pub fn symbol(&self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Sub => "-",
            Operator::Mul => "*",
            Operator::Div => "/",
        }
    }
}

/// A time unit for duration literals and duration values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    Second,
    Minute,
    Hour,
    Day,
}

impl Unit {
    /// Recognize a unit string by prefix, so plural and longer suffixed
    /// forms ("seconds", "days") are accepted.
    pub fn from_prefix(s: &str) -> Option<Unit> {
        if s.starts_with("second") {
            Some(Unit::Second)
        } else if s.starts_with("minute") {
            Some(Unit::Minute)
        } else if s.starts_with("hour") {
            Some(Unit::Hour)
        } else if s.starts_with("day") {
            Some(Unit::Day)
        } else {
            None
        }
    }

    /// The unit's canonical name.
    pub fn name(&self) -> &'static str {
        match self {
            Unit::Second => "second",
            Unit::Minute => "minute",
            Unit::Hour => "hour",
            Unit::Day => "day",
        }
    }
}

impl std::fmt::Display for Unit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl Expr {
    /// Decode an expression from interchange data.
    ///
    /// Shapes are matched in priority order, and the order is load-bearing
    /// because a two-element array can read as both a duration literal and
    /// an operator application:
    ///
    /// 1. keyword strings (`"now"`, `"today"`);
    /// 2. scalar atoms (numbers, other strings, booleans);
    /// 3. `[amount, unit_string]` where the unit string carries a recognized
    ///    unit prefix — checked before operator dispatch;
    /// 4. `[symbol, operand, ...]` with a known operator symbol;
    /// 5. anything else fails with [`EvalError::UnsupportedExpression`].
    pub fn from_json(raw: &serde_json::Value) -> Result<Expr, EvalError> {
        match raw {
            serde_json::Value::Bool(b) => Ok(Expr::Bool(*b)),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Ok(Expr::Int(i))
                } else if let Some(d) = n.as_f64() {
                    Ok(Expr::Double(d))
                } else {
                    Err(EvalError::unsupported_expression(format!(
                        "number out of range: {n}"
                    )))
                }
            }
            serde_json::Value::String(s) => Ok(Expr::from(s.as_str())),
            serde_json::Value::Array(elements) => Self::from_json_array(elements),
            serde_json::Value::Null => Err(EvalError::unsupported_expression("null")),
            serde_json::Value::Object(_) => {
                Err(EvalError::unsupported_expression("object is not an expression"))
            }
        }
    }

    fn from_json_array(elements: &[serde_json::Value]) -> Result<Expr, EvalError> {
        // Duration literal shape first: [amount, "<unit...>"].
        if let [amount, serde_json::Value::String(unit)] = elements {
            if let Some(unit) = Unit::from_prefix(unit) {
                return Ok(Expr::DurationLiteral {
                    amount: Box::new(Expr::from_json(amount)?),
                    unit,
                });
            }
        }

        if let Some((serde_json::Value::String(head), rest)) = elements.split_first() {
            if let Some(op) = Operator::from_symbol(head) {
                let operands = rest
                    .iter()
                    .map(Expr::from_json)
                    .collect::<Result<Vec<_>, _>>()?;
                return Ok(Expr::Application { op, operands });
            }
            return Err(EvalError::unsupported_expression(format!(
                "unknown operator '{head}'"
            )));
        }

        Err(EvalError::unsupported_expression(
            "sequence does not start with an operator symbol",
        ))
    }
}

impl From<i64> for Expr {
    fn from(value: i64) -> Self {
        Expr::Int(value)
    }
}

impl From<f64> for Expr {
    fn from(value: f64) -> Self {
        Expr::Double(value)
    }
}

impl From<bool> for Expr {
    fn from(value: bool) -> Self {
        Expr::Bool(value)
    }
}

impl From<&str> for Expr {
    /// Keyword strings take priority over plain text, matching the decode
    /// order in [`Expr::from_json`].
    fn from(value: &str) -> Self {
        match Keyword::from_text(value) {
            Some(keyword) => Expr::Keyword(keyword),
            None => Expr::Text(value.to_string()),
        }
    }
}

impl From<String> for Expr {
    fn from(value: String) -> Self {
        Expr::from(value.as_str())
    }
}

impl From<NaiveDate> for Expr {
    fn from(value: NaiveDate) -> Self {
        Expr::Date(value)
    }
}

impl From<NaiveDateTime> for Expr {
    fn from(value: NaiveDateTime) -> Self {
        Expr::DateTime(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn decode(raw: serde_json::Value) -> Expr {
        Expr::from_json(&raw).unwrap()
    }

    #[test]
    fn decode_scalar_atoms() {
        assert_eq!(decode(json!(11)), Expr::Int(11));
        assert_eq!(decode(json!(11.22)), Expr::Double(11.22));
        assert_eq!(decode(json!("hello")), Expr::Text("hello".to_string()));
        assert_eq!(decode(json!(true)), Expr::Bool(true));
    }

    #[test]
    fn decode_keywords_before_text() {
        assert_eq!(decode(json!("now")), Expr::Keyword(Keyword::Now));
        assert_eq!(decode(json!("today")), Expr::Keyword(Keyword::Today));
        assert_eq!(decode(json!("tomorrow")), Expr::Text("tomorrow".to_string()));
    }

    #[test]
    fn decode_large_number_falls_back_to_double() {
        let raw = json!(u64::MAX);
        assert_eq!(decode(raw), Expr::Double(u64::MAX as f64));
    }

    #[test]
    fn decode_duration_literal() {
        assert_eq!(
            decode(json!([3, "days"])),
            Expr::DurationLiteral {
                amount: Box::new(Expr::Int(3)),
                unit: Unit::Day,
            }
        );
        assert_eq!(
            decode(json!([["+", 1, 2], "hours"])),
            Expr::DurationLiteral {
                amount: Box::new(Expr::Application {
                    op: Operator::Add,
                    operands: vec![Expr::Int(1), Expr::Int(2)],
                }),
                unit: Unit::Hour,
            }
        );
    }

    #[test]
    fn duration_shape_wins_over_operator_dispatch() {
        // ["+", "seconds"] reads as both shapes; the duration literal wins.
        assert_eq!(
            decode(json!(["+", "seconds"])),
            Expr::DurationLiteral {
                amount: Box::new(Expr::Text("+".to_string())),
                unit: Unit::Second,
            }
        );
    }

    #[test]
    fn decode_application() {
        assert_eq!(
            decode(json!(["+", 1, 2, 3])),
            Expr::Application {
                op: Operator::Add,
                operands: vec![Expr::Int(1), Expr::Int(2), Expr::Int(3)],
            }
        );
        // Zero operands decode fine; arity is the evaluator's concern.
        assert_eq!(
            decode(json!(["-"])),
            Expr::Application {
                op: Operator::Sub,
                operands: vec![],
            }
        );
    }

    #[test]
    fn decode_rejects_unrecognized_shapes() {
        for raw in [
            json!(null),
            json!({}),
            json!([]),
            json!(["?", 1, 2]),
            json!([1, 2]),
        ] {
            let err = Expr::from_json(&raw).unwrap_err();
            assert!(
                matches!(err, EvalError::UnsupportedExpression(_)),
                "{raw}: {err}"
            );
        }
    }

    #[test]
    fn unit_prefix_match() {
        assert_eq!(Unit::from_prefix("second"), Some(Unit::Second));
        assert_eq!(Unit::from_prefix("seconds"), Some(Unit::Second));
        assert_eq!(Unit::from_prefix("minutes"), Some(Unit::Minute));
        assert_eq!(Unit::from_prefix("hour"), Some(Unit::Hour));
        assert_eq!(Unit::from_prefix("days"), Some(Unit::Day));
        assert_eq!(Unit::from_prefix("sec"), None);
        assert_eq!(Unit::from_prefix("weeks"), None);
    }

    #[test]
    fn typed_construction_applies_keyword_priority() {
        assert_eq!(Expr::from("now"), Expr::Keyword(Keyword::Now));
        assert_eq!(Expr::from("later"), Expr::Text("later".to_string()));
    }
}
