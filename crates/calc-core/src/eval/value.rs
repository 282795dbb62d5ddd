//! Runtime values for calc evaluation.
//!
//! [`Value`] is the evaluator's internal result domain, including the
//! intermediate [`Duration`]. [`Output`] is the narrower domain handed back
//! across the public boundary: it deliberately has no duration variant, so a
//! duration can never be the final result of a well-formed evaluation.

use std::fmt;
use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime};

use super::EvalError;
use crate::expr::Unit;

/// A runtime value produced during evaluation.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Signed 64-bit integer.
    Int(i64),
    /// 64-bit floating point.
    Double(f64),
    /// Text (Arc for cheap cloning).
    Text(Arc<str>),
    /// Boolean.
    Bool(bool),
    /// Calendar date.
    Date(NaiveDate),
    /// Naive date-time.
    DateTime(NaiveDateTime),
    /// Intermediate duration; valid only as an operand to temporal
    /// addition/subtraction, never as a final result.
    Duration(Duration),
}

/// An integer amount paired with a time unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Duration {
    /// The amount, in units.
    pub amount: i64,
    /// The time unit.
    pub unit: Unit,
}

impl Duration {
    /// Create a new duration.
    pub fn new(amount: i64, unit: Unit) -> Self {
        Self { amount, unit }
    }

    /// Convert to a chrono `TimeDelta`, failing when the amount does not fit
    /// chrono's representable range.
    pub fn to_delta(&self) -> Result<chrono::TimeDelta, EvalError> {
        let delta = match self.unit {
            Unit::Second => chrono::TimeDelta::try_seconds(self.amount),
            Unit::Minute => chrono::TimeDelta::try_minutes(self.amount),
            Unit::Hour => chrono::TimeDelta::try_hours(self.amount),
            Unit::Day => chrono::TimeDelta::try_days(self.amount),
        };
        delta.ok_or(EvalError::Overflow("duration amount out of range"))
    }
}

impl Value {
    /// Create a text value.
    pub fn text(s: impl Into<Arc<str>>) -> Self {
        Value::Text(s.into())
    }

    /// The value's type name, for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "int",
            Value::Double(_) => "double",
            Value::Text(_) => "text",
            Value::Bool(_) => "bool",
            Value::Date(_) => "date",
            Value::DateTime(_) => "date-time",
            Value::Duration(_) => "duration",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(v) => write!(f, "{v}"),
            Value::Double(v) => write!(f, "{v}"),
            Value::Text(v) => write!(f, "\"{v}\""),
            Value::Bool(v) => write!(f, "{v}"),
            Value::Date(v) => write!(f, "{v}"),
            Value::DateTime(v) => write!(f, "{v}"),
            Value::Duration(d) => write!(f, "duration({} {})", d.amount, d.unit),
        }
    }
}

/// A final evaluation result.
///
/// Same as [`Value`] minus the intermediate duration variant, so the type
/// system rules out durations leaking across the public boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum Output {
    Int(i64),
    Double(f64),
    Text(Arc<str>),
    Bool(bool),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
}

impl Output {
    /// Create a text output.
    pub fn text(s: impl Into<Arc<str>>) -> Self {
        Output::Text(s.into())
    }
}

impl TryFrom<Value> for Output {
    type Error = EvalError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Int(v) => Ok(Output::Int(v)),
            Value::Double(v) => Ok(Output::Double(v)),
            Value::Text(v) => Ok(Output::Text(v)),
            Value::Bool(v) => Ok(Output::Bool(v)),
            Value::Date(v) => Ok(Output::Date(v)),
            Value::DateTime(v) => Ok(Output::DateTime(v)),
            Value::Duration(d) => Err(EvalError::unsupported_expression(format!(
                "expression evaluates to a bare duration ({} {})",
                d.amount, d.unit
            ))),
        }
    }
}

impl fmt::Display for Output {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Output::Int(v) => write!(f, "{v}"),
            Output::Double(v) => write!(f, "{v}"),
            Output::Text(v) => write!(f, "\"{v}\""),
            Output::Bool(v) => write!(f, "{v}"),
            Output::Date(v) => write!(f, "{v}"),
            Output::DateTime(v) => write!(f, "{v}"),
        }
    }
}
