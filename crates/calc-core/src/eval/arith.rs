//! The value algebra: which operand-type pairs combine under each operator.
//!
//! Numeric arithmetic uses checked integer operations with promotion to
//! double on mixed operands. Temporal arithmetic shifts a date-time by a
//! duration in any unit, and a pure date by whole days only. Addition and
//! the date-side subtraction accept the duration in either operand position;
//! the commuted subtraction is sugar for writing the duration first and
//! still computes `date - amount`. Every pairing not listed fails with
//! [`EvalError::UnsupportedOperation`].

use chrono::{NaiveDate, NaiveDateTime};

use super::value::{Duration, Value};
use super::EvalError;
use crate::expr::Unit;

/// Combine two values under `+`.
pub(crate) fn add(lhs: Value, rhs: Value) -> Result<Value, EvalError> {
    match (&lhs, &rhs) {
        (Value::Int(a), Value::Int(b)) => a
            .checked_add(*b)
            .map(Value::Int)
            .ok_or(EvalError::Overflow("integer addition overflow")),
        (Value::Int(a), Value::Double(b)) => Ok(Value::Double(*a as f64 + b)),
        (Value::Double(a), Value::Int(b)) => Ok(Value::Double(a + *b as f64)),
        (Value::Double(a), Value::Double(b)) => Ok(Value::Double(a + b)),
        (Value::DateTime(t), Value::Duration(d)) | (Value::Duration(d), Value::DateTime(t)) => {
            shift_datetime(*t, *d, true)
        }
        (Value::Date(t), Value::Duration(d)) | (Value::Duration(d), Value::Date(t)) => {
            shift_date(*t, *d, true)
        }
        _ => Err(EvalError::unsupported_operation(
            "+",
            lhs.type_name(),
            rhs.type_name(),
        )),
    }
}

/// Combine two values under `-`.
pub(crate) fn subtract(lhs: Value, rhs: Value) -> Result<Value, EvalError> {
    match (&lhs, &rhs) {
        (Value::Int(a), Value::Int(b)) => a
            .checked_sub(*b)
            .map(Value::Int)
            .ok_or(EvalError::Overflow("integer subtraction overflow")),
        (Value::Int(a), Value::Double(b)) => Ok(Value::Double(*a as f64 - b)),
        (Value::Double(a), Value::Int(b)) => Ok(Value::Double(a - *b as f64)),
        (Value::Double(a), Value::Double(b)) => Ok(Value::Double(a - b)),
        (Value::DateTime(t), Value::Duration(d)) | (Value::Duration(d), Value::DateTime(t)) => {
            shift_datetime(*t, *d, false)
        }
        (Value::Date(t), Value::Duration(d)) | (Value::Duration(d), Value::Date(t)) => {
            shift_date(*t, *d, false)
        }
        _ => Err(EvalError::unsupported_operation(
            "-",
            lhs.type_name(),
            rhs.type_name(),
        )),
    }
}

/// Combine two values under `*`. Only numbers multiply.
pub(crate) fn multiply(lhs: Value, rhs: Value) -> Result<Value, EvalError> {
    match (&lhs, &rhs) {
        (Value::Int(a), Value::Int(b)) => a
            .checked_mul(*b)
            .map(Value::Int)
            .ok_or(EvalError::Overflow("integer multiplication overflow")),
        (Value::Int(a), Value::Double(b)) => Ok(Value::Double(*a as f64 * b)),
        (Value::Double(a), Value::Int(b)) => Ok(Value::Double(a * *b as f64)),
        (Value::Double(a), Value::Double(b)) => Ok(Value::Double(a * b)),
        _ => Err(EvalError::unsupported_operation(
            "*",
            lhs.type_name(),
            rhs.type_name(),
        )),
    }
}

/// Combine two values under `/`.
///
/// Division always computes in `f64` and yields a double, even when the
/// quotient is exact. An integer zero divisor is rejected; a double zero
/// divisor follows IEEE semantics.
pub(crate) fn divide(lhs: Value, rhs: Value) -> Result<Value, EvalError> {
    match (&lhs, &rhs) {
        (Value::Int(_) | Value::Double(_), Value::Int(0)) => Err(EvalError::DivisionByZero),
        (Value::Int(a), Value::Int(b)) => Ok(Value::Double(*a as f64 / *b as f64)),
        (Value::Int(a), Value::Double(b)) => Ok(Value::Double(*a as f64 / b)),
        (Value::Double(a), Value::Int(b)) => Ok(Value::Double(a / *b as f64)),
        (Value::Double(a), Value::Double(b)) => Ok(Value::Double(a / b)),
        _ => Err(EvalError::unsupported_operation(
            "/",
            lhs.type_name(),
            rhs.type_name(),
        )),
    }
}

fn shift_datetime(t: NaiveDateTime, d: Duration, forward: bool) -> Result<Value, EvalError> {
    let delta = d.to_delta()?;
    let delta = if forward { delta } else { -delta };
    t.checked_add_signed(delta)
        .map(Value::DateTime)
        .ok_or(EvalError::Overflow("date-time shift out of range"))
}

fn shift_date(date: NaiveDate, d: Duration, forward: bool) -> Result<Value, EvalError> {
    if d.unit != Unit::Day {
        return Err(EvalError::UnsupportedOperation(format!(
            "cannot shift a date by {}s, only whole days apply to dates",
            d.unit
        )));
    }
    let delta = d.to_delta()?;
    let delta = if forward { delta } else { -delta };
    date.checked_add_signed(delta)
        .map(Value::Date)
        .ok_or(EvalError::Overflow("date shift out of range"))
}
