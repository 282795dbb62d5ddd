//! calc-core: an evaluator for JSON-shaped calculation expressions.
//!
//! Expressions travel over a data-interchange boundary as nested arrays and
//! scalars rather than as source text: an atomic value evaluates to itself,
//! and an ordered sequence names an operator in its first element. The crate
//! evaluates such a tree to a single result value, with numeric arithmetic,
//! temporal arithmetic (date or date-time shifted by a duration), and the
//! `"now"`/`"today"` keywords resolved against an injectable clock.
//!
//! # Quick Start
//!
//! ```
//! use calc_core::{evaluate_json, Output};
//! use serde_json::json;
//!
//! let result = evaluate_json(&json!(["+", 1, 2, 3, 4])).unwrap();
//! assert_eq!(result, Output::Int(10));
//!
//! // Division always yields a fractional-capable result.
//! let result = evaluate_json(&json!(["/", 4, 2])).unwrap();
//! assert_eq!(result, Output::Double(2.0));
//! ```
//!
//! Dates and date-times have no JSON representation, so temporal expressions
//! are built programmatically and evaluated with a chosen clock:
//!
//! ```
//! use calc_core::{evaluate_with, Expr, FixedClock, Operator, Output, Unit};
//! use chrono::NaiveDate;
//!
//! let day = NaiveDate::from_ymd_opt(2000, 1, 20).unwrap();
//! let clock = FixedClock::new(day.and_hms_opt(23, 0, 28).unwrap());
//!
//! // ["-", "today", [180, "days"]]
//! let expr = Expr::Application {
//!     op: Operator::Sub,
//!     operands: vec![
//!         Expr::from("today"),
//!         Expr::DurationLiteral {
//!             amount: Box::new(Expr::Int(180)),
//!             unit: Unit::Day,
//!         },
//!     ],
//! };
//!
//! let result = evaluate_with(&expr, &clock).unwrap();
//! assert_eq!(result, Output::Date(day - chrono::TimeDelta::days(180)));
//! ```
//!
//! # Modules
//!
//! - [`expr`]: the expression sum type and the interchange-boundary decoder
//! - [`eval`]: the evaluation engine, values, errors, and clocks

pub mod eval;
pub mod expr;

pub use eval::{
    evaluate, evaluate_json, evaluate_json_with, evaluate_with, Clock, Duration, EvalError,
    Evaluator, FixedClock, Output, SystemClock, Value,
};
pub use expr::{Expr, Keyword, Operator, Unit};
