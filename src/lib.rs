// ============================================================================
// Precise Calc Library
// Two-operand expression evaluation over arbitrary-precision decimals
// ============================================================================

//! # Precise Calc
//!
//! Evaluates expressions of the literal shape `<number> <operator> <number>`
//! with arbitrary-precision decimal arithmetic, narrowing to `f64` only at
//! the end, and checks that values carry enough significant digits.
//!
//! ## Features
//!
//! - **Strict grammar**: `-?[0-9]+(\.[0-9]+)?`, operators `+ - * /`, exactly three tokens
//! - **Arbitrary-precision decimals** with a 100-bit working precision floor
//! - **Precision validation**: digit heuristic, reconstruction checks, f64 narrowing checks
//! - **Typed errors** naming the stage and operand that failed
//! - **Stateless**: every call is pure and safe to run concurrently
//!
//! ## Example
//!
//! ```rust
//! use precise_calc::prelude::*;
//!
//! let evaluator = ExpressionEvaluator::new();
//!
//! // Evaluate an expression
//! let sum = evaluator.calculate("123456789.123456789 + 987654321.987654321").unwrap();
//! assert!((sum - 1111111111.11111111).abs() < 1e-6);
//!
//! // Structured errors
//! let err = evaluator.calculate("100 / 0").unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::DivisionByZero);
//!
//! // Full-precision result and a precision report
//! let third = evaluator.evaluate("1 / 3").unwrap();
//! println!("{}", PrecisionValidator::default().report(&third, "division"));
//! ```

pub mod config;
pub mod error;
pub mod evaluator;
pub mod numeric;
pub mod precision;

#[cfg(test)]
mod tests;

// Re-exports for convenience
pub mod prelude {
    pub use crate::config::EvaluatorConfig;
    pub use crate::error::{
        CalcError, CalcResult, ErrorKind, OperandPosition, ParseError, ParseResult,
    };
    pub use crate::evaluator::{sanitize_expression, Expression, ExpressionEvaluator, Operator};
    pub use crate::numeric::{DecimalValue, NumberParser};
    pub use crate::precision::{validate_precision, PrecisionReport, PrecisionValidator};
}
