// ============================================================================
// Numeric Module
// Arbitrary-precision decimal arithmetic for expression evaluation
// ============================================================================
//
// This module provides:
// - DecimalValue: signed decimal with a bit-denominated working precision
// - NumberParser: literal grammar + length guard, shared by every call site
// - operations: add/subtract/multiply/divide returning Result
//
// Design principles:
// - No floating-point operations until the final narrowing (to_f64)
// - All arithmetic returns Result (no panics)
// - Values are immutable; every operation returns a new value

mod decimal;
mod parser;

pub mod operations;

pub use decimal::{bits_for_digits, digits_for_bits, DecimalValue, DEFAULT_PRECISION_BITS};
pub use operations::{add, divide, multiply, subtract, MIN_RESULT_PRECISION_BITS};
pub use parser::{NumberParser, DEFAULT_MAX_LITERAL_LENGTH};
