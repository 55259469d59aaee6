// ============================================================================
// Arithmetic Operations
// Stateless add/subtract/multiply/divide over DecimalValue
// ============================================================================

use super::decimal::DecimalValue;
use crate::error::{CalcError, CalcResult};

/// Lowest working precision an arithmetic result may carry.
pub const MIN_RESULT_PRECISION_BITS: u32 = 50;

/// Fails with `InsufficientPrecision` when `result` is below the floor.
fn ensure_floor(result: DecimalValue, operation: &str) -> CalcResult<DecimalValue> {
    if result.precision() < MIN_RESULT_PRECISION_BITS {
        return Err(CalcError::insufficient_precision(
            operation,
            result.precision(),
            MIN_RESULT_PRECISION_BITS,
        ));
    }
    Ok(result)
}

/// Sum of `a` and `b`.
pub fn add(a: &DecimalValue, b: &DecimalValue) -> CalcResult<DecimalValue> {
    ensure_floor(a + b, "addition")
}

/// Difference `a - b`.
pub fn subtract(a: &DecimalValue, b: &DecimalValue) -> CalcResult<DecimalValue> {
    ensure_floor(a - b, "subtraction")
}

/// Product of `a` and `b`.
pub fn multiply(a: &DecimalValue, b: &DecimalValue) -> CalcResult<DecimalValue> {
    ensure_floor(a * b, "multiplication")
}

/// Quotient `a / b`.
///
/// # Errors
/// `DivisionByZero` when `b` is zero, checked before anything else.
pub fn divide(a: &DecimalValue, b: &DecimalValue) -> CalcResult<DecimalValue> {
    let quotient = a.checked_div(b).ok_or(CalcError::DivisionByZero)?;
    ensure_floor(quotient, "division")
}
