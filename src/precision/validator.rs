// ============================================================================
// Precision Validator
// Significant-digit and reconstruction checks over DecimalValue results
// ============================================================================

use super::report::PrecisionReport;
use crate::config::{EvaluatorConfig, DEFAULT_REQUIRED_DIGITS};
use crate::error::{CalcError, CalcResult};
use crate::numeric::{bits_for_digits, DecimalValue, DEFAULT_PRECISION_BITS};
use num_bigint::BigInt;

/// Relative error allowed when reconstructing an operand (1e-15).
const RECONSTRUCTION_TOLERANCE_PLACES: i64 = 15;

/// Relative error allowed when narrowing to `f64` (1e-12).
const FLOAT_CONVERSION_TOLERANCE_PLACES: i64 = 12;

/// `10^-places` as an exact decimal.
fn tolerance(places: i64) -> DecimalValue {
    DecimalValue::new(BigInt::from(1), places, DEFAULT_PRECISION_BITS)
}

/// `|diff| / |reference|`, or `None` when the reference is zero.
fn relative_error(diff: &DecimalValue, reference: &DecimalValue) -> Option<DecimalValue> {
    diff.abs().checked_div(&reference.abs())
}

/// True when `diff` is nonzero and large relative to `reference`.
///
/// A nonzero difference against a zero reference always counts as loss.
fn exceeds_tolerance(diff: &DecimalValue, reference: &DecimalValue, places: i64) -> bool {
    if diff.is_zero() {
        return false;
    }
    match relative_error(diff, reference) {
        Some(error) => error > tolerance(places),
        None => true,
    }
}

/// Checks that values and operation results carry enough significant digits.
///
/// The digit requirement is converted to a bit budget with
/// `ceil(digits × log2 10)`, so the default of 15 digits needs 50 bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrecisionValidator {
    required_digits: u32,
}

impl Default for PrecisionValidator {
    fn default() -> Self {
        Self::new(DEFAULT_REQUIRED_DIGITS)
    }
}

impl PrecisionValidator {
    pub fn new(required_digits: u32) -> Self {
        Self { required_digits }
    }

    pub fn from_config(config: &EvaluatorConfig) -> Self {
        Self::new(config.required_digits)
    }

    #[inline]
    pub fn required_digits(&self) -> u32 {
        self.required_digits
    }

    /// Bit budget equivalent to the required digit count.
    #[inline]
    pub fn required_bits(&self) -> u32 {
        bits_for_digits(self.required_digits as usize)
    }

    /// Check a single value against the bit budget and the digit heuristic.
    ///
    /// # Errors
    /// - `InsufficientPrecision(label)` if the working precision is below budget
    /// - `PrecisionLoss(label)` if [`has_precision_loss`](Self::has_precision_loss) trips
    pub fn validate_result(&self, value: &DecimalValue, label: &str) -> CalcResult<()> {
        let required_bits = self.required_bits();
        if value.precision() < required_bits {
            tracing::warn!(
                label,
                actual_bits = value.precision(),
                required_bits,
                "insufficient working precision"
            );
            return Err(CalcError::insufficient_precision(
                label,
                value.precision(),
                required_bits,
            ));
        }

        if self.has_precision_loss(value) {
            tracing::warn!(label, value = %value, "precision loss heuristic tripped");
            return Err(CalcError::PrecisionLoss {
                label: label.to_string(),
            });
        }

        Ok(())
    }

    /// Nonzero-digit heuristic.
    ///
    /// Renders the value with `2 × required_digits` fractional digits and
    /// counts the characters `1`-`9` left to right, stopping once the count
    /// reaches `required_digits`. Zeros, the sign and the point are skipped,
    /// not counted. Returns true if the end of the string is reached first.
    ///
    /// This is not a significant-figure count: `100.5` has two nonzero
    /// digits and `1.000000000000001` has two.
    pub fn has_precision_loss(&self, value: &DecimalValue) -> bool {
        let required = self.required_digits as usize;
        let rendered = value.to_fixed(2 * required);

        let mut counted = 0;
        for c in rendered.chars() {
            if matches!(c, '1'..='9') {
                counted += 1;
                if counted >= required {
                    break;
                }
            }
        }
        counted < required
    }

    /// Validate both operands and the result of an operation, in that order.
    ///
    /// Operands are labelled `input_a` / `input_b`; the result uses
    /// `operation`. For `"division"` and `"multiplication"` a reconstruction
    /// check follows.
    pub fn validate_operation_precision(
        &self,
        a: &DecimalValue,
        b: &DecimalValue,
        result: &DecimalValue,
        operation: &str,
    ) -> CalcResult<()> {
        self.validate_result(a, "input_a")?;
        self.validate_result(b, "input_b")?;
        self.validate_result(result, operation)?;

        let lossy = match operation {
            "division" => self.has_division_precision_loss(a, b, result),
            "multiplication" => self.has_multiplication_precision_loss(a, b, result),
            _ => false,
        };
        if lossy {
            tracing::warn!(operation, "reconstruction check failed");
            return Err(CalcError::PrecisionLoss {
                label: operation.to_string(),
            });
        }

        Ok(())
    }

    /// `result × b` should reproduce `a` within 1e-15 relative error.
    pub fn has_division_precision_loss(
        &self,
        a: &DecimalValue,
        b: &DecimalValue,
        result: &DecimalValue,
    ) -> bool {
        let reconstructed = result * b;
        exceeds_tolerance(&(&reconstructed - a), a, RECONSTRUCTION_TOLERANCE_PLACES)
    }

    /// `result / a` should reproduce `b` within 1e-15 relative error.
    ///
    /// Skipped (no loss) when `a` is zero, since `b` cannot be recovered.
    pub fn has_multiplication_precision_loss(
        &self,
        a: &DecimalValue,
        b: &DecimalValue,
        result: &DecimalValue,
    ) -> bool {
        let Some(reconstructed) = result.checked_div(a) else {
            return false;
        };
        exceeds_tolerance(&(&reconstructed - b), b, RECONSTRUCTION_TOLERANCE_PLACES)
    }

    /// Check the narrowing of `precise` to `narrowed`.
    ///
    /// # Errors
    /// `FloatConversionPrecisionLoss` when the relative error exceeds 1e-12,
    /// or when `narrowed` is not finite.
    pub fn validate_float64_precision(
        &self,
        precise: &DecimalValue,
        narrowed: f64,
    ) -> CalcResult<()> {
        let Some(widened) = DecimalValue::from_f64(narrowed) else {
            return Err(CalcError::FloatConversionPrecisionLoss {
                relative_error: f64::INFINITY,
            });
        };

        if widened == *precise {
            return Ok(());
        }

        let diff = precise - &widened;
        if !exceeds_tolerance(&diff, precise, FLOAT_CONVERSION_TOLERANCE_PLACES) {
            return Ok(());
        }

        let relative_error = relative_error(&diff, precise)
            .map(|error| error.to_f64())
            .unwrap_or(f64::INFINITY);
        tracing::warn!(relative_error, "lossy f64 narrowing");
        Err(CalcError::FloatConversionPrecisionLoss { relative_error })
    }

    /// `"PASSED"` or `"FAILED - <reason>"`.
    pub fn precision_status(&self, value: &DecimalValue, label: &str) -> String {
        match self.validate_result(value, label) {
            Ok(()) => "PASSED".to_string(),
            Err(e) => format!("FAILED - {e}"),
        }
    }

    /// Structured diagnostic for a value. Not used for control flow.
    pub fn precision_report(&self, value: &DecimalValue, label: &str) -> PrecisionReport {
        let status = self.precision_status(value, label);
        PrecisionReport {
            label: label.to_string(),
            required_digits: self.required_digits,
            precision_bits: value.precision(),
            approximate_digits: f64::from(value.precision()) / std::f64::consts::LOG2_10,
            rendered: value.to_fixed(self.required_digits as usize),
            passed: status == "PASSED",
            status,
        }
    }

    /// Multi-line human-readable report.
    pub fn report(&self, value: &DecimalValue, label: &str) -> String {
        self.precision_report(value, label).to_string()
    }
}

/// Bit-budget-only check, without the digit heuristic.
pub fn validate_precision(value: &DecimalValue, required_digits: u32) -> CalcResult<()> {
    let required_bits = bits_for_digits(required_digits as usize);
    if value.precision() < required_bits {
        return Err(CalcError::insufficient_precision(
            "result",
            value.precision(),
            required_bits,
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn dec(s: &str) -> DecimalValue {
        s.parse().unwrap()
    }

    #[test]
    fn test_required_bits() {
        assert_eq!(PrecisionValidator::default().required_digits(), 15);
        assert_eq!(PrecisionValidator::default().required_bits(), 50);
        assert_eq!(PrecisionValidator::new(30).required_bits(), 100);
    }

    #[test]
    fn test_validate_result() {
        let validator = PrecisionValidator::default();
        assert!(validator
            .validate_result(&dec("123456789.123456789"), "test")
            .is_ok());
    }

    #[test]
    fn test_validate_result_insufficient_bits() {
        let validator = PrecisionValidator::default();
        let value = dec("123456789.123456789").with_precision(49);
        assert_eq!(
            validator.validate_result(&value, "test"),
            Err(CalcError::InsufficientPrecision {
                label: "test".to_string(),
                actual_bits: 49,
                required_bits: 50,
            })
        );
    }

    #[test]
    fn test_has_precision_loss() {
        let validator = PrecisionValidator::default();
        assert!(!validator.has_precision_loss(&dec("123456789.123456789")));
        assert!(validator.has_precision_loss(&dec("1.23")));
        assert!(validator.has_precision_loss(&dec("2")));
    }

    #[test]
    fn test_has_precision_loss_counts_nonzero_digits_only() {
        let validator = PrecisionValidator::default();

        // 15 significant figures, but only 2 nonzero digits
        assert!(validator.has_precision_loss(&dec("100000000000001")));

        // Nonzero digits interleaved with zeros
        assert!(!validator.has_precision_loss(&dec("0.102030405060708091112131415")));

        // Digits beyond 2 × 15 fractional places are not rendered
        let tiny = dec(&format!("0.{}{}", "0".repeat(25), "123456789123456789"));
        assert!(validator.has_precision_loss(&tiny));

        // The sign does not count
        assert!(!validator.has_precision_loss(&dec("-123456789.123456")));
        assert!(validator.has_precision_loss(&dec("-12345678.123456")));
    }

    #[test]
    fn test_validate_operation_precision() {
        let validator = PrecisionValidator::default();
        let a = dec("123456789.123456789");
        let b = dec("987654321.987654321");
        let result = &a + &b;
        assert!(validator
            .validate_operation_precision(&a, &b, &result, "addition")
            .is_ok());
    }

    #[test]
    fn test_validate_operation_precision_labels_operand() {
        let validator = PrecisionValidator::default();
        let a = dec("1.23");
        let b = dec("4.56");
        let result = &a + &b;

        let err = validator
            .validate_operation_precision(&a, &b, &result, "addition")
            .unwrap_err();
        assert_eq!(
            err,
            CalcError::PrecisionLoss {
                label: "input_a".to_string()
            }
        );

        let good = dec("123456789.123456789");
        let err = validator
            .validate_operation_precision(&good, &b, &result, "addition")
            .unwrap_err();
        assert_eq!(
            err,
            CalcError::PrecisionLoss {
                label: "input_b".to_string()
            }
        );

        let err = validator
            .validate_operation_precision(&good, &good, &b, "addition")
            .unwrap_err();
        assert_eq!(
            err,
            CalcError::PrecisionLoss {
                label: "addition".to_string()
            }
        );
    }

    #[test]
    fn test_division_reconstruction() {
        let validator = PrecisionValidator::default();
        let a = dec("10");
        let b = dec("3");
        let result = a.checked_div(&b).unwrap();
        assert!(!validator.has_division_precision_loss(&a, &b, &result));

        let wrong = dec("3.3333");
        assert!(validator.has_division_precision_loss(&a, &b, &wrong));
    }

    #[test]
    fn test_division_reconstruction_zero_dividend() {
        let validator = PrecisionValidator::default();
        let zero = DecimalValue::zero();
        let b = dec("7");
        assert!(!validator.has_division_precision_loss(&zero, &b, &zero));
        assert!(validator.has_division_precision_loss(&zero, &b, &dec("1")));
    }

    #[test]
    fn test_multiplication_reconstruction() {
        let validator = PrecisionValidator::default();
        let a = dec("123456789.123456789");
        let b = dec("2");
        let result = &a * &b;
        assert!(!validator.has_multiplication_precision_loss(&a, &b, &result));

        let off = &result + &dec("0.001");
        assert!(validator.has_multiplication_precision_loss(&a, &b, &off));
    }

    #[test]
    fn test_multiplication_reconstruction_skipped_for_zero_a() {
        let validator = PrecisionValidator::default();
        let zero = DecimalValue::zero();
        assert!(!validator.has_multiplication_precision_loss(&zero, &dec("5"), &zero));
        assert!(!validator.has_multiplication_precision_loss(&dec("5"), &zero, &zero));
    }

    #[test]
    fn test_operation_reconstruction_failure() {
        let validator = PrecisionValidator::default();
        let a = dec("123456789.123456789");
        let b = dec("987654321.987654321");
        let product = &a * &b;
        let wrong = &product * &dec("1.000000000001");

        let err = validator
            .validate_operation_precision(&a, &b, &wrong, "multiplication")
            .unwrap_err();
        assert_eq!(
            err,
            CalcError::PrecisionLoss {
                label: "multiplication".to_string()
            }
        );

        assert!(validator
            .validate_operation_precision(&a, &b, &product, "multiplication")
            .is_ok());

        // Off by one unit in the last integer place is within 1e-15
        let close = &product + &dec("1");
        assert!(validator
            .validate_operation_precision(&a, &b, &close, "multiplication")
            .is_ok());
    }

    #[test]
    fn test_operation_division_reconstruction_failure() {
        let validator = PrecisionValidator::default();
        let a = dec("123456789.123456789");
        let b = dec("987654321.987654321");
        let quotient = a.checked_div(&b).unwrap();
        let wrong = &quotient * &dec("1.000000000001");

        assert_eq!(
            validator.validate_operation_precision(&a, &b, &wrong, "division"),
            Err(CalcError::PrecisionLoss {
                label: "division".to_string()
            })
        );
        assert!(validator
            .validate_operation_precision(&a, &b, &quotient, "division")
            .is_ok());
    }

    #[test]
    fn test_validate_float64_precision() {
        let validator = PrecisionValidator::default();

        let exact = dec("1.23456789012345");
        assert!(validator
            .validate_float64_precision(&exact, exact.to_f64())
            .is_ok());

        let very_precise = dec("1.234567890123456789012345678901234567890");
        assert!(validator
            .validate_float64_precision(&very_precise, very_precise.to_f64())
            .is_ok());

        let half = dec("0.5");
        assert!(validator.validate_float64_precision(&half, 0.5).is_ok());
    }

    #[test]
    fn test_validate_float64_precision_failures() {
        let validator = PrecisionValidator::default();

        let err = validator
            .validate_float64_precision(&dec("1.5"), 1.4)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::FloatConversionPrecisionLoss);

        let err = validator
            .validate_float64_precision(&dec("1.5"), f64::INFINITY)
            .unwrap_err();
        assert_eq!(
            err,
            CalcError::FloatConversionPrecisionLoss {
                relative_error: f64::INFINITY
            }
        );

        // Underflow to zero is a total loss
        let tiny = dec(&format!("0.{}1", "0".repeat(400)));
        let err = validator
            .validate_float64_precision(&tiny, tiny.to_f64())
            .unwrap_err();
        assert_eq!(
            err,
            CalcError::FloatConversionPrecisionLoss {
                relative_error: 1.0
            }
        );
    }

    #[test]
    fn test_precision_status() {
        let validator = PrecisionValidator::default();
        assert_eq!(
            validator.precision_status(&dec("123456789.123456789"), "test"),
            "PASSED"
        );
        assert!(validator
            .precision_status(&dec("1.23"), "test")
            .starts_with("FAILED - precision loss detected in test"));
    }

    #[test]
    fn test_report() {
        let validator = PrecisionValidator::default();
        let report = validator.report(&dec("123456789.123456789"), "test");

        assert!(report.starts_with("Precision Report for test:"));
        assert!(report.contains("Required precision: 15 decimal digits"));
        assert!(report.contains("Actual precision: 100 bits (≈30.1 decimal digits)"));
        assert!(report.contains("Result: 123456789.123456789000000"));
        assert!(report.contains("Status: PASSED"));
    }

    #[test]
    fn test_validate_precision() {
        assert!(validate_precision(&dec("1.23"), 15).is_ok());
        assert!(validate_precision(&dec("1.23"), 30).is_ok());
        assert_eq!(
            validate_precision(&dec("1.23"), 31).unwrap_err().kind(),
            ErrorKind::InsufficientPrecision
        );
    }
}
