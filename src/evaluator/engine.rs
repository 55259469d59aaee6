// ============================================================================
// Expression Evaluator
// Validates and evaluates `number operator number` expressions end-to-end
// ============================================================================

use super::expression::Expression;
use super::operator::Operator;
use crate::config::EvaluatorConfig;
use crate::error::{CalcError, CalcResult};
use crate::numeric::{DecimalValue, NumberParser};
use crate::precision::PrecisionValidator;

/// Evaluates two-operand expressions with arbitrary-precision arithmetic.
///
/// `validate` and `calculate` share one parse path, so they fail on exactly
/// the same malformed inputs. The evaluator holds only immutable
/// configuration and can be shared across threads.
///
/// # Example
/// ```
/// use precise_calc::prelude::*;
///
/// let evaluator = ExpressionEvaluator::new();
/// assert_eq!(evaluator.calculate("2 + 3").unwrap(), 5.0);
/// assert!(evaluator.validate("100 / 0").is_err());
/// ```
#[derive(Debug, Clone)]
pub struct ExpressionEvaluator {
    parser: NumberParser,
    validator: PrecisionValidator,
    result_floor_bits: u32,
}

impl Default for ExpressionEvaluator {
    fn default() -> Self {
        Self::with_config(EvaluatorConfig::default())
    }
}

impl ExpressionEvaluator {
    /// Create an evaluator with the standard configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an evaluator from configuration
    ///
    /// # Returns
    /// * `Result<ExpressionEvaluator, String>` - Configured evaluator or error
    pub fn from_config(config: EvaluatorConfig) -> Result<Self, String> {
        config.validate()?;
        Ok(Self::with_config(config))
    }

    fn with_config(config: EvaluatorConfig) -> Self {
        Self {
            parser: config.number_parser(),
            validator: PrecisionValidator::from_config(&config),
            result_floor_bits: config.result_floor_bits,
        }
    }

    pub fn parser(&self) -> &NumberParser {
        &self.parser
    }

    pub fn validator(&self) -> &PrecisionValidator {
        &self.validator
    }

    /// Structural parse without semantic checks.
    pub fn parse(&self, text: &str) -> CalcResult<Expression> {
        Expression::parse_with(text, &self.parser)
    }

    /// Parse plus every check that needs no arithmetic.
    fn checked_expression(&self, text: &str) -> CalcResult<Expression> {
        let expression = self.parse(text)?;
        expression.check()?;
        tracing::debug!(%expression, "expression validated");
        Ok(expression)
    }

    /// Check that `text` is a well-formed expression. Performs no arithmetic.
    ///
    /// # Errors
    /// `EmptyExpression`, `MalformedExpression`, `UnsupportedOperator`,
    /// `InvalidOperand` (first or second) or `DivisionByZero`.
    pub fn validate(&self, text: &str) -> CalcResult<()> {
        self.checked_expression(text).map(|_| ())
    }

    /// Validate and evaluate, returning the un-narrowed result.
    pub fn evaluate(&self, text: &str) -> CalcResult<DecimalValue> {
        let expression = self.checked_expression(text)?;
        let result = expression.evaluate()?;
        tracing::debug!(%expression, %result, "expression evaluated");
        Ok(result)
    }

    /// Validate, evaluate and narrow to `f64`.
    ///
    /// # Errors
    /// Any `validate` error, any arithmetic error, or `InsufficientPrecision`
    /// if the arbitrary-precision result is below the precision floor.
    pub fn calculate(&self, text: &str) -> CalcResult<f64> {
        self.calculate_with_source(text).map(|(narrowed, _)| narrowed)
    }

    /// `calculate`, then reject narrowings that lose more than 1e-12
    /// relative error (including overflow to infinity and underflow to zero).
    pub fn calculate_verified(&self, text: &str) -> CalcResult<f64> {
        let (narrowed, precise) = self.calculate_with_source(text)?;
        self.validator.validate_float64_precision(&precise, narrowed)?;
        Ok(narrowed)
    }

    /// Compute, narrow, then check the floor, in that order.
    fn calculate_with_source(&self, text: &str) -> CalcResult<(f64, DecimalValue)> {
        let precise = self.evaluate(text)?;
        let narrowed = precise.to_f64();

        if precise.precision() < self.result_floor_bits {
            return Err(CalcError::insufficient_precision(
                "calculation result",
                precise.precision(),
                self.result_floor_bits,
            ));
        }

        Ok((narrowed, precise))
    }

    /// Operator symbols in fixed order: `+`, `-`, `*`, `/`.
    pub fn supported_operations(&self) -> Vec<&'static str> {
        Operator::ALL.iter().map(|op| op.symbol()).collect()
    }
}
