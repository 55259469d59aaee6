// ============================================================================
// Expression
// One parsed `number operator number` line
// ============================================================================

use super::operator::Operator;
use crate::error::{CalcError, CalcResult, OperandPosition};
use crate::numeric::{DecimalValue, NumberParser};
use std::fmt;
use std::str::FromStr;

/// A parsed binary expression. Built by parsing one line, consumed once.
#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    pub lhs: DecimalValue,
    pub operator: Operator,
    pub rhs: DecimalValue,
}

impl Expression {
    pub fn new(lhs: DecimalValue, operator: Operator, rhs: DecimalValue) -> Self {
        Self { lhs, operator, rhs }
    }

    /// Structural parse of `number operator number`.
    ///
    /// Checks, in order: blank input, token count, operator, first
    /// operand, second operand. Semantic checks are left to [`check`](Self::check).
    pub fn parse_with(text: &str, parser: &NumberParser) -> CalcResult<Self> {
        if text.trim().is_empty() {
            return Err(CalcError::EmptyExpression);
        }

        let tokens: Vec<&str> = text.split_whitespace().collect();
        let [lhs, operator, rhs] = tokens.as_slice() else {
            return Err(CalcError::MalformedExpression {
                tokens: tokens.len(),
            });
        };

        let operator: Operator = operator.parse()?;
        let lhs = parser
            .parse(lhs)
            .map_err(|source| CalcError::InvalidOperand {
                position: OperandPosition::First,
                source,
            })?;
        let rhs = parser
            .parse(rhs)
            .map_err(|source| CalcError::InvalidOperand {
                position: OperandPosition::Second,
                source,
            })?;

        Ok(Self::new(lhs, operator, rhs))
    }

    /// Semantic checks that need no arithmetic: a zero divisor.
    pub fn check(&self) -> CalcResult<()> {
        if self.operator == Operator::Divide && self.rhs.is_zero() {
            return Err(CalcError::DivisionByZero);
        }
        Ok(())
    }

    /// Arbitrary-precision result.
    pub fn evaluate(&self) -> CalcResult<DecimalValue> {
        self.operator.apply(&self.lhs, &self.rhs)
    }
}

impl FromStr for Expression {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_with(s, &NumberParser::default())
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.lhs, self.operator, self.rhs)
    }
}
