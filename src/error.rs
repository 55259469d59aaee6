// ============================================================================
// Calculation Errors
// Error taxonomy for parsing, evaluation and precision validation
// ============================================================================

use std::fmt;
use thiserror::Error;

/// Errors raised while turning a literal into a `DecimalValue`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Literal does not match `-?[0-9]+(\.[0-9]+)?`
    #[error("invalid number format: {0}")]
    InvalidNumberFormat(String),

    /// Literal exceeds the configured length guard
    #[error("number too large: {length} characters, maximum {max} allowed")]
    NumberTooLarge { length: usize, max: usize },
}

/// Which side of a binary expression an operand sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperandPosition {
    First,
    Second,
}

impl fmt::Display for OperandPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperandPosition::First => write!(f, "first"),
            OperandPosition::Second => write!(f, "second"),
        }
    }
}

/// Errors that can occur while validating or evaluating an expression.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalcError {
    /// Blank input
    #[error("expression cannot be empty")]
    EmptyExpression,

    /// Input did not split into exactly three tokens
    #[error("invalid format: expected 'number operator number', got {tokens} parts")]
    MalformedExpression { tokens: usize },

    /// Middle token is not one of `+ - * /`
    #[error("unsupported operator: {0}")]
    UnsupportedOperator(String),

    /// One of the numeric tokens failed to parse
    #[error("{position} number validation failed: {source}")]
    InvalidOperand {
        position: OperandPosition,
        #[source]
        source: ParseError,
    },

    /// Division with a zero divisor
    #[error("division by zero detected")]
    DivisionByZero,

    /// Working precision below the required bit budget
    #[error("insufficient precision in {label}: got {actual_bits} bits, need {required_bits} bits")]
    InsufficientPrecision {
        label: String,
        actual_bits: u32,
        required_bits: u32,
    },

    /// Digit heuristic or reconstruction check tripped
    #[error("precision loss detected in {label}")]
    PrecisionLoss { label: String },

    /// Narrowing to f64 lost more than the accepted relative error
    #[error("significant float64 conversion precision loss: relative error {relative_error:.2e}")]
    FloatConversionPrecisionLoss { relative_error: f64 },
}

/// Flat classification of [`CalcError`], looking through operand wrappers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    EmptyExpression,
    MalformedExpression,
    InvalidNumberFormat,
    NumberTooLarge,
    UnsupportedOperator,
    DivisionByZero,
    InsufficientPrecision,
    PrecisionLoss,
    FloatConversionPrecisionLoss,
}

impl ParseError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ParseError::InvalidNumberFormat(_) => ErrorKind::InvalidNumberFormat,
            ParseError::NumberTooLarge { .. } => ErrorKind::NumberTooLarge,
        }
    }
}

impl CalcError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CalcError::EmptyExpression => ErrorKind::EmptyExpression,
            CalcError::MalformedExpression { .. } => ErrorKind::MalformedExpression,
            CalcError::UnsupportedOperator(_) => ErrorKind::UnsupportedOperator,
            CalcError::InvalidOperand { source, .. } => source.kind(),
            CalcError::DivisionByZero => ErrorKind::DivisionByZero,
            CalcError::InsufficientPrecision { .. } => ErrorKind::InsufficientPrecision,
            CalcError::PrecisionLoss { .. } => ErrorKind::PrecisionLoss,
            CalcError::FloatConversionPrecisionLoss { .. } => {
                ErrorKind::FloatConversionPrecisionLoss
            },
        }
    }

    /// Operand that triggered the error, if any.
    pub fn operand(&self) -> Option<OperandPosition> {
        match self {
            CalcError::InvalidOperand { position, .. } => Some(*position),
            _ => None,
        }
    }

    pub(crate) fn insufficient_precision(
        label: impl Into<String>,
        actual_bits: u32,
        required_bits: u32,
    ) -> Self {
        CalcError::InsufficientPrecision {
            label: label.into(),
            actual_bits,
            required_bits,
        }
    }
}

/// Result type alias for parsing operations
pub type ParseResult<T> = Result<T, ParseError>;

/// Result type alias for evaluation and validation
pub type CalcResult<T> = Result<T, CalcError>;
