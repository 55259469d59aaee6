// ============================================================================
// Number Parser
// Decimal literal -> DecimalValue, shared by validation and evaluation
// ============================================================================

use super::decimal::{DecimalValue, DEFAULT_PRECISION_BITS};
use crate::error::{ParseError, ParseResult};
use num_bigint::BigInt;
use regex::Regex;
use std::str::FromStr;
use std::sync::LazyLock;

/// Longest literal accepted by default, in characters.
pub const DEFAULT_MAX_LITERAL_LENGTH: usize = 1000;

static LITERAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-?[0-9]+(\.[0-9]+)?$").expect("literal pattern is valid"));

/// Parses decimal literals of the shape `-?[0-9]+(\.[0-9]+)?`.
///
/// Exponents, a leading `+`, digit grouping and surrounding garbage are
/// rejected. Surrounding whitespace is trimmed first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberParser {
    max_length: usize,
    precision_bits: u32,
}

impl Default for NumberParser {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_LITERAL_LENGTH, DEFAULT_PRECISION_BITS)
    }
}

impl NumberParser {
    pub fn new(max_length: usize, precision_bits: u32) -> Self {
        Self {
            max_length,
            precision_bits,
        }
    }

    pub fn max_length(&self) -> usize {
        self.max_length
    }

    pub fn precision_bits(&self) -> u32 {
        self.precision_bits
    }

    /// Parse a literal into a `DecimalValue` at this parser's working precision.
    ///
    /// # Errors
    /// - `NumberTooLarge` if the trimmed literal exceeds `max_length` characters
    /// - `InvalidNumberFormat` if it does not match the literal grammar
    pub fn parse(&self, text: &str) -> ParseResult<DecimalValue> {
        let literal = text.trim();

        // Length first: pathological inputs never reach the matcher.
        let length = literal.chars().count();
        if length > self.max_length {
            return Err(ParseError::NumberTooLarge {
                length,
                max: self.max_length,
            });
        }

        if !LITERAL.is_match(literal) {
            return Err(ParseError::InvalidNumberFormat(literal.to_string()));
        }

        let (negative, unsigned) = match literal.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, literal),
        };
        let (integer, fraction) = unsigned.split_once('.').unwrap_or((unsigned, ""));

        let digits = format!("{integer}{fraction}");
        let magnitude = BigInt::parse_bytes(digits.as_bytes(), 10)
            .ok_or_else(|| ParseError::InvalidNumberFormat(literal.to_string()))?;
        let coefficient = if negative { -magnitude } else { magnitude };

        let value = DecimalValue::new(coefficient, fraction.len() as i64, self.precision_bits);
        tracing::trace!(literal_len = length, value = %value, "parsed literal");
        Ok(value)
    }
}

impl FromStr for DecimalValue {
    type Err = ParseError;

    /// Parse with the default parser (1000 characters, 100 bits).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NumberParser::default().parse(s)
    }
}
