// ============================================================================
// Evaluator Configuration
// Precision requirements and input guards for expression evaluation
// ============================================================================

use crate::numeric::{
    digits_for_bits, NumberParser, DEFAULT_MAX_LITERAL_LENGTH, DEFAULT_PRECISION_BITS,
    MIN_RESULT_PRECISION_BITS,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Significant decimal digits results are expected to carry.
pub const DEFAULT_REQUIRED_DIGITS: u32 = 15;

/// Configuration for parsing, evaluation and precision validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EvaluatorConfig {
    /// Significant decimal digits required by the precision validator
    pub required_digits: u32,

    /// Working precision (bits) assigned to parsed literals
    pub precision_bits: u32,

    /// Longest accepted number literal, in characters
    pub max_literal_length: usize,

    /// Precision floor (bits) checked on results before they are returned.
    /// Never below the arithmetic floor of the `numeric` operations.
    pub result_floor_bits: u32,
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self::standard()
    }
}

impl EvaluatorConfig {
    /// 15 significant digits over 100-bit operands
    pub fn standard() -> Self {
        Self {
            required_digits: DEFAULT_REQUIRED_DIGITS,
            precision_bits: DEFAULT_PRECISION_BITS,
            max_literal_length: DEFAULT_MAX_LITERAL_LENGTH,
            result_floor_bits: MIN_RESULT_PRECISION_BITS,
        }
    }

    /// 30 significant digits over 200-bit operands
    pub fn extended() -> Self {
        Self::standard()
            .with_required_digits(30)
            .with_precision_bits(200)
    }

    /// Builder method: Set required significant digits
    pub fn with_required_digits(mut self, digits: u32) -> Self {
        self.required_digits = digits;
        self
    }

    /// Builder method: Set working precision of parsed literals
    pub fn with_precision_bits(mut self, bits: u32) -> Self {
        self.precision_bits = bits;
        self
    }

    /// Builder method: Set the literal length guard
    pub fn with_max_literal_length(mut self, length: usize) -> Self {
        self.max_literal_length = length;
        self
    }

    /// Builder method: Set the result precision floor
    pub fn with_result_floor_bits(mut self, bits: u32) -> Self {
        self.result_floor_bits = bits;
        self
    }

    /// Parser matching this configuration
    pub fn number_parser(&self) -> NumberParser {
        NumberParser::new(self.max_literal_length, self.precision_bits)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.required_digits == 0 {
            return Err("Required digits must be positive".to_string());
        }

        if self.precision_bits < DEFAULT_PRECISION_BITS {
            return Err(format!(
                "Working precision must be at least {} bits, got {}",
                DEFAULT_PRECISION_BITS, self.precision_bits
            ));
        }

        if digits_for_bits(self.precision_bits) < self.required_digits as usize {
            return Err(format!(
                "Working precision of {} bits cannot hold {} decimal digits",
                self.precision_bits, self.required_digits
            ));
        }

        if self.result_floor_bits < MIN_RESULT_PRECISION_BITS {
            return Err(format!(
                "Result precision floor must be at least {} bits, got {}",
                MIN_RESULT_PRECISION_BITS, self.result_floor_bits
            ));
        }

        if self.result_floor_bits > self.precision_bits {
            return Err("Result precision floor exceeds working precision".to_string());
        }

        if self.max_literal_length == 0 {
            return Err("Maximum literal length must be positive".to_string());
        }

        Ok(())
    }
}
