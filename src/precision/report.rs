// ============================================================================
// Precision Report
// Diagnostic summary of a precision check
// ============================================================================

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Outcome of checking one value against the digit requirement.
///
/// Produced on demand by
/// [`PrecisionValidator::precision_report`](super::PrecisionValidator::precision_report);
/// purely diagnostic.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PrecisionReport {
    /// Operand or operation the value belongs to
    pub label: String,

    /// Significant digits the validator requires
    pub required_digits: u32,

    /// Working precision of the value, in bits
    pub precision_bits: u32,

    /// `precision_bits / log2(10)`
    pub approximate_digits: f64,

    /// Value rendered with `required_digits` fractional digits
    pub rendered: String,

    pub passed: bool,

    /// `PASSED` or `FAILED - <reason>`
    pub status: String,
}

impl fmt::Display for PrecisionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Precision Report for {}:", self.label)?;
        writeln!(f, "  Required precision: {} decimal digits", self.required_digits)?;
        writeln!(
            f,
            "  Actual precision: {} bits (≈{:.1} decimal digits)",
            self.precision_bits, self.approximate_digits
        )?;
        writeln!(f, "  Result: {}", self.rendered)?;
        write!(f, "  Status: {}", self.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_layout() {
        let report = PrecisionReport {
            label: "division".to_string(),
            required_digits: 15,
            precision_bits: 100,
            approximate_digits: 30.1,
            rendered: "0.333333333333333".to_string(),
            passed: true,
            status: "PASSED".to_string(),
        };

        let lines: Vec<String> = report.to_string().lines().map(String::from).collect();
        assert_eq!(
            lines,
            vec![
                "Precision Report for division:",
                "  Required precision: 15 decimal digits",
                "  Actual precision: 100 bits (≈30.1 decimal digits)",
                "  Result: 0.333333333333333",
                "  Status: PASSED",
            ]
        );
    }
}
