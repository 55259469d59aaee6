// ============================================================================
// Precision Module
// Heuristic precision-loss detection for arbitrary-precision results
// ============================================================================

mod report;
mod validator;

pub use report::PrecisionReport;
pub use validator::{validate_precision, PrecisionValidator};
