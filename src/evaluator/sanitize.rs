// ============================================================================
// Input Sanitization
// Best-effort character filter applied before parsing
// ============================================================================

use regex::Regex;
use std::sync::LazyLock;

static DISALLOWED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^0-9+\-*/.\s]").expect("sanitizer pattern is valid"));

/// Strip every character that cannot appear in an expression.
///
/// Keeps digits, `+ - * / .` and whitespace. This does not validate
/// structure: `2 + 3 + 4` passes through unchanged and still fails later.
pub fn sanitize_expression(expression: &str) -> String {
    DISALLOWED.replace_all(expression, "").into_owned()
}
