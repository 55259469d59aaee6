// ============================================================================
// Basic Usage Example
// ============================================================================

use precise_calc::prelude::*;

fn main() {
    #[cfg(feature = "logging")]
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    println!("=== Precise Calc Example ===\n");

    let evaluator = ExpressionEvaluator::new();
    let validator = PrecisionValidator::default();

    println!("Supported operations: {:?}\n", evaluator.supported_operations());

    // Evaluate a handful of expressions
    println!("Evaluating expressions...");
    let inputs = [
        "2 + 3",
        "123456789.123456789 + 987654321.987654321",
        "22 / 7",
        "-4 * 5.5",
        "100 / 0",
        "10 ^ 2",
        "abc + 5",
        "2 +",
    ];
    for input in inputs {
        match evaluator.calculate(input) {
            Ok(value) => println!("  {input:<45} = {value}"),
            Err(e) => println!("  {input:<45} ! {e}"),
        }
    }

    // Untrusted input goes through the sanitizer first
    println!("\nSanitizing input...");
    let raw = "1.5 * (2); DROP TABLE";
    let cleaned = sanitize_expression(raw);
    println!("  {raw:?} -> {cleaned:?} -> {:?}", evaluator.calculate(&cleaned));

    // Inspect a full-precision result
    println!("\nFull-precision division:");
    let expression = "123456789.123456789 / 987654321.987654321";
    let precise = evaluator.evaluate(expression).unwrap();
    let parsed = evaluator.parse(expression).unwrap();
    println!("  {expression} = {precise}");
    println!(
        "  operation check: {:?}",
        validator.validate_operation_precision(&parsed.lhs, &parsed.rhs, &precise, "division")
    );
    println!(
        "  f64 narrowing check: {:?}",
        validator.validate_float64_precision(&precise, precise.to_f64())
    );
    println!("\n{}", validator.report(&precise, "division"));

    println!("\n=== Example Complete ===");
}
