// ============================================================================
// Evaluator Module
// Expression parsing, validation and evaluation
// ============================================================================

mod engine;
mod expression;
mod operator;
mod sanitize;

pub use engine::ExpressionEvaluator;
pub use expression::Expression;
pub use operator::Operator;
pub use sanitize::sanitize_expression;
