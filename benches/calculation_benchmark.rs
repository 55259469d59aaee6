// ============================================================================
// Calculation Benchmarks
// ============================================================================
//
// Benchmark Categories:
// 1. Literal Parsing - NumberParser across literal lengths
// 2. Full Evaluation - validate + calculate per operator
// 3. Precision Validation - digit heuristic and reconstruction checks
// ============================================================================

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use precise_calc::prelude::*;
use std::hint::black_box;

// ============================================================================
// Literal Parsing Benchmarks
// ============================================================================

fn benchmark_number_parser(c: &mut Criterion) {
    let mut group = c.benchmark_group("number_parser");
    let parser = NumberParser::default();

    // Up to the 1000-character guard
    for length in [10usize, 100, 1000].iter() {
        let literal = format!("{}.{}", "7".repeat(length / 2), "3".repeat(length / 2 - 1));

        group.bench_with_input(BenchmarkId::from_parameter(length), &literal, |b, literal| {
            b.iter(|| black_box(parser.parse(literal)));
        });
    }

    group.finish();
}

// ============================================================================
// Full Evaluation Benchmarks
// ============================================================================

fn benchmark_calculate(c: &mut Criterion) {
    let mut group = c.benchmark_group("calculate");
    let evaluator = ExpressionEvaluator::new();

    for op in evaluator.supported_operations() {
        let expression = format!("123456789.123456789 {op} 987654321.987654321");

        group.bench_with_input(BenchmarkId::from_parameter(op), &expression, |b, expression| {
            b.iter(|| black_box(evaluator.calculate(expression)));
        });
    }

    group.bench_function("validate_only", |b| {
        b.iter(|| black_box(evaluator.validate("123456789.123456789 / 987654321.987654321")));
    });

    group.bench_function("rejected_input", |b| {
        b.iter(|| black_box(evaluator.calculate("abc + 5")));
    });

    group.finish();
}

// ============================================================================
// Precision Validation Benchmarks
// ============================================================================

fn benchmark_precision_validator(c: &mut Criterion) {
    let mut group = c.benchmark_group("precision_validator");
    let validator = PrecisionValidator::default();
    let evaluator = ExpressionEvaluator::new();

    let a: DecimalValue = "123456789.123456789".parse().unwrap();
    let b: DecimalValue = "987654321.987654321".parse().unwrap();
    let quotient = evaluator
        .evaluate("123456789.123456789 / 987654321.987654321")
        .unwrap();

    group.bench_function("has_precision_loss", |bench| {
        bench.iter(|| black_box(validator.has_precision_loss(&quotient)));
    });

    group.bench_function("division_operation_check", |bench| {
        bench.iter(|| {
            black_box(validator.validate_operation_precision(&a, &b, &quotient, "division"))
        });
    });

    group.bench_function("float64_narrowing_check", |bench| {
        let narrowed = quotient.to_f64();
        bench.iter(|| black_box(validator.validate_float64_precision(&quotient, narrowed)));
    });

    group.finish();
}

criterion_group!(
    benches,
    benchmark_number_parser,
    benchmark_calculate,
    benchmark_precision_validator,
);
criterion_main!(benches);
