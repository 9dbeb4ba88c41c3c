//! Criterion benchmarks for the interval constraint solver.
//!
//! Uses synthetic constraint systems (chained sums, quadratics, unit
//! vectors) to measure propagation and search overhead independent of
//! any domain.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use interval_csp::csp::{Csp, CspConfig};
use interval_csp::interval::Interval;

// ===========================================================================
// Interval arithmetic
// ===========================================================================

fn bench_interval_ops(c: &mut Criterion) {
    let a = Interval::new(-3.0, 7.0);
    let b = Interval::new(0.5, 2.5);
    let straddling = Interval::new(-1.0, 2.0);

    c.bench_function("interval_mul", |bencher| {
        bencher.iter(|| black_box(a) * black_box(b))
    });
    c.bench_function("interval_div_straddling", |bencher| {
        bencher.iter(|| black_box(a) / black_box(straddling))
    });
}

// ===========================================================================
// Propagation only: chain of sums, solved by consistency alone
// ===========================================================================

fn sum_chain(length: usize) -> Csp {
    let mut p = Csp::with_config(CspConfig::default().with_seed(0));
    let mut acc = p.float_var("x0", 0.0, 0.0);
    for i in 1..length {
        let step = p.float_var(format!("x{i}"), 1.0, 1.0);
        acc = p.add(acc, step);
    }
    p.must_equal_constant(acc, (length - 1) as f64).unwrap();
    p
}

fn bench_propagation(c: &mut Criterion) {
    let mut group = c.benchmark_group("propagation_sum_chain");
    for length in [10, 100, 1000] {
        group.bench_with_input(BenchmarkId::from_parameter(length), &length, |b, &n| {
            b.iter(|| {
                let mut p = sum_chain(n);
                p.test_consistency().unwrap();
                black_box(p.variable_count())
            })
        });
    }
    group.finish();
}

// ===========================================================================
// Full search
// ===========================================================================

fn bench_quadratic_solve(c: &mut Criterion) {
    c.bench_function("solve_quadratic", |bencher| {
        let mut p = Csp::with_config(CspConfig::default().with_seed(0));
        let a = p.float_var("a", -3.0, 3.0);
        let square = p.pow(a, 2);
        p.must_equal_constant(square, 4.0).unwrap();
        bencher.iter(|| {
            p.new_solution().unwrap();
            black_box(p.unique_value(a))
        })
    });
}

fn bench_unit_vector_solve(c: &mut Criterion) {
    c.bench_function("solve_unit_vector", |bencher| {
        let span = Interval::new(-1.0, 1.0);
        let mut p = Csp::with_config(
            CspConfig::default().with_max_steps(100_000).with_seed(0),
        );
        let v = p.vec3_var("v", span, span, span);
        let m = p.magnitude(v);
        p.must_equal_constant(m, 1.0).unwrap();
        bencher.iter(|| {
            // Budget failures are retryable; count a retry as part of the
            // measured work.
            while p.new_solution().is_err() {}
            black_box(p.vec_unique_value(v))
        })
    });
}

criterion_group!(
    benches,
    bench_interval_ops,
    bench_propagation,
    bench_quadratic_solve,
    bench_unit_vector_solve
);
criterion_main!(benches);
