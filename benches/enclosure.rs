use criterion::{black_box, criterion_group, criterion_main, Criterion};
use enclosure::prelude::*;

fn bench_arithmetic(c: &mut Criterion) {
    let x = Interval::new(-1.5, 2.0);
    let y = Interval::new(0.5, 3.0);

    c.bench_function("interval_mul", |b| {
        b.iter(|| black_box(&x) * black_box(&y));
    });

    c.bench_function("interval_div", |b| {
        b.iter(|| black_box(&x) / black_box(&y));
    });

    c.bench_function("interval_pow", |b| {
        b.iter(|| black_box(&y).pow(black_box(&x)));
    });

    c.bench_function("interval_cos", |b| {
        b.iter(|| black_box(&x).cos());
    });
}

fn bench_constrain(c: &mut Criterion) {
    let x = Interval::new(0.0, 7.0);
    let a = Interval::new(1.0, 3.0);
    let b_ival = Interval::new(4.0, 6.0);

    c.bench_function("constrain_conjunction", |b| {
        b.iter(|| {
            let cond = black_box(&x).ge(&a) & black_box(&x).le(&b_ival);
            constrain(&x, &cond)
        });
    });
}

fn bench_search(c: &mut Criterion) {
    let xs: Vec<f64> = (0..1024).map(|i| i as f64).collect();
    let key = Interval::new(100.25, 900.75);

    c.bench_function("lower_bound_interval_key", |b| {
        b.iter(|| lower_bound(black_box(&xs), black_box(&key)));
    });
}

criterion_group!(benches, bench_arithmetic, bench_constrain, bench_search);
criterion_main!(benches);
