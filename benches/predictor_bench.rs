//! Cost of one predictor update and of an idle (no-edge) host step.
//!
//! ```bash
//! cargo bench --bench predictor_bench
//! ```

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use clocked_dsp::{AdaptiveFirPredictor, PredictorConfig};

fn bench_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("predictor/update");

    for order in [16, 50, 256] {
        let mut p = AdaptiveFirPredictor::new(PredictorConfig {
            order,
            div_ratio: 1,
            mu: 0.001,
            input_gain: 2.0,
        })
        .unwrap();
        let mut n = 0u64;

        group.bench_function(BenchmarkId::new("order", order), |b| {
            b.iter(|| {
                n += 1;
                let x = (n as f64 * 0.05).sin();
                p.step(false, x, x);
                black_box(p.step(true, black_box(x), black_box(x)))
            })
        });
    }
    group.finish();
}

fn bench_idle_step(c: &mut Criterion) {
    let mut p = AdaptiveFirPredictor::new(PredictorConfig::default()).unwrap();
    c.bench_function("predictor/idle_step", |b| {
        b.iter(|| black_box(p.step(black_box(false), 0.1, 0.2)))
    });
}

criterion_group!(benches, bench_update, bench_idle_step);
criterion_main!(benches);
