use criterion::{black_box, criterion_group, criterion_main, Criterion};
use shopdx_core::demo_shop;
use shopdx_engine::DiagnosisEngine;

fn bench_diagnose(c: &mut Criterion) {
    let engine = DiagnosisEngine::builtin();
    let shop = demo_shop();
    c.bench_function("diagnose_demo_shop", |b| {
        b.iter(|| engine.diagnose(black_box(&shop)))
    });
}

fn bench_batch(c: &mut Criterion) {
    let engine = DiagnosisEngine::builtin();
    let shops = vec![demo_shop(); 64];
    let runtime = tokio::runtime::Runtime::new().unwrap();
    c.bench_function("diagnose_batch_64", |b| {
        b.iter(|| runtime.block_on(engine.diagnose_batch(black_box(shops.clone()))))
    });
}

criterion_group!(benches, bench_diagnose, bench_batch);
criterion_main!(benches);
