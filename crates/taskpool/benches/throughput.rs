use criterion::{criterion_group, criterion_main, Criterion};
use taskpool::{Pool, PoolConfig};

fn submit_throughput(c: &mut Criterion) {
    let pool = Pool::with_config(PoolConfig::new().workers(4));

    c.bench_function("submit 100 no-op tasks", |b| {
        b.iter(|| {
            let handles: Vec<_> = (0..100).map(|i| pool.submit(move || i * 2)).collect();
            for h in handles {
                let _ = h.await_result();
            }
        });
    });
}

criterion_group!(benches, submit_throughput);
criterion_main!(benches);
