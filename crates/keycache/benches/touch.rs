use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use keycache::KeyCache;

fn make_keys(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("key-{}", i)).collect()
}

fn bench_touch_hit(c: &mut Criterion) {
    let mut group = c.benchmark_group("touch_hit");
    group.sample_size(50);
    group.throughput(Throughput::Elements(1));

    group.bench_function("hit_1000_resident", |b| {
        let keys = make_keys(1000);
        let mut cache = KeyCache::new(1000);

        // Warm the cache
        for key in &keys {
            cache.touch(key);
        }

        let mut counter = 0;
        b.iter(|| {
            black_box(cache.touch(&keys[counter % 1000]));
            counter += 1;
        });
    });

    group.finish();
}

fn bench_touch_miss_evict(c: &mut Criterion) {
    let mut group = c.benchmark_group("touch_miss");
    group.sample_size(50);
    group.throughput(Throughput::Elements(1));

    group.bench_function("miss_with_eviction", |b| {
        let keys = make_keys(1000);
        let mut cache = KeyCache::new(10); // Small cache

        let mut counter = 0;
        b.iter(|| {
            // Cycling over 1000 keys with capacity 10 always misses
            black_box(cache.touch(&keys[counter % 1000]));
            counter += 1;
        });
    });

    group.finish();
}

fn bench_mixed(c: &mut Criterion) {
    let mut group = c.benchmark_group("mixed");
    group.sample_size(50);
    group.throughput(Throughput::Elements(1));

    group.bench_function("hot_set_with_cold_misses", |b| {
        let hot = make_keys(50);
        let cold = make_keys(10_000);
        let mut cache = KeyCache::new(100);

        let mut counter = 0usize;
        b.iter(|| {
            if counter % 4 == 0 {
                black_box(cache.touch(&cold[counter % cold.len()]));
            } else {
                black_box(cache.touch(&hot[counter % hot.len()]));
            }
            counter += 1;
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_touch_hit,
    bench_touch_miss_evict,
    bench_mixed
);
criterion_main!(benches);
