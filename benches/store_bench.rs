use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use kvarray::KeyValueStore;

fn filled(size: usize) -> KeyValueStore<String, usize> {
    let mut store = KeyValueStore::new();
    for i in 0..size {
        store.set(format!("key{}", i), i).unwrap();
    }
    store
}

fn set_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("set");
    for size in [16_usize, 128, 1024].iter() {
        group.bench_with_input(BenchmarkId::new("fresh keys", size), size, |b, &size| {
            b.iter(|| black_box(filled(size)))
        });
    }
    group.finish();
}

fn get_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("get");
    for size in [16_usize, 128, 1024].iter() {
        let store = filled(*size);
        // the last inserted key sits in the last slot, worst case for the scan
        let last = format!("key{}", size - 1);
        group.bench_with_input(BenchmarkId::new("last key", size), size, |b, _| {
            b.iter(|| black_box(store.get(last.as_str()).unwrap()))
        });
        group.bench_with_input(BenchmarkId::new("missing key", size), size, |b, _| {
            b.iter(|| black_box(store.has_key("missing")))
        });
    }
    group.finish();
}

fn remove_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("remove");
    for size in [16_usize, 128, 1024].iter() {
        group.bench_with_input(BenchmarkId::new("first key", size), size, |b, &size| {
            b.iter_batched(
                || filled(size),
                |mut store| {
                    store.remove("key0");
                    store
                },
                criterion::BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, set_bench, get_bench, remove_bench);
criterion_main!(benches);
