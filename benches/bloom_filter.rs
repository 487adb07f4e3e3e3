use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use membership_filters::bloom::BloomFilter;

fn bench_insert(c: &mut Criterion) {
    let mut initial_items = 0u32;
    while initial_items < 1024 - 32 {
        c.bench_function(&format!("bench insert {}", initial_items), |b| {
            b.iter_batched_ref(
                || {
                    let mut filter = BloomFilter::<u32>::new(1024, 0.01).unwrap();
                    for i in 0..initial_items {
                        filter.insert(&i);
                    }
                    filter
                },
                |filter| filter.insert(&0xDEADBEEF_u32),
                BatchSize::PerIteration,
            )
        });
        initial_items += 32;
    }
}

fn bench_contains(c: &mut Criterion) {
    let mut filter = BloomFilter::<u32>::new(1024, 0.01).unwrap();
    for i in 0..1024u32 {
        filter.insert(&i);
    }
    c.bench_function("bench contains present", |b| b.iter(|| filter.contains(&512_u32)));
    c.bench_function("bench contains absent", |b| {
        b.iter(|| filter.contains(&0xDEADBEEF_u32))
    });
}

criterion_group!(benches, bench_insert, bench_contains);
criterion_main!(benches);
