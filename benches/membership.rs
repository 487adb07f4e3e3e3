use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use membership_filters::bloom::BloomFilter;
use membership_filters::cuckoo::CuckooFilter;
use membership_filters::search::{BinarySearch, HashSearch, LinearSearch};
use membership_filters::Membership;
use rand::distributions::Alphanumeric;
use rand::{Rng, SeedableRng};
use rand_xorshift::XorShiftRng;

const USERNAME_LEN: usize = 10;
const PROBE_COUNT: usize = 10;

fn usernames(rng: &mut XorShiftRng, count: usize) -> Vec<String> {
    (0..count)
        .map(|_| (&mut *rng).sample_iter(&Alphanumeric).take(USERNAME_LEN).collect())
        .collect()
}

fn variants(item_count: usize) -> Vec<(&'static str, Box<dyn Membership<str>>)> {
    vec![
        (
            "linear",
            Box::new(LinearSearch::<String>::new()) as Box<dyn Membership<str>>,
        ),
        ("binary", Box::new(BinarySearch::<String>::new())),
        ("hash", Box::new(HashSearch::<String>::new())),
        (
            "bloom",
            Box::new(BloomFilter::<String>::new(item_count, 0.01).unwrap()),
        ),
        (
            "cuckoo",
            Box::new(CuckooFilter::<String>::new(item_count, 0.01).unwrap()),
        ),
    ]
}

fn bench_contains(c: &mut Criterion) {
    let mut rng = XorShiftRng::seed_from_u64(0);
    let dataset = usernames(&mut rng, 100_000);
    let probes = usernames(&mut rng, PROBE_COUNT);

    let mut group = c.benchmark_group("contains");
    for &size in &[1_000, 10_000, 100_000] {
        for (label, mut variant) in variants(size) {
            variant.load(dataset[..size].iter().map(String::as_str));
            group.bench_with_input(BenchmarkId::new(label, size), &probes, |b, probes| {
                b.iter(|| {
                    probes
                        .iter()
                        .filter(|probe| variant.contains(probe.as_str()))
                        .count()
                })
            });
        }
    }
    group.finish();
}

criterion_group!(benches, bench_contains);
criterion_main!(benches);
