use cardinality_sketch::{HyperLogLog, WyHash64};
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const PRECISION: u8 = 12;
const ITEMS: usize = 10_000;

criterion_group!(benches, benchmark);
criterion_main!(benches);

fn benchmark(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);
    let items: Vec<[u8; 8]> = (0..ITEMS).map(|_| rng.gen::<u64>().to_le_bytes()).collect();

    let mut group = c.benchmark_group("write");
    group.throughput(Throughput::Elements(items.len() as u64));
    group.bench_function("wyhash", |b| {
        b.iter(|| {
            let mut sketch = HyperLogLog::with_hash(PRECISION, Box::new(WyHash64::new())).unwrap();
            for item in &items {
                sketch.write(black_box(item)).unwrap();
            }
            sketch
        })
    });
    group.finish();

    let lhs = filled_sketch(&items);
    let rhs_items: Vec<[u8; 8]> = (0..ITEMS).map(|_| rng.gen::<u64>().to_le_bytes()).collect();
    let rhs = filled_sketch(&rhs_items);

    c.bench_function("count", |b| b.iter(|| black_box(&lhs).count()));

    c.bench_function("union", |b| {
        b.iter(|| {
            let mut dst = HyperLogLog::new(PRECISION).unwrap();
            dst.union(black_box(&lhs), black_box(&rhs)).unwrap();
            dst
        })
    });
}

fn filled_sketch(items: &[[u8; 8]]) -> HyperLogLog {
    let mut sketch = HyperLogLog::with_hash(PRECISION, Box::new(WyHash64::new())).unwrap();
    for item in items {
        sketch.write(item).unwrap();
    }
    sketch
}
