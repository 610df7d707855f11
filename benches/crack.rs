use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

const ZZZZZZ: [u32; 5] = [0x984FF6EE, 0x7C78078D, 0x4CB1CA08, 0x255303FB, 0x8741D986];

fn bench_full_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("crack");
    group.sample_size(10);

    // zzzzzz is the last candidate in traversal order: the worst case for
    // engines that stop as soon as a match is found.
    group.bench_with_input(
        BenchmarkId::new(sha1_cracker::ENGINE_NAME, "zzzzzz"),
        &ZZZZZZ,
        |b, &target| {
            b.iter(|| black_box(sha1_cracker::crack(black_box(target))));
        },
    );

    // an unreachable digest forces a full, exhaustive search with no early
    // return: the true worst case for wall-clock time.
    group.bench_with_input(
        BenchmarkId::new(sha1_cracker::ENGINE_NAME, "not_found"),
        &[0u32; 5],
        |b, &target| {
            b.iter(|| black_box(sha1_cracker::crack(black_box(target))));
        },
    );

    group.finish();
}

criterion_group!(benches, bench_full_search);
criterion_main!(benches);
