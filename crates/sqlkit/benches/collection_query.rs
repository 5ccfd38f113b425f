use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use sqlkit::{BulkInsert, RowValues, build_collection_query, build_fast_collection_query};

fn bench_chunked(c: &mut Criterion) {
    let mut group = c.benchmark_group("collection_query/chunked");

    for n in [10, 100, 1_000, 10_000] {
        let ids: Vec<i64> = (0..n).collect();
        group.bench_with_input(BenchmarkId::from_parameter(n), &ids, |b, ids| {
            b.iter(|| black_box(build_collection_query("_id", ids.iter().copied()).unwrap()));
        });
    }

    group.finish();
}

fn bench_json(c: &mut Criterion) {
    let mut group = c.benchmark_group("collection_query/json_each");

    for n in [10, 100, 1_000, 10_000] {
        let ids: Vec<i64> = (0..n).collect();
        group.bench_with_input(BenchmarkId::from_parameter(n), &ids, |b, ids| {
            b.iter(|| black_box(build_fast_collection_query("_id", ids.iter().copied()).unwrap()));
        });
    }

    group.finish();
}

fn bench_bulk_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("bulk_insert/build");

    for n in [10, 100, 1_000] {
        let rows: Vec<RowValues> = (0..n)
            .map(|i: i64| {
                RowValues::new()
                    .with("thread_id", i)
                    .with("body", format!("message {i}"))
                    .with("attachment", vec![i as u8; 16])
            })
            .collect();
        let insert = BulkInsert::new("message", ["thread_id", "body", "attachment"]);
        group.bench_with_input(BenchmarkId::from_parameter(n), &rows, |b, rows| {
            b.iter(|| black_box(insert.build(rows).unwrap()));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_chunked, bench_json, bench_bulk_insert);
criterion_main!(benches);
