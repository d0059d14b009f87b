use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use slate_compiler::Compiler;
use slate_query::{Aggregate, Clause, Filter, Query, Sort};

// ── Helpers ─────────────────────────────────────────────────

/// A query with `n` alternating and/or clauses over a handful of columns.
fn query_with_filters(n: usize) -> Query {
    let mut query = Query::new("bench");
    query.columns = vec!["name".into(), "status".into(), "age".into()];
    query.filters = (0..n)
        .map(|i| {
            let clause = match i % 4 {
                0 => Clause::basic("status", "=", "active"),
                1 => Clause::basic("age", ">=", (i % 80) as i64),
                2 => Clause::basic("name", "like", format!("user {i}%")),
                _ => Clause::In {
                    column: "_id".into(),
                    values: vec!["507f1f77bcf86cd799439011".into(), format!("rec-{i}").into()],
                },
            };
            if i % 3 == 0 {
                Filter::or(clause)
            } else {
                Filter::and(clause)
            }
        })
        .collect();
    query.orders = vec![Sort::desc("age")];
    query.limit = Some(50);
    query
}

// ── Find ────────────────────────────────────────────────────

fn bench_find(c: &mut Criterion) {
    let compiler = Compiler::default();
    let mut group = c.benchmark_group("find");
    for n in [1, 10, 100] {
        let query = query_with_filters(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &query, |b, query| {
            b.iter(|| compiler.compile_find(query).unwrap());
        });
    }
    group.finish();
}

// ── Distinct ────────────────────────────────────────────────

fn bench_distinct(c: &mut Criterion) {
    let compiler = Compiler::default();
    let query = query_with_filters(10);
    c.bench_function("distinct", |b| {
        b.iter(|| compiler.compile_distinct(&query).unwrap());
    });
}

// ── Aggregate ───────────────────────────────────────────────

fn bench_aggregate(c: &mut Criterion) {
    let compiler = Compiler::default();
    let mut group = c.benchmark_group("aggregate");
    for n in [1, 10, 100] {
        let mut query = query_with_filters(n);
        query.groups = vec!["status".into()];
        query.aggregate = Some(Aggregate {
            function: "sum".into(),
            columns: vec!["orders.*.total".into()],
        });
        group.bench_with_input(BenchmarkId::from_parameter(n), &query, |b, query| {
            b.iter(|| compiler.compile_aggregate(query).unwrap());
        });
    }
    group.finish();
}

// ── JSON ────────────────────────────────────────────────────

fn bench_json(c: &mut Criterion) {
    let compiler = Compiler::default();
    let json = serde_json::to_string(&query_with_filters(10)).unwrap();
    c.bench_function("compile_json", |b| {
        b.iter(|| compiler.compile_json(&json).unwrap());
    });
}

criterion_group!(benches, bench_find, bench_distinct, bench_aggregate, bench_json);
criterion_main!(benches);
