use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use std::hint::black_box;

use probemap::{Map, Table};
use std::collections::HashMap;

// Benchmarking module for probemap.
// These benchmarks are not exhaustive, and they focus on KPIs like insert, get, remove, etc.
// To run benchmarks, use the following command:
// cargo bench --bench benchmarks

fn bench_insert(c: &mut Criterion) {
    c.bench_function("Map, N=1e4, insert", |b| {
        b.iter(|| {
            let mut map: Map<i32, i32> = Map::new();
            for i in 0..10_000 {
                black_box(map.insert(i, i));
            }
            map
        })
    });
}

fn bench_insert_reserved(c: &mut Criterion) {
    c.bench_function("Map, N=1e4, insert reserved", |b| {
        b.iter(|| {
            let mut map: Map<i32, i32> = Map::new();
            map.reserve(10_000);
            for i in 0..10_000 {
                black_box(map.insert(i, i));
            }
            map
        })
    });
}

fn bench_insert_hashmap(c: &mut Criterion) {
    c.bench_function("HashMap, N=1e4, insert", |b| {
        b.iter(|| {
            let mut map = HashMap::new();
            for i in 0..10_000 {
                black_box(map.insert(i, i));
            }
            map
        })
    });
}

fn bench_table_insert(c: &mut Criterion) {
    c.bench_function("Table, N=1e4, insert", |b| {
        b.iter(|| {
            let mut table: Table<i32> = Table::new();
            for i in 0..10_000 {
                black_box(table.insert(i));
            }
            table
        })
    });
}

fn bench_get(c: &mut Criterion) {
    let mut map: Map<i32, i32> = Map::new();
    for i in 0..10_000 {
        map.insert(i, i);
    }
    c.bench_function("Map, N=1e4, get", |b| {
        b.iter(|| {
            black_box(map.get(&5000));
        })
    });
}

fn bench_get_hashmap(c: &mut Criterion) {
    let mut map = HashMap::new();
    for i in 0..10_000 {
        map.insert(i, i);
    }
    c.bench_function("HashMap, N=1e4, get", |b| {
        b.iter(|| {
            black_box(map.get(&5000));
        })
    });
}

fn bench_get_missing(c: &mut Criterion) {
    let mut map: Map<i32, i32> = Map::new();
    for i in 0..10_000 {
        map.insert(i, i);
    }
    c.bench_function("Map, N=1e4, get missing", |b| {
        b.iter(|| {
            black_box(map.get(&-1));
        })
    });
}

fn bench_remove(c: &mut Criterion) {
    c.bench_function("Map, N=1e4, remove", |b| {
        b.iter_batched(
            || {
                let mut map: Map<i32, i32> = Map::new();
                for i in 0..10_000 {
                    map.insert(i, i);
                }
                map
            },
            |mut map| {
                for i in 0..10_000 {
                    black_box(map.remove(&i));
                }
                map
            },
            BatchSize::LargeInput,
        )
    });
}

fn bench_remove_hashmap(c: &mut Criterion) {
    c.bench_function("HashMap, N=1e4, remove", |b| {
        b.iter_batched(
            || {
                let mut map = HashMap::new();
                for i in 0..10_000 {
                    map.insert(i, i);
                }
                map
            },
            |mut map| {
                for i in 0..10_000 {
                    black_box(map.remove(&i));
                }
                map
            },
            BatchSize::LargeInput,
        )
    });
}

fn bench_churn(c: &mut Criterion) {
    // Insert one key and remove the previous one, which keeps reusing tombstones.
    c.bench_function("Map, N=1e4, insert-remove churn", |b| {
        let mut map: Map<i32, i32> = Map::new();
        map.insert(0, 0);
        let mut next: i32 = 1;
        b.iter(|| {
            for _ in 0..10_000 {
                map.insert(next, next);
                black_box(map.remove(&next.wrapping_sub(1)));
                next = next.wrapping_add(1);
            }
        })
    });
}

fn bench_iter(c: &mut Criterion) {
    let mut map: Map<i32, i32> = Map::new();
    for i in 0..10_000 {
        map.insert(i, i);
    }
    c.bench_function("Map, N=1e4, iter", |b| {
        b.iter(|| {
            let sum: i64 = map.values().map(|&v| v as i64).sum();
            black_box(sum);
        })
    });
}

fn bench_try_reserve(c: &mut Criterion) {
    c.bench_function("Map, N=1e4, try_reserve", |b| {
        let mut map: Map<i32, i32> = Map::with_capacity(20_000);
        b.iter(|| {
            let _ = black_box(map.try_reserve(10_000));
        })
    });
}

fn bench_clone(c: &mut Criterion) {
    let mut map: Map<i32, i32> = Map::new();
    for i in 0..10_000 {
        map.insert(i, i);
    }
    c.bench_function("Map, N=1e4, clone", |b| {
        b.iter(|| {
            black_box(map.clone());
        })
    });
}

fn bench_cmp_eq(c: &mut Criterion) {
    let mut map1: Map<i32, i32> = Map::new();
    for i in 0..10_000 {
        map1.insert(i, i);
    }
    let map2 = map1.clone();
    c.bench_function("Map, N=1e4, cmp eq", |b| {
        b.iter(|| {
            black_box(map1 == map2);
        })
    });
}

fn bench_cmp_eq_hashmap(c: &mut Criterion) {
    let mut map1 = HashMap::new();
    for i in 0..10_000 {
        map1.insert(i, i);
    }
    let map2 = map1.clone();
    c.bench_function("HashMap, N=1e4, cmp eq", |b| {
        b.iter(|| {
            black_box(map1 == map2);
        })
    });
}

criterion_group!(
    benches_insert_get,
    bench_insert,
    bench_insert_reserved,
    bench_insert_hashmap,
    bench_table_insert,
    bench_get,
    bench_get_hashmap,
    bench_get_missing,
);

criterion_group!(
    benches_remove_ops,
    bench_remove,
    bench_remove_hashmap,
    bench_churn,
);

criterion_group!(benches_other_ops, bench_iter, bench_try_reserve, bench_clone);

criterion_group!(benches_comparison, bench_cmp_eq, bench_cmp_eq_hashmap,);

criterion_main!(
    benches_insert_get,
    benches_remove_ops,
    benches_other_ops,
    benches_comparison
);
