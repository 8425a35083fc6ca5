//! Benchmarks for surface geometry.
//!
//! Run with: cargo bench -p gridstack-layout

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use gridstack_layout::{GridItem, HeightRule, item_rect};
use std::hint::black_box;

fn make_items(n: usize) -> Vec<GridItem> {
    (0..n)
        .map(|i| {
            let k = u16::try_from(i % 4096).unwrap_or(0);
            GridItem::new(i as u64, "card", k % 12, k / 12, 1 + k % 3, 1 + k % 5)
        })
        .collect()
}

fn bench_surface_height(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout/surface_height");

    for n in [10, 100, 1_000, 10_000] {
        let items = make_items(n);
        for rule in [HeightRule::Observed, HeightRule::Tight] {
            group.bench_with_input(
                BenchmarkId::new(format!("{rule:?}"), n),
                &items,
                |b, items| b.iter(|| black_box(rule.surface_height(items, 100))),
            );
        }
    }

    group.finish();
}

fn bench_item_rects(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout/item_rect");

    for n in [100, 1_000] {
        let items = make_items(n);
        group.bench_with_input(BenchmarkId::new("all", n), &items, |b, items| {
            b.iter(|| {
                items
                    .iter()
                    .map(|item| item_rect(item, 100))
                    .fold(0u64, |acc, r| acc.wrapping_add(u64::from(r.height)))
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_surface_height, bench_item_rects);
criterion_main!(benches);
