//! Benchmarks for layout splitting.
//!
//! Compares a cold solve (caching disabled) with a warm cache hit for a few
//! representative constraint lists.
//!
//! Run with: cargo bench -p tessera-layout --bench layout_bench

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use tessera_layout::{Constraint, Flex, Layout, LayoutCache, Rect};

fn layouts() -> Vec<(&'static str, Layout)> {
    vec![
        (
            "header_body_footer",
            Layout::vertical([
                Constraint::Length(1),
                Constraint::Fill(1),
                Constraint::Length(1),
            ]),
        ),
        (
            "mixed_6",
            Layout::horizontal([
                Constraint::Length(10),
                Constraint::Percentage(20),
                Constraint::Min(5),
                Constraint::Max(30),
                Constraint::Ratio(1, 6),
                Constraint::Fill(2),
            ])
            .spacing(1),
        ),
        (
            "fills_12",
            Layout::horizontal(Constraint::from_fills(1..=12)).flex(Flex::SpaceBetween),
        ),
    ]
}

// =============================================================================
// Cold solve vs cache hit
// =============================================================================

fn bench_split(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout/split");
    let area = Rect::new(0, 0, 200, 60);

    for (name, layout) in layouts() {
        let mut disabled = LayoutCache::new(0);
        group.bench_with_input(BenchmarkId::new("uncached", name), &layout, |b, layout| {
            b.iter(|| black_box(layout.split_with_cache(black_box(area), &mut disabled)))
        });

        let mut warm = LayoutCache::new(16);
        layout.split_with_cache(area, &mut warm);
        group.bench_with_input(BenchmarkId::new("cached", name), &layout, |b, layout| {
            b.iter(|| black_box(layout.split_with_cache(black_box(area), &mut warm)))
        });
    }

    group.finish();
}

// =============================================================================
// Resize sweep (every width misses)
// =============================================================================

fn bench_resize_sweep(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout/resize_sweep");
    let (_, layout) = &layouts()[1];

    group.bench_function("widths_40_to_240", |b| {
        let mut cache = LayoutCache::new(0);
        b.iter(|| {
            for width in 40..240 {
                black_box(layout.split_with_cache(Rect::new(0, 0, width, 1), &mut cache));
            }
        })
    });

    group.finish();
}

criterion_group!(benches, bench_split, bench_resize_sweep);
criterion_main!(benches);
