//! Benchmarks for buffer diffing.
//!
//! Measures the lazy diff and the materialized `BufferDiff` (with run
//! coalescing) on a 200x60 screen at several change densities.
//!
//! Run with: cargo bench -p tessera-render --bench diff_bench

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;
use tessera_render::{Buffer, BufferDiff, Cell, Color, Rect, Style};

const AREA: Rect = Rect::new(0, 0, 200, 60);

/// A copy of `base` with every `stride`-th cell changed.
fn changed(base: &Buffer, stride: usize) -> Buffer {
    let mut next = base.clone();
    for i in (0..base.len()).step_by(stride) {
        let (x, y) = base.pos_of(i);
        next.set(x, y, Cell::from_char('#'));
    }
    next
}

fn screen() -> Buffer {
    let mut buf = Buffer::empty(AREA);
    let line = "the quick brown fox 日本語 jumps over the lazy dog ".repeat(4);
    for y in 0..AREA.height {
        buf.set_string(0, y, &line, Style::new().fg(Color::GRAY));
    }
    buf
}

// =============================================================================
// Change density
// =============================================================================

fn bench_diff(c: &mut Criterion) {
    let mut group = c.benchmark_group("diff/density");
    group.throughput(Throughput::Elements(u64::from(AREA.area())));
    let base = screen();

    let densities = [
        ("identical", 0),
        ("sparse_1pct", 100),
        ("dense_25pct", 4),
        ("full", 1),
    ];
    for (name, stride) in densities {
        let next = if stride == 0 {
            base.clone()
        } else {
            changed(&base, stride)
        };

        group.bench_with_input(BenchmarkId::new("lazy", name), &next, |b, next| {
            b.iter(|| black_box(base.diff(black_box(next)).count()))
        });
        group.bench_with_input(BenchmarkId::new("compute_runs", name), &next, |b, next| {
            b.iter(|| black_box(BufferDiff::compute(&base, black_box(next)).runs()))
        });
    }

    group.finish();
}

// =============================================================================
// Frame building
// =============================================================================

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("diff/render");

    group.bench_function("set_string_full_screen", |b| b.iter(|| black_box(screen())));
    group.bench_function("reset", |b| {
        let mut buf = screen();
        b.iter(|| buf.reset())
    });

    group.finish();
}

criterion_group!(benches, bench_diff, bench_render);
criterion_main!(benches);
