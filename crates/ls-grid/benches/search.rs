//! Benchmark: single-source vs bidirectional search on a walled map.
//!
//! The map is a 128×128 field with vertical walls every 16 columns, each
//! with one gap alternating top/bottom, so routes snake across the map.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use ls_core::Cell;
use ls_grid::{Connectivity, Grid, GridBuilder, MoverProfile, PathSearch, Terrain, find_bidi_path};

fn serpentine(size: i32) -> Grid {
    let mut b = GridBuilder::new(size, size, Connectivity::Eight);
    for (i, x) in (16..size).step_by(16).enumerate() {
        let (y0, y1) = if i % 2 == 0 { (0, size - 3) } else { (2, size - 1) };
        b = b.fill_rect(Cell::new(x, y0), Cell::new(x, y1), Terrain::Cliff);
    }
    b.build().expect("valid bench map")
}

fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("search");
    let profile = MoverProfile::infantry();

    for size in [64, 128] {
        let grid = serpentine(size);
        let (from, to) = (Cell::new(0, 0), Cell::new(size - 1, size - 1));

        group.bench_with_input(BenchmarkId::new("single", size), &grid, |b, g| {
            b.iter(|| {
                let route = PathSearch::from_cell(g, &profile, from).toward([to]).find_path();
                black_box(route.map(|r| r.total_cost()))
            });
        });

        group.bench_with_input(BenchmarkId::new("bidi", size), &grid, |b, g| {
            b.iter(|| {
                let mut fwd = PathSearch::from_cell(g, &profile, from).toward([to]);
                let mut bwd = PathSearch::from_cell(g, &profile, to).reverse();
                black_box(find_bidi_path(&mut fwd, &mut bwd).map(|r| r.total_cost()))
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_search);
criterion_main!(benches);
