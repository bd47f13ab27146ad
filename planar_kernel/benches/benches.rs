use criterion::{criterion_group, criterion_main, Bencher, BenchmarkId, Criterion};
use planar_kernel::{
    algorithms::{fuse_figure_lists, loop_boolean, BooleanOp, BooleanOptions},
    core::math::Vector2,
    figure::Figure,
    stroke::Loop,
};
mod test_shapes;
use test_shapes::*;

fn bench_loop_boolean(b: &mut Bencher, loops: &(Loop<f64>, Loop<f64>), op: BooleanOp) {
    let options = BooleanOptions::new();
    b.iter(|| loop_boolean(&loops.0, &loops.1, op, &options))
}

fn loop_boolean_group(c: &mut Criterion) {
    let mut group = c.benchmark_group("loop_boolean");
    let vertex_counts = &[16, 128, 1024];
    for &i in vertex_counts {
        let loops = (
            star(i, Vector2::zero()),
            star(i, Vector2::new(20.0, 5.0)),
        );
        group.bench_with_input(BenchmarkId::new("fuse_stars", i), &loops, |b, loops| {
            bench_loop_boolean(b, loops, BooleanOp::Fuse)
        });
        group.bench_with_input(BenchmarkId::new("cut_stars", i), &loops, |b, loops| {
            bench_loop_boolean(b, loops, BooleanOp::Cut)
        });
    }

    group.finish();
}

fn bench_list_fuse(b: &mut Bencher, figures: &[Figure<f64>]) {
    let options = BooleanOptions::new();
    b.iter(|| fuse_figure_lists(figures, &[], &options))
}

fn figure_list_group(c: &mut Criterion) {
    let mut group = c.benchmark_group("figure_list");
    let grid_sizes = &[2, 4, 8];
    for &n in grid_sizes {
        let figures = overlapping_grid(n);
        group.bench_with_input(BenchmarkId::new("fuse_grid", n), &figures, |b, f| {
            bench_list_fuse(b, f)
        });
    }

    group.finish();
}

criterion_group!(booleans, loop_boolean_group, figure_list_group,);
criterion_main!(booleans);
