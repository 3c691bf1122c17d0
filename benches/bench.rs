#![allow(clippy::all)] // Clippy will attempt to remove black_box() internals

use criterion::*;
use ndarray::Array2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use splinecache::utils::{linspace, mesh_obs};
use splinecache::{BicubicCache, BilinearCache, BoundaryCondition, CubicCache1D, Interp1D, Interp2D};

enum Kind {
    Interp,
    Extrap,
}

/// Square grid on [0, 1] with random values
fn gen_grid(gridsize: usize) -> (Vec<f64>, Array2<f64>) {
    let mut rng = StdRng::seed_from_u64(0);
    let x = linspace(0.0, 1.0, gridsize);
    let z = Array2::from_shape_simple_fn((gridsize, gridsize), || rng.random::<f64>());
    (x, z)
}

/// Shuffled observation points, inside the grid or straddling its edges
fn gen_obs(size: usize, kind: &Kind) -> (Vec<f64>, Vec<f64>) {
    let m = (size as f64).sqrt() as usize + 2;
    let (lo, hi) = match kind {
        Kind::Interp => (0.0, 1.0),
        Kind::Extrap => (-0.5, 1.5),
    };
    let (mut xs, mut ys) = mesh_obs(&linspace(lo, hi, m), &linspace(lo, hi, m));
    let mut rng = StdRng::seed_from_u64(1);
    for i in (1..xs.len()).rev() {
        let j = rng.random_range(0..=i);
        xs.swap(i, j);
        ys.swap(i, j);
    }
    xs.truncate(size);
    ys.truncate(size);
    (xs, ys)
}

macro_rules! bench_eval_specific {
    ($group:ident, $gridsize:expr, $size:expr, $kind:expr) => {
        $group.throughput(Throughput::Elements(*$size as u64));
        let (x, z) = gen_grid($gridsize);
        let (xs, ys) = gen_obs(*$size, &$kind);
        let mut out = vec![0.0; *$size];

        let lin = BilinearCache::new(&x, &x, z.view(), 0.0).unwrap();
        $group.bench_with_input(
            BenchmarkId::new(format!("Bilinear {0}x{0}", $gridsize), $size),
            $size,
            |b, _| b.iter(|| black_box(lin.interp(&xs, &ys, &mut out).unwrap())),
        );

        let cub = BicubicCache::new(&x, &x, z.view(), BoundaryCondition::Free, 0.0).unwrap();
        $group.bench_with_input(
            BenchmarkId::new(format!("Bicubic {0}x{0}", $gridsize), $size),
            $size,
            |b, _| b.iter(|| black_box(cub.interp(&xs, &ys, &mut out).unwrap())),
        );
    };
}

fn bench_eval(c: &mut Criterion) {
    for kind in [Kind::Interp, Kind::Extrap] {
        let name = match kind {
            Kind::Interp => "Eval Interp",
            Kind::Extrap => "Eval Extrap",
        };
        let mut group = c.benchmark_group(name);
        for size in [1, 100, 10_000].iter() {
            bench_eval_specific!(group, 50, size, kind);
        }
        group.finish();
    }
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("Build");
    for gridsize in [10, 50, 200].iter() {
        let (x, z) = gen_grid(*gridsize);
        group.throughput(Throughput::Elements((gridsize * gridsize) as u64));

        for boundary in [BoundaryCondition::Free, BoundaryCondition::NotAKnot] {
            group.bench_with_input(
                BenchmarkId::new(format!("Bicubic {boundary}"), gridsize),
                gridsize,
                |b, _| {
                    b.iter(|| {
                        black_box(BicubicCache::new(&x, &x, z.view(), boundary, 0.0).unwrap())
                    })
                },
            );
        }

        group.bench_with_input(BenchmarkId::new("Bilinear", gridsize), gridsize, |b, _| {
            b.iter(|| black_box(BilinearCache::new(&x, &x, z.view(), 0.0).unwrap()))
        });

        let row = z.row(0).to_vec();
        group.bench_with_input(BenchmarkId::new("Cubic 1D free", gridsize), gridsize, |b, _| {
            b.iter(|| {
                let curve = CubicCache1D::new(&x, &row, BoundaryCondition::Free).unwrap();
                black_box(curve.eval_one(0.5).unwrap())
            })
        });
    }
    group.finish();

    // Dense thin-plate solve, one row per sample
    let mut group = c.benchmark_group("Build Smoothed");
    group.sample_size(10);
    for gridsize in [10, 30].iter() {
        let (x, z) = gen_grid(*gridsize);
        group.throughput(Throughput::Elements((gridsize * gridsize) as u64));
        group.bench_with_input(BenchmarkId::new("Bicubic free", gridsize), gridsize, |b, _| {
            b.iter(|| {
                black_box(BicubicCache::new(&x, &x, z.view(), BoundaryCondition::Free, 1e-3).unwrap())
            })
        });
    }
    group.finish();
}

criterion_group!(benches_build, bench_build);
criterion_group!(benches_eval, bench_eval);
criterion_main!(benches_build, benches_eval);
