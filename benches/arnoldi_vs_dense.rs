use criterion::{black_box, criterion_group, criterion_main, Criterion};
use faer::c64;
use faer::Mat;
use krylind::config::ArnoldiOptions;
use krylind::core::traits::EigSolver;
use krylind::core::wrappers::{FaerEigSolver, MatrixPropagator};
use krylind::lindblad::Liouvillian;
use krylind::solver::{ArnoldiSolver, SelectionRule};

/// Deterministic contraction superoperator on a d-dim Hilbert space.
fn contraction(d: usize) -> Mat<c64> {
    let m = d * d;
    let scale = 0.8 / m as f64;
    let mut a = Mat::from_fn(m, m, |i, j| {
        let t = (i + m * j) as f64;
        c64::new(scale * t.sin(), scale * t.cos())
    });
    // one dominant near-unit mode
    a[(0, 0)] = c64::new(0.97, 0.0);
    a
}

fn bench_arnoldi_vs_dense(c: &mut Criterion) {
    let d = 6;
    let mat = contraction(d);
    let prop = MatrixPropagator::new(mat.clone()).unwrap();
    let generator = Liouvillian::new(Mat::zeros(d, d), vec![]).unwrap();
    let rho0 = Mat::from_fn(d, d, |i, j| c64::new(1.0 + (i * d + j) as f64, 0.0));

    c.bench_function("krylind arnoldi (subspace only)", |ben| {
        // checkpoints disabled: measure the pure subspace build
        let solver = ArnoldiSolver::new(ArnoldiOptions {
            max_dim: 12,
            time: 1.0,
            substeps: 1,
            tau: 1e-3,
            min_check: 1000,
            how_often: 20,
        })
        .with_selection(SelectionRule::SteadyState);
        ben.iter(|| {
            let result = solver
                .run(black_box(&prop), &generator, black_box(rho0.as_ref()))
                .unwrap();
            black_box(result.stats.iterations)
        })
    });

    c.bench_function("faer dense eig (full superoperator)", |ben| {
        ben.iter(|| {
            let (values, _vectors) = FaerEigSolver.eig(black_box(mat.as_ref())).unwrap();
            black_box(values.len())
        })
    });
}

criterion_group!(benches, bench_arnoldi_vs_dense);
criterion_main!(benches);
