use faer::c64;
use faer::Mat;
use krylind::config::ArnoldiOptions;
use krylind::lindblad::{Liouvillian, RkPropagator};
use krylind::solver::ArnoldiSolver;

fn main() {
    // Driven damped qubit: H = (Ω/2) σx, one decay channel √γ σ⁻.
    let omega = 1.0;
    let gamma: f64 = 1.0;

    let mut h = Mat::<c64>::zeros(2, 2);
    h[(0, 1)] = c64::new(omega / 2.0, 0.0);
    h[(1, 0)] = c64::new(omega / 2.0, 0.0);
    let mut jump = Mat::<c64>::zeros(2, 2);
    jump[(0, 1)] = c64::new(gamma.sqrt(), 0.0);

    let generator = Liouvillian::new(h, vec![jump]).unwrap();
    let propagator = RkPropagator::new(generator);

    // Long evolution interval: the decaying modes are tiny after T = 10,
    // so a handful of iterations pins the steady state down.
    let solver = ArnoldiSolver::new(ArnoldiOptions {
        max_dim: 8,
        time: 10.0,
        substeps: 1000,
        tau: 1e-3,
        min_check: 1,
        how_often: 1,
    });

    let rho0 = Mat::from_fn(2, 2, |i, j| {
        if i == j {
            c64::new(0.5, 0.0)
        } else {
            c64::new(0.1, 0.0)
        }
    });

    let result = solver
        .run(&propagator, propagator.generator(), rho0.as_ref())
        .unwrap();

    println!("stats = {:?}", result.stats);
    for (k, value) in result.eigenvalues.iter().enumerate() {
        println!(
            "eigenpair {k}: propagator eigenvalue = {value}, generator eigenvalue = {}",
            result.generator_eigenvalues[k]
        );
        let rho = &result.eigenvectors[k];
        println!(
            "  steady state (unnormalized trace): rho00 = {}, rho11 = {}, rho01 = {}",
            rho[(0, 0)],
            rho[(1, 1)],
            rho[(0, 1)]
        );
    }
}
