//! Wrappers for faer dense matrix types and complex vector operations.
//!
//! This module implements the core traits for `faer::Mat<c64>` and
//! `Vec<c64>`, so explicit superoperator matrices and plain vectors can be
//! used directly with the Arnoldi solver. It also provides the default
//! dense eigensolver backed by faer's general eigendecomposition.

use faer::c64;
use faer::{Mat, MatRef};
use num_traits::Zero;

use crate::core::traits::{EigSolver, InnerProduct, MatVec, Propagator};
use crate::error::KrylindError;
use crate::state::vectorize::{from_vector, to_vector};

/// Conjugated dot product and Euclidean norm for `Vec<c64>`.
impl InnerProduct<Vec<c64>> for () {
    fn dot(&self, x: &Vec<c64>, y: &Vec<c64>) -> c64 {
        x.iter()
            .zip(y.iter())
            .fold(c64::zero(), |acc, (xi, yi)| acc + xi.conj() * yi)
    }

    fn norm(&self, x: &Vec<c64>) -> f64 {
        x.iter().map(|xi| xi.norm_sqr()).sum::<f64>().sqrt()
    }
}

/// Matrix-vector multiplication for `faer::Mat<c64>`.
///
/// Computes `y = A * x` where `A` is a dense complex matrix.
impl MatVec<Vec<c64>> for Mat<c64> {
    fn matvec(&self, x: &Vec<c64>, y: &mut Vec<c64>) {
        assert_eq!(self.nrows(), y.len(), "Output vector y has incorrect length");
        assert_eq!(self.ncols(), x.len(), "Input vector x has incorrect length");
        for i in 0..self.nrows() {
            y[i] = c64::zero();
            for j in 0..self.ncols() {
                y[i] += self[(i, j)] * x[j];
            }
        }
    }
}

/// Propagator backed by an explicit `m x m` matrix acting on vectorized
/// states, with `m = d^2`.
///
/// The wrapped matrix IS the propagator over the full evolution interval, so
/// `advance` applies it exactly once; `time` and `substeps` are ignored.
/// Useful in tests and for callers who already hold an explicit
/// superoperator (e.g. a matrix exponential).
pub struct MatrixPropagator {
    matrix: Mat<c64>,
}

impl MatrixPropagator {
    /// Wrap a square `d^2 x d^2` matrix.
    pub fn new(matrix: Mat<c64>) -> Result<Self, KrylindError> {
        let m = matrix.nrows();
        if matrix.ncols() != m {
            return Err(KrylindError::bad_state(m, m, matrix.ncols()));
        }
        let d = (m as f64).sqrt().round() as usize;
        if d * d != m {
            return Err(KrylindError::InvalidConfig(
                "matrix side must be a perfect square (d^2 for a d-dim Hilbert space)",
            ));
        }
        Ok(Self { matrix })
    }

    /// The wrapped superoperator matrix.
    pub fn matrix(&self) -> MatRef<'_, c64> {
        self.matrix.as_ref()
    }
}

impl Propagator for MatrixPropagator {
    fn advance(
        &self,
        rho: MatRef<'_, c64>,
        _time: f64,
        _substeps: usize,
    ) -> Result<Mat<c64>, KrylindError> {
        let d = rho.nrows();
        if rho.ncols() != d || d * d != self.matrix.ncols() {
            let expected = (self.matrix.ncols() as f64).sqrt().round() as usize;
            return Err(KrylindError::bad_state(expected, rho.nrows(), rho.ncols()));
        }
        let x = to_vector(rho);
        let mut y = vec![c64::zero(); d * d];
        self.matrix.matvec(&x, &mut y);
        from_vector(&y, d)
    }
}

/// Default dense eigensolver: faer's general (non-Hermitian) eigendecomposition.
pub struct FaerEigSolver;

impl EigSolver for FaerEigSolver {
    fn eig(&self, a: MatRef<'_, c64>) -> Result<(Vec<c64>, Mat<c64>), KrylindError> {
        let n = a.nrows();
        if a.ncols() != n {
            return Err(KrylindError::bad_state(n, a.nrows(), a.ncols()));
        }
        let evd = a
            .eigen()
            .map_err(|e| KrylindError::Eigen(format!("{e:?}")))?;
        let s = evd.S().column_vector().as_mat().to_owned();
        let u = evd.U();
        let values = (0..n).map(|i| s[(i, 0)]).collect();
        let vectors = Mat::from_fn(n, n, |i, j| u[(i, j)]);
        Ok((values, vectors))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn dot_is_conjugate_linear_in_first_argument() {
        let x = vec![c64::new(0.0, 1.0), c64::new(2.0, 0.0)];
        let y = vec![c64::new(1.0, 0.0), c64::new(0.0, 3.0)];
        let ip = ();
        let d = ip.dot(&x, &y);
        // conj(i)*1 + conj(2)*3i = -i + 6i = 5i
        assert_abs_diff_eq!(d.re, 0.0, epsilon = 1e-15);
        assert_abs_diff_eq!(d.im, 5.0, epsilon = 1e-15);
    }

    #[test]
    fn norm_matches_manual_sum() {
        let x = vec![c64::new(3.0, 0.0), c64::new(0.0, 4.0)];
        let ip = ();
        assert_abs_diff_eq!(ip.norm(&x), 5.0, epsilon = 1e-15);
    }

    #[test]
    fn matvec_small_complex() {
        let a = Mat::from_fn(2, 2, |i, j| c64::new((i + 2 * j) as f64, 0.0));
        let x = vec![c64::new(1.0, 0.0), c64::new(0.0, 1.0)];
        let mut y = vec![c64::zero(); 2];
        a.matvec(&x, &mut y);
        // row 0: 0*1 + 2*i, row 1: 1*1 + 3*i
        assert_abs_diff_eq!(y[0].im, 2.0, epsilon = 1e-15);
        assert_abs_diff_eq!(y[1].re, 1.0, epsilon = 1e-15);
        assert_abs_diff_eq!(y[1].im, 3.0, epsilon = 1e-15);
    }

    #[test]
    fn matrix_propagator_rejects_bad_shapes() {
        assert!(MatrixPropagator::new(Mat::zeros(3, 4)).is_err());
        // 3x3 is square but 3 is not a perfect square
        assert!(MatrixPropagator::new(Mat::zeros(3, 3)).is_err());

        let p = MatrixPropagator::new(Mat::identity(4, 4)).unwrap();
        let rho = Mat::<c64>::zeros(3, 3);
        assert!(p.advance(rho.as_ref(), 1.0, 1).is_err());
    }

    #[test]
    fn faer_eig_recovers_diagonal_spectrum() {
        let vals = [c64::new(0.9, 0.1), c64::new(0.2, 0.0), c64::new(-0.3, 0.4)];
        let a = Mat::from_fn(3, 3, |i, j| if i == j { vals[i] } else { c64::zero() });
        let (mut got, vecs) = FaerEigSolver.eig(a.as_ref()).unwrap();
        got.sort_by(|x, y| y.norm().total_cmp(&x.norm()));
        let mut want = vals.to_vec();
        want.sort_by(|x, y| y.norm().total_cmp(&x.norm()));
        for (g, w) in got.iter().zip(want.iter()) {
            assert_abs_diff_eq!((g - w).norm(), 0.0, epsilon = 1e-12);
        }
        assert_eq!(vecs.nrows(), 3);
        assert_eq!(vecs.ncols(), 3);
    }

    #[test]
    fn faer_eig_vectors_satisfy_eigen_equation() {
        // small non-normal matrix
        let a = Mat::from_fn(3, 3, |i, j| c64::new((1 + i + 3 * j) as f64 * 0.1, 0.05 * j as f64));
        let (vals, vecs) = FaerEigSolver.eig(a.as_ref()).unwrap();
        for (j, lam) in vals.iter().enumerate() {
            let v: Vec<c64> = (0..3).map(|i| vecs[(i, j)]).collect();
            let mut av = vec![c64::zero(); 3];
            a.matvec(&v, &mut av);
            let resid: f64 = av
                .iter()
                .zip(v.iter())
                .map(|(ai, vi)| (ai - lam * vi).norm_sqr())
                .sum::<f64>()
                .sqrt();
            assert!(resid < 1e-10, "residual {resid} for eigenvalue {lam}");
        }
    }
}
