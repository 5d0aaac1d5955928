//! Flattening a density-matrix-shaped state into a 1-D complex vector and
//! back, plus Euclidean (Frobenius) normalization.
//!
//! Vectorization is column-stacking: entry `(i, j)` of the matrix lands at
//! position `j * d + i` of the vector. Both directions are exact relabelings;
//! norms carry over unchanged.

use faer::c64;
use faer::{Mat, MatRef};

use crate::error::KrylindError;

/// Column-stack a `d x d` state into a vector of length `d^2`.
pub fn to_vector(rho: MatRef<'_, c64>) -> Vec<c64> {
    let (rows, cols) = (rho.nrows(), rho.ncols());
    let mut v = Vec::with_capacity(rows * cols);
    for j in 0..cols {
        for i in 0..rows {
            v.push(rho[(i, j)]);
        }
    }
    v
}

/// Reshape a vector of length `dim^2` back into a `dim x dim` state.
///
/// A length mismatch is an error, never a truncation.
pub fn from_vector(v: &[c64], dim: usize) -> Result<Mat<c64>, KrylindError> {
    if v.len() != dim * dim {
        return Err(KrylindError::bad_state(dim, v.len(), 1));
    }
    Ok(Mat::from_fn(dim, dim, |i, j| v[j * dim + i]))
}

/// Normalize `v` in place under the Euclidean norm and return the original
/// norm. A (numerically) zero vector is left untouched; the caller decides
/// what a zero norm means.
pub fn normalize(v: &mut [c64]) -> f64 {
    let norm = v.iter().map(|x| x.norm_sqr()).sum::<f64>().sqrt();
    if norm > 0.0 {
        for x in v.iter_mut() {
            *x /= norm;
        }
    }
    norm
}
