//! Coefficient Builder Module
//! Derives input-output coefficient matrices from a flow matrix and a
//! totals vector.

use ndarray::{Array1, Array2};

/// Build the coefficient matrices A and F from flow matrix Z and total
/// output vector X via
///
/// ```text
/// A[i, j] = Z[i, j] / X[j]
/// F[i, j] = Z[i, j] / X[i]
/// ```
///
/// Division follows IEEE semantics: a zero entry in X yields an infinite
/// or NaN coefficient in that row/column.
pub fn build_coefficient_matrices(
    z: &Array2<f64>,
    x: &Array1<f64>,
) -> (Array2<f64>, Array2<f64>) {
    let n = z.nrows();
    debug_assert_eq!(n, z.ncols());
    debug_assert_eq!(n, x.len());

    let mut a = Array2::zeros((n, n));
    let mut f = Array2::zeros((n, n));
    for i in 0..n {
        for j in 0..n {
            a[[i, j]] = z[[i, j]] / x[j];
            f[[i, j]] = z[[i, j]] / x[i];
        }
    }
    (a, f)
}
