//! Cholesky decomposition for Hermitian positive-definite matrices.
//!
//! Decomposes a Hermitian positive-definite matrix `A` into `A = L L^H`
//! where `L` is lower triangular with positive real diagonal entries.

use log::debug;

use crate::Scalar;
use crate::error::Result;
use crate::linalg::substitution::{solve_by_backward_substitution, solve_by_forward_substitution};
use crate::matrix::Matrix;
use crate::vector::Vector;

/// Result of a Cholesky decomposition.
///
/// Stores the factorization `A = L L^H` where `L` is lower triangular.
#[derive(Debug, Clone)]
pub struct CholeskyDecomposition<S: Scalar> {
    l: Matrix<S>,
}

#[allow(clippy::many_single_char_names)]
impl<S: Scalar> CholeskyDecomposition<S> {
    /// Compute the Cholesky decomposition (Cholesky–Banachiewicz, row by
    /// row).
    ///
    /// Returns `None` if `A` is not square, not Hermitian or not positive
    /// definite.
    ///
    /// ```
    /// # use linea_core::matrix::MatrixBuilder;
    /// # use linea_core::linalg::decomp::CholeskyDecomposition;
    /// let a = MatrixBuilder::<f64>::dense()
    ///     .from_rows(&[vec![4.0, 2.0], vec![2.0, 3.0]])
    ///     .unwrap();
    /// let chol = CholeskyDecomposition::decompose(&a).unwrap();
    /// let l = chol.l();
    /// // Verify L L^T = A
    /// assert!(l.multiply(&l.adjoint()).unwrap().approx_eq(&a));
    /// ```
    #[allow(clippy::neg_cmp_op_on_partial_ord)]
    pub fn decompose(a: &Matrix<S>) -> Option<Self> {
        if !a.is_hermitian() {
            debug!("cholesky: input is not Hermitian");
            return None;
        }
        let n = a.num_rows();
        let mut l = vec![S::zero(); n * n];

        for i in 0..n {
            for j in 0..=i {
                let sum: S = (0..j).map(|k| l[i * n + k] * l[j * n + k].conjugate()).sum();
                let residual = a.at(i, j) + (-sum);
                if i == j {
                    // Hermitian input keeps the diagonal residual real.
                    let d = residual.real();
                    if !(d > 0.0) {
                        debug!("cholesky: non-positive pivot {d} at {i}");
                        return None;
                    }
                    l[i * n + i] = S::from_f64(d).principal_sqrt()?;
                } else {
                    l[i * n + j] = residual.divide(l[j * n + j])?;
                }
            }
        }

        a.same_layout_builder()
            .from_vec(n, n, l)
            .ok()
            .map(|l| Self { l })
    }

    /// The lower triangular factor `L`.
    pub fn l(&self) -> &Matrix<S> {
        &self.l
    }

    /// Solve `Ax = b` via `Ly = b`, then `L^H x = y`.
    pub fn solve(&self, b: &Vector<S>) -> Result<Option<Vector<S>>> {
        let Some(y) = solve_by_forward_substitution(&self.l, b)? else {
            return Ok(None);
        };
        solve_by_backward_substitution(&self.l.adjoint(), &y)
    }
}
