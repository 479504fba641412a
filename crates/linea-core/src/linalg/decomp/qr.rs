//! QR decomposition via classical Gram–Schmidt orthogonalization.
//!
//! Decomposes a matrix `A` (m x n, m >= n) with linearly independent columns
//! into `A = QR` where:
//! - `Q` (m x n) has orthonormal columns, `Q^H Q = I`
//! - `R` (n x n) is upper triangular and holds the projection coefficients

use log::trace;

use crate::Scalar;
use crate::error::{CoreError, Result};
use crate::linalg::substitution::solve_by_backward_substitution;
use crate::matrix::Matrix;
use crate::scalar::EPSILON;
use crate::vector::Vector;

/// Result of a QR decomposition.
#[derive(Debug, Clone)]
pub struct QrDecomposition<S: Scalar> {
    q: Matrix<S>,
    r: Matrix<S>,
}

#[allow(clippy::many_single_char_names)]
impl<S: Scalar> QrDecomposition<S> {
    /// Perform QR decomposition on a matrix `A` (m x n, m >= n).
    ///
    /// Returns [`CoreError::LinearlyDependent`] when a column lies (within
    /// tolerance) in the span of the columns before it.
    ///
    /// ```
    /// # use linea_core::matrix::MatrixBuilder;
    /// # use linea_core::linalg::decomp::QrDecomposition;
    /// let a = MatrixBuilder::<f64>::dense()
    ///     .from_rows(&[vec![1.0, 2.0], vec![3.0, 4.0], vec![5.0, 6.0]])
    ///     .unwrap();
    /// let qr = QrDecomposition::decompose(&a).unwrap();
    /// // Q^T Q ≈ I
    /// let qtq = qr.q().adjoint().multiply(qr.q()).unwrap();
    /// assert!(qtq.is_identity());
    /// assert!(qr.q().multiply(qr.r()).unwrap().approx_eq(&a));
    /// ```
    pub fn decompose(a: &Matrix<S>) -> Result<Self> {
        Self::orthogonalize(a, false)
    }

    /// Like [`decompose`](Self::decompose), but a dependent column is given
    /// an orthonormal completion vector in `Q` and a zero diagonal entry in
    /// `R`, so the factorization exists for every `m >= n` matrix.
    pub(crate) fn decompose_completing(a: &Matrix<S>) -> Result<Self> {
        Self::orthogonalize(a, true)
    }

    fn orthogonalize(a: &Matrix<S>, complete: bool) -> Result<Self> {
        let (m, n) = a.shape();
        if m < n {
            return Err(CoreError::InvalidShape {
                shape: vec![m, n],
                reason: "QR decomposition requires m >= n (tall or square matrix)",
            });
        }

        let mut q: Vec<Vector<S>> = Vec::with_capacity(n);
        let mut r = vec![S::zero(); n * n];

        for k in 0..n {
            let column = a.column_unchecked(k);
            let mut u = column.clone();
            for (j, qj) in q.iter().enumerate() {
                let coefficient = column.inner_product(qj)?;
                r[j * n + k] = coefficient;
                u = u.subtract(&qj.scalar_multiply(coefficient))?;
            }

            let norm = u.norm();
            if norm < EPSILON {
                if !complete {
                    return Err(CoreError::LinearlyDependent);
                }
                trace!("qr: column {k} is dependent, completing the basis");
                q.push(completion_vector(a, &q)?);
                continue;
            }
            r[k * n + k] = S::from_f64(norm);
            q.push(u.scalar_multiply(S::from_f64(norm.recip())));
        }

        let builder = a.same_layout_builder();
        Ok(Self {
            q: builder.from_column_vectors(&q)?,
            r: builder.from_vec(n, n, r)?,
        })
    }

    /// The factor `Q` with orthonormal columns (m x n).
    pub fn q(&self) -> &Matrix<S> {
        &self.q
    }

    /// The upper triangular factor `R` (n x n).
    pub fn r(&self) -> &Matrix<S> {
        &self.r
    }

    /// Least-squares solution of `Ax = b`: back substitution on
    /// `Rx = Q^H b`. Exact when `A` is square.
    pub fn solve(&self, b: &Vector<S>) -> Result<Option<Vector<S>>> {
        let projected = self.q.adjoint().apply(b)?;
        solve_by_backward_substitution(&self.r, &projected)
    }
}

/// The standard basis vector with the largest component orthogonal to
/// `basis`, orthogonalized and normalized.
fn completion_vector<S: Scalar>(a: &Matrix<S>, basis: &[Vector<S>]) -> Result<Vector<S>> {
    let m = a.num_rows();
    let builder = a.vector_builder();
    let mut best: Option<(f64, Vector<S>)> = None;
    for i in 0..m {
        let mut u = builder.unit(m, i)?;
        for qj in basis {
            let coefficient = u.inner_product(qj)?;
            u = u.subtract(&qj.scalar_multiply(coefficient))?;
        }
        let norm = u.norm();
        if best.as_ref().is_none_or(|(b, _)| norm > *b) {
            best = Some((norm, u));
        }
    }
    best.and_then(|(_, u)| u.normalize())
        .ok_or(CoreError::LinearlyDependent)
}
