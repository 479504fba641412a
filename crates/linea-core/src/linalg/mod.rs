//! Linear algebra over [`Matrix`] and [`Vector`].
//!
//! Every routine is written directly against the matrix and vector API, for
//! any [`Scalar`]: real (`f64`) or [`Complex`](crate::Complex).
//!
//! | Area | Module | Highlights |
//! |------|--------|------------|
//! | Elementary row operations | [`row_ops`] | scale, add, exchange, pivot |
//! | Elimination | [`gauss_jordan`] | REF, RREF, rank, inverse, solve |
//! | Triangular systems | [`substitution`] | forward / backward substitution |
//! | Decompositions | [`decomp`] | LU, QR, Cholesky, SVD |
//! | Spectra | [`eigen`] | eigenvalues, eigenvectors |
//! | Regression | [`least_squares`] | linear and general fits |
//! | Products | [`chain`] | optimal matrix chain order |

pub mod chain;
pub mod decomp;
pub mod eigen;
pub mod gauss_jordan;
pub mod least_squares;
pub mod row_ops;
pub mod solution;
pub mod substitution;

pub use chain::{ChainOrder, chain_order, chain_product};
pub use decomp::{CholeskyDecomposition, LuDecomposition, QrDecomposition, SvdDecomposition};
pub use eigen::{eigenpairs, eigenvalues, eigenvector_for_eigenvalue};
pub use gauss_jordan::{
    determinant, inverse, rank, reduced_row_echelon_form, row_echelon_form,
    solve_by_gaussian_elimination, solve_matrix_equation,
};
pub use least_squares::{DataPoint, LeastSquaresFit, general_least_squares, linear_least_squares};
pub use solution::LinearSolution;
pub use substitution::{solve_by_backward_substitution, solve_by_forward_substitution};

use crate::Scalar;
use crate::error::Result;
use crate::matrix::Matrix;
use crate::vector::Vector;

/// Solve the linear system `Ax = b`.
///
/// `A` need not be square. Uses Gauss-Jordan elimination internally and
/// reports whether the system has one, many, or no solutions.
///
/// ```
/// # use linea_core::matrix::MatrixBuilder;
/// # use linea_core::vector::VectorBuilder;
/// # use linea_core::linalg;
/// let a = MatrixBuilder::<f64>::dense()
///     .from_rows(&[vec![2.0, 1.0], vec![1.0, 4.0]])
///     .unwrap();
/// let b = VectorBuilder::dense().from_slice(&[5.0, 6.0]);
/// let x = linalg::solve(&a, &b).unwrap().into_solution().unwrap();
/// assert!((x.get(0).unwrap() - 2.0).abs() < 1e-10);
/// assert!((x.get(1).unwrap() - 1.0).abs() < 1e-10);
/// ```
pub fn solve<S: Scalar>(a: &Matrix<S>, b: &Vector<S>) -> Result<LinearSolution<S>> {
    solve_by_gaussian_elimination(a, b)
}

/// Compute the inverse of a square matrix, or `None` if it is singular.
///
/// ```
/// # use linea_core::matrix::MatrixBuilder;
/// # use linea_core::linalg;
/// let a = MatrixBuilder::<f64>::dense()
///     .from_rows(&[vec![2.0, 1.0], vec![1.0, 4.0]])
///     .unwrap();
/// let inv = linalg::inv(&a).unwrap().unwrap();
/// // A * A^-1 ≈ I
/// assert!(a.multiply(&inv).unwrap().is_identity());
/// ```
pub fn inv<S: Scalar>(a: &Matrix<S>) -> Result<Option<Matrix<S>>> {
    inverse(a)
}

/// Compute the determinant of a square matrix.
///
/// Uses LU decomposition internally.
///
/// ```
/// # use linea_core::matrix::MatrixBuilder;
/// # use linea_core::linalg;
/// let a = MatrixBuilder::<f64>::dense()
///     .from_rows(&[vec![2.0, 1.0], vec![1.0, 4.0]])
///     .unwrap();
/// let det = linalg::det(&a).unwrap();
/// assert!((det - 7.0).abs() < 1e-10);
/// ```
pub fn det<S: Scalar>(a: &Matrix<S>) -> Result<S> {
    determinant(a)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Complex;
    use crate::matrix::MatrixBuilder;
    use crate::vector::VectorBuilder;

    #[test]
    fn test_conveniences_agree_with_modules() {
        let a = MatrixBuilder::<f64>::dense()
            .from_rows(&[vec![4.0, 3.0], vec![6.0, 3.0]])
            .unwrap();
        let b = VectorBuilder::dense().from_slice(&[10.0, 12.0]);
        let x = solve(&a, &b).unwrap();
        assert!(x.is_unique());
        assert!(a.apply(x.solution().unwrap()).unwrap().approx_eq(&b));
        assert!((det(&a).unwrap() - -6.0).abs() < 1e-10);
        assert_eq!(inv(&a).unwrap(), inverse(&a).unwrap());
    }

    #[test]
    fn test_complex_solve() {
        let a = MatrixBuilder::dense()
            .from_rows(&[
                vec![Complex::new(1.0, 1.0), Complex::zero()],
                vec![Complex::zero(), Complex::new(0.0, 2.0)],
            ])
            .unwrap();
        let b = VectorBuilder::dense()
            .from_slice(&[Complex::new(2.0, 0.0), Complex::new(4.0, 0.0)]);
        let x = solve(&a, &b).unwrap().into_solution().unwrap();
        assert!(x.get(0).unwrap().approx_eq(Complex::new(1.0, -1.0)));
        assert!(x.get(1).unwrap().approx_eq(Complex::new(0.0, -2.0)));
    }
}
