//! LU decomposition with pivoting.
//!
//! Decomposes a square matrix `A` into `PA = LU` where:
//! - `P` is a permutation matrix (the pivoting order plus any row exchanges)
//! - `L` is lower triangular with unit diagonal
//! - `U` is upper triangular
//!
//! The factorization always succeeds for square input; a singular matrix
//! produces a `U` with zeros on its diagonal.

use std::cmp::Ordering;

use log::trace;

use crate::Scalar;
use crate::error::{CoreError, Result};
use crate::linalg::row_ops::{
    permutation_matrix, permute_rows, pivot_permutation, swap_permutation,
};
use crate::linalg::substitution::{solve_by_backward_substitution, solve_by_forward_substitution};
use crate::matrix::Matrix;
use crate::vector::Vector;

/// Result of an LU decomposition.
#[derive(Debug, Clone)]
pub struct LuDecomposition<S: Scalar> {
    l: Matrix<S>,
    u: Matrix<S>,
    p: Matrix<S>,
    /// Row order: row `i` of `PA` is row `order[i]` of `A`.
    order: Vec<usize>,
}

impl<S: Scalar> LuDecomposition<S> {
    /// Perform the LU decomposition of a square matrix.
    ///
    /// ```
    /// # use linea_core::matrix::MatrixBuilder;
    /// # use linea_core::linalg::decomp::LuDecomposition;
    /// let a = MatrixBuilder::<f64>::dense()
    ///     .from_rows(&[vec![2.0, 1.0], vec![1.0, 4.0]])
    ///     .unwrap();
    /// let lu = LuDecomposition::decompose(&a).unwrap();
    /// assert!((lu.det() - 7.0).abs() < 1e-10);
    /// ```
    pub fn decompose(a: &Matrix<S>) -> Result<Self> {
        a.require_square()?;
        let n = a.num_rows();
        let builder = a.same_layout_builder();

        let mut order = pivot_permutation(a, 0);
        let mut u = permute_rows(a, &order);
        // Sub-diagonal multipliers, row-major n x n.
        let mut multipliers = vec![S::zero(); n * n];

        for k in 0..n {
            if u.at(k, k).is_zero() {
                let Some(r) = ((k + 1)..n).find(|&r| !u.at(r, k).is_zero()) else {
                    trace!("lu: column {k} is zero on and below the diagonal");
                    continue;
                };
                trace!("lu: exchanging rows {k} and {r}");
                order.swap(k, r);
                u = permute_rows(&u, &swap_permutation(n, k, r));
                for j in 0..k {
                    multipliers.swap(k * n + j, r * n + j);
                }
            }

            let Some(inverse) = u.at(k, k).multiplicative_inverse() else {
                continue;
            };
            for i in (k + 1)..n {
                multipliers[i * n + k] = u.at(i, k) * inverse;
            }
            let eliminator = builder.from_index_function(n, n, |i, j| {
                if i == j {
                    S::one()
                } else if j == k && i > k {
                    -multipliers[i * n + k]
                } else {
                    S::zero()
                }
            });
            u = eliminator.multiply(&u)?;
            for i in (k + 1)..n {
                u = u.set_unchecked(i, k, S::zero());
            }
        }

        let l = builder.from_index_function(n, n, |i, j| match i.cmp(&j) {
            Ordering::Equal => S::one(),
            Ordering::Greater => multipliers[i * n + j],
            Ordering::Less => S::zero(),
        });
        let p = permutation_matrix(a, &order);
        Ok(Self { l, u, p, order })
    }

    /// The lower triangular factor `L` (unit diagonal).
    pub fn l(&self) -> &Matrix<S> {
        &self.l
    }

    /// The upper triangular factor `U`.
    pub fn u(&self) -> &Matrix<S> {
        &self.u
    }

    /// The permutation matrix `P`.
    pub fn p(&self) -> &Matrix<S> {
        &self.p
    }

    /// Row order applied by `P`.
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    /// Compute the determinant from the factorization.
    ///
    /// `det(A) = sign(P) * product(diag(U))`
    pub fn det(&self) -> S {
        let product = (0..self.u.num_rows())
            .map(|i| self.u.at(i, i))
            .fold(S::one(), |acc, d| acc * d);
        if permutation_is_odd(&self.order) {
            -product
        } else {
            product
        }
    }

    /// Solve `Ax = b` using the factorization: `Ly = Pb`, then `Ux = y`.
    ///
    /// Returns `Ok(None)` when `A` is singular.
    pub fn solve(&self, b: &Vector<S>) -> Result<Option<Vector<S>>> {
        let n = self.order.len();
        if b.dimension() != n {
            return Err(CoreError::DimensionMismatch {
                expected: vec![n],
                got: vec![b.dimension()],
            });
        }
        let permuted = b
            .same_layout_builder()
            .from_index_function(n, |i| b.at(self.order[i]));
        let Some(y) = solve_by_forward_substitution(&self.l, &permuted)? else {
            return Ok(None);
        };
        solve_by_backward_substitution(&self.u, &y)
    }
}

/// Parity of a permutation, by counting the transpositions needed to sort
/// each cycle.
fn permutation_is_odd(order: &[usize]) -> bool {
    let mut visited = vec![false; order.len()];
    let mut transpositions = 0;
    for start in 0..order.len() {
        if visited[start] {
            continue;
        }
        let mut length = 0;
        let mut i = start;
        while !visited[i] {
            visited[i] = true;
            i = order[i];
            length += 1;
        }
        transpositions += length - 1;
    }
    transpositions % 2 == 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Complex;
    use crate::matrix::MatrixBuilder;
    use crate::vector::VectorBuilder;

    fn m(rows: &[Vec<f64>]) -> Matrix<f64> {
        MatrixBuilder::dense().from_rows(rows).unwrap()
    }

    fn check_reconstruction(a: &Matrix<f64>) -> LuDecomposition<f64> {
        let lu = LuDecomposition::decompose(a).unwrap();
        let pa = lu.p().multiply(a).unwrap();
        let product = lu.l().multiply(lu.u()).unwrap();
        assert!(pa.approx_eq(&product), "PA != LU for {a}");
        assert!(lu.l().is_lower_triangular());
        assert!(lu.u().is_upper_triangular());
        lu
    }

    #[test]
    fn test_lu_2x2() {
        let lu = check_reconstruction(&m(&[vec![2.0, 1.0], vec![1.0, 4.0]]));
        assert!((lu.det() - 7.0).abs() < 1e-10);
    }

    #[test]
    fn test_lu_3x3() {
        let a = m(&[vec![2.0, 1.0, 1.0], vec![4.0, 3.0, 3.0], vec![8.0, 7.0, 9.0]]);
        let lu = check_reconstruction(&a);
        assert!((lu.det() - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_lu_needs_row_exchange() {
        // After the first elimination the (1, 1) entry vanishes while (2, 1)
        // does not.
        let a = m(&[vec![1.0, 1.0, 1.0], vec![1.0, 1.0, 2.0], vec![1.0, 2.0, 3.0]]);
        let lu = check_reconstruction(&a);
        assert!((lu.det() + 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_lu_singular() {
        let a = m(&[vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0], vec![7.0, 8.0, 9.0]]);
        let lu = check_reconstruction(&a);
        assert!(lu.det().abs() < 1e-9);
        let b = VectorBuilder::dense().from_slice(&[1.0, 2.0, 3.0]);
        assert!(lu.solve(&b).unwrap().is_none());
    }

    #[test]
    fn test_lu_zero_column() {
        check_reconstruction(&m(&[vec![0.0, 1.0], vec![0.0, 2.0]]));
    }

    #[test]
    fn test_lu_solve() {
        let a = m(&[vec![2.0, 1.0], vec![1.0, 4.0]]);
        let b = VectorBuilder::dense().from_slice(&[5.0, 6.0]);
        let x = LuDecomposition::decompose(&a).unwrap().solve(&b).unwrap().unwrap();
        assert!(x.approx_eq(&VectorBuilder::dense().from_slice(&[2.0, 1.0])));
        let bad = VectorBuilder::dense().from_slice(&[1.0]);
        assert!(LuDecomposition::decompose(&a).unwrap().solve(&bad).is_err());
    }

    #[test]
    fn test_lu_non_square() {
        assert!(LuDecomposition::decompose(&m(&[vec![1.0, 2.0]])).is_err());
    }

    #[test]
    fn test_lu_empty() {
        let lu = LuDecomposition::decompose(&MatrixBuilder::<f64>::dense().empty()).unwrap();
        assert!(lu.l().is_empty());
        assert!((lu.det() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_lu_complex() {
        let a = MatrixBuilder::dense()
            .from_rows(&[
                vec![Complex::new(0.0, 1.0), Complex::new(2.0, 0.0)],
                vec![Complex::new(1.0, 0.0), Complex::new(1.0, 1.0)],
            ])
            .unwrap();
        let lu = LuDecomposition::decompose(&a).unwrap();
        let pa = lu.p().multiply(&a).unwrap();
        assert!(pa.approx_eq(&lu.l().multiply(lu.u()).unwrap()));
        // det = i(1 + i) - 2 = -3 + i
        assert!(lu.det().approx_eq(Complex::new(-3.0, 1.0)));
    }

    #[test]
    fn test_permutation_parity() {
        assert!(!permutation_is_odd(&[0, 1, 2]));
        assert!(permutation_is_odd(&[1, 0, 2]));
        assert!(!permutation_is_odd(&[1, 2, 0]));
    }
}
