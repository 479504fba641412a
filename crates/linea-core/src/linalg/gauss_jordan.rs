//! Gauss-Jordan elimination: echelon forms, rank, inverse and general
//! linear-system solving.
//!
//! Entries are compared to zero with [`Scalar::is_zero`], so a value within
//! [`EPSILON`](crate::scalar::EPSILON) of zero is treated as a zero pivot.
//! Eliminated entries are written back as exact zeros.

use log::{debug, trace};

use crate::Scalar;
use crate::error::{CoreError, Result};
use crate::linalg::decomp::LuDecomposition;
use crate::linalg::row_ops::{
    add_scaled_row_unchecked, permute_rows, pivot_permutation, scale_row_unchecked,
};
use crate::linalg::solution::LinearSolution;
use crate::matrix::Matrix;
use crate::vector::Vector;

/// Column of the first non-zero entry of `row` among the first `cols`
/// columns.
fn leading_column<S: Scalar>(a: &Matrix<S>, row: usize, cols: usize) -> Option<usize> {
    (0..cols).find(|&j| !a.at(row, j).is_zero())
}

/// Row-echelon form.
///
/// Every pivot has only zeros below it, and each pivot lies strictly to the
/// right of the pivot in the row above. All-zero rows sink to the bottom.
pub fn row_echelon_form<S: Scalar>(a: &Matrix<S>) -> Matrix<S> {
    let (rows, cols) = a.shape();
    let mut m = a.clone();
    let mut pivot_row = 0;

    for col in 0..cols {
        if pivot_row >= rows {
            break;
        }
        m = permute_rows(&m, &pivot_permutation(&m, pivot_row));

        let pivot = m.at(pivot_row, col);
        let Some(inverse) = pivot.multiplicative_inverse().filter(|_| !pivot.is_zero()) else {
            trace!("row_echelon_form: column {col} has no pivot");
            continue;
        };

        for r in (pivot_row + 1)..rows {
            let entry = m.at(r, col);
            if entry.is_zero() {
                continue;
            }
            m = add_scaled_row_unchecked(&m, pivot_row, -(entry * inverse), r);
            m = clear(&m, r, col);
        }
        pivot_row += 1;
    }
    m
}

/// Reduced row-echelon form: row-echelon form with every pivot equal to 1
/// and the only non-zero entry of its column.
pub fn reduced_row_echelon_form<S: Scalar>(a: &Matrix<S>) -> Matrix<S> {
    let mut m = row_echelon_form(a);
    let (rows, cols) = m.shape();

    for r in (0..rows).rev() {
        let Some(c) = leading_column(&m, r, cols) else {
            continue;
        };
        let Some(inverse) = m.at(r, c).multiplicative_inverse() else {
            continue;
        };
        m = scale_row_unchecked(&m, r, inverse);
        m = m.set_unchecked(r, c, S::one());

        for above in 0..r {
            let entry = m.at(above, c);
            if entry.is_zero() {
                continue;
            }
            m = add_scaled_row_unchecked(&m, r, -entry, above);
            m = clear(&m, above, c);
        }
    }
    m
}

/// Number of non-zero rows of the row-echelon form.
///
/// ```
/// # use linea_core::matrix::MatrixBuilder;
/// # use linea_core::linalg::gauss_jordan::rank;
/// let a = MatrixBuilder::<f64>::dense()
///     .from_rows(&[vec![1.0, 2.0], vec![2.0, 4.0]])
///     .unwrap();
/// assert_eq!(rank(&a), 1);
/// ```
pub fn rank<S: Scalar>(a: &Matrix<S>) -> usize {
    let echelon = row_echelon_form(a);
    let (rows, cols) = echelon.shape();
    let r = (0..rows)
        .filter(|&i| leading_column(&echelon, i, cols).is_some())
        .count();
    debug!("rank of {rows}x{cols} matrix: {r}");
    r
}

/// Inverse of a square matrix, or `None` when it is singular.
///
/// Returns an error for non-square input.
pub fn inverse<S: Scalar>(a: &Matrix<S>) -> Result<Option<Matrix<S>>> {
    a.require_square()?;
    let n = a.num_rows();
    if n == 0 {
        return Ok(Some(a.clone()));
    }
    let augmented = a.augment(&a.same_layout_builder().identity(n))?;
    let reduced = reduced_row_echelon_form(&augmented);
    if !reduced.submatrix(0..n, 0..n)?.is_identity() {
        debug!("inverse: {n}x{n} matrix is singular");
        return Ok(None);
    }
    Ok(Some(reduced.submatrix(0..n, n..2 * n)?))
}

/// Solve `Ax = b` and classify the system.
///
/// Free variables of an underdetermined system are set to 1. Returns an
/// error if `b` does not have `A.num_rows()` entries.
///
/// ```
/// # use linea_core::matrix::MatrixBuilder;
/// # use linea_core::vector::VectorBuilder;
/// # use linea_core::linalg::gauss_jordan::solve_by_gaussian_elimination;
/// let a = MatrixBuilder::<f64>::dense()
///     .from_rows(&[vec![2.0, 1.0], vec![1.0, 3.0]])
///     .unwrap();
/// let b = VectorBuilder::dense().from_slice(&[3.0, 5.0]);
/// let solution = solve_by_gaussian_elimination(&a, &b).unwrap();
/// assert!(solution.is_unique());
/// let x = solution.solution().unwrap();
/// assert!((x.get(0).unwrap() - 0.8).abs() < 1e-9);
/// assert!((x.get(1).unwrap() - 1.4).abs() < 1e-9);
/// ```
pub fn solve_by_gaussian_elimination<S: Scalar>(
    a: &Matrix<S>,
    b: &Vector<S>,
) -> Result<LinearSolution<S>> {
    let (rows, cols) = a.shape();
    if b.dimension() != rows {
        return Err(CoreError::DimensionMismatch {
            expected: vec![rows],
            got: vec![b.dimension()],
        });
    }
    if rows == 0 {
        return Ok(LinearSolution::Unique(b.same_layout_builder().zeros(0)));
    }

    let reduced = reduced_row_echelon_form(&a.augment_vector(b)?);
    let mut x = vec![S::one(); cols];
    let mut pivots = 0;

    for r in (0..rows).rev() {
        let rhs = reduced.at(r, cols);
        match leading_column(&reduced, r, cols) {
            None if rhs.is_zero() => {}
            None => {
                debug!("solve: row {r} reduces to 0 = {rhs}");
                return Ok(LinearSolution::Overdetermined);
            }
            Some(c) => {
                let tail: S = ((c + 1)..cols).map(|j| reduced.at(r, j) * x[j]).sum();
                x[c] = rhs + (-tail);
                pivots += 1;
            }
        }
    }

    let x = b.same_layout_builder().from_vec(x);
    if pivots < cols {
        debug!("solve: {} free variable(s)", cols - pivots);
        Ok(LinearSolution::Underdetermined(x))
    } else {
        Ok(LinearSolution::Unique(x))
    }
}

/// Solve `AX = B` column by column.
///
/// Returns `None` unless every column of `B` yields a unique solution.
pub fn solve_matrix_equation<S: Scalar>(a: &Matrix<S>, b: &Matrix<S>) -> Result<Option<Matrix<S>>> {
    if a.num_rows() != b.num_rows() {
        return Err(CoreError::DimensionMismatch {
            expected: vec![a.num_rows()],
            got: vec![b.num_rows()],
        });
    }
    let mut columns = Vec::with_capacity(b.num_cols());
    for column in b.column_vectors() {
        match solve_by_gaussian_elimination(a, &column)? {
            LinearSolution::Unique(x) => columns.push(x),
            _ => return Ok(None),
        }
    }
    a.same_layout_builder().from_column_vectors(&columns).map(Some)
}

/// Determinant of a square matrix, computed from its LU decomposition.
pub fn determinant<S: Scalar>(a: &Matrix<S>) -> Result<S> {
    Ok(LuDecomposition::decompose(a)?.det())
}

fn clear<S: Scalar>(m: &Matrix<S>, row: usize, col: usize) -> Matrix<S> {
    m.set_unchecked(row, col, S::zero())
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::Complex;
    use crate::matrix::MatrixBuilder;
    use crate::vector::VectorBuilder;

    fn m(rows: &[Vec<f64>]) -> Matrix<f64> {
        MatrixBuilder::dense().from_rows(rows).unwrap()
    }

    fn v(data: &[f64]) -> Vector<f64> {
        VectorBuilder::dense().from_slice(data)
    }

    fn is_row_echelon(a: &Matrix<f64>) -> bool {
        let (rows, cols) = a.shape();
        let mut last: Option<usize> = None;
        let mut seen_zero_row = false;
        for r in 0..rows {
            match leading_column(a, r, cols) {
                None => seen_zero_row = true,
                Some(c) => {
                    if seen_zero_row || last.is_some_and(|l| c <= l) {
                        return false;
                    }
                    last = Some(c);
                }
            }
        }
        true
    }

    #[test]
    fn test_row_echelon_form() {
        let a = m(&[vec![1.0, 2.0, 1.0], vec![2.0, 4.0, 0.0], vec![3.0, 7.0, 2.0]]);
        let r = row_echelon_form(&a);
        assert!(is_row_echelon(&r));
        assert!(r.is_upper_triangular());
        assert_eq!(rank(&a), 3);
    }

    #[test]
    fn test_row_echelon_skips_zero_columns() {
        let a = m(&[vec![0.0, 1.0, 2.0], vec![0.0, 2.0, 4.0], vec![0.0, 0.0, 1.0]]);
        let r = row_echelon_form(&a);
        assert!(is_row_echelon(&r));
        assert_eq!(rank(&a), 2);
    }

    #[test]
    fn test_reduced_row_echelon_form() {
        let a = m(&[vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0], vec![7.0, 8.0, 9.0]]);
        let r = reduced_row_echelon_form(&a);
        let expected = m(&[vec![1.0, 0.0, -1.0], vec![0.0, 1.0, 2.0], vec![0.0, 0.0, 0.0]]);
        assert!(r.approx_eq(&expected), "got {r}");
    }

    #[test]
    fn test_echelon_forms_are_idempotent() {
        let a = m(&[vec![2.0, -1.0, 0.0], vec![-1.0, 2.0, -1.0], vec![0.0, -1.0, 2.0]]);
        let r = row_echelon_form(&a);
        assert!(row_echelon_form(&r).approx_eq(&r));
        let rr = reduced_row_echelon_form(&a);
        assert!(reduced_row_echelon_form(&rr).approx_eq(&rr));
        assert!(rr.is_identity());
    }

    #[test]
    fn test_inverse() {
        let a = m(&[vec![4.0, 7.0], vec![2.0, 6.0]]);
        let inv = inverse(&a).unwrap().unwrap();
        assert!(a.multiply(&inv).unwrap().is_identity());
        assert!(inv.multiply(&a).unwrap().is_identity());
    }

    #[test]
    fn test_inverse_singular() {
        let a = m(&[vec![1.0, 1.0], vec![1.0, 1.0]]);
        assert!(inverse(&a).unwrap().is_none());
    }

    #[test]
    fn test_inverse_non_square() {
        assert!(inverse(&m(&[vec![1.0, 2.0]])).is_err());
    }

    #[test]
    fn test_inverse_complex() {
        let a = MatrixBuilder::dense()
            .from_rows(&[
                vec![Complex::new(1.0, 1.0), Complex::new(0.0, 2.0)],
                vec![Complex::new(3.0, 0.0), Complex::new(1.0, -1.0)],
            ])
            .unwrap();
        let inv = inverse(&a).unwrap().unwrap();
        assert!(a.multiply(&inv).unwrap().is_identity());
    }

    #[test]
    fn test_solve_unique() {
        let a = m(&[vec![2.0, 1.0, -1.0], vec![-3.0, -1.0, 2.0], vec![-2.0, 1.0, 2.0]]);
        let b = v(&[8.0, -11.0, -3.0]);
        let s = solve_by_gaussian_elimination(&a, &b).unwrap();
        assert!(s.is_unique());
        assert!(s.solution().unwrap().approx_eq(&v(&[2.0, 3.0, -1.0])));
    }

    #[test]
    fn test_solve_underdetermined() {
        let a = m(&[vec![0.0, 2.0, 1.0], vec![1.0, -2.0, -3.0], vec![-3.0, 6.0, 9.0]]);
        let b = v(&[-4.0, 1.0, -3.0]);
        let s = solve_by_gaussian_elimination(&a, &b).unwrap();
        assert!(s.is_underdetermined());
        let x = s.solution().unwrap();
        assert!(a.apply(x).unwrap().approx_eq(&b));
    }

    #[test]
    fn test_solve_overdetermined() {
        let a = m(&[vec![1.0, 1.0], vec![1.0, 1.0]]);
        let b = v(&[1.0, 2.0]);
        assert!(solve_by_gaussian_elimination(&a, &b).unwrap().is_overdetermined());
    }

    #[test]
    fn test_solve_wide_system() {
        let a = m(&[vec![1.0, 1.0, 1.0]]);
        let s = solve_by_gaussian_elimination(&a, &v(&[3.0])).unwrap();
        assert!(s.is_underdetermined());
        assert!(s.solution().unwrap().approx_eq(&v(&[1.0, 1.0, 1.0])));
    }

    #[test]
    fn test_solve_dimension_mismatch() {
        let a = m(&[vec![1.0, 0.0], vec![0.0, 1.0]]);
        assert!(solve_by_gaussian_elimination(&a, &v(&[1.0])).is_err());
    }

    #[test]
    fn test_solve_matrix_equation() {
        let a = m(&[vec![2.0, 0.0], vec![0.0, 4.0]]);
        let b = m(&[vec![2.0, 4.0], vec![4.0, 8.0]]);
        let x = solve_matrix_equation(&a, &b).unwrap().unwrap();
        assert!(x.approx_eq(&m(&[vec![1.0, 2.0], vec![1.0, 2.0]])));
        let singular = m(&[vec![1.0, 1.0], vec![1.0, 1.0]]);
        assert!(solve_matrix_equation(&singular, &b).unwrap().is_none());
    }

    #[test]
    fn test_empty_matrix() {
        let e = MatrixBuilder::<f64>::dense().empty();
        assert!(row_echelon_form(&e).is_empty());
        assert!(reduced_row_echelon_form(&e).is_empty());
        assert_eq!(rank(&e), 0);
        assert!(inverse(&e).unwrap().unwrap().is_empty());
        assert!(solve_by_gaussian_elimination(&e, &v(&[])).unwrap().is_unique());
    }

    #[test]
    fn test_determinant() {
        let a = m(&[vec![1.0, 2.0], vec![3.0, 4.0]]);
        assert!((determinant(&a).unwrap() + 2.0).abs() < 1e-9);
        assert!(determinant(&m(&[vec![1.0, 2.0]])).is_err());
    }
}
