//! Elementary row operations and the pivoting strategy.
//!
//! Each operation is equivalent to left-multiplying by an operator matrix;
//! the operators are exposed as [`scaling_operator`], [`addition_operator`],
//! [`exchange_operator`] and [`pivot_operator`]. The operations themselves
//! act on rows directly instead of forming the operator product.

use std::cmp::Ordering;

use crate::Scalar;
use crate::error::{CoreError, Result};
use crate::matrix::Matrix;

fn check_row<S: Scalar>(a: &Matrix<S>, row: usize) -> Result<()> {
    if row >= a.num_rows() {
        return Err(CoreError::IndexOutOfBounds {
            index: vec![row],
            shape: vec![a.num_rows(), a.num_cols()],
        });
    }
    Ok(())
}

// ----------------------------------------------------------------------
// Operations
// ----------------------------------------------------------------------

/// Multiply row `row` by `scalar`.
pub fn scale_row<S: Scalar>(a: &Matrix<S>, row: usize, scalar: S) -> Result<Matrix<S>> {
    check_row(a, row)?;
    Ok(scale_row_unchecked(a, row, scalar))
}

pub(crate) fn scale_row_unchecked<S: Scalar>(a: &Matrix<S>, row: usize, scalar: S) -> Matrix<S> {
    let (rows, cols) = a.shape();
    a.same_layout_builder().from_index_function(rows, cols, |i, j| {
        if i == row { a.at(i, j) * scalar } else { a.at(i, j) }
    })
}

/// `row_target += scalar · row_source`.
pub fn add_scaled_row<S: Scalar>(
    a: &Matrix<S>,
    source: usize,
    scalar: S,
    target: usize,
) -> Result<Matrix<S>> {
    check_row(a, source)?;
    check_row(a, target)?;
    Ok(add_scaled_row_unchecked(a, source, scalar, target))
}

pub(crate) fn add_scaled_row_unchecked<S: Scalar>(
    a: &Matrix<S>,
    source: usize,
    scalar: S,
    target: usize,
) -> Matrix<S> {
    let (rows, cols) = a.shape();
    a.same_layout_builder().from_index_function(rows, cols, |i, j| {
        if i == target {
            a.at(i, j) + scalar * a.at(source, j)
        } else {
            a.at(i, j)
        }
    })
}

/// Swap rows `first` and `second`.
pub fn exchange_rows<S: Scalar>(a: &Matrix<S>, first: usize, second: usize) -> Result<Matrix<S>> {
    check_row(a, first)?;
    check_row(a, second)?;
    Ok(exchange_rows_unchecked(a, first, second))
}

pub(crate) fn exchange_rows_unchecked<S: Scalar>(
    a: &Matrix<S>,
    first: usize,
    second: usize,
) -> Matrix<S> {
    permute_rows(a, &swap_permutation(a.num_rows(), first, second))
}

/// Reorder rows so that rows with fewer leading zeros come first, ties
/// broken by descending magnitude of the first non-zero entry. Returns
/// `P·A` where `P` is [`pivot_operator`]`(A)`.
///
/// ```
/// # use linea_core::matrix::MatrixBuilder;
/// # use linea_core::linalg::row_ops::pivot;
/// let a = MatrixBuilder::<f64>::dense()
///     .from_rows(&[vec![0.0, 1.0], vec![1.0, 0.0], vec![-3.0, 2.0]])
///     .unwrap();
/// let p = pivot(&a);
/// assert_eq!(p.row(0).unwrap().to_vec(), vec![-3.0, 2.0]);
/// assert_eq!(p.row(2).unwrap().to_vec(), vec![0.0, 1.0]);
/// ```
pub fn pivot<S: Scalar>(a: &Matrix<S>) -> Matrix<S> {
    permute_rows(a, &pivot_permutation(a, 0))
}

/// Row order chosen by the pivoting strategy for rows `from..`; rows before
/// `from` keep their place. Entry `i` names the source row of output row `i`.
pub(crate) fn pivot_permutation<S: Scalar>(a: &Matrix<S>, from: usize) -> Vec<usize> {
    let (rows, cols) = a.shape();
    let mut order: Vec<usize> = (0..rows).collect();
    let keys: Vec<(usize, f64)> = (0..rows)
        .map(|i| {
            let leading = (0..cols).take_while(|&j| a.at(i, j).is_zero()).count();
            let magnitude = if leading < cols {
                a.at(i, leading).norm()
            } else {
                0.0
            };
            (leading, magnitude)
        })
        .collect();
    // `sort_by` is stable, so equal keys keep their relative order.
    order[from.min(rows)..].sort_by(|&x, &y| {
        let (zx, mx) = keys[x];
        let (zy, my) = keys[y];
        match zx.cmp(&zy) {
            Ordering::Equal => my.total_cmp(&mx),
            other => other,
        }
    });
    order
}

/// `P·A` for the permutation `order` (output row `i` is input row
/// `order[i]`).
pub(crate) fn permute_rows<S: Scalar>(a: &Matrix<S>, order: &[usize]) -> Matrix<S> {
    let (rows, cols) = a.shape();
    a.same_layout_builder()
        .from_index_function(rows, cols, |i, j| a.at(order[i], j))
}

pub(crate) fn swap_permutation(n: usize, first: usize, second: usize) -> Vec<usize> {
    let mut order: Vec<usize> = (0..n).collect();
    order.swap(first, second);
    order
}

// ----------------------------------------------------------------------
// Operator matrices
// ----------------------------------------------------------------------

fn operator_size<S: Scalar>(a: &Matrix<S>, rows: &[usize]) -> Result<usize> {
    for &r in rows {
        check_row(a, r)?;
    }
    Ok(a.num_rows())
}

/// Identity with entry `(row, row)` replaced by `scalar`.
pub fn scaling_operator<S: Scalar>(a: &Matrix<S>, row: usize, scalar: S) -> Result<Matrix<S>> {
    let n = operator_size(a, &[row])?;
    Ok(a.same_layout_builder().from_index_function(n, n, |i, j| {
        match (i == j, i == row) {
            (true, true) => scalar,
            (true, false) => S::one(),
            _ => S::zero(),
        }
    }))
}

/// Identity plus `scalar` at `(target, source)`.
pub fn addition_operator<S: Scalar>(
    a: &Matrix<S>,
    source: usize,
    scalar: S,
    target: usize,
) -> Result<Matrix<S>> {
    let n = operator_size(a, &[source, target])?;
    Ok(a.same_layout_builder().from_index_function(n, n, |i, j| {
        let identity = if i == j { S::one() } else { S::zero() };
        if i == target && j == source {
            identity + scalar
        } else {
            identity
        }
    }))
}

/// Identity with rows `first` and `second` swapped.
pub fn exchange_operator<S: Scalar>(
    a: &Matrix<S>,
    first: usize,
    second: usize,
) -> Result<Matrix<S>> {
    let n = operator_size(a, &[first, second])?;
    Ok(permutation_matrix(a, &swap_permutation(n, first, second)))
}

/// Permutation matrix `P` applied by [`pivot`].
pub fn pivot_operator<S: Scalar>(a: &Matrix<S>) -> Matrix<S> {
    permutation_matrix(a, &pivot_permutation(a, 0))
}

/// Matrix of the permutation `order` with the layout of `like`.
pub(crate) fn permutation_matrix<S: Scalar>(like: &Matrix<S>, order: &[usize]) -> Matrix<S> {
    let n = order.len();
    like.same_layout_builder().from_index_function(n, n, |i, j| {
        if order[i] == j { S::one() } else { S::zero() }
    })
}
