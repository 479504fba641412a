//! Forward and backward substitution for triangular systems.
//!
//! Entries on the ignored side of the diagonal are never read, so a full
//! matrix can be passed and only its lower (forward) or upper (backward)
//! triangle is used. A zero on the diagonal yields `Ok(None)`.

use crate::Scalar;
use crate::error::{CoreError, Result};
use crate::matrix::Matrix;
use crate::vector::Vector;

fn check_system<S: Scalar>(a: &Matrix<S>, b: &Vector<S>) -> Result<()> {
    a.require_square()?;
    if a.num_rows() != b.dimension() {
        return Err(CoreError::DimensionMismatch {
            expected: vec![a.num_rows()],
            got: vec![b.dimension()],
        });
    }
    Ok(())
}

/// Solve `Lx = b` for lower-triangular `L`.
///
/// ```
/// # use linea_core::matrix::MatrixBuilder;
/// # use linea_core::vector::VectorBuilder;
/// # use linea_core::linalg::substitution::solve_by_forward_substitution;
/// let l = MatrixBuilder::<f64>::dense()
///     .from_rows(&[vec![2.0, 0.0], vec![1.0, 1.0]])
///     .unwrap();
/// let b = VectorBuilder::dense().from_slice(&[4.0, 5.0]);
/// let x = solve_by_forward_substitution(&l, &b).unwrap().unwrap();
/// assert_eq!(x.to_vec(), vec![2.0, 3.0]);
/// ```
pub fn solve_by_forward_substitution<S: Scalar>(
    l: &Matrix<S>,
    b: &Vector<S>,
) -> Result<Option<Vector<S>>> {
    check_system(l, b)?;
    Ok(forward(l, |i| b.at(i)).map(|x| b.same_layout_builder().from_vec(x)))
}

/// Solve `Ux = b` for upper-triangular `U`.
pub fn solve_by_backward_substitution<S: Scalar>(
    u: &Matrix<S>,
    b: &Vector<S>,
) -> Result<Option<Vector<S>>> {
    check_system(u, b)?;
    Ok(backward(u, |i| b.at(i)).map(|x| b.same_layout_builder().from_vec(x)))
}

/// Forward substitution on an augmented `n × (n + 1)` matrix `[L | b]`.
pub fn solve_augmented_forward<S: Scalar>(augmented: &Matrix<S>) -> Result<Option<Vector<S>>> {
    let n = check_augmented(augmented)?;
    Ok(forward(augmented, |i| augmented.at(i, n))
        .map(|x| augmented.vector_builder().from_vec(x)))
}

/// Backward substitution on an augmented `n × (n + 1)` matrix `[U | b]`.
pub fn solve_augmented_backward<S: Scalar>(augmented: &Matrix<S>) -> Result<Option<Vector<S>>> {
    let n = check_augmented(augmented)?;
    Ok(backward(augmented, |i| augmented.at(i, n))
        .map(|x| augmented.vector_builder().from_vec(x)))
}

fn check_augmented<S: Scalar>(augmented: &Matrix<S>) -> Result<usize> {
    let (rows, cols) = augmented.shape();
    if rows + 1 != cols {
        return Err(CoreError::InvalidShape {
            shape: vec![rows, cols],
            reason: "augmented system must be n x (n + 1)",
        });
    }
    Ok(rows)
}

/// Core loop; only the lower triangle of the leading `n × n` block is read.
fn forward<S, F>(l: &Matrix<S>, rhs: F) -> Option<Vec<S>>
where
    S: Scalar,
    F: Fn(usize) -> S,
{
    let n = l.num_rows();
    let mut x: Vec<S> = Vec::with_capacity(n);
    for i in 0..n {
        let diagonal = l.at(i, i);
        if diagonal.is_zero() {
            return None;
        }
        let known: S = (0..i).map(|j| l.at(i, j) * x[j]).sum();
        x.push((rhs(i) + (-known)).divide(diagonal)?);
    }
    Some(x)
}

/// Core loop; only the upper triangle of the leading `n × n` block is read.
fn backward<S, F>(u: &Matrix<S>, rhs: F) -> Option<Vec<S>>
where
    S: Scalar,
    F: Fn(usize) -> S,
{
    let n = u.num_rows();
    let mut x = vec![S::zero(); n];
    for i in (0..n).rev() {
        let diagonal = u.at(i, i);
        if diagonal.is_zero() {
            return None;
        }
        let known: S = ((i + 1)..n).map(|j| u.at(i, j) * x[j]).sum();
        x[i] = (rhs(i) + (-known)).divide(diagonal)?;
    }
    Some(x)
}
