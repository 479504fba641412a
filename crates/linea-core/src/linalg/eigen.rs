//! Eigenvalues by the unshifted QR algorithm, and eigenvectors by solving
//! `(A − λI)x = 0`.

use log::debug;

use crate::Scalar;
use crate::error::{CoreError, Result};
use crate::linalg::decomp::QrDecomposition;
use crate::linalg::gauss_jordan::solve_by_gaussian_elimination;
use crate::linalg::solution::LinearSolution;
use crate::matrix::Matrix;
use crate::vector::Vector;

/// Number of `A ← RQ` steps taken for matrices larger than 2x2.
pub const QR_ALGORITHM_ITERATIONS: usize = 100;

/// Eigenvalues of a square matrix, with multiplicity.
///
/// Matrices up to 2x2 are solved in closed form, larger ones by
/// [`QR_ALGORITHM_ITERATIONS`] steps of the QR algorithm. For real scalars,
/// a conjugate pair of complex eigenvalues yields
/// [`CoreError::ComplexEigenvalues`].
///
/// ```
/// # use linea_core::matrix::MatrixBuilder;
/// # use linea_core::linalg::eigen::eigenvalues;
/// let a = MatrixBuilder::<f64>::dense()
///     .from_rows(&[vec![2.0, 1.0], vec![2.0, 3.0]])
///     .unwrap();
/// assert_eq!(eigenvalues(&a).unwrap(), vec![4.0, 1.0]);
/// ```
pub fn eigenvalues<S: Scalar>(a: &Matrix<S>) -> Result<Vec<S>> {
    a.require_square()?;
    match a.num_rows() {
        0 => Ok(Vec::new()),
        1 => Ok(vec![a.at(0, 0)]),
        2 => {
            let (first, second) = closed_form(a.at(0, 0), a.at(0, 1), a.at(1, 0), a.at(1, 1))?;
            Ok(vec![first, second])
        }
        n => {
            let converged = qr_algorithm(a)?;
            let mut values = Vec::with_capacity(n);
            let mut i = 0;
            while i < n {
                if i + 1 < n && !converged.at(i + 1, i).is_zero() {
                    let (first, second) = closed_form(
                        converged.at(i, i),
                        converged.at(i, i + 1),
                        converged.at(i + 1, i),
                        converged.at(i + 1, i + 1),
                    )?;
                    values.push(first);
                    values.push(second);
                    i += 2;
                } else {
                    values.push(converged.at(i, i));
                    i += 1;
                }
            }
            Ok(values)
        }
    }
}

/// Eigenvalues of `[[a, b], [c, d]]`: `(tr ± √(tr² − 4·det)) / 2`, the `+`
/// root first.
fn closed_form<S: Scalar>(a: S, b: S, c: S, d: S) -> Result<(S, S)> {
    let trace = a + d;
    let det = a * d + (-(b * c));
    let discriminant = trace * trace + (-(S::from_f64(4.0) * det));
    let root = discriminant
        .principal_sqrt()
        .ok_or(CoreError::ComplexEigenvalues)?;
    let half = S::from_f64(0.5);
    Ok(((trace + root) * half, (trace + (-root)) * half))
}

/// Iterate `Aₖ₊₁ = RₖQₖ` where `Aₖ = QₖRₖ`.
fn qr_algorithm<S: Scalar>(a: &Matrix<S>) -> Result<Matrix<S>> {
    let mut current = a.clone();
    for _ in 0..QR_ALGORITHM_ITERATIONS {
        let qr = QrDecomposition::decompose_completing(&current)?;
        current = qr.r().multiply(qr.q())?;
    }
    debug!(
        "eigenvalues: {QR_ALGORITHM_ITERATIONS} QR steps on {n}x{n} matrix",
        n = a.num_rows()
    );
    Ok(current)
}

/// A non-zero solution of `(A − λI)x = 0`.
///
/// Returns [`CoreError::NotAnEigenvalue`] when the only solution is the
/// zero vector.
pub fn eigenvector_for_eigenvalue<S: Scalar>(a: &Matrix<S>, eigenvalue: S) -> Result<Vector<S>> {
    a.require_square()?;
    let n = a.num_rows();
    let shifted = a.subtract(&a.same_layout_builder().identity(n).scalar_multiply(eigenvalue))?;
    let zero = a.vector_builder().zeros(n);
    match solve_by_gaussian_elimination(&shifted, &zero)? {
        LinearSolution::Underdetermined(x) => Ok(x),
        LinearSolution::Unique(_) | LinearSolution::Overdetermined => {
            Err(CoreError::NotAnEigenvalue)
        }
    }
}

/// Each distinct eigenvalue paired with one of its eigenvectors.
pub fn eigenpairs<S: Scalar>(a: &Matrix<S>) -> Result<Vec<(S, Vector<S>)>> {
    let mut distinct: Vec<S> = Vec::new();
    for value in eigenvalues(a)? {
        if !distinct.iter().any(|d| d.approx_eq(value)) {
            distinct.push(value);
        }
    }
    distinct
        .into_iter()
        .map(|value| Ok((value, eigenvector_for_eigenvalue(a, value)?)))
        .collect()
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::Complex;
    use crate::matrix::MatrixBuilder;
    use approx::assert_abs_diff_eq;

    fn m(rows: &[Vec<f64>]) -> Matrix<f64> {
        MatrixBuilder::dense().from_rows(rows).unwrap()
    }

    fn sorted(mut values: Vec<f64>) -> Vec<f64> {
        values.sort_by(f64::total_cmp);
        values
    }

    #[test]
    fn test_small_matrices() {
        let empty = MatrixBuilder::<f64>::dense().empty();
        assert!(eigenvalues(&empty).unwrap().is_empty());
        assert_eq!(eigenvalues(&m(&[vec![5.0]])).unwrap(), vec![5.0]);
        assert_eq!(eigenvalues(&m(&[vec![2.0, 1.0], vec![2.0, 3.0]])).unwrap(), vec![4.0, 1.0]);
    }

    #[test]
    fn test_non_square() {
        assert!(eigenvalues(&m(&[vec![1.0, 2.0]])).is_err());
    }

    #[test]
    fn test_real_rotation_has_complex_eigenvalues() {
        let rotation = m(&[vec![0.0, -1.0], vec![1.0, 0.0]]);
        assert_eq!(eigenvalues(&rotation).unwrap_err(), CoreError::ComplexEigenvalues);
    }

    #[test]
    fn test_complex_rotation() {
        let rotation = MatrixBuilder::dense()
            .from_rows(&[
                vec![Complex::zero(), Complex::from_f64(-1.0)],
                vec![Complex::one(), Complex::zero()],
            ])
            .unwrap();
        let values = eigenvalues(&rotation).unwrap();
        assert!(values[0].approx_eq(Complex::i()));
        assert!(values[1].approx_eq(-Complex::i()));
    }

    #[test]
    fn test_symmetric_3x3() {
        let a = m(&[vec![2.0, 1.0, 0.0], vec![1.0, 2.0, 1.0], vec![0.0, 1.0, 2.0]]);
        let values = sorted(eigenvalues(&a).unwrap());
        let s = 2.0_f64.sqrt();
        assert_abs_diff_eq!(values[0], 2.0 - s, epsilon = 1e-6);
        assert_abs_diff_eq!(values[1], 2.0, epsilon = 1e-6);
        assert_abs_diff_eq!(values[2], 2.0 + s, epsilon = 1e-6);
    }

    #[test]
    fn test_singular_3x3() {
        let a = m(&[vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0], vec![7.0, 8.0, 9.0]]);
        let values = sorted(eigenvalues(&a).unwrap());
        // λ(λ² − 15λ − 18) = 0
        let disc = (225.0_f64 + 72.0).sqrt();
        assert_abs_diff_eq!(values[0], (15.0 - disc) / 2.0, epsilon = 1e-6);
        assert_abs_diff_eq!(values[1], 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(values[2], (15.0 + disc) / 2.0, epsilon = 1e-6);
    }

    #[test]
    fn test_block_with_complex_pair() {
        let a = m(&[vec![0.0, -1.0, 0.0], vec![1.0, 0.0, 0.0], vec![0.0, 0.0, 2.0]]);
        assert_eq!(eigenvalues(&a).unwrap_err(), CoreError::ComplexEigenvalues);

        let c = MatrixBuilder::dense()
            .from_rows(&[
                vec![Complex::zero(), Complex::from_f64(-1.0), Complex::zero()],
                vec![Complex::one(), Complex::zero(), Complex::zero()],
                vec![Complex::zero(), Complex::zero(), Complex::from_f64(2.0)],
            ])
            .unwrap();
        let values = eigenvalues(&c).unwrap();
        assert_eq!(values.len(), 3);
        assert!(values[2].approx_eq(Complex::from_f64(2.0)));
    }

    #[test]
    fn test_eigenvector() {
        let a = m(&[vec![2.0, 1.0], vec![2.0, 3.0]]);
        let v = eigenvector_for_eigenvalue(&a, 4.0).unwrap();
        assert!(!v.is_zero());
        assert!(a.apply(&v).unwrap().approx_eq(&v.scalar_multiply(4.0)));
        assert_eq!(
            eigenvector_for_eigenvalue(&a, 3.0).unwrap_err(),
            CoreError::NotAnEigenvalue
        );
    }

    #[test]
    fn test_non_eigenvalue_never_yields_zero_vector() {
        let a = m(&[vec![2.0, 0.0, 0.0], vec![0.0, 3.0, 4.0], vec![0.0, 4.0, 9.0]]);
        for lambda in [0.0, 2.5, 5.0] {
            assert_eq!(
                eigenvector_for_eigenvalue(&a, lambda).unwrap_err(),
                CoreError::NotAnEigenvalue
            );
        }
        let v = eigenvector_for_eigenvalue(&a, 2.0).unwrap();
        assert!(!v.is_zero());
    }

    #[test]
    fn test_eigenpairs() {
        let a = m(&[vec![2.0, 0.0, 0.0], vec![0.0, 3.0, 4.0], vec![0.0, 4.0, 9.0]]);
        let pairs = eigenpairs(&a).unwrap();
        assert_eq!(pairs.len(), 3);
        for (value, vector) in &pairs {
            assert!(a.apply(vector).unwrap().approx_eq(&vector.scalar_multiply(*value)));
        }
    }

    #[test]
    fn test_eigenpairs_repeated_eigenvalue() {
        let a = MatrixBuilder::<f64>::dense().identity(3);
        let pairs = eigenpairs(&a).unwrap();
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].0, 1.0);
    }
}
