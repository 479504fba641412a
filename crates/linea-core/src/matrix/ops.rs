//! Matrix arithmetic, structural predicates and combination.

use crate::Scalar;
use crate::error::{CoreError, Result};
use crate::vector::Vector;

use super::Matrix;

impl<S: Scalar> Matrix<S> {
    fn check_same_shape(&self, other: &Matrix<S>) -> Result<()> {
        if self.shape() != other.shape() {
            return Err(CoreError::DimensionMismatch {
                expected: vec![self.rows, self.cols],
                got: vec![other.rows, other.cols],
            });
        }
        Ok(())
    }

    fn zip_map<F>(&self, other: &Matrix<S>, f: F) -> Result<Matrix<S>>
    where
        F: Fn(S, S) -> S,
    {
        self.check_same_shape(other)?;
        Ok(self
            .same_layout_builder()
            .from_index_function(self.rows, self.cols, |i, j| {
                f(self.at(i, j), other.at(i, j))
            }))
    }

    // ------------------------------------------------------------------
    // Arithmetic
    // ------------------------------------------------------------------

    /// Entry-wise sum.
    pub fn add(&self, other: &Matrix<S>) -> Result<Matrix<S>> {
        self.zip_map(other, |a, b| a + b)
    }

    /// Entry-wise difference `self + (-other)`.
    pub fn subtract(&self, other: &Matrix<S>) -> Result<Matrix<S>> {
        self.zip_map(other, |a, b| a + (-b))
    }

    /// Multiply every entry by `scalar`.
    pub fn scalar_multiply(&self, scalar: S) -> Matrix<S> {
        self.map(|x| x * scalar)
    }

    /// Additive inverse.
    pub fn negate(&self) -> Matrix<S> {
        self.map(|x| -x)
    }

    /// Matrix product `self · other`.
    ///
    /// Requires `self.num_cols() == other.num_rows()`.
    ///
    /// ```
    /// # use linea_core::matrix::MatrixBuilder;
    /// let b = MatrixBuilder::<f64>::dense();
    /// let a = b.from_rows(&[vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
    /// let c = a.multiply(&b.identity(2)).unwrap();
    /// assert_eq!(a, c);
    /// ```
    pub fn multiply(&self, other: &Matrix<S>) -> Result<Matrix<S>> {
        if self.cols != other.rows {
            return Err(CoreError::DimensionMismatch {
                expected: vec![self.cols],
                got: vec![other.rows],
            });
        }
        Ok(self
            .same_layout_builder()
            .from_index_function(self.rows, other.cols, |i, j| {
                (0..self.cols).map(|k| self.at(i, k) * other.at(k, j)).sum()
            }))
    }

    /// Whether `self · other` is defined.
    #[inline]
    pub fn is_multiplicable_with(&self, other: &Matrix<S>) -> bool {
        self.cols == other.rows
    }

    /// Matrix-vector product `self · v`.
    pub fn apply(&self, v: &Vector<S>) -> Result<Vector<S>> {
        if self.cols != v.dimension() {
            return Err(CoreError::DimensionMismatch {
                expected: vec![self.cols],
                got: vec![v.dimension()],
            });
        }
        Ok(self.vector_builder().from_index_function(self.rows, |i| {
            (0..self.cols).map(|k| self.at(i, k) * v.at(k)).sum()
        }))
    }

    /// Transpose.
    pub fn transpose(&self) -> Matrix<S> {
        self.same_layout_builder()
            .from_index_function(self.cols, self.rows, |i, j| self.at(j, i))
    }

    /// Conjugate transpose (Hermitian adjoint). Equals the transpose for
    /// real scalars.
    pub fn adjoint(&self) -> Matrix<S> {
        self.same_layout_builder()
            .from_index_function(self.cols, self.rows, |i, j| self.at(j, i).conjugate())
    }

    /// Sum of the diagonal entries.
    pub fn trace(&self) -> Result<S> {
        self.require_square()?;
        Ok((0..self.rows).map(|i| self.at(i, i)).sum())
    }

    /// Frobenius norm `sqrt(Σ |aᵢⱼ|²)`.
    pub fn frobenius_norm(&self) -> f64 {
        self.to_row_major()
            .into_iter()
            .map(|x| {
                let m = x.norm();
                m * m
            })
            .sum::<f64>()
            .sqrt()
    }

    pub(crate) fn require_square(&self) -> Result<()> {
        if !self.is_square() {
            return Err(CoreError::NotSquare {
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Combination
    // ------------------------------------------------------------------

    /// `[self | other]`: columns of `other` appended to the right.
    pub fn augment(&self, other: &Matrix<S>) -> Result<Matrix<S>> {
        if self.rows != other.rows {
            return Err(CoreError::DimensionMismatch {
                expected: vec![self.rows],
                got: vec![other.rows],
            });
        }
        let cols = self.cols + other.cols;
        Ok(self
            .same_layout_builder()
            .from_index_function(self.rows, cols, |i, j| {
                if j < self.cols {
                    self.at(i, j)
                } else {
                    other.at(i, j - self.cols)
                }
            }))
    }

    /// `[self | v]`: `v` appended as an extra column.
    pub fn augment_vector(&self, v: &Vector<S>) -> Result<Matrix<S>> {
        if self.rows != v.dimension() {
            return Err(CoreError::DimensionMismatch {
                expected: vec![self.rows],
                got: vec![v.dimension()],
            });
        }
        Ok(self
            .same_layout_builder()
            .from_index_function(self.rows, self.cols + 1, |i, j| {
                if j < self.cols { self.at(i, j) } else { v.at(i) }
            }))
    }

    // ------------------------------------------------------------------
    // Predicates
    // ------------------------------------------------------------------

    /// Tolerance-based equality: same shape and every pair of entries
    /// [`approx_eq`](Scalar::approx_eq).
    pub fn approx_eq(&self, other: &Matrix<S>) -> bool {
        self.shape() == other.shape()
            && (0..self.rows)
                .all(|i| (0..self.cols).all(|j| self.at(i, j).approx_eq(other.at(i, j))))
    }

    /// Whether every entry is zero within tolerance.
    pub fn is_zero(&self) -> bool {
        (0..self.rows).all(|i| (0..self.cols).all(|j| self.at(i, j).is_zero()))
    }

    /// Square with `aᵢⱼ ≈ aⱼᵢ`.
    pub fn is_symmetric(&self) -> bool {
        self.is_square()
            && (0..self.rows).all(|i| (0..i).all(|j| self.at(i, j).approx_eq(self.at(j, i))))
    }

    /// Square with `aᵢⱼ ≈ conj(aⱼᵢ)`.
    pub fn is_hermitian(&self) -> bool {
        self.is_square()
            && (0..self.rows)
                .all(|i| (0..=i).all(|j| self.at(i, j).approx_eq(self.at(j, i).conjugate())))
    }

    /// Every entry below the main diagonal is (approximately) zero.
    pub fn is_upper_triangular(&self) -> bool {
        (0..self.rows).all(|i| (0..i.min(self.cols)).all(|j| self.at(i, j).is_zero()))
    }

    /// Every entry above the main diagonal is (approximately) zero.
    pub fn is_lower_triangular(&self) -> bool {
        (0..self.rows).all(|i| ((i + 1)..self.cols).all(|j| self.at(i, j).is_zero()))
    }

    /// Square and approximately equal to the identity.
    pub fn is_identity(&self) -> bool {
        self.is_square()
            && (0..self.rows).all(|i| {
                (0..self.cols).all(|j| {
                    let expected = if i == j { S::one() } else { S::zero() };
                    self.at(i, j).approx_eq(expected)
                })
            })
    }
}
