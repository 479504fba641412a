//! Vector arithmetic. Every operation returns a new vector; pairwise
//! operations require equal dimensions.

use crate::Scalar;
use crate::error::{CoreError, Result};
use crate::matrix::{Matrix, MatrixBuilder};

use super::Vector;

impl<S: Scalar> Vector<S> {
    fn check_same_dimension(&self, other: &Vector<S>) -> Result<()> {
        if self.dimension() != other.dimension() {
            return Err(CoreError::DimensionMismatch {
                expected: vec![self.dimension()],
                got: vec![other.dimension()],
            });
        }
        Ok(())
    }

    fn zip_map<F>(&self, other: &Vector<S>, f: F) -> Result<Vector<S>>
    where
        F: Fn(S, S) -> S,
    {
        self.check_same_dimension(other)?;
        Ok(self
            .same_layout_builder()
            .from_index_function(self.dimension(), |i| f(self.at(i), other.at(i))))
    }

    /// Entry-wise sum.
    pub fn add(&self, other: &Vector<S>) -> Result<Vector<S>> {
        self.zip_map(other, |a, b| a + b)
    }

    /// Entry-wise difference `self + (-other)`.
    pub fn subtract(&self, other: &Vector<S>) -> Result<Vector<S>> {
        self.zip_map(other, |a, b| a + (-b))
    }

    /// Multiply every entry by `scalar`.
    pub fn scalar_multiply(&self, scalar: S) -> Vector<S> {
        self.map(|x| x * scalar)
    }

    /// Additive inverse.
    pub fn negate(&self) -> Vector<S> {
        self.map(|x| -x)
    }

    /// Inner product `Σ selfᵢ · conj(otherᵢ)`.
    ///
    /// ```
    /// # use linea_core::vector::VectorBuilder;
    /// let b = VectorBuilder::dense();
    /// let x = b.from_slice(&[1.0, 2.0, 3.0]);
    /// let y = b.from_slice(&[4.0, 5.0, 6.0]);
    /// assert_eq!(x.inner_product(&y).unwrap(), 32.0);
    /// ```
    pub fn inner_product(&self, other: &Vector<S>) -> Result<S> {
        self.check_same_dimension(other)?;
        Ok(self
            .iter()
            .zip(other.iter())
            .map(|(a, b)| a * b.conjugate())
            .sum())
    }

    /// Outer product `self ⊗ conj(other)` as a `dim(self) × dim(other)` matrix.
    pub fn outer_product(&self, other: &Vector<S>) -> Matrix<S> {
        MatrixBuilder::with_layout(self.layout()).from_index_function(
            self.dimension(),
            other.dimension(),
            |i, j| self.at(i) * other.at(j).conjugate(),
        )
    }

    /// Euclidean norm `sqrt(Σ |xᵢ|²)`.
    pub fn norm(&self) -> f64 {
        self.iter()
            .map(|x| {
                let m = x.norm();
                m * m
            })
            .sum::<f64>()
            .sqrt()
    }

    /// `p`-norm `(Σ |xᵢ|^p)^(1/p)`; `p = ∞` gives the maximum modulus.
    ///
    /// Returns an error if `p < 1` or `p` is NaN.
    pub fn p_norm(&self, p: f64) -> Result<f64> {
        if p.is_nan() || p < 1.0 {
            return Err(CoreError::InvalidArgument {
                reason: "p_norm requires p >= 1",
            });
        }
        if p.is_infinite() {
            return Ok(self.iter().map(Scalar::norm).fold(0.0, f64::max));
        }
        Ok(self
            .iter()
            .map(|x| x.norm().powf(p))
            .sum::<f64>()
            .powf(p.recip()))
    }

    /// Unit vector in the direction of `self`, or `None` for a (numerically)
    /// zero vector.
    pub fn normalize(&self) -> Option<Vector<S>> {
        let norm = self.norm();
        if norm < crate::scalar::EPSILON {
            return None;
        }
        let inv = S::from_f64(norm).multiplicative_inverse()?;
        Some(self.scalar_multiply(inv))
    }

    /// Orthogonal projection of `self` onto the line spanned by `onto`:
    /// `(⟨self, onto⟩ / ⟨onto, onto⟩) · onto`.
    ///
    /// Returns `Ok(None)` when `onto` is the zero vector.
    pub fn project_onto(&self, onto: &Vector<S>) -> Result<Option<Vector<S>>> {
        let numerator = self.inner_product(onto)?;
        let denominator = onto.inner_product(onto)?;
        if denominator.is_zero() {
            return Ok(None);
        }
        Ok(numerator
            .divide(denominator)
            .map(|coefficient| onto.scalar_multiply(coefficient)))
    }

    /// Tolerance-based equality: same dimension and every pair of entries
    /// [`approx_eq`](Scalar::approx_eq).
    pub fn approx_eq(&self, other: &Vector<S>) -> bool {
        self.dimension() == other.dimension()
            && self.iter().zip(other.iter()).all(|(a, b)| a.approx_eq(b))
    }

    /// Whether every entry is zero within tolerance.
    pub fn is_zero(&self) -> bool {
        self.iter().all(Scalar::is_zero)
    }
}
