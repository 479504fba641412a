//! Singular Value Decomposition (SVD).
//!
//! Decomposes a matrix `A` (m x n) of rank `r` into `A = U Σ V^H` where:
//! - `U` (m x r) has orthonormal columns, the left singular vectors
//! - `Σ` (r x r) is diagonal with the positive singular values
//! - `V` (n x r) has orthonormal columns, the right singular vectors
//!
//! Only the `r` non-zero singular triples are produced. Each is found by
//! power iteration on `A^H A` followed by deflation `A ← A − σ u v^H`.

use log::{debug, trace};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::Scalar;
use crate::error::Result;
use crate::linalg::gauss_jordan::rank;
use crate::matrix::Matrix;
use crate::scalar::EPSILON;
use crate::vector::Vector;

/// Power-iteration steps per singular triple.
pub const POWER_ITERATIONS: usize = 15;

/// Seed of the generator drawing the power-iteration start vectors, so that
/// decompositions are reproducible.
pub const SEED: u64 = 0x5EED_CAFE;

/// Result of a Singular Value Decomposition.
#[derive(Debug, Clone)]
pub struct SvdDecomposition<S: Scalar> {
    u: Matrix<S>,
    sigma: Matrix<S>,
    v: Matrix<S>,
    /// Singular values, in descending order.
    values: Vec<f64>,
    /// Shape of the decomposed matrix.
    shape: (usize, usize),
}

#[allow(clippy::many_single_char_names)]
impl<S: Scalar> SvdDecomposition<S> {
    /// Compute the compact SVD of a matrix `A` (m x n).
    ///
    /// ```
    /// # use linea_core::matrix::MatrixBuilder;
    /// # use linea_core::linalg::decomp::SvdDecomposition;
    /// let a = MatrixBuilder::<f64>::dense()
    ///     .from_rows(&[vec![3.0, 0.0], vec![0.0, 4.0]])
    ///     .unwrap();
    /// let svd = SvdDecomposition::decompose(&a).unwrap();
    /// let s = svd.singular_values();
    /// // Singular values of diag(3,4) are 4 and 3
    /// assert!((s[0] - 4.0).abs() < 1e-3);
    /// assert!((s[1] - 3.0).abs() < 1e-3);
    /// ```
    pub fn decompose(a: &Matrix<S>) -> Result<Self> {
        let (m, n) = a.shape();
        let r = rank(a);
        debug!("svd: extracting {r} singular triple(s) from {m}x{n} matrix");

        let vectors = a.vector_builder();
        let mut rng = StdRng::seed_from_u64(SEED);
        let mut work = a.clone();
        let mut us: Vec<Vector<S>> = Vec::with_capacity(r);
        let mut vs: Vec<Vector<S>> = Vec::with_capacity(r);
        let mut values: Vec<f64> = Vec::with_capacity(r);

        for round in 0..r {
            let gram = work.adjoint().multiply(&work)?;
            let start = vectors.random_uniform(n, -1.0, 1.0, &mut rng)?;
            let Some(mut v) = start.normalize() else {
                break;
            };
            for _ in 0..POWER_ITERATIONS {
                match gram.apply(&v)?.normalize() {
                    Some(next) => v = next,
                    None => break,
                }
            }

            let image = work.apply(&v)?;
            let sigma = image.norm();
            if sigma < EPSILON {
                trace!("svd: round {round} found no remaining singular value");
                break;
            }
            let u = image.scalar_multiply(S::from_f64(sigma.recip()));
            trace!("svd: round {round} sigma = {sigma}");

            let deflation = u.outer_product(&v).scalar_multiply(S::from_f64(sigma));
            work = work.subtract(&deflation)?;
            us.push(u);
            vs.push(v);
            values.push(sigma);
        }

        // Nearly equal singular values can be extracted out of order.
        let mut order: Vec<usize> = (0..values.len()).collect();
        order.sort_by(|&i, &j| values[j].total_cmp(&values[i]));
        let us: Vec<Vector<S>> = order.iter().map(|&i| us[i].clone()).collect();
        let vs: Vec<Vector<S>> = order.iter().map(|&i| vs[i].clone()).collect();
        let values: Vec<f64> = order.iter().map(|&i| values[i]).collect();

        let builder = a.same_layout_builder();
        let sigma = builder.diagonal(&vectors.from_index_function(values.len(), |i| {
            S::from_f64(values[i])
        }));
        Ok(Self {
            u: builder.from_column_vectors(&us)?,
            sigma,
            v: builder.from_column_vectors(&vs)?,
            values,
            shape: (m, n),
        })
    }

    /// Left singular vectors as columns (m x r).
    pub fn u(&self) -> &Matrix<S> {
        &self.u
    }

    /// Diagonal matrix of singular values (r x r).
    pub fn sigma(&self) -> &Matrix<S> {
        &self.sigma
    }

    /// Right singular vectors as columns (n x r).
    pub fn v(&self) -> &Matrix<S> {
        &self.v
    }

    /// The singular values, largest first.
    pub fn singular_values(&self) -> &[f64] {
        &self.values
    }

    /// Number of singular triples, the rank of the decomposed matrix.
    pub fn rank(&self) -> usize {
        self.values.len()
    }

    /// Ratio of the largest to the smallest singular value; infinite for a
    /// matrix of rank zero.
    pub fn condition_number(&self) -> f64 {
        let max = self.values.iter().copied().fold(0.0, f64::max);
        let min = self.values.iter().copied().fold(f64::INFINITY, f64::min);
        if self.values.is_empty() {
            f64::INFINITY
        } else {
            max / min
        }
    }

    /// `U Σ V^H`, which approximates the decomposed matrix.
    pub fn reconstruct(&self) -> Result<Matrix<S>> {
        if self.values.is_empty() {
            let (m, n) = self.shape;
            return Ok(self.u.same_layout_builder().zeros(m, n));
        }
        self.u.multiply(&self.sigma)?.multiply(&self.v.adjoint())
    }
}
