//! Vector construction, analogous to `np.zeros`, `np.ones`, `np.random.*`.

use std::collections::BTreeMap;
use std::marker::PhantomData;

use rand::Rng;
use rand::distr::{Uniform, uniform};
use rand_distr::Normal;

use crate::Scalar;
use crate::error::{CoreError, Result};

use super::{Layout, Vector};

/// The construction surface for [`Vector`].
///
/// A builder is bound to one [`Layout`]; every vector it produces uses that
/// storage. Builders are cheap `Copy` values.
///
/// ```
/// # use linea_core::vector::VectorBuilder;
/// let v = VectorBuilder::<f64>::dense().from_index_function(3, |i| i as f64);
/// assert_eq!(v.to_vec(), vec![0.0, 1.0, 2.0]);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct VectorBuilder<S: Scalar> {
    layout: Layout,
    _scalar: PhantomData<S>,
}

impl<S: Scalar> VectorBuilder<S> {
    /// Builder for dense vectors.
    pub fn dense() -> Self {
        Self::with_layout(Layout::Dense)
    }

    /// Builder for sparse vectors.
    pub fn sparse() -> Self {
        Self::with_layout(Layout::Sparse)
    }

    /// Builder for the given layout.
    pub fn with_layout(layout: Layout) -> Self {
        Self {
            layout,
            _scalar: PhantomData,
        }
    }

    /// Layout of the vectors this builder produces.
    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// Build from owned entries.
    pub fn from_vec(&self, data: Vec<S>) -> Vector<S> {
        match self.layout {
            Layout::Dense => Vector::dense(data),
            Layout::Sparse => {
                let dimension = data.len();
                let entries: BTreeMap<usize, S> = data
                    .into_iter()
                    .enumerate()
                    .filter(|&(_, v)| v != S::zero())
                    .collect();
                Vector::sparse(dimension, entries)
            }
        }
    }

    /// Build from a slice (copies the data).
    pub fn from_slice(&self, data: &[S]) -> Vector<S> {
        self.from_vec(data.to_vec())
    }

    /// Build a vector of dimension `n` whose entry `i` is `f(i)`.
    pub fn from_index_function<F>(&self, n: usize, f: F) -> Vector<S>
    where
        F: Fn(usize) -> S,
    {
        self.from_vec((0..n).map(f).collect())
    }

    /// Vector of zeros.
    pub fn zeros(&self, n: usize) -> Vector<S> {
        match self.layout {
            Layout::Dense => Vector::dense(vec![S::zero(); n]),
            Layout::Sparse => Vector::sparse(n, BTreeMap::new()),
        }
    }

    /// Vector of ones.
    pub fn ones(&self, n: usize) -> Vector<S> {
        self.fill(n, S::one())
    }

    /// Vector with every entry equal to `value`.
    pub fn fill(&self, n: usize, value: S) -> Vector<S> {
        self.from_vec(vec![value; n])
    }

    /// Elementary vector `e_index` of dimension `n`.
    pub fn unit(&self, n: usize, index: usize) -> Result<Vector<S>> {
        if index >= n {
            return Err(CoreError::IndexOutOfBounds {
                index: vec![index],
                shape: vec![n],
            });
        }
        Ok(self.from_index_function(n, |i| if i == index { S::one() } else { S::zero() }))
    }

    /// Concatenation `[a, b]`.
    pub fn concatenate(&self, a: &Vector<S>, b: &Vector<S>) -> Vector<S> {
        self.from_vec(a.iter().chain(b.iter()).collect())
    }

    /// Vector of samples uniformly distributed in [`min`, `max`).
    ///
    /// Returns an error if `min >= max` or the range is not finite.
    pub fn random_uniform<R: Rng + ?Sized>(
        &self,
        n: usize,
        min: f64,
        max: f64,
        rng: &mut R,
    ) -> Result<Vector<S>> {
        let distribution = uniform_distribution(min, max)?;
        Ok(self.from_vec(
            (0..n)
                .map(|_| S::sample_uniform(rng, &distribution))
                .collect(),
        ))
    }

    /// Vector of samples from a Gaussian distribution.
    ///
    /// Returns an error if `std_dev <= 0`.
    pub fn random_normal<R: Rng + ?Sized>(
        &self,
        n: usize,
        mean: f64,
        std_dev: f64,
        rng: &mut R,
    ) -> Result<Vector<S>> {
        let distribution = normal_distribution(mean, std_dev)?;
        Ok(self.from_vec(
            (0..n)
                .map(|_| S::sample_normal(rng, &distribution))
                .collect(),
        ))
    }
}

impl<S: Scalar> Default for VectorBuilder<S> {
    fn default() -> Self {
        Self::dense()
    }
}

/// Validated uniform distribution on `[min, max)` shared by the vector and
/// matrix builders. NaN, infinite bounds and ranges whose width overflows
/// are rejected.
pub(crate) fn uniform_distribution(min: f64, max: f64) -> Result<Uniform<f64>> {
    Uniform::new(min, max).map_err(|e| CoreError::InvalidArgument {
        reason: match e {
            uniform::Error::EmptyRange => "random_uniform requires min < max",
            uniform::Error::NonFinite => "random_uniform requires a finite range",
        },
    })
}

/// Validated normal distribution shared by the vector and matrix builders.
#[allow(clippy::neg_cmp_op_on_partial_ord)]
pub(crate) fn normal_distribution(mean: f64, std_dev: f64) -> Result<Normal<f64>> {
    if !(std_dev > 0.0) {
        return Err(CoreError::InvalidArgument {
            reason: "random_normal requires std_dev > 0",
        });
    }
    Normal::new(mean, std_dev).map_err(|_| CoreError::InvalidArgument {
        reason: "random_normal requires finite mean and std_dev",
    })
}
