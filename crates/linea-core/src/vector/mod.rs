//! Immutable vectors over a [`Scalar`].
//!
//! A [`Vector`] has a fixed dimension chosen at construction and is never
//! mutated afterwards: [`Vector::set`] and the arithmetic in this module all
//! return new vectors. Construction goes through [`VectorBuilder`], which is
//! bound to a storage [`Layout`].

pub(crate) mod builder;
mod ops;

use std::collections::BTreeMap;

use crate::Scalar;
use crate::error::{CoreError, Result};

pub use builder::VectorBuilder;

/// Storage strategy of a vector or matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Layout {
    /// Contiguous storage of every entry.
    #[default]
    Dense,
    /// Ordered map holding only the non-zero entries.
    Sparse,
}

#[derive(Debug, Clone)]
enum VectorStorage<S> {
    Dense(Vec<S>),
    Sparse {
        dimension: usize,
        entries: BTreeMap<usize, S>,
    },
}

/// An immutable vector of fixed dimension.
///
/// Cloning performs a deep copy.
#[derive(Debug, Clone)]
pub struct Vector<S: Scalar> {
    storage: VectorStorage<S>,
}

impl<S: Scalar> Vector<S> {
    /// Dense builder; shorthand for [`VectorBuilder::dense`].
    pub fn builder() -> VectorBuilder<S> {
        VectorBuilder::dense()
    }

    pub(crate) fn dense(data: Vec<S>) -> Self {
        Self {
            storage: VectorStorage::Dense(data),
        }
    }

    pub(crate) fn sparse(dimension: usize, entries: BTreeMap<usize, S>) -> Self {
        Self {
            storage: VectorStorage::Sparse { dimension, entries },
        }
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// Number of entries.
    #[inline]
    pub fn dimension(&self) -> usize {
        match &self.storage {
            VectorStorage::Dense(data) => data.len(),
            VectorStorage::Sparse { dimension, .. } => *dimension,
        }
    }

    /// Whether the vector has dimension zero.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.dimension() == 0
    }

    /// Storage layout of this vector.
    #[inline]
    pub fn layout(&self) -> Layout {
        match self.storage {
            VectorStorage::Dense(_) => Layout::Dense,
            VectorStorage::Sparse { .. } => Layout::Sparse,
        }
    }

    /// A builder producing vectors with this vector's layout.
    #[inline]
    pub fn same_layout_builder(&self) -> VectorBuilder<S> {
        VectorBuilder::with_layout(self.layout())
    }

    /// Entry `index`, or an error when out of range.
    pub fn get(&self, index: usize) -> Result<S> {
        if index >= self.dimension() {
            return Err(CoreError::IndexOutOfBounds {
                index: vec![index],
                shape: vec![self.dimension()],
            });
        }
        Ok(self.at(index))
    }

    /// Unchecked entry access for in-crate loops; `index` must be in range.
    #[inline]
    pub(crate) fn at(&self, index: usize) -> S {
        match &self.storage {
            VectorStorage::Dense(data) => data[index],
            VectorStorage::Sparse { entries, .. } => {
                entries.get(&index).copied().unwrap_or_else(S::zero)
            }
        }
    }

    /// A copy of this vector with entry `index` replaced by `value`.
    pub fn set(&self, index: usize, value: S) -> Result<Self> {
        if index >= self.dimension() {
            return Err(CoreError::IndexOutOfBounds {
                index: vec![index],
                shape: vec![self.dimension()],
            });
        }
        let mut next = self.clone();
        match &mut next.storage {
            VectorStorage::Dense(data) => data[index] = value,
            VectorStorage::Sparse { entries, .. } => {
                if value == S::zero() {
                    entries.remove(&index);
                } else {
                    entries.insert(index, value);
                }
            }
        }
        Ok(next)
    }

    /// Iterate over all entries in order, zeros included.
    pub fn iter(&self) -> impl Iterator<Item = S> + '_ {
        (0..self.dimension()).map(move |i| self.at(i))
    }

    /// Number of explicitly stored entries.
    pub fn stored_entries(&self) -> usize {
        match &self.storage {
            VectorStorage::Dense(data) => data.len(),
            VectorStorage::Sparse { entries, .. } => entries.len(),
        }
    }

    /// Copy the entries into a `Vec`.
    pub fn to_vec(&self) -> Vec<S> {
        self.iter().collect()
    }

    /// Apply `f` to every entry, returning a new vector of the same layout.
    pub fn map<F>(&self, f: F) -> Self
    where
        F: Fn(S) -> S,
    {
        self.same_layout_builder()
            .from_index_function(self.dimension(), |i| f(self.at(i)))
    }
}

impl<S: Scalar> PartialEq for Vector<S> {
    /// Exact entry-wise equality, independent of layout. Use
    /// [`Vector::approx_eq`] for tolerance-based comparison.
    fn eq(&self, other: &Self) -> bool {
        self.dimension() == other.dimension() && self.iter().eq(other.iter())
    }
}
