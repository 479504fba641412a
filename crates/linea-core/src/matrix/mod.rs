//! Immutable `m × n` matrices over a [`Scalar`].
//!
//! The [`Matrix`] type is the value every algorithm in [`crate::linalg`]
//! consumes and produces. Data is either stored densely in row-major order
//! or sparsely as an ordered map of non-zero entries; see [`Layout`].
//!
//! A matrix with zero rows or zero columns is always normalized to the
//! canonical `0 × 0` empty matrix.

mod builder;
mod display;
mod ops;

use std::collections::BTreeMap;
use std::ops::Range;

use crate::Scalar;
use crate::error::{CoreError, Result};
use crate::vector::{Layout, Vector, VectorBuilder};

pub use builder::MatrixBuilder;

#[derive(Debug, Clone)]
enum MatrixStorage<S> {
    Dense(Vec<S>),
    Sparse(BTreeMap<(usize, usize), S>),
}

/// An immutable rectangular matrix.
///
/// Cloning performs a deep copy. Every transformation returns a new matrix.
#[derive(Debug, Clone)]
pub struct Matrix<S: Scalar> {
    rows: usize,
    cols: usize,
    storage: MatrixStorage<S>,
}

impl<S: Scalar> Matrix<S> {
    /// Dense builder; shorthand for [`MatrixBuilder::dense`].
    pub fn builder() -> MatrixBuilder<S> {
        MatrixBuilder::dense()
    }

    /// Construct from a validated row-major buffer. Callers guarantee
    /// `data.len() == rows * cols`.
    pub(crate) fn from_row_major(layout: Layout, rows: usize, cols: usize, data: Vec<S>) -> Self {
        if rows == 0 || cols == 0 {
            return Self::empty(layout);
        }
        let storage = match layout {
            Layout::Dense => MatrixStorage::Dense(data),
            Layout::Sparse => MatrixStorage::Sparse(
                data.into_iter()
                    .enumerate()
                    .filter(|&(_, v)| v != S::zero())
                    .map(|(k, v)| ((k / cols, k % cols), v))
                    .collect(),
            ),
        };
        Self {
            rows,
            cols,
            storage,
        }
    }

    pub(crate) fn empty(layout: Layout) -> Self {
        let storage = match layout {
            Layout::Dense => MatrixStorage::Dense(Vec::new()),
            Layout::Sparse => MatrixStorage::Sparse(BTreeMap::new()),
        };
        Self {
            rows: 0,
            cols: 0,
            storage,
        }
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// Number of rows.
    #[inline]
    pub fn num_rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    #[inline]
    pub fn num_cols(&self) -> usize {
        self.cols
    }

    /// Shape as `(rows, cols)`.
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Whether this is the `0 × 0` matrix.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    /// Whether the matrix has as many rows as columns.
    #[inline]
    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    /// Storage layout of this matrix.
    #[inline]
    pub fn layout(&self) -> Layout {
        match self.storage {
            MatrixStorage::Dense(_) => Layout::Dense,
            MatrixStorage::Sparse(_) => Layout::Sparse,
        }
    }

    /// A builder producing matrices with this matrix's layout.
    #[inline]
    pub fn same_layout_builder(&self) -> MatrixBuilder<S> {
        MatrixBuilder::with_layout(self.layout())
    }

    pub(crate) fn vector_builder(&self) -> VectorBuilder<S> {
        VectorBuilder::with_layout(self.layout())
    }

    fn check_index(&self, row: usize, col: usize) -> Result<()> {
        if row >= self.rows || col >= self.cols {
            return Err(CoreError::IndexOutOfBounds {
                index: vec![row, col],
                shape: vec![self.rows, self.cols],
            });
        }
        Ok(())
    }

    /// Entry `(row, col)`, or an error when out of range.
    pub fn get(&self, row: usize, col: usize) -> Result<S> {
        self.check_index(row, col)?;
        Ok(self.at(row, col))
    }

    /// Unchecked entry access for in-crate loops; indices must be in range.
    #[inline]
    pub(crate) fn at(&self, row: usize, col: usize) -> S {
        match &self.storage {
            MatrixStorage::Dense(data) => data[row * self.cols + col],
            MatrixStorage::Sparse(entries) => entries
                .get(&(row, col))
                .copied()
                .unwrap_or_else(S::zero),
        }
    }

    /// A copy of this matrix with entry `(row, col)` replaced by `value`.
    pub fn set(&self, row: usize, col: usize, value: S) -> Result<Self> {
        self.check_index(row, col)?;
        Ok(self.set_unchecked(row, col, value))
    }

    pub(crate) fn set_unchecked(&self, row: usize, col: usize, value: S) -> Self {
        let mut next = self.clone();
        match &mut next.storage {
            MatrixStorage::Dense(data) => data[row * self.cols + col] = value,
            MatrixStorage::Sparse(entries) => {
                if value == S::zero() {
                    entries.remove(&(row, col));
                } else {
                    entries.insert((row, col), value);
                }
            }
        }
        next
    }

    /// Row `index` as a vector.
    pub fn row(&self, index: usize) -> Result<Vector<S>> {
        if index >= self.rows {
            return Err(CoreError::IndexOutOfBounds {
                index: vec![index],
                shape: vec![self.rows, self.cols],
            });
        }
        Ok(self.row_unchecked(index))
    }

    pub(crate) fn row_unchecked(&self, index: usize) -> Vector<S> {
        self.vector_builder()
            .from_index_function(self.cols, |j| self.at(index, j))
    }

    /// Column `index` as a vector.
    pub fn column(&self, index: usize) -> Result<Vector<S>> {
        if index >= self.cols {
            return Err(CoreError::IndexOutOfBounds {
                index: vec![index],
                shape: vec![self.rows, self.cols],
            });
        }
        Ok(self.column_unchecked(index))
    }

    pub(crate) fn column_unchecked(&self, index: usize) -> Vector<S> {
        self.vector_builder()
            .from_index_function(self.rows, |i| self.at(i, index))
    }

    /// All rows, top to bottom.
    pub fn row_vectors(&self) -> Vec<Vector<S>> {
        (0..self.rows).map(|i| self.row_unchecked(i)).collect()
    }

    /// All columns, left to right.
    pub fn column_vectors(&self) -> Vec<Vector<S>> {
        (0..self.cols).map(|j| self.column_unchecked(j)).collect()
    }

    /// Main diagonal (length `min(rows, cols)`).
    pub fn diagonal(&self) -> Vector<S> {
        self.vector_builder()
            .from_index_function(self.rows.min(self.cols), |i| self.at(i, i))
    }

    /// Entries in row-major order, zeros included.
    pub fn to_row_major(&self) -> Vec<S> {
        match &self.storage {
            MatrixStorage::Dense(data) => data.clone(),
            MatrixStorage::Sparse(_) => (0..self.rows * self.cols)
                .map(|k| self.at(k / self.cols, k % self.cols))
                .collect(),
        }
    }

    /// Rows as nested `Vec`s.
    pub fn to_rows(&self) -> Vec<Vec<S>> {
        (0..self.rows)
            .map(|i| (0..self.cols).map(|j| self.at(i, j)).collect())
            .collect()
    }

    /// The block `rows × cols` as a new matrix.
    pub fn submatrix(&self, rows: Range<usize>, cols: Range<usize>) -> Result<Self> {
        if rows.start > rows.end
            || rows.end > self.rows
            || cols.start > cols.end
            || cols.end > self.cols
        {
            return Err(CoreError::IndexOutOfBounds {
                index: vec![rows.start, rows.end, cols.start, cols.end],
                shape: vec![self.rows, self.cols],
            });
        }
        Ok(self.same_layout_builder().from_index_function(
            rows.len(),
            cols.len(),
            |i, j| self.at(rows.start + i, cols.start + j),
        ))
    }

    /// Apply `f` to every entry, returning a new matrix of the same layout.
    pub fn map<F>(&self, f: F) -> Self
    where
        F: Fn(S) -> S,
    {
        self.same_layout_builder()
            .from_index_function(self.rows, self.cols, |i, j| f(self.at(i, j)))
    }
}

impl<S: Scalar> PartialEq for Matrix<S> {
    /// Exact entry-wise equality, independent of layout. Use
    /// [`Matrix::approx_eq`] for tolerance-based comparison.
    fn eq(&self, other: &Self) -> bool {
        self.shape() == other.shape()
            && (0..self.rows).all(|i| (0..self.cols).all(|j| self.at(i, j) == other.at(i, j)))
    }
}
