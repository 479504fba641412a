//! Matrix construction functions analogous to `np.zeros`, `np.eye`, etc.
//!
//! Every constructor validates the requested shape before building, and
//! degenerate shapes (zero rows or zero columns) produce the canonical
//! `0 × 0` matrix.

use std::marker::PhantomData;

use rand::Rng;

use crate::Scalar;
use crate::error::{CoreError, Result};
use crate::vector::builder::{normal_distribution, uniform_distribution};
use crate::vector::{Layout, Vector};

use super::Matrix;

/// The construction surface for [`Matrix`], bound to one [`Layout`].
///
/// ```
/// # use linea_core::matrix::MatrixBuilder;
/// let m = MatrixBuilder::<f64>::dense()
///     .from_rows(&[vec![1.0, 2.0], vec![3.0, 4.0]])
///     .unwrap();
/// assert_eq!(m.shape(), (2, 2));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct MatrixBuilder<S: Scalar> {
    layout: Layout,
    _scalar: PhantomData<S>,
}

impl<S: Scalar> MatrixBuilder<S> {
    /// Builder for dense, row-major matrices.
    pub fn dense() -> Self {
        Self::with_layout(Layout::Dense)
    }

    /// Builder for sparse matrices.
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

    /// Layout of the matrices this builder produces.
    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// The canonical `0 × 0` matrix.
    pub fn empty(&self) -> Matrix<S> {
        Matrix::empty(self.layout)
    }

    // ------------------------------------------------------------------
    // From raw data
    // ------------------------------------------------------------------

    /// Build from a flat row-major buffer.
    ///
    /// Returns an error if `data.len() != rows * cols`.
    pub fn from_vec(&self, rows: usize, cols: usize, data: Vec<S>) -> Result<Matrix<S>> {
        if rows * cols != data.len() {
            return Err(CoreError::InvalidShape {
                shape: vec![rows, cols],
                reason: "shape product does not match data length",
            });
        }
        Ok(Matrix::from_row_major(self.layout, rows, cols, data))
    }

    /// Build from a 2-D array of rows.
    ///
    /// Returns an error if the rows have different lengths.
    pub fn from_rows(&self, rows: &[Vec<S>]) -> Result<Matrix<S>> {
        let slices: Vec<&[S]> = rows.iter().map(Vec::as_slice).collect();
        self.from_slices(&slices)
    }

    /// Build from a 2-D array of row slices.
    ///
    /// Returns an error if the rows have different lengths.
    pub fn from_slices(&self, rows: &[&[S]]) -> Result<Matrix<S>> {
        let cols = rows.first().map_or(0, |r| r.len());
        if rows.iter().any(|r| r.len() != cols) {
            return Err(CoreError::InvalidShape {
                shape: rows.iter().map(|r| r.len()).collect(),
                reason: "rows must all have the same length",
            });
        }
        let data = rows.iter().flat_map(|r| r.iter().copied()).collect();
        Ok(Matrix::from_row_major(self.layout, rows.len(), cols, data))
    }

    /// Build an `rows × cols` matrix whose entry `(i, j)` is `f(i, j)`.
    pub fn from_index_function<F>(&self, rows: usize, cols: usize, f: F) -> Matrix<S>
    where
        F: Fn(usize, usize) -> S,
    {
        let data = (0..rows)
            .flat_map(|i| (0..cols).map(move |j| (i, j)))
            .map(|(i, j)| f(i, j))
            .collect();
        Matrix::from_row_major(self.layout, rows, cols, data)
    }

    /// Stack vectors as the rows of a matrix.
    ///
    /// Returns an error if the vectors have different dimensions.
    pub fn from_row_vectors(&self, rows: &[Vector<S>]) -> Result<Matrix<S>> {
        let cols = check_homogeneous(rows)?;
        Ok(self.from_index_function(rows.len(), cols, |i, j| rows[i].at(j)))
    }

    /// Place vectors side by side as the columns of a matrix.
    ///
    /// Returns an error if the vectors have different dimensions.
    pub fn from_column_vectors(&self, columns: &[Vector<S>]) -> Result<Matrix<S>> {
        let rows = check_homogeneous(columns)?;
        Ok(self.from_index_function(rows, columns.len(), |i, j| columns[j].at(i)))
    }

    // ------------------------------------------------------------------
    // Constant matrices
    // ------------------------------------------------------------------

    /// `n × n` identity matrix.
    ///
    /// ```
    /// # use linea_core::matrix::MatrixBuilder;
    /// let eye = MatrixBuilder::<f64>::dense().identity(3);
    /// assert_eq!(eye.get(0, 0).unwrap(), 1.0);
    /// assert_eq!(eye.get(0, 1).unwrap(), 0.0);
    /// ```
    pub fn identity(&self, n: usize) -> Matrix<S> {
        self.from_index_function(n, n, |i, j| if i == j { S::one() } else { S::zero() })
    }

    /// Matrix of zeros.
    pub fn zeros(&self, rows: usize, cols: usize) -> Matrix<S> {
        self.fill(rows, cols, S::zero())
    }

    /// Matrix of ones.
    pub fn ones(&self, rows: usize, cols: usize) -> Matrix<S> {
        self.fill(rows, cols, S::one())
    }

    /// Matrix with every entry equal to `value`.
    pub fn fill(&self, rows: usize, cols: usize, value: S) -> Matrix<S> {
        Matrix::from_row_major(self.layout, rows, cols, vec![value; rows * cols])
    }

    /// Square matrix with `diagonal` on the main diagonal.
    pub fn diagonal(&self, diagonal: &Vector<S>) -> Matrix<S> {
        let n = diagonal.dimension();
        self.from_index_function(n, n, |i, j| if i == j { diagonal.at(i) } else { S::zero() })
    }

    // ------------------------------------------------------------------
    // Random matrices
    // ------------------------------------------------------------------

    /// Matrix of samples uniformly distributed in [`min`, `max`).
    ///
    /// Returns an error if `min >= max` or the range is not finite.
    pub fn random_uniform<R: Rng + ?Sized>(
        &self,
        rows: usize,
        cols: usize,
        min: f64,
        max: f64,
        rng: &mut R,
    ) -> Result<Matrix<S>> {
        let distribution = uniform_distribution(min, max)?;
        let data = (0..rows * cols)
            .map(|_| S::sample_uniform(rng, &distribution))
            .collect();
        Ok(Matrix::from_row_major(self.layout, rows, cols, data))
    }

    /// Matrix of samples from a Gaussian distribution.
    ///
    /// Returns an error if `std_dev <= 0`.
    pub fn random_normal<R: Rng + ?Sized>(
        &self,
        rows: usize,
        cols: usize,
        mean: f64,
        std_dev: f64,
        rng: &mut R,
    ) -> Result<Matrix<S>> {
        let distribution = normal_distribution(mean, std_dev)?;
        let data = (0..rows * cols)
            .map(|_| S::sample_normal(rng, &distribution))
            .collect();
        Ok(Matrix::from_row_major(self.layout, rows, cols, data))
    }
}

impl<S: Scalar> Default for MatrixBuilder<S> {
    fn default() -> Self {
        Self::dense()
    }
}

/// Common dimension of `vectors` (0 when there are none).
fn check_homogeneous<S: Scalar>(vectors: &[Vector<S>]) -> Result<usize> {
    let dimension = vectors.first().map_or(0, Vector::dimension);
    if vectors.iter().any(|v| v.dimension() != dimension) {
        return Err(CoreError::InvalidShape {
            shape: vectors.iter().map(Vector::dimension).collect(),
            reason: "vectors must all have the same dimension",
        });
    }
    Ok(dimension)
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::vector::VectorBuilder;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_from_vec() {
        let m = MatrixBuilder::dense()
            .from_vec(2, 3, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0])
            .unwrap();
        assert_eq!(m.shape(), (2, 3));
        assert_eq!(m.get(1, 0).unwrap(), 4.0);
    }

    #[test]
    fn test_from_vec_shape_mismatch() {
        let r = MatrixBuilder::dense().from_vec(2, 3, vec![1.0, 2.0, 3.0]);
        assert!(r.is_err());
    }

    #[test]
    fn test_from_rows_ragged() {
        let r = MatrixBuilder::dense().from_rows(&[vec![1.0, 2.0], vec![3.0]]);
        assert!(r.is_err());
    }

    #[test]
    fn test_degenerate_shapes_normalize_to_empty() {
        let b = MatrixBuilder::<f64>::dense();
        assert_eq!(b.zeros(0, 5).shape(), (0, 0));
        assert_eq!(b.zeros(5, 0).shape(), (0, 0));
        assert_eq!(b.from_rows(&[vec![], vec![]]).unwrap().shape(), (0, 0));
        assert_eq!(b.from_rows(&[]).unwrap().shape(), (0, 0));
        assert_eq!(b.from_index_function(3, 0, |_, _| 1.0).shape(), (0, 0));
        assert_eq!(b.zeros(0, 5), b.empty());
    }

    #[test]
    fn test_from_row_and_column_vectors() {
        let vb = VectorBuilder::dense();
        let vs = [vb.from_slice(&[1.0, 2.0]), vb.from_slice(&[3.0, 4.0])];
        let by_rows = MatrixBuilder::dense().from_row_vectors(&vs).unwrap();
        let by_cols = MatrixBuilder::dense().from_column_vectors(&vs).unwrap();
        assert_eq!(by_rows.to_rows(), vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
        assert_eq!(by_cols.to_rows(), vec![vec![1.0, 3.0], vec![2.0, 4.0]]);
    }

    #[test]
    fn test_from_vectors_unequal_dimensions() {
        let vb = VectorBuilder::dense();
        let vs = [vb.from_slice(&[1.0, 2.0]), vb.from_slice(&[3.0])];
        assert!(MatrixBuilder::dense().from_row_vectors(&vs).is_err());
        assert!(MatrixBuilder::dense().from_column_vectors(&vs).is_err());
    }

    #[test]
    fn test_identity_and_fill() {
        let b = MatrixBuilder::<f64>::dense();
        let eye = b.identity(3);
        assert!(eye.is_identity());
        assert!(b.ones(2, 2).to_row_major().iter().all(|&x| x == 1.0));
        assert!(b.fill(2, 3, 4.0).to_row_major().iter().all(|&x| x == 4.0));
        assert!(b.identity(0).is_empty());
    }

    #[test]
    fn test_diagonal() {
        let d = VectorBuilder::dense().from_slice(&[2.0, 3.0]);
        let m = MatrixBuilder::dense().diagonal(&d);
        assert_eq!(m.to_rows(), vec![vec![2.0, 0.0], vec![0.0, 3.0]]);
    }

    #[test]
    fn test_random_constructors() {
        let mut rng = StdRng::seed_from_u64(3);
        let b = MatrixBuilder::<f64>::dense();
        let m = b.random_uniform(4, 5, 0.0, 1.0, &mut rng).unwrap();
        assert_eq!(m.shape(), (4, 5));
        assert!(m.to_row_major().iter().all(|x| (0.0..1.0).contains(x)));
        assert!(b.random_uniform(2, 2, 1.0, 0.0, &mut rng).is_err());
        assert!(b.random_normal(2, 2, 0.0, 0.0, &mut rng).is_err());
        assert_eq!(b.random_normal(2, 2, 0.0, 1.0, &mut rng).unwrap().shape(), (2, 2));
    }

    #[test]
    fn test_random_uniform_non_finite_range() {
        let mut rng = StdRng::seed_from_u64(3);
        let b = MatrixBuilder::<f64>::dense();
        assert!(matches!(
            b.random_uniform(2, 2, f64::NEG_INFINITY, 0.0, &mut rng),
            Err(CoreError::InvalidArgument { .. })
        ));
        assert!(matches!(
            b.random_uniform(2, 2, f64::MIN, f64::MAX, &mut rng),
            Err(CoreError::InvalidArgument { .. })
        ));
    }
}
