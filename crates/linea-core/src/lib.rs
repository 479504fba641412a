//! `linea-core`: foundation crate for the Linea ecosystem.
//!
//! Provides scalars, immutable vectors and matrices, elimination,
//! decompositions, eigenvalues and least-squares fitting. The umbrella
//! `linea` crate re-exports everything here.
//!
//! # Design
//!
//! - Generic over the element type via the [`Scalar`] trait, implemented for
//!   `f64` and [`Complex`].
//! - Vectors and matrices are values: every operation returns a new one.
//! - Dense and sparse storage sit behind one API, selected by [`Layout`].
//! - Comparisons against zero and between results use the absolute
//!   tolerance [`EPSILON`](scalar::EPSILON).

pub mod complex;
pub mod error;
pub mod linalg;
pub mod matrix;
pub mod scalar;
pub mod vector;

// Re-export key types at crate root for convenience.
pub use complex::Complex;
pub use error::{CoreError, Result};
pub use matrix::{Matrix, MatrixBuilder};
pub use scalar::Scalar;
pub use vector::{Layout, Vector, VectorBuilder};

/// Items intended for glob-import: `use linea_core::prelude::*;`
pub mod prelude {
    pub use crate::complex::Complex;
    pub use crate::error::{CoreError, Result};
    pub use crate::linalg::{LinearSolution, det, inv, solve};
    pub use crate::matrix::{Matrix, MatrixBuilder};
    pub use crate::scalar::{EPSILON, Scalar};
    pub use crate::vector::{Layout, Vector, VectorBuilder};
}
