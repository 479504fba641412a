//! # Linea
//!
//! Generic numerical linear algebra over real and complex scalars.
//!
//! One `use linea::prelude::*;` gives you vectors, matrices, Gauss-Jordan
//! elimination, LU / QR / Cholesky / SVD decompositions, eigenvalues and
//! least-squares fitting.
//!
//! ## Feature Flags
//!
//! | Feature | Enables |
//! |---------|---------|
//! | `core` *(default)* | Scalars, vectors, matrices, linear algebra |
//!
//! ```
//! use linea::prelude::*;
//!
//! let a = MatrixBuilder::<f64>::dense()
//!     .from_rows(&[vec![2.0, 1.0], vec![1.0, 4.0]])
//!     .unwrap();
//! let b = VectorBuilder::dense().from_slice(&[5.0, 6.0]);
//! let x = solve(&a, &b).unwrap().into_solution().unwrap();
//! assert!(x.approx_eq(&VectorBuilder::dense().from_slice(&[2.0, 1.0])));
//! ```

#[cfg(feature = "core")]
pub use linea_core as core;

/// Glob-import convenience: `use linea::prelude::*;`
#[cfg(feature = "core")]
pub mod prelude {
    pub use linea_core::prelude::*;
}
