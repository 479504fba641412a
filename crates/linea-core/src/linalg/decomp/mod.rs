//! Matrix decompositions.
//!
//! | Decomposition | Module       | Factorization           |
//! |---------------|-------------|-------------------------|
//! | LU            | [`lu`]      | `PA = LU`               |
//! | QR            | [`qr`]      | `A = QR`                |
//! | Cholesky      | [`cholesky`]| `A = L L^H`             |
//! | SVD           | [`svd`]     | `A = U Σ V^H`           |

pub mod cholesky;
pub mod lu;
pub mod qr;
pub mod svd;

pub use cholesky::CholeskyDecomposition;
pub use lu::LuDecomposition;
pub use qr::QrDecomposition;
pub use svd::SvdDecomposition;
