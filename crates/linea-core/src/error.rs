use thiserror::Error;

/// All errors returned by `linea-core`.
///
/// These signal misuse by the caller (bad shapes, out-of-range indices,
/// preconditions of an algorithm). Outcomes that depend on the data, such as
/// a singular matrix or a system without a unique solution, are reported
/// through `Option` or [`LinearSolution`](crate::linalg::LinearSolution)
/// instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Operand dimensions do not match the required layout.
    #[error("dimension mismatch: expected {expected:?}, got {got:?}")]
    DimensionMismatch {
        /// Expected dimensions
        expected: Vec<usize>,
        /// Actual dimensions
        got: Vec<usize>,
    },

    /// The operation requires a square matrix.
    #[error("expected a square matrix, got {rows}x{cols}")]
    NotSquare {
        /// Number of rows of the offending matrix
        rows: usize,
        /// Number of columns of the offending matrix
        cols: usize,
    },

    /// A shape specification is invalid (ragged rows, wrong buffer length).
    #[error("invalid shape {shape:?}: {reason}")]
    InvalidShape {
        /// The rejected shape
        shape: Vec<usize>,
        /// Why it was rejected
        reason: &'static str,
    },

    /// An index is out of bounds.
    #[error("index {index:?} out of bounds for shape {shape:?}")]
    IndexOutOfBounds {
        /// The offending index
        index: Vec<usize>,
        /// Shape that was indexed
        shape: Vec<usize>,
    },

    /// The operation is not supported for the given input.
    #[error("invalid argument: {reason}")]
    InvalidArgument {
        /// Why the argument was rejected
        reason: &'static str,
    },

    /// Gram-Schmidt produced a zero column.
    #[error("matrix columns are linearly dependent")]
    LinearlyDependent,

    /// A real matrix has a pair of complex conjugate eigenvalues.
    #[error("eigenvalues are not real")]
    ComplexEigenvalues,

    /// `(A - λI)x = 0` has no non-trivial solution.
    #[error("value is not an eigenvalue of the matrix")]
    NotAnEigenvalue,

    /// A system that must be consistent was found to have no solution.
    #[error("inconsistent linear system")]
    InconsistentSystem,
}

/// Convenience alias used throughout `linea-core`.
pub type Result<T> = std::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let e = CoreError::NotSquare { rows: 2, cols: 3 };
        assert_eq!(e.to_string(), "expected a square matrix, got 2x3");

        let e = CoreError::DimensionMismatch {
            expected: vec![3],
            got: vec![2],
        };
        assert_eq!(e.to_string(), "dimension mismatch: expected [3], got [2]");
    }
}
