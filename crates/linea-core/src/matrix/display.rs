//! `Display` formatting for [`Matrix`] and [`Vector`].

use core::fmt;

use crate::Scalar;
use crate::vector::Vector;

use super::Matrix;

impl<S: Scalar> fmt::Display for Vector<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, v) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{v}")?;
        }
        write!(f, "]")
    }
}

impl<S: Scalar> fmt::Display for Matrix<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "matrix([], shape=(0, 0))");
        }
        writeln!(f, "matrix([")?;
        for r in 0..self.rows {
            write!(f, "  [")?;
            for c in 0..self.cols {
                if c > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", self.at(r, c))?;
            }
            if r < self.rows - 1 {
                writeln!(f, "],")?;
            } else {
                writeln!(f, "]")?;
            }
        }
        write!(f, "])")
    }
}

#[cfg(test)]
mod tests {
    use crate::Complex;
    use crate::matrix::MatrixBuilder;
    use crate::vector::VectorBuilder;

    #[test]
    fn test_display_vector() {
        let v = VectorBuilder::dense().from_slice(&[1.0, 2.5]);
        assert_eq!(format!("{v}"), "[1, 2.5]");
    }

    #[test]
    fn test_display_matrix() {
        let m = MatrixBuilder::dense()
            .from_rows(&[vec![1.0, 2.0], vec![3.0, 4.0]])
            .unwrap();
        let s = format!("{m}");
        assert!(s.starts_with("matrix("));
        assert!(s.contains("[1, 2]"));
        assert!(s.contains("[3, 4]"));
    }

    #[test]
    fn test_display_empty() {
        let m = MatrixBuilder::<f64>::dense().empty();
        assert_eq!(format!("{m}"), "matrix([], shape=(0, 0))");
    }

    #[test]
    fn test_display_complex_entries() {
        let m = MatrixBuilder::sparse()
            .from_rows(&[vec![Complex::new(1.0, -1.0)]])
            .unwrap();
        assert!(format!("{m}").contains("1-1i"));
    }
}
