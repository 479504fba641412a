//! Least-squares regression through the normal equations `AᴴA c = Aᴴb`,
//! solved by Gaussian elimination.
//!
//! A model is described by a *template* `f(c, x)`, linear in the
//! coefficient vector `c`. Column `j` of the design matrix holds
//! `f(eⱼ, xᵢ)` for every data point `xᵢ`.

use log::debug;

use crate::Scalar;
use crate::error::{CoreError, Result};
use crate::linalg::gauss_jordan::solve_by_gaussian_elimination;
use crate::linalg::solution::LinearSolution;
use crate::matrix::MatrixBuilder;
use crate::vector::{Vector, VectorBuilder};

/// An observation `(x, y)` with vector-valued input.
#[derive(Debug, Clone, PartialEq)]
pub struct DataPoint<S: Scalar> {
    /// The input `x`.
    pub independent: Vector<S>,
    /// The observed output `y`.
    pub dependent: S,
}

impl<S: Scalar> DataPoint<S> {
    /// Construct a data point.
    pub fn new(independent: Vector<S>, dependent: S) -> Self {
        Self {
            independent,
            dependent,
        }
    }
}

/// A fitted model.
#[derive(Debug, Clone)]
pub struct LeastSquaresFit<S: Scalar, F> {
    coefficients: Vector<S>,
    template: F,
    input_dimension: usize,
    residuals: Vec<S>,
}

impl<S, F> LeastSquaresFit<S, F>
where
    S: Scalar,
    F: Fn(&Vector<S>, &Vector<S>) -> S,
{
    /// The fitted coefficient vector `c`.
    pub fn coefficients(&self) -> &Vector<S> {
        &self.coefficients
    }

    /// Model output `f(c, x)`.
    ///
    /// Returns an error if `x` does not have the dimension of the fitted
    /// inputs.
    pub fn predict(&self, x: &Vector<S>) -> Result<S> {
        if x.dimension() != self.input_dimension {
            return Err(CoreError::DimensionMismatch {
                expected: vec![self.input_dimension],
                got: vec![x.dimension()],
            });
        }
        Ok((self.template)(&self.coefficients, x))
    }

    /// `yᵢ − f(c, xᵢ)` for every fitted point, in input order.
    pub fn residuals(&self) -> &[S] {
        &self.residuals
    }

    /// Root mean squared residual.
    pub fn standard_error(&self) -> f64 {
        let n = self.residuals.len() as f64;
        let sum: f64 = self
            .residuals
            .iter()
            .map(|r| {
                let m = r.norm();
                m * m
            })
            .sum();
        (sum / n).sqrt()
    }
}

/// Fit `template` with `number_of_terms` coefficients to `points`.
///
/// Fails if `points` is empty, the inputs have different dimensions,
/// `number_of_terms` is zero, or the normal equations turn out inconsistent.
pub fn general_least_squares<S, F>(
    points: &[DataPoint<S>],
    template: F,
    number_of_terms: usize,
) -> Result<LeastSquaresFit<S, F>>
where
    S: Scalar,
    F: Fn(&Vector<S>, &Vector<S>) -> S,
{
    let Some(first) = points.first() else {
        return Err(CoreError::InvalidArgument {
            reason: "least squares requires at least one data point",
        });
    };
    if number_of_terms == 0 {
        return Err(CoreError::InvalidArgument {
            reason: "least squares requires at least one term",
        });
    }
    let input_dimension = first.independent.dimension();
    if points
        .iter()
        .any(|p| p.independent.dimension() != input_dimension)
    {
        return Err(CoreError::InvalidShape {
            shape: points.iter().map(|p| p.independent.dimension()).collect(),
            reason: "data points must all have the same input dimension",
        });
    }

    let layout = first.independent.layout();
    let vectors = VectorBuilder::with_layout(layout);
    let basis: Vec<Vector<S>> = (0..number_of_terms)
        .map(|j| vectors.unit(number_of_terms, j))
        .collect::<Result<_>>()?;

    let design = MatrixBuilder::with_layout(layout).from_index_function(
        points.len(),
        number_of_terms,
        |i, j| template(&basis[j], &points[i].independent),
    );
    let observed = vectors.from_index_function(points.len(), |i| points[i].dependent);

    let adjoint = design.adjoint();
    let normal = adjoint.multiply(&design)?;
    let rhs = adjoint.apply(&observed)?;

    let coefficients = match solve_by_gaussian_elimination(&normal, &rhs)? {
        LinearSolution::Unique(c) => c,
        LinearSolution::Underdetermined(c) => {
            debug!("least squares: normal equations are rank deficient");
            c
        }
        LinearSolution::Overdetermined => return Err(CoreError::InconsistentSystem),
    };

    let residuals = points
        .iter()
        .map(|p| p.dependent + (-template(&coefficients, &p.independent)))
        .collect();
    Ok(LeastSquaresFit {
        coefficients,
        template,
        input_dimension,
        residuals,
    })
}

/// Fit the affine model `c₀ + Σ cₖ·xₖ₋₁`.
///
/// ```
/// # use linea_core::vector::VectorBuilder;
/// # use linea_core::linalg::least_squares::{linear_least_squares, DataPoint};
/// let b = VectorBuilder::dense();
/// let points: Vec<_> = [(0.0_f64, 1.0_f64), (1.0, 3.0), (2.0, 5.0)]
///     .iter()
///     .map(|&(x, y)| DataPoint::new(b.from_slice(&[x]), y))
///     .collect();
/// let fit = linear_least_squares(&points).unwrap();
/// let c = fit.coefficients();
/// assert!((c.get(0).unwrap() - 1.0).abs() < 1e-9);
/// assert!((c.get(1).unwrap() - 2.0).abs() < 1e-9);
/// ```
pub fn linear_least_squares<S: Scalar>(
    points: &[DataPoint<S>],
) -> Result<LeastSquaresFit<S, impl Fn(&Vector<S>, &Vector<S>) -> S>> {
    let terms = points
        .first()
        .map_or(0, |p| p.independent.dimension())
        + 1;
    general_least_squares(points, affine, terms)
}

fn affine<S: Scalar>(c: &Vector<S>, x: &Vector<S>) -> S {
    c.at(0) + x.iter().enumerate().map(|(k, xk)| c.at(k + 1) * xk).sum::<S>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn points(data: &[(&[f64], f64)]) -> Vec<DataPoint<f64>> {
        let b = VectorBuilder::dense();
        data.iter()
            .map(|&(x, y)| DataPoint::new(b.from_slice(x), y))
            .collect()
    }

    #[test]
    fn test_linear_fit_exact() {
        let pts = points(&[(&[0.0], 1.0), (&[1.0], 3.0), (&[2.0], 5.0), (&[3.0], 7.0)]);
        let fit = linear_least_squares(&pts).unwrap();
        assert_abs_diff_eq!(fit.coefficients().get(0).unwrap(), 1.0, epsilon = 1e-9);
        assert_abs_diff_eq!(fit.coefficients().get(1).unwrap(), 2.0, epsilon = 1e-9);
        assert!(fit.standard_error() < 1e-9);
        let x = VectorBuilder::dense().from_slice(&[10.0]);
        assert_abs_diff_eq!(fit.predict(&x).unwrap(), 21.0, epsilon = 1e-8);
    }

    #[test]
    fn test_linear_fit_noisy() {
        // Best line through (0,0), (1,1), (2,1): y = 1/6 + x/2.
        let pts = points(&[(&[0.0], 0.0), (&[1.0], 1.0), (&[2.0], 1.0)]);
        let fit = linear_least_squares(&pts).unwrap();
        assert_abs_diff_eq!(fit.coefficients().get(0).unwrap(), 1.0 / 6.0, epsilon = 1e-9);
        assert_abs_diff_eq!(fit.coefficients().get(1).unwrap(), 0.5, epsilon = 1e-9);
        let residual_sum: f64 = fit.residuals().iter().sum();
        assert_abs_diff_eq!(residual_sum, 0.0, epsilon = 1e-9);
        assert!(fit.standard_error() > 0.0);
    }

    #[test]
    fn test_multivariate_linear_fit() {
        // y = 1 + 2a − b
        let pts = points(&[
            (&[0.0, 0.0], 1.0),
            (&[1.0, 0.0], 3.0),
            (&[0.0, 1.0], 0.0),
            (&[1.0, 1.0], 2.0),
            (&[2.0, 3.0], 2.0),
        ]);
        let fit = linear_least_squares(&pts).unwrap();
        let expected = VectorBuilder::dense().from_slice(&[1.0, 2.0, -1.0]);
        assert!(fit.coefficients().approx_eq(&expected));
    }

    #[test]
    fn test_general_quadratic_fit() {
        let quadratic = |c: &Vector<f64>, x: &Vector<f64>| {
            let t = x.get(0).unwrap_or(0.0);
            c.get(0).unwrap_or(0.0) + c.get(1).unwrap_or(0.0) * t + c.get(2).unwrap_or(0.0) * t * t
        };
        let pts = points(&[(&[-1.0], 2.0), (&[0.0], 1.0), (&[1.0], 2.0), (&[2.0], 5.0)]);
        let fit = general_least_squares(&pts, quadratic, 3).unwrap();
        let expected = VectorBuilder::dense().from_slice(&[1.0, 0.0, 1.0]);
        assert!(fit.coefficients().approx_eq(&expected));
    }

    #[test]
    fn test_rank_deficient_fit_is_accepted() {
        // Every x is equal, so intercept and slope cannot be separated.
        let pts = points(&[(&[1.0], 2.0), (&[1.0], 4.0)]);
        let fit = linear_least_squares(&pts).unwrap();
        let x = VectorBuilder::dense().from_slice(&[1.0]);
        assert_abs_diff_eq!(fit.predict(&x).unwrap(), 3.0, epsilon = 1e-9);
    }

    #[test]
    fn test_invalid_input() {
        assert!(linear_least_squares::<f64>(&[]).is_err());
        let mixed = points(&[(&[0.0], 1.0), (&[0.0, 1.0], 2.0)]);
        assert!(linear_least_squares(&mixed).is_err());
        let pts = points(&[(&[0.0], 1.0)]);
        assert!(general_least_squares(&pts, affine, 0).is_err());
        let fit = linear_least_squares(&pts).unwrap();
        assert!(fit.predict(&VectorBuilder::dense().from_slice(&[1.0, 2.0])).is_err());
    }
}
