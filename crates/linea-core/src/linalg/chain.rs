//! Optimal parenthesization of a matrix chain product.
//!
//! For `A₀·A₁···Aₙ₋₁` the classic O(n³) dynamic program finds the split
//! minimizing the number of scalar multiplications, where multiplying a
//! `p × q` by a `q × r` matrix costs `p·q·r`.

use std::fmt;

use log::debug;

use crate::Scalar;
use crate::error::{CoreError, Result};
use crate::matrix::Matrix;

/// A binary parenthesization tree over matrix indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChainOrder {
    /// The single matrix `Aᵢ`.
    Leaf(usize),
    /// The product of two sub-chains.
    Product {
        /// Left operand.
        left: Box<ChainOrder>,
        /// Right operand.
        right: Box<ChainOrder>,
        /// Scalar multiplications for the whole subtree.
        cost: usize,
    },
}

impl ChainOrder {
    /// Total number of scalar multiplications this order performs.
    pub fn cost(&self) -> usize {
        match self {
            Self::Leaf(_) => 0,
            Self::Product { cost, .. } => *cost,
        }
    }
}

impl fmt::Display for ChainOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Leaf(i) => write!(f, "A{i}"),
            Self::Product { left, right, .. } => write!(f, "({left}{right})"),
        }
    }
}

/// Dimensions `p₀..pₙ` of the chain, where `Aᵢ` is `pᵢ × pᵢ₊₁`.
fn chain_dimensions<S: Scalar>(matrices: &[Matrix<S>]) -> Result<Vec<usize>> {
    let Some(first) = matrices.first() else {
        return Err(CoreError::InvalidArgument {
            reason: "matrix chain must contain at least one matrix",
        });
    };
    for pair in matrices.windows(2) {
        if !pair[0].is_multiplicable_with(&pair[1]) {
            return Err(CoreError::DimensionMismatch {
                expected: vec![pair[0].num_cols()],
                got: vec![pair[1].num_rows()],
            });
        }
    }
    let mut dims = Vec::with_capacity(matrices.len() + 1);
    dims.push(first.num_rows());
    dims.extend(matrices.iter().map(Matrix::num_cols));
    Ok(dims)
}

/// The cheapest parenthesization of `matrices`.
///
/// ```
/// # use linea_core::matrix::MatrixBuilder;
/// # use linea_core::linalg::chain::chain_order;
/// let b = MatrixBuilder::<f64>::dense();
/// let chain = [b.zeros(10, 100), b.zeros(100, 5), b.zeros(5, 50)];
/// let order = chain_order(&chain).unwrap();
/// assert_eq!(order.to_string(), "((A0A1)A2)");
/// assert_eq!(order.cost(), 7500);
/// ```
pub fn chain_order<S: Scalar>(matrices: &[Matrix<S>]) -> Result<ChainOrder> {
    let dims = chain_dimensions(matrices)?;
    let n = matrices.len();

    // cost[i][j] and split[i][j] for the sub-chain Aᵢ..=Aⱼ.
    let mut cost = vec![vec![0usize; n]; n];
    let mut split = vec![vec![0usize; n]; n];
    for length in 2..=n {
        for i in 0..=(n - length) {
            let j = i + length - 1;
            cost[i][j] = usize::MAX;
            for k in i..j {
                let candidate = cost[i][k]
                    .saturating_add(cost[k + 1][j])
                    .saturating_add(dims[i] * dims[k + 1] * dims[j + 1]);
                if candidate < cost[i][j] {
                    cost[i][j] = candidate;
                    split[i][j] = k;
                }
            }
        }
    }

    let order = build(&cost, &split, 0, n - 1);
    debug!("chain of {n} matrices: {order}, cost {}", order.cost());
    Ok(order)
}

fn build(cost: &[Vec<usize>], split: &[Vec<usize>], i: usize, j: usize) -> ChainOrder {
    if i == j {
        return ChainOrder::Leaf(i);
    }
    let k = split[i][j];
    ChainOrder::Product {
        left: Box::new(build(cost, split, i, k)),
        right: Box::new(build(cost, split, k + 1, j)),
        cost: cost[i][j],
    }
}

/// Multiply the chain in its cheapest order. A single matrix is returned
/// unchanged.
pub fn chain_product<S: Scalar>(matrices: &[Matrix<S>]) -> Result<Matrix<S>> {
    let order = chain_order(matrices)?;
    evaluate(&order, matrices)
}

fn evaluate<S: Scalar>(order: &ChainOrder, matrices: &[Matrix<S>]) -> Result<Matrix<S>> {
    match order {
        ChainOrder::Leaf(i) => Ok(matrices[*i].clone()),
        ChainOrder::Product { left, right, .. } => {
            evaluate(left, matrices)?.multiply(&evaluate(right, matrices)?)
        }
    }
}
