//! Outcome of solving a linear system `Ax = b`.

use crate::Scalar;
use crate::vector::Vector;

/// Classification of a linear system together with a solution when one
/// exists.
#[derive(Debug, Clone, PartialEq)]
pub enum LinearSolution<S: Scalar> {
    /// Exactly one solution.
    Unique(Vector<S>),
    /// Infinitely many solutions; the vector is one of them, obtained by
    /// setting every free variable to 1.
    Underdetermined(Vector<S>),
    /// No solution: the system is inconsistent.
    Overdetermined,
}

impl<S: Scalar> LinearSolution<S> {
    /// The solution vector, if the system is consistent.
    pub fn solution(&self) -> Option<&Vector<S>> {
        match self {
            Self::Unique(x) | Self::Underdetermined(x) => Some(x),
            Self::Overdetermined => None,
        }
    }

    /// Consume `self`, returning the solution vector if the system is
    /// consistent.
    pub fn into_solution(self) -> Option<Vector<S>> {
        match self {
            Self::Unique(x) | Self::Underdetermined(x) => Some(x),
            Self::Overdetermined => None,
        }
    }

    /// `true` for [`LinearSolution::Unique`].
    pub fn is_unique(&self) -> bool {
        matches!(self, Self::Unique(_))
    }

    /// `true` for [`LinearSolution::Underdetermined`].
    pub fn is_underdetermined(&self) -> bool {
        matches!(self, Self::Underdetermined(_))
    }

    /// `true` for [`LinearSolution::Overdetermined`].
    pub fn is_overdetermined(&self) -> bool {
        matches!(self, Self::Overdetermined)
    }
}
