//! Scalar algebra for generic linear algebra.
//!
//! Every vector, matrix and algorithm in this crate is generic over a type
//! implementing [`Scalar`]. The trait is the field-like contract the
//! elimination and decomposition code relies on:
//!
//! ```text
//! Scalar
//!   ├── f32, f64        (real line)
//!   └── Complex         (complex plane, see crate::complex)
//! ```
//!
//! `add`, `multiply` and `conjugate` are total. Division and square roots are
//! partial and return `Option`, so a zero pivot or the root of a negative real
//! surfaces as a value the caller branches on instead of a silent NaN.

use core::fmt;
use core::iter::Sum;
use core::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use rand::Rng;
use rand::distr::Uniform;
use rand_distr::{Distribution, Normal};

/// Absolute tolerance used by [`Scalar::approx_eq`].
pub const EPSILON: f64 = 1e-6;

// ---------------------------------------------------------------------------
// Scalar: the root trait for every element type
// ---------------------------------------------------------------------------

/// Ring operations, inverses and tolerance-based equality over one concrete
/// scalar type.
///
/// Subtraction is `a + (-b)`; division is multiplication by the
/// multiplicative inverse and therefore partial.
pub trait Scalar:
    Copy
    + Clone
    + fmt::Debug
    + fmt::Display
    + PartialEq
    + Send
    + Sync
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Neg<Output = Self>
    + AddAssign
    + SubAssign
    + MulAssign
    + Sum
    + Default
    + 'static
{
    /// The additive identity (`0`).
    fn zero() -> Self;

    /// The multiplicative identity (`1`).
    fn one() -> Self;

    /// Embed a real number.
    fn from_f64(v: f64) -> Self;

    /// Embed an index or count.
    #[inline]
    fn from_usize(v: usize) -> Self {
        Self::from_f64(v as f64)
    }

    /// Complex conjugate; the identity on real types.
    fn conjugate(self) -> Self;

    /// `1 / self`, or `None` when `self` is exactly zero.
    fn multiplicative_inverse(self) -> Option<Self>;

    /// `self / rhs`, or `None` when `rhs` has no multiplicative inverse.
    #[inline]
    fn divide(self, rhs: Self) -> Option<Self> {
        rhs.multiplicative_inverse().map(|inv| self * inv)
    }

    /// The principal square root, or `None` where it is undefined
    /// (negative reals, NaN).
    fn principal_sqrt(self) -> Option<Self>;

    /// Absolute value (modulus).
    fn norm(self) -> f64;

    /// Real part.
    fn real(self) -> f64;

    /// Whether every component is finite (not NaN, not infinite).
    fn is_finite(self) -> bool;

    /// Tolerance-based equality: `|self - other| < EPSILON`.
    ///
    /// NaN and infinities are never equal to anything, themselves included.
    #[inline]
    fn approx_eq(self, other: Self) -> bool {
        self.is_finite() && other.is_finite() && (self - other).norm() < EPSILON
    }

    /// Whether `self` is zero within [`EPSILON`].
    #[inline]
    fn is_zero(self) -> bool {
        self.approx_eq(Self::zero())
    }

    /// Sample from a uniform distribution (each component, for complex types).
    fn sample_uniform<R: Rng + ?Sized>(rng: &mut R, distribution: &Uniform<f64>) -> Self;

    /// Sample from a normal distribution (each component, for complex types).
    fn sample_normal<R: Rng + ?Sized>(rng: &mut R, distribution: &Normal<f64>) -> Self;
}

// ===========================================================================
// Real implementations
// ===========================================================================

macro_rules! impl_scalar_real {
    ($ty:ty) => {
        impl Scalar for $ty {
            #[inline]
            fn zero() -> Self {
                0.0
            }
            #[inline]
            fn one() -> Self {
                1.0
            }
            #[inline]
            #[allow(clippy::cast_possible_truncation)]
            fn from_f64(v: f64) -> Self {
                v as Self
            }
            #[inline]
            fn conjugate(self) -> Self {
                self
            }
            #[inline]
            #[allow(clippy::float_cmp)]
            fn multiplicative_inverse(self) -> Option<Self> {
                if self == 0.0 { None } else { Some(self.recip()) }
            }
            #[inline]
            fn principal_sqrt(self) -> Option<Self> {
                if self >= 0.0 { Some(self.sqrt()) } else { None }
            }
            #[inline]
            fn norm(self) -> f64 {
                f64::from(self.abs())
            }
            #[inline]
            fn real(self) -> f64 {
                f64::from(self)
            }
            #[inline]
            fn is_finite(self) -> bool {
                <$ty>::is_finite(self)
            }
            #[inline]
            fn sample_uniform<R: Rng + ?Sized>(rng: &mut R, distribution: &Uniform<f64>) -> Self {
                Self::from_f64(distribution.sample(rng))
            }
            #[inline]
            fn sample_normal<R: Rng + ?Sized>(rng: &mut R, distribution: &Normal<f64>) -> Self {
                Self::from_f64(distribution.sample(rng))
            }
        }
    };
}

impl_scalar_real!(f32);
impl_scalar_real!(f64);

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_scalar_zero_one() {
        assert_eq!(f64::zero(), 0.0);
        assert_eq!(f64::one(), 1.0);
        assert_eq!(f32::from_usize(42), 42.0_f32);
    }

    #[test]
    fn test_partial_inverses() {
        assert_eq!(4.0_f64.multiplicative_inverse(), Some(0.25));
        assert_eq!(0.0_f64.multiplicative_inverse(), None);
        assert_eq!(3.0_f64.divide(2.0), Some(1.5));
        assert_eq!(3.0_f64.divide(0.0), None);
    }

    #[test]
    fn test_principal_sqrt() {
        assert_eq!(9.0_f64.principal_sqrt(), Some(3.0));
        assert_eq!(0.0_f64.principal_sqrt(), Some(0.0));
        assert_eq!((-1.0_f64).principal_sqrt(), None);
        assert_eq!(f64::NAN.principal_sqrt(), None);
    }

    #[test]
    fn test_approx_eq_tolerance() {
        assert!(1.0_f64.approx_eq(1.0 + 1e-8));
        assert!(!1.0_f64.approx_eq(1.0 + 1e-4));
        assert!((-0.0_f64).approx_eq(-0.0));
        assert!(1e-9_f64.is_zero());
    }

    #[test]
    fn test_approx_eq_non_finite() {
        assert!(!f64::NAN.approx_eq(f64::NAN));
        assert!(!f64::INFINITY.approx_eq(f64::INFINITY));
        assert!(!f64::NEG_INFINITY.approx_eq(f64::NEG_INFINITY));
        assert!(!f64::INFINITY.approx_eq(1.0));
    }

    #[test]
    fn test_norm_and_conjugate() {
        assert_eq!((-2.5_f64).norm(), 2.5);
        assert_eq!((-2.5_f64).conjugate(), -2.5);
        assert_eq!(7.0_f32.real(), 7.0);
    }

    #[test]
    fn test_sample_uniform_range() {
        let mut rng = StdRng::seed_from_u64(7);
        let distribution = Uniform::new(2.0, 5.0).unwrap();
        for _ in 0..1000 {
            let v = f64::sample_uniform(&mut rng, &distribution);
            assert!((2.0..5.0).contains(&v), "value {v} out of [2, 5)");
        }
    }
}
