//! Complex scalars.
//!
//! The element type is [`num_complex::Complex64`]; this module supplies its
//! [`Scalar`] implementation. Unlike the real implementation,
//! [`Scalar::principal_sqrt`] is total here, so the eigenvalue solver can
//! return complex conjugate pairs.

use num_complex::Complex64;
use rand::Rng;
use rand::distr::Uniform;
use rand_distr::{Distribution, Normal};

use crate::Scalar;

/// Complex number with `f64` real and imaginary parts.
pub type Complex = Complex64;

impl Scalar for Complex64 {
    #[inline]
    fn zero() -> Self {
        Self::new(0.0, 0.0)
    }

    #[inline]
    fn one() -> Self {
        Self::new(1.0, 0.0)
    }

    #[inline]
    fn from_f64(v: f64) -> Self {
        Self::new(v, 0.0)
    }

    #[inline]
    fn conjugate(self) -> Self {
        self.conj()
    }

    #[allow(clippy::float_cmp)]
    fn multiplicative_inverse(self) -> Option<Self> {
        let denom = self.norm_sqr();
        if denom == 0.0 {
            return None;
        }
        Some(Self::new(self.re / denom, -self.im / denom))
    }

    /// Root with non-negative real part; on the negative real axis the root
    /// with positive imaginary part, whatever the sign of the zero.
    fn principal_sqrt(self) -> Option<Self> {
        if !Scalar::is_finite(self) {
            return None;
        }
        let r = self.norm();
        let re = ((r + self.re) / 2.0).max(0.0).sqrt();
        let im = ((r - self.re) / 2.0).max(0.0).sqrt();
        Some(Self::new(re, if self.im < 0.0 { -im } else { im }))
    }

    #[inline]
    fn norm(self) -> f64 {
        self.re.hypot(self.im)
    }

    #[inline]
    fn real(self) -> f64 {
        self.re
    }

    #[inline]
    fn is_finite(self) -> bool {
        self.re.is_finite() && self.im.is_finite()
    }

    fn sample_uniform<R: Rng + ?Sized>(rng: &mut R, distribution: &Uniform<f64>) -> Self {
        Self::new(distribution.sample(rng), distribution.sample(rng))
    }

    fn sample_normal<R: Rng + ?Sized>(rng: &mut R, distribution: &Normal<f64>) -> Self {
        Self::new(distribution.sample(rng), distribution.sample(rng))
    }
}
