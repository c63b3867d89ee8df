//! Scalar traits that tie Rust types to routine precisions

use super::DType;
use super::complex::{Complex64, Complex128};
use bytemuck::{Pod, Zeroable};
use std::fmt::Debug;
use std::ops::{Add, Div, Mul, Neg, Sub};

/// Element type of a dense solver routine (`f32`, `f64`, `Complex64`, `Complex128`)
///
/// This is the single abstraction the routine families are generic over.
/// It answers the three questions a family needs answered per precision:
/// how large an element is (`DTYPE`), which real type its auxiliary arrays
/// use (`Real`), and whether "transpose" means plain or conjugate transpose
/// (`IS_COMPLEX`).
///
/// # Bounds
/// - `Pod + Zeroable` - device buffers are moved as raw bytes (bytemuck)
/// - field arithmetic and negation - used by the host runtime's kernels
pub trait Scalar:
    Copy
    + Clone
    + Send
    + Sync
    + Pod
    + Zeroable
    + Debug
    + PartialEq
    + 'static
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
{
    /// Real component type; singular values, eigenvalues and E arrays use it
    type Real: RealScalar;

    /// Runtime descriptor of this type
    const DTYPE: DType;

    /// True for `Complex64` and `Complex128`
    const IS_COMPLEX: bool;

    /// Additive identity
    fn zero() -> Self;

    /// Multiplicative identity
    fn one() -> Self;

    /// Embed a real value
    fn from_real(re: Self::Real) -> Self;

    /// Real part
    fn re(self) -> Self::Real;

    /// Complex conjugate (identity for real types)
    fn conj(self) -> Self;

    /// Absolute value |x|
    fn abs(self) -> Self::Real;

    /// Squared absolute value |x|²
    fn abs_sqr(self) -> Self::Real;

    /// Multiply by a real factor
    fn scale(self, factor: Self::Real) -> Self;

    /// Size of one element in bytes
    #[inline]
    fn size_in_bytes() -> usize {
        Self::DTYPE.size_in_bytes()
    }
}

/// Real scalar (`f32`, `f64`)
pub trait RealScalar: Scalar<Real = Self> + PartialOrd {
    /// Machine epsilon
    const EPSILON: Self;

    /// Smallest positive normal value
    const SAFE_MIN: Self;

    /// Square root
    fn sqrt(self) -> Self;

    /// Convert from f64
    fn from_f64(v: f64) -> Self;

    /// Convert to f64
    fn to_f64(self) -> f64;
}

macro_rules! impl_real_scalar {
    ($t:ty, $dtype:expr) => {
        impl Scalar for $t {
            type Real = $t;
            const DTYPE: DType = $dtype;
            const IS_COMPLEX: bool = false;

            #[inline]
            fn zero() -> Self {
                0.0
            }

            #[inline]
            fn one() -> Self {
                1.0
            }

            #[inline]
            fn from_real(re: Self::Real) -> Self {
                re
            }

            #[inline]
            fn re(self) -> Self::Real {
                self
            }

            #[inline]
            fn conj(self) -> Self {
                self
            }

            #[inline]
            fn abs(self) -> Self::Real {
                <$t>::abs(self)
            }

            #[inline]
            fn abs_sqr(self) -> Self::Real {
                self * self
            }

            #[inline]
            fn scale(self, factor: Self::Real) -> Self {
                self * factor
            }
        }

        impl RealScalar for $t {
            const EPSILON: Self = <$t>::EPSILON;
            const SAFE_MIN: Self = <$t>::MIN_POSITIVE;

            #[inline]
            fn sqrt(self) -> Self {
                <$t>::sqrt(self)
            }

            #[inline]
            fn from_f64(v: f64) -> Self {
                v as $t
            }

            #[inline]
            fn to_f64(self) -> f64 {
                self as f64
            }
        }
    };
}

macro_rules! impl_complex_scalar {
    ($t:ty, $real:ty, $dtype:expr) => {
        impl Scalar for $t {
            type Real = $real;
            const DTYPE: DType = $dtype;
            const IS_COMPLEX: bool = true;

            #[inline]
            fn zero() -> Self {
                <$t>::ZERO
            }

            #[inline]
            fn one() -> Self {
                <$t>::ONE
            }

            #[inline]
            fn from_real(re: Self::Real) -> Self {
                <$t>::new(re, 0.0)
            }

            #[inline]
            fn re(self) -> Self::Real {
                self.re
            }

            #[inline]
            fn conj(self) -> Self {
                <$t>::conj(self)
            }

            #[inline]
            fn abs(self) -> Self::Real {
                self.magnitude()
            }

            #[inline]
            fn abs_sqr(self) -> Self::Real {
                self.magnitude_squared()
            }

            #[inline]
            fn scale(self, factor: Self::Real) -> Self {
                <$t>::scale(self, factor)
            }
        }
    };
}

impl_real_scalar!(f32, DType::F32);
impl_real_scalar!(f64, DType::F64);
impl_complex_scalar!(Complex64, f32, DType::Complex64);
impl_complex_scalar!(Complex128, f64, DType::Complex128);

#[cfg(test)]
mod tests {
    use super::*;

    fn real_dtype_of<T: Scalar>() -> DType {
        <T::Real as Scalar>::DTYPE
    }

    #[test]
    fn test_real_component_types() {
        assert_eq!(real_dtype_of::<f32>(), DType::F32);
        assert_eq!(real_dtype_of::<f64>(), DType::F64);
        assert_eq!(real_dtype_of::<Complex64>(), DType::F32);
        assert_eq!(real_dtype_of::<Complex128>(), DType::F64);
    }

    #[test]
    fn test_sizes_match_layout() {
        assert_eq!(f32::size_in_bytes(), std::mem::size_of::<f32>());
        assert_eq!(f64::size_in_bytes(), std::mem::size_of::<f64>());
        assert_eq!(Complex64::size_in_bytes(), std::mem::size_of::<Complex64>());
        assert_eq!(
            Complex128::size_in_bytes(),
            std::mem::size_of::<Complex128>()
        );
    }

    #[test]
    fn test_conj_and_abs() {
        let z = Complex128::new(3.0, -4.0);
        assert_eq!(Scalar::abs(z), 5.0);
        assert_eq!(Scalar::conj(z), Complex128::new(3.0, 4.0));
        assert_eq!(Scalar::conj(-2.5f64), -2.5);
        assert_eq!(Scalar::abs_sqr(z), 25.0);
        assert!(Complex64::IS_COMPLEX);
        assert!(!f64::IS_COMPLEX);
    }
}
