//! Complex element types of the `c` and `z` precisions
//!
//! Both types are `#[repr(C)]` pairs `(re, im)`, the layout of
//! `hipFloatComplex` / `hipDoubleComplex`, so a column-major complex matrix
//! is uploaded to device memory as plain bytes.
//!
//! Only what the host kernels use is provided: field arithmetic, conjugation
//! and an overflow-safe modulus.

use bytemuck::{Pod, Zeroable};
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

/// Implements one binary operator from a closure-like body over `(a, b)`
macro_rules! complex_binop {
    ($name:ident, $trait:ident, $method:ident, |$a:ident, $b:ident| $body:expr) => {
        impl $trait for $name {
            type Output = Self;

            #[inline]
            fn $method(self, rhs: Self) -> Self {
                let ($a, $b) = (self, rhs);
                $body
            }
        }
    };
}

macro_rules! complex_type {
    ($name:ident, $float:ty, $device:literal) => {
        #[doc = concat!(
            "Complex number over `", stringify!($float), "`, laid out like `", $device, "`"
        )]
        #[repr(C)]
        #[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
        pub struct $name {
            /// Real part
            pub re: $float,
            /// Imaginary part
            pub im: $float,
        }

        impl $name {
            /// 0 + 0i
            pub const ZERO: Self = Self::new(0.0, 0.0);

            /// 1 + 0i
            pub const ONE: Self = Self::new(1.0, 0.0);

            /// 0 + 1i
            pub const I: Self = Self::new(0.0, 1.0);

            /// Build from real and imaginary parts
            #[inline]
            pub const fn new(re: $float, im: $float) -> Self {
                Self { re, im }
            }

            /// |z|, computed relative to the larger component so the squares
            /// cannot overflow
            #[inline]
            pub fn magnitude(self) -> $float {
                let big = self.re.abs().max(self.im.abs());
                if big == 0.0 {
                    return 0.0;
                }
                let (x, y) = (self.re / big, self.im / big);
                big * (x * x + y * y).sqrt()
            }

            /// |z|²
            #[inline]
            pub fn magnitude_squared(self) -> $float {
                self.re * self.re + self.im * self.im
            }

            /// a - bi
            #[inline]
            pub fn conj(self) -> Self {
                Self::new(self.re, -self.im)
            }

            /// Multiply both parts by a real factor
            #[inline]
            pub fn scale(self, factor: $float) -> Self {
                Self::new(self.re * factor, self.im * factor)
            }
        }

        complex_binop!($name, Add, add, |a, b| $name::new(a.re + b.re, a.im + b.im));
        complex_binop!($name, Sub, sub, |a, b| $name::new(a.re - b.re, a.im - b.im));
        complex_binop!($name, Mul, mul, |a, b| $name::new(
            a.re * b.re - a.im * b.im,
            a.re * b.im + a.im * b.re
        ));
        // Division by zero yields NaN parts
        complex_binop!($name, Div, div, |a, b| {
            let den = b.magnitude_squared();
            (a * b.conj()).scale(1.0 / den)
        });

        impl Neg for $name {
            type Output = Self;

            #[inline]
            fn neg(self) -> Self {
                Self::new(-self.re, -self.im)
            }
        }

        impl From<$float> for $name {
            #[inline]
            fn from(re: $float) -> Self {
                Self::new(re, 0.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                let sign = if self.im.is_sign_negative() { '-' } else { '+' };
                write!(f, "{}{}{}i", self.re, sign, self.im.abs())
            }
        }
    };
}

complex_type!(Complex64, f32, "hipFloatComplex");
complex_type!(Complex128, f64, "hipDoubleComplex");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_operations() {
        let a = Complex128::new(1.0, 2.0);
        let b = Complex128::new(3.0, -1.0);
        assert_eq!(a + b, Complex128::new(4.0, 1.0));
        assert_eq!(a - b, Complex128::new(-2.0, 3.0));
        // (1+2i)(3-i) = 3 - i + 6i + 2 = 5 + 5i
        assert_eq!(a * b, Complex128::new(5.0, 5.0));
        let q = (a * b) / b;
        assert!((q - a).magnitude() < 1e-12);
        assert_eq!(-a, Complex128::new(-1.0, -2.0));
    }

    #[test]
    fn test_division_by_zero_is_nan() {
        let q = Complex64::ONE / Complex64::ZERO;
        assert!(q.re.is_nan() && q.im.is_nan());
    }

    #[test]
    fn test_magnitude_does_not_overflow() {
        let z = Complex64::new(3.0e30, 4.0e30);
        assert!((z.magnitude() / 5.0e30 - 1.0).abs() < 1e-6);
        assert_eq!(Complex64::ZERO.magnitude(), 0.0);
        assert_eq!(Complex128::I * Complex128::I, Complex128::new(-1.0, 0.0));
    }

    #[test]
    fn test_layout_is_interleaved() {
        let m = [Complex64::new(1.0, 2.0), Complex64::new(3.0, 4.0)];
        let raw: &[f32] = bytemuck::cast_slice(&m);
        assert_eq!(raw, &[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(std::mem::size_of::<Complex128>(), 16);
    }

    #[test]
    fn test_display() {
        assert_eq!(Complex128::new(1.5, -2.0).to_string(), "1.5-2i");
        assert_eq!(Complex64::from(2.0).to_string(), "2+0i");
    }
}
