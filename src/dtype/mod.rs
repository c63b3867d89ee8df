//! Scalar type system for solver routines
//!
//! Every routine family is written once, generic over [`Scalar`]. The four
//! LAPACK precisions (`s`, `d`, `c`, `z`) are the four `Scalar` impls; the
//! auxiliary arrays a family needs are described with [`DType`] so their byte
//! sizes can be computed without knowing the Rust type.

pub mod complex;
mod scalar;

pub use complex::{Complex64, Complex128};
pub use scalar::{RealScalar, Scalar};

use std::fmt;

/// Element types that appear in solver arguments and workspace sub-arrays
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum DType {
    /// 32-bit signed integer (pivots, sweep counters, info)
    I32 = 11,
    /// 32-bit floating point
    F32 = 1,
    /// 64-bit floating point
    F64 = 0,
    /// 64-bit complex (two f32: re, im)
    Complex64 = 40,
    /// 128-bit complex (two f64: re, im)
    Complex128 = 41,
}

impl DType {
    /// Size of one element in bytes
    #[inline]
    pub const fn size_in_bytes(self) -> usize {
        match self {
            Self::Complex128 => 16,
            Self::F64 | Self::Complex64 => 8,
            Self::F32 | Self::I32 => 4,
        }
    }

    /// Returns true if this is a complex number type
    #[inline]
    pub const fn is_complex(self) -> bool {
        matches!(self, Self::Complex64 | Self::Complex128)
    }

    /// Real component type: `F32` for `Complex64`, `F64` for `Complex128`,
    /// the type itself otherwise
    #[inline]
    pub const fn real_dtype(self) -> Self {
        match self {
            Self::Complex64 => Self::F32,
            Self::Complex128 => Self::F64,
            other => other,
        }
    }

    /// LAPACK precision prefix (`s`, `d`, `c`, `z`; `i` for integers)
    pub const fn lapack_prefix(self) -> char {
        match self {
            Self::F32 => 's',
            Self::F64 => 'd',
            Self::Complex64 => 'c',
            Self::Complex128 => 'z',
            Self::I32 => 'i',
        }
    }

    /// Short name used in log output
    pub const fn short_name(self) -> &'static str {
        match self {
            Self::I32 => "i32",
            Self::F32 => "f32",
            Self::F64 => "f64",
            Self::Complex64 => "c64",
            Self::Complex128 => "c128",
        }
    }
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.short_name())
    }
}
