//! Caller-facing enumerations and the Jacobi parameter object
//!
//! Codes follow the cuSOLVER/hipSOLVER numbering so raw values coming
//! through [`crate::dn`] can be decoded with `TryFrom<i32>`.

use crate::error::{Error, Result};

macro_rules! coded_enum {
    (
        $(#[$meta:meta])*
        $name:ident { $($(#[$vmeta:meta])* $variant:ident = $code:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
        #[repr(i32)]
        pub enum $name {
            $($(#[$vmeta])* $variant = $code),+
        }

        impl $name {
            /// Every value of this enum
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Raw code
            #[inline]
            pub const fn code(self) -> i32 {
                self as i32
            }
        }

        impl TryFrom<i32> for $name {
            type Error = Error;

            fn try_from(code: i32) -> Result<Self> {
                match code {
                    $($code => Ok(Self::$variant),)+
                    _ => Err(Error::invalid_enum(stringify!($name), code)),
                }
            }
        }
    };
}

coded_enum! {
    /// Operation applied to a matrix operand
    Operation {
        /// No transpose
        N = 111,
        /// Transpose
        T = 112,
        /// Conjugate transpose
        C = 113,
    }
}

coded_enum! {
    /// Referenced triangle of a symmetric/Hermitian matrix
    FillMode {
        /// Upper triangle
        Upper = 121,
        /// Lower triangle
        Lower = 122,
    }
}

coded_enum! {
    /// Side on which Q multiplies
    SideMode {
        /// Q op C
        Left = 141,
        /// C op Q
        Right = 142,
    }
}

coded_enum! {
    /// Whether eigenvectors or singular vectors are computed
    EigMode {
        /// Values only
        NoVector = 201,
        /// Values and vectors
        Vector = 202,
    }
}

coded_enum! {
    /// Form of the generalized symmetric-definite eigenproblem
    EigType {
        /// A x = λ B x
        Type1 = 211,
        /// A B x = λ x
        Type2 = 212,
        /// B A x = λ x
        Type3 = 213,
    }
}

/// Singular-vector job of `gesvd`, given as a LAPACK character
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SvdJob {
    /// `'A'`: all columns/rows
    All,
    /// `'S'`: the first min(m, n) columns/rows
    Singular,
    /// `'O'`: overwrite A with the vectors
    Overwrite,
    /// `'N'`: no vectors
    None,
}

impl SvdJob {
    /// Every value of this enum
    pub const ALL: &'static [Self] = &[Self::All, Self::Singular, Self::Overwrite, Self::None];

    /// LAPACK character of this job
    pub const fn as_char(self) -> u8 {
        match self {
            Self::All => b'A',
            Self::Singular => b'S',
            Self::Overwrite => b'O',
            Self::None => b'N',
        }
    }
}

impl TryFrom<u8> for SvdJob {
    type Error = Error;

    /// Decode a job character; lowercase is accepted
    fn try_from(c: u8) -> Result<Self> {
        match c.to_ascii_uppercase() {
            b'A' => Ok(Self::All),
            b'S' => Ok(Self::Singular),
            b'O' => Ok(Self::Overwrite),
            b'N' => Ok(Self::None),
            _ => Err(Error::invalid_value(
                "jobu/jobv",
                format!("unknown job character {:?}", c as char),
            )),
        }
    }
}

/// Parameters and results of the Jacobi routines (`syevj`, `sygvj`, `gesvdj`)
///
/// Created with defaults, tuned with the setters, passed to an execute call
/// which records the achieved residual and sweep count.
#[derive(Clone, Debug, PartialEq)]
pub struct JacobiParams {
    tolerance: f64,
    max_sweeps: i32,
    sort_eig: bool,
    residuals: Vec<f64>,
    sweeps: Vec<i32>,
    batched: bool,
}

impl Default for JacobiParams {
    fn default() -> Self {
        Self {
            tolerance: 0.0,
            max_sweeps: 100,
            sort_eig: true,
            residuals: Vec::new(),
            sweeps: Vec::new(),
            batched: false,
        }
    }
}

impl JacobiParams {
    /// Default parameters: machine-precision tolerance, 100 sweeps, sorted output
    pub fn new() -> Self {
        Self::default()
    }

    /// Convergence tolerance; zero or negative selects machine precision
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Set the convergence tolerance
    pub fn set_tolerance(&mut self, tolerance: f64) {
        self.tolerance = tolerance;
    }

    /// Sweep cap
    pub fn max_sweeps(&self) -> i32 {
        self.max_sweeps
    }

    /// Set the sweep cap; must be positive
    pub fn set_max_sweeps(&mut self, max_sweeps: i32) -> Result<()> {
        if max_sweeps <= 0 {
            return Err(Error::invalid_value("max_sweeps", "must be positive"));
        }
        self.max_sweeps = max_sweeps;
        Ok(())
    }

    /// Whether eigenvalues are returned in ascending order
    pub fn sort_eig(&self) -> bool {
        self.sort_eig
    }

    /// Choose sorted or unsorted eigenvalues
    pub fn set_sort_eig(&mut self, sort: bool) {
        self.sort_eig = sort;
    }

    /// Residual of the last single-problem execution
    pub fn residual(&self) -> Result<f64> {
        if self.batched {
            return Err(Error::NotSupported {
                feature: "residual of a batched Jacobi execution",
            });
        }
        self.residuals
            .first()
            .copied()
            .ok_or_else(|| Error::invalid_value("params", "no execution recorded"))
    }

    /// Sweeps executed by the last single-problem execution
    pub fn sweeps(&self) -> Result<i32> {
        if self.batched {
            return Err(Error::NotSupported {
                feature: "sweep count of a batched Jacobi execution",
            });
        }
        self.sweeps
            .first()
            .copied()
            .ok_or_else(|| Error::invalid_value("params", "no execution recorded"))
    }

    /// Per-problem residuals of the last execution
    pub fn residuals(&self) -> &[f64] {
        &self.residuals
    }

    /// Per-problem sweep counts of the last execution
    pub fn sweep_counts(&self) -> &[i32] {
        &self.sweeps
    }

    pub(crate) fn record(&mut self, residuals: Vec<f64>, sweeps: Vec<i32>, batched: bool) {
        self.residuals = residuals;
        self.sweeps = sweeps;
        self.batched = batched;
    }
}
