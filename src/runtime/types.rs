//! Runtime-side status codes and enumerations
//!
//! These mirror the rocBLAS/rocSOLVER conventions. The solver layer never
//! exposes them to callers; [`crate::convert`] maps in both directions.

/// Status returned by every runtime entry point
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum RtStatus {
    /// Success
    Success = 0,
    /// Handle not initialized, invalid or null
    InvalidHandle = 1,
    /// Function is not implemented
    NotImplemented = 2,
    /// Invalid pointer argument
    InvalidPointer = 3,
    /// Invalid size argument
    InvalidSize = 4,
    /// Failed internal memory allocation, copy or dealloc
    MemoryError = 5,
    /// Other internal library failure
    InternalError = 6,
    /// Performance degraded due to low device memory
    PerfDegraded = 7,
    /// Unmatched start/stop size query
    SizeQueryMismatch = 8,
    /// Queried device memory size increased
    SizeIncreased = 9,
    /// Queried device memory size unchanged
    SizeUnchanged = 10,
    /// Passed argument not valid
    InvalidValue = 11,
    /// Nothing preventing function to proceed
    Continue = 12,
    /// Will be set if the vectors/matrices contain a NaN or Infinity
    CheckNumerics = 13,
}

impl RtStatus {
    /// Raw status code
    #[inline]
    pub const fn code(self) -> i32 {
        self as i32
    }

    /// True for `Success` and the two size-query outcomes
    #[inline]
    pub const fn is_success_like(self) -> bool {
        matches!(
            self,
            Self::Success | Self::SizeIncreased | Self::SizeUnchanged
        )
    }
}

/// Matrix operation applied to an operand
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum RtOperation {
    /// Operate with the matrix
    None = 111,
    /// Operate with the transpose
    Transpose = 112,
    /// Operate with the conjugate transpose
    ConjugateTranspose = 113,
}

/// Which triangle of a matrix is referenced
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum RtFill {
    /// Upper triangle
    Upper = 121,
    /// Lower triangle
    Lower = 122,
    /// Full matrix
    Full = 123,
}

/// Side from which a matrix multiplies
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum RtSide {
    /// Multiply from the left
    Left = 141,
    /// Multiply from the right
    Right = 142,
    /// Both sides
    Both = 143,
}

/// Storage of Householder vectors
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum RtStorev {
    /// Householder vectors stored in columns
    ColumnWise = 171,
    /// Householder vectors stored in rows
    RowWise = 172,
}

/// Which singular vectors are computed
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum RtSvect {
    /// All singular vectors
    All = 191,
    /// Only the min(m,n) singular vectors
    Singular = 192,
    /// Singular vectors overwrite the input matrix
    Overwrite = 193,
    /// No singular vectors
    None = 194,
}

/// Form of the generalized eigenproblem
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum RtEform {
    /// A x = λ B x
    Ax = 201,
    /// A B x = λ x
    Abx = 202,
    /// B A x = λ x
    Bax = 203,
}

/// Which eigenvectors are computed
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum RtEvect {
    /// Eigenvectors of the original matrix
    Original = 211,
    /// Eigenvectors of the tridiagonal matrix
    Tridiagonal = 212,
    /// No eigenvectors
    None = 213,
}

/// Eigenvalue ordering for Jacobi routines
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum RtEsort {
    /// Leave eigenvalues in the order they converged
    None = 221,
    /// Sort eigenvalues ascending
    Ascending = 222,
}

/// Whether a routine may use the input matrix as scratch
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum RtWorkmode {
    /// Keep the input matrix untouched where possible
    OutOfPlace = 0,
    /// The input matrix may be overwritten as scratch
    InPlace = 1,
}
