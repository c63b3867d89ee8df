//! Error types for dnsolver
//!
//! Internally every step returns [`Result`]; the caller-facing surface in
//! [`crate::dn`] reduces an [`Error`] to its [`Status`] code.

use thiserror::Error;

/// Result type alias using dnsolver's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while translating and dispatching a solver call
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// The handle argument was null or has not been created
    #[error("Handle not initialized")]
    NotInitialized,

    /// Invalid argument value (null output pointer, bad dimension, bad job code)
    #[error("Invalid value for '{arg}': {reason}")]
    InvalidValue {
        /// The argument name
        arg: &'static str,
        /// Reason for invalidity
        reason: String,
    },

    /// An enum code outside its known domain
    #[error("Invalid enum value {value} for {name}")]
    InvalidEnum {
        /// Enum type name
        name: &'static str,
        /// Raw code that could not be mapped
        value: i32,
    },

    /// Scratch memory could not be acquired
    #[error("Allocation failed: {bytes} bytes")]
    AllocFailed {
        /// Requested size in bytes
        bytes: usize,
    },

    /// Internal inconsistency, e.g. a byte count that does not fit the public size type
    #[error("Internal error: {0}")]
    InternalError(String),

    /// Entry point exists for compatibility but has no implementation
    #[error("Not supported: {feature}")]
    NotSupported {
        /// Description of the unsupported feature
        feature: &'static str,
    },

    /// Execution failed on the device
    #[error("Execution failed")]
    ExecutionFailed,

    /// The runtime returned a status this layer does not recognize
    #[error("Unknown runtime status {code}")]
    Unknown {
        /// Raw runtime status code
        code: i32,
    },
}

impl Error {
    /// Create an invalid value error
    pub fn invalid_value(arg: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            arg,
            reason: reason.into(),
        }
    }

    /// Create an invalid enum error
    pub fn invalid_enum(name: &'static str, value: i32) -> Self {
        Self::InvalidEnum { name, value }
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::InternalError(msg.into())
    }

    /// Caller-facing status code for this error
    pub fn status(&self) -> Status {
        match self {
            Self::NotInitialized => Status::NotInitialized,
            Self::InvalidValue { .. } => Status::InvalidValue,
            Self::InvalidEnum { .. } => Status::InvalidEnum,
            Self::AllocFailed { .. } => Status::AllocFailed,
            Self::InternalError(_) => Status::InternalError,
            Self::NotSupported { .. } => Status::NotSupported,
            Self::ExecutionFailed => Status::ExecutionFailed,
            Self::Unknown { .. } => Status::Unknown,
        }
    }
}

/// Caller-facing status codes
///
/// Numeric values follow the hipSOLVER status enumeration.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum Status {
    /// Operation completed (or was enqueued) successfully
    Success = 0,
    /// Handle is null or uninitialized
    NotInitialized = 1,
    /// Scratch memory acquisition failed
    AllocFailed = 2,
    /// Invalid argument value
    InvalidValue = 3,
    /// Device memory mapping failed
    MappingError = 4,
    /// Device execution failed
    ExecutionFailed = 5,
    /// Internal inconsistency
    InternalError = 6,
    /// Functionality not supported
    NotSupported = 7,
    /// Device architecture mismatch
    ArchMismatch = 8,
    /// Handle pointer itself was null
    HandleIsNullptr = 9,
    /// Enum code outside its domain
    InvalidEnum = 10,
    /// Unrecognized runtime status
    Unknown = 11,
}

impl Status {
    /// Raw status code
    #[inline]
    pub const fn code(self) -> i32 {
        self as i32
    }

    /// True for [`Status::Success`]
    #[inline]
    pub const fn is_success(self) -> bool {
        matches!(self, Self::Success)
    }

    /// Collapse a result into a status code
    pub fn from_result<T>(result: &Result<T>) -> Self {
        match result {
            Ok(_) => Self::Success,
            Err(e) => e.status(),
        }
    }
}

impl From<Error> for Status {
    fn from(e: Error) -> Self {
        e.status()
    }
}
