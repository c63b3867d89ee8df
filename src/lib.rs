//! # dnsolver
//!
//! **Dense linear-algebra solver calls in the cuSOLVER shape, executed by a
//! rocSOLVER-shaped runtime.**
//!
//! Callers speak one vocabulary: a scratch size query followed by an execute
//! call that takes a caller-provided workspace. The runtime underneath speaks
//! another: it manages its own device memory and discovers scratch needs
//! through a size-query bracket. dnsolver sits between the two.
//!
//! ## What it does
//!
//! - **Translation**: caller enums, job characters and status codes map to and
//!   from their runtime counterparts ([`convert`])
//! - **Workspace sizing**: a dry run inside the runtime's size query, plus the
//!   auxiliary arrays the caller-side API computes itself ([`workspace`])
//! - **Workspace provision**: a caller buffer is split into the runtime's
//!   region and the auxiliary arrays; without one the handle grows a standing
//!   reservation in the runtime's pool
//! - **Dispatch**: one generic implementation per routine family, over
//!   `f32`, `f64`, `Complex64` and `Complex128` ([`dense`])
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use dnsolver::prelude::*;
//!
//! let mut handle = Handle::new(HostRuntime::new());
//! let lwork = handle.potrf_buffer_size::<f64>(FillMode::Lower, n, lda)?;
//! let work = Workspace::new(work_ptr, lwork as usize);
//! handle.potrf::<f64>(FillMode::Lower, n, a, lda, work, info)?;
//! ```
//!
//! The status-code form of every call lives in [`dn`].
//!
//! ## Feature Flags
//!
//! - `host` (default): host-memory reference runtime

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod convert;
pub mod dense;
pub mod dn;
pub mod dtype;
pub mod error;
pub mod handle;
pub mod runtime;
pub mod types;
pub mod workspace;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::dtype::{Complex64, Complex128, DType, RealScalar, Scalar};
    pub use crate::error::{Error, Result, Status};
    pub use crate::handle::{Handle, MemoryMode};
    pub use crate::runtime::{DevicePtr, LapackOps, Runtime, Stream};
    pub use crate::types::{
        EigMode, EigType, FillMode, JacobiParams, Operation, SideMode, SvdJob,
    };
    pub use crate::workspace::Workspace;

    #[cfg(feature = "host")]
    pub use crate::runtime::host::HostRuntime;
}
