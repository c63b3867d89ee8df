//! Solver handle
//!
//! A [`Handle`] wraps one runtime value together with the scratch-memory
//! state this layer negotiates on the runtime's behalf. All routine families
//! in [`crate::dense`] are methods on it.

use crate::convert::check;
use crate::error::Result;
use crate::runtime::{Runtime, Stream};
use crate::types::JacobiParams;

/// Who owns the scratch memory routines run in
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MemoryMode {
    /// The runtime's own pool, sized by the handle's reservation
    LibraryManaged,
    /// A buffer the caller passed to the last execute call
    CallerManaged,
}

/// Solver context bound to one runtime and one stream
///
/// Not reentrant: the reservation and the bound stream are plain mutable
/// state, so concurrent use of one handle needs external synchronization.
/// Distinct handles are independent.
pub struct Handle<R: Runtime> {
    pub(crate) runtime: R,
    pub(crate) mode: MemoryMode,
    /// Standing scratch reservation in bytes; only the workspace provider writes it
    pub(crate) reservation: usize,
}

impl<R: Runtime> Handle<R> {
    /// Create a handle with an empty reservation
    pub fn new(runtime: R) -> Self {
        tracing::debug!(runtime = runtime.name(), "solver handle created");
        Self {
            runtime,
            mode: MemoryMode::LibraryManaged,
            reservation: 0,
        }
    }

    /// Create a handle and reserve `bytes` of scratch up front
    pub fn with_reservation(runtime: R, bytes: usize) -> Result<Self> {
        let mut handle = Self::new(runtime);
        handle.reserve(bytes)?;
        Ok(handle)
    }

    /// Stream the handle issues work on
    pub fn stream(&self) -> Stream {
        self.runtime.stream()
    }

    /// Bind the handle to a different stream
    pub fn set_stream(&mut self, stream: Stream) -> Result<()> {
        check(self.runtime.set_stream(stream))
    }

    /// Bytes currently reserved in the runtime's pool
    pub fn reservation(&self) -> usize {
        self.reservation
    }

    /// Current owner of the scratch memory
    pub fn memory_mode(&self) -> MemoryMode {
        self.mode
    }

    /// The wrapped runtime
    pub fn runtime(&self) -> &R {
        &self.runtime
    }

    /// The wrapped runtime, mutably
    ///
    /// Changing the runtime's memory configuration through this reference
    /// bypasses the reservation bookkeeping.
    pub fn runtime_mut(&mut self) -> &mut R {
        &mut self.runtime
    }

    /// Residual reached by the last `syevj`/`sygvj` execution with `params`
    pub fn syevj_residual(&self, params: &JacobiParams) -> Result<f64> {
        params.residual()
    }

    /// Sweeps executed by the last `syevj`/`sygvj` execution with `params`
    pub fn syevj_sweeps(&self, params: &JacobiParams) -> Result<i32> {
        params.sweeps()
    }

    /// Residual reached by the last `gesvdj` execution with `params`
    pub fn gesvdj_residual(&self, params: &JacobiParams) -> Result<f64> {
        params.residual()
    }

    /// Sweeps executed by the last `gesvdj` execution with `params`
    pub fn gesvdj_sweeps(&self, params: &JacobiParams) -> Result<i32> {
        params.sweeps()
    }
}

impl<R: Runtime> Drop for Handle<R> {
    fn drop(&mut self) {
        tracing::debug!(
            runtime = self.runtime.name(),
            reservation = self.reservation,
            "solver handle destroyed"
        );
    }
}

impl<R: Runtime> std::fmt::Debug for Handle<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Handle")
            .field("runtime", &self.runtime.name())
            .field("mode", &self.mode)
            .field("reservation", &self.reservation)
            .finish()
    }
}
