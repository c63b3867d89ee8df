//! Runtime: the dense linear-algebra library underneath the solver layer
//!
//! This module defines what the solver layer needs from the library it wraps,
//! split the same way the library itself is split:
//!
//! ```text
//! Runtime (handle-level state)
//! ├── stream get/set
//! ├── device memory manager (library-managed pool or caller workspace)
//! ├── size-query bracket (start / set_optimal / stop)
//! └── call-scoped allocation (DeviceMalloc)
//! LapackOps (routine-level entry points, generic over Scalar)
//! ```
//!
//! Both traits use static dispatch: `Handle<R>` is generic over the runtime.
//! With the `host` feature, [`host::HostRuntime`] implements both traits on
//! host memory.

mod allocator;
mod lapack;
mod memory;
mod types;

#[cfg(feature = "host")]
pub mod host;

pub use allocator::DeviceMalloc;
pub use lapack::LapackOps;
pub use memory::{DevicePtr, Stream};
pub use types::{
    RtEform, RtEsort, RtEvect, RtFill, RtOperation, RtSide, RtStatus, RtStorev, RtSvect,
    RtWorkmode,
};

/// Handle-level interface of the wrapped library
///
/// A runtime value plays the role of the library's own handle: it owns the
/// stream work is issued on and the device memory the library may use for
/// scratch. It is not internally synchronized; one runtime serves one thread
/// at a time.
///
/// # Device memory
///
/// The runtime is either *managing* memory (it owns a pool whose size is set
/// with [`set_memory_size`](Runtime::set_memory_size)) or running on a
/// caller-supplied workspace installed with
/// [`set_workspace`](Runtime::set_workspace). Routines take their scratch
/// from whichever is active.
///
/// # Size queries
///
/// Between [`start_memory_size_query`](Runtime::start_memory_size_query) and
/// [`stop_memory_size_query`](Runtime::stop_memory_size_query), routines are
/// called with null data pointers and only report the scratch they would
/// need; [`set_optimal_memory_size`](Runtime::set_optimal_memory_size) adds
/// further sizes to the running total.
pub trait Runtime: Send + 'static {
    /// Human-readable name of this runtime
    fn name(&self) -> &'static str;

    /// Stream all work is issued on
    fn stream(&self) -> Stream;

    /// Bind a different stream
    fn set_stream(&mut self, stream: Stream) -> RtStatus;

    /// Open a size-query bracket
    fn start_memory_size_query(&mut self) -> RtStatus;

    /// Close the size-query bracket and return the accumulated byte count
    fn stop_memory_size_query(&mut self) -> Result<usize, RtStatus>;

    /// True while a size-query bracket is open
    fn is_memory_size_query(&self) -> bool;

    /// During a size query, add each size (rounded to the runtime's alignment)
    /// to the total. Returns `SizeIncreased` or `SizeUnchanged`.
    fn set_optimal_memory_size(&mut self, sizes: &[usize]) -> RtStatus;

    /// True if the runtime owns the scratch memory
    fn is_managing_memory(&self) -> bool;

    /// Current size of the managed pool in bytes
    fn memory_size(&self) -> Result<usize, RtStatus>;

    /// Resize the managed pool and switch to library-managed memory
    fn set_memory_size(&mut self, size_bytes: usize) -> RtStatus;

    /// Install a caller-owned scratch region and switch to caller-managed memory
    fn set_workspace(&mut self, ptr: DevicePtr<u8>, size_bytes: usize) -> RtStatus;

    /// Carve call-scoped buffers out of the runtime's scratch memory
    fn device_malloc(&mut self, sizes: &[usize]) -> Result<DeviceMalloc, RtStatus>;

    /// Allocate device memory owned by the caller
    fn allocate(&mut self, size_bytes: usize) -> Result<DevicePtr<u8>, RtStatus>;

    /// Free memory obtained from [`allocate`](Runtime::allocate)
    fn deallocate(&mut self, ptr: DevicePtr<u8>, size_bytes: usize);

    /// Copy host bytes to device memory (stream-ordered)
    fn copy_to_device(&self, src: &[u8], dst: DevicePtr<u8>) -> RtStatus;

    /// Copy device memory to host bytes (synchronizes the stream)
    fn copy_from_device(&self, src: DevicePtr<u8>, dst: &mut [u8]) -> RtStatus;

    /// Wait for all work issued on the stream
    fn synchronize(&self) -> RtStatus;
}
