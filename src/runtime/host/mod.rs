//! Host reference runtime
//!
//! [`HostRuntime`] implements the full downstream surface on the host: a
//! simulated device address space, a library-managed scratch pool with the
//! size-query bracket, and reference numerics for the routines the solver
//! layer dispatches to. Tests use it as the call-counting stub of the wrapped
//! library, and the bounds-checked address space as the guard pages around
//! caller workspaces.
//!
//! # Example
//!
//! ```
//! use dnsolver::runtime::Runtime;
//! use dnsolver::runtime::host::HostRuntime;
//!
//! let mut rt = HostRuntime::builder().memory_limit(1 << 20).build();
//! let ptr = rt.allocate(256).unwrap();
//! assert!(rt.copy_to_device(&[1u8; 256], ptr).is_success_like());
//! ```

mod kernels;
mod lapack;
mod pool;

use super::{DeviceMalloc, DevicePtr, RtStatus, Runtime, Stream};
use parking_lot::Mutex;
use pool::{MemoryState, ScratchRegion};
use std::sync::Arc;

/// Default rounding of scratch sizes
pub const DEFAULT_ALIGNMENT: usize = 64;

/// Host implementation of [`Runtime`] and [`LapackOps`](super::LapackOps)
pub struct HostRuntime {
    memory: Arc<Mutex<MemoryState>>,
    stream: Stream,
    calls: usize,
}

/// Builder for [`HostRuntime`]
#[derive(Clone, Debug)]
pub struct HostRuntimeBuilder {
    memory_limit: usize,
    alignment: usize,
    initial_memory: usize,
}

impl Default for HostRuntimeBuilder {
    fn default() -> Self {
        Self {
            memory_limit: usize::MAX,
            alignment: DEFAULT_ALIGNMENT,
            initial_memory: 0,
        }
    }
}

impl HostRuntimeBuilder {
    /// Cap on the total bytes mapped at any time (pool plus caller allocations)
    pub fn memory_limit(mut self, bytes: usize) -> Self {
        self.memory_limit = bytes;
        self
    }

    /// Rounding applied to every scratch size (power of two, at least 64)
    pub fn alignment(mut self, bytes: usize) -> Self {
        self.alignment = bytes.max(DEFAULT_ALIGNMENT).next_power_of_two();
        self
    }

    /// Size of the managed pool at creation
    pub fn initial_memory(mut self, bytes: usize) -> Self {
        self.initial_memory = bytes;
        self
    }

    /// Create the runtime
    ///
    /// If the initial pool does not fit under the memory limit the runtime
    /// starts with an empty pool.
    pub fn build(self) -> HostRuntime {
        let mut state = MemoryState::new(self.memory_limit, self.alignment);
        if self.initial_memory > 0 {
            let status = state.resize_pool(self.initial_memory);
            if !status.is_success_like() {
                tracing::warn!(
                    bytes = self.initial_memory,
                    ?status,
                    "initial pool allocation failed"
                );
            }
        }
        HostRuntime {
            memory: Arc::new(Mutex::new(state)),
            stream: Stream::DEFAULT,
            calls: 0,
        }
    }
}

impl Default for HostRuntime {
    fn default() -> Self {
        Self::new()
    }
}

impl HostRuntime {
    /// Runtime with no memory limit and an empty pool
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Start configuring a runtime
    pub fn builder() -> HostRuntimeBuilder {
        HostRuntimeBuilder::default()
    }

    /// Number of entry points invoked so far
    ///
    /// Counts routine calls and handle-level memory and stream operations;
    /// `allocate`, `deallocate` and the copy helpers are not counted.
    pub fn calls(&self) -> usize {
        self.calls
    }

    /// Bytes currently mapped in the simulated address space
    pub fn mapped_bytes(&self) -> usize {
        self.memory.lock().heap.in_use()
    }

    /// Bytes of the active scratch region currently handed out
    pub fn scratch_in_use(&self) -> usize {
        self.memory.lock().used()
    }

    fn enter(&mut self, entry: &'static str) {
        self.calls += 1;
        tracing::trace!(entry, "host runtime call");
    }
}

impl Runtime for HostRuntime {
    fn name(&self) -> &'static str {
        "host"
    }

    fn stream(&self) -> Stream {
        self.stream
    }

    fn set_stream(&mut self, stream: Stream) -> RtStatus {
        self.enter("set_stream");
        self.stream = stream;
        RtStatus::Success
    }

    fn start_memory_size_query(&mut self) -> RtStatus {
        self.enter("start_memory_size_query");
        self.memory.lock().start_query()
    }

    fn stop_memory_size_query(&mut self) -> Result<usize, RtStatus> {
        self.enter("stop_memory_size_query");
        self.memory.lock().stop_query()
    }

    fn is_memory_size_query(&self) -> bool {
        self.memory.lock().in_query()
    }

    fn set_optimal_memory_size(&mut self, sizes: &[usize]) -> RtStatus {
        self.enter("set_optimal_memory_size");
        self.memory.lock().register(sizes)
    }

    fn is_managing_memory(&self) -> bool {
        matches!(self.memory.lock().region(), ScratchRegion::Managed { .. })
    }

    fn memory_size(&self) -> Result<usize, RtStatus> {
        Ok(match self.memory.lock().region() {
            ScratchRegion::Managed { size, .. } | ScratchRegion::Workspace { size, .. } => size,
        })
    }

    fn set_memory_size(&mut self, size_bytes: usize) -> RtStatus {
        self.enter("set_memory_size");
        self.memory.lock().resize_pool(size_bytes)
    }

    fn set_workspace(&mut self, ptr: DevicePtr<u8>, size_bytes: usize) -> RtStatus {
        self.enter("set_workspace");
        self.memory.lock().install_workspace(ptr, size_bytes)
    }

    fn device_malloc(&mut self, sizes: &[usize]) -> Result<DeviceMalloc, RtStatus> {
        self.enter("device_malloc");
        let mut mem = self.memory.lock();
        let mark = mem.used();
        let ptrs = mem.claim(sizes)?;
        let bytes = mem.used() - mark;
        let memory = Arc::clone(&self.memory);
        Ok(DeviceMalloc::new(ptrs, bytes, move || {
            memory.lock().set_used(mark);
        }))
    }

    fn allocate(&mut self, size_bytes: usize) -> Result<DevicePtr<u8>, RtStatus> {
        self.memory.lock().heap.alloc(size_bytes)
    }

    fn deallocate(&mut self, ptr: DevicePtr<u8>, _size_bytes: usize) {
        self.memory.lock().heap.free(ptr);
    }

    fn copy_to_device(&self, src: &[u8], dst: DevicePtr<u8>) -> RtStatus {
        match self.memory.lock().heap.write_bytes(dst, src) {
            Ok(()) => RtStatus::Success,
            Err(status) => status,
        }
    }

    fn copy_from_device(&self, src: DevicePtr<u8>, dst: &mut [u8]) -> RtStatus {
        match self.memory.lock().heap.read_bytes(src, dst) {
            Ok(()) => RtStatus::Success,
            Err(status) => status,
        }
    }

    fn synchronize(&self) -> RtStatus {
        RtStatus::Success
    }
}

impl std::fmt::Debug for HostRuntime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostRuntime")
            .field("stream", &self.stream)
            .field("calls", &self.calls)
            .finish_non_exhaustive()
    }
}
