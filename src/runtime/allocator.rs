//! Scoped device allocations
//!
//! A [`DeviceMalloc`] is the runtime's call-scoped allocation primitive: it
//! carves one or more buffers out of the memory the runtime manages for a
//! handle and gives them back when dropped. The solver layer uses it for the
//! auxiliary arrays of a call when the caller supplied no workspace; because
//! release happens in `Drop`, every early return (`?`) frees the scratch too.

use super::memory::DevicePtr;
use smallvec::SmallVec;
use std::fmt;

/// Release callback run when the allocation goes out of scope
type Release = Box<dyn FnOnce() + Send>;

/// Call-scoped group of device buffers
pub struct DeviceMalloc {
    ptrs: SmallVec<[DevicePtr<u8>; 4]>,
    bytes: usize,
    release: Option<Release>,
}

impl DeviceMalloc {
    /// Wrap buffers obtained from a runtime
    ///
    /// `release` is invoked exactly once, when the value is dropped.
    pub fn new(
        ptrs: impl IntoIterator<Item = DevicePtr<u8>>,
        bytes: usize,
        release: impl FnOnce() + Send + 'static,
    ) -> Self {
        Self {
            ptrs: ptrs.into_iter().collect(),
            bytes,
            release: Some(Box::new(release)),
        }
    }

    /// An allocation with no buffers and nothing to release
    pub fn empty() -> Self {
        Self {
            ptrs: SmallVec::new(),
            bytes: 0,
            release: None,
        }
    }

    /// Pointer of the `index`-th requested buffer
    #[inline]
    pub fn ptr(&self, index: usize) -> Option<DevicePtr<u8>> {
        self.ptrs.get(index).copied()
    }

    /// Number of buffers
    #[inline]
    pub fn len(&self) -> usize {
        self.ptrs.len()
    }

    /// True if no buffers were requested
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ptrs.is_empty()
    }

    /// Total bytes held
    #[inline]
    pub fn bytes(&self) -> usize {
        self.bytes
    }
}

impl Drop for DeviceMalloc {
    fn drop(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl fmt::Debug for DeviceMalloc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeviceMalloc")
            .field("ptrs", &self.ptrs)
            .field("bytes", &self.bytes)
            .finish_non_exhaustive()
    }
}
