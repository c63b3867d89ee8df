//! Simulated device memory for the host runtime
//!
//! Device addresses are handed out from a sparse 64-bit address space with an
//! unmapped gap after every block, so an access that runs past the end of a
//! buffer never lands in a neighbouring one: it fails with `InvalidPointer`
//! instead of corrupting memory silently.

use crate::runtime::{DevicePtr, RtStatus};
use bytemuck::Pod;
use smallvec::SmallVec;
use std::collections::BTreeMap;

/// First address handed out
const BASE_ADDR: u64 = 0x7f00_0000_0000;

/// Alignment of every block start
const BLOCK_ALIGN: u64 = 256;

/// Unmapped bytes between consecutive blocks
const BLOCK_GAP: u64 = 4096;

#[inline]
pub(super) fn align_up(bytes: usize, align: usize) -> usize {
    bytes.div_ceil(align) * align
}

/// Sum of `sizes`, each rounded up to `align`; `None` on overflow
fn aligned_total(sizes: &[usize], align: usize) -> Option<usize> {
    sizes.iter().try_fold(0usize, |total, &s| {
        total.checked_add(s.checked_next_multiple_of(align)?)
    })
}

/// Address space holding every allocation of one runtime
pub(super) struct DeviceHeap {
    blocks: BTreeMap<u64, Vec<u8>>,
    next_addr: u64,
    in_use: usize,
    limit: usize,
}

impl DeviceHeap {
    pub(super) fn new(limit: usize) -> Self {
        Self {
            blocks: BTreeMap::new(),
            next_addr: BASE_ADDR,
            in_use: 0,
            limit,
        }
    }

    pub(super) fn in_use(&self) -> usize {
        self.in_use
    }

    /// Map a zero-initialized block of `bytes` bytes
    pub(super) fn alloc(&mut self, bytes: usize) -> Result<DevicePtr<u8>, RtStatus> {
        if bytes > self.limit.saturating_sub(self.in_use) {
            return Err(RtStatus::MemoryError);
        }
        let addr = self.next_addr;
        let extent = (bytes as u64).div_ceil(BLOCK_ALIGN) * BLOCK_ALIGN;
        self.next_addr = addr + extent + BLOCK_GAP;
        self.blocks.insert(addr, vec![0u8; bytes]);
        self.in_use += bytes;
        Ok(DevicePtr::from_addr(addr))
    }

    /// Unmap a block; returns false if `ptr` is not a block start
    pub(super) fn free(&mut self, ptr: DevicePtr<u8>) -> bool {
        match self.blocks.remove(&ptr.addr()) {
            Some(block) => {
                self.in_use -= block.len();
                true
            }
            None => false,
        }
    }

    /// Block start and offset of `[addr, addr + len)`, which must lie inside one block
    fn locate(&self, addr: u64, len: usize) -> Result<(u64, usize), RtStatus> {
        let (&base, block) = self
            .blocks
            .range(..=addr)
            .next_back()
            .ok_or(RtStatus::InvalidPointer)?;
        let offset = (addr - base) as usize;
        if offset.checked_add(len).is_none_or(|end| end > block.len()) {
            return Err(RtStatus::InvalidPointer);
        }
        Ok((base, offset))
    }

    /// Check that `[ptr, ptr + len)` is mapped
    pub(super) fn check_range(&self, ptr: DevicePtr<u8>, len: usize) -> Result<(), RtStatus> {
        if len == 0 {
            return Ok(());
        }
        if ptr.is_null() {
            return Err(RtStatus::InvalidPointer);
        }
        self.locate(ptr.addr(), len).map(|_| ())
    }

    pub(super) fn read_bytes(&self, src: DevicePtr<u8>, dst: &mut [u8]) -> Result<(), RtStatus> {
        if dst.is_empty() {
            return Ok(());
        }
        if src.is_null() {
            return Err(RtStatus::InvalidPointer);
        }
        let (base, offset) = self.locate(src.addr(), dst.len())?;
        let block = &self.blocks[&base];
        dst.copy_from_slice(&block[offset..offset + dst.len()]);
        Ok(())
    }

    pub(super) fn write_bytes(&mut self, dst: DevicePtr<u8>, src: &[u8]) -> Result<(), RtStatus> {
        if src.is_empty() {
            return Ok(());
        }
        if dst.is_null() {
            return Err(RtStatus::InvalidPointer);
        }
        let (base, offset) = self.locate(dst.addr(), src.len())?;
        let block = self
            .blocks
            .get_mut(&base)
            .ok_or(RtStatus::InvalidPointer)?;
        block[offset..offset + src.len()].copy_from_slice(src);
        Ok(())
    }

    pub(super) fn fill(
        &mut self,
        dst: DevicePtr<u8>,
        len: usize,
        byte: u8,
    ) -> Result<(), RtStatus> {
        if len == 0 {
            return Ok(());
        }
        let (base, offset) = self.locate(dst.addr(), len)?;
        let block = self
            .blocks
            .get_mut(&base)
            .ok_or(RtStatus::InvalidPointer)?;
        block[offset..offset + len].fill(byte);
        Ok(())
    }

    /// Read `count` elements starting at `src`
    pub(super) fn load<T: Pod>(&self, src: DevicePtr<T>, count: usize) -> Result<Vec<T>, RtStatus> {
        let mut out = vec![T::zeroed(); count];
        self.read_bytes(src.cast(), bytemuck::cast_slice_mut(&mut out))?;
        Ok(out)
    }

    /// Write `data` starting at `dst`
    pub(super) fn store<T: Pod>(&mut self, dst: DevicePtr<T>, data: &[T]) -> Result<(), RtStatus> {
        self.write_bytes(dst.cast(), bytemuck::cast_slice(data))
    }
}

/// Where routine scratch currently comes from
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum ScratchRegion {
    /// Pool owned by the runtime
    Managed { base: DevicePtr<u8>, size: usize },
    /// Region installed by the caller
    Workspace { base: DevicePtr<u8>, size: usize },
}

impl ScratchRegion {
    fn base(self) -> DevicePtr<u8> {
        match self {
            Self::Managed { base, .. } | Self::Workspace { base, .. } => base,
        }
    }

    fn size(self) -> usize {
        match self {
            Self::Managed { size, .. } | Self::Workspace { size, .. } => size,
        }
    }
}

/// Shared memory state of one host runtime
///
/// Held behind `Arc<parking_lot::Mutex<_>>` so the release callbacks of
/// outstanding [`DeviceMalloc`](crate::runtime::DeviceMalloc) guards can
/// return their bytes after the borrow of the runtime has ended.
pub(super) struct MemoryState {
    pub(super) heap: DeviceHeap,
    region: ScratchRegion,
    used: usize,
    query: Option<usize>,
    alignment: usize,
}

impl MemoryState {
    pub(super) fn new(limit: usize, alignment: usize) -> Self {
        Self {
            heap: DeviceHeap::new(limit),
            region: ScratchRegion::Managed {
                base: DevicePtr::null(),
                size: 0,
            },
            used: 0,
            query: None,
            alignment,
        }
    }

    pub(super) fn region(&self) -> ScratchRegion {
        self.region
    }

    pub(super) fn used(&self) -> usize {
        self.used
    }

    pub(super) fn set_used(&mut self, mark: usize) {
        self.used = mark;
    }

    // --- size-query bracket ---

    pub(super) fn start_query(&mut self) -> RtStatus {
        if self.query.is_some() {
            return RtStatus::SizeQueryMismatch;
        }
        self.query = Some(0);
        RtStatus::Success
    }

    pub(super) fn stop_query(&mut self) -> Result<usize, RtStatus> {
        self.query.take().ok_or(RtStatus::SizeQueryMismatch)
    }

    pub(super) fn in_query(&self) -> bool {
        self.query.is_some()
    }

    /// Add aligned sizes to the open query
    pub(super) fn register(&mut self, sizes: &[usize]) -> RtStatus {
        let align = self.alignment;
        let Some(total) = self.query.as_mut() else {
            return RtStatus::SizeQueryMismatch;
        };
        let Some(added) = aligned_total(sizes, align) else {
            return RtStatus::InternalError;
        };
        let Some(grown) = total.checked_add(added) else {
            return RtStatus::InternalError;
        };
        *total = grown;
        if added > 0 {
            RtStatus::SizeIncreased
        } else {
            RtStatus::SizeUnchanged
        }
    }

    // --- scratch regions ---

    /// Replace the managed pool with one of `size` bytes
    pub(super) fn resize_pool(&mut self, size: usize) -> RtStatus {
        if self.used != 0 {
            return RtStatus::InternalError;
        }
        let Some(size) = size.checked_next_multiple_of(self.alignment) else {
            return RtStatus::MemoryError;
        };
        if let ScratchRegion::Managed { base, size: current } = self.region {
            if current == size {
                return RtStatus::Success;
            }
            if !base.is_null() {
                self.heap.free(base);
            }
        }
        self.region = ScratchRegion::Managed {
            base: DevicePtr::null(),
            size: 0,
        };
        if size == 0 {
            return RtStatus::Success;
        }
        match self.heap.alloc(size) {
            Ok(base) => {
                self.region = ScratchRegion::Managed { base, size };
                RtStatus::Success
            }
            Err(status) => status,
        }
    }

    /// Switch to a caller-owned scratch region, releasing the managed pool
    pub(super) fn install_workspace(&mut self, base: DevicePtr<u8>, size: usize) -> RtStatus {
        if self.used != 0 {
            return RtStatus::InternalError;
        }
        if size > 0 && self.heap.check_range(base, size).is_err() {
            return RtStatus::InvalidPointer;
        }
        if let ScratchRegion::Managed { base: pool, .. } = self.region {
            if !pool.is_null() {
                self.heap.free(pool);
            }
        }
        self.region = ScratchRegion::Workspace { base, size };
        RtStatus::Success
    }

    /// Bump-allocate aligned buffers from the active region and zero them
    pub(super) fn claim(
        &mut self,
        sizes: &[usize],
    ) -> Result<SmallVec<[DevicePtr<u8>; 4]>, RtStatus> {
        let align = self.alignment;
        let needed = aligned_total(sizes, align).ok_or(RtStatus::MemoryError)?;
        if needed == 0 {
            return Ok(sizes.iter().map(|_| DevicePtr::null()).collect());
        }
        if needed > self.region.size().saturating_sub(self.used) {
            return Err(RtStatus::MemoryError);
        }
        let base = self.region.base();
        let mut ptrs = SmallVec::new();
        let mut offset = self.used;
        for &size in sizes {
            let span = align_up(size, align);
            let ptr = if size == 0 {
                DevicePtr::null()
            } else {
                base.byte_add(offset)
            };
            self.heap.fill(ptr, size, 0)?;
            ptrs.push(ptr);
            offset += span;
        }
        self.used = offset;
        Ok(ptrs)
    }
}
