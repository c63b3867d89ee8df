//! Device addresses and streams
//!
//! Device memory is addressed by raw `u64` values, as in the runtime APIs the
//! solver layer sits on. [`DevicePtr`] adds the element type on top so the
//! routine signatures say what each buffer holds.

use bytemuck::{Pod, Zeroable};
use std::fmt;
use std::marker::PhantomData;

/// Typed device address
///
/// A null `DevicePtr` (address 0) is a legal value: size queries pass null
/// data pointers, and some routines select a variant based on nullness
/// (e.g. `getrf` without pivots).
#[repr(transparent)]
pub struct DevicePtr<T> {
    addr: u64,
    _marker: PhantomData<fn() -> T>,
}

impl<T> DevicePtr<T> {
    /// Null device address
    #[inline]
    pub const fn null() -> Self {
        Self::from_addr(0)
    }

    /// Wrap a raw device address
    #[inline]
    pub const fn from_addr(addr: u64) -> Self {
        Self {
            addr,
            _marker: PhantomData,
        }
    }

    /// Raw device address
    #[inline]
    pub const fn addr(self) -> u64 {
        self.addr
    }

    /// True if this is the null address
    #[inline]
    pub const fn is_null(self) -> bool {
        self.addr == 0
    }

    /// Advance by `count` elements of `T`
    #[inline]
    pub const fn add(self, count: usize) -> Self {
        self.byte_add(count * std::mem::size_of::<T>())
    }

    /// Advance by `bytes` bytes
    #[inline]
    pub const fn byte_add(self, bytes: usize) -> Self {
        if self.addr == 0 {
            return self;
        }
        Self::from_addr(self.addr + bytes as u64)
    }

    /// Reinterpret the element type
    #[inline]
    pub const fn cast<U>(self) -> DevicePtr<U> {
        DevicePtr::from_addr(self.addr)
    }

    /// Null-aware conversion into an `Option`
    #[inline]
    pub fn non_null(self) -> Option<Self> {
        (!self.is_null()).then_some(self)
    }
}

impl<T> Clone for DevicePtr<T> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for DevicePtr<T> {}

impl<T> PartialEq for DevicePtr<T> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.addr == other.addr
    }
}

impl<T> Eq for DevicePtr<T> {}

impl<T> Default for DevicePtr<T> {
    fn default() -> Self {
        Self::null()
    }
}

impl<T> fmt::Debug for DevicePtr<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DevicePtr(0x{:x})", self.addr)
    }
}

// SAFETY: DevicePtr is #[repr(transparent)] over u64 (PhantomData is a ZST), so
// any bit pattern is valid and all-zeroes is the null address. This lets arrays
// of device pointers (batched routines) be uploaded as raw bytes.
unsafe impl<T: 'static> Zeroable for DevicePtr<T> {}
unsafe impl<T: 'static> Pod for DevicePtr<T> {}

/// Compute stream identifier
///
/// Work issued on one stream executes in issue order. Stream 0 is the
/// runtime's default (null) stream.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Stream(pub u64);

impl Stream {
    /// The default stream
    pub const DEFAULT: Self = Self(0);

    /// Raw stream id
    #[inline]
    pub const fn id(self) -> u64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pointer_arithmetic() {
        let p = DevicePtr::<f64>::from_addr(0x1000);
        assert_eq!(p.add(3).addr(), 0x1018);
        assert_eq!(p.byte_add(5).addr(), 0x1005);
        assert_eq!(p.cast::<u8>().add(3).addr(), 0x1003);
    }

    #[test]
    fn test_null_stays_null() {
        let p = DevicePtr::<f32>::null();
        assert!(p.is_null());
        assert!(p.add(10).is_null());
        assert_eq!(p.non_null(), None);
    }

    #[test]
    fn test_pointer_array_is_pod() {
        let ptrs = [DevicePtr::<f32>::from_addr(8), DevicePtr::from_addr(16)];
        let bytes: &[u8] = bytemuck::cast_slice(&ptrs);
        assert_eq!(bytes.len(), 16);
    }
}
