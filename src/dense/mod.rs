//! Dense routine families
//!
//! Each family is a set of methods on [`Handle`]: a `*_buffer_size` query
//! returning the scratch bytes an execute call needs, and the execute call
//! itself taking an optional caller [`Workspace`](crate::workspace::Workspace).
//! An execute call runs one linear pipeline:
//!
//! ```text
//! translate enums → provide workspace → runtime routine → [V post-pass] → status
//! ```
//!
//! All families are generic over [`Scalar`]; the `sy*`/`or*` names also cover
//! the Hermitian/unitary (`he*`/`un*`) variants for complex types.

mod bidiagonal;
mod cholesky;
mod eigen;
mod generic64;
mod lu;
mod qr;
mod svd;
mod tridiagonal;

use crate::convert::{check, check_routine};
use crate::dtype::{RealScalar, Scalar};
use crate::error::{Error, Result};
use crate::handle::Handle;
use crate::runtime::{DevicePtr, LapackOps, RtStatus};
use crate::types::JacobiParams;
use crate::workspace::{AuxKind, ProvidedWorkspace};
use bytemuck::Pod;

/// Element count of a dimension argument; negative values count as empty
/// and are rejected later by the runtime's own validation
#[inline]
fn len(n: i32) -> usize {
    n.max(0) as usize
}

/// Null pointer of any element type
#[inline]
fn null<T>() -> DevicePtr<T> {
    DevicePtr::null()
}

/// Convergence tolerance in the routine's real precision
fn abstol<T: Scalar>(params: &JacobiParams) -> T::Real {
    <T::Real as RealScalar>::from_f64(params.tolerance().max(0.0))
}

impl<R: LapackOps> Handle<R> {
    /// Issue one runtime routine and translate its status
    fn dispatch<T: Scalar>(
        &mut self,
        routine: &'static str,
        call: impl FnOnce(&mut R) -> RtStatus,
    ) -> Result<()> {
        tracing::trace!(routine, dtype = %T::DTYPE, "dispatch");
        check_routine(routine, call(&mut self.runtime))
    }

    /// Zero `count` info values for routines whose runtime form reports none
    fn clear_info(&mut self, info: DevicePtr<i32>, count: usize) -> Result<()> {
        if info.is_null() || count == 0 {
            return Ok(());
        }
        let zeros = vec![0i32; count];
        check(
            self.runtime
                .copy_to_device(bytemuck::cast_slice(&zeros), info.cast()),
        )
    }

    /// Copy `count` values back from device memory
    fn read_back<P: Pod>(&self, ptr: DevicePtr<P>, count: usize) -> Result<Vec<P>> {
        let mut out = vec![P::zeroed(); count];
        check(
            self.runtime
                .copy_from_device(ptr.cast(), bytemuck::cast_slice_mut(&mut out)),
        )?;
        Ok(out)
    }

    /// Store the residuals and sweep counts of a Jacobi execution in `params`
    ///
    /// Empty problems have no arrays to read; they record zero residual and
    /// zero sweeps.
    fn record_jacobi<T: Scalar>(
        &self,
        scratch: &ProvidedWorkspace,
        count: usize,
        batched: bool,
        params: &mut JacobiParams,
    ) -> Result<()> {
        let residual = scratch.aux::<T::Real>(AuxKind::Residual);
        if residual.is_null() {
            params.record(vec![0.0; count], vec![0; count], batched);
            return Ok(());
        }
        let residuals = self
            .read_back(residual, count)?
            .into_iter()
            .map(<T::Real as RealScalar>::to_f64)
            .collect();
        let sweeps = self.read_back(scratch.aux::<i32>(AuxKind::Sweeps), count)?;
        params.record(residuals, sweeps, batched);
        Ok(())
    }
}

/// Error for entry points kept for API compatibility only
fn not_supported(routine: &'static str) -> Error {
    tracing::warn!(routine, "entry point has no implementation");
    Error::NotSupported { feature: routine }
}
