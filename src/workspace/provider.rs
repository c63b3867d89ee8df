//! Workspace-size calculator and workspace provider
//!
//! Both are methods on [`Handle`]: the calculator negotiates a byte count
//! with the runtime's size-query bracket, the provider turns either a caller
//! buffer or the handle's reservation into the pointers a dispatch needs.
//! [`Handle::reserve`] is the only code that changes the reservation.

use super::{AuxKind, Workspace, WorkspaceLayout};
use crate::convert::{check, check_routine, error_from_runtime};
use crate::error::{Error, Result};
use crate::handle::{Handle, MemoryMode};
use crate::runtime::{DeviceMalloc, DevicePtr, RtStatus, Runtime};
use smallvec::SmallVec;

/// Auxiliary pointers of one call, valid until the value is dropped
///
/// When the arrays came from the runtime's pool the allocation is released
/// on drop; when they are views into a caller buffer nothing is released.
#[derive(Debug)]
pub struct ProvidedWorkspace {
    aux: SmallVec<[(AuxKind, DevicePtr<u8>); 4]>,
    _alloc: Option<DeviceMalloc>,
}

impl ProvidedWorkspace {
    /// Pointer to the first auxiliary array of `kind`, null if there is none
    pub fn aux<T>(&self, kind: AuxKind) -> DevicePtr<T> {
        self.aux
            .iter()
            .find(|(k, _)| *k == kind)
            .map_or(DevicePtr::null(), |(_, p)| p.cast())
    }
}

impl<R: Runtime> Handle<R> {
    /// Total scratch bytes one call described by `layout` needs
    ///
    /// Runs `dry_run` (the runtime routine with null data pointers) inside a
    /// size-query bracket, adds the auxiliary spans and returns the runtime's
    /// rounded total. The bracket is closed on every path.
    pub fn workspace_bytes<F>(&mut self, layout: &WorkspaceLayout, dry_run: F) -> Result<usize>
    where
        F: FnOnce(&mut R) -> RtStatus,
    {
        let spans = layout.aux_spans()?;
        let aux_bytes = layout.aux_bytes()?;
        check(self.runtime.start_memory_size_query())?;
        let negotiated = check_routine(layout.routine(), dry_run(&mut self.runtime))
            .and_then(|()| check(self.runtime.set_optimal_memory_size(&spans)));
        let total = self
            .runtime
            .stop_memory_size_query()
            .map_err(error_from_runtime);
        negotiated?;
        let total = total?;
        tracing::debug!(
            routine = layout.routine(),
            aux_bytes,
            total,
            "workspace size negotiated"
        );
        Ok(total)
    }

    /// Make the scratch for one call available and return the auxiliary pointers
    ///
    /// With a caller buffer, the base region is installed as the runtime's
    /// workspace and the auxiliary arrays are views into the buffer's tail.
    /// Without one, the calculator runs, the reservation grows to the total
    /// if needed and the auxiliary arrays are allocated from the pool.
    pub fn provide_workspace<F>(
        &mut self,
        layout: &WorkspaceLayout,
        work: Option<Workspace>,
        dry_run: F,
    ) -> Result<ProvidedWorkspace>
    where
        F: FnOnce(&mut R) -> RtStatus,
    {
        match work {
            Some(ws) => {
                let plan = layout.plan(ws.bytes)?;
                check(self.runtime.set_workspace(ws.ptr, plan.base_bytes))?;
                self.mode = MemoryMode::CallerManaged;
                let aux = layout
                    .aux()
                    .iter()
                    .zip(&plan.offsets)
                    .map(|(array, &offset)| (array.kind, ws.ptr.byte_add(offset)))
                    .collect();
                Ok(ProvidedWorkspace { aux, _alloc: None })
            }
            None => {
                let total = self.workspace_bytes(layout, dry_run)?;
                self.reserve(total)?;
                let spans = layout.aux_spans()?;
                let alloc = self.runtime.device_malloc(&spans).map_err(|status| {
                    tracing::warn!(
                        routine = layout.routine(),
                        ?status,
                        "auxiliary allocation failed"
                    );
                    Error::AllocFailed {
                        bytes: spans.iter().sum(),
                    }
                })?;
                let aux = layout
                    .aux()
                    .iter()
                    .enumerate()
                    .map(|(i, array)| (array.kind, alloc.ptr(i).unwrap_or_default()))
                    .collect();
                Ok(ProvidedWorkspace {
                    aux,
                    _alloc: Some(alloc),
                })
            }
        }
    }

    /// Grow the runtime's pool to at least `bytes`
    ///
    /// The reservation never shrinks. Coming back from a caller workspace the
    /// pool is re-established at the larger of the standing reservation and
    /// `bytes`.
    pub(crate) fn reserve(&mut self, bytes: usize) -> Result<()> {
        if self.mode == MemoryMode::LibraryManaged && bytes <= self.reservation {
            return Ok(());
        }
        let target = self.reservation.max(bytes);
        let status = self.runtime.set_memory_size(target);
        if !status.is_success_like() {
            tracing::warn!(bytes = target, ?status, "scratch reservation failed");
            // The runtime may have dropped its pool; track what it actually holds
            self.reservation = self.runtime.memory_size().unwrap_or(0).min(self.reservation);
            self.mode = MemoryMode::LibraryManaged;
            return Err(match status {
                RtStatus::MemoryError => Error::AllocFailed { bytes: target },
                other => error_from_runtime(other),
            });
        }
        if target > self.reservation {
            tracing::debug!(from = self.reservation, to = target, "scratch reservation grew");
        }
        self.reservation = target;
        self.mode = MemoryMode::LibraryManaged;
        Ok(())
    }
}
