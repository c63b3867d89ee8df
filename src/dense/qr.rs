//! QR family: `geqrf`, `orgqr`/`ungqr`, `ormqr`/`unmqr` and the `gels` driver

use super::null;
use crate::dtype::Scalar;
use crate::error::Result;
use crate::handle::Handle;
use crate::runtime::{DevicePtr, LapackOps, RtOperation, RtStatus};
use crate::types::{Operation, SideMode};
use crate::workspace::{Workspace, WorkspaceLayout, narrow_lwork};

/// Runtime form of `gels`: in place when `x` and `b` are the same buffer
fn gels_call<R: LapackOps, T: Scalar>(
    rt: &mut R,
    m: i32,
    n: i32,
    nrhs: i32,
    a: DevicePtr<T>,
    lda: i32,
    b: DevicePtr<T>,
    ldb: i32,
    x: DevicePtr<T>,
    ldx: i32,
    info: DevicePtr<i32>,
    in_place: bool,
) -> RtStatus {
    let trans = RtOperation::None;
    if in_place {
        rt.gels(trans, m, n, nrhs, a, lda, b, ldb, info)
    } else {
        rt.gels_outofplace(trans, m, n, nrhs, a, lda, b, ldb, x, ldx, info)
    }
}

impl<R: LapackOps> Handle<R> {
    pub(crate) fn geqrf_bytes<T: Scalar>(&mut self, m: i32, n: i32, lda: i32) -> Result<usize> {
        self.workspace_bytes(&WorkspaceLayout::new("geqrf"), |rt| {
            rt.geqrf::<T>(m, n, null(), lda, null())
        })
    }

    /// Workspace bytes for [`geqrf`](Self::geqrf)
    pub fn geqrf_buffer_size<T: Scalar>(&mut self, m: i32, n: i32, lda: i32) -> Result<i32> {
        narrow_lwork(self.geqrf_bytes::<T>(m, n, lda)?)
    }

    /// Householder QR factorization in place; `tau` receives min(m, n) scalars
    pub fn geqrf<T: Scalar>(
        &mut self,
        m: i32,
        n: i32,
        a: DevicePtr<T>,
        lda: i32,
        tau: DevicePtr<T>,
        work: Option<Workspace>,
        info: DevicePtr<i32>,
    ) -> Result<()> {
        let layout = WorkspaceLayout::new("geqrf");
        let _scratch = self.provide_workspace(&layout, work, |rt| {
            rt.geqrf::<T>(m, n, null(), lda, null())
        })?;
        self.dispatch::<T>("geqrf", |rt| rt.geqrf(m, n, a, lda, tau))?;
        self.clear_info(info, 1)
    }

    /// Workspace bytes for [`orgqr`](Self::orgqr)
    pub fn orgqr_buffer_size<T: Scalar>(
        &mut self,
        m: i32,
        n: i32,
        k: i32,
        lda: i32,
    ) -> Result<i32> {
        let bytes = self.workspace_bytes(&WorkspaceLayout::new("orgqr"), |rt| {
            rt.orgqr::<T>(m, n, k, null(), lda, null())
        })?;
        narrow_lwork(bytes)
    }

    /// Form the first `n` columns of Q from `k` reflectors
    pub fn orgqr<T: Scalar>(
        &mut self,
        m: i32,
        n: i32,
        k: i32,
        a: DevicePtr<T>,
        lda: i32,
        tau: DevicePtr<T>,
        work: Option<Workspace>,
        info: DevicePtr<i32>,
    ) -> Result<()> {
        let layout = WorkspaceLayout::new("orgqr");
        let _scratch = self.provide_workspace(&layout, work, |rt| {
            rt.orgqr::<T>(m, n, k, null(), lda, null())
        })?;
        self.dispatch::<T>("orgqr", |rt| rt.orgqr(m, n, k, a, lda, tau))?;
        self.clear_info(info, 1)
    }

    /// Workspace bytes for [`ormqr`](Self::ormqr)
    pub fn ormqr_buffer_size<T: Scalar>(
        &mut self,
        side: SideMode,
        trans: Operation,
        m: i32,
        n: i32,
        k: i32,
        lda: i32,
        ldc: i32,
    ) -> Result<i32> {
        let bytes = self.workspace_bytes(&WorkspaceLayout::new("ormqr"), |rt| {
            rt.ormqr::<T>(side.into(), trans.into(), m, n, k, null(), lda, null(), null(), ldc)
        })?;
        narrow_lwork(bytes)
    }

    /// Overwrite C with `op(Q) C` or `C op(Q)`
    ///
    /// `trans` must be `T` for real and `C` for complex types when not `N`.
    pub fn ormqr<T: Scalar>(
        &mut self,
        side: SideMode,
        trans: Operation,
        m: i32,
        n: i32,
        k: i32,
        a: DevicePtr<T>,
        lda: i32,
        tau: DevicePtr<T>,
        c: DevicePtr<T>,
        ldc: i32,
        work: Option<Workspace>,
        info: DevicePtr<i32>,
    ) -> Result<()> {
        let layout = WorkspaceLayout::new("ormqr");
        let _scratch = self.provide_workspace(&layout, work, |rt| {
            rt.ormqr::<T>(side.into(), trans.into(), m, n, k, null(), lda, null(), null(), ldc)
        })?;
        self.dispatch::<T>("ormqr", |rt| {
            rt.ormqr(side.into(), trans.into(), m, n, k, a, lda, tau, c, ldc)
        })?;
        self.clear_info(info, 1)
    }

    /// Workspace bytes for [`gels`](Self::gels)
    pub fn gels_buffer_size<T: Scalar>(
        &mut self,
        m: i32,
        n: i32,
        nrhs: i32,
        lda: i32,
        b: DevicePtr<T>,
        ldb: i32,
        x: DevicePtr<T>,
        ldx: i32,
    ) -> Result<i32> {
        let in_place = b == x;
        let bytes = self.workspace_bytes(&WorkspaceLayout::new("gels"), |rt| {
            gels_call::<R, T>(
                rt,
                m,
                n,
                nrhs,
                null(),
                lda,
                null(),
                ldb,
                null(),
                ldx,
                null(),
                in_place,
            )
        })?;
        narrow_lwork(bytes)
    }

    /// Least-squares solution of an overdetermined system through QR
    ///
    /// In place (solution in the first `n` rows of B) when `x` and `b` are the
    /// same buffer, out of place into X otherwise.
    pub fn gels<T: Scalar>(
        &mut self,
        m: i32,
        n: i32,
        nrhs: i32,
        a: DevicePtr<T>,
        lda: i32,
        b: DevicePtr<T>,
        ldb: i32,
        x: DevicePtr<T>,
        ldx: i32,
        work: Option<Workspace>,
        info: DevicePtr<i32>,
    ) -> Result<()> {
        let in_place = b == x;
        let layout = WorkspaceLayout::new("gels");
        let _scratch = self.provide_workspace(&layout, work, |rt| {
            gels_call::<R, T>(
                rt,
                m,
                n,
                nrhs,
                null(),
                lda,
                null(),
                ldb,
                null(),
                ldx,
                null(),
                in_place,
            )
        })?;
        let routine = if in_place { "gels" } else { "gels_outofplace" };
        self.dispatch::<T>(routine, |rt| {
            gels_call(rt, m, n, nrhs, a, lda, b, ldb, x, ldx, info, in_place)
        })
    }
}
