//! Tridiagonal reduction and symmetric indefinite factorization:
//! `sytrd`, `orgtr`, `ormtr`, `sytrf`

use super::null;
use crate::dtype::Scalar;
use crate::error::Result;
use crate::handle::Handle;
use crate::runtime::{DevicePtr, LapackOps, RtFill};
use crate::types::{FillMode, Operation, SideMode};
use crate::workspace::{Workspace, WorkspaceLayout, narrow_lwork};

impl<R: LapackOps> Handle<R> {
    /// Workspace bytes for [`sytrd`](Self::sytrd)
    pub fn sytrd_buffer_size<T: Scalar>(
        &mut self,
        uplo: FillMode,
        n: i32,
        lda: i32,
    ) -> Result<i32> {
        let bytes = self.workspace_bytes(&WorkspaceLayout::new("sytrd"), |rt| {
            rt.sytrd::<T>(uplo.into(), n, null(), lda, null(), null(), null())
        })?;
        narrow_lwork(bytes)
    }

    /// Reduce a Hermitian matrix to real tridiagonal form `Q^H A Q = T`
    pub fn sytrd<T: Scalar>(
        &mut self,
        uplo: FillMode,
        n: i32,
        a: DevicePtr<T>,
        lda: i32,
        d: DevicePtr<T::Real>,
        e: DevicePtr<T::Real>,
        tau: DevicePtr<T>,
        work: Option<Workspace>,
        info: DevicePtr<i32>,
    ) -> Result<()> {
        let layout = WorkspaceLayout::new("sytrd");
        let _scratch = self.provide_workspace(&layout, work, |rt| {
            rt.sytrd::<T>(uplo.into(), n, null(), lda, null(), null(), null())
        })?;
        self.dispatch::<T>("sytrd", |rt| rt.sytrd(uplo.into(), n, a, lda, d, e, tau))?;
        self.clear_info(info, 1)
    }

    /// Workspace bytes for [`orgtr`](Self::orgtr)
    pub fn orgtr_buffer_size<T: Scalar>(
        &mut self,
        uplo: FillMode,
        n: i32,
        lda: i32,
    ) -> Result<i32> {
        let bytes = self.workspace_bytes(&WorkspaceLayout::new("orgtr"), |rt| {
            rt.orgtr::<T>(uplo.into(), n, null(), lda, null())
        })?;
        narrow_lwork(bytes)
    }

    /// Form Q from the reflectors of [`sytrd`](Self::sytrd)
    pub fn orgtr<T: Scalar>(
        &mut self,
        uplo: FillMode,
        n: i32,
        a: DevicePtr<T>,
        lda: i32,
        tau: DevicePtr<T>,
        work: Option<Workspace>,
        info: DevicePtr<i32>,
    ) -> Result<()> {
        let layout = WorkspaceLayout::new("orgtr");
        let _scratch = self.provide_workspace(&layout, work, |rt| {
            rt.orgtr::<T>(uplo.into(), n, null(), lda, null())
        })?;
        self.dispatch::<T>("orgtr", |rt| rt.orgtr(uplo.into(), n, a, lda, tau))?;
        self.clear_info(info, 1)
    }

    /// Workspace bytes for [`ormtr`](Self::ormtr)
    pub fn ormtr_buffer_size<T: Scalar>(
        &mut self,
        side: SideMode,
        uplo: FillMode,
        trans: Operation,
        m: i32,
        n: i32,
        lda: i32,
        ldc: i32,
    ) -> Result<i32> {
        let bytes = self.workspace_bytes(&WorkspaceLayout::new("ormtr"), |rt| {
            rt.ormtr::<T>(
                side.into(),
                uplo.into(),
                trans.into(),
                m,
                n,
                null(),
                lda,
                null(),
                null(),
                ldc,
            )
        })?;
        narrow_lwork(bytes)
    }

    /// Overwrite C with `op(Q) C` or `C op(Q)` for the Q of [`sytrd`](Self::sytrd)
    pub fn ormtr<T: Scalar>(
        &mut self,
        side: SideMode,
        uplo: FillMode,
        trans: Operation,
        m: i32,
        n: i32,
        a: DevicePtr<T>,
        lda: i32,
        tau: DevicePtr<T>,
        c: DevicePtr<T>,
        ldc: i32,
        work: Option<Workspace>,
        info: DevicePtr<i32>,
    ) -> Result<()> {
        let layout = WorkspaceLayout::new("ormtr");
        let _scratch = self.provide_workspace(&layout, work, |rt| {
            rt.ormtr::<T>(
                side.into(),
                uplo.into(),
                trans.into(),
                m,
                n,
                null(),
                lda,
                null(),
                null(),
                ldc,
            )
        })?;
        self.dispatch::<T>("ormtr", |rt| {
            rt.ormtr(
                side.into(),
                uplo.into(),
                trans.into(),
                m,
                n,
                a,
                lda,
                tau,
                c,
                ldc,
            )
        })?;
        self.clear_info(info, 1)
    }

    /// Workspace bytes for [`sytrf`](Self::sytrf); the size does not depend on `uplo`
    pub fn sytrf_buffer_size<T: Scalar>(&mut self, n: i32, lda: i32) -> Result<i32> {
        let bytes = self.workspace_bytes(&WorkspaceLayout::new("sytrf"), |rt| {
            rt.sytrf::<T>(RtFill::Upper, n, null(), lda, null(), null())
        })?;
        narrow_lwork(bytes)
    }

    /// Bunch-Kaufman factorization `A = U D U^T` (or `L D L^T`)
    pub fn sytrf<T: Scalar>(
        &mut self,
        uplo: FillMode,
        n: i32,
        a: DevicePtr<T>,
        lda: i32,
        ipiv: DevicePtr<i32>,
        work: Option<Workspace>,
        info: DevicePtr<i32>,
    ) -> Result<()> {
        let layout = WorkspaceLayout::new("sytrf");
        let _scratch = self.provide_workspace(&layout, work, |rt| {
            rt.sytrf::<T>(uplo.into(), n, null(), lda, null(), null())
        })?;
        self.dispatch::<T>("sytrf", |rt| rt.sytrf(uplo.into(), n, a, lda, ipiv, info))
    }
}
