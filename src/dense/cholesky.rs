//! Cholesky family: `potrf`, `potrs`, `potri` and the batched forms

use super::null;
use crate::dtype::Scalar;
use crate::error::Result;
use crate::handle::Handle;
use crate::runtime::{DevicePtr, LapackOps};
use crate::types::FillMode;
use crate::workspace::{Workspace, WorkspaceLayout, narrow_lwork};

impl<R: LapackOps> Handle<R> {
    pub(crate) fn potrf_bytes<T: Scalar>(
        &mut self,
        uplo: FillMode,
        n: i32,
        lda: i32,
    ) -> Result<usize> {
        self.workspace_bytes(&WorkspaceLayout::new("potrf"), |rt| {
            rt.potrf::<T>(uplo.into(), n, null(), lda, null())
        })
    }

    /// Workspace bytes for [`potrf`](Self::potrf)
    pub fn potrf_buffer_size<T: Scalar>(
        &mut self,
        uplo: FillMode,
        n: i32,
        lda: i32,
    ) -> Result<i32> {
        narrow_lwork(self.potrf_bytes::<T>(uplo, n, lda)?)
    }

    /// Cholesky factorization `A = L L^H` (or `U^H U`) in place
    ///
    /// `info` receives `i > 0` if the leading minor of order `i` is not
    /// positive definite.
    pub fn potrf<T: Scalar>(
        &mut self,
        uplo: FillMode,
        n: i32,
        a: DevicePtr<T>,
        lda: i32,
        work: Option<Workspace>,
        info: DevicePtr<i32>,
    ) -> Result<()> {
        let layout = WorkspaceLayout::new("potrf");
        let _scratch = self.provide_workspace(&layout, work, |rt| {
            rt.potrf::<T>(uplo.into(), n, null(), lda, null())
        })?;
        self.dispatch::<T>("potrf", |rt| rt.potrf(uplo.into(), n, a, lda, info))
    }

    /// Workspace bytes for [`potrf_batched`](Self::potrf_batched)
    pub fn potrf_batched_buffer_size<T: Scalar>(
        &mut self,
        uplo: FillMode,
        n: i32,
        lda: i32,
        batch_count: i32,
    ) -> Result<i32> {
        let bytes = self.workspace_bytes(&WorkspaceLayout::new("potrf_batched"), |rt| {
            rt.potrf_batched::<T>(uplo.into(), n, null(), lda, null(), batch_count)
        })?;
        narrow_lwork(bytes)
    }

    /// Cholesky factorization of `batch_count` matrices given as a pointer array
    pub fn potrf_batched<T: Scalar>(
        &mut self,
        uplo: FillMode,
        n: i32,
        a: DevicePtr<DevicePtr<T>>,
        lda: i32,
        work: Option<Workspace>,
        info: DevicePtr<i32>,
        batch_count: i32,
    ) -> Result<()> {
        let layout = WorkspaceLayout::new("potrf_batched");
        let _scratch = self.provide_workspace(&layout, work, |rt| {
            rt.potrf_batched::<T>(uplo.into(), n, null(), lda, null(), batch_count)
        })?;
        self.dispatch::<T>("potrf_batched", |rt| {
            rt.potrf_batched(uplo.into(), n, a, lda, info, batch_count)
        })
    }

    pub(crate) fn potrs_bytes<T: Scalar>(
        &mut self,
        uplo: FillMode,
        n: i32,
        nrhs: i32,
        lda: i32,
        ldb: i32,
    ) -> Result<usize> {
        self.workspace_bytes(&WorkspaceLayout::new("potrs"), |rt| {
            rt.potrs::<T>(uplo.into(), n, nrhs, null(), lda, null(), ldb)
        })
    }

    /// Workspace bytes for [`potrs`](Self::potrs)
    pub fn potrs_buffer_size<T: Scalar>(
        &mut self,
        uplo: FillMode,
        n: i32,
        nrhs: i32,
        lda: i32,
        ldb: i32,
    ) -> Result<i32> {
        narrow_lwork(self.potrs_bytes::<T>(uplo, n, nrhs, lda, ldb)?)
    }

    /// Solve `A X = B` with the factor from [`potrf`](Self::potrf); B is overwritten
    pub fn potrs<T: Scalar>(
        &mut self,
        uplo: FillMode,
        n: i32,
        nrhs: i32,
        a: DevicePtr<T>,
        lda: i32,
        b: DevicePtr<T>,
        ldb: i32,
        work: Option<Workspace>,
        info: DevicePtr<i32>,
    ) -> Result<()> {
        let layout = WorkspaceLayout::new("potrs");
        let _scratch = self.provide_workspace(&layout, work, |rt| {
            rt.potrs::<T>(uplo.into(), n, nrhs, null(), lda, null(), ldb)
        })?;
        self.dispatch::<T>("potrs", |rt| rt.potrs(uplo.into(), n, nrhs, a, lda, b, ldb))?;
        self.clear_info(info, 1)
    }

    /// Workspace bytes for [`potrs_batched`](Self::potrs_batched)
    pub fn potrs_batched_buffer_size<T: Scalar>(
        &mut self,
        uplo: FillMode,
        n: i32,
        nrhs: i32,
        lda: i32,
        ldb: i32,
        batch_count: i32,
    ) -> Result<i32> {
        let bytes = self.workspace_bytes(&WorkspaceLayout::new("potrs_batched"), |rt| {
            rt.potrs_batched::<T>(uplo.into(), n, nrhs, null(), lda, null(), ldb, batch_count)
        })?;
        narrow_lwork(bytes)
    }

    /// Batched form of [`potrs`](Self::potrs) over pointer arrays
    pub fn potrs_batched<T: Scalar>(
        &mut self,
        uplo: FillMode,
        n: i32,
        nrhs: i32,
        a: DevicePtr<DevicePtr<T>>,
        lda: i32,
        b: DevicePtr<DevicePtr<T>>,
        ldb: i32,
        work: Option<Workspace>,
        info: DevicePtr<i32>,
        batch_count: i32,
    ) -> Result<()> {
        let layout = WorkspaceLayout::new("potrs_batched");
        let _scratch = self.provide_workspace(&layout, work, |rt| {
            rt.potrs_batched::<T>(uplo.into(), n, nrhs, null(), lda, null(), ldb, batch_count)
        })?;
        self.dispatch::<T>("potrs_batched", |rt| {
            rt.potrs_batched(uplo.into(), n, nrhs, a, lda, b, ldb, batch_count)
        })?;
        self.clear_info(info, 1)
    }

    /// Workspace bytes for [`potri`](Self::potri)
    pub fn potri_buffer_size<T: Scalar>(
        &mut self,
        uplo: FillMode,
        n: i32,
        lda: i32,
    ) -> Result<i32> {
        let bytes = self.workspace_bytes(&WorkspaceLayout::new("potri"), |rt| {
            rt.potri::<T>(uplo.into(), n, null(), lda, null())
        })?;
        narrow_lwork(bytes)
    }

    /// Inverse of a Hermitian positive-definite matrix from its Cholesky factor
    pub fn potri<T: Scalar>(
        &mut self,
        uplo: FillMode,
        n: i32,
        a: DevicePtr<T>,
        lda: i32,
        work: Option<Workspace>,
        info: DevicePtr<i32>,
    ) -> Result<()> {
        let layout = WorkspaceLayout::new("potri");
        let _scratch = self.provide_workspace(&layout, work, |rt| {
            rt.potri::<T>(uplo.into(), n, null(), lda, null())
        })?;
        self.dispatch::<T>("potri", |rt| rt.potri(uplo.into(), n, a, lda, info))
    }
}
