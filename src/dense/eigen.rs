//! Hermitian eigensolvers: `syevd`, `sygvd`, `syevj`, `syevj_batched`, `sygvj`

use super::{abstol, len, null};
use crate::dtype::{DType, Scalar};
use crate::error::Result;
use crate::handle::Handle;
use crate::runtime::{DevicePtr, LapackOps, RtEsort};
use crate::types::{EigMode, EigType, FillMode, JacobiParams};
use crate::workspace::{AuxKind, Workspace, WorkspaceLayout, narrow_lwork};

/// E array of `n` reals for the tridiagonal drivers
fn syevd_layout<T: Scalar>(routine: &'static str, n: i32) -> WorkspaceLayout {
    WorkspaceLayout::new(routine).with(AuxKind::OffDiagonal, <T::Real as Scalar>::DTYPE, len(n))
}

/// One residual and one sweep count per problem, none when `n` is zero
fn jacobi_layout<T: Scalar>(routine: &'static str, n: i32, batch: i32) -> WorkspaceLayout {
    let problems = if n > 0 { len(batch) } else { 0 };
    if problems == 0 {
        return WorkspaceLayout::new(routine);
    }
    WorkspaceLayout::new(routine)
        .with(AuxKind::Residual, <T::Real as Scalar>::DTYPE, problems)
        .with(AuxKind::Sweeps, DType::I32, problems)
}

fn esort(params: &JacobiParams) -> RtEsort {
    if params.sort_eig() {
        RtEsort::Ascending
    } else {
        RtEsort::None
    }
}

impl<R: LapackOps> Handle<R> {
    pub(crate) fn syevd_bytes<T: Scalar>(
        &mut self,
        jobz: EigMode,
        uplo: FillMode,
        n: i32,
        lda: i32,
    ) -> Result<usize> {
        self.workspace_bytes(&syevd_layout::<T>("syevd", n), |rt| {
            rt.syevd::<T>(jobz.into(), uplo.into(), n, null(), lda, null(), null(), null())
        })
    }

    /// Workspace bytes for [`syevd`](Self::syevd)
    pub fn syevd_buffer_size<T: Scalar>(
        &mut self,
        jobz: EigMode,
        uplo: FillMode,
        n: i32,
        lda: i32,
    ) -> Result<i32> {
        narrow_lwork(self.syevd_bytes::<T>(jobz, uplo, n, lda)?)
    }

    /// Eigenvalues (ascending, into `w`) and optionally eigenvectors (into A)
    /// of a Hermitian matrix
    pub fn syevd<T: Scalar>(
        &mut self,
        jobz: EigMode,
        uplo: FillMode,
        n: i32,
        a: DevicePtr<T>,
        lda: i32,
        w: DevicePtr<T::Real>,
        work: Option<Workspace>,
        info: DevicePtr<i32>,
    ) -> Result<()> {
        let layout = syevd_layout::<T>("syevd", n);
        let scratch = self.provide_workspace(&layout, work, |rt| {
            rt.syevd::<T>(jobz.into(), uplo.into(), n, null(), lda, null(), null(), null())
        })?;
        let e = scratch.aux::<T::Real>(AuxKind::OffDiagonal);
        self.dispatch::<T>("syevd", |rt| {
            rt.syevd(jobz.into(), uplo.into(), n, a, lda, w, e, info)
        })
    }

    /// Workspace bytes for [`sygvd`](Self::sygvd)
    pub fn sygvd_buffer_size<T: Scalar>(
        &mut self,
        itype: EigType,
        jobz: EigMode,
        uplo: FillMode,
        n: i32,
        lda: i32,
        ldb: i32,
    ) -> Result<i32> {
        let bytes = self.workspace_bytes(&syevd_layout::<T>("sygvd", n), |rt| {
            rt.sygvd::<T>(
                itype.into(),
                jobz.into(),
                uplo.into(),
                n,
                null(),
                lda,
                null(),
                ldb,
                null(),
                null(),
                null(),
            )
        })?;
        narrow_lwork(bytes)
    }

    /// Generalized Hermitian-definite eigenproblem of the given `itype`
    ///
    /// B receives its Cholesky factor. `info = n + i` reports that B is not
    /// positive definite at order `i`.
    pub fn sygvd<T: Scalar>(
        &mut self,
        itype: EigType,
        jobz: EigMode,
        uplo: FillMode,
        n: i32,
        a: DevicePtr<T>,
        lda: i32,
        b: DevicePtr<T>,
        ldb: i32,
        w: DevicePtr<T::Real>,
        work: Option<Workspace>,
        info: DevicePtr<i32>,
    ) -> Result<()> {
        let layout = syevd_layout::<T>("sygvd", n);
        let scratch = self.provide_workspace(&layout, work, |rt| {
            rt.sygvd::<T>(
                itype.into(),
                jobz.into(),
                uplo.into(),
                n,
                null(),
                lda,
                null(),
                ldb,
                null(),
                null(),
                null(),
            )
        })?;
        let e = scratch.aux::<T::Real>(AuxKind::OffDiagonal);
        self.dispatch::<T>("sygvd", |rt| {
            rt.sygvd(
                itype.into(),
                jobz.into(),
                uplo.into(),
                n,
                a,
                lda,
                b,
                ldb,
                w,
                e,
                info,
            )
        })
    }

    /// Workspace bytes for [`syevj`](Self::syevj)
    pub fn syevj_buffer_size<T: Scalar>(
        &mut self,
        jobz: EigMode,
        uplo: FillMode,
        n: i32,
        lda: i32,
        params: &JacobiParams,
    ) -> Result<i32> {
        let (tol, sweeps) = (abstol::<T>(params), params.max_sweeps());
        let bytes = self.workspace_bytes(&jacobi_layout::<T>("syevj", n, 1), |rt| {
            rt.syevj::<T>(
                esort(params),
                jobz.into(),
                uplo.into(),
                n,
                null(),
                lda,
                tol,
                null(),
                sweeps,
                null(),
                null(),
                null(),
            )
        })?;
        narrow_lwork(bytes)
    }

    /// Jacobi eigensolver for a Hermitian matrix
    ///
    /// Eigenvalues are sorted ascending unless `params` disables sorting.
    /// The achieved residual and sweep count are stored in `params`.
    pub fn syevj<T: Scalar>(
        &mut self,
        jobz: EigMode,
        uplo: FillMode,
        n: i32,
        a: DevicePtr<T>,
        lda: i32,
        w: DevicePtr<T::Real>,
        work: Option<Workspace>,
        info: DevicePtr<i32>,
        params: &mut JacobiParams,
    ) -> Result<()> {
        let (tol, sweeps, sort) = (abstol::<T>(params), params.max_sweeps(), esort(params));
        let layout = jacobi_layout::<T>("syevj", n, 1);
        let scratch = self.provide_workspace(&layout, work, |rt| {
            rt.syevj::<T>(
                sort,
                jobz.into(),
                uplo.into(),
                n,
                null(),
                lda,
                tol,
                null(),
                sweeps,
                null(),
                null(),
                null(),
            )
        })?;
        let residual = scratch.aux::<T::Real>(AuxKind::Residual);
        let n_sweeps = scratch.aux::<i32>(AuxKind::Sweeps);
        self.dispatch::<T>("syevj", |rt| {
            rt.syevj(
                sort,
                jobz.into(),
                uplo.into(),
                n,
                a,
                lda,
                tol,
                residual,
                sweeps,
                n_sweeps,
                w,
                info,
            )
        })?;
        self.record_jacobi::<T>(&scratch, 1, false, params)
    }

    /// Workspace bytes for [`syevj_batched`](Self::syevj_batched)
    pub fn syevj_batched_buffer_size<T: Scalar>(
        &mut self,
        jobz: EigMode,
        uplo: FillMode,
        n: i32,
        lda: i32,
        params: &JacobiParams,
        batch_count: i32,
    ) -> Result<i32> {
        let (tol, sweeps) = (abstol::<T>(params), params.max_sweeps());
        let layout = jacobi_layout::<T>("syevj_strided_batched", n, batch_count);
        let bytes = self.workspace_bytes(&layout, |rt| {
            rt.syevj_strided_batched::<T>(
                esort(params),
                jobz.into(),
                uplo.into(),
                n,
                null(),
                lda,
                0,
                tol,
                null(),
                sweeps,
                null(),
                null(),
                0,
                null(),
                batch_count,
            )
        })?;
        narrow_lwork(bytes)
    }

    /// Jacobi eigensolver over `batch_count` packed matrices
    ///
    /// Problem `j` starts at `a + j*lda*n` and `w + j*n`. Per-problem
    /// residuals and sweep counts are stored in `params`.
    pub fn syevj_batched<T: Scalar>(
        &mut self,
        jobz: EigMode,
        uplo: FillMode,
        n: i32,
        a: DevicePtr<T>,
        lda: i32,
        w: DevicePtr<T::Real>,
        work: Option<Workspace>,
        info: DevicePtr<i32>,
        params: &mut JacobiParams,
        batch_count: i32,
    ) -> Result<()> {
        let (tol, sweeps, sort) = (abstol::<T>(params), params.max_sweeps(), esort(params));
        let stride_a = len(lda) as i64 * len(n) as i64;
        let stride_w = len(n) as i64;
        let layout = jacobi_layout::<T>("syevj_strided_batched", n, batch_count);
        let scratch = self.provide_workspace(&layout, work, |rt| {
            rt.syevj_strided_batched::<T>(
                sort,
                jobz.into(),
                uplo.into(),
                n,
                null(),
                lda,
                stride_a,
                tol,
                null(),
                sweeps,
                null(),
                null(),
                stride_w,
                null(),
                batch_count,
            )
        })?;
        let residual = scratch.aux::<T::Real>(AuxKind::Residual);
        let n_sweeps = scratch.aux::<i32>(AuxKind::Sweeps);
        self.dispatch::<T>("syevj_strided_batched", |rt| {
            rt.syevj_strided_batched(
                sort,
                jobz.into(),
                uplo.into(),
                n,
                a,
                lda,
                stride_a,
                tol,
                residual,
                sweeps,
                n_sweeps,
                w,
                stride_w,
                info,
                batch_count,
            )
        })?;
        self.record_jacobi::<T>(&scratch, len(batch_count), true, params)
    }

    /// Workspace bytes for [`sygvj`](Self::sygvj)
    pub fn sygvj_buffer_size<T: Scalar>(
        &mut self,
        itype: EigType,
        jobz: EigMode,
        uplo: FillMode,
        n: i32,
        lda: i32,
        ldb: i32,
        params: &JacobiParams,
    ) -> Result<i32> {
        let (tol, sweeps) = (abstol::<T>(params), params.max_sweeps());
        let bytes = self.workspace_bytes(&jacobi_layout::<T>("sygvj", n, 1), |rt| {
            rt.sygvj::<T>(
                itype.into(),
                jobz.into(),
                uplo.into(),
                n,
                null(),
                lda,
                null(),
                ldb,
                tol,
                null(),
                sweeps,
                null(),
                null(),
                null(),
            )
        })?;
        narrow_lwork(bytes)
    }

    /// Jacobi solver for the generalized Hermitian-definite eigenproblem
    ///
    /// The reservation requested for a call without workspace is exactly the
    /// value [`sygvj_buffer_size`](Self::sygvj_buffer_size) reports.
    pub fn sygvj<T: Scalar>(
        &mut self,
        itype: EigType,
        jobz: EigMode,
        uplo: FillMode,
        n: i32,
        a: DevicePtr<T>,
        lda: i32,
        b: DevicePtr<T>,
        ldb: i32,
        w: DevicePtr<T::Real>,
        work: Option<Workspace>,
        info: DevicePtr<i32>,
        params: &mut JacobiParams,
    ) -> Result<()> {
        let (tol, sweeps) = (abstol::<T>(params), params.max_sweeps());
        let layout = jacobi_layout::<T>("sygvj", n, 1);
        let scratch = self.provide_workspace(&layout, work, |rt| {
            rt.sygvj::<T>(
                itype.into(),
                jobz.into(),
                uplo.into(),
                n,
                null(),
                lda,
                null(),
                ldb,
                tol,
                null(),
                sweeps,
                null(),
                null(),
                null(),
            )
        })?;
        let residual = scratch.aux::<T::Real>(AuxKind::Residual);
        let n_sweeps = scratch.aux::<i32>(AuxKind::Sweeps);
        self.dispatch::<T>("sygvj", |rt| {
            rt.sygvj(
                itype.into(),
                jobz.into(),
                uplo.into(),
                n,
                a,
                lda,
                b,
                ldb,
                tol,
                residual,
                sweeps,
                n_sweeps,
                w,
                info,
            )
        })?;
        self.record_jacobi::<T>(&scratch, 1, false, params)
    }
}
