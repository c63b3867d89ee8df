//! Singular value decomposition: `gesvd`, `gesvdj` and their batched forms
//!
//! The QR-iteration driver needs an off-diagonal (E) array the caller never
//! sees. The Jacobi driver additionally computes V^H into a copy buffer and
//! transposes it into the caller's V afterwards, because callers of `gesvdj`
//! expect V rather than V^H.

use super::{abstol, len, not_supported, null};
use crate::convert::svect_for;
use crate::dtype::{DType, Scalar};
use crate::error::{Error, Result};
use crate::handle::Handle;
use crate::runtime::{DevicePtr, LapackOps, RtOperation, RtSvect, RtWorkmode};
use crate::types::{EigMode, JacobiParams, SvdJob};
use crate::workspace::{AuxKind, Workspace, WorkspaceLayout, element_count, narrow_lwork};

fn real_dtype<T: Scalar>() -> DType {
    <T::Real as Scalar>::DTYPE
}

/// E array of `min(m, n)` reals per problem
fn gesvd_layout<T: Scalar>(
    routine: &'static str,
    m: i32,
    n: i32,
    batch: i32,
) -> Result<WorkspaceLayout> {
    let count = element_count(routine, &[len(m).min(len(n)), len(batch)])?;
    Ok(WorkspaceLayout::new(routine).with(AuxKind::OffDiagonal, real_dtype::<T>(), count))
}

/// Leading dimension of the V^H copy: its row count, at least 1
fn ldv_copy(m: i32, n: i32, econ: bool) -> i32 {
    let rows = if econ { m.min(n) } else { n };
    rows.max(1)
}

/// V^H copy (vector mode only), then one residual and one sweep count per problem
///
/// An empty matrix adds nothing: the size equals the runtime's own.
fn gesvdj_layout<T: Scalar>(
    routine: &'static str,
    jobz: EigMode,
    m: i32,
    n: i32,
    ldv_copy: i32,
    batch: i32,
) -> Result<WorkspaceLayout> {
    if m <= 0 || n <= 0 {
        return Ok(WorkspaceLayout::new(routine));
    }
    let copy = match jobz {
        EigMode::Vector => element_count(routine, &[len(ldv_copy), len(n), len(batch)])?,
        EigMode::NoVector => 0,
    };
    Ok(WorkspaceLayout::new(routine)
        .with(AuxKind::VCopy, T::DTYPE, copy)
        .with(AuxKind::Residual, real_dtype::<T>(), len(batch))
        .with(AuxKind::Sweeps, DType::I32, len(batch)))
}

/// Operation turning V^H back into V
fn adjoint<T: Scalar>() -> RtOperation {
    if T::IS_COMPLEX {
        RtOperation::ConjugateTranspose
    } else {
        RtOperation::Transpose
    }
}

impl<R: LapackOps> Handle<R> {
    pub(crate) fn gesvd_bytes<T: Scalar>(
        &mut self,
        jobu: SvdJob,
        jobv: SvdJob,
        m: i32,
        n: i32,
    ) -> Result<usize> {
        let (lda, ldu, ldv) = (m.max(1), m.max(1), n.max(1));
        let layout = gesvd_layout::<T>("gesvd", m, n, 1)?;
        self.workspace_bytes(&layout, |rt| {
            rt.gesvd::<T>(
                jobu.into(),
                jobv.into(),
                m,
                n,
                null(),
                lda,
                null(),
                null(),
                ldu,
                null(),
                ldv,
                null(),
                RtWorkmode::OutOfPlace,
                null(),
            )
        })
    }

    /// Workspace bytes for [`gesvd`](Self::gesvd)
    pub fn gesvd_buffer_size<T: Scalar>(
        &mut self,
        jobu: SvdJob,
        jobv: SvdJob,
        m: i32,
        n: i32,
    ) -> Result<i32> {
        narrow_lwork(self.gesvd_bytes::<T>(jobu, jobv, m, n)?)
    }

    /// SVD `A = U S V^H`; `vt` receives V^H
    pub fn gesvd<T: Scalar>(
        &mut self,
        jobu: SvdJob,
        jobv: SvdJob,
        m: i32,
        n: i32,
        a: DevicePtr<T>,
        lda: i32,
        s: DevicePtr<T::Real>,
        u: DevicePtr<T>,
        ldu: i32,
        vt: DevicePtr<T>,
        ldvt: i32,
        work: Option<Workspace>,
        info: DevicePtr<i32>,
    ) -> Result<()> {
        let (left, right) = (RtSvect::from(jobu), RtSvect::from(jobv));
        let layout = gesvd_layout::<T>("gesvd", m, n, 1)?;
        let scratch = self.provide_workspace(&layout, work, |rt| {
            rt.gesvd::<T>(
                left,
                right,
                m,
                n,
                null(),
                lda,
                null(),
                null(),
                ldu,
                null(),
                ldvt,
                null(),
                RtWorkmode::OutOfPlace,
                null(),
            )
        })?;
        let e = scratch.aux::<T::Real>(AuxKind::OffDiagonal);
        self.dispatch::<T>("gesvd", |rt| {
            rt.gesvd(
                left,
                right,
                m,
                n,
                a,
                lda,
                s,
                u,
                ldu,
                vt,
                ldvt,
                e,
                RtWorkmode::OutOfPlace,
                info,
            )
        })
    }

    /// Workspace bytes for [`gesvd_strided_batched`](Self::gesvd_strided_batched)
    pub fn gesvd_strided_batched_buffer_size<T: Scalar>(
        &mut self,
        jobu: SvdJob,
        jobv: SvdJob,
        m: i32,
        n: i32,
        lda: i32,
        ldu: i32,
        ldvt: i32,
        batch_count: i32,
    ) -> Result<i32> {
        let layout = gesvd_layout::<T>("gesvd_strided_batched", m, n, batch_count)?;
        let stride_e = len(m).min(len(n)) as i64;
        let bytes = self.workspace_bytes(&layout, |rt| {
            rt.gesvd_strided_batched::<T>(
                jobu.into(),
                jobv.into(),
                m,
                n,
                null(),
                lda,
                0,
                null(),
                0,
                null(),
                ldu,
                0,
                null(),
                ldvt,
                0,
                null(),
                stride_e,
                RtWorkmode::OutOfPlace,
                null(),
                batch_count,
            )
        })?;
        narrow_lwork(bytes)
    }

    /// SVD of `batch_count` matrices laid out at fixed strides
    pub fn gesvd_strided_batched<T: Scalar>(
        &mut self,
        jobu: SvdJob,
        jobv: SvdJob,
        m: i32,
        n: i32,
        a: DevicePtr<T>,
        lda: i32,
        stride_a: i64,
        s: DevicePtr<T::Real>,
        stride_s: i64,
        u: DevicePtr<T>,
        ldu: i32,
        stride_u: i64,
        vt: DevicePtr<T>,
        ldvt: i32,
        stride_vt: i64,
        work: Option<Workspace>,
        info: DevicePtr<i32>,
        batch_count: i32,
    ) -> Result<()> {
        let (left, right) = (RtSvect::from(jobu), RtSvect::from(jobv));
        let layout = gesvd_layout::<T>("gesvd_strided_batched", m, n, batch_count)?;
        let stride_e = len(m).min(len(n)) as i64;
        let scratch = self.provide_workspace(&layout, work, |rt| {
            rt.gesvd_strided_batched::<T>(
                left,
                right,
                m,
                n,
                null(),
                lda,
                stride_a,
                null(),
                stride_s,
                null(),
                ldu,
                stride_u,
                null(),
                ldvt,
                stride_vt,
                null(),
                stride_e,
                RtWorkmode::OutOfPlace,
                null(),
                batch_count,
            )
        })?;
        let e = scratch.aux::<T::Real>(AuxKind::OffDiagonal);
        self.dispatch::<T>("gesvd_strided_batched", |rt| {
            rt.gesvd_strided_batched(
                left,
                right,
                m,
                n,
                a,
                lda,
                stride_a,
                s,
                stride_s,
                u,
                ldu,
                stride_u,
                vt,
                ldvt,
                stride_vt,
                e,
                stride_e,
                RtWorkmode::OutOfPlace,
                info,
                batch_count,
            )
        })
    }

    /// Workspace bytes for [`gesvdj`](Self::gesvdj)
    pub fn gesvdj_buffer_size<T: Scalar>(
        &mut self,
        jobz: EigMode,
        econ: bool,
        m: i32,
        n: i32,
        lda: i32,
        ldu: i32,
        params: &JacobiParams,
    ) -> Result<i32> {
        let svect = svect_for(jobz, econ);
        let ldvc = ldv_copy(m, n, econ);
        let layout = gesvdj_layout::<T>("gesvdj", jobz, m, n, ldvc, 1)?;
        let (tol, sweeps) = (abstol::<T>(params), params.max_sweeps());
        let bytes = self.workspace_bytes(&layout, |rt| {
            rt.gesvdj::<T>(
                svect,
                svect,
                m,
                n,
                null(),
                lda,
                tol,
                null(),
                sweeps,
                null(),
                null(),
                null(),
                ldu,
                null(),
                ldvc,
                null(),
            )
        })?;
        narrow_lwork(bytes)
    }

    /// One-sided Jacobi SVD `A = U S V^H`; `v` receives V (not V^H)
    ///
    /// With `econ` only the first min(m, n) columns of U and V are formed.
    /// The achieved residual and sweep count are stored in `params`.
    pub fn gesvdj<T: Scalar>(
        &mut self,
        jobz: EigMode,
        econ: bool,
        m: i32,
        n: i32,
        a: DevicePtr<T>,
        lda: i32,
        s: DevicePtr<T::Real>,
        u: DevicePtr<T>,
        ldu: i32,
        v: DevicePtr<T>,
        ldv: i32,
        work: Option<Workspace>,
        info: DevicePtr<i32>,
        params: &mut JacobiParams,
    ) -> Result<()> {
        if jobz == EigMode::Vector && ldv < n.max(1) {
            return Err(Error::invalid_value("ldv", format!("{ldv} < max(1, n = {n})")));
        }
        let svect = svect_for(jobz, econ);
        let ldvc = ldv_copy(m, n, econ);
        let layout = gesvdj_layout::<T>("gesvdj", jobz, m, n, ldvc, 1)?;
        let (tol, sweeps) = (abstol::<T>(params), params.max_sweeps());
        let scratch = self.provide_workspace(&layout, work, |rt| {
            rt.gesvdj::<T>(
                svect,
                svect,
                m,
                n,
                null(),
                lda,
                tol,
                null(),
                sweeps,
                null(),
                null(),
                null(),
                ldu,
                null(),
                ldvc,
                null(),
            )
        })?;
        let vcopy = scratch.aux::<T>(AuxKind::VCopy);
        let residual = scratch.aux::<T::Real>(AuxKind::Residual);
        let n_sweeps = scratch.aux::<i32>(AuxKind::Sweeps);
        self.dispatch::<T>("gesvdj", |rt| {
            rt.gesvdj(
                svect, svect, m, n, a, lda, tol, residual, sweeps, n_sweeps, s, u, ldu, vcopy,
                ldvc, info,
            )
        })?;
        if svect != RtSvect::None && m > 0 && n > 0 {
            let cols = if econ { m.min(n) } else { n };
            self.transpose_v::<T>(n, cols, vcopy, ldvc, v, ldv)?;
        }
        self.record_jacobi::<T>(&scratch, 1, false, params)
    }

    /// Workspace bytes for [`gesvdj_batched`](Self::gesvdj_batched)
    pub fn gesvdj_batched_buffer_size<T: Scalar>(
        &mut self,
        jobz: EigMode,
        m: i32,
        n: i32,
        lda: i32,
        ldu: i32,
        params: &JacobiParams,
        batch_count: i32,
    ) -> Result<i32> {
        let svect = svect_for(jobz, false);
        let ldvc = n.max(1);
        let layout =
            gesvdj_layout::<T>("gesvdj_strided_batched", jobz, m, n, ldvc, batch_count)?;
        let (tol, sweeps) = (abstol::<T>(params), params.max_sweeps());
        let bytes = self.workspace_bytes(&layout, |rt| {
            rt.gesvdj_strided_batched::<T>(
                svect,
                svect,
                m,
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
                ldu,
                0,
                null(),
                ldvc,
                0,
                null(),
                batch_count,
            )
        })?;
        narrow_lwork(bytes)
    }

    /// Jacobi SVD of `batch_count` packed matrices
    ///
    /// Problem `j` starts at `a + j*lda*n`, `s + j*min(m, n)`, `u + j*ldu*m`
    /// and `v + j*ldv*n`. Full U and V are formed. Per-problem residuals and
    /// sweep counts are stored in `params`.
    pub fn gesvdj_batched<T: Scalar>(
        &mut self,
        jobz: EigMode,
        m: i32,
        n: i32,
        a: DevicePtr<T>,
        lda: i32,
        s: DevicePtr<T::Real>,
        u: DevicePtr<T>,
        ldu: i32,
        v: DevicePtr<T>,
        ldv: i32,
        work: Option<Workspace>,
        info: DevicePtr<i32>,
        params: &mut JacobiParams,
        batch_count: i32,
    ) -> Result<()> {
        if jobz == EigMode::Vector && ldv < n.max(1) {
            return Err(Error::invalid_value("ldv", format!("{ldv} < max(1, n = {n})")));
        }
        let svect = svect_for(jobz, false);
        let ldvc = n.max(1);
        let layout =
            gesvdj_layout::<T>("gesvdj_strided_batched", jobz, m, n, ldvc, batch_count)?;
        let (tol, sweeps) = (abstol::<T>(params), params.max_sweeps());
        let stride_a = len(lda) as i64 * len(n) as i64;
        let stride_s = len(m).min(len(n)) as i64;
        let stride_u = len(ldu) as i64 * len(m) as i64;
        let stride_vc = len(ldvc) as i64 * len(n) as i64;
        let scratch = self.provide_workspace(&layout, work, |rt| {
            rt.gesvdj_strided_batched::<T>(
                svect,
                svect,
                m,
                n,
                null(),
                lda,
                stride_a,
                tol,
                null(),
                sweeps,
                null(),
                null(),
                stride_s,
                null(),
                ldu,
                stride_u,
                null(),
                ldvc,
                stride_vc,
                null(),
                batch_count,
            )
        })?;
        let vcopy = scratch.aux::<T>(AuxKind::VCopy);
        let residual = scratch.aux::<T::Real>(AuxKind::Residual);
        let n_sweeps = scratch.aux::<i32>(AuxKind::Sweeps);
        self.dispatch::<T>("gesvdj_strided_batched", |rt| {
            rt.gesvdj_strided_batched(
                svect,
                svect,
                m,
                n,
                a,
                lda,
                stride_a,
                tol,
                residual,
                sweeps,
                n_sweeps,
                s,
                stride_s,
                u,
                ldu,
                stride_u,
                vcopy,
                ldvc,
                stride_vc,
                info,
                batch_count,
            )
        })?;
        if svect != RtSvect::None && m > 0 && n > 0 {
            let v_stride = len(ldv) * len(n);
            for j in 0..len(batch_count) {
                self.transpose_v::<T>(
                    n,
                    n,
                    vcopy.add(j * stride_vc as usize),
                    ldvc,
                    v.add(j * v_stride),
                    ldv,
                )?;
            }
        }
        self.record_jacobi::<T>(&scratch, len(batch_count), true, params)
    }

    /// Write V (`rows x cols`) from its adjoint held in the copy buffer
    fn transpose_v<T: Scalar>(
        &mut self,
        rows: i32,
        cols: i32,
        vcopy: DevicePtr<T>,
        ldvc: i32,
        v: DevicePtr<T>,
        ldv: i32,
    ) -> Result<()> {
        let op = adjoint::<T>();
        self.dispatch::<T>("geam", |rt| {
            rt.geam(
                op,
                RtOperation::None,
                rows,
                cols,
                T::one(),
                vcopy,
                ldvc,
                T::zero(),
                v,
                ldv,
                v,
                ldv,
            )
        })
    }

    /// Workspace bytes for the approximate strided-batched SVD; not supported
    pub fn gesvda_strided_batched_buffer_size<T: Scalar>(
        &mut self,
        _jobz: EigMode,
        _rank: i32,
        _m: i32,
        _n: i32,
        _lda: i32,
        _batch_count: i32,
    ) -> Result<i32> {
        Err(not_supported("gesvda_strided_batched_buffer_size"))
    }

    /// Approximate strided-batched SVD; not supported
    pub fn gesvda_strided_batched<T: Scalar>(
        &mut self,
        _jobz: EigMode,
        _rank: i32,
        _m: i32,
        _n: i32,
        _a: DevicePtr<T>,
        _lda: i32,
        _stride_a: i64,
        _work: Option<Workspace>,
        _info: DevicePtr<i32>,
        _batch_count: i32,
    ) -> Result<()> {
        Err(not_supported("gesvda_strided_batched"))
    }
}

