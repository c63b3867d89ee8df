//! 64-bit API: `i64` dimensions and `(device, host)` byte sizes
//!
//! Sizes are reported as `usize` without the 32-bit narrowing check. The
//! runtime still takes `i32` dimensions, so every dimension is narrowed on
//! entry and values outside `i32` are rejected with `InvalidValue`.

use crate::dtype::Scalar;
use crate::error::{Error, Result};
use crate::handle::Handle;
use crate::runtime::{DevicePtr, LapackOps};
use crate::types::{EigMode, FillMode, Operation, SvdJob};
use crate::workspace::Workspace;

/// Narrow one 64-bit dimension argument
fn dim(name: &'static str, value: i64) -> Result<i32> {
    i32::try_from(value).map_err(|_| {
        tracing::warn!(arg = name, value, "dimension does not fit the runtime's 32-bit range");
        Error::invalid_value(name, format!("{value} is outside the 32-bit dimension range"))
    })
}

/// The host runtime needs no host-side scratch
const HOST_BYTES: usize = 0;

impl<R: LapackOps> Handle<R> {
    /// Device and host bytes for [`x_potrf`](Self::x_potrf)
    pub fn x_potrf_buffer_size<T: Scalar>(
        &mut self,
        uplo: FillMode,
        n: i64,
        lda: i64,
    ) -> Result<(usize, usize)> {
        let bytes = self.potrf_bytes::<T>(uplo, dim("n", n)?, dim("lda", lda)?)?;
        Ok((bytes, HOST_BYTES))
    }

    /// Cholesky factorization with 64-bit dimensions
    pub fn x_potrf<T: Scalar>(
        &mut self,
        uplo: FillMode,
        n: i64,
        a: DevicePtr<T>,
        lda: i64,
        work: Option<Workspace>,
        info: DevicePtr<i32>,
    ) -> Result<()> {
        self.potrf(uplo, dim("n", n)?, a, dim("lda", lda)?, work, info)
    }

    /// Device and host bytes for [`x_potrs`](Self::x_potrs)
    pub fn x_potrs_buffer_size<T: Scalar>(
        &mut self,
        uplo: FillMode,
        n: i64,
        nrhs: i64,
        lda: i64,
        ldb: i64,
    ) -> Result<(usize, usize)> {
        let bytes = self.potrs_bytes::<T>(
            uplo,
            dim("n", n)?,
            dim("nrhs", nrhs)?,
            dim("lda", lda)?,
            dim("ldb", ldb)?,
        )?;
        Ok((bytes, HOST_BYTES))
    }

    /// Solve with a Cholesky factor, 64-bit dimensions
    pub fn x_potrs<T: Scalar>(
        &mut self,
        uplo: FillMode,
        n: i64,
        nrhs: i64,
        a: DevicePtr<T>,
        lda: i64,
        b: DevicePtr<T>,
        ldb: i64,
        work: Option<Workspace>,
        info: DevicePtr<i32>,
    ) -> Result<()> {
        self.potrs(
            uplo,
            dim("n", n)?,
            dim("nrhs", nrhs)?,
            a,
            dim("lda", lda)?,
            b,
            dim("ldb", ldb)?,
            work,
            info,
        )
    }

    /// Device and host bytes for [`x_getrf`](Self::x_getrf)
    pub fn x_getrf_buffer_size<T: Scalar>(
        &mut self,
        m: i64,
        n: i64,
        lda: i64,
    ) -> Result<(usize, usize)> {
        let bytes = self.getrf_bytes::<T>(dim("m", m)?, dim("n", n)?, dim("lda", lda)?)?;
        Ok((bytes, HOST_BYTES))
    }

    /// LU factorization with 64-bit dimensions
    ///
    /// Pivot indices stay 32-bit; a null `ipiv` selects the unpivoted form.
    pub fn x_getrf<T: Scalar>(
        &mut self,
        m: i64,
        n: i64,
        a: DevicePtr<T>,
        lda: i64,
        ipiv: DevicePtr<i32>,
        work: Option<Workspace>,
        info: DevicePtr<i32>,
    ) -> Result<()> {
        self.getrf(dim("m", m)?, dim("n", n)?, a, dim("lda", lda)?, work, ipiv, info)
    }

    /// Device and host bytes for [`x_getrs`](Self::x_getrs)
    pub fn x_getrs_buffer_size<T: Scalar>(
        &mut self,
        trans: Operation,
        n: i64,
        nrhs: i64,
        lda: i64,
        ldb: i64,
    ) -> Result<(usize, usize)> {
        let bytes = self.getrs_bytes::<T>(
            trans,
            dim("n", n)?,
            dim("nrhs", nrhs)?,
            dim("lda", lda)?,
            dim("ldb", ldb)?,
        )?;
        Ok((bytes, HOST_BYTES))
    }

    /// Solve with an LU factorization, 64-bit dimensions
    pub fn x_getrs<T: Scalar>(
        &mut self,
        trans: Operation,
        n: i64,
        nrhs: i64,
        a: DevicePtr<T>,
        lda: i64,
        ipiv: DevicePtr<i32>,
        b: DevicePtr<T>,
        ldb: i64,
        work: Option<Workspace>,
        info: DevicePtr<i32>,
    ) -> Result<()> {
        self.getrs(
            trans,
            dim("n", n)?,
            dim("nrhs", nrhs)?,
            a,
            dim("lda", lda)?,
            ipiv,
            b,
            dim("ldb", ldb)?,
            work,
            info,
        )
    }

    /// Device and host bytes for [`x_geqrf`](Self::x_geqrf)
    pub fn x_geqrf_buffer_size<T: Scalar>(
        &mut self,
        m: i64,
        n: i64,
        lda: i64,
    ) -> Result<(usize, usize)> {
        let bytes = self.geqrf_bytes::<T>(dim("m", m)?, dim("n", n)?, dim("lda", lda)?)?;
        Ok((bytes, HOST_BYTES))
    }

    /// QR factorization with 64-bit dimensions
    pub fn x_geqrf<T: Scalar>(
        &mut self,
        m: i64,
        n: i64,
        a: DevicePtr<T>,
        lda: i64,
        tau: DevicePtr<T>,
        work: Option<Workspace>,
        info: DevicePtr<i32>,
    ) -> Result<()> {
        self.geqrf(dim("m", m)?, dim("n", n)?, a, dim("lda", lda)?, tau, work, info)
    }

    /// Device and host bytes for [`x_syevd`](Self::x_syevd)
    pub fn x_syevd_buffer_size<T: Scalar>(
        &mut self,
        jobz: EigMode,
        uplo: FillMode,
        n: i64,
        lda: i64,
    ) -> Result<(usize, usize)> {
        let bytes = self.syevd_bytes::<T>(jobz, uplo, dim("n", n)?, dim("lda", lda)?)?;
        Ok((bytes, HOST_BYTES))
    }

    /// Hermitian eigensolver with 64-bit dimensions
    pub fn x_syevd<T: Scalar>(
        &mut self,
        jobz: EigMode,
        uplo: FillMode,
        n: i64,
        a: DevicePtr<T>,
        lda: i64,
        w: DevicePtr<T::Real>,
        work: Option<Workspace>,
        info: DevicePtr<i32>,
    ) -> Result<()> {
        self.syevd(jobz, uplo, dim("n", n)?, a, dim("lda", lda)?, w, work, info)
    }

    /// Device and host bytes for [`x_gesvd`](Self::x_gesvd)
    pub fn x_gesvd_buffer_size<T: Scalar>(
        &mut self,
        jobu: SvdJob,
        jobv: SvdJob,
        m: i64,
        n: i64,
    ) -> Result<(usize, usize)> {
        let bytes = self.gesvd_bytes::<T>(jobu, jobv, dim("m", m)?, dim("n", n)?)?;
        Ok((bytes, HOST_BYTES))
    }

    /// Singular value decomposition with 64-bit dimensions
    pub fn x_gesvd<T: Scalar>(
        &mut self,
        jobu: SvdJob,
        jobv: SvdJob,
        m: i64,
        n: i64,
        a: DevicePtr<T>,
        lda: i64,
        s: DevicePtr<T::Real>,
        u: DevicePtr<T>,
        ldu: i64,
        vt: DevicePtr<T>,
        ldvt: i64,
        work: Option<Workspace>,
        info: DevicePtr<i32>,
    ) -> Result<()> {
        self.gesvd(
            jobu,
            jobv,
            dim("m", m)?,
            dim("n", n)?,
            a,
            dim("lda", lda)?,
            s,
            u,
            dim("ldu", ldu)?,
            vt,
            dim("ldvt", ldvt)?,
            work,
            info,
        )
    }
}
