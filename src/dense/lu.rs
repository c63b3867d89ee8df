//! LU family: `getrf`, `getrs` and the `gesv` driver

use super::null;
use crate::dtype::Scalar;
use crate::error::Result;
use crate::handle::Handle;
use crate::runtime::{DevicePtr, LapackOps, RtStatus};
use crate::types::Operation;
use crate::workspace::{Workspace, WorkspaceLayout, narrow_lwork};

/// Runtime form of `getrf`: pivoted when `ipiv` is given, unpivoted otherwise
fn getrf_call<R: LapackOps, T: Scalar>(
    rt: &mut R,
    m: i32,
    n: i32,
    a: DevicePtr<T>,
    lda: i32,
    ipiv: DevicePtr<i32>,
    info: DevicePtr<i32>,
    pivoting: bool,
) -> RtStatus {
    if pivoting {
        rt.getrf(m, n, a, lda, ipiv, info)
    } else {
        rt.getrf_npvt(m, n, a, lda, info)
    }
}

/// Runtime form of `gesv`: in place when `x` and `b` are the same buffer
fn gesv_call<R: LapackOps, T: Scalar>(
    rt: &mut R,
    n: i32,
    nrhs: i32,
    a: DevicePtr<T>,
    lda: i32,
    ipiv: DevicePtr<i32>,
    b: DevicePtr<T>,
    ldb: i32,
    x: DevicePtr<T>,
    ldx: i32,
    info: DevicePtr<i32>,
    in_place: bool,
) -> RtStatus {
    if in_place {
        rt.gesv(n, nrhs, a, lda, ipiv, b, ldb, info)
    } else {
        rt.gesv_outofplace(n, nrhs, a, lda, ipiv, b, ldb, x, ldx, info)
    }
}

impl<R: LapackOps> Handle<R> {
    pub(crate) fn getrf_bytes<T: Scalar>(&mut self, m: i32, n: i32, lda: i32) -> Result<usize> {
        self.workspace_bytes(&WorkspaceLayout::new("getrf"), |rt| {
            getrf_call::<R, T>(rt, m, n, null(), lda, null(), null(), true)
        })
    }

    /// Workspace bytes for [`getrf`](Self::getrf), sized for the pivoted form
    pub fn getrf_buffer_size<T: Scalar>(&mut self, m: i32, n: i32, lda: i32) -> Result<i32> {
        narrow_lwork(self.getrf_bytes::<T>(m, n, lda)?)
    }

    /// LU factorization `A = P L U` in place
    ///
    /// A null `ipiv` selects the factorization without pivoting.
    pub fn getrf<T: Scalar>(
        &mut self,
        m: i32,
        n: i32,
        a: DevicePtr<T>,
        lda: i32,
        work: Option<Workspace>,
        ipiv: DevicePtr<i32>,
        info: DevicePtr<i32>,
    ) -> Result<()> {
        let pivoting = !ipiv.is_null();
        let (routine, layout) = if pivoting {
            ("getrf", WorkspaceLayout::new("getrf"))
        } else {
            ("getrf_npvt", WorkspaceLayout::new("getrf_npvt"))
        };
        let _scratch = self.provide_workspace(&layout, work, |rt| {
            getrf_call::<R, T>(rt, m, n, null(), lda, null(), null(), pivoting)
        })?;
        self.dispatch::<T>(routine, |rt| {
            getrf_call(rt, m, n, a, lda, ipiv, info, pivoting)
        })
    }

    pub(crate) fn getrs_bytes<T: Scalar>(
        &mut self,
        trans: Operation,
        n: i32,
        nrhs: i32,
        lda: i32,
        ldb: i32,
    ) -> Result<usize> {
        self.workspace_bytes(&WorkspaceLayout::new("getrs"), |rt| {
            rt.getrs::<T>(trans.into(), n, nrhs, null(), lda, null(), null(), ldb)
        })
    }

    /// Workspace bytes for [`getrs`](Self::getrs)
    pub fn getrs_buffer_size<T: Scalar>(
        &mut self,
        trans: Operation,
        n: i32,
        nrhs: i32,
        lda: i32,
        ldb: i32,
    ) -> Result<i32> {
        narrow_lwork(self.getrs_bytes::<T>(trans, n, nrhs, lda, ldb)?)
    }

    /// Solve `op(A) X = B` with the factors from [`getrf`](Self::getrf); B is overwritten
    pub fn getrs<T: Scalar>(
        &mut self,
        trans: Operation,
        n: i32,
        nrhs: i32,
        a: DevicePtr<T>,
        lda: i32,
        ipiv: DevicePtr<i32>,
        b: DevicePtr<T>,
        ldb: i32,
        work: Option<Workspace>,
        info: DevicePtr<i32>,
    ) -> Result<()> {
        let layout = WorkspaceLayout::new("getrs");
        let _scratch = self.provide_workspace(&layout, work, |rt| {
            rt.getrs::<T>(trans.into(), n, nrhs, null(), lda, null(), null(), ldb)
        })?;
        self.dispatch::<T>("getrs", |rt| {
            rt.getrs(trans.into(), n, nrhs, a, lda, ipiv, b, ldb)
        })?;
        self.clear_info(info, 1)
    }

    /// Workspace bytes for [`gesv`](Self::gesv)
    ///
    /// Takes the `b` and `x` pointers because in-place and out-of-place
    /// solves may need different scratch.
    pub fn gesv_buffer_size<T: Scalar>(
        &mut self,
        n: i32,
        nrhs: i32,
        lda: i32,
        b: DevicePtr<T>,
        ldb: i32,
        x: DevicePtr<T>,
        ldx: i32,
    ) -> Result<i32> {
        let in_place = b == x;
        let bytes = self.workspace_bytes(&WorkspaceLayout::new("gesv"), |rt| {
            gesv_call::<R, T>(
                rt,
                n,
                nrhs,
                null(),
                lda,
                null(),
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

    /// Solve `A X = B` by LU factorization
    ///
    /// When `x` and `b` are the same buffer the solution overwrites B;
    /// otherwise it is written to X and B is left untouched. A receives the
    /// LU factors either way.
    pub fn gesv<T: Scalar>(
        &mut self,
        n: i32,
        nrhs: i32,
        a: DevicePtr<T>,
        lda: i32,
        ipiv: DevicePtr<i32>,
        b: DevicePtr<T>,
        ldb: i32,
        x: DevicePtr<T>,
        ldx: i32,
        work: Option<Workspace>,
        info: DevicePtr<i32>,
    ) -> Result<()> {
        let in_place = b == x;
        let layout = WorkspaceLayout::new("gesv");
        let _scratch = self.provide_workspace(&layout, work, |rt| {
            gesv_call::<R, T>(
                rt,
                n,
                nrhs,
                null(),
                lda,
                null(),
                null(),
                ldb,
                null(),
                ldx,
                null(),
                in_place,
            )
        })?;
        let routine = if in_place { "gesv" } else { "gesv_outofplace" };
        self.dispatch::<T>(routine, |rt| {
            gesv_call(rt, n, nrhs, a, lda, ipiv, b, ldb, x, ldx, info, in_place)
        })
    }
}
