//! Bidiagonal reduction: `gebrd` and `orgbr`/`ungbr`

use super::null;
use crate::dtype::Scalar;
use crate::error::Result;
use crate::handle::Handle;
use crate::runtime::{DevicePtr, LapackOps, RtStorev};
use crate::types::SideMode;
use crate::workspace::{Workspace, WorkspaceLayout, narrow_lwork};

impl<R: LapackOps> Handle<R> {
    /// Workspace bytes for [`gebrd`](Self::gebrd)
    pub fn gebrd_buffer_size<T: Scalar>(&mut self, m: i32, n: i32) -> Result<i32> {
        let lda = m.max(1);
        let bytes = self.workspace_bytes(&WorkspaceLayout::new("gebrd"), |rt| {
            rt.gebrd::<T>(m, n, null(), lda, null(), null(), null(), null())
        })?;
        narrow_lwork(bytes)
    }

    /// Reduce a general matrix to bidiagonal form `Q^H A P = B`
    pub fn gebrd<T: Scalar>(
        &mut self,
        m: i32,
        n: i32,
        a: DevicePtr<T>,
        lda: i32,
        d: DevicePtr<T::Real>,
        e: DevicePtr<T::Real>,
        tauq: DevicePtr<T>,
        taup: DevicePtr<T>,
        work: Option<Workspace>,
        info: DevicePtr<i32>,
    ) -> Result<()> {
        let layout = WorkspaceLayout::new("gebrd");
        let _scratch = self.provide_workspace(&layout, work, |rt| {
            rt.gebrd::<T>(m, n, null(), lda, null(), null(), null(), null())
        })?;
        self.dispatch::<T>("gebrd", |rt| rt.gebrd(m, n, a, lda, d, e, tauq, taup))?;
        self.clear_info(info, 1)
    }

    /// Workspace bytes for [`orgbr`](Self::orgbr)
    pub fn orgbr_buffer_size<T: Scalar>(
        &mut self,
        side: SideMode,
        m: i32,
        n: i32,
        k: i32,
        lda: i32,
    ) -> Result<i32> {
        let storev = RtStorev::from(side);
        let bytes = self.workspace_bytes(&WorkspaceLayout::new("orgbr"), |rt| {
            rt.orgbr::<T>(storev, m, n, k, null(), lda, null())
        })?;
        narrow_lwork(bytes)
    }

    /// Form Q (`Left`) or P^H (`Right`) from the reflectors of [`gebrd`](Self::gebrd)
    pub fn orgbr<T: Scalar>(
        &mut self,
        side: SideMode,
        m: i32,
        n: i32,
        k: i32,
        a: DevicePtr<T>,
        lda: i32,
        tau: DevicePtr<T>,
        work: Option<Workspace>,
        info: DevicePtr<i32>,
    ) -> Result<()> {
        let storev = RtStorev::from(side);
        let layout = WorkspaceLayout::new("orgbr");
        let _scratch = self.provide_workspace(&layout, work, |rt| {
            rt.orgbr::<T>(storev, m, n, k, null(), lda, null())
        })?;
        self.dispatch::<T>("orgbr", |rt| rt.orgbr(storev, m, n, k, a, lda, tau))?;
        self.clear_info(info, 1)
    }
}
