//! Status-code surface
//!
//! Free functions shaped like the C entry points: the handle and output
//! pointers may be absent, enumerations arrive as raw codes, scratch arrives
//! as a `(work, lwork)` pair and every call returns a [`Status`].
//!
//! The checks here run before anything reaches the runtime: an absent handle
//! is `NotInitialized`, an absent `lwork` output is `InvalidValue`, and
//! `*lwork` is zeroed before the size is computed so a failed query never
//! leaves a stale value behind. Everything else is delegated to the typed
//! methods on [`Handle`].
//!
//! ```rust,ignore
//! let mut handle = dn::create(HostRuntime::new());
//! let mut lwork = 0;
//! let status = dn::potrf_buffer_size::<f64, _>(Some(&mut handle), 121, n, lda, Some(&mut lwork));
//! ```

use crate::dtype::Scalar;
use crate::error::{Error, Result, Status};
use crate::handle::Handle;
use crate::runtime::{DevicePtr, LapackOps, Runtime, Stream};
use crate::types::{EigMode, EigType, FillMode, JacobiParams, Operation, SideMode, SvdJob};
use crate::workspace::Workspace;

// ============================================================================
// Boundary helpers
// ============================================================================

/// Run an execute call against a present handle
fn run<R: Runtime>(
    handle: Option<&mut Handle<R>>,
    call: impl FnOnce(&mut Handle<R>) -> Result<()>,
) -> Status {
    let Some(handle) = handle else {
        return Status::NotInitialized;
    };
    Status::from_result(&call(handle))
}

/// Run a 32-bit size query and store the result in `lwork`
fn buffer_size<R: Runtime>(
    handle: Option<&mut Handle<R>>,
    lwork: Option<&mut i32>,
    query: impl FnOnce(&mut Handle<R>) -> Result<i32>,
) -> Status {
    let Some(handle) = handle else {
        return Status::NotInitialized;
    };
    let Some(lwork) = lwork else {
        return Status::InvalidValue;
    };
    *lwork = 0;
    match query(handle) {
        Ok(bytes) => {
            *lwork = bytes;
            Status::Success
        }
        Err(e) => e.status(),
    }
}

/// Run a 64-bit size query and store device and host bytes
fn buffer_size64<R: Runtime>(
    handle: Option<&mut Handle<R>>,
    device_bytes: Option<&mut usize>,
    host_bytes: Option<&mut usize>,
    query: impl FnOnce(&mut Handle<R>) -> Result<(usize, usize)>,
) -> Status {
    let Some(handle) = handle else {
        return Status::NotInitialized;
    };
    let (Some(device_bytes), Some(host_bytes)) = (device_bytes, host_bytes) else {
        return Status::InvalidValue;
    };
    *device_bytes = 0;
    *host_bytes = 0;
    match query(handle) {
        Ok((device, host)) => {
            *device_bytes = device;
            *host_bytes = host;
            Status::Success
        }
        Err(e) => e.status(),
    }
}

fn workspace(work: DevicePtr<u8>, lwork: i32) -> Result<Option<Workspace>> {
    Workspace::from_raw(work, i64::from(lwork))
}

fn required<'a, P>(arg: &'static str, value: Option<&'a mut P>) -> Result<&'a mut P> {
    value.ok_or_else(|| Error::invalid_value(arg, "null pointer"))
}

fn required_ref<'a, P>(arg: &'static str, value: Option<&'a P>) -> Result<&'a P> {
    value.ok_or_else(|| Error::invalid_value(arg, "null pointer"))
}

// ============================================================================
// Handle lifecycle
// ============================================================================

/// Create a solver handle over `runtime`
pub fn create<R: Runtime>(runtime: R) -> Handle<R> {
    Handle::new(runtime)
}

/// Destroy a handle, releasing its reservation
pub fn destroy<R: Runtime>(handle: Option<Handle<R>>) -> Status {
    match handle {
        Some(handle) => {
            drop(handle);
            Status::Success
        }
        None => Status::NotInitialized,
    }
}

/// Bind the handle to `stream`
pub fn set_stream<R: Runtime>(handle: Option<&mut Handle<R>>, stream: Stream) -> Status {
    run(handle, |h| h.set_stream(stream))
}

/// Read the handle's current stream into `stream`
pub fn get_stream<R: Runtime>(handle: Option<&Handle<R>>, stream: Option<&mut Stream>) -> Status {
    let Some(handle) = handle else {
        return Status::NotInitialized;
    };
    let Some(stream) = stream else {
        return Status::InvalidValue;
    };
    *stream = handle.stream();
    Status::Success
}

// ============================================================================
// Jacobi parameter objects
// ============================================================================

/// Create a Jacobi parameter object with default settings
pub fn create_jacobi_info() -> JacobiParams {
    JacobiParams::new()
}

/// Destroy a Jacobi parameter object
pub fn destroy_jacobi_info(params: Option<JacobiParams>) -> Status {
    match params {
        Some(_) => Status::Success,
        None => Status::InvalidValue,
    }
}

/// Set the convergence tolerance; `0.0` selects the precision's default
pub fn jacobi_set_tolerance(params: Option<&mut JacobiParams>, tolerance: f64) -> Status {
    Status::from_result(&required("params", params).map(|p| p.set_tolerance(tolerance)))
}

/// Set the sweep limit; must be positive
pub fn jacobi_set_max_sweeps(params: Option<&mut JacobiParams>, max_sweeps: i32) -> Status {
    Status::from_result(&required("params", params).and_then(|p| p.set_max_sweeps(max_sweeps)))
}

/// Enable (`1`) or disable (`0`) ascending eigenvalue sorting
pub fn jacobi_set_sort_eig(params: Option<&mut JacobiParams>, sort_eig: i32) -> Status {
    Status::from_result(&required("params", params).map(|p| p.set_sort_eig(sort_eig != 0)))
}

fn jacobi_result<R: Runtime, V>(
    handle: Option<&Handle<R>>,
    params: Option<&JacobiParams>,
    out: Option<&mut V>,
    get: impl FnOnce(&Handle<R>, &JacobiParams) -> Result<V>,
) -> Status {
    let Some(handle) = handle else {
        return Status::NotInitialized;
    };
    let (Some(params), Some(out)) = (params, out) else {
        return Status::InvalidValue;
    };
    match get(handle, params) {
        Ok(value) => {
            *out = value;
            Status::Success
        }
        Err(e) => e.status(),
    }
}

/// Residual of the last `syevj`/`sygvj` execution
pub fn syevj_get_residual<R: Runtime>(
    handle: Option<&Handle<R>>,
    params: Option<&JacobiParams>,
    residual: Option<&mut f64>,
) -> Status {
    jacobi_result(handle, params, residual, |h, p| h.syevj_residual(p))
}

/// Sweep count of the last `syevj`/`sygvj` execution
pub fn syevj_get_sweeps<R: Runtime>(
    handle: Option<&Handle<R>>,
    params: Option<&JacobiParams>,
    sweeps: Option<&mut i32>,
) -> Status {
    jacobi_result(handle, params, sweeps, |h, p| h.syevj_sweeps(p))
}

/// Residual of the last `gesvdj` execution
pub fn gesvdj_get_residual<R: Runtime>(
    handle: Option<&Handle<R>>,
    params: Option<&JacobiParams>,
    residual: Option<&mut f64>,
) -> Status {
    jacobi_result(handle, params, residual, |h, p| h.gesvdj_residual(p))
}

/// Sweep count of the last `gesvdj` execution
pub fn gesvdj_get_sweeps<R: Runtime>(
    handle: Option<&Handle<R>>,
    params: Option<&JacobiParams>,
    sweeps: Option<&mut i32>,
) -> Status {
    jacobi_result(handle, params, sweeps, |h, p| h.gesvdj_sweeps(p))
}

// ============================================================================
// Cholesky
// ============================================================================

/// Status form of [`Handle::potrf_buffer_size`]
pub fn potrf_buffer_size<T: Scalar, R: LapackOps>(
    handle: Option<&mut Handle<R>>,
    uplo: i32,
    n: i32,
    lda: i32,
    lwork: Option<&mut i32>,
) -> Status {
    buffer_size(handle, lwork, |h| {
        h.potrf_buffer_size::<T>(FillMode::try_from(uplo)?, n, lda)
    })
}

/// Status form of [`Handle::potrf`]
pub fn potrf<T: Scalar, R: LapackOps>(
    handle: Option<&mut Handle<R>>,
    uplo: i32,
    n: i32,
    a: DevicePtr<T>,
    lda: i32,
    work: DevicePtr<u8>,
    lwork: i32,
    info: DevicePtr<i32>,
) -> Status {
    run(handle, |h| {
        let uplo = FillMode::try_from(uplo)?;
        h.potrf(uplo, n, a, lda, workspace(work, lwork)?, info)
    })
}

/// Status form of [`Handle::potrf_batched_buffer_size`]
pub fn potrf_batched_buffer_size<T: Scalar, R: LapackOps>(
    handle: Option<&mut Handle<R>>,
    uplo: i32,
    n: i32,
    lda: i32,
    lwork: Option<&mut i32>,
    batch_count: i32,
) -> Status {
    buffer_size(handle, lwork, |h| {
        h.potrf_batched_buffer_size::<T>(FillMode::try_from(uplo)?, n, lda, batch_count)
    })
}

/// Status form of [`Handle::potrf_batched`]
pub fn potrf_batched<T: Scalar, R: LapackOps>(
    handle: Option<&mut Handle<R>>,
    uplo: i32,
    n: i32,
    a: DevicePtr<DevicePtr<T>>,
    lda: i32,
    work: DevicePtr<u8>,
    lwork: i32,
    info: DevicePtr<i32>,
    batch_count: i32,
) -> Status {
    run(handle, |h| {
        let uplo = FillMode::try_from(uplo)?;
        h.potrf_batched(uplo, n, a, lda, workspace(work, lwork)?, info, batch_count)
    })
}

/// Status form of [`Handle::potrs_buffer_size`]
pub fn potrs_buffer_size<T: Scalar, R: LapackOps>(
    handle: Option<&mut Handle<R>>,
    uplo: i32,
    n: i32,
    nrhs: i32,
    lda: i32,
    ldb: i32,
    lwork: Option<&mut i32>,
) -> Status {
    buffer_size(handle, lwork, |h| {
        h.potrs_buffer_size::<T>(FillMode::try_from(uplo)?, n, nrhs, lda, ldb)
    })
}

/// Status form of [`Handle::potrs`]
pub fn potrs<T: Scalar, R: LapackOps>(
    handle: Option<&mut Handle<R>>,
    uplo: i32,
    n: i32,
    nrhs: i32,
    a: DevicePtr<T>,
    lda: i32,
    b: DevicePtr<T>,
    ldb: i32,
    work: DevicePtr<u8>,
    lwork: i32,
    info: DevicePtr<i32>,
) -> Status {
    run(handle, |h| {
        let uplo = FillMode::try_from(uplo)?;
        h.potrs(uplo, n, nrhs, a, lda, b, ldb, workspace(work, lwork)?, info)
    })
}

/// Status form of [`Handle::potrs_batched_buffer_size`]
pub fn potrs_batched_buffer_size<T: Scalar, R: LapackOps>(
    handle: Option<&mut Handle<R>>,
    uplo: i32,
    n: i32,
    nrhs: i32,
    lda: i32,
    ldb: i32,
    lwork: Option<&mut i32>,
    batch_count: i32,
) -> Status {
    buffer_size(handle, lwork, |h| {
        h.potrs_batched_buffer_size::<T>(
            FillMode::try_from(uplo)?,
            n,
            nrhs,
            lda,
            ldb,
            batch_count,
        )
    })
}

/// Status form of [`Handle::potrs_batched`]
pub fn potrs_batched<T: Scalar, R: LapackOps>(
    handle: Option<&mut Handle<R>>,
    uplo: i32,
    n: i32,
    nrhs: i32,
    a: DevicePtr<DevicePtr<T>>,
    lda: i32,
    b: DevicePtr<DevicePtr<T>>,
    ldb: i32,
    work: DevicePtr<u8>,
    lwork: i32,
    info: DevicePtr<i32>,
    batch_count: i32,
) -> Status {
    run(handle, |h| {
        let uplo = FillMode::try_from(uplo)?;
        let work = workspace(work, lwork)?;
        h.potrs_batched(uplo, n, nrhs, a, lda, b, ldb, work, info, batch_count)
    })
}

/// Status form of [`Handle::potri_buffer_size`]
pub fn potri_buffer_size<T: Scalar, R: LapackOps>(
    handle: Option<&mut Handle<R>>,
    uplo: i32,
    n: i32,
    lda: i32,
    lwork: Option<&mut i32>,
) -> Status {
    buffer_size(handle, lwork, |h| {
        h.potri_buffer_size::<T>(FillMode::try_from(uplo)?, n, lda)
    })
}

/// Status form of [`Handle::potri`]
pub fn potri<T: Scalar, R: LapackOps>(
    handle: Option<&mut Handle<R>>,
    uplo: i32,
    n: i32,
    a: DevicePtr<T>,
    lda: i32,
    work: DevicePtr<u8>,
    lwork: i32,
    info: DevicePtr<i32>,
) -> Status {
    run(handle, |h| {
        let uplo = FillMode::try_from(uplo)?;
        h.potri(uplo, n, a, lda, workspace(work, lwork)?, info)
    })
}

// ============================================================================
// LU
// ============================================================================

/// Status form of [`Handle::getrf_buffer_size`]
pub fn getrf_buffer_size<T: Scalar, R: LapackOps>(
    handle: Option<&mut Handle<R>>,
    m: i32,
    n: i32,
    lda: i32,
    lwork: Option<&mut i32>,
) -> Status {
    buffer_size(handle, lwork, |h| h.getrf_buffer_size::<T>(m, n, lda))
}

/// Status form of [`Handle::getrf`]
pub fn getrf<T: Scalar, R: LapackOps>(
    handle: Option<&mut Handle<R>>,
    m: i32,
    n: i32,
    a: DevicePtr<T>,
    lda: i32,
    work: DevicePtr<u8>,
    lwork: i32,
    ipiv: DevicePtr<i32>,
    info: DevicePtr<i32>,
) -> Status {
    run(handle, |h| {
        h.getrf(m, n, a, lda, workspace(work, lwork)?, ipiv, info)
    })
}

/// Status form of [`Handle::getrs_buffer_size`]
pub fn getrs_buffer_size<T: Scalar, R: LapackOps>(
    handle: Option<&mut Handle<R>>,
    trans: i32,
    n: i32,
    nrhs: i32,
    lda: i32,
    ldb: i32,
    lwork: Option<&mut i32>,
) -> Status {
    buffer_size(handle, lwork, |h| {
        h.getrs_buffer_size::<T>(Operation::try_from(trans)?, n, nrhs, lda, ldb)
    })
}

/// Status form of [`Handle::getrs`]
pub fn getrs<T: Scalar, R: LapackOps>(
    handle: Option<&mut Handle<R>>,
    trans: i32,
    n: i32,
    nrhs: i32,
    a: DevicePtr<T>,
    lda: i32,
    ipiv: DevicePtr<i32>,
    b: DevicePtr<T>,
    ldb: i32,
    work: DevicePtr<u8>,
    lwork: i32,
    info: DevicePtr<i32>,
) -> Status {
    run(handle, |h| {
        let trans = Operation::try_from(trans)?;
        h.getrs(trans, n, nrhs, a, lda, ipiv, b, ldb, workspace(work, lwork)?, info)
    })
}

/// Status form of [`Handle::gesv_buffer_size`]
pub fn gesv_buffer_size<T: Scalar, R: LapackOps>(
    handle: Option<&mut Handle<R>>,
    n: i32,
    nrhs: i32,
    lda: i32,
    b: DevicePtr<T>,
    ldb: i32,
    x: DevicePtr<T>,
    ldx: i32,
    lwork: Option<&mut i32>,
) -> Status {
    buffer_size(handle, lwork, |h| {
        h.gesv_buffer_size::<T>(n, nrhs, lda, b, ldb, x, ldx)
    })
}

/// Status form of [`Handle::gesv`]
pub fn gesv<T: Scalar, R: LapackOps>(
    handle: Option<&mut Handle<R>>,
    n: i32,
    nrhs: i32,
    a: DevicePtr<T>,
    lda: i32,
    ipiv: DevicePtr<i32>,
    b: DevicePtr<T>,
    ldb: i32,
    x: DevicePtr<T>,
    ldx: i32,
    work: DevicePtr<u8>,
    lwork: i32,
    info: DevicePtr<i32>,
) -> Status {
    run(handle, |h| {
        let work = workspace(work, lwork)?;
        h.gesv(n, nrhs, a, lda, ipiv, b, ldb, x, ldx, work, info)
    })
}

// ============================================================================
// QR
// ============================================================================

/// Status form of [`Handle::geqrf_buffer_size`]
pub fn geqrf_buffer_size<T: Scalar, R: LapackOps>(
    handle: Option<&mut Handle<R>>,
    m: i32,
    n: i32,
    lda: i32,
    lwork: Option<&mut i32>,
) -> Status {
    buffer_size(handle, lwork, |h| h.geqrf_buffer_size::<T>(m, n, lda))
}

/// Status form of [`Handle::geqrf`]
pub fn geqrf<T: Scalar, R: LapackOps>(
    handle: Option<&mut Handle<R>>,
    m: i32,
    n: i32,
    a: DevicePtr<T>,
    lda: i32,
    tau: DevicePtr<T>,
    work: DevicePtr<u8>,
    lwork: i32,
    info: DevicePtr<i32>,
) -> Status {
    run(handle, |h| {
        h.geqrf(m, n, a, lda, tau, workspace(work, lwork)?, info)
    })
}

/// Status form of [`Handle::orgqr_buffer_size`]
pub fn orgqr_buffer_size<T: Scalar, R: LapackOps>(
    handle: Option<&mut Handle<R>>,
    m: i32,
    n: i32,
    k: i32,
    lda: i32,
    lwork: Option<&mut i32>,
) -> Status {
    buffer_size(handle, lwork, |h| h.orgqr_buffer_size::<T>(m, n, k, lda))
}

/// Status form of [`Handle::orgqr`]
pub fn orgqr<T: Scalar, R: LapackOps>(
    handle: Option<&mut Handle<R>>,
    m: i32,
    n: i32,
    k: i32,
    a: DevicePtr<T>,
    lda: i32,
    tau: DevicePtr<T>,
    work: DevicePtr<u8>,
    lwork: i32,
    info: DevicePtr<i32>,
) -> Status {
    run(handle, |h| {
        h.orgqr(m, n, k, a, lda, tau, workspace(work, lwork)?, info)
    })
}

/// Status form of [`Handle::ormqr_buffer_size`]
pub fn ormqr_buffer_size<T: Scalar, R: LapackOps>(
    handle: Option<&mut Handle<R>>,
    side: i32,
    trans: i32,
    m: i32,
    n: i32,
    k: i32,
    lda: i32,
    ldc: i32,
    lwork: Option<&mut i32>,
) -> Status {
    buffer_size(handle, lwork, |h| {
        let side = SideMode::try_from(side)?;
        let trans = Operation::try_from(trans)?;
        h.ormqr_buffer_size::<T>(side, trans, m, n, k, lda, ldc)
    })
}

/// Status form of [`Handle::ormqr`]
pub fn ormqr<T: Scalar, R: LapackOps>(
    handle: Option<&mut Handle<R>>,
    side: i32,
    trans: i32,
    m: i32,
    n: i32,
    k: i32,
    a: DevicePtr<T>,
    lda: i32,
    tau: DevicePtr<T>,
    c: DevicePtr<T>,
    ldc: i32,
    work: DevicePtr<u8>,
    lwork: i32,
    info: DevicePtr<i32>,
) -> Status {
    run(handle, |h| {
        let side = SideMode::try_from(side)?;
        let trans = Operation::try_from(trans)?;
        let work = workspace(work, lwork)?;
        h.ormqr(side, trans, m, n, k, a, lda, tau, c, ldc, work, info)
    })
}

/// Status form of [`Handle::gels_buffer_size`]
pub fn gels_buffer_size<T: Scalar, R: LapackOps>(
    handle: Option<&mut Handle<R>>,
    m: i32,
    n: i32,
    nrhs: i32,
    lda: i32,
    b: DevicePtr<T>,
    ldb: i32,
    x: DevicePtr<T>,
    ldx: i32,
    lwork: Option<&mut i32>,
) -> Status {
    buffer_size(handle, lwork, |h| {
        h.gels_buffer_size::<T>(m, n, nrhs, lda, b, ldb, x, ldx)
    })
}

/// Status form of [`Handle::gels`]
pub fn gels<T: Scalar, R: LapackOps>(
    handle: Option<&mut Handle<R>>,
    m: i32,
    n: i32,
    nrhs: i32,
    a: DevicePtr<T>,
    lda: i32,
    b: DevicePtr<T>,
    ldb: i32,
    x: DevicePtr<T>,
    ldx: i32,
    work: DevicePtr<u8>,
    lwork: i32,
    info: DevicePtr<i32>,
) -> Status {
    run(handle, |h| {
        let work = workspace(work, lwork)?;
        h.gels(m, n, nrhs, a, lda, b, ldb, x, ldx, work, info)
    })
}

// ============================================================================
// Bidiagonal and tridiagonal reductions
// ============================================================================

/// Status form of [`Handle::gebrd_buffer_size`]
pub fn gebrd_buffer_size<T: Scalar, R: LapackOps>(
    handle: Option<&mut Handle<R>>,
    m: i32,
    n: i32,
    lwork: Option<&mut i32>,
) -> Status {
    buffer_size(handle, lwork, |h| h.gebrd_buffer_size::<T>(m, n))
}

/// Status form of [`Handle::gebrd`]
pub fn gebrd<T: Scalar, R: LapackOps>(
    handle: Option<&mut Handle<R>>,
    m: i32,
    n: i32,
    a: DevicePtr<T>,
    lda: i32,
    d: DevicePtr<T::Real>,
    e: DevicePtr<T::Real>,
    tauq: DevicePtr<T>,
    taup: DevicePtr<T>,
    work: DevicePtr<u8>,
    lwork: i32,
    info: DevicePtr<i32>,
) -> Status {
    run(handle, |h| {
        let work = workspace(work, lwork)?;
        h.gebrd(m, n, a, lda, d, e, tauq, taup, work, info)
    })
}

/// Status form of [`Handle::orgbr_buffer_size`]
pub fn orgbr_buffer_size<T: Scalar, R: LapackOps>(
    handle: Option<&mut Handle<R>>,
    side: i32,
    m: i32,
    n: i32,
    k: i32,
    lda: i32,
    lwork: Option<&mut i32>,
) -> Status {
    buffer_size(handle, lwork, |h| {
        h.orgbr_buffer_size::<T>(SideMode::try_from(side)?, m, n, k, lda)
    })
}

/// Status form of [`Handle::orgbr`]
pub fn orgbr<T: Scalar, R: LapackOps>(
    handle: Option<&mut Handle<R>>,
    side: i32,
    m: i32,
    n: i32,
    k: i32,
    a: DevicePtr<T>,
    lda: i32,
    tau: DevicePtr<T>,
    work: DevicePtr<u8>,
    lwork: i32,
    info: DevicePtr<i32>,
) -> Status {
    run(handle, |h| {
        let side = SideMode::try_from(side)?;
        h.orgbr(side, m, n, k, a, lda, tau, workspace(work, lwork)?, info)
    })
}

/// Status form of [`Handle::sytrd_buffer_size`]
pub fn sytrd_buffer_size<T: Scalar, R: LapackOps>(
    handle: Option<&mut Handle<R>>,
    uplo: i32,
    n: i32,
    lda: i32,
    lwork: Option<&mut i32>,
) -> Status {
    buffer_size(handle, lwork, |h| {
        h.sytrd_buffer_size::<T>(FillMode::try_from(uplo)?, n, lda)
    })
}

/// Status form of [`Handle::sytrd`]
pub fn sytrd<T: Scalar, R: LapackOps>(
    handle: Option<&mut Handle<R>>,
    uplo: i32,
    n: i32,
    a: DevicePtr<T>,
    lda: i32,
    d: DevicePtr<T::Real>,
    e: DevicePtr<T::Real>,
    tau: DevicePtr<T>,
    work: DevicePtr<u8>,
    lwork: i32,
    info: DevicePtr<i32>,
) -> Status {
    run(handle, |h| {
        let uplo = FillMode::try_from(uplo)?;
        h.sytrd(uplo, n, a, lda, d, e, tau, workspace(work, lwork)?, info)
    })
}

/// Status form of [`Handle::orgtr_buffer_size`]
pub fn orgtr_buffer_size<T: Scalar, R: LapackOps>(
    handle: Option<&mut Handle<R>>,
    uplo: i32,
    n: i32,
    lda: i32,
    lwork: Option<&mut i32>,
) -> Status {
    buffer_size(handle, lwork, |h| {
        h.orgtr_buffer_size::<T>(FillMode::try_from(uplo)?, n, lda)
    })
}

/// Status form of [`Handle::orgtr`]
pub fn orgtr<T: Scalar, R: LapackOps>(
    handle: Option<&mut Handle<R>>,
    uplo: i32,
    n: i32,
    a: DevicePtr<T>,
    lda: i32,
    tau: DevicePtr<T>,
    work: DevicePtr<u8>,
    lwork: i32,
    info: DevicePtr<i32>,
) -> Status {
    run(handle, |h| {
        let uplo = FillMode::try_from(uplo)?;
        h.orgtr(uplo, n, a, lda, tau, workspace(work, lwork)?, info)
    })
}

/// Status form of [`Handle::ormtr_buffer_size`]
pub fn ormtr_buffer_size<T: Scalar, R: LapackOps>(
    handle: Option<&mut Handle<R>>,
    side: i32,
    uplo: i32,
    trans: i32,
    m: i32,
    n: i32,
    lda: i32,
    ldc: i32,
    lwork: Option<&mut i32>,
) -> Status {
    buffer_size(handle, lwork, |h| {
        let side = SideMode::try_from(side)?;
        let uplo = FillMode::try_from(uplo)?;
        let trans = Operation::try_from(trans)?;
        h.ormtr_buffer_size::<T>(side, uplo, trans, m, n, lda, ldc)
    })
}

/// Status form of [`Handle::ormtr`]
pub fn ormtr<T: Scalar, R: LapackOps>(
    handle: Option<&mut Handle<R>>,
    side: i32,
    uplo: i32,
    trans: i32,
    m: i32,
    n: i32,
    a: DevicePtr<T>,
    lda: i32,
    tau: DevicePtr<T>,
    c: DevicePtr<T>,
    ldc: i32,
    work: DevicePtr<u8>,
    lwork: i32,
    info: DevicePtr<i32>,
) -> Status {
    run(handle, |h| {
        let side = SideMode::try_from(side)?;
        let uplo = FillMode::try_from(uplo)?;
        let trans = Operation::try_from(trans)?;
        let work = workspace(work, lwork)?;
        h.ormtr(side, uplo, trans, m, n, a, lda, tau, c, ldc, work, info)
    })
}

/// Status form of [`Handle::sytrf_buffer_size`]
pub fn sytrf_buffer_size<T: Scalar, R: LapackOps>(
    handle: Option<&mut Handle<R>>,
    n: i32,
    lda: i32,
    lwork: Option<&mut i32>,
) -> Status {
    buffer_size(handle, lwork, |h| h.sytrf_buffer_size::<T>(n, lda))
}

/// Status form of [`Handle::sytrf`]
pub fn sytrf<T: Scalar, R: LapackOps>(
    handle: Option<&mut Handle<R>>,
    uplo: i32,
    n: i32,
    a: DevicePtr<T>,
    lda: i32,
    ipiv: DevicePtr<i32>,
    work: DevicePtr<u8>,
    lwork: i32,
    info: DevicePtr<i32>,
) -> Status {
    run(handle, |h| {
        let uplo = FillMode::try_from(uplo)?;
        h.sytrf(uplo, n, a, lda, ipiv, workspace(work, lwork)?, info)
    })
}

// ============================================================================
// Singular value decomposition
// ============================================================================

/// Status form of [`Handle::gesvd_buffer_size`]; jobs are character codes
pub fn gesvd_buffer_size<T: Scalar, R: LapackOps>(
    handle: Option<&mut Handle<R>>,
    jobu: u8,
    jobv: u8,
    m: i32,
    n: i32,
    lwork: Option<&mut i32>,
) -> Status {
    buffer_size(handle, lwork, |h| {
        let jobu = SvdJob::try_from(jobu)?;
        let jobv = SvdJob::try_from(jobv)?;
        h.gesvd_buffer_size::<T>(jobu, jobv, m, n)
    })
}

/// Status form of [`Handle::gesvd`]
pub fn gesvd<T: Scalar, R: LapackOps>(
    handle: Option<&mut Handle<R>>,
    jobu: u8,
    jobv: u8,
    m: i32,
    n: i32,
    a: DevicePtr<T>,
    lda: i32,
    s: DevicePtr<T::Real>,
    u: DevicePtr<T>,
    ldu: i32,
    vt: DevicePtr<T>,
    ldvt: i32,
    work: DevicePtr<u8>,
    lwork: i32,
    info: DevicePtr<i32>,
) -> Status {
    run(handle, |h| {
        let jobu = SvdJob::try_from(jobu)?;
        let jobv = SvdJob::try_from(jobv)?;
        let work = workspace(work, lwork)?;
        h.gesvd(jobu, jobv, m, n, a, lda, s, u, ldu, vt, ldvt, work, info)
    })
}

/// Status form of [`Handle::gesvd_strided_batched_buffer_size`]
pub fn gesvd_strided_batched_buffer_size<T: Scalar, R: LapackOps>(
    handle: Option<&mut Handle<R>>,
    jobu: u8,
    jobv: u8,
    m: i32,
    n: i32,
    lda: i32,
    ldu: i32,
    ldvt: i32,
    lwork: Option<&mut i32>,
    batch_count: i32,
) -> Status {
    buffer_size(handle, lwork, |h| {
        let jobu = SvdJob::try_from(jobu)?;
        let jobv = SvdJob::try_from(jobv)?;
        h.gesvd_strided_batched_buffer_size::<T>(jobu, jobv, m, n, lda, ldu, ldvt, batch_count)
    })
}

/// Status form of [`Handle::gesvd_strided_batched`]
pub fn gesvd_strided_batched<T: Scalar, R: LapackOps>(
    handle: Option<&mut Handle<R>>,
    jobu: u8,
    jobv: u8,
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
    work: DevicePtr<u8>,
    lwork: i32,
    info: DevicePtr<i32>,
    batch_count: i32,
) -> Status {
    run(handle, |h| {
        let jobu = SvdJob::try_from(jobu)?;
        let jobv = SvdJob::try_from(jobv)?;
        let work = workspace(work, lwork)?;
        h.gesvd_strided_batched(
            jobu,
            jobv,
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
            work,
            info,
            batch_count,
        )
    })
}

/// Status form of [`Handle::gesvdj_buffer_size`]; `econ` is nonzero for the economy size
pub fn gesvdj_buffer_size<T: Scalar, R: LapackOps>(
    handle: Option<&mut Handle<R>>,
    jobz: i32,
    econ: i32,
    m: i32,
    n: i32,
    lda: i32,
    ldu: i32,
    lwork: Option<&mut i32>,
    params: Option<&JacobiParams>,
) -> Status {
    buffer_size(handle, lwork, |h| {
        let jobz = EigMode::try_from(jobz)?;
        let params = required_ref("params", params)?;
        h.gesvdj_buffer_size::<T>(jobz, econ != 0, m, n, lda, ldu, params)
    })
}

/// Status form of [`Handle::gesvdj`]
pub fn gesvdj<T: Scalar, R: LapackOps>(
    handle: Option<&mut Handle<R>>,
    jobz: i32,
    econ: i32,
    m: i32,
    n: i32,
    a: DevicePtr<T>,
    lda: i32,
    s: DevicePtr<T::Real>,
    u: DevicePtr<T>,
    ldu: i32,
    v: DevicePtr<T>,
    ldv: i32,
    work: DevicePtr<u8>,
    lwork: i32,
    info: DevicePtr<i32>,
    params: Option<&mut JacobiParams>,
) -> Status {
    run(handle, |h| {
        let jobz = EigMode::try_from(jobz)?;
        let params = required("params", params)?;
        let work = workspace(work, lwork)?;
        h.gesvdj(jobz, econ != 0, m, n, a, lda, s, u, ldu, v, ldv, work, info, params)
    })
}

/// Status form of [`Handle::gesvdj_batched_buffer_size`]
pub fn gesvdj_batched_buffer_size<T: Scalar, R: LapackOps>(
    handle: Option<&mut Handle<R>>,
    jobz: i32,
    m: i32,
    n: i32,
    lda: i32,
    ldu: i32,
    lwork: Option<&mut i32>,
    params: Option<&JacobiParams>,
    batch_count: i32,
) -> Status {
    buffer_size(handle, lwork, |h| {
        let jobz = EigMode::try_from(jobz)?;
        let params = required_ref("params", params)?;
        h.gesvdj_batched_buffer_size::<T>(jobz, m, n, lda, ldu, params, batch_count)
    })
}

/// Status form of [`Handle::gesvdj_batched`]
pub fn gesvdj_batched<T: Scalar, R: LapackOps>(
    handle: Option<&mut Handle<R>>,
    jobz: i32,
    m: i32,
    n: i32,
    a: DevicePtr<T>,
    lda: i32,
    s: DevicePtr<T::Real>,
    u: DevicePtr<T>,
    ldu: i32,
    v: DevicePtr<T>,
    ldv: i32,
    work: DevicePtr<u8>,
    lwork: i32,
    info: DevicePtr<i32>,
    params: Option<&mut JacobiParams>,
    batch_count: i32,
) -> Status {
    run(handle, |h| {
        let jobz = EigMode::try_from(jobz)?;
        let params = required("params", params)?;
        let work = workspace(work, lwork)?;
        h.gesvdj_batched(
            jobz,
            m,
            n,
            a,
            lda,
            s,
            u,
            ldu,
            v,
            ldv,
            work,
            info,
            params,
            batch_count,
        )
    })
}

/// Status form of [`Handle::gesvda_strided_batched_buffer_size`]
pub fn gesvda_strided_batched_buffer_size<T: Scalar, R: LapackOps>(
    handle: Option<&mut Handle<R>>,
    jobz: i32,
    rank: i32,
    m: i32,
    n: i32,
    lda: i32,
    lwork: Option<&mut i32>,
    batch_count: i32,
) -> Status {
    buffer_size(handle, lwork, |h| {
        let jobz = EigMode::try_from(jobz)?;
        h.gesvda_strided_batched_buffer_size::<T>(jobz, rank, m, n, lda, batch_count)
    })
}

/// Status form of [`Handle::gesvda_strided_batched`]
pub fn gesvda_strided_batched<T: Scalar, R: LapackOps>(
    handle: Option<&mut Handle<R>>,
    jobz: i32,
    rank: i32,
    m: i32,
    n: i32,
    a: DevicePtr<T>,
    lda: i32,
    stride_a: i64,
    work: DevicePtr<u8>,
    lwork: i32,
    info: DevicePtr<i32>,
    batch_count: i32,
) -> Status {
    run(handle, |h| {
        let jobz = EigMode::try_from(jobz)?;
        let work = workspace(work, lwork)?;
        h.gesvda_strided_batched(jobz, rank, m, n, a, lda, stride_a, work, info, batch_count)
    })
}

// ============================================================================
// Eigensolvers
// ============================================================================

/// Status form of [`Handle::syevd_buffer_size`]
pub fn syevd_buffer_size<T: Scalar, R: LapackOps>(
    handle: Option<&mut Handle<R>>,
    jobz: i32,
    uplo: i32,
    n: i32,
    lda: i32,
    lwork: Option<&mut i32>,
) -> Status {
    buffer_size(handle, lwork, |h| {
        let jobz = EigMode::try_from(jobz)?;
        let uplo = FillMode::try_from(uplo)?;
        h.syevd_buffer_size::<T>(jobz, uplo, n, lda)
    })
}

/// Status form of [`Handle::syevd`]
pub fn syevd<T: Scalar, R: LapackOps>(
    handle: Option<&mut Handle<R>>,
    jobz: i32,
    uplo: i32,
    n: i32,
    a: DevicePtr<T>,
    lda: i32,
    w: DevicePtr<T::Real>,
    work: DevicePtr<u8>,
    lwork: i32,
    info: DevicePtr<i32>,
) -> Status {
    run(handle, |h| {
        let jobz = EigMode::try_from(jobz)?;
        let uplo = FillMode::try_from(uplo)?;
        h.syevd(jobz, uplo, n, a, lda, w, workspace(work, lwork)?, info)
    })
}

/// Status form of [`Handle::sygvd_buffer_size`]
pub fn sygvd_buffer_size<T: Scalar, R: LapackOps>(
    handle: Option<&mut Handle<R>>,
    itype: i32,
    jobz: i32,
    uplo: i32,
    n: i32,
    lda: i32,
    ldb: i32,
    lwork: Option<&mut i32>,
) -> Status {
    buffer_size(handle, lwork, |h| {
        let itype = EigType::try_from(itype)?;
        let jobz = EigMode::try_from(jobz)?;
        let uplo = FillMode::try_from(uplo)?;
        h.sygvd_buffer_size::<T>(itype, jobz, uplo, n, lda, ldb)
    })
}

/// Status form of [`Handle::sygvd`]
pub fn sygvd<T: Scalar, R: LapackOps>(
    handle: Option<&mut Handle<R>>,
    itype: i32,
    jobz: i32,
    uplo: i32,
    n: i32,
    a: DevicePtr<T>,
    lda: i32,
    b: DevicePtr<T>,
    ldb: i32,
    w: DevicePtr<T::Real>,
    work: DevicePtr<u8>,
    lwork: i32,
    info: DevicePtr<i32>,
) -> Status {
    run(handle, |h| {
        let itype = EigType::try_from(itype)?;
        let jobz = EigMode::try_from(jobz)?;
        let uplo = FillMode::try_from(uplo)?;
        let work = workspace(work, lwork)?;
        h.sygvd(itype, jobz, uplo, n, a, lda, b, ldb, w, work, info)
    })
}

/// Status form of [`Handle::syevj_buffer_size`]
pub fn syevj_buffer_size<T: Scalar, R: LapackOps>(
    handle: Option<&mut Handle<R>>,
    jobz: i32,
    uplo: i32,
    n: i32,
    lda: i32,
    lwork: Option<&mut i32>,
    params: Option<&JacobiParams>,
) -> Status {
    buffer_size(handle, lwork, |h| {
        let jobz = EigMode::try_from(jobz)?;
        let uplo = FillMode::try_from(uplo)?;
        let params = required_ref("params", params)?;
        h.syevj_buffer_size::<T>(jobz, uplo, n, lda, params)
    })
}

/// Status form of [`Handle::syevj`]
pub fn syevj<T: Scalar, R: LapackOps>(
    handle: Option<&mut Handle<R>>,
    jobz: i32,
    uplo: i32,
    n: i32,
    a: DevicePtr<T>,
    lda: i32,
    w: DevicePtr<T::Real>,
    work: DevicePtr<u8>,
    lwork: i32,
    info: DevicePtr<i32>,
    params: Option<&mut JacobiParams>,
) -> Status {
    run(handle, |h| {
        let jobz = EigMode::try_from(jobz)?;
        let uplo = FillMode::try_from(uplo)?;
        let params = required("params", params)?;
        let work = workspace(work, lwork)?;
        h.syevj(jobz, uplo, n, a, lda, w, work, info, params)
    })
}

/// Status form of [`Handle::syevj_batched_buffer_size`]
pub fn syevj_batched_buffer_size<T: Scalar, R: LapackOps>(
    handle: Option<&mut Handle<R>>,
    jobz: i32,
    uplo: i32,
    n: i32,
    lda: i32,
    lwork: Option<&mut i32>,
    params: Option<&JacobiParams>,
    batch_count: i32,
) -> Status {
    buffer_size(handle, lwork, |h| {
        let jobz = EigMode::try_from(jobz)?;
        let uplo = FillMode::try_from(uplo)?;
        let params = required_ref("params", params)?;
        h.syevj_batched_buffer_size::<T>(jobz, uplo, n, lda, params, batch_count)
    })
}

/// Status form of [`Handle::syevj_batched`]
pub fn syevj_batched<T: Scalar, R: LapackOps>(
    handle: Option<&mut Handle<R>>,
    jobz: i32,
    uplo: i32,
    n: i32,
    a: DevicePtr<T>,
    lda: i32,
    w: DevicePtr<T::Real>,
    work: DevicePtr<u8>,
    lwork: i32,
    info: DevicePtr<i32>,
    params: Option<&mut JacobiParams>,
    batch_count: i32,
) -> Status {
    run(handle, |h| {
        let jobz = EigMode::try_from(jobz)?;
        let uplo = FillMode::try_from(uplo)?;
        let params = required("params", params)?;
        let work = workspace(work, lwork)?;
        h.syevj_batched(jobz, uplo, n, a, lda, w, work, info, params, batch_count)
    })
}

/// Status form of [`Handle::sygvj_buffer_size`]
pub fn sygvj_buffer_size<T: Scalar, R: LapackOps>(
    handle: Option<&mut Handle<R>>,
    itype: i32,
    jobz: i32,
    uplo: i32,
    n: i32,
    lda: i32,
    ldb: i32,
    lwork: Option<&mut i32>,
    params: Option<&JacobiParams>,
) -> Status {
    buffer_size(handle, lwork, |h| {
        let itype = EigType::try_from(itype)?;
        let jobz = EigMode::try_from(jobz)?;
        let uplo = FillMode::try_from(uplo)?;
        let params = required_ref("params", params)?;
        h.sygvj_buffer_size::<T>(itype, jobz, uplo, n, lda, ldb, params)
    })
}

/// Status form of [`Handle::sygvj`]
pub fn sygvj<T: Scalar, R: LapackOps>(
    handle: Option<&mut Handle<R>>,
    itype: i32,
    jobz: i32,
    uplo: i32,
    n: i32,
    a: DevicePtr<T>,
    lda: i32,
    b: DevicePtr<T>,
    ldb: i32,
    w: DevicePtr<T::Real>,
    work: DevicePtr<u8>,
    lwork: i32,
    info: DevicePtr<i32>,
    params: Option<&mut JacobiParams>,
) -> Status {
    run(handle, |h| {
        let itype = EigType::try_from(itype)?;
        let jobz = EigMode::try_from(jobz)?;
        let uplo = FillMode::try_from(uplo)?;
        let params = required("params", params)?;
        let work = workspace(work, lwork)?;
        h.sygvj(itype, jobz, uplo, n, a, lda, b, ldb, w, work, info, params)
    })
}

// ============================================================================
// 64-bit API
// ============================================================================

fn workspace64(work: DevicePtr<u8>, work_bytes: usize) -> Option<Workspace> {
    Workspace::new(work, work_bytes)
}

/// Status form of [`Handle::x_potrf_buffer_size`]
pub fn x_potrf_buffer_size<T: Scalar, R: LapackOps>(
    handle: Option<&mut Handle<R>>,
    uplo: i32,
    n: i64,
    lda: i64,
    device_bytes: Option<&mut usize>,
    host_bytes: Option<&mut usize>,
) -> Status {
    buffer_size64(handle, device_bytes, host_bytes, |h| {
        h.x_potrf_buffer_size::<T>(FillMode::try_from(uplo)?, n, lda)
    })
}

/// Status form of [`Handle::x_potrf`]
pub fn x_potrf<T: Scalar, R: LapackOps>(
    handle: Option<&mut Handle<R>>,
    uplo: i32,
    n: i64,
    a: DevicePtr<T>,
    lda: i64,
    work: DevicePtr<u8>,
    work_bytes: usize,
    info: DevicePtr<i32>,
) -> Status {
    run(handle, |h| {
        let uplo = FillMode::try_from(uplo)?;
        h.x_potrf(uplo, n, a, lda, workspace64(work, work_bytes), info)
    })
}

/// Status form of [`Handle::x_potrs_buffer_size`]
pub fn x_potrs_buffer_size<T: Scalar, R: LapackOps>(
    handle: Option<&mut Handle<R>>,
    uplo: i32,
    n: i64,
    nrhs: i64,
    lda: i64,
    ldb: i64,
    device_bytes: Option<&mut usize>,
    host_bytes: Option<&mut usize>,
) -> Status {
    buffer_size64(handle, device_bytes, host_bytes, |h| {
        h.x_potrs_buffer_size::<T>(FillMode::try_from(uplo)?, n, nrhs, lda, ldb)
    })
}

/// Status form of [`Handle::x_potrs`]
pub fn x_potrs<T: Scalar, R: LapackOps>(
    handle: Option<&mut Handle<R>>,
    uplo: i32,
    n: i64,
    nrhs: i64,
    a: DevicePtr<T>,
    lda: i64,
    b: DevicePtr<T>,
    ldb: i64,
    work: DevicePtr<u8>,
    work_bytes: usize,
    info: DevicePtr<i32>,
) -> Status {
    run(handle, |h| {
        let uplo = FillMode::try_from(uplo)?;
        let work = workspace64(work, work_bytes);
        h.x_potrs(uplo, n, nrhs, a, lda, b, ldb, work, info)
    })
}

/// Status form of [`Handle::x_getrf_buffer_size`]
pub fn x_getrf_buffer_size<T: Scalar, R: LapackOps>(
    handle: Option<&mut Handle<R>>,
    m: i64,
    n: i64,
    lda: i64,
    device_bytes: Option<&mut usize>,
    host_bytes: Option<&mut usize>,
) -> Status {
    buffer_size64(handle, device_bytes, host_bytes, |h| {
        h.x_getrf_buffer_size::<T>(m, n, lda)
    })
}

/// Status form of [`Handle::x_getrf`]
pub fn x_getrf<T: Scalar, R: LapackOps>(
    handle: Option<&mut Handle<R>>,
    m: i64,
    n: i64,
    a: DevicePtr<T>,
    lda: i64,
    ipiv: DevicePtr<i32>,
    work: DevicePtr<u8>,
    work_bytes: usize,
    info: DevicePtr<i32>,
) -> Status {
    run(handle, |h| {
        h.x_getrf(m, n, a, lda, ipiv, workspace64(work, work_bytes), info)
    })
}

/// Status form of [`Handle::x_getrs_buffer_size`]
pub fn x_getrs_buffer_size<T: Scalar, R: LapackOps>(
    handle: Option<&mut Handle<R>>,
    trans: i32,
    n: i64,
    nrhs: i64,
    lda: i64,
    ldb: i64,
    device_bytes: Option<&mut usize>,
    host_bytes: Option<&mut usize>,
) -> Status {
    buffer_size64(handle, device_bytes, host_bytes, |h| {
        h.x_getrs_buffer_size::<T>(Operation::try_from(trans)?, n, nrhs, lda, ldb)
    })
}

/// Status form of [`Handle::x_getrs`]
pub fn x_getrs<T: Scalar, R: LapackOps>(
    handle: Option<&mut Handle<R>>,
    trans: i32,
    n: i64,
    nrhs: i64,
    a: DevicePtr<T>,
    lda: i64,
    ipiv: DevicePtr<i32>,
    b: DevicePtr<T>,
    ldb: i64,
    work: DevicePtr<u8>,
    work_bytes: usize,
    info: DevicePtr<i32>,
) -> Status {
    run(handle, |h| {
        let trans = Operation::try_from(trans)?;
        let work = workspace64(work, work_bytes);
        h.x_getrs(trans, n, nrhs, a, lda, ipiv, b, ldb, work, info)
    })
}

/// Status form of [`Handle::x_geqrf_buffer_size`]
pub fn x_geqrf_buffer_size<T: Scalar, R: LapackOps>(
    handle: Option<&mut Handle<R>>,
    m: i64,
    n: i64,
    lda: i64,
    device_bytes: Option<&mut usize>,
    host_bytes: Option<&mut usize>,
) -> Status {
    buffer_size64(handle, device_bytes, host_bytes, |h| {
        h.x_geqrf_buffer_size::<T>(m, n, lda)
    })
}

/// Status form of [`Handle::x_geqrf`]
pub fn x_geqrf<T: Scalar, R: LapackOps>(
    handle: Option<&mut Handle<R>>,
    m: i64,
    n: i64,
    a: DevicePtr<T>,
    lda: i64,
    tau: DevicePtr<T>,
    work: DevicePtr<u8>,
    work_bytes: usize,
    info: DevicePtr<i32>,
) -> Status {
    run(handle, |h| {
        h.x_geqrf(m, n, a, lda, tau, workspace64(work, work_bytes), info)
    })
}

/// Status form of [`Handle::x_syevd_buffer_size`]
pub fn x_syevd_buffer_size<T: Scalar, R: LapackOps>(
    handle: Option<&mut Handle<R>>,
    jobz: i32,
    uplo: i32,
    n: i64,
    lda: i64,
    device_bytes: Option<&mut usize>,
    host_bytes: Option<&mut usize>,
) -> Status {
    buffer_size64(handle, device_bytes, host_bytes, |h| {
        let jobz = EigMode::try_from(jobz)?;
        let uplo = FillMode::try_from(uplo)?;
        h.x_syevd_buffer_size::<T>(jobz, uplo, n, lda)
    })
}

/// Status form of [`Handle::x_syevd`]
pub fn x_syevd<T: Scalar, R: LapackOps>(
    handle: Option<&mut Handle<R>>,
    jobz: i32,
    uplo: i32,
    n: i64,
    a: DevicePtr<T>,
    lda: i64,
    w: DevicePtr<T::Real>,
    work: DevicePtr<u8>,
    work_bytes: usize,
    info: DevicePtr<i32>,
) -> Status {
    run(handle, |h| {
        let jobz = EigMode::try_from(jobz)?;
        let uplo = FillMode::try_from(uplo)?;
        h.x_syevd(jobz, uplo, n, a, lda, w, workspace64(work, work_bytes), info)
    })
}

/// Status form of [`Handle::x_gesvd_buffer_size`]
pub fn x_gesvd_buffer_size<T: Scalar, R: LapackOps>(
    handle: Option<&mut Handle<R>>,
    jobu: u8,
    jobv: u8,
    m: i64,
    n: i64,
    device_bytes: Option<&mut usize>,
    host_bytes: Option<&mut usize>,
) -> Status {
    buffer_size64(handle, device_bytes, host_bytes, |h| {
        let jobu = SvdJob::try_from(jobu)?;
        let jobv = SvdJob::try_from(jobv)?;
        h.x_gesvd_buffer_size::<T>(jobu, jobv, m, n)
    })
}

/// Status form of [`Handle::x_gesvd`]
pub fn x_gesvd<T: Scalar, R: LapackOps>(
    handle: Option<&mut Handle<R>>,
    jobu: u8,
    jobv: u8,
    m: i64,
    n: i64,
    a: DevicePtr<T>,
    lda: i64,
    s: DevicePtr<T::Real>,
    u: DevicePtr<T>,
    ldu: i64,
    vt: DevicePtr<T>,
    ldvt: i64,
    work: DevicePtr<u8>,
    work_bytes: usize,
    info: DevicePtr<i32>,
) -> Status {
    run(handle, |h| {
        let jobu = SvdJob::try_from(jobu)?;
        let jobv = SvdJob::try_from(jobv)?;
        let work = workspace64(work, work_bytes);
        h.x_gesvd(jobu, jobv, m, n, a, lda, s, u, ldu, vt, ldvt, work, info)
    })
}
