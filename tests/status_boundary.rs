//! Integration tests for the status-code surface
//!
//! Tests verify:
//! - Argument checks fire before any runtime call
//! - Raw enum codes and job characters are validated
//! - Entry points without an implementation report `NotSupported`
//! - Success paths write `lwork` and device results

mod common;

use common::{alloc, alloc_info, create_handle, download, read_info, upload};
use dnsolver::convert::{check, status_from_runtime};
use dnsolver::dn;
use dnsolver::error::{Error, Status};
use dnsolver::runtime::host::HostRuntime;
use dnsolver::runtime::{DevicePtr, RtEvect, RtFill, RtOperation, RtStatus, Runtime};
use dnsolver::types::{EigMode, EigType, FillMode, Operation, SideMode, SvdJob};

const LOWER: i32 = 122;
const VECTOR: i32 = 202;

// ============================================================================
// Argument checks
// ============================================================================

#[test]
fn test_null_handle_and_lwork() {
    let mut lwork = 7;
    let status =
        dn::syevd_buffer_size::<f64, HostRuntime>(None, VECTOR, LOWER, 4, 4, Some(&mut lwork));
    assert_eq!(status, Status::NotInitialized);
    // nothing was written without a handle
    assert_eq!(lwork, 7);

    let mut handle = create_handle();
    let status = dn::syevd_buffer_size::<f64, _>(Some(&mut handle), VECTOR, LOWER, 4, 4, None);
    assert_eq!(status, Status::InvalidValue);
    assert_eq!(handle.runtime().calls(), 0);

    let mut device = 0usize;
    let status =
        dn::x_getrf_buffer_size::<f64, _>(Some(&mut handle), 4, 4, 4, Some(&mut device), None);
    assert_eq!(status, Status::InvalidValue);
    assert_eq!(handle.runtime().calls(), 0);
}

#[test]
fn test_bad_enum_codes() {
    let mut handle = create_handle();
    let mut lwork = 99;
    let status =
        dn::syevd_buffer_size::<f64, _>(Some(&mut handle), 0, LOWER, 4, 4, Some(&mut lwork));
    assert_eq!(status, Status::InvalidEnum);
    assert_eq!(lwork, 0);

    let status =
        dn::gesvd_buffer_size::<f64, _>(Some(&mut handle), b'X', b'A', 4, 4, Some(&mut lwork));
    assert_eq!(status, Status::InvalidValue);

    let status =
        dn::gesvd_buffer_size::<f64, _>(Some(&mut handle), b's', b'n', 4, 4, Some(&mut lwork));
    assert_eq!(status, Status::Success);
    assert!(lwork > 0);
}

#[test]
fn test_missing_jacobi_params() {
    let mut handle = create_handle();
    let mut lwork = 0;
    let status = dn::syevj_buffer_size::<f64, _>(
        Some(&mut handle),
        VECTOR,
        LOWER,
        3,
        3,
        Some(&mut lwork),
        None,
    );
    assert_eq!(status, Status::InvalidValue);
}

#[test]
fn test_invalid_dimensions_from_runtime() {
    let mut handle = create_handle();
    let mut lwork = 0;
    // lda < n
    let status = dn::potrf_buffer_size::<f64, _>(Some(&mut handle), LOWER, 4, 2, Some(&mut lwork));
    assert_eq!(status, Status::InvalidValue);
    // the size-query bracket was closed despite the failure
    assert!(!handle.runtime().is_memory_size_query());
}

// ============================================================================
// Unsupported entry points
// ============================================================================

#[test]
fn test_gesvda_not_supported() {
    let mut handle = create_handle();
    let mut lwork = 5;
    let status = dn::gesvda_strided_batched_buffer_size::<f64, _>(
        Some(&mut handle),
        VECTOR,
        2,
        4,
        4,
        4,
        Some(&mut lwork),
        1,
    );
    assert_eq!(status, Status::NotSupported);
    assert_eq!(lwork, 0);

    let status = dn::gesvda_strided_batched::<f64, _>(
        Some(&mut handle),
        VECTOR,
        2,
        4,
        4,
        DevicePtr::null(),
        4,
        16,
        DevicePtr::null(),
        0,
        DevicePtr::null(),
        1,
    );
    assert_eq!(status, Status::NotSupported);
}

#[test]
fn test_reductions_size_but_do_not_execute() {
    let mut handle = create_handle();
    let mut lwork = 0;
    let status = dn::sytrd_buffer_size::<f64, _>(Some(&mut handle), LOWER, 4, 4, Some(&mut lwork));
    assert_eq!(status, Status::Success);
    assert!(lwork > 0);

    let status = dn::sytrd::<f64, _>(
        Some(&mut handle),
        LOWER,
        4,
        DevicePtr::null(),
        4,
        DevicePtr::null(),
        DevicePtr::null(),
        DevicePtr::null(),
        DevicePtr::null(),
        0,
        DevicePtr::null(),
    );
    assert_eq!(status, Status::NotSupported);
}

// ============================================================================
// Success paths
// ============================================================================

#[test]
fn test_potrf_through_status_surface() {
    let mut handle = create_handle();
    let a = upload(&mut handle, &[4.0f64, 2.0, 2.0, 5.0]);
    let info = alloc_info(&mut handle);
    let mut lwork = 0;
    assert_eq!(
        dn::potrf_buffer_size::<f64, _>(Some(&mut handle), LOWER, 2, 2, Some(&mut lwork)),
        Status::Success
    );
    let work = handle
        .runtime_mut()
        .allocate(lwork as usize)
        .expect("device allocation");
    assert_eq!(
        dn::potrf(Some(&mut handle), LOWER, 2, a, 2, work, lwork, info),
        Status::Success
    );
    assert_eq!(read_info(&handle, info), 0);
    let l = download(&handle, a, 4);
    assert!((l[0] - 2.0).abs() < 1e-12);
    assert!((l[1] - 1.0).abs() < 1e-12);
    assert!((l[3] - 2.0).abs() < 1e-12);
}

#[test]
fn test_syevj_through_status_surface() {
    let mut handle = create_handle();
    let mut params = dn::create_jacobi_info();
    assert_eq!(dn::jacobi_set_tolerance(Some(&mut params), 1e-12), Status::Success);
    let a = upload(&mut handle, &[2.0f64, 1.0, 1.0, 2.0]);
    let w = alloc::<f64>(&mut handle, 2);
    let info = alloc_info(&mut handle);
    let status = dn::syevj(
        Some(&mut handle),
        VECTOR,
        LOWER,
        2,
        a,
        2,
        w,
        DevicePtr::null(),
        0,
        info,
        Some(&mut params),
    );
    assert_eq!(status, Status::Success);
    let w = download(&handle, w, 2);
    assert!((w[0] - 1.0).abs() < 1e-10 && (w[1] - 3.0).abs() < 1e-10);

    let mut sweeps = 0;
    assert_eq!(
        dn::syevj_get_sweeps(Some(&handle), Some(&params), Some(&mut sweeps)),
        Status::Success
    );
    assert!(sweeps >= 1);
}

// ============================================================================
// Translation
// ============================================================================

#[test]
fn test_enum_codes_round_trip() {
    for &op in Operation::ALL {
        assert_eq!(Operation::try_from(op.code()), Ok(op));
        assert_eq!(Operation::try_from(RtOperation::from(op)), Ok(op));
    }
    for &fill in FillMode::ALL {
        assert_eq!(FillMode::try_from(RtFill::from(fill)), Ok(fill));
    }
    for &side in SideMode::ALL {
        assert_eq!(SideMode::try_from(side.code()), Ok(side));
    }
    for &mode in EigMode::ALL {
        assert_eq!(EigMode::try_from(RtEvect::from(mode)), Ok(mode));
    }
    for &itype in EigType::ALL {
        assert_eq!(EigType::try_from(itype.code()), Ok(itype));
    }
    for &job in SvdJob::ALL {
        assert_eq!(SvdJob::try_from(job.as_char()), Ok(job));
    }
    assert_eq!(
        FillMode::try_from(RtFill::Full),
        Err(Error::InvalidEnum { name: "RtFill", value: RtFill::Full as i32 })
    );
}

#[test]
fn test_status_translation() {
    assert_eq!(status_from_runtime(RtStatus::SizeIncreased), Status::Success);
    assert_eq!(status_from_runtime(RtStatus::SizeUnchanged), Status::Success);
    assert_eq!(status_from_runtime(RtStatus::MemoryError), Status::AllocFailed);
    assert_eq!(status_from_runtime(RtStatus::Continue), Status::Unknown);
    assert!(check(RtStatus::Success).is_ok());
    assert_eq!(check(RtStatus::InvalidHandle).unwrap_err().status(), Status::NotInitialized);
}
