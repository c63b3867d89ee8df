//! Integration tests for workspace sizing and provision
//!
//! Tests verify:
//! - Size queries are deterministic and include the auxiliary arrays
//! - Empty problems collapse the auxiliary arrays they do not need
//! - Auxiliary sizes that overflow the address space are internal errors
//! - 32-bit size queries fail when the size does not fit; 64-bit ones do not
//! - The standing reservation only grows, and matches the reported size
//! - Allocation failures surface before any routine runs

mod common;

use common::{
    alloc, alloc_info, caller_workspace, create_handle, create_limited_handle, read_info, upload,
};
use dnsolver::dtype::Complex128;
use dnsolver::error::Error;
use dnsolver::handle::{Handle, MemoryMode};
use dnsolver::runtime::host::HostRuntime;
use dnsolver::runtime::{DevicePtr, LapackOps, RtEsort, RtSvect, Runtime};
use dnsolver::types::{EigMode, EigType, FillMode, JacobiParams, SvdJob};
use dnsolver::workspace::{Workspace, WorkspaceLayout};

// ============================================================================
// Size queries
// ============================================================================

#[test]
fn test_buffer_size_is_deterministic() {
    let mut handle = create_handle();
    let first = handle
        .syevd_buffer_size::<f64>(EigMode::Vector, FillMode::Lower, 17, 17)
        .unwrap();
    let second = handle
        .syevd_buffer_size::<f64>(EigMode::Vector, FillMode::Lower, 17, 17)
        .unwrap();
    assert_eq!(first, second);
    assert!(first > 0);
    // a query never touches the reservation
    assert_eq!(handle.reservation(), 0);
}

#[test]
fn test_syevd_size_includes_off_diagonal() {
    let mut handle = create_handle();
    let n = 8;
    let lwork = handle
        .syevd_buffer_size::<f64>(EigMode::Vector, FillMode::Upper, n, n)
        .unwrap();
    let base = handle
        .workspace_bytes(&WorkspaceLayout::new("syevd"), |rt| {
            rt.syevd::<f64>(
                EigMode::Vector.into(),
                FillMode::Upper.into(),
                n,
                DevicePtr::null(),
                n,
                DevicePtr::null(),
                DevicePtr::null(),
                DevicePtr::null(),
            )
        })
        .unwrap();
    // E holds n = 8 doubles, one 64-byte span
    assert_eq!(lwork as usize, base + 64);
}

#[test]
fn test_vcopy_only_in_vector_mode() {
    let mut handle = create_handle();
    let params = JacobiParams::new();
    let with_vectors = handle
        .gesvdj_buffer_size::<f64>(EigMode::Vector, false, 3, 3, 3, 3, &params)
        .unwrap();
    let without = handle
        .gesvdj_buffer_size::<f64>(EigMode::NoVector, false, 3, 3, 3, 3, &params)
        .unwrap();
    // 3 x 3 doubles round up to 128 bytes
    assert_eq!(with_vectors - without, 128);
}

#[test]
fn test_empty_problem_sizes() {
    let mut handle = create_handle();
    let params = JacobiParams::new();
    let vectors = handle
        .gesvdj_buffer_size::<f64>(EigMode::Vector, false, 0, 0, 1, 1, &params)
        .unwrap();
    let no_vectors = handle
        .gesvdj_buffer_size::<f64>(EigMode::NoVector, false, 0, 0, 1, 1, &params)
        .unwrap();
    assert_eq!(vectors, no_vectors);

    let gesvd = handle
        .gesvd_buffer_size::<f64>(SvdJob::All, SvdJob::All, 0, 0)
        .unwrap();
    let base = handle
        .workspace_bytes(&WorkspaceLayout::new("gesvd"), |rt| {
            rt.gesvd::<f64>(
                SvdJob::All.into(),
                SvdJob::All.into(),
                0,
                0,
                DevicePtr::null(),
                1,
                DevicePtr::null(),
                DevicePtr::null(),
                1,
                DevicePtr::null(),
                1,
                DevicePtr::null(),
                dnsolver::runtime::RtWorkmode::OutOfPlace,
                DevicePtr::null(),
            )
        })
        .unwrap();
    assert_eq!(gesvd as usize, base);
}

#[test]
fn test_empty_jacobi_sizes_equal_runtime_size() {
    let mut handle = create_handle();
    let params = JacobiParams::new();
    let null = DevicePtr::<f64>::null();

    let gesvdj_base = handle
        .workspace_bytes(&WorkspaceLayout::new("gesvdj"), |rt| {
            rt.gesvdj::<f64>(
                RtSvect::All,
                RtSvect::All,
                0,
                0,
                null,
                1,
                0.0,
                null,
                params.max_sweeps(),
                DevicePtr::null(),
                null,
                null,
                1,
                null,
                1,
                DevicePtr::null(),
            )
        })
        .unwrap();
    for jobz in [EigMode::Vector, EigMode::NoVector] {
        let lwork = handle
            .gesvdj_buffer_size::<f64>(jobz, false, 0, 0, 1, 1, &params)
            .unwrap();
        assert_eq!(lwork as usize, gesvdj_base, "gesvdj {jobz:?}");
    }

    let syevj_base = handle
        .workspace_bytes(&WorkspaceLayout::new("syevj"), |rt| {
            rt.syevj::<f64>(
                RtEsort::Ascending,
                EigMode::Vector.into(),
                FillMode::Lower.into(),
                0,
                null,
                1,
                0.0,
                null,
                params.max_sweeps(),
                DevicePtr::null(),
                null,
                DevicePtr::null(),
            )
        })
        .unwrap();
    let syevj = handle
        .syevj_buffer_size::<f64>(EigMode::Vector, FillMode::Lower, 0, 1, &params)
        .unwrap();
    assert_eq!(syevj as usize, syevj_base);

    let sygvj_base = handle
        .workspace_bytes(&WorkspaceLayout::new("sygvj"), |rt| {
            rt.sygvj::<f64>(
                EigType::Type1.into(),
                EigMode::Vector.into(),
                FillMode::Lower.into(),
                0,
                null,
                1,
                null,
                1,
                0.0,
                null,
                params.max_sweeps(),
                DevicePtr::null(),
                null,
                DevicePtr::null(),
            )
        })
        .unwrap();
    let sygvj = handle
        .sygvj_buffer_size::<f64>(
            EigType::Type1,
            EigMode::Vector,
            FillMode::Lower,
            0,
            1,
            1,
            &params,
        )
        .unwrap();
    assert_eq!(sygvj as usize, sygvj_base);
}

#[test]
fn test_empty_jacobi_records_zero_results() {
    let mut handle = create_handle();
    let mut params = JacobiParams::new();
    let info = upload(&mut handle, &[7i32]);
    handle
        .syevj::<f64>(
            EigMode::Vector,
            FillMode::Lower,
            0,
            DevicePtr::null(),
            1,
            DevicePtr::null(),
            None,
            info,
            &mut params,
        )
        .unwrap();
    assert_eq!(read_info(&handle, info), 0);
    assert_eq!(handle.syevj_residual(&params).unwrap(), 0.0);
    assert_eq!(handle.syevj_sweeps(&params).unwrap(), 0);
}

#[test]
fn test_oversized_auxiliary_arrays_are_internal_errors() {
    let mut handle = create_handle();
    let params = JacobiParams::new();
    // 65536 x 65536 V copies for i32::MAX problems overflow the byte count
    let err = handle
        .gesvdj_batched_buffer_size::<f64>(EigMode::Vector, 1, 65536, 1, 1, &params, i32::MAX)
        .unwrap_err();
    assert!(matches!(err, Error::InternalError(_)), "{err:?}");
    assert!(!handle.runtime().is_memory_size_query());

    // ... and here the element count itself overflows
    let err = handle
        .gesvdj_batched_buffer_size::<Complex128>(
            EigMode::Vector,
            1,
            i32::MAX,
            1,
            1,
            &params,
            i32::MAX,
        )
        .unwrap_err();
    assert!(matches!(err, Error::InternalError(_)), "{err:?}");

    let mut params = params;
    let err = handle
        .gesvdj_batched::<f64>(
            EigMode::Vector,
            1,
            65536,
            DevicePtr::null(),
            1,
            DevicePtr::null(),
            DevicePtr::null(),
            1,
            DevicePtr::null(),
            65536,
            None,
            DevicePtr::null(),
            &mut params,
            i32::MAX,
        )
        .unwrap_err();
    assert!(matches!(err, Error::InternalError(_)), "{err:?}");
    assert_eq!(handle.reservation(), 0);
}

#[test]
fn test_32_bit_size_overflow() {
    let mut handle = create_handle();
    let n = 20_000;
    let err = handle
        .syevd_buffer_size::<f64>(EigMode::Vector, FillMode::Lower, n, n)
        .unwrap_err();
    assert!(matches!(err, Error::InternalError(_)));

    let (device, host) = handle
        .x_syevd_buffer_size::<f64>(EigMode::Vector, FillMode::Lower, 20_000, 20_000)
        .unwrap();
    // n*n doubles of runtime scratch plus n doubles of E
    assert_eq!(device, 3_200_000_000 + 160_000);
    assert_eq!(host, 0);
}

#[test]
fn test_64_bit_dimension_out_of_range() {
    let mut handle = create_handle();
    let err = handle
        .x_potrf_buffer_size::<f64>(FillMode::Lower, 1 << 40, 1 << 40)
        .unwrap_err();
    assert!(matches!(err, Error::InvalidValue { arg: "n", .. }));
}

// ============================================================================
// Reservation
// ============================================================================

fn run_syevd(handle: &mut Handle<HostRuntime>, n: usize) {
    let mut a = vec![0.0f64; n * n];
    for i in 0..n {
        a[i + i * n] = (i + 1) as f64;
    }
    let a = upload(handle, &a);
    let w = alloc::<f64>(handle, n);
    let info = alloc_info(handle);
    let n = n as i32;
    handle
        .syevd(EigMode::Vector, FillMode::Lower, n, a, n, w, None, info)
        .unwrap();
}

#[test]
fn test_reservation_only_grows() {
    let mut handle = create_handle();
    run_syevd(&mut handle, 16);
    let after_large = handle.reservation();
    assert!(after_large > 0);
    assert_eq!(handle.memory_mode(), MemoryMode::LibraryManaged);

    run_syevd(&mut handle, 4);
    assert_eq!(handle.reservation(), after_large);

    run_syevd(&mut handle, 24);
    assert!(handle.reservation() > after_large);
}

#[test]
fn test_sygvj_reserves_reported_size() {
    let mut handle = create_handle();
    let n = 3usize;
    let params = JacobiParams::new();
    let lwork = handle
        .sygvj_buffer_size::<f64>(
            EigType::Type1,
            EigMode::Vector,
            FillMode::Lower,
            n as i32,
            n as i32,
            n as i32,
            &params,
        )
        .unwrap();

    let mut eye = vec![0.0f64; n * n];
    for i in 0..n {
        eye[i + i * n] = 1.0;
    }
    let a = upload(&mut handle, &[2.0, 1.0, 0.0, 1.0, 2.0, 0.0, 0.0, 0.0, 1.0]);
    let b = upload(&mut handle, &eye);
    let w = alloc::<f64>(&mut handle, n);
    let info = alloc_info(&mut handle);
    let mut params = params;
    handle
        .sygvj(
            EigType::Type1,
            EigMode::Vector,
            FillMode::Lower,
            n as i32,
            a,
            n as i32,
            b,
            n as i32,
            w,
            None,
            info,
            &mut params,
        )
        .unwrap();
    assert_eq!(handle.reservation(), lwork as usize);
    assert!(handle.syevj_residual(&params).is_ok());
}

#[test]
fn test_alloc_failure_before_dispatch() {
    let mut handle = create_limited_handle(4096);
    let n = 32;
    let err = handle
        .syevd::<f64>(
            EigMode::Vector,
            FillMode::Lower,
            n,
            DevicePtr::null(),
            n,
            DevicePtr::null(),
            None,
            DevicePtr::null(),
        )
        .unwrap_err();
    // 32 x 32 doubles of runtime scratch plus 32 doubles of E
    assert_eq!(err, Error::AllocFailed { bytes: 8192 + 256 });
    assert_eq!(handle.reservation(), 0);
    assert_eq!(handle.memory_mode(), MemoryMode::LibraryManaged);
}

// ============================================================================
// Caller workspace
// ============================================================================

#[test]
fn test_caller_workspace_leaves_reservation_alone() {
    let mut handle = create_handle();
    let lwork = handle
        .syevd_buffer_size::<f64>(EigMode::Vector, FillMode::Lower, 3, 3)
        .unwrap();
    let work = caller_workspace(&mut handle, lwork);
    let a = upload(&mut handle, &[1.0f64, 0.0, 0.0, 0.0, 2.0, 0.0, 0.0, 0.0, 3.0]);
    let w = alloc::<f64>(&mut handle, 3);
    let info = alloc_info(&mut handle);
    handle
        .syevd(EigMode::Vector, FillMode::Lower, 3, a, 3, w, work, info)
        .unwrap();
    assert_eq!(handle.reservation(), 0);
    assert_eq!(handle.memory_mode(), MemoryMode::CallerManaged);
}

#[test]
fn test_caller_workspace_too_small() {
    let mut handle = create_handle();
    let mut params = JacobiParams::new();
    // the residual and sweep arrays alone need 128 bytes
    let work = caller_workspace(&mut handle, 64);
    let err = handle
        .gesvdj::<f64>(
            EigMode::NoVector,
            false,
            2,
            2,
            DevicePtr::null(),
            2,
            DevicePtr::null(),
            DevicePtr::null(),
            2,
            DevicePtr::null(),
            2,
            work,
            DevicePtr::null(),
            &mut params,
        )
        .unwrap_err();
    assert!(matches!(err, Error::InvalidValue { arg: "lwork", .. }));
}

/// gesvdj of diag(2, 3, 1) on a runtime aligning scratch to `align` bytes
fn run_gesvdj_aligned(align: usize, caller: bool) -> (i32, Handle<HostRuntime>) {
    common::init_tracing();
    let mut handle = Handle::new(HostRuntime::builder().alignment(align).build());
    let mut params = JacobiParams::new();
    let lwork = handle
        .gesvdj_buffer_size::<f64>(EigMode::Vector, false, 3, 3, 3, 3, &params)
        .unwrap();
    let work = if caller {
        caller_workspace(&mut handle, lwork)
    } else {
        None
    };
    let a = upload(&mut handle, &[2.0f64, 0.0, 0.0, 0.0, 3.0, 0.0, 0.0, 0.0, 1.0]);
    let s = alloc::<f64>(&mut handle, 3);
    let u = alloc::<f64>(&mut handle, 9);
    let v = alloc::<f64>(&mut handle, 9);
    let info = alloc_info(&mut handle);
    handle
        .gesvdj(EigMode::Vector, false, 3, 3, a, 3, s, u, 3, v, 3, work, info, &mut params)
        .unwrap();
    assert_eq!(read_info(&handle, info), 0);
    let s = common::download(&handle, s, 3);
    common::assert_allclose_f64(&s, &[3.0, 2.0, 1.0], 1e-12, 1e-12, "aligned gesvdj");
    (lwork, handle)
}

#[test]
fn test_wide_runtime_alignment() {
    let (narrow, _) = run_gesvdj_aligned(64, true);
    let (wide, handle) = run_gesvdj_aligned(256, true);
    assert_eq!(handle.memory_mode(), MemoryMode::CallerManaged);
    // the runtime rounds every auxiliary span to its own alignment
    assert!(wide > narrow);
    assert_eq!(wide % 256, 0);

    let (lwork, handle) = run_gesvdj_aligned(256, false);
    assert_eq!(handle.reservation(), lwork as usize);
    assert_eq!(handle.runtime().scratch_in_use(), 0);
}

#[test]
fn test_negative_lwork_rejected() {
    let err = Workspace::from_raw(DevicePtr::from_addr(0x1000), -8).unwrap_err();
    assert!(matches!(err, Error::InvalidValue { .. }));
    assert_eq!(Workspace::from_raw(DevicePtr::null(), 128).unwrap(), None);
}
