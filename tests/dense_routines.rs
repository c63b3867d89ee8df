//! Integration tests for the dense routine families on the host runtime
//!
//! Tests verify:
//! - Solves: Cholesky, LU (pivoted and 64-bit), least squares
//! - In-place and out-of-place drivers give identical results
//! - Eigensolvers: eigenvalues, orthonormal eigenvectors, A V = V diag(w)
//! - Jacobi SVD: reconstruction A = U diag(S) V^H, economy and full size
//! - Caller workspaces sized exactly by the buffer-size query, for every
//!   family that carves auxiliary arrays out of the buffer
//!
//! Every caller workspace is allocated at exactly the queried size; the host
//! runtime's unmapped gaps turn any overrun into an error.

mod common;

use common::{
    alloc, alloc_info, assert_allclose_f32, assert_allclose_f64, caller_workspace, create_handle,
    download, matmul, read_info, tolerance_for_dtype, transpose, upload,
};
use dnsolver::dtype::{Complex128, DType};
use dnsolver::error::Error;
use dnsolver::runtime::DevicePtr;
use dnsolver::types::{EigMode, EigType, FillMode, JacobiParams, Operation, SvdJob};

fn assert_orthonormal(v: &[f64], n: usize, msg: &str) {
    let vtv = matmul(&transpose(v, n, n), v, n);
    let mut eye = vec![0.0; n * n];
    for i in 0..n {
        eye[i + i * n] = 1.0;
    }
    assert_allclose_f64(&vtv, &eye, 0.0, 1e-10, msg);
}

// ============================================================================
// Linear solves
// ============================================================================

#[test]
fn test_potrf_potrs_solve() {
    let mut handle = create_handle();
    let a = upload(&mut handle, &[4.0f64, 2.0, 2.0, 3.0]);
    let b = upload(&mut handle, &[2.0f64, 1.0]);
    let info = alloc_info(&mut handle);

    let lwork = handle.potrf_buffer_size::<f64>(FillMode::Lower, 2, 2).unwrap();
    let work = caller_workspace(&mut handle, lwork);
    handle.potrf(FillMode::Lower, 2, a, 2, work, info).unwrap();
    assert_eq!(read_info(&handle, info), 0);

    let lwork = handle
        .potrs_buffer_size::<f64>(FillMode::Lower, 2, 1, 2, 2)
        .unwrap();
    let work = caller_workspace(&mut handle, lwork);
    handle
        .potrs(FillMode::Lower, 2, 1, a, 2, b, 2, work, info)
        .unwrap();
    assert_eq!(read_info(&handle, info), 0);
    assert_allclose_f64(&download(&handle, b, 2), &[0.5, 0.0], 1e-12, 1e-12, "potrs");
}

#[test]
fn test_potrf_reports_indefinite_minor() {
    let mut handle = create_handle();
    let a = upload(&mut handle, &[1.0f64, 2.0, 2.0, 1.0]);
    let info = alloc_info(&mut handle);
    handle.potrf(FillMode::Upper, 2, a, 2, None, info).unwrap();
    assert_eq!(read_info(&handle, info), 2);
}

#[test]
fn test_getrf_getrs_with_pivoting() {
    let mut handle = create_handle();
    // [[0, 1], [2, 3]] needs a row swap
    let a = upload(&mut handle, &[0.0f64, 2.0, 1.0, 3.0]);
    let b = upload(&mut handle, &[1.0f64, 5.0]);
    let ipiv = alloc::<i32>(&mut handle, 2);
    let info = alloc_info(&mut handle);

    let lwork = handle.getrf_buffer_size::<f64>(2, 2, 2).unwrap();
    let work = caller_workspace(&mut handle, lwork);
    handle.getrf(2, 2, a, 2, work, ipiv, info).unwrap();
    assert_eq!(read_info(&handle, info), 0);
    assert_eq!(download(&handle, ipiv, 2)[0], 2);

    handle
        .getrs(Operation::N, 2, 1, a, 2, ipiv, b, 2, None, info)
        .unwrap();
    assert_allclose_f64(&download(&handle, b, 2), &[1.0, 1.0], 1e-12, 1e-12, "getrs");
}

#[test]
fn test_x_getrf_matches_getrf() {
    let mut handle = create_handle();
    let data = [4.0f64, 6.0, 3.0, 3.0];
    let a32 = upload(&mut handle, &data);
    let a64 = upload(&mut handle, &data);
    let ipiv32 = alloc::<i32>(&mut handle, 2);
    let ipiv64 = alloc::<i32>(&mut handle, 2);
    let info = alloc_info(&mut handle);

    handle.getrf(2, 2, a32, 2, None, ipiv32, info).unwrap();
    handle.x_getrf(2, 2, a64, 2, ipiv64, None, info).unwrap();
    assert_eq!(download(&handle, a32, 4), download(&handle, a64, 4));
    assert_eq!(download(&handle, ipiv32, 2), download(&handle, ipiv64, 2));
}

#[test]
fn test_getrf_without_pivots() {
    let mut handle = create_handle();
    let a = upload(&mut handle, &[2.0f64, 4.0, 1.0, 3.0]);
    let info = alloc_info(&mut handle);
    handle
        .getrf(2, 2, a, 2, None, DevicePtr::null(), info)
        .unwrap();
    assert_eq!(read_info(&handle, info), 0);
    // L = [[1, 0], [2, 1]], U = [[2, 1], [0, 1]]
    assert_allclose_f64(
        &download(&handle, a, 4),
        &[2.0, 2.0, 1.0, 1.0],
        1e-12,
        1e-12,
        "getrf_npvt",
    );
}

#[test]
fn test_gesv_in_place_matches_out_of_place() {
    let mut handle = create_handle();
    let a_data = [3.0f64, 1.0, 2.0, 1.0, 4.0, 1.0, 0.0, 2.0, 5.0];
    let b_data = [1.0f64, 2.0, 3.0];
    let info = alloc_info(&mut handle);

    let a1 = upload(&mut handle, &a_data);
    let b1 = upload(&mut handle, &b_data);
    let ipiv1 = alloc::<i32>(&mut handle, 3);
    let lwork = handle.gesv_buffer_size::<f64>(3, 1, 3, b1, 3, b1, 3).unwrap();
    let work = caller_workspace(&mut handle, lwork);
    handle
        .gesv(3, 1, a1, 3, ipiv1, b1, 3, b1, 3, work, info)
        .unwrap();
    assert_eq!(read_info(&handle, info), 0);

    let a2 = upload(&mut handle, &a_data);
    let b2 = upload(&mut handle, &b_data);
    let x2 = alloc::<f64>(&mut handle, 3);
    let ipiv2 = alloc::<i32>(&mut handle, 3);
    let lwork = handle.gesv_buffer_size::<f64>(3, 1, 3, b2, 3, x2, 3).unwrap();
    let work = caller_workspace(&mut handle, lwork);
    handle
        .gesv(3, 1, a2, 3, ipiv2, b2, 3, x2, 3, work, info)
        .unwrap();

    assert_eq!(download(&handle, b1, 3), download(&handle, x2, 3));
    // out of place leaves B untouched
    assert_eq!(download(&handle, b2, 3), b_data.to_vec());
}

#[test]
fn test_gels_in_place_matches_out_of_place() {
    let mut handle = create_handle();
    // fit y = c0 + c1 t through (0, 1), (1, 3), (2, 5), (3, 7)
    let a_data = [1.0f64, 1.0, 1.0, 1.0, 0.0, 1.0, 2.0, 3.0];
    let b_data = [1.0f64, 3.0, 5.0, 7.0];
    let info = alloc_info(&mut handle);

    let a1 = upload(&mut handle, &a_data);
    let b1 = upload(&mut handle, &b_data);
    let lwork = handle
        .gels_buffer_size::<f64>(4, 2, 1, 4, b1, 4, b1, 4)
        .unwrap();
    let work = caller_workspace(&mut handle, lwork);
    handle.gels(4, 2, 1, a1, 4, b1, 4, b1, 4, work, info).unwrap();
    let in_place = download(&handle, b1, 2);
    assert_allclose_f64(&in_place, &[1.0, 2.0], 1e-12, 1e-12, "gels");

    let a2 = upload(&mut handle, &a_data);
    let b2 = upload(&mut handle, &b_data);
    let x2 = alloc::<f64>(&mut handle, 2);
    let lwork = handle
        .gels_buffer_size::<f64>(4, 2, 1, 4, b2, 4, x2, 2)
        .unwrap();
    let work = caller_workspace(&mut handle, lwork);
    handle.gels(4, 2, 1, a2, 4, b2, 4, x2, 2, work, info).unwrap();
    assert_eq!(download(&handle, x2, 2), in_place);
}

#[test]
fn test_gesv_f32() {
    let mut handle = create_handle();
    let a = upload(&mut handle, &[2.0f32, 0.0, 0.0, 4.0]);
    let b = upload(&mut handle, &[2.0f32, 2.0]);
    let ipiv = alloc::<i32>(&mut handle, 2);
    let info = alloc_info(&mut handle);
    handle.gesv(2, 1, a, 2, ipiv, b, 2, b, 2, None, info).unwrap();
    assert_allclose_f32(&download(&handle, b, 2), &[1.0, 0.5], 1e-6, 1e-6, "gesv f32");
}

// ============================================================================
// Eigensolvers
// ============================================================================

const EIG3: [f64; 9] = [1.5, 0.5, 0.0, 0.5, 1.5, 0.0, 0.0, 0.0, 3.0];

fn check_eigenpairs(v: &[f64], w: &[f64], n: usize) {
    assert_orthonormal(v, n, "eigenvectors");
    let av = matmul(&EIG3, v, n);
    let mut vw = v.to_vec();
    for j in 0..n {
        for i in 0..n {
            vw[i + j * n] *= w[j];
        }
    }
    assert_allclose_f64(&av, &vw, 0.0, 1e-10, "A V = V diag(w)");
}

#[test]
fn test_syevd_with_caller_workspace() {
    let mut handle = create_handle();
    let lwork = handle
        .syevd_buffer_size::<f64>(EigMode::Vector, FillMode::Lower, 3, 3)
        .unwrap();
    let work = caller_workspace(&mut handle, lwork);
    let a = upload(&mut handle, &EIG3);
    let w = alloc::<f64>(&mut handle, 3);
    let info = alloc_info(&mut handle);
    handle
        .syevd(EigMode::Vector, FillMode::Lower, 3, a, 3, w, work, info)
        .unwrap();
    assert_eq!(read_info(&handle, info), 0);
    let w = download(&handle, w, 3);
    assert_allclose_f64(&w, &[1.0, 2.0, 3.0], 1e-12, 1e-12, "syevd eigenvalues");
    check_eigenpairs(&download(&handle, a, 9), &w, 3);
}

#[test]
fn test_syevd_complex_hermitian() {
    let mut handle = create_handle();
    let i = Complex128::new(0.0, 1.0);
    let two = Complex128::new(2.0, 0.0);
    // [[2, i], [-i, 2]] has eigenvalues 1 and 3
    let a = upload(&mut handle, &[two, Complex128::new(0.0, -1.0), i, two]);
    let w = alloc::<f64>(&mut handle, 2);
    let info = alloc_info(&mut handle);
    handle
        .syevd(EigMode::NoVector, FillMode::Upper, 2, a, 2, w, None, info)
        .unwrap();
    let (rtol, atol) = tolerance_for_dtype(DType::Complex128);
    assert_allclose_f64(&download(&handle, w, 2), &[1.0, 3.0], rtol, atol, "zheevd");
}

#[test]
fn test_syevj_records_results() {
    let mut handle = create_handle();
    let mut params = JacobiParams::new();
    let lwork = handle
        .syevj_buffer_size::<f64>(EigMode::Vector, FillMode::Upper, 3, 3, &params)
        .unwrap();
    let work = caller_workspace(&mut handle, lwork);
    let a = upload(&mut handle, &EIG3);
    let w = alloc::<f64>(&mut handle, 3);
    let info = alloc_info(&mut handle);
    handle
        .syevj(EigMode::Vector, FillMode::Upper, 3, a, 3, w, work, info, &mut params)
        .unwrap();
    let w = download(&handle, w, 3);
    assert_allclose_f64(&w, &[1.0, 2.0, 3.0], 1e-10, 1e-10, "syevj eigenvalues");
    check_eigenpairs(&download(&handle, a, 9), &w, 3);
    assert!(handle.syevj_residual(&params).unwrap() < 1e-8);
    assert!(handle.syevj_sweeps(&params).unwrap() <= params.max_sweeps());
}

#[test]
fn test_syevj_batched_per_problem_results() {
    let mut handle = create_handle();
    let mut params = JacobiParams::new();
    let a = upload(&mut handle, &[2.0f64, 0.0, 0.0, 1.0, 5.0, 0.0, 0.0, 3.0]);
    let w = alloc::<f64>(&mut handle, 4);
    let info = alloc::<i32>(&mut handle, 2);
    let lwork = handle
        .syevj_batched_buffer_size::<f64>(EigMode::NoVector, FillMode::Lower, 2, 2, &params, 2)
        .unwrap();
    let work = caller_workspace(&mut handle, lwork);
    handle
        .syevj_batched(
            EigMode::NoVector,
            FillMode::Lower,
            2,
            a,
            2,
            w,
            work,
            info,
            &mut params,
            2,
        )
        .unwrap();
    assert_allclose_f64(
        &download(&handle, w, 4),
        &[1.0, 2.0, 3.0, 5.0],
        1e-12,
        1e-12,
        "syevj batched",
    );
    assert_eq!(params.residuals().len(), 2);
    assert_eq!(params.sweep_counts().len(), 2);
    assert!(matches!(params.residual(), Err(Error::NotSupported { .. })));
}

// ============================================================================
// Singular value decomposition
// ============================================================================

/// Rebuild `U diag(s) V^T` for an `m x n` problem with `k` singular triplets
fn reconstruct(
    u: &[f64],
    ldu: usize,
    s: &[f64],
    v: &[f64],
    ldv: usize,
    m: usize,
    n: usize,
) -> Vec<f64> {
    let mut out = vec![0.0; m * n];
    for (p, &sp) in s.iter().enumerate() {
        for j in 0..n {
            for i in 0..m {
                out[i + j * m] += u[i + p * ldu] * sp * v[j + p * ldv];
            }
        }
    }
    out
}

#[test]
fn test_gesvdj_reconstruction() {
    let mut handle = create_handle();
    let mut params = JacobiParams::new();
    let data = [4.0f64, 2.0, 0.0, 1.0, 3.0, 1.0, 0.0, 1.0, 2.0];
    let a = upload(&mut handle, &data);
    let s = alloc::<f64>(&mut handle, 3);
    let u = alloc::<f64>(&mut handle, 9);
    let v = alloc::<f64>(&mut handle, 9);
    let info = alloc_info(&mut handle);
    let lwork = handle
        .gesvdj_buffer_size::<f64>(EigMode::Vector, false, 3, 3, 3, 3, &params)
        .unwrap();
    let work = caller_workspace(&mut handle, lwork);
    handle
        .gesvdj(EigMode::Vector, false, 3, 3, a, 3, s, u, 3, v, 3, work, info, &mut params)
        .unwrap();
    assert_eq!(read_info(&handle, info), 0);

    let s = download(&handle, s, 3);
    assert!(s[0] >= s[1] && s[1] >= s[2]);
    let v = download(&handle, v, 9);
    assert_orthonormal(&v, 3, "V");
    let rebuilt = reconstruct(&download(&handle, u, 9), 3, &s, &v, 3, 3, 3);
    assert_allclose_f64(&rebuilt, &data, 0.0, 1e-10, "gesvdj reconstruction");
    assert!(handle.gesvdj_residual(&params).is_ok());
}

#[test]
fn test_gesvdj_economy_wide_matrix() {
    let mut handle = create_handle();
    let mut params = JacobiParams::new();
    // 2 x 3, so V is 3 x 2 in economy mode
    let data = [1.0f64, 0.0, 2.0, 1.0, 0.0, 3.0];
    let a = upload(&mut handle, &data);
    let s = alloc::<f64>(&mut handle, 2);
    let u = alloc::<f64>(&mut handle, 4);
    let v = alloc::<f64>(&mut handle, 6);
    let info = alloc_info(&mut handle);
    let lwork = handle
        .gesvdj_buffer_size::<f64>(EigMode::Vector, true, 2, 3, 2, 2, &params)
        .unwrap();
    let work = caller_workspace(&mut handle, lwork);
    handle
        .gesvdj(EigMode::Vector, true, 2, 3, a, 2, s, u, 2, v, 3, work, info, &mut params)
        .unwrap();
    let rebuilt = reconstruct(
        &download(&handle, u, 4),
        2,
        &download(&handle, s, 2),
        &download(&handle, v, 6),
        3,
        2,
        3,
    );
    assert_allclose_f64(&rebuilt, &data, 0.0, 1e-10, "economy gesvdj");
}

#[test]
fn test_gesvdj_rejects_short_ldv() {
    let mut handle = create_handle();
    let mut params = JacobiParams::new();
    let err = handle
        .gesvdj::<f64>(
            EigMode::Vector,
            false,
            3,
            3,
            DevicePtr::null(),
            3,
            DevicePtr::null(),
            DevicePtr::null(),
            3,
            DevicePtr::null(),
            2,
            None,
            DevicePtr::null(),
            &mut params,
        )
        .unwrap_err();
    assert!(matches!(err, Error::InvalidValue { arg: "ldv", .. }));
    // rejected before any runtime call
    assert_eq!(handle.runtime().calls(), 0);
}

#[test]
fn test_gesvd_singular_values() {
    let mut handle = create_handle();
    let a = upload(&mut handle, &[3.0f64, 0.0, 0.0, 0.0, 2.0, 0.0]);
    let s = alloc::<f64>(&mut handle, 2);
    let info = alloc_info(&mut handle);
    let lwork = handle
        .gesvd_buffer_size::<f64>(SvdJob::None, SvdJob::None, 3, 2)
        .unwrap();
    let work = caller_workspace(&mut handle, lwork);
    handle
        .gesvd(
            SvdJob::None,
            SvdJob::None,
            3,
            2,
            a,
            3,
            s,
            DevicePtr::null(),
            1,
            DevicePtr::null(),
            1,
            work,
            info,
        )
        .unwrap();
    assert_allclose_f64(&download(&handle, s, 2), &[3.0, 2.0], 1e-12, 1e-12, "gesvd");
}

// ============================================================================
// Exact-size caller workspaces
// ============================================================================

#[test]
fn test_gesvdj_economy_tall_matrix() {
    let mut handle = create_handle();
    let mut params = JacobiParams::new();
    // 3 x 2, so U is 3 x 2 and V is 2 x 2 in economy mode
    let data = [1.0f64, 2.0, 0.0, 0.0, 1.0, 3.0];
    let a = upload(&mut handle, &data);
    let s = alloc::<f64>(&mut handle, 2);
    let u = alloc::<f64>(&mut handle, 6);
    let v = alloc::<f64>(&mut handle, 4);
    let info = alloc_info(&mut handle);
    let lwork = handle
        .gesvdj_buffer_size::<f64>(EigMode::Vector, true, 3, 2, 3, 3, &params)
        .unwrap();
    let work = caller_workspace(&mut handle, lwork);
    handle
        .gesvdj(EigMode::Vector, true, 3, 2, a, 3, s, u, 3, v, 2, work, info, &mut params)
        .unwrap();
    assert_eq!(read_info(&handle, info), 0);
    let v = download(&handle, v, 4);
    assert_orthonormal(&v, 2, "economy V");
    let rebuilt = reconstruct(&download(&handle, u, 6), 3, &download(&handle, s, 2), &v, 2, 3, 2);
    assert_allclose_f64(&rebuilt, &data, 0.0, 1e-10, "economy gesvdj, m > n");
}

#[test]
fn test_gesvdj_batched_with_caller_workspace() {
    let mut handle = create_handle();
    let mut params = JacobiParams::new();
    let problems = [[2.0f64, 1.0, 0.0, 3.0], [1.0, 2.0, 3.0, 4.0]];
    let a = upload(&mut handle, &problems.concat());
    let s = alloc::<f64>(&mut handle, 4);
    let u = alloc::<f64>(&mut handle, 8);
    let v = alloc::<f64>(&mut handle, 8);
    let info = alloc::<i32>(&mut handle, 2);
    let lwork = handle
        .gesvdj_batched_buffer_size::<f64>(EigMode::Vector, 2, 2, 2, 2, &params, 2)
        .unwrap();
    let work = caller_workspace(&mut handle, lwork);
    handle
        .gesvdj_batched(EigMode::Vector, 2, 2, a, 2, s, u, 2, v, 2, work, info, &mut params, 2)
        .unwrap();
    assert_eq!(download(&handle, info, 2), vec![0, 0]);

    let (s, u, v) = (download(&handle, s, 4), download(&handle, u, 8), download(&handle, v, 8));
    for (j, data) in problems.iter().enumerate() {
        let (sj, uj, vj) = (&s[2 * j..2 * j + 2], &u[4 * j..4 * j + 4], &v[4 * j..4 * j + 4]);
        assert_orthonormal(vj, 2, "batched V");
        let rebuilt = reconstruct(uj, 2, sj, vj, 2, 2, 2);
        assert_allclose_f64(&rebuilt, data, 0.0, 1e-10, "gesvdj batched reconstruction");
    }
    assert_eq!(params.residuals().len(), 2);
    assert_eq!(params.sweep_counts().len(), 2);
}

#[test]
fn test_gesvd_strided_batched_with_caller_workspace() {
    let mut handle = create_handle();
    let a = upload(&mut handle, &[3.0f64, 0.0, 0.0, 0.0, 2.0, 0.0, 1.0, 0.0, 0.0, 0.0, 4.0, 0.0]);
    let s = alloc::<f64>(&mut handle, 4);
    let info = alloc::<i32>(&mut handle, 2);
    let lwork = handle
        .gesvd_strided_batched_buffer_size::<f64>(SvdJob::None, SvdJob::None, 3, 2, 3, 1, 1, 2)
        .unwrap();
    let work = caller_workspace(&mut handle, lwork);
    handle
        .gesvd_strided_batched(
            SvdJob::None,
            SvdJob::None,
            3,
            2,
            a,
            3,
            6,
            s,
            2,
            DevicePtr::null(),
            1,
            0,
            DevicePtr::null(),
            1,
            0,
            work,
            info,
            2,
        )
        .unwrap();
    assert_eq!(download(&handle, info, 2), vec![0, 0]);
    assert_allclose_f64(
        &download(&handle, s, 4),
        &[3.0, 2.0, 4.0, 1.0],
        1e-12,
        1e-12,
        "gesvd strided batched",
    );
}

/// A = diag(2, 6) and B = diag(1, 2) have generalized eigenvalues 2 and 3
const GEN_A: [f64; 4] = [2.0, 0.0, 0.0, 6.0];
const GEN_B: [f64; 4] = [1.0, 0.0, 0.0, 2.0];

/// Check `A X = B X diag(w)` for the 2 x 2 generalized problem
fn check_generalized_pairs(x: &[f64], w: &[f64]) {
    let ax = matmul(&GEN_A, x, 2);
    let mut bxw = matmul(&GEN_B, x, 2);
    for j in 0..2 {
        for i in 0..2 {
            bxw[i + j * 2] *= w[j];
        }
    }
    assert_allclose_f64(&ax, &bxw, 0.0, 1e-10, "A X = B X diag(w)");
}

#[test]
fn test_sygvd_with_caller_workspace() {
    let mut handle = create_handle();
    let a = upload(&mut handle, &GEN_A);
    let b = upload(&mut handle, &GEN_B);
    let w = alloc::<f64>(&mut handle, 2);
    let info = alloc_info(&mut handle);
    let lwork = handle
        .sygvd_buffer_size::<f64>(EigType::Type1, EigMode::Vector, FillMode::Lower, 2, 2, 2)
        .unwrap();
    let work = caller_workspace(&mut handle, lwork);
    handle
        .sygvd(EigType::Type1, EigMode::Vector, FillMode::Lower, 2, a, 2, b, 2, w, work, info)
        .unwrap();
    assert_eq!(read_info(&handle, info), 0);
    let w = download(&handle, w, 2);
    assert_allclose_f64(&w, &[2.0, 3.0], 1e-12, 1e-12, "sygvd eigenvalues");
    check_generalized_pairs(&download(&handle, a, 4), &w);
}

#[test]
fn test_sygvj_with_caller_workspace() {
    let mut handle = create_handle();
    let mut params = JacobiParams::new();
    let a = upload(&mut handle, &GEN_A);
    let b = upload(&mut handle, &GEN_B);
    let w = alloc::<f64>(&mut handle, 2);
    let info = alloc_info(&mut handle);
    let lwork = handle
        .sygvj_buffer_size::<f64>(
            EigType::Type1,
            EigMode::Vector,
            FillMode::Upper,
            2,
            2,
            2,
            &params,
        )
        .unwrap();
    let work = caller_workspace(&mut handle, lwork);
    handle
        .sygvj(
            EigType::Type1,
            EigMode::Vector,
            FillMode::Upper,
            2,
            a,
            2,
            b,
            2,
            w,
            work,
            info,
            &mut params,
        )
        .unwrap();
    assert_eq!(read_info(&handle, info), 0);
    let w = download(&handle, w, 2);
    assert_allclose_f64(&w, &[2.0, 3.0], 1e-10, 1e-10, "sygvj eigenvalues");
    check_generalized_pairs(&download(&handle, a, 4), &w);
    assert!(handle.syevj_residual(&params).unwrap() < 1e-8);
}
