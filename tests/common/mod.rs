//! Common test utilities
#![allow(dead_code)]

use bytemuck::Pod;
use dnsolver::dtype::DType;
use dnsolver::handle::Handle;
use dnsolver::runtime::host::HostRuntime;
use dnsolver::runtime::{DevicePtr, Runtime};
use dnsolver::workspace::Workspace;
use tracing_subscriber::EnvFilter;

/// Route library logs to the test harness; `RUST_LOG=dnsolver=debug` shows them
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .with_test_writer()
        .try_init();
}

/// Create a handle over a host runtime with no memory limit
pub fn create_handle() -> Handle<HostRuntime> {
    init_tracing();
    Handle::new(HostRuntime::new())
}

/// Create a handle whose runtime may map at most `bytes` bytes
pub fn create_limited_handle(bytes: usize) -> Handle<HostRuntime> {
    init_tracing();
    Handle::new(HostRuntime::builder().memory_limit(bytes).build())
}

/// Copy `data` into a fresh device allocation
pub fn upload<T: Pod>(handle: &mut Handle<HostRuntime>, data: &[T]) -> DevicePtr<T> {
    let bytes: &[u8] = bytemuck::cast_slice(data);
    let ptr = handle
        .runtime_mut()
        .allocate(bytes.len().max(1))
        .expect("device allocation");
    assert!(handle.runtime().copy_to_device(bytes, ptr).is_success_like());
    ptr.cast()
}

/// Allocate `count` zeroed elements
pub fn alloc<T: Pod>(handle: &mut Handle<HostRuntime>, count: usize) -> DevicePtr<T> {
    upload(handle, &vec![T::zeroed(); count])
}

/// Allocate a single zeroed `info` slot
pub fn alloc_info(handle: &mut Handle<HostRuntime>) -> DevicePtr<i32> {
    let bytes = handle
        .runtime_mut()
        .allocate(4)
        .expect("device allocation");
    bytes.cast()
}

/// Read `count` elements back from the device
pub fn download<T: Pod>(handle: &Handle<HostRuntime>, ptr: DevicePtr<T>, count: usize) -> Vec<T> {
    let mut out = vec![T::zeroed(); count];
    assert!(
        handle
            .runtime()
            .copy_from_device(ptr.cast(), bytemuck::cast_slice_mut(&mut out))
            .is_success_like()
    );
    out
}

/// Read the `info` value written by a routine
pub fn read_info(handle: &Handle<HostRuntime>, info: DevicePtr<i32>) -> i32 {
    let mut out = [0i32; 1];
    assert!(
        handle
            .runtime()
            .copy_from_device(info.cast(), bytemuck::cast_slice_mut(&mut out))
            .is_success_like()
    );
    out[0]
}

/// Allocate a caller workspace of exactly `lwork` bytes
///
/// The host runtime leaves an unmapped gap after every allocation, so any
/// access past `lwork` fails instead of going unnoticed.
pub fn caller_workspace(handle: &mut Handle<HostRuntime>, lwork: i32) -> Option<Workspace> {
    let bytes = usize::try_from(lwork).expect("non-negative lwork");
    if bytes == 0 {
        return None;
    }
    let ptr = handle
        .runtime_mut()
        .allocate(bytes)
        .expect("device allocation");
    Workspace::new(ptr, bytes)
}

/// Column-major `n x n` product `A * B`
pub fn matmul(a: &[f64], b: &[f64], n: usize) -> Vec<f64> {
    let mut c = vec![0.0; n * n];
    for j in 0..n {
        for k in 0..n {
            let bkj = b[k + j * n];
            for i in 0..n {
                c[i + j * n] += a[i + k * n] * bkj;
            }
        }
    }
    c
}

/// Column-major transpose of an `rows x cols` matrix
pub fn transpose(a: &[f64], rows: usize, cols: usize) -> Vec<f64> {
    let mut t = vec![0.0; rows * cols];
    for j in 0..cols {
        for i in 0..rows {
            t[j + i * cols] = a[i + j * rows];
        }
    }
    t
}

/// Assert two f64 slices are close within tolerance
///
/// Uses the formula: |a - b| <= atol + rtol * |b|
pub fn assert_allclose_f64(a: &[f64], b: &[f64], rtol: f64, atol: f64, msg: &str) {
    assert_eq!(a.len(), b.len(), "{}: length mismatch", msg);
    for (i, (x, y)) in a.iter().zip(b.iter()).enumerate() {
        let diff = (x - y).abs();
        let tol = atol + rtol * y.abs();
        assert!(
            diff <= tol,
            "{}: element {} differs: {} vs {} (diff={}, tol={})",
            msg,
            i,
            x,
            y,
            diff,
            tol
        );
    }
}

/// Assert two f32 slices are close within tolerance
pub fn assert_allclose_f32(a: &[f32], b: &[f32], rtol: f32, atol: f32, msg: &str) {
    assert_eq!(a.len(), b.len(), "{}: length mismatch", msg);
    for (i, (x, y)) in a.iter().zip(b.iter()).enumerate() {
        let diff = (x - y).abs();
        let tol = atol + rtol * y.abs();
        assert!(
            diff <= tol,
            "{}: element {} differs: {} vs {} (diff={}, tol={})",
            msg,
            i,
            x,
            y,
            diff,
            tol
        );
    }
}

/// Returns (rtol, atol) tolerance pair for a given dtype
pub fn tolerance_for_dtype(dtype: DType) -> (f64, f64) {
    match dtype {
        DType::F32 | DType::Complex64 => (1e-4, 1e-5),
        DType::F64 | DType::Complex128 => (1e-10, 1e-12),
        DType::I32 => (0.0, 0.0),
    }
}
