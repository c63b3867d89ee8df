//! Routine-level entry points of the wrapped library

use super::Runtime;
use super::memory::DevicePtr;
use super::types::{
    RtEform, RtEsort, RtEvect, RtFill, RtOperation, RtSide, RtStatus, RtStorev, RtSvect,
    RtWorkmode,
};
use crate::dtype::Scalar;

/// Dense LAPACK-style routines of the wrapped library
///
/// All matrices are column-major with explicit leading dimensions; strides of
/// strided-batched routines are in elements. Every routine honours the
/// runtime's size-query bracket: while a query is open it validates its size
/// arguments, registers the scratch it needs and returns `SizeIncreased` or
/// `SizeUnchanged` without dereferencing any pointer.
///
/// Real and complex precisions share one entry point (`syevd` serves as
/// `heevd`, `orgqr` as `ungqr`, and so on).
pub trait LapackOps: Runtime {
    /// C = alpha op(A) + beta op(B)
    fn geam<T: Scalar>(
        &mut self,
        transa: RtOperation,
        transb: RtOperation,
        m: i32,
        n: i32,
        alpha: T,
        a: DevicePtr<T>,
        lda: i32,
        beta: T,
        b: DevicePtr<T>,
        ldb: i32,
        c: DevicePtr<T>,
        ldc: i32,
    ) -> RtStatus;

    /// Cholesky factorization
    fn potrf<T: Scalar>(
        &mut self,
        uplo: RtFill,
        n: i32,
        a: DevicePtr<T>,
        lda: i32,
        info: DevicePtr<i32>,
    ) -> RtStatus;

    /// Cholesky factorization of an array of matrices
    fn potrf_batched<T: Scalar>(
        &mut self,
        uplo: RtFill,
        n: i32,
        a: DevicePtr<DevicePtr<T>>,
        lda: i32,
        info: DevicePtr<i32>,
        batch_count: i32,
    ) -> RtStatus;

    /// Solve with a Cholesky factor
    fn potrs<T: Scalar>(
        &mut self,
        uplo: RtFill,
        n: i32,
        nrhs: i32,
        a: DevicePtr<T>,
        lda: i32,
        b: DevicePtr<T>,
        ldb: i32,
    ) -> RtStatus;

    /// Solve with an array of Cholesky factors
    fn potrs_batched<T: Scalar>(
        &mut self,
        uplo: RtFill,
        n: i32,
        nrhs: i32,
        a: DevicePtr<DevicePtr<T>>,
        lda: i32,
        b: DevicePtr<DevicePtr<T>>,
        ldb: i32,
        batch_count: i32,
    ) -> RtStatus;

    /// Inverse from a Cholesky factor
    fn potri<T: Scalar>(
        &mut self,
        uplo: RtFill,
        n: i32,
        a: DevicePtr<T>,
        lda: i32,
        info: DevicePtr<i32>,
    ) -> RtStatus;

    /// LU factorization with partial pivoting
    fn getrf<T: Scalar>(
        &mut self,
        m: i32,
        n: i32,
        a: DevicePtr<T>,
        lda: i32,
        ipiv: DevicePtr<i32>,
        info: DevicePtr<i32>,
    ) -> RtStatus;

    /// LU factorization without pivoting
    fn getrf_npvt<T: Scalar>(
        &mut self,
        m: i32,
        n: i32,
        a: DevicePtr<T>,
        lda: i32,
        info: DevicePtr<i32>,
    ) -> RtStatus;

    /// Solve with an LU factorization
    fn getrs<T: Scalar>(
        &mut self,
        trans: RtOperation,
        n: i32,
        nrhs: i32,
        a: DevicePtr<T>,
        lda: i32,
        ipiv: DevicePtr<i32>,
        b: DevicePtr<T>,
        ldb: i32,
    ) -> RtStatus;

    /// Solve A X = B, overwriting B with X
    fn gesv<T: Scalar>(
        &mut self,
        n: i32,
        nrhs: i32,
        a: DevicePtr<T>,
        lda: i32,
        ipiv: DevicePtr<i32>,
        b: DevicePtr<T>,
        ldb: i32,
        info: DevicePtr<i32>,
    ) -> RtStatus;

    /// Solve A X = B into a separate X, leaving B untouched
    fn gesv_outofplace<T: Scalar>(
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
        info: DevicePtr<i32>,
    ) -> RtStatus;

    /// QR factorization
    fn geqrf<T: Scalar>(
        &mut self,
        m: i32,
        n: i32,
        a: DevicePtr<T>,
        lda: i32,
        tau: DevicePtr<T>,
    ) -> RtStatus;

    /// Generate Q from a QR factorization
    fn orgqr<T: Scalar>(
        &mut self,
        m: i32,
        n: i32,
        k: i32,
        a: DevicePtr<T>,
        lda: i32,
        tau: DevicePtr<T>,
    ) -> RtStatus;

    /// Multiply by Q from a QR factorization
    fn ormqr<T: Scalar>(
        &mut self,
        side: RtSide,
        trans: RtOperation,
        m: i32,
        n: i32,
        k: i32,
        a: DevicePtr<T>,
        lda: i32,
        tau: DevicePtr<T>,
        c: DevicePtr<T>,
        ldc: i32,
    ) -> RtStatus;

    /// Least squares, overwriting B with X
    fn gels<T: Scalar>(
        &mut self,
        trans: RtOperation,
        m: i32,
        n: i32,
        nrhs: i32,
        a: DevicePtr<T>,
        lda: i32,
        b: DevicePtr<T>,
        ldb: i32,
        info: DevicePtr<i32>,
    ) -> RtStatus;

    /// Least squares into a separate X, leaving B untouched
    fn gels_outofplace<T: Scalar>(
        &mut self,
        trans: RtOperation,
        m: i32,
        n: i32,
        nrhs: i32,
        a: DevicePtr<T>,
        lda: i32,
        b: DevicePtr<T>,
        ldb: i32,
        x: DevicePtr<T>,
        ldx: i32,
        info: DevicePtr<i32>,
    ) -> RtStatus;

    /// Bidiagonal reduction
    fn gebrd<T: Scalar>(
        &mut self,
        m: i32,
        n: i32,
        a: DevicePtr<T>,
        lda: i32,
        d: DevicePtr<T::Real>,
        e: DevicePtr<T::Real>,
        tauq: DevicePtr<T>,
        taup: DevicePtr<T>,
    ) -> RtStatus;

    /// Generate Q or P^H from a bidiagonal reduction
    fn orgbr<T: Scalar>(
        &mut self,
        storev: RtStorev,
        m: i32,
        n: i32,
        k: i32,
        a: DevicePtr<T>,
        lda: i32,
        tau: DevicePtr<T>,
    ) -> RtStatus;

    /// Tridiagonal reduction of a symmetric/Hermitian matrix
    fn sytrd<T: Scalar>(
        &mut self,
        uplo: RtFill,
        n: i32,
        a: DevicePtr<T>,
        lda: i32,
        d: DevicePtr<T::Real>,
        e: DevicePtr<T::Real>,
        tau: DevicePtr<T>,
    ) -> RtStatus;

    /// Generate Q from a tridiagonal reduction
    fn orgtr<T: Scalar>(
        &mut self,
        uplo: RtFill,
        n: i32,
        a: DevicePtr<T>,
        lda: i32,
        tau: DevicePtr<T>,
    ) -> RtStatus;

    /// Multiply by Q from a tridiagonal reduction
    fn ormtr<T: Scalar>(
        &mut self,
        side: RtSide,
        uplo: RtFill,
        trans: RtOperation,
        m: i32,
        n: i32,
        a: DevicePtr<T>,
        lda: i32,
        tau: DevicePtr<T>,
        c: DevicePtr<T>,
        ldc: i32,
    ) -> RtStatus;

    /// Bunch-Kaufman factorization of a symmetric matrix
    fn sytrf<T: Scalar>(
        &mut self,
        uplo: RtFill,
        n: i32,
        a: DevicePtr<T>,
        lda: i32,
        ipiv: DevicePtr<i32>,
        info: DevicePtr<i32>,
    ) -> RtStatus;

    /// Singular value decomposition; `v` receives V^H
    fn gesvd<T: Scalar>(
        &mut self,
        left_svect: RtSvect,
        right_svect: RtSvect,
        m: i32,
        n: i32,
        a: DevicePtr<T>,
        lda: i32,
        s: DevicePtr<T::Real>,
        u: DevicePtr<T>,
        ldu: i32,
        v: DevicePtr<T>,
        ldv: i32,
        e: DevicePtr<T::Real>,
        fast_alg: RtWorkmode,
        info: DevicePtr<i32>,
    ) -> RtStatus;

    /// Strided-batched singular value decomposition; `v` receives V^H
    fn gesvd_strided_batched<T: Scalar>(
        &mut self,
        left_svect: RtSvect,
        right_svect: RtSvect,
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
        v: DevicePtr<T>,
        ldv: i32,
        stride_v: i64,
        e: DevicePtr<T::Real>,
        stride_e: i64,
        fast_alg: RtWorkmode,
        info: DevicePtr<i32>,
        batch_count: i32,
    ) -> RtStatus;

    /// One-sided Jacobi SVD; `v` receives V^H
    fn gesvdj<T: Scalar>(
        &mut self,
        left_svect: RtSvect,
        right_svect: RtSvect,
        m: i32,
        n: i32,
        a: DevicePtr<T>,
        lda: i32,
        abstol: T::Real,
        residual: DevicePtr<T::Real>,
        max_sweeps: i32,
        n_sweeps: DevicePtr<i32>,
        s: DevicePtr<T::Real>,
        u: DevicePtr<T>,
        ldu: i32,
        v: DevicePtr<T>,
        ldv: i32,
        info: DevicePtr<i32>,
    ) -> RtStatus;

    /// Strided-batched one-sided Jacobi SVD; `v` receives V^H
    fn gesvdj_strided_batched<T: Scalar>(
        &mut self,
        left_svect: RtSvect,
        right_svect: RtSvect,
        m: i32,
        n: i32,
        a: DevicePtr<T>,
        lda: i32,
        stride_a: i64,
        abstol: T::Real,
        residual: DevicePtr<T::Real>,
        max_sweeps: i32,
        n_sweeps: DevicePtr<i32>,
        s: DevicePtr<T::Real>,
        stride_s: i64,
        u: DevicePtr<T>,
        ldu: i32,
        stride_u: i64,
        v: DevicePtr<T>,
        ldv: i32,
        stride_v: i64,
        info: DevicePtr<i32>,
        batch_count: i32,
    ) -> RtStatus;

    /// Symmetric/Hermitian eigensolver
    fn syevd<T: Scalar>(
        &mut self,
        evect: RtEvect,
        uplo: RtFill,
        n: i32,
        a: DevicePtr<T>,
        lda: i32,
        w: DevicePtr<T::Real>,
        e: DevicePtr<T::Real>,
        info: DevicePtr<i32>,
    ) -> RtStatus;

    /// Generalized symmetric-definite eigensolver
    fn sygvd<T: Scalar>(
        &mut self,
        itype: RtEform,
        evect: RtEvect,
        uplo: RtFill,
        n: i32,
        a: DevicePtr<T>,
        lda: i32,
        b: DevicePtr<T>,
        ldb: i32,
        w: DevicePtr<T::Real>,
        e: DevicePtr<T::Real>,
        info: DevicePtr<i32>,
    ) -> RtStatus;

    /// Jacobi symmetric/Hermitian eigensolver
    fn syevj<T: Scalar>(
        &mut self,
        esort: RtEsort,
        evect: RtEvect,
        uplo: RtFill,
        n: i32,
        a: DevicePtr<T>,
        lda: i32,
        abstol: T::Real,
        residual: DevicePtr<T::Real>,
        max_sweeps: i32,
        n_sweeps: DevicePtr<i32>,
        w: DevicePtr<T::Real>,
        info: DevicePtr<i32>,
    ) -> RtStatus;

    /// Strided-batched Jacobi eigensolver
    fn syevj_strided_batched<T: Scalar>(
        &mut self,
        esort: RtEsort,
        evect: RtEvect,
        uplo: RtFill,
        n: i32,
        a: DevicePtr<T>,
        lda: i32,
        stride_a: i64,
        abstol: T::Real,
        residual: DevicePtr<T::Real>,
        max_sweeps: i32,
        n_sweeps: DevicePtr<i32>,
        w: DevicePtr<T::Real>,
        stride_w: i64,
        info: DevicePtr<i32>,
        batch_count: i32,
    ) -> RtStatus;

    /// Generalized Jacobi eigensolver
    fn sygvj<T: Scalar>(
        &mut self,
        itype: RtEform,
        evect: RtEvect,
        uplo: RtFill,
        n: i32,
        a: DevicePtr<T>,
        lda: i32,
        b: DevicePtr<T>,
        ldb: i32,
        abstol: T::Real,
        residual: DevicePtr<T::Real>,
        max_sweeps: i32,
        n_sweeps: DevicePtr<i32>,
        w: DevicePtr<T::Real>,
        info: DevicePtr<i32>,
    ) -> RtStatus;
}
