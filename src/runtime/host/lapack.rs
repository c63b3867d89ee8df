//! `LapackOps` for the host runtime
//!
//! Every entry point follows the same three steps: validate sizes and enum
//! arguments (`InvalidSize` / `InvalidValue`), then either register the
//! routine's scratch with an open size query or claim that scratch from the
//! active region, then check pointers and run the kernel on staged copies.

use super::HostRuntime;
use super::kernels::{blas, cholesky, jacobi, lu, qr};
use super::pool::DeviceHeap;
use crate::dtype::Scalar;
use crate::runtime::{
    DevicePtr, LapackOps, RtEform, RtEsort, RtEvect, RtFill, RtOperation, RtSide, RtStatus,
    RtStorev, RtSvect, RtWorkmode,
};
use blas::{at, span};

/// Sweep cap for the eigen and SVD drivers that take no sweep argument
const DRIVER_MAX_SWEEPS: i32 = 100;

/// Return the status of a failed validation step
macro_rules! checked {
    ($e:expr) => {
        match $e {
            Ok(v) => v,
            Err(status) => return status,
        }
    };
}

fn dim(n: i32) -> Result<usize, RtStatus> {
    usize::try_from(n).map_err(|_| RtStatus::InvalidSize)
}

fn leading(ld: i32, rows: usize) -> Result<usize, RtStatus> {
    let ld = dim(ld)?;
    if ld < rows.max(1) {
        return Err(RtStatus::InvalidSize);
    }
    Ok(ld)
}

fn stride(s: i64) -> Result<usize, RtStatus> {
    usize::try_from(s).map_err(|_| RtStatus::InvalidSize)
}

fn upper_of(uplo: RtFill) -> Result<bool, RtStatus> {
    match uplo {
        RtFill::Upper => Ok(true),
        RtFill::Lower => Ok(false),
        RtFill::Full => Err(RtStatus::InvalidValue),
    }
}

fn wants_vectors(evect: RtEvect) -> Result<bool, RtStatus> {
    match evect {
        RtEvect::Original => Ok(true),
        RtEvect::None => Ok(false),
        RtEvect::Tridiagonal => Err(RtStatus::InvalidValue),
    }
}

/// Transposition accepted by the Q-application routines of precision `T`
fn q_operation<T: Scalar>(trans: RtOperation) -> Result<RtOperation, RtStatus> {
    match (trans, T::IS_COMPLEX) {
        (RtOperation::None, _) => Ok(trans),
        (RtOperation::Transpose, false) | (RtOperation::ConjugateTranspose, true) => Ok(trans),
        _ => Err(RtStatus::InvalidValue),
    }
}

#[inline]
fn bytes<T: Scalar>(count: usize) -> usize {
    count * T::size_in_bytes()
}

/// Fail with `InvalidPointer` unless `count` elements at `ptr` are mapped
fn require<T>(mem: &DeviceHeap, ptr: DevicePtr<T>, count: usize) -> Result<(), RtStatus> {
    mem.check_range(ptr.cast(), count * std::mem::size_of::<T>())
}

/// Empty Jacobi problems finish at once; their residual and sweep outputs may be absent
fn finish_empty(mem: &mut DeviceHeap, info: DevicePtr<i32>, batch: usize) -> Result<(), RtStatus> {
    require(mem, info, batch)?;
    mem.store(info, &vec![0; batch])
}

fn load_matrix<T: Scalar>(
    mem: &DeviceHeap,
    ptr: DevicePtr<T>,
    rows: usize,
    cols: usize,
    ld: usize,
) -> Result<Vec<T>, RtStatus> {
    mem.load(ptr, span(rows, cols, ld))
}

/// Overwrite a `rows x cols` block at `ptr`, leaving the padding rows intact
fn store_matrix<T: Scalar>(
    mem: &mut DeviceHeap,
    ptr: DevicePtr<T>,
    rows: usize,
    cols: usize,
    ld: usize,
    value: impl Fn(usize, usize) -> T,
) -> Result<(), RtStatus> {
    let mut dst = load_matrix(mem, ptr, rows, cols, ld)?;
    for j in 0..cols {
        for i in 0..rows {
            dst[at(i, j, ld)] = value(i, j);
        }
    }
    mem.store(ptr, &dst)
}

/// Column counts of the U and V^H outputs for a singular-vector job
fn svect_cols(job: RtSvect, full: usize, k: usize) -> usize {
    match job {
        RtSvect::All => full,
        RtSvect::Singular | RtSvect::Overwrite => k,
        RtSvect::None => 0,
    }
}

/// Where the SVD results of one problem go
struct SvdOutput<T: Scalar> {
    left: RtSvect,
    right: RtSvect,
    a: DevicePtr<T>,
    lda: usize,
    s: DevicePtr<T::Real>,
    u: DevicePtr<T>,
    ldu: usize,
    v: DevicePtr<T>,
    ldv: usize,
}

impl<T: Scalar> SvdOutput<T> {
    /// Run the SVD of the `m x n` matrix at `a` and write S, U and V^H
    fn compute(
        &self,
        mem: &mut DeviceHeap,
        m: usize,
        n: usize,
        abstol: T::Real,
        max_sweeps: i32,
    ) -> Result<jacobi::JacobiOutcome<T::Real>, RtStatus> {
        let k = m.min(n);
        require(mem, self.s, k)?;
        let am = load_matrix(mem, self.a, m, n, self.lda)?;
        let f = jacobi::svd(m, n, &am, self.lda, abstol, max_sweeps);
        mem.store(self.s, &f.s)?;

        let ucols = svect_cols(self.left, m, k);
        let vrows = svect_cols(self.right, n, k);
        match self.left {
            RtSvect::All | RtSvect::Singular => {
                store_matrix(mem, self.u, m, ucols, self.ldu, |i, j| f.u[at(i, j, m)])?
            }
            RtSvect::Overwrite => {
                store_matrix(mem, self.a, m, ucols, self.lda, |i, j| f.u[at(i, j, m)])?
            }
            RtSvect::None => {}
        }
        // V^H(i, j) = conj(V(j, i))
        match self.right {
            RtSvect::All | RtSvect::Singular => {
                store_matrix(mem, self.v, vrows, n, self.ldv, |i, j| {
                    f.v[at(j, i, n)].conj()
                })?
            }
            RtSvect::Overwrite => store_matrix(mem, self.a, vrows, n, self.lda, |i, j| {
                f.v[at(j, i, n)].conj()
            })?,
            RtSvect::None => {}
        }
        Ok(f.outcome)
    }
}

/// Validate the singular-vector jobs and output leading dimensions
fn svd_layout(
    left: RtSvect,
    right: RtSvect,
    m: usize,
    n: usize,
    ldu: i32,
    ldv: i32,
    allow_overwrite: bool,
) -> Result<(usize, usize), RtStatus> {
    let overwrite = [left, right].iter().filter(|&&j| j == RtSvect::Overwrite).count();
    if overwrite == 2 || (overwrite > 0 && !allow_overwrite) {
        return Err(RtStatus::InvalidValue);
    }
    let ldu_rows = match left {
        RtSvect::All | RtSvect::Singular => m,
        _ => 1,
    };
    let ldv_rows = match right {
        RtSvect::All => n,
        RtSvect::Singular => m.min(n),
        _ => 1,
    };
    Ok((leading(ldu, ldu_rows)?, leading(ldv, ldv_rows)?))
}

/// Eigen-decomposition of one Hermitian problem (standard or generalized)
struct EigProblem<T: Scalar> {
    itype: Option<RtEform>,
    vectors: bool,
    upper: bool,
    n: usize,
    a: DevicePtr<T>,
    lda: usize,
    b: DevicePtr<T>,
    ldb: usize,
    w: DevicePtr<T::Real>,
    sort: bool,
    abstol: T::Real,
    max_sweeps: i32,
}

impl<T: Scalar> EigProblem<T> {
    /// Solve and write eigenvalues (and vectors into A); returns `(info, outcome)`
    fn solve(
        &self,
        mem: &mut DeviceHeap,
    ) -> Result<(i32, jacobi::JacobiOutcome<T::Real>), RtStatus> {
        let n = self.n;
        require(mem, self.w, n)?;
        let am = load_matrix(mem, self.a, n, n, self.lda)?;
        let mut h = blas::hermitian_full(self.upper, n, &am, self.lda);

        // Reduce the generalized problem to a standard one through B = L L^H
        let mut factor = None;
        if let Some(itype) = self.itype {
            let mut bm = load_matrix(mem, self.b, n, n, self.ldb)?;
            let r = cholesky::potrf(self.upper, n, &mut bm, self.ldb);
            mem.store(self.b, &bm)?;
            if r != 0 {
                let outcome = jacobi::JacobiOutcome {
                    residual: <T::Real as Scalar>::zero(),
                    sweeps: 0,
                    converged: false,
                };
                return Ok((n as i32 + r, outcome));
            }
            let l = blas::lower_factor(self.upper, n, &bm, self.ldb);
            h = match itype {
                RtEform::Ax => {
                    // C = L^-1 A L^-H = L^-1 (L^-1 A)^H
                    blas::trsm_left(false, RtOperation::None, false, n, n, &l, n, &mut h, n);
                    let mut y = vec![T::zero(); n * n];
                    for j in 0..n {
                        for i in 0..n {
                            y[at(i, j, n)] = h[at(j, i, n)].conj();
                        }
                    }
                    blas::trsm_left(false, RtOperation::None, false, n, n, &l, n, &mut y, n);
                    y
                }
                RtEform::Abx | RtEform::Bax => {
                    let c = RtOperation::ConjugateTranspose;
                    let lh_a = blas::gemm(c, RtOperation::None, n, n, n, &l, n, &h, n);
                    blas::gemm(RtOperation::None, RtOperation::None, n, n, n, &lh_a, n, &l, n)
                }
            };
            factor = Some((itype, l));
        }

        let mut v = self.vectors.then(|| jacobi::identity::<T>(n));
        let outcome =
            jacobi::hermitian_eig(n, &mut h, v.as_deref_mut(), self.abstol, self.max_sweeps);
        let w = jacobi::extract_eigenpairs(n, &h, v.as_deref_mut(), self.sort);
        mem.store(self.w, &w)?;

        if let Some(mut z) = v {
            if let Some((itype, l)) = factor {
                match itype {
                    RtEform::Ax | RtEform::Abx => blas::trsm_left(
                        false,
                        RtOperation::ConjugateTranspose,
                        false,
                        n,
                        n,
                        &l,
                        n,
                        &mut z,
                        n,
                    ),
                    RtEform::Bax => {
                        z = blas::gemm(RtOperation::None, RtOperation::None, n, n, n, &l, n, &z, n)
                    }
                }
            }
            store_matrix(mem, self.a, n, n, self.lda, |i, j| z[at(i, j, n)])?;
        }
        let info = if outcome.converged { 0 } else { 1 };
        Ok((info, outcome))
    }
}

impl HostRuntime {
    /// Register `scratch` with an open size query, or claim it and run `body`
    fn execute<F>(&mut self, scratch: &[usize], body: F) -> RtStatus
    where
        F: FnOnce(&mut DeviceHeap) -> Result<(), RtStatus>,
    {
        let mut mem = self.memory.lock();
        if mem.in_query() {
            return mem.register(scratch);
        }
        let mark = mem.used();
        if let Err(status) = mem.claim(scratch) {
            return status;
        }
        let result = body(&mut mem.heap);
        mem.set_used(mark);
        match result {
            Ok(()) => RtStatus::Success,
            Err(status) => status,
        }
    }
}

impl LapackOps for HostRuntime {
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
    ) -> RtStatus {
        self.enter("geam");
        let m = checked!(dim(m));
        let n = checked!(dim(n));
        let (ar, ac) = if transa == RtOperation::None { (m, n) } else { (n, m) };
        let (br, bc) = if transb == RtOperation::None { (m, n) } else { (n, m) };
        let lda = checked!(leading(lda, ar));
        let ldb = checked!(leading(ldb, br));
        let ldc = checked!(leading(ldc, m));
        self.execute(&[], |mem| {
            if m == 0 || n == 0 {
                return Ok(());
            }
            let am = load_matrix(mem, a, ar, ac, lda)?;
            let bm = if beta == T::zero() {
                None
            } else {
                Some(load_matrix(mem, b, br, bc, ldb)?)
            };
            let mut cm = load_matrix(mem, c, m, n, ldc)?;
            blas::geam(
                transa,
                transb,
                m,
                n,
                alpha,
                &am,
                lda,
                beta,
                bm.as_deref().map(|bm| (bm, ldb)),
                &mut cm,
                ldc,
            );
            mem.store(c, &cm)
        })
    }

    fn potrf<T: Scalar>(
        &mut self,
        uplo: RtFill,
        n: i32,
        a: DevicePtr<T>,
        lda: i32,
        info: DevicePtr<i32>,
    ) -> RtStatus {
        self.enter("potrf");
        let upper = checked!(upper_of(uplo));
        let n = checked!(dim(n));
        let lda = checked!(leading(lda, n));
        self.execute(&[bytes::<T>(n)], |mem| {
            require(mem, info, 1)?;
            let mut am = load_matrix(mem, a, n, n, lda)?;
            let r = cholesky::potrf(upper, n, &mut am, lda);
            mem.store(a, &am)?;
            mem.store(info, &[r])
        })
    }

    fn potrf_batched<T: Scalar>(
        &mut self,
        uplo: RtFill,
        n: i32,
        a: DevicePtr<DevicePtr<T>>,
        lda: i32,
        info: DevicePtr<i32>,
        batch_count: i32,
    ) -> RtStatus {
        self.enter("potrf_batched");
        let upper = checked!(upper_of(uplo));
        let n = checked!(dim(n));
        let lda = checked!(leading(lda, n));
        let batch = checked!(dim(batch_count));
        self.execute(&[bytes::<T>(n * batch)], |mem| {
            require(mem, info, batch)?;
            let ptrs = mem.load(a, batch)?;
            let mut infos = Vec::with_capacity(batch);
            for ptr in ptrs {
                let mut am = load_matrix(mem, ptr, n, n, lda)?;
                infos.push(cholesky::potrf(upper, n, &mut am, lda));
                mem.store(ptr, &am)?;
            }
            mem.store(info, &infos)
        })
    }

    fn potrs<T: Scalar>(
        &mut self,
        uplo: RtFill,
        n: i32,
        nrhs: i32,
        a: DevicePtr<T>,
        lda: i32,
        b: DevicePtr<T>,
        ldb: i32,
    ) -> RtStatus {
        self.enter("potrs");
        let upper = checked!(upper_of(uplo));
        let n = checked!(dim(n));
        let nrhs = checked!(dim(nrhs));
        let lda = checked!(leading(lda, n));
        let ldb = checked!(leading(ldb, n));
        self.execute(&[bytes::<T>(n * nrhs)], |mem| {
            let am = load_matrix(mem, a, n, n, lda)?;
            let mut bm = load_matrix(mem, b, n, nrhs, ldb)?;
            cholesky::potrs(upper, n, nrhs, &am, lda, &mut bm, ldb);
            mem.store(b, &bm)
        })
    }

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
    ) -> RtStatus {
        self.enter("potrs_batched");
        let upper = checked!(upper_of(uplo));
        let n = checked!(dim(n));
        let nrhs = checked!(dim(nrhs));
        let lda = checked!(leading(lda, n));
        let ldb = checked!(leading(ldb, n));
        let batch = checked!(dim(batch_count));
        self.execute(&[bytes::<T>(n * nrhs)], |mem| {
            let aptrs = mem.load(a, batch)?;
            let bptrs = mem.load(b, batch)?;
            for (ap, bp) in aptrs.into_iter().zip(bptrs) {
                let am = load_matrix(mem, ap, n, n, lda)?;
                let mut bm = load_matrix(mem, bp, n, nrhs, ldb)?;
                cholesky::potrs(upper, n, nrhs, &am, lda, &mut bm, ldb);
                mem.store(bp, &bm)?;
            }
            Ok(())
        })
    }

    fn potri<T: Scalar>(
        &mut self,
        uplo: RtFill,
        n: i32,
        a: DevicePtr<T>,
        lda: i32,
        info: DevicePtr<i32>,
    ) -> RtStatus {
        self.enter("potri");
        let upper = checked!(upper_of(uplo));
        let n = checked!(dim(n));
        let lda = checked!(leading(lda, n));
        self.execute(&[bytes::<T>(n * n)], |mem| {
            require(mem, info, 1)?;
            let mut am = load_matrix(mem, a, n, n, lda)?;
            let r = cholesky::potri(upper, n, &mut am, lda);
            mem.store(a, &am)?;
            mem.store(info, &[r])
        })
    }

    fn getrf<T: Scalar>(
        &mut self,
        m: i32,
        n: i32,
        a: DevicePtr<T>,
        lda: i32,
        ipiv: DevicePtr<i32>,
        info: DevicePtr<i32>,
    ) -> RtStatus {
        self.enter("getrf");
        let m = checked!(dim(m));
        let n = checked!(dim(n));
        let lda = checked!(leading(lda, m));
        let k = m.min(n);
        self.execute(&[bytes::<T>(k), k * 4], |mem| {
            require(mem, info, 1)?;
            require(mem, ipiv, k)?;
            let mut am = load_matrix(mem, a, m, n, lda)?;
            let mut piv = vec![0i32; k];
            let r = lu::getrf(m, n, &mut am, lda, Some(&mut piv));
            mem.store(a, &am)?;
            mem.store(ipiv, &piv)?;
            mem.store(info, &[r])
        })
    }

    fn getrf_npvt<T: Scalar>(
        &mut self,
        m: i32,
        n: i32,
        a: DevicePtr<T>,
        lda: i32,
        info: DevicePtr<i32>,
    ) -> RtStatus {
        self.enter("getrf_npvt");
        let m = checked!(dim(m));
        let n = checked!(dim(n));
        let lda = checked!(leading(lda, m));
        self.execute(&[bytes::<T>(m.min(n))], |mem| {
            require(mem, info, 1)?;
            let mut am = load_matrix(mem, a, m, n, lda)?;
            let r = lu::getrf(m, n, &mut am, lda, None);
            mem.store(a, &am)?;
            mem.store(info, &[r])
        })
    }

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
    ) -> RtStatus {
        self.enter("getrs");
        let n = checked!(dim(n));
        let nrhs = checked!(dim(nrhs));
        let lda = checked!(leading(lda, n));
        let ldb = checked!(leading(ldb, n));
        self.execute(&[bytes::<T>(n * nrhs)], |mem| {
            if n == 0 || nrhs == 0 {
                return Ok(());
            }
            let am = load_matrix(mem, a, n, n, lda)?;
            let piv = mem.load(ipiv, n)?;
            let mut bm = load_matrix(mem, b, n, nrhs, ldb)?;
            lu::getrs(trans, n, nrhs, &am, lda, &piv, &mut bm, ldb);
            mem.store(b, &bm)
        })
    }

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
    ) -> RtStatus {
        self.enter("gesv");
        let n = checked!(dim(n));
        let nrhs = checked!(dim(nrhs));
        let lda = checked!(leading(lda, n));
        let ldb = checked!(leading(ldb, n));
        self.execute(&[n * 4, bytes::<T>(n * nrhs)], |mem| {
            require(mem, info, 1)?;
            require(mem, ipiv, n)?;
            let mut am = load_matrix(mem, a, n, n, lda)?;
            let mut bm = load_matrix(mem, b, n, nrhs, ldb)?;
            let mut piv = vec![0i32; n];
            let r = lu::getrf(n, n, &mut am, lda, Some(&mut piv));
            if r == 0 {
                lu::getrs(RtOperation::None, n, nrhs, &am, lda, &piv, &mut bm, ldb);
                mem.store(b, &bm)?;
            }
            mem.store(a, &am)?;
            mem.store(ipiv, &piv)?;
            mem.store(info, &[r])
        })
    }

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
    ) -> RtStatus {
        self.enter("gesv_outofplace");
        let n = checked!(dim(n));
        let nrhs = checked!(dim(nrhs));
        let lda = checked!(leading(lda, n));
        let ldb = checked!(leading(ldb, n));
        let ldx = checked!(leading(ldx, n));
        self.execute(&[n * 4, bytes::<T>(n * nrhs)], |mem| {
            require(mem, info, 1)?;
            require(mem, ipiv, n)?;
            let mut am = load_matrix(mem, a, n, n, lda)?;
            let mut bm = load_matrix(mem, b, n, nrhs, ldb)?;
            let mut piv = vec![0i32; n];
            let r = lu::getrf(n, n, &mut am, lda, Some(&mut piv));
            if r == 0 {
                lu::getrs(RtOperation::None, n, nrhs, &am, lda, &piv, &mut bm, ldb);
                store_matrix(mem, x, n, nrhs, ldx, |i, j| bm[at(i, j, ldb)])?;
            }
            mem.store(a, &am)?;
            mem.store(ipiv, &piv)?;
            mem.store(info, &[r])
        })
    }

    fn geqrf<T: Scalar>(
        &mut self,
        m: i32,
        n: i32,
        a: DevicePtr<T>,
        lda: i32,
        tau: DevicePtr<T>,
    ) -> RtStatus {
        self.enter("geqrf");
        let m = checked!(dim(m));
        let n = checked!(dim(n));
        let lda = checked!(leading(lda, m));
        let k = m.min(n);
        self.execute(&[bytes::<T>(n)], |mem| {
            require(mem, tau, k)?;
            let mut am = load_matrix(mem, a, m, n, lda)?;
            let mut t = vec![T::zero(); k];
            qr::geqrf(m, n, &mut am, lda, &mut t);
            mem.store(a, &am)?;
            mem.store(tau, &t)
        })
    }

    fn orgqr<T: Scalar>(
        &mut self,
        m: i32,
        n: i32,
        k: i32,
        a: DevicePtr<T>,
        lda: i32,
        tau: DevicePtr<T>,
    ) -> RtStatus {
        self.enter("orgqr");
        let m = checked!(dim(m));
        let n = checked!(dim(n));
        let k = checked!(dim(k));
        if n > m || k > n {
            return RtStatus::InvalidSize;
        }
        let lda = checked!(leading(lda, m));
        self.execute(&[bytes::<T>(n)], |mem| {
            let mut am = load_matrix(mem, a, m, n, lda)?;
            let t = mem.load(tau, k)?;
            qr::orgqr(m, n, k, &mut am, lda, &t);
            mem.store(a, &am)
        })
    }

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
    ) -> RtStatus {
        self.enter("ormqr");
        if side == RtSide::Both {
            return RtStatus::InvalidValue;
        }
        let trans = checked!(q_operation::<T>(trans));
        let m = checked!(dim(m));
        let n = checked!(dim(n));
        let k = checked!(dim(k));
        let nq = if side == RtSide::Left { m } else { n };
        if k > nq {
            return RtStatus::InvalidSize;
        }
        let lda = checked!(leading(lda, nq));
        let ldc = checked!(leading(ldc, m));
        self.execute(&[bytes::<T>(m.max(n))], |mem| {
            let am = load_matrix(mem, a, nq, k, lda)?;
            let t = mem.load(tau, k)?;
            let mut cm = load_matrix(mem, c, m, n, ldc)?;
            qr::ormqr(side, trans, m, n, k, &am, lda, &t, &mut cm, ldc);
            mem.store(c, &cm)
        })
    }

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
    ) -> RtStatus {
        self.enter("gels");
        let m = checked!(dim(m));
        let n = checked!(dim(n));
        let nrhs = checked!(dim(nrhs));
        let lda = checked!(leading(lda, m));
        let ldb = checked!(leading(ldb, m.max(n)));
        self.execute(&[bytes::<T>(n), bytes::<T>(n * nrhs)], |mem| {
            if trans != RtOperation::None || m < n {
                return Err(RtStatus::NotImplemented);
            }
            require(mem, info, 1)?;
            let mut am = load_matrix(mem, a, m, n, lda)?;
            let mut bm = load_matrix(mem, b, m, nrhs, ldb)?;
            let r = qr::gels(m, n, nrhs, &mut am, lda, &mut bm, ldb);
            mem.store(a, &am)?;
            mem.store(b, &bm)?;
            mem.store(info, &[r])
        })
    }

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
    ) -> RtStatus {
        self.enter("gels_outofplace");
        let m = checked!(dim(m));
        let n = checked!(dim(n));
        let nrhs = checked!(dim(nrhs));
        let lda = checked!(leading(lda, m));
        let ldb = checked!(leading(ldb, m));
        let ldx = checked!(leading(ldx, n));
        self.execute(&[bytes::<T>(n), bytes::<T>(n * nrhs)], |mem| {
            if trans != RtOperation::None || m < n {
                return Err(RtStatus::NotImplemented);
            }
            require(mem, info, 1)?;
            let mut am = load_matrix(mem, a, m, n, lda)?;
            let mut bm = load_matrix(mem, b, m, nrhs, ldb)?;
            let r = qr::gels(m, n, nrhs, &mut am, lda, &mut bm, ldb);
            mem.store(a, &am)?;
            if r == 0 {
                store_matrix(mem, x, n, nrhs, ldx, |i, j| bm[at(i, j, ldb)])?;
            }
            mem.store(info, &[r])
        })
    }

    fn gebrd<T: Scalar>(
        &mut self,
        m: i32,
        n: i32,
        _a: DevicePtr<T>,
        lda: i32,
        _d: DevicePtr<T::Real>,
        _e: DevicePtr<T::Real>,
        _tauq: DevicePtr<T>,
        _taup: DevicePtr<T>,
    ) -> RtStatus {
        self.enter("gebrd");
        let m = checked!(dim(m));
        let n = checked!(dim(n));
        checked!(leading(lda, m));
        self.execute(&[bytes::<T>(m.max(n))], |_| Err(RtStatus::NotImplemented))
    }

    fn orgbr<T: Scalar>(
        &mut self,
        _storev: RtStorev,
        m: i32,
        n: i32,
        k: i32,
        _a: DevicePtr<T>,
        lda: i32,
        _tau: DevicePtr<T>,
    ) -> RtStatus {
        self.enter("orgbr");
        let m = checked!(dim(m));
        let n = checked!(dim(n));
        checked!(dim(k));
        checked!(leading(lda, m));
        self.execute(&[bytes::<T>(m.min(n))], |_| Err(RtStatus::NotImplemented))
    }

    fn sytrd<T: Scalar>(
        &mut self,
        uplo: RtFill,
        n: i32,
        _a: DevicePtr<T>,
        lda: i32,
        _d: DevicePtr<T::Real>,
        _e: DevicePtr<T::Real>,
        _tau: DevicePtr<T>,
    ) -> RtStatus {
        self.enter("sytrd");
        checked!(upper_of(uplo));
        let n = checked!(dim(n));
        checked!(leading(lda, n));
        self.execute(&[bytes::<T>(n)], |_| Err(RtStatus::NotImplemented))
    }

    fn orgtr<T: Scalar>(
        &mut self,
        uplo: RtFill,
        n: i32,
        _a: DevicePtr<T>,
        lda: i32,
        _tau: DevicePtr<T>,
    ) -> RtStatus {
        self.enter("orgtr");
        checked!(upper_of(uplo));
        let n = checked!(dim(n));
        checked!(leading(lda, n));
        self.execute(&[bytes::<T>(n)], |_| Err(RtStatus::NotImplemented))
    }

    fn ormtr<T: Scalar>(
        &mut self,
        side: RtSide,
        uplo: RtFill,
        trans: RtOperation,
        m: i32,
        n: i32,
        _a: DevicePtr<T>,
        lda: i32,
        _tau: DevicePtr<T>,
        _c: DevicePtr<T>,
        ldc: i32,
    ) -> RtStatus {
        self.enter("ormtr");
        if side == RtSide::Both {
            return RtStatus::InvalidValue;
        }
        checked!(upper_of(uplo));
        checked!(q_operation::<T>(trans));
        let m = checked!(dim(m));
        let n = checked!(dim(n));
        let nq = if side == RtSide::Left { m } else { n };
        checked!(leading(lda, nq));
        checked!(leading(ldc, m));
        self.execute(&[bytes::<T>(m.max(n))], |_| Err(RtStatus::NotImplemented))
    }

    fn sytrf<T: Scalar>(
        &mut self,
        uplo: RtFill,
        n: i32,
        _a: DevicePtr<T>,
        lda: i32,
        _ipiv: DevicePtr<i32>,
        _info: DevicePtr<i32>,
    ) -> RtStatus {
        self.enter("sytrf");
        checked!(upper_of(uplo));
        let n = checked!(dim(n));
        checked!(leading(lda, n));
        self.execute(&[bytes::<T>(n * n)], |_| Err(RtStatus::NotImplemented))
    }

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
        _fast_alg: RtWorkmode,
        info: DevicePtr<i32>,
    ) -> RtStatus {
        self.enter("gesvd");
        let m = checked!(dim(m));
        let n = checked!(dim(n));
        let lda = checked!(leading(lda, m));
        let (ldu, ldv) = checked!(svd_layout(left_svect, right_svect, m, n, ldu, ldv, true));
        let out = SvdOutput {
            left: left_svect,
            right: right_svect,
            a,
            lda,
            s,
            u,
            ldu,
            v,
            ldv,
        };
        self.execute(&[bytes::<T>(m * n + m * m + n * n)], |mem| {
            require(mem, info, 1)?;
            let k = m.min(n);
            require(mem, e, k.saturating_sub(1))?;
            let outcome = out.compute(mem, m, n, <T::Real as Scalar>::zero(), DRIVER_MAX_SWEEPS)?;
            mem.store(e, &vec![<T::Real as Scalar>::zero(); k.saturating_sub(1)])?;
            mem.store(info, &[if outcome.converged { 0 } else { 1 }])
        })
    }

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
        _fast_alg: RtWorkmode,
        info: DevicePtr<i32>,
        batch_count: i32,
    ) -> RtStatus {
        self.enter("gesvd_strided_batched");
        let m = checked!(dim(m));
        let n = checked!(dim(n));
        let lda = checked!(leading(lda, m));
        let (ldu, ldv) = checked!(svd_layout(left_svect, right_svect, m, n, ldu, ldv, true));
        let batch = checked!(dim(batch_count));
        let sa = checked!(stride(stride_a));
        let ss = checked!(stride(stride_s));
        let su = checked!(stride(stride_u));
        let sv = checked!(stride(stride_v));
        let se = checked!(stride(stride_e));
        self.execute(&[bytes::<T>(m * n + m * m + n * n)], |mem| {
            require(mem, info, batch)?;
            let k = m.min(n);
            let mut infos = Vec::with_capacity(batch);
            for j in 0..batch {
                let out = SvdOutput {
                    left: left_svect,
                    right: right_svect,
                    a: a.add(j * sa),
                    lda,
                    s: s.add(j * ss),
                    u: u.add(j * su),
                    ldu,
                    v: v.add(j * sv),
                    ldv,
                };
                let outcome =
                    out.compute(mem, m, n, <T::Real as Scalar>::zero(), DRIVER_MAX_SWEEPS)?;
                mem.store(
                    e.add(j * se),
                    &vec![<T::Real as Scalar>::zero(); k.saturating_sub(1)],
                )?;
                infos.push(if outcome.converged { 0 } else { 1 });
            }
            mem.store(info, &infos)
        })
    }

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
    ) -> RtStatus {
        self.enter("gesvdj");
        let m = checked!(dim(m));
        let n = checked!(dim(n));
        let lda = checked!(leading(lda, m));
        let (ldu, ldv) = checked!(svd_layout(left_svect, right_svect, m, n, ldu, ldv, false));
        if max_sweeps < 1 {
            return RtStatus::InvalidSize;
        }
        let out = SvdOutput {
            left: left_svect,
            right: right_svect,
            a,
            lda,
            s,
            u,
            ldu,
            v,
            ldv,
        };
        self.execute(&[bytes::<T>(m * n + m * m + n * n)], |mem| {
            if m == 0 || n == 0 {
                return finish_empty(mem, info, 1);
            }
            require(mem, info, 1)?;
            require(mem, residual, 1)?;
            require(mem, n_sweeps, 1)?;
            let outcome = out.compute(mem, m, n, abstol, max_sweeps)?;
            mem.store(residual, &[outcome.residual])?;
            mem.store(n_sweeps, &[outcome.sweeps])?;
            mem.store(info, &[if outcome.converged { 0 } else { 1 }])
        })
    }

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
    ) -> RtStatus {
        self.enter("gesvdj_strided_batched");
        let m = checked!(dim(m));
        let n = checked!(dim(n));
        let lda = checked!(leading(lda, m));
        let (ldu, ldv) = checked!(svd_layout(left_svect, right_svect, m, n, ldu, ldv, false));
        if max_sweeps < 1 {
            return RtStatus::InvalidSize;
        }
        let batch = checked!(dim(batch_count));
        let sa = checked!(stride(stride_a));
        let ss = checked!(stride(stride_s));
        let su = checked!(stride(stride_u));
        let sv = checked!(stride(stride_v));
        self.execute(&[bytes::<T>(m * n + m * m + n * n)], |mem| {
            if m == 0 || n == 0 {
                return finish_empty(mem, info, batch);
            }
            require(mem, info, batch)?;
            require(mem, residual, batch)?;
            require(mem, n_sweeps, batch)?;
            let mut residuals = Vec::with_capacity(batch);
            let mut sweeps = Vec::with_capacity(batch);
            let mut infos = Vec::with_capacity(batch);
            for j in 0..batch {
                let out = SvdOutput {
                    left: left_svect,
                    right: right_svect,
                    a: a.add(j * sa),
                    lda,
                    s: s.add(j * ss),
                    u: u.add(j * su),
                    ldu,
                    v: v.add(j * sv),
                    ldv,
                };
                let outcome = out.compute(mem, m, n, abstol, max_sweeps)?;
                residuals.push(outcome.residual);
                sweeps.push(outcome.sweeps);
                infos.push(if outcome.converged { 0 } else { 1 });
            }
            mem.store(residual, &residuals)?;
            mem.store(n_sweeps, &sweeps)?;
            mem.store(info, &infos)
        })
    }

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
    ) -> RtStatus {
        self.enter("syevd");
        let vectors = checked!(wants_vectors(evect));
        let upper = checked!(upper_of(uplo));
        let n = checked!(dim(n));
        let lda = checked!(leading(lda, n));
        let problem = EigProblem {
            itype: None,
            vectors,
            upper,
            n,
            a,
            lda,
            b: DevicePtr::null(),
            ldb: 1,
            w,
            sort: true,
            abstol: <T::Real as Scalar>::zero(),
            max_sweeps: DRIVER_MAX_SWEEPS,
        };
        self.execute(&[bytes::<T>(n * n)], |mem| {
            require(mem, info, 1)?;
            require(mem, e, n)?;
            let (r, _) = problem.solve(mem)?;
            mem.store(e, &vec![<T::Real as Scalar>::zero(); n])?;
            mem.store(info, &[r])
        })
    }

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
    ) -> RtStatus {
        self.enter("sygvd");
        let vectors = checked!(wants_vectors(evect));
        let upper = checked!(upper_of(uplo));
        let n = checked!(dim(n));
        let lda = checked!(leading(lda, n));
        let ldb = checked!(leading(ldb, n));
        let problem = EigProblem {
            itype: Some(itype),
            vectors,
            upper,
            n,
            a,
            lda,
            b,
            ldb,
            w,
            sort: true,
            abstol: <T::Real as Scalar>::zero(),
            max_sweeps: DRIVER_MAX_SWEEPS,
        };
        self.execute(&[bytes::<T>(2 * n * n)], |mem| {
            require(mem, info, 1)?;
            require(mem, e, n)?;
            let (r, _) = problem.solve(mem)?;
            mem.store(e, &vec![<T::Real as Scalar>::zero(); n])?;
            mem.store(info, &[r])
        })
    }

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
    ) -> RtStatus {
        self.enter("syevj");
        let vectors = checked!(wants_vectors(evect));
        let upper = checked!(upper_of(uplo));
        let n = checked!(dim(n));
        let lda = checked!(leading(lda, n));
        if max_sweeps < 1 {
            return RtStatus::InvalidSize;
        }
        let problem = EigProblem {
            itype: None,
            vectors,
            upper,
            n,
            a,
            lda,
            b: DevicePtr::null(),
            ldb: 1,
            w,
            sort: esort == RtEsort::Ascending,
            abstol,
            max_sweeps,
        };
        self.execute(&[bytes::<T>(n * n)], |mem| {
            if n == 0 {
                return finish_empty(mem, info, 1);
            }
            require(mem, info, 1)?;
            require(mem, residual, 1)?;
            require(mem, n_sweeps, 1)?;
            let (r, outcome) = problem.solve(mem)?;
            mem.store(residual, &[outcome.residual])?;
            mem.store(n_sweeps, &[outcome.sweeps])?;
            mem.store(info, &[r])
        })
    }

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
    ) -> RtStatus {
        self.enter("syevj_strided_batched");
        let vectors = checked!(wants_vectors(evect));
        let upper = checked!(upper_of(uplo));
        let n = checked!(dim(n));
        let lda = checked!(leading(lda, n));
        if max_sweeps < 1 {
            return RtStatus::InvalidSize;
        }
        let batch = checked!(dim(batch_count));
        let sa = checked!(stride(stride_a));
        let sw = checked!(stride(stride_w));
        self.execute(&[bytes::<T>(n * n)], |mem| {
            if n == 0 {
                return finish_empty(mem, info, batch);
            }
            require(mem, info, batch)?;
            require(mem, residual, batch)?;
            require(mem, n_sweeps, batch)?;
            let mut residuals = Vec::with_capacity(batch);
            let mut sweeps = Vec::with_capacity(batch);
            let mut infos = Vec::with_capacity(batch);
            for j in 0..batch {
                let problem = EigProblem {
                    itype: None,
                    vectors,
                    upper,
                    n,
                    a: a.add(j * sa),
                    lda,
                    b: DevicePtr::null(),
                    ldb: 1,
                    w: w.add(j * sw),
                    sort: esort == RtEsort::Ascending,
                    abstol,
                    max_sweeps,
                };
                let (r, outcome) = problem.solve(mem)?;
                residuals.push(outcome.residual);
                sweeps.push(outcome.sweeps);
                infos.push(r);
            }
            mem.store(residual, &residuals)?;
            mem.store(n_sweeps, &sweeps)?;
            mem.store(info, &infos)
        })
    }

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
    ) -> RtStatus {
        self.enter("sygvj");
        let vectors = checked!(wants_vectors(evect));
        let upper = checked!(upper_of(uplo));
        let n = checked!(dim(n));
        let lda = checked!(leading(lda, n));
        let ldb = checked!(leading(ldb, n));
        if max_sweeps < 1 {
            return RtStatus::InvalidSize;
        }
        let problem = EigProblem {
            itype: Some(itype),
            vectors,
            upper,
            n,
            a,
            lda,
            b,
            ldb,
            w,
            sort: true,
            abstol,
            max_sweeps,
        };
        self.execute(&[bytes::<T>(2 * n * n)], |mem| {
            if n == 0 {
                return finish_empty(mem, info, 1);
            }
            require(mem, info, 1)?;
            require(mem, residual, 1)?;
            require(mem, n_sweeps, 1)?;
            let (r, outcome) = problem.solve(mem)?;
            mem.store(residual, &[outcome.residual])?;
            mem.store(n_sweeps, &[outcome.sweeps])?;
            mem.store(info, &[r])
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::Runtime;

    fn upload<T: bytemuck::Pod>(rt: &mut HostRuntime, data: &[T]) -> DevicePtr<T> {
        let bytes: &[u8] = bytemuck::cast_slice(data);
        let ptr = rt.allocate(bytes.len()).unwrap();
        assert!(rt.copy_to_device(bytes, ptr).is_success_like());
        ptr.cast()
    }

    fn download<T: bytemuck::Pod>(rt: &HostRuntime, ptr: DevicePtr<T>, count: usize) -> Vec<T> {
        let mut out = vec![T::zeroed(); count];
        assert!(
            rt.copy_from_device(ptr.cast(), bytemuck::cast_slice_mut(&mut out))
                .is_success_like()
        );
        out
    }

    #[test]
    fn test_query_registers_without_touching_pointers() {
        let mut rt = HostRuntime::new();
        rt.start_memory_size_query();
        let status = rt.potrf::<f64>(
            RtFill::Lower,
            10,
            DevicePtr::null(),
            10,
            DevicePtr::null(),
        );
        assert_eq!(status, RtStatus::SizeIncreased);
        assert_eq!(rt.stop_memory_size_query(), Ok(128));
    }

    #[test]
    fn test_sizes_are_validated_before_query() {
        let mut rt = HostRuntime::new();
        rt.start_memory_size_query();
        let status = rt.potrf::<f64>(RtFill::Lower, 4, DevicePtr::null(), 3, DevicePtr::null());
        assert_eq!(status, RtStatus::InvalidSize);
        let _ = rt.stop_memory_size_query();
    }

    #[test]
    fn test_execution_needs_scratch() {
        let mut rt = HostRuntime::new();
        let a = upload(&mut rt, &[4.0f64, 2.0, 2.0, 3.0]);
        let info = upload(&mut rt, &[0i32]);
        assert_eq!(
            rt.potrf(RtFill::Lower, 2, a, 2, info),
            RtStatus::MemoryError
        );
        rt.set_memory_size(64);
        assert_eq!(rt.potrf(RtFill::Lower, 2, a, 2, info), RtStatus::Success);
        assert_eq!(download(&rt, info, 1), vec![0]);
        assert_eq!(download(&rt, a, 1), vec![2.0]);
    }

    #[test]
    fn test_null_info_is_invalid_pointer() {
        let mut rt = HostRuntime::builder().initial_memory(1024).build();
        let a = upload(&mut rt, &[1.0f64]);
        assert_eq!(
            rt.potrf(RtFill::Upper, 1, a, 1, DevicePtr::null()),
            RtStatus::InvalidPointer
        );
    }

    #[test]
    fn test_empty_jacobi_needs_no_residual_or_sweeps() {
        let mut rt = HostRuntime::builder().initial_memory(1024).build();
        let info = upload(&mut rt, &[7i32, 7]);
        let null = DevicePtr::<f64>::null();
        let status = rt.syevj::<f64>(
            RtEsort::Ascending,
            RtEvect::Original,
            RtFill::Lower,
            0,
            null,
            1,
            0.0,
            null,
            100,
            DevicePtr::null(),
            null,
            info,
        );
        assert_eq!(status, RtStatus::Success);
        assert_eq!(download(&rt, info, 2), vec![0, 7]);

        let status = rt.gesvdj_strided_batched::<f64>(
            RtSvect::None,
            RtSvect::None,
            3,
            0,
            null,
            3,
            0,
            0.0,
            null,
            100,
            DevicePtr::null(),
            null,
            0,
            null,
            1,
            0,
            null,
            1,
            0,
            info,
            2,
        );
        assert_eq!(status, RtStatus::Success);
        assert_eq!(download(&rt, info, 2), vec![0, 0]);

        // A non-empty problem still needs both
        let a = upload(&mut rt, &[2.0f64]);
        let w = upload(&mut rt, &[0.0f64]);
        let status = rt.syevj::<f64>(
            RtEsort::Ascending,
            RtEvect::None,
            RtFill::Lower,
            1,
            a,
            1,
            0.0,
            null,
            100,
            DevicePtr::null(),
            w,
            info,
        );
        assert_eq!(status, RtStatus::InvalidPointer);
    }

    #[test]
    fn test_reductions_are_size_query_only() {
        let mut rt = HostRuntime::builder().initial_memory(1024).build();
        rt.start_memory_size_query();
        let null = DevicePtr::<f32>::null();
        let (d, e) = (DevicePtr::null(), DevicePtr::null());
        let status = rt.sytrd(RtFill::Upper, 8, null, 8, d, e, null);
        assert_eq!(status, RtStatus::SizeIncreased);
        let _ = rt.stop_memory_size_query();
        let (d, e) = (DevicePtr::null(), DevicePtr::null());
        let status = rt.sytrd(RtFill::Upper, 8, null, 8, d, e, null);
        assert_eq!(status, RtStatus::NotImplemented);
    }

    #[test]
    fn test_geam_conjugate_transpose() {
        use crate::dtype::Complex64;
        let mut rt = HostRuntime::new();
        let a = upload(&mut rt, &[Complex64::new(1.0, 2.0), Complex64::new(3.0, -1.0)]);
        let c = upload(&mut rt, &[Complex64::ZERO; 2]);
        let status = rt.geam(
            RtOperation::ConjugateTranspose,
            RtOperation::None,
            1,
            2,
            Complex64::ONE,
            a,
            2,
            Complex64::ZERO,
            c,
            1,
            c,
            1,
        );
        assert_eq!(status, RtStatus::Success);
        assert_eq!(
            download(&rt, c, 2),
            vec![Complex64::new(1.0, -2.0), Complex64::new(3.0, 1.0)]
        );
    }
}
