//! Householder QR: factorization, Q generation, Q application, least squares
//!
//! Reflectors follow the LAPACK convention H = I - tau v v^H with v(0) = 1
//! implicit and the rest of v stored below the diagonal of A.

use super::blas::{at, nrm2, trsm_left};
use crate::dtype::{RealScalar, Scalar};
use crate::runtime::{RtOperation, RtSide};

/// Generate an elementary reflector that maps `[alpha, x]` onto `[beta, 0]`
///
/// Overwrites `x` with v(1..) and returns `(beta, tau)`.
fn larfg<T: Scalar>(alpha: T, x: &mut [T]) -> (T, T) {
    let rzero = <T::Real as Scalar>::zero();
    let xnorm = nrm2(x);
    let alpha_re = alpha.re();
    let alpha_is_real = (alpha - T::from_real(alpha_re)).abs() == rzero;
    if xnorm == rzero && alpha_is_real {
        return (alpha, T::zero());
    }
    let norm = (alpha.abs_sqr() + xnorm * xnorm).sqrt();
    let beta = if alpha_re >= rzero { -norm } else { norm };
    let beta_t = T::from_real(beta);
    let tau = (beta_t - alpha) / beta_t;
    let scal = T::one() / (alpha - beta_t);
    for v in x.iter_mut() {
        *v = *v * scal;
    }
    (beta_t, tau)
}

/// C(rows, cols) := (I - tau v v^H) C, v indexed from `row0`
fn apply_left<T: Scalar>(
    v: &[T],
    tau: T,
    c: &mut [T],
    ldc: usize,
    row0: usize,
    cols: std::ops::Range<usize>,
) {
    if tau == T::zero() {
        return;
    }
    for j in cols {
        let mut w = T::zero();
        for (k, &vk) in v.iter().enumerate() {
            w = w + vk.conj() * c[at(row0 + k, j, ldc)];
        }
        let w = tau * w;
        for (k, &vk) in v.iter().enumerate() {
            let idx = at(row0 + k, j, ldc);
            c[idx] = c[idx] - vk * w;
        }
    }
}

/// C(rows, cols) := C (I - tau v v^H), v indexed from `col0`
fn apply_right<T: Scalar>(
    v: &[T],
    tau: T,
    c: &mut [T],
    ldc: usize,
    col0: usize,
    rows: usize,
) {
    if tau == T::zero() {
        return;
    }
    for i in 0..rows {
        let mut w = T::zero();
        for (k, &vk) in v.iter().enumerate() {
            w = w + c[at(i, col0 + k, ldc)] * vk;
        }
        let w = tau * w;
        for (k, &vk) in v.iter().enumerate() {
            let idx = at(i, col0 + k, ldc);
            c[idx] = c[idx] - w * vk.conj();
        }
    }
}

/// Reflector `i` of a factored `rows x k` matrix as an explicit vector
fn reflector<T: Scalar>(a: &[T], lda: usize, rows: usize, i: usize) -> Vec<T> {
    let mut v = Vec::with_capacity(rows - i);
    v.push(T::one());
    v.extend((i + 1..rows).map(|r| a[at(r, i, lda)]));
    v
}

/// A = Q R in place; `tau` receives min(m, n) scalars
pub fn geqrf<T: Scalar>(m: usize, n: usize, a: &mut [T], lda: usize, tau: &mut [T]) {
    for i in 0..m.min(n) {
        let alpha = a[at(i, i, lda)];
        let mut x: Vec<T> = (i + 1..m).map(|r| a[at(r, i, lda)]).collect();
        let (beta, t) = larfg(alpha, &mut x);
        for (k, &xv) in x.iter().enumerate() {
            a[at(i + 1 + k, i, lda)] = xv;
        }
        a[at(i, i, lda)] = T::one();
        let v = reflector(a, lda, m, i);
        apply_left(&v, t.conj(), a, lda, i, i + 1..n);
        a[at(i, i, lda)] = beta;
        tau[i] = t;
    }
}

/// Overwrite the `m x n` reflector block with the first n columns of Q = H(0) … H(k-1)
pub fn orgqr<T: Scalar>(m: usize, n: usize, k: usize, a: &mut [T], lda: usize, tau: &[T]) {
    let reflectors: Vec<Vec<T>> = (0..k).map(|i| reflector(a, lda, m, i)).collect();
    for j in 0..n {
        for i in 0..m {
            a[at(i, j, lda)] = if i == j { T::one() } else { T::zero() };
        }
    }
    for i in (0..k).rev() {
        apply_left(&reflectors[i], tau[i], a, lda, i, i..n);
    }
}

/// C := op(Q) C or C op(Q) with Q from [`geqrf`]
///
/// For real types `Transpose` and `ConjugateTranspose` coincide.
pub fn ormqr<T: Scalar>(
    side: RtSide,
    trans: RtOperation,
    m: usize,
    n: usize,
    k: usize,
    a: &[T],
    lda: usize,
    tau: &[T],
    c: &mut [T],
    ldc: usize,
) {
    let nq = if side == RtSide::Left { m } else { n };
    let adjoint = trans != RtOperation::None;
    // Q C and C Q^H apply H(k-1) first; Q^H C and C Q apply H(0) first
    let reverse = (side == RtSide::Left) != adjoint;
    let order: Vec<usize> = if reverse {
        (0..k).rev().collect()
    } else {
        (0..k).collect()
    };
    for i in order {
        let v = reflector(a, lda, nq, i);
        let t = if adjoint { tau[i].conj() } else { tau[i] };
        if side == RtSide::Left {
            apply_left(&v, t, c, ldc, i, 0..n);
        } else {
            apply_right(&v, t, c, ldc, i, m);
        }
    }
}

/// Least squares min ||A X - B|| for full-rank `m >= n` A, overwriting B
///
/// On return the leading `n x nrhs` block of B holds X. Returns `i + 1` if
/// R has an exactly-zero diagonal element at `i`.
pub fn gels<T: Scalar>(
    m: usize,
    n: usize,
    nrhs: usize,
    a: &mut [T],
    lda: usize,
    b: &mut [T],
    ldb: usize,
) -> i32 {
    let mut tau = vec![T::zero(); n];
    geqrf(m, n, a, lda, &mut tau);
    for i in 0..n {
        if a[at(i, i, lda)] == T::zero() {
            return (i + 1) as i32;
        }
    }
    ormqr(
        RtSide::Left,
        RtOperation::ConjugateTranspose,
        m,
        nrhs,
        n,
        a,
        lda,
        &tau,
        b,
        ldb,
    );
    trsm_left(true, RtOperation::None, false, n, nrhs, a, lda, b, ldb);
    0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dtype::Complex128;

    #[test]
    fn test_qr_reconstructs_a() {
        // 3x2 A
        let a0 = [1.0f64, 2.0, 2.0, 0.0, 1.0, 3.0];
        let mut a = a0;
        let mut tau = [0.0f64; 2];
        geqrf(3, 2, &mut a, 3, &mut tau);

        // R from the upper triangle, Q R reproduces A
        let mut r = [0.0f64; 6];
        r[0] = a[0];
        r[3] = a[3];
        r[4] = a[4];
        ormqr(RtSide::Left, RtOperation::None, 3, 2, 2, &a, 3, &tau, &mut r, 3);
        for (x, y) in r.iter().zip(a0.iter()) {
            assert!((x - y).abs() < 1e-12, "{x} vs {y}");
        }
    }

    #[test]
    fn test_orgqr_is_orthonormal() {
        let mut a = [
            Complex128::new(1.0, 1.0),
            Complex128::new(0.0, 2.0),
            Complex128::new(3.0, 0.0),
            Complex128::new(2.0, -1.0),
            Complex128::new(1.0, 0.0),
            Complex128::new(0.0, 1.0),
        ];
        let mut tau = [Complex128::ZERO; 2];
        geqrf(3, 2, &mut a, 3, &mut tau);
        orgqr(3, 2, 2, &mut a, 3, &tau);
        for p in 0..2 {
            for q in 0..2 {
                let mut dot = Complex128::ZERO;
                for i in 0..3 {
                    dot = dot + a[at(i, p, 3)].conj() * a[at(i, q, 3)];
                }
                let expected = if p == q { 1.0 } else { 0.0 };
                assert!((dot - Complex128::new(expected, 0.0)).magnitude() < 1e-12);
            }
        }
    }

    #[test]
    fn test_gels_overdetermined() {
        // Fit y = 1 + 2 t exactly at t = 0, 1, 2
        let mut a = [1.0f64, 1.0, 1.0, 0.0, 1.0, 2.0];
        let mut b = [1.0f64, 3.0, 5.0];
        assert_eq!(gels(3, 2, 1, &mut a, 3, &mut b, 3), 0);
        assert!((b[0] - 1.0).abs() < 1e-12);
        assert!((b[1] - 2.0).abs() < 1e-12);
    }
}
