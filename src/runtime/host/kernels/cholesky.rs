//! Cholesky factorization, solve and inverse

use super::blas::{at, trsm_left};
use crate::dtype::{RealScalar, Scalar};
use crate::runtime::RtOperation;

/// Factor A = L L^H (lower) or A = U^H U (upper) in place
///
/// Returns 0 on success or `j + 1` if the leading minor of order `j + 1` is
/// not positive definite.
pub fn potrf<T: Scalar>(upper: bool, n: usize, a: &mut [T], lda: usize) -> i32 {
    let zero = <T::Real as Scalar>::zero();
    let one = <T::Real as Scalar>::one();
    for j in 0..n {
        let mut d = a[at(j, j, lda)].re();
        for k in 0..j {
            let f = if upper { a[at(k, j, lda)] } else { a[at(j, k, lda)] };
            d = d - f.abs_sqr();
        }
        // NaN fails the comparison as well
        if !(d > zero) {
            return (j + 1) as i32;
        }
        let djj = d.sqrt();
        a[at(j, j, lda)] = T::from_real(djj);
        let inv = one / djj;
        for i in j + 1..n {
            if upper {
                let mut s = a[at(j, i, lda)];
                for k in 0..j {
                    s = s - a[at(k, j, lda)].conj() * a[at(k, i, lda)];
                }
                a[at(j, i, lda)] = s.scale(inv);
            } else {
                let mut s = a[at(i, j, lda)];
                for k in 0..j {
                    s = s - a[at(i, k, lda)] * a[at(j, k, lda)].conj();
                }
                a[at(i, j, lda)] = s.scale(inv);
            }
        }
    }
    0
}

/// Solve A X = B with the factor from [`potrf`], overwriting B
pub fn potrs<T: Scalar>(
    upper: bool,
    n: usize,
    nrhs: usize,
    a: &[T],
    lda: usize,
    b: &mut [T],
    ldb: usize,
) {
    let c = RtOperation::ConjugateTranspose;
    if upper {
        trsm_left(true, c, false, n, nrhs, a, lda, b, ldb);
        trsm_left(true, RtOperation::None, false, n, nrhs, a, lda, b, ldb);
    } else {
        trsm_left(false, RtOperation::None, false, n, nrhs, a, lda, b, ldb);
        trsm_left(false, c, false, n, nrhs, a, lda, b, ldb);
    }
}

/// Replace the factor from [`potrf`] with the stored triangle of inv(A)
///
/// Returns `i + 1` if the factor has a zero diagonal element at `i`.
pub fn potri<T: Scalar>(upper: bool, n: usize, a: &mut [T], lda: usize) -> i32 {
    for i in 0..n {
        if a[at(i, i, lda)] == T::zero() {
            return (i + 1) as i32;
        }
    }
    let mut inv = vec![T::zero(); n * n];
    for i in 0..n {
        inv[at(i, i, n)] = T::one();
    }
    potrs(upper, n, n, a, lda, &mut inv, n);
    for j in 0..n {
        for i in 0..n {
            let stored = if upper { i <= j } else { i >= j };
            if stored {
                a[at(i, j, lda)] = inv[at(i, j, n)];
            }
        }
    }
    0
}
