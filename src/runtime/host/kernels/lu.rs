//! LU factorization and solve

use super::blas::{at, trsm_left};
use crate::dtype::Scalar;
use crate::runtime::RtOperation;

/// Factor A = P L U in place
///
/// With `ipiv`, rows are pivoted on the largest magnitude in each column and
/// the 1-based pivot rows are written to `ipiv`; without it no pivoting
/// happens. Returns 0 or the 1-based index of the first exactly-zero pivot
/// (the factorization still completes).
pub fn getrf<T: Scalar>(
    m: usize,
    n: usize,
    a: &mut [T],
    lda: usize,
    mut ipiv: Option<&mut [i32]>,
) -> i32 {
    let mut info = 0;
    for j in 0..m.min(n) {
        let mut p = j;
        if ipiv.is_some() {
            let mut best = a[at(j, j, lda)].abs();
            for i in j + 1..m {
                let v = a[at(i, j, lda)].abs();
                if v > best {
                    best = v;
                    p = i;
                }
            }
        }
        if let Some(ipiv) = ipiv.as_deref_mut() {
            ipiv[j] = (p + 1) as i32;
        }
        let pivot = a[at(p, j, lda)];
        if pivot == T::zero() {
            if info == 0 {
                info = (j + 1) as i32;
            }
            continue;
        }
        if p != j {
            for k in 0..n {
                a.swap(at(p, k, lda), at(j, k, lda));
            }
        }
        for i in j + 1..m {
            a[at(i, j, lda)] = a[at(i, j, lda)] / pivot;
        }
        for k in j + 1..n {
            let ajk = a[at(j, k, lda)];
            if ajk == T::zero() {
                continue;
            }
            for i in j + 1..m {
                a[at(i, k, lda)] = a[at(i, k, lda)] - a[at(i, j, lda)] * ajk;
            }
        }
    }
    info
}

fn swap_rows<T: Scalar>(b: &mut [T], ldb: usize, nrhs: usize, r1: usize, r2: usize) {
    if r1 == r2 {
        return;
    }
    for k in 0..nrhs {
        b.swap(at(r1, k, ldb), at(r2, k, ldb));
    }
}

/// Solve op(A) X = B with the factor from [`getrf`], overwriting B
pub fn getrs<T: Scalar>(
    trans: RtOperation,
    n: usize,
    nrhs: usize,
    a: &[T],
    lda: usize,
    ipiv: &[i32],
    b: &mut [T],
    ldb: usize,
) {
    if n == 0 || nrhs == 0 {
        return;
    }
    let pivot_row = |i: usize| (ipiv[i] - 1).max(0) as usize;
    match trans {
        RtOperation::None => {
            for i in 0..n {
                swap_rows(b, ldb, nrhs, i, pivot_row(i));
            }
            trsm_left(false, trans, true, n, nrhs, a, lda, b, ldb);
            trsm_left(true, trans, false, n, nrhs, a, lda, b, ldb);
        }
        RtOperation::Transpose | RtOperation::ConjugateTranspose => {
            trsm_left(true, trans, false, n, nrhs, a, lda, b, ldb);
            trsm_left(false, trans, true, n, nrhs, a, lda, b, ldb);
            for i in (0..n).rev() {
                swap_rows(b, ldb, nrhs, i, pivot_row(i));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_getrf_pivots_and_solves() {
        // A = [[1, 2], [3, 4]]
        let mut a = [1.0f64, 3.0, 2.0, 4.0];
        let mut ipiv = [0i32; 2];
        assert_eq!(getrf(2, 2, &mut a, 2, Some(&mut ipiv)), 0);
        assert_eq!(ipiv, [2, 2]);

        // A x = [5, 11] has x = [1, 2]
        let mut b = [5.0f64, 11.0];
        getrs(RtOperation::None, 2, 1, &a, 2, &ipiv, &mut b, 2);
        assert!((b[0] - 1.0).abs() < 1e-14 && (b[1] - 2.0).abs() < 1e-14);

        // A^T x = [7, 10] has x = [1, 2]
        let mut b = [7.0f64, 10.0];
        getrs(RtOperation::Transpose, 2, 1, &a, 2, &ipiv, &mut b, 2);
        assert!((b[0] - 1.0).abs() < 1e-14 && (b[1] - 2.0).abs() < 1e-14);
    }

    #[test]
    fn test_getrf_reports_singular() {
        let mut a = [1.0f64, 2.0, 2.0, 4.0];
        let mut ipiv = [0i32; 2];
        assert_eq!(getrf(2, 2, &mut a, 2, Some(&mut ipiv)), 2);
    }

    #[test]
    fn test_getrf_without_pivoting() {
        let mut a = [2.0f64, 4.0, 1.0, 3.0];
        assert_eq!(getrf(2, 2, &mut a, 2, None), 0);
        assert_eq!(a, [2.0, 2.0, 1.0, 1.0]);
    }
}
