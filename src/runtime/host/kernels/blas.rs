//! Level-2/3 helpers: element access, geam, triangular solves, small products

use crate::dtype::Scalar;
use crate::runtime::RtOperation;

/// Linear index of element `(i, j)`
#[inline]
pub fn at(i: usize, j: usize, ld: usize) -> usize {
    i + j * ld
}

/// Number of elements a `rows x cols` matrix with leading dimension `ld` spans
#[inline]
pub fn span(rows: usize, cols: usize, ld: usize) -> usize {
    if rows == 0 || cols == 0 {
        0
    } else {
        ld * (cols - 1) + rows
    }
}

/// Element `(i, j)` of `op(A)`
#[inline]
pub fn op_at<T: Scalar>(
    op: RtOperation,
    a: &[T],
    lda: usize,
    i: usize,
    j: usize,
) -> T {
    match op {
        RtOperation::None => a[at(i, j, lda)],
        RtOperation::Transpose => a[at(j, i, lda)],
        RtOperation::ConjugateTranspose => a[at(j, i, lda)].conj(),
    }
}

/// C = alpha op(A) + beta op(B); B is not read when beta is zero
pub fn geam<T: Scalar>(
    transa: RtOperation,
    transb: RtOperation,
    m: usize,
    n: usize,
    alpha: T,
    a: &[T],
    lda: usize,
    beta: T,
    b: Option<(&[T], usize)>,
    c: &mut [T],
    ldc: usize,
) {
    for j in 0..n {
        for i in 0..m {
            let mut v = alpha * op_at(transa, a, lda, i, j);
            if let Some((b, ldb)) = b {
                v = v + beta * op_at(transb, b, ldb, i, j);
            }
            c[at(i, j, ldc)] = v;
        }
    }
}

/// Solve op(A) X = B in place, A triangular `n x n`, B `n x nrhs`
///
/// `upper` names the stored triangle of A; `unit` treats its diagonal as ones.
pub fn trsm_left<T: Scalar>(
    upper: bool,
    op: RtOperation,
    unit: bool,
    n: usize,
    nrhs: usize,
    a: &[T],
    lda: usize,
    b: &mut [T],
    ldb: usize,
) {
    if n == 0 {
        return;
    }
    // upper and untransposed, or lower and transposed
    let effective_upper = upper == (op == RtOperation::None);
    for col in 0..nrhs {
        let bc = &mut b[col * ldb..];
        if effective_upper {
            for i in (0..n).rev() {
                let mut s = bc[i];
                for k in i + 1..n {
                    s = s - op_at(op, a, lda, i, k) * bc[k];
                }
                bc[i] = if unit { s } else { s / op_at(op, a, lda, i, i) };
            }
        } else {
            for i in 0..n {
                let mut s = bc[i];
                for k in 0..i {
                    s = s - op_at(op, a, lda, i, k) * bc[k];
                }
                bc[i] = if unit { s } else { s / op_at(op, a, lda, i, i) };
            }
        }
    }
}

/// op(A) op(B) as a dense `m x n` matrix with leading dimension `m`
pub fn gemm<T: Scalar>(
    transa: RtOperation,
    transb: RtOperation,
    m: usize,
    n: usize,
    k: usize,
    a: &[T],
    lda: usize,
    b: &[T],
    ldb: usize,
) -> Vec<T> {
    let mut c = vec![T::zero(); m * n];
    for j in 0..n {
        for i in 0..m {
            let mut s = T::zero();
            for p in 0..k {
                s = s + op_at(transa, a, lda, i, p) * op_at(transb, b, ldb, p, j);
            }
            c[at(i, j, m)] = s;
        }
    }
    c
}

/// Expand the stored triangle of a Hermitian matrix into a full `n x n` copy
pub fn hermitian_full<T: Scalar>(
    upper: bool,
    n: usize,
    a: &[T],
    lda: usize,
) -> Vec<T> {
    let mut h = vec![T::zero(); n * n];
    for j in 0..n {
        for i in 0..n {
            let stored = if upper { i <= j } else { i >= j };
            h[at(i, j, n)] = if i == j {
                T::from_real(a[at(i, i, lda)].re())
            } else if stored {
                a[at(i, j, lda)]
            } else {
                a[at(j, i, lda)].conj()
            };
        }
    }
    h
}

/// Lower-triangular factor L with B = L L^H from a Cholesky factor stored in either triangle
pub fn lower_factor<T: Scalar>(
    upper: bool,
    n: usize,
    b: &[T],
    ldb: usize,
) -> Vec<T> {
    let mut l = vec![T::zero(); n * n];
    for j in 0..n {
        for i in j..n {
            l[at(i, j, n)] = if upper {
                b[at(j, i, ldb)].conj()
            } else {
                b[at(i, j, ldb)]
            };
        }
    }
    l
}

/// Euclidean norm of a vector
pub fn nrm2<T: Scalar>(x: &[T]) -> T::Real {
    let mut s = <T::Real as Scalar>::zero();
    for &v in x {
        s = s + v.abs_sqr();
    }
    crate::dtype::RealScalar::sqrt(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geam_transpose_copy_skips_b() {
        // A is 2x3, C = A^T is 3x2
        let a = [1.0f64, 4.0, 2.0, 5.0, 3.0, 6.0];
        let mut c = [0.0f64; 6];
        geam(
            RtOperation::Transpose,
            RtOperation::None,
            3,
            2,
            1.0,
            &a,
            2,
            0.0,
            None,
            &mut c,
            3,
        );
        assert_eq!(c, [1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    }

    #[test]
    fn test_trsm_upper_and_lower() {
        // A = [[2, 1], [0, 4]] stored column-major
        let a = [2.0f64, 0.0, 1.0, 4.0];
        let mut b = [4.0f64, 8.0];
        trsm_left(true, RtOperation::None, false, 2, 1, &a, 2, &mut b, 2);
        assert_eq!(b, [1.0, 2.0]);

        // A^T = [[2, 0], [1, 4]]
        let mut b = [2.0f64, 9.0];
        trsm_left(true, RtOperation::Transpose, false, 2, 1, &a, 2, &mut b, 2);
        assert_eq!(b, [1.0, 2.0]);
    }

    #[test]
    fn test_hermitian_full_from_lower() {
        let a = [1.0f64, 2.0, 99.0, 3.0];
        let h = hermitian_full(false, 2, &a, 2);
        assert_eq!(h, vec![1.0, 2.0, 2.0, 3.0]);
    }
}
