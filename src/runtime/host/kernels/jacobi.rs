//! Jacobi eigensolver and one-sided Jacobi SVD
//!
//! Both use the same complex-aware rotation. For the Hermitian 2x2 block
//! `[[app, apq], [conj(apq), aqq]]` with `phase = apq / |apq|`, the unitary
//!
//! ```text
//! J = [ c                  s * phase ]
//!     [ -s * conj(phase)   c         ]
//! ```
//!
//! built from the real symmetric rotation of `[[app, |apq|], [|apq|, aqq]]`
//! diagonalizes the block under `J^H (.) J`.

use super::blas::{at, nrm2};
use crate::dtype::{RealScalar, Scalar};

/// Rotation that annihilates one off-diagonal pair
#[derive(Clone, Copy, Debug)]
struct Rotation<T: Scalar> {
    c: T::Real,
    s: T::Real,
    phase: T,
}

impl<T: Scalar> Rotation<T> {
    /// Rotation for the block `[[app, apq], [conj(apq), aqq]]`; `None` if `apq` is zero
    fn new(app: T::Real, aqq: T::Real, apq: T) -> Option<Self> {
        let zero = <T::Real as Scalar>::zero();
        let one = <T::Real as Scalar>::one();
        let two = one + one;
        let mag = apq.abs();
        if mag == zero {
            return None;
        }
        let phase = apq.scale(one / mag);
        let tau = (aqq - app) / (two * mag);
        let sign = if tau >= zero { one } else { -one };
        let t = sign / (tau.abs() + (one + tau * tau).sqrt());
        let c = one / (one + t * t).sqrt();
        Some(Self {
            c,
            s: t * c,
            phase,
        })
    }

    /// X := X J on columns p, q of a `rows`-row matrix
    fn apply_columns(&self, x: &mut [T], ld: usize, rows: usize, p: usize, q: usize) {
        let cs = T::from_real(self.c);
        let sp = self.phase.scale(self.s);
        let spc = self.phase.conj().scale(self.s);
        for k in 0..rows {
            let xp = x[at(k, p, ld)];
            let xq = x[at(k, q, ld)];
            x[at(k, p, ld)] = cs * xp - spc * xq;
            x[at(k, q, ld)] = sp * xp + cs * xq;
        }
    }

    /// X := J^H X on rows p, q of a `cols`-column matrix
    fn apply_rows(&self, x: &mut [T], ld: usize, cols: usize, p: usize, q: usize) {
        let cs = T::from_real(self.c);
        let sp = self.phase.scale(self.s);
        let spc = self.phase.conj().scale(self.s);
        for k in 0..cols {
            let xp = x[at(p, k, ld)];
            let xq = x[at(q, k, ld)];
            x[at(p, k, ld)] = cs * xp - sp * xq;
            x[at(q, k, ld)] = spc * xp + cs * xq;
        }
    }
}

/// Outcome of a Jacobi run
#[derive(Clone, Debug)]
pub struct JacobiOutcome<R> {
    /// Frobenius norm of what is left off the diagonal
    pub residual: R,
    /// Sweeps executed
    pub sweeps: i32,
    /// False if `max_sweeps` ran out before the tolerance was met
    pub converged: bool,
}

fn off_norm<T: Scalar>(h: &[T], n: usize) -> T::Real {
    let mut s = <T::Real as Scalar>::zero();
    for j in 0..n {
        for i in 0..n {
            if i != j {
                s = s + h[at(i, j, n)].abs_sqr();
            }
        }
    }
    s.sqrt()
}

/// Tolerance actually used: `abstol` if positive, else machine precision scaled by ||H||_F
fn effective_tolerance<R: RealScalar>(abstol: R, norm: R) -> R {
    if abstol > R::zero() {
        abstol
    } else {
        let one = R::one();
        R::EPSILON * if norm > one { norm } else { one }
    }
}

/// Diagonalize a full Hermitian `n x n` matrix (leading dimension `n`) in place
///
/// On return the diagonal of `h` holds the eigenvalues and, when given, `v`
/// (initialized by the caller, usually to the identity) has been multiplied
/// by every rotation.
pub fn hermitian_eig<T: Scalar>(
    n: usize,
    h: &mut [T],
    mut v: Option<&mut [T]>,
    abstol: T::Real,
    max_sweeps: i32,
) -> JacobiOutcome<T::Real> {
    let norm = nrm2(h);
    let tol = effective_tolerance(abstol, norm);
    let mut off = off_norm(h, n);
    let mut sweeps = 0;
    while off > tol && sweeps < max_sweeps {
        for p in 0..n {
            for q in p + 1..n {
                let rot = match Rotation::new(
                    h[at(p, p, n)].re(),
                    h[at(q, q, n)].re(),
                    h[at(p, q, n)],
                ) {
                    Some(rot) => rot,
                    None => continue,
                };
                rot.apply_columns(h, n, n, p, q);
                rot.apply_rows(h, n, n, p, q);
                h[at(p, q, n)] = T::zero();
                h[at(q, p, n)] = T::zero();
                h[at(p, p, n)] = T::from_real(h[at(p, p, n)].re());
                h[at(q, q, n)] = T::from_real(h[at(q, q, n)].re());
                if let Some(v) = v.as_deref_mut() {
                    rot.apply_columns(v, n, n, p, q);
                }
            }
        }
        sweeps += 1;
        off = off_norm(h, n);
    }
    JacobiOutcome {
        residual: off,
        sweeps,
        converged: off <= tol,
    }
}

/// Eigenvalues from the diagonal of a diagonalized matrix, optionally sorted
/// ascending together with the columns of `v`
pub fn extract_eigenpairs<T: Scalar>(
    n: usize,
    h: &[T],
    v: Option<&mut [T]>,
    sort: bool,
) -> Vec<T::Real> {
    let w: Vec<T::Real> = (0..n).map(|i| h[at(i, i, n)].re()).collect();
    if !sort {
        return w;
    }
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&x, &y| {
        w[x].partial_cmp(&w[y])
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    if let Some(v) = v {
        let old = v.to_vec();
        for (dst, &src) in order.iter().enumerate() {
            v[dst * n..(dst + 1) * n].copy_from_slice(&old[src * n..(src + 1) * n]);
        }
    }
    order.iter().map(|&i| w[i]).collect()
}

/// Identity matrix of order `n`
pub fn identity<T: Scalar>(n: usize) -> Vec<T> {
    let mut v = vec![T::zero(); n * n];
    for i in 0..n {
        v[at(i, i, n)] = T::one();
    }
    v
}

/// Result of [`svd`]
pub struct SvdFactors<T: Scalar> {
    /// Singular values, descending
    pub s: Vec<T::Real>,
    /// Left singular vectors, `m x m` (leading dimension `m`)
    pub u: Vec<T>,
    /// Right singular vectors, `n x n` (leading dimension `n`)
    pub v: Vec<T>,
    /// Convergence report
    pub outcome: JacobiOutcome<T::Real>,
}

/// One-sided Jacobi SVD of an `m x n` matrix, A = U diag(s) V^H
///
/// U and V are returned as full square unitary matrices; columns belonging
/// to zero singular values are completed to an orthonormal basis.
pub fn svd<T: Scalar>(
    m: usize,
    n: usize,
    a: &[T],
    lda: usize,
    abstol: T::Real,
    max_sweeps: i32,
) -> SvdFactors<T> {
    if m >= n {
        let mut w = vec![T::zero(); m * n];
        for j in 0..n {
            for i in 0..m {
                w[at(i, j, m)] = a[at(i, j, lda)];
            }
        }
        let (s, u, v, outcome) = one_sided(m, n, w, abstol, max_sweeps);
        SvdFactors { s, u, v, outcome }
    } else {
        // A^H = U' S V'^H gives A = V' S U'^H
        let mut w = vec![T::zero(); n * m];
        for j in 0..m {
            for i in 0..n {
                w[at(i, j, n)] = a[at(j, i, lda)].conj();
            }
        }
        let (s, u, v, outcome) = one_sided(n, m, w, abstol, max_sweeps);
        SvdFactors {
            s,
            u: v,
            v: u,
            outcome,
        }
    }
}

/// Hestenes iteration on a tall `m x n` matrix `w` (m >= n)
fn one_sided<T: Scalar>(
    m: usize,
    n: usize,
    mut w: Vec<T>,
    abstol: T::Real,
    max_sweeps: i32,
) -> (Vec<T::Real>, Vec<T>, Vec<T>, JacobiOutcome<T::Real>) {
    let rzero = <T::Real as Scalar>::zero();
    let mut v = identity::<T>(n);
    let norm = nrm2(&w);
    let tol = effective_tolerance(abstol, norm * norm);

    let gram_off = |w: &[T]| -> T::Real {
        let mut s = rzero;
        for p in 0..n {
            for q in p + 1..n {
                let mut g = T::zero();
                for k in 0..m {
                    g = g + w[at(k, p, m)].conj() * w[at(k, q, m)];
                }
                s = s + g.abs_sqr();
            }
        }
        s.sqrt()
    };

    let mut off = gram_off(&w);
    let mut sweeps = 0;
    while off > tol && sweeps < max_sweeps {
        for p in 0..n {
            for q in p + 1..n {
                let mut alpha = rzero;
                let mut beta = rzero;
                let mut gamma = T::zero();
                for k in 0..m {
                    let wp = w[at(k, p, m)];
                    let wq = w[at(k, q, m)];
                    alpha = alpha + wp.abs_sqr();
                    beta = beta + wq.abs_sqr();
                    gamma = gamma + wp.conj() * wq;
                }
                if let Some(rot) = Rotation::new(alpha, beta, gamma) {
                    rot.apply_columns(&mut w, m, m, p, q);
                    rot.apply_columns(&mut v, n, n, p, q);
                }
            }
        }
        sweeps += 1;
        off = gram_off(&w);
    }

    let norms: Vec<T::Real> = (0..n).map(|j| nrm2(&w[j * m..(j + 1) * m])).collect();
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&x, &y| {
        norms[y]
            .partial_cmp(&norms[x])
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    let s: Vec<T::Real> = order.iter().map(|&j| norms[j]).collect();

    let smax = s.first().copied().unwrap_or(rzero);
    let rows = <T::Real as RealScalar>::from_f64(m.max(1) as f64);
    let cutoff = <T::Real as RealScalar>::EPSILON * smax * rows;
    let mut u = vec![T::zero(); m * m];
    let mut vs = vec![T::zero(); n * n];
    let mut filled = 0;
    for (dst, &src) in order.iter().enumerate() {
        vs[dst * n..(dst + 1) * n].copy_from_slice(&v[src * n..(src + 1) * n]);
        if norms[src] > cutoff && norms[src] > rzero {
            let inv = <T::Real as Scalar>::one() / norms[src];
            for k in 0..m {
                u[at(k, dst, m)] = w[at(k, src, m)].scale(inv);
            }
            filled = dst + 1;
        }
    }
    complete_basis(m, filled, &mut u);

    let outcome = JacobiOutcome {
        residual: off,
        sweeps,
        converged: off <= tol,
    };
    (s, u, vs, outcome)
}

/// Fill columns `filled..m` of the `m x m` matrix `u` so all columns are orthonormal
fn complete_basis<T: Scalar>(m: usize, filled: usize, u: &mut [T]) {
    let half = <T::Real as Scalar>::one() / <T::Real as RealScalar>::from_f64(2.0);
    let mut col = filled;
    let mut candidate = 0;
    while col < m && candidate < m {
        let mut x = vec![T::zero(); m];
        x[candidate] = T::one();
        candidate += 1;
        // two passes of Gram-Schmidt against the accepted columns
        for _ in 0..2 {
            for j in 0..col {
                let mut d = T::zero();
                for k in 0..m {
                    d = d + u[at(k, j, m)].conj() * x[k];
                }
                for k in 0..m {
                    x[k] = x[k] - u[at(k, j, m)] * d;
                }
            }
        }
        let norm = nrm2(&x);
        if norm < half {
            continue;
        }
        let inv = <T::Real as Scalar>::one() / norm;
        for k in 0..m {
            u[at(k, col, m)] = x[k].scale(inv);
        }
        col += 1;
    }
}
