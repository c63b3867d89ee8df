//! Reference numerics of the host runtime
//!
//! All kernels work on column-major host slices with an explicit leading
//! dimension, generic over [`Scalar`](crate::dtype::Scalar). They never touch
//! device memory; the entry points in `host::lapack` stage data in and out.

pub(super) mod blas;
pub(super) mod cholesky;
pub(super) mod jacobi;
pub(super) mod lu;
pub(super) mod qr;
