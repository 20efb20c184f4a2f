//! Linear algebra operations
//!
//! This module provides a unified interface for matrix operations.
//! Currently uses nalgebra as the backend; all ndarray<->nalgebra
//! conversions are contained here.

use nalgebra::DMatrix;
use ndarray::{Array2, ArrayView2};
use num_complex::Complex64;

// ============================================================================
// Conversion helpers (internal)
// ============================================================================

/// Convert an ndarray complex view to nalgebra DMatrix<Complex<f64>>
#[inline]
fn to_na_complex(a: &ArrayView2<Complex64>) -> DMatrix<nalgebra::Complex<f64>> {
    let (m, n) = a.dim();
    DMatrix::from_fn(m, n, |i, j| {
        nalgebra::Complex::new(a[[i, j]].re, a[[i, j]].im)
    })
}

// ============================================================================
// Products
// ============================================================================

/// Conjugate transpose A^H
pub fn conj_transpose(a: &ArrayView2<Complex64>) -> Array2<Complex64> {
    a.t().mapv(|c| c.conj())
}

/// Power matrix A * A^H
///
/// Hermitian positive semi-definite; its eigenvalues are the squared
/// singular values of A.
pub fn power_matrix(a: &ArrayView2<Complex64>) -> Array2<Complex64> {
    a.dot(&conj_transpose(a))
}

// ============================================================================
// Eigenvalue decomposition
// ============================================================================

/// Real eigenvalues of a Hermitian matrix, sorted ascending
///
/// Only the lower triangle is read. Returns an empty vector for an empty
/// or non-square input.
pub fn hermitian_eigenvalues(a: &ArrayView2<Complex64>) -> Vec<f64> {
    let (m, n) = a.dim();
    if m != n || m == 0 {
        return Vec::new();
    }

    let mat = to_na_complex(a);
    let mut eigs: Vec<f64> = mat.symmetric_eigenvalues().iter().cloned().collect();
    eigs.sort_by(|x, y| x.total_cmp(y));
    eigs
}
