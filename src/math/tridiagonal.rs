use nalgebra::{DMatrix, DVector};

use crate::error::{GeometryError, Result};

use super::TOLERANCE;

/// Solves a tridiagonal linear system with the Thomas algorithm.
///
/// Row `i` reads `sub[i] * x[i - 1] + diag[i] * x[i] + sup[i] * x[i + 1] = rhs[i]`.
/// `sub[0]` and `sup[n - 1]` are ignored. All slices must have the same length.
///
/// # Errors
///
/// Returns [`GeometryError::SingularSystem`] if a pivot vanishes.
pub fn solve_tridiagonal(sub: &[f64], diag: &[f64], sup: &[f64], rhs: &[f64]) -> Result<Vec<f64>> {
    let n = diag.len();
    debug_assert!(sub.len() == n && sup.len() == n && rhs.len() == n);
    if n == 0 {
        return Ok(Vec::new());
    }

    let mut c_prime = vec![0.0; n];
    let mut d_prime = vec![0.0; n];

    let pivot = diag[0];
    if pivot.abs() < TOLERANCE {
        return Err(GeometryError::SingularSystem.into());
    }
    c_prime[0] = sup[0] / pivot;
    d_prime[0] = rhs[0] / pivot;

    for i in 1..n {
        let pivot = diag[i] - sub[i] * c_prime[i - 1];
        if pivot.abs() < TOLERANCE {
            return Err(GeometryError::SingularSystem.into());
        }
        c_prime[i] = sup[i] / pivot;
        d_prime[i] = (rhs[i] - sub[i] * d_prime[i - 1]) / pivot;
    }

    let mut x = d_prime;
    for i in (0..n - 1).rev() {
        x[i] -= c_prime[i] * x[i + 1];
    }
    Ok(x)
}

/// Solves a cyclic tridiagonal system.
///
/// Same layout as [`solve_tridiagonal`], except `sub[0]` multiplies `x[n - 1]`
/// and `sup[n - 1]` multiplies `x[0]`. Coefficients that land on the same
/// matrix entry (n <= 2) are summed.
///
/// # Errors
///
/// Returns [`GeometryError::SingularSystem`] if the system has no unique solution.
pub fn solve_cyclic_tridiagonal(
    sub: &[f64],
    diag: &[f64],
    sup: &[f64],
    rhs: &[f64],
) -> Result<Vec<f64>> {
    let n = diag.len();
    debug_assert!(sub.len() == n && sup.len() == n && rhs.len() == n);
    if n == 0 {
        return Ok(Vec::new());
    }

    let mut matrix = DMatrix::<f64>::zeros(n, n);
    for i in 0..n {
        matrix[(i, (i + n - 1) % n)] += sub[i];
        matrix[(i, i)] += diag[i];
        matrix[(i, (i + 1) % n)] += sup[i];
    }

    let rhs = DVector::from_column_slice(rhs);
    let solution = matrix
        .lu()
        .solve(&rhs)
        .ok_or(GeometryError::SingularSystem)?;
    Ok(solution.iter().copied().collect())
}
