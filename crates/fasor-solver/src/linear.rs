//! Dense complex linear solve with rank validation.

use nalgebra::{DMatrix, DVector};
use num_complex::Complex;

use crate::error::{Error, Result};

/// Solve the complex system `A·x = b` by LU decomposition.
///
/// The matrix is first checked for full numerical rank via its singular
/// values, with a tolerance relative to the largest singular value. A
/// rank-deficient matrix means the circuit is malconnected (no ground
/// reference, a floating subnetwork, or contradictory source
/// constraints); no least-squares fallback is attempted.
pub fn solve_complex(
    a: &DMatrix<Complex<f64>>,
    b: &DVector<Complex<f64>>,
) -> Result<DVector<Complex<f64>>> {
    if a.nrows() != a.ncols() {
        return Err(Error::DimensionMismatch {
            expected: a.nrows(),
            actual: a.ncols(),
        });
    }
    if a.nrows() != b.len() {
        return Err(Error::DimensionMismatch {
            expected: a.nrows(),
            actual: b.len(),
        });
    }
    if a.nrows() == 0 {
        return Ok(DVector::from_element(0, Complex::new(0.0, 0.0)));
    }

    let size = a.nrows();
    let svd = a.clone().svd(false, false);
    let max_sv = svd
        .singular_values
        .iter()
        .fold(0.0_f64, |acc, &s| acc.max(s));
    let tol = max_sv * size as f64 * f64::EPSILON;
    let rank = svd.singular_values.iter().filter(|&&s| s > tol).count();
    if max_sv == 0.0 || rank < size {
        return Err(Error::SingularSystem(format!(
            "rank {rank} < size {size}; circuit is malconnected or lacks a ground reference"
        )));
    }

    a.clone()
        .lu()
        .solve(b)
        .ok_or_else(|| Error::SingularSystem("LU factorization failed".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn c(re: f64, im: f64) -> Complex<f64> {
        Complex::new(re, im)
    }

    #[test]
    fn test_solve_simple_real() {
        // 2x + y = 5, x + 3y = 6 → x = 1.8, y = 1.4
        let a = DMatrix::from_row_slice(2, 2, &[c(2.0, 0.0), c(1.0, 0.0), c(1.0, 0.0), c(3.0, 0.0)]);
        let b = DVector::from_vec(vec![c(5.0, 0.0), c(6.0, 0.0)]);

        let x = solve_complex(&a, &b).unwrap();
        assert_relative_eq!(x[0].re, 1.8, epsilon = 1e-12);
        assert_relative_eq!(x[1].re, 1.4, epsilon = 1e-12);
    }

    #[test]
    fn test_solve_complex_coefficients() {
        // (1+j)·x = 2j → x = 2j/(1+j) = 1 + j
        let a = DMatrix::from_row_slice(1, 1, &[c(1.0, 1.0)]);
        let b = DVector::from_vec(vec![c(0.0, 2.0)]);

        let x = solve_complex(&a, &b).unwrap();
        assert_relative_eq!(x[0].re, 1.0, epsilon = 1e-12);
        assert_relative_eq!(x[0].im, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_singular_matrix_rejected() {
        // Row 2 = 2 * row 1.
        let a = DMatrix::from_row_slice(2, 2, &[c(1.0, 0.0), c(2.0, 0.0), c(2.0, 0.0), c(4.0, 0.0)]);
        let b = DVector::from_vec(vec![c(1.0, 0.0), c(2.0, 0.0)]);

        let result = solve_complex(&a, &b);
        assert!(matches!(result, Err(Error::SingularSystem(_))));
    }

    #[test]
    fn test_near_singular_relative_tolerance() {
        // Scaling a singular matrix by a large factor must not hide the
        // rank deficiency behind an absolute threshold.
        let a = DMatrix::from_row_slice(
            2,
            2,
            &[c(1e9, 0.0), c(2e9, 0.0), c(2e9, 0.0), c(4e9, 0.0)],
        );
        let b = DVector::from_vec(vec![c(1.0, 0.0), c(2.0, 0.0)]);

        assert!(matches!(
            solve_complex(&a, &b),
            Err(Error::SingularSystem(_))
        ));
    }

    #[test]
    fn test_dimension_mismatch() {
        let a = DMatrix::from_row_slice(2, 2, &[c(1.0, 0.0), c(2.0, 0.0), c(3.0, 0.0), c(4.0, 0.0)]);
        let b = DVector::from_vec(vec![c(1.0, 0.0), c(2.0, 0.0), c(3.0, 0.0)]);

        assert!(matches!(
            solve_complex(&a, &b),
            Err(Error::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_empty_system() {
        let a = DMatrix::from_element(0, 0, c(0.0, 0.0));
        let b = DVector::from_element(0, c(0.0, 0.0));
        assert_eq!(solve_complex(&a, &b).unwrap().len(), 0);
    }

    #[test]
    fn test_determinism() {
        let a = DMatrix::from_row_slice(2, 2, &[c(2.0, 1.0), c(1.0, 0.0), c(0.0, 1.0), c(3.0, 0.0)]);
        let b = DVector::from_vec(vec![c(5.0, 0.0), c(6.0, 1.0)]);

        let x1 = solve_complex(&a, &b).unwrap();
        let x2 = solve_complex(&a, &b).unwrap();
        assert_eq!(x1, x2);
    }
}
