//! Dense linear solve for the Newton step.
//!
//! The masked Jacobian is small (at most n_players square), dense, and not
//! generally symmetric, so plain Gaussian elimination with partial pivoting
//! is enough. The one requirement from the solver is that a singular or
//! near-singular matrix surfaces as an error instead of leaking NaN into the
//! probability updates.

use crate::nash::error::EngineError;

/// Pivots smaller than this are treated as exactly zero.
const PIVOT_EPSILON: f64 = 1e-12;

/// Solve `matrix * x = rhs` for `x` by LU decomposition with partial
/// pivoting.
///
/// `matrix` is row-major, square, and consumed as working storage along with
/// `rhs`.
///
/// # Errors
/// Returns [`EngineError::SingularJacobian`] when no usable pivot exists in
/// some column.
pub fn lu_solve(mut matrix: Vec<Vec<f64>>, mut rhs: Vec<f64>) -> Result<Vec<f64>, EngineError> {
    let n = matrix.len();
    debug_assert!(matrix.iter().all(|row| row.len() == n));
    debug_assert_eq!(rhs.len(), n);

    // Forward elimination
    for col in 0..n {
        let pivot_row = (col..n)
            .max_by(|&a, &b| {
                matrix[a][col]
                    .abs()
                    .partial_cmp(&matrix[b][col].abs())
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .ok_or(EngineError::SingularJacobian)?;
        if matrix[pivot_row][col].abs() < PIVOT_EPSILON || !matrix[pivot_row][col].is_finite() {
            return Err(EngineError::SingularJacobian);
        }
        matrix.swap(col, pivot_row);
        rhs.swap(col, pivot_row);

        for row in (col + 1)..n {
            let factor = matrix[row][col] / matrix[col][col];
            if factor == 0.0 {
                continue;
            }
            for k in col..n {
                matrix[row][k] -= factor * matrix[col][k];
            }
            rhs[row] -= factor * rhs[col];
        }
    }

    // Back substitution
    let mut solution = vec![0.0; n];
    for row in (0..n).rev() {
        let mut accum = rhs[row];
        for col in (row + 1)..n {
            accum -= matrix[row][col] * solution[col];
        }
        solution[row] = accum / matrix[row][row];
    }
    Ok(solution)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solves_identity() {
        let matrix = vec![vec![1.0, 0.0], vec![0.0, 1.0]];
        let x = lu_solve(matrix, vec![3.0, -4.0]).unwrap();
        assert!((x[0] - 3.0).abs() < 1e-12);
        assert!((x[1] + 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_solves_general_system() {
        // 2x + y = 5, x - y = 1 -> x = 2, y = 1
        let matrix = vec![vec![2.0, 1.0], vec![1.0, -1.0]];
        let x = lu_solve(matrix, vec![5.0, 1.0]).unwrap();
        assert!((x[0] - 2.0).abs() < 1e-12);
        assert!((x[1] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_pivoting_handles_zero_diagonal() {
        let matrix = vec![vec![0.0, 1.0], vec![1.0, 0.0]];
        let x = lu_solve(matrix, vec![2.0, 3.0]).unwrap();
        assert!((x[0] - 3.0).abs() < 1e-12);
        assert!((x[1] - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_singular_matrix_is_an_error() {
        let matrix = vec![vec![1.0, 2.0], vec![2.0, 4.0]];
        assert_eq!(lu_solve(matrix, vec![1.0, 2.0]), Err(EngineError::SingularJacobian));
    }

    #[test]
    fn test_zero_matrix_is_an_error() {
        let matrix = vec![vec![0.0]];
        assert_eq!(lu_solve(matrix, vec![1.0]), Err(EngineError::SingularJacobian));
    }

    #[test]
    fn test_empty_system() {
        assert_eq!(lu_solve(Vec::new(), Vec::new()), Ok(Vec::new()));
    }

    #[test]
    fn test_three_by_three() {
        let matrix = vec![
            vec![2.0, -1.0, 0.0],
            vec![-1.0, 2.0, -1.0],
            vec![0.0, -1.0, 2.0],
        ];
        let x = lu_solve(matrix, vec![1.0, 0.0, 1.0]).unwrap();
        // Tridiagonal system with known solution (1, 1, 1)
        for xi in x {
            assert!((xi - 1.0).abs() < 1e-10);
        }
    }
}
