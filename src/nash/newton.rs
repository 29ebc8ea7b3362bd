//! Masked Newton-Raphson iteration over the indifference system.
//!
//! Equation i is the indifference condition of player i, defined over the
//! other players' probabilities only. Assembling the Jacobian therefore
//! re-inserts a structural zero at column i of row i: no equation depends on
//! its own player's probability. Players fixed to a pure strategy are masked
//! out of the linear system entirely; the mask drops their rows and columns
//! uniformly, so excluded players' equations never pin free variables.

use serde::{Deserialize, Serialize};

use crate::nash::error::EngineError;
use crate::nash::linalg::lu_solve;
use crate::nash::outcomes::OutcomePolynomial;
use crate::nash::system::EquilibriumSystem;

/// One converged equilibrium candidate.
///
/// Produced only once the masked residuals are within tolerance; never a
/// partial result. All three vectors have one entry per player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Solution {
    /// Per-player probability of eating.
    pub probabilities: Vec<f64>,
    /// Per-player expected value of eating, given everyone else's strategy.
    pub eat_values: Vec<f64>,
    /// Per-player expected value of abstaining, given everyone else's
    /// strategy.
    pub not_eat_values: Vec<f64>,
}

/// Assemble the Newton step inputs for a stack of per-player equations.
///
/// Returns `(jacobian, residuals)` where `residuals[i] = -f_i(p_without_i)`
/// and row i of the Jacobian is f_i's derivative vector with a zero inserted
/// at position i.
pub fn residuals_and_jacobian(
    equations: &[OutcomePolynomial],
    probs: &[f64],
) -> Result<(Vec<Vec<f64>>, Vec<f64>), EngineError> {
    let n = probs.len();
    if equations.len() != n {
        return Err(EngineError::ShapeMismatch { expected: n, found: equations.len() });
    }

    let mut jacobian = Vec::with_capacity(n);
    let mut residuals = Vec::with_capacity(n);
    for (i, equation) in equations.iter().enumerate() {
        let others = drop_index(probs, i);
        residuals.push(-equation.evaluate(&others)?);

        let derivatives = equation.partial_derivatives(&others)?;
        let mut row = Vec::with_capacity(n);
        row.extend_from_slice(&derivatives[..i]);
        row.push(0.0);
        row.extend_from_slice(&derivatives[i..]);
        jacobian.push(row);
    }
    Ok((jacobian, residuals))
}

/// Evaluate a stack of per-player value polynomials at the probabilities of
/// each player's *others*.
pub fn evaluate_values(
    values: &[OutcomePolynomial],
    probs: &[f64],
) -> Result<Vec<f64>, EngineError> {
    values
        .iter()
        .enumerate()
        .map(|(i, poly)| poly.evaluate(&drop_index(probs, i)))
        .collect()
}

/// Drive the masked indifference system to zero from the given start.
///
/// `excluded` lists the player indices held constant (corner players); the
/// remaining probabilities are updated by dense Newton steps until every
/// masked residual is within `tolerance`.
///
/// # Errors
/// - [`EngineError::NoConvergence`] when `max_iterations` is exhausted.
/// - [`EngineError::SingularJacobian`] when a step's linear system is
///   singular.
/// - [`EngineError::IndexOutOfRange`] / [`EngineError::ShapeMismatch`] on
///   contract violations.
pub fn solve(
    system: &EquilibriumSystem,
    starting_probs: &[f64],
    excluded: &[usize],
    tolerance: f64,
    max_iterations: usize,
) -> Result<Solution, EngineError> {
    let n = system.num_players();
    if starting_probs.len() != n {
        return Err(EngineError::ShapeMismatch { expected: n, found: starting_probs.len() });
    }

    let mut mask = vec![true; n];
    for &index in excluded {
        if index >= n {
            return Err(EngineError::IndexOutOfRange { index, n_players: n });
        }
        mask[index] = false;
    }

    let mut probs = starting_probs.to_vec();
    for _ in 0..max_iterations {
        let (jacobian, residuals) = residuals_and_jacobian(&system.indifference, &probs)?;
        let masked_residuals = mask_vector(&residuals, &mask);

        if masked_residuals.iter().all(|r| r.abs() <= tolerance) {
            let eat_values = evaluate_values(&system.eat_values, &probs)?;
            let not_eat_values = evaluate_values(&system.not_eat_values, &probs)?;
            return Ok(Solution { probabilities: probs, eat_values, not_eat_values });
        }

        let masked_jacobian = mask_matrix(&jacobian, &mask);
        let delta = lu_solve(masked_jacobian, masked_residuals)?;

        let mut free = 0;
        for (j, flag) in mask.iter().enumerate() {
            if *flag {
                probs[j] += delta[free];
                free += 1;
            }
        }
    }

    Err(EngineError::NoConvergence { iterations: max_iterations })
}

/// Copy of `probs` with position `index` removed.
fn drop_index(probs: &[f64], index: usize) -> Vec<f64> {
    let mut others = Vec::with_capacity(probs.len().saturating_sub(1));
    others.extend_from_slice(&probs[..index]);
    others.extend_from_slice(&probs[index + 1..]);
    others
}

fn mask_vector(values: &[f64], mask: &[bool]) -> Vec<f64> {
    values
        .iter()
        .zip(mask)
        .filter_map(|(&value, &keep)| keep.then_some(value))
        .collect()
}

fn mask_matrix(rows: &[Vec<f64>], mask: &[bool]) -> Vec<Vec<f64>> {
    rows.iter()
        .zip(mask)
        .filter_map(|(row, &keep)| keep.then(|| mask_vector(row, mask)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nash::model::PayoffModel;

    /// Point-split test game: eat(0) = 6, eat(n_others) = rate,
    /// not_eat(0) = -rate, not_eat(n_others) = 6, interior entries 0.
    struct Split;

    impl PayoffModel for Split {
        fn eat_value(&self, rate: f64, n_eaten: usize, n_others: usize) -> Result<f64, EngineError> {
            if n_eaten > n_others {
                return Err(EngineError::CountOutOfRange { n_eaten, n_others });
            }
            Ok(if n_eaten == n_others {
                rate
            } else if n_eaten == 0 {
                6.0
            } else {
                0.0
            })
        }

        fn not_eat_value(
            &self,
            rate: f64,
            n_eaten: usize,
            n_others: usize,
        ) -> Result<f64, EngineError> {
            if n_eaten > n_others {
                return Err(EngineError::CountOutOfRange { n_eaten, n_others });
            }
            Ok(if n_eaten == 0 {
                -rate
            } else if n_eaten == n_others {
                6.0
            } else {
                0.0
            })
        }
    }

    #[test]
    fn test_residual_rows_have_structural_zero() {
        let system = EquilibriumSystem::build(&Split, &[2.0, 2.0, 2.0]).unwrap();
        let probs = [0.4, 0.5, 0.6];
        let (jacobian, residuals) = residuals_and_jacobian(&system.indifference, &probs).unwrap();
        assert_eq!(residuals.len(), 3);
        for (i, row) in jacobian.iter().enumerate() {
            assert_eq!(row.len(), 3);
            assert_eq!(row[i], 0.0);
        }
    }

    #[test]
    fn test_two_player_symmetric_solve() {
        // Indifference: (1-q)(6+r) + q(r-6) = 0 -> q = (6+r)/12; linear in q,
        // so Newton lands on it in one step.
        let rate = 2.0;
        let system = EquilibriumSystem::build(&Split, &[rate, rate]).unwrap();
        let solution = solve(&system, &[0.5, 0.5], &[], 1e-6, 1000).unwrap();
        let expected = (6.0 + rate) / 12.0;
        assert!((solution.probabilities[0] - expected).abs() < 1e-6);
        assert!((solution.probabilities[1] - expected).abs() < 1e-6);
        // At indifference, eat and not-eat values agree
        for i in 0..2 {
            assert!((solution.eat_values[i] - solution.not_eat_values[i]).abs() < 1e-5);
        }
    }

    #[test]
    fn test_symmetric_rates_give_symmetric_probabilities() {
        let system = EquilibriumSystem::build(&Split, &[1.5, 1.5, 1.5, 1.5, 1.5]).unwrap();
        let solution = solve(&system, &[0.5; 5], &[], 1e-6, 1000).unwrap();
        for window in solution.probabilities.windows(2) {
            assert!((window[0] - window[1]).abs() < 1e-5);
        }
    }

    #[test]
    fn test_excluded_player_is_held_constant() {
        let system = EquilibriumSystem::build(&Split, &[2.0, 2.0, 2.0]).unwrap();
        let solution = solve(&system, &[1.0, 0.4, 0.6], &[0], 1e-6, 1000).unwrap();
        assert_eq!(solution.probabilities[0], 1.0);
    }

    #[test]
    fn test_all_excluded_accepts_start_immediately() {
        // Mask empties the residual vector, so the start is already a
        // solution and only the value evaluation runs.
        let system = EquilibriumSystem::build(&Split, &[2.0, 2.0]).unwrap();
        let solution = solve(&system, &[1.0, 1.0], &[0, 1], 1e-6, 1000).unwrap();
        assert_eq!(solution.probabilities, vec![1.0, 1.0]);
        assert!((solution.eat_values[0] - 2.0).abs() < 1e-12);
        assert!((solution.not_eat_values[0] - 6.0).abs() < 1e-12);
    }

    #[test]
    fn test_lone_player_is_structurally_singular() {
        // A single player's equation has no free variable; unless the
        // constant residual is already zero the step must fail rather than
        // produce garbage.
        let system = EquilibriumSystem::build(&Split, &[2.0]).unwrap();
        let err = solve(&system, &[0.5], &[], 1e-6, 1000).unwrap_err();
        assert_eq!(err, EngineError::SingularJacobian);
    }

    #[test]
    fn test_out_of_range_exclusion() {
        let system = EquilibriumSystem::build(&Split, &[2.0, 2.0]).unwrap();
        let err = solve(&system, &[0.5, 0.5], &[5], 1e-6, 1000).unwrap_err();
        assert!(matches!(err, EngineError::IndexOutOfRange { index: 5, n_players: 2 }));
    }
}
