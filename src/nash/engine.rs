//! The equilibrium engine: multi-start search, best-response validity, and
//! the corner search over pure-strategy fixings.
//!
//! [`NashSolver`] owns the payoff model, the configuration, and the random
//! source, mirroring how the callers use it: supply per-player trade-off
//! rates, get back solution records (probabilities plus per-player eat and
//! not-eat expected values). Each multi-start trial gets its own starting
//! vector; nothing is shared across trials besides the prebuilt polynomial
//! system.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::nash::config::SolverConfig;
use crate::nash::error::EngineError;
use crate::nash::model::PayoffModel;
use crate::nash::newton::{self, Solution};
use crate::nash::system::{check_rate_alignment, EquilibriumSystem};

/// Mixed-strategy Nash equilibrium solver for binary-action count games.
///
/// # Example
/// ```
/// use count_game_nash::games::duck::DuckFeast;
/// use count_game_nash::nash::{NashSolver, SolverConfig};
///
/// let config = SolverConfig::default().with_seed(42);
/// let mut solver = NashSolver::new(DuckFeast, config);
/// let solutions = solver
///     .find_minimal_fixed_solution(&[3.0, 3.0, 3.0, 3.0, 3.0])
///     .unwrap();
/// assert!(!solutions.is_empty());
/// ```
pub struct NashSolver<M: PayoffModel> {
    /// The injected payoff model.
    model: M,

    /// Solver configuration.
    config: SolverConfig,

    /// Random number generator for multi-start initialization.
    rng: StdRng,
}

impl<M: PayoffModel> NashSolver<M> {
    /// Create a solver for the given payoff model.
    pub fn new(model: M, config: SolverConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { model, config, rng }
    }

    /// The solver's configuration.
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Run the multi-start search and return every feasible, deduplicated
    /// candidate equilibrium, in discovery order.
    ///
    /// Players listed in `fixed_zeros` / `fixed_ones` are pinned to the pure
    /// strategies 0.0 / 1.0 and excluded from the Newton variables. A trial
    /// that fails to converge is logged and skipped; it never aborts the
    /// search.
    ///
    /// # Errors
    /// - [`EngineError::OverlappingFixed`] when an index appears in both
    ///   fixed sets.
    /// - [`EngineError::IndexOutOfRange`] when a fixed index is not below
    ///   `rates.len()`.
    /// - [`EngineError::MisalignedModel`] when the payoff model fails the
    ///   rate-slot alignment check.
    pub fn find_all_potential_solns(
        &mut self,
        rates: &[f64],
        fixed_zeros: &[usize],
        fixed_ones: &[usize],
    ) -> Result<Vec<Solution>, EngineError> {
        self.find_all_potential_solns_with_callback(rates, fixed_zeros, fixed_ones, |_, _| {})
    }

    /// [`find_all_potential_solns`](Self::find_all_potential_solns) with a
    /// progress callback.
    ///
    /// The callback receives `(trials_completed, solutions_kept)` after every
    /// trial, converged or not.
    pub fn find_all_potential_solns_with_callback<F>(
        &mut self,
        rates: &[f64],
        fixed_zeros: &[usize],
        fixed_ones: &[usize],
        mut callback: F,
    ) -> Result<Vec<Solution>, EngineError>
    where
        F: FnMut(usize, usize),
    {
        validate_fixed_sets(rates.len(), fixed_zeros, fixed_ones)?;
        check_rate_alignment(&self.model, rates)?;

        let system = EquilibriumSystem::build(&self.model, rates)?;
        let excluded: Vec<usize> = fixed_zeros.iter().chain(fixed_ones).copied().collect();
        let tolerance = self.config.tolerance;

        let mut solutions: Vec<Solution> = Vec::new();
        for trial in 0..self.config.num_trials {
            let mut start: Vec<f64> = (0..rates.len()).map(|_| self.rng.gen::<f64>()).collect();
            for &index in fixed_zeros {
                start[index] = 0.0;
            }
            for &index in fixed_ones {
                start[index] = 1.0;
            }

            let candidate = match newton::solve(
                &system,
                &start,
                &excluded,
                tolerance,
                self.config.max_iterations,
            ) {
                Ok(solution) => solution,
                Err(
                    failure @ (EngineError::NoConvergence { .. } | EngineError::SingularJacobian),
                ) => {
                    log::debug!("trial {} produced no candidate: {}", trial, failure);
                    callback(trial + 1, solutions.len());
                    continue;
                }
                Err(err) => return Err(err),
            };

            let feasible = candidate
                .probabilities
                .iter()
                .all(|&p| p >= -tolerance && p <= 1.0 + tolerance);
            let duplicate = feasible
                && solutions.iter().any(|kept| {
                    kept.probabilities
                        .iter()
                        .zip(&candidate.probabilities)
                        .all(|(a, b)| (a - b).abs() <= tolerance)
                });
            if feasible && !duplicate {
                solutions.push(candidate);
            }
            callback(trial + 1, solutions.len());
        }
        Ok(solutions)
    }

    /// Best-response rationality check for the pinned players.
    ///
    /// A fixed-zero player must not strictly prefer eating
    /// (`eat <= not_eat + tolerance`) and a fixed-one player must not
    /// strictly prefer abstaining. Free players are indifferent by
    /// construction, so nothing is checked for them; with empty fixed sets
    /// every solution is valid. An out-of-range fixed index counts as
    /// invalid.
    pub fn check_soln_validity(
        &self,
        solution: &Solution,
        fixed_zeros: &[usize],
        fixed_ones: &[usize],
    ) -> bool {
        let tolerance = self.config.tolerance;
        let not_better = |fixed: &[usize], low: &[f64], high: &[f64]| {
            fixed.iter().all(|&i| match (low.get(i), high.get(i)) {
                (Some(&low_value), Some(&high_value)) => low_value <= high_value + tolerance,
                _ => false,
            })
        };
        not_better(fixed_zeros, &solution.eat_values, &solution.not_eat_values)
            && not_better(fixed_ones, &solution.not_eat_values, &solution.eat_values)
    }

    /// Multi-start search followed by the validity filter.
    ///
    /// # Errors
    /// Same contract as
    /// [`find_all_potential_solns`](Self::find_all_potential_solns).
    pub fn find_all_valid_solns(
        &mut self,
        rates: &[f64],
        fixed_zeros: &[usize],
        fixed_ones: &[usize],
    ) -> Result<Vec<Solution>, EngineError> {
        let potential = self.find_all_potential_solns(rates, fixed_zeros, fixed_ones)?;
        Ok(potential
            .into_iter()
            .filter(|solution| self.check_soln_validity(solution, fixed_zeros, fixed_ones))
            .collect())
    }

    /// Find a valid equilibrium pinning as few players as possible to pure
    /// strategies.
    ///
    /// Escalates `n_fixed` from 0 to n. At each size the lexicographically
    /// smallest untried increasing index combinations are explored, and each
    /// chosen index is tried at 0 before 1, depth-first; the first non-empty
    /// validated result wins and is returned without exploring siblings.
    /// Returns an empty sequence when even fixing every player yields no
    /// valid solution.
    ///
    /// # Errors
    /// Same contract as
    /// [`find_all_potential_solns`](Self::find_all_potential_solns).
    pub fn find_minimal_fixed_solution(
        &mut self,
        rates: &[f64],
    ) -> Result<Vec<Solution>, EngineError> {
        for n_fixed in 0..=rates.len() {
            log::debug!("corner search: trying {} fixed players", n_fixed);
            let solutions = self.search_combinations(rates, &mut Vec::new(), n_fixed)?;
            if !solutions.is_empty() {
                return Ok(solutions);
            }
        }
        Ok(Vec::new())
    }

    /// Depth-first over increasing index combinations of the requested size.
    ///
    /// `chosen` is kept sorted by starting each level one past the current
    /// maximum, so every set is visited once (combinations, not
    /// permutations).
    fn search_combinations(
        &mut self,
        rates: &[f64],
        chosen: &mut Vec<usize>,
        n_to_fix: usize,
    ) -> Result<Vec<Solution>, EngineError> {
        if n_to_fix == 0 {
            let mut unassigned = chosen.clone();
            return self.search_assignments(rates, &mut Vec::new(), &mut Vec::new(), &mut unassigned);
        }

        let first = chosen.last().map_or(0, |&max| max + 1);
        for index in first..rates.len() {
            chosen.push(index);
            let solutions = self.search_combinations(rates, chosen, n_to_fix - 1)?;
            chosen.pop();
            if !solutions.is_empty() {
                return Ok(solutions);
            }
        }
        Ok(Vec::new())
    }

    /// Depth-first over pure-strategy assignments of the chosen indices,
    /// zero branch before one branch; first non-empty validated result wins.
    fn search_assignments(
        &mut self,
        rates: &[f64],
        fixed_zeros: &mut Vec<usize>,
        fixed_ones: &mut Vec<usize>,
        unassigned: &mut Vec<usize>,
    ) -> Result<Vec<Solution>, EngineError> {
        let Some(next) = unassigned.pop() else {
            return self.find_all_valid_solns(rates, fixed_zeros, fixed_ones);
        };

        fixed_zeros.push(next);
        let solutions = self.search_assignments(rates, fixed_zeros, fixed_ones, unassigned)?;
        fixed_zeros.pop();
        if !solutions.is_empty() {
            unassigned.push(next);
            return Ok(solutions);
        }

        fixed_ones.push(next);
        let solutions = self.search_assignments(rates, fixed_zeros, fixed_ones, unassigned)?;
        fixed_ones.pop();
        unassigned.push(next);
        Ok(solutions)
    }
}

/// Check disjointness and range of the fixed-index sets.
fn validate_fixed_sets(
    n_players: usize,
    fixed_zeros: &[usize],
    fixed_ones: &[usize],
) -> Result<(), EngineError> {
    for &index in fixed_zeros.iter().chain(fixed_ones) {
        if index >= n_players {
            return Err(EngineError::IndexOutOfRange { index, n_players });
        }
    }
    for &index in fixed_zeros {
        if fixed_ones.contains(&index) {
            return Err(EngineError::OverlappingFixed(index));
        }
    }
    Ok(())
}
