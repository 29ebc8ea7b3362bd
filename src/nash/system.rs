//! Equilibrium system construction.
//!
//! For each player i the engine builds three polynomials over the *other*
//! n-1 players' probabilities:
//!
//! - the expected eat-value,
//! - the expected not-eat-value,
//! - the indifference condition (eat-value minus not-eat-value),
//!
//! each by enumerating all 2^(n-1) outcomes of the other players, mapping
//! every outcome to its eat-count, and looking up the payoff in the injected
//! [`PayoffModel`]. The system is built once per rates vector and reused
//! across every Newton iteration and multi-start trial.

use crate::nash::error::EngineError;
use crate::nash::model::PayoffModel;
use crate::nash::outcomes::{enumerate_outcomes, OutcomePolynomial};

/// The polynomials driving one equilibrium computation.
///
/// All three sequences have length `n_players` and every polynomial has
/// arity `n_players - 1`: equation i ranges over the probabilities of
/// everyone except player i.
#[derive(Debug, Clone)]
pub struct EquilibriumSystem {
    /// Per-player indifference conditions (eat minus not-eat), to be driven
    /// to zero.
    pub indifference: Vec<OutcomePolynomial>,
    /// Per-player expected eat-value polynomials.
    pub eat_values: Vec<OutcomePolynomial>,
    /// Per-player expected not-eat-value polynomials.
    pub not_eat_values: Vec<OutcomePolynomial>,
}

impl EquilibriumSystem {
    /// Number of players the system was built for.
    pub fn num_players(&self) -> usize {
        self.indifference.len()
    }

    /// Build the indifference and value polynomials for every player.
    ///
    /// # Errors
    /// Propagates enumeration, payoff-lookup, and polynomial shape errors.
    pub fn build<M: PayoffModel>(model: &M, rates: &[f64]) -> Result<Self, EngineError> {
        let n_players = rates.len();
        let n_others = n_players.saturating_sub(1);

        let mut indifference = Vec::with_capacity(n_players);
        let mut eat_values = Vec::with_capacity(n_players);
        let mut not_eat_values = Vec::with_capacity(n_players);

        for &rate in rates {
            let eat = value_polynomial(n_others, |k| model.eat_value(rate, k, n_others))?;
            let not_eat = value_polynomial(n_others, |k| model.not_eat_value(rate, k, n_others))?;
            let negated_not_eat =
                value_polynomial(n_others, |k| model.not_eat_value(rate, k, n_others).map(|v| -v))?;

            indifference.push(eat.add(&negated_not_eat)?);
            eat_values.push(eat);
            not_eat_values.push(not_eat);
        }

        Ok(Self { indifference, eat_values, not_eat_values })
    }
}

/// Build a polynomial over `n_probs` players whose coefficient for each
/// outcome is the payoff at that outcome's eat-count.
pub fn value_polynomial<F>(n_probs: usize, value_fn: F) -> Result<OutcomePolynomial, EngineError>
where
    F: Fn(usize) -> Result<f64, EngineError>,
{
    let outcomes = enumerate_outcomes(n_probs)?;
    let mut coefficients = Vec::with_capacity(outcomes.len());
    for outcome in &outcomes {
        let n_eaten = outcome.iter().filter(|&&ate| ate).count();
        coefficients.push(value_fn(n_eaten)?);
    }
    OutcomePolynomial::new(outcomes, coefficients)
}

/// Verify that a payoff model's rate dependence sits only in the canonical
/// table slots.
///
/// The indifference encoding assumes the rate enters exactly at
/// `eat_value(n_others)` and `not_eat_value(0)`; a table that is swapped or
/// misaligned converges to silently wrong equilibria, so this is checked
/// before any solving. The check probes every player's tables at two distinct
/// rates: entries off the canonical slots must not move, and the canonical
/// slots must move by exactly the rate delta (sign-flipped for not-eat).
///
/// # Errors
/// Returns [`EngineError::MisalignedModel`] naming the first offending
/// player/count, or propagates payoff-lookup failures.
pub fn check_rate_alignment<M: PayoffModel>(model: &M, rates: &[f64]) -> Result<(), EngineError> {
    let n_players = rates.len();
    if n_players == 0 {
        return Ok(());
    }
    let n_others = n_players - 1;

    for (player, &rate) in rates.iter().enumerate() {
        let probe = rate + 1.0;
        for n_eaten in 0..=n_others {
            let eat_delta = model.eat_value(probe, n_eaten, n_others)?
                - model.eat_value(rate, n_eaten, n_others)?;
            let not_eat_delta = model.not_eat_value(probe, n_eaten, n_others)?
                - model.not_eat_value(rate, n_eaten, n_others)?;

            let expected_eat = if n_eaten == n_others { 1.0 } else { 0.0 };
            let expected_not_eat = if n_eaten == 0 { -1.0 } else { 0.0 };

            if (eat_delta - expected_eat).abs() > 1e-9
                || (not_eat_delta - expected_not_eat).abs() > 1e-9
            {
                return Err(EngineError::MisalignedModel { player, n_eaten });
            }
        }
    }
    Ok(())
}
