//! Payoff model trait: the seam between the engine and concrete games.
//!
//! The engine never hard-codes a payoff table. Any game whose payoffs depend
//! only on how many *other* players ate, plus a private per-player trade-off
//! rate, can implement [`PayoffModel`] and be solved unchanged. Concrete
//! models live under `crate::games`.

use crate::nash::error::EngineError;

/// Payoffs for a binary-action count game.
///
/// Both lookups take the player's trade-off `rate`, the count `n_eaten` of
/// *other* players who ate, and the number `n_others` of other players
/// (`n_players - 1`). Valid counts are `0..=n_others`; implementations must
/// reject everything else with [`EngineError::CountOutOfRange`].
///
/// The engine assumes the rate enters the tables only at the canonical slots:
/// `eat_value` at `n_eaten == n_others` and `not_eat_value` at `n_eaten == 0`.
/// [`crate::nash::system::check_rate_alignment`] verifies this before any
/// solving is trusted.
pub trait PayoffModel {
    /// Expected payoff for eating when `n_eaten` of the other players ate.
    fn eat_value(&self, rate: f64, n_eaten: usize, n_others: usize) -> Result<f64, EngineError>;

    /// Expected payoff for abstaining when `n_eaten` of the other players ate.
    fn not_eat_value(&self, rate: f64, n_eaten: usize, n_others: usize)
        -> Result<f64, EngineError>;
}
