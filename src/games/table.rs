//! Table-driven payoff model for arbitrary player counts.
//!
//! [`TableGame`] holds explicit base payoff tables indexed by the number of
//! *other* players who ate, with the trade-off rate added on top of the two
//! canonical slots at lookup time. It is the generalization hook: any count
//! game, for any n, can be expressed without touching the engine.

use crate::nash::error::EngineError;
use crate::nash::model::PayoffModel;

/// Payoff tables for a binary-action count game with `n_others + 1` entries
/// each.
///
/// Lookups return the base entry, plus `rate` at `eat[n_others]` and minus
/// `rate` at `not_eat[0]`. Keeping the rate out of the stored tables keeps
/// the model aligned with the engine's rate-slot convention for free.
///
/// # Example
/// ```
/// use count_game_nash::games::table::TableGame;
/// use count_game_nash::nash::PayoffModel;
///
/// // 2-player stake-splitting game: eat = [6, rate], not-eat = [-rate, 6]
/// let game = TableGame::new(vec![6.0, 0.0], vec![0.0, 6.0]).unwrap();
/// assert_eq!(game.eat_value(2.0, 1, 1).unwrap(), 2.0);
/// assert_eq!(game.not_eat_value(2.0, 0, 1).unwrap(), -2.0);
/// ```
#[derive(Debug, Clone)]
pub struct TableGame {
    /// Base eat-values, indexed by eat-count of the others.
    eat: Vec<f64>,
    /// Base not-eat-values, indexed by eat-count of the others.
    not_eat: Vec<f64>,
}

impl TableGame {
    /// Build a table game from base tables of equal, non-zero length.
    ///
    /// # Errors
    /// Returns [`EngineError::ShapeMismatch`] when the tables differ in
    /// length or are empty.
    pub fn new(eat: Vec<f64>, not_eat: Vec<f64>) -> Result<Self, EngineError> {
        if eat.len() != not_eat.len() {
            return Err(EngineError::ShapeMismatch { expected: eat.len(), found: not_eat.len() });
        }
        if eat.is_empty() {
            return Err(EngineError::ShapeMismatch { expected: 1, found: 0 });
        }
        Ok(Self { eat, not_eat })
    }

    /// Number of other players the tables cover.
    pub fn n_others(&self) -> usize {
        self.eat.len() - 1
    }

    fn check(&self, n_eaten: usize, n_others: usize) -> Result<(), EngineError> {
        if n_others != self.n_others() {
            return Err(EngineError::ShapeMismatch {
                expected: self.n_others(),
                found: n_others,
            });
        }
        if n_eaten > n_others {
            return Err(EngineError::CountOutOfRange { n_eaten, n_others });
        }
        Ok(())
    }
}

impl PayoffModel for TableGame {
    fn eat_value(&self, rate: f64, n_eaten: usize, n_others: usize) -> Result<f64, EngineError> {
        self.check(n_eaten, n_others)?;
        let base = self.eat[n_eaten];
        Ok(if n_eaten == n_others { base + rate } else { base })
    }

    fn not_eat_value(
        &self,
        rate: f64,
        n_eaten: usize,
        n_others: usize,
    ) -> Result<f64, EngineError> {
        self.check(n_eaten, n_others)?;
        let base = self.not_eat[n_eaten];
        Ok(if n_eaten == 0 { base - rate } else { base })
    }
}
