//! The five-player duck feast game.
//!
//! Five players simultaneously decide whether to eat the duck. Points are
//! zero-sum: a lone abstainer or lone eater scoops the stake from the crowd,
//! and the split scales with how lopsided the outcome is. Cash only changes
//! hands at the two unanimous-other outcomes, which is where each player's
//! private cash-to-points trade-off rate enters.
//!
//! ## Payoff table
//!
//! With a stake of 6 points and `k` = number of *other* players who ate:
//!
//! | k | eat       | not eat   |
//! |---|-----------|-----------|
//! | 0 | 6         | -rate     |
//! | 1 | -18/4     | -6/4      |
//! | 2 | -12/4     | 12/4      |
//! | 3 | -6/4      | 18/4      |
//! | 4 | rate      | 6         |
//!
//! The rate sits exactly in the canonical slots (eat at k = 4, not-eat at
//! k = 0), so the engine's rate-slot alignment check accepts this model.

use crate::nash::error::EngineError;
use crate::nash::model::PayoffModel;

/// Points at stake in the duck feast.
const STAKE: f64 = 6.0;

/// Number of other players each player faces.
const N_OTHERS: usize = 4;

/// Payoff model for the five-player duck feast.
#[derive(Debug, Clone, Copy, Default)]
pub struct DuckFeast;

impl PayoffModel for DuckFeast {
    fn eat_value(&self, rate: f64, n_eaten: usize, n_others: usize) -> Result<f64, EngineError> {
        if n_others != N_OTHERS {
            return Err(EngineError::ShapeMismatch { expected: N_OTHERS, found: n_others });
        }
        match n_eaten {
            0 => Ok(STAKE),
            1 => Ok(-(3.0 * STAKE) / 4.0),
            2 => Ok(-(2.0 * STAKE) / 4.0),
            3 => Ok(-STAKE / 4.0),
            4 => Ok(rate),
            _ => Err(EngineError::CountOutOfRange { n_eaten, n_others }),
        }
    }

    fn not_eat_value(
        &self,
        rate: f64,
        n_eaten: usize,
        n_others: usize,
    ) -> Result<f64, EngineError> {
        if n_others != N_OTHERS {
            return Err(EngineError::ShapeMismatch { expected: N_OTHERS, found: n_others });
        }
        match n_eaten {
            0 => Ok(-rate),
            1 => Ok(-STAKE / 4.0),
            2 => Ok((2.0 * STAKE) / 4.0),
            3 => Ok((3.0 * STAKE) / 4.0),
            4 => Ok(STAKE),
            _ => Err(EngineError::CountOutOfRange { n_eaten, n_others }),
        }
    }
}
