//! Error taxonomy for the equilibrium engine.
//!
//! Every variant except `NoConvergence` and `SingularJacobian` signals a
//! programming-contract violation and should propagate to the caller.
//! The two solver-failure variants are caught inside the multi-start search,
//! where a failed trial simply produces no candidate.

/// Errors raised by polynomial construction and the equilibrium solver.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineError {
    /// Requested an outcome enumeration whose size (2^arity) cannot be
    /// represented.
    InvalidArity(usize),

    /// Array lengths inside a polynomial (outcomes, coefficients, probability
    /// vectors, masks) disagree.
    ShapeMismatch {
        /// What was expected (e.g. the polynomial's arity).
        expected: usize,
        /// What was supplied.
        found: usize,
    },

    /// Attempted to add two polynomials defined over different outcome spaces.
    InconsistentOutcomes,

    /// A payoff lookup used an eat-count outside `[0, n_others]`.
    CountOutOfRange {
        /// The offending count.
        n_eaten: usize,
        /// Number of other players, i.e. the maximum valid count.
        n_others: usize,
    },

    /// The same player index appears in both the fixed-zero and fixed-one sets.
    OverlappingFixed(usize),

    /// A fixed player index is not a valid index into the rates vector.
    IndexOutOfRange {
        /// The offending index.
        index: usize,
        /// Number of players.
        n_players: usize,
    },

    /// Newton-Raphson exhausted its iteration cap without the residuals
    /// falling below tolerance.
    NoConvergence {
        /// Iteration cap that was exhausted.
        iterations: usize,
    },

    /// The masked Jacobian was singular (or numerically indistinguishable
    /// from singular) at the current iterate.
    SingularJacobian,

    /// The payoff model's rate dependence is not confined to the expected
    /// table slots (eat at k = n-1, not-eat at k = 0).
    MisalignedModel {
        /// Player index whose tables failed the check.
        player: usize,
        /// Eat-count at which the unexpected rate dependence was found.
        n_eaten: usize,
    },
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineError::InvalidArity(arity) => {
                write!(f, "Cannot enumerate 2^{} outcomes", arity)
            }
            EngineError::ShapeMismatch { expected, found } => {
                write!(f, "Inconsistent array lengths: expected {}, found {}", expected, found)
            }
            EngineError::InconsistentOutcomes => {
                write!(f, "Polynomials have inconsistent outcome arrays")
            }
            EngineError::CountOutOfRange { n_eaten, n_others } => {
                write!(f, "Eat-count {} is outside [0, {}]", n_eaten, n_others)
            }
            EngineError::OverlappingFixed(index) => {
                write!(f, "Player {} is fixed to both 0 and 1", index)
            }
            EngineError::IndexOutOfRange { index, n_players } => {
                write!(f, "Fixed index {} is out of range for {} players", index, n_players)
            }
            EngineError::NoConvergence { iterations } => {
                write!(f, "Solution did not converge within {} iterations", iterations)
            }
            EngineError::SingularJacobian => {
                write!(f, "Masked Jacobian is singular")
            }
            EngineError::MisalignedModel { player, n_eaten } => {
                write!(
                    f,
                    "Payoff model for player {} varies with the rate at eat-count {}",
                    player, n_eaten
                )
            }
        }
    }
}

impl std::error::Error for EngineError {}
