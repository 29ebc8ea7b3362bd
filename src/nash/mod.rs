//! Nash equilibrium engine for binary-action count games.
//!
//! This module contains the whole algorithmic core:
//!
//! 1. Enumerate the boolean outcome space of the *other* players and attach
//!    payoff coefficients to build multilinear value polynomials.
//! 2. Form each player's indifference condition (expected eat-value minus
//!    expected not-eat-value) over the other players' probabilities.
//! 3. Drive the masked indifference system to zero with Newton-Raphson,
//!    repeated from randomized starting points.
//! 4. Filter candidates for feasibility, deduplicate, and check best-response
//!    rationality for any player pinned to a pure strategy.
//! 5. When no fully-mixed equilibrium survives, escalate a corner search that
//!    fixes growing subsets of players to pure strategies.
//!
//! # Usage
//!
//! ```
//! use count_game_nash::games::duck::DuckFeast;
//! use count_game_nash::nash::{NashSolver, SolverConfig};
//!
//! let mut solver = NashSolver::new(DuckFeast, SolverConfig::default().with_seed(7));
//! let solutions = solver.find_minimal_fixed_solution(&[2.0, 4.0, 1.0, 3.0, 5.0]).unwrap();
//! for solution in &solutions {
//!     println!("{:?}", solution.probabilities);
//! }
//! ```
//!
//! The payoff table itself is injected through the [`PayoffModel`] trait;
//! concrete games live under [`crate::games`].

pub mod config;
pub mod engine;
pub mod error;
pub mod linalg;
pub mod model;
pub mod newton;
pub mod outcomes;
pub mod system;

pub use config::{ConfigError, SolverConfig};
pub use engine::NashSolver;
pub use error::EngineError;
pub use model::PayoffModel;
pub use newton::Solution;
pub use outcomes::{enumerate_outcomes, OutcomePolynomial};
pub use system::{check_rate_alignment, EquilibriumSystem};
