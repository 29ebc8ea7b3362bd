//! # Count-Game Nash
//!
//! A symmetric mixed-strategy Nash equilibrium engine for n-player
//! simultaneous binary-action games where payoffs depend only on how many
//! *other* players chose to act and a private per-player trade-off rate.
//!
//! ## Features
//!
//! - **Multilinear outcome polynomials**: exact evaluation and partial
//!   derivatives over per-player probabilities
//! - **Masked Newton-Raphson**: drives the indifference system to zero while
//!   holding corner players at pure strategies
//! - **Multi-start search**: randomized restarts with feasibility filtering
//!   and tolerance-based deduplication
//! - **Corner search**: escalates pure-strategy fixings until a
//!   best-response-valid equilibrium exists
//! - **Injected payoff models**: the engine is generic over any count game
//!
//! ## Quick Start
//!
//! ```
//! use count_game_nash::games::duck::DuckFeast;
//! use count_game_nash::nash::{NashSolver, SolverConfig};
//!
//! // 1. Pick (or implement) a payoff model
//! // 2. Create a solver
//! let mut solver = NashSolver::new(DuckFeast, SolverConfig::default().with_seed(42));
//!
//! // 3. Solve for one trade-off rate per player
//! let solutions = solver.find_minimal_fixed_solution(&[3.0, 3.0, 3.0, 3.0, 3.0]).unwrap();
//!
//! // 4. Sample actions from the equilibrium probabilities
//! let probs = &solutions[0].probabilities;
//! assert_eq!(probs.len(), 5);
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    NashSolver (generic engine)                  │
//! │  - Multi-start search     - Best-response validity              │
//! │  - Corner search          - Masked Newton-Raphson               │
//! └─────────────────────────────────────────────────────────────────┘
//!                               │
//!                               │ implements PayoffModel trait
//!                               ▼
//!              ┌────────────────┴────────────────┐
//!              │                                 │
//!              ▼                                 ▼
//!        ┌───────────┐                    ┌───────────┐
//!        │ DuckFeast │                    │ TableGame │
//!        │ (5-player)│                    │ (any n)   │
//!        └───────────┘                    └───────────┘
//! ```
//!
//! ## Modules
//!
//! - [`nash`]: Polynomials, the Newton-Raphson solver, and the search layers
//! - [`games`]: Concrete payoff models for validation and use

#![warn(missing_docs)]

/// Equilibrium engine module.
///
/// This is the core module containing the polynomial representation, the
/// masked Newton-Raphson solver, and the multi-start and corner searches.
pub mod nash;

/// Game implementations module.
///
/// Contains concrete payoff models like the five-player duck feast for
/// testing and validation.
pub mod games;

// Re-export commonly used types at crate root for convenience
pub use nash::{EngineError, NashSolver, OutcomePolynomial, PayoffModel, Solution, SolverConfig};
