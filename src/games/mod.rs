//! Concrete payoff models for the equilibrium engine.
//!
//! Each game implements [`crate::nash::PayoffModel`] and serves three roles:
//!
//! 1. **Validation**: games with hand-computable equilibria (small
//!    [`table::TableGame`] instances) verify the solver end to end.
//! 2. **Examples**: [`duck::DuckFeast`] is the five-player game the engine
//!    was originally built for and shows what a real payoff table looks like.
//! 3. **Benchmarks**: standardized inputs for performance testing.
//!
//! ## Adding a new game
//!
//! Implement `PayoffModel` with the trade-off rate entering the tables only
//! at the canonical slots (eat-value when all others ate, not-eat-value when
//! nobody else ate); the engine verifies this before solving.

pub mod duck;
pub mod table;
