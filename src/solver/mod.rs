//! The DPLL decision procedure: unit propagation, three branching
//! heuristics, and the recursive search with backtrack accounting.
//!
//! - [`propagate`]: unit propagation to a fixed point
//! - [`heuristics`]: first-unassigned / MOM / Jeroslow-Wang branch selection
//! - [`dpll`]: the recursive search itself

pub mod dpll;
pub mod heuristics;
pub mod propagate;

pub use dpll::{solve, SolveOutcome, Verdict};
pub use heuristics::Heuristic;
