//! The DPLL decision procedure itself: unit propagation to a fixed point,
//! heuristic-driven branching, and backtrack accounting.
//!
//! Grounded on `putnam::solver::dpll` for the propagate → check → branch →
//! backtrack structure, and on
//! `other_examples/.../davis-putnam-logemann-loveland/main.rs` for
//! representing a branch decision as appending a unit clause and
//! recursing, which keeps this function a single, literal implementation
//! of the state machine in `spec.md` §4.2 rather than needing a separate
//! simplify-then-recurse dance at each branch.

use crate::cnf::{Formula, Lit};
use crate::solver::heuristics::{choose_variable, Heuristic};
use crate::solver::propagate::{propagate, Assignment, Conflict};

/// Whether a formula is satisfiable. The core never returns a model (see
/// `spec.md` §1 Non-goals) — only this verdict plus diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Sat,
    Unsat,
}

/// Result of one `solve` call: the verdict, how many branch decisions
/// failed, and how many variables the very first unit-propagation pass
/// forced before any search began.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolveOutcome {
    pub verdict: Verdict,
    pub backtracks: u64,
    pub init_props: usize,
}

/// Decides the satisfiability of `formula` over `num_vars` variables using
/// `heuristic` to pick branch variables. Total: always returns `Sat` or
/// `Unsat` for a finite formula. The backtrack counter is reset at the
/// start of every call, per `spec.md` §3's lifecycle invariant.
pub fn solve(formula: &Formula, num_vars: usize, heuristic: Heuristic) -> SolveOutcome {
    let init_props = {
        let mut assignment = Assignment::with_capacity(num_vars);
        match propagate(formula, &mut assignment) {
            Ok(_) => assignment.len(),
            Err(Conflict) => {
                return SolveOutcome {
                    verdict: Verdict::Unsat,
                    backtracks: 0,
                    init_props: assignment.len(),
                };
            }
        }
    };

    let mut backtracks = 0u64;
    let assignment = Assignment::with_capacity(num_vars);
    let verdict = match search(formula, assignment, heuristic, &mut backtracks) {
        Ok(()) => Verdict::Sat,
        Err(Conflict) => Verdict::Unsat,
    };

    SolveOutcome {
        verdict,
        backtracks,
        init_props,
    }
}

/// One recursion frame: `propagate → check → branch_pos → branch_neg →
/// return`, matching `spec.md` §4.2's state machine exactly. A branch is
/// represented by appending a unit clause for the chosen literal and
/// recursing; the recursive call's own `propagate` step performs the
/// simplification and conflict detection for that decision.
fn search(formula: &Formula, mut assignment: Assignment, heuristic: Heuristic, backtracks: &mut u64) -> Result<(), Conflict> {
    let propagated = propagate(formula, &mut assignment)?;
    if propagated.is_empty() {
        return Ok(());
    }

    let var = choose_variable(&propagated, &assignment, heuristic).ok_or(Conflict)?;
    let pos: Lit = var as Lit;

    let mut try_true = propagated.clone();
    try_true.push(vec![pos]);
    if search(&try_true, assignment.clone(), heuristic, backtracks).is_ok() {
        return Ok(());
    }
    *backtracks += 1;

    let mut try_false = propagated;
    try_false.push(vec![-pos]);
    let result = search(&try_false, assignment, heuristic, backtracks);
    if result.is_err() {
        *backtracks += 1;
    }
    result
}
