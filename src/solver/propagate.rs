//! Unit propagation to a fixed point.
//!
//! Grounded on `putnam::solver::unit::unit_propagate`, reshaped around the
//! signed-integer `Clause`/`Formula` model (matching `spec.md`'s literal
//! representation) rather than `putnam`'s `Lit{var,neg}` struct — the
//! clause-list-simplification style of
//! `other_examples/.../davis-putnam-logemann-loveland/main.rs`.

use std::collections::HashMap;

use crate::cnf::{Clause, Formula, Lit};

/// Partial assignment: variable id → truth value. A variable absent from
/// the map is unassigned.
pub type Assignment = HashMap<u32, bool>;

/// Internal-only conflict marker. Never surfaces past `solver::dpll::solve`;
/// it is how DPLL learns a branch (or the whole formula) failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Conflict;

/// Simplifies `formula` under the single literal `lit` (assumed true):
/// clauses containing `lit` are dropped (satisfied), clauses containing
/// `-lit` have that literal removed, and a clause that becomes empty is
/// reported as a conflict. `formula` itself is left untouched — the caller
/// keeps it intact for backtracking.
pub fn simplify(formula: &Formula, lit: Lit) -> Result<Formula, Conflict> {
    let mut out = Formula::with_capacity(formula.len());
    for clause in formula {
        if clause.contains(&lit) {
            continue;
        }
        if clause.contains(&-lit) {
            let shrunk: Clause = clause.iter().copied().filter(|&l| l != -lit).collect();
            if shrunk.is_empty() {
                return Err(Conflict);
            }
            out.push(shrunk);
        } else {
            out.push(clause.clone());
        }
    }
    Ok(out)
}

/// Runs unit propagation on `formula` to a fixed point, recording forced
/// assignments in `assignment` as it goes. Returns the simplified formula,
/// or a conflict if an empty clause is produced or a unit clause disagrees
/// with an existing assignment.
pub fn propagate(formula: &Formula, assignment: &mut Assignment) -> Result<Formula, Conflict> {
    let mut formula = formula.clone();
    loop {
        if formula.iter().any(|c| c.is_empty()) {
            return Err(Conflict);
        }
        let Some(lit) = formula.iter().find(|c| c.len() == 1).map(|c| c[0]) else {
            return Ok(formula);
        };
        let var = lit.unsigned_abs();
        let val = lit > 0;
        match assignment.get(&var) {
            Some(&existing) if existing != val => return Err(Conflict),
            Some(_) => {}
            None => {
                assignment.insert(var, val);
            }
        }
        formula = simplify(&formula, lit)?;
    }
}
