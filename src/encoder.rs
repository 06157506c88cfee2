//! Pure translation from a validated [`Grid`] into CNF.
//!
//! Grounded on `sudoku_sat.rs::generate_clauses`/`coords_to_var` from the
//! teacher crate, generalized from a fixed 9×9/3×3 grid to an arbitrary
//! perfect-square N, and extended with the non-consecutive constraint
//! group.

use itertools::Itertools;

use crate::cnf::{Clause, Formula, Lit};
use crate::grid::Grid;

/// Deterministic variable numbering: `var(r, c, v) = r*N² + c*N + v`, with
/// `r, c ∈ [0, N-1]` and `v ∈ [1, N]`. The smallest identifier is 1.
pub fn var(r: usize, c: usize, v: usize, n: usize) -> Lit {
    (r * n * n + c * n + v) as Lit
}

/// Inverse of [`var`]: recovers `(r, c, v)` from a variable identifier.
pub fn inverse_var(id: Lit, n: usize) -> (usize, usize, usize) {
    let n = n as Lit;
    let zero_based = id - 1;
    let v = (zero_based % n) + 1;
    let c = (zero_based / n) % n;
    let r = zero_based / (n * n);
    (r as usize, c as usize, v as usize)
}

/// Emits the pairwise "exactly one" encoding for `lits`: the clause `lits`
/// itself (at least one), plus a binary clause `(¬a ∨ ¬b)` for every
/// unordered pair (at most one). No auxiliary variables are introduced.
fn exactly_one(lits: &[Lit], clauses: &mut Formula) {
    clauses.push(lits.to_vec());
    for (&a, &b) in lits.iter().tuple_combinations() {
        clauses.push(vec![-a, -b]);
    }
}

/// Cells orthogonally adjacent to `(r, c)`, in `(r, c) < (r', c')`
/// lexicographic order so each undirected neighbor pair is visited once
/// across the whole grid.
fn greater_neighbors(r: usize, c: usize, n: usize) -> impl Iterator<Item = (usize, usize)> {
    let down = (r + 1 < n).then_some((r + 1, c));
    let right = (c + 1 < n).then_some((r, c + 1));
    down.into_iter().chain(right)
}

/// Translates `grid` into an equivalent CNF formula. Returns the formula
/// and the exact variable count `N³`. Total on any validated `Grid`; the
/// grid's own constructor is where malformed input is rejected.
pub fn encode(grid: &Grid, use_non_consecutive: bool) -> (Formula, usize) {
    let n = grid.n();
    let b = grid.b();
    let num_vars = n * n * n;
    let mut clauses = Formula::new();

    // 1. Cell constraint: each (r, c) holds exactly one value.
    for r in 0..n {
        for c in 0..n {
            let lits: Vec<Lit> = (1..=n).map(|v| var(r, c, v, n)).collect();
            exactly_one(&lits, &mut clauses);
        }
    }

    for v in 1..=n {
        // 2. Row constraint: each value appears exactly once per row.
        for r in 0..n {
            let lits: Vec<Lit> = (0..n).map(|c| var(r, c, v, n)).collect();
            exactly_one(&lits, &mut clauses);
        }
        // 3. Column constraint: each value appears exactly once per column.
        for c in 0..n {
            let lits: Vec<Lit> = (0..n).map(|r| var(r, c, v, n)).collect();
            exactly_one(&lits, &mut clauses);
        }
        // 4. Box constraint: each value appears exactly once per B×B box.
        for br in (0..n).step_by(b) {
            for bc in (0..n).step_by(b) {
                let lits: Vec<Lit> = (0..b)
                    .flat_map(|dr| (0..b).map(move |dc| (dr, dc)))
                    .map(|(dr, dc)| var(br + dr, bc + dc, v, n))
                    .collect();
                exactly_one(&lits, &mut clauses);
            }
        }
    }

    // 5. Non-consecutive constraint: orthogonal neighbors may not differ by 1.
    if use_non_consecutive {
        for r in 0..n {
            for c in 0..n {
                for (r2, c2) in greater_neighbors(r, c, n) {
                    for v in 1..=n {
                        let x = var(r, c, v, n);
                        if v > 1 {
                            clauses.push(vec![-x, -var(r2, c2, v - 1, n)]);
                        }
                        if v < n {
                            clauses.push(vec![-x, -var(r2, c2, v + 1, n)]);
                        }
                    }
                }
            }
        }
    }

    // 6. Clues: a unit clause per prefilled cell.
    for r in 0..n {
        for c in 0..n {
            let value = grid.get(r, c) as usize;
            if value != 0 {
                clauses.push(vec![var(r, c, value, n)]);
            }
        }
    }

    (clauses, num_vars)
}

/// Builds a clause per literal for the "exactly one" group `lits` that would
/// result in `1 + |lits|*(|lits|-1)/2` clauses, matching `spec.md` §4.1's
/// closed-form clause count.
pub fn exactly_one_clause_count(k: usize) -> usize {
    1 + k * k.saturating_sub(1) / 2
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Grid;

    fn empty_grid(n: usize) -> Grid {
        Grid::new(vec![vec![0u16; n]; n]).unwrap()
    }

    #[test]
    fn var_is_a_bijection() {
        let n = 9;
        for r in 0..n {
            for c in 0..n {
                for v in 1..=n {
                    let id = var(r, c, v, n);
                    assert!(id >= 1 && id as usize <= n * n * n);
                    assert_eq!(inverse_var(id, n), (r, c, v));
                }
            }
        }
    }

    #[test]
    fn num_vars_is_n_cubed() {
        let grid = empty_grid(9);
        let (_, num_vars) = encode(&grid, true);
        assert_eq!(num_vars, 9 * 9 * 9);
    }

    #[test]
    fn every_literal_is_nonzero_and_in_range() {
        let grid = empty_grid(9);
        let (clauses, num_vars) = encode(&grid, true);
        for clause in &clauses {
            assert!(!clause.is_empty());
            for &lit in clause {
                assert_ne!(lit, 0);
                assert!(lit.unsigned_abs() as usize <= num_vars);
            }
        }
    }

    #[test]
    fn encoding_is_deterministic() {
        let grid = empty_grid(9);
        let (c1, n1) = encode(&grid, true);
        let (c2, n2) = encode(&grid, true);
        assert_eq!(n1, n2);
        assert_eq!(c1, c2);
    }

    #[test]
    fn clues_become_unit_clauses() {
        let mut rows = vec![vec![0u16; 4]; 4];
        rows[0][0] = 1;
        let grid = Grid::new(rows).unwrap();
        let (clauses, _) = encode(&grid, false);
        let expected = var(0, 0, 1, 4);
        assert!(clauses.iter().any(|c| c.len() == 1 && c[0] == expected));
    }

    #[test]
    fn non_consecutive_flag_adds_no_clauses_when_disabled() {
        let grid = empty_grid(4);
        let (with_nc, _) = encode(&grid, true);
        let (without_nc, _) = encode(&grid, false);
        assert!(with_nc.len() > without_nc.len());
    }

    #[test]
    fn standard_only_clause_count_matches_closed_form() {
        // 4 "exactly one" groups (cell/row/col/box), 4*N of each for N=4.
        let n = 4;
        let grid = empty_grid(n);
        let (clauses, _) = encode(&grid, false);
        // 4 constraint kinds (cell/row/col/box), each with N*N groups of size N.
        let groups = 4 * n * n;
        let expected = groups * exactly_one_clause_count(n);
        assert_eq!(clauses.len(), expected);
    }
}
