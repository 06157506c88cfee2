//! CNF data structures shared between the encoder and the solver, plus
//! DIMACS serialization for external-solver interop.

use std::io::{self, BufRead, Write};

/// A nonzero signed literal: `+x` means "variable x is true", `-x` means
/// "variable x is false". Variable identifiers fit comfortably in 32 bits
/// even at the largest supported grid size (N=25 → 15,625 variables).
pub type Lit = i32;

/// A disjunction of literals. Satisfied once any one literal is true.
pub type Clause = Vec<Lit>;

/// A conjunction of clauses. The empty formula is vacuously satisfied; a
/// formula containing an empty clause is unsatisfiable.
pub type Formula = Vec<Clause>;

/// Largest variable identifier referenced anywhere in `formula`.
pub fn num_vars_used(formula: &Formula) -> usize {
    formula
        .iter()
        .flatten()
        .map(|&lit| lit.unsigned_abs() as usize)
        .max()
        .unwrap_or(0)
}

#[derive(Debug, thiserror::Error)]
pub enum DimacsError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("malformed DIMACS: header declared {declared} clauses, body has {actual}")]
    ClauseCountMismatch { declared: usize, actual: usize },
    #[error("malformed DIMACS: {0}")]
    InvalidFormat(String),
}

/// Writes `formula` in DIMACS CNF format:
/// ```text
/// p cnf <num_vars> <num_clauses>
/// <lit> <lit> ... 0
/// ```
/// one clause per line, each terminated by a literal `0`.
pub fn write_dimacs<W: Write>(writer: &mut W, formula: &Formula, num_vars: usize) -> io::Result<()> {
    debug_assert!(
        num_vars_used(formula) <= num_vars,
        "num_vars {num_vars} is smaller than the largest literal actually used ({})",
        num_vars_used(formula)
    );
    writeln!(writer, "p cnf {num_vars} {}", formula.len())?;
    for clause in formula {
        for lit in clause {
            write!(writer, "{lit} ")?;
        }
        writeln!(writer, "0")?;
    }
    writer.flush()
}

/// Parses a DIMACS CNF stream back into a `(Formula, num_vars)` pair.
///
/// Lines starting with `c` are treated as comments and skipped (DIMACS
/// allows them even though this crate's writer never emits any). The `p cnf`
/// header is required and its declared clause count is checked against the
/// number of clause lines actually read.
pub fn parse_dimacs<R: BufRead>(reader: R) -> Result<(Formula, usize), DimacsError> {
    let mut header: Option<(usize, usize)> = None;
    let mut formula = Formula::new();

    for line in reader.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('c') {
            continue;
        }
        if let Some(rest) = line.strip_prefix("p cnf") {
            let mut parts = rest.split_whitespace();
            let num_vars = parts
                .next()
                .and_then(|s| s.parse::<usize>().ok())
                .ok_or_else(|| DimacsError::InvalidFormat("bad p cnf header".to_string()))?;
            let num_clauses = parts
                .next()
                .and_then(|s| s.parse::<usize>().ok())
                .ok_or_else(|| DimacsError::InvalidFormat("bad p cnf header".to_string()))?;
            header = Some((num_vars, num_clauses));
            continue;
        }

        let mut clause: Clause = Vec::new();
        for tok in line.split_whitespace() {
            let lit: Lit = tok
                .parse()
                .map_err(|_| DimacsError::InvalidFormat(format!("bad literal {tok:?}")))?;
            if lit == 0 {
                break;
            }
            clause.push(lit);
        }
        formula.push(clause);
    }

    let (num_vars, declared_clauses) = header
        .ok_or_else(|| DimacsError::InvalidFormat("missing p cnf header".to_string()))?;
    if declared_clauses != formula.len() {
        return Err(DimacsError::ClauseCountMismatch {
            declared: declared_clauses,
            actual: formula.len(),
        });
    }
    Ok((formula, num_vars))
}
