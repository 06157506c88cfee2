//! CLI surface from `spec.md` §6: read a puzzle file, encode it, solve it,
//! and print one result line per puzzle.
//!
//! Grounded on `putnam/src/bin/putnam.rs` (single-command, file-driven CLI)
//! and the `anyhow::Result<()>` / `clap::Parser` idiom every `sat_puzzles`
//! binary uses.

use std::io::BufReader;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;

use ncsudoku_sat::cnf::parse_dimacs;
use ncsudoku_sat::encoder::encode;
use ncsudoku_sat::grid::parse_puzzles;
use ncsudoku_sat::solver::{solve, Heuristic};

/// Non-Consecutive Sudoku: encode puzzles to CNF and decide SAT/UNSAT.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to a puzzle file (compact/dot dialect or standard dialect).
    #[arg(long = "in")]
    input: std::path::PathBuf,

    /// Disable the non-consecutive constraint (standard Sudoku rules only).
    #[arg(long)]
    standard_only: bool,

    /// Parse `--in` as a DIMACS CNF file instead of a Sudoku puzzle file.
    #[arg(long)]
    sat: bool,

    /// Branching heuristic used by the DPLL search.
    #[arg(long, value_enum, default_value = "standard")]
    heuristic: Heuristic,

    /// Print each grid before solving it.
    #[arg(long)]
    print_grid: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.sat {
        let file = std::fs::File::open(&cli.input)
            .with_context(|| format!("opening {}", cli.input.display()))?;
        let (formula, num_vars) = parse_dimacs(BufReader::new(file))
            .with_context(|| format!("parsing {} as DIMACS", cli.input.display()))?;
        let start = Instant::now();
        let outcome = solve(&formula, num_vars, cli.heuristic);
        print_result(1, start.elapsed().as_secs_f64(), &outcome);
        return Ok(());
    }

    let puzzles = parse_puzzles(&cli.input)
        .with_context(|| format!("opening {}", cli.input.display()))?;

    let mut count = 0usize;
    for grid in puzzles {
        let grid = grid.with_context(|| format!("reading puzzle from {}", cli.input.display()))?;
        count += 1;

        if cli.print_grid {
            println!("{grid}");
        }

        let start = Instant::now();
        let (formula, num_vars) = encode(&grid, !cli.standard_only);
        let outcome = solve(&formula, num_vars, cli.heuristic);
        let elapsed = start.elapsed().as_secs_f64();

        print_result(count, elapsed, &outcome);
    }

    Ok(())
}

/// `[PUZZLE] ID: <n> | Time: <seconds>s | Result: <SAT|UNSAT> | Backtracks: <n> | InitProps: <n>`
fn print_result(id: usize, elapsed_secs: f64, outcome: &ncsudoku_sat::SolveOutcome) {
    let result = match outcome.verdict {
        ncsudoku_sat::Verdict::Sat => "SAT",
        ncsudoku_sat::Verdict::Unsat => "UNSAT",
    };
    println!(
        "[PUZZLE] ID: {id} | Time: {elapsed_secs:.4}s | Result: {result} | Backtracks: {} | InitProps: {}",
        outcome.backtracks, outcome.init_props
    );
    use std::io::Write;
    let _ = std::io::stdout().flush();
}
