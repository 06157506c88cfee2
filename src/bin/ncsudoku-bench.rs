//! Ambient benchmark harness: runs every puzzle file in a directory through
//! the encode/solve pipeline and writes a CSV of results.
//!
//! Grounded on `original_source/run_benchmark.py` and `benchmark.py` for the
//! per-file timing loop and CSV column layout, and on
//! `sat_puzzles/src/bin/minesweeper.rs`'s use of `rayon` to parallelize
//! independent work — here, independent puzzle files rather than an
//! independent board search. CSV rows are hand-written with `writeln!`
//! rather than via a `csv` crate dependency, matching how every DIMACS/CNF
//! writer in this pack formats its own output by hand.

use std::fs::File;
use std::io::Write;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use rayon::prelude::*;

use ncsudoku_sat::encoder::encode;
use ncsudoku_sat::grid::parse_puzzles;
use ncsudoku_sat::solver::{solve, Heuristic, Verdict};

/// Benchmark harness for the non-consecutive Sudoku solver.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory containing `*.txt` puzzle files.
    #[arg(long)]
    dir: PathBuf,

    /// CSV path to write results to.
    #[arg(long, default_value = "benchmark_results.csv")]
    output: PathBuf,

    /// Disable the non-consecutive constraint.
    #[arg(long)]
    standard_only: bool,

    /// Branching heuristic used by the DPLL search.
    #[arg(long, value_enum, default_value = "standard")]
    heuristic: Heuristic,
}

struct Row {
    puzzle: String,
    n: usize,
    time_seconds: f64,
    result: &'static str,
    backtracks: u64,
    init_props: usize,
}

fn run_one(path: &std::path::Path, standard_only: bool, heuristic: Heuristic) -> Result<Vec<Row>> {
    let puzzles = parse_puzzles(path).with_context(|| format!("opening {}", path.display()))?;
    let name = path.file_name().unwrap_or_default().to_string_lossy().to_string();

    let mut rows = Vec::new();
    for grid in puzzles {
        let grid = grid.with_context(|| format!("reading {}", path.display()))?;
        let start = Instant::now();
        let (formula, num_vars) = encode(&grid, !standard_only);
        let outcome = solve(&formula, num_vars, heuristic);
        rows.push(Row {
            puzzle: name.clone(),
            n: grid.n(),
            time_seconds: start.elapsed().as_secs_f64(),
            result: match outcome.verdict {
                Verdict::Sat => "SAT",
                Verdict::Unsat => "UNSAT",
            },
            backtracks: outcome.backtracks,
            init_props: outcome.init_props,
        });
    }
    Ok(rows)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut files: Vec<PathBuf> = std::fs::read_dir(&cli.dir)
        .with_context(|| format!("reading directory {}", cli.dir.display()))?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|p| p.extension().is_some_and(|ext| ext == "txt"))
        .collect();
    files.sort();

    println!("Found {} puzzle files. Running benchmark...", files.len());

    let results: Vec<Result<Vec<Row>>> = files
        .par_iter()
        .map(|path| run_one(path, cli.standard_only, cli.heuristic))
        .collect();

    let out_file = File::create(&cli.output)
        .with_context(|| format!("creating {}", cli.output.display()))?;
    let mut writer = std::io::BufWriter::new(out_file);
    writeln!(writer, "puzzle,n,time_seconds,result,backtracks,init_props")?;

    for (path, result) in files.iter().zip(results) {
        match result {
            Ok(rows) => {
                for row in rows {
                    writeln!(
                        writer,
                        "{},{},{:.4},{},{},{}",
                        row.puzzle, row.n, row.time_seconds, row.result, row.backtracks, row.init_props
                    )?;
                }
            }
            Err(e) => {
                eprintln!("error running {}: {e:#}", path.display());
                writeln!(writer, "{},,,ERROR,,", path.display())?;
            }
        }
    }
    writer.flush()?;

    println!("Benchmark complete. Results in {}.", cli.output.display());
    Ok(())
}
