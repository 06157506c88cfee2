//! Criterion micro-benchmarks, grounded directly on `putnam/benches/solver.rs`
//! (pigeonhole/chain synthetic formulas), extended with the Sudoku encoder's
//! own output so the benchmark suite exercises both halves of the core.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use ncsudoku_sat::encoder::encode;
use ncsudoku_sat::grid::Grid;
use ncsudoku_sat::solver::{solve, Heuristic};
use ncsudoku_sat::{Clause, Formula};

fn pigeonhole(n: usize) -> (Formula, usize) {
    // n+1 pigeons, n holes - classically UNSAT.
    let mut formula = Formula::new();
    let num_vars = (n + 1) * n;

    for pigeon in 0..=n {
        let clause: Clause = (0..n).map(|hole| (pigeon * n + hole + 1) as i32).collect();
        formula.push(clause);
    }
    for hole in 0..n {
        for p1 in 0..=n {
            for p2 in (p1 + 1)..=n {
                formula.push(vec![
                    -((p1 * n + hole + 1) as i32),
                    -((p2 * n + hole + 1) as i32),
                ]);
            }
        }
    }
    (formula, num_vars)
}

fn empty_sudoku(n: usize) -> Grid {
    Grid::new(vec![vec![0u16; n]; n]).unwrap()
}

fn bench_pigeonhole(c: &mut Criterion) {
    let mut group = c.benchmark_group("pigeonhole");
    for n in [3, 4, 5] {
        let (formula, num_vars) = pigeonhole(n);
        group.bench_with_input(format!("php_{}_{}", n + 1, n), &n, |b, _| {
            b.iter(|| solve(black_box(&formula), black_box(num_vars), Heuristic::Standard))
        });
    }
    group.finish();
}

fn bench_sudoku_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode");
    for n in [9, 16] {
        let grid = empty_sudoku(n);
        group.bench_with_input(format!("encode_n{n}"), &n, |b, _| {
            b.iter(|| encode(black_box(&grid), true))
        });
    }
    group.finish();
}

fn bench_sudoku_solve(c: &mut Criterion) {
    let mut group = c.benchmark_group("solve_empty_4x4");
    let grid = empty_sudoku(4);
    let (formula, num_vars) = encode(&grid, false);
    for heuristic in [Heuristic::Standard, Heuristic::Mom, Heuristic::JeroslowWang] {
        group.bench_with_input(format!("{heuristic:?}"), &heuristic, |b, &h| {
            b.iter(|| solve(black_box(&formula), black_box(num_vars), h))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_pigeonhole, bench_sudoku_encode, bench_sudoku_solve);
criterion_main!(benches);
