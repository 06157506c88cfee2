//! Grid data type and the two puzzle-file dialects (compact/dot and
//! standard whitespace-separated) read by the surrounding CLI.
//!
//! Parsing of a puzzle file is deliberately kept outside the encoder: the
//! encoder only ever sees an already-validated [`Grid`].

use std::fmt;
use std::fs;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Errors raised while validating a grid's shape.
///
/// Returned by [`Grid::new`] before any clause is ever emitted; the encoder
/// itself is total once it holds a `Grid`.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum InvalidGrid {
    #[error("grid side length {0} is not a perfect square")]
    NotPerfectSquare(usize),
    #[error("row {row} is ragged: expected {expected} cells, found {actual}")]
    RaggedRow {
        row: usize,
        expected: usize,
        actual: usize,
    },
    #[error("cell ({row}, {col}) = {value} is out of range 0..={max}")]
    ValueOutOfRange {
        row: usize,
        col: usize,
        value: u16,
        max: usize,
    },
}

/// An N×N Sudoku grid. Zero denotes an empty cell; N is guaranteed to be a
/// perfect square (`b = sqrt(n)`) and every row has exactly `n` cells with
/// values in `0..=n`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cells: Vec<Vec<u16>>,
    n: usize,
    b: usize,
}

impl Grid {
    /// Validates and wraps a raw row matrix. This is the single point at
    /// which a grid's shape invariants are enforced.
    pub fn new(cells: Vec<Vec<u16>>) -> Result<Self, InvalidGrid> {
        let n = cells.len();
        let b = (n as f64).sqrt().round() as usize;
        if n == 0 || b * b != n {
            return Err(InvalidGrid::NotPerfectSquare(n));
        }
        for (row, cols) in cells.iter().enumerate() {
            if cols.len() != n {
                return Err(InvalidGrid::RaggedRow {
                    row,
                    expected: n,
                    actual: cols.len(),
                });
            }
            for (col, &value) in cols.iter().enumerate() {
                if value as usize > n {
                    return Err(InvalidGrid::ValueOutOfRange {
                        row,
                        col,
                        value,
                        max: n,
                    });
                }
            }
        }
        Ok(Grid { cells, n, b })
    }

    pub fn n(&self) -> usize {
        self.n
    }

    pub fn b(&self) -> usize {
        self.b
    }

    pub fn get(&self, r: usize, c: usize) -> u16 {
        self.cells[r][c]
    }

    pub fn rows(&self) -> &[Vec<u16>] {
        &self.cells
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.n.to_string().len();
        for (r, row) in self.cells.iter().enumerate() {
            if r > 0 && r % self.b == 0 {
                writeln!(f)?;
            }
            for (c, &value) in row.iter().enumerate() {
                if c > 0 && c % self.b == 0 {
                    write!(f, " |")?;
                }
                if value == 0 {
                    write!(f, " {:>width$}", ".", width = width)?;
                } else {
                    write!(f, " {:>width$}", value, width = width)?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Errors raised while reading a puzzle file.
#[derive(Debug, thiserror::Error)]
pub enum GridParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid format: {0}")]
    InvalidFormat(String),
    #[error(transparent)]
    InvalidGrid(#[from] InvalidGrid),
}

/// Parses a single compact/dot line (`N²` characters, digits or `.`) into a
/// `Grid`. Returns `None` for a line whose character count is not a perfect
/// square, mirroring the silent-skip behavior of the file-level iterator.
fn parse_compact_line(line: &str) -> Option<Result<Grid, GridParseError>> {
    let chars: Vec<char> = line.chars().filter(|c| c.is_ascii_digit() || *c == '.').collect();
    let total = chars.len();
    let n = (total as f64).sqrt().round() as usize;
    if n == 0 || n * n != total {
        return None;
    }
    let mut rows = vec![vec![0u16; n]; n];
    for (idx, ch) in chars.into_iter().enumerate() {
        let value = if ch == '.' { 0 } else { ch.to_digit(10).unwrap() as u16 };
        rows[idx / n][idx % n] = value;
    }
    Some(Grid::new(rows).map_err(GridParseError::from))
}

/// True when `line` looks like the compact/dot dialect: it contains a `.`,
/// or it is long and has no internal whitespace (a single run of digits).
fn looks_compact(line: &str) -> bool {
    line.contains('.') || (line.len() > 15 && !line.contains(char::is_whitespace))
}

enum Mode {
    Unknown,
    Compact,
    Standard,
    Done,
}

/// Lazily yields `Grid`s from a puzzle file, one at a time, so that files
/// holding thousands of compact-dialect puzzles never need to be fully
/// materialized in memory. Dialect is auto-detected from the first
/// non-blank line: a line containing `.`, or a long line with no
/// whitespace, selects the compact dialect (many puzzles, one per line);
/// anything else selects the standard dialect (one puzzle spanning the
/// whole file, N whitespace-separated integers per line).
pub struct PuzzleIter<R> {
    lines: std::io::Lines<R>,
    mode: Mode,
}

impl<R: BufRead> PuzzleIter<R> {
    pub fn new(reader: R) -> Self {
        PuzzleIter {
            lines: reader.lines(),
            mode: Mode::Unknown,
        }
    }

    fn next_nonblank(&mut self) -> Option<Result<String, GridParseError>> {
        loop {
            match self.lines.next() {
                None => return None,
                Some(Err(e)) => return Some(Err(e.into())),
                Some(Ok(line)) => {
                    let trimmed = line.trim().to_string();
                    if !trimmed.is_empty() {
                        return Some(Ok(trimmed));
                    }
                }
            }
        }
    }
}

impl<R: BufRead> Iterator for PuzzleIter<R> {
    type Item = Result<Grid, GridParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.mode {
                Mode::Done => return None,
                Mode::Unknown => {
                    let line = match self.next_nonblank()? {
                        Ok(l) => l,
                        Err(e) => return Some(Err(e)),
                    };
                    if looks_compact(&line) {
                        self.mode = Mode::Compact;
                        if let Some(result) = parse_compact_line(&line) {
                            return Some(result);
                        }
                        // invalid compact line: silently skip, keep scanning
                        continue;
                    }
                    self.mode = Mode::Standard;
                    let mut grid_rows: Vec<Vec<u16>> = Vec::new();
                    if let Some(row) = tokens_if_multi(&line) {
                        grid_rows.push(row);
                    }
                    return self.finish_standard(grid_rows);
                }
                Mode::Compact => {
                    let line = match self.next_nonblank()? {
                        Ok(l) => l,
                        Err(e) => return Some(Err(e)),
                    };
                    if let Some(result) = parse_compact_line(&line) {
                        return Some(result);
                    }
                    continue;
                }
                Mode::Standard => return self.finish_standard(Vec::new()),
            }
        }
    }
}

impl<R: BufRead> PuzzleIter<R> {
    /// Consumes the rest of the file as a single standard-dialect grid,
    /// spanning possibly-many lines, seeded with any rows already read.
    /// A line with only one token belongs to the compact dialect rather
    /// than the accumulating grid, and is skipped here.
    fn finish_standard(&mut self, mut rows: Vec<Vec<u16>>) -> Option<Result<Grid, GridParseError>> {
        self.mode = Mode::Done;
        while let Some(next) = self.next_nonblank() {
            match next {
                Err(e) => return Some(Err(e)),
                Ok(line) => {
                    if let Some(row) = tokens_if_multi(&line) {
                        rows.push(row);
                    }
                }
            }
        }
        if rows.is_empty() {
            return None;
        }
        Some(Grid::new(rows).map_err(GridParseError::from))
    }
}

fn tokens_if_multi(line: &str) -> Option<Vec<u16>> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() <= 1 {
        return None;
    }
    let mut row = Vec::with_capacity(tokens.len());
    for tok in tokens {
        row.push(tok.parse::<u16>().ok()?);
    }
    Some(row)
}

/// Opens `path` and returns a lazy iterator over the grids it contains.
pub fn parse_puzzles<P: AsRef<Path>>(path: P) -> Result<PuzzleIter<BufReader<fs::File>>, GridParseError> {
    let file = fs::File::open(path)?;
    Ok(PuzzleIter::new(BufReader::new(file)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_perfect_square() {
        let err = Grid::new(vec![vec![0, 0, 0]; 3]).unwrap_err();
        assert_eq!(err, InvalidGrid::NotPerfectSquare(3));
    }

    #[test]
    fn display_marks_empty_cells_with_dots_and_box_boundaries() {
        let grid = Grid::new(vec![
            vec![1, 2, 3, 4],
            vec![0, 0, 0, 0],
            vec![0, 0, 0, 0],
            vec![0, 0, 0, 0],
        ])
        .unwrap();
        let rendered = grid.to_string();
        assert_eq!(
            rendered,
            " 1 2 | 3 4\n . . | . .\n\n . . | . .\n . . | . .\n"
        );
    }

    #[test]
    fn rejects_ragged_rows() {
        let err = Grid::new(vec![vec![0; 4], vec![0; 5], vec![0; 4], vec![0; 4]]).unwrap_err();
        assert!(matches!(err, InvalidGrid::RaggedRow { row: 1, .. }));
    }

    #[test]
    fn rejects_out_of_range_value() {
        let mut rows = vec![vec![0u16; 4]; 4];
        rows[0][0] = 9;
        let err = Grid::new(rows).unwrap_err();
        assert!(matches!(err, InvalidGrid::ValueOutOfRange { row: 0, col: 0, value: 9, .. }));
    }

    #[test]
    fn parses_compact_dot_dialect() {
        let text = "53..7....6..195....98....6.8...6...34..8.3..17...2...6.6....28....419..5....8..79";
        let grids: Vec<_> = PuzzleIter::new(text.as_bytes()).collect();
        assert_eq!(grids.len(), 1);
        let grid = grids[0].as_ref().unwrap();
        assert_eq!(grid.n(), 9);
        assert_eq!(grid.get(0, 0), 5);
        assert_eq!(grid.get(0, 2), 0);
    }

    #[test]
    fn parses_multiple_compact_lines() {
        let text = "1.2.\n....\n";
        let grids: Vec<_> = PuzzleIter::new(text.as_bytes()).collect();
        assert_eq!(grids.len(), 2);
        for g in &grids {
            assert_eq!(g.as_ref().unwrap().n(), 2);
        }
    }

    #[test]
    fn parses_standard_dialect() {
        let text = "\
0 0 3 0
0 0 0 1
1 0 0 0
0 2 0 0
";
        let grids: Vec<_> = PuzzleIter::new(text.as_bytes()).collect();
        assert_eq!(grids.len(), 1);
        let grid = grids[0].as_ref().unwrap();
        assert_eq!(grid.n(), 4);
        assert_eq!(grid.get(0, 2), 3);
    }

    #[test]
    fn lines_with_the_wrong_character_count_are_skipped() {
        // "12." has 3 characters, not a perfect square, so it is skipped
        // entirely rather than surfaced as an error.
        let text = "12.\n....\n";
        let grids: Vec<_> = PuzzleIter::new(text.as_bytes()).collect();
        assert_eq!(grids.len(), 1);
        assert_eq!(grids[0].as_ref().unwrap().n(), 2);
    }
}
