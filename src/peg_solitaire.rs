//! Peg solitaire on a rectangular grid.
//!
//! A peg jumps over an orthogonally adjacent peg into an empty cell, removing
//! the peg it jumped over. The grid is solved when a single peg remains.
//!
//! Cells are stored row-major in a flat vector.

use std::fmt;
use std::str::FromStr;

use crate::error::{PuzzleError, Result};
use crate::puzzle::Puzzle;

/// One grid cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Cell {
    Peg,
    Empty,
    /// Not part of the board; never changes.
    Unused,
}

impl Cell {
    /// Text marker for this cell.
    pub const fn marker(self) -> char {
        match self {
            Cell::Peg => '*',
            Cell::Empty => '.',
            Cell::Unused => '#',
        }
    }

    pub fn from_marker(marker: char) -> Result<Self> {
        match marker {
            '*' => Ok(Cell::Peg),
            '.' => Ok(Cell::Empty),
            '#' => Ok(Cell::Unused),
            other => Err(PuzzleError::UnknownMarker(other)),
        }
    }
}

/// A peg solitaire configuration.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PegSolitaire {
    cells: Vec<Cell>,
    width: usize,
}

impl PegSolitaire {
    /// Builds a grid from one string per row.
    ///
    /// Whitespace inside a row is ignored, so `"* * ."` and `"**."` are the
    /// same row.
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self> {
        let mut cells = Vec::new();
        let mut width = 0;

        for (row_index, row) in rows.iter().enumerate() {
            let row_cells = row
                .as_ref()
                .chars()
                .filter(|marker| !marker.is_whitespace())
                .map(Cell::from_marker)
                .collect::<Result<Vec<_>>>()?;

            if row_index == 0 {
                width = row_cells.len();
            } else if row_cells.len() != width {
                return Err(PuzzleError::RaggedRow {
                    row: row_index,
                    expected: width,
                    found: row_cells.len(),
                });
            }
            cells.extend(row_cells);
        }

        if cells.is_empty() {
            return Err(PuzzleError::EmptyGrid);
        }

        Ok(Self { cells, width })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.cells.len() / self.width
    }

    pub fn cell(&self, row: usize, col: usize) -> Cell {
        self.cells[self.index(row, col)]
    }

    pub fn peg_count(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell == Cell::Peg).count()
    }

    #[inline(always)]
    fn index(&self, row: usize, col: usize) -> usize {
        row * self.width + col
    }

    /// Applies a jump along three consecutive cells, in either direction.
    ///
    /// Returns `None` when the cells are not `peg peg empty` or
    /// `empty peg peg`.
    fn jump(&self, line: [usize; 3]) -> Option<Self> {
        let landing = match line.map(|index| self.cells[index]) {
            [Cell::Peg, Cell::Peg, Cell::Empty] => [Cell::Empty, Cell::Empty, Cell::Peg],
            [Cell::Empty, Cell::Peg, Cell::Peg] => [Cell::Peg, Cell::Empty, Cell::Empty],
            _ => return None,
        };

        let mut cells = self.cells.clone();
        for (index, cell) in line.into_iter().zip(landing) {
            cells[index] = cell;
        }

        Some(Self {
            cells,
            width: self.width,
        })
    }
}

impl Puzzle for PegSolitaire {
    type Key = Vec<Cell>;

    /// Horizontal jumps row by row, then vertical jumps column by column.
    fn extensions(&self) -> Vec<Self> {
        let (width, height) = (self.width, self.height());
        let mut extensions = Vec::new();

        for row in 0..height {
            for col in 0..width.saturating_sub(2) {
                let start = self.index(row, col);
                extensions.extend(self.jump([start, start + 1, start + 2]));
            }
        }

        for col in 0..width {
            for row in 0..height.saturating_sub(2) {
                let start = self.index(row, col);
                extensions.extend(self.jump([start, start + width, start + 2 * width]));
            }
        }

        extensions
    }

    fn is_solved(&self) -> bool {
        self.peg_count() == 1
    }

    fn canonical_key(&self) -> Vec<Cell> {
        self.cells.clone()
    }
}

/// Parses rows separated by newlines or `/`.
impl FromStr for PegSolitaire {
    type Err = PuzzleError;

    fn from_str(text: &str) -> Result<Self> {
        let rows: Vec<&str> = text
            .split(|separator| separator == '\n' || separator == '/')
            .map(str::trim)
            .filter(|row| !row.is_empty())
            .collect();
        Self::from_rows(&rows)
    }
}

/// Markers separated by spaces, one row per line.
impl fmt::Display for PegSolitaire {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row_index, row) in self.cells.chunks(self.width).enumerate() {
            if row_index > 0 {
                f.write_str("\n")?;
            }
            for (col_index, cell) in row.iter().enumerate() {
                if col_index > 0 {
                    f.write_str(" ")?;
                }
                write!(f, "{}", cell.marker())?;
            }
        }
        Ok(())
    }
}
