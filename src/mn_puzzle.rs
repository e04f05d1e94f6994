//! Sliding-tile puzzles on an M x N grid, like the 15-puzzle.
//!
//! The blank (`*`) swaps places with an orthogonally adjacent tile. The
//! puzzle is solved when the current grid matches the target grid.

use std::fmt;
use std::rc::Rc;

use rustc_hash::FxHashMap;

use crate::error::{PuzzleError, Result};
use crate::puzzle::Puzzle;

/// Symbol marking the blank cell.
pub const BLANK: &str = "*";

/// A tile symbol; shared between configurations.
pub type Tile = Rc<str>;

/// A sliding-tile configuration working towards a fixed target.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MnPuzzle {
    rows: usize,
    cols: usize,
    /// Current tiles, row-major.
    tiles: Vec<Tile>,
    /// Index of the blank in `tiles`.
    blank: usize,
    target: Rc<[Tile]>,
}

impl MnPuzzle {
    /// Creates a puzzle in state `from` working towards `to`.
    ///
    /// Both grids must be non-empty rectangles of the same size, hold exactly
    /// one blank each, and contain the same tiles.
    pub fn new<S: AsRef<str>>(from: &[Vec<S>], to: &[Vec<S>]) -> Result<Self> {
        let (rows, cols, tiles) = flatten(from)?;
        let (target_rows, target_cols, target) = flatten(to)?;

        if (rows, cols) != (target_rows, target_cols) {
            return Err(PuzzleError::DimensionMismatch {
                expected_rows: rows,
                expected_cols: cols,
                found_rows: target_rows,
                found_cols: target_cols,
            });
        }

        let blank = single_blank(&tiles)?;
        single_blank(&target)?;

        let mut current_sorted = tiles.clone();
        let mut target_sorted = target.clone();
        current_sorted.sort();
        target_sorted.sort();
        if current_sorted != target_sorted {
            return Err(PuzzleError::TileMismatch);
        }

        Ok(Self {
            rows,
            cols,
            tiles,
            blank,
            target: target.into(),
        })
    }

    /// Parses both grids from text.
    ///
    /// Rows are separated by `/` or newlines. Tiles within a row are separated
    /// by whitespace; a row without whitespace holds one tile per character.
    pub fn parse(from: &str, to: &str) -> Result<Self> {
        Self::new(parse_grid(from).as_slice(), parse_grid(to).as_slice())
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Row and column of the blank.
    pub fn blank_position(&self) -> (usize, usize) {
        (self.blank / self.cols, self.blank % self.cols)
    }

    /// Moves the blank into `neighbor`.
    fn slide(&self, neighbor: usize) -> Self {
        let mut tiles = self.tiles.clone();
        tiles.swap(self.blank, neighbor);
        Self {
            tiles,
            blank: neighbor,
            target: Rc::clone(&self.target),
            ..*self
        }
    }

    /// For each current cell, the target index holding the same tile.
    ///
    /// Returns `None` when tiles repeat, since the mapping is then ambiguous.
    fn permutation_to_target(&self) -> Option<Vec<usize>> {
        let target_index: FxHashMap<&str, usize> = self
            .target
            .iter()
            .enumerate()
            .map(|(index, tile)| (&**tile, index))
            .collect();
        if target_index.len() != self.target.len() {
            return None;
        }

        self.tiles
            .iter()
            .map(|tile| target_index.get(&**tile).copied())
            .collect()
    }

    fn write_grid(&self, f: &mut fmt::Formatter<'_>, tiles: &[Tile]) -> fmt::Result {
        for row in tiles.chunks(self.cols) {
            f.write_str("\n")?;
            f.write_str(&row.iter().map(|tile| &**tile).collect::<Vec<_>>().join(" "))?;
        }
        Ok(())
    }
}

/// Checks the grid shape and flattens it row-major.
fn flatten<S: AsRef<str>>(grid: &[Vec<S>]) -> Result<(usize, usize, Vec<Tile>)> {
    let cols = grid.first().map_or(0, Vec::len);
    if cols == 0 {
        return Err(PuzzleError::EmptyGrid);
    }

    let mut tiles = Vec::with_capacity(grid.len() * cols);
    for (row_index, row) in grid.iter().enumerate() {
        if row.len() != cols {
            return Err(PuzzleError::RaggedRow {
                row: row_index,
                expected: cols,
                found: row.len(),
            });
        }
        tiles.extend(row.iter().map(|tile| Tile::from(tile.as_ref())));
    }

    Ok((grid.len(), cols, tiles))
}

fn single_blank(tiles: &[Tile]) -> Result<usize> {
    let mut blanks = tiles
        .iter()
        .enumerate()
        .filter(|(_, tile)| &***tile == BLANK)
        .map(|(index, _)| index);

    match (blanks.next(), blanks.count()) {
        (Some(index), 0) => Ok(index),
        (None, _) => Err(PuzzleError::BlankCount(0)),
        (Some(_), extra) => Err(PuzzleError::BlankCount(extra + 1)),
    }
}

fn parse_grid(text: &str) -> Vec<Vec<String>> {
    text.split(|separator| separator == '/' || separator == '\n')
        .map(str::trim)
        .filter(|row| !row.is_empty())
        .map(|row| {
            if row.contains(char::is_whitespace) {
                row.split_whitespace().map(String::from).collect()
            } else {
                row.chars().map(String::from).collect()
            }
        })
        .collect()
}

/// Parity of a permutation, computed from its cycle decomposition.
fn is_odd_permutation(permutation: &[usize]) -> bool {
    let mut visited = vec![false; permutation.len()];
    let mut cycles = 0;

    for start in 0..permutation.len() {
        if visited[start] {
            continue;
        }
        cycles += 1;
        let mut index = start;
        while !visited[index] {
            visited[index] = true;
            index = permutation[index];
        }
    }

    (permutation.len() - cycles) % 2 == 1
}

impl Puzzle for MnPuzzle {
    type Key = Vec<Tile>;

    /// The blank swaps with its right, left, lower and upper neighbour, in
    /// that order.
    fn extensions(&self) -> Vec<Self> {
        let (row, col) = self.blank_position();
        let mut extensions = Vec::with_capacity(4);

        if col + 1 < self.cols {
            extensions.push(self.slide(self.blank + 1));
        }
        if col > 0 {
            extensions.push(self.slide(self.blank - 1));
        }
        if row + 1 < self.rows {
            extensions.push(self.slide(self.blank + self.cols));
        }
        if row > 0 {
            extensions.push(self.slide(self.blank - self.cols));
        }

        extensions
    }

    fn is_solved(&self) -> bool {
        self.tiles[..] == self.target[..]
    }

    /// Every move is one transposition and shifts the blank by one cell, so a
    /// target whose permutation parity differs from the blank's displacement
    /// parity can never be reached.
    fn fail_fast(&self) -> bool {
        let Some(permutation) = self.permutation_to_target() else {
            return false;
        };

        let (row, col) = self.blank_position();
        let target_blank = permutation[self.blank];
        let (target_row, target_col) = (target_blank / self.cols, target_blank % self.cols);
        let displacement = row.abs_diff(target_row) + col.abs_diff(target_col);

        is_odd_permutation(&permutation) != (displacement % 2 == 1)
    }

    fn canonical_key(&self) -> Vec<Tile> {
        self.tiles.clone()
    }
}

impl fmt::Display for MnPuzzle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("From:")?;
        self.write_grid(f, &self.tiles)?;
        f.write_str("\nTo:")?;
        self.write_grid(f, &self.target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::{breadth_first_search, depth_first_search};

    #[test]
    fn test_display() {
        let puzzle = MnPuzzle::parse("*23/145", "123/45*").unwrap();
        insta::assert_snapshot!(puzzle.to_string(), @r"
        From:
        * 2 3
        1 4 5
        To:
        1 2 3
        4 5 *
        ");
    }

    #[test]
    fn test_extension_order() {
        let puzzle = MnPuzzle::parse("1*3/245", "123/45*").unwrap();
        let rendered = puzzle
            .extensions()
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n-----\n");

        insta::assert_snapshot!(rendered, @r"
        From:
        1 3 *
        2 4 5
        To:
        1 2 3
        4 5 *
        -----
        From:
        * 1 3
        2 4 5
        To:
        1 2 3
        4 5 *
        -----
        From:
        1 4 3
        2 * 5
        To:
        1 2 3
        4 5 *
        ");
    }

    #[test]
    fn test_breadth_first_finds_three_move_solution() {
        let puzzle = MnPuzzle::parse("*23/145", "123/45*").unwrap();
        let path = breadth_first_search(puzzle).unwrap();

        assert_eq!(path.len(), 4);
        assert!(path[3].is_solved());
        assert_eq!(path[1].blank_position(), (1, 0));
        assert_eq!(path[2].blank_position(), (1, 1));
    }

    #[test]
    fn test_depth_first_finds_a_solution() {
        let puzzle = MnPuzzle::parse("*23/145", "123/45*").unwrap();
        let path = depth_first_search(puzzle).unwrap();

        assert!(path.len() >= 4);
        assert!(path.last().unwrap().is_solved());
        for step in path.windows(2) {
            assert!(step[0].extensions().contains(&step[1]));
        }
    }

    #[test]
    fn test_multi_character_tiles() {
        let puzzle = MnPuzzle::parse("10 11 * / 12 13 14", "10 11 14 / 12 13 *").unwrap();

        assert_eq!(puzzle.rows(), 2);
        assert_eq!(puzzle.cols(), 3);
        let path = breadth_first_search(puzzle).unwrap();
        assert_eq!(path.len(), 2);
    }

    #[test]
    fn test_swapped_tiles_fail_fast() {
        let unsolvable = MnPuzzle::parse("213/45*", "123/45*").unwrap();
        assert!(unsolvable.fail_fast());
        assert!(depth_first_search(unsolvable.clone()).is_none());
        assert!(breadth_first_search(unsolvable).is_none());

        let solvable = MnPuzzle::parse("*23/145", "123/45*").unwrap();
        assert!(!solvable.fail_fast());
        assert!(solvable.extensions().iter().all(|next| !next.fail_fast()));
    }

    #[test]
    fn test_repeated_tiles_never_fail_fast() {
        let puzzle = MnPuzzle::parse("aa*/bbc", "bba/ac*").unwrap();
        assert!(!puzzle.fail_fast());
    }

    #[test]
    fn test_rejects_invalid_grids() {
        assert_eq!(MnPuzzle::parse("", "*"), Err(PuzzleError::EmptyGrid));
        assert_eq!(
            MnPuzzle::parse("*1/234", "12/3*4"),
            Err(PuzzleError::RaggedRow {
                row: 1,
                expected: 2,
                found: 3
            })
        );
        assert_eq!(
            MnPuzzle::parse("*1/23", "*12/3ab"),
            Err(PuzzleError::DimensionMismatch {
                expected_rows: 2,
                expected_cols: 2,
                found_rows: 2,
                found_cols: 3
            })
        );
        assert_eq!(
            MnPuzzle::parse("**/12", "**/12"),
            Err(PuzzleError::BlankCount(2))
        );
        assert_eq!(
            MnPuzzle::parse("12/34", "12/34"),
            Err(PuzzleError::BlankCount(0))
        );
        assert_eq!(
            MnPuzzle::parse("*1/23", "*1/24"),
            Err(PuzzleError::TileMismatch)
        );
    }
}
