//! Three Kingdoms sliding-block puzzle (Klotski, Huarong Dao).
//!
//! Four piece shapes slide one cell at a time on a 5x4 board. The puzzle is
//! solved when the big square reaches the bottom-centre exit.
//!
//! Key representation:
//! - Occupancy is a `u32` bitmask over the 20 cells for fast collision checks
//! - Pieces of the same shape are interchangeable, so the canonical key is the
//!   grid of shape codes rather than piece identities

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::{PuzzleError, Result};
use crate::puzzle::Puzzle;

/// Board height.
pub const ROWS: usize = 5;
/// Board width.
pub const COLS: usize = 4;
/// Number of cells on the board.
const CELLS: usize = ROWS * COLS;

/// Top-left cell the big square must reach.
pub const GOAL: (usize, usize) = (3, 1);

/// The traditional "Heng Dao Li Ma" opening layout.
pub const CLASSIC_LAYOUT: &str = "ABBC/ABBC/DEEF/DGHF/I..J";

/// Shape code per cell, 0 for empty.
pub type BoardKey = [u8; CELLS];

/// The four piece shapes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Shape {
    /// 2x2 piece.
    BigSquare,
    /// 1x1 piece.
    SmallSquare,
    /// 1x2 piece.
    HorizontalRect,
    /// 2x1 piece.
    VerticalRect,
}

impl Shape {
    /// Height and width in cells.
    pub const fn size(self) -> (usize, usize) {
        match self {
            Shape::BigSquare => (2, 2),
            Shape::SmallSquare => (1, 1),
            Shape::HorizontalRect => (1, 2),
            Shape::VerticalRect => (2, 1),
        }
    }

    pub const fn marker(self) -> char {
        match self {
            Shape::BigSquare => 'B',
            Shape::SmallSquare => 's',
            Shape::HorizontalRect => 'h',
            Shape::VerticalRect => 'v',
        }
    }

    const fn code(self) -> u8 {
        match self {
            Shape::BigSquare => 1,
            Shape::SmallSquare => 2,
            Shape::HorizontalRect => 3,
            Shape::VerticalRect => 4,
        }
    }

    fn from_size(height: usize, width: usize) -> Option<Self> {
        match (height, width) {
            (2, 2) => Some(Shape::BigSquare),
            (1, 1) => Some(Shape::SmallSquare),
            (1, 2) => Some(Shape::HorizontalRect),
            (2, 1) => Some(Shape::VerticalRect),
            _ => None,
        }
    }
}

/// A piece anchored at its top-left cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Piece {
    pub shape: Shape,
    pub row: usize,
    pub col: usize,
}

impl Piece {
    pub const fn new(shape: Shape, row: usize, col: usize) -> Self {
        Self { shape, row, col }
    }

    /// Whether every cell of the piece lies on the board.
    fn fits(&self) -> bool {
        let (height, width) = self.shape.size();
        self.row + height <= ROWS && self.col + width <= COLS
    }

    /// Cells covered by the piece, row-major.
    fn cells(&self) -> impl Iterator<Item = (usize, usize)> {
        let (height, width) = self.shape.size();
        let (row, col) = (self.row, self.col);
        (row..row + height).flat_map(move |r| (col..col + width).map(move |c| (r, c)))
    }

    /// Bitmask where bit `row * COLS + col` is set for each covered cell.
    fn mask(&self) -> u32 {
        self.cells()
            .fold(0, |mask, (row, col)| mask | 1 << (row * COLS + col))
    }

    /// The piece moved by one cell, if it stays on the board.
    fn shifted(&self, (delta_row, delta_col): (isize, isize)) -> Option<Self> {
        let moved = Self {
            row: self.row.checked_add_signed(delta_row)?,
            col: self.col.checked_add_signed(delta_col)?,
            ..*self
        };
        moved.fits().then_some(moved)
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} at ({}, {})", self.shape, self.row, self.col)
    }
}

/// Up, down, left, right.
const DIRECTIONS: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// A board configuration. Pieces are kept sorted.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Klotski {
    pieces: Vec<Piece>,
    /// Bitmask of occupied cells.
    occupied: u32,
}

impl Klotski {
    /// Builds a board, checking that pieces fit, do not overlap, and include
    /// exactly one big square.
    pub fn new(mut pieces: Vec<Piece>) -> Result<Self> {
        let mut occupied = 0u32;

        for piece in &pieces {
            if !piece.fits() {
                return Err(PuzzleError::PieceOutOfBounds(piece.to_string()));
            }
            let mask = piece.mask();
            let overlap = occupied & mask;
            if overlap != 0 {
                let cell = overlap.trailing_zeros() as usize;
                return Err(PuzzleError::Overlap {
                    row: cell / COLS,
                    col: cell % COLS,
                });
            }
            occupied |= mask;
        }

        let big_squares = pieces
            .iter()
            .filter(|piece| piece.shape == Shape::BigSquare)
            .count();
        if big_squares != 1 {
            return Err(PuzzleError::BigSquareCount(big_squares));
        }

        pieces.sort();
        Ok(Self { pieces, occupied })
    }

    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    /// Replaces the piece at `index`, keeping the piece list sorted.
    fn with_moved(&self, index: usize, moved: Piece) -> Self {
        let mut pieces = self.pieces.clone();
        pieces[index] = moved;
        pieces.sort();
        Self {
            pieces,
            occupied: self.occupied & !self.pieces[index].mask() | moved.mask(),
        }
    }

    /// Renders the board with one letter per piece, in the form
    /// [`FromStr`] accepts.
    pub fn layout(&self) -> String {
        let mut grid = [['.'; COLS]; ROWS];
        for (piece, label) in self.pieces.iter().zip('A'..='Z') {
            for (row, col) in piece.cells() {
                grid[row][col] = label;
            }
        }

        grid.iter()
            .map(|row| row.iter().collect::<String>())
            .collect::<Vec<_>>()
            .join("/")
    }

    /// Shape code per cell.
    fn shape_grid(&self) -> BoardKey {
        let mut grid = [0u8; CELLS];
        for piece in &self.pieces {
            for (row, col) in piece.cells() {
                grid[row * COLS + col] = piece.shape.code();
            }
        }
        grid
    }
}

impl Puzzle for Klotski {
    /// Runs of same-shaped cells split into pieces in only one way, so the
    /// shape grid identifies the configuration.
    type Key = BoardKey;

    /// Each piece in turn tries to slide up, down, left and right.
    fn extensions(&self) -> Vec<Self> {
        let mut extensions = Vec::new();

        for (index, piece) in self.pieces.iter().enumerate() {
            // cells held by every other piece
            let others = self.occupied & !piece.mask();

            for direction in DIRECTIONS {
                let Some(moved) = piece.shifted(direction) else {
                    continue;
                };
                if moved.mask() & others == 0 {
                    extensions.push(self.with_moved(index, moved));
                }
            }
        }

        extensions
    }

    fn is_solved(&self) -> bool {
        self.pieces.iter().any(|piece| {
            piece.shape == Shape::BigSquare && (piece.row, piece.col) == GOAL
        })
    }

    fn canonical_key(&self) -> BoardKey {
        self.shape_grid()
    }
}

/// Parses five rows of four cells, separated by newlines or `/`.
///
/// `.` is an empty cell; every other character names one piece and the
/// cells carrying it must form one of the four shapes.
impl FromStr for Klotski {
    type Err = PuzzleError;

    fn from_str(text: &str) -> Result<Self> {
        let rows: Vec<Vec<char>> = text
            .split(|separator| separator == '\n' || separator == '/')
            .map(|row| row.chars().filter(|cell| !cell.is_whitespace()).collect::<Vec<_>>())
            .filter(|row| !row.is_empty())
            .collect();

        let found_cols = rows.first().map_or(0, Vec::len);
        if rows.len() != ROWS || rows.iter().any(|row| row.len() != COLS) {
            return Err(PuzzleError::DimensionMismatch {
                expected_rows: ROWS,
                expected_cols: COLS,
                found_rows: rows.len(),
                found_cols,
            });
        }

        let mut cells_by_label: BTreeMap<char, Vec<(usize, usize)>> = BTreeMap::new();
        for (row_index, row) in rows.iter().enumerate() {
            for (col_index, &label) in row.iter().enumerate() {
                if label != '.' {
                    cells_by_label
                        .entry(label)
                        .or_default()
                        .push((row_index, col_index));
                }
            }
        }

        let pieces = cells_by_label
            .into_iter()
            .map(|(label, cells)| piece_from_cells(label, &cells))
            .collect::<Result<Vec<_>>>()?;

        Klotski::new(pieces)
    }
}

/// Infers the piece covering exactly `cells` (listed row-major).
fn piece_from_cells(label: char, cells: &[(usize, usize)]) -> Result<Piece> {
    let malformed = || PuzzleError::MalformedPiece(label);

    let &(top, left) = cells.first().ok_or_else(malformed)?;
    let left = cells.iter().map(|&(_, col)| col).min().unwrap_or(left);
    let bottom = cells.iter().map(|&(row, _)| row).max().unwrap_or(top);
    let right = cells.iter().map(|&(_, col)| col).max().unwrap_or(left);

    let shape = Shape::from_size(bottom - top + 1, right - left + 1).ok_or_else(malformed)?;
    let piece = Piece::new(shape, top, left);

    // the bounding box must be filled, not just spanned
    if !piece.cells().eq(cells.iter().copied()) {
        return Err(malformed());
    }

    Ok(piece)
}

/// One shape marker per cell, one row per line.
///
/// Same-shaped pieces share a marker, so this form does not parse back; use
/// [`Klotski::layout`] for that.
impl fmt::Display for Klotski {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut grid = [['.'; COLS]; ROWS];
        for piece in &self.pieces {
            for (row, col) in piece.cells() {
                grid[row][col] = piece.shape.marker();
            }
        }

        for (row_index, row) in grid.iter().enumerate() {
            if row_index > 0 {
                f.write_str("\n")?;
            }
            f.write_str(&row.iter().collect::<String>())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::{breadth_first_search, depth_first_search};

    #[test]
    fn test_parse_classic_layout() {
        let board: Klotski = CLASSIC_LAYOUT.parse().unwrap();

        assert_eq!(board.pieces().len(), 10);
        insta::assert_snapshot!(board.to_string(), @r"
        vBBv
        vBBv
        vhhv
        vssv
        s..s
        ");
    }

    #[test]
    fn test_classic_layout_has_four_moves() {
        let board: Klotski = CLASSIC_LAYOUT.parse().unwrap();
        let extensions = board.extensions();

        assert_eq!(extensions.len(), 4);
        assert!(extensions.iter().all(|next| next.occupied.count_ones() == 18));
    }

    #[test]
    fn test_interchangeable_pieces_share_a_key() {
        // the two small squares swap places
        let first: Klotski = "....\n.BB.\n.BB.\nA..C\n....".parse().unwrap();
        let second: Klotski = "....\n.BB.\n.BB.\nC..A\n....".parse().unwrap();

        assert_eq!(first, second);
        assert_eq!(first.canonical_key(), second.canonical_key());
    }

    #[test]
    fn test_single_move_to_exit() {
        let board: Klotski = "..../..../.BB./.BB./....".parse().unwrap();
        assert!(!board.is_solved());

        let bfs = breadth_first_search(board.clone()).unwrap();
        assert_eq!(bfs.len(), 2);
        assert!(bfs[1].is_solved());

        let dfs = depth_first_search(board).unwrap();
        assert_eq!(dfs.len(), 2);
    }

    #[test]
    fn test_breadth_first_slides_big_square_down() {
        let board: Klotski = "ABBC/ABBC/..../..../....".parse().unwrap();

        let bfs = breadth_first_search(board.clone()).unwrap();
        assert_eq!(bfs.len(), 4);
        insta::assert_snapshot!(bfs[3].to_string(), @r"
        v..v
        v..v
        ....
        .BB.
        .BB.
        ");

        let dfs = depth_first_search(board).unwrap();
        assert!(dfs.len() >= 4);
        assert!(dfs.last().unwrap().is_solved());
        for step in dfs.windows(2) {
            assert!(step[0].extensions().contains(&step[1]));
        }
    }

    #[test]
    fn test_layout_round_trips_through_parse() {
        let board: Klotski = CLASSIC_LAYOUT.parse().unwrap();
        let moved = board.extensions().remove(0);

        for board in [board, moved] {
            let layout = board.layout();
            assert_eq!(layout.parse::<Klotski>().unwrap(), board);
        }

        assert_eq!(
            "vBBv/vBBv/vhhv/vssv/s..s".parse::<Klotski>(),
            Err(PuzzleError::MalformedPiece('s'))
        );
    }

    #[test]
    fn test_rejects_invalid_boards() {
        assert_eq!(
            "ABB/ABB".parse::<Klotski>(),
            Err(PuzzleError::DimensionMismatch {
                expected_rows: 5,
                expected_cols: 4,
                found_rows: 2,
                found_cols: 3
            })
        );
        assert_eq!(
            "AA../A.../..../..../BB..".parse::<Klotski>(),
            Err(PuzzleError::MalformedPiece('A'))
        );
        assert_eq!(
            "A.A./..../..../..../....".parse::<Klotski>(),
            Err(PuzzleError::MalformedPiece('A'))
        );
        assert_eq!(
            "s.../..../..../..../....".parse::<Klotski>(),
            Err(PuzzleError::BigSquareCount(0))
        );
        assert_eq!(
            Klotski::new(vec![
                Piece::new(Shape::BigSquare, 0, 0),
                Piece::new(Shape::VerticalRect, 1, 1),
            ]),
            Err(PuzzleError::Overlap { row: 1, col: 1 })
        );
        assert_eq!(
            Klotski::new(vec![Piece::new(Shape::BigSquare, 4, 0)]),
            Err(PuzzleError::PieceOutOfBounds(
                "BigSquare at (4, 0)".to_owned()
            ))
        );
    }
}
