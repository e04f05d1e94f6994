//! Validation errors raised by the puzzle domain constructors and parsers.
//!
//! The search engine itself never fails: an unsolvable puzzle is reported as
//! `None` by the solvers, not as an error.

/// Result alias used by the puzzle domains.
pub type Result<T> = std::result::Result<T, PuzzleError>;

/// Errors that can occur while building a puzzle configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PuzzleError {
    #[error("grid has no cells")]
    EmptyGrid,

    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("unknown cell marker {0:?}")]
    UnknownMarker(char),

    #[error("grid is {found_rows}x{found_cols}, expected {expected_rows}x{expected_cols}")]
    DimensionMismatch {
        expected_rows: usize,
        expected_cols: usize,
        found_rows: usize,
        found_cols: usize,
    },

    #[error("grid must contain exactly one blank, found {0}")]
    BlankCount(usize),

    #[error("current and target grids do not hold the same tiles")]
    TileMismatch,

    #[error("invalid word {0:?}: words must be non-empty lowercase ascii")]
    InvalidWord(String),

    #[error("piece {0} does not fit on the board")]
    PieceOutOfBounds(String),

    #[error("pieces overlap at row {row}, column {col}")]
    Overlap { row: usize, col: usize },

    #[error("board must hold exactly one big square, found {0}")]
    BigSquareCount(usize),

    #[error("cells marked {0:?} do not form a known piece shape")]
    MalformedPiece(char),
}
