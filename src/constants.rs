//! Constants for board geometry, serialization and search scores.
//!
//! The board is a fixed 3x3 grid. Cells are addressed with 0-based
//! `(row, col)` indices internally and 1-based coordinates at the
//! text boundary (`"row col"`).

// =============================================================================
// Board Geometry
// =============================================================================

/// Board size (NxN).
pub const N: usize = 3;

/// Number of cells on the board.
pub const CELLS: usize = N * N;

/// Smallest valid 1-based coordinate.
pub const COORD_MIN: usize = 1;

/// Largest valid 1-based coordinate.
pub const COORD_MAX: usize = N;

// =============================================================================
// Board String Characters
// =============================================================================

/// Mark of the side that moves first.
pub const FIRST_MARK: char = 'X';

/// Mark of the side that moves second.
pub const SECOND_MARK: char = 'O';

/// Empty cell in the 9-character board string.
pub const BLANK_MARK: char = '_';

/// Length of a board string (and of a valid preset).
pub const PRESET_LEN: usize = CELLS;

// =============================================================================
// Minimax Scores
// =============================================================================

/// Leaf score when the searching side wins.
pub const SCORE_WIN: i32 = 1;

/// Leaf score for a drawn game.
pub const SCORE_DRAW: i32 = 0;

/// Leaf score when the searching side loses.
pub const SCORE_LOSS: i32 = -1;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geometry() {
        assert_eq!(CELLS, 9);
        assert_eq!(PRESET_LEN, CELLS);
        assert_eq!(COORD_MAX - COORD_MIN + 1, N);
    }

    #[test]
    fn test_marks_are_distinct() {
        assert_ne!(FIRST_MARK, SECOND_MARK);
        assert_ne!(FIRST_MARK, BLANK_MARK);
        assert_ne!(SECOND_MARK, BLANK_MARK);
    }

    #[test]
    fn test_score_ordering() {
        assert!(SCORE_WIN > SCORE_DRAW);
        assert!(SCORE_DRAW > SCORE_LOSS);
    }
}
