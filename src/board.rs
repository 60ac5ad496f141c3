//! Tic-tac-toe board state and move execution.
//!
//! This module provides the core game logic:
//! - 3x3 grid representation with an explicit side-to-move
//! - Preset loading from a 9-character row-major board string
//! - Move parsing and validation (`"row col"`, 1-based)
//! - Win/draw classification around the cell just played
//!
//! Input-validation failures ([`MoveError`]) and game outcomes ([`Outcome`])
//! are kept apart: a rejected move never mutates the board, and an outcome is
//! only produced by a successful move.

use std::fmt;

use derive_more::{Display, Error};
use tracing::debug;

use crate::constants::{
    BLANK_MARK, CELLS, COORD_MAX, COORD_MIN, FIRST_MARK, N, PRESET_LEN, SECOND_MARK,
};

/// One of the two players.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    /// Moves first on an empty board, rendered `X`.
    First,
    /// Rendered `O`.
    Second,
}

impl Side {
    pub fn opponent(self) -> Self {
        match self {
            Side::First => Side::Second,
            Side::Second => Side::First,
        }
    }

    /// Character used for this side in board strings.
    pub fn mark(self) -> char {
        match self {
            Side::First => FIRST_MARK,
            Side::Second => SECOND_MARK,
        }
    }

    pub fn from_mark(mark: char) -> Option<Self> {
        match mark {
            FIRST_MARK => Some(Side::First),
            SECOND_MARK => Some(Side::Second),
            _ => None,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.mark())
    }
}

/// Content of a single cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Cell {
    #[default]
    Empty,
    Mark(Side),
}

impl Cell {
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }

    /// Character used for this cell in board strings.
    pub fn symbol(self) -> char {
        match self {
            Cell::Empty => BLANK_MARK,
            Cell::Mark(side) => side.mark(),
        }
    }

    fn from_symbol(symbol: char) -> Option<Self> {
        if symbol == BLANK_MARK {
            return Some(Cell::Empty);
        }
        Side::from_mark(symbol).map(Cell::Mark)
    }
}

/// A cell address with 1-based `row` and `col`.
///
/// `Display` renders `"row col"`, the same text [`Board::apply_move`] accepts.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    pub row: usize,
    pub col: usize,
}

impl Move {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Move for a row-major cell index in `0..CELLS`.
    fn from_index(index: usize) -> Self {
        Self::new(index / N + 1, index % N + 1)
    }

    /// 0-based `(row, col)` if both coordinates are on the board.
    fn checked_indices(self) -> Option<(usize, usize)> {
        let range = COORD_MIN..=COORD_MAX;
        if range.contains(&self.row) && range.contains(&self.col) {
            Some((self.row - 1, self.col - 1))
        } else {
            None
        }
    }

    /// 0-based `(row, col)`; the move must be on the board.
    pub(crate) fn indices(self) -> (usize, usize) {
        (self.row - 1, self.col - 1)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.row, self.col)
    }
}

/// Classification of a position after a move.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Outcome {
    Ongoing,
    Draw,
    Won(Side),
}

impl Outcome {
    pub fn is_terminal(self) -> bool {
        self != Outcome::Ongoing
    }

    pub fn winner(self) -> Option<Side> {
        match self {
            Outcome::Won(side) => Some(side),
            _ => None,
        }
    }
}

/// Reasons [`Board::apply_move`] rejects its input.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Display, Error)]
pub enum MoveError {
    /// Input is not exactly two whitespace-separated tokens.
    #[display("expected two coordinates")]
    MalformedInput,
    /// A token is not a non-negative integer literal.
    #[display("coordinates must be numbers")]
    NotANumber,
    /// A coordinate is outside 1..=3.
    #[display("coordinates must be from 1 to 3")]
    OutOfRange,
    /// The target cell already holds a mark.
    #[display("cell is occupied")]
    OccupiedCell,
}

/// Reasons a preset board string is rejected.
#[derive(Clone, Debug, PartialEq, Eq, Display, Error)]
pub enum PresetError {
    #[display("preset must have 9 characters, got {len}")]
    WrongLength { len: usize },
    #[display("invalid character '{character}' at position {position} in preset")]
    InvalidCharacter { character: char, position: usize },
}

/// 0-based cell coordinates of a line.
pub(crate) type Line = [(usize, usize); N];

/// The lines through `(row, col)`, in check order: column, row, main
/// diagonal, anti-diagonal. Diagonals are `None` when the cell is not on them.
pub(crate) fn lines_through(row: usize, col: usize) -> [Option<Line>; 4] {
    [
        Some([(0, col), (1, col), (2, col)]),
        Some([(row, 0), (row, 1), (row, 2)]),
        (row == col).then_some([(0, 0), (1, 1), (2, 2)]),
        (row + col == N - 1).then_some([(0, 2), (1, 1), (2, 0)]),
    ]
}

/// Parse `"row col"` into a [`Move`] on the board.
///
/// Both tokens must be ASCII digit strings before either is range-checked,
/// so `"9 x"` is `NotANumber` rather than `OutOfRange`. Digit strings too
/// large for `usize` are out of range.
pub fn parse_coordinates(text: &str) -> Result<Move, MoveError> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    let [row, col] = tokens[..] else {
        return Err(MoveError::MalformedInput);
    };

    let is_number = |token: &str| token.bytes().all(|b| b.is_ascii_digit());
    if !is_number(row) || !is_number(col) {
        return Err(MoveError::NotANumber);
    }

    let row = row.parse::<usize>().map_err(|_| MoveError::OutOfRange)?;
    let col = col.parse::<usize>().map_err(|_| MoveError::OutOfRange)?;
    let mv = Move::new(row, col);
    match mv.checked_indices() {
        Some(_) => Ok(mv),
        None => Err(MoveError::OutOfRange),
    }
}

/// A tic-tac-toe position: the grid plus the side to move.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    grid: [[Cell; N]; N],
    turn: Side,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Empty board, First to move.
    pub fn new() -> Self {
        Self {
            grid: [[Cell::Empty; N]; N],
            turn: Side::First,
        }
    }

    /// Load a board from a 9-character row-major string over `X`, `O`, `_`
    /// (case-insensitive).
    ///
    /// Second is to move when the mark counts differ, First otherwise. Turn
    /// parity is not validated: `"XXXXXXXX_"` loads with Second to move.
    /// On error nothing is built; callers fall back to [`Board::new`].
    pub fn from_preset(preset: &str) -> Result<Self, PresetError> {
        let preset = preset.to_uppercase();
        let len = preset.chars().count();
        if len != PRESET_LEN {
            return Err(PresetError::WrongLength { len });
        }

        let mut board = Self::new();
        let (mut first, mut second) = (0, 0);
        for (position, character) in preset.chars().enumerate() {
            let cell = Cell::from_symbol(character)
                .ok_or(PresetError::InvalidCharacter { character, position })?;
            match cell {
                Cell::Mark(Side::First) => first += 1,
                Cell::Mark(Side::Second) => second += 1,
                Cell::Empty => {}
            }
            board.grid[position / N][position % N] = cell;
        }
        if first != second {
            board.turn = Side::Second;
        }
        Ok(board)
    }

    /// Side that moves next.
    pub fn turn_side(&self) -> Side {
        self.turn
    }

    /// Cell at a 1-based move, or `None` off the board.
    pub fn cell(&self, mv: Move) -> Option<Cell> {
        mv.checked_indices().map(|(row, col)| self.grid[row][col])
    }

    pub(crate) fn cell_at(&self, row: usize, col: usize) -> Cell {
        self.grid[row][col]
    }

    /// 9-character row-major serialization, reloadable with [`Board::from_preset`].
    pub fn board_string(&self) -> String {
        self.grid.iter().flatten().map(|cell| cell.symbol()).collect()
    }

    /// True when any cell holds a mark.
    pub fn has_preset(&self) -> bool {
        self.grid.iter().flatten().any(|cell| !cell.is_empty())
    }

    pub fn is_full(&self) -> bool {
        self.grid.iter().flatten().all(|cell| !cell.is_empty())
    }

    /// Empty cells in row-major order. Recomputed on every call.
    pub fn empty_cells(&self) -> impl Iterator<Item = Move> + '_ {
        (0..CELLS)
            .filter(|&index| self.grid[index / N][index % N].is_empty())
            .map(Move::from_index)
    }

    /// Parse `"row col"` (1-based) and play it for the side to move.
    ///
    /// On error the board is unchanged.
    pub fn apply_move(&mut self, coordinates: &str) -> Result<Outcome, MoveError> {
        let mv = parse_coordinates(coordinates)?;
        let (row, col) = mv.indices();
        if !self.grid[row][col].is_empty() {
            return Err(MoveError::OccupiedCell);
        }
        let side = self.turn;
        let outcome = self.play(mv);
        debug!(%side, %mv, ?outcome, "move applied");
        Ok(outcome)
    }

    /// Write the mover's mark, flip the turn and classify.
    ///
    /// The cell must be on the board and empty.
    pub(crate) fn play(&mut self, mv: Move) -> Outcome {
        let (row, col) = mv.indices();
        debug_assert!(self.grid[row][col].is_empty());
        self.grid[row][col] = Cell::Mark(self.turn);
        self.turn = self.turn.opponent();
        self.classify(row, col)
    }

    /// Clear a just-played cell and give the move back to its owner.
    pub(crate) fn undo_move(&mut self, mv: Move) {
        let (row, col) = mv.indices();
        self.grid[row][col] = Cell::Empty;
        self.turn = self.turn.opponent();
    }

    /// Classify the position after a move at 0-based `(row, col)`.
    ///
    /// Only the lines through that cell are checked. A winning line is
    /// credited to the side that just moved (the opponent of the side to
    /// move), and takes precedence over a full board.
    pub fn classify(&self, row: usize, col: usize) -> Outcome {
        let won = lines_through(row, col)
            .into_iter()
            .flatten()
            .any(|line| self.is_complete(line));
        if won {
            Outcome::Won(self.turn.opponent())
        } else if self.is_full() {
            Outcome::Draw
        } else {
            Outcome::Ongoing
        }
    }

    fn is_complete(&self, line: Line) -> bool {
        let [a, b, c] = line.map(|(row, col)| self.grid[row][col]);
        !a.is_empty() && a == b && b == c
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "---------")?;
        for row in &self.grid {
            let cells: Vec<String> = row
                .iter()
                .map(|cell| match cell {
                    Cell::Empty => " ".to_string(),
                    Cell::Mark(side) => side.to_string(),
                })
                .collect();
            writeln!(f, "| {} |", cells.join(" "))?;
        }
        write!(f, "---------")
    }
}
