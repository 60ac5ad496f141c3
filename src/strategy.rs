//! Computer move selection.
//!
//! Three policies, one per [`Difficulty`]:
//! - [`random_move`] picks uniformly among empty cells
//! - [`relevant_move`] takes the first empty cell that completes any
//!   two-in-a-row, falling back to a random cell
//! - [`best_move`] runs an exhaustive minimax search and never loses
//!
//! The search plays and undoes moves on the caller's board instead of cloning
//! it, so the board must not be touched by anyone else while it runs. It is
//! left exactly as it was on return.

use fastrand::Rng;
use strum::{Display, EnumIter, EnumString};
use tracing::{debug, instrument, trace};

use crate::board::{Board, Cell, Move, Outcome, Side, lines_through};
use crate::constants::{SCORE_DRAW, SCORE_LOSS, SCORE_WIN};

/// Strength of the computer player.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Difficulty {
    /// Uniformly random move.
    Easy,
    /// One-ply reaction to any two-in-a-row.
    Medium,
    /// Exhaustive minimax.
    Hard,
}

/// Move selector owning the random source used by the easy and medium
/// policies.
pub struct Engine {
    rng: Rng,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    /// Engine seeded from system entropy.
    pub fn new() -> Self {
        Self { rng: Rng::new() }
    }

    /// Deterministic engine for reproducible games and tests.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Rng::with_seed(seed),
        }
    }

    /// Pick a move for the side to move. Returns `None` on a full board.
    #[instrument(skip(self, board), fields(board = %board.board_string()))]
    pub fn select_move(&mut self, board: &mut Board, difficulty: Difficulty) -> Option<Move> {
        let mv = match difficulty {
            Difficulty::Easy => random_move(board, &mut self.rng),
            Difficulty::Medium => relevant_move(board, &mut self.rng),
            Difficulty::Hard => best_move(board),
        };
        debug!(?mv, "move selected");
        mv
    }
}

/// Uniformly random empty cell.
pub fn random_move(board: &Board, rng: &mut Rng) -> Option<Move> {
    let candidates: Vec<Move> = board.empty_cells().collect();
    if candidates.is_empty() {
        return None;
    }
    Some(candidates[rng.usize(..candidates.len())])
}

/// First empty cell, in row-major order, whose line partners already hold
/// two equal marks; otherwise a random empty cell.
///
/// Attack and defence are not told apart and the side to move is ignored:
/// blocking the opponent can be preferred over winning outright.
pub fn relevant_move(board: &Board, rng: &mut Rng) -> Option<Move> {
    board
        .empty_cells()
        .find(|&mv| completes_pair(board, mv))
        .or_else(|| random_move(board, rng))
}

/// True if some line through `mv` has its other two cells equal and marked.
fn completes_pair(board: &Board, mv: Move) -> bool {
    let here = mv.indices();
    lines_through(here.0, here.1)
        .into_iter()
        .flatten()
        .any(|line| {
            let mut partners = line
                .into_iter()
                .filter(|&cell| cell != here)
                .map(|(row, col)| board.cell_at(row, col));
            match (partners.next(), partners.next()) {
                (Some(a), Some(b)) => a != Cell::Empty && a == b,
                _ => false,
            }
        })
}

/// Optimal move for the side to move, by exhaustive minimax.
///
/// Root moves are scanned in row-major order and the first one with the
/// highest score wins ties. Returns `None` on a full board.
pub fn best_move(board: &mut Board) -> Option<Move> {
    let searcher = board.turn_side();
    let candidates: Vec<Move> = board.empty_cells().collect();

    let mut best: Option<(i32, Move)> = None;
    for mv in candidates {
        let outcome = board.play(mv);
        let score = minimax(board, outcome, searcher, false);
        board.undo_move(mv);
        trace!(%mv, score, "root move scored");

        if best.is_none_or(|(best_score, _)| score > best_score) {
            best = Some((score, mv));
        }
    }
    best.map(|(_, mv)| mv)
}

/// Score `outcome` for `searcher`, searching on while the game is ongoing.
///
/// `maximizing` is true when it is the searcher's turn at this node.
fn minimax(board: &mut Board, outcome: Outcome, searcher: Side, maximizing: bool) -> i32 {
    match outcome {
        Outcome::Draw => return SCORE_DRAW,
        Outcome::Won(winner) if winner == searcher => return SCORE_WIN,
        Outcome::Won(_) => return SCORE_LOSS,
        Outcome::Ongoing => {}
    }

    let candidates: Vec<Move> = board.empty_cells().collect();
    let mut best = if maximizing { i32::MIN } else { i32::MAX };
    for mv in candidates {
        let child = board.play(mv);
        let score = minimax(board, child, searcher, !maximizing);
        board.undo_move(mv);

        best = if maximizing {
            best.max(score)
        } else {
            best.min(score)
        };
    }
    best
}
