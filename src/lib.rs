//! Tictac-Rust: a 3x3 tic-tac-toe engine with computer opponents.
//!
//! ## Modules
//!
//! - [`constants`] - Board dimensions, board string characters, search scores
//! - [`board`] - Game state (grid, side to move, move validation, win/draw detection)
//! - [`strategy`] - Random, heuristic and minimax move selection
//! - [`shell`] - Line-oriented interactive front end
//!
//! ## Example
//!
//! ```
//! use tictac_rust::board::{Board, Outcome};
//! use tictac_rust::strategy::{Difficulty, Engine};
//!
//! // X has two in the top row
//! let mut board = Board::from_preset("XX_OO____").unwrap();
//!
//! // The minimax engine finishes the row
//! let mut engine = Engine::with_seed(42);
//! let mv = engine.select_move(&mut board, Difficulty::Hard).unwrap();
//! assert_eq!(mv.to_string(), "1 3");
//! assert!(matches!(board.apply_move(&mv.to_string()), Ok(Outcome::Won(_))));
//! ```

pub mod board;
pub mod constants;
pub mod shell;
pub mod strategy;
