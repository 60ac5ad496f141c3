//! Interactive text shell.
//!
//! A thin line-oriented front end over [`Board`] and [`Engine`]. It reads one
//! command per line and writes prompts, boards and results back.
//!
//! ## Menu Commands
//!
//! - `preset <grid>` - Load a 9-character board string (`X`, `O`, `_`)
//! - `start <x-player> <o-player>` - Play a game; players are `user`, `easy`,
//!   `medium` or `hard`
//! - `exit` - Leave the shell
//!
//! During a game, `user` turns read `"row col"` lines (1-based).
//!
//! ## Example
//!
//! ```
//! use tictac_rust::shell::Shell;
//! use tictac_rust::strategy::Engine;
//!
//! let mut shell = Shell::with_engine(Engine::with_seed(1));
//! let mut out = Vec::new();
//! shell.run("start hard hard\nexit\n".as_bytes(), &mut out).unwrap();
//! assert!(String::from_utf8(out).unwrap().contains("Draw"));
//! ```

use std::io::{self, BufRead, Write};
use std::str::FromStr;

use tracing::{debug, warn};

use crate::board::{Board, MoveError, Outcome, PresetError, Side};
use crate::strategy::{Difficulty, Engine};

/// Who makes the moves for one side.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Player {
    User,
    Computer(Difficulty),
}

impl FromStr for Player {
    type Err = strum::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("user") {
            return Ok(Player::User);
        }
        Difficulty::from_str(s).map(Player::Computer)
    }
}

/// Result of one menu command.
#[derive(Debug, PartialEq, Eq)]
enum Command {
    /// Print the message and read the next command.
    Reply(String),
    Start(Player, Player),
    Exit,
}

/// Message shown to the user for a rejected move.
fn complaint(err: MoveError) -> &'static str {
    match err {
        MoveError::MalformedInput | MoveError::NotANumber => "You should enter numbers!",
        MoveError::OutOfRange => "Coordinates should be from 1 to 3!",
        MoveError::OccupiedCell => "This cell is occupied! Choose another one!",
    }
}

/// Shell state: the pending board and the computer's engine.
pub struct Shell {
    board: Board,
    engine: Engine,
}

impl Default for Shell {
    fn default() -> Self {
        Self::new()
    }
}

impl Shell {
    pub fn new() -> Self {
        Self::with_engine(Engine::new())
    }

    pub fn with_engine(engine: Engine) -> Self {
        Self {
            board: Board::new(),
            engine,
        }
    }

    /// Board the next game starts from.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Replace the pending board. An invalid preset leaves an empty board.
    pub fn preset(&mut self, grid: &str) -> Result<(), PresetError> {
        match Board::from_preset(grid) {
            Ok(board) => {
                self.board = board;
                Ok(())
            }
            Err(err) => {
                warn!(grid, %err, "rejected preset");
                self.board = Board::new();
                Err(err)
            }
        }
    }

    /// Run the menu loop until `exit` or end of input.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> io::Result<()> {
        let mut lines = input.lines();

        loop {
            write!(output, "Input command: ")?;
            output.flush()?;

            let Some(line) = lines.next() else {
                break;
            };
            let line = line?;

            match self.execute(&line) {
                Command::Reply(message) => writeln!(output, "{message}")?,
                Command::Exit => break,
                Command::Start(x, o) => {
                    writeln!(output, "{}", self.board)?;
                    let finished = self.play_game(&mut lines, &mut output, x, o)?;
                    self.board = Board::new();
                    if finished.is_none() {
                        break;
                    }
                }
            }
        }

        output.flush()
    }

    /// Parse and execute one menu line.
    fn execute(&mut self, line: &str) -> Command {
        let line = line.to_lowercase();
        let parts: Vec<&str> = line.split_whitespace().collect();

        match parts.as_slice() {
            ["preset", grid] => {
                let mut reply = String::new();
                if self.preset(grid).is_err() {
                    reply.push_str("Wrong initial condition\n");
                }
                reply.push_str(&self.board.to_string());
                Command::Reply(reply)
            }
            ["start", x, o] => match (x.parse::<Player>(), o.parse::<Player>()) {
                (Ok(x), Ok(o)) => Command::Start(x, o),
                _ => Command::Reply("Bad parameters!".to_string()),
            },
            ["exit", ..] => Command::Exit,
            _ => Command::Reply("Bad parameters!".to_string()),
        }
    }

    /// Play the pending board to the end.
    ///
    /// User moves are read from `lines`. Returns the final outcome, or `None`
    /// if input ran out first. A board with no empty cell is reported as a
    /// draw without moving.
    pub fn play_game<I, W>(
        &mut self,
        lines: &mut I,
        output: &mut W,
        x: Player,
        o: Player,
    ) -> io::Result<Option<Outcome>>
    where
        I: Iterator<Item = io::Result<String>>,
        W: Write,
    {
        loop {
            if self.board.is_full() {
                writeln!(output, "Draw\n")?;
                return Ok(Some(Outcome::Draw));
            }

            let side = self.board.turn_side();
            let player = match side {
                Side::First => x,
                Side::Second => o,
            };

            let result = match player {
                Player::User => {
                    write!(output, "Enter the coordinates: ")?;
                    output.flush()?;
                    let Some(line) = lines.next() else {
                        return Ok(None);
                    };
                    self.board.apply_move(&line?)
                }
                Player::Computer(difficulty) => {
                    writeln!(output, "Making move level \"{difficulty}\"")?;
                    match self.engine.select_move(&mut self.board, difficulty) {
                        Some(mv) => self.board.apply_move(&mv.to_string()),
                        None => continue,
                    }
                }
            };

            match result {
                Ok(Outcome::Ongoing) => writeln!(output, "{}", self.board)?,
                Ok(outcome @ Outcome::Draw) => {
                    writeln!(output, "{}", self.board)?;
                    writeln!(output, "Draw\n")?;
                    return Ok(Some(outcome));
                }
                Ok(outcome @ Outcome::Won(winner)) => {
                    writeln!(output, "{}", self.board)?;
                    writeln!(output, "{winner} wins\n")?;
                    return Ok(Some(outcome));
                }
                Err(err) => {
                    debug!(%side, %err, "move rejected");
                    writeln!(output, "{}", complaint(err))?;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_parsing() {
        assert_eq!("user".parse::<Player>(), Ok(Player::User));
        assert_eq!(
            "medium".parse::<Player>(),
            Ok(Player::Computer(Difficulty::Medium))
        );
        assert!("expert".parse::<Player>().is_err());
    }

    #[test]
    fn test_execute_start() {
        let mut shell = Shell::new();
        assert_eq!(
            shell.execute("start user hard"),
            Command::Start(Player::User, Player::Computer(Difficulty::Hard))
        );
        assert_eq!(
            shell.execute("START Easy USER"),
            Command::Start(Player::Computer(Difficulty::Easy), Player::User)
        );
    }

    #[test]
    fn test_execute_bad_parameters() {
        let mut shell = Shell::new();
        let bad = Command::Reply("Bad parameters!".to_string());
        assert_eq!(shell.execute("start user"), bad);
        assert_eq!(shell.execute("start user expert"), bad);
        assert_eq!(shell.execute("preset"), bad);
        assert_eq!(shell.execute("dance"), bad);
        assert_eq!(shell.execute(""), bad);
        assert_eq!(shell.execute("exit"), Command::Exit);
    }

    #[test]
    fn test_execute_preset() {
        let mut shell = Shell::new();
        let Command::Reply(reply) = shell.execute("preset x_o______") else {
            panic!("expected a reply");
        };
        assert!(!reply.contains("Wrong initial condition"));
        assert_eq!(shell.board().board_string(), "X_O______");

        let Command::Reply(reply) = shell.execute("preset xxx") else {
            panic!("expected a reply");
        };
        assert!(reply.starts_with("Wrong initial condition"));
        assert_eq!(shell.board().board_string(), "_________");
    }

    #[test]
    fn test_complaints() {
        assert_eq!(complaint(MoveError::MalformedInput), complaint(MoveError::NotANumber));
        assert_eq!(
            complaint(MoveError::OutOfRange),
            "Coordinates should be from 1 to 3!"
        );
    }
}
