//! Tictac-Rust: tic-tac-toe against the computer.
//!
//! ## Usage
//!
//! - `tictac-rust` - Start the interactive shell
//! - `tictac-rust play --seed 7` - Interactive shell with a reproducible engine
//! - `tictac-rust demo --x hard --o medium` - Watch a computer-vs-computer game
//!
//! Log output goes to stderr and is controlled with `RUST_LOG`.

use std::io::{self, Write};

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use tictac_rust::shell::{Player, Shell};
use tictac_rust::strategy::{Difficulty, Engine};

/// Tictac-Rust: tic-tac-toe with random, heuristic and minimax opponents
#[derive(Parser)]
#[command(name = "tictac-rust")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play interactively on stdin/stdout
    Play {
        /// Seed for the easy and medium opponents
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Play one computer-vs-computer game
    Demo {
        /// Difficulty of the X player
        #[arg(long, default_value_t = Difficulty::Hard)]
        x: Difficulty,
        /// Difficulty of the O player
        #[arg(long, default_value_t = Difficulty::Hard)]
        o: Difficulty,
        /// Starting board as a 9-character string over X, O and _
        #[arg(long)]
        preset: Option<String>,
        /// Seed for the easy and medium opponents
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn engine(seed: Option<u64>) -> Engine {
    match seed {
        Some(seed) => Engine::with_seed(seed),
        None => Engine::new(),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Play { seed }) => run_shell(seed),
        None => run_shell(None),
        Some(Commands::Demo { x, o, preset, seed }) => run_demo(x, o, preset, seed),
    }
}

fn run_shell(seed: Option<u64>) -> Result<()> {
    info!(?seed, "starting interactive shell");
    let mut shell = Shell::with_engine(engine(seed));
    shell.run(io::stdin().lock(), io::stdout().lock())?;
    Ok(())
}

fn run_demo(x: Difficulty, o: Difficulty, preset: Option<String>, seed: Option<u64>) -> Result<()> {
    info!(%x, %o, ?preset, ?seed, "starting demo game");
    let mut shell = Shell::with_engine(engine(seed));
    let mut stdout = io::stdout().lock();
    if let Some(grid) = preset {
        if let Err(err) = shell.preset(&grid) {
            writeln!(stdout, "Wrong initial condition ({err})")?;
        }
    }

    writeln!(stdout, "{}", shell.board())?;
    let outcome = shell.play_game(
        &mut std::iter::empty::<io::Result<String>>(),
        &mut stdout,
        Player::Computer(x),
        Player::Computer(o),
    )?;
    info!(?outcome, "demo finished");
    Ok(())
}
