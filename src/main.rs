//! go-territory: Go rules and territory analysis.
//!
//! ## Usage
//!
//! - `go-territory` - Show a demo
//! - `go-territory gtp` - Start a GTP session for GUI integration
//! - `go-territory demo --size 9 --moves 60 --seed 7` - Play random legal moves
//!
//! Logging goes to stderr and is controlled by `RUST_LOG`.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use go_territory::board::{Color, Point};
use go_territory::config::GameConfig;
use go_territory::constants::{DEFAULT_SIZE, EMPTY};
use go_territory::gtp::GtpEngine;
use go_territory::rules::legal_moves;
use go_territory::session::Session;

/// go-territory: Go rules engine with territory analysis
#[derive(Parser)]
#[command(name = "go-territory")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the GTP (Go Text Protocol) loop on stdin/stdout
    Gtp {
        /// Board size (9, 13 or 19)
        #[arg(long, default_value_t = DEFAULT_SIZE)]
        size: usize,
    },
    /// Play random legal moves and print the resulting territory
    Demo {
        /// Board size (9, 13 or 19)
        #[arg(long, default_value_t = 9)]
        size: usize,
        /// Number of moves to play
        #[arg(long, default_value_t = 40)]
        moves: usize,
        /// Random seed
        #[arg(long, default_value_t = 1)]
        seed: u64,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Gtp { size }) => {
            let config = GameConfig::with_size(size)?;
            let mut engine = GtpEngine::with_config(config);
            engine.run().context("GTP loop failed")?;
        }
        Some(Commands::Demo { size, moves, seed }) => run_demo(size, moves, seed)?,
        None => run_demo(9, 40, 1)?,
    }
    Ok(())
}

fn run_demo(size: usize, moves: usize, seed: u64) -> Result<()> {
    let config = GameConfig::with_size(size)?;
    let mut session = Session::new(config);
    let mut rng = fastrand::Rng::with_seed(seed);
    session.toggle_territory_display();

    println!("go-territory: {} board, {moves} random moves\n", config.board_size);

    for _ in 0..moves {
        let candidates = legal_moves(session.board(), session.to_play(), session.ko());
        if candidates.is_empty() {
            info!("no legal moves left");
            break;
        }
        let p = candidates[rng.usize(..candidates.len())];
        let mv = session.place_stone(p)?;
        if !mv.captured.is_empty() {
            println!(
                "Move {}: {} at {} captured {}",
                mv.move_number,
                mv.color,
                p.vertex(size),
                mv.captured.len()
            );
        }
    }

    println!("=== Board ===");
    println!("{}", session.board());
    println!("=== Territory ===");
    print_territory(&session);
    if let Some(change) = session.last_change() {
        println!("{}\n", change.message);
    }

    println!("Groups: {}", session.groups().len());
    println!("Ko: {}", session.ko().map_or("none".to_string(), |p| p.vertex(size)));
    println!(
        "Score: Black {:.1}, White {:.1} (komi {})",
        session.black_score(),
        session.white_score(),
        session.config().komi
    );
    Ok(())
}

/// Stones as `X`/`O`, owned empty points as `x`/`o`.
fn print_territory(session: &Session) {
    let board = session.board();
    let map = session.territory_map();
    for y in 0..board.size() {
        let row: Vec<String> = (0..board.size())
            .map(|x| {
                let p = Point::new(x, y);
                let ch = match (board.get(p), map.owner(p)) {
                    (Some(stone), _) => stone.symbol(),
                    (None, Some(Color::Black)) => 'x',
                    (None, Some(Color::White)) => 'o',
                    (None, None) => EMPTY,
                };
                ch.to_string()
            })
            .collect();
        println!("{}", row.join(" "));
    }
    println!();
}
