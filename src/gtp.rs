//! Go Text Protocol (GTP) front end for a game session.
//!
//! GTP is a text-based protocol for communicating with Go programs. This
//! module implements the board-keeping subset of GTP version 2 so a session
//! can be driven from a terminal or a GUI such as Sabaki or GoGui. There is
//! no move generation, and passing is not modeled.
//!
//! ## Supported Commands
//!
//! - `name` - Return engine name
//! - `version` - Return engine version
//! - `protocol_version` - Return GTP protocol version (2)
//! - `list_commands` - List all supported commands
//! - `known_command <cmd>` - Check if a command is supported
//! - `quit` - Exit the program
//! - `boardsize <size>` - Set board size (9, 13 or 19)
//! - `clear_board` - Reset the board to empty
//! - `komi <value>` - Set komi
//! - `play <color> <vertex>` - Play a move for the side to move
//! - `undo` - Take back the last move
//! - `showboard` - Print the board
//! - `territory` - Toggle the territory display and report the assessment
//! - `final_score` - Score from captures, displayed territory and komi
//!
//! ## Example
//!
//! ```ignore
//! use go_territory::gtp::GtpEngine;
//! let mut engine = GtpEngine::new();
//! engine.run()?;
//! ```

use std::io::{self, BufRead, Write};

use tracing::{debug, warn};

use crate::board::{Color, Point};
use crate::config::{BoardSize, GameConfig};
use crate::session::Session;

/// The list of known GTP commands.
const KNOWN_COMMANDS: &[&str] = &[
    "boardsize",
    "clear_board",
    "final_score",
    "known_command",
    "komi",
    "list_commands",
    "name",
    "play",
    "protocol_version",
    "quit",
    "showboard",
    "territory",
    "undo",
    "version",
];

/// GTP engine state.
pub struct GtpEngine {
    session: Session,
}

impl Default for GtpEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl GtpEngine {
    /// Create an engine with a default 19x19 game.
    pub fn new() -> Self {
        Self::with_config(GameConfig::default())
    }

    pub fn with_config(config: GameConfig) -> Self {
        Self {
            session: Session::new(config),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Run the GTP command loop, reading from stdin and writing to stdout.
    pub fn run(&mut self) -> io::Result<()> {
        let stdin = io::stdin();
        let mut stdout = io::stdout();

        for line in stdin.lock().lines() {
            let line = line?;

            // Skip empty lines and comments
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            // Parse optional command ID
            let (id, command_line) = Self::parse_id(line);

            let parts: Vec<&str> = command_line.split_whitespace().collect();
            if parts.is_empty() {
                continue;
            }

            let command = parts[0].to_lowercase();
            let args = &parts[1..];
            debug!(%command, ?args, "gtp command");

            let (success, message) = self.execute(&command, args);
            if !success {
                warn!(%command, %message, "gtp command failed");
            }
            let prefix = if success { '=' } else { '?' };
            let id_str = id.map(|i| i.to_string()).unwrap_or_default();

            writeln!(stdout, "{prefix}{id_str} {message}\n")?;
            stdout.flush()?;

            if command == "quit" {
                break;
            }
        }
        Ok(())
    }

    /// Parse an optional numeric command ID from the beginning of the line.
    fn parse_id(line: &str) -> (Option<u32>, &str) {
        let trimmed = line.trim();
        let end = trimmed
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(trimmed.len());
        if end > 0 {
            if let Ok(id) = trimmed[..end].parse::<u32>() {
                return (Some(id), trimmed[end..].trim());
            }
        }
        (None, trimmed)
    }

    fn parse_color(s: &str) -> Option<Color> {
        match s.to_lowercase().as_str() {
            "b" | "black" => Some(Color::Black),
            "w" | "white" => Some(Color::White),
            _ => None,
        }
    }

    /// Execute a GTP command and return (success, response).
    pub fn execute(&mut self, command: &str, args: &[&str]) -> (bool, String) {
        match command {
            "name" => (true, env!("CARGO_PKG_NAME").to_string()),

            "version" => (true, env!("CARGO_PKG_VERSION").to_string()),

            "protocol_version" => (true, "2".to_string()),

            "list_commands" => (true, KNOWN_COMMANDS.join("\n")),

            "known_command" => {
                let Some(cmd) = args.first() else {
                    return (false, "missing argument".to_string());
                };
                let known = KNOWN_COMMANDS.contains(&cmd.to_lowercase().as_str());
                (true, known.to_string())
            }

            "quit" => (true, String::new()),

            "boardsize" => {
                let Some(arg) = args.first() else {
                    return (false, "missing argument".to_string());
                };
                match arg.parse::<usize>() {
                    Ok(n) => match BoardSize::try_from(n) {
                        Ok(size) => {
                            self.session.change_board_size(size);
                            (true, String::new())
                        }
                        Err(e) => (false, format!("unacceptable size: {e}")),
                    },
                    Err(_) => (false, "invalid size".to_string()),
                }
            }

            "clear_board" => {
                self.session.reset();
                (true, String::new())
            }

            "komi" => {
                let Some(arg) = args.first() else {
                    return (false, "missing argument".to_string());
                };
                match arg.parse::<f32>() {
                    Ok(komi) if komi.is_finite() => {
                        self.session.set_komi(komi);
                        (true, String::new())
                    }
                    _ => (false, "invalid komi".to_string()),
                }
            }

            "play" => {
                let [color, vertex, ..] = args else {
                    return (false, "missing arguments".to_string());
                };
                let Some(color) = Self::parse_color(color) else {
                    return (false, "invalid color".to_string());
                };
                if color != self.session.to_play() {
                    return (false, format!("it is {}'s turn", self.session.to_play()));
                }
                if vertex.eq_ignore_ascii_case("pass") {
                    return (false, "pass is not supported".to_string());
                }
                let size = self.session.board().size();
                let Some(p) = Point::parse_vertex(vertex, size) else {
                    return (false, "invalid vertex".to_string());
                };
                match self.session.place_stone(p) {
                    Ok(_) => (true, String::new()),
                    Err(e) => (false, e.to_string()),
                }
            }

            "undo" => match self.session.undo() {
                Some(_) => (true, String::new()),
                None => (false, "cannot undo".to_string()),
            },

            "showboard" => (true, format!("\n{}", self.session.board())),

            "territory" => {
                if !self.session.toggle_territory_display() {
                    return (true, "off".to_string());
                }
                let message = self
                    .session
                    .last_change()
                    .map(|c| c.message.clone())
                    .unwrap_or_default();
                (true, format!("on\n{message}"))
            }

            "final_score" => {
                let diff = self.session.black_score() - self.session.white_score();
                let score = if diff > 0.0 {
                    format!("B+{diff}")
                } else if diff < 0.0 {
                    format!("W+{}", -diff)
                } else {
                    "0".to_string()
                };
                (true, score)
            }

            _ => (false, format!("unknown command: {command}")),
        }
    }
}
