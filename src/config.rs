//! Game configuration: board size and komi.
//!
//! Board size is validated here, before any board or session is built.

use std::fmt;

use thiserror::Error;

use crate::constants::{DEFAULT_KOMI, SUPPORTED_SIZES};

/// Errors raised while configuring a game.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Board size other than 9, 13 or 19
    #[error("unsupported board size {0} (expected 9, 13 or 19)")]
    UnsupportedBoardSize(usize),
    /// Malformed board diagram
    #[error("bad board diagram: {0}")]
    BadDiagram(String),
}

/// One of the standard square board sizes.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum BoardSize {
    Nine,
    Thirteen,
    #[default]
    Nineteen,
}

impl BoardSize {
    /// Number of points along one edge.
    pub fn get(self) -> usize {
        match self {
            BoardSize::Nine => 9,
            BoardSize::Thirteen => 13,
            BoardSize::Nineteen => 19,
        }
    }
}

impl TryFrom<usize> for BoardSize {
    type Error = ConfigError;

    fn try_from(n: usize) -> Result<Self, Self::Error> {
        match n {
            9 => Ok(BoardSize::Nine),
            13 => Ok(BoardSize::Thirteen),
            19 => Ok(BoardSize::Nineteen),
            other => {
                debug_assert!(!SUPPORTED_SIZES.contains(&other));
                Err(ConfigError::UnsupportedBoardSize(other))
            }
        }
    }
}

impl fmt::Display for BoardSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = self.get();
        write!(f, "{n}x{n}")
    }
}

/// Settings fixed for the lifetime of a game.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GameConfig {
    pub board_size: BoardSize,
    /// Points added to White's score
    pub komi: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_size: BoardSize::default(),
            komi: DEFAULT_KOMI,
        }
    }
}

impl GameConfig {
    pub fn new(board_size: BoardSize) -> Self {
        Self {
            board_size,
            ..Self::default()
        }
    }

    /// Build a config from a raw edge length, rejecting unsupported sizes.
    pub fn with_size(n: usize) -> Result<Self, ConfigError> {
        Ok(Self::new(BoardSize::try_from(n)?))
    }
}
