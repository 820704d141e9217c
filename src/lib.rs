//! go-territory: Go rules engine with territory analysis.
//!
//! This crate validates and applies Go moves (captures, suicide, simple ko),
//! tracks groups and liberties, and assesses territory by enclosure with a
//! cached, diffable ownership map.
//!
//! ## Modules
//!
//! - [`constants`] - Supported sizes, komi and display tunables
//! - [`config`] - Board size validation and game settings
//! - [`board`] - Board representation and coordinates
//! - [`group`] - Connected groups and liberties
//! - [`rules`] - Move legality, execution and undo
//! - [`territory`] - Ownership map, influence, cache and change summaries
//! - [`session`] - A game in progress
//! - [`gtp`] - Go Text Protocol front end
//!
//! ## Example
//!
//! ```
//! use go_territory::board::{Color, Point};
//! use go_territory::config::{BoardSize, GameConfig};
//! use go_territory::session::Session;
//!
//! let mut session = Session::new(GameConfig::new(BoardSize::Nine));
//! session.place_stone(Point::new(4, 4)).unwrap();
//! session.toggle_territory_display();
//!
//! // A lone stone borders the whole empty board
//! assert_eq!(session.territory_map().count(Color::Black), 80);
//! println!("{}", session.last_change().unwrap().message);
//! ```

pub mod board;
pub mod config;
pub mod constants;
pub mod group;
pub mod gtp;
pub mod rules;
pub mod session;
pub mod territory;
