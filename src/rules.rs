//! Move legality and execution.
//!
//! This module provides the core game rules:
//! - Ordered legality checks (bounds, occupancy, ko, suicide)
//! - Stone placement and capture of enemy groups
//! - Simple ko detection after single-stone captures
//! - Reversal of a recorded move for undo
//!
//! Legality is computed without touching the board. Once a move passes
//! [`check_move`], execution cannot fail, so a rejected move never leaves a
//! partially applied board behind.

use thiserror::Error;

use crate::board::{Board, Color, Point};
use crate::group::{group_at, is_capture_clean};

/// Reason a move was rejected. The first failing check wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoveError {
    /// Point lies outside the board
    #[error("illegal move: {0} is off the board")]
    OutOfBounds(Point),
    /// Point is not empty
    #[error("illegal move: point not empty")]
    Occupied,
    /// Move retakes a ko immediately
    #[error("illegal move: retakes ko")]
    Ko,
    /// Move would leave its own group without liberties and captures nothing
    #[error("illegal move: suicide")]
    Suicide,
}

/// A move as recorded in the game history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Move {
    pub point: Point,
    pub color: Color,
    /// Enemy stones removed by this move
    pub captured: Vec<Point>,
    /// 1-based position in the history
    pub move_number: usize,
}

/// Result of executing a legal move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveOutcome {
    pub captured: Vec<Point>,
    /// Point the opponent may not play on next turn
    pub ko: Option<Point>,
}

/// Check whether `color` may play at `p`.
///
/// Checks run in a fixed order: bounds, occupancy, ko, suicide.
pub fn check_move(board: &Board, p: Point, color: Color, ko: Option<Point>) -> Result<(), MoveError> {
    if !board.contains(p) {
        return Err(MoveError::OutOfBounds(p));
    }
    if board.get(p).is_some() {
        return Err(MoveError::Occupied);
    }
    if ko == Some(p) {
        return Err(MoveError::Ko);
    }
    if is_suicide(board, p, color) {
        return Err(MoveError::Suicide);
    }
    Ok(())
}

pub fn is_legal_move(board: &Board, p: Point, color: Color, ko: Option<Point>) -> bool {
    check_move(board, p, color, ko).is_ok()
}

/// True if playing at the empty point `p` would capture at least one enemy
/// group, i.e. some adjacent enemy group has `p` as its only liberty.
pub fn captures_any(board: &Board, p: Point, color: Color) -> bool {
    let enemy = color.opponent();
    board.neighbors(p).any(|nb| {
        board.get(nb) == Some(enemy) && group_at(board, nb).is_some_and(|g| g.liberty_count() == 1)
    })
}

/// Suicide test for the empty point `p`.
///
/// A capturing move is never suicide. Otherwise the new stone's group has a
/// liberty if `p` touches an empty point, or if a friendly neighbor group has
/// a liberty besides `p` itself.
fn is_suicide(board: &Board, p: Point, color: Color) -> bool {
    if captures_any(board, p, color) {
        return false;
    }
    for nb in board.neighbors(p) {
        match board.get(nb) {
            None => return false,
            Some(c) if c == color => {
                if group_at(board, nb).is_some_and(|g| g.liberty_count() > 1) {
                    return false;
                }
            }
            Some(_) => {}
        }
    }
    true
}

/// Play `color` at `p`.
///
/// Handles legality checking, captures and ko detection. On error the board
/// is untouched.
///
/// # Errors
/// Returns the first failing [`MoveError`] check.
pub fn play_move(
    board: &mut Board,
    p: Point,
    color: Color,
    ko: Option<Point>,
) -> Result<MoveOutcome, MoveError> {
    check_move(board, p, color, ko)?;

    let enemy = color.opponent();
    board.set(p, Some(color));

    let mut captured = Vec::new();
    for nb in board.neighbors(p) {
        // A group spanning two neighbors is removed on the first visit
        if board.get(nb) != Some(enemy) {
            continue;
        }
        if let Some(group) = group_at(board, nb) {
            if group.liberties.is_empty() {
                for &s in &group.stones {
                    board.set(s, None);
                }
                captured.extend(group.stones);
            }
        }
    }

    let ko = if let [single] = captured[..] {
        // Simple ko: recapturing at `single` would take the new stone back
        board.set(single, Some(enemy));
        let recapturable = group_at(board, p).is_some_and(|g| g.liberties.is_empty());
        board.set(single, None);
        recapturable.then_some(single)
    } else {
        None
    };

    debug_assert!(
        is_capture_clean(board),
        "zero-liberty group left standing after move at {p}"
    );

    Ok(MoveOutcome { captured, ko })
}

/// Reverse a recorded move: empty its point and put captured stones back.
pub fn undo_move(board: &mut Board, mv: &Move) {
    board.set(mv.point, None);
    let restored = mv.color.opponent();
    for &s in &mv.captured {
        board.set(s, Some(restored));
    }
}

/// Every point where `color` may legally play, in row-major order.
pub fn legal_moves(board: &Board, color: Color, ko: Option<Point>) -> Vec<Point> {
    board
        .points()
        .filter(|&p| is_legal_move(board, p, color, ko))
        .collect()
}
