//! Game session: the state of one game and the sequencing of engine calls.
//!
//! A session owns its board, history and territory cache; nothing is shared
//! between sessions. Every mutating operation finishes with the territory
//! state already consistent with the new board.

use std::time::Instant;

use tracing::{debug, info};

use crate::board::{Board, Color, Point};
use crate::config::{BoardSize, GameConfig};
use crate::group::{Group, GroupIndex, all_groups};
use crate::rules::{Move, MoveError, check_move, play_move, undo_move};
use crate::territory::{
    MoveContext, TerritoryCache, TerritoryChange, TerritoryHighlight, TerritoryInfo, TerritoryMap,
    diff_territory, influence_control, territory_highlights,
};

/// One game in progress.
pub struct Session {
    config: GameConfig,
    board: Board,
    /// Side to move
    to_play: Color,
    /// Black stones removed from the board
    captured_black: usize,
    /// White stones removed from the board
    captured_white: usize,
    history: Vec<Move>,
    ko: Option<Point>,
    show_territory: bool,
    territory: TerritoryMap,
    last_change: Option<TerritoryChange>,
    highlights: Vec<TerritoryHighlight>,
    cache: TerritoryCache,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}

impl Session {
    pub fn new(config: GameConfig) -> Self {
        let board = Board::new(config.board_size);
        let territory = TerritoryMap::neutral(board.size());
        Self {
            config,
            board,
            to_play: Color::Black,
            captured_black: 0,
            captured_white: 0,
            history: Vec::new(),
            ko: None,
            show_territory: false,
            territory,
            last_change: None,
            highlights: Vec::new(),
            cache: TerritoryCache::new(),
        }
    }

    /// Play the side to move at `p`.
    ///
    /// A rejected move leaves the session exactly as it was.
    pub fn place_stone(&mut self, p: Point) -> Result<&Move, MoveError> {
        let color = self.to_play;
        let outcome = play_move(&mut self.board, p, color, self.ko)?;

        let n = outcome.captured.len();
        match color {
            Color::Black => self.captured_white += n,
            Color::White => self.captured_black += n,
        }
        self.ko = outcome.ko;
        self.to_play = color.opponent();
        let index = self.history.len();
        self.history.push(Move {
            point: p,
            color,
            captured: outcome.captured,
            move_number: index + 1,
        });
        debug!(
            move_number = self.history.len(),
            %color,
            point = %p,
            captured = n,
            ko = ?self.ko,
            "stone placed"
        );

        let context = MoveContext {
            color,
            point: p,
            captured: n,
        };
        self.update_territory(Some(&context));

        Ok(&self.history[index])
    }

    /// Take back the last move. Returns `None` if there is nothing to undo.
    ///
    /// The ko constraint is cleared rather than restored, so a ko that was
    /// active before the undone move is forgotten.
    pub fn undo(&mut self) -> Option<Move> {
        let mv = self.history.pop()?;
        undo_move(&mut self.board, &mv);

        let n = mv.captured.len();
        match mv.color {
            Color::Black => self.captured_white -= n,
            Color::White => self.captured_black -= n,
        }
        self.to_play = mv.color;
        self.ko = None;
        debug!(move_number = mv.move_number, point = %mv.point, "move undone");

        self.update_territory(None);
        Some(mv)
    }

    /// Start a new game on an empty board of the current size.
    pub fn reset(&mut self) {
        self.board = Board::new(self.config.board_size);
        self.to_play = Color::Black;
        self.captured_black = 0;
        self.captured_white = 0;
        self.history.clear();
        self.ko = None;
        self.territory = TerritoryMap::neutral(self.board.size());
        self.last_change = None;
        self.highlights.clear();
        self.cache.invalidate();
        info!(size = %self.config.board_size, "game reset");
    }

    /// Switch to a different board size. Discards the current game.
    pub fn change_board_size(&mut self, size: BoardSize) {
        self.config.board_size = size;
        info!(%size, "board size changed");
        self.reset();
    }

    pub fn set_komi(&mut self, komi: f32) {
        self.config.komi = komi;
    }

    /// Turn the territory display on or off; returns the new state.
    pub fn toggle_territory_display(&mut self) -> bool {
        self.show_territory = !self.show_territory;
        self.update_territory(None);
        self.show_territory
    }

    /// Recompute territory without attributing the change to a move.
    pub fn refresh_territory(&mut self) {
        self.update_territory(None);
    }

    fn update_territory(&mut self, context: Option<&MoveContext>) {
        if !self.show_territory {
            self.territory = TerritoryMap::neutral(self.board.size());
            self.last_change = None;
            self.highlights.clear();
            return;
        }

        let next = self.cache.territory_map(&self.board).clone();
        let change = diff_territory(&self.territory, &next, context);
        self.highlights = territory_highlights(&change, context, Instant::now());
        debug!(
            black = change.black_total,
            white = change.white_total,
            changed = change.changes.len(),
            "territory updated"
        );
        self.territory = next;
        self.last_change = Some(change);
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn to_play(&self) -> Color {
        self.to_play
    }

    pub fn captured_black(&self) -> usize {
        self.captured_black
    }

    pub fn captured_white(&self) -> usize {
        self.captured_white
    }

    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Number of moves played so far.
    pub fn move_number(&self) -> usize {
        self.history.len()
    }

    /// Point the side to move may not play on.
    pub fn ko(&self) -> Option<Point> {
        self.ko
    }

    pub fn show_territory(&self) -> bool {
        self.show_territory
    }

    /// Current territory map; all neutral while the display is off.
    pub fn territory_map(&self) -> &TerritoryMap {
        &self.territory
    }

    pub fn last_change(&self) -> Option<&TerritoryChange> {
        self.last_change.as_ref()
    }

    /// Highlights still visible at `now`.
    pub fn highlights(&self, now: Instant) -> impl Iterator<Item = &TerritoryHighlight> {
        self.highlights.iter().filter(move |h| !h.is_expired(now))
    }

    pub fn clear_highlights(&mut self) {
        self.highlights.clear();
    }

    pub fn groups(&self) -> Vec<Group> {
        all_groups(&self.board)
    }

    pub fn group_index(&self) -> GroupIndex {
        GroupIndex::new(&self.board)
    }

    pub fn territory_info(&self) -> TerritoryInfo {
        TerritoryInfo::new(&self.board, &self.territory)
    }

    /// Influence-tinted display view; never used for scoring.
    pub fn influence_control(&self) -> Vec<Option<Color>> {
        influence_control(&self.board)
    }

    /// Legality of `p` for the side to move, without playing it.
    pub fn check(&self, p: Point) -> Result<(), MoveError> {
        check_move(&self.board, p, self.to_play, self.ko)
    }

    /// Captured White stones plus, while displayed, Black territory.
    pub fn black_score(&self) -> f32 {
        let territory = if self.show_territory {
            self.territory.count(Color::Black)
        } else {
            0
        };
        (self.captured_white + territory) as f32
    }

    /// Captured Black stones, komi and, while displayed, White territory.
    pub fn white_score(&self) -> f32 {
        let territory = if self.show_territory {
            self.territory.count(Color::White)
        } else {
            0
        };
        (self.captured_black + territory) as f32 + self.config.komi
    }
}
