//! Territory engine: enclosure flood fill, influence, caching and diffing.
//!
//! Ownership is decided only by enclosure: an empty region whose border
//! touches stones of exactly one color belongs to that color; anything else
//! is neutral. The influence heuristic is a separate display aid and never
//! feeds ownership or scoring.

use std::time::Instant;

use tracing::debug;

use crate::board::{Board, Color, Point};
use crate::constants::{HIGHLIGHT_DURATION, INFLUENCE_DECAY, INFLUENCE_RADIUS, INFLUENCE_THRESHOLD};

// =============================================================================
// Ownership
// =============================================================================

/// Owner of every empty point (`None` = neutral). Occupied points are
/// neutral here; combined views report the stone instead.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TerritoryMap {
    size: usize,
    owners: Vec<Option<Color>>,
}

impl TerritoryMap {
    /// All-neutral map for a board of the given edge length.
    pub fn neutral(size: usize) -> Self {
        Self {
            size,
            owners: vec![None; size * size],
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Owner of `p`; `None` for neutral or off-map points.
    pub fn owner(&self, p: Point) -> Option<Color> {
        if p.x >= self.size || p.y >= self.size {
            return None;
        }
        self.owners[p.y * self.size + p.x]
    }

    pub fn owners(&self) -> &[Option<Color>] {
        &self.owners
    }

    /// Number of points owned by `color`.
    pub fn count(&self, color: Color) -> usize {
        self.owners.iter().filter(|&&o| o == Some(color)).count()
    }

    pub fn is_neutral(&self) -> bool {
        self.owners.iter().all(Option::is_none)
    }

    fn set(&mut self, p: Point, owner: Option<Color>) {
        self.owners[p.y * self.size + p.x] = owner;
    }
}

/// Compute the ownership map of `board` by enclosure.
///
/// Deterministic: the same board always yields the same map.
pub fn territory_map(board: &Board) -> TerritoryMap {
    let mut map = TerritoryMap::neutral(board.size());
    let mut visited = vec![false; board.cells().len()];

    for p in board.points() {
        if visited[board.idx(p)] || board.get(p).is_some() {
            continue;
        }
        let (region, owner) = flood_empty(board, p, &mut visited);
        if owner.is_some() {
            for q in region {
                map.set(q, owner);
            }
        }
    }
    map
}

/// Flood-fill the empty region containing `start`.
///
/// Returns the region and its owner: the single bordering color, or `None`
/// if the border touches no stones or both colors.
fn flood_empty(board: &Board, start: Point, visited: &mut [bool]) -> (Vec<Point>, Option<Color>) {
    let mut region = Vec::new();
    let mut touches_black = false;
    let mut touches_white = false;
    let mut stack = vec![start];
    visited[board.idx(start)] = true;

    while let Some(p) = stack.pop() {
        region.push(p);
        for nb in board.neighbors(p) {
            match board.get(nb) {
                Some(Color::Black) => touches_black = true,
                Some(Color::White) => touches_white = true,
                None => {
                    let i = board.idx(nb);
                    if !visited[i] {
                        visited[i] = true;
                        stack.push(nb);
                    }
                }
            }
        }
    }

    let owner = match (touches_black, touches_white) {
        (true, false) => Some(Color::Black),
        (false, true) => Some(Color::White),
        _ => None,
    };
    (region, owner)
}

/// True if the empty region reachable from `start` touches no stone other
/// than `by`. Occupied or off-board starts are never surrounded.
pub fn is_area_surrounded(board: &Board, start: Point, by: Color) -> bool {
    if !board.is_empty_at(start) {
        return false;
    }
    let mut visited = vec![false; board.cells().len()];
    visited[board.idx(start)] = true;
    let mut stack = vec![start];

    while let Some(p) = stack.pop() {
        for nb in board.neighbors(p) {
            match board.get(nb) {
                None => {
                    let i = board.idx(nb);
                    if !visited[i] {
                        visited[i] = true;
                        stack.push(nb);
                    }
                }
                Some(c) if c != by => return false,
                Some(_) => {}
            }
        }
    }
    true
}

/// Empty points grouped by owner.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TerritoryInfo {
    pub black: Vec<Point>,
    pub white: Vec<Point>,
    pub neutral: Vec<Point>,
}

impl TerritoryInfo {
    pub fn new(board: &Board, map: &TerritoryMap) -> Self {
        let mut info = Self::default();
        for p in board.points().filter(|&p| board.get(p).is_none()) {
            match map.owner(p) {
                Some(Color::Black) => info.black.push(p),
                Some(Color::White) => info.white.push(p),
                None => info.neutral.push(p),
            }
        }
        info
    }

    pub fn black_score(&self) -> usize {
        self.black.len()
    }

    pub fn white_score(&self) -> usize {
        self.white.len()
    }
}

// =============================================================================
// Influence (display only)
// =============================================================================

/// Summed signed influence per point: positive leans Black, negative White.
#[derive(Clone, Debug, PartialEq)]
pub struct InfluenceMap {
    size: usize,
    values: Vec<f64>,
}

impl InfluenceMap {
    pub fn get(&self, p: Point) -> f64 {
        if p.x >= self.size || p.y >= self.size {
            return 0.0;
        }
        self.values[p.y * self.size + p.x]
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }
}

/// Radiate each stone's influence to every point within
/// [`INFLUENCE_RADIUS`] Manhattan distance, decaying as `1 / (1 + d * 0.5)`.
pub fn influence_map(board: &Board) -> InfluenceMap {
    let size = board.size();
    let mut values = vec![0.0; size * size];
    let r = INFLUENCE_RADIUS;

    for p in board.points() {
        let strength = match board.get(p) {
            Some(Color::Black) => 1.0,
            Some(Color::White) => -1.0,
            None => continue,
        };
        for y in p.y.saturating_sub(r)..=(p.y + r).min(size - 1) {
            for x in p.x.saturating_sub(r)..=(p.x + r).min(size - 1) {
                let d = p.x.abs_diff(x) + p.y.abs_diff(y);
                if d == 0 || d > r {
                    continue;
                }
                values[y * size + x] += strength / (1.0 + d as f64 * INFLUENCE_DECAY);
            }
        }
    }
    InfluenceMap { size, values }
}

/// Combined display view, row-major: stones report their own color, empty
/// points are tinted by influence beyond [`INFLUENCE_THRESHOLD`].
pub fn influence_control(board: &Board) -> Vec<Option<Color>> {
    let influence = influence_map(board);
    board
        .points()
        .map(|p| match board.get(p) {
            Some(stone) => Some(stone),
            None => {
                let v = influence.get(p);
                if v > INFLUENCE_THRESHOLD {
                    Some(Color::Black)
                } else if v < -INFLUENCE_THRESHOLD {
                    Some(Color::White)
                } else {
                    None
                }
            }
        })
        .collect()
}

// =============================================================================
// Cache
// =============================================================================

/// Memoizes the territory map of the last board it was asked about.
///
/// Boards are compared by content, so a clone of the cached board hits.
#[derive(Debug, Default)]
pub struct TerritoryCache {
    entry: Option<(Board, TerritoryMap)>,
    hits: u64,
    misses: u64,
}

impl TerritoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Territory map for `board`, recomputed only if the board changed.
    pub fn territory_map(&mut self, board: &Board) -> &TerritoryMap {
        let stale = match &self.entry {
            Some((snapshot, _)) => snapshot != board,
            None => true,
        };
        if stale {
            self.misses += 1;
            self.entry = None;
            debug!(misses = self.misses, "territory recomputed");
        } else {
            self.hits += 1;
            debug!(hits = self.hits, "territory cache hit");
        }
        let (_, map) = self
            .entry
            .get_or_insert_with(|| (board.clone(), territory_map(board)));
        map
    }

    /// Drop the cached entry, e.g. after a board size change.
    pub fn invalidate(&mut self) {
        self.entry = None;
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }
}

// =============================================================================
// Diffing
// =============================================================================

/// The move that triggered a territory recomputation.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MoveContext {
    pub color: Color,
    pub point: Point,
    /// Number of stones the move captured
    pub captured: usize,
}

/// Ownership change at a single point.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TerritoryTransition {
    pub point: Point,
    pub previous: Option<Color>,
    pub next: Option<Color>,
}

/// Differences between two territory maps.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TerritoryChange {
    pub black_gain: usize,
    pub black_loss: usize,
    pub white_gain: usize,
    pub white_loss: usize,
    /// Points owned by Black in the new map
    pub black_total: usize,
    /// Points owned by White in the new map
    pub white_total: usize,
    /// Changed points in row-major order
    pub changes: Vec<TerritoryTransition>,
    pub message: String,
}

impl TerritoryChange {
    pub fn gain(&self, color: Color) -> usize {
        match color {
            Color::Black => self.black_gain,
            Color::White => self.white_gain,
        }
    }

    pub fn loss(&self, color: Color) -> usize {
        match color {
            Color::Black => self.black_loss,
            Color::White => self.white_loss,
        }
    }

    pub fn total(&self, color: Color) -> usize {
        match color {
            Color::Black => self.black_total,
            Color::White => self.white_total,
        }
    }

    pub fn net(&self, color: Color) -> isize {
        self.gain(color) as isize - self.loss(color) as isize
    }

    pub fn is_unchanged(&self) -> bool {
        self.changes.is_empty()
    }
}

/// Compare two maps point by point.
///
/// A point whose owner changed counts as a loss for the previous owner and a
/// gain for the new one. Points missing from `previous` (different sizes)
/// count as previously neutral.
pub fn diff_territory(
    previous: &TerritoryMap,
    next: &TerritoryMap,
    context: Option<&MoveContext>,
) -> TerritoryChange {
    let mut change = TerritoryChange {
        black_gain: 0,
        black_loss: 0,
        white_gain: 0,
        white_loss: 0,
        black_total: next.count(Color::Black),
        white_total: next.count(Color::White),
        changes: Vec::new(),
        message: String::new(),
    };

    for y in 0..next.size() {
        for x in 0..next.size() {
            let p = Point::new(x, y);
            let before = previous.owner(p);
            let after = next.owner(p);
            if before == after {
                continue;
            }
            match before {
                Some(Color::Black) => change.black_loss += 1,
                Some(Color::White) => change.white_loss += 1,
                None => {}
            }
            match after {
                Some(Color::Black) => change.black_gain += 1,
                Some(Color::White) => change.white_gain += 1,
                None => {}
            }
            change.changes.push(TerritoryTransition {
                point: p,
                previous: before,
                next: after,
            });
        }
    }

    change.message = territory_message(&change, context);
    change
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{n} {word}")
    } else {
        format!("{n} {word}s")
    }
}

fn territory_message(change: &TerritoryChange, context: Option<&MoveContext>) -> String {
    let totals = format!(
        "Current assessment: Black controls {}, White controls {}.",
        plural(change.black_total, "empty point"),
        plural(change.white_total, "empty point"),
    );

    let Some(ctx) = context else {
        if change.is_unchanged() {
            return format!("Territory reassessed with no significant change. {totals}");
        }
        return format!(
            "Territory reassessed. Black net {:+}, White net {:+}. {totals}",
            change.net(Color::Black),
            change.net(Color::White),
        );
    };

    let opponent = ctx.color.opponent();
    let gained = change.gain(ctx.color);
    let lost = change.loss(ctx.color);
    let opponent_gain = change.gain(opponent);

    let mut parts = Vec::new();
    if ctx.captured > 0 {
        parts.push(format!("captured {}", plural(ctx.captured, "stone")));
    }
    if gained > 0 {
        parts.push(format!("enclosed {}", plural(gained, "new point")));
    }
    if lost > 0 {
        parts.push(format!("gave up {}", plural(lost, "point")));
    } else if opponent_gain > 0 {
        parts.push(format!(
            "let {opponent} take control of {}",
            plural(opponent_gain, "point")
        ));
    }
    if parts.is_empty() {
        parts.push("reshaped the position without moving territory".to_string());
    }

    format!(
        "{} at {} {}. {totals}",
        ctx.color,
        ctx.point,
        parts.join(", ")
    )
}

// =============================================================================
// Highlights
// =============================================================================

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum HighlightKind {
    /// Neutral point became owned
    Gain,
    /// Owned point became neutral
    Loss,
    /// Point changed owner
    Flip,
}

/// A transient annotation of a territory change, shown until `expires_at`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TerritoryHighlight {
    pub point: Point,
    pub kind: HighlightKind,
    /// Owner the highlight is drawn for: the new owner, or the loser for a loss
    pub owner: Color,
    pub previous_owner: Option<Color>,
    pub expires_at: Instant,
}

impl TerritoryHighlight {
    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// Highlights for every transition in `change`. Recomputations without a
/// triggering move produce none.
pub fn territory_highlights(
    change: &TerritoryChange,
    context: Option<&MoveContext>,
    now: Instant,
) -> Vec<TerritoryHighlight> {
    if context.is_none() {
        return Vec::new();
    }
    let expires_at = now + HIGHLIGHT_DURATION;
    change
        .changes
        .iter()
        .filter_map(|t| {
            let (kind, owner) = match (t.previous, t.next) {
                (Some(prev), None) => (HighlightKind::Loss, prev),
                (None, Some(next)) => (HighlightKind::Gain, next),
                (Some(prev), Some(next)) if prev != next => (HighlightKind::Flip, next),
                _ => return None,
            };
            Some(TerritoryHighlight {
                point: t.point,
                kind,
                owner,
                previous_owner: t.previous,
                expires_at,
            })
        })
        .collect()
}
