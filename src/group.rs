//! Connectivity engine: groups of connected stones and their liberties.
//!
//! Traversals use an explicit stack and flat-index `Vec<bool>` visited sets,
//! so a full-board group costs O(size²) with no recursion.

use std::collections::BTreeSet;

use crate::board::{Board, Color, Point};

/// A maximal set of same-color stones connected orthogonally.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Group {
    pub color: Color,
    /// Member stones, in traversal order
    pub stones: Vec<Point>,
    /// Empty points adjacent to any member, each counted once
    pub liberties: BTreeSet<Point>,
}

impl Group {
    pub fn liberty_count(&self) -> usize {
        self.liberties.len()
    }

    pub fn size(&self) -> usize {
        self.stones.len()
    }

    pub fn contains(&self, p: Point) -> bool {
        self.stones.contains(&p)
    }

    pub fn in_atari(&self) -> bool {
        self.liberties.len() == 1
    }
}

/// The group containing the stone at `p`, or `None` if `p` is empty or off
/// the board.
pub fn group_at(board: &Board, p: Point) -> Option<Group> {
    let color = board.get(p)?;
    let n = board.size() * board.size();
    let mut visited = vec![false; n];
    let mut liberty_seen = vec![false; n];
    let mut stones = Vec::new();
    let mut liberties = BTreeSet::new();
    let mut stack = vec![p];
    visited[board.idx(p)] = true;

    while let Some(pt) = stack.pop() {
        stones.push(pt);
        for nb in board.neighbors(pt) {
            let ni = board.idx(nb);
            match board.get(nb) {
                None => {
                    if !liberty_seen[ni] {
                        liberty_seen[ni] = true;
                        liberties.insert(nb);
                    }
                }
                Some(c) if c == color && !visited[ni] => {
                    visited[ni] = true;
                    stack.push(nb);
                }
                _ => {}
            }
        }
    }

    Some(Group {
        color,
        stones,
        liberties,
    })
}

/// Every group on the board, each exactly once, ordered by the row-major
/// position of its first-encountered stone.
pub fn all_groups(board: &Board) -> Vec<Group> {
    let mut covered = vec![false; board.cells().len()];
    let mut groups = Vec::new();

    for p in board.points() {
        let i = board.idx(p);
        if covered[i] {
            continue;
        }
        if let Some(group) = group_at(board, p) {
            for &s in &group.stones {
                covered[board.idx(s)] = true;
            }
            groups.push(group);
        }
    }
    groups
}

/// True if no group on the board is without liberties.
///
/// Every board reachable through legal play satisfies this.
pub fn is_capture_clean(board: &Board) -> bool {
    all_groups(board).iter().all(|g| g.liberty_count() > 0)
}

/// Lookup table from each stone to its group.
pub struct GroupIndex {
    groups: Vec<Group>,
    /// Group id per flat board index, `None` for empty points
    owner: Vec<Option<usize>>,
    size: usize,
}

impl GroupIndex {
    pub fn new(board: &Board) -> Self {
        let groups = all_groups(board);
        let mut owner = vec![None; board.cells().len()];
        for (id, group) in groups.iter().enumerate() {
            for &s in &group.stones {
                owner[board.idx(s)] = Some(id);
            }
        }
        Self {
            groups,
            owner,
            size: board.size(),
        }
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    /// Group containing the stone at `p`.
    pub fn group(&self, p: Point) -> Option<&Group> {
        if p.x >= self.size || p.y >= self.size {
            return None;
        }
        self.owner[p.y * self.size + p.x].map(|id| &self.groups[id])
    }

    /// Liberty count of the group at `p`; 0 for an empty point.
    pub fn liberty_count(&self, p: Point) -> usize {
        self.group(p).map_or(0, Group::liberty_count)
    }

    /// Liberties of the group at `p` in row-major order; empty for an empty point.
    pub fn liberties(&self, p: Point) -> Vec<Point> {
        self.group(p)
            .map(|g| g.liberties.iter().copied().collect())
            .unwrap_or_default()
    }
}
