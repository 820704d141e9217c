//! Board model: a fixed-size square grid of stones.
//!
//! Cells are stored row-major in a flat vector, so a [`Point`] maps to the
//! index `y * size + x`. The board has no rules of its own; legality and
//! captures live in [`crate::rules`].

use std::cmp::Ordering;
use std::fmt;

use crate::config::{BoardSize, ConfigError};
use crate::constants::{DELTA, EMPTY, STONE_BLACK, STONE_WHITE};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    Black,
    White,
}

impl Color {
    pub fn opponent(self) -> Color {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }

    /// Diagram character for a stone of this color.
    pub fn symbol(self) -> char {
        match self {
            Color::Black => STONE_BLACK,
            Color::White => STONE_WHITE,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Black => f.write_str("Black"),
            Color::White => f.write_str("White"),
        }
    }
}

/// A point on the board. `x` is the column, `y` the row (row 0 is the top).
///
/// Points order row-major: by `y`, then by `x`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: usize,
    pub y: usize,
}

impl Point {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Parse a GTP vertex such as `"D4"` on a board of the given size.
    ///
    /// Columns use letters A-T skipping I; rows count up from the bottom edge.
    /// Returns `None` for malformed or off-board vertices.
    pub fn parse_vertex(s: &str, size: usize) -> Option<Point> {
        let bytes = s.trim().as_bytes();
        if bytes.len() < 2 {
            return None;
        }

        let col_char = bytes[0].to_ascii_uppercase();
        if !col_char.is_ascii_uppercase() || col_char == b'I' {
            return None;
        }
        let mut x = (col_char - b'A') as usize;
        // Skip 'I' column (Go convention to avoid confusion with 'J')
        if col_char > b'I' {
            x -= 1;
        }

        let digits = &bytes[1..];
        if !digits.iter().all(u8::is_ascii_digit) {
            return None;
        }
        let row: usize = std::str::from_utf8(digits).ok()?.parse().ok()?;
        if x >= size || row == 0 || row > size {
            return None;
        }
        Some(Point::new(x, size - row))
    }

    /// Format as a GTP vertex on a board of the given size.
    pub fn vertex(self, size: usize) -> String {
        let mut c = b'A' + self.x as u8;
        if c >= b'I' {
            c += 1;
        }
        format!("{}{}", c as char, size - self.y)
    }
}

impl Ord for Point {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.y, self.x).cmp(&(other.y, other.x))
    }
}

impl PartialOrd for Point {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Square grid of cells, each empty or holding one stone.
///
/// Equality compares size and contents, so clones of a board compare equal
/// until one of them is modified.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    size: BoardSize,
    cells: Vec<Option<Color>>,
}

impl Board {
    pub fn new(size: BoardSize) -> Self {
        let n = size.get();
        Self {
            size,
            cells: vec![None; n * n],
        }
    }

    /// Parse a diagram of `X` (Black), `O` (White) and `.` (empty) rows.
    ///
    /// Whitespace inside a row is ignored, so the output of `Display` parses
    /// back. Blank lines are skipped.
    pub fn parse(diagram: &str) -> Result<Board, ConfigError> {
        let rows: Vec<Vec<char>> = diagram
            .lines()
            .map(|line| line.chars().filter(|c| !c.is_whitespace()).collect::<Vec<_>>())
            .filter(|row| !row.is_empty())
            .collect();

        let size = BoardSize::try_from(rows.len())?;
        let mut board = Board::new(size);
        for (y, row) in rows.iter().enumerate() {
            if row.len() != rows.len() {
                return Err(ConfigError::BadDiagram(format!(
                    "row {y} has {} points, expected {}",
                    row.len(),
                    rows.len()
                )));
            }
            for (x, &ch) in row.iter().enumerate() {
                let cell = match ch {
                    STONE_BLACK => Some(Color::Black),
                    STONE_WHITE => Some(Color::White),
                    EMPTY => None,
                    other => {
                        return Err(ConfigError::BadDiagram(format!(
                            "unexpected character {other:?} at ({x}, {y})"
                        )));
                    }
                };
                board.set(Point::new(x, y), cell);
            }
        }
        Ok(board)
    }

    /// Edge length.
    pub fn size(&self) -> usize {
        self.size.get()
    }

    pub fn board_size(&self) -> BoardSize {
        self.size
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x < self.size() && p.y < self.size()
    }

    /// Flat index of an on-board point.
    pub(crate) fn idx(&self, p: Point) -> usize {
        p.y * self.size() + p.x
    }

    /// Stone at `p`, or `None` if the point is empty or off the board.
    pub fn get(&self, p: Point) -> Option<Color> {
        if !self.contains(p) {
            return None;
        }
        self.cells[self.idx(p)]
    }

    pub fn is_empty_at(&self, p: Point) -> bool {
        self.contains(p) && self.cells[self.idx(p)].is_none()
    }

    /// Overwrite a single cell. Off-board points are ignored.
    pub fn set(&mut self, p: Point, cell: Option<Color>) {
        if !self.contains(p) {
            return;
        }
        let i = self.idx(p);
        self.cells[i] = cell;
    }

    /// On-board orthogonal neighbors of `p`.
    pub fn neighbors(&self, p: Point) -> impl Iterator<Item = Point> + use<> {
        let s = self.size() as isize;
        DELTA.into_iter().filter_map(move |(dx, dy)| {
            let nx = p.x as isize + dx;
            let ny = p.y as isize + dy;
            (nx >= 0 && nx < s && ny >= 0 && ny < s).then(|| Point::new(nx as usize, ny as usize))
        })
    }

    /// Every point in row-major order.
    pub fn points(&self) -> impl Iterator<Item = Point> + use<> {
        let s = self.size();
        (0..s * s).map(move |i| Point::new(i % s, i / s))
    }

    pub fn cells(&self) -> &[Option<Color>] {
        &self.cells
    }

    pub fn stone_count(&self, color: Color) -> usize {
        self.cells.iter().filter(|&&c| c == Some(color)).count()
    }

    pub fn is_clear(&self) -> bool {
        self.cells.iter().all(Option::is_none)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.size() {
            for x in 0..self.size() {
                let ch = match self.get(Point::new(x, y)) {
                    Some(color) => color.symbol(),
                    None => EMPTY,
                };
                write!(f, "{ch} ")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
