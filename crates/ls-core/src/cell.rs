//! Grid coordinates and sub-cell world positions.
//!
//! `Cell` is the identity of a map tile: equality and hashing are by the
//! coordinate pair and nothing else.  `WorldPos` is a finer position in
//! `CELL_SIZE` units per cell, used only where a target is a point rather
//! than a tile.

use std::fmt;

/// Sub-cell units per cell edge.
pub const CELL_SIZE: i32 = 1024;

// ── Cell ──────────────────────────────────────────────────────────────────────

/// An integer grid coordinate.  `y` grows southwards.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The cell displaced by `(dx, dy)`.
    #[inline]
    pub const fn offset(self, dx: i32, dy: i32) -> Cell {
        Cell { x: self.x + dx, y: self.y + dy }
    }

    /// Squared Euclidean distance in cells.  Two cells are *adjacent*
    /// (including diagonally) when this is ≤ 2.
    #[inline]
    pub fn distance_sq(self, other: Cell) -> i64 {
        let dx = (self.x - other.x) as i64;
        let dy = (self.y - other.y) as i64;
        dx * dx + dy * dy
    }

    /// King-move distance: number of 8-connected steps on an open field.
    #[inline]
    pub fn chebyshev(self, other: Cell) -> u32 {
        (self.x - other.x).unsigned_abs().max((self.y - other.y).unsigned_abs())
    }

    /// Number of 4-connected steps on an open field.
    #[inline]
    pub fn manhattan(self, other: Cell) -> u32 {
        (self.x - other.x).unsigned_abs() + (self.y - other.y).unsigned_abs()
    }

    /// `true` if `other` is this cell or one of its eight neighbours.
    #[inline]
    pub fn is_adjacent_or_same(self, other: Cell) -> bool {
        self.distance_sq(other) <= 2
    }

    /// World position of the cell's centre.
    #[inline]
    pub fn center(self) -> WorldPos {
        WorldPos {
            x: self.x * CELL_SIZE + CELL_SIZE / 2,
            y: self.y * CELL_SIZE + CELL_SIZE / 2,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

impl From<(i32, i32)> for Cell {
    #[inline]
    fn from((x, y): (i32, i32)) -> Self {
        Cell { x, y }
    }
}

// ── WorldPos ──────────────────────────────────────────────────────────────────

/// A fixed-point world position in `CELL_SIZE` sub-units per cell.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorldPos {
    pub x: i32,
    pub y: i32,
}

impl WorldPos {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The cell containing this position (floor division, so negative
    /// coordinates map to negative cells).
    #[inline]
    pub fn to_cell(self) -> Cell {
        Cell {
            x: self.x.div_euclid(CELL_SIZE),
            y: self.y.div_euclid(CELL_SIZE),
        }
    }
}

impl fmt::Display for WorldPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{},{}>", self.x, self.y)
    }
}
