//! Immutable tile map.
//!
//! Terrain is stored as a flat row-major `Vec<Terrain>`; a cell's index is
//! `y * width + x`.  The search in [`crate::search`] keys all of its per-cell
//! bookkeeping on that index, so the layout is part of the contract.

use ls_core::Cell;

use crate::terrain::{Cost, MoverProfile, Terrain};
use crate::{GridError, GridResult};

// ── Connectivity ──────────────────────────────────────────────────────────────

/// Which neighbours a step may reach.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum Connectivity {
    Four,
    #[default]
    Eight,
}

/// Neighbour offsets in fixed order: N, E, S, W, then NE, SE, SW, NW.
/// Search tie-breaking depends on this order; do not reorder.
const OFFSETS: [(i32, i32); 8] = [
    ( 0, -1),
    ( 1,  0),
    ( 0,  1),
    (-1,  0),
    ( 1, -1),
    ( 1,  1),
    (-1,  1),
    (-1, -1),
];

impl Connectivity {
    #[inline]
    fn offsets(self) -> &'static [(i32, i32)] {
        match self {
            Connectivity::Four  => &OFFSETS[..4],
            Connectivity::Eight => &OFFSETS,
        }
    }

    /// Minimum number of steps between two cells on an open map.
    #[inline]
    pub fn step_distance(self, a: Cell, b: Cell) -> u32 {
        match self {
            Connectivity::Four  => a.manhattan(b),
            Connectivity::Eight => a.chebyshev(b),
        }
    }
}

// ── Occupancy ─────────────────────────────────────────────────────────────────

/// Dynamic blocking, supplied by the caller for one search.
///
/// The grid never stores which cells other actors stand on.  Closures
/// `Fn(Cell) -> bool` implement this trait directly.
pub trait Occupancy {
    fn is_blocked(&self, cell: Cell) -> bool;
}

impl<F: Fn(Cell) -> bool> Occupancy for F {
    #[inline]
    fn is_blocked(&self, cell: Cell) -> bool {
        self(cell)
    }
}

// ── Grid ──────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Grid {
    width:        i32,
    height:       i32,
    connectivity: Connectivity,
    terrain:      Vec<Terrain>,
}

impl Grid {
    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    #[inline]
    pub fn connectivity(&self) -> Connectivity {
        self.connectivity
    }

    #[inline]
    pub fn cell_count(&self) -> usize {
        self.terrain.len()
    }

    #[inline]
    pub fn in_bounds(&self, cell: Cell) -> bool {
        cell.x >= 0 && cell.y >= 0 && cell.x < self.width && cell.y < self.height
    }

    /// Row-major index of `cell`, or `None` outside the map.
    #[inline]
    pub fn index(&self, cell: Cell) -> Option<usize> {
        self.in_bounds(cell)
            .then(|| cell.y as usize * self.width as usize + cell.x as usize)
    }

    /// Inverse of [`index`](Self::index).  `index` must be `< cell_count()`.
    #[inline]
    pub fn cell_at(&self, index: usize) -> Cell {
        let w = self.width as usize;
        Cell::new((index % w) as i32, (index / w) as i32)
    }

    #[inline]
    pub fn terrain(&self, cell: Cell) -> Option<Terrain> {
        self.index(cell).map(|i| self.terrain[i])
    }

    /// Whether `profile` may ever stand on `cell`, ignoring other actors.
    #[inline]
    pub fn is_passable(&self, cell: Cell, profile: &MoverProfile) -> bool {
        self.terrain(cell).is_some_and(|t| profile.can_enter(t))
    }

    /// Cost for `profile` to step into `cell`.
    #[inline]
    pub fn entry_cost(&self, cell: Cell, profile: &MoverProfile) -> Option<Cost> {
        self.terrain(cell).and_then(|t| profile.entry_cost(t))
    }

    /// Cost of a single step `from → to`.
    ///
    /// `None` when the cells are not neighbours under this map's
    /// connectivity, when either is off the map, or when `to` is impassable.
    pub fn step_cost(&self, from: Cell, to: Cell, profile: &MoverProfile) -> Option<Cost> {
        if !self.in_bounds(from) || !self.are_neighbors(from, to) {
            return None;
        }
        self.entry_cost(to, profile)
    }

    #[inline]
    pub fn are_neighbors(&self, a: Cell, b: Cell) -> bool {
        a != b && self.connectivity.step_distance(a, b) == 1
    }

    /// Lower bound on the number of steps between `a` and `b`: Chebyshev on
    /// 8-connected maps, Manhattan on 4-connected ones.
    #[inline]
    pub fn distance_estimate(&self, a: Cell, b: Cell) -> u32 {
        self.connectivity.step_distance(a, b)
    }

    /// In-bounds neighbours of `cell` in fixed N, E, S, W, NE, SE, SW, NW order.
    pub fn neighbors(&self, cell: Cell) -> impl Iterator<Item = Cell> + '_ {
        self.connectivity
            .offsets()
            .iter()
            .map(move |&(dx, dy)| cell.offset(dx, dy))
            .filter(move |&c| self.in_bounds(c))
    }

    /// Every in-bounds cell in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.cell_count()).map(|i| self.cell_at(i))
    }

    /// Render the terrain back to glyph rows (inverse of `from_rows`).
    pub fn to_rows(&self) -> Vec<String> {
        self.terrain
            .chunks(self.width as usize)
            .map(|row| row.iter().map(|t| t.glyph()).collect())
            .collect()
    }
}

// ── GridBuilder ───────────────────────────────────────────────────────────────

/// Incrementally paints terrain and produces a [`Grid`].
///
/// ```
/// use ls_grid::{Connectivity, GridBuilder, Terrain};
/// use ls_core::Cell;
///
/// let grid = GridBuilder::new(4, 3, Connectivity::Eight)
///     .set(Cell::new(1, 1), Terrain::Water)
///     .build()
///     .unwrap();
/// assert_eq!(grid.terrain(Cell::new(1, 1)), Some(Terrain::Water));
/// ```
pub struct GridBuilder {
    width:        i32,
    height:       i32,
    connectivity: Connectivity,
    terrain:      Vec<Terrain>,
    error:        Option<GridError>,
}

impl GridBuilder {
    /// An all-`Clear` map.
    pub fn new(width: i32, height: i32, connectivity: Connectivity) -> Self {
        let (w, h) = (width.max(0), height.max(0));
        Self {
            width,
            height,
            connectivity,
            terrain: vec![Terrain::Clear; w as usize * h as usize],
            error: None,
        }
    }

    /// Paint one cell.  Out-of-bounds cells are reported by `build`.
    pub fn set(mut self, cell: Cell, terrain: Terrain) -> Self {
        self.paint(cell, terrain);
        self
    }

    /// Paint the inclusive rectangle spanned by `a` and `b`.
    pub fn fill_rect(mut self, a: Cell, b: Cell, terrain: Terrain) -> Self {
        for y in a.y.min(b.y)..=a.y.max(b.y) {
            for x in a.x.min(b.x)..=a.x.max(b.x) {
                self.paint(Cell::new(x, y), terrain);
            }
        }
        self
    }

    fn paint(&mut self, cell: Cell, terrain: Terrain) {
        let in_bounds =
            cell.x >= 0 && cell.y >= 0 && cell.x < self.width && cell.y < self.height;
        if in_bounds {
            self.terrain[cell.y as usize * self.width as usize + cell.x as usize] = terrain;
        } else if self.error.is_none() {
            self.error = Some(GridError::OutOfBounds(cell));
        }
    }

    /// Parse glyph rows: `.` clear, `=` road, `^` rough, `~` water, `#` cliff.
    ///
    /// Whitespace inside a row is ignored so maps may be written with spaces
    /// between columns.
    pub fn from_rows<S: AsRef<str>>(rows: &[S], connectivity: Connectivity) -> GridResult<Grid> {
        let mut terrain = Vec::new();
        let mut width: Option<usize> = None;

        for (y, row) in rows.iter().enumerate() {
            let before = terrain.len();
            for c in row.as_ref().chars().filter(|c| !c.is_whitespace()) {
                let t = Terrain::from_glyph(c).ok_or_else(|| {
                    GridError::Parse(format!("unknown terrain glyph {c:?} in row {y}"))
                })?;
                terrain.push(t);
            }
            let len = terrain.len() - before;
            match width {
                None => width = Some(len),
                Some(w) if w != len => {
                    return Err(GridError::Parse(format!(
                        "row {y} has {len} cells, expected {w}"
                    )));
                }
                Some(_) => {}
            }
        }

        let width = width.unwrap_or(0);
        GridBuilder {
            width: width as i32,
            height: rows.len() as i32,
            connectivity,
            terrain,
            error: None,
        }
        .build()
    }

    pub fn build(self) -> GridResult<Grid> {
        if let Some(err) = self.error {
            return Err(err);
        }
        if self.width <= 0 || self.height <= 0 {
            return Err(GridError::Parse(format!(
                "map must be non-empty, got {}x{}",
                self.width, self.height
            )));
        }
        Ok(Grid {
            width:        self.width,
            height:       self.height,
            connectivity: self.connectivity,
            terrain:      self.terrain,
        })
    }
}
