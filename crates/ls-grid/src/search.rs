//! Deterministic best-first search over a [`Grid`].
//!
//! # Modes
//!
//! * **Single-source** ([`PathSearch::find_path`]): A* from one or more root
//!   cells until a goal cell is popped.  With [`Heuristic::Zero`] this is
//!   uniform-cost search.
//! * **Bidirectional** ([`find_bidi_path`]): a forward search from the mover
//!   and a [`reverse`](PathSearch::reverse) search from the destination
//!   cells, advanced one expansion each in turn.  Whenever one side expands a
//!   cell the other side has already discovered, `g_fwd + g_bwd` is a meeting
//!   candidate.  The search stops once the best candidate can no longer be
//!   beaten by either frontier, so the returned cost always equals the
//!   single-source optimum.
//!
//! # Tie-breaking
//!
//! Every cell is given a discovery sequence number the first time it is
//! reached and keeps it for the rest of the search.  The open set is a
//! `BinaryHeap<Reverse<(f, seq, ..)>>`, so among equal-`f` cells the one
//! discovered first is expanded first.  Neighbours are discovered in the
//! grid's fixed neighbour order, which makes every result reproducible.
//!
//! # Reverse costs
//!
//! A reverse search walks edges backwards.  Relaxing `cell → n` models the
//! mover stepping `n → cell`, so it charges the entry cost of `cell`.  That
//! way `g_fwd(m) + g_bwd(m)` is exactly the forward cost of the joined route.
//! Roots of a reverse search must be cells the mover can stand on.
//!
//! Heuristics must be consistent (never drop by more than one step's cost
//! between neighbours).  Closed cells are never reopened.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use ls_core::Cell;

use crate::grid::{Grid, Occupancy};
use crate::terrain::{Cost, MoverProfile};
use crate::{GridError, GridResult};

const UNSEEN: Cost = Cost::MAX;
const NO_PARENT: u32 = u32::MAX;

// ── Route ─────────────────────────────────────────────────────────────────────

/// Ordered cells from the start to the goal, start included.
///
/// Never empty.  A start that already satisfies the goal yields a one-cell
/// route with cost 0.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Route {
    cells:      Vec<Cell>,
    total_cost: Cost,
}

impl Route {
    fn new(cells: Vec<Cell>, total_cost: Cost) -> Self {
        debug_assert!(!cells.is_empty());
        Self { cells, total_cost }
    }

    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// The cells to walk, start excluded.
    #[inline]
    pub fn without_start(&self) -> &[Cell] {
        &self.cells[1..]
    }

    #[inline]
    pub fn total_cost(&self) -> Cost {
        self.total_cost
    }

    /// Number of cells including the start.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// `true` if the start is also the goal.
    #[inline]
    pub fn is_trivial(&self) -> bool {
        self.cells.len() <= 1
    }

    #[inline]
    pub fn start(&self) -> Cell {
        self.cells[0]
    }

    #[inline]
    pub fn goal(&self) -> Cell {
        self.cells[self.cells.len() - 1]
    }

    pub fn into_cells(self) -> Vec<Cell> {
        self.cells
    }
}

// ── Heuristic / goal ──────────────────────────────────────────────────────────

/// Estimated remaining cost from a cell.
pub enum Heuristic<'a> {
    /// Uniform-cost search.
    Zero,
    /// Step distance to the nearest of these cells, scaled by the mover's
    /// cheapest step.  Admissible and consistent.
    Toward(Vec<Cell>),
    Custom(Box<dyn Fn(Cell) -> Cost + 'a>),
}

enum Goal<'a> {
    /// Goal is wherever the heuristic reaches zero.
    Unset,
    /// Sorted, deduplicated.
    Cells(Vec<Cell>),
    Predicate(Box<dyn Fn(Cell) -> bool + 'a>),
}

// ── PathSearch ────────────────────────────────────────────────────────────────

#[derive(Copy, Clone)]
struct Node {
    g:      Cost,
    parent: u32,
    seq:    u32,
    closed: bool,
}

impl Node {
    const FRESH: Node = Node { g: UNSEEN, parent: NO_PARENT, seq: 0, closed: false };

    #[inline]
    fn seen(&self) -> bool {
        self.g != UNSEEN
    }
}

/// One search invocation.  Configure with the builder methods, then call
/// [`find_path`](Self::find_path) or pass two searches to [`find_bidi_path`].
///
/// ```
/// use ls_core::Cell;
/// use ls_grid::{Connectivity, GridBuilder, MoverProfile, PathSearch};
///
/// let grid = GridBuilder::new(5, 5, Connectivity::Eight).build().unwrap();
/// let profile = MoverProfile::infantry();
/// let route = PathSearch::from_cell(&grid, &profile, Cell::new(0, 0))
///     .toward([Cell::new(4, 4)])
///     .find_path()
///     .unwrap();
/// assert_eq!(route.len(), 5);
/// ```
pub struct PathSearch<'a> {
    grid:      &'a Grid,
    profile:   &'a MoverProfile,
    roots:     Vec<Cell>,
    reverse:   bool,
    heuristic: Heuristic<'a>,
    h_step:    Cost,
    goal:      Goal<'a>,
    blocked:   Option<&'a dyn Occupancy>,
    limit:     Option<usize>,

    // Per-cell state, indexed by `Grid::index`.
    nodes:    Vec<Node>,
    // (f, discovery seq, cell index, g): stale entries are skipped on pop.
    open:     BinaryHeap<Reverse<(Cost, u32, u32, Cost)>>,
    next_seq: u32,
    expanded: usize,
    primed:   bool,
}

impl<'a> PathSearch<'a> {
    pub fn from_cell(grid: &'a Grid, profile: &'a MoverProfile, start: Cell) -> Self {
        Self::from_cells(grid, profile, [start])
    }

    /// Multiple roots, all at cost 0.  Off-map roots are ignored.
    pub fn from_cells(
        grid: &'a Grid,
        profile: &'a MoverProfile,
        roots: impl IntoIterator<Item = Cell>,
    ) -> Self {
        Self {
            grid,
            profile,
            roots: roots.into_iter().collect(),
            reverse: false,
            heuristic: Heuristic::Zero,
            h_step: profile.min_step_cost(),
            goal: Goal::Unset,
            blocked: None,
            limit: None,
            nodes: Vec::new(),
            open: BinaryHeap::new(),
            next_seq: 0,
            expanded: 0,
            primed: false,
        }
    }

    /// Search from the destination back toward the mover.  Routes come out
    /// in travel order (the goal cell first).
    pub fn reverse(mut self) -> Self {
        self.reverse = true;
        self
    }

    /// Aim at a set of goal cells with the distance heuristic.
    pub fn toward(mut self, goals: impl IntoIterator<Item = Cell>) -> Self {
        let mut cells: Vec<Cell> = goals.into_iter().collect();
        cells.sort_unstable();
        cells.dedup();
        self.heuristic = Heuristic::Toward(cells.clone());
        self.goal = Goal::Cells(cells);
        self
    }

    /// Replace the heuristic.  Does not change an explicit goal.
    pub fn heuristic(mut self, heuristic: Heuristic<'a>) -> Self {
        self.heuristic = heuristic;
        self
    }

    /// Replace the goal test with a predicate.
    pub fn goal(mut self, is_goal: impl Fn(Cell) -> bool + 'a) -> Self {
        self.goal = Goal::Predicate(Box::new(is_goal));
        self
    }

    /// Treat cells reported blocked by `occupancy` as impassable for this
    /// search only.
    pub fn check_blocked(mut self, occupancy: &'a dyn Occupancy) -> Self {
        self.blocked = Some(occupancy);
        self
    }

    /// Give up with [`GridError::SearchBudgetExhausted`] after `n` expansions.
    pub fn expansion_limit(mut self, n: usize) -> Self {
        self.limit = Some(n);
        self
    }

    /// Cells expanded so far.
    #[inline]
    pub fn expanded(&self) -> usize {
        self.expanded
    }

    #[inline]
    pub fn is_reverse(&self) -> bool {
        self.reverse
    }

    /// Run to the first goal cell.
    pub fn find_path(&mut self) -> GridResult<Route> {
        self.prime();
        loop {
            let Some(idx) = self.pop_next()? else {
                return Err(GridError::NoPath { from: self.origin() });
            };
            if self.is_goal(self.grid.cell_at(idx)) {
                let cells = self.chain(idx);
                let cost = self.nodes[idx].g;
                let cells = if self.reverse { cells } else { cells.into_iter().rev().collect() };
                return Ok(Route::new(cells, cost));
            }
            self.relax(idx);
        }
    }

    // ── internals ───────────────────────────────────────────────────────────

    fn origin(&self) -> Cell {
        self.roots.first().copied().unwrap_or_default()
    }

    fn prime(&mut self) {
        if self.primed {
            return;
        }
        self.primed = true;
        self.nodes = vec![Node::FRESH; self.grid.cell_count()];
        let grid = self.grid;
        for i in 0..self.roots.len() {
            if let Some(idx) = grid.index(self.roots[i]) {
                if !self.nodes[idx].seen() {
                    self.discover(idx, 0, NO_PARENT);
                }
            }
        }
    }

    fn h(&self, cell: Cell) -> Cost {
        match &self.heuristic {
            Heuristic::Zero => 0,
            Heuristic::Toward(targets) => targets
                .iter()
                .map(|&t| self.grid.distance_estimate(cell, t))
                .min()
                .map_or(0, |d| d.saturating_mul(self.h_step)),
            Heuristic::Custom(f) => f(cell),
        }
    }

    fn is_goal(&self, cell: Cell) -> bool {
        match &self.goal {
            Goal::Unset => self.h(cell) == 0,
            _ => self.is_explicit_goal(cell),
        }
    }

    fn is_explicit_goal(&self, cell: Cell) -> bool {
        match &self.goal {
            Goal::Unset => false,
            Goal::Cells(cells) => cells.binary_search(&cell).is_ok(),
            Goal::Predicate(p) => p(cell),
        }
    }

    #[inline]
    fn can_stand(&self, cell: Cell) -> bool {
        self.grid.is_passable(cell, self.profile)
            && !self.blocked.is_some_and(|o| o.is_blocked(cell))
    }

    fn discover(&mut self, idx: usize, g: Cost, parent: u32) {
        let f = g.saturating_add(self.h(self.grid.cell_at(idx)));
        let node = &mut self.nodes[idx];
        if !node.seen() {
            node.seq = self.next_seq;
            self.next_seq += 1;
        }
        node.g = g;
        node.parent = parent;
        self.open.push(Reverse((f, node.seq, idx as u32, g)));
    }

    /// Top of the open set after discarding stale entries.
    fn peek_live(&mut self) -> Option<(Cost, usize)> {
        while let Some(&Reverse((f, _, idx, g))) = self.open.peek() {
            let node = self.nodes[idx as usize];
            if node.closed || node.g != g {
                self.open.pop();
                continue;
            }
            return Some((f, idx as usize));
        }
        None
    }

    /// Smallest `f` still on the frontier; `None` once exhausted.
    fn lower_bound(&mut self) -> Option<Cost> {
        self.peek_live().map(|(f, _)| f)
    }

    /// Close and return the best frontier cell.
    fn pop_next(&mut self) -> GridResult<Option<usize>> {
        let Some((_, idx)) = self.peek_live() else {
            return Ok(None);
        };
        if self.limit.is_some_and(|l| self.expanded >= l) {
            return Err(GridError::SearchBudgetExhausted {
                from:     self.origin(),
                expanded: self.expanded,
            });
        }
        self.open.pop();
        self.nodes[idx].closed = true;
        self.expanded += 1;
        Ok(Some(idx))
    }

    fn relax(&mut self, idx: usize) {
        let grid = self.grid;
        let cell = grid.cell_at(idx);
        let g = self.nodes[idx].g;

        // Reverse: every edge into `cell` costs entering `cell`.
        let reverse_step = if self.reverse {
            match grid.entry_cost(cell, self.profile) {
                Some(c) => Some(c),
                None => return,
            }
        } else {
            None
        };

        for n in grid.neighbors(cell) {
            let Some(nidx) = grid.index(n) else { continue };
            if self.nodes[nidx].closed {
                continue;
            }
            let step = match reverse_step {
                Some(c) => {
                    if !self.can_stand(n) && !self.is_explicit_goal(n) {
                        continue;
                    }
                    c
                }
                None => {
                    if !self.can_stand(n) {
                        continue;
                    }
                    match grid.entry_cost(n, self.profile) {
                        Some(c) => c,
                        None => continue,
                    }
                }
            };
            let ng = g.saturating_add(step);
            if ng < self.nodes[nidx].g {
                self.discover(nidx, ng, idx as u32);
            }
        }
    }

    fn expand(&mut self) -> GridResult<Option<usize>> {
        let next = self.pop_next()?;
        if let Some(idx) = next {
            self.relax(idx);
        }
        Ok(next)
    }

    /// Cells from `idx` back to its root, `idx` first.
    fn chain(&self, idx: usize) -> Vec<Cell> {
        let mut cells = Vec::new();
        let mut cur = idx as u32;
        while cur != NO_PARENT {
            cells.push(self.grid.cell_at(cur as usize));
            cur = self.nodes[cur as usize].parent;
        }
        cells
    }
}

// ── Bidirectional ─────────────────────────────────────────────────────────────

/// Run `forward` (from the mover) and `backward` (a
/// [`reverse`](PathSearch::reverse) search from the destination cells)
/// against each other.
///
/// Both searches must be built over the same grid.  The result has the same
/// total cost a single-source search over the same inputs would return.
pub fn find_bidi_path<'a>(
    forward: &mut PathSearch<'a>,
    backward: &mut PathSearch<'a>,
) -> GridResult<Route> {
    debug_assert!(!forward.reverse && backward.reverse);
    debug_assert_eq!(forward.grid.cell_count(), backward.grid.cell_count());

    forward.prime();
    backward.prime();

    // (g_fwd + g_bwd, meeting cell index)
    let mut best: Option<(Cost, usize)> = None;
    let mut forward_turn = true;

    loop {
        let (Some(lf), Some(lb)) = (forward.lower_bound(), backward.lower_bound()) else {
            break;
        };
        if best.is_some_and(|(mu, _)| mu <= lf.max(lb)) {
            break;
        }

        let (side, other) = if forward_turn {
            (&mut *forward, &*backward)
        } else {
            (&mut *backward, &*forward)
        };
        if let Some(idx) = side.expand()? {
            let other_g = other.nodes[idx].g;
            if other_g != UNSEEN {
                let total = side.nodes[idx].g.saturating_add(other_g);
                if best.is_none_or(|(mu, _)| total < mu) {
                    best = Some((total, idx));
                }
            }
        }
        forward_turn = !forward_turn;
    }

    let Some((_, meet)) = best else {
        return Err(GridError::NoPath { from: forward.origin() });
    };

    let mut cells = forward.chain(meet);
    cells.reverse();
    cells.extend(backward.chain(meet).into_iter().skip(1));
    let cost = forward.nodes[meet].g.saturating_add(backward.nodes[meet].g);
    Ok(Route::new(cells, cost))
}
