//! The A* open/closed-set loop.
//!
//! The engine follows a fixed selection policy rather than textbook A*:
//!
//! - Every neighbor of the expanded node gets its costs recomputed from the
//!   expanded node, overwriting whatever it held before (unless
//!   [`SearchOptions::relax`] is set). Closed nodes keep their costs.
//! - The next node is the open node with the lowest total cost, ties broken
//!   by the lowest `h`, then by insertion order.
//! - A node's parent is chosen when it is selected: the already-closed
//!   neighbor with the lowest `g`. Parents are therefore always adjacent.

use std::fmt;

use astar_core::{Coord, Grid, NodeId};

use crate::distance::Metric;

/// Tunables for one search.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SearchOptions {
    /// Distance used for both step costs and the heuristic.
    pub metric: Metric,
    /// Maximum number of expansions before giving up. `None` means no limit.
    pub max_iterations: Option<usize>,
    /// Only lower an open node's `g` instead of overwriting it on every
    /// expansion.
    pub relax: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            metric: Metric::Euclidean,
            max_iterations: None,
            relax: false,
        }
    }
}

/// Why a search stopped without reaching the end.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum FailureReason {
    /// The open set ran dry.
    NoPathExists,
    /// [`SearchOptions::max_iterations`] was reached.
    BudgetExceeded,
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureReason::NoPathExists => f.write_str("no solution possible"),
            FailureReason::BudgetExceeded => f.write_str("iteration budget exceeded"),
        }
    }
}

/// Lifecycle of a [`SearchEngine`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SearchState {
    Running,
    Succeeded,
    Failed(FailureReason),
}

/// Runs A* over a [`Grid`], writing costs, visited flags and parent links
/// into its nodes.
///
/// The grid's search state is reset on construction. Once the engine is
/// dropped the parent links stay in the grid for
/// [`reconstruct`](crate::reconstruct).
pub struct SearchEngine<'g> {
    grid: &'g mut Grid,
    options: SearchOptions,
    open: Vec<NodeId>,
    in_open: Vec<bool>,
    // Costed at least once; only consulted by the relaxing policy.
    discovered: Vec<bool>,
    closed: Vec<NodeId>,
    current: NodeId,
    state: SearchState,
    iterations: usize,
    nbuf: Vec<NodeId>,
}

impl<'g> SearchEngine<'g> {
    pub fn new(grid: &'g mut Grid, options: SearchOptions) -> Self {
        grid.reset_search();
        let start = grid.start();
        let h = options.metric.distance(grid.start_coord(), grid.end_coord());
        {
            let node = grid.node_mut(start);
            node.g_cost = 0.0;
            node.h_cost = h;
        }
        let len = grid.len();
        let mut discovered = vec![false; len];
        discovered[start] = true;
        Self {
            grid,
            options,
            open: Vec::new(),
            in_open: vec![false; len],
            discovered,
            closed: Vec::new(),
            current: start,
            state: SearchState::Running,
            iterations: 0,
            nbuf: Vec::with_capacity(8),
        }
    }

    #[inline]
    pub fn state(&self) -> SearchState {
        self.state
    }

    /// Number of expansions performed so far.
    #[inline]
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Coordinate of the node being expanded next (or the end, once
    /// succeeded).
    #[inline]
    pub fn current(&self) -> Coord {
        self.grid.coord(self.current)
    }

    #[inline]
    pub fn open_len(&self) -> usize {
        self.open.len()
    }

    #[inline]
    pub fn closed_len(&self) -> usize {
        self.closed.len()
    }

    /// Closed nodes in the order they were finalized.
    pub fn closed(&self) -> impl Iterator<Item = Coord> + '_ {
        self.closed.iter().map(|&id| self.grid.coord(id))
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &*self.grid
    }

    /// Drive the search until it succeeds or fails.
    pub fn run(&mut self) -> SearchState {
        while self.state == SearchState::Running {
            self.step();
        }
        log::debug!(
            "search finished: {:?} after {} iterations ({} closed, {} open)",
            self.state,
            self.iterations,
            self.closed.len(),
            self.open.len()
        );
        self.state
    }

    /// Perform one expansion of the current node.
    ///
    /// Does nothing once the search has left [`SearchState::Running`].
    pub fn step(&mut self) -> SearchState {
        if self.state != SearchState::Running {
            return self.state;
        }
        if let Some(max) = self.options.max_iterations {
            if self.iterations >= max {
                self.state = SearchState::Failed(FailureReason::BudgetExceeded);
                return self.state;
            }
        }
        self.iterations += 1;

        let current = self.current;
        let mut nbuf = std::mem::take(&mut self.nbuf);
        nbuf.clear();
        nbuf.extend_from_slice(self.grid.neighbors_of(current));

        self.open_neighbors(&nbuf);
        self.update_costs(current, &nbuf);
        self.nbuf = nbuf;

        self.close(current);

        let Some(next) = self.select_next() else {
            self.state = SearchState::Failed(FailureReason::NoPathExists);
            return self.state;
        };

        let parent = self.cheapest_closed_neighbor(next);
        self.grid.node_mut(next).parent = parent;
        log::trace!(
            "iteration {}: {} -> {}",
            self.iterations,
            self.grid.coord(current),
            self.grid.coord(next)
        );

        self.current = next;
        if next == self.grid.end() {
            self.state = SearchState::Succeeded;
        }
        self.state
    }

    fn open_neighbors(&mut self, neighbors: &[NodeId]) {
        let start = self.grid.start();
        for &n in neighbors {
            if n == start || self.in_open[n] || self.grid.node(n).visited {
                continue;
            }
            self.in_open[n] = true;
            self.open.push(n);
        }
    }

    fn update_costs(&mut self, current: NodeId, neighbors: &[NodeId]) {
        let metric = self.options.metric;
        let start = self.grid.start();
        let end = self.grid.end_coord();
        let from = self.grid.coord(current);
        let current_g = self.grid.node(current).g_cost;

        for &n in neighbors {
            let node = self.grid.node_mut(n);
            if node.visited {
                continue;
            }
            let to = node.coord();
            let g = if n == start {
                0.0
            } else {
                current_g + metric.distance(from, to)
            };
            node.h_cost = metric.distance(to, end);
            if !self.options.relax || !self.discovered[n] || g < node.g_cost {
                node.g_cost = g;
            }
            self.discovered[n] = true;
        }
    }

    fn close(&mut self, id: NodeId) {
        self.grid.node_mut(id).visited = true;
        self.closed.push(id);
        if self.in_open[id] {
            self.in_open[id] = false;
            if let Some(pos) = self.open.iter().position(|&n| n == id) {
                self.open.remove(pos);
            }
        }
    }

    /// Open node with the lowest total cost, then lowest `h`. `min_by`
    /// keeps the first of equal elements, so remaining ties go to the
    /// earliest inserted node.
    fn select_next(&self) -> Option<NodeId> {
        let grid = &*self.grid;
        self.open.iter().copied().min_by(|&a, &b| {
            let (na, nb) = (grid.node(a), grid.node(b));
            na.total_cost()
                .total_cmp(&nb.total_cost())
                .then(na.h_cost.total_cmp(&nb.h_cost))
        })
    }

    fn cheapest_closed_neighbor(&mut self, id: NodeId) -> Option<NodeId> {
        let mut nbuf = std::mem::take(&mut self.nbuf);
        nbuf.clear();
        nbuf.extend_from_slice(self.grid.neighbors_of(id));
        let grid = &*self.grid;
        let best = nbuf
            .iter()
            .copied()
            .filter(|&n| grid.node(n).visited)
            .min_by(|&a, &b| grid.node(a).g_cost.total_cmp(&grid.node(b).g_cost));
        self.nbuf = nbuf;
        best
    }
}
