//! The search [`Grid`]: an arena of [`Node`]s built from a [`GridSpec`].
//!
//! Nodes are stored row-major in a flat `Vec` and refer to each other by
//! [`NodeId`] (the flat index), so parent links and cached neighbor lists
//! never hold references into the arena.

use std::collections::HashSet;
use std::fmt;

use crate::geom::{Coord, Direction, Range};

/// Flat row-major index of a node inside its [`Grid`].
pub type NodeId = usize;

/// Total cost reported for nodes whose `g + h` is negative.
pub const INFINITE_COST: f64 = f64::INFINITY;

// ---------------------------------------------------------------------------
// GridSpec
// ---------------------------------------------------------------------------

/// Everything needed to build a [`Grid`]: dimensions, endpoints, walls and
/// the movement model.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridSpec {
    pub width: i32,
    pub height: i32,
    pub start: Coord,
    pub end: Coord,
    #[cfg_attr(feature = "serde", serde(default))]
    pub walls: Vec<Coord>,
    /// Allow the 4 diagonal moves in addition to the 4 orthogonal ones.
    #[cfg_attr(feature = "serde", serde(default))]
    pub diagonal: bool,
}

impl GridSpec {
    /// A wall-free, orthogonal-only spec.
    pub fn new(width: i32, height: i32, start: Coord, end: Coord) -> Self {
        Self {
            width,
            height,
            start,
            end,
            walls: Vec::new(),
            diagonal: false,
        }
    }

    pub fn with_walls(mut self, walls: impl IntoIterator<Item = Coord>) -> Self {
        self.walls.extend(walls);
        self
    }

    pub fn with_diagonal(mut self, diagonal: bool) -> Self {
        self.diagonal = diagonal;
        self
    }

    /// The rectangle covered by the spec.
    #[inline]
    pub fn bounds(&self) -> Range {
        Range::with_size(self.width, self.height)
    }

    /// Check the spec without building a grid.
    pub fn validate(&self) -> Result<(), SpecError> {
        if self.width <= 0 || self.height <= 0 {
            return Err(SpecError::NonPositiveSize {
                width: self.width,
                height: self.height,
            });
        }
        let bounds = self.bounds();
        for (endpoint, coord) in [(Endpoint::Start, self.start), (Endpoint::End, self.end)] {
            if !bounds.contains(coord) {
                return Err(SpecError::OutOfBounds { endpoint, coord });
            }
        }
        if self.start == self.end {
            return Err(SpecError::StartIsEnd(self.start));
        }
        for &wall in &self.walls {
            if !bounds.contains(wall) {
                return Err(SpecError::WallOutOfBounds(wall));
            }
            if wall == self.start {
                return Err(SpecError::OnWall {
                    endpoint: Endpoint::Start,
                    coord: wall,
                });
            }
            if wall == self.end {
                return Err(SpecError::OnWall {
                    endpoint: Endpoint::End,
                    coord: wall,
                });
            }
        }
        Ok(())
    }
}

/// Which endpoint a [`SpecError`] refers to.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Endpoint {
    Start,
    End,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Start => f.write_str("start"),
            Endpoint::End => f.write_str("end"),
        }
    }
}

/// Reasons a [`GridSpec`] cannot be turned into a [`Grid`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SpecError {
    /// Width or height is zero or negative.
    NonPositiveSize { width: i32, height: i32 },
    /// An endpoint lies outside the grid.
    OutOfBounds { endpoint: Endpoint, coord: Coord },
    /// An endpoint coincides with a wall.
    OnWall { endpoint: Endpoint, coord: Coord },
    /// Start and end are the same cell.
    StartIsEnd(Coord),
    /// A wall lies outside the grid.
    WallOutOfBounds(Coord),
}

impl fmt::Display for SpecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveSize { width, height } => {
                write!(f, "grid size must be positive, got {width}x{height}")
            }
            Self::OutOfBounds { endpoint, coord } => {
                write!(f, "{endpoint} {coord} is outside the grid")
            }
            Self::OnWall { endpoint, coord } => write!(f, "{endpoint} {coord} is on a wall"),
            Self::StartIsEnd(c) => write!(f, "start and end are both {c}"),
            Self::WallOutOfBounds(c) => write!(f, "wall {c} is outside the grid"),
        }
    }
}

impl std::error::Error for SpecError {}

// ---------------------------------------------------------------------------
// Node
// ---------------------------------------------------------------------------

/// Per-cell search state.
///
/// Topology (`coord`, wall flag, neighbor cache) is fixed by the [`Grid`];
/// the cost, visited and parent fields belong to whichever search is running.
#[derive(Clone, Debug)]
pub struct Node {
    coord: Coord,
    is_wall: bool,
    /// Accumulated distance from the start.
    pub g_cost: f64,
    /// Estimated distance to the end.
    pub h_cost: f64,
    /// Set once the node is in the closed set.
    pub visited: bool,
    pub parent: Option<NodeId>,
    neighbors: Option<Vec<NodeId>>,
}

impl Node {
    fn new(coord: Coord, is_wall: bool) -> Self {
        Self {
            coord,
            is_wall,
            g_cost: 0.0,
            h_cost: 0.0,
            visited: false,
            parent: None,
            neighbors: None,
        }
    }

    #[inline]
    pub fn coord(&self) -> Coord {
        self.coord
    }

    #[inline]
    pub fn is_wall(&self) -> bool {
        self.is_wall
    }

    /// `g + h`, or [`INFINITE_COST`] when that sum is negative so that an
    /// uninitialised node never ranks cheapest.
    pub fn total_cost(&self) -> f64 {
        let total = self.g_cost + self.h_cost;
        if total < 0.0 { INFINITE_COST } else { total }
    }

    /// Cached neighbor list, if already computed.
    #[inline]
    pub fn cached_neighbors(&self) -> Option<&[NodeId]> {
        self.neighbors.as_deref()
    }

    fn reset(&mut self) {
        self.g_cost = 0.0;
        self.h_cost = 0.0;
        self.visited = false;
        self.parent = None;
    }
}

// ---------------------------------------------------------------------------
// Grid
// ---------------------------------------------------------------------------

/// A `width × height` arena of [`Node`]s with designated start and end.
#[derive(Clone, Debug)]
pub struct Grid {
    bounds: Range,
    nodes: Vec<Node>,
    start: NodeId,
    end: NodeId,
    walls: HashSet<Coord>,
    diagonal: bool,
}

impl Grid {
    /// Build a grid from `spec`, rejecting invalid specs.
    pub fn new(spec: &GridSpec) -> Result<Self, SpecError> {
        spec.validate()?;
        let bounds = spec.bounds();
        let walls: HashSet<Coord> = spec.walls.iter().copied().collect();
        let nodes = bounds
            .iter()
            .map(|c| Node::new(c, walls.contains(&c)))
            .collect();
        let width = bounds.width() as usize;
        let flat = |c: Coord| c.y as usize * width + c.x as usize;
        Ok(Self {
            bounds,
            nodes,
            start: flat(spec.start),
            end: flat(spec.end),
            walls,
            diagonal: spec.diagonal,
        })
    }

    #[inline]
    pub fn bounds(&self) -> Range {
        self.bounds
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.bounds.width()
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.bounds.height()
    }

    /// Number of cells, walls included.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Whether diagonal moves are offered by [`neighbors_of`](Grid::neighbors_of).
    #[inline]
    pub fn diagonal(&self) -> bool {
        self.diagonal
    }

    #[inline]
    pub fn start(&self) -> NodeId {
        self.start
    }

    #[inline]
    pub fn end(&self) -> NodeId {
        self.end
    }

    #[inline]
    pub fn start_coord(&self) -> Coord {
        self.nodes[self.start].coord
    }

    #[inline]
    pub fn end_coord(&self) -> Coord {
        self.nodes[self.end].coord
    }

    /// Whether `c` lies inside the grid.
    #[inline]
    pub fn contains(&self, c: Coord) -> bool {
        self.bounds.contains(c)
    }

    /// Flat index of `c`, or `None` if out of bounds.
    #[inline]
    pub fn id(&self, c: Coord) -> Option<NodeId> {
        if !self.bounds.contains(c) {
            return None;
        }
        Some(c.y as usize * self.bounds.width() as usize + c.x as usize)
    }

    #[inline]
    pub fn coord(&self, id: NodeId) -> Coord {
        self.nodes[id].coord
    }

    #[inline]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    #[inline]
    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id]
    }

    /// The node at `c`, or `None` if out of bounds.
    pub fn node_at(&self, c: Coord) -> Option<&Node> {
        self.id(c).map(|id| &self.nodes[id])
    }

    /// Whether `c` is a wall. Out-of-bounds coordinates are not walls.
    #[inline]
    pub fn is_wall(&self, c: Coord) -> bool {
        self.walls.contains(&c)
    }

    /// Wall coordinates in row-major order.
    pub fn walls(&self) -> Vec<Coord> {
        let mut walls: Vec<Coord> = self.walls.iter().copied().collect();
        walls.sort();
        walls
    }

    /// Row-major iterator over all nodes.
    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    /// Passable neighbors of `id`, computed on first use and cached.
    ///
    /// Orthogonal neighbors come first (north, south, west, east). With
    /// diagonal movement, a diagonal neighbor is offered only where both
    /// orthogonal cells it passes between are inside the grid; those cells
    /// being walls does not block it.
    pub fn neighbors_of(&mut self, id: NodeId) -> &[NodeId] {
        if self.nodes[id].neighbors.is_none() {
            let list = self.compute_neighbors(self.nodes[id].coord);
            self.nodes[id].neighbors = Some(list);
        }
        self.nodes[id].neighbors.as_deref().unwrap_or(&[])
    }

    fn compute_neighbors(&self, c: Coord) -> Vec<NodeId> {
        let mut list = Vec::with_capacity(if self.diagonal { 8 } else { 4 });
        let mut push = |n: Coord| {
            if let Some(nid) = self.id(n) {
                if !self.nodes[nid].is_wall {
                    list.push(nid);
                }
            }
        };
        for dir in Direction::ORTHOGONAL {
            push(c.step(dir));
        }
        if self.diagonal {
            for dir in Direction::DIAGONAL {
                let d = dir.delta();
                let horizontal = c + Coord::new(d.x, 0);
                let vertical = c + Coord::new(0, d.y);
                if self.bounds.contains(horizontal) && self.bounds.contains(vertical) {
                    push(c + d);
                }
            }
        }
        list
    }

    /// Clear costs, visited flags and parents so another search can run.
    /// Neighbor caches are kept since topology never changes.
    pub fn reset_search(&mut self) {
        for node in &mut self.nodes {
            node.reset();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(w: i32, h: i32) -> GridSpec {
        GridSpec::new(w, h, Coord::new(0, 0), Coord::new(w - 1, h - 1))
    }

    fn neighbor_coords(g: &mut Grid, c: Coord) -> Vec<Coord> {
        let id = g.id(c).unwrap();
        let ids = g.neighbors_of(id).to_vec();
        ids.into_iter().map(|n| g.coord(n)).collect()
    }

    #[test]
    fn build_marks_walls_and_endpoints() {
        let s = spec(3, 2).with_walls([Coord::new(1, 0), Coord::new(1, 1)]);
        let g = Grid::new(&s).unwrap();
        assert_eq!(g.len(), 6);
        assert_eq!(g.width(), 3);
        assert_eq!(g.height(), 2);
        assert_eq!(g.start_coord(), Coord::new(0, 0));
        assert_eq!(g.end_coord(), Coord::new(2, 1));
        assert!(g.node_at(Coord::new(1, 1)).unwrap().is_wall());
        assert!(!g.node_at(Coord::new(2, 1)).unwrap().is_wall());
        assert!(g.node_at(Coord::new(3, 0)).is_none());
        assert_eq!(g.walls(), vec![Coord::new(1, 0), Coord::new(1, 1)]);
    }

    #[test]
    fn id_and_coord_round_trip() {
        let g = Grid::new(&spec(4, 3)).unwrap();
        for c in g.bounds() {
            let id = g.id(c).unwrap();
            assert_eq!(g.coord(id), c);
        }
        assert_eq!(g.id(Coord::new(-1, 0)), None);
        assert_eq!(g.id(Coord::new(0, 3)), None);
    }

    #[test]
    fn rejects_invalid_specs() {
        let err = Grid::new(&spec(0, 3)).unwrap_err();
        assert_eq!(err, SpecError::NonPositiveSize { width: 0, height: 3 });

        let s = GridSpec::new(3, 3, Coord::new(0, 0), Coord::new(3, 0));
        assert_eq!(
            Grid::new(&s).unwrap_err(),
            SpecError::OutOfBounds {
                endpoint: Endpoint::End,
                coord: Coord::new(3, 0)
            }
        );

        let s = GridSpec::new(3, 3, Coord::new(1, 1), Coord::new(1, 1));
        assert_eq!(Grid::new(&s).unwrap_err(), SpecError::StartIsEnd(Coord::new(1, 1)));

        let s = spec(3, 3).with_walls([Coord::new(0, 0)]);
        assert!(matches!(
            Grid::new(&s),
            Err(SpecError::OnWall {
                endpoint: Endpoint::Start,
                ..
            })
        ));

        let s = spec(3, 3).with_walls([Coord::new(5, 5)]);
        assert_eq!(
            Grid::new(&s).unwrap_err(),
            SpecError::WallOutOfBounds(Coord::new(5, 5))
        );
    }

    #[test]
    fn spec_error_messages() {
        let err = SpecError::OnWall {
            endpoint: Endpoint::End,
            coord: Coord::new(2, 3),
        };
        assert_eq!(err.to_string(), "end (2, 3) is on a wall");
    }

    #[test]
    fn orthogonal_neighbors_skip_walls_and_edges() {
        let s = spec(3, 3).with_walls([Coord::new(1, 0)]);
        let mut g = Grid::new(&s).unwrap();
        assert_eq!(neighbor_coords(&mut g, Coord::new(0, 0)), vec![Coord::new(0, 1)]);
        assert_eq!(
            neighbor_coords(&mut g, Coord::new(1, 1)),
            vec![Coord::new(1, 2), Coord::new(0, 1), Coord::new(2, 1)]
        );
    }

    #[test]
    fn diagonal_neighbors_cut_corners() {
        let s = spec(3, 3)
            .with_walls([Coord::new(1, 0), Coord::new(0, 1)])
            .with_diagonal(true);
        let mut g = Grid::new(&s).unwrap();
        // Both orthogonal cells are walls, the diagonal is still offered.
        assert_eq!(neighbor_coords(&mut g, Coord::new(0, 0)), vec![Coord::new(1, 1)]);
        assert_eq!(neighbor_coords(&mut g, Coord::new(1, 1)).len(), 6);
    }

    #[test]
    fn neighbors_are_cached_and_stable() {
        let mut g = Grid::new(&spec(4, 4).with_diagonal(true)).unwrap();
        let id = g.id(Coord::new(2, 2)).unwrap();
        assert!(g.node(id).cached_neighbors().is_none());
        let first = g.neighbors_of(id).to_vec();
        assert_eq!(g.node(id).cached_neighbors(), Some(first.as_slice()));
        assert_eq!(g.neighbors_of(id), first.as_slice());
        assert_eq!(first.len(), 8);
    }

    #[test]
    fn orthogonal_neighbors_are_symmetric() {
        let s = spec(5, 4).with_walls([Coord::new(2, 1), Coord::new(3, 3)]);
        let mut g = Grid::new(&s).unwrap();
        for a in 0..g.len() {
            if g.node(a).is_wall() {
                continue;
            }
            for b in g.neighbors_of(a).to_vec() {
                assert!(!g.node(b).is_wall());
                assert!(g.coord(a).is_adjacent(g.coord(b), false));
                assert!(g.neighbors_of(b).contains(&a));
            }
        }
    }

    #[test]
    fn total_cost_clamps_negative_sums() {
        let mut g = Grid::new(&spec(2, 2)).unwrap();
        let n = g.node_mut(0);
        n.g_cost = 2.0;
        n.h_cost = 1.5;
        assert_eq!(n.total_cost(), 3.5);
        n.g_cost = -4.0;
        assert_eq!(n.total_cost(), INFINITE_COST);
    }

    #[test]
    fn reset_search_keeps_topology() {
        let mut g = Grid::new(&spec(3, 3)).unwrap();
        let id = g.start();
        let _ = g.neighbors_of(id);
        let n = g.node_mut(id);
        n.g_cost = 3.0;
        n.visited = true;
        n.parent = Some(1);
        g.reset_search();
        let n = g.node(id);
        assert_eq!(n.g_cost, 0.0);
        assert!(!n.visited);
        assert_eq!(n.parent, None);
        assert!(n.cached_neighbors().is_some());
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn spec_defaults_walls_and_diagonal() {
        let json = r#"{"width":3,"height":2,"start":{"x":0,"y":0},"end":{"x":2,"y":1}}"#;
        let spec: GridSpec = serde_json::from_str(json).unwrap();
        assert_eq!(spec, GridSpec::new(3, 2, Coord::new(0, 0), Coord::new(2, 1)));
    }
}
