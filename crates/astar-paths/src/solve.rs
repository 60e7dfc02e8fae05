use std::fmt;

use astar_core::{Coord, Direction, Grid, GridSpec, SpecError};

use crate::engine::{FailureReason, SearchEngine, SearchOptions, SearchState};
use crate::reconstruct::{PathError, moves, reconstruct};
use crate::render::render_solution;

/// Outcome of a search.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(tag = "status", rename_all = "snake_case")
)]
pub enum PathResult {
    Success {
        /// Cells from start to end, both included.
        path: Vec<Coord>,
        moves: Vec<Direction>,
        /// Accumulated `g` of the end node.
        cost: f64,
        /// Solution diagram, when requested.
        #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
        rendered: Option<Vec<String>>,
    },
    Failure {
        reason: FailureReason,
    },
}

impl PathResult {
    #[inline]
    pub fn is_success(&self) -> bool {
        matches!(self, PathResult::Success { .. })
    }

    /// The path, if one was found.
    pub fn path(&self) -> Option<&[Coord]> {
        match self {
            PathResult::Success { path, .. } => Some(path),
            PathResult::Failure { .. } => None,
        }
    }

    /// Number of moves in the path, if one was found.
    pub fn steps(&self) -> Option<usize> {
        self.path().map(|p| p.len().saturating_sub(1))
    }
}

/// Errors from [`solve`]: a rejected spec, or an internal inconsistency while
/// rebuilding the path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SolveError {
    Spec(SpecError),
    Path(PathError),
}

impl fmt::Display for SolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Spec(e) => write!(f, "invalid grid: {e}"),
            Self::Path(e) => write!(f, "internal search error: {e}"),
        }
    }
}

impl std::error::Error for SolveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Spec(e) => Some(e),
            Self::Path(e) => Some(e),
        }
    }
}

impl From<SpecError> for SolveError {
    fn from(e: SpecError) -> Self {
        Self::Spec(e)
    }
}

impl From<PathError> for SolveError {
    fn from(e: PathError) -> Self {
        Self::Path(e)
    }
}

/// Build a grid from `spec` and search it.
///
/// When `render` is set, a successful result carries the solution diagram.
pub fn solve(
    spec: &GridSpec,
    options: SearchOptions,
    render: bool,
) -> Result<PathResult, SolveError> {
    let mut grid = Grid::new(spec)?;
    solve_grid(&mut grid, options, render)
}

/// Search an already built grid. Its previous search state is discarded.
pub fn solve_grid(
    grid: &mut Grid,
    options: SearchOptions,
    render: bool,
) -> Result<PathResult, SolveError> {
    let state = SearchEngine::new(grid, options).run();
    match state {
        SearchState::Succeeded => {}
        SearchState::Failed(reason) => return Ok(PathResult::Failure { reason }),
        SearchState::Running => unreachable!("run() returned while still running"),
    }

    let path = reconstruct(grid)?;
    let moves = moves(&path)?;
    let rendered = if render {
        Some(render_solution(grid, &moves)?)
    } else {
        None
    };
    Ok(PathResult::Success {
        path,
        moves,
        cost: grid.node(grid.end()).g_cost,
        rendered,
    })
}
