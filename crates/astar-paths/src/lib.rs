//! A* shortest paths on obstacle grids.
//!
//! This crate searches an [`astar_core::Grid`] and turns the outcome into
//! something printable:
//!
//! - **Search**: [`SearchEngine`] runs the open/closed-set loop, one
//!   [`step`](SearchEngine::step) at a time or to completion.
//! - **Reconstruction**: [`reconstruct`] walks parent links back from the
//!   end; [`moves`] converts the path into [`Direction`](astar_core::Direction)s.
//! - **Rendering**: [`render_map`], [`render_solution`] and [`render_moves`].
//! - **One call**: [`solve`] does all of the above from a
//!   [`GridSpec`](astar_core::GridSpec) and returns a [`PathResult`].
//!
//! # Failure taxonomy
//!
//! | Failure | Surfaces as |
//! |---|---|
//! | Invalid spec | [`SolveError::Spec`] |
//! | Open set exhausted | [`PathResult::Failure`] with [`FailureReason::NoPathExists`] |
//! | Iteration budget hit | [`PathResult::Failure`] with [`FailureReason::BudgetExceeded`] |
//! | Broken parent chain / bad move | [`SolveError::Path`] (a bug, never user input) |

mod distance;
mod engine;
mod reconstruct;
mod render;
mod solve;

pub use distance::{Metric, UnknownMetric, chebyshev, euclidean, manhattan};
pub use engine::{FailureReason, SearchEngine, SearchOptions, SearchState};
pub use reconstruct::{PathError, moves, reconstruct};
pub use render::{render_map, render_moves, render_solution};
pub use solve::{PathResult, SolveError, solve, solve_grid};
