use std::fmt;

use astar_core::{Coord, Direction, Grid};

/// Internal inconsistencies found while turning parent links into a path.
///
/// These never stem from user input: a finished search always leaves a
/// complete chain from the end back to the start.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PathError {
    /// The parent chain stops (or loops) before reaching the start.
    BrokenChain { at: Coord },
    /// Two consecutive path entries are not a single step apart.
    InvalidPath { index: usize, at: Coord },
}

impl fmt::Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BrokenChain { at } => write!(f, "parent chain broken at {at}"),
            Self::InvalidPath { index, at } => {
                write!(f, "path step {index} from {at} is not a single move")
            }
        }
    }
}

impl std::error::Error for PathError {}

/// Follow parent links from the grid's end node back to its start and return
/// the coordinates in start-to-end order.
pub fn reconstruct(grid: &Grid) -> Result<Vec<Coord>, PathError> {
    let start = grid.start();
    let mut path = Vec::new();
    let mut id = grid.end();
    loop {
        let at = grid.coord(id);
        path.push(at);
        if id == start {
            break;
        }
        // A chain longer than the grid must contain a cycle.
        if path.len() > grid.len() {
            return Err(PathError::BrokenChain { at });
        }
        id = grid.node(id).parent.ok_or(PathError::BrokenChain { at })?;
    }
    path.reverse();
    Ok(path)
}

/// Moves between consecutive coordinates, picked from the signs of the
/// deltas. Coordinates that are equal or more than one step apart yield
/// [`PathError::InvalidPath`].
pub fn moves(path: &[Coord]) -> Result<Vec<Direction>, PathError> {
    path.windows(2)
        .enumerate()
        .map(|(index, pair)| {
            let (from, to) = (pair[0], pair[1]);
            match Direction::between(from, to) {
                Some(dir) if from.step(dir) == to => Ok(dir),
                _ => Err(PathError::InvalidPath { index, at: from }),
            }
        })
        .collect()
}
