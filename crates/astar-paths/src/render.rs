//! ASCII rendering of grids and solutions.
//!
//! [`render_map`] writes one token per cell followed by a blank column:
//!
//! ```text
//! S X W
//! X X E
//! ```
//!
//! [`render_solution`] doubles the resolution: map rows alternate with blank
//! rows, and every move of the path is drawn as an arrow in the gap between
//! the two cells it connects. Arrows point the way the path travels
//! (`^` north, `v` south, `<` west, `>` east, `/` and `\` for diagonals).
//!
//! ```text
//! S>X>X
//!     v
//! X X E
//! ```

use astar_core::{Coord, Direction, Grid};

use crate::reconstruct::PathError;

pub const START: char = 'S';
pub const END: char = 'E';
pub const WALL: char = 'W';
pub const OPEN: char = 'X';
pub const BLANK: char = ' ';

fn token(grid: &Grid, c: Coord) -> char {
    if c == grid.start_coord() {
        START
    } else if c == grid.end_coord() {
        END
    } else if grid.is_wall(c) {
        WALL
    } else {
        OPEN
    }
}

fn map_rows(grid: &Grid) -> Vec<Vec<char>> {
    (0..grid.height())
        .map(|y| {
            let mut row = Vec::with_capacity(2 * grid.width() as usize);
            for x in 0..grid.width() {
                row.push(token(grid, Coord::new(x, y)));
                row.push(BLANK);
            }
            row
        })
        .collect()
}

/// The plain map, one string per grid row, each `2 * width` characters.
pub fn render_map(grid: &Grid) -> Vec<String> {
    map_rows(grid)
        .into_iter()
        .map(|row| row.into_iter().collect())
        .collect()
}

/// The map at double resolution with `moves` drawn as arrows.
///
/// The result has `2 * height - 1` rows of `2 * width` characters. Moves are
/// replayed backwards from the end cell; they must lead back to the start
/// without leaving the grid.
pub fn render_solution(grid: &Grid, moves: &[Direction]) -> Result<Vec<String>, PathError> {
    let width = 2 * grid.width() as usize;
    let mut rows: Vec<Vec<char>> = Vec::with_capacity(2 * grid.height() as usize);
    for (y, row) in map_rows(grid).into_iter().enumerate() {
        if y > 0 {
            rows.push(vec![BLANK; width]);
        }
        rows.push(row);
    }

    let mut at = grid.end_coord();
    for (index, &dir) in moves.iter().enumerate().rev() {
        let back = dir.reverse().delta();
        let prev = at + back;
        if !grid.contains(prev) {
            return Err(PathError::InvalidPath { index, at: prev });
        }
        let half = at * 2 + back;
        rows[half.y as usize][half.x as usize] = dir.glyph();
        at = prev;
    }
    if at != grid.start_coord() {
        return Err(PathError::InvalidPath { index: 0, at });
    }

    Ok(rows.into_iter().map(|row| row.into_iter().collect()).collect())
}

/// Move names joined by `", "`, e.g. `"East, East, South"`.
pub fn render_moves(moves: &[Direction]) -> String {
    moves
        .iter()
        .map(|d| d.name())
        .collect::<Vec<_>>()
        .join(", ")
}
